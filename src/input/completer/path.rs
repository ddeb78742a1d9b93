use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

/// Completes file and directory names for arguments.
#[derive(Clone, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir, prefix) = split_input(incomplete);
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(&prefix) {
                    return None;
                }
                let shown = if dir == Path::new(".") && !incomplete.starts_with("./") {
                    name
                } else {
                    dir.join(&name).to_string_lossy().into_owned()
                };
                Some(if entry.path().is_dir() {
                    Pair {
                        display: format!("{}/", shown),
                        replacement: format!("{}/", shown),
                    }
                } else {
                    Pair {
                        display: shown.clone(),
                        replacement: format!("{} ", shown),
                    }
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

/// Splits `incomplete` into the directory to scan and the name prefix.
fn split_input(incomplete: &str) -> (PathBuf, String) {
    if incomplete.is_empty() {
        return (PathBuf::from("."), String::new());
    }
    if incomplete.ends_with('/') {
        return (PathBuf::from(incomplete), String::new());
    }

    let path = Path::new(incomplete);
    let prefix = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    (dir, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_split_input() {
        assert_eq!(split_input(""), (PathBuf::from("."), String::new()));
        assert_eq!(split_input("/tmp/"), (PathBuf::from("/tmp/"), String::new()));
        assert_eq!(split_input("/tmp/fo"), (PathBuf::from("/tmp"), "fo".to_string()));
        assert_eq!(split_input("fo"), (PathBuf::from("."), "fo".to_string()));
    }

    #[test]
    fn test_complete_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("other"), "").unwrap();

        let base = format!("{}/n", dir.path().display());
        let pairs = PathCompleter::new().complete_path(&base);
        let replacements: Vec<String> = pairs.into_iter().map(|p| p.replacement).collect();

        assert_eq!(
            replacements,
            vec![
                format!("{}/nested/", dir.path().display()),
                format!("{}/notes.txt ", dir.path().display()),
            ]
        );
    }
}
