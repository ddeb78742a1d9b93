use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use super::{Command, CommandContext, CommandError, Flow};

/// Changes the working directory and prints where the shell ended up.
///
/// With no argument the target is `$HOME`, falling back to the user's
/// entry in the password database when `HOME` is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CdCommand;

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<Flow, CommandError> {
        let target = resolve_target(args.first().map(String::as_str), env::var_os("HOME"))?;

        env::set_current_dir(&target).map_err(|source| CommandError::Directory {
            path: target.clone(),
            source,
        })?;
        let cwd = env::current_dir().map_err(|source| CommandError::Directory {
            path: target,
            source,
        })?;

        writeln!(ctx.out, "Current directory: {}", cwd.display())?;
        Ok(Flow::Continue)
    }
}

fn resolve_target(arg: Option<&str>, home: Option<OsString>) -> Result<PathBuf, CommandError> {
    match (arg, home) {
        (Some(path), _) => Ok(PathBuf::from(path)),
        (None, Some(home)) => Ok(PathBuf::from(home)),
        (None, None) => dirs::home_dir().ok_or(CommandError::HomeDirNotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::tests::run;
    use crate::input::tests::ScriptedReader;
    use crate::jobs::JobTable;

    #[test]
    fn test_resolve_target() {
        assert_eq!(
            resolve_target(Some("/tmp"), Some("/home/me".into())).unwrap(),
            PathBuf::from("/tmp")
        );
        assert_eq!(
            resolve_target(None, Some("/home/me".into())).unwrap(),
            PathBuf::from("/home/me")
        );
        // Without HOME the password database answers, if it knows us.
        if let Ok(target) = resolve_target(None, None) {
            assert!(target.is_absolute());
        }
    }

    #[test]
    fn test_cd_success_and_failure() {
        let original = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let canonical = dir.path().canonicalize().unwrap();
        let mut jobs = JobTable::new(1);
        let history = ScriptedReader::default();

        let line = format!("cd {}", dir.path().display());
        let (result, out) = run(&line, &mut jobs, &history);
        assert!(result.unwrap().is_ok());
        assert_eq!(out, format!("Current directory: {}\n", canonical.display()));
        assert_eq!(env::current_dir().unwrap(), canonical);

        let missing = dir.path().join("does-not-exist");
        let (result, out) = run(&format!("cd {}", missing.display()), &mut jobs, &history);
        match result {
            Some(Err(CommandError::Directory { path, source })) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected a directory error, got {:?}", other),
        }
        assert!(out.is_empty());
        assert_eq!(env::current_dir().unwrap(), canonical);

        env::set_current_dir(original).unwrap();
    }
}
