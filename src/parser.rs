/// Characters that separate arguments on a command line.
const SEPARATORS: [char; 5] = [' ', '\t', '\r', '\n', '\x07'];

/// Strips leading and trailing whitespace from a raw input line.
pub fn trim_white(line: &str) -> &str {
    line.trim()
}

/// Splits a line into owned argument tokens.
///
/// Runs of separators collapse, so no token is ever empty. There is no
/// quoting, escaping or globbing: `"a b"` yields two tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(SEPARATORS)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}
