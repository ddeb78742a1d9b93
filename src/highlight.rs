use inksac::prelude::*;

/// Colors the line being edited: the command word and any flags.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn without_color() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    pub fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Returns `input` with escape codes added. Spacing is left exactly as
    /// typed.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut seen_command = false;
        let parts: Vec<String> = input
            .split(' ')
            .map(|part| {
                if part.is_empty() {
                    String::new()
                } else if !seen_command {
                    seen_command = true;
                    let command_style = Style::builder().foreground(Color::Cyan).bold().build();
                    part.to_string().style(command_style).to_string()
                } else if part.starts_with('-') {
                    let flag_style = Style::builder().foreground(Color::Yellow).build();
                    part.to_string().style(flag_style).to_string()
                } else {
                    part.to_string()
                }
            })
            .collect();

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_is_identity() {
        let highlighter = SyntaxHighlighter::without_color();
        assert_eq!(highlighter.highlight_command("ls  -la  /tmp"), "ls  -la  /tmp");
    }

    #[test]
    fn test_color_keeps_words_and_spacing() {
        let highlighter = SyntaxHighlighter::new();
        if !highlighter.enabled() {
            return;
        }
        let out = highlighter.highlight_command("ls  -la");
        assert!(out.contains("ls"));
        assert!(out.contains("-la"));
        assert!(out.contains("  "));
        assert_ne!(out, "ls  -la");
    }
}
