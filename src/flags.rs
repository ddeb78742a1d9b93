use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<&'static str, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub set: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        flags.insert(
            "version",
            Flag {
                short: "-v",
                long: "--version",
                description: "Print the shell version and exit",
                set: false,
            },
        );

        flags.insert(
            "help",
            Flag {
                short: "-h",
                long: "--help",
                description: "Print this help message",
                set: false,
            },
        );

        flags.insert(
            "debug",
            Flag {
                short: "-d",
                long: "--debug",
                description: "Log process control decisions to stderr",
                set: false,
            },
        );

        Flags { flags }
    }

    /// Marks every recognised flag in `args`. Anything else is an error.
    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        for arg in args {
            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == flag.short || arg == flag.long)
                .ok_or_else(|| ShellError::FlagError(format!("unknown option {}", arg)))?;
            flag.set = true;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(|f| f.set)
    }

    pub fn usage(program: &str) -> String {
        format!("Usage: {} [-v] [-h] [-d]", program)
    }

    pub fn print_help(&self, program: &str) {
        println!("{}", Self::usage(program));
        println!("\nOptions:");
        for flag in self.flags.values() {
            println!("  {}, {:<12} {}", flag.short, flag.long, flag.description);
        }
    }
}
