use std::env;
use std::fmt;

use crate::jobs::DEFAULT_CAPACITY;

pub const PROMPT_VAR: &str = "MY_PROMPT";
pub const MAX_JOBS_VAR: &str = "LASH_MAX_JOBS";

const DEFAULT_PROMPT: &str = "shell>";
const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Settings the shell reads once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub job_capacity: usize,
    pub history_limit: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            job_capacity: DEFAULT_CAPACITY,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ShellConfig::default();

        if let Some(prompt) = lookup(PROMPT_VAR) {
            config.prompt = prompt;
        }

        if let Some(value) = lookup(MAX_JOBS_VAR) {
            config.job_capacity = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: MAX_JOBS_VAR,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn with_job_capacity(mut self, capacity: usize) -> Self {
        self.job_capacity = capacity;
        self
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShellConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.prompt, "shell>");
        assert_eq!(config.job_capacity, 100);
    }

    #[test]
    fn test_prompt_is_verbatim() {
        let config = ShellConfig::from_lookup(lookup(&[("MY_PROMPT", "  $ ")])).unwrap();
        assert_eq!(config.prompt, "  $ ");
    }

    #[test]
    fn test_job_capacity() {
        let config = ShellConfig::from_lookup(lookup(&[("LASH_MAX_JOBS", "8")])).unwrap();
        assert_eq!(config.job_capacity, 8);

        for bad in ["0", "-1", "many"] {
            let result = ShellConfig::from_lookup(lookup(&[("LASH_MAX_JOBS", bad)]));
            assert!(matches!(
                result,
                Err(ConfigError::InvalidValue { key: "LASH_MAX_JOBS", .. })
            ));
        }
    }
}
