pub mod builtins;
pub mod config;
pub mod error;
pub mod flags;
pub mod highlight;
pub mod input;
pub mod jobs;
pub mod parser;
pub mod process;
pub mod shell;
