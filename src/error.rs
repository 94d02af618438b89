use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogSiftError {
    // Fixed text: callers distinguish output-creation failures by this
    // exact message rather than by a generic I/O crash.
    #[error("File could not be created")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid search pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for LogSiftError {
    fn user_message(&self) -> String {
        match self {
            LogSiftError::OutputCreate { .. } => "File could not be created".to_string(),
            LogSiftError::Read { path, .. } => {
                format!("Failed to read {}", path.display())
            }
            LogSiftError::InvalidPattern { pattern, .. } => {
                format!("Invalid search pattern: {}", pattern)
            }
            LogSiftError::InvalidPath { path } => {
                format!("Invalid search path: {}", path)
            }
            LogSiftError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            LogSiftError::OutputCreate { path, .. } => Some(format!(
                "Check that the parent directory of {} exists and is writable.",
                path.display()
            )),
            LogSiftError::Read { .. } => Some(
                "Ensure the file is readable and not removed while the search is running."
                    .to_string(),
            ),
            LogSiftError::InvalidPattern { .. } => Some(
                "The keyword is interpreted as a regular expression. Escape metacharacters \
                 like '(', '[' or '*' with a backslash to match them literally."
                    .to_string(),
            ),
            LogSiftError::InvalidPath { .. } => {
                Some("The search path must be an existing, readable directory.".to_string())
            }
            LogSiftError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for LogSiftError {
    fn from(error: toml::de::Error) -> Self {
        LogSiftError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LogSiftError>;
