use miette::Diagnostic;
use thiserror::Error;

/// Main error type for matte operations
#[derive(Error, Diagnostic, Debug)]
pub enum MatteError {
    #[error("IO error: {0}")]
    #[diagnostic(code(matte::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(matte::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid grid: {message}")]
    #[diagnostic(code(matte::grid))]
    InvalidGrid {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(matte::config))]
    Configuration {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(matte::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl MatteError {
    /// Shorthand for a configuration error without help text.
    pub fn config(message: impl Into<String>) -> Self {
        MatteError::Configuration {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatteError>;
