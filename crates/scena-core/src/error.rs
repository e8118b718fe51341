//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScenaError {
    /// Malformed table structure or an argument the scenario does not declare.
    #[error("SYNTAX/{0}")]
    Syntax(String),

    #[error("TABLE/{0}")]
    TableCreation(String),

    #[error("CONFIG/{0}")]
    Config(String),

    /// Raised by a fixture invoker; the runner turns it into an error tally.
    #[error("EXEC/{0}")]
    Execution(String),
}

impl ScenaError {
    pub fn syntax(message: impl Into<String>) -> Self {
        ScenaError::Syntax(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ScenaError>;
