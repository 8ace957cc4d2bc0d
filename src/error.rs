//! Error types.
//!
//! The engine reports failures through [`CalcError`]; the `tire` binary wraps
//! everything in [`AppError`], which carries the process exit code.

use thiserror::Error;

/// A tire-size string that matches none of the supported grammars.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid tire size '{input}': {reason}")]
pub struct ParseError {
    pub input: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// A numeric input that is non-positive, NaN or otherwise unusable.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid {field}: {value} ({reason})")]
pub struct InvalidConfigError {
    pub field: &'static str,
    pub value: f64,
    pub reason: &'static str,
}

/// Engine-level failure. Either the caller gets a complete result or one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    InvalidConfig(#[from] InvalidConfigError),
}

/// Check that `value` is finite and strictly positive.
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, InvalidConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidConfigError {
            field,
            value,
            reason: "must be finite and > 0",
        })
    }
}

/// Check that `value` is finite and not negative.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64, InvalidConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InvalidConfigError {
            field,
            value,
            reason: "must be finite and >= 0",
        })
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
