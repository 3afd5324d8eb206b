use alloc::string::String;

use thiserror::Error;

/// A failure reported by a path function.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum FunctionError {
    #[error("expected {expected} argument(s), found {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("argument {index} must be {expected}")]
    ArgumentType { index: usize, expected: &'static str },

    #[error("cannot apply to {found}, expected {expected}")]
    Input {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Custom(String),
}

impl FunctionError {
    #[inline]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
