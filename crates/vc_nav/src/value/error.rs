use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// InvokeError

/// A failure reported by a host member or a derived accessor.
///
/// [`IndexOutOfBounds`](Self::IndexOutOfBounds) and
/// [`MissingKey`](Self::MissingKey) are absence events: the navigator
/// handles them according to the traversal mode instead of failing.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum InvokeError {
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("key `{0}` is not present")]
    MissingKey(String),

    #[error("receiver is not a `{expected}`")]
    ReceiverMismatch { expected: &'static str },

    #[error("member needs an exclusive receiver")]
    ExclusiveReceiver,

    #[error("expected {expected} argument(s), found {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("argument {index} expected {expected}, found {found}")]
    ArgumentType {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Custom(String),
}

impl InvokeError {
    /// A receiver mismatch for the expected type `T`.
    #[inline]
    pub fn receiver<T: ?Sized>() -> Self {
        Self::ReceiverMismatch {
            expected: core::any::type_name::<T>(),
        }
    }

    /// A free-form failure.
    #[inline]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Returns `true` for errors describing an absent element.
    #[inline]
    pub const fn is_absence(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. } | Self::MissingKey(_))
    }
}
