use alloc::string::String;
use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// SyntaxErrorKind

/// What went wrong while parsing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// The path or a segment between two separators is empty.
    EmptySegment,
    /// The path ends with a `.`.
    TrailingSeparator,
    /// A `[` is never closed.
    UnterminatedBracket,
    /// A `]` without a matching `[`.
    UnbalancedBracket,
    /// Nothing between `[` and `]`.
    EmptySelector,
    /// A selector that is neither an integer nor a quoted string.
    InvalidSelector,
    /// An index that does not fit the platform's `usize`.
    IndexOverflow,
    /// A quoted string is never closed.
    UnterminatedString,
    /// A backslash followed by a character that cannot be escaped.
    UnknownEscape(char),
    /// A function call without a name after `:`.
    ExpectedFunctionName,
    /// A function name not followed by `(`.
    ExpectedArguments,
    /// A `(` is never closed.
    UnterminatedCall,
    /// A function argument that is not a literal.
    InvalidLiteral,
    /// Any other character out of place.
    UnexpectedChar(char),
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySegment => f.write_str("empty segment"),
            Self::TrailingSeparator => f.write_str("trailing separator"),
            Self::UnterminatedBracket => f.write_str("unterminated bracket"),
            Self::UnbalancedBracket => f.write_str("unbalanced closing bracket"),
            Self::EmptySelector => f.write_str("empty index or key"),
            Self::InvalidSelector => f.write_str("expected an integer index or a quoted key"),
            Self::IndexOverflow => f.write_str("index is too large"),
            Self::UnterminatedString => f.write_str("unterminated string"),
            Self::UnknownEscape(c) => write!(f, "unknown escape `\\{c}`"),
            Self::ExpectedFunctionName => f.write_str("expected a function name"),
            Self::ExpectedArguments => f.write_str("expected `(`"),
            Self::UnterminatedCall => f.write_str("unterminated argument list"),
            Self::InvalidLiteral => f.write_str("expected a literal"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character `{c}`"),
        }
    }
}

// -----------------------------------------------------------------------------
// PathSyntaxError

/// An error that occurs when parsing a path.
///
/// The offset is the byte offset into the source string and is stable: the
/// same input always fails at the same offset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Encountered an error at offset {offset} while parsing `{path}`: {kind}")]
pub struct PathSyntaxError {
    pub offset: usize,
    pub path: String,
    pub kind: SyntaxErrorKind,
}
