use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::accessor::AccessorMode;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Literal

/// A literal function argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Literal {
    /// Converts to a [`Value`].
    pub fn to_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(v) => Value::Bool(*v),
            Self::Int(v) => Value::Int(*v),
            Self::Float(v) => Value::Float(*v),
            Self::Str(v) => Value::Str(v.clone()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            // `{:?}` keeps the decimal point, so the literal parses back as a float.
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Str(v) => write_quoted(f, v),
        }
    }
}

pub(super) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("'")?;
    for c in s.chars() {
        if c == '\'' {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("'")
}

// -----------------------------------------------------------------------------
// Selector

/// The part of a segment in brackets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `[3]`
    Index(usize),
    /// `['key']`
    Key(Box<str>),
}

impl Selector {
    /// The accessor mode reading through the selector.
    #[inline]
    pub const fn read_mode(&self) -> AccessorMode {
        match self {
            Self::Index(_) => AccessorMode::INDEXED_READ,
            Self::Key(_) => AccessorMode::KEYED_READ,
        }
    }

    /// The accessor mode writing through the selector.
    #[inline]
    pub const fn write_mode(&self) -> AccessorMode {
        match self {
            Self::Index(_) => AccessorMode::INDEXED_WRITE,
            Self::Key(_) => AccessorMode::KEYED_WRITE,
        }
    }

    /// The leading accessor argument.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Index(index) => Value::from(*index),
            Self::Key(key) => Value::Str(String::from(&**key)),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => {
                f.write_str("[")?;
                write_quoted(f, key)?;
                f.write_str("]")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// FunctionCall

/// A `:name(args)` suffix of a segment.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub(super) name: Box<str>,
    pub(super) args: Box<[Literal]>,
}

impl FunctionCall {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn args(&self) -> &[Literal] {
        &self.args
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}(", self.name)?;
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

// -----------------------------------------------------------------------------
// Segment

/// One step of a [`Path`](crate::Path).
#[derive(Debug, Clone)]
pub struct Segment {
    pub(super) name: Box<str>,
    pub(super) selector: Option<Selector>,
    pub(super) function: Option<FunctionCall>,
    pub(super) offset: usize,
}

impl Segment {
    /// The property name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }

    #[inline]
    pub const fn function(&self) -> Option<&FunctionCall> {
        self.function.as_ref()
    }

    /// The byte offset of the segment in the source string.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the type after this segment depends on more than the
    /// declared property type: it indexes, keys or calls a function.
    #[inline]
    pub const fn is_type_ambiguous(&self) -> bool {
        self.selector.is_some() || self.function.is_some()
    }

    /// The accessor mode reading this segment.
    #[inline]
    pub const fn read_mode(&self) -> AccessorMode {
        match &self.selector {
            Some(selector) => selector.read_mode(),
            None => AccessorMode::READ,
        }
    }
}

/// Offsets only locate errors, they are not part of the structure.
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.selector == other.selector && self.function == other.function
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(selector) = &self.selector {
            write!(f, "{selector}")?;
        }
        if let Some(function) = &self.function {
            write!(f, "{function}")?;
        }
        Ok(())
    }
}
