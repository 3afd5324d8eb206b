use alloc::boxed::Box;
use core::fmt;

use crate::accessor::AccessorMode;
use crate::info::{DeclaredType, Invoker};
use crate::value::{InvokeError, ObjectRef, Value};

// -----------------------------------------------------------------------------
// AccessorOrigin

/// Where an accessor comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessorOrigin {
    /// A host method, by name.
    Method(Box<str>),
    /// A host field, by name.
    Field(Box<str>),
    /// Synthesized by an enhancer from other accessors of the property.
    Derived,
}

impl AccessorOrigin {
    /// Explicit methods take precedence over fields, fields over derived ones.
    #[inline]
    pub(crate) const fn rank(&self) -> u8 {
        match self {
            Self::Method(_) => 0,
            Self::Field(_) => 1,
            Self::Derived => 2,
        }
    }
}

impl fmt::Display for AccessorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method(name) => write!(f, "method `{name}`"),
            Self::Field(name) => write!(f, "field `{name}`"),
            Self::Derived => f.write_str("derived accessor"),
        }
    }
}

// -----------------------------------------------------------------------------
// Accessor

/// A callable bound to one property and one [`AccessorMode`].
///
/// Arguments follow the convention of the mode, see [`AccessorMode`].
#[derive(Clone, Debug)]
pub struct Accessor {
    mode: AccessorMode,
    value_type: DeclaredType,
    origin: AccessorOrigin,
    invoker: Invoker,
}

impl Accessor {
    #[inline]
    pub fn new(
        mode: AccessorMode,
        value_type: DeclaredType,
        origin: AccessorOrigin,
        invoker: Invoker,
    ) -> Self {
        Self {
            mode,
            value_type,
            origin,
            invoker,
        }
    }

    #[inline]
    pub const fn mode(&self) -> AccessorMode {
        self.mode
    }

    /// The type of the value read or written.
    ///
    /// For element modes this is the element type, for `SIZE` it is `Int`.
    #[inline]
    pub const fn value_type(&self) -> &DeclaredType {
        &self.value_type
    }

    #[inline]
    pub const fn origin(&self) -> &AccessorOrigin {
        &self.origin
    }

    #[inline]
    pub const fn invoker(&self) -> &Invoker {
        &self.invoker
    }

    /// Invokes the accessor on `target`.
    #[inline]
    pub fn invoke(&self, target: &ObjectRef, args: &[Value]) -> Result<Value, InvokeError> {
        self.invoker.call(target, args)
    }
}
