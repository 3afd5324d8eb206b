use core::fmt;

// -----------------------------------------------------------------------------
// AccessorMode

/// The kind of capability an accessor provides for a property.
///
/// The set of modes is open: matchers and enhancers may introduce their own
/// with [`AccessorMode::new`]. Modes compare by name.
///
/// Each built-in mode has a fixed argument convention:
///
/// | mode            | arguments          | result                |
/// |-----------------|--------------------|-----------------------|
/// | `READ`          | `[]`               | the property value    |
/// | `WRITE`         | `[value]`          | ignored               |
/// | `ADD`           | `[element]`        | ignored               |
/// | `REMOVE`        | `[element or key]` | `Bool` or the removed |
/// | `SIZE`          | `[]`               | `Int`                 |
/// | `INDEXED_READ`  | `[Int]`            | the element           |
/// | `INDEXED_WRITE` | `[Int, element]`   | ignored               |
/// | `KEYED_READ`    | `[Str]`            | the element           |
/// | `KEYED_WRITE`   | `[Str, element]`   | ignored               |
///
/// # Examples
///
/// ```
/// use vc_nav::accessor::AccessorMode;
///
/// const CLEAR: AccessorMode = AccessorMode::new("CLEAR");
///
/// assert_eq!(AccessorMode::READ.name(), "READ");
/// assert_ne!(CLEAR, AccessorMode::REMOVE);
/// assert_eq!(CLEAR, AccessorMode::new("CLEAR"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccessorMode(&'static str);

impl AccessorMode {
    pub const READ: Self = Self("READ");
    pub const WRITE: Self = Self("WRITE");
    pub const ADD: Self = Self("ADD");
    pub const REMOVE: Self = Self("REMOVE");
    pub const SIZE: Self = Self("SIZE");
    pub const INDEXED_READ: Self = Self("INDEXED_READ");
    pub const INDEXED_WRITE: Self = Self("INDEXED_WRITE");
    pub const KEYED_READ: Self = Self("KEYED_READ");
    pub const KEYED_WRITE: Self = Self("KEYED_WRITE");

    /// Creates a mode with the given name.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.0
    }

    /// Returns `true` for modes that address one element of a plural property.
    pub fn is_element_mode(&self) -> bool {
        matches!(
            *self,
            Self::ADD
                | Self::REMOVE
                | Self::INDEXED_READ
                | Self::INDEXED_WRITE
                | Self::KEYED_READ
                | Self::KEYED_WRITE
        )
    }
}

impl fmt::Debug for AccessorMode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for AccessorMode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
