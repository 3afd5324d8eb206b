use alloc::boxed::Box;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::{ClassInfo, Type, Typed};

// -----------------------------------------------------------------------------
// ClassRef

/// A reference to the [`ClassInfo`] of an object type.
///
/// Declarations usually hold a function pointer: `ClassInfo` is created on
/// first access, which also allows self-referential and mutually recursive
/// types. Runtime instances hand out the already resolved reference.
#[derive(Clone, Copy)]
pub struct ClassRef(ClassSource);

#[derive(Clone, Copy)]
enum ClassSource {
    Lazy(fn() -> &'static ClassInfo),
    Resolved(&'static ClassInfo),
}

impl ClassRef {
    /// Creates the [`ClassRef`] of `T`.
    #[inline]
    pub const fn of<T: Typed>() -> Self {
        Self(ClassSource::Lazy(T::class_info))
    }

    /// Creates a [`ClassRef`] from a function returning the class info.
    #[inline]
    pub const fn from_fn(f: fn() -> &'static ClassInfo) -> Self {
        Self(ClassSource::Lazy(f))
    }

    /// Creates a [`ClassRef`] from resolved class info.
    #[inline]
    pub const fn from_info(info: &'static ClassInfo) -> Self {
        Self(ClassSource::Resolved(info))
    }

    /// Returns the referenced [`ClassInfo`].
    #[inline]
    pub fn class_info(&self) -> &'static ClassInfo {
        match self.0 {
            ClassSource::Lazy(f) => f(),
            ClassSource::Resolved(info) => info,
        }
    }

    /// Returns the referenced [`Type`].
    #[inline]
    pub fn ty(&self) -> Type {
        self.class_info().ty()
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.ty() == other.ty()
    }
}

impl Eq for ClassRef {}

impl Hash for ClassRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty().hash(state);
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.ty(), f)
    }
}

// -----------------------------------------------------------------------------
// DeclaredType

/// The statically declared type of a member, with generic element types.
///
/// This is computed once per property during introspection and cached in
/// the property descriptor, rather than re-derived on every traversal.
///
/// - Plural types carry their element type (for maps: the value type, keys
///   are always strings). `None` means the declaration is *raw*, the element
///   type cannot be determined without an instance.
/// - [`DeclaredType::Unknown`] is both the erased type (e.g. a member typed as
///   "any value") and the sentinel surfaced by type-only evaluation.
///
/// # Examples
///
/// ```
/// use vc_nav::info::DeclaredType;
///
/// let ty = DeclaredType::list_of(DeclaredType::Float);
/// assert!(ty.is_plural());
/// assert_eq!(ty.element(), Some(&DeclaredType::Float));
/// assert_eq!(ty.to_string(), "List<Float>");
///
/// assert_eq!(DeclaredType::raw_list().element(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    #[default]
    Unknown,
    Unit,
    Bool,
    Int,
    Float,
    Str,
    List(Option<Box<DeclaredType>>),
    Map(Option<Box<DeclaredType>>),
    Object(ClassRef),
}

impl DeclaredType {
    /// A list with the given element type.
    #[inline]
    pub fn list_of(element: DeclaredType) -> Self {
        Self::List(Some(Box::new(element)))
    }

    /// A list whose element type is not declared.
    #[inline]
    pub const fn raw_list() -> Self {
        Self::List(None)
    }

    /// A string keyed map with the given value type.
    #[inline]
    pub fn map_of(value: DeclaredType) -> Self {
        Self::Map(Some(Box::new(value)))
    }

    /// A string keyed map whose value type is not declared.
    #[inline]
    pub const fn raw_map() -> Self {
        Self::Map(None)
    }

    /// An object of type `T`.
    #[inline]
    pub const fn object<T: Typed>() -> Self {
        Self::Object(ClassRef::of::<T>())
    }

    /// Returns `true` for [`DeclaredType::Unknown`].
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns `true` for lists and maps.
    #[inline]
    pub const fn is_plural(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Returns `true` for bool, numbers and strings.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Float | Self::Str)
    }

    /// Returns the declared element type of a list or the value type of a map.
    ///
    /// Returns `None` for raw plural types and for non plural types.
    pub fn element(&self) -> Option<&DeclaredType> {
        match self {
            Self::List(element) | Self::Map(element) => element.as_deref(),
            _ => None,
        }
    }

    /// Returns the class of an object type.
    #[inline]
    pub fn class(&self) -> Option<ClassRef> {
        match self {
            Self::Object(class) => Some(*class),
            _ => None,
        }
    }

    /// How much static information the declaration carries.
    ///
    /// Used to pick the most specific candidate when two members
    /// describe the same capability.
    pub fn specificity(&self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::List(None) | Self::Map(None) => 1,
            Self::List(Some(element)) | Self::Map(Some(element)) => {
                2_u8.saturating_add(element.specificity())
            }
            Self::Unit | Self::Bool | Self::Int | Self::Float | Self::Str | Self::Object(_) => 3,
        }
    }

    /// Whether two declarations can describe the same property.
    ///
    /// `Unknown` and raw element types are compatible with everything of the
    /// same shape.
    pub fn is_compatible(&self, other: &DeclaredType) -> bool {
        match (self, other) {
            (Self::Unknown, _) | (_, Self::Unknown) => true,
            (Self::List(a), Self::List(b)) | (Self::Map(a), Self::Map(b)) => match (a, b) {
                (Some(a), Some(b)) => a.is_compatible(b),
                _ => true,
            },
            (a, b) => a == b,
        }
    }

    /// A short name of the declaration kind.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Unit => "Unit",
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Str => "Str",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Object(_) => "Object",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(Some(element)) => write!(f, "List<{element}>"),
            Self::List(None) => f.write_str("List<?>"),
            Self::Map(Some(value)) => write!(f, "Map<Str, {value}>"),
            Self::Map(None) => f.write_str("Map<Str, ?>"),
            Self::Object(class) => fmt::Display::fmt(&class.ty(), f),
            other => f.write_str(other.kind_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DeclaredType;

    #[test]
    fn specificity_prefers_declared_elements() {
        let raw = DeclaredType::raw_list();
        let erased = DeclaredType::list_of(DeclaredType::Unknown);
        let typed = DeclaredType::list_of(DeclaredType::Str);

        assert!(DeclaredType::Unknown.specificity() < raw.specificity());
        assert!(raw.specificity() < erased.specificity());
        assert!(erased.specificity() < typed.specificity());
        assert!(DeclaredType::Unknown.specificity() < DeclaredType::Str.specificity());
    }

    #[test]
    fn compatibility() {
        let typed = DeclaredType::list_of(DeclaredType::Str);
        assert!(typed.is_compatible(&DeclaredType::raw_list()));
        assert!(typed.is_compatible(&DeclaredType::Unknown));
        assert!(!typed.is_compatible(&DeclaredType::list_of(DeclaredType::Int)));
        assert!(!DeclaredType::Int.is_compatible(&DeclaredType::Float));
        assert!(!DeclaredType::raw_map().is_compatible(&DeclaredType::raw_list()));
    }
}
