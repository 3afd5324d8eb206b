use crate::info::DeclaredType;

// -----------------------------------------------------------------------------
// TypeReflector

/// The shape of a plural type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PluralKind {
    List,
    Map,
}

/// Answers questions about generic declared types.
///
/// Injected into the introspector and the navigator, so the engine does not
/// depend on one host type system.
pub trait TypeReflector: Send + Sync {
    /// Returns the plural kind of `ty`, or `None` if it is not plural.
    fn plural_kind(&self, ty: &DeclaredType) -> Option<PluralKind>;

    /// Returns the declared element type of a list or value type of a map.
    ///
    /// `None` if `ty` is not plural or the element type cannot be
    /// determined uniquely (raw or erased).
    fn element_type(&self, ty: &DeclaredType) -> Option<DeclaredType>;

    /// Returns the key type of a map.
    fn key_type(&self, ty: &DeclaredType) -> Option<DeclaredType>;

    #[inline]
    fn is_plural(&self, ty: &DeclaredType) -> bool {
        self.plural_kind(ty).is_some()
    }
}

/// The [`TypeReflector`] for [`DeclaredType`] as described by `info`.
///
/// # Examples
///
/// ```
/// use vc_nav::info::DeclaredType;
/// use vc_nav::introspect::{StandardTypeReflector, TypeReflector};
///
/// let types = StandardTypeReflector;
/// let scores = DeclaredType::map_of(DeclaredType::Int);
///
/// assert_eq!(types.element_type(&scores), Some(DeclaredType::Int));
/// assert_eq!(types.key_type(&scores), Some(DeclaredType::Str));
/// assert_eq!(types.element_type(&DeclaredType::raw_list()), None);
/// assert_eq!(types.element_type(&DeclaredType::list_of(DeclaredType::Unknown)), None);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardTypeReflector;

impl TypeReflector for StandardTypeReflector {
    fn plural_kind(&self, ty: &DeclaredType) -> Option<PluralKind> {
        match ty {
            DeclaredType::List(_) => Some(PluralKind::List),
            DeclaredType::Map(_) => Some(PluralKind::Map),
            _ => None,
        }
    }

    fn element_type(&self, ty: &DeclaredType) -> Option<DeclaredType> {
        ty.element().filter(|e| !e.is_unknown()).cloned()
    }

    fn key_type(&self, ty: &DeclaredType) -> Option<DeclaredType> {
        match ty {
            DeclaredType::Map(_) => Some(DeclaredType::Str),
            _ => None,
        }
    }
}
