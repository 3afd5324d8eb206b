use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// Type

/// The identity of a host type: its [`TypeId`], full type path and short name.
///
/// Equality and hashing only consider the [`TypeId`].
///
/// # Examples
///
/// ```
/// use vc_nav::info::Type;
///
/// let ty = Type::of::<Vec<String>>();
/// assert!(ty.is::<Vec<String>>());
/// assert_eq!(ty.name(), "Vec<alloc::string::String>");
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    pub fn of<T: ?Sized + Any>() -> Self {
        let path = core::any::type_name::<T>();
        Self {
            id: TypeId::of::<T>(),
            path,
            name: short_name(path),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, e.g. `my_crate::model::Order`.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the type path without module prefix, e.g. `Order`.
    ///
    /// Generic arguments are kept as written in the full path.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check if this is the type `T`.
    #[inline]
    pub fn is<T: ?Sized + Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

// Strip the module path of the outermost type, leaving generics untouched.
fn short_name(path: &'static str) -> &'static str {
    let head = match path.find('<') {
        Some(index) => &path[..index],
        None => path,
    };
    match head.rfind("::") {
        Some(index) => &path[index + 2..],
        None => path,
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::short_name;

    #[test]
    fn short_names() {
        assert_eq!(short_name("i64"), "i64");
        assert_eq!(short_name("a::b::Order"), "Order");
        assert_eq!(short_name("a::Wrapper<b::Item>"), "Wrapper<b::Item>");
    }
}
