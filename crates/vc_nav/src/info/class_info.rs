use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use std::sync::OnceLock;

use crate::info::{FieldInfo, MemberInfo, MethodInfo, Type};
use crate::value::{Object, ObjectRef};

// -----------------------------------------------------------------------------
// ClassInfo

/// All raw members of one host type, in declaration order.
///
/// The order is significant: it is the stable discovery order used to break
/// ties between conflicting accessor candidates.
///
/// A `ClassInfo` may also carry a constructor producing a default instance,
/// used by the default [`ObjectFactory`](crate::navigate::ObjectFactory)
/// when a missing intermediate has to be created.
pub struct ClassInfo {
    ty: Type,
    members: Vec<MemberInfo>,
    constructor: Option<fn() -> ObjectRef>,
}

impl ClassInfo {
    /// Starts describing the members of `T`.
    #[inline]
    pub fn builder<T: Any>() -> ClassInfoBuilder {
        ClassInfoBuilder {
            ty: Type::of::<T>(),
            members: Vec::new(),
            constructor: None,
        }
    }

    /// Returns the described [`Type`].
    #[inline]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    /// Returns the members in declaration order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Returns the first member with the given name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|member| member.name() == name)
    }

    /// Returns `true` if a default instance can be constructed.
    #[inline]
    pub const fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Constructs a default instance, if a constructor was declared.
    #[inline]
    pub fn construct(&self) -> Option<ObjectRef> {
        self.constructor.map(|f| f())
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("ty", &self.ty)
            .field("members", &self.members)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ClassInfoBuilder

/// Builder returned by [`ClassInfo::builder`].
pub struct ClassInfoBuilder {
    ty: Type,
    members: Vec<MemberInfo>,
    constructor: Option<fn() -> ObjectRef>,
}

impl ClassInfoBuilder {
    /// Appends a raw method.
    #[inline]
    pub fn method(mut self, method: MethodInfo) -> Self {
        self.members.push(MemberInfo::Method(method));
        self
    }

    /// Appends a raw field.
    #[inline]
    pub fn field(mut self, field: FieldInfo) -> Self {
        self.members.push(MemberInfo::Field(field));
        self
    }

    /// Declares a constructor producing default instances.
    #[inline]
    pub fn constructor(mut self, constructor: fn() -> ObjectRef) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Declares [`Default`] as the constructor.
    #[inline]
    pub fn default_constructor<T: Object + Default>(self) -> Self {
        self.constructor(|| ObjectRef::new(T::default()))
    }

    #[inline]
    pub fn build(self) -> ClassInfo {
        ClassInfo {
            ty: self.ty,
            members: self.members,
            constructor: self.constructor,
        }
    }
}

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the raw members of a host type.
///
/// Implementing this makes the type an [`Object`] that can be navigated.
/// Use a [`ClassInfoCell`] to build the [`ClassInfo`] once.
///
/// # Examples
///
/// ```
/// use vc_nav::prelude::*;
///
/// struct Point { x: i64 }
///
/// impl Typed for Point {
///     fn class_info() -> &'static ClassInfo {
///         static CELL: ClassInfoCell = ClassInfoCell::new();
///         CELL.get_or_init(|| {
///             ClassInfo::builder::<Self>()
///                 .field(FieldInfo::new("x", DeclaredType::Int, |this: &Point| this.x.into()))
///                 .build()
///         })
///     }
/// }
///
/// let point = ObjectRef::new(Point { x: 3 });
/// assert!(point.class_info().ty().is::<Point>());
/// ```
pub trait Typed: Any + Send + Sync {
    /// Returns the static class information of this type.
    fn class_info() -> &'static ClassInfo;
}

// -----------------------------------------------------------------------------
// ClassInfoCell

/// A `static` container for a non-generic type's [`ClassInfo`].
///
/// The info is built on first access, at most once.
pub struct ClassInfoCell(OnceLock<ClassInfo>);

impl ClassInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> ClassInfo) -> &ClassInfo {
        self.0.get_or_init(f)
    }
}
