use alloc::borrow::Cow;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::info::{DeclaredType, Invoker};
use crate::value::{InvokeError, Object, Value};

// -----------------------------------------------------------------------------
// Visibility

/// The declared visibility of a raw member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

// -----------------------------------------------------------------------------
// MethodInfo

/// A raw method: name, parameter types, return type and invoker.
///
/// Methods are matched against naming conventions during introspection,
/// e.g. `set_name(Str)` becomes the WRITE accessor of the `name` property.
///
/// # Examples
///
/// ```
/// use vc_nav::info::{DeclaredType, MethodInfo};
///
/// struct Counter(i64);
/// # impl vc_nav::info::Typed for Counter {
/// #     fn class_info() -> &'static vc_nav::info::ClassInfo { unimplemented!() }
/// # }
///
/// let method = MethodInfo::exclusive("set_count", |this: &mut Counter, args| {
///     this.0 = vc_nav::value::arg::<i64>(args, 0)?;
///     Ok(vc_nav::Value::Null)
/// })
/// .with_params([DeclaredType::Int]);
///
/// assert_eq!(method.name(), "set_count");
/// assert_eq!(method.params(), &[DeclaredType::Int]);
/// assert_eq!(method.returns(), &DeclaredType::Unit);
/// ```
#[derive(Clone, Debug)]
pub struct MethodInfo {
    name: Cow<'static, str>,
    visibility: Visibility,
    params: Vec<DeclaredType>,
    returns: DeclaredType,
    invoker: Invoker,
}

impl MethodInfo {
    /// Creates a method with a shared receiver of type `T`.
    ///
    /// Defaults to no parameters, a [`Unit`](DeclaredType::Unit) return and public visibility.
    pub fn shared<T, F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        T: Object,
        F: Fn(&T, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        Self::with_invoker(name, Invoker::shared(f))
    }

    /// Creates a method with an exclusive receiver of type `T`.
    pub fn exclusive<T, F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        T: Object,
        F: Fn(&mut T, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        Self::with_invoker(name, Invoker::exclusive(f))
    }

    /// Creates a method from an existing [`Invoker`].
    pub fn with_invoker(name: impl Into<Cow<'static, str>>, invoker: Invoker) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            params: Vec::new(),
            returns: DeclaredType::Unit,
            invoker,
        }
    }

    /// Sets the parameter types.
    pub fn with_params(mut self, params: impl IntoIterator<Item = DeclaredType>) -> Self {
        self.params = params.into_iter().collect();
        self
    }

    /// Sets the return type.
    #[inline]
    pub fn returning(mut self, returns: DeclaredType) -> Self {
        self.returns = returns;
        self
    }

    /// Marks the method private.
    #[inline]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn params(&self) -> &[DeclaredType] {
        &self.params
    }

    #[inline]
    pub const fn returns(&self) -> &DeclaredType {
        &self.returns
    }

    #[inline]
    pub const fn invoker(&self) -> &Invoker {
        &self.invoker
    }
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A raw field: a named, typed slot with a getter and an optional setter.
///
/// Fields only contribute accessors when field accessors are enabled in the
/// [`IntrospectionConfig`](crate::introspect::IntrospectionConfig).
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: Cow<'static, str>,
    visibility: Visibility,
    ty: DeclaredType,
    getter: Invoker,
    setter: Option<Invoker>,
}

impl FieldInfo {
    /// Creates a read-only public field of receiver type `T`.
    pub fn new<T, G>(name: impl Into<Cow<'static, str>>, ty: DeclaredType, get: G) -> Self
    where
        T: Object,
        G: Fn(&T) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            ty,
            getter: Invoker::shared(move |this: &T, _: &[Value]| Ok(get(this))),
            setter: None,
        }
    }

    /// Adds a setter, making the field writable.
    pub fn settable<T, S>(mut self, set: S) -> Self
    where
        T: Object,
        S: Fn(&mut T, Value) -> Result<(), InvokeError> + Send + Sync + 'static,
    {
        self.setter = Some(Invoker::exclusive(move |this: &mut T, args: &[Value]| {
            let value = crate::value::arg::<Value>(args, 0)?;
            set(this, value).map(|()| Value::Null)
        }));
        self
    }

    /// Marks the field private.
    #[inline]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub const fn ty(&self) -> &DeclaredType {
        &self.ty
    }

    #[inline]
    pub const fn getter(&self) -> &Invoker {
        &self.getter
    }

    #[inline]
    pub const fn setter(&self) -> Option<&Invoker> {
        self.setter.as_ref()
    }
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A raw member of a [`ClassInfo`](crate::info::ClassInfo).
#[derive(Clone, Debug)]
pub enum MemberInfo {
    Method(MethodInfo),
    Field(FieldInfo),
}

impl MemberInfo {
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Self::Method(info) => info.name(),
            Self::Field(info) => info.name(),
        }
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        match self {
            Self::Method(info) => info.visibility(),
            Self::Field(info) => info.visibility(),
        }
    }

    #[inline]
    pub const fn as_method(&self) -> Option<&MethodInfo> {
        match self {
            Self::Method(info) => Some(info),
            Self::Field(_) => None,
        }
    }

    #[inline]
    pub const fn as_field(&self) -> Option<&FieldInfo> {
        match self {
            Self::Field(info) => Some(info),
            Self::Method(_) => None,
        }
    }
}

impl From<MethodInfo> for MemberInfo {
    #[inline]
    fn from(value: MethodInfo) -> Self {
        Self::Method(value)
    }
}

impl From<FieldInfo> for MemberInfo {
    #[inline]
    fn from(value: FieldInfo) -> Self {
        Self::Field(value)
    }
}
