use alloc::sync::Arc;
use core::fmt;

use crate::func::FunctionError;
use crate::info::DeclaredType;
use crate::navigate::NavContext;
use crate::path::Literal;
use crate::value::Value;

type ValueFn = dyn Fn(Value, &[Literal], &NavContext) -> Result<Value, FunctionError> + Send + Sync;
type TypeFn =
    dyn Fn(&DeclaredType, &[Literal], &NavContext) -> Result<DeclaredType, FunctionError> + Send + Sync;

// -----------------------------------------------------------------------------
// Function

/// A function callable from a path segment, e.g. `name:upper()`.
///
/// Receives the current value, the literal arguments and the navigation
/// context, and returns the replacement value. An optional type function
/// does the same for type-only evaluation; without one, the result type is
/// [`DeclaredType::Unknown`].
///
/// Functions must not assume anything about the path or context beyond what
/// they are passed.
///
/// # Examples
///
/// ```
/// use vc_nav::func::{Function, FunctionError};
/// use vc_nav::info::DeclaredType;
/// use vc_nav::{NavContext, Value};
///
/// let double = Function::new(|value, _, _| match value {
///     Value::Int(n) => Ok(Value::Int(n * 2)),
///     other => Err(FunctionError::Input { expected: "Int", found: other.kind_name() }),
/// })
/// .with_type(|_, _, _| Ok(DeclaredType::Int));
///
/// let ctx = NavContext::new();
/// assert_eq!(double.apply(Value::Int(4), &[], &ctx), Ok(Value::Int(8)));
/// assert_eq!(double.apply_type(&DeclaredType::Int, &[], &ctx), Ok(DeclaredType::Int));
/// ```
#[derive(Clone)]
pub struct Function {
    value: Arc<ValueFn>,
    ty: Option<Arc<TypeFn>>,
}

impl Function {
    /// Creates a function from its value-mode callable.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value, &[Literal], &NavContext) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        Self {
            value: Arc::new(f),
            ty: None,
        }
    }

    /// Adds the type-mode callable.
    pub fn with_type<F>(mut self, f: F) -> Self
    where
        F: Fn(&DeclaredType, &[Literal], &NavContext) -> Result<DeclaredType, FunctionError>
            + Send
            + Sync
            + 'static,
    {
        let ty: Arc<TypeFn> = Arc::new(f);
        self.ty = Some(ty);
        self
    }

    /// Applies the function to a value.
    #[inline]
    pub fn apply(&self, value: Value, args: &[Literal], ctx: &NavContext) -> Result<Value, FunctionError> {
        (self.value)(value, args, ctx)
    }

    /// Applies the function to a declared type.
    pub fn apply_type(
        &self,
        ty: &DeclaredType,
        args: &[Literal],
        ctx: &NavContext,
    ) -> Result<DeclaredType, FunctionError> {
        match &self.ty {
            Some(f) => f(ty, args, ctx),
            None => Ok(DeclaredType::Unknown),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("typed", &self.ty.is_some())
            .finish_non_exhaustive()
    }
}
