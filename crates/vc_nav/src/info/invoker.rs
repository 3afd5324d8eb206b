use alloc::sync::Arc;
use core::fmt;

use crate::value::{InvokeError, Object, ObjectRef, Value};

type SharedFn = dyn Fn(&dyn Object, &[Value]) -> Result<Value, InvokeError> + Send + Sync;
type ExclusiveFn = dyn Fn(&mut dyn Object, &[Value]) -> Result<Value, InvokeError> + Send + Sync;

// -----------------------------------------------------------------------------
// Invoker

/// A type-erased member callable.
///
/// The receiver is either borrowed shared (reads) or exclusive (writes),
/// which decides the lock taken on the [`ObjectRef`] during [`call`].
///
/// [`call`]: Invoker::call
#[derive(Clone)]
pub enum Invoker {
    Shared(Arc<SharedFn>),
    Exclusive(Arc<ExclusiveFn>),
}

impl Invoker {
    /// Creates a shared invoker for receivers of type `T`.
    ///
    /// The receiver is downcast before `f` runs; a receiver of another type
    /// results in [`InvokeError::ReceiverMismatch`].
    pub fn shared<T, F>(f: F) -> Self
    where
        T: Object,
        F: Fn(&T, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        Self::Shared(Arc::new(move |this: &dyn Object, args: &[Value]| {
            match this.as_any().downcast_ref::<T>() {
                Some(this) => f(this, args),
                None => Err(InvokeError::receiver::<T>()),
            }
        }))
    }

    /// Creates an exclusive invoker for receivers of type `T`.
    pub fn exclusive<T, F>(f: F) -> Self
    where
        T: Object,
        F: Fn(&mut T, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    {
        Self::Exclusive(Arc::new(move |this: &mut dyn Object, args: &[Value]| {
            match this.as_any_mut().downcast_mut::<T>() {
                Some(this) => f(this, args),
                None => Err(InvokeError::receiver::<T>()),
            }
        }))
    }

    /// Creates a shared invoker from an already type-erased function.
    #[inline]
    pub fn erased_shared(
        f: impl Fn(&dyn Object, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    ) -> Self {
        Self::Shared(Arc::new(f))
    }

    /// Creates an exclusive invoker from an already type-erased function.
    #[inline]
    pub fn erased_exclusive(
        f: impl Fn(&mut dyn Object, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
    ) -> Self {
        Self::Exclusive(Arc::new(f))
    }

    /// Returns `true` if the invoker needs an exclusive receiver.
    #[inline]
    pub const fn is_exclusive(&self) -> bool {
        matches!(self, Self::Exclusive(_))
    }

    /// Invokes on a shared handle, taking a read or write lock as required.
    ///
    /// The lock is released before this function returns.
    pub fn call(&self, target: &ObjectRef, args: &[Value]) -> Result<Value, InvokeError> {
        match self {
            Self::Shared(f) => {
                let guard = target.read();
                f(&*guard, args)
            }
            Self::Exclusive(f) => {
                let mut guard = target.write();
                f(&mut *guard, args)
            }
        }
    }

    /// Invokes on a receiver that is already exclusively borrowed.
    ///
    /// Used to compose invokers under one lock.
    pub fn call_mut(&self, this: &mut dyn Object, args: &[Value]) -> Result<Value, InvokeError> {
        match self {
            Self::Shared(f) => f(this, args),
            Self::Exclusive(f) => f(this, args),
        }
    }

    /// Invokes on a shared receiver.
    ///
    /// Returns [`InvokeError::ExclusiveReceiver`] for exclusive invokers.
    pub fn call_ref(&self, this: &dyn Object, args: &[Value]) -> Result<Value, InvokeError> {
        match self {
            Self::Shared(f) => f(this, args),
            Self::Exclusive(_) => Err(InvokeError::ExclusiveReceiver),
        }
    }
}

impl fmt::Debug for Invoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared(_) => f.write_str("Invoker::Shared"),
            Self::Exclusive(_) => f.write_str("Invoker::Exclusive"),
        }
    }
}
