use alloc::sync::Arc;
use core::any::Any;
use core::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::info::{ClassInfo, Typed};

// -----------------------------------------------------------------------------
// Object

/// A navigable host instance.
///
/// Automatically implemented for all [`Typed`] types; the class information
/// decides which properties can be navigated.
pub trait Object: Any + Send + Sync {
    /// Returns the class information of the concrete type.
    ///
    /// Provides dynamic dispatch for [`Typed::class_info`].
    fn reflect_class_info(&self) -> &'static ClassInfo;

    /// Casts to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Casts to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Typed> Object for T {
    #[inline]
    fn reflect_class_info(&self) -> &'static ClassInfo {
        T::class_info()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// -----------------------------------------------------------------------------
// ObjectRef

/// A shared handle to an [`Object`].
///
/// Cloning the handle aliases the object. Accessors lock the object only for
/// the duration of one member call, so a traversal never holds two locks.
///
/// # Examples
///
/// ```
/// use vc_nav::prelude::*;
///
/// #[derive(Default)]
/// struct Counter { n: i64 }
/// # impl Typed for Counter {
/// #     fn class_info() -> &'static ClassInfo {
/// #         static CELL: ClassInfoCell = ClassInfoCell::new();
/// #         CELL.get_or_init(|| ClassInfo::builder::<Self>().build())
/// #     }
/// # }
///
/// let a = ObjectRef::new(Counter::default());
/// let b = a.clone();
/// b.with_mut(|c: &mut Counter| c.n += 1);
///
/// assert!(a.ptr_eq(&b));
/// assert_eq!(a.with(|c: &Counter| c.n), Some(1));
/// ```
#[derive(Clone)]
pub struct ObjectRef {
    class: &'static ClassInfo,
    inner: Arc<RwLock<dyn Object>>,
}

impl ObjectRef {
    /// Moves `value` into a new shared handle.
    pub fn new<T: Object>(value: T) -> Self {
        let class = value.reflect_class_info();
        let inner: Arc<RwLock<dyn Object>> = Arc::new(RwLock::new(value));
        Self { class, inner }
    }

    /// Returns the class information of the referenced object.
    ///
    /// Does not lock the object.
    #[inline]
    pub const fn class_info(&self) -> &'static ClassInfo {
        self.class
    }

    /// Takes a read lock; a poisoned lock is recovered.
    pub fn read(&self) -> RwLockReadGuard<'_, dyn Object> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock; a poisoned lock is recovered.
    pub fn write(&self) -> RwLockWriteGuard<'_, dyn Object> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` on the object if it is a `T`.
    pub fn with<T: Any, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.read();
        guard.as_any().downcast_ref::<T>().map(f)
    }

    /// Runs `f` on the object, exclusively borrowed, if it is a `T`.
    pub fn with_mut<T: Any, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut guard = self.write();
        guard.as_any_mut().downcast_mut::<T>().map(f)
    }

    /// Returns `true` if both handles refer to the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// An address identifying the referenced object, stable while it is alive.
    ///
    /// Suitable for cycle detection in a recognizer.
    #[inline]
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.inner).cast::<()>() as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.class.ty().name(), self.addr())
    }
}
