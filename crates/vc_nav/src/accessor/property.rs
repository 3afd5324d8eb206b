use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::accessor::{Accessor, AccessorMode};
use crate::hash::{HashMap, new_map};
use crate::info::DeclaredType;

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// A named, typed capability set of a host type.
///
/// Holds the accessors discovered for the property, keyed by mode, plus a
/// memo of accessors derived on demand. A derivation that produced nothing
/// is memoized as well.
pub struct PropertyDescriptor {
    name: Box<str>,
    declared: DeclaredType,
    explicit: Vec<Arc<Accessor>>,
    derived: RwLock<HashMap<AccessorMode, Option<Arc<Accessor>>>>,
}

impl PropertyDescriptor {
    /// Creates a property from its discovered accessors.
    ///
    /// Later accessors with an already present mode are ignored.
    pub fn new(
        name: impl Into<Box<str>>,
        declared: DeclaredType,
        accessors: impl IntoIterator<Item = Accessor>,
    ) -> Self {
        let mut explicit: Vec<Arc<Accessor>> = Vec::new();
        for accessor in accessors {
            if explicit.iter().all(|a| a.mode() != accessor.mode()) {
                explicit.push(Arc::new(accessor));
            }
        }
        Self {
            name: name.into(),
            declared,
            explicit,
            derived: RwLock::new(new_map()),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the property, with element type if plural.
    #[inline]
    pub const fn declared(&self) -> &DeclaredType {
        &self.declared
    }

    /// Returns the accessor discovered for `mode`, ignoring derived ones.
    pub fn explicit(&self, mode: AccessorMode) -> Option<&Arc<Accessor>> {
        self.explicit.iter().find(|a| a.mode() == mode)
    }

    /// Iterates over the discovered accessors in discovery order.
    pub fn accessors(&self) -> impl Iterator<Item = &Arc<Accessor>> {
        self.explicit.iter()
    }

    /// Returns the modes of the discovered accessors.
    pub fn modes(&self) -> impl Iterator<Item = AccessorMode> + '_ {
        self.explicit.iter().map(|a| a.mode())
    }

    /// Returns the derived accessor for `mode`, running `derive` on first use.
    ///
    /// `derive` runs outside the lock. If two threads race, the first stored
    /// result wins and both observe it.
    pub(crate) fn derived_or_insert_with(
        &self,
        mode: AccessorMode,
        derive: impl FnOnce() -> Option<Accessor>,
    ) -> Option<Arc<Accessor>> {
        {
            let memo = self.derived.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = memo.get(&mode) {
                return found.clone();
            }
        }

        let fresh = derive().map(Arc::new);
        let mut memo = self.derived.write().unwrap_or_else(PoisonError::into_inner);
        memo.entry(mode).or_insert(fresh).clone()
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("modes", &self.modes().collect::<Vec<_>>())
            .finish()
    }
}
