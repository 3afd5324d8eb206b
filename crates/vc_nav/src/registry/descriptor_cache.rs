use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::accessor::TypeDescriptor;
use crate::hash::{HashMap, new_map};
use crate::info::{ClassInfo, Type, Typed};
use crate::introspect::{ConfigurationError, ConventionIntrospector, IntrospectionConfig, Introspector};

type Outcome = Result<Arc<TypeDescriptor>, ConfigurationError>;
type Slot = Arc<OnceLock<Outcome>>;

// -----------------------------------------------------------------------------
// DescriptorCache

/// A thread-safe cache of [`TypeDescriptor`]s.
///
/// Keyed by type and [`IntrospectionConfig`]. Concurrent first lookups of
/// one key introspect exactly once: every key owns a slot that the first
/// caller fills while the others wait on it. Failures are cached too.
///
/// Entries are never evicted automatically; use [`invalidate`] or
/// [`clear`] when host types are reloaded.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_nav::prelude::*;
/// use vc_nav::introspect::IntrospectionConfig;
/// use vc_nav::registry::DescriptorCache;
///
/// struct Unit;
/// # impl Typed for Unit {
/// #     fn class_info() -> &'static ClassInfo {
/// #         static CELL: ClassInfoCell = ClassInfoCell::new();
/// #         CELL.get_or_init(|| ClassInfo::builder::<Self>().build())
/// #     }
/// # }
///
/// let cache = DescriptorCache::new();
/// let config = IntrospectionConfig::default();
///
/// let a = cache.get(Unit::class_info(), &config).unwrap();
/// let b = cache.get(Unit::class_info(), &config).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// assert_eq!(cache.invalidate_type::<Unit>(), 1);
/// assert!(cache.is_empty());
/// ```
///
/// [`invalidate`]: DescriptorCache::invalidate
/// [`clear`]: DescriptorCache::clear
pub struct DescriptorCache {
    introspector: Arc<dyn Introspector>,
    slots: RwLock<HashMap<(TypeId, IntrospectionConfig), Slot>>,
}

impl DescriptorCache {
    /// Creates a cache backed by the [`ConventionIntrospector`].
    pub fn new() -> Self {
        Self::with_introspector(Arc::new(ConventionIntrospector::new()))
    }

    /// Creates a cache backed by `introspector`.
    pub fn with_introspector(introspector: Arc<dyn Introspector>) -> Self {
        Self {
            introspector,
            slots: RwLock::new(new_map()),
        }
    }

    /// The introspector building the descriptors.
    #[inline]
    pub fn introspector(&self) -> &Arc<dyn Introspector> {
        &self.introspector
    }

    /// Returns the descriptor of `class` for `config`, introspecting on miss.
    pub fn get(&self, class: &'static ClassInfo, config: &IntrospectionConfig) -> Outcome {
        let key = (class.ty().id(), *config);
        let slot = self.slot(key);
        slot.get_or_init(|| {
            log::debug!("introspecting `{}` with {config:?}", class.ty().name());
            let introspection = self.introspector.introspect(class, config)?;
            TypeDescriptor::new(class, *config, introspection, self.introspector.clone()).map(Arc::new)
        })
        .clone()
    }

    /// Returns the descriptor of `T` for `config`.
    #[inline]
    pub fn get_type<T: Typed>(&self, config: &IntrospectionConfig) -> Outcome {
        self.get(T::class_info(), config)
    }

    fn slot(&self, key: (TypeId, IntrospectionConfig)) -> Slot {
        {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = slots.get(&key) {
                return slot.clone();
            }
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key).or_default().clone()
    }

    /// Drops all descriptors of `ty`, for every configuration.
    ///
    /// Returns the number of dropped entries. Descriptors already handed out
    /// stay valid.
    pub fn invalidate(&self, ty: Type) -> usize {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        let before = slots.len();
        slots.retain(|(id, _), _| *id != ty.id());
        let removed = before - slots.len();
        log::debug!("invalidated {removed} descriptor(s) of `{}`", ty.name());
        removed
    }

    /// Drops all descriptors of `T`.
    #[inline]
    pub fn invalidate_type<T: Typed>(&self) -> usize {
        self.invalidate(Type::of::<T>())
    }

    /// Drops every descriptor.
    pub fn clear(&self) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!("cleared {} descriptor(s)", slots.len());
        slots.clear();
    }

    /// The number of cached entries, failures included.
    pub fn len(&self) -> usize {
        self.slots.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DescriptorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    use super::DescriptorCache;
    use crate::fixtures::{Empty, Entry, Item};
    use crate::info::{MemberInfo, Typed};
    use crate::introspect::{Candidate, ConfigurationError, ConventionIntrospector};
    use crate::introspect::{IntrospectionConfig, Matcher};

    /// Counts how often it sees the first member of `Entry`.
    struct Counting(Arc<AtomicUsize>);

    impl Matcher for Counting {
        fn name(&self) -> &str {
            "Counting"
        }

        fn candidates(&self, member: &MemberInfo, _: &IntrospectionConfig, _: &mut Vec<Candidate>) {
            if member.name() == "value" {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn counting_cache() -> (DescriptorCache, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let introspector = ConventionIntrospector::new();
        introspector.prepend_matcher(Arc::new(Counting(count.clone())));
        (DescriptorCache::with_introspector(Arc::new(introspector)), count)
    }

    #[test]
    fn single_flight() {
        const THREADS: usize = 8;
        let (cache, count) = counting_cache();
        let barrier = Barrier::new(THREADS);
        let config = IntrospectionConfig::default();

        let descriptors: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        cache.get_type::<Entry>(&config).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(descriptors.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn keyed_by_config() {
        let cache = DescriptorCache::new();
        let a = cache.get_type::<Item>(&IntrospectionConfig::DEFAULT).unwrap();
        let b = cache
            .get_type::<Item>(&IntrospectionConfig::DEFAULT.with_field_accessors(false))
            .unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalidate_reintrospects() {
        let (cache, count) = counting_cache();
        let config = IntrospectionConfig::default();
        let first = cache.get_type::<Entry>(&config).unwrap();
        cache.get_type::<Item>(&config).unwrap();

        assert_eq!(cache.invalidate_type::<Entry>(), 1);
        assert_eq!(cache.len(), 1);

        let second = cache.get_type::<Entry>(&config).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(count.load(Ordering::SeqCst), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn failures_are_cached() {
        let cache = DescriptorCache::new();
        let strict = IntrospectionConfig::DEFAULT.with_required_members(true);

        let err = cache.get_type::<Empty>(&strict).unwrap_err();
        assert!(matches!(err, ConfigurationError::NoMembers { .. }));
        assert_eq!(cache.get_type::<Empty>(&strict).unwrap_err(), err);
        assert_eq!(cache.len(), 1);

        let lenient = cache.get_type::<Empty>(&IntrospectionConfig::DEFAULT).unwrap();
        assert!(lenient.is_empty());
        assert!(Empty::class_info().members().is_empty());
    }
}
