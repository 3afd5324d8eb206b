//! The descriptor cache.
//!
//! [`DescriptorCache`] memoizes [`TypeDescriptor`]s per type and
//! introspection configuration, so each type is introspected at most once.
//!
//! [`TypeDescriptor`]: crate::accessor::TypeDescriptor

// -----------------------------------------------------------------------------
// Modules

mod descriptor_cache;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor_cache::DescriptorCache;
