//! Path evaluation against host objects.
//!
//! A [`Navigator`] walks a [`Path`](crate::Path) one segment at a time. Each
//! segment is resolved through the [`TypeDescriptor`] of the current value
//! and one of its accessors, then through the segment's function, if any.
//!
//! Three evaluations share the walk:
//!
//! - [`Navigator::get_value`] reads the final value.
//! - [`Navigator::set_value`] reads up to the last segment, then writes.
//! - [`Navigator::get_type`] follows declared types only.
//!
//! What happens at a null intermediate is decided by the [`TraversalMode`].
//!
//! [`TypeDescriptor`]: crate::accessor::TypeDescriptor

// -----------------------------------------------------------------------------
// Modules

mod config;
mod context;
mod error;
mod factory;
mod mode;
mod navigator;

// -----------------------------------------------------------------------------
// Exports

pub use config::NavigatorConfig;
pub use context::NavContext;
pub use error::NavError;
pub use factory::{DefaultObjectFactory, FactoryError, ObjectFactory};
pub use mode::TraversalMode;
pub use navigator::{Navigator, NavigatorBuilder};
