//! Property descriptors and the accessor capability model.
//!
//! A [`TypeDescriptor`] groups the properties of one host type. Each
//! [`PropertyDescriptor`] holds one [`Accessor`] per [`AccessorMode`] it
//! supports. Missing modes can be synthesized on demand by an [`Enhancer`].

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod descriptor;
mod enhance;
mod mode;
mod property;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::{Accessor, AccessorOrigin};
pub use descriptor::{Introspection, IntrospectionWarning, TypeDescriptor, WarningKind};
pub use enhance::{AddEnhancer, Enhancer, IndexedReadEnhancer, IndexedWriteEnhancer};
pub use enhance::{KeyedReadEnhancer, KeyedWriteEnhancer, RemoveEnhancer, SizeEnhancer};
pub use enhance::standard_enhancers;
pub use mode::AccessorMode;
pub use property::PropertyDescriptor;
