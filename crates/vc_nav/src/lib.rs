#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

extern crate alloc;

// Usually we need `crate` inside the crate itself and `vc_nav` in doc testing.
extern crate self as vc_nav;

// -----------------------------------------------------------------------------
// Modules

mod hash;

pub mod accessor;
pub mod func;
pub mod info;
pub mod introspect;
pub mod navigate;
pub mod path;
pub mod registry;
pub mod value;

#[cfg(test)]
pub(crate) mod fixtures;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use navigate::{NavContext, NavError, Navigator, NavigatorBuilder, TraversalMode};
pub use path::Path;
pub use value::{Object, ObjectRef, Value};

/// The most commonly used items, for glob import.
pub mod prelude {
    pub use crate::accessor::AccessorMode;
    pub use crate::func::{Function, FunctionRegistry};
    pub use crate::info::{ClassInfo, ClassInfoCell, DeclaredType, FieldInfo, MethodInfo, Typed};
    pub use crate::navigate::{NavContext, NavError, Navigator, NavigatorConfig, TraversalMode};
    pub use crate::path::Path;
    pub use crate::value::{InvokeError, Object, ObjectRef, Value};
}
