//! The dynamic value model navigated by paths.
//!
//! - [`Value`]: a dynamically typed value. [`Value::Null`] is the absent value.
//! - [`Object`]: a host type instance whose members are described by a
//!   [`ClassInfo`](crate::info::ClassInfo). Implemented for every
//!   [`Typed`](crate::info::Typed) type.
//! - [`ObjectRef`]: a shared, lockable handle to an object. Object graphs have
//!   reference semantics: two handles may alias the same object, and cycles
//!   are possible.
//! - [`InvokeError`]: failures reported by host members.
//! - [`FromValue`] and [`arg`]: argument extraction helpers for member bodies.

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod error;
mod object;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use convert::{FromValue, arg};
pub use error::InvokeError;
pub use object::{Object, ObjectRef};
pub use value::Value;
