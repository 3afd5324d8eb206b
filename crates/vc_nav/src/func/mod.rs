//! Functions applied inside path segments, e.g. `name:upper()`.

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "builtin_functions")]
mod builtin;
mod error;
mod function;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use error::FunctionError;
pub use function::Function;
pub use registry::FunctionRegistry;
