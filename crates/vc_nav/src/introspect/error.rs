use alloc::string::String;

use thiserror::Error;

use crate::info::Type;

/// A type could not be introspected with the requested configuration.
///
/// Introspection is deterministic, so these errors are cached like
/// successful descriptors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("type `{ty}` has no introspectable members")]
    NoMembers { ty: Type },

    #[error("type `{ty}` declares property `{property}` more than once")]
    DuplicateProperty { ty: Type, property: String },
}
