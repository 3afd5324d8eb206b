use alloc::string::String;

use thiserror::Error;

use crate::accessor::AccessorMode;
use crate::func::FunctionError;
use crate::info::DeclaredType;
use crate::introspect::ConfigurationError;
use crate::navigate::{FactoryError, TraversalMode};
use crate::path::PathSyntaxError;
use crate::value::InvokeError;

/// An error raised by a [`Navigator`](crate::Navigator) operation.
///
/// `segment` fields are zero based positions in the path.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum NavError {
    #[error(transparent)]
    PathSyntax(#[from] PathSyntaxError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("`{ty}` has no property `{property}` (in `{path}`)")]
    UnknownProperty {
        ty: String,
        property: String,
        path: String,
    },

    #[error("property `{ty}.{property}` has no `{mode}` accessor (in `{path}`)")]
    AccessorNotFound {
        ty: String,
        property: String,
        mode: AccessorMode,
        path: String,
    },

    #[error("segment {segment} `{property}` of `{path}` is null")]
    NullPath {
        property: String,
        segment: usize,
        path: String,
    },

    #[error("type of `{ty}.{property}` at segment {segment} of `{path}` cannot be determined statically")]
    UnsafePath {
        ty: String,
        property: String,
        segment: usize,
        path: String,
    },

    #[error("function `{name}` is not registered (in `{path}`)")]
    FunctionNotFound { name: String, path: String },

    #[error("function `{name}` failed at segment {segment} of `{path}`: {source}")]
    FunctionInvocation {
        name: String,
        segment: usize,
        path: String,
        source: FunctionError,
    },

    #[error("`{mode}` accessor of `{ty}.{property}` failed at segment {segment} of `{path}`: {source}")]
    AccessorInvocation {
        ty: String,
        property: String,
        mode: AccessorMode,
        segment: usize,
        path: String,
        source: InvokeError,
    },

    #[error("cannot create `{declared}` for `{property}` (in `{path}`): {source}")]
    Instantiation {
        property: String,
        declared: DeclaredType,
        path: String,
        source: FactoryError,
    },

    #[error("{mode} is not valid for `{operation}` on `{path}`: {reason}")]
    InvalidMode {
        mode: TraversalMode,
        operation: &'static str,
        path: String,
        reason: &'static str,
    },

    #[error("`{path}` cannot be written: {reason}")]
    InvalidTarget { path: String, reason: &'static str },
}

impl NavError {
    /// Returns the path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::PathSyntax(e) => Some(&e.path),
            Self::Configuration(_) => None,
            Self::UnknownProperty { path, .. }
            | Self::AccessorNotFound { path, .. }
            | Self::NullPath { path, .. }
            | Self::UnsafePath { path, .. }
            | Self::FunctionNotFound { path, .. }
            | Self::FunctionInvocation { path, .. }
            | Self::AccessorInvocation { path, .. }
            | Self::Instantiation { path, .. }
            | Self::InvalidMode { path, .. }
            | Self::InvalidTarget { path, .. } => Some(path),
        }
    }
}
