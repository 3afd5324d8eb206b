use core::fmt;

use serde::{Deserialize, Serialize};

/// How a traversal treats an absent intermediate value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraversalMode {
    /// Stop and yield absent.
    #[default]
    ReturnIfNull,
    /// Fail with [`NavError::NullPath`](crate::NavError::NullPath).
    FailIfNull,
    /// Create a default instance, write it back and continue.
    ///
    /// Only valid when a final write is intended.
    CreateIfNull,
}

impl TraversalMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReturnIfNull => "RETURN_IF_NULL",
            Self::FailIfNull => "FAIL_IF_NULL",
            Self::CreateIfNull => "CREATE_IF_NULL",
        }
    }
}

impl fmt::Display for TraversalMode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
