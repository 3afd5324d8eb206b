use alloc::boxed::Box;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::hash::{HashMap, new_map};
use crate::path::{Path, PathSyntaxError};

// -----------------------------------------------------------------------------
// PathCache

/// Memoizes parsed paths by source string.
///
/// Parsing is pure, so a cached [`Path`] is always equal to a fresh parse.
/// Errors are not cached. Once `capacity` paths are stored, further paths
/// are parsed on every call.
pub struct PathCache {
    paths: RwLock<HashMap<Box<str>, Path>>,
    capacity: usize,
}

impl PathCache {
    pub const DEFAULT_CAPACITY: usize = 1024;

    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            paths: RwLock::new(new_map()),
            capacity,
        }
    }

    /// Returns the cached path for `src`, parsing it on miss.
    pub fn get_or_parse(&self, src: &str) -> Result<Path, PathSyntaxError> {
        {
            let paths = self.paths.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(path) = paths.get(src) {
                return Ok(path.clone());
            }
        }

        let path = Path::parse(src)?;
        let mut paths = self.paths.write().unwrap_or_else(PoisonError::into_inner);
        if paths.len() < self.capacity {
            paths.insert(Box::from(src), path.clone());
        }
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.paths.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.paths.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PathCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
