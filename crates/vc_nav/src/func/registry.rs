use alloc::boxed::Box;
use core::fmt;

use crate::func::Function;
use crate::hash::{HashMap, new_map};

// -----------------------------------------------------------------------------
// FunctionRegistry

/// Named [`Function`]s.
///
/// A navigator owns one registry; a [`NavContext`] may carry another whose
/// entries take precedence for one call.
///
/// [`NavContext`]: crate::NavContext
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<Box<str>, Function>,
}

impl FunctionRegistry {
    /// An empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            functions: new_map(),
        }
    }

    /// A registry with the built-in functions: `upper`, `lower`, `trim`,
    /// `len`, `first`, `last`, `default` and `fallback`.
    #[cfg(feature = "builtin_functions")]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, function) in crate::func::builtin::all() {
            registry.register(name, function);
        }
        registry
    }

    /// Registers `function` under `name`, returning the replaced one.
    pub fn register(&mut self, name: impl Into<Box<str>>, function: Function) -> Option<Function> {
        self.functions.insert(name.into(), function)
    }

    /// Registers `function` under `name`.
    #[inline]
    pub fn with(mut self, name: impl Into<Box<str>>, function: Function) -> Self {
        self.register(name, function);
        self
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Removes the function registered under `name`.
    pub fn unregister(&mut self, name: &str) -> Option<Function> {
        self.functions.remove(name)
    }

    /// Iterates over the registered names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|name| &**name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
