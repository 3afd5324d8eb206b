use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::accessor::{Accessor, AccessorMode, AccessorOrigin, PropertyDescriptor};
use crate::hash::{HashMap, new_map};
use crate::info::{ClassInfo, Type};
use crate::introspect::{ConfigurationError, IntrospectionConfig, Introspector};

// -----------------------------------------------------------------------------
// IntrospectionWarning

/// Why an accessor candidate was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarningKind {
    /// Two candidates were equally good; the first discovered was kept.
    Ambiguous,
    /// The candidate's type disagrees with the declared property type.
    TypeMismatch,
}

/// A non-fatal note recorded while introspecting a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntrospectionWarning {
    pub property: String,
    pub mode: AccessorMode,
    pub kind: WarningKind,
    /// The accessor that was kept, if any.
    pub kept: Option<AccessorOrigin>,
    pub dropped: AccessorOrigin,
}

impl fmt::Display for IntrospectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.kept) {
            (WarningKind::Ambiguous, Some(kept)) => write!(
                f,
                "{} accessor of `{}` is ambiguous: kept {kept}, dropped {}",
                self.mode, self.property, self.dropped
            ),
            _ => write!(
                f,
                "{} accessor of `{}` dropped: {} does not match the declared type",
                self.mode, self.property, self.dropped
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// Introspection

/// The raw result of introspecting one type.
#[derive(Default)]
pub struct Introspection {
    pub properties: Vec<PropertyDescriptor>,
    pub warnings: Vec<IntrospectionWarning>,
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The cached result of introspecting a host type.
///
/// Immutable once built, except for the per-property memo of derived
/// accessors. Keeps a reference to the introspector that built it, which
/// synthesizes missing accessors on demand.
pub struct TypeDescriptor {
    class: &'static ClassInfo,
    config: IntrospectionConfig,
    properties: Box<[PropertyDescriptor]>,
    // Mapping from property names to indices.
    indices: HashMap<Box<str>, usize>,
    warnings: Box<[IntrospectionWarning]>,
    introspector: Arc<dyn Introspector>,
}

impl TypeDescriptor {
    /// Assembles a descriptor.
    ///
    /// Fails if two properties share a name.
    pub fn new(
        class: &'static ClassInfo,
        config: IntrospectionConfig,
        introspection: Introspection,
        introspector: Arc<dyn Introspector>,
    ) -> Result<Self, ConfigurationError> {
        let mut indices = new_map();
        for (index, property) in introspection.properties.iter().enumerate() {
            if indices.insert(Box::from(property.name()), index).is_some() {
                return Err(ConfigurationError::DuplicateProperty {
                    ty: class.ty(),
                    property: property.name().to_string(),
                });
            }
        }

        Ok(Self {
            class,
            config,
            properties: introspection.properties.into_boxed_slice(),
            indices,
            warnings: introspection.warnings.into_boxed_slice(),
            introspector,
        })
    }

    #[inline]
    pub const fn ty(&self) -> Type {
        self.class.ty()
    }

    #[inline]
    pub const fn class_info(&self) -> &'static ClassInfo {
        self.class
    }

    /// The configuration this descriptor was built with.
    #[inline]
    pub const fn config(&self) -> &IntrospectionConfig {
        &self.config
    }

    /// Returns the property with the given name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.indices.get(name).map(|&index| &self.properties[index])
    }

    /// Iterates over the properties in discovery order.
    #[inline]
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &PropertyDescriptor> {
        self.properties.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Notes recorded while introspecting.
    #[inline]
    pub fn warnings(&self) -> &[IntrospectionWarning] {
        &self.warnings
    }

    /// Returns the accessor of `property` for `mode`.
    ///
    /// Discovered accessors come first. Otherwise the introspector is asked
    /// to derive one, at most once per property and mode.
    pub fn accessor(&self, property: &PropertyDescriptor, mode: AccessorMode) -> Option<Arc<Accessor>> {
        if let Some(found) = property.explicit(mode) {
            return Some(found.clone());
        }
        property.derived_or_insert_with(mode, || {
            let derived = self.introspector.enhance(property, mode);
            if let Some(accessor) = &derived {
                log::trace!(
                    "derived {mode} accessor of `{}.{}` as {}",
                    self.ty().name(),
                    property.name(),
                    accessor.value_type(),
                );
            }
            derived
        })
    }

    /// Returns the accessor of the property named `name` for `mode`.
    pub fn accessor_by_name(&self, name: &str, mode: AccessorMode) -> Option<Arc<Accessor>> {
        self.accessor(self.property(name)?, mode)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("ty", &self.ty())
            .field("config", &self.config)
            .field("properties", &self.properties)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}
