use serde::{Deserialize, Serialize};

use crate::info::Visibility;

// -----------------------------------------------------------------------------
// VisibilityFilter

/// Which members take part in introspection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisibilityFilter {
    #[default]
    PublicOnly,
    PublicAndPrivate,
}

impl VisibilityFilter {
    /// Returns `true` if members with `visibility` pass the filter.
    #[inline]
    pub const fn admits(self, visibility: Visibility) -> bool {
        match self {
            Self::PublicOnly => matches!(visibility, Visibility::Public),
            Self::PublicAndPrivate => true,
        }
    }
}

// -----------------------------------------------------------------------------
// IntrospectionConfig

/// Options of the introspection strategy.
///
/// Part of the descriptor cache key: the same type introspected with two
/// configurations yields two descriptors.
///
/// # Examples
///
/// ```
/// use vc_nav::introspect::{IntrospectionConfig, VisibilityFilter};
///
/// let config: IntrospectionConfig = serde_json::from_str(
///     r#"{ "visibility": "public-and-private", "allowFieldAccessors": false }"#,
/// ).unwrap();
///
/// assert_eq!(config.visibility, VisibilityFilter::PublicAndPrivate);
/// assert!(!config.allow_field_accessors);
/// assert!(!config.require_members);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntrospectionConfig {
    pub visibility: VisibilityFilter,
    /// Treat bare fields as READ / WRITE accessors.
    #[serde(alias = "allowFieldAccessors")]
    pub allow_field_accessors: bool,
    /// Fail with a configuration error for types without any member.
    #[serde(alias = "requireMembers")]
    pub require_members: bool,
}

impl IntrospectionConfig {
    /// Public members, fields included, empty types allowed.
    pub const DEFAULT: Self = Self {
        visibility: VisibilityFilter::PublicOnly,
        allow_field_accessors: true,
        require_members: false,
    };

    #[inline]
    pub const fn with_visibility(mut self, visibility: VisibilityFilter) -> Self {
        self.visibility = visibility;
        self
    }

    #[inline]
    pub const fn with_field_accessors(mut self, allow: bool) -> Self {
        self.allow_field_accessors = allow;
        self
    }

    #[inline]
    pub const fn with_required_members(mut self, require: bool) -> Self {
        self.require_members = require;
        self
    }
}

impl Default for IntrospectionConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::{IntrospectionConfig, VisibilityFilter};
    use crate::info::Visibility;

    #[test]
    fn visibility_filter() {
        assert!(VisibilityFilter::PublicOnly.admits(Visibility::Public));
        assert!(!VisibilityFilter::PublicOnly.admits(Visibility::Private));
        assert!(VisibilityFilter::PublicAndPrivate.admits(Visibility::Private));
    }

    #[test]
    fn ron_round_trip() {
        let config = IntrospectionConfig::DEFAULT
            .with_visibility(VisibilityFilter::PublicAndPrivate)
            .with_required_members(true);
        let text = ron::to_string(&config).unwrap();
        let back: IntrospectionConfig = ron::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: IntrospectionConfig = ron::from_str("()").unwrap();
        assert_eq!(config, IntrospectionConfig::default());
    }
}
