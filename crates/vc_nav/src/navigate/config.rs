use serde::{Deserialize, Serialize};

use crate::introspect::IntrospectionConfig;
use crate::navigate::TraversalMode;

/// Options of a [`Navigator`](crate::Navigator).
///
/// Every field has a default, so partial documents deserialize.
///
/// # Examples
///
/// ```
/// use vc_nav::navigate::NavigatorConfig;
/// use vc_nav::TraversalMode;
///
/// let config: NavigatorConfig = ron::from_str("(default_mode: FAIL_IF_NULL)").unwrap();
/// assert_eq!(config.default_mode, TraversalMode::FailIfNull);
///
/// let config: NavigatorConfig = serde_json::from_str(
///     r#"{ "defaultTraversalMode": "CREATE_IF_NULL" }"#,
/// ).unwrap();
/// assert_eq!(config.default_mode, TraversalMode::CreateIfNull);
/// assert!(config.introspection.allow_field_accessors);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub introspection: IntrospectionConfig,
    /// The mode used by the `*_default` operations.
    #[serde(alias = "defaultTraversalMode", alias = "default_traversal_mode")]
    pub default_mode: TraversalMode,
}

#[cfg(test)]
mod tests {
    use super::NavigatorConfig;
    use crate::TraversalMode;
    use crate::introspect::VisibilityFilter;

    #[test]
    fn json_spellings() {
        let config = NavigatorConfig {
            default_mode: TraversalMode::FailIfNull,
            ..NavigatorConfig::default()
        };
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["default_mode"], "FAIL_IF_NULL");
        assert_eq!(json["introspection"]["visibility"], "public-only");

        let back: NavigatorConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn camel_case_aliases() {
        let config: NavigatorConfig = serde_json::from_str(
            r#"{
                "introspection": { "visibility": "public-and-private", "allowFieldAccessors": false },
                "defaultTraversalMode": "RETURN_IF_NULL"
            }"#,
        )
        .unwrap();
        assert_eq!(config.introspection.visibility, VisibilityFilter::PublicAndPrivate);
        assert!(!config.introspection.allow_field_accessors);
        assert_eq!(config.default_mode, TraversalMode::ReturnIfNull);
    }
}
