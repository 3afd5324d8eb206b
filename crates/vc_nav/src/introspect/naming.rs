//! Naming conventions shared by the built-in matchers.
//!
//! Both `snake_case` (`get_name`) and `camelCase` (`getName`) spellings are
//! recognized.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Returns `true` for names matching `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Lower-cases the first character, unless the first two are upper-case.
///
/// ```
/// use vc_nav::introspect::naming::decapitalize;
///
/// assert_eq!(decapitalize("Name"), "name");
/// assert_eq!(decapitalize("URL"), "URL");
/// ```
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a.is_ascii_uppercase() && b.is_ascii_uppercase() => name.to_string(),
        (Some(a), _) => {
            let mut out = String::with_capacity(name.len());
            out.push(a.to_ascii_lowercase());
            out.push_str(&name[a.len_utf8()..]);
            out
        }
        (None, _) => String::new(),
    }
}

/// Strips a verb prefix: `get_name` and `getName` both give `name`.
///
/// ```
/// use vc_nav::introspect::naming::strip_prefix;
///
/// assert_eq!(strip_prefix("get_name", "get").as_deref(), Some("name"));
/// assert_eq!(strip_prefix("getItemCount", "get").as_deref(), Some("itemCount"));
/// assert_eq!(strip_prefix("getter", "get"), None);
/// assert_eq!(strip_prefix("get", "get"), None);
/// ```
pub fn strip_prefix(name: &str, prefix: &str) -> Option<String> {
    let rest = name.strip_prefix(prefix)?;
    if let Some(snake) = rest.strip_prefix('_') {
        return is_identifier(snake).then(|| snake.to_string());
    }
    match rest.chars().next() {
        Some(c) if c.is_ascii_uppercase() => Some(decapitalize(rest)),
        _ => None,
    }
}

/// Strips a noun suffix: `item_count` with `count` and `itemCount` both give
/// `item`.
pub fn strip_suffix(name: &str, suffix: &str) -> Option<String> {
    if let Some(rest) = name.strip_suffix(suffix).and_then(|r| r.strip_suffix('_')) {
        return is_identifier(rest).then(|| rest.to_string());
    }
    let mut camel = String::with_capacity(suffix.len());
    let mut chars = suffix.chars();
    if let Some(first) = chars.next() {
        camel.push(first.to_ascii_uppercase());
        camel.extend(chars);
    }
    let rest = name.strip_suffix(camel.as_str())?;
    (is_identifier(rest) && !rest.ends_with('_')).then(|| rest.to_string())
}

/// The plural spellings tried when re-homing an element accessor.
///
/// ```
/// use vc_nav::introspect::naming::plural_forms;
///
/// assert!(plural_forms("item").contains(&"items".to_string()));
/// assert!(plural_forms("entry").contains(&"entries".to_string()));
/// assert!(plural_forms("box").contains(&"boxes".to_string()));
/// ```
pub fn plural_forms(singular: &str) -> Vec<String> {
    let mut forms = alloc::vec![alloc::format!("{singular}s"), alloc::format!("{singular}es")];
    if let Some(stem) = singular.strip_suffix('y') {
        forms.push(alloc::format!("{stem}ies"));
    }
    forms
}

#[cfg(test)]
mod tests {
    use super::{is_identifier, strip_suffix};

    #[test]
    fn identifiers() {
        assert!(is_identifier("_a1"));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
    }

    #[test]
    fn suffixes() {
        assert_eq!(strip_suffix("item_count", "count").as_deref(), Some("item"));
        assert_eq!(strip_suffix("itemCount", "count").as_deref(), Some("item"));
        assert_eq!(strip_suffix("count", "count"), None);
        assert_eq!(strip_suffix("discount", "count"), None);
    }
}
