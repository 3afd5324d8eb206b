use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::accessor::{AccessorMode, AccessorOrigin};
use crate::info::{DeclaredType, FieldInfo, Invoker, MemberInfo, MethodInfo};
use crate::introspect::IntrospectionConfig;
use crate::introspect::naming::{plural_forms, strip_prefix, strip_suffix};

// -----------------------------------------------------------------------------
// Candidate

/// A member recognized as an accessor of some property.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub property: String,
    pub mode: AccessorMode,
    pub value_type: DeclaredType,
    pub origin: AccessorOrigin,
    pub invoker: Invoker,
    /// The property is named after one element (`add_item` for `items`) and
    /// may be re-homed onto the plural property.
    pub element_named: bool,
}

impl Candidate {
    /// A candidate backed by a method.
    pub fn method(
        method: &MethodInfo,
        property: impl Into<String>,
        mode: AccessorMode,
        value_type: DeclaredType,
    ) -> Self {
        Self {
            property: property.into(),
            mode,
            value_type,
            origin: AccessorOrigin::Method(method.name().into()),
            invoker: method.invoker().clone(),
            element_named: false,
        }
    }

    /// A candidate backed by a field getter or setter.
    pub fn field(field: &FieldInfo, mode: AccessorMode, invoker: Invoker) -> Self {
        Self {
            property: field.name().to_string(),
            mode,
            value_type: field.ty().clone(),
            origin: AccessorOrigin::Field(field.name().into()),
            invoker,
            element_named: false,
        }
    }

    /// Marks the candidate as named after one element.
    #[inline]
    pub fn element_named(mut self) -> Self {
        self.element_named = true;
        self
    }

    /// Tries the plural spellings of the property against `known` names.
    pub(crate) fn rehome(&mut self, known: impl Fn(&str) -> bool) {
        if !self.element_named || known(&self.property) {
            return;
        }
        if let Some(plural) = plural_forms(&self.property).into_iter().find(|p| known(p)) {
            self.property = plural;
        }
    }
}

// -----------------------------------------------------------------------------
// Matcher

/// Recognizes accessor candidates among the raw members of a type.
///
/// Matchers form an ordered chain; every matcher sees every member and may
/// emit any number of candidates.
pub trait Matcher: Send + Sync {
    /// A name for diagnostics.
    fn name(&self) -> &str;

    /// Pushes the candidates `member` provides onto `out`.
    fn candidates(&self, member: &MemberInfo, config: &IntrospectionConfig, out: &mut Vec<Candidate>);
}

/// The built-in matchers in chain order.
pub fn standard_matchers() -> Vec<Arc<dyn Matcher>> {
    let matchers: [Arc<dyn Matcher>; 8] = [
        Arc::new(ReadMatcher),
        Arc::new(WriteMatcher),
        Arc::new(AddMatcher),
        Arc::new(RemoveMatcher),
        Arc::new(SizeMatcher),
        Arc::new(IndexedMatcher),
        Arc::new(KeyedMatcher),
        Arc::new(FieldMatcher),
    ];
    Vec::from(matchers)
}

/// Implements [`Matcher`] for a unit struct matching methods only.
macro_rules! method_matcher {
    ($(#[$meta:meta])* $name:ident, |$method:ident, $out:ident| $body:block) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $name;

        impl Matcher for $name {
            fn name(&self) -> &str {
                stringify!($name)
            }

            fn candidates(
                &self,
                member: &MemberInfo,
                _config: &IntrospectionConfig,
                $out: &mut Vec<Candidate>,
            ) {
                if let Some($method) = member.as_method() $body
            }
        }
    };
}

fn is_value(ty: &DeclaredType) -> bool {
    *ty != DeclaredType::Unit
}

fn is_boolish(ty: &DeclaredType) -> bool {
    matches!(ty, DeclaredType::Bool | DeclaredType::Unknown)
}

method_matcher! {
    /// `READ`: `x()`, `get_x()`, `getX()`, and `is_x()` / `has_x()` returning
    /// a boolean.
    ReadMatcher, |method, out| {
        if !method.params().is_empty() || !is_value(method.returns()) {
            return;
        }
        let name = method.name();
        let property = strip_prefix(name, "get")
            .or_else(|| {
                is_boolish(method.returns())
                    .then(|| strip_prefix(name, "is").or_else(|| strip_prefix(name, "has")))
                    .flatten()
            })
            .unwrap_or_else(|| name.to_string());
        let ty = method.returns().clone();
        out.push(Candidate::method(method, property, AccessorMode::READ, ty));
    }
}

method_matcher! {
    /// `WRITE`: `set_x(v)` / `setX(v)` without a return value.
    WriteMatcher, |method, out| {
        let [ty] = method.params() else { return };
        if is_value(method.returns()) {
            return;
        }
        if let Some(property) = strip_prefix(method.name(), "set") {
            out.push(Candidate::method(method, property, AccessorMode::WRITE, ty.clone()));
        }
    }
}

method_matcher! {
    /// `ADD`: `add_x(v)`.
    AddMatcher, |method, out| {
        let [ty] = method.params() else { return };
        if let Some(property) = strip_prefix(method.name(), "add") {
            let candidate = Candidate::method(method, property, AccessorMode::ADD, ty.clone());
            out.push(candidate.element_named());
        }
    }
}

method_matcher! {
    /// `REMOVE`: `remove_x(v)`.
    RemoveMatcher, |method, out| {
        let [ty] = method.params() else { return };
        if let Some(property) = strip_prefix(method.name(), "remove") {
            let candidate = Candidate::method(method, property, AccessorMode::REMOVE, ty.clone());
            out.push(candidate.element_named());
        }
    }
}

method_matcher! {
    /// `SIZE`: `x_count()`, `x_len()`, `x_size()`, `num_x()` and their camel
    /// forms, returning an integer.
    SizeMatcher, |method, out| {
        if !method.params().is_empty() || *method.returns() != DeclaredType::Int {
            return;
        }
        let name = strip_prefix(method.name(), "get").unwrap_or_else(|| method.name().to_string());
        let property = strip_suffix(&name, "count")
            .or_else(|| strip_suffix(&name, "len"))
            .or_else(|| strip_suffix(&name, "size"))
            .or_else(|| strip_prefix(&name, "num"));
        if let Some(property) = property {
            let candidate = Candidate::method(method, property, AccessorMode::SIZE, DeclaredType::Int);
            out.push(candidate.element_named());
        }
    }
}

method_matcher! {
    /// `INDEXED_READ`: `get_x(i)` / `x_at(i)`; `INDEXED_WRITE`: `set_x(i, v)`.
    IndexedMatcher, |method, out| {
        let name = method.name();
        match method.params() {
            [DeclaredType::Int] if is_value(method.returns()) => {
                let property = strip_prefix(name, "get").or_else(|| strip_suffix(name, "at"));
                if let Some(property) = property {
                    let ty = method.returns().clone();
                    let candidate = Candidate::method(method, property, AccessorMode::INDEXED_READ, ty);
                    out.push(candidate.element_named());
                }
            }
            [DeclaredType::Int, ty] => {
                if let Some(property) = strip_prefix(name, "set") {
                    let candidate =
                        Candidate::method(method, property, AccessorMode::INDEXED_WRITE, ty.clone());
                    out.push(candidate.element_named());
                }
            }
            _ => {}
        }
    }
}

method_matcher! {
    /// `KEYED_READ`: `get_x(k)`; `KEYED_WRITE`: `set_x(k, v)` / `put_x(k, v)`.
    KeyedMatcher, |method, out| {
        let name = method.name();
        match method.params() {
            [DeclaredType::Str] if is_value(method.returns()) => {
                if let Some(property) = strip_prefix(name, "get") {
                    let ty = method.returns().clone();
                    let candidate = Candidate::method(method, property, AccessorMode::KEYED_READ, ty);
                    out.push(candidate.element_named());
                }
            }
            [DeclaredType::Str, ty] => {
                let property = strip_prefix(name, "set").or_else(|| strip_prefix(name, "put"));
                if let Some(property) = property {
                    let candidate =
                        Candidate::method(method, property, AccessorMode::KEYED_WRITE, ty.clone());
                    out.push(candidate.element_named());
                }
            }
            _ => {}
        }
    }
}

/// `READ` from every field, `WRITE` from settable fields.
///
/// Only active when [`IntrospectionConfig::allow_field_accessors`] is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldMatcher;

impl Matcher for FieldMatcher {
    fn name(&self) -> &str {
        "FieldMatcher"
    }

    fn candidates(&self, member: &MemberInfo, config: &IntrospectionConfig, out: &mut Vec<Candidate>) {
        let Some(field) = member.as_field() else {
            return;
        };
        if !config.allow_field_accessors {
            return;
        }
        out.push(Candidate::field(field, AccessorMode::READ, field.getter().clone()));
        if let Some(setter) = field.setter() {
            out.push(Candidate::field(field, AccessorMode::WRITE, setter.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::{Candidate, IndexedMatcher, KeyedMatcher, Matcher, ReadMatcher, SizeMatcher};
    use crate::accessor::AccessorMode;
    use crate::fixtures::Shelf;
    use crate::info::{DeclaredType, MemberInfo, MethodInfo};
    use crate::introspect::IntrospectionConfig;
    use crate::value::Value;

    fn method(name: &'static str, params: Vec<DeclaredType>, returns: DeclaredType) -> MemberInfo {
        MethodInfo::shared(name, |_: &Shelf, _| Ok(Value::Null))
            .with_params(params)
            .returning(returns)
            .into()
    }

    fn run(matcher: &dyn Matcher, member: MemberInfo) -> Vec<(String, AccessorMode)> {
        let mut out = Vec::new();
        matcher.candidates(&member, &IntrospectionConfig::DEFAULT, &mut out);
        out.into_iter().map(|c: Candidate| (c.property, c.mode)).collect()
    }

    fn one(property: &str, mode: AccessorMode) -> Vec<(String, AccessorMode)> {
        alloc::vec![(String::from(property), mode)]
    }

    #[test]
    fn read_spellings() {
        let read = |name, ty| run(&ReadMatcher, method(name, Vec::new(), ty));
        assert_eq!(read("name", DeclaredType::Str), one("name", AccessorMode::READ));
        assert_eq!(read("get_name", DeclaredType::Str), one("name", AccessorMode::READ));
        assert_eq!(read("getName", DeclaredType::Str), one("name", AccessorMode::READ));
        assert_eq!(read("is_active", DeclaredType::Bool), one("active", AccessorMode::READ));
        assert_eq!(read("hasOwner", DeclaredType::Bool), one("owner", AccessorMode::READ));
        // `is_` only denotes a boolean.
        assert_eq!(read("is_open", DeclaredType::Int), one("is_open", AccessorMode::READ));
        assert!(read("clear", DeclaredType::Unit).is_empty());
    }

    #[test]
    fn element_spellings() {
        let size = run(&SizeMatcher, method("getItemCount", Vec::new(), DeclaredType::Int));
        assert_eq!(size, one("item", AccessorMode::SIZE));

        let at = run(&IndexedMatcher, method("item_at", alloc::vec![DeclaredType::Int], DeclaredType::Str));
        assert_eq!(at, one("item", AccessorMode::INDEXED_READ));

        let put = run(
            &KeyedMatcher,
            method("put_entry", alloc::vec![DeclaredType::Str, DeclaredType::Int], DeclaredType::Unit),
        );
        assert_eq!(put, one("entry", AccessorMode::KEYED_WRITE));
    }

    #[test]
    fn rehome_to_plural() {
        let member = method("add_entry", alloc::vec![DeclaredType::Int], DeclaredType::Unit);
        let mut out = Vec::new();
        super::AddMatcher.candidates(&member, &IntrospectionConfig::DEFAULT, &mut out);
        let mut candidate = out.pop().unwrap();
        candidate.rehome(|name| name == "entries");
        assert_eq!(candidate.property, "entries");
    }
}
