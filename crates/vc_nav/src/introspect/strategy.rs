use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Reverse;
use std::sync::{PoisonError, RwLock};

use hashbrown::hash_map::Entry;

use crate::accessor::{Accessor, AccessorMode, Enhancer, Introspection, IntrospectionWarning};
use crate::accessor::{PropertyDescriptor, WarningKind, standard_enhancers};
use crate::hash::{HashMap, new_map};
use crate::info::{ClassInfo, DeclaredType};
use crate::introspect::{Candidate, ConfigurationError, IntrospectionConfig, Matcher};
use crate::introspect::{PluralKind, StandardTypeReflector, TypeReflector, standard_matchers};

// -----------------------------------------------------------------------------
// Introspector

/// Builds the properties of a type from its raw members.
///
/// The rest of the engine only depends on this trait; one implementation per
/// host type system is expected.
pub trait Introspector: Send + Sync {
    /// Discovers the properties of `class`.
    ///
    /// Must be deterministic: the result is cached per type and config.
    fn introspect(
        &self,
        class: &'static ClassInfo,
        config: &IntrospectionConfig,
    ) -> Result<Introspection, ConfigurationError>;

    /// Synthesizes an accessor for a mode `property` lacks.
    ///
    /// Called lazily by [`TypeDescriptor::accessor`]; the result is memoized.
    ///
    /// [`TypeDescriptor::accessor`]: crate::accessor::TypeDescriptor::accessor
    fn enhance(&self, _property: &PropertyDescriptor, _mode: AccessorMode) -> Option<Accessor> {
        None
    }

    /// Puts `matcher` in front of the matcher chain.
    ///
    /// Returns `false` if the introspector has no matcher chain.
    fn register_matcher(&self, _matcher: Arc<dyn Matcher>) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// ConventionIntrospector

/// The [`Introspector`] driven by naming conventions.
///
/// Every admitted member is offered to every matcher of an ordered chain.
/// Candidates are grouped by property and mode, and one winner is picked per
/// group:
///
/// 1. A method beats a field.
/// 2. A more specific declared type beats a less specific one.
/// 3. Otherwise the first discovered wins, and a warning is recorded.
///
/// Accessors whose type disagrees with the declared property type are
/// dropped with a warning.
pub struct ConventionIntrospector {
    matchers: RwLock<Vec<Arc<dyn Matcher>>>,
    enhancers: Vec<Arc<dyn Enhancer>>,
    types: Arc<dyn TypeReflector>,
}

impl ConventionIntrospector {
    /// Creates an introspector with the standard matchers and enhancers.
    pub fn new() -> Self {
        Self::with_type_reflector(Arc::new(StandardTypeReflector))
    }

    /// Creates an introspector using `types` to reason about plural types.
    pub fn with_type_reflector(types: Arc<dyn TypeReflector>) -> Self {
        Self {
            matchers: RwLock::new(standard_matchers()),
            enhancers: standard_enhancers(),
            types,
        }
    }

    /// Appends an enhancer. Earlier enhancers of the same mode win.
    pub fn with_enhancer(mut self, enhancer: Arc<dyn Enhancer>) -> Self {
        self.enhancers.push(enhancer);
        self
    }

    /// Puts `matcher` in front of the chain.
    pub fn prepend_matcher(&self, matcher: Arc<dyn Matcher>) {
        let mut matchers = self.matchers.write().unwrap_or_else(PoisonError::into_inner);
        matchers.insert(0, matcher);
    }

    /// Returns the type reflector.
    #[inline]
    pub fn type_reflector(&self) -> &Arc<dyn TypeReflector> {
        &self.types
    }

    fn collect(&self, class: &ClassInfo, config: &IntrospectionConfig) -> Vec<Candidate> {
        let matchers = self
            .matchers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut candidates = Vec::new();
        for member in class.members() {
            if !config.visibility.admits(member.visibility()) {
                continue;
            }
            for matcher in &matchers {
                matcher.candidates(member, config, &mut candidates);
            }
        }

        let primary: Vec<String> = candidates
            .iter()
            .filter(|c| !c.element_named)
            .map(|c| c.property.clone())
            .collect();
        for candidate in &mut candidates {
            candidate.rehome(|name| primary.iter().any(|p| p == name));
        }
        candidates
    }

    fn build_property(
        &self,
        name: String,
        group: Vec<Candidate>,
        warnings: &mut Vec<IntrospectionWarning>,
    ) -> Option<PropertyDescriptor> {
        let mut modes: Vec<AccessorMode> = Vec::new();
        for candidate in &group {
            if !modes.contains(&candidate.mode) {
                modes.push(candidate.mode);
            }
        }

        let mut selected: Vec<Candidate> = Vec::with_capacity(modes.len());
        let mut group = group;
        for mode in modes {
            let (mut contenders, rest): (Vec<_>, Vec<_>) =
                group.into_iter().partition(|c| c.mode == mode);
            group = rest;

            // Stable, so equal keys keep discovery order.
            contenders.sort_by_key(|c| (c.origin.rank(), Reverse(c.value_type.specificity())));
            let mut contenders = contenders.into_iter();
            let Some(winner) = contenders.next() else {
                continue;
            };
            for loser in contenders {
                let tied = loser.origin.rank() == winner.origin.rank()
                    && loser.value_type.specificity() == winner.value_type.specificity();
                if tied {
                    warnings.push(IntrospectionWarning {
                        property: name.clone(),
                        mode,
                        kind: WarningKind::Ambiguous,
                        kept: Some(winner.origin.clone()),
                        dropped: loser.origin,
                    });
                }
            }
            selected.push(winner);
        }

        let declared = self.declared_type(&selected);
        let mut accessors = Vec::with_capacity(selected.len());
        for candidate in selected {
            if self.agrees(&declared, candidate.mode, &candidate.value_type) {
                accessors.push(Accessor::new(
                    candidate.mode,
                    candidate.value_type,
                    candidate.origin,
                    candidate.invoker,
                ));
            } else {
                warnings.push(IntrospectionWarning {
                    property: name.clone(),
                    mode: candidate.mode,
                    kind: WarningKind::TypeMismatch,
                    kept: None,
                    dropped: candidate.origin,
                });
            }
        }

        if accessors.is_empty() {
            return None;
        }
        Some(PropertyDescriptor::new(name, declared, accessors))
    }

    /// The property type: from `READ`, else `WRITE`, else inferred from the
    /// element accessors.
    fn declared_type(&self, selected: &[Candidate]) -> DeclaredType {
        let of = |mode: AccessorMode| {
            selected
                .iter()
                .find(|c| c.mode == mode)
                .map(|c| c.value_type.clone())
        };
        of(AccessorMode::READ)
            .or_else(|| of(AccessorMode::WRITE))
            .or_else(|| {
                [AccessorMode::ADD, AccessorMode::INDEXED_READ, AccessorMode::INDEXED_WRITE]
                    .into_iter()
                    .find_map(of)
                    .map(DeclaredType::list_of)
            })
            .or_else(|| {
                [AccessorMode::KEYED_READ, AccessorMode::KEYED_WRITE]
                    .into_iter()
                    .find_map(of)
                    .map(DeclaredType::map_of)
            })
            .unwrap_or_default()
    }

    /// Whether an accessor of `mode` producing `ty` fits the property type.
    fn agrees(&self, declared: &DeclaredType, mode: AccessorMode, ty: &DeclaredType) -> bool {
        let kind = self.types.plural_kind(declared);
        let element = || self.types.element_type(declared);
        let element_agrees = || element().is_none_or(|e| e.is_compatible(ty));
        match mode {
            AccessorMode::READ | AccessorMode::WRITE => declared.is_compatible(ty),
            AccessorMode::SIZE => *ty == DeclaredType::Int && (kind.is_some() || declared.is_unknown()),
            AccessorMode::ADD | AccessorMode::INDEXED_READ | AccessorMode::INDEXED_WRITE => {
                declared.is_unknown() || (kind == Some(PluralKind::List) && element_agrees())
            }
            AccessorMode::KEYED_READ | AccessorMode::KEYED_WRITE => {
                declared.is_unknown() || (kind == Some(PluralKind::Map) && element_agrees())
            }
            AccessorMode::REMOVE => match kind {
                None => declared.is_unknown(),
                Some(PluralKind::List) => element_agrees(),
                Some(PluralKind::Map) => *ty == DeclaredType::Str || element_agrees(),
            },
            _ => true,
        }
    }
}

impl Default for ConventionIntrospector {
    fn default() -> Self {
        Self::new()
    }
}

impl Introspector for ConventionIntrospector {
    fn introspect(
        &self,
        class: &'static ClassInfo,
        config: &IntrospectionConfig,
    ) -> Result<Introspection, ConfigurationError> {
        let ty = class.ty();
        let admitted = class.members().iter().any(|m| config.visibility.admits(m.visibility()));
        if config.require_members && !admitted {
            return Err(ConfigurationError::NoMembers { ty });
        }

        let candidates = self.collect(class, config);

        // Group by property, in order of first appearance.
        let mut names: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<Candidate>> = new_map();
        for candidate in candidates {
            let group = match groups.entry(candidate.property.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    names.push(entry.key().clone());
                    entry.insert(Vec::new())
                }
            };
            group.push(candidate);
        }

        let mut introspection = Introspection::default();
        for name in names {
            let Some(group) = groups.remove(&name) else {
                continue;
            };
            if let Some(property) = self.build_property(name, group, &mut introspection.warnings) {
                introspection.properties.push(property);
            }
        }

        for warning in &introspection.warnings {
            log::warn!("introspecting `{}`: {warning}", ty.name());
        }
        log::debug!(
            "introspected `{}`: {} properties from {} members",
            ty.name(),
            introspection.properties.len(),
            class.members().len(),
        );
        Ok(introspection)
    }

    fn enhance(&self, property: &PropertyDescriptor, mode: AccessorMode) -> Option<Accessor> {
        self.enhancers
            .iter()
            .filter(|e| e.mode() == mode)
            .find_map(|e| e.derive(property, &*self.types))
    }

    fn register_matcher(&self, matcher: Arc<dyn Matcher>) -> bool {
        log::debug!("prepending matcher `{}`", matcher.name());
        self.prepend_matcher(matcher);
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use crate::accessor::{AccessorMode, AccessorOrigin, TypeDescriptor, WarningKind};
    use crate::fixtures::{Basket, Config, Item, Ledger, Order, Person};
    use crate::info::{DeclaredType, Typed};
    use crate::introspect::{ConventionIntrospector, IntrospectionConfig, Introspector, VisibilityFilter};
    use crate::value::{ObjectRef, Value};

    fn describe<T: Typed>(config: IntrospectionConfig) -> TypeDescriptor {
        let introspector = Arc::new(ConventionIntrospector::new());
        let introspection = introspector.introspect(T::class_info(), &config).unwrap();
        TypeDescriptor::new(T::class_info(), config, introspection, introspector).unwrap()
    }

    fn method(name: &str) -> AccessorOrigin {
        AccessorOrigin::Method(name.into())
    }

    #[test]
    fn properties_in_discovery_order() {
        let order = describe::<Order>(IntrospectionConfig::DEFAULT);
        let names: Vec<_> = order.properties().map(|p| p.name()).collect();
        assert_eq!(names, ["items", "item_count", "tags", "customer", "id"]);

        let items = order.property("items").unwrap();
        assert_eq!(items.declared(), &DeclaredType::list_of(DeclaredType::object::<Item>()));
        let modes: Vec<_> = items.modes().collect();
        assert_eq!(
            modes,
            [AccessorMode::READ, AccessorMode::WRITE, AccessorMode::ADD, AccessorMode::SIZE]
        );
        assert_eq!(items.explicit(AccessorMode::ADD).unwrap().origin(), &method("add_item"));
    }

    #[test]
    fn method_beats_field() {
        let person = describe::<Person>(IntrospectionConfig::DEFAULT);
        let name = person.property("name").unwrap();
        assert_eq!(name.explicit(AccessorMode::READ).unwrap().origin(), &method("name"));
        // The field still provides the write.
        assert_eq!(
            name.explicit(AccessorMode::WRITE).unwrap().origin(),
            &AccessorOrigin::Field("name".into())
        );
        assert!(person.warnings().is_empty());
    }

    #[test]
    fn specific_type_beats_first_discovered() {
        let ledger = describe::<Ledger>(IntrospectionConfig::DEFAULT);
        let title = ledger.property("title").unwrap();
        assert_eq!(title.declared(), &DeclaredType::Str);
        assert_eq!(title.explicit(AccessorMode::READ).unwrap().origin(), &method("get_title"));
        assert!(ledger.warnings().iter().all(|w| w.property != "title"));
    }

    #[test]
    fn ties_keep_first_and_warn() {
        let ledger = describe::<Ledger>(IntrospectionConfig::DEFAULT);
        let label = ledger.property("label").unwrap();
        assert_eq!(label.explicit(AccessorMode::READ).unwrap().origin(), &method("label"));

        let warning = ledger
            .warnings()
            .iter()
            .find(|w| w.property == "label")
            .unwrap();
        assert_eq!(warning.kind, WarningKind::Ambiguous);
        assert_eq!(warning.kept, Some(method("label")));
        assert_eq!(warning.dropped, method("get_label"));
    }

    #[test]
    fn mismatched_accessors_are_dropped() {
        let ledger = describe::<Ledger>(IntrospectionConfig::DEFAULT);
        let count = ledger.property("count").unwrap();
        assert_eq!(count.declared(), &DeclaredType::Int);
        assert!(count.explicit(AccessorMode::WRITE).is_none());
        assert!(ledger.warnings().iter().any(|w| {
            w.property == "count" && w.kind == WarningKind::TypeMismatch && w.dropped == method("set_count")
        }));
    }

    #[test]
    fn visibility_and_fields() {
        let public = describe::<Ledger>(IntrospectionConfig::DEFAULT);
        assert!(public.property("hidden").is_none());

        let all = describe::<Ledger>(IntrospectionConfig::DEFAULT.with_visibility(VisibilityFilter::PublicAndPrivate));
        assert!(all.property("hidden").is_some());

        let order = describe::<Order>(IntrospectionConfig::DEFAULT.with_field_accessors(false));
        assert!(order.property("id").is_none());
        assert!(order.property("secret").is_none());
    }

    #[test]
    fn derived_accessors_are_memoized() {
        let config = describe::<Config>(IntrospectionConfig::DEFAULT);
        let entries = config.property("entries").unwrap();
        assert!(entries.explicit(AccessorMode::KEYED_READ).is_none());

        let first = config.accessor(entries, AccessorMode::KEYED_READ).unwrap();
        let second = config.accessor(entries, AccessorMode::KEYED_READ).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.origin(), &AccessorOrigin::Derived);

        // Maps have no indexed access; the miss is memoized too.
        assert!(config.accessor(entries, AccessorMode::INDEXED_READ).is_none());
        assert!(config.accessor(entries, AccessorMode::INDEXED_READ).is_none());
    }

    #[test]
    fn read_only_list_keeps_explicit_add() {
        let basket = describe::<Basket>(IntrospectionConfig::DEFAULT);
        let fruits = basket.property("fruits").unwrap();
        let add = basket.accessor(fruits, AccessorMode::ADD).unwrap();
        assert_eq!(add.origin(), &method("add_fruit"));
        // No WRITE, so nothing to derive an indexed write from.
        assert!(basket.accessor(fruits, AccessorMode::INDEXED_WRITE).is_none());

        let target = ObjectRef::new(Basket::default());
        add.invoke(&target, &[Value::from("fig")]).unwrap();
        let size = basket.accessor(fruits, AccessorMode::SIZE).unwrap();
        assert_eq!(size.invoke(&target, &[]), Ok(Value::Int(1)));
    }
}
