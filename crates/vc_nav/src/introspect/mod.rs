//! The introspection strategy: from raw members to property descriptors.
//!
//! [`ConventionIntrospector`] offers every member of a [`ClassInfo`] to an
//! ordered chain of [`Matcher`]s. Each matcher recognizes one naming
//! convention, e.g. `get_name()` as the `READ` accessor of `name`.
//!
//! ```
//! use vc_nav::info::{ClassInfo, ClassInfoCell, DeclaredType, MethodInfo, Typed};
//! use vc_nav::introspect::{ConventionIntrospector, IntrospectionConfig, Introspector};
//! use vc_nav::accessor::AccessorMode;
//!
//! struct Bag { items: Vec<i64> }
//!
//! impl Typed for Bag {
//!     fn class_info() -> &'static ClassInfo {
//!         static CELL: ClassInfoCell = ClassInfoCell::new();
//!         CELL.get_or_init(|| {
//!             ClassInfo::builder::<Self>()
//!                 .method(
//!                     MethodInfo::shared("get_items", |this: &Bag, _| {
//!                         Ok(vc_nav::Value::list(this.items.iter().copied()))
//!                     })
//!                     .returning(DeclaredType::list_of(DeclaredType::Int)),
//!                 )
//!                 .method(
//!                     MethodInfo::exclusive("add_item", |this: &mut Bag, args| {
//!                         this.items.push(vc_nav::value::arg(args, 0)?);
//!                         Ok(().into())
//!                     })
//!                     .with_params([DeclaredType::Int]),
//!                 )
//!                 .build()
//!         })
//!     }
//! }
//!
//! let introspection = ConventionIntrospector::new()
//!     .introspect(Bag::class_info(), &IntrospectionConfig::DEFAULT)
//!     .unwrap();
//!
//! // `add_item` is re-homed onto `items`.
//! let items = &introspection.properties[0];
//! assert_eq!(items.name(), "items");
//! assert_eq!(items.modes().collect::<Vec<_>>(), [AccessorMode::READ, AccessorMode::ADD]);
//! ```
//!
//! [`ClassInfo`]: crate::info::ClassInfo

// -----------------------------------------------------------------------------
// Modules

mod config;
mod error;
mod matcher;
mod reflector;
mod strategy;

pub mod naming;

// -----------------------------------------------------------------------------
// Exports

pub use config::{IntrospectionConfig, VisibilityFilter};
pub use error::ConfigurationError;
pub use matcher::{AddMatcher, Candidate, FieldMatcher, IndexedMatcher, KeyedMatcher, Matcher};
pub use matcher::{ReadMatcher, RemoveMatcher, SizeMatcher, WriteMatcher, standard_matchers};
pub use reflector::{PluralKind, StandardTypeReflector, TypeReflector};
pub use strategy::{ConventionIntrospector, Introspector};
