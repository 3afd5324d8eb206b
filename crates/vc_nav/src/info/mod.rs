//! Static host type metadata consumed by introspection.
//!
//! Rust has no runtime reflection, so a navigable type describes its *raw
//! members* once, the way a reflection runtime would expose them: named
//! methods with parameter and return types, and named fields. The
//! [introspection](crate::introspect) layer then recognizes properties and
//! their capabilities from these members by naming convention.
//!
//! ## Menu
//!
//! - [`Type`]: a `TypeId` together with the type path and short name.
//! - [`DeclaredType`]: the declared (possibly generic) type of a member,
//!   one of scalar, plural (`List`/`Map`, with element type or raw) or object.
//! - [`ClassRef`]: a lazily resolved reference to another type's [`ClassInfo`].
//! - [`Invoker`]: a type-erased callable taking the receiver shared or exclusive.
//! - [`MethodInfo`] / [`FieldInfo`] / [`MemberInfo`]: raw members.
//! - [`ClassInfo`]: all raw members of one type plus an optional constructor.
//! - [`Typed`]: a static accessor to a type's [`ClassInfo`].
//! - [`ClassInfoCell`]: a `static` container used to implement [`Typed`].
//!
//! # Examples
//!
//! ```
//! use vc_nav::prelude::*;
//!
//! #[derive(Default)]
//! struct Person {
//!     name: String,
//! }
//!
//! impl Typed for Person {
//!     fn class_info() -> &'static ClassInfo {
//!         static CELL: ClassInfoCell = ClassInfoCell::new();
//!         CELL.get_or_init(|| {
//!             ClassInfo::builder::<Self>()
//!                 .method(
//!                     MethodInfo::shared("name", |this: &Person, _| Ok(this.name.as_str().into()))
//!                         .returning(DeclaredType::Str),
//!                 )
//!                 .default_constructor::<Self>()
//!                 .build()
//!         })
//!     }
//! }
//!
//! let info = Person::class_info();
//! assert_eq!(info.ty().name(), "Person");
//! assert_eq!(info.members().len(), 1);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod class_info;
mod declared_type;
mod invoker;
mod member_info;
mod ty;

// -----------------------------------------------------------------------------
// Exports

pub use class_info::{ClassInfo, ClassInfoBuilder, ClassInfoCell, Typed};
pub use declared_type::{ClassRef, DeclaredType};
pub use invoker::Invoker;
pub use member_info::{FieldInfo, MemberInfo, MethodInfo, Visibility};
pub use ty::Type;
