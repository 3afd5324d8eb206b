use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::accessor::{Accessor, AccessorMode, AccessorOrigin, PropertyDescriptor};
use crate::info::{DeclaredType, Invoker};
use crate::introspect::{PluralKind, TypeReflector};
use crate::value::{InvokeError, Value, arg};

// -----------------------------------------------------------------------------
// Enhancer

/// Synthesizes an accessor for a mode a property lacks, from the accessors it
/// already has.
///
/// Enhancers run lazily, the first time a mode is requested for a property,
/// and their result is memoized in the property.
pub trait Enhancer: Send + Sync {
    /// The mode this enhancer produces.
    fn mode(&self) -> AccessorMode;

    /// Derives the accessor, or returns `None` if the property lacks the
    /// required capabilities.
    fn derive(&self, property: &PropertyDescriptor, types: &dyn TypeReflector) -> Option<Accessor>;
}

/// The enhancers installed by default.
///
/// - `SIZE`, `INDEXED_READ` and `KEYED_READ` from a plural `READ`.
/// - `INDEXED_WRITE`, `KEYED_WRITE`, `ADD` and `REMOVE` from a plural `READ`
///   together with `WRITE`, as a read-modify-write of the whole collection.
pub fn standard_enhancers() -> Vec<Arc<dyn Enhancer>> {
    let enhancers: [Arc<dyn Enhancer>; 7] = [
        Arc::new(SizeEnhancer),
        Arc::new(IndexedReadEnhancer),
        Arc::new(KeyedReadEnhancer),
        Arc::new(IndexedWriteEnhancer),
        Arc::new(KeyedWriteEnhancer),
        Arc::new(AddEnhancer),
        Arc::new(RemoveEnhancer),
    ];
    Vec::from(enhancers)
}

// -----------------------------------------------------------------------------
// Composition helpers

/// Wraps `read` and post-processes the collection it returns.
fn reading<F>(read: Invoker, step: F) -> Invoker
where
    F: Fn(Value, &[Value]) -> Result<Value, InvokeError> + Send + Sync + 'static,
{
    if read.is_exclusive() {
        Invoker::erased_exclusive(move |this, args| step(read.call_mut(this, &[])?, args))
    } else {
        Invoker::erased_shared(move |this, args| step(read.call_ref(this, &[])?, args))
    }
}

/// Reads the collection, lets `step` produce the updated one and writes it
/// back, all under one exclusive borrow of the receiver.
fn modifying<F>(read: Invoker, write: Invoker, step: F) -> Invoker
where
    F: Fn(Value, &[Value]) -> Result<(Value, Value), InvokeError> + Send + Sync + 'static,
{
    Invoker::erased_exclusive(move |this, args| {
        let current = read.call_mut(this, &[])?;
        let (updated, result) = step(current, args)?;
        write.call_mut(this, &[updated])?;
        Ok(result)
    })
}

fn plural_source(
    property: &PropertyDescriptor,
    types: &dyn TypeReflector,
    kind: PluralKind,
) -> Option<Invoker> {
    if types.plural_kind(property.declared()) != Some(kind) {
        return None;
    }
    Some(property.explicit(AccessorMode::READ)?.invoker().clone())
}

fn plural_pair(
    property: &PropertyDescriptor,
    types: &dyn TypeReflector,
    kind: PluralKind,
) -> Option<(Invoker, Invoker)> {
    let read = plural_source(property, types, kind)?;
    let write = property.explicit(AccessorMode::WRITE)?.invoker().clone();
    Some((read, write))
}

fn element_type(property: &PropertyDescriptor, types: &dyn TypeReflector) -> DeclaredType {
    types.element_type(property.declared()).unwrap_or_default()
}

fn derived(mode: AccessorMode, value_type: DeclaredType, invoker: Invoker) -> Accessor {
    Accessor::new(mode, value_type, AccessorOrigin::Derived, invoker)
}

fn into_list(collection: Value) -> Result<Vec<Value>, InvokeError> {
    match collection {
        Value::Null => Ok(Vec::new()),
        Value::List(items) => Ok(items),
        other => Err(InvokeError::custom(alloc::format!(
            "expected a List, found {}",
            other.kind_name()
        ))),
    }
}

fn into_map(collection: Value) -> Result<BTreeMap<String, Value>, InvokeError> {
    match collection {
        Value::Null => Ok(BTreeMap::new()),
        Value::Map(entries) => Ok(entries),
        other => Err(InvokeError::custom(alloc::format!(
            "expected a Map, found {}",
            other.kind_name()
        ))),
    }
}

// -----------------------------------------------------------------------------
// Read enhancers

/// `SIZE` from a plural `READ`; an absent collection has size zero.
#[derive(Debug, Default)]
pub struct SizeEnhancer;

impl Enhancer for SizeEnhancer {
    fn mode(&self) -> AccessorMode {
        AccessorMode::SIZE
    }

    fn derive(&self, property: &PropertyDescriptor, types: &dyn TypeReflector) -> Option<Accessor> {
        let kind = types.plural_kind(property.declared())?;
        let read = plural_source(property, types, kind)?;
        let invoker = reading(
            read,
            |collection, _: &[Value]| match collection {
                Value::Null => Ok(Value::Int(0)),
                Value::List(items) => Ok(Value::from(items.len())),
                Value::Map(entries) => Ok(Value::from(entries.len())),
                other => Err(InvokeError::custom(alloc::format!(
                    "cannot take the size of {}",
                    other.kind_name()
                ))),
            },
        );
        Some(derived(AccessorMode::SIZE, DeclaredType::Int, invoker))
    }
}

/// `INDEXED_READ` from a list `READ`.
#[derive(Debug, Default)]
pub struct IndexedReadEnhancer;

impl Enhancer for IndexedReadEnhancer {
    fn mode(&self) -> AccessorMode {
        AccessorMode::INDEXED_READ
    }

    fn derive(&self, property: &PropertyDescriptor, types: &dyn TypeReflector) -> Option<Accessor> {
        let read = plural_source(property, types, PluralKind::List)?;
        let invoker = reading(
            read,
            |collection, args: &[Value]| {
                let index = arg::<usize>(args, 0)?;
                let mut items = into_list(collection)?;
                let len = items.len();
                if index < len {
                    Ok(items.swap_remove(index))
                } else {
                    Err(InvokeError::IndexOutOfBounds { index, len })
                }
            },
        );
        let ty = element_type(property, types);
        Some(derived(AccessorMode::INDEXED_READ, ty, invoker))
    }
}

/// `KEYED_READ` from a map `READ`.
#[derive(Debug, Default)]
pub struct KeyedReadEnhancer;

impl Enhancer for KeyedReadEnhancer {
    fn mode(&self) -> AccessorMode {
        AccessorMode::KEYED_READ
    }

    fn derive(&self, property: &PropertyDescriptor, types: &dyn TypeReflector) -> Option<Accessor> {
        let read = plural_source(property, types, PluralKind::Map)?;
        let invoker = reading(
            read,
            |collection, args: &[Value]| {
                let key = arg::<String>(args, 0)?;
                let mut entries = into_map(collection)?;
                entries.remove(&key).ok_or(InvokeError::MissingKey(key))
            },
        );
        let ty = element_type(property, types);
        Some(derived(AccessorMode::KEYED_READ, ty, invoker))
    }
}

// -----------------------------------------------------------------------------
// Write enhancers

/// `INDEXED_WRITE` from list `READ` and `WRITE`.
///
/// Writing at the current length appends.
#[derive(Debug, Default)]
pub struct IndexedWriteEnhancer;

impl Enhancer for IndexedWriteEnhancer {
    fn mode(&self) -> AccessorMode {
        AccessorMode::INDEXED_WRITE
    }

    fn derive(&self, property: &PropertyDescriptor, types: &dyn TypeReflector) -> Option<Accessor> {
        let (read, write) = plural_pair(property, types, PluralKind::List)?;
        let invoker = modifying(
            read,
            write,
            |collection, args: &[Value]| {
                let index = arg::<usize>(args, 0)?;
                let element = arg::<Value>(args, 1)?;
                let mut items = into_list(collection)?;
                let len = items.len();
                match index {
                    i if i < len => items[i] = element,
                    i if i == len => items.push(element),
                    _ => return Err(InvokeError::IndexOutOfBounds { index, len }),
                }
                Ok((Value::List(items), Value::Null))
            },
        );
        let ty = element_type(property, types);
        Some(derived(AccessorMode::INDEXED_WRITE, ty, invoker))
    }
}

/// `KEYED_WRITE` from map `READ` and `WRITE`.
#[derive(Debug, Default)]
pub struct KeyedWriteEnhancer;

impl Enhancer for KeyedWriteEnhancer {
    fn mode(&self) -> AccessorMode {
        AccessorMode::KEYED_WRITE
    }

    fn derive(&self, property: &PropertyDescriptor, types: &dyn TypeReflector) -> Option<Accessor> {
        let (read, write) = plural_pair(property, types, PluralKind::Map)?;
        let invoker = modifying(
            read,
            write,
            |collection, args: &[Value]| {
                let key = arg::<String>(args, 0)?;
                let element = arg::<Value>(args, 1)?;
                let mut entries = into_map(collection)?;
                entries.insert(key, element);
                Ok((Value::Map(entries), Value::Null))
            },
        );
        let ty = element_type(property, types);
        Some(derived(AccessorMode::KEYED_WRITE, ty, invoker))
    }
}

/// `ADD` from list `READ` and `WRITE`.
#[derive(Debug, Default)]
pub struct AddEnhancer;

impl Enhancer for AddEnhancer {
    fn mode(&self) -> AccessorMode {
        AccessorMode::ADD
    }

    fn derive(&self, property: &PropertyDescriptor, types: &dyn TypeReflector) -> Option<Accessor> {
        let (read, write) = plural_pair(property, types, PluralKind::List)?;
        let invoker = modifying(
            read,
            write,
            |collection, args: &[Value]| {
                let element = arg::<Value>(args, 0)?;
                let mut items = into_list(collection)?;
                items.push(element);
                Ok((Value::List(items), Value::Null))
            },
        );
        let ty = element_type(property, types);
        Some(derived(AccessorMode::ADD, ty, invoker))
    }
}

/// `REMOVE` from plural `READ` and `WRITE`.
///
/// Lists remove the first equal element and return whether one was found;
/// maps remove by key and return the removed value.
#[derive(Debug, Default)]
pub struct RemoveEnhancer;

impl Enhancer for RemoveEnhancer {
    fn mode(&self) -> AccessorMode {
        AccessorMode::REMOVE
    }

    fn derive(&self, property: &PropertyDescriptor, types: &dyn TypeReflector) -> Option<Accessor> {
        let kind = types.plural_kind(property.declared())?;
        let (read, write) = plural_pair(property, types, kind)?;
        let invoker = match kind {
            PluralKind::List => modifying(read, write, |collection, args: &[Value]| {
                let element = arg::<Value>(args, 0)?;
                let mut items = into_list(collection)?;
                let found = items.iter().position(|item| *item == element);
                if let Some(index) = found {
                    items.remove(index);
                }
                Ok((Value::List(items), Value::Bool(found.is_some())))
            }),
            PluralKind::Map => modifying(read, write, |collection, args: &[Value]| {
                let key = arg::<String>(args, 0)?;
                let mut entries = into_map(collection)?;
                let removed = entries.remove(&key).unwrap_or_default();
                Ok((Value::Map(entries), removed))
            }),
        };
        let ty = element_type(property, types);
        Some(derived(AccessorMode::REMOVE, ty, invoker))
    }
}

#[cfg(test)]
mod tests {
    use super::{AddEnhancer, Enhancer, IndexedReadEnhancer, IndexedWriteEnhancer};
    use super::{KeyedReadEnhancer, RemoveEnhancer, SizeEnhancer};
    use crate::accessor::{Accessor, AccessorMode, AccessorOrigin, PropertyDescriptor};
    use crate::info::{DeclaredType, Invoker};
    use crate::introspect::StandardTypeReflector;
    use crate::value::{InvokeError, ObjectRef, Value};
    use crate::fixtures::Shelf;

    fn shelf_property(declared: DeclaredType, writable: bool) -> PropertyDescriptor {
        let read = Accessor::new(
            AccessorMode::READ,
            declared.clone(),
            AccessorOrigin::Method("books".into()),
            Invoker::shared(|this: &Shelf, _| Ok(Value::List(this.books.clone()))),
        );
        let write = Accessor::new(
            AccessorMode::WRITE,
            declared.clone(),
            AccessorOrigin::Method("set_books".into()),
            Invoker::exclusive(|this: &mut Shelf, args| {
                this.books = crate::value::arg(args, 0)?;
                Ok(Value::Null)
            }),
        );
        let accessors = if writable { alloc::vec![read, write] } else { alloc::vec![read] };
        PropertyDescriptor::new("books", declared, accessors)
    }

    #[test]
    fn read_enhancers() {
        let types = StandardTypeReflector;
        let property = shelf_property(DeclaredType::list_of(DeclaredType::Str), false);
        let shelf = ObjectRef::new(Shelf::with(["a", "b"]));

        let size = SizeEnhancer.derive(&property, &types).unwrap();
        assert_eq!(size.invoke(&shelf, &[]), Ok(Value::Int(2)));

        let at = IndexedReadEnhancer.derive(&property, &types).unwrap();
        assert_eq!(at.value_type(), &DeclaredType::Str);
        assert_eq!(at.invoke(&shelf, &[Value::Int(1)]), Ok(Value::from("b")));
        assert_eq!(
            at.invoke(&shelf, &[Value::Int(2)]),
            Err(InvokeError::IndexOutOfBounds { index: 2, len: 2 })
        );

        assert!(KeyedReadEnhancer.derive(&property, &types).is_none());
        assert!(AddEnhancer.derive(&property, &types).is_none());
    }

    #[test]
    fn write_enhancers_modify_in_place() {
        let types = StandardTypeReflector;
        let property = shelf_property(DeclaredType::list_of(DeclaredType::Str), true);
        let shelf = ObjectRef::new(Shelf::with(["a"]));

        let add = AddEnhancer.derive(&property, &types).unwrap();
        add.invoke(&shelf, &[Value::from("b")]).unwrap();

        let set = IndexedWriteEnhancer.derive(&property, &types).unwrap();
        set.invoke(&shelf, &[Value::Int(0), Value::from("z")]).unwrap();
        set.invoke(&shelf, &[Value::Int(2), Value::from("c")]).unwrap();
        assert!(set.invoke(&shelf, &[Value::Int(9), Value::from("x")]).is_err());

        let remove = RemoveEnhancer.derive(&property, &types).unwrap();
        assert_eq!(remove.invoke(&shelf, &[Value::from("b")]), Ok(Value::Bool(true)));
        assert_eq!(remove.invoke(&shelf, &[Value::from("q")]), Ok(Value::Bool(false)));

        let books = shelf.with(|s: &Shelf| s.books.clone()).unwrap();
        assert_eq!(books, [Value::from("z"), Value::from("c")]);
    }

    #[test]
    fn raw_lists_derive_unknown_elements() {
        let types = StandardTypeReflector;
        let property = shelf_property(DeclaredType::raw_list(), true);
        let at = IndexedReadEnhancer.derive(&property, &types).unwrap();
        assert!(at.value_type().is_unknown());
    }
}
