//! Host types shared by the unit tests.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::info::{ClassInfo, ClassInfoCell, DeclaredType, FieldInfo, MethodInfo, Typed};
use crate::value::{FromValue, InvokeError, Object, ObjectRef, Value, arg};

macro_rules! impl_typed {
    ($ty:ty => $build:expr) => {
        impl Typed for $ty {
            fn class_info() -> &'static ClassInfo {
                static CELL: ClassInfoCell = ClassInfoCell::new();
                CELL.get_or_init(|| $build)
            }
        }
    };
}

fn getter<T: Object>(
    name: &'static str,
    ty: DeclaredType,
    get: impl Fn(&T) -> Value + Send + Sync + 'static,
) -> MethodInfo {
    MethodInfo::shared(name, move |this: &T, _| Ok(get(this))).returning(ty)
}

fn setter<T: Object, V: FromValue>(
    name: &'static str,
    ty: DeclaredType,
    set: impl Fn(&mut T, V) -> Result<(), InvokeError> + Send + Sync + 'static,
) -> MethodInfo {
    MethodInfo::exclusive(name, move |this: &mut T, args| {
        set(this, arg::<V>(args, 0)?)?;
        Ok(Value::Null)
    })
    .with_params([ty])
}

fn objects(values: Vec<Value>) -> Result<Vec<ObjectRef>, InvokeError> {
    values
        .into_iter()
        .map(|v| ObjectRef::from_value(v).map_err(|v| InvokeError::custom(v.kind_name())))
        .collect()
}

fn object_map(values: BTreeMap<String, Value>) -> Result<BTreeMap<String, ObjectRef>, InvokeError> {
    values
        .into_iter()
        .map(|(k, v)| match v {
            Value::Object(o) => Ok((k, o)),
            other => Err(InvokeError::custom(other.kind_name())),
        })
        .collect()
}

// -----------------------------------------------------------------------------
// Orders

#[derive(Default)]
pub struct Item {
    pub name: String,
    pub price: f64,
}

impl Item {
    pub fn new(name: &str, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

impl_typed!(Item => ClassInfo::builder::<Item>()
    .method(getter("name", DeclaredType::Str, |this: &Item| this.name.as_str().into()))
    .method(setter("set_name", DeclaredType::Str, |this: &mut Item, v: String| {
        this.name = v;
        Ok(())
    }))
    .method(getter("price", DeclaredType::Float, |this: &Item| this.price.into()))
    .method(setter("set_price", DeclaredType::Float, |this: &mut Item, v: f64| {
        this.price = v;
        Ok(())
    }))
    .default_constructor::<Item>()
    .build());

#[derive(Default)]
pub struct Person {
    pub name: String,
    pub nickname: Option<String>,
}

impl Person {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.into(),
            nickname: None,
        }
    }
}

// The field comes first, the method still wins.
impl_typed!(Person => ClassInfo::builder::<Person>()
    .field(
        FieldInfo::new("name", DeclaredType::Str, |this: &Person| this.name.as_str().into())
            .settable(|this: &mut Person, v: Value| {
                this.name = arg(&[v], 0)?;
                Ok(())
            }),
    )
    .method(getter("name", DeclaredType::Str, |this: &Person| this.name.as_str().into()))
    .method(getter("nickname", DeclaredType::Str, |this: &Person| this.nickname.clone().into()))
    .method(setter("set_nickname", DeclaredType::Str, |this: &mut Person, v: Option<String>| {
        this.nickname = v;
        Ok(())
    }))
    .default_constructor::<Person>()
    .build());

#[derive(Default)]
pub struct Order {
    pub id: i64,
    pub items: Vec<ObjectRef>,
    pub tags: Vec<Value>,
    pub customer: Option<ObjectRef>,
    pub secret: String,
}

impl Order {
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: items.into_iter().map(ObjectRef::new).collect(),
            ..Self::default()
        }
    }
}

impl_typed!(Order => ClassInfo::builder::<Order>()
    .method(getter(
        "get_items",
        DeclaredType::list_of(DeclaredType::object::<Item>()),
        |this: &Order| Value::list(this.items.iter().cloned()),
    ))
    .method(setter(
        "set_items",
        DeclaredType::list_of(DeclaredType::object::<Item>()),
        |this: &mut Order, v: Vec<Value>| {
            this.items = objects(v)?;
            Ok(())
        },
    ))
    .method(setter("add_item", DeclaredType::object::<Item>(), |this: &mut Order, v: ObjectRef| {
        this.items.push(v);
        Ok(())
    }))
    .method(getter("item_count", DeclaredType::Int, |this: &Order| this.items.len().into()))
    .method(getter("tags", DeclaredType::raw_list(), |this: &Order| Value::List(this.tags.clone())))
    .method(setter("set_tags", DeclaredType::raw_list(), |this: &mut Order, v: Vec<Value>| {
        this.tags = v;
        Ok(())
    }))
    .method(getter("customer", DeclaredType::object::<Person>(), |this: &Order| {
        this.customer.clone().into()
    }))
    .method(setter(
        "set_customer",
        DeclaredType::object::<Person>(),
        |this: &mut Order, v: Option<ObjectRef>| {
            this.customer = v;
            Ok(())
        },
    ))
    .field(FieldInfo::new("id", DeclaredType::Int, |this: &Order| this.id.into()))
    .field(FieldInfo::new("secret", DeclaredType::Str, |this: &Order| this.secret.as_str().into()).private())
    .default_constructor::<Order>()
    .build());

// -----------------------------------------------------------------------------
// Settings

#[derive(Default)]
pub struct Entry {
    pub value: Option<i64>,
}

impl_typed!(Entry => ClassInfo::builder::<Entry>()
    .method(getter("value", DeclaredType::Int, |this: &Entry| this.value.into()))
    .method(setter("set_value", DeclaredType::Int, |this: &mut Entry, v: Option<i64>| {
        this.value = v;
        Ok(())
    }))
    .default_constructor::<Entry>()
    .build());

#[derive(Default)]
pub struct Config {
    pub entries: BTreeMap<String, ObjectRef>,
    pub meta: BTreeMap<String, Value>,
}

impl_typed!(Config => ClassInfo::builder::<Config>()
    .method(getter(
        "entries",
        DeclaredType::map_of(DeclaredType::object::<Entry>()),
        |this: &Config| Value::map(this.entries.iter().map(|(k, v)| (k.as_str(), v.clone()))),
    ))
    .method(setter(
        "set_entries",
        DeclaredType::map_of(DeclaredType::object::<Entry>()),
        |this: &mut Config, v: BTreeMap<String, Value>| {
            this.entries = object_map(v)?;
            Ok(())
        },
    ))
    .method(getter("meta", DeclaredType::raw_map(), |this: &Config| Value::Map(this.meta.clone())))
    .method(setter("set_meta", DeclaredType::raw_map(), |this: &mut Config, v: BTreeMap<String, Value>| {
        this.meta = v;
        Ok(())
    }))
    .method(getter("version", DeclaredType::Int, |_: &Config| Value::Int(1)))
    .default_constructor::<Config>()
    .build());

#[derive(Default)]
pub struct Settings {
    pub config: Option<ObjectRef>,
}

impl_typed!(Settings => ClassInfo::builder::<Settings>()
    .method(getter("config", DeclaredType::object::<Config>(), |this: &Settings| {
        this.config.clone().into()
    }))
    .method(setter(
        "set_config",
        DeclaredType::object::<Config>(),
        |this: &mut Settings, v: Option<ObjectRef>| {
            this.config = v;
            Ok(())
        },
    ))
    .default_constructor::<Settings>()
    .build());

// -----------------------------------------------------------------------------
// Misc

/// Conflicting members, for the tie-break rules.
#[derive(Default)]
pub struct Ledger {
    pub count: i64,
}

impl_typed!(Ledger => ClassInfo::builder::<Ledger>()
    .method(getter("label", DeclaredType::Str, |_: &Ledger| "first".into()))
    .method(getter("get_label", DeclaredType::Str, |_: &Ledger| "second".into()))
    .method(getter("title", DeclaredType::Unknown, |_: &Ledger| "loose".into()))
    .method(getter("get_title", DeclaredType::Str, |_: &Ledger| "exact".into()))
    .method(getter("count", DeclaredType::Int, |this: &Ledger| this.count.into()))
    .method(setter("set_count", DeclaredType::Str, |_: &mut Ledger, _: String| Ok(())))
    .method(getter("hidden", DeclaredType::Str, |_: &Ledger| "h".into()).private())
    .build());

/// No members at all.
pub struct Empty;

impl_typed!(Empty => ClassInfo::builder::<Empty>().build());

/// A linked node, for cycles.
#[derive(Default)]
pub struct Node {
    pub label: String,
    pub next: Option<ObjectRef>,
}

impl_typed!(Node => ClassInfo::builder::<Node>()
    .method(getter("label", DeclaredType::Str, |this: &Node| this.label.as_str().into()))
    .method(getter("next", DeclaredType::object::<Node>(), |this: &Node| this.next.clone().into()))
    .method(setter("set_next", DeclaredType::object::<Node>(), |this: &mut Node, v: Option<ObjectRef>| {
        this.next = v;
        Ok(())
    }))
    .default_constructor::<Node>()
    .build());

/// A read-only list with an explicit `ADD`.
#[derive(Default)]
pub struct Basket {
    pub fruits: Vec<Value>,
}

impl_typed!(Basket => ClassInfo::builder::<Basket>()
    .method(getter(
        "fruits",
        DeclaredType::list_of(DeclaredType::Str),
        |this: &Basket| Value::List(this.fruits.clone()),
    ))
    .method(setter("add_fruit", DeclaredType::Str, |this: &mut Basket, v: String| {
        this.fruits.push(v.into());
        Ok(())
    }))
    .build());

/// A plain list holder for accessor tests.
#[derive(Default)]
pub struct Shelf {
    pub books: Vec<Value>,
}

impl Shelf {
    pub fn with<'a>(books: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            books: books.into_iter().map(Value::from).collect(),
        }
    }
}

impl_typed!(Shelf => ClassInfo::builder::<Shelf>()
    .field(FieldInfo::new("books", DeclaredType::raw_list(), |this: &Shelf| {
        Value::List(this.books.clone())
    }))
    .build());

/// A settable drawer holding a read-only owner.
#[derive(Default)]
pub struct Desk {
    pub drawer: Option<ObjectRef>,
}

impl_typed!(Desk => ClassInfo::builder::<Desk>()
    .method(getter("drawer", DeclaredType::object::<Drawer>(), |this: &Desk| this.drawer.clone().into()))
    .method(setter(
        "set_drawer",
        DeclaredType::object::<Drawer>(),
        |this: &mut Desk, v: Option<ObjectRef>| {
            this.drawer = v;
            Ok(())
        },
    ))
    .default_constructor::<Desk>()
    .build());

#[derive(Default)]
pub struct Drawer {
    pub owner: Option<ObjectRef>,
}

impl_typed!(Drawer => ClassInfo::builder::<Drawer>()
    .method(getter("owner", DeclaredType::object::<Person>(), |this: &Drawer| this.owner.clone().into()))
    .default_constructor::<Drawer>()
    .build());
