use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::info::{DeclaredType, Type};
use crate::value::Value;

// -----------------------------------------------------------------------------
// FactoryError

/// Failure to instantiate a missing intermediate value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FactoryError {
    #[error("`{0}` has no default constructor")]
    NotConstructible(Type),

    #[error("cannot instantiate a value of type `{0}`")]
    Unsupported(String),
}

// -----------------------------------------------------------------------------
// ObjectFactory

/// Creates default instances of declared types for
/// [`TraversalMode::CreateIfNull`](crate::TraversalMode::CreateIfNull).
pub trait ObjectFactory: Send + Sync {
    fn create(&self, ty: &DeclaredType) -> Result<Value, FactoryError>;
}

/// The default [`ObjectFactory`].
///
/// - Objects use the constructor registered in their class info.
/// - Lists and maps start empty.
/// - Scalars start at their zero value.
///
/// # Examples
///
/// ```
/// use vc_nav::Value;
/// use vc_nav::info::DeclaredType;
/// use vc_nav::navigate::{DefaultObjectFactory, ObjectFactory};
///
/// let factory = DefaultObjectFactory;
/// assert_eq!(factory.create(&DeclaredType::Int), Ok(Value::Int(0)));
/// assert_eq!(factory.create(&DeclaredType::raw_list()), Ok(Value::List(Vec::new())));
/// assert!(factory.create(&DeclaredType::Unknown).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultObjectFactory;

impl ObjectFactory for DefaultObjectFactory {
    fn create(&self, ty: &DeclaredType) -> Result<Value, FactoryError> {
        Ok(match ty {
            DeclaredType::Object(class) => {
                let info = class.class_info();
                let object = info
                    .construct()
                    .ok_or(FactoryError::NotConstructible(info.ty()))?;
                Value::Object(object)
            }
            DeclaredType::List(_) => Value::List(Vec::new()),
            DeclaredType::Map(_) => Value::Map(BTreeMap::new()),
            DeclaredType::Bool => Value::Bool(false),
            DeclaredType::Int => Value::Int(0),
            DeclaredType::Float => Value::Float(0.0),
            DeclaredType::Str => Value::Str(String::new()),
            DeclaredType::Unknown | DeclaredType::Unit => {
                return Err(FactoryError::Unsupported(ty.to_string()));
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultObjectFactory, FactoryError, ObjectFactory};
    use crate::fixtures::{Item, Ledger};
    use crate::info::{DeclaredType, Typed};

    #[test]
    fn objects_use_their_constructor() {
        let value = DefaultObjectFactory
            .create(&DeclaredType::object::<Item>())
            .unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.with(|item: &Item| item.price), Some(0.0));
    }

    #[test]
    fn missing_constructor() {
        assert_eq!(
            DefaultObjectFactory.create(&DeclaredType::object::<Ledger>()),
            Err(FactoryError::NotConstructible(Ledger::class_info().ty()))
        );
    }
}
