//! Built-in path functions.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::func::{Function, FunctionError};
use crate::info::DeclaredType;
use crate::path::Literal;
use crate::value::Value;

pub(super) fn all() -> Vec<(&'static str, Function)> {
    alloc::vec![
        ("upper", map_str(|s| s.to_uppercase())),
        ("lower", map_str(|s| s.to_lowercase())),
        ("trim", map_str(|s| s.trim().to_string())),
        ("len", len()),
        ("first", pick(|items| items.into_iter().next())),
        ("last", pick(|items| items.into_iter().next_back())),
        ("default", default()),
        ("fallback", fallback()),
    ]
}

fn arity(args: &[Literal], expected: usize) -> Result<(), FunctionError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(FunctionError::ArgumentCount {
            expected,
            found: args.len(),
        })
    }
}

fn literal_type(literal: &Literal) -> DeclaredType {
    match literal {
        Literal::Null => DeclaredType::Unknown,
        Literal::Bool(_) => DeclaredType::Bool,
        Literal::Int(_) => DeclaredType::Int,
        Literal::Float(_) => DeclaredType::Float,
        Literal::Str(_) => DeclaredType::Str,
    }
}

/// `Str -> Str`; absent stays absent.
fn map_str(f: fn(&str) -> String) -> Function {
    Function::new(move |value, args, _| {
        arity(args, 0)?;
        match value {
            Value::Null => Ok(Value::Null),
            Value::Str(s) => Ok(Value::Str(f(&s))),
            other => Err(FunctionError::Input {
                expected: "Str",
                found: other.kind_name(),
            }),
        }
    })
    .with_type(|_, args, _| arity(args, 0).map(|()| DeclaredType::Str))
}

/// The number of items of a list or map, or characters of a string.
fn len() -> Function {
    Function::new(|value, args, _| {
        arity(args, 0)?;
        match value {
            Value::Null => Ok(Value::Null),
            other => other.len().map(Value::from).ok_or(FunctionError::Input {
                expected: "Str, List or Map",
                found: other.kind_name(),
            }),
        }
    })
    .with_type(|_, args, _| arity(args, 0).map(|()| DeclaredType::Int))
}

/// One element of a list; an empty list gives absent.
fn pick(f: fn(Vec<Value>) -> Option<Value>) -> Function {
    Function::new(move |value, args, _| {
        arity(args, 0)?;
        match value {
            Value::Null => Ok(Value::Null),
            Value::List(items) => Ok(f(items).unwrap_or_default()),
            other => Err(FunctionError::Input {
                expected: "List",
                found: other.kind_name(),
            }),
        }
    })
    .with_type(|ty, args, _| {
        arity(args, 0)?;
        match ty {
            DeclaredType::List(element) => Ok(element.as_deref().cloned().unwrap_or_default()),
            _ => Ok(DeclaredType::Unknown),
        }
    })
}

/// `default(literal)`: replaces an absent value with the literal.
fn default() -> Function {
    Function::new(|value, args, _| {
        arity(args, 1)?;
        Ok(match value {
            Value::Null => args[0].to_value(),
            other => other,
        })
    })
    .with_type(|ty, args, _| {
        arity(args, 1)?;
        Ok(match ty {
            DeclaredType::Unknown => literal_type(&args[0]),
            other => other.clone(),
        })
    })
}

/// `fallback('name')`: replaces an absent value with a context setting.
fn fallback() -> Function {
    Function::new(|value, args, ctx| {
        arity(args, 1)?;
        let Literal::Str(name) = &args[0] else {
            return Err(FunctionError::ArgumentType {
                index: 0,
                expected: "a setting name",
            });
        };
        Ok(match value {
            Value::Null => ctx.setting(name).cloned().unwrap_or_default(),
            other => other,
        })
    })
    .with_type(|ty, args, _| arity(args, 1).map(|()| ty.clone()))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use crate::NavContext;
    use crate::func::{FunctionError, FunctionRegistry};
    use crate::info::DeclaredType;
    use crate::path::Literal;
    use crate::value::Value;

    #[test]
    fn string_functions() {
        let registry = FunctionRegistry::with_builtins();
        let ctx = NavContext::new();
        let upper = registry.get("upper").unwrap();
        assert_eq!(upper.apply("ab".into(), &[], &ctx), Ok("AB".into()));
        assert_eq!(upper.apply(Value::Null, &[], &ctx), Ok(Value::Null));
        assert!(matches!(
            upper.apply(Value::Int(1), &[], &ctx),
            Err(FunctionError::Input { found: "Int", .. })
        ));
        assert!(matches!(
            upper.apply("a".into(), &[Literal::Int(1)], &ctx),
            Err(FunctionError::ArgumentCount { expected: 0, found: 1 })
        ));

        let trim = registry.get("trim").unwrap();
        assert_eq!(trim.apply(" x ".into(), &[], &ctx), Ok("x".into()));
    }

    #[test]
    fn collection_functions() {
        let registry = FunctionRegistry::with_builtins();
        let ctx = NavContext::new();
        let list = Value::list([1_i64, 2, 3]);

        assert_eq!(registry.get("len").unwrap().apply(list.clone(), &[], &ctx), Ok(Value::Int(3)));
        assert_eq!(registry.get("first").unwrap().apply(list.clone(), &[], &ctx), Ok(Value::Int(1)));
        assert_eq!(registry.get("last").unwrap().apply(list, &[], &ctx), Ok(Value::Int(3)));
        assert_eq!(
            registry.get("first").unwrap().apply(Value::List(Vec::new()), &[], &ctx),
            Ok(Value::Null)
        );

        let element = registry
            .get("last")
            .unwrap()
            .apply_type(&DeclaredType::list_of(DeclaredType::Float), &[], &ctx);
        assert_eq!(element, Ok(DeclaredType::Float));
    }

    #[test]
    fn defaults() {
        let registry = FunctionRegistry::with_builtins();
        let ctx = NavContext::new().with_setting("region", "eu");

        let default = registry.get("default").unwrap();
        let args = [Literal::Str("none".into())];
        assert_eq!(default.apply(Value::Null, &args, &ctx), Ok("none".into()));
        assert_eq!(default.apply("x".into(), &args, &ctx), Ok("x".into()));
        assert_eq!(default.apply_type(&DeclaredType::Unknown, &args, &ctx), Ok(DeclaredType::Str));

        let fallback = registry.get("fallback").unwrap();
        let args = [Literal::Str("region".into())];
        assert_eq!(fallback.apply(Value::Null, &args, &ctx), Ok("eu".into()));
        assert!(fallback.apply(Value::Null, &[Literal::Int(0)], &ctx).is_err());
    }
}
