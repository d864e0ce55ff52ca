//! Native members of the built-in value types.

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::name::Name;
use crate::value::{NativeFn, Value, expect_arity, native};

/// Resolves a built-in member of `value`, if it has one.
pub(super) fn lookup(value: &Value, name: &str) -> Option<(Name, NativeFn)> {
	let func = match (value, name) {
		(Value::Str(_), "upper") => native(|this, args| map_str("upper", this, args, str::to_uppercase)),
		(Value::Str(_), "lower") => native(|this, args| map_str("lower", this, args, str::to_lowercase)),
		(Value::Str(_), "strip") => native(|this, args| map_str("strip", this, args, |s| s.trim().to_string())),
		(Value::Str(_), "__len__") => native(|this, args| {
			expect_arity("__len__", args, 0)?;
			Ok(len_value(str_of("__len__", this)?.chars().count()))
		}),
		(Value::Str(_), "__iter__") => native(|this, args| {
			expect_arity("__iter__", args, 0)?;
			let s = str_of("__iter__", this)?;
			Ok(Value::list(s.chars().map(|c| Value::str(c.to_string()))))
		}),
		(Value::List(_), "append") => native(|this, args| {
			expect_arity("append", args, 1)?;
			list_of("append", this)?.borrow_mut().push(args[0].clone());
			Ok(Value::None)
		}),
		(Value::List(_), "__len__") => native(|this, args| {
			expect_arity("__len__", args, 0)?;
			Ok(len_value(list_of("__len__", this)?.borrow().len()))
		}),
		(Value::List(_), "__iter__") => native(|this, args| {
			expect_arity("__iter__", args, 0)?;
			Ok(Value::list(list_of("__iter__", this)?.borrow().iter().cloned()))
		}),
		_ => return None,
	};
	Name::new(name).ok().map(|name| (name, func))
}

fn map_str(callee: &str, this: &Value, args: &[Value], f: impl Fn(&str) -> String) -> Result<Value> {
	expect_arity(callee, args, 0)?;
	Ok(Value::str(f(str_of(callee, this)?)))
}

fn str_of<'a>(callee: &str, value: &'a Value) -> Result<&'a str> {
	value.as_str().ok_or_else(|| mismatch(callee, "str", value))
}

fn list_of<'a>(callee: &str, value: &'a Value) -> Result<&'a Rc<std::cell::RefCell<Vec<Value>>>> {
	match value {
		Value::List(items) => Ok(items),
		other => Err(mismatch(callee, "list", other)),
	}
}

fn mismatch(callee: &str, expected: &'static str, got: &Value) -> Error {
	Error::TypeMismatch {
		callee: callee.to_string(),
		expected,
		got: got.type_name(),
	}
}

fn len_value(len: usize) -> Value {
	Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}
