//! Instances and the attribute access protocol.
//!
//! Lookup on an instance follows a fixed order: data descriptors on the class
//! (delegation descriptors, properties), then instance fields, then methods
//! and class values. Writes go to data descriptors when one is installed under
//! the name, otherwise to the instance fields.

mod builtins;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::class::{Class, ClassAttr};
use crate::error::{Error, Result};
use crate::name::Name;
use crate::value::{BoundMethod, Value};

struct Instance {
	class: Class,
	fields: RefCell<IndexMap<Name, Value>>,
}

/// Shared handle to an instance of a [`Class`].
#[derive(Clone)]
pub struct Object(Rc<Instance>);

impl Object {
	pub fn new(class: Class) -> Self {
		Self(Rc::new(Instance {
			class,
			fields: RefCell::new(IndexMap::new()),
		}))
	}

	pub fn class(&self) -> &Class {
		&self.0.class
	}

	/// Reads an instance field, bypassing the class table.
	pub fn field(&self, name: &str) -> Option<Value> {
		self.0.fields.borrow().get(name).cloned()
	}

	/// Writes an instance field, bypassing the class table.
	pub fn set_field(&self, name: Name, value: Value) {
		self.0.fields.borrow_mut().insert(name, value);
	}

	pub fn ptr_eq(&self, other: &Object) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	fn get(&self, this: &Value, name: &str) -> Result<Value> {
		let class_attr = self.class().attr(name);
		match &class_attr {
			Some(ClassAttr::Delegate(descriptor)) => return descriptor.get(self, self.class()),
			Some(ClassAttr::Property(property)) => return (property.get)(this, &[]),
			_ => {}
		}
		if let Some(value) = self.field(name) {
			return Ok(value);
		}
		match class_attr {
			Some(ClassAttr::Method(func)) => Ok(Value::Method(BoundMethod::new(this.clone(), Name::new(name)?, func))),
			Some(ClassAttr::Value(value)) => Ok(value),
			_ => Err(Error::not_found(self.class().name(), name)),
		}
	}

	fn set(&self, this: &Value, name: &str, value: Value) -> Result<()> {
		match self.class().attr(name) {
			Some(ClassAttr::Delegate(descriptor)) => descriptor.set(self, value),
			Some(ClassAttr::Property(property)) => match &property.set {
				Some(setter) => setter(this, &[value]).map(drop),
				None => Err(Error::read_only(self.class().name(), name)),
			},
			_ => {
				self.set_field(Name::new(name)?, value);
				Ok(())
			}
		}
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{} object at {:p}>", self.class().name(), Rc::as_ptr(&self.0))
	}
}

/// Looks up `name` on `value`.
pub fn getattr(value: &Value, name: &str) -> Result<Value> {
	match value {
		Value::Object(obj) => obj.get(value, name),
		other => builtins::lookup(other, name)
			.map(|(name, func)| Value::Method(BoundMethod::new(other.clone(), name, func)))
			.ok_or_else(|| Error::not_found(other.type_name(), name)),
	}
}

/// Assigns `name` on `value`.
pub fn setattr(value: &Value, name: &str, new: Value) -> Result<()> {
	match value {
		Value::Object(obj) => obj.set(value, name, new),
		other if builtins::lookup(other, name).is_some() => Err(Error::read_only(other.type_name(), name)),
		other => Err(Error::not_found(other.type_name(), name)),
	}
}

/// Calls the `name` member of `value`.
pub fn call_method(value: &Value, name: &str, args: &[Value]) -> Result<Value> {
	getattr(value, name)?.call(args)
}

/// Length through the `__len__` member.
pub fn len(value: &Value) -> Result<usize> {
	let result = call_method(value, "__len__", &[])?;
	result
		.as_int()
		.and_then(|n| usize::try_from(n).ok())
		.ok_or_else(|| Error::TypeMismatch {
			callee: "__len__".to_string(),
			expected: "int",
			got: result.type_name(),
		})
}

/// Items through the `__iter__` member.
pub fn iter(value: &Value) -> Result<Vec<Value>> {
	let result = call_method(value, "__iter__", &[])?;
	result.to_vec().ok_or_else(|| Error::TypeMismatch {
		callee: "__iter__".to_string(),
		expected: "list",
		got: result.type_name(),
	})
}

#[cfg(test)]
mod tests;
