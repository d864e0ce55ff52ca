//! Reflective values and bound methods.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::name::Name;
use crate::object::Object;

/// Native method body. Receives the bound receiver and the call arguments.
pub type NativeFn = Rc<dyn Fn(&Value, &[Value]) -> Result<Value>>;

/// A dynamically typed value.
#[derive(Clone, Default)]
pub enum Value {
	#[default]
	None,
	Bool(bool),
	Int(i64),
	Str(Rc<str>),
	/// Shared, mutable list. Clones alias the same storage.
	List(Rc<RefCell<Vec<Value>>>),
	Object(Object),
	Method(BoundMethod),
}

impl Value {
	pub fn str(s: impl AsRef<str>) -> Self {
		Self::Str(Rc::from(s.as_ref()))
	}

	pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
		Self::List(Rc::new(RefCell::new(items.into_iter().collect())))
	}

	/// Type name reported in error messages.
	pub fn type_name(&self) -> String {
		match self {
			Self::None => "NoneType".to_string(),
			Self::Bool(_) => "bool".to_string(),
			Self::Int(_) => "int".to_string(),
			Self::Str(_) => "str".to_string(),
			Self::List(_) => "list".to_string(),
			Self::Object(obj) => obj.class().name().to_string(),
			Self::Method(_) => "method".to_string(),
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(obj) => Some(obj),
			_ => None,
		}
	}

	pub fn as_method(&self) -> Option<&BoundMethod> {
		match self {
			Self::Method(m) => Some(m),
			_ => None,
		}
	}

	/// Snapshot of a list's items.
	pub fn to_vec(&self) -> Option<Vec<Value>> {
		match self {
			Self::List(items) => Some(items.borrow().clone()),
			_ => None,
		}
	}

	/// Calls a bound method.
	pub fn call(&self, args: &[Value]) -> Result<Value> {
		match self {
			Self::Method(method) => method.call(args),
			other => Err(Error::NotCallable {
				type_name: other.type_name(),
			}),
		}
	}

	/// Identity for reference values, equality for plain ones.
	pub fn is(&self, other: &Value) -> bool {
		match (self, other) {
			(Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
			(Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
			(Self::Method(a), Self::Method(b)) => Rc::ptr_eq(&a.func, &b.func) && a.receiver.is(&b.receiver),
			_ => self == other,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::None, Self::None) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Str(a), Self::Str(b)) => a == b,
			(Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
			(Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
			(Self::Method(_), Self::Method(_)) => self.is(other),
			_ => false,
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::None => f.write_str("None"),
			Self::Bool(b) => fmt::Debug::fmt(b, f),
			Self::Int(i) => fmt::Debug::fmt(i, f),
			Self::Str(s) => fmt::Debug::fmt(&**s, f),
			Self::List(items) => f.debug_list().entries(items.borrow().iter()).finish(),
			Self::Object(obj) => fmt::Debug::fmt(obj, f),
			Self::Method(m) => fmt::Debug::fmt(m, f),
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<i64> for Value {
	fn from(i: i64) -> Self {
		Self::Int(i)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::str(s)
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::str(s)
	}
}

impl From<Object> for Value {
	fn from(obj: Object) -> Self {
		Self::Object(obj)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::list(items)
	}
}

/// A native function paired with the receiver it was looked up on.
#[derive(Clone)]
pub struct BoundMethod {
	receiver: Box<Value>,
	name: Name,
	func: NativeFn,
}

impl BoundMethod {
	pub fn new(receiver: Value, name: Name, func: NativeFn) -> Self {
		Self {
			receiver: Box::new(receiver),
			name,
			func,
		}
	}

	/// The value the method runs against.
	pub fn receiver(&self) -> &Value {
		&self.receiver
	}

	pub fn name(&self) -> &Name {
		&self.name
	}

	pub fn call(&self, args: &[Value]) -> Result<Value> {
		(self.func)(&self.receiver, args)
	}
}

impl fmt::Debug for BoundMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<bound method {}.{}>", self.receiver.type_name(), self.name)
	}
}

/// Wraps a closure as a [`NativeFn`].
pub fn native(f: impl Fn(&Value, &[Value]) -> Result<Value> + 'static) -> NativeFn {
	Rc::new(f)
}

/// Checks a native call's argument count.
pub fn expect_arity(callee: &str, args: &[Value], expected: usize) -> Result<()> {
	if args.len() == expected {
		Ok(())
	} else {
		Err(Error::Arity {
			callee: callee.to_string(),
			expected,
			got: args.len(),
		})
	}
}
