//! Class attribute tables.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::descriptor::DelegateTo;
use crate::error::{Error, Result};
use crate::name::Name;
use crate::object::Object;
use crate::value::{NativeFn, Value};

/// Computed attribute: a getter and an optional setter, both run against the
/// instance.
#[derive(Clone)]
pub struct Property {
	pub(crate) get: NativeFn,
	pub(crate) set: Option<NativeFn>,
}

impl Property {
	pub fn new(get: NativeFn, set: Option<NativeFn>) -> Self {
		Self { get, set }
	}

	pub fn is_read_only(&self) -> bool {
		self.set.is_none()
	}
}

/// A single entry of a class attribute table.
#[derive(Clone)]
pub enum ClassAttr {
	/// Plain method, bound to the instance on lookup.
	Method(NativeFn),
	Property(Property),
	Delegate(Rc<DelegateTo>),
	/// Class-level value shared by all instances.
	Value(Value),
}

impl ClassAttr {
	/// Data descriptors intercept writes and take priority over instance
	/// fields on reads.
	pub fn is_data_descriptor(&self) -> bool {
		matches!(self, Self::Property(_) | Self::Delegate(_))
	}

	pub fn as_delegate(&self) -> Option<&Rc<DelegateTo>> {
		match self {
			Self::Delegate(d) => Some(d),
			_ => None,
		}
	}
}

impl fmt::Debug for ClassAttr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Method(_) => f.write_str("Method"),
			Self::Property(p) => f.debug_struct("Property").field("read_only", &p.is_read_only()).finish(),
			Self::Delegate(d) => fmt::Debug::fmt(d, f),
			Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
		}
	}
}

impl From<DelegateTo> for ClassAttr {
	fn from(descriptor: DelegateTo) -> Self {
		Self::Delegate(Rc::new(descriptor))
	}
}

impl From<Property> for ClassAttr {
	fn from(property: Property) -> Self {
		Self::Property(property)
	}
}

struct ClassInner {
	name: String,
	attrs: RefCell<IndexMap<Name, ClassAttr>>,
}

/// Shared handle to a class. Clones refer to the same attribute table.
#[derive(Clone)]
pub struct Class(Rc<ClassInner>);

impl Class {
	pub fn new(name: impl Into<String>) -> Self {
		Self(Rc::new(ClassInner {
			name: name.into(),
			attrs: RefCell::new(IndexMap::new()),
		}))
	}

	pub fn builder(name: impl Into<String>) -> ClassBuilder {
		ClassBuilder {
			class: Self::new(name),
			error: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.0.name
	}

	/// Installs `attr` under `name`, returning whatever it replaced.
	pub fn set_attr(&self, name: Name, attr: impl Into<ClassAttr>) -> Option<ClassAttr> {
		self.0.attrs.borrow_mut().insert(name, attr.into())
	}

	pub fn attr(&self, name: &str) -> Option<ClassAttr> {
		self.0.attrs.borrow().get(name).cloned()
	}

	pub fn has_attr(&self, name: &str) -> bool {
		self.0.attrs.borrow().contains_key(name)
	}

	pub fn remove_attr(&self, name: &str) -> Option<ClassAttr> {
		self.0.attrs.borrow_mut().shift_remove(name)
	}

	/// Attribute names in declaration order.
	pub fn attr_names(&self) -> Vec<Name> {
		self.0.attrs.borrow().keys().cloned().collect()
	}

	/// Reverse lookup: the first attribute whose value is this exact
	/// descriptor.
	pub fn find_delegate(&self, descriptor: &DelegateTo) -> Option<Name> {
		self.0
			.attrs
			.borrow()
			.iter()
			.find(|(_, attr)| attr.as_delegate().is_some_and(|d| std::ptr::eq(Rc::as_ptr(d), descriptor)))
			.map(|(name, _)| name.clone())
	}

	/// Creates an instance with the given fields.
	pub fn instantiate<'a>(&self, fields: impl IntoIterator<Item = (&'a str, Value)>) -> Result<Object> {
		let obj = Object::new(self.clone());
		for (name, value) in fields {
			obj.set_field(Name::new(name)?, value);
		}
		Ok(obj)
	}

	pub fn ptr_eq(&self, other: &Class) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

/// Declarative class definition. Invalid attribute names surface from
/// [`ClassBuilder::build`].
pub struct ClassBuilder {
	class: Class,
	error: Option<Error>,
}

impl ClassBuilder {
	fn define(mut self, name: &str, attr: impl Into<ClassAttr>) -> Self {
		if self.error.is_none() {
			match Name::new(name) {
				Ok(name) => {
					self.class.set_attr(name, attr);
				}
				Err(e) => self.error = Some(e),
			}
		}
		self
	}

	/// Defines a native method.
	pub fn method(self, name: &str, f: impl Fn(&Value, &[Value]) -> Result<Value> + 'static) -> Self {
		self.define(name, ClassAttr::Method(Rc::new(f)))
	}

	/// Defines a computed attribute; `set: None` makes it read-only.
	pub fn property(
		self,
		name: &str,
		get: impl Fn(&Value, &[Value]) -> Result<Value> + 'static,
		set: Option<NativeFn>,
	) -> Self {
		self.define(name, Property::new(Rc::new(get), set))
	}

	pub fn value(self, name: &str, value: Value) -> Self {
		self.define(name, ClassAttr::Value(value))
	}

	/// Installs a delegation descriptor; a `self` descriptor forwarding to
	/// `name` itself is rejected with [`Error::SelfCycle`].
	pub fn descriptor(mut self, name: &str, descriptor: DelegateTo) -> Self {
		if self.error.is_none()
			&& let Err(e) = Name::new(name).and_then(|attr| descriptor.check_install(&attr))
		{
			self.error = Some(e);
			return self;
		}
		self.define(name, descriptor)
	}

	pub fn build(self) -> Result<Class> {
		match self.error {
			Some(e) => Err(e),
			None => Ok(self.class),
		}
	}
}

impl fmt::Debug for Class {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Class")
			.field("name", &self.0.name)
			.field("attrs", &*self.0.attrs.borrow())
			.finish()
	}
}
