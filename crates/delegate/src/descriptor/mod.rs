//! Delegation descriptors.
//!
//! A [`DelegateTo`] sits in a class attribute table and forwards reads and
//! writes of that attribute to a member of another object: either an
//! attribute of the instance (`DelegateTo::named("inner", "upper")`) or the
//! instance itself (`DelegateTo::named("self", "bar")`).
//!
//! When no member is given the descriptor discovers it on first access by
//! finding which attribute of the owning class it is installed under. The
//! discovered name is cached on the descriptor and shared by every instance
//! of the class.

use std::cell::OnceCell;
use std::fmt;

use tracing::{error, trace};

use crate::class::Class;
use crate::error::{Error, Result};
use crate::name::{Name, Target};
use crate::object::{Object, getattr, setattr};
use crate::value::Value;

/// Forwards one class attribute to a member of a delegate object.
pub struct DelegateTo {
	target: Target,
	member: OnceCell<Name>,
}

impl DelegateTo {
	/// Creates a descriptor forwarding to `member` of `target`.
	///
	/// `target` is an attribute name or `"self"`. Without a member the name
	/// is discovered lazily, which is impossible for `"self"`: that
	/// combination fails with [`Error::SelfWithoutMember`].
	pub fn new(target: &str, member: Option<&str>) -> Result<Self> {
		let target = Target::parse(target)?;
		let member = member.map(Name::new).transpose()?;
		if target.is_instance() && member.is_none() {
			return Err(Error::SelfWithoutMember);
		}
		Ok(Self {
			target,
			member: member.map(OnceCell::from).unwrap_or_default(),
		})
	}

	/// Descriptor whose member is discovered on first access.
	pub fn lazy(target: &str) -> Result<Self> {
		Self::new(target, None)
	}

	/// Descriptor with an explicit member.
	pub fn named(target: &str, member: &str) -> Result<Self> {
		Self::new(target, Some(member))
	}

	pub fn target(&self) -> &Target {
		&self.target
	}

	/// The forwarded member, if known yet.
	pub fn member(&self) -> Option<&Name> {
		self.member.get()
	}

	/// Reads the forwarded attribute for `instance`.
	///
	/// Methods come back bound to the delegate. Lookup failures are the
	/// delegate's own: a missing target names `owner`, a missing member names
	/// the delegate's type.
	pub fn get(&self, instance: &Object, owner: &Class) -> Result<Value> {
		let member = self.resolve(owner)?;
		let delegate = self.delegate(instance)?;
		getattr(&delegate, member.as_str())
	}

	/// Assigns the forwarded attribute for `instance`.
	pub fn set(&self, instance: &Object, value: Value) -> Result<()> {
		let member = self.resolve(instance.class())?;
		let delegate = self.delegate(instance)?;
		setattr(&delegate, member.as_str(), value)
	}

	/// Checks that installing this descriptor under `attr` does not make it
	/// forward to itself.
	pub(crate) fn check_install(&self, attr: &Name) -> Result<()> {
		match (&self.target, self.member.get()) {
			(Target::Instance, Some(member)) if member == attr => Err(Error::SelfCycle {
				attr: attr.to_string(),
			}),
			_ => Ok(()),
		}
	}

	fn delegate(&self, instance: &Object) -> Result<Value> {
		let this = Value::Object(instance.clone());
		match &self.target {
			Target::Instance => Ok(this),
			Target::Attr(name) => getattr(&this, name.as_str()),
		}
	}

	fn resolve(&self, owner: &Class) -> Result<&Name> {
		if let Some(member) = self.member.get() {
			return Ok(member);
		}
		let Some(found) = owner.find_delegate(self) else {
			error!(class = owner.name(), target = %self.target, "delegation descriptor not found in its class");
			return Err(Error::Unbound {
				class: owner.name().to_string(),
			});
		};
		trace!(class = owner.name(), member = %found, target = %self.target, "resolved delegated member");
		Ok(self.member.get_or_init(|| found))
	}
}

impl fmt::Debug for DelegateTo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DelegateTo")
			.field("target", &self.target)
			.field("member", &self.member.get())
			.finish()
	}
}
