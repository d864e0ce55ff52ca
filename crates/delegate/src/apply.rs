//! Bulk installation of delegation descriptors onto a class.

use tracing::debug;

use crate::class::Class;
use crate::descriptor::DelegateTo;
use crate::error::{Error, Result};
use crate::name::Name;

/// Installs one descriptor per member, each forwarding `member` to the same
/// member of `target`.
///
/// Existing attributes of the same name are replaced. The returned handle is
/// the same class, so applications stack:
///
/// ```
/// # use delegato::{Class, apply::delegate};
/// let class = Class::new("Foo");
/// let class = delegate(&delegate(&class, "v", ["upper"])?, "v", ["lower"])?;
/// assert!(class.has_attr("upper") && class.has_attr("lower"));
/// # Ok::<(), delegato::Error>(())
/// ```
pub fn delegate<I, S>(class: &Class, target: &str, members: I) -> Result<Class>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	Delegation::to(target).members(members).apply(class)
}

/// Builder for a set of descriptors sharing one target.
#[derive(Debug, Clone)]
pub struct Delegation {
	target: String,
	/// `(attribute, member)` pairs in installation order.
	entries: Vec<(String, String)>,
}

impl Delegation {
	pub fn to(target: impl Into<String>) -> Self {
		Self {
			target: target.into(),
			entries: Vec::new(),
		}
	}

	/// Forwards `name` to the member of the same name.
	pub fn member(mut self, name: impl Into<String>) -> Self {
		let name = name.into();
		self.entries.push((name.clone(), name));
		self
	}

	pub fn members<I, S>(self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		names.into_iter().fold(self, |this, name| this.member(name.as_ref()))
	}

	/// Forwards `attr` to a differently named `member`.
	pub fn alias(mut self, attr: impl Into<String>, member: impl Into<String>) -> Self {
		self.entries.push((attr.into(), member.into()));
		self
	}

	/// Installs the descriptors on `class`.
	///
	/// Every entry is validated before the class is touched, so a bad name
	/// leaves the class unchanged.
	pub fn apply(&self, class: &Class) -> Result<Class> {
		if self.entries.is_empty() {
			return Err(Error::NoMembers {
				target: self.target.clone(),
			});
		}
		let descriptors = self
			.entries
			.iter()
			.map(|(attr, member)| {
				let attr = Name::new(attr)?;
				let descriptor = DelegateTo::named(&self.target, member)?;
				descriptor.check_install(&attr)?;
				Ok((attr, descriptor))
			})
			.collect::<Result<Vec<_>>>()?;

		for (attr, descriptor) in descriptors {
			if class.set_attr(attr.clone(), descriptor).is_some() {
				debug!(class = class.name(), attr = %attr, "replaced existing attribute with delegation");
			}
		}
		debug!(class = class.name(), target = %self.target, count = self.entries.len(), "installed delegations");
		Ok(class.clone())
	}
}
