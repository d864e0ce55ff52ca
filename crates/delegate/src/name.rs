//! Validated attribute identifiers and delegation targets.

use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};

/// Sentinel target meaning "the owning instance itself".
pub const SELF_TARGET: &str = "self";

/// An attribute identifier: `[A-Za-z_][A-Za-z0-9_]*`, Unicode letters allowed.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Rc<str>);

impl Name {
	/// Validates `name` as an identifier.
	pub fn new(name: &str) -> Result<Self> {
		if is_identifier(name) {
			Ok(Self(Rc::from(name)))
		} else {
			Err(Error::InvalidName { name: name.to_string() })
		}
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

fn is_identifier(s: &str) -> bool {
	let mut chars = s.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	(first == '_' || first.is_alphabetic()) && chars.all(|c| c == '_' || c.is_alphanumeric())
}

impl fmt::Debug for Name {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

impl fmt::Display for Name {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for Name {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for Name {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl PartialEq<str> for Name {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for Name {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

/// Where a descriptor finds the object it forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
	/// The owning instance (`"self"`).
	Instance,
	/// An attribute of the owning instance holding the delegate.
	Attr(Name),
}

impl Target {
	/// Parses a target, recognising the `"self"` sentinel.
	pub fn parse(target: &str) -> Result<Self> {
		if target == SELF_TARGET {
			Ok(Self::Instance)
		} else {
			Name::new(target).map(Self::Attr)
		}
	}

	pub fn is_instance(&self) -> bool {
		matches!(self, Self::Instance)
	}
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Instance => f.write_str(SELF_TARGET),
			Self::Attr(name) => fmt::Display::fmt(name, f),
		}
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("upper")]
	#[case("_private")]
	#[case("__len__")]
	#[case("v2")]
	#[case("größe")]
	fn accepts_identifiers(#[case] name: &str) {
		assert_eq!(Name::new(name).unwrap().as_str(), name);
	}

	#[rstest]
	#[case("")]
	#[case("2v")]
	#[case("has space")]
	#[case("dotted.path")]
	#[case("dash-ed")]
	fn rejects_non_identifiers(#[case] name: &str) {
		assert_eq!(Name::new(name), Err(Error::InvalidName { name: name.to_string() }));
	}

	#[test]
	fn self_sentinel_parses_to_instance() {
		assert_eq!(Target::parse("self").unwrap(), Target::Instance);
		assert_eq!(Target::parse("inner").unwrap(), Target::Attr(Name::new("inner").unwrap()));
		assert_eq!(Target::Instance.to_string(), "self");
	}

	proptest! {
		#[test]
		fn ascii_identifiers_roundtrip(name in "[A-Za-z_][A-Za-z0-9_]{0,16}") {
			let parsed = Name::new(&name).unwrap();
			prop_assert_eq!(parsed.as_str(), name.as_str());
		}
	}
}
