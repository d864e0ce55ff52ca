//! Error types for the reflective delegation layer.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while configuring or following a delegation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// Self-delegation needs an explicit member; there is nothing to discover.
	#[error("DelegateTo('self') is invalid, provide a member too")]
	SelfWithoutMember,

	/// A target or member name is not an identifier.
	#[error("'{name}' is not a valid identifier")]
	InvalidName { name: String },

	/// A `self` delegation installed under the name it forwards to.
	#[error("'{attr}' cannot delegate to self.{attr}, it would forward to itself")]
	SelfCycle { attr: String },

	/// The applicator was asked to install nothing.
	#[error("no members given to delegate to '{target}'")]
	NoMembers { target: String },

	/// Standard attribute lookup failure, naming the type that was searched.
	#[error("'{type_name}' object has no attribute '{attr}'")]
	AttributeNotFound { type_name: String, attr: String },

	/// The attribute exists but cannot be assigned.
	#[error("'{type_name}' object attribute '{attr}' is read-only")]
	ReadOnly { type_name: String, attr: String },

	#[error("'{type_name}' object is not callable")]
	NotCallable { type_name: String },

	#[error("{callee}() takes {expected} arguments ({got} given)")]
	Arity { callee: String, expected: usize, got: usize },

	#[error("{callee}() expected '{expected}', got '{got}'")]
	TypeMismatch {
		callee: String,
		expected: &'static str,
		got: String,
	},

	/// A lazily named descriptor was reached without being installed on the
	/// class it was accessed through. This is a programming error, not an
	/// attribute error.
	#[error("delegation descriptor is not bound to any attribute of '{class}'")]
	Unbound { class: String },
}

impl Error {
	pub(crate) fn not_found(type_name: impl Into<String>, attr: impl Into<String>) -> Self {
		Self::AttributeNotFound {
			type_name: type_name.into(),
			attr: attr.into(),
		}
	}

	pub(crate) fn read_only(type_name: impl Into<String>, attr: impl Into<String>) -> Self {
		Self::ReadOnly {
			type_name: type_name.into(),
			attr: attr.into(),
		}
	}

	/// Returns true for the failures a caller would treat as ordinary
	/// attribute errors.
	pub fn is_attribute_error(&self) -> bool {
		matches!(self, Self::AttributeNotFound { .. } | Self::ReadOnly { .. })
	}
}
