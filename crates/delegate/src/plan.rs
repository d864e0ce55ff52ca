//! Declarative delegation plans loaded from TOML.
//!
//! ```toml
//! [[delegate]]
//! to = "v"
//! members = ["upper", "lower"]
//!
//! [delegate.aliases]
//! up = "upper"
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::apply::Delegation;
use crate::class::Class;

/// Errors from loading or applying a plan.
#[derive(Debug, Error)]
pub enum PlanError {
	#[error("invalid delegation plan: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("delegation #{index} to '{target}': {source}")]
	Delegation {
		index: usize,
		target: String,
		#[source]
		source: crate::Error,
	},
}

/// An ordered list of applicator runs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelegationPlan {
	#[serde(default, rename = "delegate")]
	pub entries: Vec<PlanEntry>,
}

/// One applicator run: a target and the members forwarded to it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanEntry {
	pub to: String,
	#[serde(default)]
	pub members: Vec<String>,
	/// Attribute name to member name.
	#[serde(default)]
	pub aliases: IndexMap<String, String>,
}

impl PlanEntry {
	fn delegation(&self) -> Delegation {
		let delegation = Delegation::to(&self.to).members(&self.members);
		self.aliases
			.iter()
			.fold(delegation, |delegation, (attr, member)| delegation.alias(attr, member))
	}
}

impl DelegationPlan {
	pub fn from_toml_str(input: &str) -> Result<Self, PlanError> {
		Ok(toml::from_str(input)?)
	}

	/// Applies every entry in file order, stopping at the first failure.
	///
	/// Entries before the failing one stay installed.
	pub fn apply(&self, class: &Class) -> Result<Class, PlanError> {
		for (index, entry) in self.entries.iter().enumerate() {
			entry
				.delegation()
				.apply(class)
				.map_err(|source| PlanError::Delegation {
					index,
					target: entry.to.clone(),
					source,
				})?;
		}
		debug!(class = class.name(), entries = self.entries.len(), "applied delegation plan");
		Ok(class.clone())
	}
}
