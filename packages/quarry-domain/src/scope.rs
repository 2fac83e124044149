use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tag-based partition selecting which chunks are eligible for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
	/// Chunks owned by one project. Requires an owner tag.
	Project,
	/// The global reference corpus only.
	System,
	/// The requested project plus the global reference corpus.
	All,
}
impl Scope {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Project => "project",
			Self::System => "system",
			Self::All => "all",
		}
	}
}
impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for Scope {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"project" => Ok(Self::Project),
			"system" => Ok(Self::System),
			"all" => Ok(Self::All),
			_ => Err(Error::UnknownScope { value: value.to_string() }),
		}
	}
}

/// Resolves a scope selection into the set of owner tags a store lookup may
/// match. `All` without an owner tag collapses to the reference corpus
/// alone.
pub fn resolve_tags(
	scope: Scope,
	owner_tag: Option<&str>,
	system_tag: &str,
) -> Result<Vec<String>> {
	let owner_tag = owner_tag.map(str::trim).filter(|tag| !tag.is_empty());

	match scope {
		Scope::Project => {
			let Some(tag) = owner_tag else {
				return Err(Error::MissingOwnerTag { scope });
			};

			Ok(vec![tag.to_string()])
		},
		Scope::System => Ok(vec![system_tag.to_string()]),
		Scope::All => match owner_tag {
			Some(tag) if tag != system_tag => Ok(vec![tag.to_string(), system_tag.to_string()]),
			_ => Ok(vec![system_tag.to_string()]),
		},
	}
}
