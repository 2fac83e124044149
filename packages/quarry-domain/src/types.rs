use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// A unit of indexed text. The store keeps the dense embedding and the
/// lexical tsvector alongside `content`; only the identity fields travel
/// through the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
	pub chunk_id: Uuid,
	pub owner_tag: String,
	pub content: String,
}

/// A chunk annotated with a retrieval score. The score's meaning depends on
/// where the candidate came from: `1 - cosine distance` for vector lookups,
/// the backend rank magnitude for lexical lookups, and the reciprocal-rank
/// sum after fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
	pub chunk: Chunk,
	pub score: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
	Vector,
	Keyword,
	#[default]
	Hybrid,
}
impl SearchMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Vector => "vector",
			Self::Keyword => "keyword",
			Self::Hybrid => "hybrid",
		}
	}
}
impl FromStr for SearchMode {
	type Err = Error;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"vector" => Ok(Self::Vector),
			"keyword" => Ok(Self::Keyword),
			"hybrid" => Ok(Self::Hybrid),
			_ => Err(Error::UnknownSearchMode { value: value.to_string() }),
		}
	}
}
