#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {0}")]
	InvalidRequest(String),
	#[error(transparent)]
	InvalidScope(#[from] quarry_domain::Error),
	#[error("Embedding provider unavailable: {0}")]
	EmbeddingUnavailable(String),
	#[error("Chunk store unavailable: {0}")]
	StoreUnavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
