//! Hybrid retrieval over a Postgres chunk store: a vector lookup and a
//! lexical lookup run side by side and their rankings fuse into one list.

pub mod retrieve;

mod error;

pub use error::{Error, Result};
pub use retrieve::{DegradedMode, RetrievalRequest, RetrievedChunk, SearchOutcome};

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use quarry_config::{Config, EmbeddingProviderConfig};
use quarry_domain::{Chunk, lexical::LexicalQuery};
use quarry_providers::embedding;
use quarry_storage::{chunks, db::Db};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub struct VectorHit {
	pub chunk: Chunk,
	/// Cosine distance, ascending in the hit order.
	pub distance: f32,
}

#[derive(Debug, Clone)]
pub struct LexicalHit {
	pub chunk: Chunk,
	/// `ts_rank_cd` magnitude, descending in the hit order.
	pub rank: f32,
}

pub trait ChunkStore
where
	Self: Send + Sync,
{
	fn vector_search<'a>(
		&'a self,
		query_vec: &'a [f32],
		tags: &'a [String],
		pool_size: u32,
	) -> BoxFuture<'a, Result<Vec<VectorHit>>>;

	fn lexical_search<'a>(
		&'a self,
		query: &'a LexicalQuery,
		tags: &'a [String],
		pool_size: u32,
	) -> BoxFuture<'a, Result<Vec<LexicalHit>>>;
}

pub trait QueryEmbedder
where
	Self: Send + Sync,
{
	fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>>>;
}

/// The tunables the search path reads. Everything else in [`Config`] belongs
/// to wiring, not retrieval.
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
	pub rrf_k: u32,
	pub pool_size: u32,
	pub default_limit: u32,
	pub system_tag: String,
	pub search_timeout: Duration,
}
impl From<&Config> for RetrieverConfig {
	fn from(cfg: &Config) -> Self {
		Self {
			rrf_k: cfg.search.rrf_k,
			pool_size: cfg.search.pool_size,
			default_limit: cfg.search.default_limit,
			system_tag: cfg.search.system_tag.clone(),
			search_timeout: Duration::from_millis(cfg.search.search_timeout_ms),
		}
	}
}

pub struct Retriever {
	pub cfg: RetrieverConfig,
	pub store: Arc<dyn ChunkStore>,
	pub embedder: Arc<dyn QueryEmbedder>,
}
impl Retriever {
	pub fn new(
		cfg: RetrieverConfig,
		store: Arc<dyn ChunkStore>,
		embedder: Arc<dyn QueryEmbedder>,
	) -> Self {
		Self { cfg, store, embedder }
	}
}

/// [`ChunkStore`] backed by the `document_chunks` table.
pub struct PgChunkStore {
	db: Db,
	ts_config: String,
}
impl PgChunkStore {
	pub fn new(db: Db, ts_config: impl Into<String>) -> Self {
		Self { db, ts_config: ts_config.into() }
	}
}
impl ChunkStore for PgChunkStore {
	fn vector_search<'a>(
		&'a self,
		query_vec: &'a [f32],
		tags: &'a [String],
		pool_size: u32,
	) -> BoxFuture<'a, Result<Vec<VectorHit>>> {
		Box::pin(async move {
			let rows = chunks::vector_search(&self.db, query_vec, tags, pool_size)
				.await
				.map_err(|err| Error::StoreUnavailable(err.to_string()))?;
			let hits = rows
				.into_iter()
				.map(|row| VectorHit {
					chunk: Chunk {
						chunk_id: row.chunk_id,
						owner_tag: row.owner_tag,
						content: row.content,
					},
					distance: row.distance,
				})
				.collect();

			Ok(hits)
		})
	}

	fn lexical_search<'a>(
		&'a self,
		query: &'a LexicalQuery,
		tags: &'a [String],
		pool_size: u32,
	) -> BoxFuture<'a, Result<Vec<LexicalHit>>> {
		Box::pin(async move {
			let rows = chunks::lexical_search(&self.db, query, &self.ts_config, tags, pool_size)
				.await
				.map_err(|err| Error::StoreUnavailable(err.to_string()))?;
			let hits = rows
				.into_iter()
				.map(|row| LexicalHit {
					chunk: Chunk {
						chunk_id: row.chunk_id,
						owner_tag: row.owner_tag,
						content: row.content,
					},
					rank: row.rank,
				})
				.collect();

			Ok(hits)
		})
	}
}

/// [`QueryEmbedder`] backed by an OpenAI-compatible `/embeddings` endpoint.
pub struct HttpQueryEmbedder {
	cfg: EmbeddingProviderConfig,
}
impl HttpQueryEmbedder {
	pub fn new(cfg: EmbeddingProviderConfig) -> Self {
		Self { cfg }
	}
}
impl QueryEmbedder for HttpQueryEmbedder {
	fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>>> {
		Box::pin(async move {
			embedding::embed_query(&self.cfg, text)
				.await
				.map_err(|err| Error::EmbeddingUnavailable(err.to_string()))
		})
	}
}
