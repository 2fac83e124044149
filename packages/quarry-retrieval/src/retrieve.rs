use std::{future::Future, time::Duration};

use tokio::time;
use uuid::Uuid;

use quarry_domain::{
	Candidate, Chunk, SearchMode, fusion,
	lexical,
	scope::{self, Scope},
};

use crate::{Error, LexicalHit, Result, Retriever, VectorHit};

const EMBED_RETRY_BACKOFF: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct RetrievalRequest {
	pub query: String,
	pub owner_tag: Option<String>,
	pub scope: Scope,
	pub mode: SearchMode,
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RetrievedChunk {
	pub chunk_id: Uuid,
	pub owner_tag: String,
	pub content: String,
	pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedMode {
	VectorOnly,
	KeywordOnly,
}
impl DegradedMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::VectorOnly => "vector_only",
			Self::KeywordOnly => "keyword_only",
		}
	}
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchOutcome {
	pub items: Vec<RetrievedChunk>,
	/// Set when one hybrid sub-search dropped out and the results came from
	/// the surviving source alone.
	pub degraded: Option<DegradedMode>,
}

impl Retriever {
	pub async fn retrieve(&self, req: &RetrievalRequest) -> Result<SearchOutcome> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest("Query must be non-empty.".to_string()));
		}

		let tags = scope::resolve_tags(req.scope, req.owner_tag.as_deref(), &self.cfg.system_tag)?;
		let limit = match req.limit {
			Some(0) => return Err(Error::InvalidRequest("Limit must be positive.".to_string())),
			Some(limit) => limit,
			None => self.cfg.default_limit,
		} as usize;

		match req.mode {
			SearchMode::Vector => self.vector_only(query, &tags, limit).await,
			SearchMode::Keyword => self.keyword_only(query, &tags, limit).await,
			SearchMode::Hybrid => self.hybrid(query, &tags, limit).await,
		}
	}

	/// Vector mode keeps the raw similarity as the score. An embedding
	/// failure is fatal here; there is no second source to fall back to.
	async fn vector_only(&self, query: &str, tags: &[String], limit: usize) -> Result<SearchOutcome> {
		let query_vec = self.embed_with_retry(query).await?;
		let hits =
			self.timed(self.store.vector_search(&query_vec, tags, self.cfg.pool_size)).await?;

		Ok(finish(vector_candidates(hits), limit, None))
	}

	async fn keyword_only(
		&self,
		query: &str,
		tags: &[String],
		limit: usize,
	) -> Result<SearchOutcome> {
		let lexical_query = lexical::build_query(query);
		let hits = self
			.timed(self.store.lexical_search(&lexical_query, tags, self.cfg.pool_size))
			.await?;

		Ok(finish(lexical_candidates(hits), limit, None))
	}

	/// Both sub-searches run concurrently under one timeout each. Losing one
	/// source degrades the answer rather than failing it, and the survivors
	/// still go through rank fusion so scores stay on one scale.
	async fn hybrid(&self, query: &str, tags: &[String], limit: usize) -> Result<SearchOutcome> {
		let lexical_query = lexical::build_query(query);
		let query_vec = match self.embed_with_retry(query).await {
			Ok(vec) => Some(vec),
			Err(err) => {
				tracing::warn!(
					error = %err,
					"Embedding failed under hybrid mode; continuing with keyword search only."
				);

				None
			},
		};
		let Some(query_vec) = query_vec else {
			let hits = self
				.timed(self.store.lexical_search(&lexical_query, tags, self.cfg.pool_size))
				.await?;
			let fused = fusion::merge(&[], &lexical_candidates(hits), self.cfg.rrf_k);

			return Ok(finish(fused, limit, Some(DegradedMode::KeywordOnly)));
		};
		let (vector_result, keyword_result) = tokio::join!(
			self.timed(self.store.vector_search(&query_vec, tags, self.cfg.pool_size)),
			self.timed(self.store.lexical_search(&lexical_query, tags, self.cfg.pool_size)),
		);
		let vector = match vector_result {
			Ok(hits) => Some(vector_candidates(hits)),
			Err(err) => {
				tracing::warn!(
					error = %err,
					"Vector search failed under hybrid mode; continuing with keyword results only."
				);

				None
			},
		};
		let keyword = match keyword_result {
			Ok(hits) => Some(lexical_candidates(hits)),
			Err(err) => {
				tracing::warn!(
					error = %err,
					"Keyword search failed under hybrid mode; continuing with vector results only."
				);

				None
			},
		};

		match (vector, keyword) {
			(Some(vector), Some(keyword)) => {
				let fused = fusion::merge(&vector, &keyword, self.cfg.rrf_k);

				Ok(finish(fused, limit, None))
			},
			(Some(vector), None) => {
				let fused = fusion::merge(&vector, &[], self.cfg.rrf_k);

				Ok(finish(fused, limit, Some(DegradedMode::VectorOnly)))
			},
			(None, Some(keyword)) => {
				let fused = fusion::merge(&[], &keyword, self.cfg.rrf_k);

				Ok(finish(fused, limit, Some(DegradedMode::KeywordOnly)))
			},
			(None, None) => Err(Error::StoreUnavailable(
				"Both hybrid sub-searches failed.".to_string(),
			)),
		}
	}

	async fn embed_with_retry(&self, query: &str) -> Result<Vec<f32>> {
		match self.embedder.embed(query).await {
			Ok(vec) => Ok(vec),
			Err(err) => {
				tracing::warn!(error = %err, "Embedding attempt failed; retrying once.");

				time::sleep(EMBED_RETRY_BACKOFF).await;

				self.embedder.embed(query).await
			},
		}
	}

	async fn timed<T>(&self, fut: impl Future<Output = Result<T>> + Send) -> Result<T> {
		match time::timeout(self.cfg.search_timeout, fut).await {
			Ok(result) => result,
			Err(_) => Err(Error::StoreUnavailable(format!(
				"Search timed out after {}ms.",
				self.cfg.search_timeout.as_millis()
			))),
		}
	}
}

fn vector_candidates(hits: Vec<VectorHit>) -> Vec<Candidate> {
	hits.into_iter()
		.map(|hit| Candidate { chunk: hit.chunk, score: 1. - hit.distance })
		.collect()
}

fn lexical_candidates(hits: Vec<LexicalHit>) -> Vec<Candidate> {
	hits.into_iter().map(|hit| Candidate { chunk: hit.chunk, score: hit.rank }).collect()
}

fn finish(mut candidates: Vec<Candidate>, limit: usize, degraded: Option<DegradedMode>) -> SearchOutcome {
	candidates.truncate(limit);

	let items = candidates
		.into_iter()
		.map(|candidate| {
			let Chunk { chunk_id, owner_tag, content } = candidate.chunk;

			RetrievedChunk { chunk_id, owner_tag, content, score: candidate.score }
		})
		.collect();

	SearchOutcome { items, degraded }
}
