use uuid::Uuid;

use quarry_domain::lexical::LexicalQuery;

use crate::{
	Error, Result,
	db::Db,
	models::{LexicalHitRow, VectorHitRow},
};

/// Vector-distance-ordered lookup, ascending cosine distance, restricted to
/// the given owner tags.
pub async fn vector_search(
	db: &Db,
	query_vec: &[f32],
	tags: &[String],
	pool_size: u32,
) -> Result<Vec<VectorHitRow>> {
	if query_vec.is_empty() {
		return Err(Error::InvalidArgument("Query vector must be non-empty.".to_string()));
	}
	if tags.is_empty() {
		return Ok(Vec::new());
	}

	let vec_text = vector_to_pg(query_vec);
	let rows = sqlx::query_as::<_, VectorHitRow>(
		"\
SELECT
	chunk_id,
	owner_tag,
	content,
	(embedding <=> $1::text::vector)::real AS distance
FROM document_chunks
WHERE owner_tag = ANY($2)
	AND embedding IS NOT NULL
ORDER BY embedding <=> $1::text::vector
LIMIT $3",
	)
	.bind(vec_text.as_str())
	.bind(tags)
	.bind(pool_size as i64)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}

/// Lexical-rank-ordered lookup, descending `ts_rank_cd`, restricted to the
/// given owner tags. Expression queries go through `to_tsquery`; the
/// fallback form goes through `websearch_to_tsquery`.
pub async fn lexical_search(
	db: &Db,
	query: &LexicalQuery,
	ts_config: &str,
	tags: &[String],
	pool_size: u32,
) -> Result<Vec<LexicalHitRow>> {
	if tags.is_empty() {
		return Ok(Vec::new());
	}

	let (parser, text) = match query {
		LexicalQuery::Expression(expression) => ("to_tsquery", expression.as_str()),
		LexicalQuery::WebSearch(raw) => ("websearch_to_tsquery", raw.as_str()),
	};
	let sql = format!(
		"\
SELECT
	chunk_id,
	owner_tag,
	content,
	ts_rank_cd(search_vector, query) AS rank
FROM document_chunks, {parser}($1::regconfig, $2) AS query
WHERE owner_tag = ANY($3)
	AND search_vector @@ query
ORDER BY rank DESC
LIMIT $4",
	);
	let rows = sqlx::query_as::<_, LexicalHitRow>(sql.as_str())
		.bind(ts_config)
		.bind(text)
		.bind(tags)
		.bind(pool_size as i64)
		.fetch_all(&db.pool)
		.await?;

	Ok(rows)
}

/// Creates or replaces a chunk. The embedding lands in the same statement as
/// the content, and the row trigger recomputes the tsvector, so neither
/// derived column can go stale relative to `content`.
pub async fn upsert_chunk(
	db: &Db,
	chunk_id: Uuid,
	owner_tag: &str,
	content: &str,
	embedding: &[f32],
) -> Result<()> {
	if embedding.is_empty() {
		return Err(Error::InvalidArgument("Chunk embedding must be non-empty.".to_string()));
	}

	let vec_text = vector_to_pg(embedding);

	sqlx::query(
		"\
INSERT INTO document_chunks (chunk_id, owner_tag, content, embedding)
VALUES ($1, $2, $3, $4::text::vector)
ON CONFLICT (chunk_id) DO UPDATE
SET
	owner_tag = EXCLUDED.owner_tag,
	content = EXCLUDED.content,
	embedding = EXCLUDED.embedding",
	)
	.bind(chunk_id)
	.bind(owner_tag)
	.bind(content)
	.bind(vec_text.as_str())
	.execute(&db.pool)
	.await?;

	Ok(())
}

/// Removes every chunk owned by a tag (project removal). Returns the number
/// of deleted rows.
pub async fn delete_chunks_by_tag(db: &Db, owner_tag: &str) -> Result<u64> {
	let result = sqlx::query("DELETE FROM document_chunks WHERE owner_tag = $1")
		.bind(owner_tag)
		.execute(&db.pool)
		.await?;

	Ok(result.rows_affected())
}

pub async fn list_owner_tags(db: &Db) -> Result<Vec<String>> {
	let tags =
		sqlx::query_scalar::<_, String>("SELECT DISTINCT owner_tag FROM document_chunks ORDER BY owner_tag")
			.fetch_all(&db.pool)
			.await?;

	Ok(tags)
}

pub fn vector_to_pg(vec: &[f32]) -> String {
	let mut out = String::with_capacity(vec.len() * 8);

	out.push('[');

	for (i, value) in vec.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}

		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}
