use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChunkRow {
	pub chunk_id: Uuid,
	pub owner_tag: String,
	pub content: String,
}

/// A vector-lookup hit. `distance` is the cosine distance, ascending in the
/// result order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VectorHitRow {
	pub chunk_id: Uuid,
	pub owner_tag: String,
	pub content: String,
	pub distance: f32,
}

/// A lexical-lookup hit. `rank` is the `ts_rank_cd` magnitude, descending in
/// the result order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LexicalHitRow {
	pub chunk_id: Uuid,
	pub owner_tag: String,
	pub content: String,
	pub rank: f32,
}
