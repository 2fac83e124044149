use std::{cmp::Ordering, collections::HashMap};

use uuid::Uuid;

use crate::Candidate;

/// Merges two ranked candidate lists with Reciprocal Rank Fusion.
///
/// Each candidate at 1-based rank `r` contributes `1 / (k + r)` to its
/// chunk's accumulator; a chunk present in both lists sums both
/// contributions, so cross-modal agreement outranks a single strong
/// placement. Fusing on rank position sidesteps the incomparable score
/// ranges of cosine similarity and lexical rank.
///
/// The output keeps every distinct chunk from either input, ordered by
/// descending fused score. Ties preserve first-seen order, which places
/// vector-discovered chunks ahead of keyword-only ones. Truncation is the
/// caller's concern.
pub fn merge(vector: &[Candidate], keyword: &[Candidate], k: u32) -> Vec<Candidate> {
	let mut by_chunk: HashMap<Uuid, usize> = HashMap::new();
	let mut fused: Vec<Candidate> = Vec::with_capacity(vector.len() + keyword.len());

	for list in [vector, keyword] {
		for (index, candidate) in list.iter().enumerate() {
			let contribution = reciprocal_rank(k, index + 1);

			match by_chunk.get(&candidate.chunk.chunk_id) {
				Some(&slot) => fused[slot].score += contribution,
				None => {
					by_chunk.insert(candidate.chunk.chunk_id, fused.len());
					fused.push(Candidate { chunk: candidate.chunk.clone(), score: contribution });
				},
			}
		}
	}

	// Vec::sort_by is stable, so equal scores keep insertion order.
	fused.sort_by(|left, right| cmp_f32_desc(left.score, right.score));

	fused
}

pub fn reciprocal_rank(k: u32, rank: usize) -> f32 {
	1.0 / (k as f32 + rank as f32)
}

pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
