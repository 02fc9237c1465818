pub mod ranking;

use std::cmp::Ordering;

use crate::library::Library;
use crate::types::results::{Query, ScoredChunk};
pub use ranking::{digest_score, BlendedScorer, Scorer};

pub struct ChunkRanker<S> {
	scorer: S,
}

impl Default for ChunkRanker<BlendedScorer> {
	fn default() -> Self {
		Self {
			scorer: BlendedScorer::default(),
		}
	}
}

impl<S> ChunkRanker<S>
where
	S: Scorer,
{
	pub fn new(scorer: S) -> Self {
		Self { scorer }
	}

	/// Score every chunk of `library` and return the best `top_k`.
	pub fn rank<'a>(&self, library: &'a Library, query: &Query, top_k: usize) -> Vec<ScoredChunk<'a>> {
		// 1. Scoring Phase
		let mut scored: Vec<ScoredChunk<'a>> = library
			.chunks
			.iter()
			.enumerate()
			.map(|(position, chunk)| {
				let details = self.scorer.score(chunk, query);
				let score = self.scorer.score_value(&details);
				ScoredChunk {
					chunk,
					position,
					score,
					details,
				}
			})
			.collect();

		// 2. Ordering Phase
		// Sort by (score desc, insertion position asc)
		scored.sort_by(|a, b| {
			b.score
				.partial_cmp(&a.score)
				.unwrap_or(Ordering::Equal)
				.then(a.position.cmp(&b.position))
		});

		debug_assert!(scored.windows(2).all(|w| {
			let a = &w[0];
			let b = &w[1];
			a.score > b.score || (a.score == b.score && a.position < b.position)
		}));

		// 3. Cut Phase
		scored.truncate(top_k);
		scored
	}
}
