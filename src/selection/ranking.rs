use crate::library::Chunk;
use crate::types::results::{Query, ScoreDetails};

pub const DEFAULT_KEYWORD_WEIGHT: f32 = 0.7;
pub const DEFAULT_DIGEST_WEIGHT: f32 = 0.3;

pub trait Scorer {
    fn score(&self, chunk: &Chunk, query: &Query) -> ScoreDetails;

    fn score_value(&self, details: &ScoreDetails) -> f32;
}

/// Keyword overlap blended with digest character agreement.
///
/// The digest component matches hex characters position by position, so for
/// unrelated text it hovers around 1/16. It has no semantic value and only
/// serves as a stable tie-breaker between chunks with equal keyword overlap.
#[derive(Debug, Clone, Copy)]
pub struct BlendedScorer {
    pub keyword_weight: f32,
    pub digest_weight: f32,
}

impl Default for BlendedScorer {
    fn default() -> Self {
        Self {
            keyword_weight: DEFAULT_KEYWORD_WEIGHT,
            digest_weight: DEFAULT_DIGEST_WEIGHT,
        }
    }
}

impl Scorer for BlendedScorer {
    fn score(&self, chunk: &Chunk, query: &Query) -> ScoreDetails {
        let content_lower = chunk.content.to_lowercase();
        let words: Vec<&str> = content_lower.split_whitespace().collect();

        let matched_terms: Vec<String> = query
            .terms
            .iter()
            .filter(|term| {
                words
                    .iter()
                    .any(|word| word.contains(term.as_str()) || term.contains(word))
            })
            .cloned()
            .collect();

        let keyword_score = if query.terms.is_empty() {
            0.0
        } else {
            matched_terms.len() as f32 / query.terms.len() as f32
        };

        ScoreDetails {
            keyword_score,
            digest_score: digest_score(query.digest.as_str(), chunk.digest.as_str()),
            matched_terms,
        }
    }

    fn score_value(&self, details: &ScoreDetails) -> f32 {
        let score = self.keyword_weight * details.keyword_score
            + self.digest_weight * details.digest_score;
        debug_assert!(score.is_finite() && score >= 0.0, "score {score} is not a valid relevance");
        // Weights only sum to 1.0 within the configured tolerance.
        score.min(1.0)
    }
}

/// Fraction of positions, up to the shorter length, where two hex strings agree.
pub fn digest_score(a: &str, b: &str) -> f32 {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0.0;
    }

    let matches = a
        .bytes()
        .zip(b.bytes())
        .filter(|(x, y)| x == y)
        .count();

    matches as f32 / len as f32
}
