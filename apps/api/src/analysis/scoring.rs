//! Match scoring: document embeddings compared by cosine similarity,
//! scaled to a 0-100 score.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`; tests substitute mocks.

use async_trait::async_trait;

use crate::embeddings::EmbeddingClient;
use crate::errors::AppError;

/// Upper bound on text length sent to the embedding collaborator.
/// Bounds latency and memory against pathological input sizes.
pub const SCORING_MAX_CHARS: usize = 30_000;

/// The match scorer trait. Implement this to swap scoring backends without
/// touching the endpoint or orchestration code.
///
/// Inputs are non-empty by contract: the orchestrator short-circuits empty
/// text before the scorer is reached.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Returns a score in `[0, 100]` rounded to two decimal places.
    async fn score(&self, resume_text: &str, job_text: &str) -> Result<f64, AppError>;
}

/// Scorer backed by the embeddings collaborator: one batched embedding
/// request for both texts, cosine similarity computed locally.
pub struct EmbeddingMatchScorer {
    embeddings: EmbeddingClient,
}

impl EmbeddingMatchScorer {
    pub fn new(embeddings: EmbeddingClient) -> Self {
        Self { embeddings }
    }
}

#[async_trait]
impl MatchScorer for EmbeddingMatchScorer {
    async fn score(&self, resume_text: &str, job_text: &str) -> Result<f64, AppError> {
        let resume = truncate_chars(resume_text, SCORING_MAX_CHARS);
        let job = truncate_chars(job_text, SCORING_MAX_CHARS);

        let vectors = self.embeddings.embed_batch(&[resume, job]).await?;
        let similarity = cosine_similarity(&vectors[0], &vectors[1]);

        Ok(to_match_score(similarity))
    }
}

/// Truncates to at most `max_chars` characters, never splitting a character.
/// Idempotent: truncating already-truncated text is a no-op.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Scales a cosine similarity to `[0, 100]` with two decimal places.
/// Values outside `[0, 1]` (negative similarity, float drift past 1.0)
/// clamp to the range bounds.
fn to_match_score(similarity: f32) -> f64 {
    let clamped = similarity.clamp(0.0, 1.0) as f64;
    (clamped * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_100() {
        let v = vec![0.3_f32, -0.5, 0.8, 0.1];
        let similarity = cosine_similarity(&v, &v);
        assert_eq!(to_match_score(similarity), 100.0);
    }

    #[test]
    fn test_orthogonal_vectors_score_0() {
        let a = vec![1.0_f32, 0.0];
        let b = vec![0.0_f32, 1.0];
        assert_eq!(to_match_score(cosine_similarity(&a, &b)), 0.0);
    }

    #[test]
    fn test_opposite_vectors_clamp_to_0() {
        let a = vec![1.0_f32, 0.0];
        let b = vec![-1.0_f32, 0.0];
        assert_eq!(to_match_score(cosine_similarity(&a, &b)), 0.0);
    }

    #[test]
    fn test_zero_vector_scores_0() {
        let a = vec![0.0_f32, 0.0];
        let b = vec![1.0_f32, 1.0];
        assert_eq!(to_match_score(cosine_similarity(&a, &b)), 0.0);
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        assert_eq!(to_match_score(0.876543), 87.65);
        assert_eq!(to_match_score(0.87656), 87.66);
    }

    #[test]
    fn test_drift_past_one_clamps_to_100() {
        assert_eq!(to_match_score(1.000001), 100.0);
    }

    #[test]
    fn test_score_stays_in_bounds() {
        for similarity in [-2.0_f32, -0.01, 0.0, 0.33, 0.999, 1.0, 5.0] {
            let score = to_match_score(similarity);
            assert!((0.0..=100.0).contains(&score), "out of bounds: {score}");
        }
    }

    #[test]
    fn test_truncate_below_cap_is_identity() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_cuts_at_cap() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
    }

    #[test]
    fn test_truncate_is_idempotent_past_cap() {
        // N and N+1 characters past the cap truncate to the same text.
        let at_cap_plus_one = "a".repeat(SCORING_MAX_CHARS + 1);
        let at_cap_plus_two = "a".repeat(SCORING_MAX_CHARS + 2);
        let once = truncate_chars(&at_cap_plus_one, SCORING_MAX_CHARS);
        let other = truncate_chars(&at_cap_plus_two, SCORING_MAX_CHARS);
        assert_eq!(once, other);
        assert_eq!(truncate_chars(once, SCORING_MAX_CHARS), once);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // Multibyte characters must never be split mid-sequence.
        let text = "ééééé";
        assert_eq!(truncate_chars(text, 3), "ééé");
        assert_eq!(truncate_chars(text, 3).chars().count(), 3);
    }
}
