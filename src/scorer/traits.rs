// URL scorer trait — the seam between the model and everything else.
//
// The default implementation uses a local ONNX model (a BERT fine-tune for
// phishing detection). Scoring is keyed by URL string: feeding the same URL
// twice yields one map entry, and the map's key set is exactly the distinct
// inputs.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Errors the scoring contract can produce.
///
/// Loading is fatal — a scorer that failed to construct cannot be used and
/// the caller should not retry silently. Inference errors are per-call; the
/// caller may skip the offending input or abort its batch.
#[derive(Debug, Error)]
pub enum ScorerError {
    /// Model or tokenizer artifacts could not be loaded at construction.
    #[error("model load failed: {0}")]
    ModelLoad(String),

    /// Tokenization or the forward pass failed for a given input.
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Trait for scoring URLs. Implementations must be Send + Sync so a single
/// scorer can be shared across tokio tasks.
#[async_trait]
pub trait UrlScorer: Send + Sync {
    /// Score a single URL. Returns the phishing probability in [0.0, 1.0].
    async fn score_url(&self, url: &str) -> Result<f64, ScorerError>;

    /// Score multiple URLs, returning a map keyed by URL string.
    ///
    /// Duplicate inputs collapse (last write wins — the scores are identical
    /// anyway, inference is deterministic). The default implementation calls
    /// score_url sequentially and aborts on the first error; the ONNX scorer
    /// overrides it with a single batched forward pass.
    async fn score_many(&self, urls: &[String]) -> Result<HashMap<String, f64>, ScorerError> {
        let mut scores = HashMap::with_capacity(urls.len());
        for url in urls {
            scores.insert(url.clone(), self.score_url(url).await?);
        }
        Ok(scores)
    }
}
