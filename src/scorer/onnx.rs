// Local ONNX phishing scorer using the bert-finetuned-phishing model.
//
// The scorer runs entirely on the local CPU — no API calls, no rate limits,
// no network dependency. The model is a BERT sequence classifier with two
// output classes {benign, phishing}; the phishing probability is the
// softmax mass on class index 1.
//
// Model: ealvaradob/bert-finetuned-phishing (ONNX export)

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::debug;

use super::traits::{ScorerError, UrlScorer};
use crate::output::truncate_chars;

/// Token budget per URL. Longer inputs are silently truncated by the
/// tokenizer — a score is still produced from the prefix.
pub const MAX_TOKENS: usize = 128;

/// Local ONNX-based URL scorer. Holds the model session and tokenizer
/// behind Arc<Mutex> so inference can be offloaded to spawn_blocking
/// without blocking the async runtime.
pub struct OnnxUrlScorer {
    // Arc+Mutex because:
    // 1. ort::Session::run takes &mut self, so we need interior mutability
    // 2. spawn_blocking requires 'static, so we need Arc for shared ownership
    // 3. We need Send+Sync for the UrlScorer trait
    // Forward passes are serialized through the mutex — one scorer instance
    // is safe to share across tasks.
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxUrlScorer {
    /// Load the ONNX model and tokenizer from the given directory.
    ///
    /// Expects `model.onnx` and `tokenizer.json` to exist in `model_dir`.
    /// Call `download::download_model()` first if they don't. The load is
    /// expensive (weight deserialization) and should happen once per
    /// process, not per call.
    pub fn load(model_dir: &Path) -> Result<Self, ScorerError> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            return Err(ScorerError::ModelLoad(format!(
                "model file not found: {} (run `driftnet download-model` to download it)",
                model_path.display()
            )));
        }
        if !tokenizer_path.exists() {
            return Err(ScorerError::ModelLoad(format!(
                "tokenizer file not found: {} (run `driftnet download-model` to download it)",
                tokenizer_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| {
                ScorerError::ModelLoad(format!("failed to create ONNX session builder: {e}"))
            })?
            .commit_from_file(&model_path)
            .map_err(|e| {
                ScorerError::ModelLoad(format!(
                    "failed to load ONNX model from {}: {e}",
                    model_path.display()
                ))
            })?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ScorerError::ModelLoad(format!("failed to load tokenizer: {e}")))?;

        // Pin the token budget at load time so every encode call truncates
        // silently instead of erroring on long URLs.
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_TOKENS,
                ..TruncationParams::default()
            }))
            .map_err(|e| {
                ScorerError::ModelLoad(format!("failed to configure truncation: {e}"))
            })?;

        debug!("Loaded ONNX phishing model from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl UrlScorer for OnnxUrlScorer {
    async fn score_url(&self, url: &str) -> Result<f64, ScorerError> {
        let mut scores = self.score_many(&[url.to_string()]).await?;
        scores
            .remove(url)
            .ok_or_else(|| ScorerError::Inference(format!("no score produced for {url}")))
    }

    /// True batch inference: tokenize all URLs, run one forward pass, apply
    /// softmax to each logit pair, and key the results by URL.
    ///
    /// The CPU-bound tokenization and inference are offloaded to
    /// spawn_blocking so they don't block the tokio async runtime.
    async fn score_many(&self, urls: &[String]) -> Result<HashMap<String, f64>, ScorerError> {
        if urls.is_empty() {
            return Ok(HashMap::new());
        }

        // Clone Arc handles for the spawn_blocking closure ('static requirement)
        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let urls = urls.to_vec();

        tokio::task::spawn_blocking(move || {
            let scores = score_sync(&session, &tokenizer, &urls)?;

            // Keyed by URL — duplicate inputs collapse, last write wins
            let mut map = HashMap::with_capacity(urls.len());
            for (url, score) in urls.iter().zip(scores) {
                map.insert(url.clone(), score);
            }
            Ok(map)
        })
        .await
        .map_err(|e| ScorerError::Inference(format!("spawn_blocking panicked: {e}")))?
    }
}

/// Synchronous scoring — tokenization, the forward pass, and softmax.
/// Called from spawn_blocking to avoid blocking the async runtime.
fn score_sync(
    session: &Arc<Mutex<Session>>,
    tokenizer: &Arc<Tokenizer>,
    urls: &[String],
) -> Result<Vec<f64>, ScorerError> {
    // Tokenize all URLs, finding the max sequence length for padding.
    // Truncation to MAX_TOKENS was configured on the tokenizer at load.
    let encodings: Vec<_> = urls
        .iter()
        .map(|u| {
            tokenizer
                .encode(u.as_str(), true)
                .map_err(|e| ScorerError::Inference(format!("tokenization failed: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let batch_size = encodings.len();
    let max_len = encodings.iter().map(|e| e.get_ids().len()).max().unwrap_or(0);

    // Build flat input tensors with right-padding to max_len. BERT uses:
    //   input_ids: token IDs (pad with 0)
    //   attention_mask: 1 for real tokens, 0 for padding
    //   token_type_ids: all zeros for single-sentence input
    // Shape: [batch_size, max_len]
    let mut input_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
    let mut attention_mask_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
    let mut token_type_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);

    for enc in &encodings {
        let ids = enc.get_ids();
        let mask = enc.get_attention_mask();
        let seq_len = ids.len();

        input_ids_flat.extend(ids.iter().map(|&id| id as i64));
        attention_mask_flat.extend(mask.iter().map(|&m| m as i64));
        token_type_ids_flat.extend(std::iter::repeat_n(0i64, seq_len));

        // Pad to max_len (BERT pad token id = 0)
        let pad_len = max_len - seq_len;
        input_ids_flat.extend(std::iter::repeat_n(0i64, pad_len));
        attention_mask_flat.extend(std::iter::repeat_n(0i64, pad_len));
        token_type_ids_flat.extend(std::iter::repeat_n(0i64, pad_len));
    }

    let shape = [batch_size as i64, max_len as i64];

    let input_ids_tensor = Tensor::from_array((shape, input_ids_flat))
        .map_err(|e| ScorerError::Inference(format!("failed to create input_ids tensor: {e}")))?;
    let attention_mask_tensor = Tensor::from_array((shape, attention_mask_flat))
        .map_err(|e| {
            ScorerError::Inference(format!("failed to create attention_mask tensor: {e}"))
        })?;
    let token_type_ids_tensor = Tensor::from_array((shape, token_type_ids_flat))
        .map_err(|e| {
            ScorerError::Inference(format!("failed to create token_type_ids tensor: {e}"))
        })?;

    // Run inference — no gradients, one deterministic forward pass.
    // Output shape: [batch_size, 2] — raw logits for {benign, phishing}.
    let logits = {
        let mut session = session
            .lock()
            .map_err(|e| ScorerError::Inference(format!("session lock poisoned: {e}")))?;

        let outputs = session
            .run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            })
            .map_err(|e| ScorerError::Inference(format!("ONNX inference failed: {e}")))?;

        let (_out_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ScorerError::Inference(format!("failed to extract logits: {e}")))?;

        data.to_vec()
    };

    // Convert each logit pair to the phishing-class probability
    let mut scores = Vec::with_capacity(batch_size);
    for (i, url) in urls.iter().enumerate() {
        let benign = logits[i * 2] as f64;
        let phishing = logits[i * 2 + 1] as f64;
        let score = softmax_binary(benign, phishing);

        debug!(
            score = score,
            url_preview = %truncate_chars(url, 60),
            "scored URL"
        );

        scores.push(score);
    }

    Ok(scores)
}

/// Two-class softmax: the probability mass on the second (phishing) class.
/// Shifts by the max logit for numerical stability.
fn softmax_binary(benign: f64, phishing: f64) -> f64 {
    let max = benign.max(phishing);
    let exp_benign = (benign - max).exp();
    let exp_phishing = (phishing - max).exp();
    exp_phishing / (exp_benign + exp_phishing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_equal_logits() {
        let result = softmax_binary(0.0, 0.0);
        assert!((result - 0.5).abs() < 1e-10, "Equal logits should give 0.5");
    }

    #[test]
    fn test_softmax_large_phishing_logit() {
        let result = softmax_binary(-5.0, 5.0);
        assert!(result > 0.999, "Large phishing margin should approach 1.0");
    }

    #[test]
    fn test_softmax_large_benign_logit() {
        let result = softmax_binary(5.0, -5.0);
        assert!(result < 0.001, "Large benign margin should approach 0.0");
    }

    #[test]
    fn test_softmax_complement() {
        // softmax(a, b) + softmax(b, a) = 1.0
        for (a, b) in [(0.3, 1.7), (-2.0, 4.5), (10.0, 10.5)] {
            let sum = softmax_binary(a, b) + softmax_binary(b, a);
            assert!(
                (sum - 1.0).abs() < 1e-10,
                "softmax({a},{b}) + softmax({b},{a}) should equal 1.0"
            );
        }
    }

    #[test]
    fn test_softmax_shift_invariant() {
        // Adding a constant to both logits must not change the probability
        let base = softmax_binary(1.2, -0.7);
        let shifted = softmax_binary(1.2 + 100.0, -0.7 + 100.0);
        assert!((base - shifted).abs() < 1e-10);
    }

    #[test]
    fn test_softmax_extreme_logits_stay_in_range() {
        // Stability check: huge logits must not overflow to NaN or leave [0,1]
        for (a, b) in [(1000.0, -1000.0), (-1000.0, 1000.0), (800.0, 800.0)] {
            let p = softmax_binary(a, b);
            assert!(p.is_finite(), "softmax({a},{b}) should be finite");
            assert!((0.0..=1.0).contains(&p), "softmax({a},{b}) out of range: {p}");
        }
    }

    #[test]
    fn test_max_tokens_budget() {
        assert_eq!(MAX_TOKENS, 128, "Token budget should match the model config");
    }
}
