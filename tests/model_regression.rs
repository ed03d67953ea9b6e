//! Model regression tests — only run when the ONNX artifacts are present
//! (run `driftnet download-model` first). Tests that need weights skip
//! silently otherwise, so the default test run stays hermetic.
//!
//! The benign/phishy expectations are regression baselines against the
//! current model, not hard guarantees.

use std::path::PathBuf;

use driftnet::scorer::download;
use driftnet::scorer::onnx::OnnxUrlScorer;
use driftnet::scorer::traits::{ScorerError, UrlScorer};

/// The model directory, only if the artifacts are actually there.
fn model_dir() -> Option<PathBuf> {
    let dir = std::env::var("DRIFTNET_MODEL_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| download::default_model_dir());
    download::model_files_present(&dir).then_some(dir)
}

#[test]
fn load_from_missing_dir_is_a_model_load_error() {
    // Needs no weights: a directory without artifacts must fail fatally
    let dir = std::env::temp_dir().join("driftnet-no-model-here");
    let result = OnnxUrlScorer::load(&dir);
    assert!(
        matches!(result, Err(ScorerError::ModelLoad(_))),
        "loading from an empty dir must be a ModelLoad error"
    );
}

#[tokio::test]
async fn known_good_domain_leans_benign() {
    let Some(dir) = model_dir() else { return };
    let scorer = OnnxUrlScorer::load(&dir).unwrap();

    let score = scorer.score_url("https://www.google.com").await.unwrap();
    assert!(score < 0.5, "google.com should lean benign, got {score}");
}

#[tokio::test]
async fn phishing_shaped_url_leans_phishy() {
    let Some(dir) = model_dir() else { return };
    let scorer = OnnxUrlScorer::load(&dir).unwrap();

    let score = scorer
        .score_url("http://192.168.12.33/paypal.com/secure-login/verify-account.html")
        .await
        .unwrap();
    assert!(score > 0.5, "phishing-shaped URL should lean phishy, got {score}");
}

#[tokio::test]
async fn overlong_url_is_truncated_not_rejected() {
    let Some(dir) = model_dir() else { return };
    let scorer = OnnxUrlScorer::load(&dir).unwrap();

    // Far past the 128-token budget; must score the prefix, not error
    let url = format!("https://example.com/{}", "segment/".repeat(400));
    let score = scorer.score_url(&url).await.unwrap();
    assert!((0.0..=1.0).contains(&score), "score out of range: {score}");
}

#[tokio::test]
async fn empty_input_still_produces_a_probability() {
    let Some(dir) = model_dir() else { return };
    let scorer = OnnxUrlScorer::load(&dir).unwrap();

    // Deliberate pass-through behavior: special tokens only, valid score
    let score = scorer.score_url("").await.unwrap();
    assert!((0.0..=1.0).contains(&score), "score out of range: {score}");
}

#[tokio::test]
async fn inference_is_deterministic() {
    let Some(dir) = model_dir() else { return };
    let scorer = OnnxUrlScorer::load(&dir).unwrap();

    let first = scorer.score_url("https://example.com/a").await.unwrap();
    let second = scorer.score_url("https://example.com/a").await.unwrap();
    assert!(
        (first - second).abs() < 1e-9,
        "repeated passes should match: {first} vs {second}"
    );
}

#[tokio::test]
async fn batch_scores_match_single_scores() {
    let Some(dir) = model_dir() else { return };
    let scorer = OnnxUrlScorer::load(&dir).unwrap();

    let urls = vec![
        "https://www.google.com".to_string(),
        "http://192.168.12.33/secure-login".to_string(),
    ];
    let batch = scorer.score_many(&urls).await.unwrap();

    for url in &urls {
        let single = scorer.score_url(url).await.unwrap();
        // Tolerance covers fp32 accumulation differences from batch padding
        assert!(
            (batch[url] - single).abs() < 1e-4,
            "batched and single scores diverge for {url}"
        );
    }
}
