// URL scoring — trait-based abstraction over the phishing model.
//
// The UrlScorer trait defines the interface. OnnxUrlScorer implements it
// with a local ONNX session; tests substitute a deterministic stub so the
// scoring contract can be exercised without model weights.

pub mod download;
pub mod onnx;
pub mod traits;
