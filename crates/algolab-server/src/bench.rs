//! Synthetic benchmark samples for the algorithm catalog.
//!
//! The samples are illustrative timing curves derived from each algorithm's
//! complexity class, not measurements: the endpoint must answer instantly
//! and identically on every host, so nothing here invokes the sandbox. The
//! execution core's own `durationMs` remains the only wall-clock figure.

use algolab_core::Language;
use serde::{Deserialize, Serialize};

/// Input sizes sampled for every algorithm.
pub const SAMPLE_SIZES: [u32; 7] = [10, 25, 50, 100, 250, 500, 1000];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkRequest {
    #[serde(rename = "algoId")]
    pub algo_id: String,
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    #[serde(rename = "inputSize")]
    pub input_size: u32,
    #[serde(rename = "durationMs")]
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResponse {
    #[serde(rename = "algoId")]
    pub algo_id: String,
    pub language: Language,
    pub points: Vec<BenchmarkPoint>,
}

/// Deterministic samples for one algorithm id.
pub fn sample(algo_id: &str, language: Language) -> BenchmarkResponse {
    let points = SAMPLE_SIZES
        .iter()
        .map(|&input_size| BenchmarkPoint {
            input_size,
            duration_ms: model_duration(algo_id, input_size),
        })
        .collect();

    BenchmarkResponse {
        algo_id: algo_id.to_string(),
        language,
        points,
    }
}

/// Idealized cost model per complexity class, in milliseconds rounded to
/// microsecond precision. Unknown ids fall back to a linear curve.
fn model_duration(algo_id: &str, input_size: u32) -> f64 {
    let n = f64::from(input_size);
    let millis = match algo_id {
        "bubble-sort" => 0.0004 * n * n,
        "binary-search" => 0.02 * n.log2(),
        "bfs" => 0.015 * n,
        _ => 0.01 * n,
    };
    (millis * 1000.0).round() / 1000.0
}
