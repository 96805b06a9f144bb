use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::{result::ResultCollection, statistics::RunRecord};

/// The numbers a report renderer needs from a collection, best networks first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub num_candidates: usize,
    /// Scores of the best networks, at most `top_n` of them.
    pub top_scores: Vec<f64>,
    /// `exp(score - best)` for each top score: likelihood relative to the best network.
    pub normalized_scores: Vec<f64>,
    pub runs: Vec<RunSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Seconds since the Unix epoch.
    pub start: f64,
    pub end: Option<f64>,
    /// Rounded to three decimals.
    pub runtime_minutes: Option<f64>,
    pub host: String,
}

impl ResultSummary {
    pub fn from_collection(result: &ResultCollection, top_n: usize) -> Self {
        let top_scores: Vec<f64> = result.top(top_n).map(|c| c.score()).collect();
        let normalized_scores = rescale_log_values(&top_scores)
            .into_iter()
            .map(f64::exp)
            .collect();

        ResultSummary {
            num_candidates: result.len(),
            top_scores,
            normalized_scores,
            runs: result.runs().iter().map(RunSummary::from).collect(),
        }
    }
}

impl From<&RunRecord> for RunSummary {
    fn from(run: &RunRecord) -> Self {
        RunSummary {
            start: epoch_seconds(run.start()),
            end: run.end().map(epoch_seconds),
            runtime_minutes: run
                .runtime()
                .map(|d| (d.as_secs_f64() / 60.0 * 1000.0).round() / 1000.0),
            host: run.host().to_string(),
        }
    }
}

fn epoch_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(before) => -before.duration().as_secs_f64(),
    }
}

/// Shifts log values so that the largest becomes `0.0`, making `exp` safe from overflow.
pub fn rescale_log_values(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values.iter().map(|v| v - max).collect()
}
