//! Small numeric helpers shared by the analyzers.
//!
//! The percentile here is the "nearest-rank" variant: no interpolation, the
//! returned value is always a member of the sample. Analyzers use it to turn
//! "top 20%" / "bottom 20%" style rules into thresholds that scale with the
//! shop instead of hard-coded magic numbers.

/// Nearest-rank percentile of a sample.
///
/// Sorts ascending and picks `floor(pct / 100 × len)`, clamped to the last
/// valid index. Returns `None` for an empty sample; a one-element sample
/// returns that element for any `pct`.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = ((pct / 100.0) * sorted.len() as f64).floor() as usize;
    Some(sorted[idx.min(sorted.len() - 1)])
}

/// Round to one decimal place (payload figures).
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Round to two decimal places (payload figures, currency).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
