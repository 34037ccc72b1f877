/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the population standard deviation given a pre-computed mean.
/// Returns 0.0 for empty input.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    variance.sqrt()
}

/// Mean of `(value, weight)` pairs weighted by `weight`.
/// Returns `None` when the weights sum to zero, since the mean is undefined.
pub fn weighted_mean(pairs: &[(f64, f64)]) -> Option<f64> {
    let weight_sum: f64 = pairs.iter().map(|(_, w)| w).sum();
    if weight_sum == 0.0 {
        return None;
    }
    Some(pairs.iter().map(|(v, w)| v * w).sum::<f64>() / weight_sum)
}
