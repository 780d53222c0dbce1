//! Descriptive statistics over `f64` slices.
//!
//! All functions return `None` for empty input so each extractor call
//! site decides between the documented 0.0 default and raising
//! [`UndefinedFeatureError`](crate::error::UndefinedFeatureError) —
//! the distinction matters and must not be made here.

/// Arithmetic mean.
///
/// # Examples
///
/// ```
/// assert_eq!(heur_core::features::mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(heur_core::features::mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance.
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(sum_sq / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Minimum value. NaN entries are never selected.
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// Maximum value. NaN entries are never selected.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}
