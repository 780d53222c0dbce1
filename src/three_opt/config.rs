//! 3-opt search configuration.

/// One way of reconnecting the three tour segments after removing the
/// edges at a breakpoint triple `(i, j, k)`.
///
/// With removed edges `(a,b)`, `(c,d)`, `(e,f)` — where `b`, `d`, `f`
/// follow `a`, `c`, `e` in tour order — the patterns realizable as
/// segment reversals are:
///
/// | pattern | new edges | reversals |
/// |---|---|---|
/// | `ReverseFirst` | `(a,c) (b,d) (e,f)` | one |
/// | `ReverseSecond` | `(a,b) (c,e) (d,f)` | one |
/// | `ReverseBoth` | `(a,c) (b,e) (d,f)` | two |
///
/// The classic 3-opt neighborhood contains further reconnections that
/// exchange segments rather than reverse them; the move set is
/// deliberately configurable so callers can narrow or extend it without
/// touching the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReconnectionPattern {
    /// Reverse the segment between the first and second breakpoints.
    ReverseFirst,
    /// Reverse the segment between the second and third breakpoints.
    ReverseSecond,
    /// Reverse both segments.
    ReverseBoth,
}

impl ReconnectionPattern {
    /// All patterns, in default evaluation order.
    pub const ALL: [ReconnectionPattern; 3] = [
        ReconnectionPattern::ReverseFirst,
        ReconnectionPattern::ReverseSecond,
        ReconnectionPattern::ReverseBoth,
    ];
}

/// Configuration parameters for the 3-opt search.
///
/// # Examples
///
/// ```
/// use heur_core::three_opt::{ReconnectionPattern, ThreeOptConfig};
///
/// let config = ThreeOptConfig::default()
///     .with_patterns(vec![ReconnectionPattern::ReverseBoth])
///     .with_improvement_epsilon(1e-7);
/// assert_eq!(config.patterns.len(), 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ThreeOptConfig {
    /// Reconnection patterns evaluated per breakpoint triple, in order.
    pub patterns: Vec<ReconnectionPattern>,
    /// A move must improve by more than this to be emitted; guards
    /// against cycling on floating-point noise. Consequence: a best
    /// delta that is negative but within `(-epsilon, 0)` is reported as
    /// a local optimum. Set to `0.0` to emit on any strictly negative
    /// delta.
    pub improvement_epsilon: f64,
    /// Scan triples in parallel (effective only with the `parallel`
    /// feature; the winning move is identical to the sequential scan).
    pub parallel: bool,
}

impl Default for ThreeOptConfig {
    fn default() -> Self {
        Self {
            patterns: ReconnectionPattern::ALL.to_vec(),
            improvement_epsilon: 1e-9,
            parallel: false,
        }
    }
}

impl ThreeOptConfig {
    /// Sets the enabled reconnection patterns.
    pub fn with_patterns(mut self, patterns: Vec<ReconnectionPattern>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Sets the minimum improvement a move must deliver.
    pub fn with_improvement_epsilon(mut self, epsilon: f64) -> Self {
        self.improvement_epsilon = epsilon;
        self
    }

    /// Enables or disables the parallel triple scan.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<(), String> {
        if self.patterns.is_empty() {
            return Err("patterns must not be empty".to_string());
        }
        if !self.improvement_epsilon.is_finite() || self.improvement_epsilon < 0.0 {
            return Err(format!(
                "improvement_epsilon must be finite and non-negative, got {}",
                self.improvement_epsilon
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ThreeOptConfig::default();
        assert_eq!(config.patterns, ReconnectionPattern::ALL.to_vec());
        assert_eq!(config.improvement_epsilon, 1e-9);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ThreeOptConfig::default()
            .with_patterns(vec![ReconnectionPattern::ReverseSecond])
            .with_improvement_epsilon(1e-6)
            .with_parallel(true);
        assert_eq!(config.patterns, vec![ReconnectionPattern::ReverseSecond]);
        assert_eq!(config.improvement_epsilon, 1e-6);
        assert!(config.parallel);
    }

    #[test]
    fn test_config_validate_rejects_empty_patterns() {
        let config = ThreeOptConfig::default().with_patterns(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_rejects_bad_epsilon() {
        assert!(ThreeOptConfig::default().with_improvement_epsilon(-1.0).validate().is_err());
        assert!(ThreeOptConfig::default().with_improvement_epsilon(f64::NAN).validate().is_err());
    }
}
