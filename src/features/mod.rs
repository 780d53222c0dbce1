//! Feature extraction contract.
//!
//! Every problem domain exposes two pure functions: one summarizing the
//! static instance (counts, matrix statistics, capacity ratios) and one
//! summarizing the live solution state (partial-structure sizes,
//! utilization, remaining capacities, validity). Both return a
//! [`FeatureVector`]: a flat mapping from stable, documented keys to
//! scalars or small numeric arrays.
//!
//! The selection agent downstream treats the vectors of all domains as
//! structurally interchangeable — the key *sets* differ per domain, but
//! the shape (flat, deterministic, numeric) never does. That uniformity
//! is the whole point of this module.
//!
//! # Determinism
//!
//! Extractors are referentially transparent: identical inputs produce
//! bit-identical vectors, and no call mutates the instance or state it
//! reads. Heuristic selection depends on this.
//!
//! # Degenerate inputs
//!
//! Empty collections resolve to a documented default (0.0). Statistics
//! that are mathematically undefined — a mean over non-zero edges when
//! there are none — raise
//! [`UndefinedFeatureError`](crate::error::UndefinedFeatureError)
//! instead of returning NaN.

mod stats;
mod types;

pub use stats::{max, mean, min, std_dev, variance};
pub use types::{FeatureExtractor, FeatureValue, FeatureVector};
