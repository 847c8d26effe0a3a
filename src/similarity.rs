use std::fmt;
use std::str::FromStr;

use itertools::Itertools;

use crate::dataset::{FeatureId, FeatureVector};
use crate::error::UnknownMetricError;

/// Scores how alike two sparse feature vectors are; higher means more similar.
///
/// Implemented by [`SimilarityMetric`] and by any plain function or closure
/// with the matching signature, so callers can plug in their own metric.
pub trait Similarity {
    fn similarity(&self, left: &FeatureVector, right: &FeatureVector) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&FeatureVector, &FeatureVector) -> f64,
{
    fn similarity(&self, left: &FeatureVector, right: &FeatureVector) -> f64 {
        self(left, right)
    }
}

/// The built-in similarity metrics.
///
/// Both variants only look at the features the two vectors have in common
/// and score vectors without any shared feature as exactly `0.0`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum SimilarityMetric {
    /// `1 / (1 + squared euclidean distance)` over the shared features.
    InverseSquaredDistance,
    /// Pearson correlation coefficient over the shared features.
    Pearson,
}

impl SimilarityMetric {
    pub const ALL: [SimilarityMetric; 2] = [
        SimilarityMetric::InverseSquaredDistance,
        SimilarityMetric::Pearson,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SimilarityMetric::InverseSquaredDistance => "euclidean",
            SimilarityMetric::Pearson => "pearson",
        }
    }
}

impl Similarity for SimilarityMetric {
    fn similarity(&self, left: &FeatureVector, right: &FeatureVector) -> f64 {
        match self {
            SimilarityMetric::InverseSquaredDistance => inverse_squared_distance(left, right),
            SimilarityMetric::Pearson => pearson_correlation(left, right),
        }
    }
}

impl Default for SimilarityMetric {
    fn default() -> Self {
        SimilarityMetric::Pearson
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimilarityMetric {
    type Err = UnknownMetricError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "inverse_squared_distance" | "distance" => {
                Ok(SimilarityMetric::InverseSquaredDistance)
            }
            "pearson" | "correlation" => Ok(SimilarityMetric::Pearson),
            _ => Err(UnknownMetricError(value.to_string())),
        }
    }
}

fn shared_features<'a>(left: &'a FeatureVector, right: &FeatureVector) -> Vec<&'a FeatureId> {
    left.keys()
        .filter(|feature_id| right.contains_key(*feature_id))
        .collect_vec()
}

/// Similarity derived from the squared euclidean distance over shared features.
///
/// Lies in `(0, 1]` when at least one feature is shared and equals `1.0` only
/// if both vectors agree on every shared feature.
pub fn inverse_squared_distance(left: &FeatureVector, right: &FeatureVector) -> f64 {
    let shared = shared_features(left, right);

    if shared.is_empty() {
        return 0.0;
    }

    let sum_of_squares: f64 = shared
        .iter()
        .map(|feature_id| (left[*feature_id] - right[*feature_id]).powi(2))
        .sum();

    1.0 / (1.0 + sum_of_squares)
}

/// Pearson correlation restricted to the shared features.
///
/// Returns `0.0` when nothing is shared or when either vector has no
/// variance over the shared features.
pub fn pearson_correlation(left: &FeatureVector, right: &FeatureVector) -> f64 {
    let shared = shared_features(left, right);

    if shared.is_empty() {
        return 0.0;
    }
    let n = shared.len() as f64;

    let mut sum_left = 0_f64;
    let mut sum_right = 0_f64;
    let mut sum_sq_left = 0_f64;
    let mut sum_sq_right = 0_f64;
    let mut product_sum = 0_f64;

    for feature_id in shared.iter() {
        let (x, y) = (left[*feature_id], right[*feature_id]);
        sum_left += x;
        sum_right += y;
        sum_sq_left += x * x;
        sum_sq_right += y * y;
        product_sum += x * y;
    }

    let numerator = product_sum - (sum_left * sum_right / n);
    // Rounding can push a zero variance slightly below zero
    let variance_left = (sum_sq_left - sum_left * sum_left / n).max(0.0);
    let variance_right = (sum_sq_right - sum_right * sum_right / n).max(0.0);
    let denominator = (variance_left * variance_right).sqrt();

    if denominator == 0.0 {
        0.0
    } else {
        (numerator / denominator).clamp(-1.0, 1.0)
    }
}
