use std::cmp::Ordering;

use hashbrown::HashMap;
use tracing::debug;

use crate::dataset::{Dataset, FeatureId, SampleId};
use crate::error::{RecommendError, Result};
use crate::similarity::{Similarity, SimilarityMetric};

pub mod neighbors;

pub use neighbors::top_matches;

pub const DEFAULT_NEIGHBORHOOD_SIZE: usize = 5;

// Reverse order by score with NaN ranked last, ties by reverse id
fn best_first(score: f64, id: &str, other_score: f64, other_id: &str) -> Ordering {
    let by_score = match (score.is_nan(), other_score.is_nan()) {
        (false, false) => other_score.partial_cmp(&score).unwrap_or(Ordering::Equal),
        (is_nan, other_is_nan) => is_nan.cmp(&other_is_nan),
    };
    by_score.then_with(|| other_id.cmp(id))
}

#[derive(PartialEq, Debug, Clone)]
pub struct NeighborScore {
    pub id: SampleId,
    pub score: f64,
}

impl NeighborScore {
    pub fn new(id: SampleId, score: f64) -> Self {
        NeighborScore { id, score }
    }
}

impl Eq for NeighborScore {}

impl Ord for NeighborScore {
    fn cmp(&self, other: &Self) -> Ordering {
        best_first(self.score, &self.id, other.score, &other.id)
    }
}

impl PartialOrd for NeighborScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ItemScore {
    pub id: FeatureId,
    pub score: f64,
}

impl ItemScore {
    pub fn new(id: FeatureId, score: f64) -> Self {
        ItemScore { id, score }
    }
}

impl Eq for ItemScore {}

impl Ord for ItemScore {
    fn cmp(&self, other: &Self) -> Ordering {
        best_first(self.score, &self.id, other.score, &other.id)
    }
}

impl PartialOrd for ItemScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Predicts scores for the items `sample_id` has not rated yet.
///
/// The `n` most similar samples are looked up with [`top_matches`]. Each item
/// one of them rated, and the query sample did not, is scored with the
/// similarity-weighted average of the neighbors' ratings for it. The result
/// holds every such item, best first, ties ordered by descending item id.
///
/// `n` may not exceed the number of samples in the dataset, the query sample
/// included. Items whose similarity weights add up to exactly zero have no
/// weighted average and are left out.
pub fn recommend<S: Similarity + ?Sized>(
    dataset: &Dataset,
    sample_id: &str,
    n: usize,
    similarity: &S,
) -> Result<Vec<ItemScore>> {
    if n > dataset.len() {
        return Err(RecommendError::InvalidNeighborhoodSize {
            requested: n,
            dataset_size: dataset.len(),
        });
    }

    let sample = dataset
        .get(sample_id)
        .ok_or_else(|| RecommendError::UnknownSample(sample_id.to_string()))?;

    let neighbors = top_matches(dataset, sample_id, n, similarity)?;

    // item -> (sum of similarity-weighted ratings, sum of similarities)
    let mut item_totals: HashMap<&str, (f64, f64)> = HashMap::new();

    for scored_sample in neighbors.iter() {
        for (item_id, rating) in dataset[&scored_sample.id].iter() {
            if sample.contains_key(item_id) {
                continue;
            }
            let (weighted_sum, similarity_sum) =
                item_totals.entry(item_id.as_str()).or_insert((0.0, 0.0));
            *weighted_sum += rating * scored_sample.score;
            *similarity_sum += scored_sample.score;
        }
    }

    let qty_candidates = item_totals.len();
    let mut recommendations: Vec<ItemScore> = Vec::with_capacity(qty_candidates);

    for (item_id, (weighted_sum, similarity_sum)) in item_totals.into_iter() {
        if similarity_sum == 0.0 {
            debug!(sample = sample_id, item = item_id, "skipping item without similarity weight");
            continue;
        }
        recommendations.push(ItemScore::new(item_id.to_string(), weighted_sum / similarity_sum));
    }

    recommendations.sort();

    debug!(
        sample = sample_id,
        qty_neighbors = neighbors.len(),
        qty_candidates,
        qty_recommendations = recommendations.len(),
        "computed recommendations"
    );

    Ok(recommendations)
}

/// [`recommend`] with [`DEFAULT_NEIGHBORHOOD_SIZE`] neighbors and Pearson correlation.
pub fn recommend_with_defaults(dataset: &Dataset, sample_id: &str) -> Result<Vec<ItemScore>> {
    recommend(
        dataset,
        sample_id,
        DEFAULT_NEIGHBORHOOD_SIZE,
        &SimilarityMetric::default(),
    )
}
