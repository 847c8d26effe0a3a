use std::collections::BinaryHeap;

use tracing::trace;

use crate::dataset::Dataset;
use crate::error::{RecommendError, Result};
use crate::knn::NeighborScore;
use crate::similarity::Similarity;

/// Ranks every other sample in the dataset by its similarity to `sample_id`.
///
/// Returns at most `n` neighbors, best first. Equal scores are ordered by
/// descending sample id. The query sample itself is never part of the result
/// and asking for more neighbors than there are candidates returns all of
/// them.
pub fn top_matches<S: Similarity + ?Sized>(
    dataset: &Dataset,
    sample_id: &str,
    n: usize,
    similarity: &S,
) -> Result<Vec<NeighborScore>> {
    let sample = dataset
        .get(sample_id)
        .ok_or_else(|| RecommendError::UnknownSample(sample_id.to_string()))?;

    if n == 0 {
        return Ok(Vec::new());
    }

    // Max-heap on the reversed ordering, so the top is the worst neighbor kept so far
    let mut closest_neighbors: BinaryHeap<NeighborScore> =
        BinaryHeap::with_capacity(n.min(dataset.len()));

    for (other_id, other_vector) in dataset.iter() {
        if other_id == sample_id {
            continue;
        }

        let scored_sample =
            NeighborScore::new(other_id.clone(), similarity.similarity(other_vector, sample));
        trace!(sample = sample_id, neighbor = %other_id, score = scored_sample.score, "scored candidate");

        if closest_neighbors.len() < n {
            closest_neighbors.push(scored_sample);
        } else if let Some(mut worst) = closest_neighbors.peek_mut() {
            if scored_sample < *worst {
                *worst = scored_sample;
            }
        }
    }

    Ok(closest_neighbors.into_sorted_vec())
}
