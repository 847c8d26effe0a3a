use hashbrown::HashMap;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

pub type SampleId = String;
pub type FeatureId = String;
pub type Rating = f64;

/// Sparse ratings of one sample, keyed by feature (item) id.
pub type FeatureVector = HashMap<FeatureId, Rating>;

/// Sample id to its sparse feature vector.
pub type Dataset = HashMap<SampleId, FeatureVector>;

/// Swaps the two index levels of a dataset.
///
/// A sample-centric view (`user -> {item -> rating}`) becomes an item-centric
/// view (`item -> {user -> rating}`) and vice versa, which lets the same
/// similarity and neighbor code compute item-item instead of user-user
/// similarities. Applying it twice yields the original dataset.
pub fn transform_dataset(data: &Dataset) -> Dataset {
    let mut transformed: Dataset = HashMap::new();

    for (outer_id, vector) in data.iter() {
        for (inner_id, rating) in vector.iter() {
            transformed
                .entry(inner_id.clone())
                .or_insert_with(HashMap::new)
                .insert(outer_id.clone(), *rating);
        }
    }

    transformed
}

/// Builds a deterministic synthetic rating matrix.
///
/// Every sample `user-<i>` rates `ratings_per_sample` distinct items drawn
/// from `item-0..item-<num_features>`, with integer ratings in
/// `1..=max_rating`. The same seed always produces the same dataset.
pub fn random_dataset(
    num_samples: usize,
    num_features: usize,
    ratings_per_sample: usize,
    max_rating: u32,
    seed: u64,
) -> Dataset {
    let mut rng = Pcg64::seed_from_u64(seed);
    let ratings_per_sample = ratings_per_sample.min(num_features);
    let max_rating = max_rating.max(1);

    let all_features = (0..num_features).collect_vec();

    (0..num_samples)
        .map(|sample_idx| {
            let rated_features = all_features
                .choose_multiple(&mut rng, ratings_per_sample)
                .copied()
                .collect_vec();
            let vector: FeatureVector = rated_features
                .into_iter()
                .map(|feature_idx| {
                    let rating = rng.gen_range(1..=max_rating) as Rating;
                    (format!("item-{}", feature_idx), rating)
                })
                .collect();
            (format!("user-{}", sample_idx), vector)
        })
        .collect()
}

/// Convenience for building small datasets by hand, mostly in tests.
pub fn dataset_from(records: &[(&str, &[(&str, Rating)])]) -> Dataset {
    records
        .iter()
        .map(|(sample_id, ratings)| {
            let vector: FeatureVector = ratings
                .iter()
                .map(|(feature_id, rating)| (feature_id.to_string(), *rating))
                .collect();
            (sample_id.to_string(), vector)
        })
        .collect()
}
