//! Neighborhood-based recommendations over sparse rating data.
//!
//! Samples (for example users) rate features (for example items). Two
//! similarity metrics compare the sparse feature vectors of samples,
//! [`knn::top_matches`] ranks the nearest neighbors of a sample and
//! [`knn::recommend`] turns the neighbors' ratings into similarity-weighted
//! predictions for the items the sample has not rated yet.
//! [`dataset::transform_dataset`] switches between the sample-centric and the
//! item-centric view of the same ratings.

pub mod config;
pub mod config_processors;
pub mod dataset;
pub mod error;
pub mod knn;
pub mod similarity;

pub use config::RecommenderConfig;
pub use dataset::{transform_dataset, Dataset, FeatureVector};
pub use error::RecommendError;
pub use knn::{recommend, recommend_with_defaults, top_matches, ItemScore, NeighborScore};
pub use similarity::{inverse_squared_distance, pearson_correlation, Similarity, SimilarityMetric};
