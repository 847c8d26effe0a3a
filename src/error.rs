use thiserror::Error;

use crate::dataset::SampleId;

#[derive(Error, Debug, PartialEq)]
pub enum RecommendError {
    #[error("neighborhood size {requested} exceeds the dataset size {dataset_size}")]
    InvalidNeighborhoodSize {
        requested: usize,
        dataset_size: usize,
    },

    #[error("sample '{0}' is not part of the dataset")]
    UnknownSample(SampleId),
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown similarity metric '{0}', expected 'euclidean' or 'pearson'")]
pub struct UnknownMetricError(pub String);

pub type Result<T> = std::result::Result<T, RecommendError>;
