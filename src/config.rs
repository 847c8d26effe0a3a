use std::ffi::OsStr;
use std::fs::File;

use anyhow::anyhow;
use justconfig::item::ValueExtractor;
use justconfig::processors::Trim;
use justconfig::sources::env::Env;
use justconfig::sources::text::ConfigText;
use justconfig::{ConfPath, Config};

use crate::config_processors::Unquote;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::knn::{self, ItemScore, DEFAULT_NEIGHBORHOOD_SIZE};
use crate::similarity::SimilarityMetric;

/// Neighborhood settings used by [`RecommenderConfig::recommend`].
///
/// Read from the `recommender` section of an optional config file:
///
/// ```text
/// recommender.neighborhood_size_n = 5
/// recommender.similarity = "pearson"
/// ```
///
/// The environment variables `NEIGHBORHOOD_SIZE` and `SIMILARITY` take
/// precedence over the file. Missing or non-numeric sizes fall back to the
/// default of five neighbors, an unknown similarity name is an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommenderConfig {
    pub neighborhood_size_n: usize,
    pub similarity: SimilarityMetric,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        RecommenderConfig {
            neighborhood_size_n: DEFAULT_NEIGHBORHOOD_SIZE,
            similarity: SimilarityMetric::default(),
        }
    }
}

impl RecommenderConfig {
    pub fn load(config_path: &str) -> anyhow::Result<RecommenderConfig> {
        let mut conf = Config::default();

        if let Ok(config_file) = File::open(config_path) {
            let config_text = ConfigText::new(config_file, config_path).map_err(|error| {
                anyhow!("Loading configuration file {} failed: {}", config_path, error)
            })?;
            conf.add_source(config_text);
        }

        conf.add_source(Env::new(&[
            (
                ConfPath::from(&["recommender", "neighborhood_size_n"]),
                OsStr::new("NEIGHBORHOOD_SIZE"),
            ),
            (
                ConfPath::from(&["recommender", "similarity"]),
                OsStr::new("SIMILARITY"),
            ),
        ]));

        RecommenderConfig::parse(&conf)
    }

    fn parse(conf: &Config) -> anyhow::Result<RecommenderConfig> {
        let section = ConfPath::from(&["recommender"]);

        let configured_similarity: std::result::Result<String, _> =
            conf.get(section.push("similarity")).unquote().value();
        let similarity = match configured_similarity {
            Ok(name) => name.parse::<SimilarityMetric>()?,
            Err(_) => SimilarityMetric::default(),
        };

        let neighborhood_size_n = conf
            .get(section.push("neighborhood_size_n"))
            .trim()
            .value()
            .unwrap_or(DEFAULT_NEIGHBORHOOD_SIZE);

        Ok(RecommenderConfig {
            neighborhood_size_n,
            similarity,
        })
    }

    /// [`knn::recommend`] with the configured neighborhood size and metric.
    pub fn recommend(&self, dataset: &Dataset, sample_id: &str) -> Result<Vec<ItemScore>> {
        knn::recommend(dataset, sample_id, self.neighborhood_size_n, &self.similarity)
    }
}
