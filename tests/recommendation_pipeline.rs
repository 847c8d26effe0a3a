use float_cmp::approx_eq;
use tracing_subscriber::EnvFilter;

use tastebuds::dataset::{dataset_from, Dataset};
use tastebuds::{
    recommend, recommend_with_defaults, top_matches, transform_dataset, RecommendError,
    RecommenderConfig, SimilarityMetric,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("tastebuds=trace"))
        .with_test_writer()
        .try_init();
}

fn critics() -> Dataset {
    dataset_from(&[
        (
            "Lisa Rose",
            &[
                ("Lady in the Water", 2.5),
                ("Snakes on a Plane", 3.5),
                ("Just My Luck", 3.0),
                ("Superman Returns", 3.5),
                ("You, Me and Dupree", 2.5),
                ("The Night Listener", 3.0),
            ],
        ),
        (
            "Gene Seymour",
            &[
                ("Lady in the Water", 3.0),
                ("Snakes on a Plane", 3.5),
                ("Just My Luck", 1.5),
                ("Superman Returns", 5.0),
                ("The Night Listener", 3.0),
                ("You, Me and Dupree", 3.5),
            ],
        ),
        (
            "Michael Phillips",
            &[
                ("Lady in the Water", 2.5),
                ("Snakes on a Plane", 3.0),
                ("Superman Returns", 3.5),
                ("The Night Listener", 4.0),
            ],
        ),
        (
            "Claudia Puig",
            &[
                ("Snakes on a Plane", 3.5),
                ("Just My Luck", 3.0),
                ("The Night Listener", 4.5),
                ("Superman Returns", 4.0),
                ("You, Me and Dupree", 2.5),
            ],
        ),
        (
            "Mick LaSalle",
            &[
                ("Lady in the Water", 3.0),
                ("Snakes on a Plane", 4.0),
                ("Just My Luck", 2.0),
                ("Superman Returns", 3.0),
                ("The Night Listener", 3.0),
                ("You, Me and Dupree", 2.0),
            ],
        ),
        (
            "Jack Matthews",
            &[
                ("Lady in the Water", 3.0),
                ("Snakes on a Plane", 4.0),
                ("The Night Listener", 3.0),
                ("Superman Returns", 5.0),
                ("You, Me and Dupree", 3.5),
            ],
        ),
        (
            "Toby",
            &[
                ("Snakes on a Plane", 4.5),
                ("You, Me and Dupree", 1.0),
                ("Superman Returns", 4.0),
            ],
        ),
    ])
}

#[test]
fn should_rank_critics_similar_to_toby() {
    let neighbors = top_matches(&critics(), "Toby", 3, &SimilarityMetric::Pearson).unwrap();
    let names: Vec<&str> = neighbors.iter().map(|scored| scored.id.as_str()).collect();

    assert_eq!(vec!["Lisa Rose", "Mick LaSalle", "Claudia Puig"], names);
    assert!(approx_eq!(f64, 0.9912407071619299, neighbors[0].score, epsilon = 1e-9));
}

#[test]
fn should_recommend_movies_for_toby() {
    init_tracing();
    let recommendations = recommend_with_defaults(&critics(), "Toby").unwrap();
    let titles: Vec<&str> = recommendations.iter().map(|scored| scored.id.as_str()).collect();

    assert_eq!(
        vec!["The Night Listener", "Lady in the Water", "Just My Luck"],
        titles
    );
    assert!(approx_eq!(f64, 3.3477895267131013, recommendations[0].score, epsilon = 1e-9));
    assert!(approx_eq!(f64, 2.8325499182641614, recommendations[1].score, epsilon = 1e-9));
    assert!(approx_eq!(f64, 2.5309807037655645, recommendations[2].score, epsilon = 1e-9));
}

#[test]
fn negatively_correlated_neighbors_pull_predictions() {
    // With every critic as a neighbor, Michael Phillips (correlation -1) is included
    let data = critics();
    let recommendations = recommend(&data, "Toby", data.len(), &SimilarityMetric::Pearson).unwrap();

    assert_eq!("The Night Listener", recommendations[0].id);
    assert!(approx_eq!(f64, 3.1192015867855516, recommendations[0].score, epsilon = 1e-9));
    assert!(approx_eq!(f64, 3.0022347306071264, recommendations[1].score, epsilon = 1e-9));
}

#[test]
fn should_reject_neighborhood_beyond_dataset() {
    let data = critics();
    assert_eq!(
        Err(RecommendError::InvalidNeighborhoodSize {
            requested: 8,
            dataset_size: 7
        }),
        recommend(&data, "Toby", 8, &SimilarityMetric::Pearson)
    );
    assert!(recommend_with_defaults(&data, "Toby").is_ok());
}

#[test]
fn should_find_similar_items_after_transform() {
    let movies = transform_dataset(&critics());
    let neighbors =
        top_matches(&movies, "Superman Returns", 5, &SimilarityMetric::Pearson).unwrap();

    assert_eq!("You, Me and Dupree", neighbors[0].id);
    assert!(approx_eq!(f64, 0.6579516949597695, neighbors[0].score, epsilon = 1e-9));
    // Just My Luck is negatively correlated with Superman Returns
    assert!(neighbors.last().unwrap().score < 0.0);
    assert_eq!(critics(), transform_dataset(&movies));
}

#[test]
fn should_recommend_with_loaded_config() {
    init_tracing();
    let config = RecommenderConfig::load("does-not-exist.conf").unwrap();
    let data = critics();

    assert_eq!(
        recommend(&data, "Toby", config.neighborhood_size_n, &config.similarity),
        config.recommend(&data, "Toby")
    );
}
