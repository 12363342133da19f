use kmeans1d::{cluster_key, cluster_size_key, Clusters, Error, KMeans, Record};
use ndarray::{arr1, Array1};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

const AGES: [f64; 14] = [
    1.0, 3.0, 2.0, 5.0, 6.0, 2.0, 3.0, 1.0, 30.0, 36.0, 45.0, 3.0, 15.0, 17.0,
];

#[derive(Debug, Clone)]
struct Player {
    name: String,
    score: f64,
    cluster_score: Option<usize>,
    cluster_size_score: Option<usize>,
}

impl Player {
    fn new(name: &str, score: f64) -> Self {
        Self {
            name: name.to_string(),
            score,
            cluster_score: None,
            cluster_size_score: None,
        }
    }
}

impl Record for Player {
    fn attribute(&self, name: &str) -> Option<f64> {
        (name == "score").then_some(self.score)
    }

    fn set_field(&mut self, name: &str, value: usize) {
        match name {
            "cluster_score" => self.cluster_score = Some(value),
            "cluster_size_score" => self.cluster_size_score = Some(value),
            _ => {}
        }
    }
}

#[test]
fn test_scalar_regression_fixture() {
    let result = KMeans::new(3).fit(arr1(&AGES).view()).unwrap();

    let indices = |id: usize| result.clusters[&id].keys().copied().collect::<Vec<_>>();
    assert_eq!(indices(0), vec![0, 1, 2, 3, 4, 5, 6, 7, 11]);
    assert_eq!(indices(1), vec![12, 13]);
    assert_eq!(indices(2), vec![8, 9, 10]);
    assert_eq!(
        result.clusters[&2].values().copied().collect::<Vec<_>>(),
        vec![30.0, 36.0, 45.0]
    );
}

#[test]
fn test_attribute_mode_matches_scalar_mode() {
    let scalar = KMeans::new(3).fit(arr1(&AGES).view()).unwrap();

    let mut records: Vec<BTreeMap<String, f64>> = AGES
        .iter()
        .map(|&age| BTreeMap::from([("age".to_string(), age)]))
        .collect();
    let keyed = KMeans::new(3).fit_records(&mut records, "age").unwrap();

    assert_eq!(keyed.result, scalar);
    for (&cluster_id, members) in &keyed.clusters {
        assert_eq!(
            members.keys().collect::<Vec<_>>(),
            scalar.clusters[&cluster_id].keys().collect::<Vec<_>>()
        );
    }

    for (index, record) in records.iter().enumerate() {
        let cluster_id = scalar.labels[index];
        assert_eq!(record[&cluster_key("age")], cluster_id as f64);
        assert_eq!(
            record[&cluster_size_key("age")],
            scalar.clusters[&cluster_id].len() as f64
        );
        assert_eq!(record["age"], AGES[index]);
    }
}

#[test]
fn test_struct_records() {
    let mut players = vec![
        Player::new("ada", 12.0),
        Player::new("bo", 95.0),
        Player::new("cy", 14.0),
        Player::new("di", 90.0),
        Player::new("ed", 11.0),
    ];

    let outcome = KMeans::new(2).fit_records(&mut players, "score").unwrap();
    let low: Vec<&str> = outcome.clusters[&0]
        .values()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(low, vec!["ada", "cy", "ed"]);

    assert_eq!(players[1].cluster_score, Some(1));
    assert_eq!(players[1].cluster_size_score, Some(2));
    assert_eq!(players[4].cluster_score, Some(0));
    assert_eq!(players[4].cluster_size_score, Some(3));
}

#[test]
fn test_missing_attribute() {
    let mut players = vec![Player::new("ada", 12.0)];
    let err = KMeans::new(2).fit_records(&mut players, "age").unwrap_err();
    assert_eq!(err, Error::missing_attribute(0, "age"));
}

#[test]
fn test_empty_input() {
    let empty = Array1::<f64>::zeros(0);
    assert!(KMeans::new(5).fit(empty.view()).unwrap().clusters.is_empty());

    let mut records: Vec<HashMap<String, f64>> = Vec::new();
    let outcome = KMeans::new(5).fit_records(&mut records, "age").unwrap();
    assert!(outcome.clusters.is_empty());
}

#[test]
fn test_homogeneous_input() {
    let result = KMeans::new(3).fit(arr1(&[1.0; 11]).view()).unwrap();
    assert_eq!(result.clusters.len(), 1);
    assert_eq!(result.cluster_sizes(), vec![11, 0, 0]);
}

#[test]
fn test_negative_values() {
    let values = arr1(&[-50.0, -48.0, -52.0, 10.0, 12.0, 8.0]);
    let result = KMeans::new(2).fit(values.view()).unwrap();
    assert_eq!(result.labels, arr1(&[0, 0, 0, 1, 1, 1]));
    assert_eq!(result.centroids, arr1(&[-50.0, 10.0]));
}

#[test]
fn test_equidistant_value_goes_to_lower_cluster() {
    // Seeds at 0 and 10; the 5 sits exactly between them
    let values = arr1(&[0.0, 5.0, 20.0]);
    let kmeans = KMeans::new(2);
    let labels = kmeans1d::utils::assign_points_to_centroids(
        values.view(),
        arr1(&[0.0, 10.0]).view(),
        None,
        false,
    )
    .unwrap()
    .0;
    assert_eq!(labels[1], 0);

    let result = kmeans.fit(values.view()).unwrap();
    assert_eq!(result.labels, arr1(&[0, 0, 1]));
}

#[cfg(feature = "serde")]
#[test]
fn test_json_entry_point() {
    use serde_json::json;

    let mut input: Vec<serde_json::Value> = AGES.iter().map(|&age| json!({ "age": age })).collect();
    let clusters = kmeans1d::cluster(&mut input, 3, Some("age")).unwrap();

    assert_eq!(clusters[&1][&12]["cluster_age"], json!(1));
    assert_eq!(clusters[&1][&12]["cluster_size_age"], json!(2));
    assert_eq!(input[8]["cluster_age"], json!(2));
    assert_eq!(input[8]["cluster_size_age"], json!(3));
    assert_eq!(input[0]["cluster_size_age"], json!(9));
}

#[cfg(feature = "serde")]
#[test]
fn test_result_serializes() {
    let kmeans = KMeans::new(4).max_iter(20);
    let encoded = serde_json::to_string(&kmeans).unwrap();
    let decoded: KMeans = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, kmeans);
}

fn index_sets(clusters: &Clusters<f64>) -> Vec<BTreeSet<usize>> {
    clusters
        .values()
        .map(|members| members.keys().copied().collect())
        .collect()
}

proptest! {
    #[test]
    fn prop_every_index_in_exactly_one_cluster(
        values in proptest::collection::vec(-1000.0f64..1000.0, 1..200),
        k in 1usize..12,
    ) {
        let result = KMeans::new(k).max_iter(10_000).fit(Array1::from_vec(values.clone()).view());
        prop_assume!(result.is_ok());
        let result = result.unwrap();

        let sets = index_sets(&result.clusters);
        let total: usize = sets.iter().map(|s| s.len()).sum();
        let union: BTreeSet<usize> = sets.into_iter().flatten().collect();

        prop_assert_eq!(total, values.len());
        prop_assert_eq!(union, (0..values.len()).collect::<BTreeSet<_>>());
        prop_assert!(result.labels.iter().all(|&l| l < k));
        prop_assert!(result.clusters.keys().all(|&id| id < k));
    }

    #[test]
    fn prop_converged_assignment_is_stable(
        values in proptest::collection::vec(-1000.0f64..1000.0, 1..200),
        k in 1usize..12,
    ) {
        let values = Array1::from_vec(values);
        let result = KMeans::new(k).max_iter(10_000).fit(values.view());
        prop_assume!(result.is_ok());
        let result = result.unwrap();

        let (_, changes) = kmeans1d::utils::assign_points_to_centroids(
            values.view(),
            result.centroids.view(),
            Some(result.labels.view()),
            false,
        ).unwrap();
        prop_assert_eq!(changes, 0);
    }
}
