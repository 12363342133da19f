//! Assignment, grouping and centroid update steps for k-means clustering

use crate::error::{Error, Result};
use crate::kmeans::Clusters;
use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;

/// Find the closest centroid for a given value.
///
/// Centroids are scanned in ascending id order and only a strictly smaller
/// distance replaces the current best, so a value equidistant from several
/// centroids goes to the lowest id.
pub fn find_closest_centroid(value: f64, centroids: ArrayView1<f64>) -> Result<usize> {
    if centroids.is_empty() {
        return Err(Error::invalid_parameter("No centroids provided"));
    }

    let mut min_distance = f64::INFINITY;
    let mut closest_centroid = 0;

    for (i, &centroid) in centroids.iter().enumerate() {
        let distance = (value - centroid).abs();
        if distance < min_distance {
            min_distance = distance;
            closest_centroid = i;
        }
    }

    Ok(closest_centroid)
}

/// Assign all values to their closest centroids.
///
/// Returns the new labels together with the number of values whose label
/// differs from `previous`. Without a previous assignment every value counts
/// as changed.
pub fn assign_points_to_centroids(
    values: ArrayView1<f64>,
    centroids: ArrayView1<f64>,
    previous: Option<ArrayView1<usize>>,
    parallel: bool,
) -> Result<(Array1<usize>, usize)> {
    let labels: Vec<usize> = if parallel {
        (0..values.len())
            .into_par_iter()
            .map(|i| find_closest_centroid(values[i], centroids))
            .collect::<Result<_>>()?
    } else {
        values
            .iter()
            .map(|&value| find_closest_centroid(value, centroids))
            .collect::<Result<_>>()?
    };
    let labels = Array1::from_vec(labels);
    let changes = count_changes(labels.view(), previous);

    Ok((labels, changes))
}

/// Count labels that differ from the previous assignment
pub fn count_changes(labels: ArrayView1<usize>, previous: Option<ArrayView1<usize>>) -> usize {
    match previous {
        Some(prev) if prev.len() == labels.len() => labels
            .iter()
            .zip(prev.iter())
            .filter(|(x, y)| x != y)
            .count(),
        _ => labels.len(),
    }
}

/// Group values by cluster id.
///
/// Only ids that own at least one index appear in the result.
pub fn populate_clusters(values: ArrayView1<f64>, labels: ArrayView1<usize>) -> Clusters<f64> {
    let mut clusters = Clusters::new();

    for (index, (&cluster_id, &value)) in labels.iter().zip(values.iter()).enumerate() {
        clusters
            .entry(cluster_id)
            .or_default()
            .insert(index, value);
    }

    clusters
}

/// Recompute every centroid as the mean of its members.
///
/// A cluster with no members moves to 0 rather than keeping its last position.
pub fn recalculate_centroids(clusters: &Clusters<f64>, n_clusters: usize) -> Array1<f64> {
    Array1::from_iter((0..n_clusters).map(|cluster_id| match clusters.get(&cluster_id) {
        Some(members) if !members.is_empty() => mean(members.values().copied()),
        _ => 0.0,
    }))
}

/// Arithmetic mean of a non-empty set of finite values.
///
/// Falls back to a running mean when the plain sum overflows, so the result
/// stays finite for values near `f64::MAX`.
fn mean(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let (sum, count) = values
        .clone()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if sum.is_finite() {
        return sum / count as f64;
    }

    values
        .enumerate()
        .fold(0.0, |mean, (i, v)| mean + (v - mean) / (i + 1) as f64)
}

/// Calculate the total cost (sum of absolute distances to assigned centroids)
pub fn calculate_cost(
    values: ArrayView1<f64>,
    centroids: ArrayView1<f64>,
    labels: ArrayView1<usize>,
) -> Result<f64> {
    let mut total_cost = 0.0;

    for (i, (&value, &cluster_id)) in values.iter().zip(labels.iter()).enumerate() {
        let centroid = centroids
            .get(cluster_id)
            .ok_or_else(|| Error::invalid_data(i, "Invalid cluster assignment"))?;
        total_cost += (value - centroid).abs();
    }

    Ok(total_cost)
}

/// Calculate cluster sizes
pub fn cluster_sizes(labels: ArrayView1<usize>, n_clusters: usize) -> Vec<usize> {
    labels.fold(vec![0; n_clusters], |mut sizes, &cluster_id| {
        if let Some(size) = sizes.get_mut(cluster_id) {
            *size += 1;
        }
        sizes
    })
}

/// Validate clustering parameters
pub fn validate_parameters(n_clusters: usize, max_iter: usize) -> Result<()> {
    if n_clusters == 0 {
        return Err(Error::invalid_k(n_clusters));
    }

    if max_iter == 0 {
        return Err(Error::invalid_parameter("max_iter must be > 0"));
    }

    Ok(())
}

/// Validate input values
pub fn validate_data(values: ArrayView1<f64>) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::invalid_data(index, "Value must be finite")),
        None => Ok(()),
    }
}
