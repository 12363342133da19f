//! Initial centroid placement for k-means clustering

use crate::error::{Error, Result};
use ndarray::{Array1, ArrayView1};

/// Initialize centroids by splitting the value range into `n_clusters` even steps.
///
/// With `interval = ceil((max - min) / n_clusters)`, centroid `i` sits at
/// `min + interval * i`. The placement is deterministic and ignores how the
/// values are distributed inside the range. When every value is identical the
/// interval is zero and all centroids coincide at `min`.
pub fn initialize_centroids(values: ArrayView1<f64>, n_clusters: usize) -> Result<Array1<f64>> {
    if n_clusters == 0 {
        return Err(Error::invalid_k(n_clusters));
    }

    let (min, max) = value_range(values)
        .ok_or_else(|| Error::invalid_parameter("Cannot seed centroids from empty data"))?;

    let k = n_clusters as f64;
    let range = max - min;
    let interval = if range.is_finite() {
        (range / k).ceil()
    } else {
        // the range itself overflows for values spanning most of f64
        (max / k - min / k).ceil()
    };

    Ok(Array1::from_iter((0..n_clusters).map(|i| {
        let centroid = min + interval * i as f64;
        if centroid.is_finite() {
            centroid
        } else {
            (min / 2.0 + interval / 2.0 * i as f64) * 2.0
        }
    })))
}

/// Minimum and maximum of the values, `None` when empty
pub(crate) fn value_range(values: ArrayView1<f64>) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(min, max), &v| {
        (min.min(v), max.max(v))
    }))
}
