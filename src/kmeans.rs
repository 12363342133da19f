//! K-means clustering on the scalar line

use crate::error::{Error, Result};
use crate::initialization::initialize_centroids;
use crate::record::{extract_values, rebuild, Record};
use crate::utils::{
    assign_points_to_centroids, calculate_cost, cluster_sizes, populate_clusters,
    recalculate_centroids, validate_data, validate_parameters,
};
use ndarray::{Array1, ArrayView1};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cluster id -> (input index -> member)
pub type Clusters<V> = BTreeMap<usize, BTreeMap<usize, V>>;

/// Inputs at least this long are assigned in parallel unless `n_jobs` says otherwise
const PARALLEL_THRESHOLD: usize = 10_000;

/// K-means clustering for one-dimensional data
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KMeans {
    /// Number of clusters
    pub n_clusters: usize,
    /// Maximum number of assignment passes before giving up
    pub max_iter: usize,
    /// Number of parallel jobs for the assignment step
    pub n_jobs: Option<usize>,
}

/// Result of k-means clustering
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KMeansResult {
    /// Cluster id for each input index
    pub labels: Array1<usize>,
    /// Centroids that produced the final, stable assignment
    pub centroids: Array1<f64>,
    /// Values grouped by cluster; ids without members are absent
    pub clusters: Clusters<f64>,
    /// Number of assignment passes performed
    pub n_iter: usize,
    /// Sum of absolute distances from each value to its centroid
    pub inertia: f64,
}

impl KMeansResult {
    /// Result for empty input: there is nothing to seed centroids from
    fn empty() -> Self {
        Self {
            labels: Array1::zeros(0),
            centroids: Array1::zeros(0),
            clusters: Clusters::new(),
            n_iter: 0,
            inertia: 0.0,
        }
    }

    /// Member count of every cluster id, empty ones included.
    ///
    /// Empty when the input was empty, since no centroids were seeded.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        cluster_sizes(self.labels.view(), self.centroids.len())
    }

    /// Number of clusters that own at least one value
    pub fn n_clusters_populated(&self) -> usize {
        self.clusters.len()
    }
}

/// Result of clustering records on one of their attributes
#[derive(Debug)]
pub struct RecordClusters<'a, R> {
    /// Cluster id -> input index -> the caller's own record
    pub clusters: Clusters<&'a R>,
    /// Scalar clustering of the extracted attribute values
    pub result: KMeansResult,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            n_clusters: 8,
            max_iter: 100,
            n_jobs: None,
        }
    }
}

impl KMeans {
    /// Create a new k-means clusterer with specified number of clusters
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Default::default()
        }
    }

    /// Set the maximum number of iterations
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the number of parallel jobs
    pub fn n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = Some(n_jobs);
        self
    }

    /// Cluster scalar values.
    ///
    /// Runs assign / regroup / recompute passes until one assignment pass
    /// changes nothing. Empty input yields an empty result without looking at
    /// the configuration. Exceeding `max_iter` passes is reported as
    /// [`Error::DidNotConverge`].
    pub fn fit(&self, values: ArrayView1<f64>) -> Result<KMeansResult> {
        if values.is_empty() {
            return Ok(KMeansResult::empty());
        }

        validate_parameters(self.n_clusters, self.max_iter)?;
        validate_data(values)?;

        let parallel = self.should_use_parallel(values.len());
        let mut centroids = initialize_centroids(values, self.n_clusters)?;
        let mut previous_labels: Option<Array1<usize>> = None;

        for iter in 0..self.max_iter {
            let n_iter = iter + 1;

            let (labels, changes) = assign_points_to_centroids(
                values,
                centroids.view(),
                previous_labels.as_ref().map(|l| l.view()),
                parallel,
            )?;
            let clusters = populate_clusters(values, labels.view());

            debug!(iteration = n_iter, changes, "k-means assignment pass");

            if changes == 0 {
                let inertia = calculate_cost(values, centroids.view(), labels.view())?;
                info!(
                    iterations = n_iter,
                    inertia,
                    populated = clusters.len(),
                    "k-means converged"
                );
                return Ok(KMeansResult {
                    labels,
                    centroids,
                    clusters,
                    n_iter,
                    inertia,
                });
            }

            centroids = recalculate_centroids(&clusters, self.n_clusters);
            previous_labels = Some(labels);
        }

        warn!(max_iter = self.max_iter, "k-means hit the iteration cap");
        Err(Error::did_not_converge(self.max_iter))
    }

    /// Cluster records on their numeric `attribute`.
    ///
    /// Every record is tagged in place with `cluster_<attribute>` and
    /// `cluster_size_<attribute>`, and the returned groups borrow the same
    /// records rather than copies. Nothing is written when an error is
    /// returned.
    pub fn fit_records<'a, R: Record>(
        &self,
        records: &'a mut [R],
        attribute: &str,
    ) -> Result<RecordClusters<'a, R>> {
        let values = extract_values(records, attribute)?;
        let result = self.fit(values.view())?;
        let clusters = rebuild(records, &result.clusters, attribute);

        Ok(RecordClusters { clusters, result })
    }

    /// Fit the model and return only the cluster labels
    pub fn fit_predict(&self, values: ArrayView1<f64>) -> Result<Array1<usize>> {
        let result = self.fit(values)?;
        Ok(result.labels)
    }

    /// Determine if parallel processing should be used
    fn should_use_parallel(&self, n_values: usize) -> bool {
        match self.n_jobs {
            Some(1) => false,
            Some(_) => true,
            None => n_values >= PARALLEL_THRESHOLD,
        }
    }
}
