//! # One-dimensional K-means Clustering
//!
//! This crate partitions scalar values, or records carrying a numeric
//! attribute, into a fixed number of clusters using Lloyd-style k-means with
//! absolute difference as the distance.
//!
//! ## Features
//!
//! - Deterministic range-splitting initialization
//! - Assign / recompute passes until the assignment stops changing, bounded
//!   by an iteration cap
//! - Clustering of keyed records, tagging each with its cluster id and size
//! - Parallel assignment for large inputs via Rayon
//! - `serde_json::Value` input behind the `serde` feature
//!
//! ## Example
//!
//! ```rust
//! use kmeans1d::KMeans;
//! use ndarray::arr1;
//!
//! let ages = arr1(&[1.0, 3.0, 2.0, 5.0, 6.0, 30.0, 36.0, 45.0, 15.0, 17.0]);
//!
//! let result = KMeans::new(3).max_iter(50).fit(ages.view()).unwrap();
//! println!("Cluster labels: {:?}", result.labels);
//! assert_eq!(result.clusters[&1].len(), 2);
//! ```

#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod initialization;
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod json;
pub mod kmeans;
pub mod record;
pub mod utils;

pub use error::{Error, Result};
pub use initialization::initialize_centroids;
#[cfg(feature = "serde")]
pub use json::cluster;
pub use kmeans::{Clusters, KMeans, KMeansResult, RecordClusters};
pub use record::{cluster_key, cluster_size_key, Record};

/// Re-export commonly used types from ndarray
pub use ndarray::{Array1, ArrayView1};
