//! Basic k-means clustering example
//!
//! Groups a handful of ages into three clusters and prints each group with
//! its centroid.

use kmeans1d::KMeans;
use ndarray::arr1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let ages = arr1(&[
        1.0, 3.0, 2.0, 5.0, 6.0, 2.0, 3.0, 1.0, 30.0, 36.0, 45.0, 3.0, 15.0, 17.0,
    ]);

    let result = KMeans::new(3).max_iter(50).fit(ages.view())?;

    println!("Converged after {} iterations", result.n_iter);
    println!("Inertia: {:.2}", result.inertia);

    for (cluster_id, members) in &result.clusters {
        let values: Vec<f64> = members.values().copied().collect();
        println!(
            "Cluster {} (centroid {:.2}): {:?}",
            cluster_id, result.centroids[*cluster_id], values
        );
    }

    Ok(())
}
