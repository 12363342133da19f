//! Clustering keyed records
//!
//! Each JSON object is tagged in place with `cluster_age` and
//! `cluster_size_age`.

use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut people = vec![
        json!({ "name": "ann", "age": 4 }),
        json!({ "name": "ben", "age": 7 }),
        json!({ "name": "cat", "age": 34 }),
        json!({ "name": "dan", "age": 38 }),
        json!({ "name": "eve", "age": 71 }),
    ];

    let clusters = kmeans1d::cluster(&mut people, 3, Some("age"))?;
    for (cluster_id, members) in &clusters {
        let names: Vec<&str> = members
            .values()
            .filter_map(|person| person["name"].as_str())
            .collect();
        println!("Cluster {}: {:?}", cluster_id, names);
    }

    println!("{}", serde_json::to_string_pretty(&people)?);

    Ok(())
}
