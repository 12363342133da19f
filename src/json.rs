//! Clustering dynamically typed input
//!
//! [`cluster`] takes a slice of [`serde_json::Value`]s and decides per call
//! whether it clusters bare numbers or objects keyed by an attribute.

use crate::error::{Error, Result};
use crate::kmeans::{Clusters, KMeans};
use crate::record::Record;
use ndarray::Array1;
use serde_json::{Map, Value};

impl Record for Map<String, Value> {
    fn attribute(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    fn set_field(&mut self, name: &str, value: usize) {
        self.insert(name.to_owned(), Value::from(value));
    }
}

impl Record for Value {
    fn attribute(&self, name: &str) -> Option<f64> {
        self.as_object().and_then(|map| map.attribute(name))
    }

    fn set_field(&mut self, name: &str, value: usize) {
        if let Some(map) = self.as_object_mut() {
            map.set_field(name, value);
        }
    }
}

/// Cluster `input` into `k` groups.
///
/// Without an attribute every entry must be a number and the groups hold
/// those numbers. With an attribute every entry must be an object carrying
/// that numeric field; the objects are tagged in place (see
/// [`KMeans::fit_records`]) and grouped. Either way the returned groups
/// borrow entries of `input`.
pub fn cluster<'a>(
    input: &'a mut [Value],
    k: usize,
    attribute: Option<&str>,
) -> Result<Clusters<&'a Value>> {
    let kmeans = KMeans::new(k);

    match attribute {
        Some(attribute) => Ok(kmeans.fit_records(input, attribute)?.clusters),
        None => {
            let values = numeric_values(input)?;
            let result = kmeans.fit(values.view())?;
            let input: &'a [Value] = input;

            Ok(result
                .clusters
                .into_iter()
                .map(|(cluster_id, members)| {
                    let grouped = members
                        .into_keys()
                        .map(|index| (index, &input[index]))
                        .collect();
                    (cluster_id, grouped)
                })
                .collect())
        }
    }
}

fn numeric_values(input: &[Value]) -> Result<Array1<f64>> {
    input
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value
                .as_f64()
                .ok_or_else(|| Error::invalid_data(index, "Expected a number"))
        })
        .collect::<Result<Vec<_>>>()
        .map(Array1::from_vec)
}
