//! Keyed records: clustering composite values on one of their attributes
//!
//! A [`Record`] is anything that can read a named numeric attribute and write
//! a named field. Maps implement it out of the box; structs implement it by
//! matching on the field name.

use crate::error::{Error, Result};
use crate::kmeans::Clusters;
use ndarray::Array1;
use std::collections::{BTreeMap, HashMap};

/// Named-field access on a composite input value
pub trait Record {
    /// Read the numeric attribute `name`, `None` when absent or not numeric
    fn attribute(&self, name: &str) -> Option<f64>;

    /// Write `value` into the field `name`, creating it if needed
    fn set_field(&mut self, name: &str, value: usize);
}

impl Record for HashMap<String, f64> {
    fn attribute(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }

    fn set_field(&mut self, name: &str, value: usize) {
        self.insert(name.to_owned(), value as f64);
    }
}

impl Record for BTreeMap<String, f64> {
    fn attribute(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }

    fn set_field(&mut self, name: &str, value: usize) {
        self.insert(name.to_owned(), value as f64);
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn attribute(&self, name: &str) -> Option<f64> {
        (**self).attribute(name)
    }

    fn set_field(&mut self, name: &str, value: usize) {
        (**self).set_field(name, value)
    }
}

/// Name of the field holding a record's cluster id
pub fn cluster_key(attribute: &str) -> String {
    format!("cluster_{attribute}")
}

/// Name of the field holding the size of a record's cluster
pub fn cluster_size_key(attribute: &str) -> String {
    format!("cluster_size_{attribute}")
}

/// Extract the attribute of every record, keyed by position.
pub fn extract_values<R: Record>(records: &[R], attribute: &str) -> Result<Array1<f64>> {
    if attribute.is_empty() {
        return Err(Error::invalid_parameter("Attribute name cannot be empty"));
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .attribute(attribute)
                .ok_or_else(|| Error::missing_attribute(index, attribute))
        })
        .collect::<Result<Vec<_>>>()
        .map(Array1::from_vec)
}

/// Write cluster membership onto the records and regroup them by cluster.
///
/// Each record gets `cluster_<attribute>` set to its cluster id and
/// `cluster_size_<attribute>` set to the size of that cluster. The records are
/// modified in place and the returned groups borrow those same records, so the
/// caller sees the new fields both through the result and in its own slice.
///
/// # Panics
///
/// Panics if `clusters` names an index outside `records`.
pub fn rebuild<'a, R: Record>(
    records: &'a mut [R],
    clusters: &Clusters<f64>,
    attribute: &str,
) -> Clusters<&'a R> {
    let id_key = cluster_key(attribute);
    let size_key = cluster_size_key(attribute);

    for (&cluster_id, members) in clusters {
        let size = members.len();
        for &index in members.keys() {
            let record = &mut records[index];
            record.set_field(&id_key, cluster_id);
            record.set_field(&size_key, size);
        }
    }

    let records: &'a [R] = records;
    clusters
        .iter()
        .map(|(&cluster_id, members)| {
            let grouped = members
                .keys()
                .map(|&index| (index, &records[index]))
                .collect();
            (cluster_id, grouped)
        })
        .collect()
}
