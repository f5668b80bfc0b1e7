//! Lenient decoding of record arrays.
//!
//! The API returns JSON arrays whose elements are not guaranteed to be well formed.
//! A bad element is logged and skipped instead of failing the whole response.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Decodes each element of `values` as a `T`, dropping the ones that do not fit.
pub fn parse_records<T: DeserializeOwned>(values: Vec<Value>, kind: &str) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed {kind} record at index {index}: {e}");
                None
            }
        })
        .collect();
    if records.len() < total {
        warn!(
            "Dropped {} of {total} {kind} records",
            total - records.len()
        );
    }
    records
}
