// Small parsing and formatting helpers.
//
// This module centralizes the "dirty" string handling (percentage rates,
// duration keys) so the rest of the code can assume clean, typed values.
use crate::error::{PipelineError, Result};
use num_format::{Locale, ToFormattedString};
use std::collections::BTreeMap;

/// Convert a percentage string like `"37.5%"` into a fraction (`0.375`).
///
/// The trailing `%` is required; anything else, or a non-numeric body, is
/// a fatal rate error. There is no forgiving fallback because a malformed
/// rate would silently corrupt every weighted column downstream.
pub fn percent_to_float(text: &str) -> Result<f64> {
    let body = text
        .strip_suffix('%')
        .ok_or_else(|| PipelineError::Rate(text.to_string()))?;
    let value: f64 = body
        .trim()
        .parse()
        .map_err(|_| PipelineError::Rate(text.to_string()))?;
    Ok(value / 100.0)
}

/// Normalize a configured duration value into its lookup key: the decimal
/// string with the dot removed (`0.5` -> `"05"`, `8` -> `"8"`).
pub fn duration_key(duration: f64) -> String {
    duration.to_string().replace('.', "")
}

/// Resolve a code's duration against the normalized duration table.
///
/// The leading character of the code is dropped; if the remainder is not
/// purely numeric the trailing character is dropped as well. The result
/// must match a [`duration_key`] exactly.
pub fn lookup_duration(table: &BTreeMap<String, f64>, code: &str) -> Result<f64> {
    let mut key: Vec<char> = code.chars().skip(1).collect();
    if !key.iter().all(|c| c.is_ascii_digit()) {
        key.pop();
    }
    let key: String = key.into_iter().collect();
    table
        .get(&key)
        .copied()
        .ok_or_else(|| PipelineError::DurationLookup {
            code: code.to_string(),
            key,
        })
}

/// Thin wrapper around `num-format` for integer-like values. Used for row
/// counts in console messages (e.g., `1,204 rows loaded`).
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
