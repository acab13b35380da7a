use crate::error::{PipelineError, Result};
use crate::types::CodeRow;
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

/// Project the aggregated rows onto the configured result columns, in
/// order, rendering every cell as its final output string.
///
/// `code` is the row key; every other column must have been produced by
/// the earlier steps, and naming one that was not is fatal. Remaining
/// missing values (cost-table misses, undefined means) become `0` here
/// and only here.
pub fn select_columns(rows: &[CodeRow], columns: &[String]) -> Result<Vec<Vec<String>>> {
    rows.iter()
        .map(|row| {
            columns
                .iter()
                .map(|col| {
                    if col == "code" {
                        return Ok(row.code.clone());
                    }
                    let value = row
                        .values
                        .get(col)
                        .ok_or_else(|| PipelineError::UnknownColumn(col.clone()))?;
                    Ok(match value {
                        Some(v) => v.to_string(),
                        None => "0".to_string(),
                    })
                })
                .collect()
        })
        .collect()
}

pub fn write_csv(path: impl AsRef<Path>, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Print a markdown preview of the first rows. The columns are
/// config-driven, so this goes through the `tabled` builder rather than a
/// derived `Tabled` struct.
pub fn preview_table(header: &[String], rows: &[Vec<String>], max_rows: usize) {
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(header.iter().cloned());
    for row in rows.iter().take(max_rows) {
        builder.push_record(row.iter().cloned());
    }
    let mut table = builder.build();
    table.with(Style::markdown());
    println!("{}\n", table);
}
