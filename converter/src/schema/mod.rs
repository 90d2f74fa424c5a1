//! Column type inference for delimited tables.
//!
//! Every column is classified from its data alone:
//!
//! ```text
//! all non-missing cells numeric  →  Continuous
//! any non-missing cell non-numeric  →  Categorical { sorted distinct values }
//! no non-missing cells  →  Continuous
//! ```
//!
//! Categorical domains sort as text, so `{"10","2","9"}` stays in that order.

use std::collections::BTreeSet;

use crate::models::{ColumnSchema, Table, MISSING};

/// A trimmed cell is missing when it is empty or the `?` marker.
pub fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == MISSING
}

/// Whether a cell parses as a finite decimal number.
pub fn is_numeric(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(f64::is_finite)
        .unwrap_or(false)
}

/// Infer the schema of every column, in column order.
pub fn infer(table: &Table) -> Vec<ColumnSchema> {
    (0..table.column_count())
        .map(|column| infer_column(table, column))
        .collect()
}

/// Infer the schema of a single column.
pub fn infer_column(table: &Table, column: usize) -> ColumnSchema {
    let mut values: BTreeSet<&str> = BTreeSet::new();
    let mut all_numeric = true;

    for row in &table.rows {
        let Some(cell) = row.get(column) else {
            continue;
        };
        let value = cell.trim();
        if is_missing(value) {
            continue;
        }
        if all_numeric && !is_numeric(value) {
            all_numeric = false;
        }
        values.insert(value);
    }

    if all_numeric {
        ColumnSchema::continuous()
    } else {
        ColumnSchema::categorical(values)
    }
}
