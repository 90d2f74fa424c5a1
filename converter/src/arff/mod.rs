//! ARFF document rendering.
//!
//! Two layouts are produced:
//!
//! ```text
//! Dense (tables)                 Sparse (itemsets)
//! ┌─────────────────────────┐   ┌──────────────────────────┐
//! │ @relation weather       │   │ @RELATION kosarak        │
//! │                         │   │ @ATTRIBUTE i1 {0, 1}     │
//! │ @attribute temp numeric │   │ @ATTRIBUTE i3 {0, 1}     │
//! │ @attribute out {a,b}    │   │ @DATA                    │
//! │                         │   │ {0 1, 1 1}               │
//! │ @data                   │   └──────────────────────────┘
//! │ 85,a                    │
//! └─────────────────────────┘
//! ```
//!
//! Values are written verbatim; embedded delimiters are not escaped.

use std::fmt::Write;

use crate::models::{ColumnKind, ColumnSchema, ItemUniverse, SparseRow, Table, MISSING};

/// Render a table as a dense ARFF document.
///
/// `schema` must come from [`crate::schema::infer`] on the same table.
pub fn emit(relation: &str, table: &Table, schema: &[ColumnSchema]) -> String {
    let mut out = String::new();

    // writeln! on a String cannot fail
    let _ = writeln!(out, "@relation {}", relation);
    out.push('\n');

    for (name, column) in table.attributes.iter().zip(schema) {
        let _ = writeln!(out, "@attribute {} {}", name, attribute_type(column));
    }

    out.push('\n');
    out.push_str("@data\n");

    for row in &table.rows {
        out.push_str(&record(row, table.column_count()));
        out.push('\n');
    }

    out
}

/// Type clause of an attribute declaration.
fn attribute_type(column: &ColumnSchema) -> String {
    match column.kind {
        ColumnKind::Continuous => "numeric".to_string(),
        ColumnKind::Categorical => format!("{{{}}}", column.domain.join(",")),
    }
}

/// One data line: trimmed cells, `?` for empty or absent ones.
pub fn record(row: &[String], width: usize) -> String {
    (0..width)
        .map(|i| match row.get(i).map(|cell| cell.trim()) {
            Some(value) if !value.is_empty() => value,
            _ => MISSING,
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Render an indexed itemset as a sparse ARFF document.
pub fn emit_sparse(relation: &str, universe: &ItemUniverse, rows: &[SparseRow]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "@RELATION {}", relation);
    for name in universe.names() {
        let _ = writeln!(out, "@ATTRIBUTE i{} {{0, 1}}", name);
    }
    out.push_str("@DATA\n");

    for row in rows {
        out.push_str(&row.render());
        out.push('\n');
    }

    out
}
