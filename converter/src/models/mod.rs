//! Data models shared by the converters.
//!
//! - [`Table`] - Attribute names plus raw text rows
//! - [`ColumnKind`] / [`ColumnSchema`] - Inferred type of one column
//! - [`Transaction`] - One line of an itemset file
//! - [`ItemUniverse`] - Sorted, indexed set of all items
//! - [`SparseRow`] - Sorted item indices present in one transaction

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Missing value marker, recognized on input and written on output.
pub const MISSING: &str = "?";

// =============================================================================
// Tables
// =============================================================================

/// A delimited table with a header row.
///
/// Cells are kept as raw text. Rows may be shorter than `attributes`;
/// absent cells count as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names from the header row.
    pub attributes: Vec<String>,
    /// Data rows.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Table with the given header and data rows.
    pub fn new(attributes: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { attributes, rows }
    }

    /// Build a table from string slices, first row as header.
    pub fn from_rows<S: AsRef<str>>(header: &[S], rows: &[Vec<S>]) -> Self {
        Self {
            attributes: header.iter().map(|s| s.as_ref().to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.as_ref().to_string()).collect())
                .collect(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Raw cell at (`row`, `column`), `None` when the row is too short.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }
}

// =============================================================================
// Column Schema
// =============================================================================

/// Kind of an inferred column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Real-valued column.
    Continuous,
    /// Closed enumerated domain.
    Categorical,
}

/// Inferred schema of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub kind: ColumnKind,
    /// Distinct non-missing values in code-point order. Empty for continuous columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain: Vec<String>,
}

impl ColumnSchema {
    pub fn continuous() -> Self {
        Self {
            kind: ColumnKind::Continuous,
            domain: Vec::new(),
        }
    }

    /// Categorical column; the domain is sorted and deduplicated here.
    pub fn categorical<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut domain: Vec<String> = values.into_iter().map(Into::into).collect();
        domain.sort();
        domain.dedup();
        Self {
            kind: ColumnKind::Categorical,
            domain,
        }
    }

    pub fn is_continuous(&self) -> bool {
        self.kind == ColumnKind::Continuous
    }

    /// Domain for categorical columns, `None` for continuous ones.
    pub fn domain(&self) -> Option<&[String]> {
        match self.kind {
            ColumnKind::Categorical => Some(&self.domain),
            ColumnKind::Continuous => None,
        }
    }
}

// =============================================================================
// Transactions
// =============================================================================

/// Raw item tokens of one transaction, in input order.
pub type Transaction = Vec<String>;

/// Integer identity of an item token.
pub type ItemId = i128;

/// All distinct items, each mapped to its zero-based rank in ascending order.
///
/// Every item also keeps the token text it was first seen as, which is
/// what attribute names are built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemUniverse {
    items: Vec<ItemId>,
    names: Vec<String>,
    positions: BTreeMap<ItemId, usize>,
}

impl ItemUniverse {
    /// Build from any collection of items; duplicates collapse.
    ///
    /// Names are the decimal form of each item.
    pub fn from_items<I: IntoIterator<Item = ItemId>>(items: I) -> Self {
        Self::from_named(items.into_iter().map(|item| (item, item.to_string())))
    }

    /// Build from `(item, token)` pairs in input order.
    ///
    /// When several tokens denote the same item, the first one names it.
    pub fn from_named<I: IntoIterator<Item = (ItemId, String)>>(pairs: I) -> Self {
        let mut first_seen: BTreeMap<ItemId, String> = BTreeMap::new();
        for (item, name) in pairs {
            first_seen.entry(item).or_insert(name);
        }

        let mut universe = Self::default();
        for (rank, (item, name)) in first_seen.into_iter().enumerate() {
            universe.items.push(item);
            universe.names.push(name);
            universe.positions.insert(item, rank);
        }
        universe
    }

    /// Index of `item`, if it belongs to the universe.
    pub fn index_of(&self, item: ItemId) -> Option<usize> {
        self.positions.get(&item).copied()
    }

    /// Items in index order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Item names in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ascending, distinct item indices present in one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SparseRow {
    pub indices: Vec<usize>,
}

impl SparseRow {
    /// Presence value written next to every index.
    pub const PRESENT: u8 = 1;

    /// Render as `{i 1, j 1}`; an empty row renders as `{}`.
    pub fn render(&self) -> String {
        let pairs: Vec<String> = self
            .indices
            .iter()
            .map(|idx| format!("{} {}", idx, Self::PRESENT))
            .collect();
        format!("{{{}}}", pairs.join(", "))
    }
}
