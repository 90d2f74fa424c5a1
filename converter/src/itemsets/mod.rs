//! Itemset indexing and sparse encoding.
//!
//! ```text
//! transactions          universe             sparse rows
//! ┌───────────┐        ┌──────────┐         ┌────────────┐
//! │ 3 1       │   →    │ 1 → 0    │    →    │ {0 1, 2 1} │
//! │ 1 2 2     │        │ 2 → 1    │         │ {0 1, 1 1} │
//! └───────────┘        │ 3 → 2    │         └────────────┘
//!                      └──────────┘
//! ```
//!
//! Items are identified by integer value, so `01` and `1` are one item;
//! the attribute name uses the text the item was first seen as. Within a
//! transaction repeated items count once; the presence value is always `1`.

use std::collections::BTreeSet;

use crate::error::{ConvertError, ConvertResult, ParseError, ParseResult};
use crate::models::{ItemId, ItemUniverse, SparseRow, Transaction};

/// Parse one item token as an integer.
///
/// `line` is the 1-based transaction number used in the error.
pub fn parse_item(token: &str, line: usize) -> ParseResult<ItemId> {
    token.trim().parse::<ItemId>().map_err(|_| ParseError::InvalidItem {
        line,
        token: token.to_string(),
    })
}

/// Build the item universe of a transaction set.
///
/// Any token that is not an integer fails the whole index.
pub fn index(transactions: &[Transaction]) -> ParseResult<ItemUniverse> {
    let mut items = Vec::new();
    for (i, transaction) in transactions.iter().enumerate() {
        for token in transaction {
            items.push((parse_item(token, i + 1)?, token.trim().to_string()));
        }
    }
    Ok(ItemUniverse::from_named(items))
}

/// Encode one transaction against `universe`.
///
/// Parse errors report the transaction as line 1.
pub fn sparse_row(transaction: &Transaction, universe: &ItemUniverse) -> ConvertResult<SparseRow> {
    sparse_row_at(transaction, universe, 1)
}

fn sparse_row_at(
    transaction: &Transaction,
    universe: &ItemUniverse,
    line: usize,
) -> ConvertResult<SparseRow> {
    let mut indices = BTreeSet::new();
    for token in transaction {
        let item = parse_item(token, line)?;
        let idx = universe
            .index_of(item)
            .ok_or(ConvertError::UnknownItem(item))?;
        indices.insert(idx);
    }
    Ok(SparseRow {
        indices: indices.into_iter().collect(),
    })
}

/// Encode every transaction, in input order.
pub fn encode(transactions: &[Transaction], universe: &ItemUniverse) -> ConvertResult<Vec<SparseRow>> {
    transactions
        .iter()
        .enumerate()
        .map(|(i, t)| sparse_row_at(t, universe, i + 1))
        .collect()
}

/// Render every transaction as a sparse record line, in input order.
pub fn emit(transactions: &[Transaction], universe: &ItemUniverse) -> ConvertResult<Vec<String>> {
    Ok(encode(transactions, universe)?
        .iter()
        .map(SparseRow::render)
        .collect())
}
