//! # Arffconv - CSV and itemset conversion to ARFF
//!
//! Arffconv turns the flat data files used in data-mining coursework into
//! ARFF documents that Weka can load.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Schema    │────▶│ ARFF (dense)│
//! │  (ISO/UTF8) │     │  (csv, enc) │     │ (inference) │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Itemset File│────▶│   Parser    │────▶│  Itemsets   │────▶│ARFF (sparse)│
//! │ (one tx/ln) │     │ (whitespace)│     │  (indexer)  │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use arffconv::{emit, infer, Table};
//!
//! let table = Table::from_rows(&["a", "b"], &[vec!["1", "x"], vec!["?", "y"]]);
//! let schema = infer(&table);
//! let doc = emit("demo", &table, &schema);
//! assert!(doc.contains("@attribute b {x,y}"));
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Tables, column schemas, transactions
//! - [`parser`] - Decoding and parsing of input text
//! - [`schema`] - Column type inference
//! - [`arff`] - Dense and sparse ARFF rendering
//! - [`itemsets`] - Item indexing and sparse encoding
//! - [`normalize`] - Min-max feature scaling
//! - [`config`] - Driver configuration
//! - [`logs`] - Progress logging
//! - [`pipeline`] - File-level conversions and batch driver

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Conversion
pub mod arff;
pub mod itemsets;
pub mod normalize;
pub mod schema;

// Driving
pub mod config;
pub mod logs;
pub mod pipeline;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError, ConfigResult, ConvertError, ConvertResult, ParseError, ParseResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ColumnKind, ColumnSchema, ItemId, ItemUniverse, SparseRow, Table, Transaction, MISSING,
};

// =============================================================================
// Re-exports - Core conversion
// =============================================================================

pub use arff::{emit, emit_sparse};
pub use schema::{infer, is_missing, is_numeric};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_auto, decode_content, detect_delimiter, detect_encoding, parse_numeric_rows,
    parse_table, parse_transactions,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{BatchConfig, ConvertOptions};
pub use normalize::NormalizeSpec;

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use pipeline::{
    convert_csv_file, convert_itemsets_file, convert_itemsets_text, convert_table_bytes,
    convert_table_text, normalize_file, normalize_text, run_batch, BatchFailure, BatchReport,
    ConversionStats, ItemsetConversion, TableConversion,
};
