//! Error types for the ARFF conversion tools.
//!
//! - [`ParseError`] - Input text that cannot be read the way a conversion needs
//! - [`ConvertError`] - Top-level errors for a single conversion
//! - [`ConfigError`] - Driver configuration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::ItemId;

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors while reading input text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An item identifier is not an integer.
    #[error("Line {line}: item '{token}' is not an integer")]
    InvalidItem { line: usize, token: String },

    /// A value expected to be numeric is not.
    #[error("Line {line}: '{token}' is not a number")]
    InvalidNumber { line: usize, token: String },

    /// Delimited text could not be read.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Input bytes could not be decoded.
    #[error("Failed to decode input: {0}")]
    Encoding(String),
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Errors for one conversion.
///
/// A batch driver reports these per file and moves on; a standalone
/// conversion returns them to the caller.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input file does not exist.
    #[error("File '{}' not found", path.display())]
    ResourceNotFound { path: PathBuf },

    /// Nothing usable in the input.
    #[error("{0}")]
    EmptyInput(String),

    /// Input text error.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A numeric row has a different width than the first row.
    #[error("Line {line}: expected {expected} values, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// An item was not part of the universe used for emission.
    #[error("Item {0} is not in the item universe")]
    UnknownItem(ItemId),

    /// Normalization bounds are unusable.
    #[error("Invalid bounds [{lower}, {upper}]")]
    InvalidBounds { lower: f64, upper: f64 },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Map an IO error on `path`, turning `NotFound` into [`ConvertError::ResourceNotFound`].
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ConvertError::ResourceNotFound { path: path.into() }
        } else {
            ConvertError::Io(err)
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors in driver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// None of the search directories holds the first input file.
    #[error("Could not find data directory containing '{looked_for}' (searched: {})", format_dirs(searched))]
    NoDataDirectory {
        looked_for: String,
        searched: Vec<PathBuf>,
    },

    /// A configuration value cannot be used.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// Writing a converted document failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for conversions.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Result type for configuration and batch driving.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let parse_err = ParseError::InvalidItem {
            line: 3,
            token: "x7".into(),
        };
        let convert_err: ConvertError = parse_err.into();
        let msg = convert_err.to_string();
        assert!(msg.contains("Line 3"));
        assert!(msg.contains("x7"));
    }

    #[test]
    fn test_not_found_maps_to_resource_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ConvertError::from_io("data/1_vote.csv", io);
        assert!(matches!(err, ConvertError::ResourceNotFound { .. }));
        assert_eq!(err.to_string(), "File 'data/1_vote.csv' not found");
    }

    #[test]
    fn test_other_io_errors_stay_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConvertError::from_io("x.csv", io);
        assert!(matches!(err, ConvertError::Io(_)));
    }

    #[test]
    fn test_no_data_directory_lists_search_dirs() {
        let err = ConfigError::NoDataDirectory {
            looked_for: "1_vote.csv".into(),
            searched: vec![PathBuf::from("1_data"), PathBuf::from(".")],
        };
        let msg = err.to_string();
        assert!(msg.contains("1_vote.csv"));
        assert!(msg.contains("1_data, ."));
    }
}
