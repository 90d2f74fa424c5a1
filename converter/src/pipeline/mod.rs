//! High-level conversion API.
//!
//! Combines parsing, inference and emission into single calls, one per
//! input shape, plus a batch driver for converting several tables in one
//! run.
//!
//! # Example
//!
//! ```rust,ignore
//! use arffconv::pipeline::convert_csv_file;
//! use arffconv::ConvertOptions;
//!
//! let result = convert_csv_file("1_data/1_weather-nominal.csv".as_ref(), &ConvertOptions::default())?;
//! print!("{}", result.document);
//! ```

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::arff;
use crate::config::{BatchConfig, ConvertOptions};
use crate::error::{ConfigResult, ConvertError, ConvertResult};
use crate::itemsets;
use crate::logs::{log_error, log_info, log_success, log_warning};
use crate::models::ColumnSchema;
use crate::normalize::{normalize, NormalizeSpec};
use crate::parser::{decode_auto, detect_delimiter, parse_numeric_rows, parse_table, parse_transactions};
use crate::schema;

/// Relation name used when a path has no usable file name.
const FALLBACK_RELATION: &str = "relation";

// =============================================================================
// Results
// =============================================================================

/// Result of converting one delimited table.
#[derive(Debug, Clone, Serialize)]
pub struct TableConversion {
    /// Relation name written to the header.
    pub relation: String,
    /// Complete ARFF document.
    pub document: String,
    /// Inferred schema, one entry per attribute.
    pub schema: Vec<ColumnSchema>,
    /// Attribute names.
    pub attributes: Vec<String>,
    /// Number of data rows.
    pub row_count: usize,
    /// Delimiter used to split fields.
    pub delimiter: char,
    /// Encoding the input was decoded with.
    pub encoding: String,
}

/// Counters reported after an itemset conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversionStats {
    pub transactions: usize,
    pub unique_items: usize,
    pub elapsed: Duration,
}

/// Result of converting an itemset file.
#[derive(Debug, Clone, Serialize)]
pub struct ItemsetConversion {
    pub relation: String,
    /// Complete sparse ARFF document.
    pub document: String,
    pub stats: ConversionStats,
}

// =============================================================================
// Relation names
// =============================================================================

/// File name without its last extension (`1_vote.csv` → `1_vote`).
pub fn relation_name_from_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_RELATION.to_string())
}

/// File name up to its first dot (`kosarak.2024.dat` → `kosarak`).
pub fn relation_name_from_prefix(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_RELATION.to_string())
}

fn read_input(path: &Path) -> ConvertResult<Vec<u8>> {
    fs::read(path).map_err(|e| ConvertError::from_io(path, e))
}

// =============================================================================
// Tables
// =============================================================================

/// Convert delimited text to an ARFF document.
pub fn convert_table_text(
    relation: &str,
    text: &str,
    options: &ConvertOptions,
) -> ConvertResult<TableConversion> {
    let delimiter = if options.detect_delimiter {
        detect_delimiter(text)
    } else {
        options.delimiter
    };

    let table = parse_table(text, delimiter)?;
    let schema = schema::infer(&table);
    let document = arff::emit(relation, &table, &schema);

    Ok(TableConversion {
        relation: relation.to_string(),
        document,
        row_count: table.row_count(),
        attributes: table.attributes,
        schema,
        delimiter: delimiter as char,
        encoding: "utf-8".to_string(),
    })
}

/// Convert raw table bytes, detecting their encoding first.
pub fn convert_table_bytes(
    relation: &str,
    bytes: &[u8],
    options: &ConvertOptions,
) -> ConvertResult<TableConversion> {
    let (text, encoding) = decode_auto(bytes)?;
    let mut result = convert_table_text(relation, &text, options)?;
    result.encoding = encoding;
    Ok(result)
}

/// Convert a CSV file. The relation is named after the file stem.
pub fn convert_csv_file(path: &Path, options: &ConvertOptions) -> ConvertResult<TableConversion> {
    let bytes = read_input(path)?;
    convert_table_bytes(&relation_name_from_stem(path), &bytes, options)
}

// =============================================================================
// Itemsets
// =============================================================================

/// Convert itemset text to a sparse ARFF document.
pub fn convert_itemsets_text(relation: &str, text: &str) -> ConvertResult<ItemsetConversion> {
    let start = Instant::now();

    let transactions = parse_transactions(text);
    if transactions.is_empty() {
        return Err(ConvertError::EmptyInput("No transactions found".to_string()));
    }

    let universe = itemsets::index(&transactions)?;
    let rows = itemsets::encode(&transactions, &universe)?;
    let document = arff::emit_sparse(relation, &universe, &rows);

    Ok(ItemsetConversion {
        relation: relation.to_string(),
        document,
        stats: ConversionStats {
            transactions: transactions.len(),
            unique_items: universe.len(),
            elapsed: start.elapsed(),
        },
    })
}

/// Convert an itemset file. The relation is named after the file name prefix.
pub fn convert_itemsets_file(path: &Path) -> ConvertResult<ItemsetConversion> {
    let bytes = read_input(path)?;
    let (text, _) = decode_auto(&bytes)?;
    convert_itemsets_text(&relation_name_from_prefix(path), &text)
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize whitespace-separated numeric text, one output line per row.
pub fn normalize_text(text: &str, spec: NormalizeSpec) -> ConvertResult<Vec<String>> {
    let rows = parse_numeric_rows(text)?;
    normalize(&rows, spec)
}

/// Normalize a numeric data file.
pub fn normalize_file(path: &Path, spec: NormalizeSpec) -> ConvertResult<Vec<String>> {
    let bytes = read_input(path)?;
    let (text, _) = decode_auto(&bytes)?;
    normalize_text(&text, spec)
}

// =============================================================================
// Batch
// =============================================================================

/// One file that could not be converted.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub file: String,
    pub error: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Directory the files were read from.
    pub data_dir: PathBuf,
    /// Files converted successfully.
    pub converted: Vec<String>,
    /// Files that failed, with the reason.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Convert every file listed in `config`.
///
/// Documents go to `config.output_dir` when set, otherwise to `sink`.
/// A file that is missing, cannot be converted or cannot be written is
/// reported and skipped. Only a missing data directory or an output
/// directory that cannot be created stops the batch.
pub fn run_batch<W: Write>(config: &BatchConfig, sink: &mut W) -> ConfigResult<BatchReport> {
    let data_dir = config.locate_data_dir()?;
    log_success(format!("Found data directory: {}", data_dir.display()));

    if let Some(ref dir) = config.output_dir {
        fs::create_dir_all(dir)?;
    }

    let mut report = BatchReport {
        data_dir: data_dir.clone(),
        ..BatchReport::default()
    };

    for file in &config.files {
        let path = data_dir.join(file);
        log_info(format!("📄 Converting: {}", path.display()));

        let result = match convert_csv_file(&path, &config.options) {
            Ok(result) => result,
            Err(e) => {
                log_error(format!("Error processing {}: {}", file, e));
                report.failures.push(BatchFailure {
                    file: file.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        log_success(format!(
            "{} attributes, {} rows",
            result.attributes.len(),
            result.row_count
        ));

        let written = match config.output_path_for(&path) {
            Some(out) => fs::write(&out, &result.document).map(|_| Some(out)),
            None => sink.write_all(result.document.as_bytes()).map(|_| None),
        };

        match written {
            Ok(Some(out)) => log_success(format!("💾 Output written to: {}", out.display())),
            Ok(None) => {}
            Err(e) => {
                log_error(format!("Error writing {}: {}", file, e));
                report.failures.push(BatchFailure {
                    file: file.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        }

        report.converted.push(file.clone());
    }

    if report.failures.is_empty() {
        log_success(format!("Conversion complete: {} file(s)", report.converted.len()));
    } else {
        log_warning(format!(
            "Conversion complete: {} converted, {} failed",
            report.converted.len(),
            report.failures.len()
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::models::ColumnKind;
    use tempfile::tempdir;

    const WEATHER: &str = "outlook,temperature,humidity,windy,play\n\
                           sunny,85,85,FALSE,no\n\
                           overcast,83,,FALSE,yes\n\
                           rainy,70,96\n";

    #[test]
    fn test_relation_names() {
        assert_eq!(relation_name_from_stem(Path::new("1_data/1_vote.csv")), "1_vote");
        assert_eq!(relation_name_from_stem(Path::new("a.b.csv")), "a.b");
        assert_eq!(relation_name_from_prefix(Path::new("data/kosarak.dat")), "kosarak");
        assert_eq!(relation_name_from_prefix(Path::new("a.b.dat")), "a");
        assert_eq!(relation_name_from_stem(Path::new("")), FALLBACK_RELATION);
    }

    #[test]
    fn test_convert_table_text() {
        let result = convert_table_text("weather", WEATHER, &ConvertOptions::default()).unwrap();

        assert_eq!(result.row_count, 3);
        assert_eq!(result.schema[0].kind, ColumnKind::Categorical);
        assert!(result.schema[1].is_continuous());
        assert!(result.document.contains("@attribute outlook {overcast,rainy,sunny}\n"));
        assert!(result.document.contains("@attribute humidity numeric\n"));
        assert!(result.document.ends_with("overcast,83,?,FALSE,yes\nrainy,70,96,?,?\n"));
    }

    #[test]
    fn test_blank_csv_line_keeps_its_record() {
        let result = convert_table_text("t", "a,b\n1,x\n\n2,y\n", &ConvertOptions::default()).unwrap();

        assert_eq!(result.row_count, 3);
        assert!(result.document.ends_with("@data\n1,x\n?,?\n2,y\n"));
    }

    #[test]
    fn test_detected_delimiter() {
        let options = ConvertOptions {
            detect_delimiter: true,
            ..ConvertOptions::default()
        };
        let result = convert_table_text("t", "a;b\n1;x\n", &options).unwrap();
        assert_eq!(result.delimiter, ';');
        assert!(result.document.ends_with("@data\n1,x\n"));
    }

    #[test]
    fn test_convert_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("1_weather-nominal.csv");
        fs::write(&path, WEATHER).unwrap();

        let result = convert_csv_file(&path, &ConvertOptions::default()).unwrap();
        assert!(result.document.starts_with("@relation 1_weather-nominal\n"));
    }

    #[test]
    fn test_missing_file_is_resource_not_found() {
        let dir = tempdir().unwrap();
        let err = convert_csv_file(&dir.path().join("nope.csv"), &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_empty_csv_is_empty_input() {
        let err = convert_table_text("t", "", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyInput(_)));
    }

    #[test]
    fn test_convert_itemsets_text() {
        let result = convert_itemsets_text("toy", "3 1\n\n1 2 2\n").unwrap();

        assert_eq!(result.stats.transactions, 2);
        assert_eq!(result.stats.unique_items, 3);
        assert_eq!(
            result.document,
            "@RELATION toy\n\
             @ATTRIBUTE i1 {0, 1}\n\
             @ATTRIBUTE i2 {0, 1}\n\
             @ATTRIBUTE i3 {0, 1}\n\
             @DATA\n\
             {0 1, 2 1}\n\
             {0 1, 1 1}\n"
        );
    }

    #[test]
    fn test_whitespace_only_lines_produce_no_records() {
        let result = convert_itemsets_text("t", "5\n \t \n5 6\n").unwrap();
        let records: Vec<&str> = result.document.lines().filter(|l| l.starts_with('{')).collect();
        assert_eq!(records, vec!["{0 1}", "{0 1, 1 1}"]);
    }

    #[test]
    fn test_itemsets_bad_token_aborts() {
        let err = convert_itemsets_text("t", "1 2\n3 four\n").unwrap_err();
        assert!(matches!(err, ConvertError::Parse(_)));
    }

    #[test]
    fn test_itemsets_empty_input() {
        let err = convert_itemsets_text("t", "\n\n").unwrap_err();
        assert!(matches!(err, ConvertError::EmptyInput(_)));
    }

    #[test]
    fn test_convert_itemsets_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kosarak.dat");
        fs::write(&path, "10 2\n2\n").unwrap();

        let result = convert_itemsets_file(&path).unwrap();
        assert!(result.document.starts_with("@RELATION kosarak\n@ATTRIBUTE i2 {0, 1}\n@ATTRIBUTE i10 {0, 1}\n"));
    }

    #[test]
    fn test_normalize_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2_in.txt");
        fs::write(&path, "1 10\n3 10\n\n2 10\n").unwrap();

        let lines = normalize_file(&path, NormalizeSpec::new(0.0, 1.0, 2)).unwrap();
        assert_eq!(lines, vec!["0.00 0.50", "1.00 0.50", "0.50 0.50"]);
    }

    #[test]
    fn test_batch_continues_after_failures() {
        let data = tempdir().unwrap();
        fs::write(data.path().join("1_vote.csv"), "v\ny\nn\n").unwrap();
        fs::write(data.path().join("broken.csv"), "").unwrap();
        fs::write(data.path().join("1_weather-numeric.csv"), "t\n1\n").unwrap();

        let config = BatchConfig {
            search_dirs: vec![data.path().to_path_buf()],
            files: vec![
                "1_vote.csv".into(),
                "absent.csv".into(),
                "broken.csv".into(),
                "1_weather-numeric.csv".into(),
            ],
            ..BatchConfig::default()
        };

        let mut sink = Vec::new();
        let report = run_batch(&config, &mut sink).unwrap();
        let output = String::from_utf8(sink).unwrap();

        assert_eq!(report.converted, vec!["1_vote.csv", "1_weather-numeric.csv"]);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].file, "absent.csv");
        assert!(report.failures[0].error.contains("not found"));
        assert!(!report.is_success());
        assert!(output.contains("@relation 1_vote\n"));
        assert!(output.contains("@attribute v {n,y}\n"));
        assert!(output.contains("@relation 1_weather-numeric\n"));
    }

    #[test]
    fn test_batch_writes_output_dir() {
        let data = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::write(data.path().join("1_vote.csv"), "v\ny\n").unwrap();

        let config = BatchConfig {
            search_dirs: vec![data.path().to_path_buf()],
            files: vec!["1_vote.csv".into()],
            output_dir: Some(out.path().join("arff")),
            ..BatchConfig::default()
        };

        let mut sink: Vec<u8> = Vec::new();
        let report = run_batch(&config, &mut sink).unwrap();

        assert!(report.is_success());
        assert!(sink.is_empty());
        let written = fs::read_to_string(out.path().join("arff").join("1_vote.arff")).unwrap();
        assert!(written.starts_with("@relation 1_vote\n"));
    }

    #[test]
    fn test_batch_continues_after_write_failure() {
        let data = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::write(data.path().join("a.csv"), "x\n1\n").unwrap();
        fs::write(data.path().join("b.csv"), "y\nz\n").unwrap();
        fs::create_dir(out.path().join("a.arff")).unwrap();

        let config = BatchConfig {
            search_dirs: vec![data.path().to_path_buf()],
            files: vec!["a.csv".into(), "b.csv".into()],
            output_dir: Some(out.path().to_path_buf()),
            ..BatchConfig::default()
        };

        let mut sink: Vec<u8> = Vec::new();
        let report = run_batch(&config, &mut sink).unwrap();

        assert_eq!(report.converted, vec!["b.csv"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file, "a.csv");
        let written = fs::read_to_string(out.path().join("b.arff")).unwrap();
        assert!(written.starts_with("@relation b\n"));
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_batch_reports_sink_failures() {
        let data = tempdir().unwrap();
        fs::write(data.path().join("a.csv"), "x\n1\n").unwrap();
        fs::write(data.path().join("b.csv"), "y\nz\n").unwrap();

        let config = BatchConfig {
            search_dirs: vec![data.path().to_path_buf()],
            files: vec!["a.csv".into(), "b.csv".into()],
            ..BatchConfig::default()
        };

        let report = run_batch(&config, &mut ClosedSink).unwrap();

        assert!(report.converted.is_empty());
        let failed: Vec<&str> = report.failures.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(failed, vec!["a.csv", "b.csv"]);
        assert!(report.failures[0].error.contains("sink closed"));
    }

    #[test]
    fn test_batch_without_data_dir_is_fatal() {
        let empty = tempdir().unwrap();
        let config = BatchConfig {
            search_dirs: vec![empty.path().to_path_buf()],
            files: vec!["1_vote.csv".into()],
            ..BatchConfig::default()
        };
        let err = run_batch(&config, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::NoDataDirectory { .. }));
    }
}
