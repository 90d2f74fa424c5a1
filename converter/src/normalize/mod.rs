//! Min-max feature scaling.
//!
//! Each column is rescaled linearly into `[lower, upper]` using its own
//! minimum and maximum. A constant column maps to the midpoint of the bounds.
//! Bounds given high-to-low scale in reverse: the column minimum lands on
//! `lower` whichever bound is larger.

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, ConvertResult};

/// Target bounds and output precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeSpec {
    pub lower: f64,
    pub upper: f64,
    /// Decimal places written for every value.
    pub precision: usize,
}

impl NormalizeSpec {
    pub fn new(lower: f64, upper: f64, precision: usize) -> Self {
        Self {
            lower,
            upper,
            precision,
        }
    }

    fn validate(&self) -> ConvertResult<()> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(ConvertError::InvalidBounds {
                lower: self.lower,
                upper: self.upper,
            });
        }
        Ok(())
    }
}

/// Per-column minimum and maximum.
#[derive(Debug, Clone, PartialEq)]
struct ColumnRange {
    min: f64,
    max: f64,
}

/// Rescale numeric rows and format them.
///
/// `rows` pairs each row with its source line number for error reporting.
/// All rows must have the width of the first one.
pub fn normalize(rows: &[(usize, Vec<f64>)], spec: NormalizeSpec) -> ConvertResult<Vec<String>> {
    spec.validate()?;

    let Some((_, first)) = rows.first() else {
        return Err(ConvertError::EmptyInput("No data found in file".to_string()));
    };
    let width = first.len();

    let mut ranges: Vec<ColumnRange> = first
        .iter()
        .map(|&v| ColumnRange { min: v, max: v })
        .collect();

    for (line, row) in rows {
        if row.len() != width {
            return Err(ConvertError::RaggedRow {
                line: *line,
                expected: width,
                found: row.len(),
            });
        }
        for (range, &value) in ranges.iter_mut().zip(row) {
            range.min = range.min.min(value);
            range.max = range.max.max(value);
        }
    }

    Ok(rows
        .iter()
        .map(|(_, row)| {
            row.iter()
                .zip(&ranges)
                .map(|(&value, range)| format_value(scale(value, range, &spec), spec.precision))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect())
}

fn scale(value: f64, range: &ColumnRange, spec: &NormalizeSpec) -> f64 {
    if range.max == range.min {
        (spec.lower + spec.upper) / 2.0
    } else {
        spec.lower + (value - range.min) / (range.max - range.min) * (spec.upper - spec.lower)
    }
}

/// Fixed-point formatting; precision 0 prints a plain integer.
fn format_value(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value);
    if precision == 0 && formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0') {
        return formatted[1..].to_string();
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[f64]]) -> Vec<(usize, Vec<f64>)> {
        data.iter()
            .enumerate()
            .map(|(i, r)| (i + 1, r.to_vec()))
            .collect()
    }

    #[test]
    fn test_unit_interval() {
        let out = normalize(&rows(&[&[0.0, 10.0], &[5.0, 20.0], &[10.0, 30.0]]), NormalizeSpec::new(0.0, 1.0, 2))
            .unwrap();
        assert_eq!(out, vec!["0.00 0.00", "0.50 0.50", "1.00 1.00"]);
    }

    #[test]
    fn test_symmetric_bounds() {
        let out = normalize(&rows(&[&[2.0], &[4.0], &[3.0]]), NormalizeSpec::new(-1.0, 1.0, 4)).unwrap();
        assert_eq!(out, vec!["-1.0000", "1.0000", "0.0000"]);
    }

    #[test]
    fn test_constant_column_maps_to_midpoint() {
        let out = normalize(&rows(&[&[7.0, 1.0], &[7.0, 3.0]]), NormalizeSpec::new(0.0, 1.0, 2)).unwrap();
        assert_eq!(out, vec!["0.50 0.00", "0.50 1.00"]);
    }

    #[test]
    fn test_precision_zero_prints_integers() {
        let out = normalize(&rows(&[&[0.0], &[1.0], &[0.5]]), NormalizeSpec::new(-1.0, 1.0, 0)).unwrap();
        assert_eq!(out, vec!["-1", "1", "0"]);
    }

    #[test]
    fn test_empty_input() {
        let err = normalize(&[], NormalizeSpec::new(0.0, 1.0, 2)).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyInput(_)));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = normalize(&rows(&[&[1.0, 2.0], &[3.0]]), NormalizeSpec::new(0.0, 1.0, 2)).unwrap_err();
        match err {
            ConvertError::RaggedRow { line, expected, found } => {
                assert_eq!((line, expected, found), (2, 2, 1));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_reversed_bounds_scale_in_reverse() {
        let out = normalize(&rows(&[&[0.0], &[1.0], &[0.25]]), NormalizeSpec::new(1.0, 0.0, 2)).unwrap();
        assert_eq!(out, vec!["1.00", "0.00", "0.75"]);
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let err = normalize(&rows(&[&[1.0]]), NormalizeSpec::new(f64::NAN, 1.0, 2)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidBounds { .. }));

        let err = normalize(&rows(&[&[1.0]]), NormalizeSpec::new(0.0, f64::INFINITY, 2)).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidBounds { .. }));
    }
}
