//! Input parsing with encoding and delimiter detection.
//!
//! Turns raw bytes into the plain text the converters work on, then into
//! a [`Table`], a list of transactions, or numeric rows. Nothing here
//! touches the filesystem.

use csv::{ReaderBuilder, StringRecord};

use crate::error::{ConvertError, ConvertResult, ParseError, ParseResult};
use crate::models::{Table, Transaction};

const UTF8_BOM: char = '\u{feff}';

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding.
///
/// Invalid UTF-8 falls back to lossy decoding. A leading BOM is dropped.
/// Labels unknown to `encoding_rs` are an error.
pub fn decode_content(bytes: &[u8], encoding: &str) -> ParseResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => {
                return Err(ParseError::Encoding(format!(
                    "unsupported encoding '{}'",
                    encoding
                )))
            }
        },
    };

    if let Some(rest) = text.strip_prefix(UTF8_BOM) {
        return Ok(rest.to_string());
    }
    Ok(text)
}

/// Detect encoding and decode in one step. Returns the text and the encoding used.
pub fn decode_auto(bytes: &[u8]) -> ParseResult<(String, String)> {
    let encoding = detect_encoding(bytes);
    let text = decode_content(bytes, &encoding)?;
    Ok((text, encoding))
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Ties and lines without any candidate resolve to a comma.
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [b',', b';', b'\t', b'|'];
    let mut best_sep = b',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep as char).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited text into a [`Table`]; the first record is the header.
///
/// Records may have any width. Cells are kept untrimmed. Every empty
/// physical line after the header becomes a row with no cells.
pub fn parse_table(content: &str, delimiter: u8) -> ConvertResult<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record).map_err(ParseError::from)? {
        return Err(ConvertError::EmptyInput("Empty CSV file".to_string()));
    }
    let attributes: Vec<String> = record.iter().map(str::to_string).collect();

    let bytes = content.as_bytes();
    let mut rows = Vec::new();
    loop {
        // The reader discards empty lines; put them back as empty rows.
        let end = reader.position().byte() as usize;
        let blanks = skipped_line_breaks(bytes, end);
        rows.extend(std::iter::repeat_with(Vec::new).take(blanks));

        if !reader.read_record(&mut record).map_err(ParseError::from)? {
            break;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(attributes, rows))
}

/// Count the line breaks between the end of one record and the next.
///
/// `from` is where the reader stopped, which can be between the `\r` and
/// `\n` of the terminator that closed the record.
fn skipped_line_breaks(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    if i > 0 && bytes.get(i - 1) == Some(&b'\r') && bytes.get(i) == Some(&b'\n') {
        i += 1;
    }

    let mut count = 0;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\r' => {
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => i += 1,
            _ => break,
        }
        count += 1;
    }
    count
}

/// Split itemset text into transactions, one per non-blank line.
pub fn parse_transactions(content: &str) -> Vec<Transaction> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}

/// Parse whitespace-separated numeric rows, skipping blank lines.
///
/// Returns each row with its 1-based line number.
pub fn parse_numeric_rows(content: &str) -> ParseResult<Vec<(usize, Vec<f64>)>> {
    let mut rows = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = idx + 1;
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                    line: line_num,
                    token: token.to_string(),
                })
            })
            .collect::<ParseResult<Vec<f64>>>()?;

        if !row.is_empty() {
            rows.push((line_num, row));
        }
    }

    Ok(rows)
}
