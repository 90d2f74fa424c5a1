//! Driver configuration.
//!
//! Where input files live is decided here, explicitly, instead of probing
//! hardcoded paths. Values come from (lowest to highest priority):
//!
//! 1. Defaults
//! 2. Environment variables, optionally loaded from a `.env` file
//! 3. Command-line flags, applied by the binary

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Search directories for batch input (OS path-list syntax).
pub const ENV_DATA_DIRS: &str = "ARFFCONV_DATA_DIRS";
/// Comma-separated file names to convert in a batch.
pub const ENV_FILES: &str = "ARFFCONV_FILES";
/// Directory that receives `<stem>.arff` documents.
pub const ENV_OUTPUT_DIR: &str = "ARFFCONV_OUTPUT_DIR";
/// Single-character field delimiter.
pub const ENV_DELIMITER: &str = "ARFFCONV_DELIMITER";

/// Options for reading one delimited table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Field delimiter byte.
    pub delimiter: u8,

    /// Pick the delimiter from the header line instead.
    pub detect_delimiter: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            detect_delimiter: false,
        }
    }
}

impl ConvertOptions {
    /// Parse a delimiter given as text. Accepts one ASCII character or `\t`/`tab`.
    pub fn parse_delimiter(value: &str) -> ConfigResult<u8> {
        match value {
            "\\t" | "tab" | "\t" => Ok(b'\t'),
            v if v.len() == 1 && v.is_ascii() => Ok(v.as_bytes()[0]),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_DELIMITER.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Configuration of a multi-file conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Candidate directories, tried in order.
    pub search_dirs: Vec<PathBuf>,

    /// File names to convert, relative to the chosen directory.
    pub files: Vec<String>,

    /// Write documents here instead of to the output sink.
    pub output_dir: Option<PathBuf>,

    /// Table reading options.
    pub options: ConvertOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            search_dirs: vec![PathBuf::from(".")],
            files: Vec::new(),
            output_dir: None,
            options: ConvertOptions::default(),
        }
    }
}

impl BatchConfig {
    /// Load from the environment, reading `.env` first if present.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup. Missing or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dirs) = get(ENV_DATA_DIRS) {
            config.search_dirs = std::env::split_paths(&dirs).collect();
        }
        if let Some(files) = get(ENV_FILES) {
            config.files = files
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(dir) = get(ENV_OUTPUT_DIR) {
            config.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(delimiter) = get(ENV_DELIMITER) {
            config.options.delimiter = ConvertOptions::parse_delimiter(&delimiter)?;
        }

        Ok(config)
    }

    /// First search directory that contains the first listed file.
    pub fn locate_data_dir(&self) -> ConfigResult<PathBuf> {
        let Some(first_file) = self.files.first() else {
            return Err(ConfigError::InvalidValue {
                key: ENV_FILES.to_string(),
                value: String::new(),
            });
        };

        self.search_dirs
            .iter()
            .find(|dir| dir.join(first_file).is_file())
            .cloned()
            .ok_or_else(|| ConfigError::NoDataDirectory {
                looked_for: first_file.clone(),
                searched: self.search_dirs.clone(),
            })
    }

    /// Output path for a converted file, if an output directory is set.
    pub fn output_path_for(&self, input: &Path) -> Option<PathBuf> {
        let stem = input.file_stem()?;
        self.output_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.arff", stem.to_string_lossy())))
    }
}
