//! Arffconv CLI - Convert data-mining coursework files to ARFF
//!
//! # Commands
//!
//! ```bash
//! arffconv csv2arff 1_vote.csv                  # CSV table → ARFF on stdout
//! arffconv batch --data-dir 1_data --file 1_vote.csv --file 1_weather-nominal.csv
//! arffconv itemsets kosarak.dat kosarak.arff    # Itemsets → sparse ARFF
//! arffconv normalize 2_in.txt -1 1 4            # Min-max scaling
//! ```
//!
//! Batch settings can also come from `ARFFCONV_*` environment variables
//! or a `.env` file; flags win.

use clap::{Args, Parser, Subcommand};
use arffconv::logs::{log_error, log_info, log_info_indent, log_success, log_warning, LOGGER};
use arffconv::{
    convert_csv_file, convert_itemsets_file, normalize_file, run_batch, BatchConfig,
    ConvertOptions, NormalizeSpec,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "arffconv")]
#[command(about = "Convert CSV tables and itemset files to ARFF", long_about = None)]
struct Cli {
    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write log entries as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TableArgs {
    /// Field delimiter (default ',', use "tab" for tabs)
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Detect the delimiter from the header line
    #[arg(long, conflicts_with = "delimiter")]
    detect_delimiter: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert CSV files to ARFF
    Csv2arff {
        /// Input CSV files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        table: TableArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a list of CSV files found in one of several data directories
    Batch {
        /// Directory to search for the input files (repeatable, tried in order)
        #[arg(long = "data-dir")]
        data_dirs: Vec<PathBuf>,

        /// File name to convert (repeatable)
        #[arg(long = "file")]
        files: Vec<String>,

        /// Write <stem>.arff files here instead of stdout
        #[arg(long)]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Convert an itemset file to sparse ARFF
    Itemsets {
        /// Input file, one transaction per line
        input: PathBuf,

        /// Output file (default: stdout)
        output: Option<PathBuf>,
    },

    /// Rescale numeric columns into [lower, upper]
    Normalize {
        /// Input file of whitespace-separated numbers
        input: PathBuf,

        /// Lower bound
        #[arg(allow_negative_numbers = true)]
        lower: f64,

        /// Upper bound
        #[arg(allow_negative_numbers = true)]
        upper: f64,

        /// Decimal places
        precision: usize,
    },
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();
    LOGGER.set_quiet(cli.quiet);
    LOGGER.set_json(cli.json_logs);

    let result = match cli.command {
        Commands::Csv2arff {
            inputs,
            table,
            output,
        } => cmd_csv2arff(&inputs, &table, output.as_deref()),

        Commands::Batch {
            data_dirs,
            files,
            output_dir,
            table,
        } => cmd_batch(data_dirs, files, output_dir, &table),

        Commands::Itemsets { input, output } => cmd_itemsets(&input, output.as_deref()),

        Commands::Normalize {
            input,
            lower,
            upper,
            precision,
        } => cmd_normalize(&input, NormalizeSpec::new(lower, upper, precision)),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn convert_options(table: &TableArgs, base: ConvertOptions) -> Result<ConvertOptions, arffconv::ConfigError> {
    let mut options = base;
    if let Some(ref d) = table.delimiter {
        options.delimiter = ConvertOptions::parse_delimiter(d)?;
    }
    if table.detect_delimiter {
        options.detect_delimiter = true;
    }
    Ok(options)
}

fn cmd_csv2arff(inputs: &[PathBuf], table: &TableArgs, output: Option<&Path>) -> CmdResult {
    let options = convert_options(table, ConvertOptions::default())?;
    let mut documents = String::new();

    for input in inputs {
        log_info(format!("📄 Converting: {}", input.display()));
        let result = convert_csv_file(input, &options)?;

        log_info_indent(format!("Encoding: {}", result.encoding), 1);
        log_info_indent(format!("Delimiter: '{}'", format_delimiter(result.delimiter)), 1);
        log_info_indent(format!("Columns: {}", result.attributes.join(", ")), 1);
        log_success(format!("Converted {} rows", result.row_count));

        documents.push_str(&result.document);
    }

    write_output(&documents, output)
}

fn cmd_batch(
    data_dirs: Vec<PathBuf>,
    files: Vec<String>,
    output_dir: Option<PathBuf>,
    table: &TableArgs,
) -> CmdResult {
    let mut config = BatchConfig::from_env()?;
    if !data_dirs.is_empty() {
        config.search_dirs = data_dirs;
    }
    if !files.is_empty() {
        config.files = files;
    }
    if output_dir.is_some() {
        config.output_dir = output_dir;
    }
    config.options = convert_options(table, config.options)?;

    let stdout = std::io::stdout();
    let mut sink = stdout.lock();
    let report = run_batch(&config, &mut sink)?;
    sink.flush()?;

    if !report.is_success() {
        for failure in &report.failures {
            log_warning(format!("{}: {}", failure.file, failure.error));
        }
        return Err(format!("{} file(s) failed", report.failures.len()).into());
    }

    Ok(())
}

fn cmd_itemsets(input: &Path, output: Option<&Path>) -> CmdResult {
    let result = convert_itemsets_file(input)?;

    match output {
        Some(p) => fs::write(p, &result.document)?,
        None => print!("{}", result.document),
    }

    log_info("--- Conversion Statistics ---");
    log_info(format!("Input file: {}", input.display()));
    if let Some(p) = output {
        log_info(format!("Output file: {}", p.display()));
    }
    log_info(format!("Transactions processed: {}", result.stats.transactions));
    log_info(format!("Unique items found: {}", result.stats.unique_items));
    log_success(format!(
        "Conversion time: {:.2} seconds",
        result.stats.elapsed.as_secs_f64()
    ));

    Ok(())
}

fn cmd_normalize(input: &Path, spec: NormalizeSpec) -> CmdResult {
    log_info(format!(
        "Normalizing {} into [{}, {}], precision {}",
        input.display(),
        spec.lower,
        spec.upper,
        spec.precision
    ));

    let lines = normalize_file(input, spec)?;
    let mut out = lines.join("\n");
    out.push('\n');
    write_output(&out, None)
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> CmdResult {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            log_success(format!("💾 Output written to: {}", p.display()));
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
