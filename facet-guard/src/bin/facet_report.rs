//! Driver binary: profile CSV attributes and write HTML reports.
//!
//! ```text
//! facet-report <csv> <config-file-or-dir> <out-dir> [delimiter]
//! ```
//!
//! Loads the CSV into one shared table, reads every attribute configuration
//! (a JSON file, or every `*.json` file of a directory), runs one analysis
//! per configured attribute and writes `<out-dir>/<date>/<attribute>.html`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::{env, fs};

use tracing::{error, info};

use facet_guard::config::AttributeAnalysisSpec;
use facet_guard::logging::setup::{init_logging, LoggingConfig};
use facet_guard::report::{HtmlReportFormatter, ReportFormatter};
use facet_guard::source::{CsvOptions, CsvSource};

fn main() -> ExitCode {
    if init_logging(LoggingConfig::default()).is_err() {
        eprintln!("failed to initialize logging");
    }

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 || args.len() > 5 {
        eprintln!("usage: facet-report <csv> <config-file-or-dir> <out-dir> [delimiter]");
        return ExitCode::from(2);
    }

    match run(&args[1], &args[2], &args[3], args.get(4).map(String::as_str)) {
        Ok(written) => {
            info!(reports = written, "all reports written");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "report run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(
    csv: &str,
    config: &str,
    out_dir: &str,
    delimiter: Option<&str>,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut options = CsvOptions::default();
    if let Some(delimiter) = delimiter {
        let bytes = delimiter.as_bytes();
        if bytes.len() != 1 {
            return Err(format!("delimiter must be a single byte, got '{delimiter}'").into());
        }
        options = options.with_delimiter(bytes[0]);
    }

    let table = Arc::new(CsvSource::new(csv).with_options(options).load()?);
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded table"
    );

    let report_dir =
        PathBuf::from(out_dir).join(chrono::Local::now().format("%Y-%m-%d").to_string());
    fs::create_dir_all(&report_dir)?;

    let formatter = HtmlReportFormatter::new();
    let mut written = 0;
    for config_path in config_files(Path::new(config))? {
        let json = fs::read_to_string(&config_path)?;
        for spec in AttributeAnalysisSpec::many_from_json(&json)? {
            let mut analysis = spec.build(table.clone())?;
            analysis.run()?;

            let html = formatter.format(&analysis)?;
            let out_path = report_dir.join(format!("{}.html", analysis.attribute_name()));
            fs::write(&out_path, html)?;
            info!(report = %out_path.display(), "wrote report");
            written += 1;
        }
    }

    Ok(written)
}

/// A single file, or every `*.json` file of a directory in name order.
fn config_files(path: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}
