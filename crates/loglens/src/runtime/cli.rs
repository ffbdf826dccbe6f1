//! CLI — acquire, parse and analyze each file, one JSON document per file.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::analyzer::{Analyzer, LogSummary};
use crate::conf::LensConfig;
use crate::parser::{LogEntry, LogParser};
use crate::source::{load_log_file, SourceError};

#[derive(Parser, Debug)]
#[command(
    name = "loglens",
    version,
    about = "Summarize errors and warnings from heterogeneous log files"
)]
pub struct Cli {
    /// Path to the loglens config file (overrides LOGLENS_CONFIG_FILE)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Include every parsed entry in the output
    #[arg(long)]
    pub entries: bool,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Log files to analyze (.log or .txt)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Output document for one file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: String,
    pub summary: LogSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<LogEntry>>,
}

/// Config-bound pipeline shared across every file of one invocation.
pub struct Pipeline {
    config: LensConfig,
    parser: LogParser,
    analyzer: Analyzer,
}

impl Pipeline {
    pub fn new(config: LensConfig) -> Self {
        Self {
            parser: LogParser::new(&config.parser),
            analyzer: Analyzer::new(&config.analyzer),
            config,
        }
    }

    pub fn process(&self, path: &Path, now: DateTime<Utc>, keep_entries: bool) -> Result<FileReport, SourceError> {
        let raw = load_log_file(path, &self.config.source)?;
        let (entries, stats) = self.parser.parse(&raw, now);
        let summary = self.analyzer.analyze(&entries, now);

        info!(
            file = %path.display(),
            entries = entries.len(),
            errors = summary.total_errors,
            warnings = summary.total_warnings,
            success_rate = stats.success_rate(),
            "analyzed"
        );
        if let Some((label, count)) = summary.top_error_type() {
            debug!(file = %path.display(), label, count, "most frequent error type");
        }

        Ok(FileReport {
            file: path.display().to_string(),
            summary,
            entries: keep_entries.then_some(entries),
        })
    }
}

/// Run every file through the pipeline, writing reports to `out`.
///
/// Returns the number of files that failed acquisition. Each file is
/// independent; one failure does not stop the rest.
pub fn run<W: Write>(cli: &Cli, config: LensConfig, out: &mut W) -> Result<usize, Box<dyn std::error::Error>> {
    let pipeline = Pipeline::new(config);
    let mut failures = 0;

    for path in &cli.files {
        match pipeline.process(path, Utc::now(), cli.entries) {
            Ok(report) => {
                if cli.compact {
                    serde_json::to_writer(&mut *out, &report)?;
                } else {
                    serde_json::to_writer_pretty(&mut *out, &report)?;
                }
                writeln!(out)?;
            }
            Err(e) => {
                error!(file = %e.path().display(), "{}", e);
                failures += 1;
            }
        }
    }

    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_cli_parses_flags_and_files() {
        let cli = Cli::try_parse_from(["loglens", "--entries", "--compact", "a.log", "b.txt"]).unwrap();
        assert!(cli.entries);
        assert!(cli.compact);
        assert_eq!(cli.files, vec![PathBuf::from("a.log"), PathBuf::from("b.txt")]);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_requires_a_file() {
        assert!(Cli::try_parse_from(["loglens"]).is_err());
    }

    #[test]
    fn test_process_builds_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(
            &path,
            "2024-06-14 10:00:00 ERROR TypeError: boom\n  at main.js:1\n2024-06-14 10:00:01 WARN slow\n",
        )
        .unwrap();

        let pipeline = Pipeline::new(LensConfig::default());
        let report = pipeline.process(&path, now(), true).unwrap();
        assert_eq!(report.summary.total_errors, 1);
        assert_eq!(report.summary.total_warnings, 1);
        assert_eq!(report.entries.as_ref().map(Vec::len), Some(2));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["errorsByType"]["TypeError"], 1);
        assert_eq!(json["entries"][0]["details"], "  at main.js:1");
        assert_eq!(json["entries"][0]["level"], "error");
    }

    #[test]
    fn test_process_omits_entries_unless_requested() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "INFO: hello\n").unwrap();

        let report = Pipeline::new(LensConfig::default()).process(&path, now(), false).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("entries").is_none());
    }

    #[test]
    fn test_run_counts_failures_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.log");
        fs::write(&good, "ERROR: disk full\n").unwrap();
        let empty = dir.path().join("empty.log");
        fs::write(&empty, "").unwrap();
        let wrong = dir.path().join("photo.jpg");
        fs::write(&wrong, "binary").unwrap();

        let cli = Cli {
            config: None,
            entries: false,
            compact: true,
            files: vec![empty, good, wrong],
        };
        let mut out = Vec::new();
        let failures = run(&cli, LensConfig::default(), &mut out).unwrap();

        assert_eq!(failures, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        let json: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert!(json["file"].as_str().unwrap().ends_with("good.log"));
        assert_eq!(json["summary"]["totalErrors"], 1);
        assert_eq!(json["summary"]["errorsByType"]["disk"], 1);
    }
}
