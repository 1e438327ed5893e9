use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use logledger_parser::{parse_line, LogRecord};

/// Counters for one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Data rows written, header excluded.
    pub rows_written: usize,
    /// Input lines that did not match the grammar.
    pub lines_skipped: usize,
}

/// Convert an access log file into a CSV file.
///
/// Ensures the output's parent directory exists, writes the header row,
/// then streams the input line by line. Input is read leniently: bytes
/// that are not valid UTF-8 are replaced rather than aborting the run.
/// Both files stay open for the duration of the loop; the writer is
/// flushed before returning.
pub fn write_csv(log_path: &Path, out_path: &Path) -> Result<ExportSummary> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    let input = File::open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
    let mut reader = BufReader::new(input);

    let output = File::create(out_path)
        .with_context(|| format!("Failed to create output file: {}", out_path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    // The header is written unconditionally so an empty input still
    // produces a well-formed CSV.
    writer
        .write_record(LogRecord::COLUMNS)
        .context("Failed to write CSV header")?;

    let mut summary = ExportSummary::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read from {}", log_path.display()))?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);

        match parse_line(line) {
            Some(record) => {
                writer
                    .serialize(&record)
                    .context("Failed to write CSV row")?;
                summary.rows_written += 1;
            }
            None => summary.lines_skipped += 1,
        }
    }

    writer.flush().context("Failed to flush CSV output")?;

    debug!(
        rows = summary.rows_written,
        skipped = summary.lines_skipped,
        out = %out_path.display(),
        "Export complete"
    );

    Ok(summary)
}
