//! # logledger-export
//!
//! Writes parsed access log records to a CSV file: one fixed header row,
//! then one row per matched input line, in input order. Lines that do not
//! match the grammar are skipped without diagnostics.

mod writer;

pub use writer::{write_csv, ExportSummary};
