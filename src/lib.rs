#![doc(test(attr(deny(warnings))))]

//! Ledger Recon reconciles an installment-order ledger against a cash transaction ledger:
//! it classifies due dates, recomputes receivables and costs, summarizes first-period
//! collections and replays running balances over a spreadsheet-shaped workbook.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;
pub mod workbook;

use std::path::Path;
use std::sync::Once;

pub use crate::core::{ReconciliationEngine, RunReport, RunWarning, WarningKind};
pub use crate::errors::{ReconError, Result};
pub use crate::ledger::DueStatus;
pub use crate::workbook::{Cell, Sheet, Workbook};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing on stderr and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Recon tracing initialized.");
    });
}

/// Like [`init`], but appends log lines to `path` instead of stderr.
pub fn init_with_log_file(path: &Path) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing_to_file(path);
        tracing::info!(log_file = %path.display(), "Ledger Recon tracing initialized.");
    });
}
