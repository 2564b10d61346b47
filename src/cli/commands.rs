use std::path::Path;

use chrono::Local;

use crate::{
    config::{Config, ConfigManager},
    core::{ReconciliationEngine, RunReport},
    storage::{JsonWorkbookStore, StorageBackend},
    utils::build_info,
};

use super::{output, CliError, CliResult, Command, RunOptions, USAGE};

pub fn execute(command: Command) -> CliResult {
    match command {
        Command::Run(options) => cmd_run(options),
        Command::Inspect { workbook } => {
            crate::init();
            cmd_inspect(&workbook)
        }
        Command::InitConfig { path } => {
            crate::init();
            cmd_init_config(path.as_deref())
        }
        Command::Version => {
            cmd_version();
            Ok(())
        }
        Command::Help => {
            output::info(USAGE);
            Ok(())
        }
    }
}

fn load_config(explicit: Option<&Path>) -> CliResult<Config> {
    let manager = match explicit {
        Some(path) => ConfigManager::at_path(path),
        None => ConfigManager::new()?,
    };
    Ok(manager.load()?)
}

fn cmd_run(options: RunOptions) -> CliResult {
    let config = load_config(options.config.as_deref())?;
    match config.log_file.as_deref() {
        Some(path) => crate::init_with_log_file(path),
        None => crate::init(),
    }

    let store = JsonWorkbookStore::new(config.backup_retention);
    let mut workbook = store.load(&options.workbook)?;
    let as_of = options.as_of.unwrap_or_else(|| Local::now().date_naive());
    let report = ReconciliationEngine::from_config(&config).run(&mut workbook, as_of)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if options.dry_run {
        output::info("Dry run: workbook not saved.");
    } else {
        store.save(&workbook, &options.workbook)?;
        if !options.json {
            output::success(format!("Saved {}", options.workbook.display()));
        }
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    output::success(report.headline());
    for (status, count) in &report.status_counts {
        if *count > 0 {
            output::info(format!("  {:<16} {count}", status.to_string()));
        }
    }
    output::info(format!(
        "  balances: available {} / withdrawable {}",
        report.available_balance, report.withdraw_balance
    ));
    for warning in &report.warnings {
        output::warning(format!(
            "{}!{}: {}",
            warning.sheet, warning.cell, warning.message
        ));
    }
}

fn cmd_inspect(path: &Path) -> CliResult {
    let store = JsonWorkbookStore::default();
    let workbook = store.load(path)?;
    output::section(format!("Workbook {}", path.display()));
    if workbook.sheets().is_empty() {
        output::info("(no sheets)");
    }
    for sheet in workbook.sheets() {
        output::info(format!(
            "  {}: {} rows x {} columns, {} filled cells",
            sheet.name,
            sheet.max_row(),
            sheet.max_column(),
            sheet.fills().len()
        ));
    }
    let backups = store.list_backups(path)?;
    if !backups.is_empty() {
        output::info(format!("  backups: {}", backups.len()));
    }
    Ok(())
}

fn cmd_init_config(path: Option<&Path>) -> CliResult {
    let manager = match path {
        Some(path) => ConfigManager::at_path(path),
        None => ConfigManager::new()?,
    };
    if manager.path().exists() {
        return Err(CliError::InvalidArguments(format!(
            "config already exists at {}",
            manager.path().display()
        )));
    }
    manager.save(&Config::default())?;
    output::success(format!("Wrote default config to {}", manager.path().display()));
    Ok(())
}

fn cmd_version() {
    let meta = build_info::current();
    output::section(format!("Ledger Recon {}", meta.version));
    output::info(format!("  Build        : {}", meta.describe()));
    output::info(format!("  Build hash   : {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
}
