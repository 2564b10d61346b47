//! Command-line front end: argument parsing and the subcommand handlers.

mod commands;
pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::errors::ReconError;

pub use commands::execute;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] ReconError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

pub type CliResult<T = ()> = std::result::Result<T, CliError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub workbook: PathBuf,
    pub as_of: Option<NaiveDate>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Inspect { workbook: PathBuf },
    InitConfig { path: Option<PathBuf> },
    Version,
    Help,
}

const RUN_USAGE: &str =
    "run <workbook.json> [--as-of YYYY-MM-DD] [--config <path>] [--dry-run] [--json]";

pub const USAGE: &str = "\
Usage: ledger_recon_cli <command> [options]

Commands:
  run <workbook.json> [--as-of YYYY-MM-DD] [--config <path>] [--dry-run] [--json]
  inspect <workbook.json>
  init-config [path]
  version
  help";

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> CliResult {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    execute(command)
}

pub fn parse_args(args: &[String]) -> CliResult<Command> {
    let Some((name, rest)) = args.split_first() else {
        return Err(CliError::InvalidArguments(format!(
            "no command given\n\n{USAGE}"
        )));
    };
    match name.as_str() {
        "run" => parse_run(rest).map(Command::Run),
        "inspect" => match rest {
            [workbook] => Ok(Command::Inspect {
                workbook: PathBuf::from(workbook),
            }),
            _ => Err(usage_error("inspect <workbook.json>")),
        },
        "init-config" => match rest {
            [] => Ok(Command::InitConfig { path: None }),
            [path] => Ok(Command::InitConfig {
                path: Some(PathBuf::from(path)),
            }),
            _ => Err(usage_error("init-config [path]")),
        },
        "version" | "--version" | "-V" => Ok(Command::Version),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(CliError::InvalidArguments(format!(
            "unknown command `{other}`\n\n{USAGE}"
        ))),
    }
}

fn parse_run(args: &[String]) -> CliResult<RunOptions> {
    let mut workbook = None;
    let mut options = RunOptions {
        workbook: PathBuf::new(),
        as_of: None,
        config: None,
        dry_run: false,
        json: false,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--as-of" => {
                let value = iter
                    .next()
                    .ok_or_else(|| usage_error("--as-of YYYY-MM-DD"))?;
                let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                    CliError::InvalidArguments(format!(
                        "invalid --as-of date `{value}`, expected YYYY-MM-DD"
                    ))
                })?;
                options.as_of = Some(date);
            }
            "--config" => {
                let value = iter.next().ok_or_else(|| usage_error("--config <path>"))?;
                options.config = Some(PathBuf::from(value));
            }
            "--dry-run" => options.dry_run = true,
            "--json" => options.json = true,
            flag if flag.starts_with("--") => {
                return Err(CliError::InvalidArguments(format!("unknown option `{flag}`")));
            }
            path if workbook.is_none() => workbook = Some(PathBuf::from(path)),
            extra => {
                return Err(CliError::InvalidArguments(format!(
                    "unexpected argument `{extra}`"
                )));
            }
        }
    }
    options.workbook = workbook.ok_or_else(|| usage_error(RUN_USAGE))?;
    Ok(options)
}

fn usage_error(usage: &str) -> CliError {
    CliError::InvalidArguments(format!("usage: {usage}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_run_with_all_options() {
        let command = parse_args(&args(&[
            "run",
            "book.json",
            "--as-of",
            "2025-03-01",
            "--config",
            "cfg.json",
            "--dry-run",
            "--json",
        ]))
        .unwrap();
        assert_eq!(
            command,
            Command::Run(RunOptions {
                workbook: "book.json".into(),
                as_of: NaiveDate::from_ymd_opt(2025, 3, 1),
                config: Some("cfg.json".into()),
                dry_run: true,
                json: true,
            })
        );
    }

    #[test]
    fn rejects_bad_dates_and_missing_paths() {
        assert!(parse_args(&args(&["run", "book.json", "--as-of", "03/01/2025"])).is_err());
        assert!(parse_args(&args(&["run", "--dry-run"])).is_err());
        assert!(parse_args(&args(&["run", "a.json", "b.json"])).is_err());
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["frobnicate"])).is_err());
    }

    #[test]
    fn init_config_path_is_optional() {
        assert_eq!(
            parse_args(&args(&["init-config"])).unwrap(),
            Command::InitConfig { path: None }
        );
        assert_eq!(
            parse_args(&args(&["init-config", "c.json"])).unwrap(),
            Command::InitConfig {
                path: Some("c.json".into())
            }
        );
    }
}
