pub mod build_info;

use std::{
    env,
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::{Mutex, Once},
};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".ledger_recon";
const DEFAULT_DIRECTIVE: &str = "ledger_recon=info";

static TRACING_INIT: Once = Once::new();

/// Application data directory, `$LEDGER_RECON_HOME` or `~/.ledger_recon`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LEDGER_RECON_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match DEFAULT_DIRECTIVE.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Installs the global subscriber writing to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Installs the global subscriber appending to `path`, falling back to stderr when the
/// file cannot be opened.
pub fn init_tracing_to_file(path: &Path) {
    TRACING_INIT.call_once(|| {
        let file = OpenOptions::new().create(true).append(true).open(path);
        let result = match file {
            Ok(file) => tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init(),
            Err(_) => tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init(),
        };
        let _ = result;
    });
}
