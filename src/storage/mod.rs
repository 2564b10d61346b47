pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{errors::Result, workbook::Workbook};

/// Abstraction over where workbooks are read from and written to.
pub trait StorageBackend: Send + Sync {
    fn load(&self, path: &Path) -> Result<Workbook>;
    /// Persists `workbook` at `path`, keeping a backup of whatever was there before.
    fn save(&self, workbook: &Workbook, path: &Path) -> Result<()>;
    /// Backups taken for `path`, newest first.
    fn list_backups(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

pub use json_backend::{load_workbook_from_path, save_workbook_to_path, JsonWorkbookStore};
