use chrono::Utc;
use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{
    errors::{ReconError, Result},
    workbook::Workbook,
};

use super::StorageBackend;

const BACKUP_DIR: &str = "backups";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Stores workbooks as pretty-printed JSON next to a rolling set of backups.
///
/// Backups for `ledgers/book.json` live in `ledgers/backups/book/`.
#[derive(Debug, Clone)]
pub struct JsonWorkbookStore {
    retention: usize,
}

impl Default for JsonWorkbookStore {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}

impl JsonWorkbookStore {
    pub fn new(retention: usize) -> Self {
        Self {
            retention: retention.max(1),
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn backup_dir(&self, path: &Path) -> PathBuf {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        path.parent()
            .unwrap_or_else(|| Path::new("."))
            .join(BACKUP_DIR)
            .join(canonical_name(stem))
    }

    fn backup_existing_file(&self, path: &Path) -> Result<Option<PathBuf>> {
        if !path.exists() {
            return Ok(None);
        }
        let dir = self.backup_dir(path);
        fs::create_dir_all(&dir)?;
        let base = format!(
            "{}_{}",
            canonical_name(path.file_stem().and_then(|s| s.to_str()).unwrap_or_default()),
            Utc::now().format(BACKUP_TIMESTAMP_FORMAT)
        );
        let mut backup_path = dir.join(format!("{base}.{BACKUP_EXTENSION}"));
        let mut attempt = 1;
        while backup_path.exists() {
            backup_path = dir.join(format!("{base}_{attempt}.{BACKUP_EXTENSION}"));
            attempt += 1;
        }
        fs::copy(path, &backup_path)?;
        debug!(backup = %backup_path.display(), "backed up workbook");
        self.prune_backups(path)?;
        Ok(Some(backup_path))
    }

    fn prune_backups(&self, path: &Path) -> Result<()> {
        let backups = self.list_backups(path)?;
        for stale in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl StorageBackend for JsonWorkbookStore {
    fn load(&self, path: &Path) -> Result<Workbook> {
        load_workbook_from_path(path)
    }

    fn save(&self, workbook: &Workbook, path: &Path) -> Result<()> {
        self.backup_existing_file(path)?;
        save_workbook_to_path(workbook, path)?;
        info!(path = %path.display(), "saved workbook");
        Ok(())
    }

    fn list_backups(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let dir = self.backup_dir(path);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let candidate = entry.path();
            if candidate.extension().and_then(|ext| ext.to_str()) == Some(BACKUP_EXTENSION) {
                entries.push(candidate);
            }
        }
        // Timestamped names sort chronologically.
        entries.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(entries)
    }
}

/// Writes `workbook` to `path` through a temporary file and rename.
pub fn save_workbook_to_path(workbook: &Workbook, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(workbook)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reads a workbook, rejecting documents that name two sheets the same.
pub fn load_workbook_from_path(path: &Path) -> Result<Workbook> {
    let data = fs::read_to_string(path)?;
    let workbook: Workbook = serde_json::from_str(&data)?;
    let mut seen = HashSet::new();
    if let Some(name) = workbook.sheet_names().into_iter().find(|name| !seen.insert(*name)) {
        return Err(ReconError::InvalidInput(format!(
            "{} contains more than one sheet named `{name}`",
            path.display()
        )));
    }
    Ok(workbook)
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "workbook".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
