pub mod layout;

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{errors::Result, utils::app_data_dir};

pub use layout::{
    OrderColumns, RowRange, RulesLayout, SheetNames, TransactionColumns, WorkbookLayout,
};

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_BACKUP_RETENTION: usize = 5;

/// Labels the ledgers use for payment kinds, periods and balance categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub rent: String,
    pub final_payment: String,
    pub down_payment: String,
    pub disbursement: String,
    pub supplier_profit: String,
    pub first_period: String,
    pub reinvestment_card: String,
    /// Written into the period-1 column of orders without any first-period entry.
    pub no_match: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            rent: "租金".into(),
            final_payment: "尾款".into(),
            down_payment: "首付款".into(),
            disbursement: "放款".into(),
            supplier_profit: "供应商利润".into(),
            first_period: "第一期".into(),
            reinvestment_card: "复投卡".into(),
            no_match: "未找到匹配".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: WorkbookLayout,
    #[serde(default)]
    pub vocabulary: Vocabulary,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: WorkbookLayout::default(),
            vocabulary: Vocabulary::default(),
            backup_retention: Self::default_backup_retention(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn default_backup_retention() -> usize {
        DEFAULT_BACKUP_RETENTION
    }
}

/// Loads and saves [`Config`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted in the application data directory.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Manager for an explicit config file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            config.layout.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backup_retention, 5);
    }

    #[test]
    fn saved_config_roundtrips() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.vocabulary.rent = "rent".into();
        config.layout.transactions.balance_first_row = 2;
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "backup_retention": 2 }"#).unwrap();
        let config = ConfigManager::at_path(&path).load().unwrap();
        assert_eq!(config.backup_retention, 2);
        assert_eq!(config.vocabulary, Vocabulary::default());
        assert_eq!(config.layout, WorkbookLayout::default());
    }

    #[test]
    fn invalid_layout_fails_to_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let mut config = Config::default();
        config.layout.orders.order_id = 0;
        fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert!(ConfigManager::at_path(&path).load().is_err());
    }
}
