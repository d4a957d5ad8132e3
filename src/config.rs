//! アプリケーション設定ファイルの管理
//!
//! 検索エンドポイントとシークレットストアの種類を psa_config.json で管理する。
//! アクセスキー自体はこのファイルには書かず、シークレットストアに保存する。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::secrets::keyring_store::DEFAULT_SERVICE_NAME;
use crate::unsplash::DEFAULT_SEARCH_ENDPOINT;

pub const CONFIG_FILENAME: &str = "psa_config.json";

/// アプリケーション設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub unsplash: UnsplashConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
}

/// Unsplash API 設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsplashConfig {
    pub endpoint: String,
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
        }
    }
}

/// シークレットストアの種類
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretBackend {
    #[default]
    Keyring,
    Memory,
}

/// シークレットストア設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    #[serde(default)]
    pub backend: SecretBackend,
    pub service_name: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            backend: SecretBackend::default(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

/// デフォルトの設定ディレクトリ（OS の設定ディレクトリ配下）
pub fn default_config_dir() -> Result<PathBuf, String> {
    dirs::config_dir()
        .map(|dir| dir.join("photo-search-agent"))
        .ok_or_else(|| "Failed to determine config dir".to_string())
}

/// 設定を読み込む。ファイルが存在しない場合はデフォルトを返し、保存する。
pub fn load(config_dir: &Path) -> Result<AppConfig, String> {
    let path = config_dir.join(CONFIG_FILENAME);

    if path.exists() {
        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        serde_json::from_str(&contents).map_err(|e| format!("Invalid config JSON: {e}"))
    } else {
        let config = AppConfig::default();
        save(config_dir, &config)?;
        log::info!("Created default config at {}", path.display());
        Ok(config)
    }
}

/// 設定を保存する。
pub fn save(config_dir: &Path, config: &AppConfig) -> Result<(), String> {
    fs::create_dir_all(config_dir).map_err(|e| format!("Failed to create config dir: {e}"))?;

    let path = config_dir.join(CONFIG_FILENAME);
    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {e}"))?;

    fs::write(&path, contents).map_err(|e| format!("Failed to write config file: {e}"))
}
