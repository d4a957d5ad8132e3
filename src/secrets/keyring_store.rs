//! OS のセキュアストレージ（keyring）を使うシークレットストア

use async_trait::async_trait;
use keyring::Entry;

use super::SecretStore;

/// keyring のサービス名のデフォルト
pub const DEFAULT_SERVICE_NAME: &str = "photo-search-agent";

pub struct KeyringSecretStore {
    service_name: String,
}

impl KeyringSecretStore {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, String> {
        Entry::new(&self.service_name, key)
            .map_err(|e| format!("Failed to access secure storage: {e}"))
    }
}

impl Default for KeyringSecretStore {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

#[async_trait]
impl SecretStore for KeyringSecretStore {
    async fn get_secret(&self, key: &str) -> Result<Option<String>, String> {
        let entry = self.entry(key)?;
        match entry.get_password() {
            Ok(secret) if secret.is_empty() => Ok(None),
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(format!("Failed to load secret from secure storage: {e}")),
        }
    }

    async fn set_secret(&self, key: &str, value: &str) -> Result<(), String> {
        let entry = self.entry(key)?;
        entry
            .set_password(value)
            .map_err(|e| format!("Failed to save secret to secure storage: {e}"))?;

        log::info!("Secret '{}' saved to secure storage", key);
        Ok(())
    }
}
