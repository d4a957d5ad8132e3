//! プロセス内メモリのシークレットストア（開発・E2E・テスト用）

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::SecretStore;

#[derive(Default)]
pub struct MemorySecretStore {
    secrets: Mutex<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を1件入れた状態で作成
    pub fn with_secret(key: &str, value: &str) -> Self {
        let store = Self::default();
        if let Ok(mut secrets) = store.secrets.lock() {
            secrets.insert(key.to_string(), value.to_string());
        }
        store
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get_secret(&self, key: &str) -> Result<Option<String>, String> {
        let secrets = self
            .secrets
            .lock()
            .map_err(|e| format!("Failed to lock secret store: {e}"))?;
        Ok(secrets.get(key).filter(|v| !v.is_empty()).cloned())
    }

    async fn set_secret(&self, key: &str, value: &str) -> Result<(), String> {
        let mut secrets = self
            .secrets
            .lock()
            .map_err(|e| format!("Failed to lock secret store: {e}"))?;
        secrets.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
