//! シークレットストア（アクセスキーの保管先）
//!
//! # セキュリティガイドライン
//! - シークレットの値は絶対にログに出力しないこと
//! - 本番では OS のセキュアストレージ（keyring）を使用すること

pub mod keyring_store;
pub mod memory;

use async_trait::async_trait;

pub use keyring_store::KeyringSecretStore;
pub use memory::MemorySecretStore;

/// Unsplash アクセスキーを保存するキー名
pub const ACCESS_KEY_SECRET: &str = "unsplash-access-key";

/// シークレットストアの操作を抽象化するトレイト
///
/// 未設定は異常ではないため `Ok(None)` で表す。`Err` はストア自体の障害のみ。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// シークレットを取得
    async fn get_secret(&self, key: &str) -> Result<Option<String>, String>;

    /// シークレットを保存（既存の値は上書き）
    async fn set_secret(&self, key: &str, value: &str) -> Result<(), String>;
}
