//! アクセスキー管理（管理画面から呼ばれるリゾルバー）
//!
//! 保存と設定状況の確認のみを提供する。キーの値そのものは返さない。

use serde::{Deserialize, Serialize};

use crate::secrets::{SecretStore, ACCESS_KEY_SECRET};

pub const ACCESS_KEY_REQUIRED_MESSAGE: &str = "Access key is required";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save access key";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAccessKeyRequest {
    #[serde(default)]
    pub access_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAccessKeyResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveAccessKeyResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: &str) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeyStatus {
    pub is_set: bool,
}

/// アクセスキーを保存する
///
/// 空白のみの入力はストアに触れずに拒否する。保存するのは前後の空白を除いた値。
pub async fn save_access_key<S>(store: &S, request: &SaveAccessKeyRequest) -> SaveAccessKeyResponse
where
    S: SecretStore + ?Sized,
{
    let access_key = request.access_key.trim();
    if access_key.is_empty() {
        log::warn!("Rejected empty access key submission");
        return SaveAccessKeyResponse::failed(ACCESS_KEY_REQUIRED_MESSAGE);
    }

    match store.set_secret(ACCESS_KEY_SECRET, access_key).await {
        Ok(()) => {
            log::info!("Unsplash access key saved successfully");
            SaveAccessKeyResponse::ok()
        }
        Err(e) => {
            log::error!("Failed to save Unsplash access key: {e}");
            SaveAccessKeyResponse::failed(SAVE_FAILED_MESSAGE)
        }
    }
}

/// アクセスキーが設定されているかチェック
pub async fn get_access_key_status<S>(store: &S) -> AccessKeyStatus
where
    S: SecretStore + ?Sized,
{
    match store.get_secret(ACCESS_KEY_SECRET).await {
        Ok(secret) => AccessKeyStatus {
            is_set: secret.is_some_and(|s| !s.trim().is_empty()),
        },
        Err(e) => {
            log::error!("Failed to read Unsplash access key status: {e}");
            AccessKeyStatus { is_set: false }
        }
    }
}
