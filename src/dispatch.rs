//! 関数ディスパッチ
//!
//! 関数キーと JSON ペイロードを受け取り、対応するアクション/リゾルバーを呼び出して
//! JSON で応答を返す。ハンドラー自体は失敗を応答に含めて返すため、
//! `Err` になるのはペイロードの形式不正と応答のシリアライズ失敗だけ。

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::logic::access_key_logic::{self, SaveAccessKeyRequest};
use crate::logic::search_logic::{self, SearchRequest};
use crate::secrets::SecretStore;
use crate::unsplash::PhotoSearchClientTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKey {
    SearchPhotos,
    SaveAccessKey,
    GetAccessKeyStatus,
}

impl FunctionKey {
    pub const ALL: [FunctionKey; 3] = [
        FunctionKey::SearchPhotos,
        FunctionKey::SaveAccessKey,
        FunctionKey::GetAccessKeyStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SearchPhotos => "search-photos",
            Self::SaveAccessKey => "save-access-key",
            Self::GetAccessKeyStatus => "get-access-key-status",
        }
    }
}

impl fmt::Display for FunctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(FunctionKey::as_str).collect();
                format!("Unknown function: {s} (expected one of: {})", known.join(", "))
            })
    }
}

pub struct Dispatcher {
    store: Arc<dyn SecretStore>,
    client: Arc<dyn PhotoSearchClientTrait>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn SecretStore>, client: Arc<dyn PhotoSearchClientTrait>) -> Self {
        Self { store, client }
    }

    pub async fn invoke(&self, key: FunctionKey, payload: Value) -> Result<Value, String> {
        log::info!("Invoking function: {key}");

        match key {
            FunctionKey::SearchPhotos => {
                let request: SearchRequest = parse_payload(key, payload)?;
                let response =
                    search_logic::search_photos(self.store.as_ref(), self.client.as_ref(), &request)
                        .await;
                to_json(&response)
            }
            FunctionKey::SaveAccessKey => {
                let request: SaveAccessKeyRequest = parse_payload(key, payload)?;
                let response =
                    access_key_logic::save_access_key(self.store.as_ref(), &request).await;
                to_json(&response)
            }
            FunctionKey::GetAccessKeyStatus => {
                let status = access_key_logic::get_access_key_status(self.store.as_ref()).await;
                to_json(&status)
            }
        }
    }
}

/// ペイロードを型付きリクエストに変換（null は空オブジェクトとして扱う）
fn parse_payload<T: DeserializeOwned>(key: FunctionKey, payload: Value) -> Result<T, String> {
    let payload = if payload.is_null() {
        Value::Object(Default::default())
    } else {
        payload
    };
    serde_json::from_value(payload).map_err(|e| format!("Invalid payload for {key}: {e}"))
}

fn to_json<T: Serialize>(response: &T) -> Result<Value, String> {
    serde_json::to_value(response).map_err(|e| format!("Failed to serialize response: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentManifest;
    use crate::secrets::MemorySecretStore;
    use crate::unsplash::client::MockPhotoSearchClientTrait;
    use crate::unsplash::UnsplashSearchResponse;
    use serde_json::json;

    fn dispatcher(store: MemorySecretStore, client: MockPhotoSearchClientTrait) -> Dispatcher {
        Dispatcher::new(Arc::new(store), Arc::new(client))
    }

    #[test]
    fn test_function_key_from_str() {
        for key in FunctionKey::ALL {
            assert_eq!(key.as_str().parse::<FunctionKey>().unwrap(), key);
        }
        let err = "delete-access-key".parse::<FunctionKey>().unwrap_err();
        assert!(err.contains("Unknown function"));
    }

    #[test]
    fn test_manifest_actions_are_dispatchable() {
        let manifest = AgentManifest::builtin().unwrap();
        for action in &manifest.actions {
            assert!(action.function.parse::<FunctionKey>().is_ok());
        }
    }

    #[tokio::test]
    async fn test_save_then_status() {
        let mut client = MockPhotoSearchClientTrait::new();
        client.expect_search_photos().times(0);
        let dispatcher = dispatcher(MemorySecretStore::new(), client);

        let status = dispatcher
            .invoke(FunctionKey::GetAccessKeyStatus, Value::Null)
            .await
            .unwrap();
        assert_eq!(status, json!({"isSet": false}));

        let saved = dispatcher
            .invoke(FunctionKey::SaveAccessKey, json!({"accessKey": "abc"}))
            .await
            .unwrap();
        assert_eq!(saved, json!({"success": true}));

        let status = dispatcher
            .invoke(FunctionKey::GetAccessKeyStatus, Value::Null)
            .await
            .unwrap();
        assert_eq!(status, json!({"isSet": true}));
    }

    #[tokio::test]
    async fn test_search_photos_dispatch() {
        let mut client = MockPhotoSearchClientTrait::new();
        client
            .expect_search_photos()
            .times(1)
            .returning(|_, _| Ok(UnsplashSearchResponse::default()));
        let store = MemorySecretStore::with_secret(crate::secrets::ACCESS_KEY_SECRET, "abc");

        let response = dispatcher(store, client)
            .invoke(FunctionKey::SearchPhotos, json!({"query": "cat"}))
            .await
            .unwrap();
        assert_eq!(response["status"], "success");
        assert_eq!(response["total"], 0);
    }

    #[tokio::test]
    async fn test_search_photos_null_payload_is_missing_query() {
        let mut client = MockPhotoSearchClientTrait::new();
        client.expect_search_photos().times(0);
        let store = MemorySecretStore::with_secret(crate::secrets::ACCESS_KEY_SECRET, "abc");

        let response = dispatcher(store, client)
            .invoke(FunctionKey::SearchPhotos, Value::Null)
            .await
            .unwrap();
        assert_eq!(
            response,
            json!({"status": "error", "error": "Search query is required"})
        );
    }

    #[tokio::test]
    async fn test_invalid_payload_is_error() {
        let client = MockPhotoSearchClientTrait::new();
        let result = dispatcher(MemorySecretStore::new(), client)
            .invoke(FunctionKey::SaveAccessKey, json!({"accessKey": 42}))
            .await;
        assert!(result.unwrap_err().contains("Invalid payload for save-access-key"));
    }
}
