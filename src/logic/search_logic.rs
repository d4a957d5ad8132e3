//! 写真検索アクションのビジネスロジック
//!
//! エージェントから呼ばれる `search-photos` アクションの本体。
//! シークレットストアと検索クライアントはトレイト経由で受け取り、
//! どの失敗も `ActionResponse::Failure` に変換して返す（呼び出し元に例外を伝播させない）。

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult, QUERY_REQUIRED_MESSAGE};
use crate::secrets::{SecretStore, ACCESS_KEY_SECRET};
use crate::unsplash::{PhotoSearchClientTrait, SearchParams, UnsplashPhoto};

/// description / alt_description が両方ない場合の表示名
pub const UNTITLED: &str = "Untitled";

/// アクションへの入力
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Default::default()
        }
    }
}

/// 検索結果の1件（エージェントに返す形）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResult {
    pub id: String,
    pub description: String,
    pub url: String,
    pub thumbnail: String,
    pub photographer: String,
    pub photographer_url: String,
    pub download_url: String,
}

impl From<UnsplashPhoto> for PhotoResult {
    fn from(photo: UnsplashPhoto) -> Self {
        let description = photo
            .description
            .filter(|d| !d.is_empty())
            .or(photo.alt_description.filter(|d| !d.is_empty()))
            .unwrap_or_else(|| UNTITLED.to_string());

        Self {
            id: photo.id,
            description,
            url: photo.urls.regular,
            thumbnail: photo.urls.thumb,
            photographer: photo.user.name,
            photographer_url: photo.user.links.html,
            download_url: photo.links.download_location,
        }
    }
}

/// アクションの応答（`status` でタグ付け）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ActionResponse {
    #[serde(rename = "success")]
    Success {
        total: u64,
        results: Vec<PhotoResult>,
        message: String,
    },
    #[serde(rename = "error")]
    Failure { error: String },
}

impl ActionResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// 写真を検索する
///
/// 1. アクセスキー未設定なら入力チェックより先に失敗を返す
/// 2. クエリが空なら失敗を返す
/// 3. Unsplash に1回だけ問い合わせ、結果を `PhotoResult` に変換する
///
/// 内部エラーの詳細はログにのみ出力し、応答にはユーザー向けメッセージだけを入れる。
pub async fn search_photos<S, C>(store: &S, client: &C, request: &SearchRequest) -> ActionResponse
where
    S: SecretStore + ?Sized,
    C: PhotoSearchClientTrait + ?Sized,
{
    match run_search(store, client, request).await {
        Ok(response) => response,
        Err(e) => {
            if e.is_fault() {
                log::error!("Photo search failed: {e}");
            } else {
                log::warn!("Photo search rejected: {e}");
            }
            ActionResponse::failure(e.user_message())
        }
    }
}

async fn run_search<S, C>(store: &S, client: &C, request: &SearchRequest) -> SearchResult<ActionResponse>
where
    S: SecretStore + ?Sized,
    C: PhotoSearchClientTrait + ?Sized,
{
    let access_key = store
        .get_secret(ACCESS_KEY_SECRET)
        .await
        .map_err(SearchError::SecretStore)?
        .filter(|key| !key.trim().is_empty())
        .ok_or(SearchError::NotConfigured)?;

    let query = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| SearchError::InvalidInput(QUERY_REQUIRED_MESSAGE.to_string()))?;

    let params = SearchParams {
        query: query.to_string(),
        color: request.color.clone(),
        orientation: request.orientation.clone(),
    };

    let response = client.search_photos(&access_key, &params).await?;
    let photos = response.results.unwrap_or_default();

    if photos.is_empty() {
        log::info!("No photos found");
        return Ok(ActionResponse::Success {
            total: 0,
            results: Vec::new(),
            message: format!("No photos found for \"{query}\". Try different search terms."),
        });
    }

    let results: Vec<PhotoResult> = photos.into_iter().map(PhotoResult::from).collect();

    log::info!(
        "Photo search succeeded: {} result(s), {} total",
        results.len(),
        response.total
    );

    Ok(ActionResponse::Success {
        total: response.total,
        message: format!("Found {} photos for \"{}\"", response.total, query),
        results,
    })
}
