//! Unsplash 写真検索クライアント
//!
//! # セキュリティガイドライン
//! - アクセスキーはログに出力しない（URL をログに出す場合は client_id を除去する）
//! - エラーレスポンスのボディは運用ログにのみ出力し、呼び出し元には返さない
//!
//! # リクエスト方針
//! - 1回の呼び出しにつき1リクエストのみ（リトライ・キャッシュなし）
//! - タイムアウトは設定しない（実行環境のデフォルトに従う）

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use crate::error::{SearchError, SearchResult};

/// Unsplash 検索 API のデフォルトエンドポイント
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.unsplash.com/search/photos";

/// 1回の検索で取得する件数（固定）
pub const PER_PAGE: u32 = 10;

/// ログに残すエラーボディの最大文字数
const ERROR_BODY_LOG_LIMIT: usize = 500;

/// 検索パラメータ
///
/// `color` / `orientation` は `None`（または空文字）のときクエリに含めない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub color: Option<String>,
    pub orientation: Option<String>,
}

/// Unsplash 検索レスポンスの構造
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnsplashSearchResponse {
    /// API が報告する総ヒット件数（ページサイズではない）
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
    pub results: Option<Vec<UnsplashPhoto>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnsplashPhoto {
    #[serde(default)]
    pub id: String,
    pub description: Option<String>,
    pub alt_description: Option<String>,
    #[serde(default)]
    pub urls: PhotoUrls,
    #[serde(default)]
    pub user: PhotoUser,
    #[serde(default)]
    pub links: PhotoLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoUrls {
    #[serde(default)]
    pub regular: String,
    #[serde(default)]
    pub thumb: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub links: UserLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserLinks {
    #[serde(default)]
    pub html: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoLinks {
    #[serde(default)]
    pub download_location: String,
}

/// 検索 URL を構築
///
/// パラメータは (名前, 値) の一覧を走査し、値があるものだけを追加する。
pub fn build_search_url(
    endpoint: &str,
    access_key: &str,
    params: &SearchParams,
) -> SearchResult<Url> {
    let mut url = Url::parse(endpoint)?;
    let per_page = PER_PAGE.to_string();

    let pairs: [(&str, Option<&str>); 5] = [
        ("query", Some(params.query.as_str())),
        ("per_page", Some(per_page.as_str())),
        ("client_id", Some(access_key)),
        ("color", params.color.as_deref()),
        ("orientation", params.orientation.as_deref()),
    ];

    {
        let mut query = url.query_pairs_mut();
        for (name, value) in pairs {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                query.append_pair(name, value);
            }
        }
    }

    Ok(url)
}

/// ログ出力用に client_id を除去した URL を返す
pub fn redact_access_key(url: &Url) -> String {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| name != "client_id")
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    let mut safe = url.clone();
    safe.query_pairs_mut().clear().extend_pairs(kept);
    safe.to_string()
}

fn empty_tls_config() -> Result<rustls::ClientConfig, String> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    Ok(rustls::ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| format!("Failed to create TLS config: {e}"))?
        .with_root_certificates(rustls::RootCertStore::empty())
        .with_no_client_auth())
}

fn truncate_for_log(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > ERROR_BODY_LOG_LIMIT {
        let head: String = text.chars().take(ERROR_BODY_LOG_LIMIT).collect();
        format!("{head}...")
    } else {
        text.into_owned()
    }
}

/// 写真検索クライアントトレイト（テスト用モック対応）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoSearchClientTrait: Send + Sync {
    /// 写真を検索
    ///
    /// 401 は `SearchError::Unauthorized`、それ以外の非 2xx は `SearchError::Api` を返す。
    async fn search_photos(
        &self,
        access_key: &str,
        params: &SearchParams,
    ) -> SearchResult<UnsplashSearchResponse>;
}

/// Unsplash クライアント実装
pub struct UnsplashClient {
    endpoint: String,
    http_client: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl UnsplashClient {
    /// 新しい Unsplash クライアントを作成
    ///
    /// エンドポイントは http / https どちらも受け付ける（テスト時のモックサーバー向け）。
    pub fn new(endpoint: impl Into<String>) -> Result<Self, String> {
        let builder = match hyper_rustls::HttpsConnectorBuilder::new().with_native_roots() {
            Ok(builder) => builder,
            Err(e) => {
                // ルート証明書なし: http のエンドポイントのみ利用可能
                log::warn!("Failed to load native root certificates: {e}");
                hyper_rustls::HttpsConnectorBuilder::new().with_tls_config(empty_tls_config()?)
            }
        };
        let https = builder.https_or_http().enable_http1().build();

        let http_client = Client::builder(TokioExecutor::new()).build(https);
        let endpoint = endpoint.into();

        log::info!("UnsplashClient created with endpoint: {}", endpoint);

        Ok(Self {
            endpoint,
            http_client,
        })
    }
}

#[async_trait]
impl PhotoSearchClientTrait for UnsplashClient {
    async fn search_photos(
        &self,
        access_key: &str,
        params: &SearchParams,
    ) -> SearchResult<UnsplashSearchResponse> {
        log::info!(
            "Searching photos (query length: {} chars, color: {:?}, orientation: {:?})",
            params.query.len(),
            params.color,
            params.orientation
        );

        let url = build_search_url(&self.endpoint, access_key, params)?;
        log::debug!("Unsplash URL: {}", redact_access_key(&url));

        let req = Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .header("Accept", "application/json")
            .header("Accept-Version", "v1")
            .body(Full::new(Bytes::new()))
            .map_err(|e| SearchError::Transport(format!("Failed to build request: {e}")))?;

        let response = self
            .http_client
            .request(req)
            .await
            .map_err(|e| SearchError::Transport(format!("Failed to send request to Unsplash: {e}")))?;

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| SearchError::Transport(format!("Failed to read response body: {e}")))?
            .to_bytes();

        if !status.is_success() {
            log::error!(
                "Unsplash API error (status {}), response body: {}",
                status,
                truncate_for_log(&body_bytes)
            );

            if status == StatusCode::UNAUTHORIZED {
                return Err(SearchError::Unauthorized);
            }
            return Err(SearchError::Api {
                status: status.as_u16(),
            });
        }

        let response: UnsplashSearchResponse = serde_json::from_slice(&body_bytes)?;

        log::info!(
            "Unsplash returned {} photo(s) of {} total",
            response.results.as_ref().map_or(0, Vec::len),
            response.total
        );
        Ok(response)
    }
}
