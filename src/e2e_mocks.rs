//! E2E テスト用の外部APIモック
//!
//! 環境変数 PSA_E2E_MOCK=1 が設定されている場合、Unsplash の実際のAPI呼び出しと
//! OS のセキュアストレージをモックに置き換え、CIやローカルE2Eで外部依存なしにテスト可能にする。

use async_trait::async_trait;

use crate::error::{SearchError, SearchResult};
use crate::unsplash::client::{
    PhotoLinks, PhotoSearchClientTrait, PhotoUrls, PhotoUser, SearchParams, UnsplashClient,
    UnsplashPhoto, UnsplashSearchResponse, UserLinks,
};

/// E2E モード時にメモリストアへ事前投入するアクセスキー
pub const E2E_MOCK_ACCESS_KEY: &str = "e2e-mock-access-key";

/// この検索語に対しては 0 件を返す（空結果の確認用）
pub const E2E_EMPTY_QUERY: &str = "e2e-empty";

/// E2E用 Unsplash モック（ダミー写真を返す）
pub struct E2EMockPhotoSearchClient;

#[async_trait]
impl PhotoSearchClientTrait for E2EMockPhotoSearchClient {
    async fn search_photos(
        &self,
        access_key: &str,
        params: &SearchParams,
    ) -> SearchResult<UnsplashSearchResponse> {
        log::info!(
            "[E2E Mock] Unsplash search_photos: query={}, color={:?}, orientation={:?}",
            params.query,
            params.color,
            params.orientation
        );

        if access_key != E2E_MOCK_ACCESS_KEY {
            return Err(SearchError::Unauthorized);
        }
        if params.query == E2E_EMPTY_QUERY {
            return Ok(UnsplashSearchResponse {
                total: 0,
                total_pages: 0,
                results: Some(vec![]),
            });
        }

        let photos = (1..=3)
            .map(|i| UnsplashPhoto {
                id: format!("e2e-mock-{i}"),
                // 3件目は説明なし（Untitled の確認用）
                description: (i == 1).then(|| format!("E2E Mock Photo {i}")),
                alt_description: (i == 2).then(|| format!("e2e mock photo {i}")),
                urls: PhotoUrls {
                    regular: format!("https://example.com/e2e-mock-photo-{i}.jpg"),
                    thumb: format!("https://example.com/e2e-mock-thumb-{i}.jpg"),
                },
                user: PhotoUser {
                    name: "E2E Photographer".to_string(),
                    links: UserLinks {
                        html: "https://example.com/@e2e".to_string(),
                    },
                },
                links: PhotoLinks {
                    download_location: format!("https://example.com/e2e-mock-photo-{i}/download"),
                },
            })
            .collect();

        Ok(UnsplashSearchResponse {
            total: 3,
            total_pages: 1,
            results: Some(photos),
        })
    }
}

/// 環境変数 PSA_E2E_MOCK が設定されているか
pub fn is_e2e_mock_mode() -> bool {
    std::env::var("PSA_E2E_MOCK").as_deref() == Ok("1")
}

/// Unsplash クライアントの E2E 対応ラッパー（実機 or モックを切り替え）
pub enum PhotoSearchClientForE2E {
    Real(UnsplashClient),
    Mock(E2EMockPhotoSearchClient),
}

#[async_trait]
impl PhotoSearchClientTrait for PhotoSearchClientForE2E {
    async fn search_photos(
        &self,
        access_key: &str,
        params: &SearchParams,
    ) -> SearchResult<UnsplashSearchResponse> {
        match self {
            Self::Real(c) => c.search_photos(access_key, params).await,
            Self::Mock(m) => m.search_photos(access_key, params).await,
        }
    }
}
