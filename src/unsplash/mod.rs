//! Unsplash 写真検索モジュール
//!
//! # セキュリティガイドライン
//! このモジュールは Unsplash API を使用して写真を検索します。
//! 以下のルールを厳守してください：
//!
//! - **アクセスキーのログ出力禁止**: アクセスキーは絶対にログに出力しないこと
//! - **送信内容の限定**: API に送るのは検索語とフィルタのみ
//! - **エラー詳細の分離**: ステータスコードやエラーボディは運用ログにのみ残す

pub mod client;

pub use client::{
    build_search_url, redact_access_key, PhotoSearchClientTrait, SearchParams, UnsplashClient,
    UnsplashPhoto, UnsplashSearchResponse, DEFAULT_SEARCH_ENDPOINT, PER_PAGE,
};
