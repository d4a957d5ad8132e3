//! 写真検索アクションのエラー分類
//!
//! どのエラーも呼び出し元（エージェント・エンドユーザー）には `user_message()` の
//! 安全なメッセージだけを返す。ステータスコードやレスポンスボディ等の詳細はログにのみ出力する。

use thiserror::Error;

/// アクセスキー未設定時のメッセージ
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Unsplash access key is not configured. Please ask your administrator to set it up in the app settings.";

/// 検索クエリが空の場合のメッセージ
pub const QUERY_REQUIRED_MESSAGE: &str = "Search query is required";

/// 401 応答時のメッセージ
pub const INVALID_ACCESS_KEY_MESSAGE: &str =
    "Invalid Unsplash access key. Please contact your administrator.";

/// 通信・パース失敗などの想定外エラー時のメッセージ
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to search photos. Please try again later.";

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Unsplash access key is not configured")]
    NotConfigured,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsplash rejected the access key (status 401)")]
    Unauthorized,

    #[error("Unsplash API error: {status}")]
    Api { status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to parse Unsplash response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Secret store error: {0}")]
    SecretStore(String),

    #[error("Invalid search endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl SearchError {
    /// ユーザー向けメッセージ（内部の詳細は含めない）
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
            Self::InvalidInput(message) => message.clone(),
            Self::Unauthorized => INVALID_ACCESS_KEY_MESSAGE.to_string(),
            Self::Api { status } => format!("Unsplash API error: {status}"),
            Self::Transport(_) | Self::Parse(_) | Self::SecretStore(_) | Self::Endpoint(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// 運用者向けに error レベルで記録すべきか（未設定・入力不備は warn 扱い）
    pub fn is_fault(&self) -> bool {
        !matches!(self, Self::NotConfigured | Self::InvalidInput(_))
    }
}

pub type SearchResult<T> = Result<T, SearchError>;
