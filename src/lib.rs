use std::io::Write;
use std::sync::{Arc, Once};

pub mod agent;
pub mod config;
pub mod dispatch;
pub mod e2e_mocks;
pub mod error;
pub mod logic;
pub mod secrets;
pub mod unsplash;

use crate::config::{AppConfig, SecretBackend};
use crate::dispatch::Dispatcher;
use crate::e2e_mocks::{
    is_e2e_mock_mode, E2EMockPhotoSearchClient, PhotoSearchClientForE2E, E2E_MOCK_ACCESS_KEY,
};
use crate::secrets::{KeyringSecretStore, MemorySecretStore, SecretStore, ACCESS_KEY_SECRET};
use crate::unsplash::UnsplashClient;

static LOGGER_INIT: Once = Once::new();

/// ロガーを初期化
///
/// リリースビルドでは Warn 以上、デバッグビルドでは Info 以上を出力する。
/// RUST_LOG が設定されていればそちらを優先する。
/// 複数回呼び出しても安全（2回目以降は何もしない）。
pub fn init_logger() {
    LOGGER_INIT.call_once(|| {
        #[cfg(debug_assertions)]
        let default_level = log::LevelFilter::Info;
        #[cfg(not(debug_assertions))]
        let default_level = log::LevelFilter::Warn;

        let _ = env_logger::Builder::new()
            .filter_level(default_level)
            .parse_default_env()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{} {:5} {}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .target(env_logger::Target::Stderr)
            .try_init();
    });
}

/// 設定からシークレットストアを作成
pub fn build_secret_store(config: &AppConfig) -> Arc<dyn SecretStore> {
    if is_e2e_mock_mode() {
        log::info!("Using E2E mock secret store");
        return Arc::new(MemorySecretStore::with_secret(
            ACCESS_KEY_SECRET,
            E2E_MOCK_ACCESS_KEY,
        ));
    }

    match config.secrets.backend {
        SecretBackend::Keyring => {
            log::info!(
                "Using keyring secret store (service: {})",
                config.secrets.service_name
            );
            Arc::new(KeyringSecretStore::new(config.secrets.service_name.clone()))
        }
        SecretBackend::Memory => {
            log::warn!("Using in-memory secret store; saved access keys are lost on exit");
            Arc::new(MemorySecretStore::new())
        }
    }
}

/// 設定から写真検索クライアントを作成
pub fn build_photo_client(config: &AppConfig) -> Result<PhotoSearchClientForE2E, String> {
    if is_e2e_mock_mode() {
        log::info!("Using E2E mock Unsplash client");
        return Ok(PhotoSearchClientForE2E::Mock(E2EMockPhotoSearchClient));
    }
    UnsplashClient::new(config.unsplash.endpoint.clone()).map(PhotoSearchClientForE2E::Real)
}

/// 設定からディスパッチャーを組み立てる
pub fn build_dispatcher(config: &AppConfig) -> Result<Dispatcher, String> {
    let store = build_secret_store(config);
    let client = build_photo_client(config)?;
    Ok(Dispatcher::new(store, Arc::new(client)))
}
