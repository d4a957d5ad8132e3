use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use photo_search_agent::agent::AgentManifest;
use photo_search_agent::dispatch::FunctionKey;
use photo_search_agent::{build_dispatcher, config, init_logger};

#[derive(Parser)]
#[command(name = "photo-search-agent", version, about = "Photo search agent functions")]
struct Cli {
    /// 設定ディレクトリ（省略時は OS の設定ディレクトリ）
    #[arg(long, env = "PSA_CONFIG_DIR", global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 関数を呼び出し、応答を JSON で出力
    Invoke {
        /// search-photos / save-access-key / get-access-key-status
        function: String,
        /// JSON ペイロード（省略時は標準入力から読む）
        payload: Option<String>,
    },
    /// エージェント定義を出力
    Manifest,
    /// 有効な設定を出力
    Config,
}

fn read_payload(arg: Option<String>) -> Result<serde_json::Value, String> {
    let raw = match arg {
        Some(raw) => raw,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read payload from stdin: {e}"))?;
            buf
        }
    };

    if raw.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&raw).map_err(|e| format!("Invalid JSON payload: {e}"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize output: {e}"))?;
    println!("{text}");
    Ok(())
}

async fn run(cli: Cli) -> Result<(), String> {
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => config::default_config_dir()?,
    };

    match cli.command {
        Command::Invoke { function, payload } => {
            let key: FunctionKey = function.parse()?;
            let payload = read_payload(payload)?;
            let app_config = config::load(&config_dir)?;
            let dispatcher = build_dispatcher(&app_config)?;
            let response = dispatcher.invoke(key, payload).await?;
            print_json(&response)
        }
        Command::Manifest => print_json(&AgentManifest::builtin()?),
        Command::Config => print_json(&config::load(&config_dir)?),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
