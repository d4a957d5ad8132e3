//! エージェント定義（静的な設定ドキュメント）
//!
//! プロンプト・会話の書き出し例・アクション一覧は `agent.json` に宣言的に記述し、
//! バイナリに埋め込む。ロジックは持たず、オーケストレーション層が読み取るだけ。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BUILTIN_MANIFEST: &str = include_str!("../agent.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentManifest {
    pub key: String,
    pub name: String,
    pub description: String,
    pub prompt: String,
    #[serde(default)]
    pub conversation_starters: Vec<String>,
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
}

/// エージェントが呼び出せるアクション
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDefinition {
    pub key: String,
    /// 実行する関数のキー（`dispatch::FunctionKey` と対応）
    pub function: String,
    pub name: String,
    pub description: String,
    pub action_verb: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, ActionInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionInput {
    pub title: String,
    #[serde(rename = "type")]
    pub input_type: String,
    #[serde(default)]
    pub required: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

impl AgentManifest {
    /// 埋め込みの定義を読み込む
    pub fn builtin() -> Result<Self, String> {
        Self::from_json(BUILTIN_MANIFEST)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid agent manifest: {e}"))
    }

    pub fn action(&self, key: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|a| a.key == key)
    }
}

impl ActionDefinition {
    /// 必須入力のキー一覧
    pub fn required_inputs(&self) -> Vec<&str> {
        self.inputs
            .iter()
            .filter(|(_, input)| input.required)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
