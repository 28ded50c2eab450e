use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 控制台設定，從工作目錄的 `config/console.toml` 載入。
/// 檔案不存在時使用預設值，不視為錯誤。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// 介面語言。
    #[serde(default)]
    pub language: LanguageChoice,
    /// 主迴圈的 tick 間隔（毫秒）。
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// 日誌檔路徑，相對路徑按工作目錄解析。
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

/// 可選的介面語言。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageChoice {
    #[default]
    SimplifiedChinese,
    English,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_log_file() -> PathBuf {
    PathBuf::from("logs/agentdesk.log")
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            language: LanguageChoice::default(),
            tick_rate_ms: default_tick_rate_ms(),
            log_file: default_log_file(),
        }
    }
}

impl ConsoleSettings {
    /// 從工作目錄讀取設定。
    pub fn load(workspace_root: &Path) -> Result<Self> {
        let config_path = workspace_root.join("config/console.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&config_path)
            .with_context(|| format!("读取控制台配置失败: {}", config_path.display()))?;
        let mut parsed: ConsoleSettings = toml::from_str(&raw)
            .with_context(|| format!("解析控制台配置失败: {}", config_path.display()))?;
        if parsed.log_file.is_relative() {
            parsed.log_file = workspace_root.join(&parsed.log_file);
        }
        Ok(parsed)
    }

    /// 把當前設定寫回 `config/console.toml`。
    pub fn save_to_file(&self, workspace_root: &Path) -> Result<()> {
        let config_dir = workspace_root.join("config");
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("建立配置目录失败: {}", config_dir.display()))?;
        }
        let config_path = config_dir.join("console.toml");
        let serialized = toml::to_string_pretty(self).context("序列化控制台配置失败")?;
        fs::write(&config_path, serialized)
            .with_context(|| format!("写入控制台配置失败: {}", config_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: ConsoleSettings = toml::from_str("language = \"english\"").expect("parses");
        assert_eq!(parsed.language, LanguageChoice::English);
        assert_eq!(parsed.tick_rate_ms, 250);
        assert_eq!(parsed.log_file, PathBuf::from("logs/agentdesk.log"));

        let empty: ConsoleSettings = toml::from_str("").expect("parses");
        assert_eq!(empty.language, LanguageChoice::SimplifiedChinese);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let settings = ConsoleSettings {
            language: LanguageChoice::English,
            tick_rate_ms: 100,
            log_file: PathBuf::from("/tmp/agentdesk.log"),
        };
        let serialized = toml::to_string_pretty(&settings).expect("serializes");
        let parsed: ConsoleSettings = toml::from_str(&serialized).expect("parses back");
        assert_eq!(parsed.language, settings.language);
        assert_eq!(parsed.tick_rate_ms, 100);
    }
}
