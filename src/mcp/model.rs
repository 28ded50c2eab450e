use std::env;

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// 一個已登記的 MCP 連接器。欄位命名對齊後端介面（`beartoken` 等）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct McpConnector {
    /// 唯一識別碼。
    pub id: String,
    /// 顯示名稱。
    pub name: String,
    /// 一句話描述。
    pub description: String,
    /// 連接器端點 URL。
    pub url: String,
    /// 直接填寫的 Bearer 憑證。
    #[serde(default)]
    pub beartoken: String,
    /// 憑證改由環境變數提供時的變數名，優先級低於 `beartoken`。
    #[serde(default)]
    pub beartoken_env: Option<String>,
    /// 是否啟用。
    pub enabled: bool,
    /// 建立時間（ISO 8601）。
    #[serde(default)]
    pub created_at: String,
    /// 最近更新時間（ISO 8601）。
    #[serde(default)]
    pub updated_at: String,
}

impl McpConnector {
    /// 解析最終使用的憑證：`beartoken` 欄位優先，否則讀環境變數。
    pub fn resolved_beartoken(&self) -> Option<String> {
        if !self.beartoken.trim().is_empty() {
            return Some(self.beartoken.clone());
        }
        self.beartoken_env
            .as_ref()
            .and_then(|var| env::var(var).ok())
            .filter(|value| !value.trim().is_empty())
    }

    pub fn matches(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// 智能體 ↔ 連接器的掛載綁定。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct McpBinding {
    /// 目標連接器（或模板）識別碼。
    pub connector_id: String,
    /// 顯示名稱快照，列表直接顯示、不反查儲存。
    pub connector_name: String,
    /// 已啟用的工具，空列表表示全部停用（預設不勾選任何工具）。
    #[serde(default)]
    pub enabled_tools: Vec<String>,
    /// 呼叫優先級，從 1 起算，數字越小越優先。
    pub priority: u32,
}

/// 連接器設定抽屜的表單狀態。
#[derive(Debug, Clone, Default)]
pub struct McpDraft {
    pub name: String,
    pub description: String,
    pub url: String,
    pub beartoken: String,
    pub enabled: bool,
}

impl McpDraft {
    pub fn from_connector(connector: &McpConnector) -> Self {
        Self {
            name: connector.name.clone(),
            description: connector.description.clone(),
            url: connector.url.clone(),
            beartoken: connector.beartoken.clone(),
            enabled: connector.enabled,
        }
    }

    pub fn for_create() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::invalid("请输入连接器名称"));
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err(StoreError::invalid("请输入连接器地址"));
        }
        if !url.contains("://") {
            return Err(StoreError::invalid("连接器地址需要包含协议前缀"));
        }
        Ok(())
    }
}

/// 掛載選單裡的一個系統連接器模板，附帶其可勾選的工具清單。
#[derive(Debug, Clone, Copy)]
pub struct McpTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
    pub available_tools: &'static [&'static str],
}

/// 可掛載到智能體上的系統連接器目錄。
pub fn connector_templates() -> &'static [McpTemplate] {
    const TEMPLATES: &[McpTemplate] = &[
        McpTemplate {
            id: "mcp_database",
            name: "数据库连接器",
            url: "https://api.example.com/mcp/database",
            description: "提供 MySQL 数据库的查询、管理和监控能力",
            available_tools: &["query", "insert", "update", "delete", "execute"],
        },
        McpTemplate {
            id: "mcp_ldap",
            name: "LDAP 目录服务",
            url: "ldap://ldap.company.com",
            description: "企业用户目录查询和群组管理",
            available_tools: &[
                "query_user",
                "create_group",
                "add_member",
                "remove_member",
                "search",
            ],
        },
        McpTemplate {
            id: "mcp_exchange",
            name: "Exchange 邮件服务",
            url: "https://exchange.company.com/api",
            description: "邮箱创建和分发列表管理",
            available_tools: &[
                "create_mailbox",
                "create_distribution_list",
                "add_to_list",
                "get_mailbox_info",
            ],
        },
        McpTemplate {
            id: "mcp_file_system",
            name: "文件系统访问",
            url: "file://local",
            description: "本地文件系统读写操作",
            available_tools: &[
                "read_file",
                "write_file",
                "list_directory",
                "create_directory",
                "delete_file",
            ],
        },
        McpTemplate {
            id: "mcp_slack",
            name: "Slack 集成",
            url: "https://slack.com/api",
            description: "Slack 消息发送和频道管理",
            available_tools: &[
                "send_message",
                "create_channel",
                "invite_user",
                "get_channel_info",
            ],
        },
    ];
    TEMPLATES
}

/// 以模板建立一條新的綁定：預設不啟用任何工具，優先級排在現有綁定之後。
pub fn binding_from_template(template: &McpTemplate, existing: usize) -> McpBinding {
    McpBinding {
        connector_id: template.id.to_string(),
        connector_name: template.name.to_string(),
        enabled_tools: Vec::new(),
        priority: existing as u32 + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beartoken_field_takes_precedence_over_env() {
        let mut connector = McpConnector {
            id: String::from("1"),
            name: String::from("数据库连接器"),
            description: String::new(),
            url: String::from("https://api.example.com/mcp/database"),
            beartoken: String::from("token-a"),
            beartoken_env: Some(String::from("AGENTDESK_TEST_TOKEN_UNSET")),
            enabled: true,
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert_eq!(connector.resolved_beartoken().as_deref(), Some("token-a"));

        connector.beartoken.clear();
        assert_eq!(connector.resolved_beartoken(), None);
    }

    #[test]
    fn draft_validation_requires_name_and_scheme() {
        let mut draft = McpDraft::for_create();
        assert!(draft.validate().is_err());
        draft.name = String::from("数据库连接器");
        draft.url = String::from("api.example.com");
        assert_eq!(
            draft.validate(),
            Err(StoreError::invalid("连接器地址需要包含协议前缀"))
        );
        draft.url = String::from("https://api.example.com/mcp/database");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn template_binding_starts_with_no_tools() {
        let template = &connector_templates()[0];
        let binding = binding_from_template(template, 2);
        assert_eq!(binding.connector_id, "mcp_database");
        assert!(binding.enabled_tools.is_empty());
        assert_eq!(binding.priority, 3);
    }
}
