use serde::{Deserialize, Serialize};

use crate::mcp::McpBinding;
use crate::store::StoreError;

/// 一個可供對話工作台選用的智能體定義。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// 唯一識別碼。
    pub id: String,
    /// 顯示名稱。
    pub name: String,
    /// 一句話描述，列表卡片上顯示。
    pub description: String,
    /// 版本標籤，例如 `v1.2.4`。
    pub version: String,
    /// 是否啟用。停用的智能體不出現在對話工作台的選單裡。
    pub enabled: bool,
    /// 系統提示詞。可能包含分階段的 CoT 指令，供流程圖預覽使用。
    pub prompt: String,
    /// 主對話模型。
    pub model: String,
    /// 取樣溫度，0.0–1.0。
    pub temperature: f32,
    /// 技能挑選所用的模型。
    #[serde(default)]
    pub skill_selection_model: String,
    /// 會話標題生成所用的模型。
    #[serde(default)]
    pub title_generation_model: String,
    /// 掛載的 MCP 連接器綁定，依優先級排序。
    #[serde(default)]
    pub mcp_bindings: Vec<McpBinding>,
    /// 建立日期（YYYY-MM-DD）。
    pub created_at: String,
    /// 最近更新日期（YYYY-MM-DD）。
    pub updated_at: String,
}

impl AgentDefinition {
    /// 列表搜尋用：名稱或描述包含關鍵字（不分大小寫）即命中。
    pub fn matches(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// 編輯抽屜的表單狀態。欄位全部是字串，提交時才轉型與校驗。
#[derive(Debug, Clone, Default)]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    pub version: String,
    pub enabled: bool,
    pub prompt: String,
    pub model: String,
    pub temperature: String,
    pub skill_selection_model: String,
    pub title_generation_model: String,
    pub mcp_bindings: Vec<McpBinding>,
}

impl AgentDraft {
    /// 以既有定義填充表單（編輯模式）。
    pub fn from_definition(agent: &AgentDefinition) -> Self {
        Self {
            name: agent.name.clone(),
            description: agent.description.clone(),
            version: agent.version.clone(),
            enabled: agent.enabled,
            prompt: agent.prompt.clone(),
            model: agent.model.clone(),
            temperature: format!("{}", agent.temperature),
            skill_selection_model: agent.skill_selection_model.clone(),
            title_generation_model: agent.title_generation_model.clone(),
            mcp_bindings: agent.mcp_bindings.clone(),
        }
    }

    /// 建立模式的預設表單。
    pub fn for_create() -> Self {
        Self {
            version: String::from("v1.0"),
            enabled: true,
            model: String::from("gpt-4"),
            temperature: String::from("0.7"),
            skill_selection_model: String::from("gpt-4"),
            title_generation_model: String::from("gpt-3.5-turbo"),
            ..Self::default()
        }
    }

    /// 逐欄校驗並回傳解析後的溫度。第一個未通過的欄位決定錯誤訊息，
    /// 與原後台「一次提示一個問題」的行為一致。
    pub fn validate(&self) -> Result<f32, StoreError> {
        if self.name.trim().is_empty() {
            return Err(StoreError::invalid("请输入智能体名称"));
        }
        if self.model.trim().is_empty() {
            return Err(StoreError::invalid("请选择对话模型"));
        }
        let temperature: f32 = self
            .temperature
            .trim()
            .parse()
            .map_err(|_| StoreError::invalid("温度必须是数字"))?;
        if !(0.0..=1.0).contains(&temperature) {
            return Err(StoreError::invalid("温度必须在 0.0 到 1.0 之间"));
        }
        Ok(temperature)
    }
}

/// 模型選單裡的一個可選項。
#[derive(Debug, Clone, Copy)]
pub struct ModelOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// 後台可選的對話模型列表。
pub fn available_models() -> &'static [ModelOption] {
    const AVAILABLE_MODELS: &[ModelOption] = &[
        ModelOption {
            id: "gpt-4",
            name: "GPT-4",
            description: "OpenAI 最强大的模型",
        },
        ModelOption {
            id: "gpt-4-turbo",
            name: "GPT-4 Turbo",
            description: "快速版 GPT-4",
        },
        ModelOption {
            id: "gpt-3.5-turbo",
            name: "GPT-3.5 Turbo",
            description: "快速响应，成本更低",
        },
        ModelOption {
            id: "claude-3",
            name: "Claude 3",
            description: "Anthropic Claude 3",
        },
        ModelOption {
            id: "claude-3-opus",
            name: "Claude 3 Opus",
            description: "最强大的 Claude 模型",
        },
        ModelOption {
            id: "deepseek-v3",
            name: "DeepSeek V3",
            description: "DeepSeek 最新模型",
        },
    ];
    AVAILABLE_MODELS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_validation_reports_first_problem() {
        let mut draft = AgentDraft::for_create();
        assert_eq!(
            draft.validate(),
            Err(StoreError::invalid("请输入智能体名称"))
        );

        draft.name = String::from("运维专家");
        draft.temperature = String::from("abc");
        assert_eq!(draft.validate(), Err(StoreError::invalid("温度必须是数字")));

        draft.temperature = String::from("1.5");
        assert_eq!(
            draft.validate(),
            Err(StoreError::invalid("温度必须在 0.0 到 1.0 之间"))
        );

        draft.temperature = String::from("0.5");
        assert_eq!(draft.validate(), Ok(0.5));
    }

    #[test]
    fn search_matches_name_and_description_case_insensitively() {
        let agent = AgentDefinition {
            id: String::from("1"),
            name: String::from("BKLite ITSM 助手"),
            description: String::from("专注于 IT 服务管理的智能助手"),
            version: String::from("v1.0"),
            enabled: true,
            prompt: String::new(),
            model: String::from("gpt-4"),
            temperature: 0.7,
            skill_selection_model: String::new(),
            title_generation_model: String::new(),
            mcp_bindings: Vec::new(),
            created_at: String::from("2026-01-15"),
            updated_at: String::from("2026-02-01"),
        };
        assert!(agent.matches("itsm"));
        assert!(agent.matches("服务管理"));
        assert!(agent.matches(""));
        assert!(!agent.matches("知识库"));
    }
}
