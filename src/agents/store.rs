use log::info;

use super::model::{AgentDefinition, AgentDraft};
use crate::store::StoreError;

/// 智能體的記憶體儲存。
///
/// 啟動時以種子資料填充，之後的增改與啟停只存在於當前行程。
pub struct AgentStore {
    agents: Vec<AgentDefinition>,
    next_id: u64,
}

impl AgentStore {
    /// 建立帶種子資料的儲存。
    pub fn with_seed_data() -> Self {
        let agents = seed_agents();
        let next_id = agents.len() as u64 + 1;
        Self { agents, next_id }
    }

    pub fn all(&self) -> &[AgentDefinition] {
        &self.agents
    }

    /// 啟用中的智能體（對話工作台的選單來源）。
    pub fn enabled(&self) -> Vec<&AgentDefinition> {
        self.agents.iter().filter(|agent| agent.enabled).collect()
    }

    /// 關鍵字過濾後的索引列表，保持原始順序。
    pub fn search(&self, query: &str) -> Vec<usize> {
        self.agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.matches(query))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&AgentDefinition> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&AgentDefinition> {
        self.agents.get(index)
    }

    /// 切換啟停狀態，回傳新的狀態。
    pub fn toggle_enabled(&mut self, id: &str) -> Result<bool, StoreError> {
        let agent = self
            .agents
            .iter_mut()
            .find(|agent| agent.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        agent.enabled = !agent.enabled;
        info!("agent {} enabled={}", agent.name, agent.enabled);
        Ok(agent.enabled)
    }

    /// 以表單建立新的智能體，回傳分配到的識別碼。
    pub fn create(&mut self, draft: &AgentDraft, today: &str) -> Result<String, StoreError> {
        let temperature = draft.validate()?;
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.agents.push(materialize(draft, temperature, &id, today, today));
        info!("agent created: {id}");
        Ok(id)
    }

    /// 以表單覆寫既有智能體，保留建立日期並刷新更新日期。
    pub fn update(&mut self, id: &str, draft: &AgentDraft, today: &str) -> Result<(), StoreError> {
        let temperature = draft.validate()?;
        let agent = self
            .agents
            .iter_mut()
            .find(|agent| agent.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        let created_at = agent.created_at.clone();
        *agent = materialize(draft, temperature, id, &created_at, today);
        info!("agent updated: {id}");
        Ok(())
    }
}

fn materialize(
    draft: &AgentDraft,
    temperature: f32,
    id: &str,
    created_at: &str,
    updated_at: &str,
) -> AgentDefinition {
    AgentDefinition {
        id: id.to_string(),
        name: draft.name.trim().to_string(),
        description: draft.description.trim().to_string(),
        version: draft.version.trim().to_string(),
        enabled: draft.enabled,
        prompt: draft.prompt.clone(),
        model: draft.model.clone(),
        temperature,
        skill_selection_model: draft.skill_selection_model.clone(),
        title_generation_model: draft.title_generation_model.clone(),
        mcp_bindings: draft.mcp_bindings.clone(),
        created_at: created_at.to_string(),
        updated_at: updated_at.to_string(),
    }
}

/// 後台預置的智能體。
fn seed_agents() -> Vec<AgentDefinition> {
    let plain = |id: &str,
                 name: &str,
                 description: &str,
                 version: &str,
                 enabled: bool,
                 prompt: &str,
                 model: &str,
                 temperature: f32,
                 skill_model: &str,
                 created: &str,
                 updated: &str| AgentDefinition {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        version: version.to_string(),
        enabled,
        prompt: prompt.to_string(),
        model: model.to_string(),
        temperature,
        skill_selection_model: skill_model.to_string(),
        title_generation_model: String::from("gpt-3.5-turbo"),
        mcp_bindings: Vec::new(),
        created_at: created.to_string(),
        updated_at: updated.to_string(),
    };

    vec![
        plain(
            "1",
            "BKLite ITSM 助手",
            "专注于 IT 服务管理的智能助手，可处理工单、服务请求等场景",
            "v1.2.4",
            true,
            "你是 BKLite ITSM 助手，专注于帮助用户解决 IT 服务管理相关问题。\n\
             Phase 1 - 开场白: 问候用户并确认诉求\n\
             Phase 2 - 信息收集:\n\
             - 确认工号与部门\n\
             - 确认问题分类\n\
             Phase 3 - 处理: 给出解决步骤或转交工单",
            "gpt-4",
            0.7,
            "gpt-4",
            "2026-01-15",
            "2026-02-01",
        ),
        plain(
            "2",
            "运维专家",
            "专业的运维技术支持助手，擅长监控告警、故障排查",
            "v1.0",
            true,
            "你是运维专家，专注于帮助用户处理运维相关的技术问题...",
            "gpt-4",
            0.5,
            "gpt-3.5-turbo",
            "2026-01-20",
            "2026-01-28",
        ),
        plain(
            "3",
            "知识库助手",
            "智能知识检索与文档管理助手，支持多格式文档处理",
            "v2.1",
            false,
            "你是知识库助手，帮助用户快速检索和管理知识文档...",
            "claude-3",
            0.3,
            "gpt-4",
            "2026-01-10",
            "2026-01-26",
        ),
        plain(
            "4",
            "代码审查助手",
            "自动化代码审查和优化建议，支持多种编程语言",
            "v0.9-beta",
            false,
            "你是代码审查助手，帮助用户进行代码审查并提供优化建议...",
            "gpt-4",
            0.2,
            "gpt-4",
            "2026-01-25",
            "2026-01-30",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_data_is_present_and_ordered() {
        let store = AgentStore::with_seed_data();
        assert_eq!(store.all().len(), 4);
        assert_eq!(store.all()[0].name, "BKLite ITSM 助手");
        assert_eq!(store.enabled().len(), 2);
    }

    #[test]
    fn search_filters_by_keyword() {
        let store = AgentStore::with_seed_data();
        assert_eq!(store.search(""), vec![0, 1, 2, 3]);
        assert_eq!(store.search("运维"), vec![1]);
        assert!(store.search("不存在的关键字").is_empty());
    }

    #[test]
    fn toggle_flips_enabled_state() {
        let mut store = AgentStore::with_seed_data();
        assert_eq!(store.toggle_enabled("3"), Ok(true));
        assert_eq!(store.enabled().len(), 3);
        assert_eq!(
            store.toggle_enabled("99"),
            Err(StoreError::not_found("99"))
        );
    }

    #[test]
    fn create_assigns_sequential_ids_and_update_keeps_created_at() {
        let mut store = AgentStore::with_seed_data();
        let mut draft = AgentDraft::for_create();
        draft.name = String::from("新助手");
        let id = store.create(&draft, "2026-02-06").expect("valid draft");
        assert_eq!(id, "5");
        assert_eq!(store.get("5").map(|a| a.created_at.as_str()), Some("2026-02-06"));

        draft.description = String::from("更新过的描述");
        store.update(&id, &draft, "2026-02-07").expect("update ok");
        let agent = store.get("5").expect("still present");
        assert_eq!(agent.created_at, "2026-02-06");
        assert_eq!(agent.updated_at, "2026-02-07");
        assert_eq!(agent.description, "更新过的描述");

        draft.name.clear();
        assert!(store.update(&id, &draft, "2026-02-07").is_err());
    }
}
