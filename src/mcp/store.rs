use log::info;

use super::model::{McpConnector, McpDraft};
use crate::store::StoreError;

/// MCP 連接器的記憶體儲存。
pub struct McpStore {
    connectors: Vec<McpConnector>,
    next_id: u64,
}

impl McpStore {
    pub fn with_seed_data() -> Self {
        let connectors = seed_connectors();
        let next_id = connectors.len() as u64 + 1;
        Self {
            connectors,
            next_id,
        }
    }

    pub fn all(&self) -> &[McpConnector] {
        &self.connectors
    }

    pub fn search(&self, query: &str) -> Vec<usize> {
        self.connectors
            .iter()
            .enumerate()
            .filter(|(_, connector)| connector.matches(query))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&McpConnector> {
        self.connectors.iter().find(|connector| connector.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&McpConnector> {
        self.connectors.get(index)
    }

    pub fn toggle_enabled(&mut self, id: &str) -> Result<bool, StoreError> {
        let connector = self
            .connectors
            .iter_mut()
            .find(|connector| connector.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        connector.enabled = !connector.enabled;
        info!("mcp {} enabled={}", connector.name, connector.enabled);
        Ok(connector.enabled)
    }

    /// 新連接器依序分配識別碼，時間戳由呼叫方提供。
    pub fn create(&mut self, draft: &McpDraft, now: &str) -> Result<String, StoreError> {
        draft.validate()?;
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.connectors.push(McpConnector {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
            url: draft.url.trim().to_string(),
            beartoken: draft.beartoken.clone(),
            beartoken_env: None,
            enabled: draft.enabled,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        });
        info!("mcp connector created: {id}");
        Ok(id)
    }

    pub fn update(&mut self, id: &str, draft: &McpDraft, now: &str) -> Result<(), StoreError> {
        draft.validate()?;
        let connector = self
            .connectors
            .iter_mut()
            .find(|connector| connector.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        connector.name = draft.name.trim().to_string();
        connector.description = draft.description.trim().to_string();
        connector.url = draft.url.trim().to_string();
        connector.beartoken = draft.beartoken.clone();
        connector.enabled = draft.enabled;
        connector.updated_at = now.to_string();
        info!("mcp connector updated: {id}");
        Ok(())
    }

    /// 刪除連接器。呼叫方負責先徵求使用者確認。
    pub fn remove(&mut self, id: &str) -> Result<McpConnector, StoreError> {
        let position = self
            .connectors
            .iter()
            .position(|connector| connector.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        let removed = self.connectors.remove(position);
        info!("mcp connector removed: {}", removed.name);
        Ok(removed)
    }
}

/// 預置的連接器示例。
fn seed_connectors() -> Vec<McpConnector> {
    vec![McpConnector {
        id: String::from("1"),
        name: String::from("数据库连接器"),
        description: String::from("提供 MySQL 数据库的查询、管理和监控能力"),
        url: String::from("https://api.example.com/mcp/database"),
        beartoken: String::from("Bearer_token_example_12345"),
        beartoken_env: None,
        enabled: true,
        created_at: String::from("2026-02-01T10:00:00Z"),
        updated_at: String::from("2026-02-05T14:30:00Z"),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> McpDraft {
        McpDraft {
            name: String::from("LDAP 目录服务"),
            description: String::from("企业用户目录查询"),
            url: String::from("ldap://ldap.company.com"),
            beartoken: String::new(),
            enabled: true,
        }
    }

    #[test]
    fn create_update_remove_round_trip() {
        let mut store = McpStore::with_seed_data();
        assert_eq!(store.all().len(), 1);

        let id = store
            .create(&valid_draft(), "2026-02-06T08:00:00Z")
            .expect("draft is valid");
        assert_eq!(store.all().len(), 2);
        assert_eq!(store.get(&id).map(|c| c.name.as_str()), Some("LDAP 目录服务"));

        let mut draft = valid_draft();
        draft.description = String::from("改过的描述");
        store
            .update(&id, &draft, "2026-02-06T09:00:00Z")
            .expect("update ok");
        let connector = store.get(&id).expect("present");
        assert_eq!(connector.description, "改过的描述");
        assert_eq!(connector.updated_at, "2026-02-06T09:00:00Z");

        let removed = store.remove(&id).expect("present");
        assert_eq!(removed.id, id);
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.remove(&id), Err(StoreError::not_found(id)));
    }

    #[test]
    fn invalid_draft_is_rejected_before_mutation() {
        let mut store = McpStore::with_seed_data();
        let mut draft = valid_draft();
        draft.url = String::from("没有协议前缀");
        assert!(store.create(&draft, "2026-02-06T08:00:00Z").is_err());
        assert_eq!(store.all().len(), 1);
    }
}
