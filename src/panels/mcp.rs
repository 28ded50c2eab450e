use crate::mcp::{McpConnector, McpDraft, McpStore};

use super::step_cursor;

/// MCP 管理頁的檢視狀態。
pub struct McpPanel {
    pub query: String,
    cursor: usize,
    pub drawer: Option<McpDrawer>,
}

impl McpPanel {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            cursor: 0,
            drawer: None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn visible(&self, store: &McpStore) -> Vec<usize> {
        store.search(&self.query)
    }

    pub fn move_cursor(&mut self, delta: isize, store: &McpStore) {
        self.cursor = step_cursor(self.cursor, delta, self.visible(store).len());
    }

    pub fn selected_store_index(&self, store: &McpStore) -> Option<usize> {
        self.visible(store).get(self.cursor).copied()
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.cursor = 0;
    }

    pub fn open_edit(&mut self, connector: &McpConnector) {
        self.drawer = Some(McpDrawer {
            editing_id: Some(connector.id.clone()),
            draft: McpDraft::from_connector(connector),
            cursor: 0,
        });
    }

    pub fn open_create(&mut self) {
        self.drawer = Some(McpDrawer {
            editing_id: None,
            draft: McpDraft::for_create(),
            cursor: 0,
        });
    }

    pub fn close_drawer(&mut self) {
        self.drawer = None;
    }
}

/// 連接器設定抽屜。
pub struct McpDrawer {
    pub editing_id: Option<String>,
    pub draft: McpDraft,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpField {
    Name,
    Description,
    Url,
    Beartoken,
    Enabled,
}

impl McpField {
    pub const ALL: [McpField; 5] = [
        McpField::Name,
        McpField::Description,
        McpField::Url,
        McpField::Beartoken,
        McpField::Enabled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            McpField::Name => "连接器名称",
            McpField::Description => "描述",
            McpField::Url => "连接器地址",
            McpField::Beartoken => "Bearer 凭证",
            McpField::Enabled => "启用状态",
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, McpField::Enabled)
    }
}

impl McpDrawer {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = step_cursor(self.cursor, delta, McpField::ALL.len());
    }

    pub fn selected_field(&self) -> McpField {
        McpField::ALL[self.cursor.min(McpField::ALL.len() - 1)]
    }

    pub fn field_value(&self, field: McpField) -> String {
        match field {
            McpField::Name => self.draft.name.clone(),
            McpField::Description => self.draft.description.clone(),
            McpField::Url => self.draft.url.clone(),
            // 憑證在列表裡只露出長度，避免整串印在畫面上。
            McpField::Beartoken => {
                if self.draft.beartoken.is_empty() {
                    String::new()
                } else {
                    format!("●●●●●●（{} 位）", self.draft.beartoken.chars().count())
                }
            }
            McpField::Enabled => String::from(if self.draft.enabled { "on" } else { "off" }),
        }
    }

    pub fn set_text_field(&mut self, field: McpField, value: String) {
        match field {
            McpField::Name => self.draft.name = value,
            McpField::Description => self.draft.description = value,
            McpField::Url => self.draft.url = value,
            McpField::Beartoken => self.draft.beartoken = value,
            McpField::Enabled => {}
        }
    }

    pub fn toggle_enabled(&mut self) {
        self.draft.enabled = !self.draft.enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beartoken_is_masked_in_field_value() {
        let store = McpStore::with_seed_data();
        let mut panel = McpPanel::new();
        panel.open_edit(store.get("1").expect("seed connector"));
        let drawer = panel.drawer.as_ref().expect("drawer open");
        let shown = drawer.field_value(McpField::Beartoken);
        assert!(!shown.contains("Bearer_token_example_12345"));
        assert!(shown.contains("26"));
    }

    #[test]
    fn search_narrows_visible_connectors() {
        let store = McpStore::with_seed_data();
        let mut panel = McpPanel::new();
        assert_eq!(panel.visible(&store).len(), 1);
        panel.set_query(String::from("不存在"));
        assert!(panel.visible(&store).is_empty());
        assert_eq!(panel.selected_store_index(&store), None);
    }
}
