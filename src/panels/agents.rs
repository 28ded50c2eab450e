use crate::agents::{AgentDefinition, AgentDraft, AgentStore, available_models};
use crate::mcp::{binding_from_template, connector_templates};

use super::step_cursor;

/// 智能體配置頁的檢視狀態。
pub struct AgentsPanel {
    /// 搜尋關鍵字，即時過濾列表。
    pub query: String,
    /// 過濾後列表裡的游標位置。
    cursor: usize,
    /// 編輯抽屜；`None` 表示停留在列表。
    pub drawer: Option<AgentDrawer>,
}

impl AgentsPanel {
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

    /// 過濾後可見的儲存索引。
    pub fn visible(&self, store: &AgentStore) -> Vec<usize> {
        store.search(&self.query)
    }

    pub fn move_cursor(&mut self, delta: isize, store: &AgentStore) {
        self.cursor = step_cursor(self.cursor, delta, self.visible(store).len());
    }

    /// 游標當前指向的儲存索引。
    pub fn selected_store_index(&self, store: &AgentStore) -> Option<usize> {
        self.visible(store).get(self.cursor).copied()
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.cursor = 0;
    }

    pub fn open_edit(&mut self, agent: &AgentDefinition) {
        self.drawer = Some(AgentDrawer {
            editing_id: Some(agent.id.clone()),
            draft: AgentDraft::from_definition(agent),
            cursor: 0,
        });
    }

    pub fn open_create(&mut self) {
        self.drawer = Some(AgentDrawer {
            editing_id: None,
            draft: AgentDraft::for_create(),
            cursor: 0,
        });
    }

    pub fn close_drawer(&mut self) {
        self.drawer = None;
    }
}

/// 編輯抽屜：表單草稿加上欄位游標。
pub struct AgentDrawer {
    /// 編輯中的智能體識別碼；`None` 表示新建。
    pub editing_id: Option<String>,
    pub draft: AgentDraft,
    cursor: usize,
}

/// 抽屜裡可聚焦的欄位，依顯示順序排列。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentField {
    Name,
    Description,
    Version,
    Model,
    Temperature,
    SkillModel,
    TitleModel,
    Prompt,
    Enabled,
    Bindings,
}

impl AgentField {
    pub const ALL: [AgentField; 10] = [
        AgentField::Name,
        AgentField::Description,
        AgentField::Version,
        AgentField::Model,
        AgentField::Temperature,
        AgentField::SkillModel,
        AgentField::TitleModel,
        AgentField::Prompt,
        AgentField::Enabled,
        AgentField::Bindings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgentField::Name => "智能体名称",
            AgentField::Description => "描述",
            AgentField::Version => "版本",
            AgentField::Model => "对话模型",
            AgentField::Temperature => "温度",
            AgentField::SkillModel => "技能挑选模型",
            AgentField::TitleModel => "标题生成模型",
            AgentField::Prompt => "提示词",
            AgentField::Enabled => "启用状态",
            AgentField::Bindings => "MCP 挂载",
        }
    }

    /// 此欄位是否透過文字輸入框編輯（而不是切換/循環）。
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            AgentField::Name
                | AgentField::Description
                | AgentField::Version
                | AgentField::Temperature
                | AgentField::Prompt
        )
    }
}

impl AgentDrawer {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = step_cursor(self.cursor, delta, AgentField::ALL.len());
    }

    pub fn selected_field(&self) -> AgentField {
        AgentField::ALL[self.cursor.min(AgentField::ALL.len() - 1)]
    }

    /// 目前聚焦欄位的顯示值。
    pub fn field_value(&self, field: AgentField) -> String {
        match field {
            AgentField::Name => self.draft.name.clone(),
            AgentField::Description => self.draft.description.clone(),
            AgentField::Version => self.draft.version.clone(),
            AgentField::Model => self.draft.model.clone(),
            AgentField::Temperature => self.draft.temperature.clone(),
            AgentField::SkillModel => self.draft.skill_selection_model.clone(),
            AgentField::TitleModel => self.draft.title_generation_model.clone(),
            AgentField::Prompt => self.draft.prompt.clone(),
            AgentField::Enabled => String::from(if self.draft.enabled { "on" } else { "off" }),
            AgentField::Bindings => self
                .draft
                .mcp_bindings
                .iter()
                .map(|binding| binding.connector_name.as_str())
                .collect::<Vec<_>>()
                .join("、"),
        }
    }

    pub fn set_text_field(&mut self, field: AgentField, value: String) {
        match field {
            AgentField::Name => self.draft.name = value,
            AgentField::Description => self.draft.description = value,
            AgentField::Version => self.draft.version = value,
            AgentField::Temperature => self.draft.temperature = value,
            AgentField::Prompt => self.draft.prompt = value,
            // 其餘欄位用切換/循環操作，不走文字輸入。
            _ => {}
        }
    }

    /// 在可選模型列表裡循環當前聚焦的模型欄位。
    pub fn cycle_model(&mut self, field: AgentField, delta: isize) {
        let target = match field {
            AgentField::Model => &mut self.draft.model,
            AgentField::SkillModel => &mut self.draft.skill_selection_model,
            AgentField::TitleModel => &mut self.draft.title_generation_model,
            _ => return,
        };
        let models = available_models();
        let current = models
            .iter()
            .position(|option| option.id == target.as_str())
            .unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(models.len() as isize) as usize;
        *target = models[next].id.to_string();
    }

    pub fn toggle_enabled(&mut self) {
        self.draft.enabled = !self.draft.enabled;
    }

    /// 掛載下一個尚未綁定的系統連接器模板。全部掛滿時回傳 `false`。
    pub fn mount_next_template(&mut self) -> bool {
        let mounted = &self.draft.mcp_bindings;
        let Some(template) = connector_templates()
            .iter()
            .find(|template| !mounted.iter().any(|b| b.connector_id == template.id))
        else {
            return false;
        };
        let binding = binding_from_template(template, mounted.len());
        self.draft.mcp_bindings.push(binding);
        true
    }

    /// 卸載最後一個綁定。
    pub fn unmount_last(&mut self) -> bool {
        self.draft.mcp_bindings.pop().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_resets_cursor_and_bounds_selection() {
        let store = AgentStore::with_seed_data();
        let mut panel = AgentsPanel::new();
        panel.move_cursor(3, &store);
        assert_eq!(panel.cursor(), 3);

        panel.set_query(String::from("运维"));
        assert_eq!(panel.cursor(), 0);
        assert_eq!(panel.selected_store_index(&store), Some(1));
    }

    #[test]
    fn drawer_cycles_models_and_templates() {
        let store = AgentStore::with_seed_data();
        let mut panel = AgentsPanel::new();
        panel.open_edit(store.get("1").expect("seed agent"));
        let drawer = panel.drawer.as_mut().expect("drawer open");

        assert_eq!(drawer.draft.model, "gpt-4");
        drawer.cycle_model(AgentField::Model, 1);
        assert_eq!(drawer.draft.model, "gpt-4-turbo");
        drawer.cycle_model(AgentField::Model, -1);
        assert_eq!(drawer.draft.model, "gpt-4");

        for _ in 0..connector_templates().len() {
            assert!(drawer.mount_next_template());
        }
        assert!(!drawer.mount_next_template());
        assert_eq!(
            drawer.draft.mcp_bindings.len(),
            connector_templates().len()
        );
        assert!(drawer.unmount_last());
    }
}
