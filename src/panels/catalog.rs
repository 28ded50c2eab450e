use crate::catalog::{CatalogStore, Service, ServiceDraft};
use crate::flowchart;

use super::step_cursor;

/// 服務目錄頁的檢視狀態：左側分類、右側服務列表、底部流程圖預覽。
pub struct CatalogPanel {
    /// 分類側欄游標。0 是「全部」，其後依序對應各分類。
    category_cursor: usize,
    /// 服務列表游標（在當前分類過濾後的列表內）。
    service_cursor: usize,
    pub drawer: Option<ServiceDrawer>,
    /// 選中服務的協作規範編譯出的流程圖原始碼。
    preview: String,
    pub preview_visible: bool,
}

impl CatalogPanel {
    pub fn new(store: &CatalogStore) -> Self {
        let mut panel = Self {
            category_cursor: 0,
            service_cursor: 0,
            drawer: None,
            preview: String::new(),
            preview_visible: true,
        };
        panel.refresh_preview(store);
        panel
    }

    pub fn category_cursor(&self) -> usize {
        self.category_cursor
    }

    pub fn service_cursor(&self) -> usize {
        self.service_cursor
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// 游標所指分類的識別碼；位置 0 是「全部」。
    pub fn selected_category_id(&self, store: &CatalogStore) -> String {
        if self.category_cursor == 0 {
            return String::from("all");
        }
        store
            .categories()
            .get(self.category_cursor - 1)
            .map(|category| category.id.clone())
            .unwrap_or_else(|| String::from("all"))
    }

    /// 當前分類下可見的服務索引。
    pub fn visible_services(&self, store: &CatalogStore) -> Vec<usize> {
        store.services_in(&self.selected_category_id(store))
    }

    pub fn selected_service<'a>(&self, store: &'a CatalogStore) -> Option<&'a Service> {
        let indices = self.visible_services(store);
        indices
            .get(self.service_cursor)
            .and_then(|&idx| store.service_at(idx))
    }

    pub fn move_category_cursor(&mut self, delta: isize, store: &CatalogStore) {
        self.category_cursor =
            step_cursor(self.category_cursor, delta, store.categories().len() + 1);
        self.service_cursor = 0;
        self.refresh_preview(store);
    }

    pub fn move_service_cursor(&mut self, delta: isize, store: &CatalogStore) {
        self.service_cursor = step_cursor(
            self.service_cursor,
            delta,
            self.visible_services(store).len(),
        );
        self.refresh_preview(store);
    }

    pub fn toggle_preview(&mut self) {
        self.preview_visible = !self.preview_visible;
    }

    /// 重算流程圖預覽。沒有選中服務時編譯空字串，得到固定的佔位圖，
    /// 預覽欄因此永遠有可渲染的內容。
    pub fn refresh_preview(&mut self, store: &CatalogStore) {
        let rules = self
            .selected_service(store)
            .map(|service| service.collaboration_rules.as_str())
            .unwrap_or("");
        self.preview = flowchart::compile(rules);
    }

    pub fn open_edit(&mut self, service: &Service) {
        self.drawer = Some(ServiceDrawer {
            editing_id: Some(service.id.clone()),
            draft: ServiceDraft::from_service(service),
            cursor: 0,
        });
    }

    /// 新建服務，預設掛在當前選中的分類下。
    pub fn open_create(&mut self, store: &CatalogStore) {
        let category_id = match self.selected_category_id(store).as_str() {
            "all" => store
                .categories()
                .first()
                .map(|category| category.id.clone())
                .unwrap_or_default(),
            id => id.to_string(),
        };
        self.drawer = Some(ServiceDrawer {
            editing_id: None,
            draft: ServiceDraft {
                category_id,
                enabled: true,
                ..ServiceDraft::default()
            },
            cursor: 0,
        });
    }

    pub fn close_drawer(&mut self) {
        self.drawer = None;
    }
}

/// 服務編輯抽屜。
pub struct ServiceDrawer {
    pub editing_id: Option<String>,
    pub draft: ServiceDraft,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    Category,
    Title,
    Code,
    Description,
    Sla,
    Rules,
    Enabled,
}

impl ServiceField {
    pub const ALL: [ServiceField; 7] = [
        ServiceField::Category,
        ServiceField::Title,
        ServiceField::Code,
        ServiceField::Description,
        ServiceField::Sla,
        ServiceField::Rules,
        ServiceField::Enabled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceField::Category => "所属目录",
            ServiceField::Title => "服务名称",
            ServiceField::Code => "服务编码",
            ServiceField::Description => "描述",
            ServiceField::Sla => "SLA（小时）",
            ServiceField::Rules => "协作规范",
            ServiceField::Enabled => "上线状态",
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, ServiceField::Category | ServiceField::Enabled)
    }
}

impl ServiceDrawer {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = step_cursor(self.cursor, delta, ServiceField::ALL.len());
    }

    pub fn selected_field(&self) -> ServiceField {
        ServiceField::ALL[self.cursor.min(ServiceField::ALL.len() - 1)]
    }

    pub fn field_value(&self, field: ServiceField, store: &CatalogStore) -> String {
        match field {
            ServiceField::Category => store
                .category(&self.draft.category_id)
                .map(|category| category.name.clone())
                .unwrap_or_else(|| self.draft.category_id.clone()),
            ServiceField::Title => self.draft.title.clone(),
            ServiceField::Code => self.draft.code.clone(),
            ServiceField::Description => self.draft.description.clone(),
            ServiceField::Sla => self.draft.sla.clone(),
            ServiceField::Rules => summarize(&self.draft.collaboration_rules),
            ServiceField::Enabled => String::from(if self.draft.enabled { "on" } else { "off" }),
        }
    }

    pub fn set_text_field(&mut self, field: ServiceField, value: String) {
        match field {
            ServiceField::Title => self.draft.title = value,
            ServiceField::Code => self.draft.code = value,
            ServiceField::Description => self.draft.description = value,
            ServiceField::Sla => self.draft.sla = value,
            ServiceField::Rules => self.draft.collaboration_rules = value,
            ServiceField::Category | ServiceField::Enabled => {}
        }
    }

    /// 在分類列表裡循環所屬目錄。
    pub fn cycle_category(&mut self, delta: isize, store: &CatalogStore) {
        let categories = store.categories();
        if categories.is_empty() {
            return;
        }
        let current = categories
            .iter()
            .position(|category| category.id == self.draft.category_id)
            .unwrap_or(0);
        let next = (current as isize + delta).rem_euclid(categories.len() as isize) as usize;
        self.draft.category_id = categories[next].id.clone();
    }

    pub fn toggle_enabled(&mut self) {
        self.draft.enabled = !self.draft.enabled;
    }
}

/// 多行文字在單行欄位裡的摘要。
fn summarize(text: &str) -> String {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    match lines.next() {
        None => String::new(),
        Some(first) => {
            let total = text.lines().count();
            if total > 1 {
                format!("{first} …（共 {total} 行）")
            } else {
                first.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_follows_service_selection() {
        let store = CatalogStore::with_seed_data();
        let mut panel = CatalogPanel::new(&store);
        // 種子裡第一個服務帶分階段的協作規範。
        assert!(panel.preview().contains("Phase1[\"提单\"]"));

        // 移到沒有規範的服務上，預覽退回佔位圖。
        panel.move_service_cursor(2, &store);
        assert!(panel.preview().contains("暂无流程"));
    }

    #[test]
    fn category_cursor_filters_services() {
        let store = CatalogStore::with_seed_data();
        let mut panel = CatalogPanel::new(&store);
        assert_eq!(panel.visible_services(&store).len(), 5);

        // 位置 3 = assets（全部、hr、office 之後）。
        panel.move_category_cursor(3, &store);
        assert_eq!(panel.selected_category_id(&store), "assets");
        assert_eq!(panel.visible_services(&store).len(), 1);
        assert_eq!(
            panel.selected_service(&store).map(|s| s.title.as_str()),
            Some("设备领用")
        );
    }

    #[test]
    fn create_drawer_inherits_selected_category() {
        let store = CatalogStore::with_seed_data();
        let mut panel = CatalogPanel::new(&store);
        panel.move_category_cursor(1, &store);
        panel.open_create(&store);
        let drawer = panel.drawer.as_ref().expect("drawer open");
        assert_eq!(drawer.draft.category_id, "hr");
        assert_eq!(drawer.selected_field(), ServiceField::Category);
    }

    #[test]
    fn rules_summary_keeps_single_line() {
        assert_eq!(summarize(""), "");
        assert_eq!(summarize("只有一行"), "只有一行");
        let multi = summarize("第一行\n第二行\n第三行");
        assert!(multi.starts_with("第一行"));
        assert!(multi.contains("3 行"));
    }
}
