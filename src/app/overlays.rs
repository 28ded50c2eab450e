//! 彈出層（輸入框、刪除確認、智能體切換）的按鍵處理與動作執行。

use crossterm::event::{KeyCode, KeyEvent};
use log::info;

use super::state::{
    AgentSwitcherState, ConfirmDeleteState, DeleteTarget, InputPromptState, OverlayState,
    PendingInputAction,
};
use super::App;
use crate::store::StoreError;

impl App {
    pub(crate) fn handle_overlay_key(&mut self, key: KeyEvent) {
        let Some(overlay) = self.overlay.take() else {
            return;
        };
        match overlay {
            OverlayState::InputPrompt(prompt) => self.handle_input_prompt_key(prompt, key),
            OverlayState::ConfirmDelete(confirm) => self.handle_confirm_delete_key(confirm, key),
            OverlayState::AgentSwitcher(switcher) => self.handle_switcher_key(switcher, key),
        }
    }

    fn handle_input_prompt_key(&mut self, mut prompt: InputPromptState, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.status_message = self.lang.cancel_label().to_string();
            }
            KeyCode::Char(ch) => {
                prompt.value.push(ch);
                prompt.error = None;
                self.overlay = Some(OverlayState::InputPrompt(prompt));
            }
            KeyCode::Backspace => {
                prompt.value.pop();
                self.overlay = Some(OverlayState::InputPrompt(prompt));
            }
            KeyCode::Enter => {
                let action = prompt.action.clone();
                let value = prompt.value.clone();
                match self.apply_input(action, value) {
                    Ok(status) => self.status_message = status,
                    Err(err) => {
                        // 校驗失敗時留在輸入框裡，把原因顯示出來。
                        prompt.error = Some(err.to_string());
                        self.overlay = Some(OverlayState::InputPrompt(prompt));
                    }
                }
            }
            _ => {
                self.overlay = Some(OverlayState::InputPrompt(prompt));
            }
        }
    }

    /// 執行一次輸入確認。回傳狀態列訊息；錯誤交由呼叫方回填輸入框。
    fn apply_input(
        &mut self,
        action: PendingInputAction,
        value: String,
    ) -> Result<String, StoreError> {
        match action {
            PendingInputAction::SearchAgents => {
                self.agents_panel.set_query(value.trim().to_string());
                Ok(if self.agents_panel.query.is_empty() {
                    String::from("已清除搜索条件")
                } else {
                    format!("搜索: {}", self.agents_panel.query)
                })
            }
            PendingInputAction::SearchConnectors => {
                self.mcp_panel.set_query(value.trim().to_string());
                Ok(if self.mcp_panel.query.is_empty() {
                    String::from("已清除搜索条件")
                } else {
                    format!("搜索: {}", self.mcp_panel.query)
                })
            }
            PendingInputAction::AgentField(field) => {
                let drawer = self
                    .agents_panel
                    .drawer
                    .as_mut()
                    .ok_or_else(|| StoreError::invalid("编辑抽屉已关闭"))?;
                drawer.set_text_field(field, value);
                Ok(format!("已更新{}", field.label()))
            }
            PendingInputAction::McpField(field) => {
                let drawer = self
                    .mcp_panel
                    .drawer
                    .as_mut()
                    .ok_or_else(|| StoreError::invalid("编辑抽屉已关闭"))?;
                drawer.set_text_field(field, value);
                Ok(format!("已更新{}", field.label()))
            }
            PendingInputAction::ServiceField(field) => {
                let drawer = self
                    .catalog_panel
                    .drawer
                    .as_mut()
                    .ok_or_else(|| StoreError::invalid("编辑抽屉已关闭"))?;
                drawer.set_text_field(field, value);
                Ok(format!("已更新{}", field.label()))
            }
            PendingInputAction::CategoryName => {
                let name = value.trim().to_string();
                if name.is_empty() {
                    return Err(StoreError::invalid("请输入目录名称"));
                }
                // 下一步：輸入目錄代號。
                self.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
                    "新建目录：代号",
                    "例如：printing-services",
                    PendingInputAction::CategoryCode { name },
                    None,
                )));
                Ok(String::from("请输入目录代号"))
            }
            PendingInputAction::CategoryCode { name } => {
                let code = value.trim().to_string();
                if code.is_empty() {
                    return Err(StoreError::invalid("请输入目录代号"));
                }
                self.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
                    "新建目录：描述",
                    "一句话说明该目录（可留空）",
                    PendingInputAction::CategoryDescription { name, code },
                    None,
                )));
                Ok(String::from("请输入目录描述"))
            }
            PendingInputAction::CategoryDescription { name, code } => {
                let id = self.catalog.create_category(&name, &code, value.trim())?;
                self.catalog_panel.refresh_preview(&self.catalog);
                Ok(format!("目录已创建（{id}）"))
            }
        }
    }

    fn handle_confirm_delete_key(&mut self, mut confirm: ConfirmDeleteState, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => {
                self.status_message = self.lang.cancel_label().to_string();
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                confirm.toggle_selection();
                self.overlay = Some(OverlayState::ConfirmDelete(confirm));
            }
            KeyCode::Char('y') => self.execute_delete(confirm.target),
            KeyCode::Enter => {
                if confirm.confirm_selected() {
                    self.execute_delete(confirm.target);
                } else {
                    self.status_message = self.lang.cancel_label().to_string();
                }
            }
            _ => {
                self.overlay = Some(OverlayState::ConfirmDelete(confirm));
            }
        }
    }

    fn execute_delete(&mut self, target: DeleteTarget) {
        let outcome = match &target {
            DeleteTarget::Connector { id } => self
                .connectors
                .remove(id)
                .map(|connector| format!("已删除连接器 {}", connector.name)),
            DeleteTarget::Service { id } => self
                .catalog
                .remove_service(id)
                .map(|service| format!("已删除服务 {}", service.title)),
            DeleteTarget::Category { id } => self
                .catalog
                .remove_category(id)
                .map(|()| format!("已删除目录 {id}")),
        };
        match outcome {
            Ok(message) => {
                info!("{message}");
                // 刪除可能改變列表長度與預覽對象。
                self.mcp_panel.move_cursor(0, &self.connectors);
                self.catalog_panel.refresh_preview(&self.catalog);
                self.status_message = message;
            }
            Err(err) => self.status_message = err.to_string(),
        }
    }

    fn handle_switcher_key(&mut self, mut switcher: AgentSwitcherState, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.status_message = self.lang.cancel_label().to_string();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                switcher.move_selection(-1);
                self.overlay = Some(OverlayState::AgentSwitcher(switcher));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                switcher.move_selection(1);
                self.overlay = Some(OverlayState::AgentSwitcher(switcher));
            }
            KeyCode::Enter => {
                let Some(choice) = switcher.selected_choice().cloned() else {
                    return;
                };
                if !choice.enabled {
                    self.status_message = format!("{} 已停用，无法选用", choice.name);
                    self.overlay = Some(OverlayState::AgentSwitcher(switcher));
                    return;
                }
                self.chat.selected_agent_id = choice.id;
                self.status_message = format!("已切换智能体：{} {}", choice.name, choice.version);
            }
            _ => {
                self.overlay = Some(OverlayState::AgentSwitcher(switcher));
            }
        }
    }

    // --- 刪除請求（打開確認彈出層） ---

    pub(crate) fn request_connector_delete(&mut self) {
        let Some(connector) = self
            .mcp_panel
            .selected_store_index(&self.connectors)
            .and_then(|index| self.connectors.get_at(index))
        else {
            return;
        };
        self.overlay = Some(OverlayState::ConfirmDelete(ConfirmDeleteState::new(
            DeleteTarget::Connector {
                id: connector.id.clone(),
            },
            format!("确定要删除这个 MCP 配置吗？（{}）", connector.name),
        )));
    }

    pub(crate) fn request_service_delete(&mut self) {
        let Some(service) = self.catalog_panel.selected_service(&self.catalog) else {
            return;
        };
        self.overlay = Some(OverlayState::ConfirmDelete(ConfirmDeleteState::new(
            DeleteTarget::Service {
                id: service.id.clone(),
            },
            format!("确定要删除服务「{}」吗？", service.title),
        )));
    }

    pub(crate) fn request_category_delete(&mut self) {
        let category_id = self.catalog_panel.selected_category_id(&self.catalog);
        if category_id == "all" {
            self.status_message = String::from("请先选中一个具体目录");
            return;
        }
        let display = self
            .catalog
            .category(&category_id)
            .map(|category| format!("确定要删除目录「{}」吗？", category.name))
            .unwrap_or_else(|| String::from("确定要删除该目录吗？"));
        self.overlay = Some(OverlayState::ConfirmDelete(ConfirmDeleteState::new(
            DeleteTarget::Category { id: category_id },
            display,
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleSettings;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use std::path::PathBuf;

    fn app() -> App {
        App::new(PathBuf::from("."), ConsoleSettings::default()).expect("init ok")
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_overlay_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn category_creation_chains_three_prompts() {
        let mut app = app();
        app.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
            "新建目录：名称",
            "",
            PendingInputAction::CategoryName,
            None,
        )));
        for ch in "打印服务".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        press(&mut app, KeyCode::Enter);
        // 進入第二步：代號，且第一步的名稱已帶在動作裡。
        match app.overlay.as_ref() {
            Some(OverlayState::InputPrompt(prompt)) => match &prompt.action {
                PendingInputAction::CategoryCode { name } => assert_eq!(name, "打印服务"),
                other => panic!("unexpected action: {other:?}"),
            },
            _ => panic!("expected code prompt"),
        }
        for ch in "printing".chars() {
            press(&mut app, KeyCode::Char(ch));
        }
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter); // 描述留空直接確認
        assert!(app.overlay.is_none());
        assert!(app.catalog.category("printing").is_some());
    }

    #[test]
    fn empty_category_name_keeps_prompt_open_with_error() {
        let mut app = app();
        app.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
            "新建目录：名称",
            "",
            PendingInputAction::CategoryName,
            None,
        )));
        press(&mut app, KeyCode::Enter);
        match app.overlay.as_ref() {
            Some(OverlayState::InputPrompt(prompt)) => {
                assert!(prompt.error.is_some());
            }
            _ => panic!("prompt should stay open"),
        }
    }

    #[test]
    fn connector_delete_requires_confirmation() {
        let mut app = app();
        app.request_connector_delete();
        assert!(matches!(
            app.overlay,
            Some(OverlayState::ConfirmDelete(_))
        ));
        // 預設選中「確定」，Enter 即執行刪除。
        press(&mut app, KeyCode::Enter);
        assert!(app.connectors.all().is_empty());

        // 再次請求時已無可選連接器，不應彈出確認框。
        app.request_connector_delete();
        assert!(app.overlay.is_none());
    }

    #[test]
    fn category_with_services_survives_delete_attempt() {
        let mut app = app();
        // 目錄游標移到 hr（位置 1）。
        app.catalog_panel.move_category_cursor(1, &app.catalog);
        app.request_category_delete();
        press(&mut app, KeyCode::Enter);
        assert!(app.catalog.category("hr").is_some());
        assert!(app.status_message.contains("无法删除"));
    }
}
