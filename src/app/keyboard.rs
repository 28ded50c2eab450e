use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;

use super::state::{AgentChoice, AgentSwitcherState, OverlayState, PendingInputAction};
use super::{App, InputPromptState, clock_stamp, iso_now, today};
use crate::definitions::{ConsolePage, FocusArea};
use crate::panels::agents::AgentField;
use crate::panels::catalog::ServiceField;
use crate::panels::mcp::McpField;
use crate::workbench::ChatPrompt;

impl App {
    /// 鍵盤事件的統一入口。彈出層優先，其次全域快捷鍵，最後按頁分發。
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if self.overlay.is_some() {
            self.handle_overlay_key(key);
            return;
        }
        if self.handle_global_shortcuts(key) {
            return;
        }
        match self.page {
            ConsolePage::Workbench => self.handle_workbench_key(key).await,
            ConsolePage::Agents => self.handle_agents_key(key),
            ConsolePage::Mcp => self.handle_mcp_key(key),
            ConsolePage::Catalog => self.handle_catalog_key(key),
        }
    }

    fn handle_global_shortcuts(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.quit();
                true
            }
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                self.toggle_language();
                true
            }
            (KeyCode::Tab, _) => {
                self.switch_page(self.page.next());
                true
            }
            (KeyCode::BackTab, _) => {
                self.switch_page(self.page.prev());
                true
            }
            _ => false,
        }
    }

    fn switch_page(&mut self, page: ConsolePage) {
        self.page = page;
        self.focus = match page {
            ConsolePage::Workbench => FocusArea::Composer,
            _ => FocusArea::List,
        };
        let title = match page {
            ConsolePage::Workbench => self.lang.workbench_title(),
            ConsolePage::Agents => self.lang.agents_title(),
            ConsolePage::Mcp => self.lang.mcp_title(),
            ConsolePage::Catalog => self.lang.catalog_title(),
        };
        self.status_message = title.to_string();
    }

    // --- 對話工作台 ---

    async fn handle_workbench_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                self.chat.start_new();
                self.status_message = self.lang.empty_chat_hint().to_string();
            }
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => {
                self.chat.toggle_reasoning();
            }
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.open_agent_switcher();
            }
            (KeyCode::Char(ch), modifiers)
                if !modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.composer.insert_char(ch);
            }
            (KeyCode::Backspace, _) => self.composer.backspace(),
            (KeyCode::Left, _) => self.composer.move_left(),
            (KeyCode::Right, _) => self.composer.move_right(),
            (KeyCode::Up, _) => {
                if self.composer.is_empty() {
                    self.chat.move_cursor(-1);
                } else {
                    self.composer.history_previous();
                }
            }
            (KeyCode::Down, _) => {
                if self.composer.is_empty() {
                    self.chat.move_cursor(1);
                } else {
                    self.composer.history_next();
                }
            }
            (KeyCode::Enter, _) => {
                if self.composer.is_empty() {
                    self.open_selected_history();
                } else {
                    self.submit_chat_prompt().await;
                }
            }
            _ => {}
        }
    }

    /// 把輸入框內容發給回覆後端。
    async fn submit_chat_prompt(&mut self) {
        let Some(agent) = self.agents.get(&self.chat.selected_agent_id) else {
            self.status_message = String::from("当前智能体不存在，请先切换智能体");
            return;
        };
        if !agent.enabled {
            self.status_message = format!("{} 已停用，无法对话", agent.name);
            return;
        }
        let agent_name = agent.name.clone();
        let text = self.composer.take();
        self.chat.push_user(text.clone(), clock_stamp());
        let prompt = ChatPrompt { agent_name, text };
        if let Err(err) = self.responder.send(prompt).await {
            warn!("responder send failed: {err:#}");
            self.chat.waiting = false;
            self.status_message = format!("发送失败: {err}");
        } else {
            self.status_message = self.lang.waiting_reply().to_string();
        }
    }

    fn open_selected_history(&mut self) {
        let Some(agent_name) = self.chat.open_selected() else {
            return;
        };
        // 歷史會話記錄的是智能體名稱，切回對應的定義。
        if let Some(agent) = self
            .agents
            .all()
            .iter()
            .find(|agent| agent.name == agent_name)
        {
            self.chat.selected_agent_id = agent.id.clone();
        }
        self.status_message = format!("已载入历史对话（{agent_name}）");
    }

    fn open_agent_switcher(&mut self) {
        let choices: Vec<AgentChoice> = self
            .agents
            .all()
            .iter()
            .map(|agent| AgentChoice {
                id: agent.id.clone(),
                name: agent.name.clone(),
                version: agent.version.clone(),
                enabled: agent.enabled,
            })
            .collect();
        if choices.is_empty() {
            self.status_message = String::from("尚未配置任何智能体");
            return;
        }
        let selected = choices
            .iter()
            .position(|choice| choice.id == self.chat.selected_agent_id)
            .unwrap_or(0);
        self.overlay = Some(OverlayState::AgentSwitcher(AgentSwitcherState::new(
            choices, selected,
        )));
    }

    // --- 智能體配置頁 ---

    fn handle_agents_key(&mut self, key: KeyEvent) {
        if self.agents_panel.drawer.is_some() {
            self.handle_agent_drawer_key(key);
            return;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.agents_panel.move_cursor(-1, &self.agents);
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                self.agents_panel.move_cursor(1, &self.agents);
            }
            (KeyCode::Char('/'), _) => {
                let initial = self.agents_panel.query.clone();
                self.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
                    "搜索智能体",
                    "输入名称或描述关键字",
                    PendingInputAction::SearchAgents,
                    Some(initial),
                )));
            }
            (KeyCode::Char('n'), _) => {
                self.agents_panel.open_create();
            }
            (KeyCode::Enter, _) | (KeyCode::Char('e'), _) => {
                if let Some(index) = self.agents_panel.selected_store_index(&self.agents) {
                    if let Some(agent) = self.agents.get_at(index) {
                        let agent = agent.clone();
                        self.agents_panel.open_edit(&agent);
                    }
                }
            }
            (KeyCode::Char('t'), _) => {
                let Some(index) = self.agents_panel.selected_store_index(&self.agents) else {
                    return;
                };
                let Some(id) = self.agents.get_at(index).map(|agent| agent.id.clone()) else {
                    return;
                };
                match self.agents.toggle_enabled(&id) {
                    Ok(enabled) => {
                        let label = if enabled {
                            self.lang.enabled_label()
                        } else {
                            self.lang.disabled_label()
                        };
                        self.status_message = format!("智能体已切换为{label}");
                    }
                    Err(err) => self.status_message = err.to_string(),
                }
            }
            _ => {}
        }
    }

    fn handle_agent_drawer_key(&mut self, key: KeyEvent) {
        if let (KeyCode::Char('s'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.save_agent_drawer();
            return;
        }
        let Some(drawer) = self.agents_panel.drawer.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.agents_panel.close_drawer(),
            KeyCode::Up => drawer.move_cursor(-1),
            KeyCode::Down => drawer.move_cursor(1),
            KeyCode::Left => drawer.cycle_model(drawer.selected_field(), -1),
            KeyCode::Right => drawer.cycle_model(drawer.selected_field(), 1),
            KeyCode::Char('m') => {
                if !drawer.mount_next_template() {
                    self.status_message = String::from("系统连接器已全部挂载");
                }
            }
            KeyCode::Char('u') => {
                if !drawer.unmount_last() {
                    self.status_message = String::from("没有可卸载的 MCP 挂载");
                }
            }
            KeyCode::Enter => {
                let field = drawer.selected_field();
                if field.is_text() {
                    let initial = drawer.field_value(field);
                    self.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
                        field.label(),
                        "Enter 确认，Esc 取消",
                        PendingInputAction::AgentField(field),
                        Some(initial),
                    )));
                } else if field == AgentField::Enabled {
                    drawer.toggle_enabled();
                } else if field == AgentField::Bindings {
                    if !drawer.mount_next_template() {
                        self.status_message = String::from("系统连接器已全部挂载");
                    }
                } else {
                    drawer.cycle_model(field, 1);
                }
            }
            _ => {}
        }
    }

    fn save_agent_drawer(&mut self) {
        let Some(drawer) = self.agents_panel.drawer.as_ref() else {
            return;
        };
        let editing_id = drawer.editing_id.clone();
        let draft = drawer.draft.clone();
        let result = match editing_id {
            Some(id) => self.agents.update(&id, &draft, &today()).map(|()| id),
            None => self.agents.create(&draft, &today()),
        };
        match result {
            Ok(id) => {
                self.agents_panel.close_drawer();
                self.status_message = format!("智能体已保存（#{id}）");
            }
            Err(err) => self.status_message = err.to_string(),
        }
    }

    // --- MCP 管理頁 ---

    fn handle_mcp_key(&mut self, key: KeyEvent) {
        if self.mcp_panel.drawer.is_some() {
            self.handle_mcp_drawer_key(key);
            return;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.mcp_panel.move_cursor(-1, &self.connectors),
            KeyCode::Down | KeyCode::Char('j') => self.mcp_panel.move_cursor(1, &self.connectors),
            KeyCode::Char('/') => {
                let initial = self.mcp_panel.query.clone();
                self.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
                    "搜索 MCP 连接器",
                    "输入名称或描述关键字",
                    PendingInputAction::SearchConnectors,
                    Some(initial),
                )));
            }
            KeyCode::Char('n') => self.mcp_panel.open_create(),
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(index) = self.mcp_panel.selected_store_index(&self.connectors) {
                    if let Some(connector) = self.connectors.get_at(index) {
                        let connector = connector.clone();
                        self.mcp_panel.open_edit(&connector);
                    }
                }
            }
            KeyCode::Char('t') => {
                let Some(id) = self
                    .mcp_panel
                    .selected_store_index(&self.connectors)
                    .and_then(|index| self.connectors.get_at(index))
                    .map(|connector| connector.id.clone())
                else {
                    return;
                };
                match self.connectors.toggle_enabled(&id) {
                    Ok(enabled) => {
                        let label = if enabled {
                            self.lang.enabled_label()
                        } else {
                            self.lang.disabled_label()
                        };
                        self.status_message = format!("连接器已切换为{label}");
                    }
                    Err(err) => self.status_message = err.to_string(),
                }
            }
            KeyCode::Char('d') => self.request_connector_delete(),
            _ => {}
        }
    }

    fn handle_mcp_drawer_key(&mut self, key: KeyEvent) {
        if let (KeyCode::Char('s'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.save_mcp_drawer();
            return;
        }
        let Some(drawer) = self.mcp_panel.drawer.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.mcp_panel.close_drawer(),
            KeyCode::Up => drawer.move_cursor(-1),
            KeyCode::Down => drawer.move_cursor(1),
            KeyCode::Enter => {
                let field = drawer.selected_field();
                if field.is_text() {
                    let initial = match field {
                        // 憑證欄位顯示的是掩碼，編輯時從原值開始。
                        McpField::Beartoken => drawer.draft.beartoken.clone(),
                        _ => drawer.field_value(field),
                    };
                    self.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
                        field.label(),
                        "Enter 确认，Esc 取消",
                        PendingInputAction::McpField(field),
                        Some(initial),
                    )));
                } else {
                    drawer.toggle_enabled();
                }
            }
            _ => {}
        }
    }

    fn save_mcp_drawer(&mut self) {
        let Some(drawer) = self.mcp_panel.drawer.as_ref() else {
            return;
        };
        let editing_id = drawer.editing_id.clone();
        let draft = drawer.draft.clone();
        let result = match editing_id {
            Some(id) => self.connectors.update(&id, &draft, &iso_now()).map(|()| id),
            None => self.connectors.create(&draft, &iso_now()),
        };
        match result {
            Ok(id) => {
                self.mcp_panel.close_drawer();
                self.status_message = format!("连接器已保存（#{id}）");
            }
            Err(err) => self.status_message = err.to_string(),
        }
    }

    // --- 服務目錄頁 ---

    fn handle_catalog_key(&mut self, key: KeyEvent) {
        if self.catalog_panel.drawer.is_some() {
            self.handle_service_drawer_key(key);
            return;
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.focus = FocusArea::List,
            KeyCode::Right | KeyCode::Char('l') => self.focus = FocusArea::Detail,
            KeyCode::Up | KeyCode::Char('k') => {
                if self.focus == FocusArea::List {
                    self.catalog_panel.move_category_cursor(-1, &self.catalog);
                } else {
                    self.catalog_panel.move_service_cursor(-1, &self.catalog);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.focus == FocusArea::List {
                    self.catalog_panel.move_category_cursor(1, &self.catalog);
                } else {
                    self.catalog_panel.move_service_cursor(1, &self.catalog);
                }
            }
            KeyCode::Char('p') => self.catalog_panel.toggle_preview(),
            KeyCode::Char('n') => self.catalog_panel.open_create(&self.catalog),
            KeyCode::Char('c') => {
                self.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
                    "新建目录：名称",
                    "例如：打印服务",
                    PendingInputAction::CategoryName,
                    None,
                )));
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(service) = self.catalog_panel.selected_service(&self.catalog) {
                    let service = service.clone();
                    self.catalog_panel.open_edit(&service);
                }
            }
            KeyCode::Char('d') => {
                if self.focus == FocusArea::List {
                    self.request_category_delete();
                } else {
                    self.request_service_delete();
                }
            }
            _ => {}
        }
    }

    fn handle_service_drawer_key(&mut self, key: KeyEvent) {
        if let (KeyCode::Char('s'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.save_service_drawer();
            return;
        }
        let Some(drawer) = self.catalog_panel.drawer.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.catalog_panel.close_drawer(),
            KeyCode::Up => drawer.move_cursor(-1),
            KeyCode::Down => drawer.move_cursor(1),
            KeyCode::Left => {
                if drawer.selected_field() == ServiceField::Category {
                    drawer.cycle_category(-1, &self.catalog);
                }
            }
            KeyCode::Right => {
                if drawer.selected_field() == ServiceField::Category {
                    drawer.cycle_category(1, &self.catalog);
                }
            }
            KeyCode::Enter => {
                let field = drawer.selected_field();
                if field.is_text() {
                    let initial = match field {
                        ServiceField::Rules => {
                            drawer.draft.collaboration_rules.clone()
                        }
                        _ => drawer.field_value(field, &self.catalog),
                    };
                    self.overlay = Some(OverlayState::InputPrompt(InputPromptState::new(
                        field.label(),
                        "Enter 确认，Esc 取消",
                        PendingInputAction::ServiceField(field),
                        Some(initial),
                    )));
                } else if field == ServiceField::Enabled {
                    drawer.toggle_enabled();
                } else {
                    drawer.cycle_category(1, &self.catalog);
                }
            }
            _ => {}
        }
    }

    fn save_service_drawer(&mut self) {
        let Some(drawer) = self.catalog_panel.drawer.as_ref() else {
            return;
        };
        let editing_id = drawer.editing_id.clone();
        let draft = drawer.draft.clone();
        let result = match editing_id {
            Some(id) => self.catalog.update_service(&id, &draft).map(|()| id),
            None => self.catalog.create_service(&draft),
        };
        match result {
            Ok(id) => {
                self.catalog_panel.close_drawer();
                self.catalog_panel.refresh_preview(&self.catalog);
                // 帶流程配置的服務把配置落進日誌，排查時能直接還原現場。
                if let Some(workflow) = self
                    .catalog
                    .service(&id)
                    .and_then(|service| service.workflow.as_ref())
                    && let Ok(json) = serde_json::to_string(workflow)
                {
                    log::debug!("service {id} workflow config: {json}");
                }
                self.status_message = format!("服务已保存（#{id}）");
            }
            Err(err) => self.status_message = err.to_string(),
        }
    }
}
