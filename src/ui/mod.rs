//! 畫面渲染。所有 widget 都在這裡組裝；狀態一律唯讀，
//! 游標與選中高亮由各 panel 的狀態推導。

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, OverlayState};
use crate::catalog::ServiceStatus;
use crate::definitions::{ConsolePage, FocusArea};
use crate::flowchart;
use crate::panels::agents::AgentField;
use crate::panels::catalog::ServiceField;
use crate::panels::mcp::McpField;
use crate::workbench::ChatRole;

mod layout;
mod theme;

use layout::{catalog_chunks, centered_rect, chat_chunks, frame_chunks, list_detail, workbench_chunks};
use theme::*;

fn cell_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text).min(u16::MAX as usize) as u16
}

pub fn render(f: &mut Frame<'_>, app: &App) {
    let size = f.size();
    if size.width < 80 || size.height < 24 {
        let block = Paragraph::new("终端窗口过小，请调整至至少 80x24。")
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title("agentdesk")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(FG_PRIMARY).bg(BG_PANEL)),
            )
            .style(Style::default().fg(FG_PRIMARY).bg(BG_PRIMARY));
        f.render_widget(block, size);
        return;
    }

    f.render_widget(
        Block::default().style(Style::default().bg(BG_PRIMARY)),
        size,
    );

    let (tab_area, content_area, status_area) = frame_chunks(size);
    render_tab_bar(f, app, tab_area);
    match app.page {
        ConsolePage::Workbench => render_workbench(f, app, content_area),
        ConsolePage::Agents => render_agents_page(f, app, content_area),
        ConsolePage::Mcp => render_mcp_page(f, app, content_area),
        ConsolePage::Catalog => render_catalog_page(f, app, content_area),
    }
    render_status_bar(f, app, status_area);

    if let Some(overlay) = app.overlay.as_ref() {
        render_overlay(f, app, overlay);
    }
}

fn page_title(app: &App, page: ConsolePage) -> &'static str {
    match page {
        ConsolePage::Workbench => app.lang.workbench_title(),
        ConsolePage::Agents => app.lang.agents_title(),
        ConsolePage::Mcp => app.lang.mcp_title(),
        ConsolePage::Catalog => app.lang.catalog_title(),
    }
}

fn render_tab_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    f.render_widget(
        Block::default().style(Style::default().bg(TAB_BG)),
        area,
    );
    let mut spans: Vec<Span> = vec![Span::styled(
        " agentdesk ",
        Style::default()
            .fg(ACCENT_FG)
            .bg(TAB_BG)
            .add_modifier(Modifier::BOLD),
    )];
    for page in ConsolePage::ALL {
        let label = format!(" {} ", page_title(app, page));
        let style = if page == app.page {
            Style::default()
                .fg(TAB_ACTIVE_TEXT)
                .bg(TAB_ACTIVE_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TAB_TEXT).bg(TAB_BG)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(" ", Style::default().bg(TAB_BG)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(TAB_BG)),
        area,
    );
}

fn render_status_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let message = format!(" {}", app.status_message);
    let hint = format!("{} ", app.lang.status_hint());
    let mut spans = vec![Span::styled(
        message.clone(),
        Style::default().fg(STATUS_FG).bg(STATUS_BG),
    )];
    let used = cell_width(&message);
    let hint_width = cell_width(&hint);
    if used.saturating_add(hint_width) < area.width {
        let padding = area.width - used - hint_width;
        spans.push(Span::styled(
            " ".repeat(padding as usize),
            Style::default().bg(STATUS_BG),
        ));
        spans.push(Span::styled(hint, Style::default().fg(FG_DIM).bg(STATUS_BG)));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(STATUS_BG)),
        area,
    );
}

fn panel_block<'a>(title: String, focused: bool) -> Block<'a> {
    let border = if focused { BORDER_FOCUS } else { BORDER_IDLE };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(BG_PANEL).fg(FG_PRIMARY))
}

fn highlight_style() -> Style {
    Style::default()
        .fg(LIST_HIGHLIGHT_FG)
        .bg(LIST_HIGHLIGHT_BG)
        .add_modifier(Modifier::BOLD)
}

// --- 對話工作台 ---

fn render_workbench(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (history_area, chat_area, reasoning_area) =
        workbench_chunks(area, app.chat.show_reasoning);

    // 歷史側欄。
    let items: Vec<ListItem> = app
        .chat
        .histories()
        .iter()
        .map(|history| {
            let lines = vec![
                Line::from(history.title.clone()),
                Line::from(Span::styled(
                    format!("  {} · {}", history.agent_name, history.timestamp),
                    Style::default().fg(FG_DIM),
                )),
            ];
            ListItem::new(lines)
        })
        .collect();
    let mut state = ListState::default();
    if !app.chat.histories().is_empty() {
        state.select(Some(app.chat.cursor()));
    }
    let list = List::new(items)
        .block(panel_block(
            format!(" {} ", app.lang.history_title()),
            false,
        ))
        .highlight_style(highlight_style());
    f.render_stateful_widget(list, history_area, &mut state);

    // 會話區 + 輸入框。
    let (messages_area, composer_area) = chat_chunks(chat_area);
    render_chat_messages(f, app, messages_area);
    render_composer(f, app, composer_area);

    if let Some(reasoning_area) = reasoning_area {
        render_reasoning(f, app, reasoning_area);
    }
}

fn render_chat_messages(f: &mut Frame<'_>, app: &App, area: Rect) {
    let agent_label = app
        .agents
        .get(&app.chat.selected_agent_id)
        .map(|agent| format!(" 对话 · {} {} ", agent.name, agent.version))
        .unwrap_or_else(|| String::from(" 对话 "));
    let block = panel_block(agent_label, app.focus == FocusArea::Composer);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.chat.messages.is_empty() {
        let hint = Paragraph::new(app.lang.empty_chat_hint())
            .style(Style::default().fg(FG_DIM))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(hint, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for message in &app.chat.messages {
        let (speaker, color) = match message.role {
            ChatRole::User => ("我", OK_FG),
            ChatRole::Assistant => ("助手", ACCENT_FG),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{speaker} "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(message.timestamp.clone(), Style::default().fg(FG_DIM)),
        ]));
        for content_line in message.content.lines() {
            lines.push(Line::from(format!("  {content_line}")));
        }
        lines.push(Line::from(""));
    }
    if app.chat.waiting {
        lines.push(Line::from(Span::styled(
            app.lang.waiting_reply(),
            Style::default().fg(WARN_FG),
        )));
    }

    // 簡單的「貼底」捲動：只保留放得下的最後若干行。
    let height = inner.height as usize;
    let start = lines.len().saturating_sub(height);
    let visible: Vec<Line> = lines.into_iter().skip(start).collect();
    f.render_widget(
        Paragraph::new(visible).wrap(Wrap { trim: false }),
        inner,
    );
}

fn render_composer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = panel_block(String::from(" 输入 "), app.focus == FocusArea::Composer);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let text = if app.composer.is_empty() {
        Paragraph::new(app.lang.composer_hint()).style(Style::default().fg(FG_DIM))
    } else {
        Paragraph::new(app.composer.buffer())
    };
    f.render_widget(text, inner);
    if app.page == ConsolePage::Workbench && app.overlay.is_none() {
        let offset = app.composer.display_offset().min(inner.width.saturating_sub(1));
        f.set_cursor(inner.x + offset, inner.y);
    }
}

fn render_reasoning(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = panel_block(format!(" {} ", app.lang.preview_title()), false);
    let inner = block.inner(area);
    f.render_widget(block, area);
    // 推理追蹤：把選中智能體的提示詞編譯成流程圖原始碼展示。
    let source = app
        .agents
        .get(&app.chat.selected_agent_id)
        .map(|agent| flowchart::compile(&agent.prompt))
        .unwrap_or_else(|| flowchart::compile(""));
    let lines: Vec<Line> = source
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(ACCENT_FG))
            .wrap(Wrap { trim: false }),
        inner,
    );
}

// --- 智能體配置頁 ---

fn render_agents_page(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (list_area, detail_area) = list_detail(area, 44);
    let visible = app.agents_panel.visible(&app.agents);

    let items: Vec<ListItem> = visible
        .iter()
        .filter_map(|&index| app.agents.get_at(index))
        .map(|agent| {
            let badge = if agent.enabled {
                Span::styled(app.lang.enabled_label(), Style::default().fg(OK_FG))
            } else {
                Span::styled(app.lang.disabled_label(), Style::default().fg(FG_DIM))
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(agent.name.clone()),
                    Span::styled(format!(" {}", agent.version), Style::default().fg(FG_DIM)),
                    Span::raw("  "),
                    badge,
                ]),
                Line::from(Span::styled(
                    format!("  {}", agent.description),
                    Style::default().fg(FG_DIM),
                )),
            ])
        })
        .collect();
    let title = if app.agents_panel.query.is_empty() {
        format!(" {} ", app.lang.agents_title())
    } else {
        format!(" {} /{} ", app.lang.agents_title(), app.agents_panel.query)
    };
    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.agents_panel.cursor().min(visible.len() - 1)));
    }
    let list = List::new(items)
        .block(panel_block(title, true))
        .highlight_style(highlight_style());
    f.render_stateful_widget(list, list_area, &mut state);

    if let Some(drawer) = app.agents_panel.drawer.as_ref() {
        render_form(
            f,
            detail_area,
            match drawer.editing_id {
                Some(_) => " 编辑智能体 ",
                None => " 创建智能体 ",
            },
            AgentField::ALL
                .iter()
                .map(|field| (field.label(), drawer.field_value(*field)))
                .collect(),
            drawer.cursor(),
        );
        return;
    }

    let block = panel_block(format!(" {} ", app.lang.detail_title()), false);
    let inner = block.inner(detail_area);
    f.render_widget(block, detail_area);
    let Some(agent) = app
        .agents_panel
        .selected_store_index(&app.agents)
        .and_then(|index| app.agents.get_at(index))
    else {
        f.render_widget(
            Paragraph::new("未找到匹配的智能体，尝试调整搜索条件或创建新的智能体")
                .style(Style::default().fg(FG_DIM))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                agent.name.clone(),
                Style::default().fg(ACCENT_FG).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", agent.version), Style::default().fg(FG_DIM)),
        ]),
        Line::from(agent.description.clone()),
        Line::from(""),
        Line::from(format!("对话模型: {}  温度: {}", agent.model, agent.temperature)),
        Line::from(format!(
            "技能挑选: {}  标题生成: {}",
            agent.skill_selection_model, agent.title_generation_model
        )),
        Line::from(Span::styled(
            format!("创建 {}  更新 {}", agent.created_at, agent.updated_at),
            Style::default().fg(FG_DIM),
        )),
        Line::from(""),
    ];
    if agent.mcp_bindings.is_empty() {
        lines.push(Line::from(Span::styled(
            "MCP 挂载: （无）",
            Style::default().fg(FG_DIM),
        )));
    } else {
        lines.push(Line::from("MCP 挂载:"));
        for binding in &agent.mcp_bindings {
            lines.push(Line::from(format!(
                "  {}. {}（{} 个工具启用）",
                binding.priority,
                binding.connector_name,
                binding.enabled_tools.len()
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "提示词:",
        Style::default().fg(FG_DIM),
    )));
    for prompt_line in agent.prompt.lines().take(8) {
        lines.push(Line::from(format!("  {prompt_line}")));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

// --- MCP 管理頁 ---

fn render_mcp_page(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (list_area, detail_area) = list_detail(area, 44);
    let visible = app.mcp_panel.visible(&app.connectors);

    let items: Vec<ListItem> = visible
        .iter()
        .filter_map(|&index| app.connectors.get_at(index))
        .map(|connector| {
            let badge = if connector.enabled {
                Span::styled(app.lang.enabled_label(), Style::default().fg(OK_FG))
            } else {
                Span::styled(app.lang.disabled_label(), Style::default().fg(FG_DIM))
            };
            ListItem::new(vec![
                Line::from(vec![Span::raw(connector.name.clone()), Span::raw("  "), badge]),
                Line::from(Span::styled(
                    format!("  {}", connector.url),
                    Style::default().fg(FG_DIM),
                )),
            ])
        })
        .collect();
    let title = if app.mcp_panel.query.is_empty() {
        format!(" {} ", app.lang.mcp_title())
    } else {
        format!(" {} /{} ", app.lang.mcp_title(), app.mcp_panel.query)
    };
    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.mcp_panel.cursor().min(visible.len() - 1)));
    }
    let list = List::new(items)
        .block(panel_block(title, true))
        .highlight_style(highlight_style());
    f.render_stateful_widget(list, list_area, &mut state);

    if let Some(drawer) = app.mcp_panel.drawer.as_ref() {
        render_form(
            f,
            detail_area,
            match drawer.editing_id {
                Some(_) => " 编辑 MCP 连接器 ",
                None => " 添加 MCP 连接器 ",
            },
            McpField::ALL
                .iter()
                .map(|field| (field.label(), drawer.field_value(*field)))
                .collect(),
            drawer.cursor(),
        );
        return;
    }

    let block = panel_block(format!(" {} ", app.lang.detail_title()), false);
    let inner = block.inner(detail_area);
    f.render_widget(block, detail_area);
    let Some(connector) = app
        .mcp_panel
        .selected_store_index(&app.connectors)
        .and_then(|index| app.connectors.get_at(index))
    else {
        f.render_widget(
            Paragraph::new("没有找到 MCP 连接器，按 n 添加第一个连接器")
                .style(Style::default().fg(FG_DIM))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    };
    let token_hint = if connector.resolved_beartoken().is_some() {
        Span::styled("已配置", Style::default().fg(OK_FG))
    } else {
        Span::styled("未配置", Style::default().fg(WARN_FG))
    };
    let lines = vec![
        Line::from(Span::styled(
            connector.name.clone(),
            Style::default().fg(ACCENT_FG).add_modifier(Modifier::BOLD),
        )),
        Line::from(connector.description.clone()),
        Line::from(""),
        Line::from(format!("地址: {}", connector.url)),
        Line::from(vec![Span::raw("Bearer 凭证: "), token_hint]),
        Line::from(Span::styled(
            format!("创建 {}  更新 {}", connector.created_at, connector.updated_at),
            Style::default().fg(FG_DIM),
        )),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

// --- 服務目錄頁 ---

fn render_catalog_page(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (category_area, services_area, preview_area) =
        catalog_chunks(area, app.catalog_panel.preview_visible);

    // 分類側欄：「全部」+ 各分類（帶服務計數）。
    let mut items: Vec<ListItem> = vec![ListItem::new(Line::from(format!(
        "全部（{}）",
        app.catalog.services_in("all").len()
    )))];
    for category in app.catalog.categories() {
        items.push(ListItem::new(Line::from(format!(
            "{}（{}）",
            category.name,
            app.catalog.service_count(&category.id)
        ))));
    }
    let mut state = ListState::default();
    state.select(Some(app.catalog_panel.category_cursor()));
    let list = List::new(items)
        .block(panel_block(
            format!(" {} ", app.lang.catalog_title()),
            app.focus == FocusArea::List,
        ))
        .highlight_style(highlight_style());
    f.render_stateful_widget(list, category_area, &mut state);

    if let Some(drawer) = app.catalog_panel.drawer.as_ref() {
        render_form(
            f,
            services_area,
            match drawer.editing_id {
                Some(_) => " 编辑服务策略 ",
                None => " 添加服务策略 ",
            },
            ServiceField::ALL
                .iter()
                .map(|field| (field.label(), drawer.field_value(*field, &app.catalog)))
                .collect(),
            drawer.cursor(),
        );
    } else {
        render_service_list(f, app, services_area);
    }

    if let Some(preview_area) = preview_area {
        render_flow_preview(f, app, preview_area);
    }
}

fn render_service_list(f: &mut Frame<'_>, app: &App, area: Rect) {
    let visible = app.catalog_panel.visible_services(&app.catalog);
    let items: Vec<ListItem> = visible
        .iter()
        .filter_map(|&index| app.catalog.service_at(index))
        .map(|service| {
            let status_span = match service.status {
                ServiceStatus::Active => {
                    Span::styled(service.status.label(), Style::default().fg(OK_FG))
                }
                ServiceStatus::Draft => {
                    Span::styled(service.status.label(), Style::default().fg(WARN_FG))
                }
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(service.title.clone()),
                    Span::raw("  "),
                    status_span,
                    Span::styled(
                        format!("  SLA {}", service.sla),
                        Style::default().fg(FG_DIM),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}  {}", service.code, service.description),
                    Style::default().fg(FG_DIM),
                )),
            ])
        })
        .collect();
    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.catalog_panel.service_cursor().min(visible.len() - 1)));
    }
    let list = List::new(items)
        .block(panel_block(
            format!(" 服务列表（{}） ", visible.len()),
            app.focus == FocusArea::Detail,
        ))
        .highlight_style(highlight_style());
    f.render_stateful_widget(list, area, &mut state);
}

fn render_flow_preview(f: &mut Frame<'_>, app: &App, area: Rect) {
    let title = app
        .catalog_panel
        .selected_service(&app.catalog)
        .map(|service| format!(" {}：{} ", app.lang.preview_title(), service.title))
        .unwrap_or_else(|| format!(" {} ", app.lang.preview_title()));
    let block = panel_block(title, false);
    let inner = block.inner(area);
    f.render_widget(block, area);
    let lines: Vec<Line> = app
        .catalog_panel
        .preview()
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(ACCENT_FG))
            .wrap(Wrap { trim: false }),
        inner,
    );
}

// --- 通用表單渲染（編輯抽屜） ---

fn render_form(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    rows: Vec<(&'static str, String)>,
    cursor: usize,
) {
    let block = panel_block(title.to_string(), true);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let items: Vec<ListItem> = rows
        .into_iter()
        .map(|(label, value)| {
            let shown = if value.is_empty() {
                Span::styled("（未填写）", Style::default().fg(FG_DIM))
            } else {
                Span::raw(value)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{label:　<8}"), Style::default().fg(FG_DIM)),
                shown,
            ]))
        })
        .collect();
    let mut state = ListState::default();
    state.select(Some(cursor));

    let chunks = ratatui::layout::Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);
    let list = List::new(items).highlight_style(highlight_style());
    f.render_stateful_widget(list, chunks[0], &mut state);
    f.render_widget(
        Paragraph::new("Enter 编辑 | ←/→ 切换取值 | Ctrl+S 保存 | Esc 关闭")
            .style(Style::default().fg(FG_DIM)),
        chunks[1],
    );
}

// --- 彈出層 ---

fn render_overlay(f: &mut Frame<'_>, app: &App, overlay: &OverlayState) {
    match overlay {
        OverlayState::InputPrompt(prompt) => {
            let area = centered_rect(f.size(), 60, 7);
            f.render_widget(Clear, area);
            let block = panel_block(format!(" {} ", prompt.title), true);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let mut lines = Vec::new();
            if prompt.value.is_empty() {
                lines.push(Line::from(Span::styled(
                    prompt.placeholder.clone(),
                    Style::default().fg(FG_DIM),
                )));
            } else {
                lines.push(Line::from(prompt.value.clone()));
            }
            lines.push(Line::from(""));
            if let Some(error) = prompt.error.as_ref() {
                lines.push(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(ERROR_FG),
                )));
            } else {
                lines.push(Line::from(Span::styled(
                    "Enter 确认 | Esc 取消",
                    Style::default().fg(FG_DIM),
                )));
            }
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
            let offset = cell_width(&prompt.value).min(inner.width.saturating_sub(1));
            f.set_cursor(inner.x + offset, inner.y);
        }
        OverlayState::ConfirmDelete(confirm) => {
            let area = centered_rect(f.size(), 56, 7);
            f.render_widget(Clear, area);
            let block = panel_block(String::from(" 删除确认 "), true);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let selected = |on: bool, label: &str| {
                if on {
                    Span::styled(format!("[ {label} ]"), highlight_style())
                } else {
                    Span::styled(format!("  {label}  "), Style::default().fg(FG_DIM))
                }
            };
            let lines = vec![
                Line::from(confirm.display.clone()),
                Line::from(""),
                Line::from(vec![
                    selected(confirm.confirm_selected(), app.lang.confirm_label()),
                    Span::raw("   "),
                    selected(!confirm.confirm_selected(), app.lang.cancel_label()),
                ]),
            ];
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        }
        OverlayState::AgentSwitcher(switcher) => {
            let height = (switcher.choices.len() as u16 + 4).min(16);
            let area = centered_rect(f.size(), 48, height);
            f.render_widget(Clear, area);
            let block = panel_block(String::from(" 选择智能体 "), true);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let items: Vec<ListItem> = switcher
                .choices
                .iter()
                .map(|choice| {
                    let badge = if choice.enabled {
                        Span::styled(app.lang.enabled_label(), Style::default().fg(OK_FG))
                    } else {
                        Span::styled(app.lang.disabled_label(), Style::default().fg(FG_DIM))
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(format!("{} {}", choice.name, choice.version)),
                        Span::raw("  "),
                        badge,
                    ]))
                })
                .collect();
            let mut state = ListState::default();
            if !switcher.choices.is_empty() {
                state.select(Some(switcher.selected));
            }
            let list = List::new(items).highlight_style(highlight_style());
            f.render_stateful_widget(list, inner, &mut state);
        }
    }
}
