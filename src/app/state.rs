//! 應用狀態的核心定義：`App` 結構、輸入框狀態與彈出層狀態。

use std::path::PathBuf;
use std::time::{Duration, Instant};

use unicode_width::UnicodeWidthChar;

use crate::agents::AgentStore;
use crate::catalog::CatalogStore;
use crate::config::{ConsoleSettings, LanguageChoice};
use crate::definitions::{ConsolePage, FocusArea};
use crate::i18n::Language;
use crate::mcp::McpStore;
use crate::panels::agents::{AgentField, AgentsPanel};
use crate::panels::catalog::{CatalogPanel, ServiceField};
use crate::panels::chat::ChatPanel;
use crate::panels::mcp::{McpField, McpPanel};
use crate::workbench::ChatResponder;

/// 整個控制台的單一狀態來源。
pub struct App {
    // --- 核心 ---
    pub should_quit: bool,
    pub page: ConsolePage,
    pub focus: FocusArea,
    pub status_message: String,
    pub workspace_root: PathBuf,
    pub settings: ConsoleSettings,

    // --- 語言 ---
    pub(crate) lang_state: LanguageChoice,
    pub lang: Box<dyn Language>,

    // --- 資料儲存 ---
    pub agents: AgentStore,
    pub connectors: McpStore,
    pub catalog: CatalogStore,

    // --- 頁面檢視狀態 ---
    pub chat: ChatPanel,
    pub agents_panel: AgentsPanel,
    pub mcp_panel: McpPanel,
    pub catalog_panel: CatalogPanel,

    // --- 輸入與彈出層 ---
    pub composer: Composer,
    pub overlay: Option<OverlayState>,

    // --- 對話後端 ---
    pub(crate) responder: Box<dyn ChatResponder>,

    // --- tick ---
    pub(crate) last_tick: Instant,
    pub(crate) tick_rate: Duration,
}

impl App {
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// 對話輸入框的狀態：單行文字緩衝、游標與輸入歷史。
#[derive(Clone, Default)]
pub struct Composer {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    history_index: Option<usize>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn insert_char(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.history_index = None;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.drain(idx..self.cursor);
            self.cursor = idx;
            self.history_index = None;
        }
    }

    pub fn move_left(&mut self) {
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        } else {
            self.cursor = 0;
        }
    }

    pub fn move_right(&mut self) {
        if let Some((offset, ch)) = self.buffer[self.cursor..].char_indices().next() {
            self.cursor += offset + ch.len_utf8();
        } else {
            self.cursor = self.buffer.len();
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.history_index = None;
    }

    /// 取走輸入內容並記入歷史。
    pub fn take(&mut self) -> String {
        let content = std::mem::take(&mut self.buffer);
        if !content.trim().is_empty() {
            self.history.push(content.clone());
        }
        self.cursor = 0;
        self.history_index = None;
        content
    }

    /// 往回翻一條輸入歷史。
    pub fn history_previous(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        let target = match self.history_index {
            Some(0) => 0,
            Some(idx) => idx.saturating_sub(1),
            None => self.history.len().saturating_sub(1),
        };
        self.load_history(target)
    }

    /// 往前翻一條輸入歷史；翻到盡頭回到空白輸入。
    pub fn history_next(&mut self) -> bool {
        if self.history.is_empty() {
            return false;
        }
        match self.history_index {
            Some(idx) if idx + 1 < self.history.len() => self.load_history(idx + 1),
            _ => {
                self.history_index = None;
                self.buffer.clear();
                self.cursor = 0;
                true
            }
        }
    }

    fn load_history(&mut self, index: usize) -> bool {
        if let Some(entry) = self.history.get(index).cloned() {
            self.buffer = entry;
            self.cursor = self.buffer.len();
            self.history_index = Some(index);
            true
        } else {
            false
        }
    }

    /// 游標在畫面上的列偏移（以顯示寬度計，CJK 算兩格）。
    pub fn display_offset(&self) -> u16 {
        let width: usize = self.buffer[..self.cursor]
            .chars()
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1).max(1))
            .sum();
        width.min(u16::MAX as usize) as u16
    }
}

/// 當前展示的彈出層。
pub enum OverlayState {
    InputPrompt(InputPromptState),
    ConfirmDelete(ConfirmDeleteState),
    AgentSwitcher(AgentSwitcherState),
}

/// 文字輸入彈出層。
pub struct InputPromptState {
    pub title: String,
    pub value: String,
    pub placeholder: String,
    pub action: PendingInputAction,
    pub error: Option<String>,
}

impl InputPromptState {
    pub fn new(
        title: impl Into<String>,
        placeholder: impl Into<String>,
        action: PendingInputAction,
        initial: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            value: initial.unwrap_or_default(),
            placeholder: placeholder.into(),
            action,
            error: None,
        }
    }
}

/// 輸入確認後要執行的動作。建立分類是三步串聯的輸入，
/// 已收集的值直接帶在動作裡。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingInputAction {
    SearchAgents,
    SearchConnectors,
    AgentField(AgentField),
    McpField(McpField),
    ServiceField(ServiceField),
    CategoryName,
    CategoryCode { name: String },
    CategoryDescription { name: String, code: String },
}

/// 刪除確認彈出層。
pub struct ConfirmDeleteState {
    pub target: DeleteTarget,
    pub display: String,
    pub selected_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Connector { id: String },
    Service { id: String },
    Category { id: String },
}

impl ConfirmDeleteState {
    pub fn new(target: DeleteTarget, display: impl Into<String>) -> Self {
        Self {
            target,
            display: display.into(),
            selected_index: 0,
        }
    }

    pub fn toggle_selection(&mut self) {
        self.selected_index = (self.selected_index + 1) % 2;
    }

    pub fn confirm_selected(&self) -> bool {
        self.selected_index == 0
    }
}

/// 智能體切換彈出層的一個候選項。
#[derive(Debug, Clone)]
pub struct AgentChoice {
    pub id: String,
    pub name: String,
    pub version: String,
    pub enabled: bool,
}

/// 智能體切換彈出層。
pub struct AgentSwitcherState {
    pub choices: Vec<AgentChoice>,
    pub selected: usize,
}

impl AgentSwitcherState {
    pub fn new(choices: Vec<AgentChoice>, selected: usize) -> Self {
        let mut state = Self {
            choices,
            selected: 0,
        };
        if !state.choices.is_empty() {
            state.selected = selected.min(state.choices.len() - 1);
        }
        state
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.choices.is_empty() {
            return;
        }
        let max = self.choices.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, max) as usize;
    }

    pub fn selected_choice(&self) -> Option<&AgentChoice> {
        self.choices.get(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composer_cursor_moves_over_multibyte_chars() {
        let mut composer = Composer::new();
        for ch in "中a文".chars() {
            composer.insert_char(ch);
        }
        assert_eq!(composer.buffer(), "中a文");
        assert_eq!(composer.display_offset(), 5);

        composer.move_left();
        assert_eq!(composer.display_offset(), 3);
        composer.backspace();
        assert_eq!(composer.buffer(), "中文");
        composer.move_right();
        assert_eq!(composer.display_offset(), 4);
    }

    #[test]
    fn composer_history_navigation() {
        let mut composer = Composer::new();
        for text in ["第一条", "第二条"] {
            for ch in text.chars() {
                composer.insert_char(ch);
            }
            assert_eq!(composer.take(), text);
        }
        assert!(composer.is_empty());

        assert!(composer.history_previous());
        assert_eq!(composer.buffer(), "第二条");
        assert!(composer.history_previous());
        assert_eq!(composer.buffer(), "第一条");
        assert!(composer.history_next());
        assert_eq!(composer.buffer(), "第二条");
        assert!(composer.history_next());
        assert!(composer.is_empty());
    }

    #[test]
    fn confirm_delete_toggles_between_two_buttons() {
        let mut state = ConfirmDeleteState::new(
            DeleteTarget::Service {
                id: String::from("1"),
            },
            "工作证明开具",
        );
        assert!(state.confirm_selected());
        state.toggle_selection();
        assert!(!state.confirm_selected());
        state.toggle_selection();
        assert!(state.confirm_selected());
    }
}
