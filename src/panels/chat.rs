use crate::workbench::{ChatHistory, ChatMessage};

use super::step_cursor;

/// 對話工作台的檢視狀態：歷史列表、當前會話與各種開關。
pub struct ChatPanel {
    histories: Vec<ChatHistory>,
    /// 歷史列表的游標位置。
    cursor: usize,
    /// 已載入的歷史會話（`None` 表示正在新對話裡）。
    opened: Option<usize>,
    /// 當前會話的訊息。
    pub messages: Vec<ChatMessage>,
    /// 當前選用的智能體識別碼。
    pub selected_agent_id: String,
    /// 是否顯示推理追蹤（選中智能體提示詞的流程圖原始碼）。
    pub show_reasoning: bool,
    /// 已送出請求、尚未收到回覆。
    pub waiting: bool,
}

impl ChatPanel {
    pub fn new(histories: Vec<ChatHistory>, default_agent_id: impl Into<String>) -> Self {
        Self {
            histories,
            cursor: 0,
            opened: None,
            messages: Vec::new(),
            selected_agent_id: default_agent_id.into(),
            show_reasoning: false,
            waiting: false,
        }
    }

    pub fn histories(&self) -> &[ChatHistory] {
        &self.histories
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn opened(&self) -> Option<usize> {
        self.opened
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = step_cursor(self.cursor, delta, self.histories.len());
    }

    /// 載入游標所指的歷史會話，回傳該會話當時使用的智能體名稱。
    pub fn open_selected(&mut self) -> Option<String> {
        let history = self.histories.get(self.cursor)?;
        self.messages = history.messages.clone();
        self.opened = Some(self.cursor);
        self.waiting = false;
        Some(history.agent_name.clone())
    }

    /// 開啟一段新對話。
    pub fn start_new(&mut self) {
        self.messages.clear();
        self.opened = None;
        self.waiting = false;
    }

    pub fn push_user(&mut self, content: impl Into<String>, timestamp: impl Into<String>) {
        self.messages.push(ChatMessage::user(content, timestamp));
        self.waiting = true;
    }

    pub fn push_assistant(&mut self, content: impl Into<String>, timestamp: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content, timestamp));
        self.waiting = false;
    }

    pub fn toggle_reasoning(&mut self) {
        self.show_reasoning = !self.show_reasoning;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbench::seed_histories;

    #[test]
    fn opening_a_history_loads_messages_and_agent() {
        let mut panel = ChatPanel::new(seed_histories(), "1");
        panel.move_cursor(1);
        let agent = panel.open_selected().expect("history exists");
        assert_eq!(agent, "运维专家");
        assert_eq!(panel.opened(), Some(1));
        assert_eq!(panel.messages.len(), 2);

        panel.start_new();
        assert!(panel.messages.is_empty());
        assert_eq!(panel.opened(), None);
    }

    #[test]
    fn waiting_flag_follows_message_flow() {
        let mut panel = ChatPanel::new(Vec::new(), "1");
        assert!(panel.open_selected().is_none());
        panel.push_user("你好", "02-06 10:00");
        assert!(panel.waiting);
        panel.push_assistant("你好，请问有什么可以帮您？", "02-06 10:00");
        assert!(!panel.waiting);
    }
}
