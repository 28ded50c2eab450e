use log::warn;

use super::{App, clock_stamp};
use crate::workbench::ResponderEvent;

impl App {
    /// 每個 tick 執行一次：輪詢回覆後端，把到達的回覆掛進會話。
    pub fn on_tick(&mut self) {
        if self.last_tick.elapsed() >= self.tick_rate {
            self.last_tick = std::time::Instant::now();
        }

        while let Some(event) = self.responder.poll_event() {
            match event {
                ResponderEvent::Reply(text) => {
                    self.chat.push_assistant(text, clock_stamp());
                    self.status_message = String::from("已收到回复");
                }
                ResponderEvent::Error(message) => {
                    warn!("responder error: {message}");
                    self.chat.waiting = false;
                    self.status_message = format!("回复失败: {message}");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::App;
    use crate::config::ConsoleSettings;

    /// 從輸入到回覆的閉環：按鍵 → 發送 → tick 輪詢 → 回覆入列。
    #[tokio::test]
    async fn chat_round_trip_through_tick() {
        let mut app = App::new(PathBuf::from("."), ConsoleSettings::default()).expect("init ok");
        for ch in "如何申请数据库权限".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
                .await;
        }
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .await;
        assert!(app.chat.waiting);
        assert_eq!(app.chat.messages.len(), 1);

        // 回覆由背景任務送出，輪詢直到到達。
        for _ in 0..100 {
            tokio::task::yield_now().await;
            app.on_tick();
            if !app.chat.waiting {
                break;
            }
        }
        assert_eq!(app.chat.messages.len(), 2);
        assert!(app.chat.messages[1].content.contains("权限"));
    }
}
