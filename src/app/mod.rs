//! `app` 模組是控制台的核心：持有全部應用狀態、處理鍵盤輸入、
//! 在 tick 上輪詢回覆後端，並協調各頁面的檢視狀態與資料儲存。

mod init;
mod keyboard;
mod overlays;
mod state;
mod tick;

pub use state::{
    AgentChoice, AgentSwitcherState, App, Composer, ConfirmDeleteState, DeleteTarget,
    InputPromptState, OverlayState, PendingInputAction,
};

use chrono::{Local, Utc};

/// 今天的日期（`YYYY-MM-DD`），智能體的建立/更新日期用。
pub(crate) fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// 訊息列表顯示用的時間戳（`MM-dd HH:mm`）。
pub(crate) fn clock_stamp() -> String {
    Local::now().format("%m-%d %H:%M").to_string()
}

/// 連接器記錄用的 ISO 8601 時間戳。
pub(crate) fn iso_now() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
