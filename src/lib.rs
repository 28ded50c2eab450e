//! agentdesk：面向 AI 智能體運營的終端管理控制台。
//!
//! 四個頁面對應四塊職能：對話工作台、智能體配置、MCP 連接器管理、
//! 服務目錄。資料全部是記憶體內的種子資料加會話期修改；核心的
//! 可複用邏輯是 [`flowchart`] 模組裡的 CoT 指令 → 流程圖編譯器。

pub mod agents;
pub mod app;
pub mod catalog;
pub mod config;
pub mod definitions;
pub mod event;
pub mod flowchart;
pub mod i18n;
pub mod mcp;
pub mod panels;
pub mod store;
pub mod tui;
pub mod ui;
pub mod workbench;
