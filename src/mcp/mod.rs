//! MCP（Model Context Protocol）連接器的資料結構與記憶體儲存。
//!
//! 對應後台的「MCP 管理」頁：維護連接器的端點、憑證與啟停狀態，
//! 並提供智能體掛載連接器時的綁定結構與可選模板目錄。
//! 這裡只管理設定，實際的協定呼叫不在本程式範圍內。

mod model;
mod store;

pub use model::{
    McpBinding, McpConnector, McpDraft, McpTemplate, binding_from_template, connector_templates,
};
pub use store::McpStore;
