//! 智能體（Agent）的資料結構與記憶體儲存。
//!
//! 對應管理後台的「智能体配置」頁：每個智能體有提示詞、模型與溫度等
//! 推理參數，以及掛載的 MCP 連接器綁定。所有資料都是種子資料加上
//! 本次執行期間的修改，不落盤。

mod model;
mod store;

pub use model::{AgentDefinition, AgentDraft, ModelOption, available_models};
pub use store::AgentStore;
