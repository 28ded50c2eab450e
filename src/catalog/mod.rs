//! 服務目錄：目錄分類、服務條目與流程配置。
//!
//! 對應後台的「服务目录」頁。每個服務掛在一個目錄下，帶有 SLA 與
//! 協作規範文字（CoT 指令），後者經 [`crate::flowchart::compile`]
//! 轉成流程圖預覽。流程配置（節點、表單欄位與欄位權限）以 JSON
//! 與外部交換。

mod model;
mod store;

pub use model::{
    Category, FieldInput, FieldPermission, Service, ServiceDraft, ServiceStatus, WorkflowConfig,
    WorkflowField, WorkflowNode, WorkflowNodeKind, example_workflow_config,
};
pub use store::CatalogStore;
