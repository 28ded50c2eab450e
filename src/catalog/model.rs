use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// 服務目錄裡的一個分類。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// 英文代號，例如 `email-services`。
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
}

/// 服務的發佈狀態。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Active,
    Draft,
}

impl ServiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceStatus::Active => "已上线",
            ServiceStatus::Draft => "草稿",
        }
    }
}

/// 目錄下的一個服務條目。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    /// 英文代號，例如 `request-leave`。
    pub code: String,
    pub description: String,
    pub status: ServiceStatus,
    /// SLA 時限，例如 `24h`。
    pub sla: String,
    /// 所屬分類的識別碼。
    pub category_id: String,
    /// 協作規範：描述該服務處理流程的 CoT 指令文字，
    /// 流程圖預覽直接由這段文字編譯而來。
    #[serde(default)]
    pub collaboration_rules: String,
    /// 由規範文件解析出的流程配置（可缺省）。
    #[serde(default)]
    pub workflow: Option<WorkflowConfig>,
}

impl Service {
    pub fn matches(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.code.to_lowercase().contains(&needle)
    }
}

/// 服務編輯抽屜的表單狀態。
#[derive(Debug, Clone, Default)]
pub struct ServiceDraft {
    pub category_id: String,
    pub title: String,
    pub code: String,
    pub description: String,
    pub sla: String,
    pub collaboration_rules: String,
    pub enabled: bool,
}

impl ServiceDraft {
    pub fn from_service(service: &Service) -> Self {
        Self {
            category_id: service.category_id.clone(),
            title: service.title.clone(),
            code: service.code.clone(),
            description: service.description.clone(),
            sla: service.sla.trim_end_matches('h').to_string(),
            collaboration_rules: service.collaboration_rules.clone(),
            enabled: service.status == ServiceStatus::Active,
        }
    }

    /// 校驗順序與原後台一致：先目錄、再名稱、再編碼。
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.category_id.trim().is_empty() {
            return Err(StoreError::invalid("请选择所属目录"));
        }
        if self.title.trim().is_empty() {
            return Err(StoreError::invalid("请输入服务名称"));
        }
        if self.code.trim().is_empty() {
            return Err(StoreError::invalid("请输入服务编码"));
        }
        Ok(())
    }
}

/// 流程配置：由業務規範文件解析出的節點、欄位與權限，JSON 交換格式。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowConfig {
    /// 原始協作規範文字。
    pub script: String,
    /// SLA 檔位，例如 `8h`。
    pub sla_tier: String,
    pub nodes: Vec<WorkflowNode>,
    pub fields: Vec<WorkflowField>,
    /// 演示用的預填資料。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_data: Option<BTreeMap<String, String>>,
}

/// 流程中的一個節點。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: WorkflowNodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowNodeKind {
    Start,
    Approval,
    Processing,
    End,
}

impl WorkflowNodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowNodeKind::Start => "发起",
            WorkflowNodeKind::Approval => "审批",
            WorkflowNodeKind::Processing => "处理",
            WorkflowNodeKind::End => "完成",
        }
    }
}

/// 流程表單裡的一個欄位，以及它在各節點的可見性。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowField {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub input: FieldInput,
    /// 節點識別碼 → 該節點對此欄位的權限。
    pub permissions: BTreeMap<String, FieldPermission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldInput {
    Text,
    Select,
    Date,
    Textarea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPermission {
    Read,
    Write,
    Hide,
}

impl FieldPermission {
    pub fn label(&self) -> &'static str {
        match self {
            FieldPermission::Read => "只读",
            FieldPermission::Write => "编辑",
            FieldPermission::Hide => "隐藏",
        }
    }
}

/// 內建的示例流程配置（VPN 申請），用於空服務的流程頁演示。
pub fn example_workflow_config() -> WorkflowConfig {
    let script = "### 协作规范\n\
                  当用户发起VPN申请时，系统需校验其部门权限。\n\
                  \n\
                  **提单阶段**\n\
                  - 收集使用时长和原因\n\
                  - 验证申请人身份信息\n\
                  \n\
                  **审批阶段**\n\
                  - 经理需审核合规性\n\
                  - 检查申请原因是否充分\n\
                  \n\
                  **处理阶段**\n\
                  - IT 开通 VPN 权限\n\
                  - 发送通知给申请人";

    let node = |id: &str, label: &str, kind: WorkflowNodeKind| WorkflowNode {
        id: id.to_string(),
        label: label.to_string(),
        kind,
    };
    let permissions = |entries: &[(&str, FieldPermission)]| {
        entries
            .iter()
            .map(|(node_id, permission)| (node_id.to_string(), *permission))
            .collect::<BTreeMap<_, _>>()
    };

    WorkflowConfig {
        script: script.to_string(),
        sla_tier: String::from("8h"),
        nodes: vec![
            node("start", "发起申请", WorkflowNodeKind::Start),
            node("manager_approve", "经理审批", WorkflowNodeKind::Approval),
            node("fulfillment", "IT开通", WorkflowNodeKind::Processing),
        ],
        fields: vec![
            WorkflowField {
                key: String::from("reason"),
                label: String::from("申请原因"),
                input: FieldInput::Textarea,
                permissions: permissions(&[
                    ("start", FieldPermission::Write),
                    ("manager_approve", FieldPermission::Read),
                    ("fulfillment", FieldPermission::Read),
                ]),
            },
            WorkflowField {
                key: String::from("duration"),
                label: String::from("使用时长(天)"),
                input: FieldInput::Select,
                permissions: permissions(&[
                    ("start", FieldPermission::Write),
                    ("manager_approve", FieldPermission::Read),
                    ("fulfillment", FieldPermission::Read),
                ]),
            },
            WorkflowField {
                key: String::from("manager_comment"),
                label: String::from("审批意见"),
                input: FieldInput::Textarea,
                permissions: permissions(&[
                    ("start", FieldPermission::Hide),
                    ("manager_approve", FieldPermission::Write),
                    ("fulfillment", FieldPermission::Read),
                ]),
            },
            WorkflowField {
                key: String::from("it_note"),
                label: String::from("处理备注"),
                input: FieldInput::Text,
                permissions: permissions(&[
                    ("start", FieldPermission::Hide),
                    ("manager_approve", FieldPermission::Hide),
                    ("fulfillment", FieldPermission::Write),
                ]),
            },
        ],
        mock_data: Some(
            [
                ("reason", "需要远程访问公司内网资源进行项目开发"),
                ("duration", "30"),
                ("manager_comment", ""),
                ("it_note", ""),
            ]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_config_round_trips_through_json() {
        let config = example_workflow_config();
        let json = serde_json::to_string_pretty(&config).expect("serializable");
        let parsed: WorkflowConfig = serde_json::from_str(&json).expect("parseable");
        assert_eq!(parsed, config);
        // 欄位型別標籤沿用外部格式的 "type" 命名。
        assert!(json.contains("\"type\": \"textarea\""));
        assert!(json.contains("\"type\": \"start\""));
    }

    #[test]
    fn workflow_config_accepts_external_json() {
        let json = r#"{
            "script": "测试",
            "sla_tier": "4h",
            "nodes": [
                { "id": "start", "label": "发起", "type": "start" },
                { "id": "done", "label": "归档", "type": "end" }
            ],
            "fields": [
                {
                    "key": "note",
                    "label": "备注",
                    "type": "text",
                    "permissions": { "start": "write", "done": "read" }
                }
            ]
        }"#;
        let parsed: WorkflowConfig = serde_json::from_str(json).expect("external shape parses");
        assert_eq!(parsed.nodes.len(), 2);
        assert_eq!(parsed.nodes[1].kind, WorkflowNodeKind::End);
        assert_eq!(
            parsed.fields[0].permissions.get("start"),
            Some(&FieldPermission::Write)
        );
        assert_eq!(parsed.mock_data, None);
    }

    #[test]
    fn service_draft_validation_order() {
        let mut draft = ServiceDraft::default();
        assert_eq!(draft.validate(), Err(StoreError::invalid("请选择所属目录")));
        draft.category_id = String::from("hr");
        assert_eq!(draft.validate(), Err(StoreError::invalid("请输入服务名称")));
        draft.title = String::from("请假申请");
        assert_eq!(draft.validate(), Err(StoreError::invalid("请输入服务编码")));
        draft.code = String::from("request-leave");
        assert_eq!(draft.validate(), Ok(()));
    }
}
