//! 對話工作台：會話資料結構、歷史記錄與回覆後端。
//!
//! 後端以 [`ChatResponder`] 抽象：介面是非同步的，事件經由 channel
//! 輪詢取回，與真實服務接線時不需要改動 UI 層。目前唯一的實作是
//! 確定性的預置回覆（[`CannedResponder`]），不連網。

mod responder;

pub use responder::{CannedResponder, ChatPrompt, ChatResponder, ResponderEvent};

use serde::{Deserialize, Serialize};

/// 訊息的發話方。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// 會話中的一條訊息。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    /// 顯示用時間（`MM-dd HH:mm`）。
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// 一段歷史會話。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatHistory {
    pub id: String,
    pub title: String,
    /// 會話發生時使用的智能體名稱。
    pub agent_name: String,
    pub timestamp: String,
    pub messages: Vec<ChatMessage>,
}

/// 預置的歷史會話。
pub fn seed_histories() -> Vec<ChatHistory> {
    vec![
        ChatHistory {
            id: String::from("1"),
            title: String::from("如何配置服务目录权限？"),
            agent_name: String::from("BKLite ITSM 助手"),
            timestamp: String::from("01-28 14:30"),
            messages: vec![
                ChatMessage::user("如何配置服务目录权限？", "01-28 14:30"),
                ChatMessage::assistant(
                    "配置服务目录权限需要以下几个步骤：\n\n\
                     1. 进入系统管理 > 权限管理\n\
                     2. 选择服务目录模块\n\
                     3. 设置相应的角色和权限\n\
                     4. 保存配置即可生效\n\n\
                     您需要具体配置哪个方面的权限呢？",
                    "01-28 14:30",
                ),
                ChatMessage::user("我想限制某些用户组只能查看特定的服务", "01-28 14:31"),
                ChatMessage::assistant(
                    "明白了，您可以通过以下方式实现：\n\n\
                     1. 在权限管理中创建自定义用户组\n\
                     2. 为该用户组设置服务可见性规则\n\
                     3. 在服务目录中为每个服务指定可访问的用户组\n\
                     4. 这样用户登录后只能看到被授权的服务\n\n\
                     需要我提供更详细的操作步骤吗？",
                    "01-28 14:31",
                ),
            ],
        },
        ChatHistory {
            id: String::from("2"),
            title: String::from("服务器监控告警规则设置"),
            agent_name: String::from("运维专家"),
            timestamp: String::from("01-27 16:20"),
            messages: vec![
                ChatMessage::user("如何设置服务器CPU使用率告警？", "01-27 16:20"),
                ChatMessage::assistant(
                    "设置CPU使用率告警的步骤如下：\n\n\
                     1. 进入监控平台 > 告警配置\n\
                     2. 创建新的告警规则\n\
                     3. 选择指标类型：CPU使用率\n\
                     4. 设置阈值（建议：警告80%，严重90%）\n\
                     5. 配置通知方式（邮件、短信、企业微信等）\n\
                     6. 设置告警接收人\n\n\
                     您想设置什么级别的告警阈值？",
                    "01-27 16:21",
                ),
            ],
        },
        ChatHistory {
            id: String::from("3"),
            title: String::from("知识库文档管理"),
            agent_name: String::from("知识库助手"),
            timestamp: String::from("01-26 10:15"),
            messages: vec![
                ChatMessage::user("如何批量导入知识库文档？", "01-26 10:15"),
                ChatMessage::assistant(
                    "批量导入知识库文档有以下几种方式：\n\n\
                     1. Excel批量导入：准备标准模板，填写文档信息后上传\n\
                     2. 文件夹导入：支持直接上传整个文件夹，系统自动识别文档类型\n\
                     3. API接口导入：适合需要定期同步的场景\n\n\
                     您有多少文档需要导入？是什么类型的文档？",
                    "01-26 10:16",
                ),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_histories_carry_agent_names() {
        let histories = seed_histories();
        assert_eq!(histories.len(), 3);
        assert_eq!(histories[1].agent_name, "运维专家");
        assert!(histories.iter().all(|h| !h.messages.is_empty()));
        assert!(
            histories
                .iter()
                .all(|h| h.messages[0].role == ChatRole::User)
        );
    }
}
