use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// 發給回覆後端的一次請求。
#[derive(Debug, Clone)]
pub struct ChatPrompt {
    /// 當前選用的智能體名稱，後端可據此調整口吻。
    pub agent_name: String,
    /// 使用者輸入的訊息原文。
    pub text: String,
}

/// 回覆後端送回的事件。
#[derive(Debug)]
pub enum ResponderEvent {
    /// 一條完整的回覆文字。
    Reply(String),
    /// 後端處理失敗的說明。
    Error(String),
}

/// 對話回覆後端的抽象介面。
///
/// `send` 把請求丟進後端後立即返回，回覆稍後經 `poll_event` 取回，
/// UI 在每個 tick 輪詢一次。
#[async_trait]
pub trait ChatResponder: Send {
    fn name(&self) -> &str;
    async fn send(&mut self, prompt: ChatPrompt) -> Result<()>;
    fn poll_event(&mut self) -> Option<ResponderEvent>;
}

/// 預置回覆後端：按關鍵字查表給出固定回覆。
///
/// 同樣的輸入永遠得到同樣的回覆，方便演示與測試；真實的模型服務
/// 接入時替換掉這個實作即可。
pub struct CannedResponder {
    tx: UnboundedSender<ResponderEvent>,
    rx: UnboundedReceiver<ResponderEvent>,
}

impl CannedResponder {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatResponder for CannedResponder {
    fn name(&self) -> &str {
        "预置回复"
    }

    async fn send(&mut self, prompt: ChatPrompt) -> Result<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let reply = canned_reply(&prompt);
            let _ = tx.send(ResponderEvent::Reply(reply));
        });
        Ok(())
    }

    fn poll_event(&mut self) -> Option<ResponderEvent> {
        self.rx.try_recv().ok()
    }
}

/// 關鍵字 → 回覆的查表。依序嘗試，第一個命中的生效；
/// 全部不命中時退回通用回覆。
fn canned_reply(prompt: &ChatPrompt) -> String {
    const RULES: &[(&[&str], &str)] = &[
        (
            &["权限", "授权"],
            "权限相关的请求建议按以下步骤处理：\n\
             1. 确认申请人所属部门与岗位\n\
             2. 在权限管理中核对现有授权\n\
             3. 提交权限申请工单并等待审批\n\
             需要我帮您起草一张权限申请工单吗？",
        ),
        (
            &["告警", "监控", "CPU"],
            "监控告警建议从阈值入手：\n\
             1. 打开监控平台的告警配置\n\
             2. 为目标指标设置警告与严重两级阈值\n\
             3. 配置通知渠道与接收人\n\
             您关注的是哪台主机或哪个指标？",
        ),
        (
            &["知识库", "文档"],
            "知识库支持 Excel 模板、文件夹与 API 三种导入方式，\
             批量场景推荐先用模板整理元数据再上传。需要模板链接吗？",
        ),
        (
            &["VPN", "远程"],
            "VPN 申请会经过部门权限校验、经理审批与 IT 开通三个阶段，\
             一般在 8 小时内完成。您可以直接在服务目录里发起申请。",
        ),
    ];

    for (keywords, reply) in RULES {
        if keywords.iter().any(|keyword| prompt.text.contains(keyword)) {
            return (*reply).to_string();
        }
    }
    format!(
        "我是{}。已收到您的问题：「{}」。\n\
         这个问题暂时没有命中预置知识，请补充更多上下文，\
         或在服务目录中选择对应的服务发起工单。",
        prompt.agent_name,
        prompt.text.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(text: &str) -> ChatPrompt {
        ChatPrompt {
            agent_name: String::from("BKLite ITSM 助手"),
            text: text.to_string(),
        }
    }

    #[test]
    fn keyword_table_is_deterministic() {
        let first = canned_reply(&prompt("如何申请数据库权限？"));
        assert!(first.contains("权限申请工单"));
        assert_eq!(first, canned_reply(&prompt("如何申请数据库权限？")));

        assert!(canned_reply(&prompt("CPU 告警怎么配")).contains("阈值"));
        assert!(canned_reply(&prompt("随便聊聊")).contains("BKLite ITSM 助手"));
    }

    #[tokio::test]
    async fn responder_delivers_reply_through_channel() {
        let mut responder = CannedResponder::new();
        assert!(responder.poll_event().is_none());

        responder
            .send(prompt("知识库文档怎么导入"))
            .await
            .expect("send never fails");
        // 回覆由背景任務送出，讓出執行權等它跑完。
        tokio::task::yield_now().await;
        let event = loop {
            if let Some(event) = responder.poll_event() {
                break event;
            }
            tokio::task::yield_now().await;
        };
        match event {
            ResponderEvent::Reply(text) => assert!(text.contains("导入")),
            ResponderEvent::Error(message) => panic!("unexpected error: {message}"),
        }
    }
}
