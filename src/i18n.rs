//! 介面文案的多語言支援。預設簡體中文（與原後台一致），可切換英文。

pub trait Language {
    fn workbench_title(&self) -> &'static str;
    fn agents_title(&self) -> &'static str;
    fn mcp_title(&self) -> &'static str;
    fn catalog_title(&self) -> &'static str;
    fn history_title(&self) -> &'static str;
    fn preview_title(&self) -> &'static str;
    fn detail_title(&self) -> &'static str;
    fn composer_hint(&self) -> &'static str;
    fn empty_chat_hint(&self) -> &'static str;
    fn status_hint(&self) -> &'static str;
    fn enabled_label(&self) -> &'static str;
    fn disabled_label(&self) -> &'static str;
    fn confirm_label(&self) -> &'static str;
    fn cancel_label(&self) -> &'static str;
    fn waiting_reply(&self) -> &'static str;
}

pub struct English;
impl Language for English {
    fn workbench_title(&self) -> &'static str { "Workbench" }
    fn agents_title(&self) -> &'static str { "Agents" }
    fn mcp_title(&self) -> &'static str { "MCP Connectors" }
    fn catalog_title(&self) -> &'static str { "Service Catalog" }
    fn history_title(&self) -> &'static str { "History" }
    fn preview_title(&self) -> &'static str { "Flow Preview" }
    fn detail_title(&self) -> &'static str { "Details" }
    fn composer_hint(&self) -> &'static str { "Type a message, Enter to send" }
    fn empty_chat_hint(&self) -> &'static str { "Pick a past conversation or start a new one" }
    fn status_hint(&self) -> &'static str {
        "Tab switch page | n new | e edit | d delete | t toggle | Ctrl+L language | Ctrl+Q quit"
    }
    fn enabled_label(&self) -> &'static str { "running" }
    fn disabled_label(&self) -> &'static str { "disabled" }
    fn confirm_label(&self) -> &'static str { "Confirm" }
    fn cancel_label(&self) -> &'static str { "Cancel" }
    fn waiting_reply(&self) -> &'static str { "Waiting for reply..." }
}

pub struct SimplifiedChinese;
impl Language for SimplifiedChinese {
    fn workbench_title(&self) -> &'static str { "对话工作台" }
    fn agents_title(&self) -> &'static str { "智能体配置" }
    fn mcp_title(&self) -> &'static str { "MCP 管理" }
    fn catalog_title(&self) -> &'static str { "服务目录" }
    fn history_title(&self) -> &'static str { "历史对话" }
    fn preview_title(&self) -> &'static str { "流程图预览" }
    fn detail_title(&self) -> &'static str { "详情" }
    fn composer_hint(&self) -> &'static str { "输入消息，Enter 发送" }
    fn empty_chat_hint(&self) -> &'static str { "选择一个历史对话或开始新对话" }
    fn status_hint(&self) -> &'static str {
        "Tab 切换页面 | n 新建 | e 编辑 | d 删除 | t 启停 | Ctrl+L 切换语言 | Ctrl+Q 退出"
    }
    fn enabled_label(&self) -> &'static str { "运行中" }
    fn disabled_label(&self) -> &'static str { "已停用" }
    fn confirm_label(&self) -> &'static str { "确定" }
    fn cancel_label(&self) -> &'static str { "取消" }
    fn waiting_reply(&self) -> &'static str { "正在等待回复..." }
}
