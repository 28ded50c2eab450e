use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::debug;

use super::{App, Composer};
use crate::agents::AgentStore;
use crate::catalog::CatalogStore;
use crate::config::{ConsoleSettings, LanguageChoice};
use crate::definitions::{ConsolePage, FocusArea};
use crate::i18n::{English, Language, SimplifiedChinese};
use crate::mcp::McpStore;
use crate::panels::agents::AgentsPanel;
use crate::panels::catalog::CatalogPanel;
use crate::panels::chat::ChatPanel;
use crate::panels::mcp::McpPanel;
use crate::workbench::{CannedResponder, seed_histories};

impl App {
    /// 建立控制台初始狀態：載入種子資料、接上預置回覆後端。
    pub fn new(workspace_root: PathBuf, settings: ConsoleSettings) -> Result<Self> {
        let workspace_root = workspace_root.canonicalize().unwrap_or(workspace_root);
        debug!("initializing console, workspace={}", workspace_root.display());

        let agents = AgentStore::with_seed_data();
        let connectors = McpStore::with_seed_data();
        let catalog = CatalogStore::with_seed_data();

        // 預設選中第一個啟用的智能體。
        let default_agent_id = agents
            .enabled()
            .first()
            .map(|agent| agent.id.clone())
            .unwrap_or_default();
        let chat = ChatPanel::new(seed_histories(), default_agent_id);
        let catalog_panel = CatalogPanel::new(&catalog);

        let lang: Box<dyn Language> = match settings.language {
            LanguageChoice::SimplifiedChinese => Box::new(SimplifiedChinese),
            LanguageChoice::English => Box::new(English),
        };
        let status_message = lang.status_hint().to_string();
        let tick_rate = Duration::from_millis(settings.tick_rate_ms.max(50));

        Ok(Self {
            should_quit: false,
            page: ConsolePage::Workbench,
            focus: FocusArea::Composer,
            status_message,
            workspace_root,
            lang_state: settings.language,
            lang,
            settings,
            agents,
            connectors,
            catalog,
            chat,
            agents_panel: AgentsPanel::new(),
            mcp_panel: McpPanel::new(),
            catalog_panel,
            composer: Composer::new(),
            overlay: None,
            responder: Box::new(CannedResponder::new()),
            last_tick: Instant::now(),
            tick_rate,
        })
    }

    /// 在簡中與英文之間切換介面語言，並把選擇寫回設定檔。
    pub(crate) fn toggle_language(&mut self) {
        let next = match self.lang_state {
            LanguageChoice::SimplifiedChinese => LanguageChoice::English,
            LanguageChoice::English => LanguageChoice::SimplifiedChinese,
        };
        self.lang_state = next;
        self.lang = match next {
            LanguageChoice::SimplifiedChinese => Box::new(SimplifiedChinese),
            LanguageChoice::English => Box::new(English),
        };
        self.settings.language = next;
        if let Err(err) = self.settings.save_to_file(&self.workspace_root) {
            log::warn!("failed to persist language choice: {err:#}");
        }
        self.status_message = self.lang.status_hint().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_starts_on_workbench_with_seeded_stores() {
        let app = App::new(PathBuf::from("."), ConsoleSettings::default()).expect("init ok");
        assert_eq!(app.page, ConsolePage::Workbench);
        assert_eq!(app.chat.selected_agent_id, "1");
        assert_eq!(app.agents.all().len(), 4);
        assert_eq!(app.connectors.all().len(), 1);
        assert_eq!(app.catalog.categories().len(), 6);
        assert!(!app.should_quit);
    }
}
