use std::time::Duration;

use agentdesk::app::App;
use agentdesk::config::ConsoleSettings;
use agentdesk::event::Event;
use agentdesk::tui::{init, restore};
use agentdesk::ui::render;
use anyhow::{Context, Result};
use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures_util::StreamExt;
use log::{LevelFilter, info};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

#[tokio::main]
async fn main() -> Result<()> {
    let workspace_root = std::env::current_dir().context("无法取得当前工作目录")?;
    let settings = ConsoleSettings::load(&workspace_root)?;
    init_logging(&settings)?;
    info!("agentdesk starting, workspace={}", workspace_root.display());

    let tick_rate = Duration::from_millis(settings.tick_rate_ms.max(50));
    let mut app = App::new(workspace_root, settings)?;

    let mut tui = init()?;
    let mut stream = EventStream::new();
    let mut interval = tokio::time::interval(tick_rate);

    while !app.should_quit {
        tui.draw(|frame| render(frame, &app))?;

        let event = tokio::select! {
            _ = interval.tick() => Event::Tick,
            maybe_event = stream.next() => {
                match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                    // 其餘終端事件（尺寸變化等）下一幀自然重繪。
                    Some(Ok(_)) => continue,
                    // 事件流結束或出錯時直接退出主迴圈。
                    Some(Err(_)) | None => break,
                }
            }
        };

        match event {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.handle_key(key).await,
        }
    }

    restore()?;
    info!("agentdesk exited");
    Ok(())
}

/// TUI 佔用了終端，日誌一律寫到檔案。
fn init_logging(settings: &ConsoleSettings) -> Result<()> {
    if let Some(parent) = settings.log_file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法建立日志目录: {}", parent.display()))?;
        }
    }
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}",
        )))
        .build(&settings.log_file)
        .with_context(|| format!("无法打开日志文件: {}", settings.log_file.display()))?;
    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("file").build(LevelFilter::Info))
        .context("日志配置无效")?;
    log4rs::init_config(config).context("日志初始化失败")?;
    Ok(())
}
