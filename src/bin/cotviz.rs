//! cotviz：CoT 指令 → 流程圖的命令列工具。
//!
//! 從檔案或標準輸入讀取指令文字，輸出編譯後的流程圖原始碼。
//! 用法：`cotviz [--stats] [FILE]`，不給 FILE 時讀 stdin。

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use agentdesk::flowchart;
use anyhow::{Context, Result, bail};
use log::debug;

struct CliArgs {
    stats: bool,
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("无法读取输入文件：{}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("无法读取标准输入")?;
            buffer
        }
    };
    debug!("input length: {} bytes", text.len());

    let code = flowchart::compile(&text);
    if args.stats {
        let (nodes, edges) = count_graph(&code);
        eprintln!(">> 节点 {nodes} 个，边 {edges} 条");
    }
    println!("{code}");
    Ok(())
}

fn parse_args() -> Result<CliArgs> {
    let mut stats = false;
    let mut input = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-s" | "--stats" => stats = true,
            "-h" | "--help" => {
                println!("用法：cotviz [--stats] [FILE]");
                println!("从 FILE（缺省为标准输入）读取 CoT 指令文本，输出流程图源码。");
                std::process::exit(0);
            }
            other if other.starts_with('-') => {
                bail!("未知参数：{other}，用 --help 查看用法");
            }
            path => {
                if input.is_some() {
                    bail!("只支持一个输入文件");
                }
                input = Some(PathBuf::from(path));
            }
        }
    }
    Ok(CliArgs { stats, input })
}

/// 粗略統計：每個節點宣告帶一個 `[`，每條邊一個 `-->`。
fn count_graph(code: &str) -> (usize, usize) {
    let nodes = code.matches('[').count();
    let edges = code.matches("-->").count();
    (nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::count_graph;
    use agentdesk::flowchart;

    #[test]
    fn stats_match_known_shapes() {
        // 空輸入的佔位圖：3 個節點、2 條邊。
        assert_eq!(count_graph(&flowchart::compile("")), (3, 2));

        // 單階段：Start、Phase1、End 三個節點，兩條邊。
        let single = flowchart::compile("Phase 1 - 开场白: 问候");
        assert_eq!(count_graph(&single), (3, 2));
    }
}
