//! 階段與子步驟的抽取。
//!
//! 原始文字的結構非常鬆散，這裡用逐行掃描的狀態機來切分：
//! 每遇到一行階段標題就結束上一個階段、開始新階段，其餘行全部歸入
//! 當前階段的內容。標題比對用等價標記表逐一嘗試，不依賴回溯式的
//! 複合正規表示式。

/// 一個階段：標題（顯示用）加上屬於它的內容區塊。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub title: String,
    pub content: String,
}

/// 每個階段最多保留的子步驟數，超出的行直接捨棄。
pub(crate) const MAX_SUB_STEPS: usize = 5;

/// 等價的階段標記。`ascii` 標記不分大小寫，且標記與編號之間必須有空白；
/// 中文標記允許緊貼編號。
const HEADING_MARKERS: &[Marker] = &[
    Marker { token: "Phase", ascii: true },
    Marker { token: "步骤", ascii: false },
    Marker { token: "阶段", ascii: false },
];

struct Marker {
    token: &'static str,
    ascii: bool,
}

/// 逐行掃描文字，回傳依出現順序排列的階段列表。
///
/// 第一個標題之前的行（前言）不屬於任何階段，直接忽略。
pub fn extract_phases(text: &str) -> Vec<Phase> {
    let mut phases: Vec<Phase> = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some((title, inline)) = match_heading(line) {
            if let Some((done_title, lines)) = current.take() {
                phases.push(finish_phase(done_title, lines));
            }
            let mut lines = Vec::new();
            if !inline.trim().is_empty() {
                lines.push(inline);
            }
            current = Some((title, lines));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }
    if let Some((title, lines)) = current.take() {
        phases.push(finish_phase(title, lines));
    }
    phases
}

fn finish_phase(title: String, lines: Vec<&str>) -> Phase {
    Phase {
        title,
        content: lines.join("\n").trim().to_string(),
    }
}

/// 沒有任何明確階段時的後備切分：按空行分段，每個非空段落視為一個
/// 合成階段，標題為「步骤 N」（N 從 1 起算）。
pub(crate) fn fallback_paragraphs(text: &str) -> Vec<Phase> {
    let mut phases = Vec::new();
    for block in split_paragraphs(text) {
        let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            continue;
        }
        phases.push(Phase {
            title: format!("步骤 {}", phases.len() + 1),
            content: lines.join("\n"),
        });
    }
    phases
}

/// 以一個或多個空白行為界把文字切成段落。
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !buffer.is_empty() {
                blocks.push(buffer.join("\n"));
                buffer.clear();
            }
        } else {
            buffer.push(line);
        }
    }
    if !buffer.is_empty() {
        blocks.push(buffer.join("\n"));
    }
    blocks.retain(|block| !block.trim().is_empty());
    blocks
}

/// 嘗試把一行解析為階段標題。
///
/// 形式：`<标记><编号> <分隔符> <标题>[:<行內內容>]`，其中分隔符是
/// `-`、`–` 或 `—`，標題終止於第一個半形或全形冒號（或行尾）。
/// 回傳（標題, 冒號後的行內內容）。
fn match_heading(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim_start();
    for marker in HEADING_MARKERS {
        let Some(rest) = strip_marker(trimmed, marker) else {
            continue;
        };
        // 標記之後必須是編號。ASCII 標記（Phase）要求至少一個空白隔開，
        // 中文標記允許「步骤1」這種緊貼寫法。
        let after_ws = rest.trim_start();
        if marker.ascii && after_ws.len() == rest.len() {
            continue;
        }
        let digits_end = after_ws
            .char_indices()
            .find(|(_, ch)| !ch.is_ascii_digit())
            .map(|(idx, _)| idx)
            .unwrap_or(after_ws.len());
        if digits_end == 0 {
            continue;
        }
        let after_number = after_ws[digits_end..].trim_start();
        let mut chars = after_number.chars();
        match chars.next() {
            Some('-') | Some('–') | Some('—') => {}
            _ => continue,
        }
        let after_separator = chars.as_str().trim_start();

        let (raw_title, inline) = match after_separator.find([':', '：']) {
            Some(idx) => {
                let colon_len = after_separator[idx..]
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(1);
                (&after_separator[..idx], &after_separator[idx + colon_len..])
            }
            None => (after_separator, ""),
        };
        let title = raw_title.trim();
        if title.is_empty() {
            continue;
        }
        return Some((title.to_string(), inline));
    }
    None
}

fn strip_marker<'a>(line: &'a str, marker: &Marker) -> Option<&'a str> {
    if marker.ascii {
        // 不能直接切片：行首可能是多位元組字元，`get` 在非字元邊界時回 None。
        let token_len = marker.token.len();
        match line.get(..token_len) {
            Some(prefix) if prefix.eq_ignore_ascii_case(marker.token) => {
                Some(&line[token_len..])
            }
            _ => None,
        }
    } else {
        line.strip_prefix(marker.token)
    }
}

/// 在一個階段的內容裡抽取子步驟：`-`、`•` 或「數字.」開頭的行，
/// 取標記後的剩餘文字（去除首尾空白），最多 [`MAX_SUB_STEPS`] 條。
pub fn extract_sub_steps(content: &str) -> Vec<String> {
    let mut steps = Vec::new();
    for line in content.lines() {
        if steps.len() == MAX_SUB_STEPS {
            break;
        }
        if let Some(step) = match_sub_step(line) {
            steps.push(step.to_string());
        }
    }
    steps
}

fn match_sub_step(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let rest = if let Some(rest) = trimmed.strip_prefix(['-', '•']) {
        rest
    } else {
        let digits_end = trimmed
            .char_indices()
            .find(|(_, ch)| !ch.is_ascii_digit())
            .map(|(idx, _)| idx)
            .unwrap_or(trimmed.len());
        if digits_end == 0 {
            return None;
        }
        trimmed[digits_end..].strip_prefix('.')?
    };
    let step = rest.trim();
    if step.is_empty() { None } else { Some(step) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_equivalent_heading_markers() {
        for line in [
            "Phase 1 - 开场白: 问候",
            "phase 1 - 开场白: 问候",
            "步骤1 - 开场白：问候",
            "步骤 1 – 开场白: 问候",
            "阶段 1 — 开场白",
            "  阶段3- 开场白 ",
        ] {
            let phases = extract_phases(line);
            assert_eq!(phases.len(), 1, "line not recognized: {line:?}");
            assert_eq!(phases[0].title, "开场白");
        }
    }

    #[test]
    fn rejects_lines_that_only_look_like_headings() {
        for line in [
            "Phase1 - 缺空格: x",
            "Phase - 没编号: x",
            "Phase 1 没分隔符: x",
            "Phase 2 -",
            "阶段性成果 - 不是标题: x",
            "这里提到 Phase 1 - 不在行首: x",
        ] {
            assert!(
                extract_phases(line).is_empty(),
                "line wrongly accepted: {line:?}"
            );
        }
    }

    #[test]
    fn content_spans_until_next_heading() {
        let text = "Phase 1 - 提单: 收集信息\n补充说明一行\nPhase 2 - 审批:\n经理审核";
        let phases = extract_phases(text);
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].title, "提单");
        assert_eq!(phases[0].content, "收集信息\n补充说明一行");
        assert_eq!(phases[1].title, "审批");
        assert_eq!(phases[1].content, "经理审核");
    }

    #[test]
    fn preamble_before_first_heading_is_ignored() {
        let text = "### 协作规范\n当用户发起申请时需校验权限。\nPhase 1 - 提单: 收集信息";
        let phases = extract_phases(text);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].content, "收集信息");
    }

    #[test]
    fn fallback_splits_on_blank_lines() {
        let phases = fallback_paragraphs("第一段第一行\n第一段第二行\n\n\n第二段");
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].title, "步骤 1");
        assert_eq!(phases[0].content, "第一段第一行\n第一段第二行");
        assert_eq!(phases[1].title, "步骤 2");
    }

    #[test]
    fn sub_step_markers_and_cap() {
        let content = "- 甲\n• 乙\n1. 丙\n12. 丁\n不是子步骤\n-戊\n- 己";
        let steps = extract_sub_steps(content);
        assert_eq!(steps, vec!["甲", "乙", "丙", "丁", "戊"]);

        assert!(extract_sub_steps("- \n•\n3.").is_empty());
        assert!(extract_sub_steps("1,逗号不算\n.点开头不算").is_empty());
    }
}
