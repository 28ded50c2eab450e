//! 將 Agent 的 CoT（Chain-of-Thought）指令文字編譯為流程圖描述。
//!
//! 輸入是半結構化的自然語言（以「Phase N / 步骤 N / 阶段 N」為階段標題的
//! 指令文字），輸出是一段 `graph TD` 流程圖原始碼，交由外部的圖形渲染元件
//! 繪製。編譯器本身是純函式：同樣的輸入永遠產生同樣的輸出，不做任何 I/O，
//! 對任何輸入都不會 panic。

/// `emit` 模組：將抽取出的階段串接成流程圖原始碼。
mod emit;
/// `phase` 模組：逐行掃描文字，抽取階段標題、內容與子步驟。
mod phase;

pub use phase::{Phase, extract_phases, extract_sub_steps};

/// 空白輸入（或兩段抽取都失敗）時回傳的固定佔位圖。
const EMPTY_GRAPH: &str = "graph TD\n    A[开始] --> B[暂无流程]\n    B --> C[结束]";

/// 內部處理異常時回傳的固定診斷圖。
const PARSE_FAILED_GRAPH: &str =
    "graph TD\n    A[开始] --> B[解析失败]\n    B --> C[请检查文本格式]\n    C --> D[结束]";

/// 將一段 CoT 指令文字編譯為流程圖原始碼。
///
/// 處理順序：
/// 1. 空白輸入直接回傳固定的三節點佔位圖。
/// 2. 逐行掃描階段標題（`Phase 1 - 标题: …` 及其中文等價寫法）。
/// 3. 一個階段都沒找到時，退而按空行分段，每段視為一個合成階段。
/// 4. 每個階段內再抽取最多五條子步驟（`-`、`•`、`1.` 開頭的行）。
/// 5. 串接 Start → 各階段（含子步驟鏈）→ End。
///
/// 此函式永不回傳錯誤：任何內部失敗都會折算成固定的診斷圖。
pub fn compile(text: &str) -> String {
    if text.trim().is_empty() {
        return EMPTY_GRAPH.to_string();
    }

    let mut phases = extract_phases(text);
    if phases.is_empty() {
        phases = phase::fallback_paragraphs(text);
    }
    if phases.is_empty() {
        // 整段文字既無標題也無可用段落，退回佔位圖。
        return EMPTY_GRAPH.to_string();
    }

    match emit::emit(&phases) {
        Ok(code) => code,
        Err(_) => PARSE_FAILED_GRAPH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// 最小化的語法檢查：每條邊的兩端都必須在文件中宣告過。
    /// （`id[...]`、`id([...])` 與行內宣告都算宣告。）
    fn assert_well_formed(code: &str) {
        let mut lines = code.lines();
        assert_eq!(lines.next(), Some("graph TD"));

        let mut declared: HashSet<&str> = HashSet::new();
        let mut edges: Vec<(&str, &str)> = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut endpoints = Vec::new();
            for part in line.split("-->") {
                let part = part.trim();
                let id = part
                    .split(['[', '('])
                    .next()
                    .expect("split always yields one item")
                    .trim();
                assert!(!id.is_empty(), "endpoint missing in line: {line}");
                assert!(
                    id.is_ascii(),
                    "node id must stay ASCII, got {id:?} in {line}"
                );
                if part.len() > id.len() {
                    declared.insert(id);
                }
                endpoints.push(id);
            }
            if endpoints.len() == 2 {
                edges.push((endpoints[0], endpoints[1]));
            }
        }
        for (from, to) in edges {
            assert!(declared.contains(from), "edge source {from} never declared");
            assert!(declared.contains(to), "edge target {to} never declared");
        }
    }

    #[test]
    fn empty_input_returns_placeholder_graph() {
        let expected = "graph TD\n    A[开始] --> B[暂无流程]\n    B --> C[结束]";
        assert_eq!(compile(""), expected);
        assert_eq!(compile("   "), expected);
        assert_eq!(compile("\n\n\t\n"), expected);
    }

    #[test]
    fn repeated_calls_are_byte_identical() {
        let text = "Phase 1 - 开场白: 问候用户\nPhase 2 - 信息收集:\n- 确认工号\n- 确认部门";
        let first = compile(text);
        for _ in 0..3 {
            assert_eq!(compile(text), first);
        }
    }

    #[test]
    fn single_phase_without_sub_steps() {
        let code = compile("Phase 1 - 开场白: 问候用户");
        let expected = [
            "graph TD",
            "    Start([开始]) --> Phase1",
            "    Phase1[\"开场白\"]",
            "    Phase1 --> End",
            "    End([结束])",
            "",
        ]
        .join("\n");
        assert_eq!(code, expected);
    }

    #[test]
    fn two_phases_with_sub_step_chain() {
        let text = "Phase 1 - 开场白: 问候用户\n\
                    Phase 2 - 信息收集:\n\
                    - 确认工号\n\
                    - 确认部门\n\
                    - 确认时长";
        let code = compile(text);
        assert_well_formed(&code);
        // 阶段一直接接到阶段二，阶段二经三条子步骤接到 End。
        assert!(code.contains("    Phase1 --> Phase2\n"));
        assert!(code.contains("    Phase2 --> Phase2_1\n"));
        assert!(code.contains("    Phase2_1 --> Phase2_2\n"));
        assert!(code.contains("    Phase2_2 --> Phase2_3\n"));
        assert!(code.contains("    Phase2_3 --> End\n"));
        assert!(!code.contains("Phase2_4"));
    }

    #[test]
    fn paragraph_fallback_produces_synthetic_steps() {
        let text = "先核对申请人的部门信息\n\n再通知 IT 开通权限";
        let code = compile(text);
        assert_well_formed(&code);
        assert!(code.contains("Phase1[\"步骤 1\"]"));
        assert!(code.contains("Phase2[\"步骤 2\"]"));
        assert!(code.contains("    Phase1 --> Phase2\n"));
        assert!(code.contains("    Phase2 --> End\n"));
    }

    #[test]
    fn sub_steps_capped_at_five() {
        let text = "Phase 1 - 审批:\n1. 一\n2. 二\n3. 三\n4. 四\n5. 五\n6. 六\n7. 七";
        let code = compile(text);
        assert!(code.contains("Phase1_5"));
        assert!(!code.contains("Phase1_6"));
        assert!(code.contains("    Phase1_5 --> End\n"));
    }

    #[test]
    fn labels_are_sanitized_and_capped() {
        let text = "Phase 1 - 开场(白)[草稿]{内部}\"引用\": 问候";
        let code = compile(text);
        for line in code.lines().filter(|l| l.contains('"')) {
            let label = line
                .split('"')
                .nth(1)
                .expect("label between quotes");
            for forbidden in ['[', ']', '{', '}', '(', ')', '"'] {
                assert!(
                    !label.contains(forbidden),
                    "label {label:?} still contains {forbidden:?}"
                );
            }
        }
        assert!(code.contains("Phase1[\"开场白草稿内部引用\"]"));

        let long_title = "甲".repeat(48);
        let capped = compile(&format!("Phase 1 - {long_title}: 内容"));
        assert!(capped.contains(&format!("Phase1[\"{}\"]", "甲".repeat(30))));
    }

    #[test]
    fn hostile_inputs_never_panic_and_stay_well_formed() {
        let samples = [
            "graph TD\n    A --> B",
            "Phase 1 - [[[[: ]]]]",
            "步骤 1 — \"引号\"：{花括号}",
            "((((((((((",
            "Phase 99999999999999999999 - t: c",
            "- \n- \n- ",
            "阶段 3 -",
        ];
        for sample in samples {
            assert_well_formed(&compile(sample));
        }
        let huge = "Phase 1 - 标题: 内容\n".repeat(2000);
        assert_well_formed(&compile(&huge));
    }

    #[test]
    fn fallback_graphs_are_well_formed() {
        assert_well_formed(EMPTY_GRAPH);
        assert_well_formed(PARSE_FAILED_GRAPH);
    }

    #[test]
    fn phase_count_is_preserved() {
        let text = "步骤 1 - 提单: 收集信息\n阶段 2 - 审批: 经理审核\nPhase 3 - 处理: IT 开通";
        let code = compile(text);
        assert_well_formed(&code);
        for expected in ["Phase1[\"提单\"]", "Phase2[\"审批\"]", "Phase3[\"处理\"]"] {
            assert!(code.contains(expected), "missing {expected} in {code}");
        }
        assert!(code.contains("    Phase3 --> End\n"));
        assert!(!code.contains("Phase4"));
    }
}
