//! 流程圖原始碼的產生。
//!
//! 輸出遵循渲染元件使用的文字語法：`graph TD` 表頭、每個節點一行宣告
//! （`id["label"]`）、每條有向邊一行（`a --> b`）。節點識別碼只用 ASCII
//! （`Phase2`、`Phase2_3`），由階段序號與子步驟序號決定，因此同樣的輸入
//! 重新產生時識別碼完全一致。

use std::fmt::{self, Write};

use super::phase::{Phase, extract_sub_steps};

/// 階段標題在節點裡的最大長度（字元數）。
const PHASE_TITLE_MAX: usize = 30;
/// 子步驟標籤的最大長度（字元數）。
const SUB_STEP_MAX: usize = 40;

/// 把階段列表串成一條線性的流程圖。
///
/// 每個階段產生一個節點；有子步驟的階段展開成
/// `阶段 → 子步骤1 → … → 子步骤N → 下一阶段` 的子鏈，
/// 沒有子步驟的階段直接接到下一個階段，最後一個接到 End。
pub(crate) fn emit(phases: &[Phase]) -> Result<String, fmt::Error> {
    let mut code = String::new();
    writeln!(code, "graph TD")?;
    writeln!(code, "    Start([开始]) --> Phase1")?;

    for (index, phase) in phases.iter().enumerate() {
        let node_id = format!("Phase{}", index + 1);
        let next_id = if index + 1 < phases.len() {
            format!("Phase{}", index + 2)
        } else {
            String::from("End")
        };

        let title = clean_label(&phase.title, PHASE_TITLE_MAX);
        writeln!(code, "    {node_id}[\"{title}\"]")?;

        let sub_steps = extract_sub_steps(&phase.content);
        if sub_steps.is_empty() {
            writeln!(code, "    {node_id} --> {next_id}")?;
            continue;
        }
        for (sub_index, step) in sub_steps.iter().enumerate() {
            let sub_id = format!("{}_{}", node_id, sub_index + 1);
            let label = clean_label(step, SUB_STEP_MAX);
            writeln!(code, "    {sub_id}[\"{label}\"]")?;
            if sub_index == 0 {
                writeln!(code, "    {node_id} --> {sub_id}")?;
            } else {
                writeln!(code, "    {}_{} --> {sub_id}", node_id, sub_index)?;
            }
            if sub_index + 1 == sub_steps.len() {
                writeln!(code, "    {sub_id} --> {next_id}")?;
            }
        }
    }

    writeln!(code, "    End([结束])")?;
    Ok(code)
}

/// 清理節點標籤：去掉會撞上圖形語法分隔符的字元，再截斷到 `max` 個字元。
/// 截斷按字元算而不是位元組，避免把多位元組字切成半個。
fn clean_label(raw: &str, max: usize) -> String {
    raw.chars()
        .filter(|ch| !matches!(ch, '"' | '[' | ']' | '{' | '}' | '(' | ')'))
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(title: &str, content: &str) -> Phase {
        Phase {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn plain_phases_chain_linearly() {
        let code = emit(&[phase("提单", "收集信息"), phase("审批", "经理审核")])
            .expect("write to String cannot fail");
        let expected = [
            "graph TD",
            "    Start([开始]) --> Phase1",
            "    Phase1[\"提单\"]",
            "    Phase1 --> Phase2",
            "    Phase2[\"审批\"]",
            "    Phase2 --> End",
            "    End([结束])",
            "",
        ]
        .join("\n");
        assert_eq!(code, expected);
    }

    #[test]
    fn sub_steps_form_an_inner_chain() {
        let code = emit(&[phase("处理", "- 开通权限\n- 发送通知")])
            .expect("write to String cannot fail");
        let expected = [
            "graph TD",
            "    Start([开始]) --> Phase1",
            "    Phase1[\"处理\"]",
            "    Phase1_1[\"开通权限\"]",
            "    Phase1 --> Phase1_1",
            "    Phase1_2[\"发送通知\"]",
            "    Phase1_1 --> Phase1_2",
            "    Phase1_2 --> End",
            "    End([结束])",
            "",
        ]
        .join("\n");
        assert_eq!(code, expected);
    }

    #[test]
    fn clean_label_strips_delimiters_and_counts_chars() {
        assert_eq!(clean_label("开场(白)[A]{B}\"C\"", 30), "开场白ABC");
        assert_eq!(clean_label("审批", 1), "审");
        assert_eq!(clean_label("", 30), "");
    }
}
