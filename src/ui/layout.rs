use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// 整個畫面的縱向骨架：頁籤列、內容區、狀態列。
pub(super) fn frame_chunks(area: Rect) -> (Rect, Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);
    (vertical[0], vertical[1], vertical[2])
}

/// 左列表 + 右詳情的兩欄切分。
pub(super) fn list_detail(area: Rect, list_width: u16) -> (Rect, Rect) {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(list_width), Constraint::Min(20)])
        .split(area);
    (horizontal[0], horizontal[1])
}

/// 工作台：歷史側欄、會話區，以及可選的推理追蹤欄。
pub(super) fn workbench_chunks(area: Rect, reasoning: bool) -> (Rect, Rect, Option<Rect>) {
    if reasoning {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(30),
                Constraint::Min(30),
                Constraint::Percentage(38),
            ])
            .split(area);
        (horizontal[0], horizontal[1], Some(horizontal[2]))
    } else {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(30)])
            .split(area);
        (horizontal[0], horizontal[1], None)
    }
}

/// 會話區再切出底部輸入框。
pub(super) fn chat_chunks(area: Rect) -> (Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);
    (vertical[0], vertical[1])
}

/// 服務目錄：分類側欄、服務列表，以及可選的流程圖預覽欄。
pub(super) fn catalog_chunks(area: Rect, preview: bool) -> (Rect, Rect, Option<Rect>) {
    if preview {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(26),
                Constraint::Min(28),
                Constraint::Percentage(40),
            ])
            .split(area);
        (horizontal[0], horizontal[1], Some(horizontal[2]))
    } else {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(28)])
            .split(area);
        (horizontal[0], horizontal[1], None)
    }
}

/// 居中的彈出層矩形。
pub(super) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_never_exceeds_parent() {
        let parent = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(parent, 100, 40);
        assert_eq!(rect.width, 80);
        assert_eq!(rect.height, 24);

        let small = centered_rect(parent, 40, 10);
        assert_eq!(small.x, 20);
        assert_eq!(small.y, 7);
    }
}
