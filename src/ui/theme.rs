use ratatui::style::Color;

pub const BG_PRIMARY: Color = Color::Rgb(16, 16, 20);
pub const BG_PANEL: Color = Color::Rgb(24, 24, 30);
pub const FG_PRIMARY: Color = Color::Rgb(205, 205, 210);
pub const FG_DIM: Color = Color::Rgb(125, 125, 135);

// 頁籤列沿用原後台的紫色系主色。
pub const TAB_BG: Color = Color::Rgb(46, 36, 84);
pub const TAB_TEXT: Color = Color::Rgb(216, 210, 240);
pub const TAB_ACTIVE_BG: Color = Color::Rgb(124, 92, 220);
pub const TAB_ACTIVE_TEXT: Color = Color::Rgb(255, 255, 255);

pub const BORDER_IDLE: Color = Color::Rgb(70, 70, 86);
pub const BORDER_FOCUS: Color = Color::Rgb(150, 118, 244);

pub const LIST_HIGHLIGHT_BG: Color = Color::Rgb(88, 70, 160);
pub const LIST_HIGHLIGHT_FG: Color = Color::Rgb(255, 255, 255);

pub const STATUS_BG: Color = Color::Rgb(36, 30, 58);
pub const STATUS_FG: Color = Color::Rgb(222, 218, 240);

pub const OK_FG: Color = Color::Rgb(110, 200, 140);
pub const WARN_FG: Color = Color::Rgb(230, 170, 80);
pub const ERROR_FG: Color = Color::Rgb(235, 105, 105);
pub const ACCENT_FG: Color = Color::Rgb(160, 130, 250);
