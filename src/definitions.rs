//! 控制台共用的頁面與焦點定義。

/// 控制台的四個頁面，對應原後台的四個路由。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolePage {
    Workbench,
    Agents,
    Mcp,
    Catalog,
}

impl ConsolePage {
    pub const ALL: [ConsolePage; 4] = [
        ConsolePage::Workbench,
        ConsolePage::Agents,
        ConsolePage::Mcp,
        ConsolePage::Catalog,
    ];

    /// Tab 鍵循環切換的下一頁。
    pub fn next(self) -> Self {
        match self {
            ConsolePage::Workbench => ConsolePage::Agents,
            ConsolePage::Agents => ConsolePage::Mcp,
            ConsolePage::Mcp => ConsolePage::Catalog,
            ConsolePage::Catalog => ConsolePage::Workbench,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ConsolePage::Workbench => ConsolePage::Catalog,
            ConsolePage::Agents => ConsolePage::Workbench,
            ConsolePage::Mcp => ConsolePage::Agents,
            ConsolePage::Catalog => ConsolePage::Mcp,
        }
    }
}

/// 當前鍵盤焦點所在的區域。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    /// 左側列表（歷史會話、智能體、連接器、目錄分類）。
    List,
    /// 右側詳情 / 服務列表。
    Detail,
    /// 對話輸入框（僅工作台頁）。
    Composer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_cycle_covers_all_pages() {
        let mut page = ConsolePage::Workbench;
        for expected in [
            ConsolePage::Agents,
            ConsolePage::Mcp,
            ConsolePage::Catalog,
            ConsolePage::Workbench,
        ] {
            page = page.next();
            assert_eq!(page, expected);
        }
        assert_eq!(ConsolePage::Workbench.prev(), ConsolePage::Catalog);
    }
}
