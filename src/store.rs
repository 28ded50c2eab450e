use thiserror::Error;

/// 儲存層共用的錯誤型別。
///
/// 所有資料都在記憶體裡，失敗場景只有兩類：找不到記錄、表單欄位
/// 沒通過校驗。錯誤訊息直接以使用者語言呈現在狀態列。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("记录不存在: {id}")]
    NotFound { id: String },
    #[error("{message}")]
    Invalid { message: String },
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        StoreError::NotFound { id: id.into() }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        StoreError::Invalid {
            message: message.into(),
        }
    }
}
