use thiserror::Error;

use crate::domain::{BorrowRecordError, Isbn, MemberId, MoneyError};

/// 貸出窓口アプリケーション層のエラー
///
/// どのエラーでもカタログと会員台帳は変更されない（検証は更新より先に行う）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// 入力値が不正（存在しない会員ID、過去の返却期限、空の検索語など）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 会員が利用停止中
    #[error("Member {0} is blocked")]
    MemberBlocked(MemberId),

    /// カタログに書籍が存在しない
    #[error("Book {0} not found")]
    BookNotFound(Isbn),

    /// 会員がその書籍を借りていない
    #[error("Book {0} is not borrowed by the member")]
    BookNotBorrowed(Isbn),
}

impl From<BorrowRecordError> for LibraryError {
    fn from(err: BorrowRecordError) -> Self {
        match err {
            BorrowRecordError::DueNotAfterBorrow => {
                LibraryError::InvalidArgument("due date must be after the borrow date".to_string())
            }
        }
    }
}

impl From<MoneyError> for LibraryError {
    fn from(err: MoneyError) -> Self {
        LibraryError::InvalidArgument(format!("fine cannot be computed: {err}"))
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryError>;
