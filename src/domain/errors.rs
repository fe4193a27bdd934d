use thiserror::Error;

/// 金額のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// 数値として解釈できない
    #[error("not a decimal amount: {0}")]
    Malformed(String),
    /// 小数点以下が2桁を超える
    #[error("more than 2 fractional digits: {0}")]
    TooPrecise(String),
    /// 小数点以下2桁を保ったまま表現できない大きさ
    #[error("amount out of range")]
    Overflow,
}

/// 貸出記録作成のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowRecordError {
    /// 返却期限が貸出日より後になっていない
    DueNotAfterBorrow,
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnBookError {
    /// 既に返却済み
    AlreadyReturned,
}
