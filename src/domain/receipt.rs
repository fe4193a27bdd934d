use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Isbn;

/// 受付結果のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptStatus {
    Borrowed,
    ReturnedOnTime,
    ReturnedLate,
}

impl ReceiptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptStatus::Borrowed => "BORROWED",
            ReceiptStatus::ReturnedOnTime => "RETURNED_ON_TIME",
            ReceiptStatus::ReturnedLate => "RETURNED_LATE",
        }
    }
}

/// 貸出・返却の受付票
///
/// サービスが生成して呼び出し側に返す。保存はしない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub status: ReceiptStatus,
    pub when: NaiveDate,
    pub isbn: Isbn,
}

impl Receipt {
    pub fn borrowed(isbn: Isbn, when: NaiveDate) -> Self {
        Self {
            status: ReceiptStatus::Borrowed,
            when,
            isbn,
        }
    }

    /// 返却日と返却期限から返却ステータスを決める
    pub fn returned(isbn: Isbn, when: NaiveDate, due_on: NaiveDate) -> Self {
        let status = if when > due_on {
            ReceiptStatus::ReturnedLate
        } else {
            ReceiptStatus::ReturnedOnTime
        };

        Self { status, when, isbn }
    }
}
