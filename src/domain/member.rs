use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BorrowRecordError, Isbn, MemberId, ReturnBookError};

/// 会員ステータス
///
/// 状態遷移（Active ⇄ Blocked）は会員管理側の責務。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Blocked,
}

impl MemberStatus {
    pub fn is_blocked(&self) -> bool {
        matches!(self, MemberStatus::Blocked)
    }
}

/// 貸出記録 - 1冊の書籍の1回の貸出
///
/// 不変条件：
/// - due_on は borrowed_on より後（生成時に検証）
/// - returned_on は None から Some へ一度だけ遷移する
///
/// 生成は`BorrowRecord::open`のみ。外部データからの復元は提供しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowRecord {
    isbn: Isbn,
    borrowed_on: NaiveDate,
    due_on: NaiveDate,
    returned_on: Option<NaiveDate>,
}

impl BorrowRecord {
    /// 貸出中の記録を生成する
    ///
    /// # エラー
    /// 返却期限が貸出日以前の場合は`BorrowRecordError::DueNotAfterBorrow`を返す
    pub fn open(
        isbn: Isbn,
        borrowed_on: NaiveDate,
        due_on: NaiveDate,
    ) -> Result<Self, BorrowRecordError> {
        if due_on <= borrowed_on {
            return Err(BorrowRecordError::DueNotAfterBorrow);
        }

        Ok(Self {
            isbn,
            borrowed_on,
            due_on,
            returned_on: None,
        })
    }

    /// 返却日を記録する
    ///
    /// # エラー
    /// 既に返却済みの場合は`ReturnBookError::AlreadyReturned`を返す
    pub fn close(&mut self, returned_on: NaiveDate) -> Result<(), ReturnBookError> {
        if self.returned_on.is_some() {
            return Err(ReturnBookError::AlreadyReturned);
        }
        self.returned_on = Some(returned_on);
        Ok(())
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn borrowed_on(&self) -> NaiveDate {
        self.borrowed_on
    }

    pub fn due_on(&self) -> NaiveDate {
        self.due_on
    }

    pub fn returned_on(&self) -> Option<NaiveDate> {
        self.returned_on
    }

    pub fn is_open(&self) -> bool {
        self.returned_on.is_none()
    }

    /// 延滞判定：未返却かつ基準日が返却期限を過ぎている
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.is_open() && as_of > self.due_on
    }

    /// 延滞日数（延滞していなければ0）
    pub fn days_overdue(&self, as_of: NaiveDate) -> i64 {
        if !self.is_overdue(as_of) {
            return 0;
        }
        (as_of - self.due_on).num_days()
    }

    /// 返却日が返却期限より後か
    pub fn was_returned_late(&self) -> bool {
        self.returned_on
            .is_some_and(|returned_on| returned_on > self.due_on)
    }
}

/// 会員
///
/// 貸出中の記録は会員が排他的に所有する。外部からは読み取りのみ可能で、
/// 記録の追加・削除はサービス経由でのみ行われる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    member_id: MemberId,
    status: MemberStatus,
    loans: BTreeMap<Isbn, BorrowRecord>,
}

impl Member {
    pub fn new(member_id: MemberId, status: MemberStatus) -> Self {
        Self {
            member_id,
            status,
            loans: BTreeMap::new(),
        }
    }

    pub fn active(member_id: MemberId) -> Self {
        Self::new(member_id, MemberStatus::Active)
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn status(&self) -> MemberStatus {
        self.status
    }

    pub fn is_blocked(&self) -> bool {
        self.status.is_blocked()
    }

    pub fn set_status(&mut self, status: MemberStatus) {
        self.status = status;
    }

    /// 貸出中の記録
    pub fn loans(&self) -> impl Iterator<Item = &BorrowRecord> {
        self.loans.values()
    }

    pub fn loan(&self, isbn: &Isbn) -> Option<&BorrowRecord> {
        self.loans.get(isbn)
    }

    pub fn open_loan_count(&self) -> usize {
        self.loans.len()
    }

    /// 貸出記録を登録する
    ///
    /// 同じISBNの貸出中記録があれば置き換え、置き換えられた記録を返す。
    pub(crate) fn borrow(&mut self, record: BorrowRecord) -> Option<BorrowRecord> {
        self.loans.insert(record.isbn().clone(), record)
    }

    /// 貸出中の記録を取り除き、返却日を記録して返す
    ///
    /// 該当する貸出がなければNone。
    pub(crate) fn return_book(
        &mut self,
        isbn: &Isbn,
        returned_on: NaiveDate,
    ) -> Option<Result<BorrowRecord, ReturnBookError>> {
        let mut record = self.loans.remove(isbn)?;
        Some(record.close(returned_on).map(|()| record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn isbn() -> Isbn {
        Isbn::new("978-0321356680")
    }

    // TDD: BorrowRecord::open のテスト
    #[test]
    fn test_borrow_record_open_success() {
        let record = BorrowRecord::open(isbn(), date(2024, 1, 1), date(2024, 1, 15)).unwrap();
        assert!(record.is_open());
        assert_eq!(record.borrowed_on(), date(2024, 1, 1));
        assert_eq!(record.due_on(), date(2024, 1, 15));
        assert_eq!(record.returned_on(), None);
    }

    #[test]
    fn test_borrow_record_rejects_due_on_borrow_day() {
        let result = BorrowRecord::open(isbn(), date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(result.unwrap_err(), BorrowRecordError::DueNotAfterBorrow);
    }

    #[test]
    fn test_borrow_record_rejects_due_before_borrow() {
        let result = BorrowRecord::open(isbn(), date(2024, 1, 10), date(2024, 1, 1));
        assert!(result.is_err());
    }

    // TDD: BorrowRecord::close のテスト
    #[test]
    fn test_borrow_record_close_only_once() {
        let mut record = BorrowRecord::open(isbn(), date(2024, 1, 1), date(2024, 1, 15)).unwrap();
        assert!(record.close(date(2024, 1, 10)).is_ok());
        assert_eq!(record.returned_on(), Some(date(2024, 1, 10)));

        let result = record.close(date(2024, 1, 11));
        assert_eq!(result.unwrap_err(), ReturnBookError::AlreadyReturned);
        assert_eq!(record.returned_on(), Some(date(2024, 1, 10)));
    }

    // 延滞判定のテスト
    #[test]
    fn test_borrow_record_overdue_only_after_due_day() {
        let record = BorrowRecord::open(isbn(), date(2024, 1, 1), date(2024, 1, 15)).unwrap();
        assert!(!record.is_overdue(date(2024, 1, 15)));
        assert!(record.is_overdue(date(2024, 1, 16)));
        assert_eq!(record.days_overdue(date(2024, 1, 15)), 0);
        assert_eq!(record.days_overdue(date(2024, 1, 17)), 2);
    }

    #[test]
    fn test_returned_record_is_never_overdue() {
        let mut record = BorrowRecord::open(isbn(), date(2024, 1, 1), date(2024, 1, 15)).unwrap();
        record.close(date(2024, 1, 20)).unwrap();
        assert!(!record.is_overdue(date(2024, 2, 1)));
        assert_eq!(record.days_overdue(date(2024, 2, 1)), 0);
        assert!(record.was_returned_late());
    }

    // Member のテスト
    #[test]
    fn test_member_borrow_replaces_open_record_for_same_isbn() {
        let mut member = Member::active(MemberId::new(42));
        let first = BorrowRecord::open(isbn(), date(2024, 1, 1), date(2024, 1, 15)).unwrap();
        let second = BorrowRecord::open(isbn(), date(2024, 1, 5), date(2024, 1, 30)).unwrap();

        assert!(member.borrow(first.clone()).is_none());
        assert_eq!(member.borrow(second), Some(first));
        assert_eq!(member.open_loan_count(), 1);
        assert_eq!(member.loan(&isbn()).unwrap().due_on(), date(2024, 1, 30));
    }

    #[test]
    fn test_member_return_removes_and_stamps_record() {
        let mut member = Member::active(MemberId::new(42));
        let record = BorrowRecord::open(isbn(), date(2024, 1, 1), date(2024, 1, 15)).unwrap();
        member.borrow(record);

        let returned = member.return_book(&isbn(), date(2024, 1, 12)).unwrap().unwrap();
        assert_eq!(returned.returned_on(), Some(date(2024, 1, 12)));
        assert!(!returned.was_returned_late());
        assert_eq!(member.open_loan_count(), 0);
        assert!(member.return_book(&isbn(), date(2024, 1, 13)).is_none());
    }

    #[test]
    fn test_member_serializes_loans_keyed_by_isbn() {
        let mut member = Member::active(MemberId::new(42));
        let record = BorrowRecord::open(isbn(), date(2024, 1, 1), date(2024, 1, 15)).unwrap();
        member.borrow(record);

        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["member_id"], 42);
        assert_eq!(json["status"], "ACTIVE");
        let loan = &json["loans"]["978-0321356680"];
        assert_eq!(loan["isbn"], "978-0321356680");
        assert_eq!(loan["due_on"], "2024-01-15");
        assert!(loan["returned_on"].is_null());
    }

    #[test]
    fn test_member_status_transitions() {
        let mut member = Member::active(MemberId::new(7));
        assert!(!member.is_blocked());
        member.set_status(MemberStatus::Blocked);
        assert!(member.is_blocked());
        member.set_status(MemberStatus::Active);
        assert_eq!(member.status(), MemberStatus::Active);
    }
}
