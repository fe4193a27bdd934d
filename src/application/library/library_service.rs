use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta};
use tracing::{debug, info, warn};

use crate::config::LibraryConfig;
use crate::domain::{
    Book, BorrowRecord, Isbn, Member, MemberId, MemberStatus, Money, Receipt, ReturnBookError,
};
use crate::ports::Clock;

use super::errors::{LibraryError, Result};

/// 検索結果1ページあたりの最小件数
pub const MIN_PAGE_SIZE: usize = 1;

/// 検索結果1ページあたりの最大件数
pub const MAX_PAGE_SIZE: usize = 100;

/// タイトル条件を無視して全件を対象にする検索語
pub const SEARCH_WILDCARD: &str = "*";

/// 貸出窓口サービス
///
/// 会員はIDで指定する。存在しない会員IDは`InvalidArgument`になる。
///
/// エラー種別：
/// - `borrow_book`: MemberBlocked, InvalidArgument, BookNotFound
/// - `return_book`: MemberBlocked, InvalidArgument, BookNotBorrowed
/// - `calculate_fine`: MemberBlocked, InvalidArgument
/// - `search_books`: InvalidArgument
pub trait LibraryService {
    /// 書籍を貸し出す
    ///
    /// ビジネスルール：
    /// - 利用停止中の会員には貸し出さない
    /// - 返却期限は今日より後
    /// - カタログに存在する書籍のみ
    /// - 同じ書籍の貸出中記録があれば上書きする
    fn borrow_book(
        &mut self,
        member_id: MemberId,
        isbn: &Isbn,
        due_date: NaiveDate,
    ) -> Result<Receipt>;

    /// 書籍を返却する
    ///
    /// ビジネスルール：
    /// - 利用停止中の会員は返却も受け付けない
    /// - 返却日が返却期限より後なら延滞返却
    fn return_book(
        &mut self,
        member_id: MemberId,
        isbn: &Isbn,
        return_date: NaiveDate,
    ) -> Result<Receipt>;

    /// 基準日時点の延滞料金を計算する
    ///
    /// 貸出中の記録のみが対象。返却済みの記録の延滞料金は含まない。
    fn calculate_fine(&self, member_id: MemberId, as_of_date: NaiveDate) -> Result<Money>;

    /// カタログを検索する
    ///
    /// - `query`: タイトルの部分一致（大文字小文字を区別しない）。`"*"`は全件
    /// - `tags`: すべてのタグを持つ書籍のみ（空なら条件なし）
    /// - `page_size`: 1〜100
    /// - `page_number`: 0始まり。範囲外なら空の結果
    fn search_books(
        &self,
        query: &str,
        tags: &[String],
        page_size: usize,
        page_number: usize,
    ) -> Result<Vec<Book>>;
}

/// インメモリの貸出窓口サービス
///
/// カタログ（ISBN → 書籍）と会員台帳（会員ID → 会員）を所有する。
/// カタログは登録順に検索される。
/// 排他制御は行わない。並行利用する場合は呼び出し側で直列化すること。
pub struct InMemoryLibraryService {
    config: LibraryConfig,
    clock: Arc<dyn Clock>,
    books: Vec<Book>,
    catalogue: HashMap<Isbn, usize>,
    members: HashMap<MemberId, Member>,
}

impl InMemoryLibraryService {
    pub fn new(config: LibraryConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            books: Vec::new(),
            catalogue: HashMap::new(),
            members: HashMap::new(),
        }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// 書籍をカタログに登録する
    ///
    /// 同じISBNが登録済みなら、カタログ内の位置を保ったまま置き換えて古い書籍を返す。
    pub fn add_book(&mut self, book: Book) -> Option<Book> {
        match self.catalogue.get(book.isbn()) {
            Some(&index) => Some(std::mem::replace(&mut self.books[index], book)),
            None => {
                self.catalogue.insert(book.isbn().clone(), self.books.len());
                self.books.push(book);
                None
            }
        }
    }

    /// 会員を登録する。同じIDの会員がいれば置き換えて返す。
    pub fn register_member(&mut self, member: Member) -> Option<Member> {
        self.members.insert(member.member_id(), member)
    }

    /// 会員ステータスを変更する（会員管理側から呼ばれる）
    pub fn set_member_status(&mut self, member_id: MemberId, status: MemberStatus) -> Result<()> {
        let member = self.member_entry(member_id)?;
        member.set_status(status);
        info!(%member_id, ?status, "member status changed");
        Ok(())
    }

    pub fn book(&self, isbn: &Isbn) -> Option<&Book> {
        self.catalogue.get(isbn).map(|&index| &self.books[index])
    }

    /// 登録順の全書籍
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn member(&self, member_id: MemberId) -> Option<&Member> {
        self.members.get(&member_id)
    }

    /// 今日から標準の貸出期間後の返却期限
    pub fn default_due_date(&self) -> Result<NaiveDate> {
        let today = self.clock.today();
        TimeDelta::try_days(self.config.loan_period_days)
            .and_then(|period| today.checked_add_signed(period))
            .ok_or_else(|| {
                LibraryError::InvalidArgument(format!(
                    "loan period of {} days is out of range",
                    self.config.loan_period_days
                ))
            })
    }

    /// 会員の存在と利用可否を確認する
    fn checked_member(&self, member_id: MemberId) -> Result<&Member> {
        let member = self
            .members
            .get(&member_id)
            .ok_or_else(|| unknown_member(member_id))?;

        if member.is_blocked() {
            warn!(%member_id, "rejected request from blocked member");
            return Err(LibraryError::MemberBlocked(member_id));
        }

        Ok(member)
    }

    fn member_entry(&mut self, member_id: MemberId) -> Result<&mut Member> {
        self.members
            .get_mut(&member_id)
            .ok_or_else(|| unknown_member(member_id))
    }
}

fn unknown_member(member_id: MemberId) -> LibraryError {
    LibraryError::InvalidArgument(format!("unknown member {member_id}"))
}

impl LibraryService for InMemoryLibraryService {
    fn borrow_book(
        &mut self,
        member_id: MemberId,
        isbn: &Isbn,
        due_date: NaiveDate,
    ) -> Result<Receipt> {
        // 1. 会員の確認
        self.checked_member(member_id)?;

        // 2. 返却期限の確認
        let today = self.clock.today();
        if due_date <= today {
            return Err(LibraryError::InvalidArgument(format!(
                "due date {due_date} must be after {today}"
            )));
        }

        // 3. 書籍の存在確認
        if self.book(isbn).is_none() {
            return Err(LibraryError::BookNotFound(isbn.clone()));
        }

        // 4. 貸出記録を登録
        let record = BorrowRecord::open(isbn.clone(), today, due_date)?;
        let member = self.member_entry(member_id)?;
        if let Some(previous) = member.borrow(record) {
            // TODO: 再貸出を拒否するかどうかは運用方針の決定待ち
            warn!(
                %member_id,
                %isbn,
                previous_due_on = %previous.due_on(),
                "open loan replaced by a new borrow"
            );
        }

        info!(%member_id, %isbn, %due_date, "book borrowed");
        Ok(Receipt::borrowed(isbn.clone(), today))
    }

    fn return_book(
        &mut self,
        member_id: MemberId,
        isbn: &Isbn,
        return_date: NaiveDate,
    ) -> Result<Receipt> {
        self.checked_member(member_id)?;

        let member = self.member_entry(member_id)?;
        let record = match member.return_book(isbn, return_date) {
            Some(Ok(record)) => record,
            Some(Err(ReturnBookError::AlreadyReturned)) | None => {
                return Err(LibraryError::BookNotBorrowed(isbn.clone()));
            }
        };

        let receipt = Receipt::returned(isbn.clone(), return_date, record.due_on());
        info!(%member_id, %isbn, status = receipt.status.as_str(), "book returned");
        Ok(receipt)
    }

    fn calculate_fine(&self, member_id: MemberId, as_of_date: NaiveDate) -> Result<Money> {
        let member = self.checked_member(member_id)?;
        let rate = self.config.daily_fine_rate;

        let fine = member
            .loans()
            .filter(|record| record.is_overdue(as_of_date))
            .try_fold(Money::zero(), |total, record| {
                rate.times(record.days_overdue(as_of_date))
                    .and_then(|accrued| total.checked_add(accrued))
            })?;

        debug!(%member_id, %as_of_date, %fine, "fine calculated");
        Ok(fine)
    }

    fn search_books(
        &self,
        query: &str,
        tags: &[String],
        page_size: usize,
        page_number: usize,
    ) -> Result<Vec<Book>> {
        if query.trim().is_empty() {
            return Err(LibraryError::InvalidArgument(
                "query must not be empty".to_string(),
            ));
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(LibraryError::InvalidArgument(format!(
                "page size must be {MIN_PAGE_SIZE}..={MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        let Some(start) = page_size.checked_mul(page_number) else {
            return Ok(Vec::new());
        };

        let page: Vec<Book> = self
            .books
            .iter()
            .filter(|book| query == SEARCH_WILDCARD || book.title_contains(query))
            .filter(|book| book.has_all_tags(tags))
            .skip(start)
            .take(page_size)
            .cloned()
            .collect();

        debug!(query, ?tags, page_size, page_number, hits = page.len(), "catalogue searched");
        Ok(page)
    }
}
