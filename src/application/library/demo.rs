use std::sync::Arc;

use crate::config::LibraryConfig;
use crate::domain::{Book, Isbn, Member, MemberId, MemberStatus};
use crate::ports::Clock;

use super::library_service::InMemoryLibraryService;

/// デモ用の蔵書と会員を登録したサービスを作成する
///
/// - 蔵書: Clean Code（java, architecture）, Effective Java（java）
/// - 会員: 42（利用可）, 77（利用停止）, 99（利用可）
pub fn demo_service(config: LibraryConfig, clock: Arc<dyn Clock>) -> InMemoryLibraryService {
    let mut service = InMemoryLibraryService::new(config, clock);

    service.add_book(Book::new(
        Isbn::new("978-0132350884"),
        "Clean Code",
        ["java", "architecture"],
    ));
    service.add_book(Book::new(
        Isbn::new("978-0321356680"),
        "Effective Java",
        ["java"],
    ));

    service.register_member(Member::new(MemberId::new(42), MemberStatus::Active));
    service.register_member(Member::new(MemberId::new(77), MemberStatus::Blocked));
    service.register_member(Member::new(MemberId::new(99), MemberStatus::Active));

    service
}
