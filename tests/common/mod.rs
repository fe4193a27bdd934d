#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use circulation_desk::adapters::mock::FixedClock;
use circulation_desk::application::library::{InMemoryLibraryService, demo_service};
use circulation_desk::config::LibraryConfig;
use circulation_desk::domain::{Isbn, MemberId};
use std::sync::Arc;

pub const ACTIVE_MEMBER: MemberId = MemberId::new(42);
pub const BLOCKED_MEMBER: MemberId = MemberId::new(77);
pub const OTHER_MEMBER: MemberId = MemberId::new(99);

pub fn clean_code() -> Isbn {
    Isbn::new("978-0132350884")
}

pub fn effective_java() -> Isbn {
    Isbn::new("978-0321356680")
}

/// テストの基準日
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

pub fn days_from_today(days: u64) -> NaiveDate {
    today()
        .checked_add_days(Days::new(days))
        .expect("date in range")
}

/// デモデータを登録し、固定日付の時計を持つサービスを作成
pub fn create_test_service() -> (InMemoryLibraryService, Arc<FixedClock>) {
    create_test_service_with(LibraryConfig::default())
}

pub fn create_test_service_with(
    config: LibraryConfig,
) -> (InMemoryLibraryService, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(today()));
    let service = demo_service(config, clock.clone());
    (service, clock)
}
