use chrono::{Local, NaiveDate};

use crate::ports::clock::Clock;

/// ローカルタイムゾーンの暦日を返す時計
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
