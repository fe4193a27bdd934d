use thiserror::Error;

use crate::domain::{Money, MoneyError};

/// 1日あたりの延滞料金を指定する環境変数
pub const DAILY_FINE_RATE_ENV: &str = "LIBRARY_DAILY_FINE_RATE";

/// 標準の貸出期間（日数）を指定する環境変数
pub const LOAN_PERIOD_DAYS_ENV: &str = "LIBRARY_LOAN_PERIOD_DAYS";

/// 標準の貸出期間（日数）
pub const DEFAULT_LOAN_PERIOD_DAYS: i64 = 14;

/// 設定読み込みのエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 延滞料金の書式が不正
    #[error("Invalid daily fine rate {raw:?}")]
    InvalidFineRate {
        raw: String,
        #[source]
        source: MoneyError,
    },

    /// 延滞料金が負
    #[error("Daily fine rate must not be negative: {0}")]
    NegativeFineRate(Money),

    /// 貸出期間が不正
    #[error("Loan period must be a positive number of days: {0:?}")]
    InvalidLoanPeriod(String),
}

/// 貸出サービスの設定
///
/// 延滞料金はグローバル定数ではなく、サービス生成時に渡す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub daily_fine_rate: Money,
    pub loan_period_days: i64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            daily_fine_rate: Money::from_cents(50),
            loan_period_days: DEFAULT_LOAN_PERIOD_DAYS,
        }
    }
}

impl LibraryConfig {
    pub fn with_daily_fine_rate(mut self, rate: Money) -> Self {
        self.daily_fine_rate = rate;
        self
    }

    /// 環境変数から設定を読み込む。未設定の項目はデフォルト値を使う。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(DAILY_FINE_RATE_ENV) {
            let rate: Money = raw
                .parse()
                .map_err(|source| ConfigError::InvalidFineRate {
                    raw: raw.clone(),
                    source,
                })?;
            if rate.is_negative() {
                return Err(ConfigError::NegativeFineRate(rate));
            }
            config.daily_fine_rate = rate;
        }

        if let Some(raw) = lookup(LOAN_PERIOD_DAYS_ENV) {
            config.loan_period_days = match raw.trim().parse::<i64>() {
                Ok(days) if days > 0 => days,
                _ => return Err(ConfigError::InvalidLoanPeriod(raw)),
            };
        }

        Ok(config)
    }
}
