use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MoneyError;

/// ISBN - 蔵書カタログの識別キー
///
/// 与えられた文字列をそのまま保持し、完全一致で照合する。書式の検証は行わない。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Isbn {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 会員ID - 会員台帳の識別キー
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(u64);

impl MemberId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 通貨単位（単一通貨）
pub const CURRENCY: &str = "EUR";

/// 小数点以下の桁数
const MONEY_SCALE: u32 = 2;

/// 金額
///
/// 不変条件：常に小数点以下ちょうど2桁の十進数。
/// 浮動小数点を使わないため、加算・日数倍の計算で丸め誤差は発生しない。
/// 桁あふれはパニックせず`MoneyError::Overflow`を返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub fn zero() -> Self {
        Self::from_cents(0)
    }

    /// セント単位の整数から生成する（例: 50 → 0.50）
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MONEY_SCALE))
    }

    /// 日数などの整数倍を計算する
    pub fn times(self, factor: i64) -> Result<Self, MoneyError> {
        let value = self
            .0
            .checked_mul(Decimal::from(factor))
            .ok_or(MoneyError::Overflow)?;
        Self::rescaled(value)
    }

    /// 加算する
    pub fn checked_add(self, rhs: Money) -> Result<Self, MoneyError> {
        let value = self.0.checked_add(rhs.0).ok_or(MoneyError::Overflow)?;
        Self::rescaled(value)
    }

    /// すべての金額を合計する。途中で桁あふれした場合はエラー。
    pub fn try_sum<I>(amounts: I) -> Result<Self, MoneyError>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// 小数点以下2桁に揃える。揃えられない大きさなら`Overflow`。
    fn rescaled(mut value: Decimal) -> Result<Self, MoneyError> {
        value.rescale(MONEY_SCALE);
        if value.scale() != MONEY_SCALE {
            return Err(MoneyError::Overflow);
        }
        Ok(Self(value))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.normalize().scale() > MONEY_SCALE {
            return Err(MoneyError::TooPrecise(value.to_string()));
        }
        Self::rescaled(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value =
            Decimal::from_str(s.trim()).map_err(|_| MoneyError::Malformed(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, CURRENCY)
    }
}
