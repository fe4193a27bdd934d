use chrono::NaiveDate;

/// 時計ポート
///
/// 貸出日や返却期限の検証に使う「今日」を供給する。
/// テストでは固定日付の実装に差し替える。
pub trait Clock: Send + Sync {
    /// 今日の日付
    fn today(&self) -> NaiveDate;
}
