//! 管理サーバーAPIのペイロードモデル
//!
//! サーバー側はSQLのDECIMAL値を文字列としてシリアライズすることがあるため、
//! 金額系フィールドは数値・文字列の両方を受け付ける。欠損フィールドはすべて
//! 安全なデフォルト値（0や空文字）に落とす。

use serde::{Deserialize, Deserializer, Serialize};

/// ナンバープレート
#[derive(Debug, Clone, PartialEq, Eq, Default, derive_more::Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateNumber(pub String);

/// 統計チャートの期間タグ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsPeriod {
    #[default]
    SevenDays,
    ThirtyDays,
}

impl StatsPeriod {
    /// クエリパラメータ用の短縮タグ
    pub fn tag(self) -> &'static str {
        match self {
            StatsPeriod::SevenDays => "7d",
            StatsPeriod::ThirtyDays => "30d",
        }
    }

    /// 期間セレクタボタンの表示ラベル
    pub fn label(self) -> &'static str {
        match self {
            StatsPeriod::SevenDays => "7 Days",
            StatsPeriod::ThirtyDays => "30 Days",
        }
    }

    pub fn all() -> [StatsPeriod; 2] {
        [StatsPeriod::SevenDays, StatsPeriod::ThirtyDays]
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "7d" => Some(StatsPeriod::SevenDays),
            "30d" => Some(StatsPeriod::ThirtyDays),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// `/api/revenue` のレスポンス
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueSummary {
    #[serde(default, deserialize_with = "de_f64")]
    pub total_revenue: f64,
}

/// `/api/active-vehicles` と `/api/active-alerts` のレスポンス
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CountResponse {
    #[serde(default)]
    pub count: u64,
}

/// `/api/occupancy-rate` のレスポンス
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OccupancyRate {
    #[serde(default, deserialize_with = "de_f64")]
    pub rate: f64,
    #[serde(default)]
    pub occupied: Option<u64>,
    #[serde(default)]
    pub capacity: Option<u64>,
}

/// `/api/daily-stats` の1日分レコード
///
/// 日付キーとして `date` / `timestamp`、金額キーとして `revenue` / `amount` の
/// どちらを返すかはサーバーのバージョンによって揺れるため両方を保持する。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyStat {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub total_vehicles: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub revenue: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_f64")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub total_sessions: Option<u64>,
}

impl DailyStat {
    /// X軸ラベルの元になる日付文字列
    pub fn label_source(&self) -> &str {
        self.date
            .as_deref()
            .or(self.timestamp.as_deref())
            .unwrap_or("")
    }

    pub fn vehicles(&self) -> u64 {
        self.total_vehicles.unwrap_or(0)
    }

    pub fn revenue_value(&self) -> f64 {
        self.revenue.or(self.amount).unwrap_or(0.0)
    }

    pub fn sessions(&self) -> u64 {
        self.total_sessions.unwrap_or(0)
    }
}

/// 駐車セッションの支払い状態
///
/// サーバー契約: 0 = 未払い（在場中）、1 = 支払い済み、2 = 出庫済み。
/// 未知のコードはそのまま保持して「入庫」として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
    Exited,
    Unknown(i64),
}

impl PaymentStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => PaymentStatus::Unpaid,
            1 => PaymentStatus::Paid,
            2 => PaymentStatus::Exited,
            other => PaymentStatus::Unknown(other),
        }
    }
}

/// `/api/recent-sessions` の1レコード
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub plate_number: PlateNumber,
    #[serde(default)]
    pub payment_status: i64,
    #[serde(default, deserialize_with = "de_f64")]
    pub amount: f64,
    #[serde(default)]
    pub gate: String,
    #[serde(default)]
    pub timestamp: String,
}

impl SessionRecord {
    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::from_code(self.payment_status)
    }

    /// 不正出庫ゲートの番兵値
    pub fn is_unauthorized(&self) -> bool {
        self.gate == "unauthorized"
    }
}

/// `/api/recent-activity` の1レコード
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub icon: String,
}

/// アラートの重大度（未知の値・欠損は low 扱い）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

/// `/api/system-alerts` の1レコード
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub severity: Severity,
}

/// `/api/low-balance-alerts` の1レコード
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LowBalanceAlert {
    #[serde(default)]
    pub plate_number: PlateNumber,
    #[serde(default, deserialize_with = "de_f64")]
    pub balance: f64,
    #[serde(default)]
    pub last_seen: String,
}

/// JSONの数値または数値文字列をf64へ変換
pub(crate) fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64).unwrap_or(0.0))
}

fn de_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_summary_missing_field_defaults_to_zero() {
        let summary: RevenueSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary.total_revenue, 0.0);
    }

    #[test]
    fn test_revenue_summary_accepts_decimal_string() {
        let summary: RevenueSummary =
            serde_json::from_str(r#"{"total_revenue": "12500.50"}"#).unwrap();
        assert_eq!(summary.total_revenue, 12500.5);
    }

    #[test]
    fn test_daily_stat_alternate_keys() {
        let stat: DailyStat = serde_json::from_str(
            r#"{"timestamp": "2025-08-27", "amount": "300", "total_vehicles": 12}"#,
        )
        .unwrap();
        assert_eq!(stat.label_source(), "2025-08-27");
        assert_eq!(stat.revenue_value(), 300.0);
        assert_eq!(stat.vehicles(), 12);
        assert_eq!(stat.sessions(), 0);
    }

    #[test]
    fn test_severity_defaults_to_low() {
        let alert: AlertRecord =
            serde_json::from_str(r#"{"type": "info", "title": "x", "time": ""}"#).unwrap();
        assert_eq!(alert.severity, Severity::Low);

        // 未知の重大度もlowに落ちる
        let alert: AlertRecord =
            serde_json::from_str(r#"{"type": "info", "title": "x", "time": "", "severity": "critical"}"#)
                .unwrap();
        assert_eq!(alert.severity, Severity::Low);

        let alert: AlertRecord =
            serde_json::from_str(r#"{"type": "error", "title": "x", "time": "", "severity": "high"}"#)
                .unwrap();
        assert_eq!(alert.severity, Severity::High);
    }

    #[test]
    fn test_payment_status_codes() {
        assert_eq!(PaymentStatus::from_code(0), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::from_code(1), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::from_code(2), PaymentStatus::Exited);
        assert_eq!(PaymentStatus::from_code(7), PaymentStatus::Unknown(7));
    }

    #[test]
    fn test_stats_period_tags() {
        assert_eq!(StatsPeriod::SevenDays.tag(), "7d");
        assert_eq!(StatsPeriod::ThirtyDays.tag(), "30d");
        assert_eq!(StatsPeriod::from_tag("30d"), Some(StatsPeriod::ThirtyDays));
        assert_eq!(StatsPeriod::from_tag("90d"), None);
        assert_eq!(StatsPeriod::default(), StatsPeriod::SevenDays);
    }

    #[test]
    fn test_session_record_tolerates_sparse_payload() {
        let session: SessionRecord =
            serde_json::from_str(r#"{"plate_number": "RAB 123 C"}"#).unwrap();
        assert_eq!(session.plate_number.0, "RAB 123 C");
        assert_eq!(session.status(), PaymentStatus::Unpaid);
        assert_eq!(session.amount, 0.0);
        assert!(!session.is_unauthorized());
    }
}
