//! ダッシュボード表示用ビューモデル
//!
//! APIレコード→表示アイテムへの変換は純粋関数として分離し、
//! UIなしで単体テストできるようにする。

use crate::api::models::{
    ActivityRecord, AlertRecord, LowBalanceAlert, PaymentStatus, SessionRecord, Severity,
};
use crate::gui::format::{format_number, format_time_ago};

/// 最近のアクティビティ1件分の表示アイテム
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityItem {
    pub kind: String,
    pub title: String,
    pub time: String,
    pub icon: String,
}

impl ActivityItem {
    /// データなしプレースホルダ
    pub fn placeholder() -> Self {
        Self {
            kind: "info".to_string(),
            title: "No recent activity".to_string(),
            time: String::new(),
            icon: "fa-info-circle".to_string(),
        }
    }

    pub fn from_record(record: ActivityRecord) -> Self {
        Self {
            kind: record.kind,
            title: record.title,
            time: record.time,
            icon: record.icon,
        }
    }

    /// セッションレコードからアクティビティを合成する（フォールバック経路）
    ///
    /// 判定順はサーバーのrecent-activity実装と同一:
    /// 支払い済み → 不正出庫 → 出庫済み → 入庫。
    pub fn from_session(session: &SessionRecord) -> Self {
        let time = format_time_ago(&session.timestamp);
        match session.status() {
            PaymentStatus::Paid => Self {
                kind: "payment".to_string(),
                title: format!(
                    "Payment received from {} - RWF {}",
                    session.plate_number,
                    format_number(session.amount)
                ),
                time,
                icon: "fa-credit-card".to_string(),
            },
            _ if session.is_unauthorized() => Self {
                kind: "alert".to_string(),
                title: format!("Unauthorized exit attempt: {}", session.plate_number),
                time,
                icon: "fa-exclamation-triangle".to_string(),
            },
            PaymentStatus::Exited => Self {
                kind: "exit".to_string(),
                title: format!("Vehicle {} exited", session.plate_number),
                time,
                icon: "fa-sign-out-alt".to_string(),
            },
            _ => Self {
                kind: "entry".to_string(),
                title: format!(
                    "Vehicle {} entered at {}",
                    session.plate_number, session.gate
                ),
                time,
                icon: "fa-car".to_string(),
            },
        }
    }
}

/// システムアラート1件分の表示アイテム
#[derive(Debug, Clone, PartialEq)]
pub struct AlertItem {
    pub kind: String,
    pub title: String,
    pub time: String,
    pub severity: Severity,
}

impl AlertItem {
    /// データなしプレースホルダ
    pub fn placeholder() -> Self {
        Self {
            kind: "info".to_string(),
            title: "No active alerts".to_string(),
            time: String::new(),
            severity: Severity::Low,
        }
    }

    pub fn from_record(record: AlertRecord) -> Self {
        Self {
            kind: record.kind,
            title: record.title,
            time: record.time,
            severity: record.severity,
        }
    }

    /// 残高不足アラートからの変換（フォールバック経路）
    pub fn from_low_balance(alert: &LowBalanceAlert) -> Self {
        Self {
            kind: "warning".to_string(),
            title: format!(
                "Low balance: {} (RWF {})",
                alert.plate_number,
                format_number(alert.balance)
            ),
            time: format_time_ago(&alert.last_seen),
            severity: Severity::Medium,
        }
    }

    /// 重大度→CSSステートクラス（3種のみ、デフォルトlow）
    pub fn severity_class(&self) -> &'static str {
        match self.severity {
            Severity::High => "alert-high",
            Severity::Medium => "alert-medium",
            Severity::Low => "alert-low",
        }
    }
}

/// fa-*アイコン名→絵文字グリフ
///
/// デスクトップ版にはFontAwesomeを同梱しないため、アイコン語彙は
/// サーバー契約のまま保持し描画時にグリフへ落とす。
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "fa-credit-card" => "💳",
        "fa-car" => "🚗",
        "fa-sign-out-alt" => "🚪",
        "fa-exclamation-triangle" => "⚠️",
        "fa-bell" => "🔔",
        "fa-info-circle" => "ℹ️",
        _ => "📌",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::PlateNumber;

    fn session(payment_status: i64, gate: &str) -> SessionRecord {
        SessionRecord {
            plate_number: PlateNumber("RAB 123 C".to_string()),
            payment_status,
            amount: 1500.0,
            gate: gate.to_string(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_paid_session_becomes_payment_activity() {
        let item = ActivityItem::from_session(&session(1, "exit-a"));
        assert_eq!(item.kind, "payment");
        assert!(item.title.contains("Payment received"));
        assert!(item.title.contains("RAB 123 C"));
        assert!(item.title.contains("RWF 1,500"));
        assert_eq!(item.icon, "fa-credit-card");
    }

    #[test]
    fn test_unpaid_session_becomes_entry_activity() {
        let item = ActivityItem::from_session(&session(0, "gate-1"));
        assert_eq!(item.kind, "entry");
        assert!(item.title.contains("entered at"));
        assert!(item.title.contains("gate-1"));
        assert_eq!(item.icon, "fa-car");
    }

    #[test]
    fn test_exited_session_becomes_exit_activity() {
        let item = ActivityItem::from_session(&session(2, "exit-b"));
        assert_eq!(item.kind, "exit");
        assert!(item.title.contains("exited"));
        assert_eq!(item.icon, "fa-sign-out-alt");
    }

    #[test]
    fn test_unauthorized_gate_becomes_alert_activity() {
        let item = ActivityItem::from_session(&session(0, "unauthorized"));
        assert_eq!(item.kind, "alert");
        assert!(item.title.contains("Unauthorized exit attempt"));
        assert_eq!(item.icon, "fa-exclamation-triangle");
    }

    #[test]
    fn test_severity_maps_to_exactly_three_classes() {
        let mut alert = AlertItem::placeholder();
        assert_eq!(alert.severity_class(), "alert-low");
        alert.severity = Severity::Medium;
        assert_eq!(alert.severity_class(), "alert-medium");
        alert.severity = Severity::High;
        assert_eq!(alert.severity_class(), "alert-high");
    }

    #[test]
    fn test_low_balance_alert_mapping() {
        let item = AlertItem::from_low_balance(&LowBalanceAlert {
            plate_number: PlateNumber("RAC 456 B".to_string()),
            balance: 250.0,
            last_seen: String::new(),
        });
        assert_eq!(item.kind, "warning");
        assert_eq!(item.title, "Low balance: RAC 456 B (RWF 250)");
        assert_eq!(item.severity, Severity::Medium);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(ActivityItem::placeholder().title, "No recent activity");
        assert_eq!(AlertItem::placeholder().title, "No active alerts");
    }
}
