//! 表示用フォーマッタ
//!
//! すべて純粋関数。通貨プレフィックス「RWF 」は呼び出し側が付与する。

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// en-USロケール風の3桁区切りで数値を整形する
///
/// 小数部は入力の精度のまま保持する（丸め・切り捨てなし）。
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let raw = format!("{}", value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// 占有率の表示（小数部が0なら整数表示、JSの文字列化と同じ挙動）
pub fn format_percent(rate: f64) -> String {
    format!("{rate}%")
}

/// 日付・タイムスタンプ文字列を短い月名＋日に整形する（例: "Aug 30"）
///
/// パースできない入力はそのまま返す。
pub fn format_date(raw: &str) -> String {
    match parse_moment(raw) {
        Some(moment) => moment.format("%b %-d").to_string(),
        None => raw.to_string(),
    }
}

/// 過去のタイムスタンプを相対時刻表示に整形する
pub fn format_time_ago(raw: &str) -> String {
    match parse_moment(raw) {
        Some(then) => time_ago_between(then, Local::now().naive_local()),
        None => raw.to_string(),
    }
}

/// 相対時刻表示の本体（テスト用に現在時刻を注入可能）
///
/// 単数形は差がちょうど1のときのみ。
pub fn time_ago_between(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = seconds / 3600;
    let days = seconds / 86_400;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} minute{} ago", minutes, plural_suffix(minutes))
    } else if hours < 24 {
        format!("{} hour{} ago", hours, plural_suffix(hours))
    } else {
        format!("{} day{} ago", days, plural_suffix(days))
    }
}

/// ヘッダー時計の表示（例: "Sat, Aug 30, 2026, 02:15:04 PM"）
pub fn format_clock(now: DateTime<Local>) -> String {
    now.format("%a, %b %-d, %Y, %I:%M:%S %p").to_string()
}

fn plural_suffix(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// サーバーが返すタイムスタンプ表現を順に試してパースする
///
/// - RFC 3339（`2025-08-27T10:00:00Z` / オフセット付き）
/// - SQL DATETIME（`2025-08-27 10:00:00`）
/// - ISO 8601ローカル（`2025-08-27T10:00:00`）
/// - RFC 1123（FlaskがSQL DATE列をこの形式で返す）
/// - 日付のみ（`2025-08-27`）
pub fn parse_moment(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(moment) = DateTime::parse_from_rfc3339(raw) {
        return Some(moment.with_timezone(&Local).naive_local());
    }
    if let Ok(moment) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(moment);
    }
    if let Ok(moment) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(moment);
    }
    if let Ok(moment) = NaiveDateTime::parse_from_str(raw, "%a, %d %b %Y %H:%M:%S GMT") {
        return Some(moment);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_format_number_thousands_separators() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(-1234567.0), "-1,234,567");
    }

    #[test]
    fn test_format_number_preserves_precision() {
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(12500.25), "12,500.25");
    }

    #[test]
    fn test_time_ago_thresholds() {
        let now = now();
        assert_eq!(time_ago_between(now - Duration::seconds(30), now), "Just now");
        assert_eq!(
            time_ago_between(now - Duration::seconds(90), now),
            "1 minute ago"
        );
        assert_eq!(
            time_ago_between(now - Duration::minutes(45), now),
            "45 minutes ago"
        );
        assert_eq!(
            time_ago_between(now - Duration::minutes(150), now),
            "2 hours ago"
        );
        assert_eq!(time_ago_between(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(time_ago_between(now - Duration::days(3), now), "3 days ago");
        assert_eq!(time_ago_between(now - Duration::days(1), now), "1 day ago");
    }

    #[test]
    fn test_time_ago_future_timestamp_clamps_to_just_now() {
        let now = now();
        assert_eq!(time_ago_between(now + Duration::minutes(5), now), "Just now");
    }

    #[test]
    fn test_format_date_accepts_server_formats() {
        assert_eq!(format_date("2025-08-27"), "Aug 27");
        assert_eq!(format_date("2025-08-27 10:30:00"), "Aug 27");
        assert_eq!(format_date("Wed, 27 Aug 2025 00:00:00 GMT"), "Aug 27");
        // パース不能な入力はそのまま
        assert_eq!(format_date("Today"), "Today");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.0), "12%");
        assert_eq!(format_percent(12.5), "12.5%");
    }
}
