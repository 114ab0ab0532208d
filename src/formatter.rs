//! Formatter Module
//!
//! 日付セルの解釈と表示用フォーマットを提供するモジュール。
//!
//! ワークブック内の日付は、ネイティブの日付セル、シリアル値の数値セル、
//! 人手で入力された文字列など、さまざまな形で現れます。

use std::fmt::Write;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use crate::api::DateFormat;
use crate::types::CellValue;

/// 日付文字列として受け付けるレイアウト（日付のみ）
const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%a %b %d %Y",
];

/// 日付文字列として受け付けるレイアウト（日時）
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

/// 日付フォーマッター
///
/// 設定された`DateFormat`に従って日付を文字列化し、
/// 日付らしき値を`NaiveDate`に変換します。
#[derive(Debug, Clone)]
pub(crate) struct DateFormatter {
    /// chrono互換のフォーマット文字列
    pattern: String,
}

impl DateFormatter {
    /// 新しいDateFormatterインスタンスを生成
    pub fn new(format: &DateFormat) -> Self {
        Self {
            pattern: format.pattern().to_string(),
        }
    }

    /// 日付をフォーマット
    ///
    /// 書式文字列が不正な場合はISO 8601形式にフォールバックします。
    pub fn format(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.pattern)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }

    /// セル値を日付として解釈する
    ///
    /// - 日付セル: 日付部分
    /// - 数値セル: スプレッドシートのシリアル日付（1900年システム）
    /// - 文字列セル: `DATE_LAYOUTS` / `DATETIME_LAYOUTS` / RFC 3339
    pub fn coerce(&self, cell: &CellValue) -> Option<NaiveDate> {
        match cell {
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Number(n) => serial_to_datetime(*n).map(|dt| dt.date()),
            CellValue::String(s) => parse_date_text(s),
            _ => None,
        }
    }

    /// セル値を表示用の文字列に変換する
    ///
    /// 日付セルは設定された形式、時刻セルは`HH:MM`、
    /// それ以外は入力されていればトリム済みの文字列になります。
    pub fn display(&self, cell: &CellValue) -> String {
        match cell {
            CellValue::DateTime(dt) => self.format(dt.date()),
            CellValue::Time(t) => t.format("%H:%M").to_string(),
            other => other.trimmed_text(),
        }
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(&DateFormat::default())
    }
}

/// シリアル日付値を日時に変換する（1900年システム）
///
/// - シリアル値1 = 1900年1月1日
/// - シリアル値60は存在しない1900年2月29日（Excelのうるう年バグ）のため、2月28日として扱う
/// - シリアル値61以降は1899年12月30日起算
///
/// 小数部は時刻として扱います。負数や範囲外の値は`None`。
pub(crate) fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let days = serial.floor();
    let epoch = if days < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let days = if days == 60.0 { 59 } else { days as i64 };

    let seconds = ((serial - serial.floor()) * 86_400.0).round() as i64;
    epoch
        .checked_add_signed(Duration::days(days))?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(seconds))
}

/// 人手で入力された日付文字列を解釈する
pub(crate) fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }

    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
        .or_else(|| {
            DATETIME_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_display() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format(ymd(2025, 3, 5)), "05 Mar 2025");
    }

    #[test]
    fn test_format_custom() {
        let formatter = DateFormatter::new(&DateFormat::Custom("%Y/%m/%d".to_string()));
        assert_eq!(formatter.format(ymd(2025, 3, 5)), "2025/03/05");
    }

    #[test]
    fn test_serial_to_datetime() {
        assert_eq!(serial_to_datetime(1.0).unwrap().date(), ymd(1900, 1, 1));
        assert_eq!(serial_to_datetime(59.0).unwrap().date(), ymd(1900, 2, 28));
        assert_eq!(serial_to_datetime(61.0).unwrap().date(), ymd(1900, 3, 1));
        assert_eq!(serial_to_datetime(45658.0).unwrap().date(), ymd(2025, 1, 1));

        let with_time = serial_to_datetime(45658.5).unwrap();
        assert_eq!(with_time.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        assert!(serial_to_datetime(-1.0).is_none());
        assert!(serial_to_datetime(f64::NAN).is_none());
    }

    #[test]
    fn test_parse_date_text() {
        assert_eq!(parse_date_text("2025-01-15"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_date_text("01/15/2025"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_date_text("15 Jan 2025"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_date_text("January 15, 2025"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_date_text("2025-01-15T09:30:00"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_date_text("2025-01-15T09:30:00Z"), Some(ymd(2025, 1, 15)));
        assert_eq!(parse_date_text("TBD"), None);
        assert_eq!(parse_date_text(""), None);
    }

    #[test]
    fn test_coerce() {
        let formatter = DateFormatter::default();
        assert_eq!(
            formatter.coerce(&CellValue::Number(45658.0)),
            Some(ymd(2025, 1, 1))
        );
        assert_eq!(
            formatter.coerce(&CellValue::String("2025-02-01".to_string())),
            Some(ymd(2025, 2, 1))
        );
        assert_eq!(formatter.coerce(&CellValue::Bool(true)), None);
    }

    #[test]
    fn test_display() {
        let formatter = DateFormatter::default();
        let dt = ymd(2025, 3, 5).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(formatter.display(&CellValue::DateTime(dt)), "05 Mar 2025");

        let time = NaiveTime::from_hms_opt(14, 5, 0).unwrap();
        assert_eq!(formatter.display(&CellValue::Time(time)), "14:05");

        assert_eq!(
            formatter.display(&CellValue::String(" Hall A ".to_string())),
            "Hall A"
        );
        assert_eq!(formatter.display(&CellValue::Empty), "");
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_iso() {
        let formatter = DateFormatter::new(&DateFormat::Custom("%!".to_string()));
        assert_eq!(formatter.format(ymd(2025, 3, 5)), "2025-03-05");
    }
}
