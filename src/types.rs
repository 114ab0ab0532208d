//! Types Module
//!
//! ワークブックから抽出された生のセル値と、セル値の緩い型変換を定義するモジュール。
//!
//! 入力は人手で管理されたスプレッドシートのため、数値が文字列で入力されていたり、
//! 空白だけのセルが存在したりします。ここで定義する変換は、セクションパーサーが
//! 共通して使用する「寛容な」解釈規則です。

use chrono::{NaiveDateTime, NaiveTime};

/// 1行分の生セル値（列0始まり）
pub type Row = Vec<CellValue>;

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日付（日時）セル
    DateTime(NaiveDateTime),

    /// 時刻のみのセル（シリアル値が1未満の日時セル）
    Time(NaiveTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 値が「実質的に入力されている」かどうかを判定
    ///
    /// 空セル、空文字列、0、`false`、エラー値は入力なしとして扱います。
    /// 空白だけの文字列は入力ありとみなされるため、呼び出し側でトリムしてください。
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::String(s) => !s.is_empty(),
            CellValue::Bool(b) => *b,
            CellValue::DateTime(_) | CellValue::Time(_) => true,
            CellValue::Error(_) | CellValue::Empty => false,
        }
    }

    /// 文字列セルの場合のみ、その内容を返す
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// 数値セルの場合のみ、その値を返す
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// 値を文字列として取得（日付はISO 8601形式）
    pub fn as_raw_string(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => {
                if dt.time() == NaiveTime::MIN {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
                }
            }
            CellValue::Time(t) => t.format("%H:%M").to_string(),
            CellValue::Error(e) => e.clone(),
            CellValue::Empty => String::new(),
        }
    }

    /// 入力されていればトリム済みの文字列、そうでなければ空文字列を返す
    pub fn trimmed_text(&self) -> String {
        if self.is_present() {
            self.as_raw_string().trim().to_string()
        } else {
            String::new()
        }
    }

    /// 数値として解釈する
    ///
    /// - 数値セル: そのまま
    /// - 文字列セル: 前後の空白を除いて数値リテラルとして解釈（空文字列は0）
    /// - 論理値: `true`=1, `false`=0
    /// - 空セル: 0
    /// - 日付・時刻・エラー、解釈できない文字列: `None`
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Number(_) => None,
            CellValue::String(s) => parse_number(s),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Empty => Some(0.0),
            CellValue::DateTime(_) | CellValue::Time(_) | CellValue::Error(_) => None,
        }
    }

    /// 数値として解釈し、失敗した場合は0を返す
    pub fn number_or_zero(&self) -> f64 {
        self.to_number().unwrap_or(0.0)
    }

    /// 件数として解釈する（負数・解釈不能は0、小数は四捨五入）
    pub fn to_count(&self) -> u32 {
        let value = self.number_or_zero();
        if value > 0.0 {
            value.round().min(u32::MAX as f64) as u32
        } else {
            0
        }
    }
}

/// 行から列を取得する（行が短い場合は空セル）
pub(crate) fn cell(row: &[CellValue], col: usize) -> &CellValue {
    static EMPTY: CellValue = CellValue::Empty;
    row.get(col).unwrap_or(&EMPTY)
}

/// 文字列を数値リテラルとして解釈する
///
/// 前後の空白を除去し、空文字列は0とみなします。
/// `0x`/`0o`/`0b`接頭辞付きの整数も受け付けます。
/// `inf`や`NaN`などの非有限値は受け付けません。
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    // Rustのf64パーサーは"inf"や"nan"も受け付けるため、数字以外の文字を事前に弾く
    let is_literal = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !is_literal {
        return None;
    }

    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 文字列の先頭から解釈できる最長の10進数を返す
///
/// 例: `"1.5.2"` → `1.5`, `"12-3"` → `12`, `"-"` → `None`
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut best = None;

    if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
        end += 1;
    }

    let mut seen_dot = false;
    let mut seen_digit = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
                best = Some(end);
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
                if seen_digit {
                    best = Some(end);
                }
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }

    best.and_then(|end| s[..end].trim_end_matches('.').parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_cell_value_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(!CellValue::Number(42.0).is_empty());
        assert!(!CellValue::String("test".to_string()).is_empty());
    }

    #[test]
    fn test_is_present() {
        assert!(!CellValue::Empty.is_present());
        assert!(!CellValue::String(String::new()).is_present());
        assert!(!CellValue::Number(0.0).is_present());
        assert!(!CellValue::Bool(false).is_present());
        assert!(!CellValue::Error("#N/A".to_string()).is_present());
        assert!(CellValue::String(" ".to_string()).is_present());
        assert!(CellValue::Number(-1.0).is_present());
    }

    #[test]
    fn test_as_raw_string() {
        assert_eq!(CellValue::Empty.as_raw_string(), "");
        assert_eq!(CellValue::Number(42.0).as_raw_string(), "42");
        assert_eq!(CellValue::Number(42.5).as_raw_string(), "42.5");
        assert_eq!(CellValue::Bool(true).as_raw_string(), "true");

        let date = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(date).as_raw_string(), "2025-03-05");

        let time = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
        assert_eq!(CellValue::Time(time).as_raw_string(), "10:30");
    }

    #[test]
    fn test_trimmed_text() {
        assert_eq!(CellValue::String("  BBA  ".to_string()).trimmed_text(), "BBA");
        assert_eq!(CellValue::Number(0.0).trimmed_text(), "");
        assert_eq!(CellValue::Number(2024.0).trimmed_text(), "2024");
    }

    #[test]
    fn test_to_number() {
        assert_eq!(CellValue::Number(3.5).to_number(), Some(3.5));
        assert_eq!(CellValue::String(" 12 ".to_string()).to_number(), Some(12.0));
        assert_eq!(CellValue::String("".to_string()).to_number(), Some(0.0));
        assert_eq!(CellValue::String("abc".to_string()).to_number(), None);
        assert_eq!(CellValue::Bool(true).to_number(), Some(1.0));
        assert_eq!(CellValue::Empty.to_number(), Some(0.0));
        assert_eq!(CellValue::Error("#REF!".to_string()).to_number(), None);
    }

    #[test]
    fn test_to_count() {
        assert_eq!(CellValue::Number(7.0).to_count(), 7);
        assert_eq!(CellValue::Number(-3.0).to_count(), 0);
        assert_eq!(CellValue::String("n/a".to_string()).to_count(), 0);
        assert_eq!(CellValue::Number(2.6).to_count(), 3);
    }

    #[test]
    fn test_parse_number_rejects_non_finite() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("Infinity"), None);
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("-4.25"), Some(-4.25));
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("1.5.2"), Some(1.5));
        assert_eq!(parse_leading_float("12-3"), Some(12.0));
        assert_eq!(parse_leading_float("-7"), Some(-7.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("3."), Some(3.0));
        assert_eq!(parse_leading_float("-"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("."), None);
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let row = vec![CellValue::Number(1.0)];
        assert_eq!(cell(&row, 0), &CellValue::Number(1.0));
        assert_eq!(cell(&row, 5), &CellValue::Empty);
    }
}
