//! 講義開始・終了スケジュール（Lecture_Commencements / Lecture_Endings）

use crate::api::DateFormat;
use crate::formatter::DateFormatter;
use crate::model::ScheduleEntry;
use crate::types::{cell, CellValue, Row};

/// スケジュールシートを解析する
///
/// 行は`[label, date, batch, semester]`。バッチが空の行は読み飛ばします。
///
/// 日付列の扱い:
/// 1. 日付セル → `format`で整形
/// 2. 日付として解釈できる値（シリアル値、日付文字列）→ 同様に整形
/// 3. それ以外 → 最初の`T`より前の部分（ISOタイムスタンプ文字列への対策）
pub fn parse_schedule(rows: &[Row], format: &DateFormat) -> Vec<ScheduleEntry> {
    let formatter = DateFormatter::new(format);
    rows.iter()
        .skip(1)
        .filter_map(|r| {
            let batch = cell(r, 2).trimmed_text().replace('\u{a0}', " ");
            if batch.is_empty() {
                return None;
            }
            Some(ScheduleEntry {
                batch,
                semester: cell(r, 3).trimmed_text(),
                date: format_schedule_date(cell(r, 1), &formatter),
            })
        })
        .collect()
}

fn format_schedule_date(value: &CellValue, formatter: &DateFormatter) -> String {
    if !value.is_present() {
        return String::new();
    }
    match formatter.coerce(value) {
        Some(date) => formatter.format(date),
        None => {
            let raw = value.as_raw_string();
            match raw.split_once('T') {
                Some((before, _)) => before.to_string(),
                None => raw,
            }
        }
    }
}
