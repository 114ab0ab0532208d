//! 学位・形態ごとの講義数（Lecture_Breakdown）

use crate::model::LectureRecord;
use crate::types::{cell, Row};

/// ヘッダー行に現れる学位列のラベル
const HEADER_LABEL: &str = "Degree";

/// 講義数シートを解析する
///
/// 行は`[degree, mode, count]`。学位が文字列でない行とヘッダーラベルの行は読み飛ばし、
/// 件数は数値に解釈できなければ0になります。
pub fn parse_lecture_breakdown(rows: &[Row]) -> Vec<LectureRecord> {
    rows.iter()
        .skip(1)
        .filter_map(|r| {
            let degree = cell(r, 0).as_str().filter(|d| !d.is_empty() && *d != HEADER_LABEL)?;
            Some(LectureRecord {
                degree: degree.to_string(),
                mode: cell(r, 1).as_raw_string(),
                count: cell(r, 2).to_count(),
            })
        })
        .collect()
}
