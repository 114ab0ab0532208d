//! 月ごとのカウンセリング件数

use crate::model::CounsellingRecord;
use crate::types::{cell, Row};

/// カウンセリングシートを解析する
///
/// 行は`[month, count]`。月が空の行は読み飛ばします。
/// 合計などの集計は`DashboardSummary`側で行います。
pub fn parse_counselling(rows: &[Row]) -> Vec<CounsellingRecord> {
    rows.iter()
        .skip(1)
        .filter_map(|r| {
            let month = cell(r, 0).trimmed_text();
            if month.is_empty() {
                return None;
            }
            Some(CounsellingRecord {
                month,
                count: cell(r, 1).to_count(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn test_parse_counselling() {
        let rows = vec![
            vec![s("Month"), s("Sessions")],
            vec![s(" January "), CellValue::Number(4.0)],
            vec![CellValue::Empty, CellValue::Number(9.0)],
            vec![s("February"), s("none")],
        ];

        let records = parse_counselling(&rows);
        assert_eq!(
            records,
            vec![
                CounsellingRecord {
                    month: "January".to_string(),
                    count: 4
                },
                CounsellingRecord {
                    month: "February".to_string(),
                    count: 0
                },
            ]
        );
    }

    #[test]
    fn test_header_only() {
        assert!(parse_counselling(&[vec![s("Month"), s("Sessions")]]).is_empty());
        assert!(parse_counselling(&[]).is_empty());
    }
}
