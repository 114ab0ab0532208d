//! 試験サイクルごとの結果公開状況（Exam_Status）
//!
//! 公開率の列には、ワークブック側で計算されなかった数式（`=C2/B2*100`など）が
//! 文字列のまま残っていることがあります。その場合は公開数・試験数から再計算します。

use crate::model::ExamCycleRecord;
use crate::types::{cell, CellValue, Row};

/// ヘッダー行に現れるサイクル列のラベル
const HEADER_LABEL: &str = "Exam_Cycle";

/// 試験状況シートを解析する
///
/// 行は`[cycle, papers, released, percentage]`。
pub fn parse_exam_status(rows: &[Row]) -> Vec<ExamCycleRecord> {
    rows.iter()
        .skip(1)
        .filter_map(|r| {
            let cycle = cell(r, 0).as_str().filter(|c| !c.is_empty() && *c != HEADER_LABEL)?;
            let papers = cell(r, 1).number_or_zero();
            let released = cell(r, 2).number_or_zero();
            Some(ExamCycleRecord {
                cycle: cycle.to_string(),
                papers: cell(r, 1).to_count(),
                released: cell(r, 2).to_count(),
                percentage: resolve_percentage(cell(r, 3), papers, released),
            })
        })
        .collect()
}

/// 公開率を決定し、小数第1位に丸める
///
/// - `=`で始まる文字列（未計算の数式）: `released / papers * 100`（papersが0以下なら0）
/// - それ以外: 数値として解釈し、解釈できないか0の場合は同じ再計算式
pub fn resolve_percentage(raw: &CellValue, papers: f64, released: f64) -> f64 {
    let recomputed = || {
        if papers > 0.0 {
            released / papers * 100.0
        } else {
            0.0
        }
    };

    let pct = match raw {
        CellValue::String(s) if s.starts_with('=') => recomputed(),
        other => match other.to_number() {
            Some(v) if v != 0.0 => v,
            _ => recomputed(),
        },
    };

    (pct * 10.0).round() / 10.0
}
