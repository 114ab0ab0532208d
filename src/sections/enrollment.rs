//! 入学者数テーブル（Enrollments）
//!
//! このシートは2段のヘッダー（上段: 期間、下段: Budget/Actual/Target などの小見出し）と、
//! 結合セルによるプログラム名のグループ化で構成されています。
//!
//! ```text
//! |           |        | Q1     |        | Q2     |        |
//! | Programme | Type   | Budget | Actual | Budget | Target |
//! | BBA       | Budget | 10     |        | 12     |        |
//! |           | Actual |        | 9      |        | 11     |
//! ```

use crate::model::{EnrollmentTable, ProgrammeRow, RowType};
use crate::types::{cell, parse_leading_float, CellValue, Row};

/// 小見出し行を探す範囲（先頭からの行数）
const HEADER_SCAN_ROWS: usize = 10;

/// 小見出し行を識別する文字列
const HEADER_MARKER: &str = "Target";

/// 値の列の開始位置（列0: プログラム名、列1: 行種別）
const VALUE_START_COL: usize = 2;

/// 入学者数シートを解析する
///
/// 小見出し行が見つからない場合は、空のテーブルを返します。
pub fn parse_enrollments(rows: &[Row]) -> EnrollmentTable {
    if rows.len() < 3 {
        return EnrollmentTable::default();
    }

    let Some(header_idx) = find_header_row(rows) else {
        log::warn!("enrollment sheet has no '{}' header row", HEADER_MARKER);
        return EnrollmentTable::default();
    };

    let period_row: &[CellValue] = match header_idx {
        0 => &[],
        i => &rows[i - 1],
    };
    let sub_row = &rows[header_idx];
    let num_cols = period_row.len().max(sub_row.len());

    let headers = synthesize_headers(period_row, sub_row, num_cols);
    let programmes = collect_programmes(&rows[header_idx + 1..], num_cols);

    let table = EnrollmentTable {
        headers,
        programmes,
    };
    for (name, row_type) in table.duplicate_rows() {
        log::warn!(
            "programme '{}' has more than one {} row",
            name,
            row_type.as_str()
        );
    }
    table
}

/// 先頭から`HEADER_SCAN_ROWS`行以内で、`Target`を含むセルがある最初の行
fn find_header_row(rows: &[Row]) -> Option<usize> {
    rows.iter().take(HEADER_SCAN_ROWS).position(|r| {
        r.iter()
            .any(|c| c.is_present() && c.as_raw_string().contains(HEADER_MARKER))
    })
}

/// 期間行と小見出し行から、値の列ごとの見出しを合成する
///
/// 期間ラベルは、次の期間ラベルが現れるまで後続の列に引き継がれます。
pub(crate) fn synthesize_headers(
    period_row: &[CellValue],
    sub_row: &[CellValue],
    num_cols: usize,
) -> Vec<String> {
    let mut last_period = String::new();
    (VALUE_START_COL..num_cols)
        .map(|c| {
            let top = cell(period_row, c).trimmed_text();
            let sub = cell(sub_row, c).trimmed_text();
            if !top.is_empty() {
                last_period = top.clone();
            }

            match (top.is_empty(), sub.is_empty()) {
                (true, false) if !last_period.is_empty() => format!("{} {}", last_period, sub),
                (false, false) => format!("{} {}", top, sub),
                (false, true) => top,
                (true, false) => sub,
                (true, true) => format!("Col{}", c),
            }
        })
        .collect()
}

/// データ行を読み、Budget/Actual行をプログラム行として収集する
///
/// プログラム名は列0が空の行では直前の名前を引き継ぎます（結合セルの再現）。
fn collect_programmes(rows: &[Row], num_cols: usize) -> Vec<ProgrammeRow> {
    let mut current_programme = String::new();
    let mut programmes = Vec::new();

    for r in rows {
        let name = cell(r, 0).trimmed_text();
        if !name.is_empty() {
            current_programme = name;
        }

        let Some(row_type) = RowType::from_label(&cell(r, 1).trimmed_text()) else {
            continue;
        };

        let values = (VALUE_START_COL..num_cols)
            .map(|c| coerce_value(cell(r, c)))
            .collect();

        programmes.push(ProgrammeRow {
            name: current_programme.clone(),
            row_type,
            values,
            is_total: current_programme.to_uppercase() == "TOTAL",
        });
    }

    programmes
}

/// 値セルを数値に変換する
///
/// 文字列は数字・`.`・`-`以外を取り除いてから先頭の数値を解釈します（例: `"1,250"` → 1250）。
fn coerce_value(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::String(s) => {
            let stripped: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                .collect();
            parse_leading_float(&stripped)
        }
        _ => None,
    }
}
