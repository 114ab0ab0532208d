//! インターンシップ集計（Internship）
//!
//! 2列または3列の「ラベル・値・割合」形式のシートです。
//! ラベルは大文字小文字を区別せずに判定し、上から順に最初に一致した規則だけを適用します。
//! 同じラベルが複数行ある場合は後の行で上書きされます。

use crate::model::InternshipSummary;
use crate::types::{cell, Row};

/// ラベル判定（小文字化済みラベル, 割合列の有無）
type Matcher = fn(&str, bool) -> bool;

/// 集計値への反映（値, 割合）
type Apply = fn(&mut InternshipSummary, f64, Option<f64>);

/// ラベル規則（評価順）
///
/// `Audit`は割合列がある行が比率、ない行が件数です。`Non Audit`も同様です。
const RULES: [(Matcher, Apply); 9] = [
    (|l, pct| l == "audit" && pct, |s, _, p| s.audit_pct = p.unwrap_or(0.0)),
    (|l, _| l == "audit", |s, v, _| s.audit.total = v),
    (|l, _| l == "big 3", |s, v, _| s.audit.big3 = v),
    (|l, _| l.contains("other"), |s, v, _| s.audit.other = v),
    (|l, pct| l == "non audit" && pct, |s, _, p| s.non_audit_pct = p.unwrap_or(0.0)),
    (|l, _| l == "non audit", |s, v, _| s.non_audit = v),
    (|l, _| l == "total", |s, v, _| s.total = v),
    (|l, _| l.contains("ca registere"), |s, v, p| {
        s.ca_registered = v;
        if let Some(p) = p {
            s.ca_reg_pct = p;
        }
    }),
    (|l, _| l.contains("ca not"), |s, v, p| {
        s.ca_not_registered = v;
        if let Some(p) = p {
            s.ca_not_reg_pct = p;
        }
    }),
];

/// インターンシップシートを解析する
///
/// 2行未満のシートは`None`（ダッシュボード上は「データなし」）。
pub fn parse_internship(rows: &[Row]) -> Option<InternshipSummary> {
    if rows.len() < 2 {
        return None;
    }

    let mut summary = InternshipSummary::default();
    for r in rows {
        let label_cell = cell(r, 0);
        if !label_cell.is_present() {
            continue;
        }
        let label = label_cell.as_raw_string().trim().to_lowercase();
        let value = cell(r, 1).number_or_zero();
        // 割合列は空セルでなければ「あり」（数値化できなければ0）
        let pct_cell = cell(r, 2);
        let pct = (!pct_cell.is_empty()).then(|| pct_cell.number_or_zero());

        match RULES.iter().find(|(matches, _)| matches(&label, pct.is_some())) {
            Some((_, apply)) => apply(&mut summary, value, pct),
            None => log::debug!("internship label '{}' ignored", label),
        }
    }

    Some(summary)
}
