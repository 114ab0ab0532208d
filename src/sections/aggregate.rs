//! 月別データの合計値（Batch_Transfers / Dropouts）

use crate::types::Row;

/// ヘッダー行とラベル列（列0）を除く、すべての数値セルの合計
///
/// 数値以外のセルは無視します。シートが欠落している場合（空スライス）は0。
pub fn parse_sum_metric(rows: &[Row]) -> f64 {
    rows.iter()
        .skip(1)
        .flat_map(|r| r.iter().skip(1))
        .filter_map(|c| c.as_number())
        .filter(|n| n.is_finite())
        .sum()
}
