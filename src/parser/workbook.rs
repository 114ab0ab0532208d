//! Workbook Module
//!
//! calamineでワークブックをデコードし、シート名 → 行データの対応表に変換します。
//! 行データはA1セルを起点とし、使用範囲より左・上の空白も空セルとして保持します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::NaiveDateTime;
use std::io::Cursor;

use crate::error::DashboardError;
use crate::parser::locator::SheetLocator;
use crate::types::{CellValue, Row};

/// 1シート分の生データ
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    /// シート名
    pub name: String,
    /// 行データ（行0 = シートの1行目）
    pub rows: Vec<Row>,
}

/// デコード済みワークブック
///
/// シートはワークブック内の並び順で保持されます。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawWorkbook {
    sheets: Vec<RawSheet>,
}

impl RawWorkbook {
    /// 空のワークブックを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// シートを末尾に追加する
    pub fn push_sheet(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.sheets.push(RawSheet {
            name: name.into(),
            rows,
        });
    }

    /// シートを追加したワークブックを返す（テストやインメモリ構築用）
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.push_sheet(name, rows);
        self
    }

    /// すべてのシート
    pub fn sheets(&self) -> &[RawSheet] {
        &self.sheets
    }

    /// すべてのシート名（ワークブック内の順序）
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// シート名の完全一致で行データを取得
    pub fn sheet(&self, name: &str) -> Option<&[Row]> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.rows.as_slice())
    }

    /// キーワードの部分一致で行データを取得（大文字小文字・空白を無視）
    pub fn find_sheet(&self, keyword: &str) -> Option<&[Row]> {
        SheetLocator::new(self).find(keyword)
    }
}

/// ワークブックパーサー
///
/// calamineのラッパーとして、バイト列からの`RawWorkbook`生成を担当します。
pub(crate) struct WorkbookParser;

impl WorkbookParser {
    /// バイト列をデコードする
    ///
    /// XLSX / XLSM / XLSB / XLS / ODS を自動判別します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(RawWorkbook)` - デコードに成功した場合
    /// * `Err(DashboardError::Parse)` - ワークブックとして解釈できない場合
    ///
    /// 個々のシートの読み込みに失敗した場合は、そのシートのみを除外します
    /// （該当ドメインはシート欠落として扱われます）。
    pub fn decode(buffer: Vec<u8>) -> Result<RawWorkbook, DashboardError> {
        let mut sheets = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        let mut workbook = RawWorkbook::new();
        for name in sheets.sheet_names().to_vec() {
            match sheets.worksheet_range(&name) {
                Ok(range) => {
                    let rows = Self::range_to_rows(&range);
                    log::debug!("decoded sheet '{}' ({} rows)", name, rows.len());
                    workbook.push_sheet(name, rows);
                }
                Err(e) => {
                    log::warn!("skipping sheet '{}': {}", name, e);
                }
            }
        }

        Ok(workbook)
    }

    /// calamineの範囲をA1起点の行データに変換する
    pub fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
        let Some((start_row, start_col)) = range.start() else {
            return Vec::new();
        };
        let start_row = start_row as usize;
        let start_col = start_col as usize;
        let width = start_col + range.width();

        let mut rows: Vec<Row> = Vec::with_capacity(start_row + range.height());
        rows.resize_with(start_row, || vec![CellValue::Empty; width]);

        for source in range.rows() {
            let mut row = Vec::with_capacity(width);
            row.resize(start_col, CellValue::Empty);
            row.extend(source.iter().map(Self::convert_cell));
            rows.push(row);
        }

        rows
    }

    /// calamineのセル値を`CellValue`に変換する
    pub fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::String(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                if dt.is_duration() {
                    return CellValue::Number(serial);
                }
                match dt.as_datetime() {
                    // シリアル値が1未満のセルは時刻のみ（例: 講義開始時刻）
                    Some(ndt) if serial < 1.0 => CellValue::Time(ndt.time()),
                    Some(ndt) => CellValue::DateTime(ndt),
                    None => CellValue::Number(serial),
                }
            }
            Data::DateTimeIso(s) => parse_iso_datetime(s)
                .map(CellValue::DateTime)
                .unwrap_or_else(|| CellValue::String(s.clone())),
            Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(e) => CellValue::Error(e.to_string()),
            Data::Empty => CellValue::Empty,
        }
    }
}

/// ODSなどが返すISO 8601形式の日時文字列を解釈する
fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let raw = s.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
