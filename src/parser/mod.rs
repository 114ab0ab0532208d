//! Parser Module
//!
//! calamineを使用したワークブックのデコードと、論理シート名によるシート検索。
//! ここで得られる生の行データが、各セクションパーサーの入力になります。

mod locator;
mod workbook;

pub use locator::{normalize_sheet_key, SheetLocator};
pub use workbook::{RawSheet, RawWorkbook};
pub(crate) use workbook::WorkbookParser;
