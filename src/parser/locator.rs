//! Sheet Locator
//!
//! 論理シート名から行データを引き当てる。
//! シート名は人手で付けられるため、空白や大文字小文字の揺れを吸収した部分一致も提供します。

use crate::parser::workbook::RawWorkbook;
use crate::types::Row;

/// シート名の比較キーを生成（小文字化し、すべての空白を除去）
pub fn normalize_sheet_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// ワークブックに対するシート検索
#[derive(Debug, Clone, Copy)]
pub struct SheetLocator<'a> {
    workbook: &'a RawWorkbook,
}

impl<'a> SheetLocator<'a> {
    pub fn new(workbook: &'a RawWorkbook) -> Self {
        Self { workbook }
    }

    /// 完全一致でシートを取得
    pub fn exact(&self, name: &str) -> Option<&'a [Row]> {
        self.workbook.sheet(name)
    }

    /// 正規化したシート名にキーワードを含む最初のシートを取得
    ///
    /// 見つからない場合は`None`。呼び出し側は空入力として扱います。
    pub fn find(&self, keyword: &str) -> Option<&'a [Row]> {
        let key = normalize_sheet_key(keyword);
        let sheet = self
            .workbook
            .sheets()
            .iter()
            .find(|s| normalize_sheet_key(&s.name).contains(&key));
        match sheet {
            Some(s) => {
                log::debug!("sheet keyword '{}' matched '{}'", keyword, s.name);
                Some(s.rows.as_slice())
            }
            None => {
                log::debug!("no sheet matches keyword '{}'", keyword);
                None
            }
        }
    }

    /// 完全一致を優先し、見つからなければ部分一致で取得
    pub fn exact_or_find(&self, name: &str, keyword: &str) -> Option<&'a [Row]> {
        self.exact(name).or_else(|| self.find(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn workbook() -> RawWorkbook {
        RawWorkbook::new()
            .with_sheet("Lecture_Breakdown", vec![vec![CellValue::Number(1.0)]])
            .with_sheet(" Student Counselling ", vec![vec![CellValue::Number(2.0)]])
            .with_sheet("Highlights Feb", vec![vec![CellValue::Number(3.0)]])
            .with_sheet("Highlights Mar", vec![vec![CellValue::Number(4.0)]])
    }

    #[test]
    fn test_normalize_sheet_key() {
        assert_eq!(normalize_sheet_key(" Student\tCounselling "), "studentcounselling");
        assert_eq!(normalize_sheet_key("Exam_Status"), "exam_status");
    }

    #[test]
    fn test_find_ignores_case_and_whitespace() {
        let wb = workbook();
        let locator = SheetLocator::new(&wb);
        let rows = locator.find("counselling").unwrap();
        assert_eq!(rows[0][0], CellValue::Number(2.0));

        let rows = locator.find("Student Couns").unwrap();
        assert_eq!(rows[0][0], CellValue::Number(2.0));
    }

    #[test]
    fn test_find_returns_first_in_workbook_order() {
        let wb = workbook();
        let rows = SheetLocator::new(&wb).find("highlight").unwrap();
        assert_eq!(rows[0][0], CellValue::Number(3.0));
    }

    #[test]
    fn test_find_missing_is_none() {
        let wb = workbook();
        assert!(SheetLocator::new(&wb).find("Internship").is_none());
    }

    #[test]
    fn test_exact_or_find() {
        let wb = workbook();
        let locator = SheetLocator::new(&wb);
        assert!(locator.exact("lecture_breakdown").is_none());
        assert!(locator.exact("Lecture_Breakdown").is_some());

        let rows = locator.exact_or_find("Highlights", "Highlight").unwrap();
        assert_eq!(rows[0][0], CellValue::Number(3.0));
    }
}
