//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use std::io::Write;

use crate::api::OutputFormat;
use crate::error::DashboardError;
use crate::model::DashboardModel;
use crate::summary::DashboardSummary;

use formatters::{JsonFormatter, MarkdownFormatter};

/// 出力フォーマッター（Strategy Pattern）
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Json,
    Markdown,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => OutputFormatter::Json,
            OutputFormat::Markdown => OutputFormatter::Markdown,
        }
    }

    /// モデルとKPIを指定されたフォーマットで出力する
    pub fn render<W: Write>(
        &self,
        model: &DashboardModel,
        summary: &DashboardSummary,
        writer: &mut W,
    ) -> Result<(), DashboardError> {
        match self {
            OutputFormatter::Json => JsonFormatter.render(model, summary, writer),
            OutputFormatter::Markdown => MarkdownFormatter.render(model, summary, writer),
        }
    }
}

/// モデルをレポートとして書き出す
///
/// KPIはモデルから計算されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use deptdash::{write_report, LoaderBuilder, OutputFormat};
///
/// # fn main() -> Result<(), deptdash::DashboardError> {
/// let loader = LoaderBuilder::new().build()?;
/// let model = loader.load_path("department.xlsx")?;
/// write_report(&model, OutputFormat::Markdown, std::io::stdout())?;
/// # Ok(())
/// # }
/// ```
pub fn write_report<W: Write>(
    model: &DashboardModel,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), DashboardError> {
    let summary = DashboardSummary::from_model(model);
    OutputFormatter::from_format(format).render(model, &summary, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// モデルをレポート文字列に変換する
pub fn render_report(model: &DashboardModel, format: OutputFormat) -> Result<String, DashboardError> {
    let mut buffer = Vec::new();
    write_report(model, format, &mut buffer)?;

    String::from_utf8(buffer)
        .map_err(|e| DashboardError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExamCycleRecord, LectureRecord};

    fn model() -> DashboardModel {
        DashboardModel {
            lectures: vec![LectureRecord {
                degree: "BBA".to_string(),
                mode: "Weekday".to_string(),
                count: 12,
            }],
            exams: vec![ExamCycleRecord {
                cycle: "Jan".to_string(),
                papers: 4,
                released: 3,
                percentage: 75.0,
            }],
            dropouts: 2.0,
            ..DashboardModel::default()
        }
    }

    #[test]
    fn test_json_report_shape() {
        let text = render_report(&model(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["model"]["lectures"][0]["count"], 12);
        assert_eq!(value["summary"]["totalLectures"], 12);
        assert_eq!(value["model"]["dropouts"], 2.0);
    }

    #[test]
    fn test_markdown_report_sections() {
        let text = render_report(&model(), OutputFormat::Markdown).unwrap();
        assert!(text.starts_with("# Department Dashboard"));
        assert!(text.contains("## Lectures"));
        assert!(text.contains("| BBA    | Weekday | 12    |"));
        assert!(text.contains("## Exam Status"));
        assert!(text.contains("No data"));
    }

    #[test]
    fn test_write_report_to_writer() {
        let mut out = Vec::new();
        write_report(&DashboardModel::default(), OutputFormat::Json, &mut out).unwrap();
        assert!(!out.is_empty());
    }
}
