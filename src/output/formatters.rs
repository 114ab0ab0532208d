//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use std::io::Write;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::error::DashboardError;
use crate::model::{DashboardModel, ExamProgress, ScheduleEntry};
use crate::summary::DashboardSummary;

/// 空のセクションに出力する文言
const NO_DATA: &str = "_No data_";

/// JSON出力の最上位オブジェクト
#[derive(Serialize)]
struct Report<'a> {
    model: &'a DashboardModel,
    summary: &'a DashboardSummary,
}

/// JSON形式のフォーマッター
///
/// `{"model": ..., "summary": ...}`を整形して出力します。
pub(crate) struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        model: &DashboardModel,
        summary: &DashboardSummary,
        writer: &mut W,
    ) -> Result<(), DashboardError> {
        let report = Report { model, summary };
        serde_json::to_writer_pretty(&mut *writer, &report).map_err(std::io::Error::from)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Markdown形式のフォーマッター
///
/// KPIブロックと、データドメインごとのテーブルを出力します。
pub(crate) struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn render<W: Write>(
        &self,
        model: &DashboardModel,
        summary: &DashboardSummary,
        writer: &mut W,
    ) -> Result<(), DashboardError> {
        writeln!(writer, "# Department Dashboard")?;

        section(writer, "Key Figures", &kpi_table(summary))?;
        section(writer, "Lectures", &lecture_table(model))?;
        section(writer, "Exam Status", &exam_table(model))?;
        section(writer, "Enrollments", &enrollment_table(model))?;
        section(writer, "Lecture Commencements", &schedule_table(&model.commencements))?;
        section(writer, "Lecture Endings", &schedule_table(&model.endings))?;
        section(writer, "Guest Lectures", &guest_lecture_table(model))?;
        section(writer, "Events", &event_table(model))?;
        section(writer, "Internship", &internship_table(model, summary))?;
        section(writer, "Counselling", &counselling_table(model))?;

        Ok(())
    }
}

fn section<W: Write>(writer: &mut W, title: &str, table: &MarkdownTable) -> Result<(), DashboardError> {
    writeln!(writer)?;
    writeln!(writer, "## {}", title)?;
    writeln!(writer)?;
    if table.is_empty() {
        writeln!(writer, "{}", NO_DATA)?;
        Ok(())
    } else {
        table.render(writer)
    }
}

fn kpi_table(summary: &DashboardSummary) -> MarkdownTable {
    let by_degree = summary
        .lectures_by_degree
        .iter()
        .map(|d| format!("{} {}", d.degree, d.count))
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = MarkdownTable::new(&["Metric", "Value"]);
    table.push_row(vec![
        "Total lectures".to_string(),
        if by_degree.is_empty() {
            summary.total_lectures.to_string()
        } else {
            format!("{} ({})", summary.total_lectures, by_degree)
        },
    ]);
    table.push_row(vec![
        "Enrollment".to_string(),
        format!(
            "{} (budget {})",
            summary.enrollment_headline(),
            summary.enrollment_budget
        ),
    ]);
    table.push_row(vec![
        "Exam results released".to_string(),
        format!(
            "{} / {} ({}%)",
            summary.total_released,
            summary.total_papers,
            summary.release_rate()
        ),
    ]);
    table.push_row(vec![
        "Exam cycles".to_string(),
        summary.exam_cycles.len().to_string(),
    ]);
    table.push_row(vec![
        "Counselling sessions".to_string(),
        summary.total_counselling.to_string(),
    ]);
    table.push_row(vec![
        "Batch transfers".to_string(),
        summary.batch_transfers.to_string(),
    ]);
    table.push_row(vec!["Dropouts".to_string(), summary.dropouts.to_string()]);
    table
}

fn lecture_table(model: &DashboardModel) -> MarkdownTable {
    let mut table = MarkdownTable::new(&["Degree", "Mode", "Count"]);
    for l in &model.lectures {
        table.push_row(vec![l.degree.clone(), l.mode.clone(), l.count.to_string()]);
    }
    table
}

fn exam_table(model: &DashboardModel) -> MarkdownTable {
    let mut table = MarkdownTable::new(&["Cycle", "Papers", "Released", "%", "Status"]);
    for e in &model.exams {
        let status = match e.status() {
            ExamProgress::Complete => "Complete",
            ExamProgress::InProgress => "In progress",
            ExamProgress::Behind => "Behind",
        };
        table.push_row(vec![
            e.cycle.clone(),
            e.papers.to_string(),
            e.released.to_string(),
            e.percentage.to_string(),
            status.to_string(),
        ]);
    }
    table
}

fn enrollment_table(model: &DashboardModel) -> MarkdownTable {
    let enrollment = &model.enrollment;
    let mut headers = vec!["Programme", "Type"];
    headers.extend(enrollment.headers.iter().map(String::as_str));

    let mut table = MarkdownTable::new(&headers);
    for p in &enrollment.programmes {
        let mut row = vec![p.name.clone(), p.row_type.as_str().to_string()];
        row.extend(
            p.values
                .iter()
                .map(|v| v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())),
        );
        table.push_row(row);
    }
    table
}

fn schedule_table(entries: &[ScheduleEntry]) -> MarkdownTable {
    let mut table = MarkdownTable::new(&["Batch", "Semester", "Date"]);
    for e in entries {
        table.push_row(vec![e.batch.clone(), e.semester.clone(), e.date.clone()]);
    }
    table
}

fn guest_lecture_table(model: &DashboardModel) -> MarkdownTable {
    let mut table = MarkdownTable::new(&[
        "No", "Date", "Time", "Venue", "Person", "Topic", "Subject", "Batch",
    ]);
    for g in &model.highlights.guest_lectures {
        table.push_row(vec![
            g.no.to_string(),
            g.date.clone(),
            g.time.clone(),
            g.venue.clone(),
            g.person.clone(),
            g.topic.clone(),
            g.subject.clone(),
            g.batch.clone(),
        ]);
    }
    table
}

fn event_table(model: &DashboardModel) -> MarkdownTable {
    let mut table = MarkdownTable::new(&["Event", "Date"]);
    for e in &model.highlights.events {
        table.push_row(vec![e.name.clone(), e.date.clone()]);
    }
    table
}

fn internship_table(model: &DashboardModel, summary: &DashboardSummary) -> MarkdownTable {
    let mut table = MarkdownTable::new(&["Category", "Students", "Share"]);
    let Some(i) = &model.internship else {
        return table;
    };

    let pct = |v: u32| format!("{}%", v);
    table.push_row(vec!["Total".to_string(), i.total.to_string(), String::new()]);
    table.push_row(vec![
        "Audit".to_string(),
        i.audit.total.to_string(),
        pct(summary.audit_split.first),
    ]);
    table.push_row(vec!["Big 3".to_string(), i.audit.big3.to_string(), String::new()]);
    table.push_row(vec!["Other audit".to_string(), i.audit.other.to_string(), String::new()]);
    table.push_row(vec![
        "Non audit".to_string(),
        i.non_audit.to_string(),
        pct(summary.audit_split.second),
    ]);
    table.push_row(vec![
        "CA registered".to_string(),
        i.ca_registered.to_string(),
        pct(summary.ca_split.first),
    ]);
    table.push_row(vec![
        "CA not registered".to_string(),
        i.ca_not_registered.to_string(),
        pct(summary.ca_split.second),
    ]);
    table
}

fn counselling_table(model: &DashboardModel) -> MarkdownTable {
    let mut table = MarkdownTable::new(&["Month", "Sessions"]);
    for c in &model.counselling {
        table.push_row(vec![c.month.clone(), c.count.to_string()]);
    }
    table
}

/// 表示幅で列を揃えるMarkdownテーブル
///
/// 全角文字（日本語など）は表示幅2として計算します。
#[derive(Debug, Clone, Default)]
pub(crate) struct MarkdownTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| escape_cell(h)).collect(),
            rows: Vec::new(),
        }
    }

    /// 行を追加する（列数はヘッダーに合わせて切り詰め・補完）
    pub fn push_row(&mut self, cells: Vec<String>) {
        let mut row: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// データ行がない
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render<W: Write>(&self, writer: &mut W) -> Result<(), DashboardError> {
        let widths = self.column_widths();

        write_row(writer, &self.headers, &widths)?;

        write!(writer, "|")?;
        for &width in &widths {
            // セルの前後のスペース（各1文字）+ セル幅分のハイフン
            write!(writer, "{}|", "-".repeat(width + 2))?;
        }
        writeln!(writer)?;

        for row in &self.rows {
            write_row(writer, row, &widths)?;
        }
        Ok(())
    }

    /// 列ごとの最大表示幅（最小3文字）
    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width().max(3)).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }
}

fn write_row<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> Result<(), DashboardError> {
    write!(writer, "|")?;
    for (cell, &width) in cells.iter().zip(widths) {
        let padding = width.saturating_sub(cell.width());
        write!(writer, " {}{} |", cell, " ".repeat(padding))?;
    }
    writeln!(writer)?;
    Ok(())
}

/// パイプと改行をエスケープし、前後の空白を除去する
fn escape_cell(content: &str) -> String {
    content
        .trim()
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}
