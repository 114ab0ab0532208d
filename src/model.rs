//! Canonical Model Module
//!
//! セクションパーサーが生成し、表示層が消費する正規化済みデータモデル。
//! すべてのレコードはワークブックの読み込みごとに新しく生成される不変の値です。
//!
//! フィールド名は表示層との契約に合わせてcamelCaseでシリアライズされます。

use std::collections::HashMap;

use serde::Serialize;

/// 学位・形態ごとの講義数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LectureRecord {
    pub degree: String,
    pub mode: String,
    pub count: u32,
}

/// 試験サイクルごとの結果公開状況
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamCycleRecord {
    pub cycle: String,
    pub papers: u32,
    pub released: u32,
    /// 公開率（小数第1位に丸め済み）
    pub percentage: f64,
}

/// 試験サイクルの進捗区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExamProgress {
    /// 100%以上
    Complete,
    /// 50%以上
    InProgress,
    /// 50%未満
    Behind,
}

impl ExamCycleRecord {
    /// 公開率から進捗区分を判定
    pub fn status(&self) -> ExamProgress {
        if self.percentage >= 100.0 {
            ExamProgress::Complete
        } else if self.percentage >= 50.0 {
            ExamProgress::InProgress
        } else {
            ExamProgress::Behind
        }
    }
}

/// 入学者数テーブルの行種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RowType {
    Budget,
    Actual,
}

impl RowType {
    /// 行種別セルのラベルを解釈する（大文字小文字を区別する完全一致）
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Budget" => Some(RowType::Budget),
            "Actual" => Some(RowType::Actual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RowType::Budget => "Budget",
            RowType::Actual => "Actual",
        }
    }
}

/// プログラムごとの予算・実績行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammeRow {
    pub name: String,
    #[serde(rename = "type")]
    pub row_type: RowType,
    /// `EnrollmentTable::headers`と同じ長さ
    pub values: Vec<Option<f64>>,
    pub is_total: bool,
}

impl ProgrammeRow {
    /// 最終列（累計列）の値。欠損時は0
    pub fn last_value(&self) -> f64 {
        self.values.last().copied().flatten().unwrap_or(0.0)
    }
}

/// 入学者数テーブル
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EnrollmentTable {
    pub headers: Vec<String>,
    pub programmes: Vec<ProgrammeRow>,
}

impl EnrollmentTable {
    /// 指定したプログラム名・行種別に一致する最初の行を返す
    pub fn find(&self, name: &str, row_type: RowType) -> Option<&ProgrammeRow> {
        self.programmes
            .iter()
            .find(|p| p.name == name && p.row_type == row_type)
    }

    /// 同じ(プログラム名, 行種別)が複数回現れる組を、初出順に返す
    ///
    /// 1プログラムにつき予算行・実績行は各1行が前提のため、
    /// ここで返される組は入力側の不整合を示します。
    pub fn duplicate_rows(&self) -> Vec<(String, RowType)> {
        let mut counts: HashMap<(&str, RowType), usize> = HashMap::new();
        let mut order = Vec::new();
        for p in &self.programmes {
            let key = (p.name.as_str(), p.row_type);
            let count = counts.entry(key).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push((p.name.clone(), p.row_type));
            }
        }
        order
    }
}

/// 講義開始・終了スケジュールの1行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub batch: String,
    pub semester: String,
    /// フォーマット済みの日付。解釈できない場合は空文字列
    pub date: String,
}

/// ゲスト講義
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestLecture {
    pub no: f64,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub person: String,
    pub qualifications: String,
    pub topic: String,
    pub subject: String,
    pub batch: String,
}

/// イベント
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub name: String,
    pub date: String,
}

/// ハイライトシートの内容
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightsData {
    pub guest_lectures: Vec<GuestLecture>,
    pub events: Vec<Event>,
}

/// 監査系インターンシップの内訳
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditBreakdown {
    pub total: f64,
    pub big3: f64,
    pub other: f64,
}

/// インターンシップの集計値
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipSummary {
    pub total: f64,
    pub audit: AuditBreakdown,
    pub non_audit: f64,
    pub audit_pct: f64,
    pub non_audit_pct: f64,
    pub ca_registered: f64,
    pub ca_not_registered: f64,
    pub ca_reg_pct: f64,
    pub ca_not_reg_pct: f64,
}

/// 月ごとのカウンセリング件数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounsellingRecord {
    pub month: String,
    pub count: u32,
}

/// 正規化済みモデル全体
///
/// 読み込みごとに新しく生成され、以前のモデルを完全に置き換えます。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardModel {
    pub lectures: Vec<LectureRecord>,
    pub exams: Vec<ExamCycleRecord>,
    pub enrollment: EnrollmentTable,
    pub commencements: Vec<ScheduleEntry>,
    pub endings: Vec<ScheduleEntry>,
    pub highlights: HighlightsData,
    /// インターンシップシートが存在しない（または2行未満の）場合は`None`
    pub internship: Option<InternshipSummary>,
    pub counselling: Vec<CounsellingRecord>,
    pub batch_transfers: f64,
    pub dropouts: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn programme(name: &str, row_type: RowType, values: Vec<Option<f64>>) -> ProgrammeRow {
        ProgrammeRow {
            name: name.to_string(),
            row_type,
            values,
            is_total: name.to_uppercase() == "TOTAL",
        }
    }

    #[test]
    fn test_exam_status() {
        let mut record = ExamCycleRecord {
            cycle: "Jan".to_string(),
            papers: 10,
            released: 10,
            percentage: 100.0,
        };
        assert_eq!(record.status(), ExamProgress::Complete);
        record.percentage = 50.0;
        assert_eq!(record.status(), ExamProgress::InProgress);
        record.percentage = 49.9;
        assert_eq!(record.status(), ExamProgress::Behind);
    }

    #[test]
    fn test_row_type_from_label_is_case_sensitive() {
        assert_eq!(RowType::from_label("Budget"), Some(RowType::Budget));
        assert_eq!(RowType::from_label("Actual"), Some(RowType::Actual));
        assert_eq!(RowType::from_label("budget"), None);
        assert_eq!(RowType::from_label("Target"), None);
    }

    #[test]
    fn test_last_value() {
        let row = programme("BBA", RowType::Budget, vec![Some(1.0), Some(5.0)]);
        assert_eq!(row.last_value(), 5.0);
        let row = programme("BBA", RowType::Budget, vec![Some(1.0), None]);
        assert_eq!(row.last_value(), 0.0);
        let row = programme("BBA", RowType::Budget, vec![]);
        assert_eq!(row.last_value(), 0.0);
    }

    #[test]
    fn test_find_and_duplicates() {
        let table = EnrollmentTable {
            headers: vec!["Q1 Budget".to_string()],
            programmes: vec![
                programme("BBA", RowType::Budget, vec![Some(10.0)]),
                programme("BBA", RowType::Actual, vec![Some(8.0)]),
                programme("BBA", RowType::Budget, vec![Some(12.0)]),
                programme("BSc", RowType::Budget, vec![Some(4.0)]),
            ],
        };

        assert_eq!(
            table.find("BBA", RowType::Budget).map(|p| p.values[0]),
            Some(Some(10.0))
        );
        assert!(table.find("MBA", RowType::Budget).is_none());
        assert_eq!(
            table.duplicate_rows(),
            vec![("BBA".to_string(), RowType::Budget)]
        );
    }

    #[test]
    fn test_serialization_contract() {
        let row = programme("Total", RowType::Actual, vec![Some(3.0), None]);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], "Actual");
        assert_eq!(json["isTotal"], true);
        assert!(json["values"][1].is_null());

        let model = DashboardModel::default();
        let json = serde_json::to_value(&model).unwrap();
        assert!(json.get("batchTransfers").is_some());
        assert!(json["highlights"].get("guestLectures").is_some());
        assert!(json["internship"].is_null());
    }
}
