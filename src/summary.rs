//! Summary Module
//!
//! 正規化済みモデルから、ダッシュボードのKPIを導出するモジュール。
//! モデルと同様に読み込みごとに生成し直される値で、追加の入力は必要ありません。

use serde::Serialize;

use crate::model::{DashboardModel, EnrollmentTable, InternshipSummary, RowType};

/// 学位ごとの講義数合計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeTotal {
    pub degree: String,
    pub count: u64,
}

/// プログラムごとの入学者数の予算・実績
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgrammeProgress {
    pub name: String,
    pub budget: f64,
    pub actual: f64,
    /// 実績が予算以上
    pub met: bool,
}

/// 2値の構成比（整数%）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Split {
    pub first: u32,
    pub second: u32,
}

impl Split {
    /// 2値の合計に対する割合を四捨五入で求める（合計0なら両方0）
    pub fn of(first: f64, second: f64) -> Self {
        let total = first + second;
        if total <= 0.0 || !total.is_finite() {
            return Self::default();
        }
        let pct = |v: f64| (v / total * 100.0).round().max(0.0) as u32;
        Self {
            first: pct(first),
            second: pct(second),
        }
    }
}

/// ダッシュボードKPI
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_lectures: u64,
    /// 初出順
    pub lectures_by_degree: Vec<DegreeTotal>,

    pub enrollment_budget: f64,
    pub enrollment_actual: f64,
    pub programme_progress: Vec<ProgrammeProgress>,

    pub total_papers: u64,
    pub total_released: u64,
    /// 試験サイクル名（重複なし、初出順）
    pub exam_cycles: Vec<String>,

    pub total_counselling: u64,
    /// 月平均のカウンセリング件数（記録がない場合は`None`）
    pub avg_counselling: Option<u64>,

    pub batch_transfers: f64,
    pub dropouts: f64,

    /// 監査 / 非監査
    pub audit_split: Split,
    /// CA登録済み / 未登録
    pub ca_split: Split,
}

impl DashboardSummary {
    /// モデルからKPIを計算する
    pub fn from_model(model: &DashboardModel) -> Self {
        let total_counselling = sum_counts(model.counselling.iter().map(|c| c.count));
        let (audit_split, ca_split) = model
            .internship
            .as_ref()
            .map(internship_splits)
            .unwrap_or_default();

        Self {
            total_lectures: sum_counts(model.lectures.iter().map(|l| l.count)),
            lectures_by_degree: lectures_by_degree(model),
            enrollment_budget: total_row_value(&model.enrollment, RowType::Budget),
            enrollment_actual: total_row_value(&model.enrollment, RowType::Actual),
            programme_progress: programme_progress(&model.enrollment),
            total_papers: sum_counts(model.exams.iter().map(|e| e.papers)),
            total_released: sum_counts(model.exams.iter().map(|e| e.released)),
            exam_cycles: distinct(model.exams.iter().map(|e| e.cycle.as_str())),
            total_counselling,
            avg_counselling: match model.counselling.len() {
                0 => None,
                n => Some((total_counselling as f64 / n as f64).round() as u64),
            },
            batch_transfers: model.batch_transfers,
            dropouts: model.dropouts,
            audit_split,
            ca_split,
        }
    }

    /// 入学者数の見出し値（実績、実績が0なら予算）
    pub fn enrollment_headline(&self) -> f64 {
        if self.enrollment_actual != 0.0 {
            self.enrollment_actual
        } else {
            self.enrollment_budget
        }
    }

    /// 試験結果の公開率（%、小数第1位）
    pub fn release_rate(&self) -> f64 {
        if self.total_papers == 0 {
            return 0.0;
        }
        (self.total_released as f64 / self.total_papers as f64 * 1000.0).round() / 10.0
    }
}

/// 件数の合計（各件数は`u32`で飽和しているため`u64`で集計する）
fn sum_counts(counts: impl Iterator<Item = u32>) -> u64 {
    counts.map(u64::from).sum()
}

fn lectures_by_degree(model: &DashboardModel) -> Vec<DegreeTotal> {
    let mut totals: Vec<DegreeTotal> = Vec::new();
    for lecture in &model.lectures {
        match totals.iter_mut().find(|t| t.degree == lecture.degree) {
            Some(t) => t.count += u64::from(lecture.count),
            None => totals.push(DegreeTotal {
                degree: lecture.degree.clone(),
                count: u64::from(lecture.count),
            }),
        }
    }
    totals
}

/// 合計行（複数ある場合は最後の行）の最終列の値
fn total_row_value(table: &EnrollmentTable, row_type: RowType) -> f64 {
    table
        .programmes
        .iter()
        .rev()
        .find(|p| p.is_total && p.row_type == row_type)
        .map(|p| p.last_value())
        .unwrap_or(0.0)
}

/// 合計行以外の各プログラムについて、予算行と対応する実績行の最終列を並べる
fn programme_progress(table: &EnrollmentTable) -> Vec<ProgrammeProgress> {
    table
        .programmes
        .iter()
        .filter(|p| !p.is_total && p.row_type == RowType::Budget)
        .map(|budget_row| {
            let budget = budget_row.last_value();
            let actual = table
                .find(&budget_row.name, RowType::Actual)
                .map(|p| p.last_value())
                .unwrap_or(0.0);
            ProgrammeProgress {
                name: budget_row.name.clone(),
                budget,
                actual,
                met: actual >= budget,
            }
        })
        .collect()
}

fn internship_splits(internship: &InternshipSummary) -> (Split, Split) {
    (
        Split::of(internship.audit.total, internship.non_audit),
        Split::of(internship.ca_registered, internship.ca_not_registered),
    )
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}
