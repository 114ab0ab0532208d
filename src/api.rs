//! Public API Types
//!
//! 公開APIで使用する設定型を定義するモジュール。

/// 日付の出力形式
///
/// 日付セルを表示用文字列に変換する際の形式を指定します。
/// スケジュールの日付や、ゲスト講義・イベントの日付列に適用されます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// ダッシュボード表示形式（DD Mon YYYY、デフォルト）
    ///
    /// 例: `05 Mar 2025`
    #[default]
    Display,

    /// ISO 8601形式（YYYY-MM-DD）
    ///
    /// 例: `2025-03-05`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use deptdash::{DateFormat, LoaderBuilder};
    ///
    /// # fn main() -> Result<(), deptdash::DashboardError> {
    /// let loader = LoaderBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%d/%m/%Y".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}

impl DateFormat {
    /// chrono互換のフォーマット文字列を取得
    pub fn pattern(&self) -> &str {
        match self {
            DateFormat::Display => "%d %b %Y",
            DateFormat::Iso8601 => "%Y-%m-%d",
            DateFormat::Custom(pattern) => pattern,
        }
    }
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// JSON形式（モデルとKPIサマリーを1つのオブジェクトとして出力）
    Json,

    /// Markdown形式（KPIブロックとドメインごとのテーブル）
    Markdown,
}

/// 論理シート名の設定
///
/// 各データドメインを読み込むシートの名前を指定します。
/// `exact`系は完全一致、`*_keyword`系は大文字小文字・空白を無視した部分一致で検索されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNames {
    pub lecture_breakdown: String,
    pub exam_status: String,
    pub enrollments: String,
    pub batch_transfers: String,
    pub dropouts: String,
    pub lecture_commencements: String,
    pub lecture_endings: String,

    /// ハイライトシートの完全一致名（見つからない場合は`highlights_keyword`で部分一致）
    pub highlights: String,
    pub highlights_keyword: String,

    /// インターンシップシートの完全一致名（見つからない場合は`internship_keyword`で部分一致）
    pub internship: String,
    pub internship_keyword: String,

    /// カウンセリングシートは部分一致のみで検索する
    pub counselling_keyword: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            lecture_breakdown: "Lecture_Breakdown".to_string(),
            exam_status: "Exam_Status".to_string(),
            enrollments: "Enrollments".to_string(),
            batch_transfers: "Batch_Transfers".to_string(),
            dropouts: "Dropouts".to_string(),
            lecture_commencements: "Lecture_Commencements".to_string(),
            lecture_endings: "Lecture_Endings".to_string(),
            highlights: "Highlights".to_string(),
            highlights_keyword: "Highlight".to_string(),
            internship: "Internship".to_string(),
            internship_keyword: "Internship".to_string(),
            counselling_keyword: "Counselling".to_string(),
        }
    }
}

impl SheetNames {
    /// すべての名前とキーワードを列挙する（設定検証用）
    pub(crate) fn entries(&self) -> [(&'static str, &str); 12] {
        [
            ("lecture_breakdown", &self.lecture_breakdown),
            ("exam_status", &self.exam_status),
            ("enrollments", &self.enrollments),
            ("batch_transfers", &self.batch_transfers),
            ("dropouts", &self.dropouts),
            ("lecture_commencements", &self.lecture_commencements),
            ("lecture_endings", &self.lecture_endings),
            ("highlights", &self.highlights),
            ("highlights_keyword", &self.highlights_keyword),
            ("internship", &self.internship),
            ("internship_keyword", &self.internship_keyword),
            ("counselling_keyword", &self.counselling_keyword),
        ]
    }
}
