//! Builder Module
//!
//! Fluent Builder APIを提供し、`DashboardLoader`インスタンスを段階的に構築する。

use std::fmt::Write;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::api::{DateFormat, SheetNames};
use crate::error::DashboardError;
use crate::model::DashboardModel;
use crate::parser::{RawWorkbook, SheetLocator, WorkbookParser};
use crate::sections;
use crate::security::{check_input_size, inspect_archive, SecurityConfig};

/// 読み込み処理の設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct LoadConfig {
    /// 日付形式
    pub date_format: DateFormat,

    /// 論理シート名
    pub sheet_names: SheetNames,

    /// セキュリティ制限
    pub security: SecurityConfig,
}

/// 読み込み処理の段階
///
/// 進捗コールバックには各段階の開始時に1回ずつ通知されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    /// 入力の読み込み
    ReadingFile,
    /// ワークブックのデコード
    Parsing,
    /// モデルの構築
    Building,
    /// 完了
    Done,
}

impl LoadStage {
    /// 段階の目安となる進捗率（%）
    pub fn percent(&self) -> u8 {
        match self {
            LoadStage::ReadingFile => 20,
            LoadStage::Parsing => 50,
            LoadStage::Building => 80,
            LoadStage::Done => 100,
        }
    }

    /// 表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            LoadStage::ReadingFile => "Reading file",
            LoadStage::Parsing => "Parsing workbook",
            LoadStage::Building => "Building dashboard",
            LoadStage::Done => "Done",
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use deptdash::{DateFormat, LoaderBuilder};
///
/// # fn main() -> Result<(), deptdash::DashboardError> {
/// let loader = LoaderBuilder::new()
///     .with_date_format(DateFormat::Iso8601)
///     .with_max_input_size(50 * 1024 * 1024)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct LoaderBuilder {
    /// 内部設定（構築中）
    config: LoadConfig,
}

impl LoaderBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 日付形式: `DD Mon YYYY`
    /// - シート名: `SheetNames::default()`
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self::default()
    }

    /// 日付の出力形式を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use deptdash::{DateFormat, LoaderBuilder};
    ///
    /// let builder = LoaderBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string()));
    /// ```
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// 各データドメインのシート名を指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use deptdash::{LoaderBuilder, SheetNames};
    ///
    /// let names = SheetNames {
    ///     exam_status: "Exams".to_string(),
    ///     ..SheetNames::default()
    /// };
    /// let builder = LoaderBuilder::new().with_sheet_names(names);
    /// ```
    pub fn with_sheet_names(mut self, names: SheetNames) -> Self {
        self.config.sheet_names = names;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`DashboardLoader`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `DashboardError::Config(String)`: 設定の検証に失敗した場合
    ///   * カスタム日付形式が不正な書式文字列、または空文字列を生成する
    ///   * シート名・キーワードが空
    ///   * 入力サイズ上限が0
    pub fn build(self) -> Result<DashboardLoader, DashboardError> {
        // 1. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            validate_date_pattern(format_str)?;
        }

        // 2. シート名の検証
        for (field, value) in self.config.sheet_names.entries() {
            if value.trim().is_empty() {
                return Err(DashboardError::Config(format!(
                    "Sheet name '{}' must not be empty",
                    field
                )));
            }
        }

        // 3. セキュリティ設定の検証
        if self.config.security.max_input_file_size == 0 {
            return Err(DashboardError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(DashboardLoader::new(self.config))
    }
}

/// chrono書式文字列を検証する
fn validate_date_pattern(format_str: &str) -> Result<(), DashboardError> {
    if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
        return Err(DashboardError::Config(format!(
            "Invalid date format string: '{}'",
            format_str
        )));
    }

    // テスト用の日付でフォーマット試行
    let test_date = NaiveDate::from_ymd_opt(2025, 1, 1)
        .ok_or_else(|| DashboardError::Config("Failed to create test date".to_string()))?;
    // 解析できても描画できない指定子（%H, %Zなど）はfmt::Errorになる
    let mut rendered = String::new();
    if write!(rendered, "{}", test_date.format(format_str)).is_err() || rendered.is_empty() {
        return Err(DashboardError::Config(format!(
            "Invalid date format string: '{}'",
            format_str
        )));
    }
    Ok(())
}

/// 読み込み処理のファサード
///
/// ワークブックを読み込み、正規化済みの`DashboardModel`を生成するメインエントリーポイントです。
/// 読み込みごとに新しいモデルを返し、内部状態は持ちません。
///
/// # 使用例
///
/// ```rust,no_run
/// use deptdash::LoaderBuilder;
///
/// # fn main() -> Result<(), deptdash::DashboardError> {
/// let loader = LoaderBuilder::new().build()?;
/// let model = loader.load_path("department.xlsx")?;
/// println!("{} exam cycles", model.exams.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DashboardLoader {
    config: LoadConfig,
}

impl DashboardLoader {
    pub(crate) fn new(config: LoadConfig) -> Self {
        Self { config }
    }

    /// 設定済みの日付形式
    pub fn date_format(&self) -> &DateFormat {
        &self.config.date_format
    }

    /// 入力ストリームからモデルを読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(DashboardModel)` - 読み込みに成功した場合
    /// * `Err(DashboardError)` - 入力の読み込み失敗、ワークブックとして解釈できない、
    ///   またはセキュリティ制限に違反した場合
    ///
    /// シートの欠落や不正な行はエラーにならず、該当ドメインが空になります。
    pub fn load<R: Read>(&self, input: R) -> Result<DashboardModel, DashboardError> {
        self.load_with_progress(input, |_| {})
    }

    /// バイト列からモデルを読み込む
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<DashboardModel, DashboardError> {
        self.load(bytes)
    }

    /// ファイルパスからモデルを読み込む
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<DashboardModel, DashboardError> {
        let file = File::open(path.as_ref())?;
        self.load(BufReader::new(file))
    }

    /// 進捗コールバック付きでモデルを読み込む
    ///
    /// # 処理フロー
    ///
    /// 1. `ReadingFile`: 入力をメモリに読み込み、サイズとZIPコンテナを検査
    /// 2. `Parsing`: calamineでワークブックをデコード
    /// 3. `Building`: 各セクションパーサーでモデルを構築
    /// 4. `Done`
    ///
    /// エラーが発生した場合、以降の段階は通知されません。
    pub fn load_with_progress<R, F>(
        &self,
        input: R,
        mut on_stage: F,
    ) -> Result<DashboardModel, DashboardError>
    where
        R: Read,
        F: FnMut(LoadStage),
    {
        let mut report = |stage: LoadStage| {
            log::debug!("{} ({}%)", stage.label(), stage.percent());
            on_stage(stage);
        };

        // 1. 入力データをメモリに読み込む（上限+1バイトまで）
        report(LoadStage::ReadingFile);
        let security = &self.config.security;
        let mut buffer = Vec::new();
        input
            .take(security.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;
        check_input_size(buffer.len(), security)?;
        inspect_archive(&buffer, security)?;

        // 2. デコード
        report(LoadStage::Parsing);
        let workbook = WorkbookParser::decode(buffer)?;

        // 3. モデル構築
        report(LoadStage::Building);
        let model = self.parse_workbook(&workbook);

        report(LoadStage::Done);
        Ok(model)
    }

    /// デコード済みワークブックからモデルを構築する
    ///
    /// 入出力を伴わない純粋な変換です。同じワークブックからは常に同じモデルが得られます。
    pub fn parse_workbook(&self, workbook: &RawWorkbook) -> DashboardModel {
        let names = &self.config.sheet_names;
        let format = &self.config.date_format;
        let locator = SheetLocator::new(workbook);
        let exact = |name: &str| locator.exact(name).unwrap_or(&[]);

        DashboardModel {
            lectures: sections::parse_lecture_breakdown(exact(&names.lecture_breakdown)),
            exams: sections::parse_exam_status(exact(&names.exam_status)),
            enrollment: sections::parse_enrollments(exact(&names.enrollments)),
            commencements: sections::parse_schedule(exact(&names.lecture_commencements), format),
            endings: sections::parse_schedule(exact(&names.lecture_endings), format),
            highlights: sections::parse_highlights(
                locator
                    .exact_or_find(&names.highlights, &names.highlights_keyword)
                    .unwrap_or(&[]),
                format,
            ),
            internship: sections::parse_internship(
                locator
                    .exact_or_find(&names.internship, &names.internship_keyword)
                    .unwrap_or(&[]),
            ),
            counselling: sections::parse_counselling(
                locator.find(&names.counselling_keyword).unwrap_or(&[]),
            ),
            batch_transfers: sections::parse_sum_metric(exact(&names.batch_transfers)),
            dropouts: sections::parse_sum_metric(exact(&names.dropouts)),
        }
    }
}
