//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// deptdashクレート全体で使用するエラー型
///
/// このエラー型は、ワークブックの読み込み・デコード時に発生する致命的なエラーのみを表します。
/// シートの欠落や不正なセルなどのデータ品質の問題は、各セクションパーサーが
/// 空の結果に縮退させるため、エラーとしては報告されません。
///
/// # エラーの種類
///
/// - `Io`: 入力の読み込み中に発生したエラー
/// - `Parse`: ワークブックのデコードに失敗したエラー（calamine由来）
/// - `Zip`: OOXMLコンテナの検査に失敗したエラー
/// - `Config`: ビルダー設定の検証に失敗したエラー
/// - `SecurityViolation`: 入力サイズやアーカイブ制限に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use deptdash::DashboardError;
/// use std::fs::File;
///
/// fn open_report(path: &str) -> Result<(), DashboardError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum DashboardError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックのデコード中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが原因となります。
    /// このエラーが返された場合、モデルは一切生成されません。
    #[error("Failed to decode workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// ZIPアーカイブの検査エラー
    #[error("ZIP archive error: {0}")]
    Zip(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `LoaderBuilder::build()`時に設定を検証し、無効な設定が検出された場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use deptdash::{DashboardError, DateFormat, LoaderBuilder};
    ///
    /// let result = LoaderBuilder::new()
    ///     .with_date_format(DateFormat::Custom(String::new()))
    ///     .build();
    ///
    /// if let Err(DashboardError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力サイズの上限、ZIP bomb、パストラバーサルなどの制限に違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
