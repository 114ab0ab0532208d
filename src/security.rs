//! Security Module
//!
//! セキュリティ対策を実装するモジュール。
//! 入力サイズの上限と、OOXMLコンテナ（ZIP）に対するZIP bomb・パストラバーサル対策を提供します。

use std::io::Cursor;

use zip::ZipArchive;

use crate::error::DashboardError;

/// ZIPローカルファイルヘッダーのシグネチャ
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// セキュリティ設定
///
/// ファイル処理時のセキュリティ制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// 展開後の最大サイズ（バイト）
    /// デフォルト: 1GB (1_073_741_824 bytes)
    pub max_decompressed_size: u64,
    /// ZIPアーカイブ内の最大ファイル数
    /// デフォルト: 10000
    pub max_file_count: usize,
    /// 単一ファイルの最大サイズ（バイト）
    /// デフォルト: 100MB (104_857_600 bytes)
    pub max_file_size: u64,
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_decompressed_size: 1_073_741_824, // 1GB
            max_file_count: 10_000,
            max_file_size: 104_857_600,         // 100MB
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

/// 入力バッファのサイズを検証する
pub(crate) fn check_input_size(len: usize, config: &SecurityConfig) -> Result<(), DashboardError> {
    if len as u64 > config.max_input_file_size {
        return Err(DashboardError::SecurityViolation(format!(
            "Input file size exceeds maximum: {} bytes (max: {} bytes)",
            len, config.max_input_file_size
        )));
    }
    Ok(())
}

/// OOXML/ODSなどZIPベースの入力を、デコード前に検査する
///
/// ZIPシグネチャで始まらない入力（XLSなどのCFB形式）は検査対象外です。
pub(crate) fn inspect_archive(buffer: &[u8], config: &SecurityConfig) -> Result<(), DashboardError> {
    if !buffer.starts_with(ZIP_MAGIC) {
        return Ok(());
    }

    let mut archive =
        ZipArchive::new(Cursor::new(buffer)).map_err(|e| DashboardError::Zip(format!("{}", e)))?;

    // セキュリティチェック: ファイル数の上限
    if archive.len() > config.max_file_count {
        return Err(DashboardError::SecurityViolation(format!(
            "ZIP archive contains too many files: {} (max: {})",
            archive.len(),
            config.max_file_count
        )));
    }

    let mut total_decompressed_size = 0u64;
    for i in 0..archive.len() {
        let file = archive
            .by_index(i)
            .map_err(|e| DashboardError::Zip(format!("{}", e)))?;

        let file_name = file.name();
        validate_zip_path(file_name).map_err(|e| {
            DashboardError::SecurityViolation(format!("Invalid ZIP path: {}", e))
        })?;

        let file_size = file.size();
        if file_size > config.max_file_size {
            return Err(DashboardError::SecurityViolation(format!(
                "File '{}' exceeds maximum size: {} bytes (max: {} bytes)",
                file_name, file_size, config.max_file_size
            )));
        }

        total_decompressed_size = total_decompressed_size
            .checked_add(file_size)
            .ok_or_else(|| {
                DashboardError::SecurityViolation(
                    "Total decompressed size calculation overflow".to_string(),
                )
            })?;

        if total_decompressed_size > config.max_decompressed_size {
            return Err(DashboardError::SecurityViolation(format!(
                "Total decompressed size exceeds maximum: {} bytes (max: {} bytes)",
                total_decompressed_size, config.max_decompressed_size
            )));
        }
    }

    Ok(())
}

/// ファイルパスの検証
///
/// パストラバーサル攻撃を防ぐため、ZIPエントリのパスを検証します。
///
/// # 戻り値
///
/// * `Ok(())` - パスが安全な場合
/// * `Err(String)` - パスが危険な場合（`..`や絶対パスを含む）
pub(crate) fn validate_zip_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Empty path is not allowed".to_string());
    }

    // 絶対パスを拒否（Windows形式の`C:\`やUnix形式の`/`で始まるパス）
    if path.starts_with('/') || path.starts_with("C:\\") || path.starts_with("c:\\") {
        return Err(format!("Absolute path is not allowed: {}", path));
    }

    if path.contains("..") {
        return Err(format!("Path traversal detected: {}", path));
    }

    if path.contains('\\') {
        return Err(format!("Backslash in path is not allowed: {}", path));
    }

    Ok(())
}
