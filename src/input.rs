//! Input Validation Module
//!
//! 解析を始める前に入力ファイルを検証するモジュール。
//! 存在確認、拡張子の確認、ファイルサイズの上限チェックを行います。

use std::path::Path;

use crate::error::Xlsx2MdError;

/// 受け付ける拡張子（小文字）
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// 入力ファイルの最大サイズ（バイト）
/// デフォルト: 2GB (2_147_483_648 bytes)
pub(crate) const DEFAULT_MAX_INPUT_SIZE: u64 = 2_147_483_648;

/// 入力ファイルを検証
///
/// # 戻り値
///
/// * `Ok(())` - 変換可能なファイルの場合
/// * `Err(Xlsx2MdError::InputNotFound)` - ファイルが存在しない場合
/// * `Err(Xlsx2MdError::UnsupportedFormat)` - 拡張子がサポート対象外の場合
/// * `Err(Xlsx2MdError::SecurityViolation)` - ファイルサイズが上限を超える場合
pub(crate) fn validate_input(path: &Path, max_input_size: u64) -> Result<(), Xlsx2MdError> {
    if !path.is_file() {
        return Err(Xlsx2MdError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    if !has_supported_extension(path) {
        return Err(Xlsx2MdError::UnsupportedFormat {
            path: path.to_path_buf(),
            supported: SUPPORTED_EXTENSIONS.to_vec(),
        });
    }

    let size = path.metadata()?.len();
    if size > max_input_size {
        return Err(Xlsx2MdError::SecurityViolation(format!(
            "Input file size exceeds maximum: {} bytes (max: {} bytes)",
            size, max_input_size
        )));
    }

    Ok(())
}

/// 拡張子がサポート対象かどうか（大文字小文字を区別しない）
fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
