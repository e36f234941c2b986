//! Document Writer
//!
//! 出力先パスの決定と、Markdownドキュメントのファイル書き出しを行います。

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::Xlsx2MdError;

/// 既定の出力ディレクトリ
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "output";

/// 出力先パスの解決規則
///
/// - 出力パス指定なし: `<出力ディレクトリ>/<入力ファイル名の拡張子を.mdにしたもの>`
/// - 相対パス指定: `<出力ディレクトリ>/<指定パス>`
/// - 絶対パス指定: 指定パスをそのまま使用
///
/// # 使用例
///
/// ```rust
/// use std::path::{Path, PathBuf};
/// use xlsx2md::OutputLocator;
///
/// let locator = OutputLocator::new("output");
/// assert_eq!(
///     locator.resolve(Path::new("input/book.xlsx"), None),
///     PathBuf::from("output/book.md")
/// );
/// assert_eq!(
///     locator.resolve(Path::new("book.xlsx"), Some(Path::new("docs/a.md"))),
///     PathBuf::from("output/docs/a.md")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocator {
    output_dir: PathBuf,
}

impl Default for OutputLocator {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl OutputLocator {
    /// 出力ディレクトリを指定して生成
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 出力ディレクトリ
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 出力先パスを決定
    pub fn resolve(&self, input: &Path, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.output_dir.join(path),
            None => {
                let file_name = input
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("output"));
                self.output_dir.join(file_name.with_extension("md"))
            }
        }
    }
}

/// ドキュメントをファイルに書き出す
///
/// 出力ディレクトリ（および出力先の親ディレクトリ）が存在しない場合は作成します。
/// 失敗した場合はすべて`Xlsx2MdError::Write`として報告します。
pub(crate) fn write_document(
    locator: &OutputLocator,
    path: &Path,
    content: &str,
) -> Result<(), Xlsx2MdError> {
    let write_error = |source| Xlsx2MdError::Write {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(locator.output_dir()).map_err(write_error)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    fs::write(path, content).map_err(write_error)?;
    debug!("wrote {} bytes to {}", content.len(), path.display());

    Ok(())
}
