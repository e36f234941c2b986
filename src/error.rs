//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// xlsx2mdクレート全体で使用するエラー型
///
/// 入力ファイルの検証、シートの列挙・読み込み、Markdownの生成、
/// ファイル書き出しの各段階で発生するエラーを統一的に扱います。
///
/// # エラーの分類
///
/// - 致命的エラー: `InputNotFound`, `UnsupportedFormat`, `Discovery`,
///   `SheetNotFound`, `Write` など。変換処理全体を中断します。
/// - シート単位のエラー: `SheetRead`, `SheetRender`。
///   該当シートのセクションがエラー表示に置き換えられ、処理は続行されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2md::Xlsx2MdError;
/// use std::fs::File;
///
/// fn open_input(path: &str) -> Result<File, Xlsx2MdError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum Xlsx2MdError {
    /// 入力ファイルが存在しない
    #[error("Input file not found: {}", .path.display())]
    InputNotFound {
        /// 指定された入力パス
        path: PathBuf,
    },

    /// サポートされていない拡張子
    #[error(
        "Unsupported file format: {} (supported: {})",
        .path.display(),
        .supported.join(", ")
    )]
    UnsupportedFormat {
        /// 指定された入力パス
        path: PathBuf,
        /// 受け付ける拡張子の一覧
        supported: Vec<&'static str>,
    },

    /// シート名を列挙できなかった
    ///
    /// ワークブックのオープンに失敗した場合と、シートが1枚もない場合の両方で発生します。
    #[error("Failed to discover sheets: {0}")]
    Discovery(String),

    /// 指定されたシートが存在しない
    ///
    /// 利用可能なシート名の一覧を診断情報として保持します。
    ///
    /// # 例
    ///
    /// ```rust
    /// use xlsx2md::Xlsx2MdError;
    ///
    /// let error = Xlsx2MdError::SheetNotFound {
    ///     name: "Bogus".to_string(),
    ///     available: vec!["Fruit".to_string(), "Sales".to_string()],
    /// };
    /// assert_eq!(
    ///     error.to_string(),
    ///     "Sheet 'Bogus' not found (available: Fruit, Sales)"
    /// );
    /// ```
    #[error("Sheet '{name}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        /// 要求されたシート名
        name: String,
        /// ワークブック内のシート名（宣言順）
        available: Vec<String>,
    },

    /// シートの読み込みに失敗した（シート単位、非致命的）
    #[error("Failed to read sheet '{sheet}': {message}")]
    SheetRead {
        /// 対象のシート名
        sheet: String,
        /// 詳細メッセージ
        message: String,
    },

    /// シートのMarkdown生成に失敗した（シート単位、非致命的）
    #[error("Failed to render sheet '{sheet}': {message}")]
    SheetRender {
        /// 対象のシート名
        sheet: String,
        /// 詳細メッセージ
        message: String,
    },

    /// 出力ファイルの書き出しに失敗した
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// 出力先パス
        path: PathBuf,
        /// 元のI/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// calamineがワークブックの解析中に返したエラー
    #[error("Failed to parse workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に無効な設定が検出された場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust
    /// use xlsx2md::{ConverterBuilder, SheetSelector, Xlsx2MdError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name(String::new()))
    ///     .build();
    ///
    /// assert!(matches!(result, Err(Xlsx2MdError::Config(_))));
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー（入力ファイルサイズの上限など）
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

/// テーブル描画中に発生したエラー
///
/// シート単位のエラー（`Xlsx2MdError::SheetRender`）に変換されて報告されます。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// 数値セルがNaNまたは無限大
    #[error("non-finite number {value} at row {row}, column {col}")]
    NonFiniteNumber {
        /// 正規化済みグリッド内の行番号（0始まり）
        row: usize,
        /// 正規化済みグリッド内の列番号（0始まり）
        col: usize,
        /// 元の値
        value: f64,
    },
}

impl Xlsx2MdError {
    /// 変換処理全体を中断すべきエラーかどうか
    ///
    /// `SheetRead`と`SheetRender`だけが非致命的で、
    /// ドキュメント内のエラー表示セクションに変換されます。
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Xlsx2MdError::SheetRead { .. } | Xlsx2MdError::SheetRender { .. }
        )
    }
}
