//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。
//! `Converter`はシートの列挙・選択、シートごとの読み込み・正規化・描画、
//! ドキュメントの組み立てと書き出しを担当します。

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use rayon::prelude::*;

use crate::api::SheetSelector;
use crate::document::{Document, RenderedSection, SectionBody};
use crate::error::Xlsx2MdError;
use crate::grid::normalize;
use crate::input::{validate_input, DEFAULT_MAX_INPUT_SIZE};
use crate::output::{write_document, MarkdownRenderer, OutputLocator};
use crate::parser::{CalamineWorkbook, WorkbookAccessor};
use crate::types::Grid;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// シートの正規化・描画を並列に行うか
    pub parallel: bool,

    /// 出力先の解決規則
    pub output: OutputLocator,

    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_size: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::All,
            parallel: false,
            output: OutputLocator::default(),
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2md::{ConverterBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsx2md::Xlsx2MdError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Sales".to_string()))
///     .with_output_dir("docs")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: すべてのシート
    /// - 並列処理: 無効
    /// - 出力ディレクトリ: `output`
    /// - 入力ファイルの最大サイズ: 2GB
    pub fn new() -> Self {
        Self::default()
    }

    /// 変換対象のシートを選択する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsx2md::{ConverterBuilder, SheetSelector};
    ///
    /// // 単一シートを名前で指定
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name("Sheet1".to_string()));
    ///
    /// // 単一シートをインデックスで指定
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Index(0));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// シートの正規化・描画をrayonのスレッドプールで並列に行うかを指定する
    ///
    /// シートの読み込み自体は常に1つのハンドルで順番に行われ、
    /// 出力されるセクションの順序も並列処理の有無に関係なく同じです。
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// 出力ディレクトリを指定する
    ///
    /// 出力パスを省略した場合や相対パスを指定した場合は、このディレクトリの下に出力します。
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output = OutputLocator::new(dir);
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.max_input_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `Xlsx2MdError::Config(String)`: 設定の検証に失敗した場合
    ///   * 空のシート名、または空のシート名リストを指定した
    ///   * 入力ファイルの最大サイズに0を指定した
    pub fn build(self) -> Result<Converter, Xlsx2MdError> {
        // 1. シート選択の検証
        match &self.config.sheet_selector {
            SheetSelector::Name(name) if name.is_empty() => {
                return Err(Xlsx2MdError::Config(
                    "Sheet name must not be empty".to_string(),
                ));
            }
            SheetSelector::Names(names) if names.is_empty() => {
                return Err(Xlsx2MdError::Config(
                    "Sheet name list must not be empty".to_string(),
                ));
            }
            SheetSelector::Names(names) if names.iter().any(String::is_empty) => {
                return Err(Xlsx2MdError::Config(
                    "Sheet name must not be empty".to_string(),
                ));
            }
            _ => {}
        }

        // 2. 入力サイズ上限の検証
        if self.config.max_input_size == 0 {
            return Err(Xlsx2MdError::Config(
                "Maximum input size must be greater than 0".to_string(),
            ));
        }

        // 3. Converterインスタンス生成
        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// ワークブックをMarkdownドキュメントに変換するためのメインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::path::Path;
/// use xlsx2md::ConverterBuilder;
///
/// # fn main() -> Result<(), xlsx2md::Xlsx2MdError> {
/// let converter = ConverterBuilder::new().build()?;
/// let written = converter.convert_file(Path::new("input/book.xlsx"), None)?;
/// println!("{}", written.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// テーブルレンダラー
    renderer: MarkdownRenderer,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            renderer: MarkdownRenderer::new(),
            config,
        }
    }

    /// 出力先の解決規則
    pub fn output_locator(&self) -> &OutputLocator {
        &self.config.output
    }

    /// ワークブックからドキュメントを組み立てる
    ///
    /// 変換日時には現在のローカル時刻を使用します。
    ///
    /// # 処理フロー
    ///
    /// 1. シート名の列挙（空の場合は`Discovery`エラー）
    /// 2. シート選択（見つからない場合は`SheetNotFound`エラー）
    /// 3. 各シートについて読み込み → 正規化 → 描画
    ///    （失敗したシートはエラー表示のセクションになり、処理は続行）
    /// 4. セクションを処理順に連結
    pub fn assemble<A: WorkbookAccessor>(
        &self,
        source: &str,
        accessor: &mut A,
    ) -> Result<Document, Xlsx2MdError> {
        self.assemble_at(source, accessor, Local::now().naive_local())
    }

    /// 変換日時を指定してドキュメントを組み立てる
    pub fn assemble_at<A: WorkbookAccessor>(
        &self,
        source: &str,
        accessor: &mut A,
        generated_at: NaiveDateTime,
    ) -> Result<Document, Xlsx2MdError> {
        // 1. シート名の列挙
        let available = discover_sheets(accessor)?;

        // 2. シート選択
        let selected = self
            .config
            .sheet_selector
            .select(&available)
            .map_err(|name| Xlsx2MdError::SheetNotFound {
                name,
                available: available.clone(),
            })?;

        // 3. 各シートの処理
        let sections: Vec<RenderedSection> = if self.config.parallel {
            // 読み込みは1つのハンドルで順番に行い、正規化・描画だけを並列化
            let grids: Vec<(String, Result<Grid, Xlsx2MdError>)> = selected
                .into_iter()
                .map(|sheet| {
                    info!("converting sheet '{}'", sheet);
                    let grid = accessor.read_sheet(&sheet);
                    (sheet, grid)
                })
                .collect();

            // インデックス付きイテレータのcollectは元の順序を保つ
            grids
                .into_par_iter()
                .map(|(sheet, grid)| self.render_section(sheet, grid))
                .collect()
        } else {
            selected
                .into_iter()
                .map(|sheet| {
                    info!("converting sheet '{}'", sheet);
                    let grid = accessor.read_sheet(&sheet);
                    self.render_section(sheet, grid)
                })
                .collect()
        };

        // 4. ドキュメントの組み立て
        let mut document = Document::new(source, generated_at);
        for section in sections {
            document.push_section(section);
        }

        Ok(document)
    }

    /// 1シート分のセクションを生成
    ///
    /// 読み込み・描画のエラーはエラー表示のセクションに変換します。
    fn render_section(
        &self,
        sheet: String,
        grid: Result<Grid, Xlsx2MdError>,
    ) -> RenderedSection {
        let body = grid
            .map_err(|e| into_sheet_read_error(&sheet, e))
            .and_then(|grid| {
                let normalized = normalize(grid);
                if normalized.is_empty() {
                    return Ok(SectionBody::Empty);
                }
                self.renderer
                    .render(&normalized)
                    .map(SectionBody::Table)
                    .map_err(|e| Xlsx2MdError::SheetRender {
                        sheet: sheet.clone(),
                        message: e.to_string(),
                    })
            });

        match body {
            Ok(body) => RenderedSection::new(sheet, body),
            Err(e) => {
                warn!("{}", e);
                RenderedSection::new(sheet, SectionBody::Error(e.to_string()))
            }
        }
    }

    /// リーダーから読み込んだワークブックを変換し、ライターに書き出す
    ///
    /// # 引数
    ///
    /// * `source` - ドキュメントに記録する変換元の識別子（タイトルにも使用）
    /// * `input` - ワークブックのバイト列を読み込むリーダー
    /// * `output` - Markdown出力先のライター
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::io::Cursor;
    /// use xlsx2md::ConverterBuilder;
    ///
    /// # fn main() -> Result<(), xlsx2md::Xlsx2MdError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let excel_data: Vec<u8> = vec![]; // ワークブックのバイト列
    /// let mut markdown_output = Vec::new();
    /// converter.convert("book.xlsx", Cursor::new(excel_data), &mut markdown_output)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read, W: Write>(
        &self,
        source: &str,
        input: R,
        output: W,
    ) -> Result<(), Xlsx2MdError> {
        let mut workbook = CalamineWorkbook::open(input, self.config.max_input_size)?;
        let document = self.assemble(source, &mut workbook)?;

        let mut writer = BufWriter::new(output);
        writer.write_all(document.to_markdown().as_bytes())?;
        writer.flush()?;

        Ok(())
    }

    /// リーダーから読み込んだワークブックをMarkdown文字列に変換
    pub fn convert_to_string<R: Read>(
        &self,
        source: &str,
        input: R,
    ) -> Result<String, Xlsx2MdError> {
        let mut workbook = CalamineWorkbook::open(input, self.config.max_input_size)?;
        Ok(self.assemble(source, &mut workbook)?.to_markdown())
    }

    /// ワークブックファイルを変換し、出力ディレクトリ配下に書き出す
    ///
    /// # 引数
    ///
    /// * `input` - 入力ファイルのパス
    /// * `output` - 出力パス（省略時は`<入力ファイル名>.md`）。
    ///   相対パスは出力ディレクトリ配下、絶対パスはそのまま使用します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(PathBuf)` - 書き出したファイルのパス
    /// * `Err(Xlsx2MdError)` - 致命的なエラーが発生した場合（ファイルは書き出されません）
    pub fn convert_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf, Xlsx2MdError> {
        validate_input(input, self.config.max_input_size)?;

        let file = File::open(input)?;
        let mut workbook =
            CalamineWorkbook::open(BufReader::new(file), self.config.max_input_size)?;
        let document = self.assemble(&input.to_string_lossy(), &mut workbook)?;

        let failed = document.failed_sections().count();
        if failed > 0 {
            warn!(
                "{} of {} sheets could not be converted",
                failed,
                document.sections().len()
            );
        }

        let path = self.config.output.resolve(input, output);
        write_document(&self.config.output, &path, &document.to_markdown())?;
        info!("wrote {}", path.display());

        Ok(path)
    }

    /// ワークブックファイルのシート名を宣言順に取得
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<String>)` - シート名の一覧（1つ以上）
    /// * `Err(Xlsx2MdError)` - 入力ファイルが不正、またはシートを列挙できない場合
    pub fn list_sheets(&self, input: &Path) -> Result<Vec<String>, Xlsx2MdError> {
        validate_input(input, self.config.max_input_size)?;

        let file = File::open(input)?;
        let mut workbook =
            CalamineWorkbook::open(BufReader::new(file), self.config.max_input_size)?;
        discover_sheets(&mut workbook)
    }
}

/// シート名を列挙し、1つもない場合は`Discovery`エラーにする
fn discover_sheets<A: WorkbookAccessor>(accessor: &mut A) -> Result<Vec<String>, Xlsx2MdError> {
    let names = accessor.sheet_names().map_err(|e| match e {
        Xlsx2MdError::Discovery(_) => e,
        other => Xlsx2MdError::Discovery(other.to_string()),
    })?;

    if names.is_empty() {
        return Err(Xlsx2MdError::Discovery(
            "workbook contains no sheets".to_string(),
        ));
    }

    Ok(names)
}

/// アクセサーのエラーをシート単位の読み込みエラーに揃える
fn into_sheet_read_error(sheet: &str, error: Xlsx2MdError) -> Xlsx2MdError {
    match error {
        Xlsx2MdError::SheetRead { .. } | Xlsx2MdError::SheetRender { .. } => error,
        other => Xlsx2MdError::SheetRead {
            sheet: sheet.to_string(),
            message: other.to_string(),
        },
    }
}
