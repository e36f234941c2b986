//! xlsx2md - Spreadsheet workbook to Markdown converter
//!
//! ワークブックの各シートを、Markdownテーブルを含むセクションに変換します。
//! 空行・空列の除去、欠損値の扱い、パイプ文字のエスケープなど、
//! 同じ入力から常に同じテーブルが得られるように描画します。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use xlsx2md::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // デフォルト設定（全シート、output/ 配下に出力）
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // input/book.xlsx → output/book.md
//!     let written = converter.convert_file(Path::new("input/book.xlsx"), None)?;
//!     println!("{}", written.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Convert to String
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsx2md::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!     let input = File::open("book.xlsx")?;
//!
//!     let markdown = converter.convert_to_string("book.xlsx", input)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rendering a Grid Directly
//!
//! ```rust
//! use xlsx2md::{normalize, render, CellValue, Grid};
//!
//! let grid = Grid::from_rows(vec![
//!     vec!["Name".into(), "Price".into()],
//!     vec!["Apple".into(), 150i64.into()],
//!     vec![CellValue::Empty, CellValue::Empty],
//!     vec!["Banana".into(), 120i64.into()],
//! ]);
//!
//! let table = render(&normalize(grid)).unwrap();
//! assert_eq!(
//!     table,
//!     "| Name | Price |\n|------|-------|\n| Apple | 150 |\n| Banana | 120 |"
//! );
//! ```

mod api;
mod builder;
mod document;
mod error;
mod formatter;
mod grid;
mod input;
mod output;
mod parser;
mod types;

// 公開API
pub use api::SheetSelector;
pub use builder::{Converter, ConverterBuilder};
pub use document::{Document, RenderedSection, SectionBody, TIMESTAMP_FORMAT};
pub use error::{RenderError, Xlsx2MdError};
pub use grid::{normalize, NormalizedGrid};
pub use input::SUPPORTED_EXTENSIONS;
pub use output::{render, MarkdownRenderer, OutputLocator, EMPTY_SHEET_PLACEHOLDER};
pub use parser::{CalamineWorkbook, WorkbookAccessor};
pub use types::{CellValue, Grid, Number};
