//! Output Module
//!
//! 正規化済みグリッドのMarkdownテーブル描画と、
//! 生成したドキュメントのファイル出力を提供するモジュール。

mod markdown;
mod writer;

pub use markdown::{render, MarkdownRenderer, EMPTY_SHEET_PLACEHOLDER};
pub use writer::OutputLocator;
pub(crate) use writer::write_document;
