//! Parser Module
//!
//! calamineを使用したワークブック読み込みの実装。
//! シート名の列挙と、シートごとのセルグリッドの取得を提供します。

mod workbook;

pub use workbook::{CalamineWorkbook, WorkbookAccessor};
