//! Grid Module
//!
//! 読み込んだグリッドから、Markdown出力に適した正規化済みグリッドを生成するモジュール。
//! 空行・空列の除去と、欠損値の空文字列への置換を行います。

use log::debug;

use crate::types::{CellValue, Grid};

/// 正規化済みグリッド
///
/// `Table`に含まれるグリッドは少なくとも1行1列を持ち、
/// `CellValue::Empty`を含みません（空セルは空文字列のテキストに置換済み）。
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedGrid {
    /// データのないシート（テーブルとして出力しない）
    Empty,

    /// 出力対象のテーブル（先頭行がヘッダー）
    Table(Grid),
}

impl NormalizedGrid {
    /// データがないかどうか
    pub fn is_empty(&self) -> bool {
        matches!(self, NormalizedGrid::Empty)
    }

    /// 行数（`Empty`の場合は0）
    pub fn row_count(&self) -> usize {
        match self {
            NormalizedGrid::Empty => 0,
            NormalizedGrid::Table(grid) => grid.row_count(),
        }
    }

    /// 列数（`Empty`の場合は0）
    pub fn column_count(&self) -> usize {
        match self {
            NormalizedGrid::Empty => 0,
            NormalizedGrid::Table(grid) => grid.column_count(),
        }
    }
}

/// グリッドを正規化する
///
/// 1. すべてのセルが空（`Empty`または空白のみのテキスト）の行を、位置に関係なく除去
/// 2. 行除去後のグリッドに対して、同じ規則で空列を除去
/// 3. 残った`Empty`セルを空文字列のテキストに置換
///
/// 残った行と列の相対順序は維持されます。
/// 行または列が1つも残らない場合は`NormalizedGrid::Empty`を返します（エラーにはしません）。
///
/// # 使用例
///
/// ```rust
/// use xlsx2md::{normalize, CellValue, Grid};
///
/// let grid = Grid::from_rows(vec![
///     vec!["Name".into(), "Price".into()],
///     vec!["Apple".into(), "150".into()],
///     vec!["".into(), "  ".into()],
///     vec!["Banana".into(), "120".into()],
/// ]);
///
/// let normalized = normalize(grid);
/// assert_eq!(normalized.row_count(), 3);
/// assert_eq!(normalized.column_count(), 2);
/// ```
pub fn normalize(grid: Grid) -> NormalizedGrid {
    let (original_rows, original_cols) = (grid.row_count(), grid.column_count());

    // 1. 空行の除去
    let rows: Vec<Vec<CellValue>> = grid
        .into_rows()
        .into_iter()
        .filter(|row| !row.iter().all(CellValue::is_blank))
        .collect();

    // 2. 空列の判定（行除去後のグリッドに対して）
    let keep_cols: Vec<usize> = (0..original_cols)
        .filter(|&col| rows.iter().any(|row| !row[col].is_blank()))
        .collect();

    if rows.is_empty() || keep_cols.is_empty() {
        debug!(
            "normalized {}x{} grid to empty sheet",
            original_rows, original_cols
        );
        return NormalizedGrid::Empty;
    }

    // 3. 列の抽出と欠損値の置換
    let rows: Vec<Vec<CellValue>> = rows
        .into_iter()
        .map(|mut row| {
            keep_cols
                .iter()
                .map(|&col| match std::mem::replace(&mut row[col], CellValue::Empty) {
                    CellValue::Empty => CellValue::Text(String::new()),
                    value => value,
                })
                .collect()
        })
        .collect();

    let grid = Grid::from_rows(rows);
    debug!(
        "normalized {}x{} grid to {}x{} (dropped {} rows, {} columns)",
        original_rows,
        original_cols,
        grid.row_count(),
        grid.column_count(),
        original_rows - grid.row_count(),
        original_cols - grid.column_count()
    );

    NormalizedGrid::Table(grid)
}
