//! Markdown Table Renderer
//!
//! 正規化済みグリッドをGitHub形式のパイプテーブルとして描画します。

use unicode_width::UnicodeWidthStr;

use crate::error::RenderError;
use crate::formatter::CellFormatter;
use crate::grid::NormalizedGrid;

/// データのないシートに出力する定型文
pub const EMPTY_SHEET_PLACEHOLDER: &str = "*このシートにはデータがありません。*";

/// 区切り行の各列の最小ハイフン数
const MIN_SEPARATOR_WIDTH: usize = 3;

/// Markdownテーブルのレンダラー
///
/// 状態を持たないため、同じグリッドに対して常に同じ文字列を返します。
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    formatter: CellFormatter,
}

impl MarkdownRenderer {
    /// 新しいレンダラーを生成
    pub fn new() -> Self {
        Self {
            formatter: CellFormatter::new(),
        }
    }

    /// 正規化済みグリッドを描画
    ///
    /// 先頭行をヘッダーとして、ヘッダー行・区切り行・データ行の順に出力します。
    /// 区切り行の各列は、ヘッダーの表示幅（全角文字は2）+ 2 個のハイフン
    /// （最小3個）で構成されます。データ行はパディングしません。
    ///
    /// `NormalizedGrid::Empty`の場合は[`EMPTY_SHEET_PLACEHOLDER`]を返します。
    /// 出力の末尾に改行は付きません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 描画結果
    /// * `Err(RenderError)` - 描画できないセル値が含まれていた場合
    pub fn render(&self, grid: &NormalizedGrid) -> Result<String, RenderError> {
        let grid = match grid {
            NormalizedGrid::Empty => return Ok(EMPTY_SHEET_PLACEHOLDER.to_string()),
            NormalizedGrid::Table(grid) => grid,
        };

        // 1. 全セルのフォーマット
        let mut formatted_rows = Vec::with_capacity(grid.row_count());
        for (row_idx, row) in grid.rows().iter().enumerate() {
            let cells = row
                .iter()
                .enumerate()
                .map(|(col_idx, value)| self.formatter.format_cell(value, row_idx, col_idx))
                .collect::<Result<Vec<_>, _>>()?;
            formatted_rows.push(cells);
        }

        // 2. 各行の出力（最初の行の後に区切り行を挿入）
        let mut lines = Vec::with_capacity(formatted_rows.len() + 1);
        for (row_idx, cells) in formatted_rows.iter().enumerate() {
            lines.push(Self::format_row(cells));
            if row_idx == 0 {
                lines.push(Self::generate_separator(cells));
            }
        }

        Ok(lines.join("\n"))
    }

    /// 1行分のセルを`| a | b |`形式に連結
    fn format_row(cells: &[String]) -> String {
        let mut line = String::from("|");
        for cell in cells {
            line.push(' ');
            line.push_str(cell);
            line.push_str(" |");
        }
        line
    }

    /// ヘッダー区切り行を生成
    fn generate_separator(header: &[String]) -> String {
        let mut line = String::from("|");
        for cell in header {
            let width = (cell.width() + 2).max(MIN_SEPARATOR_WIDTH);
            line.push_str(&"-".repeat(width));
            line.push('|');
        }
        line
    }
}

/// 既定のレンダラーで正規化済みグリッドを描画
///
/// # 使用例
///
/// ```rust
/// use xlsx2md::{normalize, render, Grid};
///
/// let grid = Grid::from_rows(vec![
///     vec!["Name".into(), "Price".into()],
///     vec!["Apple".into(), 150i64.into()],
/// ]);
///
/// let table = render(&normalize(grid)).unwrap();
/// assert_eq!(table, "| Name | Price |\n|------|-------|\n| Apple | 150 |");
/// ```
pub fn render(grid: &NormalizedGrid) -> Result<String, RenderError> {
    MarkdownRenderer::new().render(grid)
}
