//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

/// 数値セルの値
///
/// 整数セルは`i64`のまま保持し、`f64`への変換で桁が落ちないようにします。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// 整数
    Int(i64),

    /// 浮動小数点数
    Float(f64),
}

/// セルの値を表す列挙型
///
/// ワークブックから読み込んだセルは、この4種類のいずれかに分類されます。
/// 日付やエラー値などの値はアクセサーがテキストとして渡します。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 文字列（パイプや改行を含めてそのまま保持）
    Text(String),

    /// 数値
    Number(Number),

    /// 論理値
    Bool(bool),

    /// 空セル
    Empty,
}

impl CellValue {
    /// テキストセルを生成
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// 整数セルを生成
    pub fn int(n: i64) -> Self {
        CellValue::Number(Number::Int(n))
    }

    /// 浮動小数点数セルを生成
    pub fn float(n: f64) -> Self {
        CellValue::Number(Number::Float(n))
    }

    /// 情報を持たないセルかどうかを判定
    ///
    /// `Empty`と、空白文字だけからなるテキストが該当します。
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::int(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// 矩形のセルグリッド
///
/// すべての行が`column_count`個のセルを持つことを構築時に保証します。
/// 長さの揃っていない行は`CellValue::Empty`で末尾を埋めます。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
    column_count: usize,
}

impl Grid {
    /// 行のリストからグリッドを構築
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsx2md::{CellValue, Grid};
    ///
    /// let grid = Grid::from_rows(vec![
    ///     vec![CellValue::from("Name"), CellValue::from("Price")],
    ///     vec![CellValue::from("Apple")],
    /// ]);
    /// assert_eq!(grid.column_count(), 2);
    /// assert_eq!(grid.rows()[1][1], CellValue::Empty);
    /// ```
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(column_count, CellValue::Empty);
        }
        Self { rows, column_count }
    }

    /// 行のリストを取得
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// 行データを取り出してグリッドを消費する
    pub(crate) fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }
}

impl FromIterator<Vec<CellValue>> for Grid {
    fn from_iter<I: IntoIterator<Item = Vec<CellValue>>>(iter: I) -> Self {
        Grid::from_rows(iter.into_iter().collect())
    }
}
