//! Workbook Accessor
//!
//! ワークブックからシート名とセルグリッドを取り出すためのトレイトと、
//! calamineによる実装を提供します。

use std::io::{Cursor, Read};

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use log::debug;

use crate::error::Xlsx2MdError;
use crate::formatter::DateFormatter;
use crate::types::{CellValue, Grid};

/// ワークブックへのアクセスを抽象化するトレイト
///
/// 変換処理はこのトレイトだけを通してワークブックを読み込みます。
/// テストでは任意のグリッドを返す実装に差し替えられます。
pub trait WorkbookAccessor {
    /// シート名を宣言順に取得
    fn sheet_names(&mut self) -> Result<Vec<String>, Xlsx2MdError>;

    /// 指定されたシートのセルグリッドを取得
    fn read_sheet(&mut self, name: &str) -> Result<Grid, Xlsx2MdError>;
}

/// calamineによるワークブックアクセサー
///
/// 入力全体をメモリに読み込んでから開くため、
/// xlsx / xlsm / xls / xlsb / ods のいずれも内容から形式を判定して扱えます。
pub struct CalamineWorkbook {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl CalamineWorkbook {
    /// リーダーからワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックのバイト列を読み込むリーダー
    /// * `max_input_size` - 入力サイズの上限（バイト）
    ///
    /// # 戻り値
    ///
    /// * `Ok(CalamineWorkbook)` - オープンに成功した場合
    /// * `Err(Xlsx2MdError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(Xlsx2MdError::Discovery)` - ワークブックとして解析できなかった場合
    pub fn open<R: Read>(mut reader: R, max_input_size: u64) -> Result<Self, Xlsx2MdError> {
        // 上限+1バイトまで読めば超過を判定できる
        let mut buffer = Vec::new();
        let bytes_read = reader
            .by_ref()
            .take(max_input_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > max_input_size {
            return Err(Xlsx2MdError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                max_input_size
            )));
        }

        Self::from_bytes(buffer)
    }

    /// メモリ上のバイト列からワークブックを開く
    pub fn from_bytes(buffer: Vec<u8>) -> Result<Self, Xlsx2MdError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))
            .map_err(|e| Xlsx2MdError::Discovery(e.to_string()))?;

        Ok(Self { workbook })
    }

    /// calamineの範囲をグリッドに変換
    fn range_to_grid(range: &Range<Data>) -> Grid {
        let date_formatter = DateFormatter;
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| Self::convert_cell(cell, &date_formatter))
                    .collect()
            })
            .collect()
    }

    /// calamineのセル値を変換
    ///
    /// 日付・エラー値はテキストとして扱います。
    fn convert_cell(cell: &Data, date_formatter: &DateFormatter) -> CellValue {
        match cell {
            Data::Int(i) => CellValue::int(*i),
            Data::Float(f) => CellValue::float(*f),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Text(date_formatter.format(dt)),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
            Data::Empty => CellValue::Empty,
        }
    }
}

impl WorkbookAccessor for CalamineWorkbook {
    fn sheet_names(&mut self) -> Result<Vec<String>, Xlsx2MdError> {
        Ok(self.workbook.sheet_names())
    }

    fn read_sheet(&mut self, name: &str) -> Result<Grid, Xlsx2MdError> {
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| Xlsx2MdError::SheetRead {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        let grid = Self::range_to_grid(&range);
        debug!(
            "read sheet '{}': {} rows x {} columns",
            name,
            grid.row_count(),
            grid.column_count()
        );

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_convert_cell() {
        let formatter = DateFormatter;
        assert_eq!(
            CalamineWorkbook::convert_cell(&Data::Int(7), &formatter),
            CellValue::int(7)
        );
        assert_eq!(
            CalamineWorkbook::convert_cell(&Data::Float(1.25), &formatter),
            CellValue::float(1.25)
        );
        assert_eq!(
            CalamineWorkbook::convert_cell(&Data::String("a|b".to_string()), &formatter),
            CellValue::text("a|b")
        );
        assert_eq!(
            CalamineWorkbook::convert_cell(&Data::Bool(true), &formatter),
            CellValue::Bool(true)
        );
        assert_eq!(
            CalamineWorkbook::convert_cell(&Data::Error(CellErrorType::Div0), &formatter),
            CellValue::text("#DIV/0!")
        );
        assert_eq!(
            CalamineWorkbook::convert_cell(&Data::Empty, &formatter),
            CellValue::Empty
        );
    }

    #[test]
    fn test_range_to_grid() {
        let mut range = Range::new((0, 0), (1, 2));
        range.set_value((0, 0), Data::String("A1".to_string()));
        range.set_value((1, 2), Data::Float(3.0));

        let grid = CalamineWorkbook::range_to_grid(&range);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.rows()[0][0], CellValue::text("A1"));
        assert_eq!(grid.rows()[0][1], CellValue::Empty);
        assert_eq!(grid.rows()[1][2], CellValue::float(3.0));
    }

    #[test]
    fn test_open_invalid_bytes_is_discovery_error() {
        let result = CalamineWorkbook::from_bytes(b"not a workbook".to_vec());
        assert!(matches!(result, Err(Xlsx2MdError::Discovery(_))));
    }

    #[test]
    fn test_open_respects_size_limit() {
        let data = vec![0u8; 64];
        let result = CalamineWorkbook::open(Cursor::new(data), 16);
        assert!(matches!(result, Err(Xlsx2MdError::SecurityViolation(_))));
    }
}
