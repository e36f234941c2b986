//! Formatter Module
//!
//! セル値をMarkdownテーブルのセル文字列に変換するモジュール。
//! 出力は入力値だけで決まり、ロケールや実行環境には依存しません。

use calamine::ExcelDateTime;

use crate::error::RenderError;
use crate::types::{CellValue, Number};

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Default)]
pub(crate) struct CellFormatter {
    /// 数値フォーマッター
    number_formatter: NumberFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self {
            number_formatter: NumberFormatter,
        }
    }

    /// セル値をフォーマット
    ///
    /// # 引数
    ///
    /// * `value` - セル値
    /// * `row` - 正規化済みグリッド内の行番号（エラー報告用）
    /// * `col` - 正規化済みグリッド内の列番号（エラー報告用）
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - フォーマット済み文字列
    /// * `Err(RenderError)` - 数値が有限でない場合
    pub fn format_cell(
        &self,
        value: &CellValue,
        row: usize,
        col: usize,
    ) -> Result<String, RenderError> {
        let formatted = match value {
            CellValue::Text(s) => self.escape_markdown(s),

            CellValue::Number(n) => self
                .number_formatter
                .format(*n)
                .ok_or_else(|| RenderError::NonFiniteNumber {
                    row,
                    col,
                    value: match n {
                        Number::Int(i) => *i as f64,
                        Number::Float(f) => *f,
                    },
                })?,

            CellValue::Bool(b) => b.to_string(),

            CellValue::Empty => String::new(),
        };

        Ok(formatted)
    }

    /// Markdown特殊文字をエスケープ
    ///
    /// バックスラッシュとパイプをエスケープし、改行を`<br>`に置換します。
    /// バックスラッシュを先にエスケープするため、`\|`のような入力も
    /// 列区切りとして解釈されることはありません。
    fn escape_markdown(&self, s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('|', "\\|")
            .replace("\r\n", "<br>")
            .replace(['\n', '\r'], "<br>")
    }
}

/// 数値フォーマッター
///
/// 桁区切りなしの10進表記に変換します。
/// 整数値は小数点なし、小数は元の精度のまま出力します。
#[derive(Debug, Default)]
pub(crate) struct NumberFormatter;

impl NumberFormatter {
    /// 数値をフォーマット
    ///
    /// NaNや無限大の場合は`None`を返します。
    pub fn format(&self, value: Number) -> Option<String> {
        match value {
            Number::Int(i) => Some(i.to_string()),
            Number::Float(f) if !f.is_finite() => None,
            // -0.0 は "0" として出力
            Number::Float(f) if f == 0.0 => Some("0".to_string()),
            Number::Float(f) => Some(f.to_string()),
        }
    }
}

/// 日付フォーマッター
///
/// calamineの日付セルをテキストに変換します。
/// エポック（1900年/1904年）の扱いはcalamineに委ねます。
#[derive(Debug, Default)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// 日付・時刻・経過時間をフォーマット
    ///
    /// - 時刻成分のない日付: `YYYY-MM-DD`
    /// - 時刻成分を持つ日時: `YYYY-MM-DD HH:MM:SS`
    /// - 経過時間: `HH:MM:SS`（24時間を超える場合も時間で表記）
    ///
    /// 変換できない値はシリアル値をそのまま数値表記で返します。
    pub fn format(&self, value: &ExcelDateTime) -> String {
        if value.is_duration() {
            if let Some(duration) = value.as_duration() {
                let total = duration.num_seconds();
                let sign = if total < 0 { "-" } else { "" };
                let total = total.abs();
                return format!(
                    "{}{:02}:{:02}:{:02}",
                    sign,
                    total / 3600,
                    (total % 3600) / 60,
                    total % 60
                );
            }
        } else if let Some(datetime) = value.as_datetime() {
            let pattern = if datetime.time() == chrono::NaiveTime::MIN {
                "%Y-%m-%d"
            } else {
                "%Y-%m-%d %H:%M:%S"
            };
            return datetime.format(pattern).to_string();
        }

        NumberFormatter
            .format(Number::Float(value.as_f64()))
            .unwrap_or_default()
    }
}
