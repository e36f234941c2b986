//! Integration Tests for xlsx2md
//!
//! rust_xlsxwriterで生成したワークブックを実際に変換し、
//! ドキュメント全体の構造と出力ファイルを検証します。

use rust_xlsxwriter::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use xlsx2md::{ConverterBuilder, SheetSelector, Xlsx2MdError, EMPTY_SHEET_PLACEHOLDER};

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// Name/Price の表（途中に空行を含む）
    pub fn generate_fruit() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Fruit")?;

        worksheet.write_string(0, 0, "Name")?;
        worksheet.write_string(0, 1, "Price")?;
        worksheet.write_string(1, 0, "Apple")?;
        worksheet.write_number(1, 1, 150.0)?;
        // row 2 is left blank
        worksheet.write_string(3, 0, "Banana")?;
        worksheet.write_number(3, 1, 120.0)?;

        Ok(workbook.save_to_buffer()?)
    }

    /// 3シートのワークブック
    pub fn generate_multi_sheets() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let sheet1 = workbook.add_worksheet();
        sheet1.set_name("Sheet1")?;
        sheet1.write_string(0, 0, "Sheet1_Data")?;

        let sheet2 = workbook.add_worksheet();
        sheet2.set_name("Sheet2")?;
        sheet2.write_string(0, 0, "Sheet2_Data")?;

        let sheet3 = workbook.add_worksheet();
        sheet3.set_name("Sheet3")?;
        sheet3.write_string(0, 0, "Sheet3_Data")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// データのあるシートと空のシート
    pub fn generate_with_empty_sheet() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();

        let data = workbook.add_worksheet();
        data.set_name("Data")?;
        data.write_string(0, 0, "Key")?;
        data.write_string(1, 0, "value")?;

        let empty = workbook.add_worksheet();
        empty.set_name("Blank")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// 数値・真偽値・特殊文字を含む表
    pub fn generate_mixed_values() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Mixed")?;

        worksheet.write_string(0, 0, "Label")?;
        worksheet.write_string(0, 1, "Value")?;

        worksheet.write_string(1, 0, "float")?;
        worksheet.write_number(1, 1, 3.5)?;

        worksheet.write_string(2, 0, "flag")?;
        worksheet.write_boolean(2, 1, true)?;

        worksheet.write_string(3, 0, "a|b")?;
        worksheet.write_string(3, 1, "line1\nline2")?;

        Ok(workbook.save_to_buffer()?)
    }

    /// 空列を挟んだ表
    pub fn generate_blank_column() -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        worksheet.write_string(0, 0, "Left")?;
        worksheet.write_string(0, 2, "Right")?;
        worksheet.write_string(1, 0, "l")?;
        worksheet.write_string(1, 2, "r")?;

        Ok(workbook.save_to_buffer()?)
    }
}

/// ファイルに書き出したワークブックのパスを返す
fn write_fixture(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, data).unwrap();
    path
}

#[test]
fn test_fruit_table_conversion() {
    let excel_data = fixtures::generate_fruit().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let markdown = converter
        .convert_to_string("fruit.xlsx", Cursor::new(excel_data))
        .unwrap();

    assert!(markdown.starts_with("# fruit\n\n*Excel ファイル: fruit.xlsx*\n*変換日時: "));
    assert!(markdown.ends_with(
        "\n\n## Fruit\n\n| Name | Price |\n|------|-------|\n| Apple | 150 |\n| Banana | 120 |\n"
    ));
}

#[test]
fn test_convert_writes_to_writer() {
    let excel_data = fixtures::generate_fruit().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let mut output = Vec::new();
    converter
        .convert("fruit.xlsx", Cursor::new(excel_data), &mut output)
        .unwrap();

    let markdown = String::from_utf8(output).unwrap();
    assert!(markdown.contains("## Fruit"));
    assert!(markdown.contains("| Banana | 120 |"));
}

#[test]
fn test_multiple_sheets_in_declaration_order() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let markdown = converter
        .convert_to_string("multi.xlsx", Cursor::new(excel_data))
        .unwrap();

    let first = markdown.find("## Sheet1").unwrap();
    let second = markdown.find("## Sheet2").unwrap();
    let third = markdown.find("## Sheet3").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_parallel_matches_sequential_output() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();
    let sequential = ConverterBuilder::new().build().unwrap();
    let parallel = ConverterBuilder::new().with_parallel(true).build().unwrap();

    let a = sequential
        .convert_to_string("multi.xlsx", Cursor::new(excel_data.clone()))
        .unwrap();
    let b = parallel
        .convert_to_string("multi.xlsx", Cursor::new(excel_data))
        .unwrap();

    // 変換日時の行を除いて比較
    let strip = |s: &str| -> String {
        s.lines()
            .filter(|line| !line.starts_with("*変換日時"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip(&a), strip(&b));
}

#[test]
fn test_sheet_selection_by_name() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();
    let converter = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Name("Sheet2".to_string()))
        .build()
        .unwrap();

    let markdown = converter
        .convert_to_string("multi.xlsx", Cursor::new(excel_data))
        .unwrap();

    assert!(markdown.contains("## Sheet2"));
    assert!(!markdown.contains("## Sheet1"));
    assert!(!markdown.contains("## Sheet3"));
}

#[test]
fn test_sheet_selection_by_index() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();
    let converter = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Index(2))
        .build()
        .unwrap();

    let markdown = converter
        .convert_to_string("multi.xlsx", Cursor::new(excel_data))
        .unwrap();

    assert!(markdown.contains("## Sheet3"));
    assert!(!markdown.contains("## Sheet1"));
}

#[test]
fn test_nonexistent_sheet() {
    let excel_data = fixtures::generate_multi_sheets().unwrap();
    let converter = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Name("Bogus".to_string()))
        .build()
        .unwrap();

    let result = converter.convert_to_string("multi.xlsx", Cursor::new(excel_data));
    match result {
        Err(Xlsx2MdError::SheetNotFound { name, available }) => {
            assert_eq!(name, "Bogus");
            assert_eq!(available, vec!["Sheet1", "Sheet2", "Sheet3"]);
        }
        e => panic!("Expected SheetNotFound error, got: {:?}", e),
    }
}

#[test]
fn test_empty_sheet_placeholder() {
    let excel_data = fixtures::generate_with_empty_sheet().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let markdown = converter
        .convert_to_string("book.xlsx", Cursor::new(excel_data))
        .unwrap();

    assert!(markdown.contains("## Data\n\n| Key |\n|-----|\n| value |\n"));
    assert!(markdown.ends_with(&format!("## Blank\n\n{}\n", EMPTY_SHEET_PLACEHOLDER)));
}

#[test]
fn test_mixed_values_rendering() {
    let excel_data = fixtures::generate_mixed_values().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let markdown = converter
        .convert_to_string("mixed.xlsx", Cursor::new(excel_data))
        .unwrap();

    assert!(markdown.contains("| float | 3.5 |"));
    assert!(markdown.contains("| flag | true |"));
    assert!(markdown.contains("| a\\|b | line1<br>line2 |"));
}

#[test]
fn test_blank_column_removed() {
    let excel_data = fixtures::generate_blank_column().unwrap();
    let converter = ConverterBuilder::new().build().unwrap();

    let markdown = converter
        .convert_to_string("cols.xlsx", Cursor::new(excel_data))
        .unwrap();

    assert!(markdown.contains("| Left | Right |\n|------|-------|\n| l | r |"));
}

#[test]
fn test_invalid_file_format() {
    let converter = ConverterBuilder::new().build().unwrap();
    let result = converter.convert_to_string("bad.xlsx", Cursor::new(b"not a zip".to_vec()));

    assert!(matches!(result, Err(Xlsx2MdError::Discovery(_))));
}

#[test]
fn test_convert_file_default_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "fruit.xlsx", &fixtures::generate_fruit().unwrap());
    let output_dir = dir.path().join("out");

    let converter = ConverterBuilder::new()
        .with_output_dir(&output_dir)
        .build()
        .unwrap();
    let written = converter.convert_file(&input, None).unwrap();

    assert_eq!(written, output_dir.join("fruit.md"));
    let content = fs::read_to_string(&written).unwrap();
    assert!(content.starts_with(&format!(
        "# fruit\n\n*Excel ファイル: {}*\n",
        input.display()
    )));
    assert!(content.contains("| Apple | 150 |"));
}

#[test]
fn test_convert_file_relative_and_absolute_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "fruit.xlsx", &fixtures::generate_fruit().unwrap());
    let output_dir = dir.path().join("out");

    let converter = ConverterBuilder::new()
        .with_output_dir(&output_dir)
        .build()
        .unwrap();

    // 相対パスは出力ディレクトリ配下
    let written = converter
        .convert_file(&input, Some(Path::new("nested/result.md")))
        .unwrap();
    assert_eq!(written, output_dir.join("nested/result.md"));
    assert!(written.is_file());

    // 絶対パスはそのまま
    let absolute = dir.path().join("elsewhere.md");
    let written = converter.convert_file(&input, Some(absolute.as_path())).unwrap();
    assert_eq!(written, absolute);
    assert!(absolute.is_file());
}

#[test]
fn test_convert_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let converter = ConverterBuilder::new()
        .with_output_dir(dir.path().join("out"))
        .build()
        .unwrap();

    let result = converter.convert_file(&dir.path().join("missing.xlsx"), None);
    assert!(matches!(result, Err(Xlsx2MdError::InputNotFound { .. })));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_convert_file_sheet_not_found_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "multi.xlsx",
        &fixtures::generate_multi_sheets().unwrap(),
    );
    let output_dir = dir.path().join("out");

    let converter = ConverterBuilder::new()
        .with_sheet_selector(SheetSelector::Name("Bogus".to_string()))
        .with_output_dir(&output_dir)
        .build()
        .unwrap();

    let result = converter.convert_file(&input, None);
    assert!(matches!(result, Err(Xlsx2MdError::SheetNotFound { .. })));
    assert!(!output_dir.join("multi.md").exists());
}

#[test]
fn test_list_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "multi.xlsx",
        &fixtures::generate_multi_sheets().unwrap(),
    );

    let converter = ConverterBuilder::new().build().unwrap();
    let names = converter.list_sheets(&input).unwrap();
    assert_eq!(names, vec!["Sheet1", "Sheet2", "Sheet3"]);
}
