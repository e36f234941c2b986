//! xlsx2md command-line tool
//!
//! ワークブックをMarkdown形式に変換します。
//! 出力ファイルは既定で `output/<入力ファイル名>.md` に保存されます。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use xlsx2md::{ConverterBuilder, SheetSelector, Xlsx2MdError};

#[derive(Parser)]
#[command(name = "xlsx2md", version, about = "Convert spreadsheet workbooks to Markdown")]
struct Cli {
    /// Workbook to convert (.xlsx, .xlsm, .xls, .xlsb, .ods)
    input: PathBuf,

    /// Output file (default: <output-dir>/<input name>.md). Relative paths are placed under the output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Convert only this sheet
    #[arg(short, long)]
    sheet: Option<String>,

    /// Print sheet names and exit
    #[arg(long)]
    list_sheets: bool,

    /// Directory for generated Markdown files
    #[arg(long, env = "XLSX2MD_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Render sheets on a thread pool
    #[arg(long)]
    parallel: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Xlsx2MdError> {
    // 空のシート名は指定なしとして扱う
    let selector = cli
        .sheet
        .filter(|name| !name.is_empty())
        .map(SheetSelector::Name)
        .unwrap_or(SheetSelector::All);

    let converter = ConverterBuilder::new()
        .with_sheet_selector(selector)
        .with_output_dir(cli.output_dir)
        .with_parallel(cli.parallel)
        .build()?;

    // シート一覧表示のみの場合
    if cli.list_sheets {
        for name in converter.list_sheets(&cli.input)? {
            println!("{}", name);
        }
        return Ok(());
    }

    let written = converter.convert_file(&cli.input, cli.output.as_deref())?;
    println!("変換完了: {}", written.display());

    Ok(())
}

fn handle_error(error: &Xlsx2MdError) {
    eprintln!("エラー: {}", error);

    match error {
        Xlsx2MdError::SheetNotFound { available, .. } => {
            eprintln!("利用可能なシート: {}", available.join(", "));
        }
        Xlsx2MdError::UnsupportedFormat { supported, .. } => {
            eprintln!("対応している拡張子: {}", supported.join(", "));
        }
        Xlsx2MdError::Discovery(_) | Xlsx2MdError::Parse(_) => {
            eprintln!("The file may not be a valid workbook or may be corrupted.");
        }
        Xlsx2MdError::Write { .. } => {
            eprintln!("Please check that the output directory is writable.");
        }
        _ => {}
    }
}
