//! Document Module
//!
//! シートごとの描画結果（セクション）と、それらをまとめたMarkdownドキュメントを表す型。

use std::fmt;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::output::EMPTY_SHEET_PLACEHOLDER;

/// 変換日時の出力形式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// セクションの本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    /// Markdownテーブル
    Table(String),

    /// データのないシート
    Empty,

    /// 読み込みまたは描画に失敗したシート（診断メッセージ）
    Error(String),
}

/// 1シート分の描画結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    sheet: String,
    body: SectionBody,
}

impl RenderedSection {
    /// セクションを生成
    pub fn new(sheet: impl Into<String>, body: SectionBody) -> Self {
        Self {
            sheet: sheet.into(),
            body,
        }
    }

    /// シート名
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// 本文
    pub fn body(&self) -> &SectionBody {
        &self.body
    }

    /// エラー表示のセクションかどうか
    pub fn is_error(&self) -> bool {
        matches!(self.body, SectionBody::Error(_))
    }

    /// `## シート名`の見出しと本文を出力
    fn write_markdown(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.sheet)?;
        writeln!(f)?;
        match &self.body {
            SectionBody::Table(table) => writeln!(f, "{}", table),
            SectionBody::Empty => writeln!(f, "{}", EMPTY_SHEET_PLACEHOLDER),
            SectionBody::Error(message) => writeln!(f, "*変換エラー: {}*", message),
        }
    }
}

/// 変換結果のMarkdownドキュメント
///
/// タイトル、メタデータ（変換元・変換日時）、各シートのセクションで構成されます。
///
/// # 出力形式
///
/// ```markdown
/// # book
///
/// *Excel ファイル: input/book.xlsx*
/// *変換日時: 2025-01-01 12:00:00*
///
/// ## Sheet1
///
/// | A | B |
/// |---|---|
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    source: String,
    generated_at: NaiveDateTime,
    sections: Vec<RenderedSection>,
}

impl Document {
    /// 変換元の識別子（パス）と変換日時からドキュメントを生成
    ///
    /// タイトルは変換元のファイル名から拡張子を除いたものになります。
    pub fn new(source: impl Into<String>, generated_at: NaiveDateTime) -> Self {
        let source = source.into();
        let title = Path::new(&source)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.clone());

        Self {
            title,
            source,
            generated_at,
            sections: Vec::new(),
        }
    }

    /// セクションを末尾に追加
    pub fn push_section(&mut self, section: RenderedSection) {
        self.sections.push(section);
    }

    /// タイトル
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 変換元の識別子
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 変換日時
    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    /// すべてのセクション（処理順）
    pub fn sections(&self) -> &[RenderedSection] {
        &self.sections
    }

    /// エラー表示になったセクション
    pub fn failed_sections(&self) -> impl Iterator<Item = &RenderedSection> {
        self.sections.iter().filter(|s| s.is_error())
    }

    /// Markdown文字列に変換
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "*Excel ファイル: {}*", self.source)?;
        writeln!(
            f,
            "*変換日時: {}*",
            self.generated_at.format(TIMESTAMP_FORMAT)
        )?;

        for section in &self.sections {
            writeln!(f)?;
            section.write_markdown(f)?;
        }

        Ok(())
    }
}
