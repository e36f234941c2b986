//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// 変換対象のシートを選択する方法を指定します。
/// 存在しないシートを指定した場合、変換は`Xlsx2MdError::SheetNotFound`で失敗します。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// すべてのシートを宣言順に変換（デフォルト）
    #[default]
    All,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(0)` は最初のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),

    /// 複数のシート名指定（指定した順に出力）
    ///
    /// 例: `SheetSelector::Names(vec!["Sheet2".to_string(), "Sheet1".to_string()])`
    Names(Vec<String>),
}

impl SheetSelector {
    /// 発見したシート名の一覧から、処理対象のシート名を選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<String>)` - 処理対象のシート名（処理順）
    /// * `Err(String)` - 見つからなかったシートの指定（名前またはインデックス）
    pub(crate) fn select(&self, available: &[String]) -> Result<Vec<String>, String> {
        match self {
            SheetSelector::All => Ok(available.to_vec()),

            SheetSelector::Index(index) => available
                .get(*index)
                .map(|name| vec![name.clone()])
                .ok_or_else(|| format!("#{}", index)),

            SheetSelector::Name(name) => {
                if available.contains(name) {
                    Ok(vec![name.clone()])
                } else {
                    Err(name.clone())
                }
            }

            SheetSelector::Names(names) => {
                if let Some(missing) = names.iter().find(|name| !available.contains(name)) {
                    return Err(missing.clone());
                }
                Ok(names.clone())
            }
        }
    }
}
