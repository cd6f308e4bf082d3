//! 辞書の構築と取り込みの設定
//!
//! このモジュールは、コーパスの書式上の約束事(空欄の記号、格の組の大きさなど)と、
//! 多分節表現の構成語の選び方を保持する設定を提供します。
//! 設定は辞書のスナップショットにも保存され、構築後の取り込みでも同じ約束事が使われます。

use std::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{FleksjaError, Result};

/// 多分節表現を登録するときに、各語のどの読みを構成語として採用するか。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Archive, Serialize, Deserialize)]
#[repr(u8)]
pub enum ComponentPolicy {
    /// 自身が代表である読みを優先します。
    ///
    /// 性・格の組の代表を最優先し、次に性・格の組に属さない見出し語を採用します。
    /// どちらもない場合は最初の読みの代表に置き換えます。
    #[default]
    GroupRepresentative,

    /// 常に最初の読みを採用し、その代表に置き換えます。
    FirstReading,
}

impl FromStr for ComponentPolicy {
    type Err = &'static str;

    fn from_str(policy: &str) -> Result<Self, Self::Err> {
        match policy {
            "representative" => Ok(Self::GroupRepresentative),
            "first" => Ok(Self::FirstReading),
            _ => Err("Could not parse a component policy"),
        }
    }
}

/// 辞書の設定
///
/// # 例
///
/// ```
/// use fleksja::dictionary::{ComponentPolicy, DictionaryConfig};
///
/// let config = DictionaryConfig::default()
///     .gender_label_classes("CP")?
///     .component_policy(ComponentPolicy::FirstReading);
/// assert!(config.is_gender_label("*CAB"));
/// assert!(config.is_gender_label("PA"));
/// assert!(!config.is_gender_label("AA"));
/// # Ok::<(), fleksja::errors::FleksjaError>(())
/// ```
#[derive(Clone, Debug, Archive, Serialize, Deserialize)]
pub struct DictionaryConfig {
    empty_slot_token: String,
    relation_skip_token: String,
    gender_label_classes: String,
    case_block_len: u8,
    phrase_separator: char,
    component_policy: ComponentPolicy,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            empty_slot_token: "##".to_string(),
            relation_skip_token: "#".to_string(),
            gender_label_classes: "C".to_string(),
            case_block_len: 7,
            phrase_separator: ' ',
            component_policy: ComponentPolicy::default(),
        }
    }
}

impl DictionaryConfig {
    /// パラダイム中の空欄を表す記号を設定します。
    ///
    /// # エラー
    ///
    /// 空文字列が指定された場合はエラーを返します。
    pub fn empty_slot_token<S>(mut self, token: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(FleksjaError::invalid_argument(
                "empty_slot_token",
                "must not be empty",
            ));
        }
        self.empty_slot_token = token;
        Ok(self)
    }

    /// 関係ファイル中で欠けている関係を表す記号を設定します。
    ///
    /// # エラー
    ///
    /// 空文字列が指定された場合はエラーを返します。
    pub fn relation_skip_token<S>(mut self, token: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(FleksjaError::invalid_argument(
                "relation_skip_token",
                "must not be empty",
            ));
        }
        self.relation_skip_token = token;
        Ok(self)
    }

    /// 性・格の副系統を構築するラベルの先頭文字を設定します。
    ///
    /// 曖昧性を表す接頭辞`*`を除いたラベルの先頭文字がこの集合に含まれる場合、
    /// 派生形は格の組ごとにまとめられます。
    ///
    /// # エラー
    ///
    /// 大文字以外の文字が含まれる場合はエラーを返します。
    pub fn gender_label_classes<S>(mut self, classes: S) -> Result<Self>
    where
        S: Into<String>,
    {
        let classes = classes.into();
        if !classes.chars().all(|c| c.is_uppercase()) {
            return Err(FleksjaError::invalid_argument(
                "gender_label_classes",
                "must consist of uppercase letters",
            ));
        }
        self.gender_label_classes = classes;
        Ok(self)
    }

    /// 格の組に含まれる語形の数を設定します。
    ///
    /// # エラー
    ///
    /// 0が指定された場合はエラーを返します。
    pub fn case_block_len(mut self, len: u8) -> Result<Self> {
        if len == 0 {
            return Err(FleksjaError::invalid_argument(
                "case_block_len",
                "must be at least 1",
            ));
        }
        self.case_block_len = len;
        Ok(self)
    }

    /// 多分節表現の語を連結する区切り文字を設定します。
    pub fn phrase_separator(mut self, separator: char) -> Self {
        self.phrase_separator = separator;
        self
    }

    /// 多分節表現の構成語の選び方を設定します。
    pub fn component_policy(mut self, policy: ComponentPolicy) -> Self {
        self.component_policy = policy;
        self
    }

    /// ラベルが性・格の副系統を持つ品詞を表すかどうかを返します。
    pub fn is_gender_label(&self, label: &str) -> bool {
        label
            .trim_start_matches('*')
            .chars()
            .next()
            .is_some_and(|c| self.gender_label_classes.contains(c))
    }

    #[inline(always)]
    pub(crate) fn is_empty_slot(&self, field: &str) -> bool {
        field.is_empty() || field == self.empty_slot_token
    }

    #[inline(always)]
    pub(crate) fn is_relation_skip(&self, field: &str) -> bool {
        field.is_empty() || field == self.relation_skip_token
    }

    #[inline(always)]
    pub(crate) fn block_len(&self) -> usize {
        usize::from(self.case_block_len)
    }

    #[inline(always)]
    pub(crate) fn separator(&self) -> char {
        self.phrase_separator
    }

    #[inline(always)]
    pub(crate) fn policy(&self) -> ComponentPolicy {
        self.component_policy
    }
}
