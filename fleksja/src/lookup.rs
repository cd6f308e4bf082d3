//! 問い合わせの結果コンテナ
//!
//! このモジュールは、辞書への問い合わせの結果として得られる読みと、
//! 多分節表現の解決結果を表現する型を提供します。

use crate::dictionary::LexemeId;

/// 辞書中の1つの語彙素の読み
///
/// 語彙素ID、綴り、ラベルの組です。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reading {
    id: LexemeId,
    surface: String,
    label: Option<String>,
}

impl Reading {
    #[inline(always)]
    pub(crate) fn new(id: LexemeId, surface: &str, label: Option<&str>) -> Self {
        Self {
            id,
            surface: surface.to_string(),
            label: label.map(str::to_string),
        }
    }

    /// 語彙素IDを取得します。
    ///
    /// Gets the lexeme id of the reading.
    #[inline(always)]
    pub fn id(&self) -> LexemeId {
        self.id
    }

    /// 綴りを取得します。
    ///
    /// Gets the surface string of the reading.
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// ラベルを取得します。
    ///
    /// 見出し語は常にラベルを持ちます。派生形はラベルを持たないことがあります。
    ///
    /// Gets the inflection label of the reading.
    #[inline(always)]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// 単語に対する問い合わせの結果
///
/// 同綴異義語がある場合、最初に見つかった読みが主な結果となり、
/// 残りの読みは登録順に代替候補として保持されます。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lookup {
    primary: Reading,
    alternates: Vec<Reading>,
}

impl Lookup {
    #[inline(always)]
    pub(crate) fn new(primary: Reading, alternates: Vec<Reading>) -> Self {
        Self {
            primary,
            alternates,
        }
    }

    /// 主な読みを取得します。
    #[inline(always)]
    pub fn primary(&self) -> &Reading {
        &self.primary
    }

    /// 主な読みの綴りを取得します。
    #[inline(always)]
    pub fn surface(&self) -> &str {
        self.primary.surface()
    }

    /// 主な読みのラベルを取得します。
    #[inline(always)]
    pub fn label(&self) -> Option<&str> {
        self.primary.label()
    }

    /// 代替候補を登録順に取得します。
    #[inline(always)]
    pub fn alternates(&self) -> &[Reading] {
        &self.alternates
    }
}

/// 多分節表現の解決結果
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MultisegmentMatch {
    phrase: String,
    source: String,
    stable: Vec<bool>,
    interchangeable: Option<(u8, u8)>,
}

impl MultisegmentMatch {
    #[inline(always)]
    pub(crate) fn new(
        phrase: String,
        source: &str,
        stable: &[bool],
        interchangeable: Option<(u8, u8)>,
    ) -> Self {
        Self {
            phrase,
            source: source.to_string(),
            stable: stable.to_vec(),
            interchangeable,
        }
    }

    /// 構成語の基本形を区切り文字で連結した表現を取得します。
    #[inline(always)]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// 登録時のファイルに書かれていた表現を取得します。
    #[inline(always)]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 構成語ごとの安定性を取得します。`true`の構成語は屈折しません。
    #[inline(always)]
    pub fn stable(&self) -> &[bool] {
        &self.stable
    }

    /// 入れ替え可能な構成語の位置の組を、ファイルと同じ1始まりで取得します。
    #[inline(always)]
    pub fn interchangeable(&self) -> Option<(u8, u8)> {
        self.interchangeable
    }
}
