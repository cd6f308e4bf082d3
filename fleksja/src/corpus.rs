//! コーパスと関係ファイルの読み込み
//!
//! このモジュールは、辞書の構築と取り込みに使われる各種の行形式ファイルを
//! レコードに分解するパーサーを提供します。
//!
//! | 形式 | 区切り | 行の構成 |
//! |------|--------|----------|
//! | コーパス | `:` | `見出し語:ラベル:派生形...` |
//! | 汎用の関係 | `:` | `主語:ラベル:関連語...` |
//! | 比較級 | `:` | `原級:比較級:最上級` |
//! | 分詞 | `:` | `語彙素:ラベル:分詞...:名詞` |
//! | 多分節表現 | `;` | `"語 語";安定性;未使用;入れ替え` |
//!
//! 空行は読み飛ばされます。形式の誤りは行番号付きの
//! [`FleksjaError::InvalidFormat`]として報告されます。

use std::io::{BufRead, BufReader, Read};
use std::ops::Deref;

use crate::dictionary::DictionaryConfig;
use crate::errors::{FleksjaError, Result};
use crate::utils::{is_blank, split_fields};

/// 1つのパラダイムを表すコーパスの行
pub struct Paradigm {
    head: String,
    label: String,

    // `None` marks an empty slot. Slots keep their position for case blocks.
    forms: Vec<Option<String>>,
}

impl Paradigm {
    /// 見出し語を返します。
    pub fn head(&self) -> &str {
        &self.head
    }

    /// 屈折ラベルを返します。
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 派生形を位置順に返します。空欄は`None`です。
    pub fn forms(&self) -> &[Option<String>] {
        &self.forms
    }

    /// 空欄を除いた派生形のイテレータを返します。
    pub fn present_forms(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().filter_map(Option::as_deref)
    }
}

/// 屈折ラベルとして妥当かどうかを判定する
///
/// ラベルは曖昧性を表す接頭辞`*`を任意に持ち、その後に1文字以上の大文字が続きます。
fn is_valid_label(label: &str) -> bool {
    let body = label.strip_prefix('*').unwrap_or(label);
    !body.is_empty() && body.chars().all(char::is_uppercase)
}

fn format_error(name: &'static str, lineno: usize, msg: &str) -> FleksjaError {
    FleksjaError::invalid_format(name, format!("line {lineno}: {msg}"))
}

/// 空行を除いた行を行番号とともに読み込む
fn read_lines<R>(rdr: R) -> impl Iterator<Item = Result<(usize, String)>>
where
    R: Read,
{
    BufReader::new(rdr)
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(line) if is_blank(&line) => None,
            Ok(line) => Some(Ok((i + 1, line))),
            Err(e) => Some(Err(e.into())),
        })
}

/// コーパスの表現
///
/// パラダイムをファイル中の出現順に保持します。
pub struct Corpus {
    paradigms: Vec<Paradigm>,
}

impl Corpus {
    /// コーパスを読み込みます。
    ///
    /// # 引数
    ///
    /// * `rdr` - `見出し語:ラベル:派生形...`形式の行を含むリーダー
    /// * `config` - 空欄の記号を決める設定
    ///
    /// # エラー
    ///
    /// 次の場合は[`FleksjaError::InvalidFormat`]を返します。
    /// - 見出し語またはラベルが欠けている場合。
    /// - 見出し語が空欄の記号である場合。
    /// - ラベルが大文字(と任意の接頭辞`*`)で構成されていない場合。
    pub fn from_reader<R>(rdr: R, config: &DictionaryConfig) -> Result<Self>
    where
        R: Read,
    {
        let mut paradigms = vec![];
        for line in read_lines(rdr) {
            let (lineno, line) = line?;
            let fields = split_fields(&line, ':');
            let [head, label, derived @ ..] = fields.as_slice() else {
                return Err(format_error(
                    "corpus",
                    lineno,
                    "a paradigm needs at least a head and a label",
                ));
            };
            if config.is_empty_slot(head) {
                return Err(format_error("corpus", lineno, "the head must not be empty"));
            }
            if !is_valid_label(label) {
                return Err(format_error(
                    "corpus",
                    lineno,
                    &format!("invalid label '{label}'"),
                ));
            }
            let forms = derived
                .iter()
                .map(|f| (!config.is_empty_slot(f)).then(|| f.to_string()))
                .collect();
            paradigms.push(Paradigm {
                head: head.to_string(),
                label: label.to_string(),
                forms,
            });
        }
        Ok(Self { paradigms })
    }
}

impl Deref for Corpus {
    type Target = [Paradigm];

    fn deref(&self) -> &Self::Target {
        &self.paradigms
    }
}

/// 汎用の関係ファイルの行
pub struct RelationRecord {
    subject: String,
    related: Vec<String>,
}

impl RelationRecord {
    /// 関係の主語を返します。
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// 欠けている関係を除いた関連語を返します。
    pub fn related(&self) -> &[String] {
        &self.related
    }

    /// `主語:ラベル:関連語...`形式の行を読み込みます。
    ///
    /// ラベルは読み飛ばされます。関連語のうち関係の省略記号は取り除かれます。
    ///
    /// # エラー
    ///
    /// 主語が欠けている場合は[`FleksjaError::InvalidFormat`]を返します。
    pub fn read_all<R>(rdr: R, config: &DictionaryConfig) -> Result<Vec<Self>>
    where
        R: Read,
    {
        let mut records = vec![];
        for line in read_lines(rdr) {
            let (lineno, line) = line?;
            let fields = split_fields(&line, ':');
            let subject = fields[0];
            if config.is_relation_skip(subject) {
                return Err(format_error(
                    "relation",
                    lineno,
                    "the subject must not be empty",
                ));
            }
            let related = fields
                .iter()
                .skip(2)
                .filter(|f| !config.is_relation_skip(f))
                .map(|f| f.to_string())
                .collect();
            records.push(Self {
                subject: subject.to_string(),
                related,
            });
        }
        Ok(records)
    }
}

/// 比較級ファイルの行
pub struct GradationRecord {
    base: String,
    comparative: String,
    superlative: String,
}

impl GradationRecord {
    /// 原級を返します。
    pub fn base(&self) -> &str {
        &self.base
    }

    /// 比較級を返します。
    pub fn comparative(&self) -> &str {
        &self.comparative
    }

    /// 最上級を返します。
    pub fn superlative(&self) -> &str {
        &self.superlative
    }

    /// `原級:比較級:最上級`形式の行を読み込みます。
    ///
    /// # エラー
    ///
    /// フィールドがちょうど3つでない場合、またはいずれかが空の場合は
    /// [`FleksjaError::InvalidFormat`]を返します。
    pub fn read_all<R>(rdr: R) -> Result<Vec<Self>>
    where
        R: Read,
    {
        let mut records = vec![];
        for line in read_lines(rdr) {
            let (lineno, line) = line?;
            let fields = split_fields(&line, ':');
            let [base, comparative, superlative] = fields.as_slice() else {
                return Err(format_error(
                    "gradation",
                    lineno,
                    "a gradation needs exactly three fields",
                ));
            };
            if [base, comparative, superlative].iter().any(|f| f.is_empty()) {
                return Err(format_error(
                    "gradation",
                    lineno,
                    "a gradation cannot contain empty fields",
                ));
            }
            records.push(Self {
                base: base.to_string(),
                comparative: comparative.to_string(),
                superlative: superlative.to_string(),
            });
        }
        Ok(records)
    }
}

/// 分詞ファイルの行
pub struct ParticipleRecord {
    lexeme: String,
    participles: Vec<String>,
    noun: Option<String>,
}

impl ParticipleRecord {
    /// 動詞の語彙素を返します。
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// 欠けているものを除いた分詞を返します。
    pub fn participles(&self) -> &[String] {
        &self.participles
    }

    /// 動名詞を返します。
    pub fn noun(&self) -> Option<&str> {
        self.noun.as_deref()
    }

    /// `語彙素:ラベル:分詞...:名詞`形式の行を読み込みます。
    ///
    /// ラベルの後ろの最後のフィールドが名詞、その間のフィールドが分詞です。
    ///
    /// # エラー
    ///
    /// 語彙素、ラベル、名詞のいずれかのフィールドが欠けている場合は
    /// [`FleksjaError::InvalidFormat`]を返します。
    pub fn read_all<R>(rdr: R, config: &DictionaryConfig) -> Result<Vec<Self>>
    where
        R: Read,
    {
        let mut records = vec![];
        for line in read_lines(rdr) {
            let (lineno, line) = line?;
            let fields = split_fields(&line, ':');
            let [lexeme, _label, participles @ .., noun] = fields.as_slice() else {
                return Err(format_error(
                    "participle",
                    lineno,
                    "a participle line needs a lexeme, a label and a noun",
                ));
            };
            if config.is_relation_skip(lexeme) {
                return Err(format_error(
                    "participle",
                    lineno,
                    "the lexeme must not be empty",
                ));
            }
            let participles = participles
                .iter()
                .filter(|f| !config.is_relation_skip(f))
                .map(|f| f.to_string())
                .collect();
            let noun = (!config.is_relation_skip(noun)).then(|| noun.to_string());
            records.push(Self {
                lexeme: lexeme.to_string(),
                participles,
                noun,
            });
        }
        Ok(records)
    }
}

/// 多分節表現ファイルの行
pub struct MultisegmentRecord {
    phrase: String,
    words: Vec<String>,
    stable: Vec<bool>,
    interchangeable: Option<(u8, u8)>,
}

impl MultisegmentRecord {
    /// 引用符を取り除いた表現全体を返します。
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// ワイルドカードを除いた構成語を返します。
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// 構成語ごとの安定性を返します。
    pub fn stable(&self) -> &[bool] {
        &self.stable
    }

    /// 入れ替え可能な構成語の組(0始まり)を返します。
    pub fn interchangeable(&self) -> Option<(u8, u8)> {
        self.interchangeable
    }

    fn parse(line: &str, lineno: usize, separator: char) -> Result<Self> {
        let fields = split_fields(line, ';');
        let [phrase, stab, rest @ ..] = fields.as_slice() else {
            return Err(format_error(
                "multisegment",
                lineno,
                "a multisegment line needs a phrase and stability flags",
            ));
        };
        let phrase = phrase.trim_matches('"').trim();
        let words: Vec<String> = phrase
            .split(separator)
            .filter(|w| !w.is_empty() && !w.contains('*'))
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            return Err(format_error(
                "multisegment",
                lineno,
                "a phrase needs at least one non-wildcard word",
            ));
        }
        let stable = stab
            .chars()
            .map(|c| match c {
                '*' => Ok(false),
                '-' => Ok(true),
                _ => Err(format_error(
                    "multisegment",
                    lineno,
                    &format!("invalid stability flag '{c}'"),
                )),
            })
            .collect::<Result<Vec<_>>>()?;
        if stable.len() != words.len() {
            return Err(format_error(
                "multisegment",
                lineno,
                &format!(
                    "{} stability flags for {} words",
                    stable.len(),
                    words.len()
                ),
            ));
        }
        let inter = rest.get(1).copied().unwrap_or_default();
        let interchangeable = if inter.is_empty() {
            None
        } else {
            let slots = inter
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .and_then(|d| u8::try_from(d).ok())
                        .filter(|&d| d >= 1 && usize::from(d) <= words.len())
                        .map(|d| d - 1)
                })
                .collect::<Option<Vec<u8>>>();
            match slots.as_deref() {
                Some(&[a, b]) if a != b => Some((a, b)),
                _ => {
                    return Err(format_error(
                        "multisegment",
                        lineno,
                        &format!("invalid interchangeable pair '{inter}'"),
                    ));
                }
            }
        };
        Ok(Self {
            phrase: phrase.to_string(),
            words,
            stable,
            interchangeable,
        })
    }

    /// `"語 語";安定性;未使用;入れ替え`形式の行を読み込みます。
    ///
    /// - `*`を含む語はワイルドカードであり、構成語に含まれません。
    /// - 安定性は構成語ごとに1文字で、`-`が安定(変化しない)、`*`が不安定を表します。
    /// - 入れ替えは1始まりの2桁の位置で、空の場合は入れ替え不可です。
    ///
    /// # エラー
    ///
    /// 安定性の数が構成語の数と一致しない場合や、入れ替えの位置が範囲外の場合は
    /// [`FleksjaError::InvalidFormat`]を返します。
    pub fn read_all<R>(rdr: R, config: &DictionaryConfig) -> Result<Vec<Self>>
    where
        R: Read,
    {
        let mut records = vec![];
        for line in read_lines(rdr) {
            let (lineno, line) = line?;
            records.push(Self::parse(&line, lineno, config.separator())?);
        }
        Ok(records)
    }
}
