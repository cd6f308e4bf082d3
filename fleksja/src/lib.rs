//! # fleksja
//!
//! fleksjaは、屈折の多い言語(ポーランド語を想定)のための屈折辞書エンジンです。
//!
//! ## 概要
//!
//! このライブラリは、見出し語とそのパラダイム(すべての屈折形)を記述したコーパスから辞書を構築し、
//! 任意の屈折形から見出し語を引く問い合わせと、見出し語からパラダイムを列挙する問い合わせに答えます。
//! 同じ綴りの語形(同綴異義語)はコーパス中の出現ごとに別のノードとして扱われ、
//! 問い合わせ結果は登録順に並んだ代替候補とともに返されます。
//!
//! ## 主な機能
//!
//! - **同綴異義語を区別する索引**: 綴りから出現順のIDの列を引き、IDから綴りを復元
//! - **屈折グラフ**: 主系統の親子関係、性・格の副系統、種別付きの語彙関係
//! - **語彙関係**: 比較級(`hr`、`hst`)、分詞(`imieslow`、`rzeczownik`)、任意の名前の関係
//! - **多分節表現**: 構成語が連動して屈折し、語順の入れ替えも許される固定表現の解決
//! - **スナップショット**: rkyv形式での辞書の保存と読み込み
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use fleksja::Dictionary;
//!
//! let corpus = "\
//! zły:CA:zły:złego:złemu:złego:złym:złym:zły:zła:złej:złej:złą:złą:złej:zła:
//! Apokalipsa:AD:Apokalipsa:Apokalipsy:Apokalipsie:Apokalipsę:Apokalipsą:Apokalipsie:Apokalipso:
//! ";
//! let mut dict = Dictionary::from_reader(corpus.as_bytes())?;
//!
//! let lookup = dict.parent_of("Apokalipsy")?;
//! assert_eq!(lookup.surface(), "Apokalipsa");
//! assert_eq!(lookup.label(), Some("AD"));
//!
//! dict.add_multisegments_from_reader("\"zła Apokalipsa\";**;;;".as_bytes())?;
//! let phrase = dict.resolve_multisegment_parent(&["złej", "Apokalipsy"])?;
//! assert_eq!(phrase.phrase(), "zła Apokalipsa");
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("`target_pointer_width` must be 32 or 64");

/// コーパスと関係ファイルのパーサー
pub mod corpus;

/// 辞書データ構造とビルダー
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// 問い合わせ結果の型定義
pub mod lookup;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(test)]
mod tests;

// Re-exports
pub use dictionary::{ComponentPolicy, Dictionary, DictionaryBuilder, DictionaryConfig, LexemeId};
pub use lookup::{Lookup, MultisegmentMatch, Reading};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
