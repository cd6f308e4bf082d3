//! 綴りと語彙素IDの双方向索引
//!
//! このモジュールは、綴りから同綴異義語を含むすべての語彙素IDを引く順方向の検索と、
//! 語彙素IDから綴りを復元する逆方向の検索を提供します。
//!
//! 同じ綴りを共有するIDの並びは、構築時の登録順と厳密に一致します。
//! 上位の問い合わせはすべてこの順序を同綴異義語の判別に利用します。

mod posting;
mod spelling;
mod trie;

use std::collections::BTreeMap;

use rkyv::{Archive, Deserialize, Serialize};

use crate::dictionary::lexeme_id::LexemeId;
use crate::dictionary::string_index::posting::{Postings, PostingsBuilder};
use crate::dictionary::string_index::spelling::Spellings;
use crate::dictionary::string_index::trie::Trie;
use crate::errors::{FleksjaError, Result};
use crate::utils::FromU32;

/// 綴りをトライ構造で管理する双方向索引
#[derive(Archive, Serialize, Deserialize)]
pub struct StringIndex {
    trie: Trie,
    postings: Postings,
    spellings: Spellings,
    // Lexeme id -> ordinal in `spellings`.
    translation: Vec<u32>,
}

impl StringIndex {
    /// 綴りに登録されたすべての語彙素IDを登録順で返します。
    ///
    /// 未登録の綴りに対しては空のベクターを返します。
    pub fn lookup_all(&self, spelling: &str) -> Vec<LexemeId> {
        self.iter_ids(spelling).collect()
    }

    /// 綴りに登録された語彙素IDのイテレータを返します。
    #[inline(always)]
    pub fn iter_ids<'a>(&'a self, spelling: &str) -> impl Iterator<Item = LexemeId> + use<'a> {
        self.trie
            .exact_match(spelling)
            .map(|offset| self.postings.ids(usize::from_u32(offset)))
            .unwrap_or_default()
            .iter()
            .copied()
            .map(LexemeId::new)
    }

    /// 綴りが登録されているかどうかを返します。
    #[inline(always)]
    pub fn contains(&self, spelling: &str) -> bool {
        self.trie.exact_match(spelling).is_some()
    }

    /// 語彙素IDから綴りを復元します。
    ///
    /// # エラー
    ///
    /// IDが索引の範囲外の場合は[`FleksjaError::NotFound`]を返します。
    pub fn restore(&self, id: LexemeId) -> Result<&str> {
        self.translation
            .get(id.index())
            .and_then(|&ordinal| self.spellings.get(usize::from_u32(ordinal)))
            .ok_or_else(|| FleksjaError::not_found("lexeme id", id.to_string()))
    }

    /// 索引に含まれる語彙素IDの数を返します。
    #[inline(always)]
    pub fn num_ids(&self) -> usize {
        self.translation.len()
    }

    /// 重複を除いた綴りの数を返します。
    #[inline(always)]
    pub fn num_spellings(&self) -> usize {
        self.spellings.len()
    }
}

/// [`StringIndex`]を構築するビルダー
///
/// IDは登録のたびに0から順に割り当てられるため、綴りごとのIDの並びは
/// 登録順そのものになります。
#[derive(Default)]
pub struct StringIndexBuilder {
    map: BTreeMap<String, Vec<u32>>,
    num_ids: u32,
}

impl StringIndexBuilder {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// 綴りを登録し、新しく割り当てたIDを返します。
    pub fn register(&mut self, spelling: &str) -> Result<LexemeId> {
        if spelling.is_empty() {
            return Err(FleksjaError::invalid_argument(
                "spelling",
                "an empty spelling cannot be registered.",
            ));
        }
        let id = self.num_ids;
        self.num_ids = id.checked_add(1).ok_or_else(|| {
            FleksjaError::invalid_state("too many spellings", "lexeme ids exceed u32::MAX")
        })?;
        if let Some(ids) = self.map.get_mut(spelling) {
            ids.push(id);
        } else {
            self.map.insert(spelling.to_string(), vec![id]);
        }
        Ok(LexemeId::new(id))
    }

    /// 綴りに登録済みのIDを登録順で返します。
    #[inline(always)]
    pub fn ids(&self, spelling: &str) -> Option<&[u32]> {
        self.map.get(spelling).map(Vec::as_slice)
    }

    /// これまでに割り当てたIDの数を返します。
    #[inline(always)]
    pub fn num_ids(&self) -> u32 {
        self.num_ids
    }

    /// 索引を構築します。
    pub fn build(self) -> Result<StringIndex> {
        let mut translation = vec![u32::MAX; usize::from_u32(self.num_ids)];
        let mut builder = PostingsBuilder::new();
        let mut spellings = Vec::with_capacity(self.map.len());
        let mut offsets = Vec::with_capacity(self.map.len());
        for (ordinal, (spelling, ids)) in self.map.into_iter().enumerate() {
            let ordinal = u32::try_from(ordinal)?;
            offsets.push(u32::try_from(builder.push(&ids)?)?);
            for id in ids {
                translation[usize::from_u32(id)] = ordinal;
            }
            spellings.push(spelling);
        }
        if translation.contains(&u32::MAX) {
            return Err(FleksjaError::invalid_state(
                "string index is not dense",
                "some lexeme ids have no spelling",
            ));
        }
        let trie = Trie::from_records(spellings.iter().zip(offsets))?;
        Ok(StringIndex {
            trie,
            postings: builder.build(),
            spellings: Spellings::new(spellings),
            translation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(words: &[&str]) -> StringIndex {
        let mut b = StringIndexBuilder::new();
        for w in words {
            b.register(w).unwrap();
        }
        b.build().unwrap()
    }

    #[test]
    fn test_homonym_order() {
        let index = build(&["Gdańsk", "Gdański", "Gdańska", "Gdańsk", "Gdański"]);
        assert_eq!(
            index.lookup_all("Gdańsk"),
            vec![LexemeId::new(0), LexemeId::new(3)]
        );
        assert_eq!(
            index.lookup_all("Gdański"),
            vec![LexemeId::new(1), LexemeId::new(4)]
        );
        assert_eq!(index.lookup_all("Gdańska"), vec![LexemeId::new(2)]);
        assert_eq!(index.num_ids(), 5);
        assert_eq!(index.num_spellings(), 3);
    }

    #[test]
    fn test_unknown() {
        let index = build(&["pies", "psa"]);
        assert!(index.lookup_all("kot").is_empty());
        assert!(index.lookup_all("").is_empty());
        assert!(!index.contains("ps"));
        assert!(index.contains("psa"));
    }

    #[test]
    fn test_restore() {
        let index = build(&["pies", "psa", "pies"]);
        assert_eq!(index.restore(LexemeId::new(0)).unwrap(), "pies");
        assert_eq!(index.restore(LexemeId::new(1)).unwrap(), "psa");
        assert_eq!(index.restore(LexemeId::new(2)).unwrap(), "pies");
        assert!(index.restore(LexemeId::new(3)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_empty_index() {
        let index = StringIndexBuilder::new().build().unwrap();
        assert!(index.lookup_all("pies").is_empty());
        assert_eq!(index.num_ids(), 0);
    }

    #[test]
    fn test_register_empty_spelling() {
        let mut b = StringIndexBuilder::new();
        assert!(b.register("").is_err());
        assert_eq!(b.num_ids(), 0);
    }

    #[test]
    fn test_builder_ids() {
        let mut b = StringIndexBuilder::new();
        b.register("złej").unwrap();
        b.register("zła").unwrap();
        b.register("złej").unwrap();
        assert_eq!(b.ids("złej"), Some(&[0, 2][..]));
        assert_eq!(b.ids("zły"), None);
    }
}
