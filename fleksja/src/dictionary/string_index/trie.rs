//! トライ構造による高速文字列検索
//!
//! このモジュールは、ダブル配列トライを使用した綴りの完全一致検索を提供します。

use std::sync::OnceLock;

use rkyv::with::Skip;
use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::{FleksjaError, Result};

/// ダブル配列トライ
///
/// アーカイブにはトライのバイト列のみを格納し、検索用の構造は
/// 最初の検索時にバイト列から復元します。
#[derive(Archive, Serialize, Deserialize)]
pub struct Trie {
    bytes: Vec<u8>,
    #[rkyv(with = Skip)]
    da: OnceLock<crawdad::Trie>,
}

impl Trie {
    /// レコードからトライを構築します。
    ///
    /// レコードが空の場合は、何にも一致しない空のトライを返します。
    pub fn from_records<I, K>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, u32)>,
        K: AsRef<str>,
    {
        let mut records = records.into_iter().peekable();
        if records.peek().is_none() {
            return Ok(Self {
                bytes: vec![],
                da: OnceLock::new(),
            });
        }
        let da = crawdad::Trie::from_records(records)
            .map_err(|e| FleksjaError::invalid_argument("records", e.to_string()))?;
        let bytes = da.serialize_to_vec();
        let cell = OnceLock::new();
        // The cell is fresh, so this never fails.
        let _ = cell.set(da);
        Ok(Self { bytes, da: cell })
    }

    /// 完全一致するキーの値を返します。
    #[inline(always)]
    pub fn exact_match(&self, key: &str) -> Option<u32> {
        if self.bytes.is_empty() || key.is_empty() {
            return None;
        }
        self.da
            .get_or_init(|| crawdad::Trie::deserialize_from_slice(&self.bytes).0)
            .exact_match(key.chars())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let trie = Trie::from_records([("pies", 0), ("psa", 2), ("psu", 4)]).unwrap();
        assert_eq!(trie.exact_match("psa"), Some(2));
        assert_eq!(trie.exact_match("ps"), None);
        assert_eq!(trie.exact_match("psy"), None);
        assert_eq!(trie.exact_match(""), None);
    }

    #[test]
    fn test_empty() {
        let trie = Trie::from_records(Vec::<(&str, u32)>::new()).unwrap();
        assert_eq!(trie.exact_match("pies"), None);
    }

    #[test]
    fn test_restored_from_bytes() {
        let trie = Trie::from_records([("duży", 7), ("większy", 8)]).unwrap();
        let restored = Trie {
            bytes: trie.bytes.clone(),
            da: OnceLock::new(),
        };
        assert_eq!(restored.exact_match("większy"), Some(8));
        assert_eq!(restored.exact_match("największy"), None);
    }
}
