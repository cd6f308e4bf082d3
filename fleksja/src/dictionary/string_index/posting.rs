//! ポスティングリスト
//!
//! このモジュールは、同じ綴りを共有する語彙素IDのポスティングリストを管理します。

use rkyv::{Archive, Deserialize, Serialize};

use crate::errors::Result;
use crate::utils::FromU32;

/// ポスティングリスト
#[derive(Archive, Serialize, Deserialize)]
pub struct Postings {
    // Sets of ids are stored by interleaving their length and values.
    // The order inside a set is the registration order of the homonyms.
    data: Vec<u32>,
}

impl Postings {
    /// 指定されたオフセットのIDスライスを取得します。
    #[inline(always)]
    pub fn ids(&self, i: usize) -> &[u32] {
        let len = usize::from_u32(self.data[i]);
        &self.data[i + 1..i + 1 + len]
    }
}

/// ポスティングリストを構築するビルダー
#[derive(Default)]
pub struct PostingsBuilder {
    data: Vec<u32>,
}

impl PostingsBuilder {
    /// 新しいビルダーを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// IDリストを追加し、そのオフセットを返します。
    #[inline(always)]
    pub fn push(&mut self, ids: &[u32]) -> Result<usize> {
        let offset = self.data.len();
        self.data.push(ids.len().try_into()?);
        self.data.extend_from_slice(ids);
        Ok(offset)
    }

    /// ポスティングリストを構築します。
    #[allow(clippy::missing_const_for_fn)]
    pub fn build(self) -> Postings {
        Postings { data: self.data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut builder = PostingsBuilder::new();
        let a = builder.push(&[3, 1, 4]).unwrap();
        let b = builder.push(&[]).unwrap();
        let c = builder.push(&[9]).unwrap();
        let postings = builder.build();
        assert_eq!(postings.ids(a), &[3, 1, 4]);
        assert!(postings.ids(b).is_empty());
        assert_eq!(postings.ids(c), &[9]);
    }
}
