//! 綴りの格納
//!
//! このモジュールは、重複のない綴りを序数順に保持し、逆引きに使用します。

use rkyv::{Archive, Deserialize, Serialize};

/// 重複のない綴りの集合
#[derive(Default, Archive, Serialize, Deserialize)]
pub struct Spellings {
    spellings: Vec<String>,
}

impl Spellings {
    /// 綴りのイテレータから新しいインスタンスを作成します。
    pub fn new<I, S>(spellings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            spellings: spellings.into_iter().map(Into::into).collect(),
        }
    }

    #[inline(always)]
    pub fn get(&self, ordinal: usize) -> Option<&str> {
        self.spellings.get(ordinal).map(String::as_str)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spellings.len()
    }
}
