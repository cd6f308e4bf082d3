//! 語彙素識別子
//!
//! このモジュールは、辞書内の語形(語彙素ノード)を一意に識別するための
//! 識別子を提供します。

use std::fmt;

use rkyv::{Archive, Deserialize, Serialize};

use crate::utils::FromU32;

/// 語形ノードの識別子
///
/// 構築時にコーパスの出現順で0から密に割り当てられ、一つの辞書内で再利用されません。
#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Hash,
    Archive, Serialize, Deserialize,
)]
#[rkyv(derive(Debug, Eq, PartialEq))]
pub struct LexemeId(u32);

impl LexemeId {
    /// 新しいインスタンスを作成します。
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// 内部の整数値を返します。
    #[inline(always)]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        usize::from_u32(self.0)
    }
}

impl From<u32> for LexemeId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for LexemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
