//! 屈折グラフ
//!
//! このモジュールは、語彙素IDをキーとするノードの集合と、その間の3種類の辺を管理します。
//!
//! - 主系統の親子関係: 各語形から見出し語(パラダイムの根)への辺。森を成します。
//! - 性・格の副系統: 名詞的・形容詞的な語形を格の組ごとにまとめる独立した森。深さは常に1です。
//! - 語彙関係: 関係種別IDごとの多重グラフ。常に両端点に対称に追加されます。

use rkyv::{Archive, Deserialize, Serialize};

use crate::dictionary::lexeme_id::LexemeId;
use crate::dictionary::relation::RelationshipId;
use crate::errors::{FleksjaError, Result};

/// 格
///
/// 格の組の中の位置(0始まり)と対応します。
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[repr(u8)]
pub enum Case {
    /// 主格 (mianownik)
    Nominative = 0,
    /// 属格 (dopełniacz)
    Genitive = 1,
    /// 与格 (celownik)
    Dative = 2,
    /// 対格 (biernik)
    Accusative = 3,
    /// 具格 (narzędnik)
    Instrumental = 4,
    /// 前置格 (miejscownik)
    Locative = 5,
    /// 呼格 (wołacz)
    Vocative = 6,
}

impl Case {
    /// 格の組の中の位置から格を返します。
    pub const fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            0 => Some(Self::Nominative),
            1 => Some(Self::Genitive),
            2 => Some(Self::Dative),
            3 => Some(Self::Accusative),
            4 => Some(Self::Instrumental),
            5 => Some(Self::Locative),
            6 => Some(Self::Vocative),
            _ => None,
        }
    }
}

/// 性・格の副系統に属するノードの付加情報
#[derive(Archive, Serialize, Deserialize)]
pub struct GenderAttrs {
    case_slot: u8,
    gender: u8,
    parent: Option<LexemeId>,
    children: Vec<LexemeId>,
}

/// 関係種別ごとの関連語彙素
#[derive(Archive, Serialize, Deserialize)]
pub struct RelationEdges {
    kind: RelationshipId,
    targets: Vec<LexemeId>,
}

/// グラフのノード
#[derive(Default, Archive, Serialize, Deserialize)]
pub struct GraphNode {
    label: Option<String>,
    parent: Option<LexemeId>,
    children: Vec<LexemeId>,
    gender: Option<GenderAttrs>,
    relations: Vec<RelationEdges>,
}

impl GraphNode {
    fn related(&self, kind: RelationshipId) -> &[LexemeId] {
        self.relations
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.targets.as_slice())
            .unwrap_or_default()
    }

    fn push_related(&mut self, kind: RelationshipId, target: LexemeId) {
        if let Some(r) = self.relations.iter_mut().find(|r| r.kind == kind) {
            r.targets.push(target);
        } else {
            self.relations.push(RelationEdges {
                kind,
                targets: vec![target],
            });
        }
    }
}

/// 屈折グラフ
///
/// ノードは語彙素IDを添字とする配列に格納されます。
#[derive(Default, Archive, Serialize, Deserialize)]
pub struct InflectionGraph {
    nodes: Vec<Option<GraphNode>>,
}

impl InflectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// ノード数の上限を指定して空のグラフを作成します。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// 登録済みのノード数を返します。
    pub fn num_nodes(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    #[inline(always)]
    fn node(&self, id: LexemeId) -> Result<&GraphNode> {
        self.nodes
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or_else(|| FleksjaError::not_found("graph node", id.to_string()))
    }

    #[inline(always)]
    fn node_mut(&mut self, id: LexemeId) -> Result<&mut GraphNode> {
        self.nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or_else(|| FleksjaError::not_found("graph node", id.to_string()))
    }

    fn insert(&mut self, id: LexemeId, node: GraphNode) -> Result<()> {
        let i = id.index();
        if i >= self.nodes.len() {
            self.nodes.resize_with(i + 1, || None);
        }
        if self.nodes[i].is_some() {
            return Err(FleksjaError::invalid_argument(
                "id",
                format!("node {id} is already present"),
            ));
        }
        self.nodes[i] = Some(node);
        Ok(())
    }

    /// 通常のノードを追加します。
    ///
    /// # エラー
    ///
    /// 同じIDのノードが既に存在する場合はエラーを返します。
    pub fn add_node(&mut self, id: LexemeId, label: Option<&str>) -> Result<()> {
        self.insert(
            id,
            GraphNode {
                label: label.map(str::to_string),
                ..GraphNode::default()
            },
        )
    }

    /// 性・格の情報を持つノードを追加します。
    ///
    /// # 引数
    ///
    /// * `case_slot` - 格の組の中の位置
    /// * `gender` - パラダイム内の格の組の番号
    pub fn add_gender_node(
        &mut self,
        id: LexemeId,
        label: Option<&str>,
        case_slot: u8,
        gender: u8,
    ) -> Result<()> {
        self.insert(
            id,
            GraphNode {
                label: label.map(str::to_string),
                gender: Some(GenderAttrs {
                    case_slot,
                    gender,
                    parent: None,
                    children: vec![],
                }),
                ..GraphNode::default()
            },
        )
    }

    /// 主系統の辺を追加します。
    ///
    /// `child`の親を`parent`に設定し、`parent`の子の末尾に`child`を追加します。
    ///
    /// # エラー
    ///
    /// 次の場合はエラーを返します。
    /// - どちらかのノードが存在しない場合。
    /// - `child`に既に親がある場合。
    /// - 辺を追加すると循環が生じる場合。
    pub fn add_edge(&mut self, parent: LexemeId, child: LexemeId) -> Result<()> {
        if self.node(child)?.parent.is_some() {
            return Err(FleksjaError::invalid_state(
                format!("cannot link {child} under {parent}"),
                "the child already has a primary parent",
            ));
        }
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(FleksjaError::invalid_state(
                    format!("cannot link {child} under {parent}"),
                    "the edge would create a cycle",
                ));
            }
            cursor = self.node(ancestor)?.parent;
        }
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// 性・格の副系統の辺を追加します。
    ///
    /// # エラー
    ///
    /// 次の場合はエラーを返します。
    /// - どちらかのノードが存在しない、または性・格の情報を持たない場合。
    /// - `parent`自身が組の代表でない場合、または`child`が既に組に属している場合。
    pub fn add_gender_edge(&mut self, parent: LexemeId, child: LexemeId) -> Result<()> {
        if parent == child {
            return Err(FleksjaError::invalid_argument(
                "child",
                format!("{child} cannot be its own gender parent"),
            ));
        }
        let p = self.gender_attrs(parent)?;
        if p.parent.is_some() {
            return Err(FleksjaError::invalid_state(
                format!("cannot link {child} under {parent}"),
                "the gender parent is not a group representative",
            ));
        }
        let c = self.gender_attrs(child)?;
        if c.parent.is_some() || !c.children.is_empty() {
            return Err(FleksjaError::invalid_state(
                format!("cannot link {child} under {parent}"),
                "the child already belongs to a gender group",
            ));
        }
        self.gender_attrs_mut(parent)?.children.push(child);
        self.gender_attrs_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// 語彙関係の辺を両端点に追加します。
    ///
    /// 冪等ではありません。同じ呼び出しを繰り返すと関連語彙素が重複して記録されます。
    pub fn add_relationship_edge(
        &mut self,
        a: LexemeId,
        b: LexemeId,
        kind: RelationshipId,
    ) -> Result<()> {
        // Both endpoints are checked before mutating either.
        self.node(a)?;
        self.node(b)?;
        self.node_mut(a)?.push_related(kind, b);
        self.node_mut(b)?.push_related(kind, a);
        Ok(())
    }

    fn gender_attrs(&self, id: LexemeId) -> Result<&GenderAttrs> {
        self.node(id)?.gender.as_ref().ok_or_else(|| {
            FleksjaError::invalid_argument("id", format!("{id} is not a gender node"))
        })
    }

    fn gender_attrs_mut(&mut self, id: LexemeId) -> Result<&mut GenderAttrs> {
        self.node_mut(id)?.gender.as_mut().ok_or_else(|| {
            FleksjaError::invalid_argument("id", format!("{id} is not a gender node"))
        })
    }

    /// 主系統の親を返します。見出し語の場合は`None`です。
    pub fn get_parent(&self, id: LexemeId) -> Result<Option<LexemeId>> {
        Ok(self.node(id)?.parent)
    }

    /// 主系統の子を追加順に返します。
    pub fn get_children(&self, id: LexemeId) -> Result<&[LexemeId]> {
        Ok(&self.node(id)?.children)
    }

    /// ラベルを返します。
    pub fn get_label(&self, id: LexemeId) -> Result<Option<&str>> {
        Ok(self.node(id)?.label.as_deref())
    }

    /// 見出し語(主系統の親を持たないノード)かどうかを返します。
    pub fn is_head(&self, id: LexemeId) -> Result<bool> {
        Ok(self.node(id)?.parent.is_none())
    }

    /// 性・格の情報を持つかどうかを返します。
    pub fn has_gender(&self, id: LexemeId) -> Result<bool> {
        Ok(self.node(id)?.gender.is_some())
    }

    /// 性・格の副系統の親を返します。
    pub fn get_gender_parent(&self, id: LexemeId) -> Result<Option<LexemeId>> {
        Ok(self.node(id)?.gender.as_ref().and_then(|g| g.parent))
    }

    /// 性・格の副系統の子を返します。
    pub fn get_gender_children(&self, id: LexemeId) -> Result<&[LexemeId]> {
        Ok(self
            .node(id)?
            .gender
            .as_ref()
            .map(|g| g.children.as_slice())
            .unwrap_or_default())
    }

    /// 格を返します。性・格の情報を持たないノードでは`None`です。
    pub fn get_case(&self, id: LexemeId) -> Result<Option<Case>> {
        Ok(self.get_case_slot(id)?.and_then(Case::from_slot))
    }

    /// 格の組の中の位置を返します。
    pub fn get_case_slot(&self, id: LexemeId) -> Result<Option<u8>> {
        Ok(self.node(id)?.gender.as_ref().map(|g| g.case_slot))
    }

    /// パラダイム内の格の組の番号を返します。
    pub fn get_gender(&self, id: LexemeId) -> Result<Option<u8>> {
        Ok(self.node(id)?.gender.as_ref().map(|g| g.gender))
    }

    /// 指定した種別で関連付けられた語彙素を返します。
    pub fn get_related(&self, id: LexemeId, kind: RelationshipId) -> Result<&[LexemeId]> {
        Ok(self.node(id)?.related(kind))
    }

    /// 語彙素が属するパラダイムの代表を返します。
    ///
    /// 性・格の副系統に属する場合はその組の代表(自身が代表なら自身)、
    /// そうでなければ主系統の親(自身が見出し語なら自身)です。
    pub fn anchor(&self, id: LexemeId) -> Result<LexemeId> {
        let node = self.node(id)?;
        Ok(match &node.gender {
            Some(g) => g.parent.unwrap_or(id),
            None => node.parent.unwrap_or(id),
        })
    }

    /// 語彙素が自身の代表かどうかを返します。
    pub fn is_anchor(&self, id: LexemeId) -> Result<bool> {
        Ok(self.anchor(id)? == id)
    }

    /// 性・格の組の代表とその子を格の順に返します。
    pub fn gender_group(&self, representative: LexemeId) -> Result<Vec<LexemeId>> {
        let g = self.gender_attrs(representative)?;
        let mut group = Vec::with_capacity(g.children.len() + 1);
        group.push(representative);
        group.extend_from_slice(&g.children);
        Ok(group)
    }
}
