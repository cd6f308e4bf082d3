//! 語彙関係
//!
//! このモジュールは、関係種別の登録簿と、構築後に関係ファイルから
//! 語彙関係の辺を取り込む処理を提供します。
//!
//! 取り込みはバッチ単位で原子的です。すべての行の綴りを解決してから辺を追加するため、
//! 未登録の綴りを含むファイルは辞書を一切変更しません。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hashbrown::HashSet;
use rkyv::{Archive, Deserialize, Serialize};

use crate::corpus::{GradationRecord, ParticipleRecord, RelationRecord};
use crate::dictionary::{Dictionary, LexemeId};
use crate::errors::{FleksjaError, Result};
use crate::lookup::Lookup;

/// 比較級の関係名
pub const COMPARATIVE: &str = "hr";
/// 最上級の関係名
pub const SUPERLATIVE: &str = "hst";
/// 動詞と分詞の関係名
pub const PARTICIPLE: &str = "imieslow";
/// 動詞と動名詞の関係名
pub const VERBAL_NOUN: &str = "rzeczownik";

/// 関係種別ID
///
/// 関係種別が初めて登録されたときに0から順に割り当てられます。
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Archive, Serialize, Deserialize)]
#[rkyv(derive(Debug, Eq, PartialEq))]
pub struct RelationshipId(u32);

impl RelationshipId {
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// 関係種別の登録簿
///
/// 関係名は大文字小文字を区別せずに比較され、小文字に正規化して保持されます。
#[derive(Default, Archive, Serialize, Deserialize)]
pub struct RelationshipRegistry {
    names: Vec<String>,
}

impl RelationshipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 関係名に対応するIDを返します。
    pub fn id(&self, name: &str) -> Option<RelationshipId> {
        let key = name.to_lowercase();
        self.names
            .iter()
            .position(|n| *n == key)
            .and_then(|i| u32::try_from(i).ok())
            .map(RelationshipId::new)
    }

    /// 新しい関係名を登録します。
    ///
    /// # エラー
    ///
    /// 同じ名前が既に登録されている場合は[`FleksjaError::RelationshipAlreadyExists`]、
    /// 空の名前の場合は[`FleksjaError::InvalidArgument`]を返します。
    pub fn register(&mut self, name: &str) -> Result<RelationshipId> {
        if name.trim().is_empty() {
            return Err(FleksjaError::invalid_argument(
                "name",
                "a relationship name must not be empty",
            ));
        }
        if self.id(name).is_some() {
            return Err(FleksjaError::RelationshipAlreadyExists(name.to_string()));
        }
        let id = RelationshipId::new(u32::try_from(self.names.len())?);
        self.names.push(name.to_lowercase());
        Ok(id)
    }

    /// 関係名に対応するIDを返し、未登録であれば登録します。
    pub fn get_or_create(&mut self, name: &str) -> Result<RelationshipId> {
        match self.id(name) {
            Some(id) => Ok(id),
            None => self.register(name),
        }
    }

    /// 登録済みの関係名をID順に返します。
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// 解決済みの関係の辺
struct PendingEdge<'a> {
    name: &'a str,
    a: LexemeId,
    b: LexemeId,
}

impl Dictionary {
    /// 新しい関係種別を登録します。
    ///
    /// # エラー
    ///
    /// 大文字小文字を区別せずに同じ名前が登録済みの場合は
    /// [`FleksjaError::RelationshipAlreadyExists`]を返します。
    pub fn register_relationship(&mut self, name: &str) -> Result<RelationshipId> {
        self.inner.relationships.register(name)
    }

    /// 関係種別のIDを返し、未登録であれば登録します。
    pub fn get_or_create_relationship(&mut self, name: &str) -> Result<RelationshipId> {
        self.inner.relationships.get_or_create(name)
    }

    /// 関係種別のIDを返します。
    ///
    /// # エラー
    ///
    /// 未登録の場合は[`FleksjaError::NotFound`]を返します。
    pub fn relationship_id(&self, name: &str) -> Result<RelationshipId> {
        self.inner
            .relationships
            .id(name)
            .ok_or_else(|| FleksjaError::not_found("relationship", name))
    }

    /// 登録済みの関係名をID順に返します。
    pub fn relationship_names(&self) -> impl Iterator<Item = &str> {
        self.inner.relationships.names()
    }

    /// 語彙関係の端点となる読みを返します。
    ///
    /// 綴りが見出し語として登録されていれば最初の見出し語の読み、
    /// そうでなければ最初の読みの見出し語を返します。
    /// [`Dictionary::related_to`]はこの見出し語から辺を辿ります。
    fn relation_endpoint(&self, word: &str) -> Result<LexemeId> {
        let graph = &self.inner.graph;
        let mut first = None;
        for id in self.inner.index.iter_ids(word) {
            if graph.is_head(id)? {
                return Ok(id);
            }
            first.get_or_insert(id);
        }
        let id = first.ok_or_else(|| FleksjaError::not_found("spelling", word))?;
        Ok(graph.get_parent(id)?.unwrap_or(id))
    }

    /// 解決済みの辺をまとめて追加します。
    fn apply_edges(&mut self, edges: Vec<PendingEdge<'_>>) -> Result<usize> {
        let num_edges = edges.len();
        for edge in edges {
            let kind = self.inner.relationships.get_or_create(edge.name)?;
            self.inner.graph.add_relationship_edge(edge.a, edge.b, kind)?;
        }
        Ok(num_edges)
    }

    /// 汎用の関係ファイルから語彙関係を取り込みます。
    ///
    /// 主語と各関連語の見出し語の間に、`name`の関係の辺を追加します。
    /// 関係種別は未登録であれば登録されます。
    ///
    /// # 引数
    ///
    /// * `name` - 関係名
    /// * `rdr` - `主語:ラベル:関連語...`形式の行を含むリーダー
    ///
    /// # 戻り値
    ///
    /// 追加した辺の数
    ///
    /// # エラー
    ///
    /// 未登録の綴りが含まれる場合は[`FleksjaError::NotFound`]を返し、辞書は変更されません。
    pub fn add_relationships_from_reader<R>(&mut self, name: &str, rdr: R) -> Result<usize>
    where
        R: Read,
    {
        if name.trim().is_empty() {
            return Err(FleksjaError::invalid_argument(
                "name",
                "a relationship name must not be empty",
            ));
        }
        let records = RelationRecord::read_all(rdr, &self.inner.config)?;
        let mut edges = vec![];
        for record in &records {
            let subject = self.relation_endpoint(record.subject())?;
            for related in record.related() {
                edges.push(PendingEdge {
                    name,
                    a: subject,
                    b: self.relation_endpoint(related)?,
                });
            }
        }
        // A batch without edges still registers the relationship.
        self.inner.relationships.get_or_create(name)?;
        let num_edges = self.apply_edges(edges)?;
        log::info!("Added {num_edges} '{name}' edges from {} lines", records.len());
        Ok(num_edges)
    }

    /// 汎用の関係ファイルをパスから取り込みます。
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合は[`FleksjaError::SourceUnavailable`]を返します。
    pub fn add_relationships_from_path<P>(&mut self, name: &str, path: P) -> Result<usize>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FleksjaError::source_unavailable(path, e))?;
        self.add_relationships_from_reader(name, file)
    }

    /// 比較級ファイルから語彙関係を取り込みます。
    ///
    /// 原級と比較級の間に`hr`、原級と最上級の間に`hst`の辺を追加します。
    ///
    /// # エラー
    ///
    /// フィールド数が3でない行がある場合は[`FleksjaError::InvalidFormat`]、
    /// 未登録の綴りがある場合は[`FleksjaError::NotFound`]を返します。
    /// どちらの場合も辞書は変更されません。
    pub fn add_gradation_from_reader<R>(&mut self, rdr: R) -> Result<usize>
    where
        R: Read,
    {
        let records = GradationRecord::read_all(rdr)?;
        let mut edges = Vec::with_capacity(records.len() * 2);
        for record in &records {
            let base = self.relation_endpoint(record.base())?;
            let comparative = self.relation_endpoint(record.comparative())?;
            let superlative = self.relation_endpoint(record.superlative())?;
            edges.push(PendingEdge {
                name: COMPARATIVE,
                a: base,
                b: comparative,
            });
            edges.push(PendingEdge {
                name: SUPERLATIVE,
                a: base,
                b: superlative,
            });
        }
        self.inner.relationships.get_or_create(COMPARATIVE)?;
        self.inner.relationships.get_or_create(SUPERLATIVE)?;
        let num_edges = self.apply_edges(edges)?;
        log::info!("Added {num_edges} gradation edges from {} lines", records.len());
        Ok(num_edges)
    }

    /// 比較級ファイルをパスから取り込みます。
    pub fn add_gradation_from_path<P>(&mut self, path: P) -> Result<usize>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FleksjaError::source_unavailable(path, e))?;
        self.add_gradation_from_reader(file)
    }

    /// 分詞ファイルから語彙関係を取り込みます。
    ///
    /// 動詞と各分詞の間に`imieslow`、動詞と動名詞の間に`rzeczownik`の辺を追加します。
    pub fn add_participles_from_reader<R>(&mut self, rdr: R) -> Result<usize>
    where
        R: Read,
    {
        let records = ParticipleRecord::read_all(rdr, &self.inner.config)?;
        let mut edges = vec![];
        for record in &records {
            let lexeme = self.relation_endpoint(record.lexeme())?;
            for participle in record.participles() {
                edges.push(PendingEdge {
                    name: PARTICIPLE,
                    a: lexeme,
                    b: self.relation_endpoint(participle)?,
                });
            }
            if let Some(noun) = record.noun() {
                edges.push(PendingEdge {
                    name: VERBAL_NOUN,
                    a: lexeme,
                    b: self.relation_endpoint(noun)?,
                });
            }
        }
        self.inner.relationships.get_or_create(PARTICIPLE)?;
        self.inner.relationships.get_or_create(VERBAL_NOUN)?;
        let num_edges = self.apply_edges(edges)?;
        log::info!("Added {num_edges} participle edges from {} lines", records.len());
        Ok(num_edges)
    }

    /// 分詞ファイルをパスから取り込みます。
    pub fn add_participles_from_path<P>(&mut self, path: P) -> Result<usize>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FleksjaError::source_unavailable(path, e))?;
        self.add_participles_from_reader(file)
    }

    /// 単語と指定した関係で結ばれた語彙素を返します。
    ///
    /// 各読みの見出し語(読み自体が見出し語であればその読み)を登録順に調べ、
    /// 最初に関連語彙素を持つものの先頭の関連語彙素を主な結果とします。
    /// 残りの関連語彙素は代替候補になります。
    ///
    /// # 例
    ///
    /// ```
    /// use fleksja::Dictionary;
    ///
    /// let mut dict = Dictionary::from_reader(
    ///     "duży:*CAB:\nwiększy:*CAB:\nnajwiększy:*CAB:\n".as_bytes(),
    /// )?;
    /// dict.add_gradation_from_reader("duży:większy:największy:".as_bytes())?;
    ///
    /// let lookup = dict.related_to("hst", "największy")?;
    /// assert_eq!(lookup.surface(), "duży");
    /// assert_eq!(lookup.label(), Some("*CAB"));
    /// assert!(lookup.alternates().is_empty());
    /// # Ok::<(), fleksja::errors::FleksjaError>(())
    /// ```
    ///
    /// # エラー
    ///
    /// 関係名または綴りが未登録の場合、あるいは関連語彙素がない場合は
    /// [`FleksjaError::NotFound`]を返します。
    pub fn related_to(&self, name: &str, word: &str) -> Result<Lookup> {
        let kind = self.relationship_id(name)?;
        let graph = &self.inner.graph;

        let mut anchors = vec![];
        let mut seen = HashSet::new();
        for id in self.readings(word)? {
            let anchor = graph.get_parent(id)?.unwrap_or(id);
            if seen.insert(anchor) {
                anchors.push(anchor);
            }
        }

        let mut related = vec![];
        let mut seen = HashSet::new();
        for anchor in anchors {
            for &id in graph.get_related(anchor, kind)? {
                if seen.insert(id) {
                    related.push(id);
                }
            }
        }

        let mut readings = related.into_iter().map(|id| self.reading(id));
        let primary = readings
            .next()
            .ok_or_else(|| FleksjaError::not_found("related lexeme", word))??;
        Ok(Lookup::new(primary, readings.collect::<Result<_>>()?))
    }
}
