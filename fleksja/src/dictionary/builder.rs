//! 辞書構築のためのビルダー
//!
//! このモジュールは、コーパスファイルから [`DictionaryInner`] を構築するための
//! ビルダーを提供します。
//!
//! 構築は2回の走査で行われます。
//!
//! 1. すべての綴りを出現順に索引へ登録し、出現ごとに新しい語彙素IDを割り当てます。
//! 2. 同じレコードを同じ順序で再生し、綴りごとのカーソルで1回目に割り当てたIDを
//!    順に取り出しながら、グラフのノードと辺を作成します。
//!
//! 同じ綴りの出現は出現順にIDと対応するため、同綴異義語の各出現は
//! それぞれ独立したノードになります。

use std::fs::File;
use std::path::Path;
use std::io::Read;

use hashbrown::HashMap;

use crate::corpus::{Corpus, Paradigm};
use crate::dictionary::graph::InflectionGraph;
use crate::dictionary::multisegment::MultisegmentRegistry;
use crate::dictionary::relation::RelationshipRegistry;
use crate::dictionary::string_index::StringIndexBuilder;
use crate::dictionary::{DictionaryConfig, DictionaryInner, LexemeId};
use crate::errors::{FleksjaError, Result};
use crate::utils::FromU32;

/// 2回目の走査で、綴りごとに次に使うIDを指すカーソル
struct HomonymCursor<'a> {
    positions: HashMap<&'a str, usize>,
}

impl<'a> HomonymCursor<'a> {
    fn new() -> Self {
        Self {
            positions: HashMap::new(),
        }
    }

    /// 綴りの次の出現に対応するIDを取り出します。
    fn next(&mut self, index: &StringIndexBuilder, spelling: &'a str) -> Result<LexemeId> {
        let ids = index.ids(spelling).ok_or_else(|| {
            FleksjaError::corpus_inconsistency(spelling, "the spelling was never registered")
        })?;
        let position = self.positions.entry(spelling).or_insert(0);
        let id = ids.get(*position).copied().ok_or_else(|| {
            FleksjaError::corpus_inconsistency(
                spelling,
                format!("only {} occurrences were registered", ids.len()),
            )
        })?;
        *position += 1;
        Ok(LexemeId::new(id))
    }
}

/// コーパスから [`DictionaryInner`] を構築するビルダー
///
/// # 例
///
/// ```
/// use fleksja::Dictionary;
/// use fleksja::dictionary::{DictionaryBuilder, DictionaryConfig};
///
/// let config = DictionaryConfig::default().case_block_len(2)?;
/// let dict = DictionaryBuilder::new()
///     .config(config)
///     .from_readers(["dobry:CA:dobry:dobrego:dobra:dobrej:".as_bytes()])?;
/// let dict = Dictionary::from_inner(dict);
///
/// assert_eq!(dict.parent_of("dobrej")?.surface(), "dobry");
/// # Ok::<(), fleksja::errors::FleksjaError>(())
/// ```
#[derive(Default)]
pub struct DictionaryBuilder {
    config: DictionaryConfig,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定を指定します。
    pub fn config(mut self, config: DictionaryConfig) -> Self {
        self.config = config;
        self
    }

    /// 読み込み済みのコーパスから辞書を構築します。
    ///
    /// # 引数
    ///
    /// * `corpora` - コーパスのスライス。IDはコーパスをまたいで連続して割り当てられます。
    ///
    /// # エラー
    ///
    /// 2回の走査が一致しない場合は[`FleksjaError::CorpusInconsistency`]を返します。
    pub fn build(self, corpora: &[Corpus]) -> Result<DictionaryInner> {
        let paradigms = || corpora.iter().flat_map(|c| c.iter());

        // Pass 1: every occurrence receives a fresh id.
        let mut index = StringIndexBuilder::new();
        let mut num_paradigms = 0;
        for paradigm in paradigms() {
            index.register(paradigm.head())?;
            for form in paradigm.present_forms() {
                index.register(form)?;
            }
            num_paradigms += 1;
        }
        log::debug!(
            "Registered {} occurrences from {num_paradigms} paradigms",
            index.num_ids()
        );

        // Pass 2: replay the records and wire the graph.
        let mut graph = InflectionGraph::with_capacity(usize::from_u32(index.num_ids()));
        let mut cursor = HomonymCursor::new();
        let mut num_groups = 0;
        for paradigm in paradigms() {
            num_groups += self.link_paradigm(&mut graph, &index, &mut cursor, paradigm)?;
        }
        log::debug!(
            "Linked {} nodes and {num_groups} gender groups",
            graph.num_nodes()
        );

        let index = index.build()?;
        log::info!(
            "Built a dictionary of {} lexemes with {} distinct spellings",
            index.num_ids(),
            index.num_spellings()
        );

        Ok(DictionaryInner {
            config: self.config,
            index,
            graph,
            relationships: RelationshipRegistry::new(),
            multisegments: MultisegmentRegistry::new(),
        })
    }

    /// 1つのパラダイムのノードと辺を作成し、作成した性・格の組の数を返します。
    fn link_paradigm<'a>(
        &self,
        graph: &mut InflectionGraph,
        index: &StringIndexBuilder,
        cursor: &mut HomonymCursor<'a>,
        paradigm: &'a Paradigm,
    ) -> Result<usize> {
        let head = cursor.next(index, paradigm.head())?;
        graph.add_node(head, Some(paradigm.label()))?;

        let gendered = self.config.is_gender_label(paradigm.label());
        let block_len = self.config.block_len();

        // (block, slot, id) of every present form.
        let mut forms = Vec::with_capacity(paradigm.forms().len());
        for (position, form) in paradigm.forms().iter().enumerate() {
            let Some(form) = form else {
                continue;
            };
            let id = cursor.next(index, form)?;
            if gendered {
                let block = position / block_len;
                let slot = u8::try_from(position % block_len)?;
                graph.add_gender_node(id, None, slot, u8::try_from(block)?)?;
                forms.push((block, id));
            } else {
                graph.add_node(id, None)?;
            }
            graph.add_edge(head, id)?;
        }

        // The first present form of each block represents the block.
        let mut num_groups = 0;
        let mut representative: Option<(usize, LexemeId)> = None;
        for (block, id) in forms {
            match representative {
                Some((b, rep)) if b == block => graph.add_gender_edge(rep, id)?,
                _ => {
                    representative = Some((block, id));
                    num_groups += 1;
                }
            }
        }
        Ok(num_groups)
    }

    /// リーダーからコーパスを読み込み、辞書を構築します。
    ///
    /// # 引数
    ///
    /// * `rdrs` - コーパスファイルのリーダー。指定順に読み込まれます。
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合に[`FleksjaError`]を返します。
    pub fn from_readers<I, R>(self, rdrs: I) -> Result<DictionaryInner>
    where
        I: IntoIterator<Item = R>,
        R: Read,
    {
        let corpora = rdrs
            .into_iter()
            .map(|rdr| Corpus::from_reader(rdr, &self.config))
            .collect::<Result<Vec<_>>>()?;
        self.build(&corpora)
    }

    /// パスからコーパスを読み込み、辞書を構築します。
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合は[`FleksjaError::SourceUnavailable`]を返します。
    pub fn from_paths<I, P>(self, paths: I) -> Result<DictionaryInner>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let files = paths
            .into_iter()
            .map(|path| {
                let path = path.as_ref();
                File::open(path).map_err(|e| FleksjaError::source_unavailable(path, e))
            })
            .collect::<Result<Vec<_>>>()?;
        self.from_readers(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(corpus: &str) -> DictionaryInner {
        DictionaryBuilder::new()
            .from_readers([corpus.as_bytes()])
            .unwrap()
    }

    #[test]
    fn test_homonym_occurrences_get_distinct_nodes() {
        let dict = build("Gdańsk:AA:Gdańsk:Gdańska:\nGdański:CA:Gdański:Gdańskiego:\n");
        let ids = dict.index.lookup_all("Gdańsk");
        assert_eq!(ids, vec![LexemeId::new(0), LexemeId::new(1)]);
        assert!(dict.graph.is_head(ids[0]).unwrap());
        assert_eq!(dict.graph.get_parent(ids[1]).unwrap(), Some(ids[0]));
        assert_eq!(dict.graph.get_label(ids[0]).unwrap(), Some("AA"));
        assert_eq!(dict.graph.get_label(ids[1]).unwrap(), None);
    }

    #[test]
    fn test_children_follow_corpus_order() {
        let dict = build("pies:AB:pies:psa:psu:");
        let head = LexemeId::new(0);
        assert_eq!(
            dict.graph.get_children(head).unwrap(),
            &[LexemeId::new(1), LexemeId::new(2), LexemeId::new(3)]
        );
    }

    #[test]
    fn test_gender_blocks() {
        let config = DictionaryConfig::default().case_block_len(3).unwrap();
        let dict = DictionaryBuilder::new()
            .config(config)
            .from_readers(["mały:CA:mały:małego:małemu:mała:małej:małej:".as_bytes()])
            .unwrap();
        let g = &dict.graph;
        let id = LexemeId::new;

        assert!(!g.has_gender(id(0)).unwrap());
        assert_eq!(g.get_gender_children(id(1)).unwrap(), &[id(2), id(3)]);
        assert_eq!(g.get_gender_children(id(4)).unwrap(), &[id(5), id(6)]);
        assert_eq!(g.get_gender_parent(id(6)).unwrap(), Some(id(4)));
        assert_eq!(g.get_gender(id(5)).unwrap(), Some(1));
        assert_eq!(g.get_case_slot(id(6)).unwrap(), Some(2));
        // Every form still hangs under the head.
        assert_eq!(g.get_children(id(0)).unwrap().len(), 6);
    }

    #[test]
    fn test_empty_representative_slot() {
        let config = DictionaryConfig::default().case_block_len(3).unwrap();
        let dict = DictionaryBuilder::new()
            .config(config)
            .from_readers(["mały:CA:##:małego:małemu:".as_bytes()])
            .unwrap();
        let g = &dict.graph;
        let id = LexemeId::new;
        assert_eq!(g.get_gender_parent(id(2)).unwrap(), Some(id(1)));
        assert_eq!(g.get_case_slot(id(1)).unwrap(), Some(1));
    }

    #[test]
    fn test_non_gender_label() {
        let dict = build("Apokalipsa:AD:Apokalipsa:Apokalipsy:");
        assert!(!dict.graph.has_gender(LexemeId::new(1)).unwrap());
        assert_eq!(dict.graph.get_parent(LexemeId::new(2)).unwrap(), Some(LexemeId::new(0)));
    }

    #[test]
    fn test_ids_continue_across_files() {
        let dict = DictionaryBuilder::new()
            .from_readers(["pies:AB:psa:".as_bytes(), "kot:AB:kota:".as_bytes()])
            .unwrap();
        assert_eq!(dict.index.lookup_all("kot"), vec![LexemeId::new(2)]);
        assert_eq!(dict.index.num_ids(), 4);
    }

    #[test]
    fn test_missing_corpus_file() {
        let err = DictionaryBuilder::new()
            .from_paths(["/nonexistent/corpus.txt"])
            .err()
            .unwrap();
        assert!(matches!(err, FleksjaError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_cursor_reports_unregistered_spelling() {
        let mut index = StringIndexBuilder::new();
        index.register("pies").unwrap();
        let mut cursor = HomonymCursor::new();
        assert_eq!(cursor.next(&index, "pies").unwrap(), LexemeId::new(0));
        assert!(matches!(
            cursor.next(&index, "pies"),
            Err(FleksjaError::CorpusInconsistency(_))
        ));
        assert!(matches!(
            cursor.next(&index, "kot"),
            Err(FleksjaError::CorpusInconsistency(_))
        ));
    }
}
