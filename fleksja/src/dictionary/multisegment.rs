//! 多分節表現
//!
//! このモジュールは、複数の語からなる固定表現の登録簿と、その解決を提供します。
//!
//! 表現は構成語の代表IDの組をキーとして登録されます。入れ替え可能な表現は、
//! 指定された2つの構成語を入れ替えたキーでも登録され、両方のキーが同じ付加情報を共有します。
//! 同じキーが複数回登録された場合は最初の登録が有効です。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use hashbrown::HashSet;
use rkyv::{Archive, Deserialize, Serialize};

use crate::corpus::MultisegmentRecord;
use crate::dictionary::{ComponentPolicy, Dictionary, LexemeId};
use crate::errors::{FleksjaError, Result};
use crate::lookup::MultisegmentMatch;
use crate::utils::FromU32;

/// 入れ替え可能な構成語の位置の組(0始まり)
#[derive(Clone, Copy, Debug, Eq, PartialEq, Archive, Serialize, Deserialize)]
pub struct SlotPair {
    first: u8,
    second: u8,
}

impl SlotPair {
    pub fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    fn swap<T>(self, items: &mut [T]) {
        items.swap(usize::from(self.first), usize::from(self.second));
    }
}

/// 表現の付加情報
#[derive(Clone, Debug, Archive, Serialize, Deserialize)]
pub struct MultisegmentInfo {
    phrase: String,
    stable: Vec<bool>,
    interchangeable: Option<SlotPair>,
}

impl MultisegmentInfo {
    pub fn new(phrase: &str, stable: Vec<bool>, interchangeable: Option<SlotPair>) -> Self {
        Self {
            phrase: phrase.to_string(),
            stable,
            interchangeable,
        }
    }

    /// 登録時の表現を返します。
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// 構成語ごとの安定性を返します。
    pub fn stable(&self) -> &[bool] {
        &self.stable
    }

    /// 入れ替え可能な構成語の組を返します。
    pub fn interchangeable(&self) -> Option<SlotPair> {
        self.interchangeable
    }
}

#[derive(Archive, Serialize, Deserialize)]
struct MultisegmentEntry {
    components: Vec<LexemeId>,
    info_idx: u32,
    swapped: bool,
}

/// 多分節表現の登録簿
///
/// キーは構成語のIDの列として辞書順に整列して保持され、二分探索で検索されます。
#[derive(Default, Archive, Serialize, Deserialize)]
pub struct MultisegmentRegistry {
    entries: Vec<MultisegmentEntry>,
    infos: Vec<MultisegmentInfo>,
}

impl MultisegmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn search(&self, components: &[LexemeId]) -> std::result::Result<usize, usize> {
        self.entries
            .binary_search_by(|e| e.components.as_slice().cmp(components))
    }

    /// 表現を登録し、新しく登録したキーの数を返します。
    ///
    /// # エラー
    ///
    /// 構成語が空の場合、安定性の数が構成語の数と一致しない場合、
    /// または入れ替えの位置が範囲外の場合は[`FleksjaError::InvalidArgument`]を返します。
    pub fn register(&mut self, components: Vec<LexemeId>, info: MultisegmentInfo) -> Result<usize> {
        if components.is_empty() {
            return Err(FleksjaError::invalid_argument(
                "components",
                "a multisegment needs at least one component",
            ));
        }
        if info.stable.len() != components.len() {
            return Err(FleksjaError::invalid_argument(
                "info",
                "stability flags must match the components",
            ));
        }
        let mut keys = vec![(components, false)];
        if let Some(pair) = info.interchangeable {
            let len = keys[0].0.len();
            if pair.first == pair.second
                || usize::from(pair.first) >= len
                || usize::from(pair.second) >= len
            {
                return Err(FleksjaError::invalid_argument(
                    "info",
                    "interchangeable slots are out of range",
                ));
            }
            let mut swapped = keys[0].0.clone();
            pair.swap(&mut swapped);
            keys.push((swapped, true));
        }

        // The first registration of a phrase wins, including its swapped key.
        if self.search(&keys[0].0).is_ok() {
            return Ok(0);
        }
        let info_idx = u32::try_from(self.infos.len())?;
        let mut num_keys = 0;
        for (components, swapped) in keys {
            if let Err(pos) = self.search(&components) {
                self.entries.insert(
                    pos,
                    MultisegmentEntry {
                        components,
                        info_idx,
                        swapped,
                    },
                );
                num_keys += 1;
            }
        }
        if num_keys != 0 {
            self.infos.push(info);
        }
        Ok(num_keys)
    }

    /// キーが登録されているかどうかを返します。
    pub fn is_registered(&self, components: &[LexemeId]) -> bool {
        self.search(components).is_ok()
    }

    /// キーに対応する付加情報と、キーが入れ替えられたものかどうかを返します。
    pub fn lookup(&self, components: &[LexemeId]) -> Option<(&MultisegmentInfo, bool)> {
        let entry = &self.entries[self.search(components).ok()?];
        let info = self.infos.get(usize::from_u32(entry.info_idx))?;
        Some((info, entry.swapped))
    }

    /// キーと同じ付加情報を共有するすべてのキーを、元の順序のものを先にして返します。
    fn siblings(&self, components: &[LexemeId]) -> Vec<(&[LexemeId], bool)> {
        let Ok(pos) = self.search(components) else {
            return vec![];
        };
        let info_idx = self.entries[pos].info_idx;
        let mut keys: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.info_idx == info_idx)
            .map(|e| (e.components.as_slice(), e.swapped))
            .collect();
        keys.sort_by_key(|&(_, swapped)| swapped);
        keys
    }

    /// 登録されたキーの数を返します。
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 構成語の候補の直積を、最後の語が最も速く変わる順に走査するカウンター
struct Odometer<'a> {
    candidates: &'a [Vec<LexemeId>],
    positions: Vec<usize>,
    done: bool,
}

impl<'a> Odometer<'a> {
    fn new(candidates: &'a [Vec<LexemeId>]) -> Self {
        Self {
            candidates,
            positions: vec![0; candidates.len()],
            done: candidates.is_empty() || candidates.iter().any(Vec::is_empty),
        }
    }
}

impl Iterator for Odometer<'_> {
    type Item = Vec<LexemeId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self
            .positions
            .iter()
            .zip(self.candidates)
            .map(|(&p, c)| c[p])
            .collect();
        self.done = true;
        for i in (0..self.positions.len()).rev() {
            self.positions[i] += 1;
            if self.positions[i] < self.candidates[i].len() {
                self.done = false;
                break;
            }
            self.positions[i] = 0;
        }
        Some(current)
    }
}

impl Dictionary {
    /// 多分節表現の構成語として登録するIDを選びます。
    fn component(&self, word: &str) -> Result<LexemeId> {
        let graph = &self.inner.graph;
        let readings = self.readings(word)?;
        if self.inner.config.policy() == ComponentPolicy::GroupRepresentative {
            for &id in &readings {
                if graph.has_gender(id)? && graph.is_anchor(id)? {
                    return Ok(id);
                }
            }
            for &id in &readings {
                if graph.is_anchor(id)? {
                    return Ok(id);
                }
            }
            log::warn!("'{word}' has no canonical reading; using the head of its first reading");
        }
        graph.anchor(readings[0])
    }

    /// 多分節表現ファイルから表現を取り込みます。
    ///
    /// 各構成語は設定の[`ComponentPolicy`]に従って代表IDに置き換えられます。
    ///
    /// # 戻り値
    ///
    /// 新しく登録したキーの数
    ///
    /// # エラー
    ///
    /// 未登録の綴りが含まれる場合は[`FleksjaError::NotFound`]を返し、辞書は変更されません。
    pub fn add_multisegments_from_reader<R>(&mut self, rdr: R) -> Result<usize>
    where
        R: Read,
    {
        let records = MultisegmentRecord::read_all(rdr, &self.inner.config)?;
        let mut pending = Vec::with_capacity(records.len());
        for record in &records {
            let components = record
                .words()
                .iter()
                .map(|w| self.component(w))
                .collect::<Result<Vec<_>>>()?;
            let info = MultisegmentInfo::new(
                record.phrase(),
                record.stable().to_vec(),
                record
                    .interchangeable()
                    .map(|(first, second)| SlotPair::new(first, second)),
            );
            pending.push((components, info));
        }
        let mut num_keys = 0;
        for (components, info) in pending {
            num_keys += self.inner.multisegments.register(components, info)?;
        }
        log::info!(
            "Registered {num_keys} multisegment keys from {} lines",
            records.len()
        );
        Ok(num_keys)
    }

    /// 多分節表現ファイルをパスから取り込みます。
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合は[`FleksjaError::SourceUnavailable`]を返します。
    pub fn add_multisegments_from_path<P>(&mut self, path: P) -> Result<usize>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FleksjaError::source_unavailable(path, e))?;
        self.add_multisegments_from_reader(file)
    }

    /// 語の列に一致する登録済みのキーを探します。
    fn match_components<S>(&self, words: &[S]) -> Result<Vec<LexemeId>>
    where
        S: AsRef<str>,
    {
        let graph = &self.inner.graph;
        let mut candidates = vec![];
        for word in words.iter().map(|w| w.as_ref()) {
            if word.contains('*') {
                continue;
            }
            let mut anchors = vec![];
            let mut seen = HashSet::new();
            for id in self.readings(word)? {
                let anchor = graph.anchor(id)?;
                if seen.insert(anchor) {
                    anchors.push(anchor);
                }
            }
            candidates.push(anchors);
        }
        Odometer::new(&candidates)
            .find(|key| self.inner.multisegments.is_registered(key))
            .ok_or_else(|| {
                let phrase: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
                FleksjaError::not_found("multisegment", phrase.join(" "))
            })
    }

    fn join_surfaces<I>(&self, parts: I) -> String
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut phrase = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i != 0 {
                phrase.push(self.inner.config.separator());
            }
            phrase.push_str(part.as_ref());
        }
        phrase
    }

    /// 語の列を多分節表現の基本形に解決します。
    ///
    /// 各語の読みの代表を候補とし、語ごとの候補の直積を登録順に調べて
    /// 最初に登録済みの組み合わせを返します。`*`を含む語は読み飛ばされます。
    /// 入れ替えたキーで一致した場合も、結果は登録時の語順で返されます。
    ///
    /// # 例
    ///
    /// ```
    /// use fleksja::Dictionary;
    ///
    /// let corpus = "\
    /// zły:CA:zły:złego:złemu:złego:złym:złym:zły:zła:złej:złej:złą:złą:złej:zła:
    /// Apokalipsa:AD:Apokalipsa:Apokalipsy:Apokalipsie:Apokalipsę:Apokalipsą:Apokalipsie:Apokalipso:
    /// ";
    /// let mut dict = Dictionary::from_reader(corpus.as_bytes())?;
    /// dict.add_multisegments_from_reader("\"zła Apokalipsa\";**;;;".as_bytes())?;
    ///
    /// let phrase = dict.resolve_multisegment_parent(&["złej", "Apokalipsy"])?;
    /// assert_eq!(phrase.phrase(), "zła Apokalipsa");
    /// # Ok::<(), fleksja::errors::FleksjaError>(())
    /// ```
    ///
    /// # エラー
    ///
    /// 未登録の綴りを含む場合、または一致する組み合わせがない場合は
    /// [`FleksjaError::NotFound`]を返します。
    pub fn resolve_multisegment_parent<S>(&self, words: &[S]) -> Result<MultisegmentMatch>
    where
        S: AsRef<str>,
    {
        let key = self.match_components(words)?;
        let registry = &self.inner.multisegments;
        let (info, swapped) = registry
            .lookup(&key)
            .ok_or_else(|| FleksjaError::invalid_state("multisegment key vanished", ""))?;
        let mut canonical = key;
        if swapped && let Some(pair) = info.interchangeable() {
            pair.swap(&mut canonical);
        }
        let surfaces = canonical
            .iter()
            .map(|&id| self.inner.index.restore(id))
            .collect::<Result<Vec<_>>>()?;
        Ok(MultisegmentMatch::new(
            self.join_surfaces(surfaces),
            info.phrase(),
            info.stable(),
            info.interchangeable().map(|p| (p.first + 1, p.second + 1)),
        ))
    }

    /// 構成語の`case`番目の屈折形を返します。
    fn inflect_component(&self, id: LexemeId, stable: bool, case: usize) -> Result<&str> {
        let graph = &self.inner.graph;
        let index = &self.inner.index;
        if stable {
            return index.restore(id);
        }
        if graph.has_gender(id)? {
            for member in graph.gender_group(id)? {
                if graph.get_case_slot(member)?.map(usize::from) == Some(case) {
                    return index.restore(member);
                }
            }
            return index.restore(id);
        }
        match graph.get_children(id)?.get(case) {
            Some(&child) => index.restore(child),
            None => index.restore(id),
        }
    }

    /// 語の列に一致する多分節表現のすべての屈折形を返します。
    ///
    /// 一致した表現と付加情報を共有するキー(元の語順と入れ替えた語順)ごとに、
    /// まず登録された構成語そのままの表現を返し、続いて格の順に次の規則で表現を組み立てます。
    ///
    /// - 安定な構成語は綴りをそのまま使います。
    /// - 不安定な性・格の組の代表は、組の中の同じ格の語形を使います。
    /// - 不安定な見出し語は、同じ位置の子を使います。子がなければ自身の綴りを使います。
    ///
    /// 重複する表現は生成順に取り除かれます。
    ///
    /// # エラー
    ///
    /// [`Dictionary::resolve_multisegment_parent`]と同じ条件で
    /// [`FleksjaError::NotFound`]を返します。
    pub fn resolve_multisegment_children<S>(&self, words: &[S]) -> Result<Vec<String>>
    where
        S: AsRef<str>,
    {
        let key = self.match_components(words)?;
        let registry = &self.inner.multisegments;
        let (info, _) = registry
            .lookup(&key)
            .ok_or_else(|| FleksjaError::invalid_state("multisegment key vanished", ""))?;

        let mut phrases = vec![];
        let mut seen = HashSet::new();
        for (components, swapped) in registry.siblings(&key) {
            let mut stable = info.stable().to_vec();
            if swapped && let Some(pair) = info.interchangeable() {
                pair.swap(&mut stable);
            }
            let own = components
                .iter()
                .map(|&id| self.inner.index.restore(id))
                .collect::<Result<Vec<_>>>()?;
            let phrase = self.join_surfaces(own);
            if seen.insert(phrase.clone()) {
                phrases.push(phrase);
            }
            for case in 0..self.inner.config.block_len() {
                let parts = components
                    .iter()
                    .zip(&stable)
                    .map(|(&id, &s)| self.inflect_component(id, s, case))
                    .collect::<Result<Vec<_>>>()?;
                let phrase = self.join_surfaces(parts);
                if seen.insert(phrase.clone()) {
                    phrases.push(phrase);
                }
            }
        }
        Ok(phrases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: u32) -> LexemeId {
        LexemeId::new(i)
    }

    fn info(n: usize, inter: Option<(u8, u8)>) -> MultisegmentInfo {
        MultisegmentInfo::new("x", vec![false; n], inter.map(|(a, b)| SlotPair::new(a, b)))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = MultisegmentRegistry::new();
        assert_eq!(registry.register(vec![id(3), id(1)], info(2, None)).unwrap(), 1);
        assert!(registry.is_registered(&[id(3), id(1)]));
        assert!(!registry.is_registered(&[id(1), id(3)]));
        assert!(!registry.is_registered(&[id(3)]));
        assert!(registry.lookup(&[id(3), id(1)]).is_some());
    }

    #[test]
    fn test_interchangeable_shares_info() {
        let mut registry = MultisegmentRegistry::new();
        assert_eq!(
            registry
                .register(vec![id(1), id(2), id(3)], info(3, Some((0, 2))))
                .unwrap(),
            2
        );
        let (a, swapped_a) = registry.lookup(&[id(1), id(2), id(3)]).unwrap();
        let (b, swapped_b) = registry.lookup(&[id(3), id(2), id(1)]).unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(!swapped_a);
        assert!(swapped_b);
        assert_eq!(registry.siblings(&[id(3), id(2), id(1)]).len(), 2);
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = MultisegmentRegistry::new();
        registry
            .register(vec![id(1), id(2)], MultisegmentInfo::new("a", vec![true, false], None))
            .unwrap();
        assert_eq!(
            registry
                .register(vec![id(1), id(2)], MultisegmentInfo::new("b", vec![false, false], None))
                .unwrap(),
            0
        );
        assert_eq!(registry.lookup(&[id(1), id(2)]).unwrap().0.phrase(), "a");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_existing_phrase_keeps_its_swapped_key() {
        let mut registry = MultisegmentRegistry::new();
        registry.register(vec![id(1), id(2)], info(2, None)).unwrap();
        assert_eq!(
            registry
                .register(vec![id(1), id(2)], info(2, Some((0, 1))))
                .unwrap(),
            0
        );
        assert!(!registry.is_registered(&[id(2), id(1)]));
        assert_eq!(registry.siblings(&[id(1), id(2)]).len(), 1);
    }

    #[test]
    fn test_invalid_registration() {
        let mut registry = MultisegmentRegistry::new();
        assert!(registry.register(vec![], info(0, None)).is_err());
        assert!(registry.register(vec![id(1)], info(2, None)).is_err());
        assert!(registry.register(vec![id(1), id(2)], info(2, Some((0, 2)))).is_err());
        assert!(registry.register(vec![id(1), id(2)], info(2, Some((1, 1)))).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_odometer_order() {
        let candidates = vec![vec![id(1), id(2)], vec![id(5)], vec![id(7), id(8)]];
        let keys: Vec<_> = Odometer::new(&candidates).collect();
        assert_eq!(
            keys,
            vec![
                vec![id(1), id(5), id(7)],
                vec![id(1), id(5), id(8)],
                vec![id(2), id(5), id(7)],
                vec![id(2), id(5), id(8)],
            ]
        );
        assert_eq!(Odometer::new(&[vec![id(1)], vec![]]).count(), 0);
        assert_eq!(Odometer::new(&[]).count(), 0);
    }

    const CORPUS: &str = "\
zły:CA:zły:złego:złemu:złego:złym:złym:zły:zła:złej:złej:złą:złą:złej:zła:złe:złego:złemu:złe:złym:złym:złe:
Apokalipsa:AD:Apokalipsa:Apokalipsy:Apokalipsie:Apokalipsę:Apokalipsą:Apokalipsie:Apokalipso:
Morze:AF:Morze:Morza:Morzu:Morze:Morzem:Morzu:Morze:
Bałtycki:CA:Bałtycki:Bałtyckiego:Bałtyckiemu:Bałtyckiego:Bałtyckim:Bałtyckim:Bałtycki:Bałtycka:Bałtyckiej:Bałtyckiej:Bałtycką:Bałtycką:Bałtyckiej:Bałtycka:Bałtyckie:Bałtyckiego:Bałtyckiemu:Bałtyckie:Bałtyckim:Bałtyckim:Bałtyckie:
";

    fn dictionary() -> Dictionary {
        let mut dict = Dictionary::from_reader(CORPUS.as_bytes()).unwrap();
        let data = "\
\"zła Apokalipsa\";**;;;
\"Morze Bałtyckie\";**;;12;
";
        assert_eq!(dict.add_multisegments_from_reader(data.as_bytes()).unwrap(), 3);
        dict
    }

    #[test]
    fn test_resolve_parent() {
        let dict = dictionary();
        let phrase = dict
            .resolve_multisegment_parent(&["złej", "Apokalipsy"])
            .unwrap();
        assert_eq!(phrase.phrase(), "zła Apokalipsa");
        assert_eq!(phrase.source(), "zła Apokalipsa");
        assert_eq!(phrase.stable(), [false, false]);

        let phrase = dict
            .resolve_multisegment_parent(&["zła", "Apokalipsa"])
            .unwrap();
        assert_eq!(phrase.phrase(), "zła Apokalipsa");
    }

    #[test]
    fn test_resolve_parent_swapped() {
        let dict = dictionary();
        let phrase = dict
            .resolve_multisegment_parent(&["Bałtyckiego", "Morza"])
            .unwrap();
        assert_eq!(phrase.phrase(), "Morze Bałtyckie");
        assert_eq!(phrase.interchangeable(), Some((1, 2)));
    }

    #[test]
    fn test_resolve_parent_skips_wildcards() {
        let dict = dictionary();
        let phrase = dict
            .resolve_multisegment_parent(&["złej", "*", "Apokalipsy"])
            .unwrap();
        assert_eq!(phrase.phrase(), "zła Apokalipsa");
    }

    #[test]
    fn test_resolve_parent_not_found() {
        let dict = dictionary();
        assert!(
            dict.resolve_multisegment_parent(&["Apokalipsy", "złej"])
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            dict.resolve_multisegment_parent(&["zły", "kot"])
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            dict.resolve_multisegment_parent(&["zły", "Morze"])
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_resolve_children() {
        let dict = dictionary();
        let phrases = dict
            .resolve_multisegment_children(&["złą", "Apokalipsą"])
            .unwrap();
        assert_eq!(
            phrases,
            [
                "zła Apokalipsa",
                "złej Apokalipsy",
                "złej Apokalipsie",
                "złą Apokalipsę",
                "złą Apokalipsą",
                "zła Apokalipso",
            ]
        );
    }

    #[test]
    fn test_resolve_children_stable_component() {
        let mut dict = Dictionary::from_reader(CORPUS.as_bytes()).unwrap();
        dict.add_multisegments_from_reader("\"Apokalipsa zła\";-*;;;".as_bytes())
            .unwrap();
        let phrases = dict
            .resolve_multisegment_children(&["Apokalipsa", "złej"])
            .unwrap();
        assert_eq!(
            phrases,
            ["Apokalipsa zła", "Apokalipsa złej", "Apokalipsa złą"]
        );
    }

    #[test]
    fn test_resolve_children_includes_swapped_order() {
        let dict = dictionary();
        let phrases = dict
            .resolve_multisegment_children(&["Morze", "Bałtyckie"])
            .unwrap();
        assert_eq!(phrases[0], "Morze Bałtyckie");
        assert!(phrases.contains(&"Morza Bałtyckiego".to_string()));
        assert!(phrases.contains(&"Bałtyckie Morze".to_string()));
        assert_eq!(phrases.len(), 10);
    }

    /// 見出し語の最初の子が見出し語と異なる場合も登録した表現が含まれることのテスト
    #[test]
    fn test_resolve_children_starts_with_registered_phrase() {
        let corpus = format!(
            "{CORPUS}Gdańsk:AA:Gdański:Gdańska:Gdańskowi:Gdańsk:Gdańskiem:Gdańsku:Gdańsku:\n"
        );
        let mut dict = Dictionary::from_reader(corpus.as_bytes()).unwrap();
        dict.add_multisegments_from_reader("\"Gdańsk Apokalipsa\";**;;;".as_bytes())
            .unwrap();
        let phrases = dict
            .resolve_multisegment_children(&["Gdańsk", "Apokalipsa"])
            .unwrap();
        assert_eq!(phrases[0], "Gdańsk Apokalipsa");
        assert_eq!(phrases[1], "Gdański Apokalipsa");
        assert!(phrases.contains(&"Gdańska Apokalipsy".to_string()));
    }

    #[test]
    fn test_unknown_component_is_atomic() {
        let mut dict = Dictionary::from_reader(CORPUS.as_bytes()).unwrap();
        let data = "\"zła Apokalipsa\";**;;;\n\"dobra rada\";**;;;\n";
        assert!(
            dict.add_multisegments_from_reader(data.as_bytes())
                .unwrap_err()
                .is_not_found()
        );
        assert!(dict.resolve_multisegment_parent(&["zła", "Apokalipsa"]).is_err());
    }
}
