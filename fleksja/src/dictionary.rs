//! 屈折辞書モジュール。
//!
//! このモジュールは、屈折辞書のデータの構築、読み込み、問い合わせを行います。
//! 主な機能として以下を提供します:
//!
//! - コーパスからの2回走査による辞書の構築
//! - 同綴異義語を区別する綴りの索引と、屈折グラフの走査による問い合わせ
//! - 構築後の語彙関係と多分節表現の取り込み
//! - `rkyv`形式のスナップショットの書き込みと読み込み
//!
//! # 辞書の読み込み方法
//!
//! 辞書は複数の方法で読み込むことができます:
//!
//! - [`Dictionary::from_path`]: ファイルパスから辞書を読み込む(推奨)
//! - [`Dictionary::read`]: リーダーから辞書を読み込む
//! - [`Dictionary::from_zstd`]: Zstandard圧縮辞書を読み込む
//!
//! # 辞書のビルド
//!
//! [`DictionaryBuilder`]を使用して、コーパスファイルから辞書を構築できます。
pub mod builder;
pub mod config;
pub mod graph;
pub mod lexeme_id;
pub mod multisegment;
pub mod relation;
pub mod string_index;

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use hashbrown::HashSet;
use memmap2::Mmap;
use rkyv::rancor::Error;
use rkyv::util::AlignedVec;
use rkyv::{
    Archive, Deserialize, Serialize, access, api::serialize_using, ser::Serializer,
    ser::allocator::Arena, ser::sharing::Share, ser::writer::IoWriter, util::with_arena,
};

use crate::errors::{FleksjaError, Result};
use crate::lookup::{Lookup, Reading};

pub use crate::dictionary::builder::DictionaryBuilder;
pub use crate::dictionary::config::{ComponentPolicy, DictionaryConfig};
pub use crate::dictionary::graph::{Case, InflectionGraph};
pub use crate::dictionary::lexeme_id::LexemeId;
pub use crate::dictionary::multisegment::{MultisegmentInfo, MultisegmentRegistry, SlotPair};
pub use crate::dictionary::relation::{RelationshipId, RelationshipRegistry};
pub use crate::dictionary::string_index::{StringIndex, StringIndexBuilder};

/// fleksjaの辞書を識別するマジックバイト。
///
/// この定数の"0.1"というバージョンはスナップショットの形式のバージョンを示しており、
/// クレートのセマンティックバージョンからは切り離されています。
pub const MODEL_MAGIC: &[u8] = b"FleksjaDictionary 0.1\n";

const MODEL_MAGIC_LEN: usize = MODEL_MAGIC.len();
const RKYV_ALIGNMENT: usize = 16;
const PADDING_LEN: usize = (RKYV_ALIGNMENT - (MODEL_MAGIC_LEN % RKYV_ALIGNMENT)) % RKYV_ALIGNMENT;
const DATA_START: usize = MODEL_MAGIC_LEN + PADDING_LEN;

/// 先頭のマジックナンバーを読み込んで検証します。
///
/// マジックナンバーより短い入力も、一致しない入力として扱います。
fn check_magic<R: Read>(rdr: &mut R, arg: &'static str) -> Result<()> {
    let mut magic = [0; MODEL_MAGIC_LEN];
    match rdr.read_exact(&mut magic) {
        Ok(()) if magic == MODEL_MAGIC => Ok(()),
        Ok(()) => Err(FleksjaError::invalid_argument(
            arg,
            "The magic number of the input model mismatches.",
        )),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(FleksjaError::invalid_argument(
            arg,
            "The input is shorter than the magic number.",
        )),
        Err(e) => Err(e.into()),
    }
}

/// [`Dictionary`]の内部データ。
///
/// 設定、綴りの索引、屈折グラフ、関係種別、多分節表現のすべてを含みます。
/// スナップショットにはこの構造体全体が保存されます。
#[derive(Archive, Serialize, Deserialize)]
pub struct DictionaryInner {
    pub(crate) config: DictionaryConfig,
    pub(crate) index: StringIndex,
    pub(crate) graph: InflectionGraph,
    pub(crate) relationships: RelationshipRegistry,
    pub(crate) multisegments: MultisegmentRegistry,
}

impl DictionaryInner {
    /// 辞書データを`rkyv`フォーマットを使用してライターにシリアライズします。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - 基礎となる`writer`への書き込みに失敗した場合(例: I/Oエラー)。
    /// - `rkyv`シリアライゼーションプロセスでエラーが発生した場合。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        wtr.write_all(MODEL_MAGIC)?;

        let padding_bytes = vec![0xFF; PADDING_LEN];
        wtr.write_all(&padding_bytes)?;

        with_arena(|arena: &mut Arena| {
            let writer = IoWriter::new(&mut wtr);
            let mut serializer = Serializer::new(writer, arena.acquire(), Share::new());
            serialize_using::<_, Error>(self, &mut serializer)
        })
        .map_err(|e| FleksjaError::invalid_state("rkyv serialization failed", e.to_string()))?;

        Ok(())
    }

    /// アライメント済みのアーカイブを検証し、所有データに展開します。
    fn from_archive(bytes: &[u8]) -> Result<Self> {
        let archived = access::<ArchivedDictionaryInner, Error>(bytes).map_err(|e| {
            FleksjaError::invalid_state(
                "rkyv validation failed. The dictionary file may be corrupted or incompatible.",
                e.to_string(),
            )
        })?;
        Ok(rkyv::deserialize::<Self, Error>(archived)?)
    }
}

/// 屈折辞書。
///
/// 構築直後、またはスナップショットから読み込んだ辞書です。
/// 問い合わせは`&self`のみを必要とし、構築後の取り込み(関係と多分節表現)は
/// `&mut self`を必要とします。取り込みと問い合わせを並行して行う場合は、
/// 呼び出し側で排他制御を行う必要があります。
///
/// # 例
///
/// ```
/// use fleksja::Dictionary;
///
/// let corpus = "Gdańsk:AA:Gdańsk:Gdańska:Gdańskowi:\n";
/// let dict = Dictionary::from_reader(corpus.as_bytes())?;
///
/// let lookup = dict.parent_of("Gdańska")?;
/// assert_eq!(lookup.surface(), "Gdańsk");
/// assert_eq!(lookup.label(), Some("AA"));
/// assert_eq!(dict.children_of("Gdańsk")?, ["Gdańsk", "Gdańska", "Gdańskowi"]);
/// # Ok::<(), fleksja::errors::FleksjaError>(())
/// ```
pub struct Dictionary {
    pub(crate) inner: DictionaryInner,
}

impl Dictionary {
    /// `DictionaryInner`から辞書を作成します。
    pub fn from_inner(inner: DictionaryInner) -> Self {
        Self { inner }
    }

    /// 既定の設定で、1つのコーパスから辞書を構築します。
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合に[`FleksjaError`]を返します。
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        DictionaryBuilder::new()
            .from_readers([rdr])
            .map(Self::from_inner)
    }

    /// 内部データを取り出します。
    pub fn into_inner(self) -> DictionaryInner {
        self.inner
    }

    /// 辞書データをライターにシリアライズします。
    ///
    /// この関数の出力バイナリは、[`Dictionary::read`]や[`Dictionary::from_path`]などの
    /// 読み込みメソッドが期待する形式です。
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use std::fs::File;
    /// use fleksja::Dictionary;
    ///
    /// let dict = Dictionary::from_reader("pies:AB:psa:psu:\n".as_bytes())?;
    ///
    /// let mut file = File::create("system.dic")?;
    /// dict.write(&mut file)?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # エラー
    ///
    /// 書き込みまたはシリアライゼーションに失敗した場合にエラーを返します。
    pub fn write<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        self.inner.write(wtr)
    }

    /// すべてのデータをヒープバッファに読み込むことで、リーダーから辞書を作成します。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - データを読み込めない場合。
    /// - マジックナンバーが一致しない場合。
    /// - アーカイブの検証に失敗した場合。
    pub fn read<R: Read>(mut rdr: R) -> Result<Self> {
        check_magic(&mut rdr, "rdr")?;

        let mut padding_buf = vec![0; PADDING_LEN];
        rdr.read_exact(&mut padding_buf)?;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        let mut aligned_bytes = AlignedVec::<16>::with_capacity(buffer.len());
        aligned_bytes.extend_from_slice(&buffer);

        let inner = DictionaryInner::from_archive(&aligned_bytes)?;
        Ok(Self::from_inner(inner))
    }

    /// メモリマッピングを使用してファイルパスから辞書を読み込みます。
    ///
    /// マップされた領域がアーカイブのアライメントを満たさない場合は、
    /// アライメント済みのバッファに複製してから検証します。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - ファイルを開けない場合([`FleksjaError::SourceUnavailable`])。
    /// - ファイルが破損している、またはマジックナンバーが一致しない場合。
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| FleksjaError::source_unavailable(path, e))?;
        check_magic(&mut file, "path")?;

        // SAFETY: the mapping is only read while `mmap` is alive and is not
        // retained beyond this function.
        let mmap = unsafe { Mmap::map(&file)? };

        let Some(data_bytes) = mmap.get(DATA_START..) else {
            return Err(FleksjaError::invalid_argument(
                "path",
                "Dictionary file too small or corrupted.",
            ));
        };

        let inner = if data_bytes.as_ptr().align_offset(RKYV_ALIGNMENT) == 0 {
            DictionaryInner::from_archive(data_bytes)?
        } else {
            let mut aligned_bytes = AlignedVec::<16>::with_capacity(data_bytes.len());
            aligned_bytes.extend_from_slice(data_bytes);
            DictionaryInner::from_archive(&aligned_bytes)?
        };
        log::debug!(
            "Loaded {} lexemes from {}",
            inner.index.num_ids(),
            path.display()
        );
        Ok(Self::from_inner(inner))
    }

    /// Zstandard圧縮ファイルから辞書を読み込みます。
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合は[`FleksjaError::SourceUnavailable`]、
    /// 有効なZstandardアーカイブでない場合や展開したデータが辞書でない場合は
    /// その他のエラーを返します。
    pub fn from_zstd<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FleksjaError::source_unavailable(path, e))?;
        let decoder = zstd::Decoder::new(file)?;
        Self::read(decoder)
    }

    /// 設定を返します。
    #[inline(always)]
    pub fn config(&self) -> &DictionaryConfig {
        &self.inner.config
    }

    /// 綴りの索引を返します。
    #[inline(always)]
    pub fn index(&self) -> &StringIndex {
        &self.inner.index
    }

    /// 屈折グラフを返します。
    #[inline(always)]
    pub fn graph(&self) -> &InflectionGraph {
        &self.inner.graph
    }

    /// 語彙素の数を返します。
    #[inline(always)]
    pub fn num_lexemes(&self) -> usize {
        self.inner.index.num_ids()
    }

    /// 綴りのすべての読みを登録順に返します。
    ///
    /// # エラー
    ///
    /// 綴りが未登録の場合は[`FleksjaError::NotFound`]を返します。
    pub(crate) fn readings(&self, word: &str) -> Result<Vec<LexemeId>> {
        let ids = self.inner.index.lookup_all(word);
        if ids.is_empty() {
            return Err(FleksjaError::not_found("spelling", word));
        }
        Ok(ids)
    }

    pub(crate) fn reading(&self, id: LexemeId) -> Result<Reading> {
        Ok(Reading::new(
            id,
            self.inner.index.restore(id)?,
            self.inner.graph.get_label(id)?,
        ))
    }

    /// 語彙素IDの綴りを返します。
    ///
    /// # エラー
    ///
    /// IDが範囲外の場合は[`FleksjaError::NotFound`]を返します。
    pub fn surface(&self, id: LexemeId) -> Result<&str> {
        self.inner.index.restore(id)
    }

    /// 語彙素IDのラベルを返します。
    pub fn label(&self, id: LexemeId) -> Result<Option<&str>> {
        self.inner.graph.get_label(id)
    }

    /// 綴りのすべての読みを登録順に返します。
    ///
    /// 最初の読みが主な結果となり、残りは代替候補になります。
    pub fn lookup(&self, word: &str) -> Result<Lookup> {
        let mut readings = self
            .readings(word)?
            .into_iter()
            .map(|id| self.reading(id))
            .collect::<Result<Vec<_>>>()?;
        let primary = readings.remove(0);
        Ok(Lookup::new(primary, readings))
    }

    /// 語形の見出し語を返します。
    ///
    /// 親を持つ最初の読みの親が主な結果となり、他の読みの親のうち
    /// 主な結果と異なるものが登録順に代替候補となります。
    ///
    /// # エラー
    ///
    /// 綴りが未登録の場合、またはどの読みも親を持たない場合は
    /// [`FleksjaError::NotFound`]を返します。
    pub fn parent_of(&self, word: &str) -> Result<Lookup> {
        let mut parents = vec![];
        let mut seen = HashSet::new();
        for id in self.readings(word)? {
            if let Some(parent) = self.inner.graph.get_parent(id)?
                && seen.insert(parent)
            {
                parents.push(parent);
            }
        }
        let mut readings = parents.into_iter().map(|id| self.reading(id));
        let primary = readings
            .next()
            .ok_or_else(|| FleksjaError::not_found("parent", word))??;
        Ok(Lookup::new(primary, readings.collect::<Result<_>>()?))
    }

    /// 見出し語のパラダイムを構成する語形をコーパスの順に返します。
    ///
    /// 見出し語である最初の読みを使います。見出し語である読みがない場合は
    /// 最初の読みを使います。
    ///
    /// # エラー
    ///
    /// 綴りが未登録の場合は[`FleksjaError::NotFound`]を返します。
    pub fn children_of(&self, word: &str) -> Result<Vec<String>> {
        let graph = &self.inner.graph;
        let readings = self.readings(word)?;
        let mut head = readings[0];
        for &id in &readings {
            if graph.is_head(id)? {
                head = id;
                break;
            }
        }
        graph
            .get_children(head)?
            .iter()
            .map(|&child| self.inner.index.restore(child).map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "\
zamek:AC:zamek:zamku:
zamek:AB:zamek:zamka:
zamku:AC:
";

    #[test]
    fn test_parent_of_homonyms() {
        let dict = Dictionary::from_reader(CORPUS.as_bytes()).unwrap();
        let lookup = dict.parent_of("zamek").unwrap();
        assert_eq!(lookup.surface(), "zamek");
        assert_eq!(lookup.label(), Some("AC"));
        assert_eq!(lookup.alternates().len(), 1);
        assert_eq!(lookup.alternates()[0].label(), Some("AB"));
    }

    #[test]
    fn test_parent_of_head_without_parent() {
        let dict = Dictionary::from_reader(CORPUS.as_bytes()).unwrap();
        // The first reading of "zamku" is derived, so it resolves.
        assert_eq!(dict.parent_of("zamku").unwrap().surface(), "zamek");
        let dict = Dictionary::from_reader("tak:F:\n".as_bytes()).unwrap();
        assert!(dict.parent_of("tak").unwrap_err().is_not_found());
        assert!(dict.parent_of("nie").unwrap_err().is_not_found());
    }

    #[test]
    fn test_children_of_prefers_head() {
        let dict = Dictionary::from_reader(CORPUS.as_bytes()).unwrap();
        assert_eq!(dict.children_of("zamek").unwrap(), ["zamek", "zamku"]);
        assert!(dict.children_of("zamku").unwrap().is_empty());
        assert!(dict.children_of("zamka").unwrap().is_empty());
    }

    #[test]
    fn test_lookup() {
        let dict = Dictionary::from_reader(CORPUS.as_bytes()).unwrap();
        let lookup = dict.lookup("zamku").unwrap();
        assert_eq!(lookup.primary().id(), LexemeId::new(2));
        assert_eq!(lookup.label(), None);
        assert_eq!(lookup.alternates()[0].label(), Some("AC"));
        assert_eq!(dict.surface(LexemeId::new(4)).unwrap(), "zamek");
        assert_eq!(dict.label(LexemeId::new(3)).unwrap(), Some("AB"));
        assert_eq!(dict.num_lexemes(), 7);
    }

    #[test]
    fn test_read_write() {
        let mut dict = Dictionary::from_reader(CORPUS.as_bytes()).unwrap();
        dict.add_relationships_from_reader("synonim", "zamek:AC:zamka:".as_bytes())
            .unwrap();

        let mut buffer = vec![];
        dict.write(&mut buffer).unwrap();
        assert!(buffer.starts_with(MODEL_MAGIC));

        let dict = Dictionary::read(buffer.as_slice()).unwrap();
        assert_eq!(dict.parent_of("zamka").unwrap().label(), Some("AB"));
        assert_eq!(dict.related_to("synonim", "zamek").unwrap().surface(), "zamka");
        assert_eq!(dict.config().block_len(), 7);
    }

    #[test]
    fn test_read_invalid_magic() {
        let data = b"SomeOtherFormat 0.6\n";
        assert!(matches!(
            Dictionary::read(&data[..]),
            Err(FleksjaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_read_mismatched_magic_of_full_length() {
        let data = b"SomeOtherDictionary 0.1\n\xff\xff\xff\xff\xff\xff\xff\xff";
        assert!(matches!(
            Dictionary::read(&data[..]),
            Err(FleksjaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_path_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truncated.dic");
        std::fs::write(&path, &MODEL_MAGIC[..8]).unwrap();
        assert!(matches!(
            Dictionary::from_path(&path),
            Err(FleksjaError::InvalidArgument(_))
        ));
    }
}
