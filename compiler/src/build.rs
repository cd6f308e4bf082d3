//! 屈折辞書のビルドモジュール
//!
//! このモジュールは、コーパスファイルと関係ファイル、多分節表現ファイルから
//! zstd圧縮したバイナリ形式の辞書を構築する機能を提供します。

use std::fs::File;
use std::io;
use std::path::PathBuf;

use fleksja::errors::FleksjaError;
use fleksja::{ComponentPolicy, Dictionary, DictionaryBuilder, DictionaryConfig};

use clap::Parser;

/// ビルドコマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "build",
    about = "A program to build the inflectional dictionary."
)]
pub struct Args {
    /// Corpus files, loaded in the given order.
    #[clap(short = 'c', long = "corpus-in", required = true, num_args = 1..)]
    corpus_in: Vec<PathBuf>,

    /// Gradation file registering the `hr` and `hst` relationships.
    #[clap(long)]
    gradation_in: Option<PathBuf>,

    /// Participle file registering the `imieslow` and `rzeczownik` relationships.
    #[clap(long)]
    participles_in: Option<PathBuf>,

    /// Generic relationship file in the form `NAME=PATH`. Can be repeated.
    #[clap(short = 'r', long = "relation-in", value_parser = parse_relation)]
    relation_in: Vec<(String, PathBuf)>,

    /// Multisegment file.
    #[clap(short = 'm', long)]
    multisegment_in: Option<PathBuf>,

    /// File to which the binary dictionary is output (in zstd).
    #[clap(short = 'o', long)]
    sysdic_out: PathBuf,

    /// Token marking an absent form in a corpus slot.
    #[clap(long, default_value = "##")]
    empty_slot_token: String,

    /// Token marking a skipped field in relationship files.
    #[clap(long, default_value = "#")]
    relation_skip_token: String,

    /// Label classes whose paradigms carry gender and case structure.
    #[clap(long, default_value = "C")]
    gender_label_classes: String,

    /// Number of case slots in one gender block.
    #[clap(long, default_value_t = 7)]
    case_block_len: u8,

    /// Separator placed between the words of a phrase.
    #[clap(long, default_value_t = ' ')]
    phrase_separator: char,

    /// Which reading of a word becomes a multisegment component
    /// (`representative` or `first`).
    #[clap(long, default_value = "representative")]
    component_policy: ComponentPolicy,

    /// Compression level of the output.
    #[clap(long, default_value_t = 19)]
    level: i32,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書構築エラー
    #[error("Dictionary building failed: {0}")]
    Fleksja(#[from] FleksjaError),
}

/// `NAME=PATH`形式の引数をパースします。
fn parse_relation(arg: &str) -> Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got `{arg}`")),
    }
}

impl Args {
    fn dictionary_config(&self) -> Result<DictionaryConfig, FleksjaError> {
        Ok(DictionaryConfig::default()
            .empty_slot_token(&self.empty_slot_token)?
            .relation_skip_token(&self.relation_skip_token)?
            .gender_label_classes(&self.gender_label_classes)?
            .case_block_len(self.case_block_len)?
            .phrase_separator(self.phrase_separator)
            .component_policy(self.component_policy))
    }
}

/// ビルドコマンドを実行する
///
/// 指定されたソースファイルから辞書を構築し、zstd圧縮したバイナリ形式で出力します。
///
/// # エラー
///
/// ファイルの読み書きや辞書構築に失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    println!("Compiling the dictionary...");
    let dict = build_dictionary(&args)?;
    println!(
        "Built {} lexemes with {} relationships",
        dict.num_lexemes(),
        dict.relationship_names().count()
    );

    println!("Writing the dictionary...");
    let file = File::create(&args.sysdic_out)?;
    let mut encoder = zstd::Encoder::new(file, args.level)?;
    dict.write(&mut encoder)?;
    encoder.finish()?;

    println!("Successfully built the dictionary to {}", args.sysdic_out.display());
    Ok(())
}

/// 指定されたソースファイルから辞書を構築する
///
/// CLIに依存しないコアのビルドロジックです。
/// 関係ファイルは段階比較、分詞、汎用の関係の順に、多分節表現は最後に取り込みます。
///
/// # エラー
///
/// ファイルの読み込みや辞書構築に失敗した場合、`BuildError`を返します。
pub fn build_dictionary(args: &Args) -> Result<Dictionary, BuildError> {
    let inner = DictionaryBuilder::new()
        .config(args.dictionary_config()?)
        .from_paths(&args.corpus_in)?;
    let mut dict = Dictionary::from_inner(inner);

    if let Some(path) = &args.gradation_in {
        let n = dict.add_gradation_from_path(path)?;
        println!("Added {n} gradation edges from {}", path.display());
    }
    if let Some(path) = &args.participles_in {
        let n = dict.add_participles_from_path(path)?;
        println!("Added {n} participle edges from {}", path.display());
    }
    for (name, path) in &args.relation_in {
        let n = dict.add_relationships_from_path(name, path)?;
        println!("Added {n} `{name}` edges from {}", path.display());
    }
    if let Some(path) = &args.multisegment_in {
        let n = dict.add_multisegments_from_path(path)?;
        println!("Added {n} multisegment keys from {}", path.display());
    }
    Ok(dict)
}
