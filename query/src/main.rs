//! 屈折辞書に問い合わせるユーティリティ
//!
//! このバイナリは、標準入力から1行ずつ読み込んだ語(または語の列)を辞書に問い合わせ、
//! 指定されたモード（parent、children、related、phrase、phrase-children）で結果を出力します。
//! 語彙にない入力には`*`を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::str::FromStr;

use fleksja::{Dictionary, Lookup};

use clap::Parser;

/// 問い合わせモード
#[derive(Clone, Debug)]
enum QueryMode {
    Parent,
    Children,
    Related,
    Phrase,
    PhraseChildren,
}

impl FromStr for QueryMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "parent" => Ok(Self::Parent),
            "children" => Ok(Self::Children),
            "related" => Ok(Self::Related),
            "phrase" => Ok(Self::Phrase),
            "phrase-children" => Ok(Self::PhraseChildren),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "query", about = "Looks up inflected forms")]
struct Args {
    /// Dictionary (in zstd).
    #[clap(short = 'i', long)]
    sysdic: PathBuf,

    /// Query mode. Choices are parent, children, related, phrase, and phrase-children.
    #[clap(short = 'O', long, default_value = "parent")]
    mode: QueryMode,

    /// Relationship name used by the related mode.
    #[clap(short = 'r', long, required_if_eq("mode", "related"))]
    relation: Option<String>,
}

/// 見出し語と代替候補を1行ずつ出力します。
fn write_lookup<W: Write>(out: &mut W, word: &str, lookup: &Lookup) -> std::io::Result<()> {
    writeln!(
        out,
        "{word}\t{}\t{}",
        lookup.surface(),
        lookup.label().unwrap_or("*")
    )?;
    for alt in lookup.alternates() {
        writeln!(out, "\t{}\t{}", alt.surface(), alt.label().unwrap_or("*"))?;
    }
    Ok(())
}

/// メイン関数
///
/// 辞書をロードし、標準入力の各行を問い合わせて結果を標準出力に出力します。
/// 語彙にない入力は通常の結果として扱い、それ以外のエラーで終了します。
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the dictionary...");
    let dict = Dictionary::from_zstd(&args.sysdic)?;
    if let Some(name) = &args.relation {
        dict.relationship_id(name)?;
    }
    eprintln!("Ready to query {} lexemes", dict.num_lexemes());

    let is_tty = std::io::stdout().is_terminal();

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let result = match args.mode {
            QueryMode::Parent => dict
                .parent_of(line)
                .map(|lookup| write_lookup(&mut out, line, &lookup)),
            QueryMode::Related => {
                let name = args.relation.as_deref().unwrap_or_default();
                dict.related_to(name, line)
                    .map(|lookup| write_lookup(&mut out, line, &lookup))
            }
            QueryMode::Children => dict
                .children_of(line)
                .map(|forms| writeln!(out, "{line}\t{}", forms.join(" "))),
            QueryMode::Phrase => {
                let words: Vec<_> = line.split_whitespace().collect();
                dict.resolve_multisegment_parent(&words).map(|m| {
                    writeln!(out, "{line}\t{}\t{}", m.phrase(), m.source())
                })
            }
            QueryMode::PhraseChildren => {
                let words: Vec<_> = line.split_whitespace().collect();
                dict.resolve_multisegment_children(&words)
                    .map(|phrases| writeln!(out, "{line}\t{}", phrases.join("\t")))
            }
        };
        match result {
            Ok(written) => written?,
            Err(e) if e.is_not_found() => writeln!(out, "{line}\t*")?,
            Err(e) => return Err(e.into()),
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
