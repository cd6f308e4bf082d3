//! fleksja 辞書コンパイラのメインエントリーポイント
//!
//! コーパスと関係ファイルから屈折辞書をビルドするためのCLIツールです。

mod build;

use clap::Parser;
use thiserror::Error;

use crate::build::BuildError;

/// コマンドライン引数の構造体
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// ソースファイルからバイナリ辞書を構築します
    ///
    /// コーパス(必須)と関係ファイル、多分節表現ファイル(任意)から
    /// zstd圧縮された辞書を生成します。
    Build(build::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
#[derive(Debug, Error)]
pub enum CompileError {
    /// 辞書ビルド中のエラー
    #[error(transparent)]
    BuildError(#[from] BuildError),
}

fn main() -> Result<(), CompileError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
    }
}
