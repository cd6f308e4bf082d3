//! エラー型の定義
//!
//! このモジュールは、fleksjaライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt::{self, Debug};
use std::path::PathBuf;

/// fleksja専用のResult型
///
/// エラー型としてデフォルトで[`FleksjaError`]を使用します。
pub type Result<T, E = FleksjaError> = std::result::Result<T, E>;

/// fleksjaのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
/// 問い合わせ時の[`FleksjaError::NotFound`]は通常の失敗結果であり、
/// 語彙外の入力に対して常に発生し得ます。
#[derive(Debug, thiserror::Error)]
pub enum FleksjaError {
    /// 未登録の綴り、語彙素ID、関係名、または多分節表現の組み合わせ
    ///
    /// [`NotFoundError`]のエラーバリアント。
    #[error(transparent)]
    NotFound(NotFoundError),

    /// 同じ名前の関係が既に登録されている
    ///
    /// 関係名は大文字小文字を区別せずに比較されます。
    #[error("Relationship '{0}' already exists and cannot be registered again.")]
    RelationshipAlreadyExists(String),

    /// コーパスの2回目の走査で、1回目に登録されなかった綴りが参照された
    ///
    /// [`CorpusInconsistencyError`]のエラーバリアント。
    #[error(transparent)]
    CorpusInconsistency(CorpusInconsistencyError),

    /// 参照されたファイルを開けない
    #[error("Source '{path}' is unavailable: {source}")]
    SourceUnavailable {
        /// 開こうとしたパス
        path: PathBuf,
        /// 根本原因
        #[source]
        source: std::io::Error,
    },

    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 無効な状態エラー
    ///
    /// [`InvalidStateError`]のエラーバリアント。
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// 整数変換エラー
    ///
    /// [`TryFromIntError`](std::num::TryFromIntError)のエラーバリアント。
    #[error(transparent)]
    TryFromInt(std::num::TryFromIntError),

    /// I/Oエラー
    ///
    /// [`std::io::Error`](std::io::Error)のエラーバリアント。
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// rkyvシリアライゼーションエラー
    ///
    /// [`rkyv::rancor::Error`](rkyv::rancor::Error)のエラーバリアント。
    #[error(transparent)]
    RkyvError(#[from] rkyv::rancor::Error),
}

impl FleksjaError {
    /// 未検出エラーを生成します
    ///
    /// # 引数
    ///
    /// * `what` - 検索対象の種類(`"spelling"`, `"relationship"`など)
    /// * `key` - 見つからなかったキー
    pub(crate) fn not_found<S>(what: &'static str, key: S) -> Self
    where
        S: Into<String>,
    {
        Self::NotFound(NotFoundError {
            what,
            key: key.into(),
        })
    }

    /// コーパス不整合エラーを生成します
    ///
    /// # 引数
    ///
    /// * `spelling` - 問題の綴り
    /// * `msg` - エラーメッセージ
    pub(crate) fn corpus_inconsistency<S, M>(spelling: S, msg: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::CorpusInconsistency(CorpusInconsistencyError {
            spelling: spelling.into(),
            msg: msg.into(),
        })
    }

    /// ファイルを開けなかったことを表すエラーを生成します
    pub(crate) fn source_unavailable<P>(path: P, source: std::io::Error) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }

    /// このエラーが未検出エラーかどうかを返します。
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// 検索対象が辞書に存在しない場合に使用されるエラー
#[derive(Debug)]
pub struct NotFoundError {
    /// 検索対象の種類
    pub(crate) what: &'static str,

    /// 見つからなかったキー
    pub(crate) key: String,
}

impl NotFoundError {
    /// 検索対象の種類を返します。
    pub fn what(&self) -> &'static str {
        self.what
    }

    /// 見つからなかったキーを返します。
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NotFoundError: {}: {}", self.what, self.key)
    }
}

impl Error for NotFoundError {}

/// コーパスの2回の走査が一致しない場合に使用されるエラー
#[derive(Debug)]
pub struct CorpusInconsistencyError {
    /// 問題の綴り
    pub(crate) spelling: String,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for CorpusInconsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CorpusInconsistencyError: {}: {}", self.spelling, self.msg)
    }
}

impl Error for CorpusInconsistencyError {}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}

impl From<std::num::TryFromIntError> for FleksjaError {
    fn from(error: std::num::TryFromIntError) -> Self {
        Self::TryFromInt(error)
    }
}
