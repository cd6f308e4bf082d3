//! ユーティリティ関数と型変換トレイトを提供するモジュール
//!
//! このモジュールには、区切り文字形式の行の分割、型変換、その他のヘルパー関数が含まれています。
//! 主に以下の機能を提供します：
//!
//! - `FromU32`: u32からの型変換トレイト
//! - コロン・セミコロン区切り行の分割

/// u32から他の型への変換を提供するトレイト
///
/// このトレイトは、u32値を実装型に変換する機能を定義します。
/// 標準ライブラリのFromトレイトとは異なり、特定の最適化や
/// プラットフォーム固有の仮定を行うことができます。
pub trait FromU32 {
    /// u32値から実装型を生成する
    fn from_u32(src: u32) -> Self;
}

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl FromU32 for usize {
    /// u32値をusizeに変換する
    ///
    /// ポインタ幅が32ビットまたは64ビットであることが保証されているため、
    /// この変換は常に成功します。
    #[inline(always)]
    fn from_u32(src: u32) -> Self {
        // Since the pointer width is guaranteed to be 32 or 64,
        // the following process always succeeds.
        unsafe { Self::try_from(src).unwrap_unchecked() }
    }
}

/// 区切り文字で行を分割し、各フィールドの前後の空白を取り除く
///
/// 行末の区切り文字の後に続く空のフィールドは1つだけ取り除かれます。
/// 辞書ファイルは `a:b:c:` のように区切り文字で終わる行と、`a:b:c` のように
/// 終わらない行の両方を含むためです。
///
/// # 引数
///
/// * `row` - 分割する行
/// * `delimiter` - 区切り文字
///
/// # 戻り値
///
/// 空白を取り除いたフィールドのベクター
///
/// # 例
///
/// ```
/// # use fleksja::utils::split_fields;
/// assert_eq!(split_fields("pies:AB:psa:", ':'), vec!["pies", "AB", "psa"]);
/// assert_eq!(split_fields("duży:większy:największy", ':'), vec!["duży", "większy", "największy"]);
/// ```
pub fn split_fields(row: &str, delimiter: char) -> Vec<&str> {
    let row = row.trim_end_matches(['\r', '\n']);
    let mut fields: Vec<&str> = row.split(delimiter).map(str::trim).collect();
    if fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// 空行かどうかを判定する
#[inline(always)]
pub(crate) fn is_blank(row: &str) -> bool {
    row.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_trailing_delimiter() {
        assert_eq!(
            &["Gdańsk", "AA", "Gdańska"],
            split_fields("Gdańsk:AA:Gdańska:\n", ':').as_slice()
        );
    }

    #[test]
    fn test_split_fields_trims_spaces() {
        assert_eq!(
            &["Gdańsk", "AA", "Gdańska"],
            split_fields("Gdańsk :  AA:Gdańska:", ':').as_slice()
        );
    }

    #[test]
    fn test_split_fields_keeps_inner_empty() {
        assert_eq!(
            &["\"zła Apokalipsa\"", "*-", "", ""],
            split_fields("\"zła Apokalipsa\";*-;;;", ';').as_slice()
        );
    }

    #[test]
    fn test_split_fields_single() {
        assert_eq!(&[""], split_fields("", ':').as_slice());
    }
}
