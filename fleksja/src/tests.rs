//! fleksjaのテストモジュール群
//!
//! 辞書全体を構築して、問い合わせ、取り込み、スナップショットの
//! 動作を検証するテストを含みます。

mod snapshot;

use crate::Dictionary;

const CORPUS: &str = include_str!("./tests/resources/corpus.txt");
const GRADATION: &str = include_str!("./tests/resources/gradation.txt");
const PARTICIPLES: &str = include_str!("./tests/resources/participles.txt");
const DIMINUTIVES: &str = include_str!("./tests/resources/diminutives.txt");
const MULTISEGMENT: &str = include_str!("./tests/resources/multisegment.txt");

/// すべての関係と多分節表現を取り込んだ辞書を構築します。
fn fixture() -> Dictionary {
    let mut dict = Dictionary::from_reader(CORPUS.as_bytes()).unwrap();
    dict.add_gradation_from_reader(GRADATION.as_bytes()).unwrap();
    dict.add_participles_from_reader(PARTICIPLES.as_bytes())
        .unwrap();
    dict.add_relationships_from_reader("zdrobnienie", DIMINUTIVES.as_bytes())
        .unwrap();
    dict.add_multisegments_from_reader(MULTISEGMENT.as_bytes())
        .unwrap();
    dict
}
