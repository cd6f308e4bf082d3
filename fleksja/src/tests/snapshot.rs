use std::fs::File;
use std::io::Write;

use super::*;
use crate::dictionary::LexemeId;

/// 辞書中のすべての綴りに対する問い合わせ結果を集めます。
fn answers(dict: &Dictionary) -> Vec<String> {
    let mut out = vec![];
    for id in (0..u32::try_from(dict.num_lexemes()).unwrap()).map(LexemeId::new) {
        let word = dict.surface(id).unwrap();
        out.push(format!("{word}: {:?}", dict.parent_of(word).ok()));
        out.push(format!("{word}: {:?}", dict.children_of(word).ok()));
        for name in dict.relationship_names() {
            out.push(format!("{word} {name}: {:?}", dict.related_to(name, word).ok()));
        }
    }
    for words in [
        &["złej", "Apokalipsy"][..],
        &["Bałtyckiego", "Morza"][..],
        &["duży", "zamku"][..],
    ] {
        out.push(format!("{:?}", dict.resolve_multisegment_parent(words).ok()));
        out.push(format!("{:?}", dict.resolve_multisegment_children(words).ok()));
    }
    out
}

#[test]
fn test_write_read() {
    let dict = fixture();
    let mut buf = vec![];
    dict.write(&mut buf).unwrap();

    let restored = Dictionary::read(buf.as_slice()).unwrap();
    assert_eq!(restored.num_lexemes(), dict.num_lexemes());
    assert_eq!(answers(&restored), answers(&dict));
}

#[test]
fn test_from_path() {
    let dict = fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("system.dic");
    dict.write(File::create(&path).unwrap()).unwrap();

    let restored = Dictionary::from_path(&path).unwrap();
    assert_eq!(answers(&restored), answers(&dict));
}

#[test]
fn test_from_zstd() {
    let dict = fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("system.dic.zst");
    let mut encoder = zstd::Encoder::new(File::create(&path).unwrap(), 3).unwrap();
    dict.write(&mut encoder).unwrap();
    encoder.finish().unwrap();

    let restored = Dictionary::from_zstd(&path).unwrap();
    assert_eq!(answers(&restored), answers(&dict));
}

/// 読み込んだ辞書にも関係と多分節表現を追加できることのテスト
#[test]
fn test_ingest_after_load() {
    let mut buf = vec![];
    Dictionary::from_reader(CORPUS.as_bytes())
        .unwrap()
        .write(&mut buf)
        .unwrap();

    let mut dict = Dictionary::read(buf.as_slice()).unwrap();
    dict.add_gradation_from_reader(GRADATION.as_bytes()).unwrap();
    dict.add_multisegments_from_reader(MULTISEGMENT.as_bytes())
        .unwrap();
    assert_eq!(dict.related_to("hr", "duży").unwrap().surface(), "większy");
    assert_eq!(
        dict.resolve_multisegment_parent(&["złej", "Apokalipsy"])
            .unwrap()
            .phrase(),
        "zła Apokalipsa"
    );
}

#[test]
fn test_bad_magic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.dic");
    File::create(&path)
        .unwrap()
        .write_all(b"NotADictionary 0.0\n\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff")
        .unwrap();
    assert!(Dictionary::from_path(&path).is_err());
    assert!(Dictionary::read(File::open(&path).unwrap()).is_err());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dictionary::from_path(dir.path().join("missing.dic")).err().unwrap();
    assert!(matches!(err, crate::errors::FleksjaError::SourceUnavailable { .. }));
}
