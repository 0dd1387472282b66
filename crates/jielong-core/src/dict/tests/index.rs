use crate::dict::{CharIndex, PinyinIndex};
use crate::testutil::{bundled_dict, sample_dict, texts};

#[test]
fn test_char_bucket_in_insertion_order() {
    let dict = sample_dict();
    let index = CharIndex::build(&dict);
    let bucket = texts(index.bucket('意').iter().map(|&id| &dict.entries()[id]));
    assert_eq!(bucket, vec!["意想不到", "意气风发", "意味深长"]);
}

#[test]
fn test_char_bucket_missing() {
    let index = CharIndex::build(&sample_dict());
    assert!(index.bucket('私').is_empty());
    assert!(!index.contains('私'));
    assert!(index.contains('发'));
}

#[test]
fn test_every_entry_in_exactly_one_bucket() {
    for dict in [sample_dict(), bundled_dict()] {
        let index = CharIndex::build(&dict);
        let total: usize = index.iter().map(|(_, ids)| ids.len()).sum();
        assert_eq!(total, dict.len());
        for (c, ids) in index.iter() {
            for &id in ids {
                assert_eq!(dict.entries()[id].first_char(), Some(c));
            }
        }
        assert_eq!(index.len(), dict.stats().leading_chars);
    }
}

#[test]
fn test_pinyin_bucket_groups_homophones() {
    let dict = sample_dict();
    let index = PinyinIndex::build(&dict);
    let yi = texts(index.bucket("yi").iter().map(|&id| &dict.entries()[id]));
    assert_eq!(
        yi,
        vec!["意想不到", "一心一意", "意气风发", "意味深长", "义不容辞", "一语破的"]
    );
    assert_eq!(index.bucket("dao").len(), 1);
    assert!(index.bucket("long").is_empty()); // 龙飞凤舞 has no pinyin
}

#[test]
fn test_pinyin_readings_learned_from_dataset() {
    let index = PinyinIndex::build(&sample_dict());
    assert_eq!(index.reading('到'), Some("dao"));
    assert_eq!(index.reading('省'), Some("xing"));
    assert_eq!(index.reading('一'), Some("yi"));
    assert_eq!(index.reading('舞'), None);
}

#[test]
fn test_pinyin_first_reading_wins() {
    let dict = crate::dict::Dictionary::from_text(
        "长驱直入\tchang'qu'zhi'ru\t挺进\n成长之路\tcheng'zhang'zhi'lu\t成长\n",
    )
    .unwrap();
    let index = PinyinIndex::build(&dict);
    assert_eq!(index.reading('长'), Some("chang"));
}
