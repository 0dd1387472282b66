//! Property-based tests for `Matcher::guess` over the bundled dataset.
//!
//! Queries are drawn from dictionary idioms, from free-form Han strings
//! built out of characters the dataset uses, and from arbitrary text.

use std::sync::OnceLock;

use proptest::prelude::*;

use crate::matcher::{MatchMode, Matcher, Ranking, ValidationError};
use crate::testutil::bundled_dict;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn matcher(ranking: Ranking) -> &'static Matcher {
    static INSERTION: OnceLock<Matcher> = OnceLock::new();
    static CHAINABLE: OnceLock<Matcher> = OnceLock::new();
    let cell = match ranking {
        Ranking::Insertion => &INSERTION,
        Ranking::Chainable => &CHAINABLE,
    };
    cell.get_or_init(|| Matcher::with_options(bundled_dict(), MatchMode::Char, ranking))
}

fn pinyin_matcher() -> &'static Matcher {
    static PINYIN: OnceLock<Matcher> = OnceLock::new();
    PINYIN.get_or_init(|| {
        Matcher::with_options(bundled_dict(), MatchMode::Pinyin, Ranking::Insertion)
    })
}

fn idiom_texts() -> Vec<String> {
    bundled_dict().iter().map(|e| e.text.clone()).collect()
}

fn dataset_chars() -> Vec<char> {
    let mut chars: Vec<char> = bundled_dict().iter().flat_map(|e| e.text.chars()).collect();
    chars.sort_unstable();
    chars.dedup();
    chars
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_ranking() -> impl Strategy<Value = Ranking> {
    prop_oneof![Just(Ranking::Insertion), Just(Ranking::Chainable)]
}

fn arb_query() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(idiom_texts()),
        2 => prop::collection::vec(prop::sample::select(dataset_chars()), 1..6)
            .prop_map(|cs| cs.into_iter().collect::<String>()),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn guess_respects_top_n(query in arb_query(), top_n in 1usize..8, ranking in arb_ranking()) {
        let results = matcher(ranking).guess(&query, top_n).unwrap();
        prop_assert!(results.len() <= top_n);
    }

    #[test]
    fn guess_continues_last_char(query in arb_query(), top_n in 1usize..8, ranking in arb_ranking()) {
        let last = query.chars().last();
        for entry in matcher(ranking).guess(&query, top_n).unwrap() {
            prop_assert_eq!(entry.first_char(), last);
        }
    }

    #[test]
    fn guess_empty_iff_bucket_empty(query in arb_query(), ranking in arb_ranking()) {
        let m = matcher(ranking);
        let last = query.chars().last().unwrap();
        let results = m.guess(&query, 1).unwrap();
        prop_assert_eq!(results.is_empty(), m.char_index().bucket(last).is_empty());
    }

    #[test]
    fn guess_is_idempotent(query in arb_query(), top_n in 1usize..8, ranking in arb_ranking()) {
        let m = matcher(ranking);
        prop_assert_eq!(m.guess(&query, top_n).unwrap(), m.guess(&query, top_n).unwrap());
    }

    #[test]
    fn rankings_agree_on_membership(query in arb_query()) {
        let mut a: Vec<&str> = matcher(Ranking::Insertion)
            .guess(&query, usize::MAX)
            .unwrap()
            .into_iter()
            .map(|e| e.text.as_str())
            .collect();
        let mut b: Vec<&str> = matcher(Ranking::Chainable)
            .guess(&query, usize::MAX)
            .unwrap()
            .into_iter()
            .map(|e| e.text.as_str())
            .collect();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn pinyin_mode_contains_char_mode(query in arb_query()) {
        let pinyin = pinyin_matcher();
        let by_pinyin = pinyin.guess(&query, usize::MAX).unwrap();
        for entry in matcher(Ranking::Insertion).guess(&query, usize::MAX).unwrap() {
            prop_assert!(by_pinyin.contains(&entry), "{} missing", entry.text);
        }
    }

    #[test]
    fn arbitrary_input_never_panics(query in any::<String>(), top_n in 0usize..4) {
        let result = matcher(Ranking::Insertion).guess(&query, top_n);
        if query.trim().is_empty() {
            prop_assert_eq!(result, Err(ValidationError::EmptyIdiom));
        } else if top_n == 0 {
            prop_assert_eq!(result, Err(ValidationError::ZeroTopN));
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
