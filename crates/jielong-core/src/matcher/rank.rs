use std::cmp::Reverse;

use super::{Matcher, Ranking};

/// Reorder candidate ids in place.
///
/// Buckets come out of the index in insertion order; every policy here uses
/// a stable sort so that insertion order remains the final tie-break.
pub(super) fn apply(matcher: &Matcher, ranking: Ranking, ids: &mut [usize]) {
    match ranking {
        Ranking::Insertion => {}
        Ranking::Chainable => {
            ids.sort_by_cached_key(|&id| Reverse(matcher.continuations(matcher.entry(id))));
        }
    }
}
