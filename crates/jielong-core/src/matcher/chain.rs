//! Play the solitaire forward from a starting idiom.

use std::collections::HashSet;

use tracing::{debug, debug_span};

use crate::dict::IdiomEntry;

use super::{validate_idiom, Matcher, ValidationError};

/// One step of a chain.
#[derive(Debug, Clone)]
pub struct ChainLink<'a> {
    pub entry: &'a IdiomEntry,
    /// Unused candidates that were available at this step.
    pub choices: usize,
}

impl Matcher {
    /// Build a chain of up to `steps` idioms following `start`.
    ///
    /// Each link is the best-ranked candidate not yet used in the chain; the
    /// starting idiom counts as used. The walk stops early when no unused
    /// candidate is left.
    pub fn chain(&self, start: &str, steps: usize) -> Result<Vec<ChainLink<'_>>, ValidationError> {
        let start = validate_idiom(start)?;
        if steps == 0 {
            return Err(ValidationError::ZeroSteps);
        }

        let _span = debug_span!("chain", start, steps).entered();
        let mut used: HashSet<&str> = HashSet::new();
        used.insert(start);

        let mut links: Vec<ChainLink<'_>> = Vec::with_capacity(steps);
        let mut current: &str = start;

        while links.len() < steps {
            let (key, last) = self.query_key(current);
            let unused: Vec<&IdiomEntry> = self
                .ranked_ids(key, last)
                .into_iter()
                .map(|id| self.entry(id))
                .filter(|e| !used.contains(e.text.as_str()))
                .collect();

            let Some(&next) = unused.first() else {
                debug!(%key, "no unused continuation");
                break;
            };
            used.insert(next.text.as_str());
            links.push(ChainLink {
                entry: next,
                choices: unused.len(),
            });
            current = next.text.as_str();
        }

        debug!(length = links.len());
        Ok(links)
    }
}
