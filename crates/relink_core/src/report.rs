use crate::{Mapping, PublishResult};

/// Mappings that were handed to the destination, in publish order.
pub fn attempted_mappings(results: &[PublishResult]) -> Vec<&Mapping> {
    results
        .iter()
        .filter(|result| result.was_published())
        .map(PublishResult::mapping)
        .collect()
}

/// Source URLs that got no redirect: unmatched mappings, and matched ones
/// skipped because they had no source URL.
pub fn orphan_urls(results: &[PublishResult]) -> Vec<String> {
    results
        .iter()
        .filter(|result| !result.was_published())
        .map(|result| result.mapping().from.clone())
        .collect()
}

/// Tallies for the end-of-run summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunCounts {
    pub sources: usize,
    pub destinations: usize,
    pub matched: usize,
    pub published: usize,
    pub orphans: usize,
}

impl RunCounts {
    pub fn from_results(sources: usize, destinations: usize, results: &[PublishResult]) -> Self {
        let published = results.iter().filter(|r| r.was_published()).count();
        Self {
            sources,
            destinations,
            matched: results.iter().filter(|r| r.mapping().is_matched()).count(),
            published,
            orphans: results.len() - published,
        }
    }
}
