use std::collections::HashMap;

use crate::normalize::normalize_title;
use crate::{Document, Mapping, MatchPolicy};

/// Destination lookup prepared for one policy.
///
/// Destination titles are normalized once when the matcher is built, so a
/// lookup is a linear scan of precomputed keys.
pub struct Matcher<'a> {
    policy: MatchPolicy,
    destinations: Vec<(String, &'a Document)>,
}

impl<'a> Matcher<'a> {
    pub fn new(destinations: &'a [Document], policy: MatchPolicy) -> Self {
        let destinations = destinations
            .iter()
            .map(|doc| (key_for(&doc.title, policy), doc))
            .collect();
        Self {
            policy,
            destinations,
        }
    }

    /// First destination document, in list order, matching `title`.
    ///
    /// A title with no ASCII letters or digits has an empty normalized key,
    /// which would prefix every destination; such titles only match on the
    /// raw title.
    pub fn find(&self, title: &str) -> Option<&'a Document> {
        let needle = key_for(title, self.policy);
        self.destinations
            .iter()
            .find(|(key, doc)| match self.policy {
                MatchPolicy::Exact => *key == needle,
                MatchPolicy::NormalizedPrefix if needle.is_empty() => doc.title == title,
                MatchPolicy::NormalizedPrefix => key.starts_with(needle.as_str()),
            })
            .map(|(_, doc)| *doc)
    }
}

fn key_for(title: &str, policy: MatchPolicy) -> String {
    match policy {
        MatchPolicy::Exact => title.to_string(),
        MatchPolicy::NormalizedPrefix => normalize_title(title),
    }
}

/// Produces one mapping per distinct source URL, in order of first appearance.
///
/// A source document without a URL maps from the empty string. When several
/// source documents share a URL, the last one decides the destination.
pub fn match_documents(
    sources: &[Document],
    destinations: &[Document],
    policy: MatchPolicy,
) -> Vec<Mapping> {
    let matcher = Matcher::new(destinations, policy);
    let mut mappings: Vec<Mapping> = Vec::with_capacity(sources.len());
    let mut index_by_from: HashMap<String, usize> = HashMap::with_capacity(sources.len());

    for source in sources {
        let from = source.url.clone().unwrap_or_default();
        let to = matcher.find(&source.title).and_then(|doc| doc.url.clone());
        match index_by_from.get(&from) {
            Some(&idx) => mappings[idx].to = to,
            None => {
                index_by_from.insert(from.clone(), mappings.len());
                mappings.push(Mapping { from, to });
            }
        }
    }

    mappings
}
