use std::fmt;

/// A documentation record as seen by either platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub url: Option<String>,
}

impl Document {
    /// Builds a document, treating an empty or blank URL as absent.
    pub fn new(title: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            url: url.filter(|u| !u.trim().is_empty()),
        }
    }
}

/// Destination-side grouping of documents, only used as a pagination key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub id: String,
    pub url: Option<String>,
}

/// Source URL paired with the destination URL it should redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub from: String,
    pub to: Option<String>,
}

impl Mapping {
    pub fn is_matched(&self) -> bool {
        self.to.is_some()
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.to {
            Some(to) => write!(f, "{} → {}", self.from, to),
            None => write!(f, "{} → (unmatched)", self.from),
        }
    }
}

/// Outcome of handing one mapping to the redirect publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishResult {
    /// The mapping had no destination and was passed through unpublished.
    Skipped(Mapping),
    /// The destination accepted the redirect.
    Published {
        mapping: Mapping,
        url_mapping: String,
        status: u16,
    },
}

impl PublishResult {
    pub fn mapping(&self) -> &Mapping {
        match self {
            PublishResult::Skipped(mapping) => mapping,
            PublishResult::Published { mapping, .. } => mapping,
        }
    }

    pub fn was_published(&self) -> bool {
        matches!(self, PublishResult::Published { .. })
    }
}

/// How source titles are compared against destination titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Raw title string equality.
    Exact,
    /// Normalized equality, or the normalized destination title starts with
    /// the normalized source title.
    #[default]
    NormalizedPrefix,
}

/// What the run produces after publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Print the mappings that were attempted.
    #[default]
    Apply,
    /// Also write the unmatched source URLs to a CSV file.
    Audit,
}

/// Whether source documents without a URL take part in matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingUrlPolicy {
    /// Keep them; they map from an empty source URL.
    Keep,
    #[default]
    Drop,
}
