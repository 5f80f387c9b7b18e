//! Relink core: pure reconciliation domain (records, matching, reporting).
mod matcher;
mod normalize;
mod redirect;
mod report;
mod types;

pub use matcher::{match_documents, Matcher};
pub use normalize::normalize_title;
pub use redirect::{redirect_path, RedirectRequest};
pub use report::{attempted_mappings, orphan_urls, RunCounts};
pub use types::{
    Collection, Document, Mapping, MatchPolicy, MissingUrlPolicy, PublishResult, ReportMode,
};
