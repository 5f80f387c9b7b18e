use std::path::PathBuf;

use relink_core::{MatchPolicy, MissingUrlPolicy, ReportMode};

pub const DEFAULT_AUDIT_OUTPUT: &str = "unmatched.csv";

/// API credentials for both platforms. Empty values are passed through and
/// surface as authentication failures from the remote side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub source_token: String,
    pub destination_api_key: String,
    pub site_id: String,
}

/// Everything one reconciliation run needs. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    pub credentials: Credentials,
    pub source_base_url: String,
    pub destination_base_url: String,
    pub match_policy: MatchPolicy,
    pub report_mode: ReportMode,
    pub missing_urls: MissingUrlPolicy,
    pub audit_output: PathBuf,
}
