use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use relink_core::{MatchPolicy, MissingUrlPolicy, ReportMode};
use relink_engine::{
    Credentials, ReconcileConfig, TransportSettings, DEFAULT_AUDIT_OUTPUT, DESTINATION_API_BASE,
    SOURCE_API_BASE,
};

#[derive(Parser, Debug)]
#[command(
    name = "relink",
    about = "Match help-center articles across platforms and create URL redirects"
)]
pub struct Cli {
    /// Bearer token for the source knowledge base.
    #[arg(
        long,
        env = "INTERCOM_ACCESS_TOKEN",
        default_value = "",
        hide_env_values = true
    )]
    pub source_token: String,

    /// API key for the destination help-center (sent as the basic-auth user).
    #[arg(
        long,
        env = "HELPSCOUT_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub destination_api_key: String,

    /// Destination site that receives the redirects.
    #[arg(long, env = "HELPSCOUT_SITE_ID", default_value = "")]
    pub site_id: String,

    #[arg(
        long,
        env = "RELINK_SOURCE_BASE_URL",
        default_value = SOURCE_API_BASE
    )]
    pub source_base_url: String,

    #[arg(
        long,
        env = "RELINK_DESTINATION_BASE_URL",
        default_value = DESTINATION_API_BASE
    )]
    pub destination_base_url: String,

    /// How source titles are compared with destination titles.
    #[arg(long, value_enum, default_value_t = PolicyArg::NormalizedPrefix)]
    pub match_policy: PolicyArg,

    /// `audit` also writes the unmatched source URLs to `--audit-output`.
    #[arg(long, value_enum, default_value_t = ModeArg::Apply)]
    pub mode: ModeArg,

    /// Whether source articles without a URL take part in matching.
    #[arg(long, value_enum, default_value_t = MissingUrlsArg::Drop)]
    pub missing_urls: MissingUrlsArg,

    /// CSV written in audit mode; replaced on every run.
    #[arg(long, default_value = DEFAULT_AUDIT_OUTPUT)]
    pub audit_output: PathBuf,

    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    #[arg(long, default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Also write log output to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Exact,
    NormalizedPrefix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Apply,
    Audit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MissingUrlsArg {
    Keep,
    Drop,
}

impl From<PolicyArg> for MatchPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Exact => MatchPolicy::Exact,
            PolicyArg::NormalizedPrefix => MatchPolicy::NormalizedPrefix,
        }
    }
}

impl From<ModeArg> for ReportMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Apply => ReportMode::Apply,
            ModeArg::Audit => ReportMode::Audit,
        }
    }
}

impl From<MissingUrlsArg> for MissingUrlPolicy {
    fn from(arg: MissingUrlsArg) -> Self {
        match arg {
            MissingUrlsArg::Keep => MissingUrlPolicy::Keep,
            MissingUrlsArg::Drop => MissingUrlPolicy::Drop,
        }
    }
}

impl Cli {
    pub fn reconcile_config(&self) -> ReconcileConfig {
        ReconcileConfig {
            credentials: Credentials {
                source_token: self.source_token.clone(),
                destination_api_key: self.destination_api_key.clone(),
                site_id: self.site_id.clone(),
            },
            source_base_url: self.source_base_url.clone(),
            destination_base_url: self.destination_base_url.clone(),
            match_policy: self.match_policy.into(),
            report_mode: self.mode.into(),
            missing_urls: self.missing_urls.into(),
            audit_output: self.audit_output.clone(),
        }
    }

    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
