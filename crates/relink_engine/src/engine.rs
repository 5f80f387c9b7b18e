use std::path::PathBuf;

use relink_core::{
    attempted_mappings, match_documents, orphan_urls, Mapping, PublishResult, ReportMode,
    RunCounts,
};
use relink_logging::{mask_secret, relink_debug, relink_info};

use crate::config::ReconcileConfig;
use crate::destination::DestinationClient;
use crate::publish::RedirectPublisher;
use crate::report::write_orphans_csv;
use crate::source::SourceClient;
use crate::transport::Transport;
use crate::ReconcileError;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub counts: RunCounts,
    pub results: Vec<PublishResult>,
    pub orphans: Vec<String>,
    /// Set in audit mode once the CSV has been written.
    pub audit_path: Option<PathBuf>,
}

impl RunReport {
    pub fn attempted(&self) -> Vec<&Mapping> {
        attempted_mappings(&self.results)
    }
}

/// Drives one reconciliation: ingest both platforms, match, publish, report.
pub struct Reconciler<'a> {
    config: &'a ReconcileConfig,
    transport: &'a dyn Transport,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a ReconcileConfig, transport: &'a dyn Transport) -> Self {
        Self { config, transport }
    }

    pub async fn run(&self) -> Result<RunReport, ReconcileError> {
        let config = self.config;
        let credentials = &config.credentials;
        relink_debug!(
            "Credentials: source token {}, destination key {}, site id {:?}",
            mask_secret(&credentials.source_token),
            mask_secret(&credentials.destination_api_key),
            credentials.site_id
        );

        let source = SourceClient::new(
            self.transport,
            &config.source_base_url,
            &credentials.source_token,
        );
        let destination = DestinationClient::new(
            self.transport,
            &config.destination_base_url,
            &credentials.destination_api_key,
        );

        // Both listings must finish before matching; either failing ends the run.
        let (sources, destinations) = tokio::try_join!(
            source.list_documents(config.missing_urls),
            destination.list_documents()
        )?;

        let mappings = match_documents(&sources, &destinations, config.match_policy);
        relink_info!(
            "Matched {} of {} source URL(s) ({:?})",
            mappings.iter().filter(|m| m.is_matched()).count(),
            mappings.len(),
            config.match_policy
        );

        let publisher = RedirectPublisher::new(
            self.transport,
            &config.destination_base_url,
            &credentials.destination_api_key,
            &credentials.site_id,
        );
        let results = publisher.publish_all(mappings).await?;

        let orphans = orphan_urls(&results);
        let audit_path = match config.report_mode {
            ReportMode::Apply => None,
            ReportMode::Audit => {
                let path = write_orphans_csv(&config.audit_output, &orphans)?;
                relink_info!("Wrote {} unmatched URL(s) to {}", orphans.len(), path.display());
                Some(path)
            }
        };

        Ok(RunReport {
            counts: RunCounts::from_results(sources.len(), destinations.len(), &results),
            results,
            orphans,
            audit_path,
        })
    }
}
