use relink_core::{redirect_path, Mapping, PublishResult, RedirectRequest};
use relink_logging::{relink_info, relink_warn};
use serde_json::json;

use crate::destination::PLACEHOLDER_PASSWORD;
use crate::transport::{Auth, Transport};
use crate::PublishError;

/// Creates redirects on the destination site, one request at a time.
pub struct RedirectPublisher<'a> {
    transport: &'a dyn Transport,
    endpoint: String,
    auth: Auth,
    site_id: String,
}

impl<'a> RedirectPublisher<'a> {
    pub fn new(transport: &'a dyn Transport, base_url: &str, api_key: &str, site_id: &str) -> Self {
        Self {
            transport,
            endpoint: format!("{}/redirects", base_url.trim_end_matches('/')),
            auth: Auth::Basic {
                user: api_key.to_string(),
                password: PLACEHOLDER_PASSWORD.to_string(),
            },
            site_id: site_id.to_string(),
        }
    }

    /// Publishes a single mapping; unmatched mappings are passed through.
    pub async fn publish(&self, mapping: Mapping) -> Result<PublishResult, PublishError> {
        let Some(request) = RedirectRequest::for_mapping(&self.site_id, &mapping) else {
            if let Some(to) = &mapping.to {
                relink_warn!("Skipping redirect to {} for an article without a source URL", to);
            }
            return Ok(PublishResult::Skipped(mapping));
        };

        relink_info!("{} → {}", request.url_mapping, redirect_path(&request.redirect));

        let body = json!({
            "siteId": &request.site_id,
            "urlMapping": &request.url_mapping,
            "redirect": &request.redirect,
        });
        let status = self
            .transport
            .post_json(&self.endpoint, &self.auth, &body)
            .await
            .map_err(|source| PublishError::Transport {
                url_mapping: request.url_mapping.clone(),
                source,
            })?;

        relink_info!("{}", status);

        if !(200..300).contains(&status) {
            return Err(PublishError::Status {
                url_mapping: request.url_mapping,
                status,
            });
        }

        Ok(PublishResult::Published {
            mapping,
            url_mapping: request.url_mapping,
            status,
        })
    }

    /// Publishes in mapping order and stops at the first failure. Redirects
    /// created before the failure stay in place.
    pub async fn publish_all(&self, mappings: Vec<Mapping>) -> Result<Vec<PublishResult>, PublishError> {
        let mut results = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            results.push(self.publish(mapping).await?);
        }
        Ok(results)
    }
}
