use relink_core::{Document, MissingUrlPolicy};
use relink_logging::{relink_debug, relink_info, relink_warn};
use serde::Deserialize;

use crate::paginate::{collect_pages, parse_page, Page};
use crate::transport::{Auth, Transport};
use crate::ReconcileError;

pub const SOURCE_API_BASE: &str = "https://api.intercom.io";

#[derive(Debug, Deserialize)]
struct ArticlesPage {
    data: Vec<RawArticle>,
    pages: PageCount,
}

#[derive(Debug, Deserialize)]
struct PageCount {
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

/// Article listing on the source knowledge base, bearer-authenticated.
pub struct SourceClient<'a> {
    transport: &'a dyn Transport,
    endpoint: String,
    auth: Auth,
}

impl<'a> SourceClient<'a> {
    pub fn new(transport: &'a dyn Transport, base_url: &str, token: &str) -> Self {
        Self {
            transport,
            endpoint: format!("{}/articles", base_url.trim_end_matches('/')),
            auth: Auth::Bearer(token.to_string()),
        }
    }

    /// Every article, in page order.
    pub async fn list_documents(
        &self,
        missing_urls: MissingUrlPolicy,
    ) -> Result<Vec<Document>, ReconcileError> {
        let documents = collect_pages(move |page| self.fetch_page(page)).await?;
        let total = documents.len();

        let documents = match missing_urls {
            MissingUrlPolicy::Keep => documents,
            MissingUrlPolicy::Drop => {
                let kept: Vec<Document> =
                    documents.into_iter().filter(|doc| doc.url.is_some()).collect();
                if kept.len() < total {
                    relink_warn!(
                        "Dropped {} source article(s) without a URL",
                        total - kept.len()
                    );
                }
                kept
            }
        };

        relink_info!("Fetched {} source article(s)", documents.len());
        Ok(documents)
    }

    async fn fetch_page(&self, page: u32) -> Result<Page<Document>, ReconcileError> {
        let body = self
            .transport
            .get_json(&self.endpoint, &self.auth, &[("page", page.to_string())])
            .await?;
        let parsed: ArticlesPage = parse_page(&self.endpoint, body)?;
        relink_debug!(
            "Source page {} of {}: {} article(s)",
            page + 1,
            parsed.pages.total_pages,
            parsed.data.len()
        );

        let items = parsed
            .data
            .into_iter()
            .map(|raw| Document::new(raw.title.unwrap_or_default(), raw.url))
            .collect();
        Ok(Page {
            items,
            total_pages: parsed.pages.total_pages,
        })
    }
}
