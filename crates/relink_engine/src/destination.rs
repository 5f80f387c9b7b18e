use relink_core::{Collection, Document};
use relink_logging::{relink_debug, relink_info};
use serde::Deserialize;

use crate::paginate::{collect_pages, parse_page, Page};
use crate::transport::{Auth, Transport};
use crate::ReconcileError;

pub const DESTINATION_API_BASE: &str = "https://docsapi.helpscout.net/v1";

/// The destination API ignores the basic-auth password; the key is the user.
pub const PLACEHOLDER_PASSWORD: &str = "X";

#[derive(Debug, Deserialize)]
struct CollectionsPage {
    collections: Listing<RawCollection>,
}

#[derive(Debug, Deserialize)]
struct ArticlesPage {
    articles: Listing<RawArticleRef>,
}

#[derive(Debug, Deserialize)]
struct Listing<T> {
    items: Vec<T>,
    pages: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCollection {
    id: String,
    #[serde(default)]
    public_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticleRef {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    public_url: Option<String>,
}

/// Help-center listing: collections first, then the articles of each.
pub struct DestinationClient<'a> {
    transport: &'a dyn Transport,
    base_url: String,
    auth: Auth,
}

impl<'a> DestinationClient<'a> {
    pub fn new(transport: &'a dyn Transport, base_url: &str, api_key: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth: Auth::Basic {
                user: api_key.to_string(),
                password: PLACEHOLDER_PASSWORD.to_string(),
            },
        }
    }

    pub async fn list_collections(&self) -> Result<Vec<Collection>, ReconcileError> {
        let endpoint = format!("{}/collections", self.base_url);
        let endpoint = endpoint.as_str();
        collect_pages(move |page| self.fetch_collections_page(endpoint, page)).await
    }

    pub async fn list_collection_documents(
        &self,
        collection: &Collection,
    ) -> Result<Vec<Document>, ReconcileError> {
        let endpoint = format!("{}/collections/{}/articles", self.base_url, collection.id);
        let endpoint = endpoint.as_str();
        collect_pages(move |page| self.fetch_articles_page(endpoint, page)).await
    }

    /// Articles of every collection. Collections are walked one after the
    /// other; each is fully paginated before the next begins.
    pub async fn list_documents(&self) -> Result<Vec<Document>, ReconcileError> {
        let collections = self.list_collections().await?;
        relink_info!("Fetched {} destination collection(s)", collections.len());

        let mut documents = Vec::new();
        for collection in &collections {
            let batch = self.list_collection_documents(collection).await?;
            relink_debug!(
                "Collection {}: {} article(s)",
                collection.url.as_deref().unwrap_or(&collection.id),
                batch.len()
            );
            documents.extend(batch);
        }

        relink_info!("Fetched {} destination article(s)", documents.len());
        Ok(documents)
    }

    async fn get_page(&self, endpoint: &str, page: u32) -> Result<serde_json::Value, ReconcileError> {
        let body = self
            .transport
            .get_json(endpoint, &self.auth, &[("page", page.to_string())])
            .await?;
        Ok(body)
    }

    async fn fetch_collections_page(
        &self,
        endpoint: &str,
        page: u32,
    ) -> Result<Page<Collection>, ReconcileError> {
        let body = self.get_page(endpoint, page).await?;
        let parsed: CollectionsPage = parse_page(endpoint, body)?;
        let listing = parsed.collections;
        relink_debug!(
            "{} page {} of {}: {} collection(s)",
            endpoint,
            page + 1,
            listing.pages,
            listing.items.len()
        );
        let items = listing
            .items
            .into_iter()
            .map(|raw| Collection {
                id: raw.id,
                url: raw.public_url,
            })
            .collect();
        Ok(Page {
            items,
            total_pages: listing.pages,
        })
    }

    async fn fetch_articles_page(
        &self,
        endpoint: &str,
        page: u32,
    ) -> Result<Page<Document>, ReconcileError> {
        let body = self.get_page(endpoint, page).await?;
        let parsed: ArticlesPage = parse_page(endpoint, body)?;
        let listing = parsed.articles;
        relink_debug!(
            "{} page {} of {}: {} article(s)",
            endpoint,
            page + 1,
            listing.pages,
            listing.items.len()
        );
        let items = listing
            .items
            .into_iter()
            .map(|raw| Document::new(raw.name.unwrap_or_default(), raw.public_url))
            .collect();
        Ok(Page {
            items,
            total_pages: listing.pages,
        })
    }
}
