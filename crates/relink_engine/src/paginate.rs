use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ResponseShapeError;

/// One page of a page-indexed collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

/// Drains a page-indexed collection, one page at a time.
///
/// Pages are requested from 0 upward and each request waits for the previous
/// one. The total is re-read from every page, so an API that only reports it
/// once the first page is served still terminates.
pub async fn collect_pages<T, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut items = Vec::new();
    let mut current_page = 0;
    let mut total_pages = 1;

    while current_page < total_pages {
        let page = fetch(current_page).await?;
        items.extend(page.items);
        total_pages = page.total_pages;
        current_page += 1;
    }

    Ok(items)
}

/// Validates a page body against its schema.
pub fn parse_page<S: DeserializeOwned>(endpoint: &str, body: Value) -> Result<S, ResponseShapeError> {
    serde_json::from_value(body).map_err(|err| ResponseShapeError {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}
