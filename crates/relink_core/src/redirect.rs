use url::Url;

use crate::Mapping;

/// Path, query and fragment of `url`, with scheme and host removed.
///
/// Input that is not an absolute URL is already relative to the site and is
/// returned unchanged.
pub fn redirect_path(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return url.to_string(),
    };
    let mut path = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        path.push('?');
        path.push_str(query);
    }
    if let Some(fragment) = parsed.fragment() {
        path.push('#');
        path.push_str(fragment);
    }
    path
}

/// A create-redirect call for one matched mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRequest {
    pub site_id: String,
    /// Source path registered on the destination site.
    pub url_mapping: String,
    /// Absolute destination URL.
    pub redirect: String,
}

impl RedirectRequest {
    /// `None` when the mapping has no destination, or no source URL to
    /// register the redirect under.
    pub fn for_mapping(site_id: &str, mapping: &Mapping) -> Option<Self> {
        let to = mapping.to.as_ref()?;
        if mapping.from.trim().is_empty() {
            return None;
        }
        Some(Self {
            site_id: site_id.to_string(),
            url_mapping: redirect_path(&mapping.from),
            redirect: to.clone(),
        })
    }
}
