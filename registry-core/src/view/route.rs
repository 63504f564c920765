//! Screen Routing
//!
//! A list ID in the page's query string opens that list directly.

use url::Url;

use crate::domain::{DomainError, DomainResult, ListId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Index,
    Detail(ListId),
}

impl Screen {
    /// Pick the screen from a query string (with or without the leading `?`).
    pub fn from_query(query: &str, param: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let raw = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == param)
            .map(|(_, value)| value.into_owned());
        match raw {
            None => Screen::Index,
            Some(raw) => match ListId::parse(&raw) {
                Ok(id) => Screen::Detail(id),
                Err(e) => {
                    log::warn!("ignoring deep link: {}", e);
                    Screen::Index
                }
            },
        }
    }

    pub fn from_url(href: &str, param: &str) -> Self {
        match Url::parse(href) {
            Ok(url) => Self::from_query(url.query().unwrap_or_default(), param),
            Err(e) => {
                log::warn!("unreadable page url {}: {}", href, e);
                Screen::Index
            }
        }
    }

    pub fn list_id(&self) -> Option<&ListId> {
        match self {
            Screen::Index => None,
            Screen::Detail(id) => Some(id),
        }
    }
}

/// Link that opens `id` on the page at `href`. Any existing query or
/// fragment is dropped.
pub fn share_link(href: &str, id: &ListId, param: &str) -> DomainResult<String> {
    let mut url = Url::parse(href)
        .map_err(|e| DomainError::InvalidInput(format!("page url {}: {}", href, e)))?;
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair(param, id.as_str());
    Ok(url.into())
}
