use std::{num::NonZeroU32, sync::Arc};

use futures::{FutureExt, future::BoxFuture};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    cache::FetchPages,
    error::FetchError,
    models::{Character, CharacterPage},
};

/// Client for the public Disney character API.
#[derive(Clone)]
pub struct DisneyClient {
    client: reqwest::Client,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl DisneyClient {
    pub fn new(client: reqwest::Client, base_url: String, rps: u32) -> Self {
        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, base_url, limiter }
    }

    /// Fetches one page of characters, optionally filtered by name. Pages
    /// below 1 are clamped rather than rejected; an empty name means no
    /// filter and is passed through as-is.
    pub async fn fetch_page(&self, page: u32, name: &str) -> Result<CharacterPage, FetchError> {
        let page = page.max(1);
        self.limiter.until_ready().await;

        let url = format!("{}/character", self.base_url.trim_end_matches('/'));
        debug!(page = page, name = %name, "fetching character page");

        let response = self
            .client
            .get(url)
            .query(&[("page", page.to_string().as_str()), ("name", name)])
            .send()
            .await
            .map_err(|err| FetchError::Upstream(err.to_string()))?
            .error_for_status()
            .map_err(|err| FetchError::Upstream(err.to_string()))?;

        // A body that is not JSON at all counts as an unavailable upstream,
        // not a malformed payload.
        let payload: serde_json::Value =
            response.json().await.map_err(|err| FetchError::Upstream(err.to_string()))?;

        parse_catalog_payload(payload)
    }
}

impl FetchPages for DisneyClient {
    fn fetch(&self, page: u32, filter: &str) -> BoxFuture<'static, Result<CharacterPage, FetchError>> {
        let client = self.clone();
        let filter = filter.to_string();
        async move { client.fetch_page(page, &filter).await }.boxed()
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    info: PageInfo,
}

#[derive(Debug, Default, Deserialize)]
struct PageInfo {
    #[serde(rename = "nextPage")]
    next_page: Option<String>,
}

/// Normalizes the upstream envelope into a page of characters.
///
/// The API returns `data` as a list for most queries but as a bare object
/// when a name filter matches exactly one character; both shapes end up as a
/// list here. Missing fields on an item become empty; items that cannot be
/// read as a character at all are skipped.
fn parse_catalog_payload(payload: serde_json::Value) -> Result<CharacterPage, FetchError> {
    if !payload.is_object() {
        return Err(FetchError::MalformedPayload(format!(
            "expected a response object, got {}",
            json_kind(&payload)
        )));
    }

    let envelope: Envelope = serde_json::from_value(payload)
        .map_err(|err| FetchError::MalformedPayload(err.to_string()))?;

    let items = match envelope.data {
        serde_json::Value::Array(items) => items,
        object @ serde_json::Value::Object(_) => vec![object],
        serde_json::Value::Null => Vec::new(),
        other => {
            return Err(FetchError::MalformedPayload(format!(
                "expected data to be an object or array, got {}",
                json_kind(&other)
            )));
        },
    };

    let characters: Vec<Character> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Character>(item) {
            Ok(character) if !character.name.is_empty() => Some(character),
            Ok(_) => {
                warn!("dropping character entry with no name");
                None
            },
            Err(err) => {
                warn!(error = %err, "dropping unreadable character entry");
                None
            },
        })
        .collect();

    Ok(CharacterPage { characters, has_more: envelope.info.next_page.is_some() })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
