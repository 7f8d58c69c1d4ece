use std::{sync::Arc, time::Duration};

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    browse::CHARACTERS_QUERY,
    cache::{QueryKey, Staleness},
    error::AppResult,
    models::Character,
    templates,
};

/// Logical query name for single-character lookups (detail and compare).
const CHARACTER_QUERY: &str = "character";

pub async fn index() -> Html<String> {
    Html(templates::index_page())
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<i64>,
    name: Option<String>,
}

pub async fn characters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Html<String> {
    let page = clamp_page(query.page);
    let name = query.name.unwrap_or_default().trim().to_string();

    let key = QueryKey::new(CHARACTERS_QUERY, page, name.clone());
    let result = state.cache.get(key, Staleness::Never).await;

    if let Ok(listing) = &result {
        if listing.has_more {
            state
                .cache
                .prefetch(QueryKey::new(CHARACTERS_QUERY, page + 1, name.clone()), Staleness::Never);
        }
    }

    Html(templates::characters_page(page, &name, &result))
}

pub async fn character_detail(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Html<String>> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(anyhow::anyhow!("character name is required").into());
    }

    let key = QueryKey::new(CHARACTER_QUERY, 1, name.clone());
    let result = state.cache.get(key, Staleness::Never).await;

    Ok(Html(templates::character_page(&name, &result)))
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    first: Option<String>,
    second: Option<String>,
}

pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareQuery>,
) -> AppResult<Html<String>> {
    let first = query.first.unwrap_or_default().trim().to_string();
    let second = query.second.unwrap_or_default().trim().to_string();

    if first.is_empty() || second.is_empty() {
        return Ok(Html(templates::compare_picker_page(&first, &second)));
    }
    if first == second {
        return Err(anyhow::anyhow!("pick two different characters to compare").into());
    }

    // Two independent lookups, joined only at render.
    let (a, b) = tokio::join!(
        state.cache.get(QueryKey::new(CHARACTER_QUERY, 1, first.clone()), Staleness::Never),
        state.cache.get(QueryKey::new(CHARACTER_QUERY, 1, second.clone()), Staleness::Never),
    );
    let (a, b) = (a?, b?);

    Ok(Html(templates::compare_page(&first, &second, &a, &b)))
}

#[derive(Debug, Deserialize)]
pub struct ApiQuery {
    page: Option<i64>,
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRouteResponse {
    pub characters: Vec<Character>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// JSON proxy over the upstream catalog. Always replies 200; upstream
/// failures are reported in the `error` field instead of an HTTP error.
pub async fn api_character(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ApiQuery>,
) -> Json<CharacterRouteResponse> {
    let page = clamp_page(query.page);
    let name = query.name.unwrap_or_default().trim().to_string();

    let key = QueryKey::new(CHARACTERS_QUERY, page, name);
    let staleness = Staleness::After(Duration::from_secs(state.config.api_stale_secs));

    let response = match state.cache.get(key, staleness).await {
        Ok(listing) => CharacterRouteResponse {
            characters: listing.characters,
            has_more: listing.has_more,
            error: None,
        },
        Err(err) => CharacterRouteResponse {
            characters: Vec::new(),
            has_more: false,
            error: Some(err.to_string()),
        },
    };

    Json(response)
}

fn clamp_page(page: Option<i64>) -> u32 {
    page.unwrap_or(1).clamp(1, i64::from(u32::MAX)) as u32
}
