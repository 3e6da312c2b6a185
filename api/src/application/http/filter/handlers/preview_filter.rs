use axum::Json;
use serde::Serialize;
use sieve_core::domain::condition::entities::filter::Filter;

use crate::application::http::query_extractor::FilterExtractor;

#[derive(Debug, Serialize)]
pub struct FilterPreviewResponse {
    /// Named-parameter query fragment, e.g. `age >= :age and dept.name like :dept0_name`
    pub query: String,
    /// Placeholder names in binding order
    pub placeholders: Vec<String>,
    pub conditions: Filter,
}

/// Compiles the request's `filter[...]` parameters without touching storage.
pub async fn preview_filter(
    FilterExtractor(filter): FilterExtractor,
) -> Json<FilterPreviewResponse> {
    let placeholders = filter
        .conditions()
        .iter()
        .flat_map(|condition| condition.placeholders())
        .collect();

    Json(FilterPreviewResponse {
        query: filter.construct_textual_query(),
        placeholders,
        conditions: filter,
    })
}
