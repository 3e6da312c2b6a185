use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use sieve_core::domain::condition::entities::filter::Filter;
use tracing::debug;

use super::{
    query_builder::build_filter,
    query_params::{FilterConfig, QueryParams},
};

/// Extractor for `filter[...]` query parameters
///
/// Usage:
/// ```rust,ignore
/// async fn handler(FilterExtractor(filter): FilterExtractor) -> String {
///     filter.construct_textual_query()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FilterExtractor(pub Filter);

impl<S> FromRequestParts<S> for FilterExtractor
where
    S: Send + Sync,
    FilterConfig: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = FilterConfig::from_ref(state);
        let query_string = parts.uri.query().unwrap_or("");

        let params = QueryParams::from_query_str(query_string, &config).map_err(|e| {
            debug!("Rejected filter query: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        })?;

        Ok(FilterExtractor(build_filter(&params.filter, &config)))
    }
}
