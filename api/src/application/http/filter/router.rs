use axum::{Router, routing::get};

use super::handlers::preview_filter::preview_filter;
use crate::application::http::server::app_state::AppState;

pub fn filter_routes(root_path: &str) -> Router<AppState> {
    Router::new().route(&format!("{root_path}/filters/preview"), get(preview_filter))
}
