use axum::Router;
use tracing::{debug, info_span};

use crate::application::http::{filter::router::filter_routes, server::app_state::AppState};

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let root_path = state.args.server.root_path.clone();
    debug!("Mounting filter routes under `{}`", root_path);

    let router = axum::Router::new()
        .merge(filter_routes(&root_path))
        .layer(trace_layer)
        .with_state(state);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use clap::Parser;

    use super::*;
    use crate::args::Args;

    #[test]
    fn test_router_builds_from_args() {
        let args = Args::parse_from(["sieve", "--server-root-path", "/api"]);
        let state = AppState::new(Arc::new(args));
        assert_eq!(state.filter_config.max_conditions, 32);
        assert!(router(state).is_ok());
    }
}
