use std::sync::Arc;

use axum::extract::FromRef;

use crate::{application::http::query_params::FilterConfig, args::Args};

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub filter_config: FilterConfig,
}

impl AppState {
    pub fn new(args: Arc<Args>) -> Self {
        let filter_config = FilterConfig::from(args.filter.clone());
        Self {
            args,
            filter_config,
        }
    }
}

impl FromRef<AppState> for FilterConfig {
    fn from_ref(state: &AppState) -> Self {
        state.filter_config.clone()
    }
}
