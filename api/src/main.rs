use std::sync::Arc;

use clap::Parser;
use sieve_api::{
    application::{
        http::server::{app_state::AppState, http_server::router},
        telemetry::init_tracing,
    },
    args::Args,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Arc::new(Args::parse());
    init_tracing(&args.log)?;

    let addr = format!("{}:{}", args.server.host, args.server.port);
    let router = router(AppState::new(args))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
