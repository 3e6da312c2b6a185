pub mod filter;
pub mod query_builder;
pub mod query_extractor;
pub mod query_params;
pub mod server;
