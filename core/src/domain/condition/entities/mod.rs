pub mod condition;
pub mod errors;
pub mod filter;
pub mod operator;
