pub mod criteria;
pub mod orm;
