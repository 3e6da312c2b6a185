//! Turns parsed filter parameters into domain conditions.
//!
//! Values stay textual here. Coercion to the attribute's declared type
//! happens when the condition is bound against a resolved entity root.

use sieve_core::domain::condition::{
    entities::{condition::Condition, filter::Filter, operator::Operator},
    value_objects::Value,
};

use super::query_params::{FilterCondition, FilterConfig, FilterParams};

/// Helper to convert a single raw filter into a condition
pub fn to_condition(raw: &FilterCondition, config: &FilterConfig) -> Condition {
    let value = match raw.operator {
        Operator::Between | Operator::In => split_list(&raw.value, config.list_delimiter),
        _ => Value::Text(raw.value.clone()),
    };
    Condition::with_operator(raw.field.as_str(), raw.operator, value)
}

/// Helper to convert filter params to a filter
pub fn build_filter(filter: &FilterParams, config: &FilterConfig) -> Filter {
    filter
        .conditions
        .iter()
        .map(|raw| to_condition(raw, config))
        .collect()
}

fn split_list(raw: &str, delimiter: char) -> Value {
    if raw.trim().is_empty() {
        return Value::List(Vec::new());
    }
    Value::List(
        raw.split(delimiter)
            .map(|item| Value::Text(item.trim().to_string()))
            .collect(),
    )
}
