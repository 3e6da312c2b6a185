use sieve_core::domain::condition::entities::operator::Operator;
use thiserror::Error;

/// Limits and separators applied when parsing filter query strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub list_delimiter: char,
    pub max_conditions: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            list_delimiter: ',',
            max_conditions: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParamsError {
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),

    #[error("Malformed filter key `{0}`")]
    MalformedKey(String),

    #[error("Unknown operator `{operator}` for filter `{field}`")]
    UnknownOperator { field: String, operator: String },

    #[error("Too many filter conditions: at most {limit} allowed")]
    TooManyConditions { limit: usize },
}

/// Filter condition for a single field, as written in the query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

/// Parsed filter parameters
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub conditions: Vec<FilterCondition>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub filter: FilterParams,
}

impl QueryParams {
    pub fn from_query_str(query: &str, config: &FilterConfig) -> Result<Self, QueryParamsError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| QueryParamsError::MalformedQuery(e.to_string()))?;
        Self::from_pairs(&pairs, config)
    }

    /// Parse from decoded key/value pairs, keeping their order.
    /// Handles formats like:
    /// - filter[field]=value (defaults to eq)
    /// - filter[field][operator]=value
    ///
    /// Keys outside `filter[...]` are left to other extractors.
    pub fn from_pairs(
        pairs: &[(String, String)],
        config: &FilterConfig,
    ) -> Result<Self, QueryParamsError> {
        let mut filter = FilterParams::new();

        for (key, value) in pairs {
            let Some(filter_key) = key.strip_prefix("filter[") else {
                continue;
            };
            let Some(end_bracket) = filter_key.find(']') else {
                return Err(QueryParamsError::MalformedKey(key.clone()));
            };

            let field = &filter_key[..end_bracket];
            let remaining = &filter_key[end_bracket + 1..];
            if field.is_empty() {
                return Err(QueryParamsError::MalformedKey(key.clone()));
            }

            let operator = if remaining.is_empty() {
                Operator::Eq
            } else if remaining.starts_with('[') && remaining.ends_with(']') {
                let operator_str = &remaining[1..remaining.len() - 1];
                operator_str
                    .parse::<Operator>()
                    .map_err(|_| QueryParamsError::UnknownOperator {
                        field: field.to_string(),
                        operator: operator_str.to_string(),
                    })?
            } else {
                return Err(QueryParamsError::MalformedKey(key.clone()));
            };

            if filter.conditions.len() == config.max_conditions {
                return Err(QueryParamsError::TooManyConditions {
                    limit: config.max_conditions,
                });
            }

            filter.conditions.push(FilterCondition {
                field: field.to_string(),
                operator,
                value: value.clone(),
            });
        }

        Ok(Self { filter })
    }
}
