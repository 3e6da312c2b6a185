use std::collections::BTreeMap;

use crate::domain::condition::{
    entities::errors::ConditionError, ports::QueryParameters, value_objects::Value,
};

/// Parameter values bound by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedParameters {
    values: BTreeMap<String, Value>,
}

impl NamedParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl QueryParameters for NamedParameters {
    fn set_parameter(&mut self, name: &str, value: Value) -> Result<(), ConditionError> {
        self.values.insert(name.to_string(), value);
        Ok(())
    }
}
