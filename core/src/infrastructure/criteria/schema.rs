use std::collections::BTreeMap;

use crate::domain::condition::{ports::EntityRoot, value_objects::FieldType};

/// Entity description used as a navigation root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySchema {
    alias: String,
    attributes: BTreeMap<String, FieldType>,
    associations: BTreeMap<String, EntitySchema>,
}

impl EntitySchema {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.attributes.insert(name.into(), field_type);
        self
    }

    pub fn with_association(mut self, name: impl Into<String>, schema: EntitySchema) -> Self {
        self.associations.insert(name.into(), schema);
        self
    }
}

impl EntityRoot for EntitySchema {
    fn alias(&self) -> &str {
        &self.alias
    }

    fn attribute(&self, name: &str) -> Option<FieldType> {
        self.attributes.get(name).copied()
    }

    fn association(&self, name: &str) -> Option<&dyn EntityRoot> {
        self.associations
            .get(name)
            .map(|schema| schema as &dyn EntityRoot)
    }
}
