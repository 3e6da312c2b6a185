use std::collections::BTreeSet;

use sea_orm::{EntityTrait, QueryFilter, Select};
use tracing::error;

use crate::{
    domain::condition::{
        entities::errors::ConditionError,
        ports::QueryParameters,
        value_objects::Value,
    },
    infrastructure::{
        criteria::{NamedParameters, Predicate},
        orm::render::render_condition,
    },
};

/// A sea-orm select waiting for its predicate's parameters.
pub struct PreparedSelect<E: EntityTrait> {
    select: Select<E>,
    predicate: Predicate,
    declared: BTreeSet<String>,
    parameters: NamedParameters,
}

impl<E: EntityTrait> PreparedSelect<E> {
    pub fn new(select: Select<E>, predicate: Predicate) -> Self {
        let declared = predicate
            .parameters()
            .map(|p| p.name.clone())
            .collect();

        Self {
            select,
            predicate,
            declared,
            parameters: NamedParameters::new(),
        }
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn parameters(&self) -> &NamedParameters {
        &self.parameters
    }

    /// Applies the rendered predicate to the select.
    pub fn into_select(self) -> Result<Select<E>, ConditionError> {
        let condition = render_condition(&self.predicate, &self.parameters).map_err(|e| {
            error!("Failed to render predicate: {}", e);
            e
        })?;

        Ok(self.select.filter(condition))
    }
}

impl<E: EntityTrait> QueryParameters for PreparedSelect<E> {
    fn set_parameter(&mut self, name: &str, value: Value) -> Result<(), ConditionError> {
        if !self.declared.contains(name) {
            return Err(ConditionError::IllegalArgument(format!(
                "no parameter named `{name}` is declared"
            )));
        }
        self.parameters.set_parameter(name, value)
    }
}
