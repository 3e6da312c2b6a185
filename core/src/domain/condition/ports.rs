use crate::domain::condition::{
    entities::errors::ConditionError,
    value_objects::{FieldPath, FieldType, ParameterType, Value},
};

/// Navigable entity root that dotted field names are resolved against.
pub trait EntityRoot {
    /// Alias used to qualify attributes owned by this entity.
    fn alias(&self) -> &str;

    /// Declared type of a direct attribute, `None` when the entity has no such attribute.
    fn attribute(&self, name: &str) -> Option<FieldType>;

    /// Entity reached through a single-valued association.
    fn association(&self, name: &str) -> Option<&dyn EntityRoot>;

    /// Resolves `dept.name` by walking `dept` and reading `name` on the
    /// associated entity.
    fn resolve(&self, name: &str) -> Result<FieldPath, ConditionError> {
        let unknown = || ConditionError::UnknownField(name.to_string());

        match name.split_once('.') {
            Some((association, rest)) => {
                let path = self
                    .association(association)
                    .ok_or_else(unknown)?
                    .resolve(rest)
                    .map_err(|_| unknown())?;
                Ok(path.with_name(name))
            }
            None => {
                let field_type = self.attribute(name).ok_or_else(unknown)?;
                Ok(FieldPath::new(name, self.alias(), field_type))
            }
        }
    }
}

/// Factory for typed predicates and their placeholders.
pub trait PredicateBuilder {
    type Predicate;
    type Parameter;

    fn parameter(&self, parameter_type: ParameterType, name: &str) -> Self::Parameter;

    fn equal(&self, path: &FieldPath, parameter: Self::Parameter) -> Self::Predicate;

    fn not_equal(&self, path: &FieldPath, parameter: Self::Parameter) -> Self::Predicate;

    fn less_than_or_equal_to(&self, path: &FieldPath, parameter: Self::Parameter)
    -> Self::Predicate;

    fn less_than(&self, path: &FieldPath, parameter: Self::Parameter) -> Self::Predicate;

    fn greater_than_or_equal_to(
        &self,
        path: &FieldPath,
        parameter: Self::Parameter,
    ) -> Self::Predicate;

    fn greater_than(&self, path: &FieldPath, parameter: Self::Parameter) -> Self::Predicate;

    fn between(
        &self,
        path: &FieldPath,
        from: Self::Parameter,
        to: Self::Parameter,
    ) -> Self::Predicate;

    fn is_in(&self, path: &FieldPath, parameter: Self::Parameter) -> Self::Predicate;

    fn like(&self, path: &FieldPath, parameter: Self::Parameter) -> Self::Predicate;

    /// Conjunction of every predicate.
    fn and(&self, predicates: Vec<Self::Predicate>) -> Self::Predicate;
}

/// Named-parameter binding on a prepared query.
#[cfg_attr(test, mockall::automock)]
pub trait QueryParameters {
    fn set_parameter(&mut self, name: &str, value: Value) -> Result<(), ConditionError>;
}
