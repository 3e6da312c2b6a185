use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::condition::{
    entities::{errors::ConditionError, operator::Operator},
    ports::{EntityRoot, PredicateBuilder, QueryParameters},
    value_objects::{FieldPath, Value},
};

/// A single named filter clause: field, operator and value.
///
/// Two conditions are equal when their name and operator match; the value
/// does not take part in equality, so a collection of conditions
/// deduplicates by clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    name: String,
    #[serde(default)]
    operator: Operator,
    #[serde(default)]
    value: Value,
    #[serde(skip)]
    path: Option<FieldPath>,
}

impl Condition {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_operator(name, Operator::Eq, value)
    }

    pub fn with_operator(
        name: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            operator,
            value: value.into(),
            path: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Field reference from the most recent `construct_predicate`.
    pub fn path(&self) -> Option<&FieldPath> {
        self.path.as_ref()
    }

    /// Placeholder names the condition declares, in binding order.
    pub fn placeholders(&self) -> Vec<String> {
        self.operator.placeholders(&self.name)
    }

    pub fn construct_textual_query(&self) -> String {
        self.operator.textual_fragment(&self.name)
    }

    /// Builds the predicate and returns it with a handle that can bind
    /// parameters without any further state checks.
    pub fn prepare<B>(
        &self,
        builder: &B,
        root: &dyn EntityRoot,
    ) -> Result<(B::Predicate, PreparedCondition), ConditionError>
    where
        B: PredicateBuilder + ?Sized,
    {
        let path = root.resolve(&self.name)?;
        debug!(
            field = %self.name,
            operator = self.operator.tag(),
            field_type = %path.field_type(),
            "constructing predicate"
        );
        let predicate = self.operator.construct_predicate(builder, &path, &self.name);

        Ok((
            predicate,
            PreparedCondition {
                name: self.name.clone(),
                operator: self.operator,
                path,
            },
        ))
    }

    /// Builds the predicate and remembers the resolved field for a later
    /// `bind_parameters`.
    ///
    /// Calling this again re-resolves the field; parameters bound before
    /// must be bound again against the query built from the new predicate.
    pub fn construct_predicate<B>(
        &mut self,
        builder: &B,
        root: &dyn EntityRoot,
    ) -> Result<B::Predicate, ConditionError>
    where
        B: PredicateBuilder + ?Sized,
    {
        let (predicate, prepared) = self.prepare(builder, root)?;
        self.store(prepared);
        Ok(predicate)
    }

    pub(crate) fn store(&mut self, prepared: PreparedCondition) {
        self.path = Some(prepared.path);
    }

    pub fn bind_parameters<Q>(&self, query: &mut Q, value: &Value) -> Result<(), ConditionError>
    where
        Q: QueryParameters + ?Sized,
    {
        let path = self.path.as_ref().ok_or_else(|| {
            ConditionError::InvalidState(format!(
                "predicate for `{}` must be constructed before binding parameters",
                self.name
            ))
        })?;

        self.operator
            .bind_parameters(query, &self.name, value, path.field_type())
    }

    /// Binds the condition's own value.
    pub fn bind_stored<Q>(&self, query: &mut Q) -> Result<(), ConditionError>
    where
        Q: QueryParameters + ?Sized,
    {
        self.bind_parameters(query, &self.value)
    }
}

impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.operator == other.operator
    }
}

impl Eq for Condition {}

impl Hash for Condition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.operator.hash(state);
    }
}

/// A condition whose predicate has been built; binding cannot fail on state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCondition {
    name: String,
    operator: Operator,
    path: FieldPath,
}

impl PreparedCondition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn bind<Q>(&self, query: &mut Q, value: &Value) -> Result<(), ConditionError>
    where
        Q: QueryParameters + ?Sized,
    {
        self.operator
            .bind_parameters(query, &self.name, value, self.path.field_type())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{
        domain::condition::{ports::MockQueryParameters, value_objects::FieldType},
        infrastructure::criteria::{
            builder::{Comparison, CriteriaBuilder, Predicate},
            parameters::NamedParameters,
            schema::EntitySchema,
        },
    };

    fn employees() -> EntitySchema {
        EntitySchema::new("employees")
            .with_attribute("age", FieldType::Int)
            .with_attribute("name", FieldType::Text)
            .with_association(
                "dept",
                EntitySchema::new("departments").with_attribute("name", FieldType::Text),
            )
    }

    #[test]
    fn test_new_defaults_to_eq() {
        let condition = Condition::new("age", 18);
        assert_eq!(condition.operator(), Operator::Eq);
        assert_eq!(condition.construct_textual_query(), "age = :age");
        assert!(condition.path().is_none());
    }

    #[test]
    fn test_equality_ignores_value() {
        let a = Condition::with_operator("age", Operator::Ge, 18);
        let b = Condition::with_operator("age", Operator::Ge, 65);
        let c = Condition::with_operator("age", Operator::Le, 18);
        let d = Condition::with_operator("dept.age", Operator::Ge, 18);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_age_ge_end_to_end() {
        let mut condition = Condition::with_operator("age", Operator::Ge, 18);
        assert_eq!(condition.construct_textual_query(), "age >= :age");

        let predicate = condition
            .construct_predicate(&CriteriaBuilder, &employees())
            .unwrap();
        match &predicate {
            Predicate::Comparison {
                path,
                comparison,
                parameter,
            } => {
                assert_eq!(*comparison, Comparison::GreaterThanOrEqual);
                assert_eq!(path.field_type(), FieldType::Int);
                assert_eq!(parameter.name, "age");
            }
            other => panic!("unexpected predicate {other:?}"),
        }

        let mut query = NamedParameters::new();
        condition.bind_stored(&mut query).unwrap();
        assert_eq!(query.get("age"), Some(&Value::Int(18)));
    }

    #[test]
    fn test_dotted_name_sanitized_consistently() {
        let mut condition = Condition::with_operator("dept.name", Operator::Like, "%eng%");
        assert_eq!(condition.construct_textual_query(), "dept.name like :dept0_name");

        let predicate = condition
            .construct_predicate(&CriteriaBuilder, &employees())
            .unwrap();
        let declared: Vec<_> = predicate.parameters().map(|p| p.name.clone()).collect();
        assert_eq!(declared, vec!["dept0_name".to_string()]);
        assert_eq!(condition.path().map(FieldPath::qualifier), Some("departments"));

        let mut query = MockQueryParameters::new();
        query
            .expect_set_parameter()
            .withf(|name, value| name == "dept0_name" && value == &Value::from("%eng%"))
            .times(1)
            .returning(|_, _| Ok(()));
        condition.bind_stored(&mut query).unwrap();
    }

    #[test]
    fn test_bind_before_construct_is_invalid_state() {
        let condition = Condition::new("age", 18);
        let mut query = MockQueryParameters::new();
        query.expect_set_parameter().never();

        let err = condition.bind_parameters(&mut query, &Value::Int(18)).unwrap_err();
        assert!(matches!(err, ConditionError::InvalidState(_)));
    }

    #[test]
    fn test_unknown_field_fails_construction() {
        let mut condition = Condition::new("dept.budget", 10);
        let err = condition
            .construct_predicate(&CriteriaBuilder, &employees())
            .unwrap_err();
        assert_eq!(err, ConditionError::UnknownField("dept.budget".to_string()));
        assert!(condition.path().is_none());
    }

    #[test]
    fn test_construct_twice_rebinds_against_latest_root() {
        let mut condition = Condition::new("age", "18");
        condition
            .construct_predicate(&CriteriaBuilder, &employees())
            .unwrap();

        let textual_age = EntitySchema::new("people").with_attribute("age", FieldType::Text);
        condition
            .construct_predicate(&CriteriaBuilder, &textual_age)
            .unwrap();

        let mut query = NamedParameters::new();
        condition.bind_stored(&mut query).unwrap();
        assert_eq!(query.get("age"), Some(&Value::from("18")));
    }

    #[test]
    fn test_prepared_condition_binds_override_value() {
        let condition = Condition::with_operator("age", Operator::Between, Value::Null);
        let (predicate, prepared) = condition.prepare(&CriteriaBuilder, &employees()).unwrap();
        assert!(matches!(predicate, Predicate::Between { .. }));
        assert!(condition.path().is_none());

        let mut query = NamedParameters::new();
        prepared.bind(&mut query, &Value::from([5, 6])).unwrap();
        assert_eq!(query.get("fromage"), Some(&Value::Int(5)));
        assert_eq!(query.get("toage"), Some(&Value::Int(6)));

        let err = prepared.bind(&mut query, &Value::from([5])).unwrap_err();
        assert!(matches!(err, ConditionError::IllegalArgument(_)));
    }

    #[test]
    fn test_deserialize_defaults_operator() {
        let condition: Condition =
            serde_json::from_str(r#"{"name": "age", "value": 18}"#).unwrap();
        assert_eq!(condition.operator(), Operator::Eq);
        assert_eq!(condition.value(), &Value::Int(18));

        let condition: Condition =
            serde_json::from_str(r#"{"name": "age", "operator": "between", "value": [1, 2]}"#)
                .unwrap();
        assert_eq!(condition.operator(), Operator::Between);
    }
}
