use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::condition::{
    entities::{condition::Condition, errors::ConditionError},
    ports::{EntityRoot, PredicateBuilder, QueryParameters},
};

/// Conjunction of conditions, keyed by clause (name and operator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause. A clause equal to an existing one replaces its value
    /// in place.
    pub fn add(&mut self, condition: Condition) {
        match self.conditions.iter_mut().find(|c| **c == condition) {
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.add(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn construct_textual_query(&self) -> String {
        self.conditions
            .iter()
            .map(Condition::construct_textual_query)
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Builds every condition, combined with `and`. Resolved paths are
    /// stored only when every condition resolves.
    pub fn construct_predicate<B>(
        &mut self,
        builder: &B,
        root: &dyn EntityRoot,
    ) -> Result<B::Predicate, ConditionError>
    where
        B: PredicateBuilder + ?Sized,
    {
        let mut seen = HashSet::new();
        for placeholder in self.conditions.iter().flat_map(Condition::placeholders) {
            if !seen.insert(placeholder.clone()) {
                return Err(ConditionError::IllegalArgument(format!(
                    "placeholder `{placeholder}` is declared by more than one condition"
                )));
            }
        }

        let (predicates, prepared): (Vec<_>, Vec<_>) = self
            .conditions
            .iter()
            .map(|condition| condition.prepare(builder, root))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();

        for (condition, prepared) in self.conditions.iter_mut().zip(prepared) {
            condition.store(prepared);
        }

        Ok(builder.and(predicates))
    }

    pub fn bind_parameters<Q>(&self, query: &mut Q) -> Result<(), ConditionError>
    where
        Q: QueryParameters + ?Sized,
    {
        self.conditions
            .iter()
            .try_for_each(|condition| condition.bind_stored(query))
    }
}

impl FromIterator<Condition> for Filter {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        let mut filter = Filter::new();
        for condition in iter {
            filter.add(condition);
        }
        filter
    }
}

impl IntoIterator for Filter {
    type Item = Condition;
    type IntoIter = std::vec::IntoIter<Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.conditions.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::condition::{
            entities::operator::Operator,
            value_objects::{FieldType, Value},
        },
        infrastructure::criteria::{
            builder::{CriteriaBuilder, Predicate},
            parameters::NamedParameters,
            schema::EntitySchema,
        },
    };

    fn employees() -> EntitySchema {
        EntitySchema::new("employees")
            .with_attribute("age", FieldType::Int)
            .with_attribute("name", FieldType::Text)
            .with_attribute("id", FieldType::Int)
    }

    #[test]
    fn test_add_replaces_equal_clause() {
        let filter = Filter::new()
            .with(Condition::with_operator("age", Operator::Ge, 18))
            .with(Condition::new("name", "Ada"))
            .with(Condition::with_operator("age", Operator::Ge, 21));

        assert_eq!(filter.len(), 2);
        assert_eq!(filter.conditions()[0].value(), &Value::Int(21));
        assert_eq!(filter.conditions()[1].name(), "name");
    }

    #[test]
    fn test_textual_query_joins_with_and() {
        let filter: Filter = [
            Condition::with_operator("age", Operator::Between, (18, 65)),
            Condition::with_operator("id", Operator::In, vec![1, 2]),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            filter.construct_textual_query(),
            "age between :fromage and :toage and id in :id"
        );
        assert_eq!(Filter::new().construct_textual_query(), "");
    }

    #[test]
    fn test_construct_and_bind_every_condition() {
        let mut filter = Filter::new()
            .with(Condition::with_operator("age", Operator::Between, ("18", "65")))
            .with(Condition::with_operator("id", Operator::In, vec![1, 2, 3]))
            .with(Condition::with_operator("name", Operator::Like, "A%"));

        let predicate = filter
            .construct_predicate(&CriteriaBuilder, &employees())
            .unwrap();
        match &predicate {
            Predicate::And(children) => assert_eq!(children.len(), 3),
            other => panic!("unexpected predicate {other:?}"),
        }

        let mut query = NamedParameters::new();
        filter.bind_parameters(&mut query).unwrap();
        assert_eq!(query.get("fromage"), Some(&Value::Int(18)));
        assert_eq!(query.get("toage"), Some(&Value::Int(65)));
        assert_eq!(query.get("id"), Some(&Value::from(vec![1, 2, 3])));
        assert_eq!(query.get("name"), Some(&Value::from("A%")));
    }

    #[test]
    fn test_conflicting_placeholders_rejected() {
        let mut filter = Filter::new()
            .with(Condition::with_operator("age", Operator::Ge, 18))
            .with(Condition::with_operator("age", Operator::Le, 65));

        let err = filter
            .construct_predicate(&CriteriaBuilder, &employees())
            .unwrap_err();
        assert!(matches!(err, ConditionError::IllegalArgument(_)));
    }

    #[test]
    fn test_failed_build_keeps_previous_paths() {
        let mut filter = Filter::new()
            .with(Condition::with_operator("age", Operator::Ge, 18))
            .with(Condition::new("salary", 1000));

        let err = filter
            .construct_predicate(&CriteriaBuilder, &employees())
            .unwrap_err();
        assert_eq!(err, ConditionError::UnknownField("salary".to_string()));
        assert!(filter.conditions().iter().all(|c| c.path().is_none()));

        let mut filter = Filter::new().with(Condition::new("age", "18"));
        filter
            .construct_predicate(&CriteriaBuilder, &employees())
            .unwrap();
        let retyped = EntitySchema::new("people").with_attribute("age", FieldType::Text);
        let mut filter = filter.with(Condition::new("salary", 1000));
        assert!(filter.construct_predicate(&CriteriaBuilder, &retyped).is_err());
        assert_eq!(
            filter.conditions()[0].path().map(|p| p.field_type()),
            Some(FieldType::Int)
        );
    }

    #[test]
    fn test_deserialize_from_list() {
        let filter: Filter = serde_json::from_str(
            r#"[{"name": "age", "operator": "ge", "value": 18}, {"name": "name", "value": "Ada"}]"#,
        )
        .unwrap();
        assert_eq!(filter.construct_textual_query(), "age >= :age and name = :name");
    }
}
