use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::condition::{
    conversion::convert,
    entities::errors::ConditionError,
    ports::{PredicateBuilder, QueryParameters},
    value_objects::{FieldPath, FieldType, ParameterType, Value, placeholder_name},
};

/// Comparison operator of a condition.
///
/// Every variant carries three behaviours: its textual template, its
/// predicate constructor and its parameter binder. `between` and `in`
/// override the single-placeholder defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[default]
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
    Between,
    In,
    Like,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Le,
        Operator::Lt,
        Operator::Ge,
        Operator::Gt,
        Operator::Between,
        Operator::In,
        Operator::Like,
    ];

    /// Short tag, as used in query strings and serialized conditions.
    pub fn tag(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Le => "le",
            Operator::Lt => "lt",
            Operator::Ge => "ge",
            Operator::Gt => "gt",
            Operator::Between => "between",
            Operator::In => "in",
            Operator::Like => "like",
        }
    }

    /// Symbol emitted in the textual fragment.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Le => "<=",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Gt => ">",
            Operator::Between => "between",
            Operator::In => "in",
            Operator::Like => "like",
        }
    }

    /// Placeholder names this operator declares for `name`.
    pub fn placeholders(self, name: &str) -> Vec<String> {
        let clean = placeholder_name(name);
        match self {
            Operator::Between => vec![format!("from{clean}"), format!("to{clean}")],
            _ => vec![clean],
        }
    }

    pub fn textual_fragment(self, name: &str) -> String {
        let clean = placeholder_name(name);
        match self {
            Operator::Between => format!("{name} between :from{clean} and :to{clean}"),
            _ => format!("{name} {} :{clean}", self.symbol()),
        }
    }

    pub fn construct_predicate<B>(self, builder: &B, path: &FieldPath, name: &str) -> B::Predicate
    where
        B: PredicateBuilder + ?Sized,
    {
        let clean = placeholder_name(name);
        let scalar = ParameterType::Scalar(path.field_type());

        match self {
            Operator::Between => {
                let from = builder.parameter(scalar, &format!("from{clean}"));
                let to = builder.parameter(scalar, &format!("to{clean}"));
                builder.between(path, from, to)
            }
            Operator::In => {
                let parameter = builder.parameter(ParameterType::Collection, &clean);
                builder.is_in(path, parameter)
            }
            Operator::Eq => builder.equal(path, builder.parameter(scalar, &clean)),
            Operator::Ne => builder.not_equal(path, builder.parameter(scalar, &clean)),
            Operator::Le => builder.less_than_or_equal_to(path, builder.parameter(scalar, &clean)),
            Operator::Lt => builder.less_than(path, builder.parameter(scalar, &clean)),
            Operator::Ge => {
                builder.greater_than_or_equal_to(path, builder.parameter(scalar, &clean))
            }
            Operator::Gt => builder.greater_than(path, builder.parameter(scalar, &clean)),
            Operator::Like => builder.like(path, builder.parameter(scalar, &clean)),
        }
    }

    pub fn bind_parameters<Q>(
        self,
        query: &mut Q,
        name: &str,
        value: &Value,
        field_type: FieldType,
    ) -> Result<(), ConditionError>
    where
        Q: QueryParameters + ?Sized,
    {
        let clean = placeholder_name(name);

        match self {
            Operator::Between => {
                let (from, to) = match value.as_list() {
                    Some([from, to]) => (from, to),
                    _ => {
                        return Err(ConditionError::IllegalArgument(format!(
                            "value `{value}` for `{name}` must be a pair"
                        )));
                    }
                };
                let from = convert(from, field_type)?;
                let to = convert(to, field_type)?;
                debug!(field = name, from = %from, to = %to, "binding range parameters");
                query.set_parameter(&format!("from{clean}"), from)?;
                query.set_parameter(&format!("to{clean}"), to)
            }
            Operator::In => {
                let values = value.as_list().ok_or_else(|| {
                    ConditionError::IllegalArgument(format!(
                        "value `{value}` for `{name}` must be a list"
                    ))
                })?;
                let values = values
                    .iter()
                    .map(|v| convert(v, field_type))
                    .collect::<Result<Vec<_>, _>>()?;
                debug!(field = name, count = values.len(), "binding collection parameter");
                query.set_parameter(&clean, Value::List(values))
            }
            _ => {
                let value = convert(value, field_type)?;
                debug!(field = name, operator = self.tag(), value = %value, "binding parameter");
                query.set_parameter(&clean, value)
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Operator {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Operator::Eq),
            "ne" => Ok(Operator::Ne),
            "le" | "lte" => Ok(Operator::Le),
            "lt" => Ok(Operator::Lt),
            "ge" | "gte" => Ok(Operator::Ge),
            "gt" => Ok(Operator::Gt),
            "between" => Ok(Operator::Between),
            "in" => Ok(Operator::In),
            "like" => Ok(Operator::Like),
            _ => Err(ConditionError::IllegalArgument(format!(
                "unknown operator `{s}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::condition::ports::MockQueryParameters;

    #[test]
    fn test_textual_fragment_single_placeholder() {
        for operator in Operator::ALL.into_iter().filter(|o| *o != Operator::Between) {
            assert_eq!(
                operator.textual_fragment("dept.age"),
                format!("dept.age {} :dept0_age", operator.symbol())
            );
        }
        assert_eq!(Operator::Le.textual_fragment("age"), "age <= :age");
        assert_eq!(Operator::Lt.textual_fragment("age"), "age < :age");
        assert_eq!(Operator::Gt.textual_fragment("age"), "age > :age");
        assert_eq!(Operator::In.textual_fragment("id"), "id in :id");
        assert_eq!(Operator::Like.textual_fragment("dept.name"), "dept.name like :dept0_name");
    }

    #[test]
    fn test_textual_fragment_between() {
        assert_eq!(
            Operator::Between.textual_fragment("dept.budget"),
            "dept.budget between :fromdept0_budget and :todept0_budget"
        );
    }

    #[test]
    fn test_from_str_accepts_tags_and_aliases() {
        for operator in Operator::ALL {
            assert_eq!(operator.tag().parse::<Operator>(), Ok(operator));
        }
        assert_eq!("gte".parse::<Operator>(), Ok(Operator::Ge));
        assert_eq!("lte".parse::<Operator>(), Ok(Operator::Le));
        assert!(matches!(
            "ilike".parse::<Operator>(),
            Err(ConditionError::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_bind_between_requires_pair() {
        for value in [Value::from(vec![5]), Value::from(vec![5, 6, 7]), Value::Int(5)] {
            let mut query = MockQueryParameters::new();
            query.expect_set_parameter().never();
            let err = Operator::Between
                .bind_parameters(&mut query, "age", &value, FieldType::Int)
                .unwrap_err();
            assert!(matches!(err, ConditionError::IllegalArgument(_)));
        }
    }

    #[test]
    fn test_bind_between_binds_both_bounds() {
        let mut query = MockQueryParameters::new();
        query
            .expect_set_parameter()
            .withf(|name, value| name == "fromage" && value == &Value::Int(5))
            .times(1)
            .returning(|_, _| Ok(()));
        query
            .expect_set_parameter()
            .withf(|name, value| name == "toage" && value == &Value::Int(6))
            .times(1)
            .returning(|_, _| Ok(()));

        Operator::Between
            .bind_parameters(&mut query, "age", &Value::from(("5", "6")), FieldType::Int)
            .unwrap();
    }

    #[test]
    fn test_bind_in_coerces_each_element() {
        let mut query = MockQueryParameters::new();
        query
            .expect_set_parameter()
            .withf(|name, value| {
                name == "id" && value == &Value::from(vec![1, 2, 3])
            })
            .times(1)
            .returning(|_, _| Ok(()));

        Operator::In
            .bind_parameters(&mut query, "id", &Value::from(vec!["1", "2", "3"]), FieldType::Int)
            .unwrap();
    }

    #[test]
    fn test_bind_in_rejects_scalar() {
        let mut query = MockQueryParameters::new();
        query.expect_set_parameter().never();
        let err = Operator::In
            .bind_parameters(&mut query, "id", &Value::Int(1), FieldType::Int)
            .unwrap_err();
        assert!(matches!(err, ConditionError::IllegalArgument(_)));
    }

    #[test]
    fn test_bind_like_keeps_pattern() {
        let mut query = MockQueryParameters::new();
        query
            .expect_set_parameter()
            .withf(|name, value| name == "dept0_name" && value == &Value::from("%eng%"))
            .times(1)
            .returning(|_, _| Ok(()));

        Operator::Like
            .bind_parameters(&mut query, "dept.name", &Value::from("%eng%"), FieldType::Text)
            .unwrap();
    }

    #[test]
    fn test_bind_propagates_format_error() {
        let mut query = MockQueryParameters::new();
        query.expect_set_parameter().never();
        let err = Operator::Eq
            .bind_parameters(&mut query, "age", &Value::from("old"), FieldType::Int)
            .unwrap_err();
        assert!(matches!(err, ConditionError::Format { .. }));
    }
}
