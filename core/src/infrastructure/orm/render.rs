use sea_orm::{
    Condition as SeaCondition, Value as SeaValue,
    sea_query::{Alias, Expr, SimpleExpr},
};

use crate::{
    domain::condition::{
        entities::errors::ConditionError,
        value_objects::{FieldPath, Parameter, ParameterType, Value},
    },
    infrastructure::criteria::{Comparison, NamedParameters, Predicate},
};

/// Renders a predicate tree into a sea-orm condition, substituting every
/// placeholder with its bound value.
pub fn render_condition(
    predicate: &Predicate,
    parameters: &NamedParameters,
) -> Result<SeaCondition, ConditionError> {
    let expr = match predicate {
        Predicate::And(children) => {
            return children.iter().try_fold(
                SeaCondition::all(),
                |condition, child| -> Result<SeaCondition, ConditionError> {
                    Ok(condition.add(render_condition(child, parameters)?))
                },
            );
        }
        Predicate::Comparison {
            path,
            comparison,
            parameter,
        } => render_comparison(path, *comparison, bound(parameters, parameter)?)?,
        Predicate::Between { path, from, to } => column(path).between(
            bound_scalar(parameters, from)?,
            bound_scalar(parameters, to)?,
        ),
        Predicate::In { path, parameter } => {
            let values = bound(parameters, parameter)?
                .as_list()
                .ok_or_else(|| shape_mismatch(parameter))?
                .iter()
                .map(to_sea_value)
                .collect::<Result<Vec<_>, _>>()?;
            column(path).is_in(values)
        }
        Predicate::Like { path, parameter } => match bound(parameters, parameter)? {
            Value::Text(pattern) => column(path).like(pattern.as_str()),
            other => {
                return Err(ConditionError::IllegalArgument(format!(
                    "pattern for `{}` must be text, got `{other}`",
                    parameter.name
                )));
            }
        },
    };

    Ok(SeaCondition::all().add(expr))
}

fn render_comparison(
    path: &FieldPath,
    comparison: Comparison,
    value: &Value,
) -> Result<SimpleExpr, ConditionError> {
    let column = column(path);
    let expr = match (comparison, value) {
        (Comparison::Equal, Value::Null) => column.is_null(),
        (Comparison::NotEqual, Value::Null) => column.is_not_null(),
        (comparison, value) => {
            let value = to_sea_value(value)?;
            match comparison {
                Comparison::Equal => column.eq(value),
                Comparison::NotEqual => column.ne(value),
                Comparison::LessThanOrEqual => column.lte(value),
                Comparison::LessThan => column.lt(value),
                Comparison::GreaterThanOrEqual => column.gte(value),
                Comparison::GreaterThan => column.gt(value),
            }
        }
    };
    Ok(expr)
}

fn column(path: &FieldPath) -> Expr {
    Expr::col((Alias::new(path.qualifier()), Alias::new(path.attribute())))
}

fn bound<'a>(
    parameters: &'a NamedParameters,
    parameter: &Parameter,
) -> Result<&'a Value, ConditionError> {
    let value = parameters.get(&parameter.name).ok_or_else(|| {
        ConditionError::InvalidState(format!("parameter `{}` is not bound", parameter.name))
    })?;

    let matches = match parameter.parameter_type {
        ParameterType::Scalar(_) => value.as_list().is_none(),
        ParameterType::Collection => value.as_list().is_some(),
    };
    if matches {
        Ok(value)
    } else {
        Err(shape_mismatch(parameter))
    }
}

fn bound_scalar(
    parameters: &NamedParameters,
    parameter: &Parameter,
) -> Result<SeaValue, ConditionError> {
    to_sea_value(bound(parameters, parameter)?)
}

fn shape_mismatch(parameter: &Parameter) -> ConditionError {
    let expected = match parameter.parameter_type {
        ParameterType::Scalar(field_type) => format!("a {field_type} value"),
        ParameterType::Collection => "a list".to_string(),
    };
    ConditionError::IllegalArgument(format!(
        "parameter `{}` expects {expected}",
        parameter.name
    ))
}

pub fn to_sea_value(value: &Value) -> Result<SeaValue, ConditionError> {
    let value = match value {
        Value::Null => SeaValue::String(None),
        Value::Bool(b) => (*b).into(),
        Value::Int(i) => (*i).into(),
        Value::Float(x) => (*x).into(),
        Value::Text(s) => s.clone().into(),
        Value::Date(d) => (*d).into(),
        Value::DateTime(dt) => (*dt).into(),
        Value::Uuid(u) => (*u).into(),
        Value::List(_) => {
            return Err(ConditionError::IllegalArgument(format!(
                "list `{value}` cannot be used as a scalar"
            )));
        }
    };
    Ok(value)
}
