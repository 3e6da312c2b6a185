use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::condition::{
    entities::errors::ConditionError,
    value_objects::{FieldType, Value},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Coerces a loosely typed value to the declared field type.
///
/// `Null` passes through untouched. Lists never coerce to a scalar; callers
/// that accept collections walk the elements themselves.
pub fn convert(value: &Value, target: FieldType) -> Result<Value, ConditionError> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    let converted = match target {
        FieldType::Bool => to_bool(value),
        FieldType::Int => to_int(value),
        FieldType::Float => to_float(value),
        FieldType::Text => to_text(value),
        FieldType::Date => to_date(value),
        FieldType::DateTime => to_datetime(value),
        FieldType::Uuid => to_uuid(value),
    };

    converted.ok_or_else(|| ConditionError::Format {
        value: value.to_string(),
        target,
    })
}

fn to_bool(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(b) => Some(Value::Bool(*b)),
        Value::Int(0) => Some(Value::Bool(false)),
        Value::Int(1) => Some(Value::Bool(true)),
        Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn to_int(value: &Value) -> Option<Value> {
    match value {
        Value::Int(i) => Some(Value::Int(*i)),
        Value::Float(x) if x.fract() == 0.0 && x.is_finite() => {
            if *x >= i64::MIN as f64 && *x < i64::MAX as f64 {
                Some(Value::Int(*x as i64))
            } else {
                None
            }
        }
        Value::Text(s) => s.trim().parse::<i64>().ok().map(Value::Int),
        _ => None,
    }
}

fn to_float(value: &Value) -> Option<Value> {
    match value {
        Value::Float(x) => Some(Value::Float(*x)),
        Value::Int(i) => Some(Value::Float(*i as f64)),
        Value::Text(s) => s.trim().parse::<f64>().ok().map(Value::Float),
        _ => None,
    }
}

fn to_text(value: &Value) -> Option<Value> {
    match value {
        Value::Text(s) => Some(Value::Text(s.clone())),
        Value::List(_) => None,
        other => Some(Value::Text(other.to_string())),
    }
}

fn to_date(value: &Value) -> Option<Value> {
    match value {
        Value::Date(d) => Some(Value::Date(*d)),
        Value::DateTime(dt) => Some(Value::Date(dt.date_naive())),
        Value::Text(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .or_else(|| parse_datetime(s).map(|dt| dt.date_naive()))
                .map(Value::Date)
        }
        _ => None,
    }
}

fn to_datetime(value: &Value) -> Option<Value> {
    match value {
        Value::DateTime(dt) => Some(Value::DateTime(*dt)),
        Value::Date(d) => Some(Value::DateTime(d.and_time(NaiveTime::MIN).and_utc())),
        Value::Text(s) => {
            let s = s.trim();
            parse_datetime(s)
                .or_else(|| {
                    NaiveDate::parse_from_str(s, DATE_FORMAT)
                        .ok()
                        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
                })
                .map(Value::DateTime)
        }
        _ => None,
    }
}

fn to_uuid(value: &Value) -> Option<Value> {
    match value {
        Value::Uuid(u) => Some(Value::Uuid(*u)),
        Value::Text(s) => Uuid::parse_str(s.trim()).ok().map(Value::Uuid),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.and_utc())
        })
}
