use sea_orm::{EntityTrait, IdenStatic, Iterable, ModelTrait};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Flattens a model into `column name -> value`, one entry per persisted
/// column. Relations are not part of a model, so they never show up here.
pub trait ToRecord {
    fn to_record(&self) -> Result<Map<String, Value>>;
}

impl<M> ToRecord for M
where
    M: ModelTrait + Serialize,
{
    fn to_record(&self) -> Result<Map<String, Value>> {
        let mut fields = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            other => {
                return Err(Error::Serialize(serde::ser::Error::custom(format!(
                    "model serialized to {other} instead of an object"
                ))))
            }
        };

        let record = <M::Entity as EntityTrait>::Column::iter()
            .map(|column| {
                let name = IdenStatic::as_str(&column);
                let value = fields.remove(name).unwrap_or(Value::Null);
                (name.to_string(), value)
            })
            .collect();

        Ok(record)
    }
}
