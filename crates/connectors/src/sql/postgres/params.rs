use crate::error::DbError;
use model::core::value::Value;
use tokio_postgres::types::{Json as PgJson, ToSql, Type};

pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    /// Binds `value` with its natural Rust representation.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Int(v) => PgParam(Box::new(v)),
            Value::Uint(v) => PgParam(Box::new(v as i64)),
            Value::Float(v) => PgParam(Box::new(v)),
            Value::String(v) => PgParam(Box::new(v)),
            Value::Boolean(v) => PgParam(Box::new(v)),
            Value::Json(v) => PgParam(Box::new(PgJson(v))),
            Value::Uuid(v) => PgParam(Box::new(v)),
            Value::Bytes(v) => PgParam(Box::new(v)),
            Value::Date(v) => PgParam(Box::new(v)),
            Value::Timestamp(v) => PgParam(Box::new(v)),
            Value::List(v) => PgParam(Box::new(
                v.iter().map(ToString::to_string).collect::<Vec<_>>(),
            )),
            Value::Null => PgParam(Box::new(Option::<String>::None)),
        }
    }

    /// Binds `value` as the parameter type the server inferred for its
    /// placeholder. The driver refuses, for example, an `i64` for an `int4`
    /// parameter, so integers are narrowed (with a range check) and numbers
    /// widened or stringified as needed.
    pub fn for_type(value: Value, pg_type: &Type) -> Result<Self, DbError> {
        match value {
            Value::Int(v) => Self::integer(i128::from(v), pg_type),
            Value::Uint(v) => Self::integer(i128::from(v), pg_type),
            Value::Float(v) if *pg_type == Type::FLOAT4 => Ok(PgParam(Box::new(v as f32))),
            Value::Float(v) if is_text(pg_type) => Ok(PgParam(Box::new(v.to_string()))),
            Value::Uuid(v) if is_text(pg_type) => Ok(PgParam(Box::new(v.to_string()))),
            Value::Timestamp(v) if *pg_type == Type::TIMESTAMP => {
                Ok(PgParam(Box::new(v.naive_utc())))
            }
            other => Ok(Self::from_value(other)),
        }
    }

    fn integer(v: i128, pg_type: &Type) -> Result<Self, DbError> {
        let out_of_range = || DbError::Coercion {
            value: v.to_string(),
            pg_type: pg_type.name().to_string(),
        };

        if *pg_type == Type::INT2 {
            Ok(PgParam(Box::new(i16::try_from(v).map_err(|_| out_of_range())?)))
        } else if *pg_type == Type::INT4 {
            Ok(PgParam(Box::new(i32::try_from(v).map_err(|_| out_of_range())?)))
        } else if *pg_type == Type::FLOAT4 {
            Ok(PgParam(Box::new(v as f32)))
        } else if *pg_type == Type::FLOAT8 {
            Ok(PgParam(Box::new(v as f64)))
        } else if is_text(pg_type) {
            Ok(PgParam(Box::new(v.to_string())))
        } else {
            Ok(PgParam(Box::new(i64::try_from(v).map_err(|_| out_of_range())?)))
        }
    }
}

fn is_text(pg_type: &Type) -> bool {
    *pg_type == Type::TEXT || *pg_type == Type::VARCHAR || *pg_type == Type::BPCHAR
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    /// Binds each value against the matching parameter type of a prepared
    /// statement.
    pub fn for_types(values: Vec<Value>, types: &[Type]) -> Result<Self, DbError> {
        if values.len() != types.len() {
            return Err(DbError::BindingCount {
                expected: types.len(),
                actual: values.len(),
            });
        }

        let params = values
            .into_iter()
            .zip(types)
            .map(|(value, pg_type)| PgParam::for_type(value, pg_type))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { params })
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }
}
