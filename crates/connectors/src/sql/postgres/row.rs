use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use model::{
    core::value::{FieldValue, Value},
    records::row::RowData,
};
use tokio_postgres::{
    Row as PgRow,
    types::{FromSql, Json as PgJson, Type},
};
use tracing::warn;
use uuid::Uuid;

/// Decodes every column of a result row into a [`RowData`] keyed by the
/// column names the server reports.
pub fn to_row_data(row: &PgRow, entity: &str) -> RowData {
    let field_values = row
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| FieldValue {
            name: column.name().to_string(),
            value: decode(row, idx, column.type_()),
        })
        .collect();

    RowData::new(entity, field_values)
}

fn decode(row: &PgRow, idx: usize, pg_type: &Type) -> Option<Value> {
    if *pg_type == Type::INT2 {
        get::<i16>(row, idx).map(|v| Value::Int(i64::from(v)))
    } else if *pg_type == Type::INT4 {
        get::<i32>(row, idx).map(|v| Value::Int(i64::from(v)))
    } else if *pg_type == Type::INT8 {
        get::<i64>(row, idx).map(Value::Int)
    } else if *pg_type == Type::FLOAT4 {
        get::<f32>(row, idx).map(|v| Value::Float(f64::from(v)))
    } else if *pg_type == Type::FLOAT8 {
        get::<f64>(row, idx).map(Value::Float)
    } else if *pg_type == Type::TEXT
        || *pg_type == Type::VARCHAR
        || *pg_type == Type::BPCHAR
        || *pg_type == Type::NAME
    {
        get::<String>(row, idx).map(Value::String)
    } else if *pg_type == Type::BOOL {
        get::<bool>(row, idx).map(Value::Boolean)
    } else if *pg_type == Type::UUID {
        get::<Uuid>(row, idx).map(Value::Uuid)
    } else if *pg_type == Type::DATE {
        get::<NaiveDate>(row, idx).map(Value::Date)
    } else if *pg_type == Type::TIMESTAMPTZ {
        get::<DateTime<Utc>>(row, idx).map(Value::Timestamp)
    } else if *pg_type == Type::TIMESTAMP {
        get::<NaiveDateTime>(row, idx).map(|v| Value::Timestamp(v.and_utc()))
    } else if *pg_type == Type::BYTEA {
        get::<Vec<u8>>(row, idx).map(Value::Bytes)
    } else if *pg_type == Type::JSON || *pg_type == Type::JSONB {
        get::<PgJson<serde_json::Value>>(row, idx).map(|PgJson(v)| Value::Json(v))
    } else {
        warn!(column = idx, pg_type = %pg_type, "Unsupported Postgres column type, decoding as NULL");
        None
    }
}

fn get<T>(row: &PgRow, idx: usize) -> Option<T>
where
    T: for<'a> FromSql<'a>,
{
    match row.try_get::<_, Option<T>>(idx) {
        Ok(value) => value,
        Err(err) => {
            warn!(column = idx, %err, "Failed to decode Postgres column");
            None
        }
    }
}
