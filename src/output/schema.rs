//! Row tabulation
//!
//! Converts serializable row records into Arrow RecordBatches and back.
//! Column order follows first appearance, which for row structs is field
//! order.

use crate::error::{Error, Result};
use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, NullArray, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Tabulate row records
pub fn rows_to_table<R: Serialize>(rows: &[R]) -> Result<RecordBatch> {
    let records = rows
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    json_to_arrow(&records)
}

/// Infer an Arrow schema from a set of JSON records
///
/// Every field is nullable. Columns that are null in every record stay
/// `Null`-typed; columns mixing incompatible types fall back to `Utf8`.
pub fn infer_schema(records: &[Value]) -> Result<Schema> {
    let mut names: Vec<String> = Vec::new();
    let mut types: HashMap<String, DataType> = HashMap::new();

    for record in records {
        let Value::Object(obj) = record else {
            return Err(Error::output("Rows must serialize to JSON objects"));
        };
        for (key, value) in obj {
            let inferred_type = infer_type(value);
            match types.get_mut(key) {
                Some(existing) => *existing = merge_types(existing, &inferred_type),
                None => {
                    names.push(key.clone());
                    types.insert(key.clone(), inferred_type);
                }
            }
        }
    }

    let fields: Vec<Field> = names
        .into_iter()
        .map(|name| {
            let dtype = types.remove(&name).unwrap_or(DataType::Null);
            Field::new(name, dtype, true)
        })
        .collect();

    Ok(Schema::new(fields))
}

/// Convert JSON records to an Arrow RecordBatch
pub fn json_to_arrow(records: &[Value]) -> Result<RecordBatch> {
    let schema = Arc::new(infer_schema(records)?);

    if records.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let values: Vec<Option<&Value>> = records
            .iter()
            .map(|record| record.get(field.name()).filter(|v| !v.is_null()))
            .collect();
        columns.push(build_array(&values, field.data_type()));
    }

    RecordBatch::try_new(schema, columns).map_err(|e| Error::Output {
        message: format!("Failed to create RecordBatch: {e}"),
    })
}

/// Infer Arrow DataType from a JSON value
fn infer_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Bool(_) => DataType::Boolean,
        Value::Number(n) => {
            if n.is_i64() {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        // Nested values are kept as JSON text
        Value::String(_) | Value::Array(_) | Value::Object(_) => DataType::Utf8,
    }
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        (a, b) if a == b => a.clone(),
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }
        _ => DataType::Utf8,
    }
}

/// Build an Arrow array from JSON values
fn build_array(values: &[Option<&Value>], data_type: &DataType) -> ArrayRef {
    match data_type {
        DataType::Boolean => {
            let arr: BooleanArray = values.iter().map(|v| v.and_then(Value::as_bool)).collect();
            Arc::new(arr)
        }

        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(Value::as_i64)).collect();
            Arc::new(arr)
        }

        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(Value::as_f64)).collect();
            Arc::new(arr)
        }

        DataType::Utf8 => {
            let arr: StringArray = values
                .iter()
                .map(|v| {
                    v.map(|v| match v {
                        Value::String(s) => s.clone(),
                        _ => v.to_string(),
                    })
                })
                .collect();
            Arc::new(arr)
        }

        _ => Arc::new(NullArray::new(values.len())),
    }
}

/// Read a table back into JSON records, one object per row
pub fn table_to_json(batch: &RecordBatch) -> Result<Vec<Value>> {
    let schema = batch.schema();
    let mut records = Vec::with_capacity(batch.num_rows());

    for row_idx in 0..batch.num_rows() {
        let mut record = serde_json::Map::new();
        for (col_idx, field) in schema.fields().iter().enumerate() {
            let value = array_value_to_json(batch.column(col_idx).as_ref(), row_idx)?;
            record.insert(field.name().clone(), value);
        }
        records.push(Value::Object(record));
    }

    Ok(records)
}

/// Convert a single array element to JSON
fn array_value_to_json(array: &dyn Array, row: usize) -> Result<Value> {
    if array.is_null(row) {
        return Ok(Value::Null);
    }

    let downcast_error = |name: &str| Error::Output {
        message: format!("Failed to downcast to {name}"),
    };

    match array.data_type() {
        DataType::Null => Ok(Value::Null),

        DataType::Boolean => {
            let arr = array
                .as_any()
                .downcast_ref::<BooleanArray>()
                .ok_or_else(|| downcast_error("BooleanArray"))?;
            Ok(Value::Bool(arr.value(row)))
        }

        DataType::Int64 => {
            let arr = array
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(|| downcast_error("Int64Array"))?;
            Ok(Value::Number(arr.value(row).into()))
        }

        DataType::Float64 => {
            let arr = array
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| downcast_error("Float64Array"))?;
            Ok(serde_json::Number::from_f64(arr.value(row)).map_or(Value::Null, Value::Number))
        }

        DataType::Utf8 => {
            let arr = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| downcast_error("StringArray"))?;
            Ok(Value::String(arr.value(row).to_string()))
        }

        other => Err(Error::output(format!("Unsupported column type {other:?}"))),
    }
}
