//! Output module
//!
//! Handles Arrow RecordBatch creation and Parquet file writing.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Tabulating row records into Arrow RecordBatches
//! - Reading tables back as JSON
//! - Writing Parquet files

mod schema;
mod writer;

pub use schema::{infer_schema, json_to_arrow, rows_to_table, table_to_json};
pub use writer::write_table_to_parquet;
