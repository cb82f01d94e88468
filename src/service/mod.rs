//! Orchestration
//!
//! `HighLevelService` turns the location's entities into one table per
//! entity type. Table methods never fail: any error is logged and the table
//! comes back empty. The `try_*` variants return the error instead.
//!
//! Contacts and opportunities also feed two accumulators owned by the
//! service: attribution rows and contact custom-field values. They only grow.

mod api;

pub use api::{HighLevelApi, BULK_LIMIT};

use crate::error::Result;
use crate::extract::{
    extract_calendar_events, extract_contacts, extract_custom_fields, extract_custom_values,
    extract_opportunities, extract_pipelines, extract_users, AttributionRow, CustomFieldValueRow,
};
use crate::models::User;
use crate::output::rows_to_table;
use crate::session::Session;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use std::sync::Arc;
use tracing::{error, info};

/// Table names in export order
pub const TABLES: [&str; 9] = [
    "users",
    "calendar_events",
    "custom_fields",
    "custom_values",
    "pipelines",
    "contacts",
    "opportunities",
    "attributions",
    "custom_field_values",
];

/// Per-location table builder
#[derive(Debug)]
pub struct HighLevelService {
    api: HighLevelApi,
    users: Vec<User>,
    attributions: Vec<AttributionRow>,
    custom_field_values: Vec<CustomFieldValueRow>,
}

impl HighLevelService {
    /// Service over a new [`HighLevelApi`] for one location
    pub fn new(session: Session, location_id: impl Into<String>) -> Self {
        Self::from_api(HighLevelApi::new(session, location_id))
    }

    /// Service over an existing API, with empty accumulators
    pub fn from_api(api: HighLevelApi) -> Self {
        Self {
            api,
            users: Vec::new(),
            attributions: Vec::new(),
            custom_field_values: Vec::new(),
        }
    }

    /// Underlying fetch helpers
    pub fn api(&self) -> &HighLevelApi {
        &self.api
    }

    /// Users from the latest users fetch
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Attribution rows gathered so far, contacts and opportunities alike
    pub fn attributions(&self) -> &[AttributionRow] {
        &self.attributions
    }

    /// Custom-field value rows gathered so far
    pub fn custom_field_values(&self) -> &[CustomFieldValueRow] {
        &self.custom_field_values
    }

    // ------------------------------------------------------------------------
    // Fallible tables
    // ------------------------------------------------------------------------

    /// Users table; the users are kept for the calendar events table
    pub async fn try_users_table(&mut self) -> Result<RecordBatch> {
        self.users = self.api.fetch_users().await?;
        rows_to_table(&extract_users(&self.users))
    }

    /// Events of the week starting at `date` for every known user
    ///
    /// Users are fetched first when none are known yet.
    pub async fn try_calendar_events_table(&mut self, date: &str) -> Result<RecordBatch> {
        if self.users.is_empty() {
            self.users = self.api.fetch_users().await?;
        }
        let events = self.api.fetch_calendar_events(date, &self.users).await?;
        rows_to_table(&extract_calendar_events(&events))
    }

    /// Custom field definitions of the location
    pub async fn try_custom_fields_table(&mut self) -> Result<RecordBatch> {
        let fields = self.api.fetch_custom_fields().await?;
        rows_to_table(&extract_custom_fields(&fields))
    }

    /// Custom values of the location
    pub async fn try_custom_values_table(&mut self) -> Result<RecordBatch> {
        let values = self.api.fetch_custom_values().await?;
        rows_to_table(&extract_custom_values(&values))
    }

    /// One row per pipeline stage
    pub async fn try_pipelines_table(&mut self) -> Result<RecordBatch> {
        let pipelines = self.api.fetch_pipelines().await?;
        rows_to_table(&extract_pipelines(&pipelines))
    }

    /// Contacts table; their attributions and custom field values are accumulated
    pub async fn try_contacts_table(&mut self) -> Result<RecordBatch> {
        let contacts = self.api.fetch_contacts().await?;
        let extraction = extract_contacts(&contacts);

        self.append_attributions("contacts", extraction.attributions);
        let added = extraction.custom_field_values.len();
        self.custom_field_values.extend(extraction.custom_field_values);
        info!(
            added,
            total = self.custom_field_values.len(),
            "Accumulated custom field values"
        );

        rows_to_table(&extraction.contacts)
    }

    /// Opportunities table; their attributions are accumulated
    pub async fn try_opportunities_table(&mut self) -> Result<RecordBatch> {
        let opportunities = self.api.fetch_opportunities().await?;
        let extraction = extract_opportunities(&opportunities);
        self.append_attributions("opportunities", extraction.attributions);
        rows_to_table(&extraction.opportunities)
    }

    /// Every attribution accumulated so far
    pub fn try_attributions_table(&self) -> Result<RecordBatch> {
        rows_to_table(&self.attributions)
    }

    /// Every custom field value accumulated so far
    pub fn try_custom_field_values_table(&self) -> Result<RecordBatch> {
        rows_to_table(&self.custom_field_values)
    }

    // ------------------------------------------------------------------------
    // Tables
    //
    // Same as the fallible builders, but a failure is logged and yields
    // `empty_table()`.
    // ------------------------------------------------------------------------

    /// Users, or an empty table on failure
    pub async fn users_table(&mut self) -> RecordBatch {
        table_or_empty("users", self.try_users_table().await)
    }

    /// Calendar events of the week starting at `date`, or an empty table
    pub async fn calendar_events_table(&mut self, date: &str) -> RecordBatch {
        table_or_empty("calendar_events", self.try_calendar_events_table(date).await)
    }

    /// Custom fields, or an empty table on failure
    pub async fn custom_fields_table(&mut self) -> RecordBatch {
        table_or_empty("custom_fields", self.try_custom_fields_table().await)
    }

    /// Custom values, or an empty table on failure
    pub async fn custom_values_table(&mut self) -> RecordBatch {
        table_or_empty("custom_values", self.try_custom_values_table().await)
    }

    /// Pipeline stages, or an empty table on failure
    pub async fn pipelines_table(&mut self) -> RecordBatch {
        table_or_empty("pipelines", self.try_pipelines_table().await)
    }

    /// Contacts, or an empty table on failure
    pub async fn contacts_table(&mut self) -> RecordBatch {
        table_or_empty("contacts", self.try_contacts_table().await)
    }

    /// Opportunities, or an empty table on failure
    pub async fn opportunities_table(&mut self) -> RecordBatch {
        table_or_empty("opportunities", self.try_opportunities_table().await)
    }

    /// Accumulated attributions
    pub fn attributions_table(&self) -> RecordBatch {
        table_or_empty("attributions", self.try_attributions_table())
    }

    /// Accumulated custom field values
    pub fn custom_field_values_table(&self) -> RecordBatch {
        table_or_empty("custom_field_values", self.try_custom_field_values_table())
    }

    /// Build the table called `name`, one of [`TABLES`]
    ///
    /// Returns `None` for an unknown name.
    pub async fn table(&mut self, name: &str, date: &str) -> Option<RecordBatch> {
        let batch = match name {
            "users" => self.users_table().await,
            "calendar_events" => self.calendar_events_table(date).await,
            "custom_fields" => self.custom_fields_table().await,
            "custom_values" => self.custom_values_table().await,
            "pipelines" => self.pipelines_table().await,
            "contacts" => self.contacts_table().await,
            "opportunities" => self.opportunities_table().await,
            "attributions" => self.attributions_table(),
            "custom_field_values" => self.custom_field_values_table(),
            _ => return None,
        };
        Some(batch)
    }

    fn append_attributions(&mut self, source: &'static str, rows: Vec<AttributionRow>) {
        let added = rows.len();
        self.attributions.extend(rows);
        info!(
            source,
            added,
            total = self.attributions.len(),
            "Accumulated attributions"
        );
    }
}

/// Table without columns or rows
pub fn empty_table() -> RecordBatch {
    RecordBatch::new_empty(Arc::new(Schema::empty()))
}

fn table_or_empty(entity: &'static str, result: Result<RecordBatch>) -> RecordBatch {
    match result {
        Ok(batch) => batch,
        Err(e) => {
            error!(entity, error = %e, "Failed to build table, returning empty table");
            empty_table()
        }
    }
}
