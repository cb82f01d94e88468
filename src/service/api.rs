//! Fetch helpers returning parsed entities

use crate::date::next_seven_days;
use crate::error::Result;
use crate::models::{CalendarEvent, Contact, CustomField, CustomValue, Opportunity, Pipeline, User};
use crate::resources::LocationResource;
use crate::session::Session;
use tracing::debug;

/// Page size for contact and opportunity listings
pub const BULK_LIMIT: u32 = 100;

/// Drains the location's cursors into entity lists
#[derive(Debug, Clone)]
pub struct HighLevelApi {
    resource: LocationResource,
}

impl HighLevelApi {
    /// Fetch helpers for one location
    pub fn new(session: Session, location_id: impl Into<String>) -> Self {
        Self {
            resource: LocationResource::new(session, location_id),
        }
    }

    /// Underlying facade
    pub fn resource(&self) -> &LocationResource {
        &self.resource
    }

    /// Every user of the location
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        self.resource.get_users().await?.collect_all().await
    }

    /// Every custom field definition
    pub async fn fetch_custom_fields(&self) -> Result<Vec<CustomField>> {
        self.resource.get_custom_fields().await?.collect_all().await
    }

    /// Every custom value
    pub async fn fetch_custom_values(&self) -> Result<Vec<CustomValue>> {
        self.resource.get_custom_values().await?.collect_all().await
    }

    /// Every opportunity pipeline
    pub async fn fetch_pipelines(&self) -> Result<Vec<Pipeline>> {
        self.resource.get_pipelines().await?.collect_all().await
    }

    /// Every contact, [`BULK_LIMIT`] per page
    pub async fn fetch_contacts(&self) -> Result<Vec<Contact>> {
        self.resource
            .get_contacts(BULK_LIMIT)
            .await?
            .collect_all()
            .await
    }

    /// Every opportunity, [`BULK_LIMIT`] per page
    pub async fn fetch_opportunities(&self) -> Result<Vec<Opportunity>> {
        self.resource
            .get_opportunities(BULK_LIMIT)
            .await?
            .collect_all()
            .await
    }

    /// Events of the seven days starting at `date`, one query per user
    ///
    /// Users without an id are skipped.
    pub async fn fetch_calendar_events(
        &self,
        date: &str,
        users: &[User],
    ) -> Result<Vec<CalendarEvent>> {
        let (start, end) = next_seven_days(date)?;
        let mut events = Vec::new();

        for user_id in users.iter().filter_map(|user| user.id.as_deref()) {
            let found = self
                .resource
                .get_calendar_events(start, end, Some(user_id))
                .await?
                .collect_all()
                .await?;
            debug!(user_id, count = found.len(), "Fetched calendar events");
            events.extend(found);
        }

        Ok(events)
    }
}
