//! Per-tenant resource facade

use crate::error::Result;
use crate::models::{
    Appointment, Calendar, CalendarEvent, Contact, Conversation, CustomField, CustomValue, Form,
    FormSubmission, Location, Opportunity, Pipeline, SurveySubmission, User,
};
use crate::pagination::{ConversationPagination, Cursor, SubmissionPagination};
use crate::request::ApiRequest;
use crate::session::Session;
use crate::types::JsonObject;

/// Page size used when the caller does not choose one
pub const DEFAULT_LIMIT: u32 = 20;

/// Listing and lookup operations scoped to one location
#[derive(Debug, Clone)]
pub struct LocationResource {
    session: Session,
    location_id: String,
}

impl LocationResource {
    /// Facade for `location_id`, calling through `session`
    pub fn new(session: Session, location_id: impl Into<String>) -> Self {
        Self {
            session,
            location_id: location_id.into(),
        }
    }

    /// Tenant id
    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    /// Session used for every call
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn edge<T: crate::models::ApiObject>(&self, path: impl Into<String>) -> ApiRequest<T> {
        ApiRequest::edge(self.session.clone(), path)
    }

    /// Fetch the location itself
    pub async fn fetch_location(&self) -> Result<Location> {
        ApiRequest::node(self.session.clone(), "/locations")
            .with_node(self.location_id.as_str())
            .execute_object()
            .await
    }

    /// Users of the location
    pub async fn get_users(&self) -> Result<Cursor<User>> {
        self.edge("/users/")
            .param("locationId", self.location_id.as_str())
            .execute_cursor()
            .await
    }

    /// Contacts, `limit` per page
    pub async fn get_contacts(&self, limit: u32) -> Result<Cursor<Contact>> {
        self.edge("/contacts/")
            .param("limit", limit)
            .param("locationId", self.location_id.as_str())
            .execute_cursor()
            .await
    }

    /// One contact by id
    pub async fn get_contact(&self, contact_id: &str) -> Result<Contact> {
        ApiRequest::node(self.session.clone(), "/contacts")
            .with_node(contact_id)
            .execute_object()
            .await
    }

    /// Opportunities, `limit` per page
    ///
    /// The search endpoint takes the tenant as `location_id`, unlike every
    /// other listing.
    pub async fn get_opportunities(&self, limit: u32) -> Result<Cursor<Opportunity>> {
        self.edge("/opportunities/search")
            .param("location_id", self.location_id.as_str())
            .param("limit", limit)
            .execute_cursor()
            .await
    }

    /// One opportunity by id
    pub async fn get_opportunity(&self, opportunity_id: &str) -> Result<Opportunity> {
        ApiRequest::node(self.session.clone(), "/opportunities")
            .with_node(opportunity_id)
            .execute_object()
            .await
    }

    /// Opportunity pipelines
    pub async fn get_pipelines(&self) -> Result<Cursor<Pipeline>> {
        self.edge("/opportunities/pipelines")
            .param("locationId", self.location_id.as_str())
            .execute_cursor()
            .await
    }

    /// Calendars
    pub async fn get_calendars(&self) -> Result<Cursor<Calendar>> {
        self.edge("/calendars/")
            .param("locationId", self.location_id.as_str())
            .execute_cursor()
            .await
    }

    /// Calendar events between two epoch-millis instants
    pub async fn get_calendar_events(
        &self,
        start_time: i64,
        end_time: i64,
        user_id: Option<&str>,
    ) -> Result<Cursor<CalendarEvent>> {
        self.edge("/calendars/events")
            .param("locationId", self.location_id.as_str())
            .param("startTime", start_time)
            .param("endTime", end_time)
            .param("userId", user_id)
            .execute_cursor()
            .await
    }

    /// One calendar event by id
    pub async fn get_calendar_event(&self, event_id: &str) -> Result<Option<CalendarEvent>> {
        let mut cursor = self
            .edge(format!("/calendars/events/appointments/{event_id}"))
            .execute_cursor()
            .await?;
        cursor.next().await
    }

    /// Appointments of a contact
    pub async fn get_contact_appointments(&self, contact_id: &str) -> Result<Cursor<Appointment>> {
        self.edge(format!("/contacts/{contact_id}/appointments"))
            .execute_cursor()
            .await
    }

    /// Conversations, most recent first
    pub async fn get_conversations(&self, limit: u32) -> Result<Cursor<Conversation>> {
        self.edge("/conversations/search")
            .with_strategy(ConversationPagination)
            .param("locationId", self.location_id.as_str())
            .param("limit", limit)
            .param("sort", "desc")
            .param("sortBy", "last_message_date")
            .execute_cursor()
            .await
    }

    /// Custom field definitions
    pub async fn get_custom_fields(&self) -> Result<Cursor<CustomField>> {
        self.edge(format!("/locations/{}/customFields", self.location_id))
            .execute_cursor()
            .await
    }

    /// Custom values
    pub async fn get_custom_values(&self) -> Result<Cursor<CustomValue>> {
        self.edge(format!("/locations/{}/customValues", self.location_id))
            .execute_cursor()
            .await
    }

    /// Forms
    pub async fn get_forms(&self, limit: u32) -> Result<Cursor<Form>> {
        self.edge("/forms/")
            .param("locationId", self.location_id.as_str())
            .param("limit", limit)
            .execute_cursor()
            .await
    }

    /// Form submissions, optionally for one form
    ///
    /// `extra` is merged into the query as-is (e.g. `startAt`, `endAt`, `q`).
    pub async fn get_form_submissions(
        &self,
        form_id: Option<&str>,
        limit: u32,
        extra: JsonObject,
    ) -> Result<Cursor<FormSubmission>> {
        let mut request = self
            .edge("/forms/submissions")
            .with_strategy(SubmissionPagination)
            .param("locationId", self.location_id.as_str())
            .param("limit", limit);
        if let Some(form_id) = form_id {
            request = request.param("formId", form_id);
        }
        request.add_params(extra);
        request.execute_cursor().await
    }

    /// Survey submissions, optionally for one survey
    pub async fn get_survey_submissions(
        &self,
        survey_id: Option<&str>,
        limit: u32,
        extra: JsonObject,
    ) -> Result<Cursor<SurveySubmission>> {
        let mut request = self
            .edge("/surveys/submissions")
            .with_strategy(SubmissionPagination)
            .param("locationId", self.location_id.as_str())
            .param("limit", limit);
        if let Some(survey_id) = survey_id {
            request = request.param("surveyId", survey_id);
        }
        request.add_params(extra);
        request.execute_cursor().await
    }
}
