//! Entity types
//!
//! Known fields are typed; every other field of the API payload lands in
//! `extra` so nothing is lost between fetch and export.

use super::object::{impl_api_object, null_as_default};
use crate::session::Session;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

// ============================================================================
// Tenancy
// ============================================================================

/// Agency (company) owning locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    /// Company id
    #[serde(default)]
    pub id: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl Agency {
    /// Agency bound to an agency-level session
    pub fn new(session: Session, company_id: impl Into<String>) -> Self {
        Self {
            id: Some(company_id.into()),
            extra: JsonObject::new(),
            session: Some(session),
        }
    }
}

impl_api_object!(Agency, None);

/// Location (sub-account, tenant)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl Location {
    /// Location known only by id, bound to a location-level session
    pub fn new(session: Session, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            session: Some(session),
            ..Self::default()
        }
    }
}

impl_api_object!(Location, Some("/locations"), Some("location"));

// ============================================================================
// People
// ============================================================================

/// Location user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub deleted: Option<bool>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(User, Some("/users"), Some("user"));

/// Marketing source attached to a contact or opportunity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub utm_source: Option<String>,
    #[serde(default)]
    pub utm_campaign: Option<String>,
    #[serde(default)]
    pub utm_content: Option<String>,
    #[serde(default)]
    pub utm_fbclid: Option<String>,
    #[serde(default)]
    pub utm_session_source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Value of a custom field on a contact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldValue {
    #[serde(default)]
    pub id: Option<String>,
    /// Scalar or list, depending on the field's data type
    #[serde(default)]
    pub value: Option<JsonValue>,

    #[serde(flatten)]
    pub extra: JsonObject,
}

/// CRM contact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub date_updated: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributions: Vec<Attribution>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: Vec<CustomFieldValue>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(Contact, Some("/contacts"), Some("contact"));

// ============================================================================
// Sales
// ============================================================================

/// Deal in a pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub last_stage_change_at: Option<String>,
    #[serde(default)]
    pub last_status_change_at: Option<String>,
    #[serde(default)]
    pub monetary_value: Option<f64>,
    #[serde(default)]
    pub pipeline_id: Option<String>,
    #[serde(default)]
    pub pipeline_stage_id: Option<String>,
    #[serde(rename = "pipelineStageUId", default)]
    pub pipeline_stage_uid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributions: Vec<Attribution>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(Opportunity, Some("/opportunities"), Some("opportunity"));

/// Stage of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub show_in_funnel: Option<bool>,
    #[serde(default)]
    pub show_in_pie_chart: Option<bool>,

    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Opportunity pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stages: Vec<PipelineStage>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(Pipeline, Some("/opportunities/pipelines"));

// ============================================================================
// Calendars
// ============================================================================

/// Booking calendar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(Calendar, Some("/calendars"), Some("calendar"));

/// Who or what created a calendar event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBy {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Calendar event (appointment or block slot)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub calendar_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub appointment_status: Option<String>,
    #[serde(default)]
    pub assigned_user_id: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub created_by: Option<CreatedBy>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(CalendarEvent, Some("/calendars/events"), Some("event"));

/// Contact appointment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub calendar_id: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub appointment_status: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(Appointment, Some("/appointments"), Some("appointment"));

// ============================================================================
// Custom data
// ============================================================================

/// Custom field definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub field_key: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub picklist_options: Vec<JsonValue>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub standard: Option<bool>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(CustomField, None);

/// Custom value (location-wide merge field)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomValue {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field_key: Option<String>,
    #[serde(default)]
    pub value: Option<JsonValue>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(CustomValue, None);

// ============================================================================
// Conversations
// ============================================================================

/// Conversation thread with a contact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub last_message_body: Option<String>,
    #[serde(default)]
    pub last_message_type: Option<String>,
    /// Epoch millis of the latest message
    #[serde(default)]
    pub last_message_date: Option<i64>,
    #[serde(default)]
    pub unread_count: Option<i64>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(Conversation, Some("/conversations"), Some("conversation"));

/// Message in a conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(Message, Some("/conversations/messages"), Some("message"));

// ============================================================================
// Forms and surveys
// ============================================================================

/// Form definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(Form, Some("/forms"));

/// Submission of a form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(FormSubmission, Some("/forms/submissions"));

/// Submission of a survey
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub survey_id: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: JsonObject,

    #[serde(skip)]
    pub(crate) session: Option<Session>,
}

impl_api_object!(SurveySubmission, Some("/surveys/submissions"));
