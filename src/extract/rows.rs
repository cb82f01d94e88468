//! Flat row records
//!
//! Field order is column order. Serialized names are the column names.

use serde::Serialize;

/// One user
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserRow {
    pub deleted: Option<bool>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub phone: Option<String>,
}

/// One custom field definition
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomFieldRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub data_type: Option<String>,
    pub field_key: Option<String>,
    /// Options joined with `", "`
    pub picklist_options: Option<String>,
    pub placeholder: Option<String>,
    pub position: Option<i64>,
    pub standard: Option<bool>,
}

/// One custom value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomValueRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub field_key: Option<String>,
    pub value: Option<String>,
}

/// One calendar event
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CalendarEventRow {
    pub event_id: Option<String>,
    pub title: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub appointment_status: Option<String>,
    pub assigned_user_id: Option<String>,
    pub contact_id: Option<String>,
    pub address: Option<String>,
    pub created_by_user_id: Option<String>,
    pub created_by_source: Option<String>,
}

/// One (pipeline, stage) pair
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineStageRow {
    pub stage_id: Option<String>,
    pub stage_name: Option<String>,
    pub position: Option<i64>,
    pub show_in_funnel: Option<bool>,
    pub show_in_pie_chart: Option<bool>,
    pub pipeline_id: Option<String>,
    pub pipeline_name: Option<String>,
}

/// One contact
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactRow {
    pub id: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub date_updated: Option<String>,
    /// Tags joined with `", "`
    pub tags: Option<String>,
    pub source: Option<String>,
}

/// One custom field value of a contact
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomFieldValueRow {
    pub contact_id: Option<String>,
    pub field_id: Option<String>,
    /// List values joined with `", "`
    pub field_value: Option<String>,
}

/// One opportunity, columns named as the API names them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityRow {
    pub assigned_to: Option<String>,
    pub contact_id: Option<String>,
    pub created_at: Option<String>,
    pub id: Option<String>,
    pub last_stage_change_at: Option<String>,
    pub last_status_change_at: Option<String>,
    pub monetary_value: Option<f64>,
    pub name: Option<String>,
    pub pipeline_id: Option<String>,
    pub pipeline_stage_id: Option<String>,
    #[serde(rename = "pipelineStageUId")]
    pub pipeline_stage_uid: Option<String>,
    pub status: Option<String>,
    pub updated_at: Option<String>,
}

/// Parent kind of an attribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributionType {
    Contact,
    Opportunity,
}

/// One attribution of a contact or opportunity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributionRow {
    /// Fresh random id
    pub id: String,
    /// Id of the parent contact or opportunity
    pub id_association: Option<String>,
    #[serde(rename = "type")]
    pub kind: AttributionType,
    pub medium: Option<String>,
    #[serde(rename = "utmSource")]
    pub utm_source: Option<String>,
    #[serde(rename = "utmCampaign")]
    pub utm_campaign: Option<String>,
    #[serde(rename = "utmContent")]
    pub utm_content: Option<String>,
    #[serde(rename = "utmFbclid")]
    pub utm_fbclid: Option<String>,
    #[serde(rename = "utmSessionSource")]
    pub utm_session_source: Option<String>,
    pub url: Option<String>,
}

/// Rows produced from a batch of contacts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactExtraction {
    pub contacts: Vec<ContactRow>,
    pub attributions: Vec<AttributionRow>,
    pub custom_field_values: Vec<CustomFieldValueRow>,
}

/// Rows produced from a batch of opportunities
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunityExtraction {
    pub opportunities: Vec<OpportunityRow>,
    pub attributions: Vec<AttributionRow>,
}
