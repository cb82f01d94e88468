//! Flattening of entities into rows
//!
//! Pure functions: nested API objects become flat rows with fixed
//! columns. Attribution arrays and contact custom fields are split out into
//! their own row sets, linked back to the parent by id.

mod rows;

pub use rows::{
    AttributionRow, AttributionType, CalendarEventRow, ContactExtraction, ContactRow,
    CustomFieldRow, CustomFieldValueRow, CustomValueRow, OpportunityExtraction, OpportunityRow,
    PipelineStageRow, UserRow,
};

use crate::models::{
    Attribution, CalendarEvent, Contact, CustomField, CustomValue, Opportunity, Pipeline, User,
};
use crate::types::JsonValue;
use uuid::Uuid;

/// Separator for list values rendered into one cell
pub const LIST_SEPARATOR: &str = ", ";

/// One row per user
pub fn extract_users(users: &[User]) -> Vec<UserRow> {
    users
        .iter()
        .map(|user| UserRow {
            deleted: user.deleted,
            email: user.email.clone(),
            name: user.name.clone(),
            id: user.id.clone(),
            phone: user.phone.clone(),
        })
        .collect()
}

/// One row per custom field definition, picklist options joined into one cell
pub fn extract_custom_fields(fields: &[CustomField]) -> Vec<CustomFieldRow> {
    fields
        .iter()
        .map(|field| CustomFieldRow {
            id: field.id.clone(),
            name: field.name.clone(),
            data_type: field.data_type.clone(),
            field_key: field.field_key.clone(),
            picklist_options: (!field.picklist_options.is_empty())
                .then(|| join_values(&field.picklist_options)),
            placeholder: field.placeholder.clone(),
            position: field.position,
            standard: field.standard,
        })
        .collect()
}

/// One row per custom value
pub fn extract_custom_values(values: &[CustomValue]) -> Vec<CustomValueRow> {
    values
        .iter()
        .map(|value| CustomValueRow {
            id: value.id.clone(),
            name: value.name.clone(),
            field_key: value.field_key.clone(),
            value: value.value.as_ref().and_then(value_to_text),
        })
        .collect()
}

/// One row per event, with `createdBy` flattened into two columns
pub fn extract_calendar_events(events: &[CalendarEvent]) -> Vec<CalendarEventRow> {
    events
        .iter()
        .map(|event| {
            let created_by = event.created_by.as_ref();
            CalendarEventRow {
                event_id: event.id.clone(),
                title: event.title.clone(),
                start_time: event.start_time.clone(),
                end_time: event.end_time.clone(),
                appointment_status: event.appointment_status.clone(),
                assigned_user_id: event.assigned_user_id.clone(),
                contact_id: event.contact_id.clone(),
                address: event.address.clone(),
                created_by_user_id: created_by.and_then(|c| c.user_id.clone()),
                created_by_source: created_by.and_then(|c| c.source.clone()),
            }
        })
        .collect()
}

/// One row per stage, repeating the pipeline's id and name
pub fn extract_pipelines(pipelines: &[Pipeline]) -> Vec<PipelineStageRow> {
    pipelines
        .iter()
        .flat_map(|pipeline| {
            pipeline.stages.iter().map(move |stage| PipelineStageRow {
                stage_id: stage.id.clone(),
                stage_name: stage.name.clone(),
                position: stage.position,
                show_in_funnel: stage.show_in_funnel,
                show_in_pie_chart: stage.show_in_pie_chart,
                pipeline_id: pipeline.id.clone(),
                pipeline_name: pipeline.name.clone(),
            })
        })
        .collect()
}

/// Contact rows plus their attributions and custom field values
pub fn extract_contacts(contacts: &[Contact]) -> ContactExtraction {
    let mut out = ContactExtraction::default();

    for contact in contacts {
        out.contacts.push(ContactRow {
            id: contact.id.clone(),
            contact_name: contact.contact_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            country: contact.country.clone(),
            date_added: contact.date_added.clone(),
            date_updated: contact.date_updated.clone(),
            tags: Some(contact.tags.join(LIST_SEPARATOR)),
            source: contact.source.clone(),
        });

        out.attributions.extend(
            contact
                .attributions
                .iter()
                .map(|a| attribution_row(a, contact.id.as_deref(), AttributionType::Contact)),
        );

        out.custom_field_values
            .extend(contact.custom_fields.iter().map(|field| CustomFieldValueRow {
                contact_id: contact.id.clone(),
                field_id: field.id.clone(),
                field_value: field.value.as_ref().and_then(value_to_text),
            }));
    }

    out
}

/// Opportunity rows plus their attributions
pub fn extract_opportunities(opportunities: &[Opportunity]) -> OpportunityExtraction {
    let mut out = OpportunityExtraction::default();

    for opportunity in opportunities {
        out.opportunities.push(OpportunityRow {
            assigned_to: opportunity.assigned_to.clone(),
            contact_id: opportunity.contact_id.clone(),
            created_at: opportunity.created_at.clone(),
            id: opportunity.id.clone(),
            last_stage_change_at: opportunity.last_stage_change_at.clone(),
            last_status_change_at: opportunity.last_status_change_at.clone(),
            monetary_value: opportunity.monetary_value,
            name: opportunity.name.clone(),
            pipeline_id: opportunity.pipeline_id.clone(),
            pipeline_stage_id: opportunity.pipeline_stage_id.clone(),
            pipeline_stage_uid: opportunity.pipeline_stage_uid.clone(),
            status: opportunity.status.clone(),
            updated_at: opportunity.updated_at.clone(),
        });

        out.attributions
            .extend(opportunity.attributions.iter().map(|a| {
                attribution_row(a, opportunity.id.as_deref(), AttributionType::Opportunity)
            }));
    }

    out
}

fn attribution_row(
    attribution: &Attribution,
    parent_id: Option<&str>,
    kind: AttributionType,
) -> AttributionRow {
    AttributionRow {
        id: Uuid::new_v4().to_string(),
        id_association: parent_id.map(str::to_string),
        kind,
        medium: attribution.medium.clone(),
        utm_source: attribution.utm_source.clone(),
        utm_campaign: attribution.utm_campaign.clone(),
        utm_content: attribution.utm_content.clone(),
        utm_fbclid: attribution.utm_fbclid.clone(),
        utm_session_source: attribution.utm_session_source.clone(),
        url: attribution.url.clone(),
    }
}

/// Cell text of a JSON value; lists are joined (empty lists to ""), null is no value
fn value_to_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(items) => Some(join_values(items)),
        other => Some(other.to_string()),
    }
}

fn join_values(items: &[JsonValue]) -> String {
    let parts: Vec<String> = items.iter().filter_map(value_to_text).collect();
    parts.join(LIST_SEPARATOR)
}
