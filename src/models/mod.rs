//! Domain entities
//!
//! Every entity implements [`ApiObject`]: it knows its resource path, carries
//! the session that fetched it and exports itself as null-free JSON.

mod entities;
mod object;

pub use entities::{
    Agency, Appointment, Attribution, Calendar, CalendarEvent, Contact, Conversation, CreatedBy,
    CustomField, CustomFieldValue, CustomValue, Form, FormSubmission, Location, Message,
    Opportunity, Pipeline, PipelineStage, SurveySubmission, User,
};
pub use object::{export_value, ApiObject};
