//! Operations that act through the session bound to an entity

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::models::{
    Agency, ApiObject, Appointment, Calendar, CalendarEvent, Contact, Conversation, Location,
    Message,
};
use crate::pagination::{Cursor, MessagePagination};
use crate::parser::ObjectParser;
use crate::request::ApiRequest;
use crate::types::{JsonObject, JsonValue, Method};
use tracing::debug;

/// Re-fetch an entity from its own path and merge the response over it
///
/// Fields present in the response replace the entity's; fields the response
/// omits are kept.
pub async fn api_get<T: ApiObject>(entity: &T, params: &JsonObject) -> Result<T> {
    let session = entity.bound_session()?;
    let path = entity.get_endpoint()?;

    let response = session.call(Method::GET, &path, params).await?;
    let mut body = response.json()?;
    if let Some(key) = T::ENVELOPE {
        let inner = body.get_mut(key).map(JsonValue::take);
        if let Some(inner) = inner {
            body = inner;
        }
    }
    let JsonValue::Object(fields) = body else {
        return Err(Error::invalid_argument(format!(
            "Bad data to set {} fields",
            T::ENTITY
        )));
    };

    let mut merged = match serde_json::to_value(entity)? {
        JsonValue::Object(map) => map,
        _ => JsonObject::new(),
    };
    merged.extend(fields);

    ObjectParser::parse_single(JsonValue::Object(merged), session)
}

impl Agency {
    /// Company id, required by agency operations
    fn company_id(&self) -> Result<&str> {
        self.id().ok_or(Error::MissingId { entity: "Agency" })
    }

    /// Obtain a location token and fetch the location with it
    pub async fn get_location(&self, location_id: &str) -> Result<Location> {
        let session = self.bound_session()?;
        let company_id = self.company_id()?;

        let response =
            ApiRequest::<Location>::new(session.clone(), Method::POST, "/oauth/locationToken")
                .raw()
                .param("companyId", company_id)
                .param("locationId", location_id)
                .execute_raw()
                .await?;
        let credentials: Credentials = serde_json::from_value(response.json()?)?;
        debug!("Obtained location token for {}", location_id);

        let location = Location::new(session.with_credentials(credentials), location_id);
        api_get(&location, &JsonObject::new()).await
    }

    /// Every location of the agency
    pub async fn get_locations(&self) -> Result<Cursor<Location>> {
        let session = self.bound_session()?;
        ApiRequest::edge(session.clone(), "/locations/search")
            .param("companyId", self.company_id()?)
            .param("limit", 1000)
            .execute_cursor()
            .await
    }
}

impl Calendar {
    /// Events of this calendar between two epoch-millis instants
    ///
    /// Filters by this calendar's `calendarId`, where
    /// `LocationResource::get_calendar_events` filters by `locationId`.
    pub async fn get_events(
        &self,
        start_time: i64,
        end_time: i64,
        user_id: Option<&str>,
    ) -> Result<Cursor<CalendarEvent>> {
        let session = self.bound_session()?;
        let calendar_id = self.id().ok_or(Error::MissingId { entity: "Calendar" })?;
        ApiRequest::edge(session.clone(), "/calendars/events")
            .param("calendarId", calendar_id)
            .param("startTime", start_time)
            .param("endTime", end_time)
            .param("userId", user_id)
            .execute_cursor()
            .await
    }
}

impl Contact {
    /// Appointments of this contact
    pub async fn get_appointments(&self) -> Result<Cursor<Appointment>> {
        let session = self.bound_session()?;
        let contact_id = self.id().ok_or(Error::MissingId { entity: "Contact" })?;
        ApiRequest::edge(session.clone(), format!("/contacts/{contact_id}/appointments"))
            .execute_cursor()
            .await
    }
}

impl Conversation {
    /// Messages of this conversation, optionally filtered by message type
    pub async fn get_messages(&self, limit: u32, types: &[&str]) -> Result<Cursor<Message>> {
        let session = self.bound_session()?;
        let conversation_id = self.id().ok_or(Error::MissingId {
            entity: "Conversation",
        })?;

        let mut request = ApiRequest::edge(
            session.clone(),
            format!("/conversations/{conversation_id}/messages"),
        )
        .with_strategy(MessagePagination)
        .param("limit", limit);
        if !types.is_empty() {
            request = request.param("type", types.join(","));
        }
        request.execute_cursor().await
    }
}
