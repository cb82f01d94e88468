//! Tests for the resources module

use super::*;
use crate::auth::Credentials;
use crate::config::SdkConfig;
use crate::error::Error;
use crate::models::{Agency, ApiObject, Calendar, Contact, Conversation};
use crate::session::Session;
use crate::types::JsonObject;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer, token: &str) -> Session {
    let config = SdkConfig {
        api_base_url: server.uri(),
        ..SdkConfig::default()
    };
    Session::from_config(&config, Credentials::new(token)).unwrap()
}

fn facade(server: &MockServer) -> LocationResource {
    LocationResource::new(session_for(server, "loc-token"), "loc_1")
}

#[tokio::test]
async fn test_get_users_injects_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/"))
        .and(query_param("locationId", "loc_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "u1", "name": "Ann"}, {"id": "u2", "name": "Bob"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = facade(&server)
        .get_users()
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].name.as_deref(), Some("Bob"));
}

#[tokio::test]
async fn test_get_opportunities_uses_snake_case_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/opportunities/search"))
        .and(query_param("location_id", "loc_1"))
        .and(query_param("limit", "100"))
        .and(query_param_is_missing("locationId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "opportunities": [{"id": "o1"}],
            "meta": {"total": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opportunities = facade(&server)
        .get_opportunities(100)
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(opportunities.len(), 1);
}

#[tokio::test]
async fn test_get_contact_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contact": {"id": "c1", "email": "c1@example.com"}
        })))
        .mount(&server)
        .await;

    let contact = facade(&server).get_contact("c1").await.unwrap();
    assert_eq!(contact.email.as_deref(), Some("c1@example.com"));
}

#[tokio::test]
async fn test_fetch_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/loc_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": {"id": "loc_1", "name": "Downtown"}
        })))
        .mount(&server)
        .await;

    let location = facade(&server).fetch_location().await.unwrap();
    assert_eq!(location.name.as_deref(), Some("Downtown"));
}

#[tokio::test]
async fn test_get_calendar_event_returns_first_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/events/appointments/e1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event": {"id": "e1", "title": "Demo"},
            "traceId": "t"
        })))
        .mount(&server)
        .await;

    let event = facade(&server).get_calendar_event("e1").await.unwrap();
    assert_eq!(event.unwrap().title.as_deref(), Some("Demo"));
}

#[tokio::test]
async fn test_get_calendar_events_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/events"))
        .and(query_param("locationId", "loc_1"))
        .and(query_param("startTime", "1000"))
        .and(query_param("endTime", "2000"))
        .and(query_param("userId", "u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"events": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut cursor = facade(&server)
        .get_calendar_events(1000, 2000, Some("u1"))
        .await
        .unwrap();
    assert!(cursor.next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_conversations_paginates_by_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations/search"))
        .and(query_param("sort", "desc"))
        .and(query_param("sortBy", "last_message_date"))
        .and(query_param_is_missing("startAfterDate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversations": [{"id": "v1", "lastMessageDate": 500}],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/conversations/search"))
        .and(query_param("startAfterDate", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversations": [],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let conversations = facade(&server)
        .get_conversations(1)
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(conversations.len(), 1);
}

#[tokio::test]
async fn test_get_form_submissions_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forms/submissions"))
        .and(query_param("formId", "f1"))
        .and(query_param("q", "john"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "submissions": [{"id": "s1", "formId": "f1"}],
            "meta": {"currentPage": 1, "nextPage": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut extra = JsonObject::new();
    extra.insert("q".to_string(), json!("john"));
    let submissions = facade(&server)
        .get_form_submissions(Some("f1"), 50, extra)
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(submissions[0].form_id.as_deref(), Some("f1"));
}

#[tokio::test]
async fn test_get_custom_values_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/loc_1/customValues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customValues": [{"id": "v1", "name": "Brand", "fieldKey": "{{ custom_values.brand }}", "value": "Acme"}]
        })))
        .mount(&server)
        .await;

    let values = facade(&server)
        .get_custom_values()
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(values[0].value, Some(json!("Acme")));
}

#[tokio::test]
async fn test_agency_get_location_swaps_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/locationToken"))
        .and(header("Authorization", "Bearer agency-token"))
        .and(body_json(json!({"companyId": "comp_1", "locationId": "loc_9"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "loc-9-token",
            "locationId": "loc_9"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locations/loc_9"))
        .and(header("Authorization", "Bearer loc-9-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "location": {"id": "loc_9", "name": "Uptown"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let agency = Agency::new(session_for(&server, "agency-token"), "comp_1");
    let location = agency.get_location("loc_9").await.unwrap();
    assert_eq!(location.name.as_deref(), Some("Uptown"));
    assert_eq!(
        location.session().unwrap().credentials().access_token,
        "loc-9-token"
    );
}

#[tokio::test]
async fn test_agency_get_locations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locations/search"))
        .and(query_param("companyId", "comp_1"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "locations": [{"id": "l1"}, {"id": "l2"}]
        })))
        .mount(&server)
        .await;

    let agency = Agency::new(session_for(&server, "agency-token"), "comp_1");
    let locations = agency
        .get_locations()
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(locations.len(), 2);
}

#[tokio::test]
async fn test_calendar_get_events_sends_calendar_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendars/events"))
        .and(query_param("calendarId", "cal_1"))
        .and(query_param_is_missing("locationId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [{"id": "e1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let calendars = facade(&server);
    let mut calendar = Calendar {
        id: Some("cal_1".to_string()),
        ..Calendar::default()
    };
    calendar.bind_session(calendars.session().clone());

    let events = calendar
        .get_events(0, 1, None)
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn test_conversation_get_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations/v1/messages"))
        .and(query_param("type", "TYPE_SMS,TYPE_EMAIL"))
        .and(query_param_is_missing("lastMessageId"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": {
                "lastMessageId": "m2",
                "nextPage": true,
                "messages": [{"id": "m1"}, {"id": "m2"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/conversations/v1/messages"))
        .and(query_param("lastMessageId", "m2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": {
                "lastMessageId": "m3",
                "nextPage": false,
                "messages": [{"id": "m3"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut conversation = Conversation {
        id: Some("v1".to_string()),
        ..Conversation::default()
    };
    conversation.bind_session(session_for(&server, "t"));

    let messages = conversation
        .get_messages(2, &["TYPE_SMS", "TYPE_EMAIL"])
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();
    let ids: Vec<_> = messages.iter().filter_map(|m| m.id.as_deref()).collect();
    assert_eq!(ids, vec!["m1", "m2", "m3"]);
}

#[tokio::test]
async fn test_api_get_merges_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contacts/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contact": {"id": "c1", "email": "new@example.com", "country": "US"}
        })))
        .mount(&server)
        .await;

    let mut contact = Contact {
        id: Some("c1".to_string()),
        email: Some("old@example.com".to_string()),
        source: Some("web".to_string()),
        ..Contact::default()
    };
    contact.bind_session(session_for(&server, "t"));

    let refreshed = api_get(&contact, &JsonObject::new()).await.unwrap();
    assert_eq!(refreshed.email.as_deref(), Some("new@example.com"));
    assert_eq!(refreshed.country.as_deref(), Some("US"));
    assert_eq!(refreshed.source.as_deref(), Some("web"));
}

#[tokio::test]
async fn test_unbound_entity_operations_fail() {
    let contact = Contact {
        id: Some("c1".to_string()),
        ..Contact::default()
    };
    let err = contact.get_appointments().await.unwrap_err();
    assert!(matches!(err, Error::MissingSession { entity: "Contact" }));

    let err = api_get(&contact, &JsonObject::new()).await.unwrap_err();
    assert!(matches!(err, Error::MissingSession { .. }));
}
