//! Request builder
//!
//! `ApiRequest<T>` describes one API operation: method, path, parameters,
//! endpoint shape and how the answer is read. `execute` dispatches it either
//! as a paginated listing (a primed [`Cursor`]) or as a single call.

use crate::error::{Error, Result};
use crate::http::ApiResponse;
use crate::models::{export_value, ApiObject};
use crate::pagination::{Cursor, MetaPagination, PageStrategy};
use crate::parser::ObjectParser;
use crate::session::Session;
use crate::types::{ApiType, JsonObject, JsonValue, Method};
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Outcome of executing a request
#[derive(Debug)]
pub enum Executed<T> {
    /// Paginated listing, first page loaded
    Cursor(Cursor<T>),
    /// Single parsed entity
    Object(T),
    /// Unparsed response
    Response(ApiResponse),
}

/// Description of one API operation
#[derive(Debug, Clone)]
pub struct ApiRequest<T> {
    session: Session,
    method: Method,
    endpoint: String,
    node: Option<String>,
    api_type: ApiType,
    parse: bool,
    envelope: Option<String>,
    strategy: Arc<dyn PageStrategy>,
    params: JsonObject,
    _target: PhantomData<fn() -> T>,
}

impl<T: ApiObject> ApiRequest<T> {
    /// Request parsed into `T`, single-object shape, default pagination
    pub fn new(session: Session, method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            session,
            method,
            endpoint: endpoint.into(),
            node: None,
            api_type: ApiType::Node,
            parse: true,
            envelope: T::ENVELOPE.map(str::to_string),
            strategy: Arc::new(MetaPagination),
            params: JsonObject::new(),
            _target: PhantomData,
        }
    }

    /// GET listing of `T` with default pagination
    pub fn edge(session: Session, endpoint: impl Into<String>) -> Self {
        Self::new(session, Method::GET, endpoint).api_type(ApiType::Edge)
    }

    /// GET of one `T`
    pub fn node(session: Session, endpoint: impl Into<String>) -> Self {
        Self::new(session, Method::GET, endpoint)
    }

    /// Set the endpoint shape
    #[must_use]
    pub fn api_type(mut self, api_type: ApiType) -> Self {
        self.api_type = api_type;
        self
    }

    /// Append a node id to the endpoint
    #[must_use]
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Use a custom pagination strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl PageStrategy + 'static) -> Self {
        self.strategy = Arc::new(strategy);
        self
    }

    /// Override the envelope key of single-object responses
    #[must_use]
    pub fn with_envelope(mut self, envelope: Option<&str>) -> Self {
        self.envelope = envelope.map(str::to_string);
        self
    }

    /// Return the raw response instead of parsing it
    #[must_use]
    pub fn raw(mut self) -> Self {
        self.parse = false;
        self
    }

    /// Add one parameter, consuming builder form
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.params.insert(key.into(), export_value(value.into()));
        self
    }

    /// Add one parameter from any serializable value
    ///
    /// Entities and maps are exported without their null members.
    pub fn add_param<V: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: V,
    ) -> Result<&mut Self> {
        let value = normalize_param(value)?;
        self.params.insert(key.into(), value);
        Ok(self)
    }

    /// Add several parameters
    pub fn add_params(&mut self, params: JsonObject) -> &mut Self {
        for (key, value) in params {
            self.params.insert(key, export_value(value));
        }
        self
    }

    /// Accumulated parameters
    pub fn params(&self) -> &JsonObject {
        &self.params
    }

    /// HTTP method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Endpoint shape
    pub fn shape(&self) -> ApiType {
        self.api_type
    }

    /// Full path, node included
    pub fn path(&self) -> String {
        match &self.node {
            Some(node) => format!("{}/{}", self.endpoint.trim_end_matches('/'), node),
            None => self.endpoint.clone(),
        }
    }

    /// Run the request
    ///
    /// The parameter bag is copied, so a request can be executed repeatedly.
    pub async fn execute(&self) -> Result<Executed<T>> {
        let params = self.params.clone();
        let path = self.path();

        if self.api_type == ApiType::Edge && self.method == Method::GET {
            if !self.parse {
                return Err(Error::invalid_argument(format!(
                    "Listing {path} needs a target type to parse into"
                )));
            }
            debug!("Listing {} {}", self.method, path);
            let mut cursor = Cursor::new(
                self.session.clone(),
                path,
                params,
                Arc::clone(&self.strategy),
            );
            cursor.load_next_page().await?;
            return Ok(Executed::Cursor(cursor));
        }

        debug!("Calling {} {}", self.method, path);
        let response = self.session.call(self.method, &path, &params).await?;
        if !self.parse {
            return Ok(Executed::Response(response));
        }

        let mut body = response.json()?;
        if let Some(key) = &self.envelope {
            let inner = body.get_mut(key.as_str()).map(JsonValue::take);
            if let Some(inner) = inner {
                body = inner;
            }
        }
        Ok(Executed::Object(ObjectParser::parse_single(body, &self.session)?))
    }

    /// Run and expect a cursor
    pub async fn execute_cursor(&self) -> Result<Cursor<T>> {
        match self.execute().await? {
            Executed::Cursor(cursor) => Ok(cursor),
            _ => Err(Error::invalid_argument("Request did not produce a cursor")),
        }
    }

    /// Run and expect a single entity
    pub async fn execute_object(&self) -> Result<T> {
        match self.execute().await? {
            Executed::Object(object) => Ok(object),
            _ => Err(Error::invalid_argument("Request did not produce an object")),
        }
    }

    /// Run and expect the raw response
    pub async fn execute_raw(&self) -> Result<ApiResponse> {
        match self.execute().await? {
            Executed::Response(response) => Ok(response),
            _ => Err(Error::invalid_argument("Request did not produce a raw response")),
        }
    }
}

/// Turn a parameter value into null-free JSON
pub fn normalize_param<V: Serialize>(value: V) -> Result<JsonValue> {
    Ok(export_value(serde_json::to_value(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::config::SdkConfig;
    use crate::models::{Contact, Location, User};
    use crate::pagination::SubmissionPagination;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_for(server: &MockServer) -> Session {
        let config = SdkConfig {
            api_base_url: server.uri(),
            ..SdkConfig::default()
        };
        Session::from_config(&config, Credentials::new("token")).unwrap()
    }

    #[test]
    fn test_path_with_node() {
        let session = Session::with_token("t").unwrap();
        let request: ApiRequest<Contact> =
            ApiRequest::node(session.clone(), "/contacts/").with_node("c1");
        assert_eq!(request.path(), "/contacts/c1");

        let request: ApiRequest<Contact> = ApiRequest::node(session, "/contacts");
        assert_eq!(request.path(), "/contacts");
    }

    #[test]
    fn test_add_param_normalizes_entities() {
        let session = Session::with_token("t").unwrap();
        let mut request: ApiRequest<User> = ApiRequest::edge(session, "/users/");
        let contact = Contact {
            id: Some("c1".to_string()),
            ..Contact::default()
        };
        request.add_param("contact", &contact).unwrap();
        request.add_param("limit", 10).unwrap();
        request.add_params(json!({"filter": {"a": null, "b": 1}}).as_object().cloned().unwrap());

        let contact_param = request.params().get("contact").unwrap();
        assert_eq!(contact_param.get("id"), Some(&json!("c1")));
        assert!(contact_param.get("email").is_none());
        assert_eq!(request.params().get("limit"), Some(&json!(10)));
        assert_eq!(request.params().get("filter"), Some(&json!({"b": 1})));
    }

    #[tokio::test]
    async fn test_edge_get_returns_primed_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/"))
            .and(query_param("locationId", "loc_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [{"id": "u1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request: ApiRequest<User> =
            ApiRequest::edge(session_for(&server), "/users/").param("locationId", "loc_1");
        let cursor = request.execute_cursor().await.unwrap();
        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor.pages_loaded(), 1);
    }

    #[tokio::test]
    async fn test_execute_is_repeatable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forms/submissions"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "submissions": [{"id": "s1"}],
                "meta": {"currentPage": 1, "nextPage": 2}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let request: ApiRequest<crate::models::FormSubmission> =
            ApiRequest::edge(session_for(&server), "/forms/submissions")
                .with_strategy(SubmissionPagination)
                .param("page", 1);

        let first = request.execute_cursor().await.unwrap();
        assert_eq!(first.params().get("page"), Some(&json!(2)));
        let second = request.execute_cursor().await.unwrap();
        assert_eq!(second.params().get("page"), Some(&json!(2)));
        assert_eq!(request.params().get("page"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn test_node_unwraps_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/locations/loc_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "location": {"id": "loc_1", "name": "Main Street", "timezone": "UTC"}
            })))
            .mount(&server)
            .await;

        let location: Location = ApiRequest::node(session_for(&server), "/locations")
            .with_node("loc_1")
            .execute_object()
            .await
            .unwrap();
        assert_eq!(location.name.as_deref(), Some("Main Street"));
        assert!(location.session().is_some());
    }

    #[tokio::test]
    async fn test_post_raw_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth/locationToken"))
            .and(body_json(json!({"companyId": "c", "locationId": "l"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "x"})))
            .mount(&server)
            .await;

        let response = ApiRequest::<Location>::new(
            session_for(&server),
            Method::POST,
            "/oauth/locationToken",
        )
        .raw()
        .param("companyId", "c")
        .param("locationId", "l")
        .execute_raw()
        .await
        .unwrap();
        assert_eq!(response.json().unwrap()["access_token"], "x");
    }

    #[tokio::test]
    async fn test_edge_get_without_parser_is_rejected() {
        let session = Session::with_token("t").unwrap();
        let request: ApiRequest<User> = ApiRequest::edge(session, "/users/").raw();
        let err = request.execute().await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_node_status_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = ApiRequest::<Contact>::node(session_for(&server), "/contacts")
            .with_node("missing")
            .execute_object()
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
