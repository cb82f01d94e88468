//! Shared behaviour of every API entity

use crate::error::{Error, Result};
use crate::session::Session;
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// An entity returned by the HighLevel API
///
/// Implementors are plain serde structs with typed known fields, a flattened
/// `extra` bag for everything else and a skipped session slot that the parser
/// fills in.
pub trait ApiObject: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Entity name used in error messages
    const ENTITY: &'static str;

    /// Resource path prefix, `None` for entities without a single-object endpoint
    const PATH_PREFIX: Option<&'static str>;

    /// Envelope key wrapping the object in single-object responses
    const ENVELOPE: Option<&'static str> = None;

    /// Entity id, if known
    fn id(&self) -> Option<&str>;

    /// Session that fetched this entity
    fn session(&self) -> Option<&Session>;

    /// Bind the entity to a session
    fn bind_session(&mut self, session: Session);

    /// Fields the typed struct does not model
    fn extra(&self) -> &JsonObject;

    /// Resource path of this entity
    fn get_endpoint(&self) -> Result<String> {
        let prefix = Self::PATH_PREFIX.ok_or(Error::NoEndpoint {
            entity: Self::ENTITY,
        })?;
        let id = self.id().ok_or(Error::MissingId {
            entity: Self::ENTITY,
        })?;
        Ok(format!("{prefix}/{id}"))
    }

    /// The bound session, or `MissingSession`
    fn bound_session(&self) -> Result<&Session> {
        self.session().ok_or(Error::MissingSession {
            entity: Self::ENTITY,
        })
    }

    /// Every field of the entity as JSON, nulls removed
    fn export_all_data(&self) -> Result<JsonValue> {
        Ok(export_value(serde_json::to_value(self)?))
    }
}

/// Drop null members from objects, recursively
///
/// Array elements are kept as-is apart from the recursion.
pub fn export_value(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, export_value(v)))
                .collect(),
        ),
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(export_value).collect()),
        other => other,
    }
}

/// Deserialize `null` as the type's default (used for list fields)
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! impl_api_object {
    ($type:ident, $prefix:expr) => {
        impl_api_object!($type, $prefix, None);
    };
    ($type:ident, $prefix:expr, $envelope:expr) => {
        impl $crate::models::ApiObject for $type {
            const ENTITY: &'static str = stringify!($type);
            const PATH_PREFIX: Option<&'static str> = $prefix;
            const ENVELOPE: Option<&'static str> = $envelope;

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn session(&self) -> Option<&$crate::session::Session> {
                self.session.as_ref()
            }

            fn bind_session(&mut self, session: $crate::session::Session) {
                self.session = Some(session);
            }

            fn extra(&self) -> &$crate::types::JsonObject {
                &self.extra
            }
        }
    };
}

pub(crate) use impl_api_object;
