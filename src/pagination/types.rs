//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Parameters to add/replace before the next request
        params: JsonObject,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with parameters
    pub fn with_params(params: JsonObject) -> Self {
        Self::Continue { params }
    }

    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        let mut params = JsonObject::new();
        params.insert(key.into(), value.into());
        Self::Continue { params }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// One loaded page: raw records plus what comes next
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Record objects, in response order
    pub records: Vec<JsonValue>,
    /// Continuation
    pub next: NextPage,
}

impl Page {
    /// A page after which iteration stops
    pub fn last(records: Vec<JsonValue>) -> Self {
        Self {
            records,
            next: NextPage::Done,
        }
    }

    /// A page followed by more
    pub fn with_next(records: Vec<JsonValue>, next: NextPage) -> Self {
        Self { records, next }
    }
}

/// Core trait for pagination strategies
///
/// A strategy reads one response body and decides which records it holds and
/// how the parameters change for the following request. Strategies do no I/O.
pub trait PageStrategy: Send + Sync + std::fmt::Debug {
    /// Split a response body into records and a continuation
    fn load_page(&self, body: &JsonValue, params: &JsonObject) -> Result<Page>;
}
