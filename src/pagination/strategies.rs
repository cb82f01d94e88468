//! Pagination strategy implementations
//!
//! Each strategy handles one pagination pattern of the API.

use super::types::{NextPage, Page, PageStrategy};
use crate::error::Result;
use crate::parser::ObjectParser;
use crate::types::{is_truthy, JsonObject, JsonValue};

// ============================================================================
// Meta Pagination
// ============================================================================

/// Default listing pagination
///
/// Responses look like `{ "<entities>": [...], "meta": { "nextPage", "startAfter",
/// "startAfterId" } }`. The next request carries `startAfter` and `startAfterId`;
/// a missing `startAfterId` is carried as null so the previous page's id is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaPagination;

impl PageStrategy for MetaPagination {
    fn load_page(&self, body: &JsonValue, _params: &JsonObject) -> Result<Page> {
        let records = ObjectParser::collect_records(body)?;
        if records.is_empty() {
            return Ok(Page::last(records));
        }

        let Some(meta) = body.get("meta").and_then(JsonValue::as_object) else {
            return Ok(Page::last(records));
        };

        let next_page = meta.get("nextPage").unwrap_or(&JsonValue::Null);
        let start_after = meta.get("startAfter").unwrap_or(&JsonValue::Null);
        if next_page.is_null() || start_after.is_null() {
            return Ok(Page::last(records));
        }

        let mut params = JsonObject::new();
        params.insert("startAfter".to_string(), start_after.clone());
        params.insert(
            "startAfterId".to_string(),
            meta.get("startAfterId").cloned().unwrap_or(JsonValue::Null),
        );
        Ok(Page::with_next(records, NextPage::with_params(params)))
    }
}

// ============================================================================
// Conversation Pagination
// ============================================================================

/// Conversation search pagination
///
/// Only sorted searches can be continued: the next request starts after the
/// `lastMessageDate` of the last record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversationPagination;

impl PageStrategy for ConversationPagination {
    fn load_page(&self, body: &JsonValue, params: &JsonObject) -> Result<Page> {
        let records = ObjectParser::collect_records(body)?;
        if records.is_empty() {
            return Ok(Page::last(records));
        }

        if !params.get("sortBy").is_some_and(is_truthy) {
            return Ok(Page::last(records));
        }

        let last_date = records
            .last()
            .and_then(|record| record.get("lastMessageDate"))
            .filter(|v| !v.is_null())
            .cloned();

        match last_date {
            Some(date) => Ok(Page::with_next(
                records,
                NextPage::with_param("startAfterDate", date),
            )),
            None => Ok(Page::last(records)),
        }
    }
}

// ============================================================================
// Message Pagination
// ============================================================================

/// Conversation message pagination
///
/// Records live under `messages.messages`; `messages.nextPage` says whether
/// to continue and `messages.lastMessageId` is the cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePagination;

impl PageStrategy for MessagePagination {
    fn load_page(&self, body: &JsonValue, _params: &JsonObject) -> Result<Page> {
        let Some(messages) = body.get("messages").filter(|v| is_truthy(v)) else {
            return Ok(Page::last(Vec::new()));
        };

        let records = ObjectParser::collect_records(messages)?;
        if records.is_empty() {
            return Ok(Page::last(records));
        }

        let has_next = messages.get("nextPage").is_some_and(is_truthy);
        let last_message_id = messages.get("lastMessageId").filter(|v| !v.is_null());

        match (has_next, last_message_id) {
            (true, Some(id)) => Ok(Page::with_next(
                records,
                NextPage::with_param("lastMessageId", id.clone()),
            )),
            _ => Ok(Page::last(records)),
        }
    }
}

// ============================================================================
// Submission Pagination
// ============================================================================

/// Form and survey submission pagination (page numbers)
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionPagination;

impl PageStrategy for SubmissionPagination {
    fn load_page(&self, body: &JsonValue, params: &JsonObject) -> Result<Page> {
        let records = match body.get("submissions") {
            Some(JsonValue::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        if records.is_empty() {
            return Ok(Page::last(records));
        }

        let meta = body.get("meta");
        let has_next = meta
            .and_then(|m| m.get("nextPage"))
            .is_some_and(is_truthy);
        if !has_next {
            return Ok(Page::last(records));
        }

        let current = meta
            .and_then(|m| m.get("currentPage"))
            .and_then(page_number)
            .or_else(|| params.get("page").and_then(page_number))
            .unwrap_or(1);

        Ok(Page::with_next(
            records,
            NextPage::with_param("page", current + 1),
        ))
    }
}

/// Page number given as a JSON number or a numeric string
fn page_number(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
