//! Pagination module
//!
//! Supports: startAfter meta cursors, conversation date cursors, message id
//! cursors, submission page numbers
//!
//! # Overview
//!
//! A [`Cursor`] fetches pages lazily through the session and hands each body
//! to a [`PageStrategy`], which extracts the records and the parameters for
//! the next request.

mod cursor;
mod strategies;
mod types;

pub use cursor::Cursor;
pub use strategies::{
    ConversationPagination, MessagePagination, MetaPagination, SubmissionPagination,
};
pub use types::{NextPage, Page, PageStrategy};
