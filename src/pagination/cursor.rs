//! Lazy paginated result sequence

use super::types::{NextPage, PageStrategy};
use crate::error::{Error, Result};
use crate::models::ApiObject;
use crate::parser::ObjectParser;
use crate::session::Session;
use crate::types::{JsonObject, Method};
use futures::stream::{self, Stream};
use reqwest::header::HeaderMap;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Forward-only, single-pass sequence over a paginated listing
///
/// Pages are fetched on demand, one at a time, with the strategy deciding
/// where each page's records live and how the next request differs.
#[derive(Debug)]
pub struct Cursor<T> {
    session: Session,
    path: String,
    params: JsonObject,
    strategy: Arc<dyn PageStrategy>,
    queue: VecDeque<T>,
    has_more: bool,
    headers: HeaderMap,
    pages_loaded: usize,
}

impl<T: ApiObject> Cursor<T> {
    /// Create a cursor; nothing is fetched until the first page is requested
    pub fn new(
        session: Session,
        path: impl Into<String>,
        params: JsonObject,
        strategy: Arc<dyn PageStrategy>,
    ) -> Self {
        Self {
            session,
            path: path.into(),
            params,
            strategy,
            queue: VecDeque::new(),
            has_more: true,
            headers: HeaderMap::new(),
            pages_loaded: 0,
        }
    }

    /// Fetch the next page, replacing the queue
    ///
    /// Returns whether the loaded page held any records. Once the listing is
    /// exhausted no request is made and `false` is returned.
    pub async fn load_next_page(&mut self) -> Result<bool> {
        if !self.has_more {
            return Ok(false);
        }

        let response = self
            .session
            .call(Method::GET, &self.path, &self.params)
            .await?;
        self.headers = response.headers().clone();

        let body = response.json()?;
        let page = self.strategy.load_page(&body, &self.params)?;
        let records = ObjectParser::parse_records::<T>(page.records, &self.session)?;
        self.queue = records.into();
        self.pages_loaded += 1;

        match page.next {
            NextPage::Continue { params } => self.params.extend(params),
            NextPage::Done => self.has_more = false,
        }

        debug!(
            "Loaded page {} of {}: {} records, more: {}",
            self.pages_loaded,
            self.path,
            self.queue.len(),
            self.has_more
        );
        Ok(!self.queue.is_empty())
    }

    /// Next entity, loading pages as needed
    #[allow(clippy::should_implement_trait)]
    pub async fn next(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                return Ok(Some(item));
            }
            if !self.has_more {
                return Ok(None);
            }
            self.load_next_page().await?;
        }
    }

    /// Drain every remaining entity
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Adapt into a `Stream` of entities
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        stream::try_unfold(self, |mut cursor| async move {
            let item = cursor.next().await?;
            Ok::<_, Error>(item.map(|item| (item, cursor)))
        })
    }

    /// Entities loaded but not yet consumed
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the loaded queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether more pages may exist
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Headers of the last loaded page
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Parameters the next request will carry
    pub fn params(&self) -> &JsonObject {
        &self.params
    }

    /// Pages loaded so far
    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }
}
