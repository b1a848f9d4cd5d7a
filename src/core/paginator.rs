//! Collection of child nodes across the pages of a paged remote method.
//!
//! Each page is requested with `page=N`. The first element under `<lfm>` carries
//! `totalPages` (some methods spell it `totalpages`); its element children are the items.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

use futures::Stream;

use crate::core::executor::{self, Request};
use crate::core::retry::RetryConfig;
use crate::core::xml::{Document, Element};
use crate::core::{FmError, Network};

/// Something that can run one page request.
///
/// Implemented by [`Network`]; the seam exists so paging can be driven by other sources.
pub trait PageSource: Send + Sync {
    fn fetch_page<'a>(
        &'a self,
        request: &'a Request,
    ) -> Pin<Box<dyn Future<Output = Result<Document, FmError>> + Send + 'a>>;
}

impl PageSource for Network {
    fn fetch_page<'a>(
        &'a self,
        request: &'a Request,
    ) -> Pin<Box<dyn Future<Output = Result<Document, FmError>> + Send + 'a>> {
        Box::pin(executor::execute(self, request))
    }
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn fetch_page<'a>(
        &'a self,
        request: &'a Request,
    ) -> Pin<Box<dyn Future<Output = Result<Document, FmError>> + Send + 'a>> {
        (**self).fetch_page(request)
    }
}

/// Lazily yields the items of a paged method, fetching pages on demand.
///
/// Dropping it stops further requests.
pub struct NodeStream<S> {
    source: S,
    request: Request,
    limit: Option<usize>,
    retry: RetryConfig,
    page: u32,
    emitted: usize,
    buffer: VecDeque<Element>,
    last_page_seen: bool,
    failed: bool,
}

impl<S: PageSource> NodeStream<S> {
    /// `limit` caps the total number of items; `None` walks every page.
    pub fn new(source: S, request: Request, limit: Option<usize>, retry: RetryConfig) -> Self {
        Self {
            source,
            request,
            limit,
            retry,
            page: 1,
            emitted: 0,
            buffer: VecDeque::new(),
            last_page_seen: false,
            failed: false,
        }
    }

    /// Number of items yielded so far.
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.emitted
    }

    /// The next item, or `None` once the last page or the limit is reached.
    ///
    /// After an error the stream is exhausted.
    pub async fn next(&mut self) -> Option<Result<Element, FmError>> {
        loop {
            if self.failed || self.limit.is_some_and(|l| self.emitted >= l) {
                return None;
            }
            if let Some(node) = self.buffer.pop_front() {
                self.emitted += 1;
                return Some(Ok(node));
            }
            if self.last_page_seen {
                return None;
            }
            if let Err(e) = self.fetch_next_page().await {
                self.failed = true;
                return Some(Err(e));
            }
        }
    }

    /// Adapts this iterator into a [`futures::Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<Element, FmError>> {
        futures::stream::unfold(self, |mut s| async move { s.next().await.map(|item| (item, s)) })
    }

    async fn fetch_next_page(&mut self) -> Result<(), FmError> {
        let request = self.request.clone().param("page", self.page);
        let doc = self.fetch_with_retry(&request).await?;

        let container = doc
            .into_root()
            .into_elements()
            .next()
            .ok_or_else(|| FmError::client("no total pages attribute"))?;
        let total_pages = container
            .attr("totalPages")
            .or_else(|| container.attr("totalpages"))
            .ok_or_else(|| FmError::client("no total pages attribute"))?;
        let total_pages: u32 = total_pages
            .trim()
            .parse()
            .map_err(|_| FmError::client(format!("invalid total pages attribute: {total_pages}")))?;

        if self.page >= total_pages {
            self.last_page_seen = true;
        }
        self.page += 1;
        self.buffer.extend(container.into_elements());
        Ok(())
    }

    async fn fetch_with_retry(&self, request: &Request) -> Result<Document, FmError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            match self.source.fetch_page(request).await {
                Ok(doc) => return Ok(doc),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_attempts {
                        return Err(FmError::client_with_source("failed to get results", e));
                    }
                    #[cfg(feature = "tracing")]
                    tracing::warn!(page = self.page, attempt, error = %e, "page fetch failed, retrying");
                    tokio::time::sleep(self.retry.backoff.delay(attempt - 1)).await;
                }
            }
        }
    }
}

/// Eagerly walks the pages of `request` and returns up to `limit` items in server order.
///
/// # Errors
///
/// Returns [`FmError::Client`] if a page fails on every attempt (wrapping the last error)
/// or lacks a total pages attribute.
pub async fn collect_nodes<S: PageSource>(
    source: S,
    request: Request,
    limit: Option<usize>,
    retry: RetryConfig,
) -> Result<Vec<Element>, FmError> {
    let mut stream = NodeStream::new(source, request, limit, retry);
    let mut out = Vec::new();
    while let Some(node) = stream.next().await {
        out.push(node?);
    }
    Ok(out)
}

impl Network {
    /// Eagerly collects the items of a paged method. See [`collect_nodes`].
    ///
    /// # Errors
    ///
    /// See [`collect_nodes`].
    pub async fn collect_pages(&self, request: Request, limit: Option<usize>) -> Result<Vec<Element>, FmError> {
        collect_nodes(self, request, limit, self.retry_config().clone()).await
    }

    /// Lazily yields the items of a paged method.
    #[must_use]
    pub fn stream_pages(&self, request: Request, limit: Option<usize>) -> NodeStream<Network> {
        NodeStream::new(self.clone(), request, limit, self.retry_config().clone())
    }
}
