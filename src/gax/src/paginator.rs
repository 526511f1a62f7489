// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Iterate over the pages and items of list operations.
//!
//! The service splits the results of list operations across multiple pages.
//! Each page contains some items and, if more results are available, a
//! continuation token. For this service, the token is an opaque URL (the
//! `nextLink`) pointing to the next page.
//!
//! [Paginator] yields pages, one at a time. [ItemPaginator] yields the items
//! of each page, fetching new pages as needed. Neither type can be rewound,
//! create a new one to start over.
//!
//! # Example
//! ```
//! # use datapipelines_gax::paginator::*;
//! # tokio_test::block_on(async {
//! struct Page { items: Vec<i32>, next: Option<String> }
//! impl PageableResponse for Page {
//!     type PageItem = i32;
//!     fn items(self) -> Vec<i32> { self.items }
//!     fn next_page_token(&self) -> String { self.next.clone().unwrap_or_default() }
//! }
//!
//! let first = async { Ok::<_, String>(Page { items: vec![1, 2], next: Some("page-2".into()) }) };
//! let next_page = |token: String| async move {
//!     assert_eq!(token, "page-2");
//!     Ok::<_, String>(Page { items: vec![3], next: None })
//! };
//! let mut items = Paginator::new(first, next_page).items();
//! let mut got = Vec::new();
//! while let Some(item) = items.next().await {
//!     got.push(item?);
//! }
//! assert_eq!(got, vec![1, 2, 3]);
//! # Ok::<(), String>(()) });
//! ```

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
type NextPage<T, E> = Arc<dyn Fn(String) -> BoxFuture<Result<T, E>> + Send + Sync>;

/// Describes a type that can be iterated over asynchronously when used with
/// [Paginator].
pub trait PageableResponse {
    type PageItem: Send;

    /// Consumes the page and returns its items.
    fn items(self) -> Vec<Self::PageItem>;

    /// The continuation token for the next page.
    ///
    /// An empty token indicates there are no more pages.
    fn next_page_token(&self) -> String;
}

/// Yields the pages of a list operation.
///
/// The paginator starts in a `NotStarted` state, holding the (lazy) request for
/// the first page. Each call to [next][Paginator::next] advances the state:
/// it fetches one page and records its continuation token, or returns `None`
/// once the last page was returned.
///
/// A paginator stops after the first error.
///
/// Only one task may advance a paginator at a time, `next()` requires
/// exclusive access. If the future returned by `next()` is dropped before it
/// completes, the paginator is done.
pub struct Paginator<T, E> {
    state: State<T, E>,
    next_page: NextPage<T, E>,
}

enum State<T, E> {
    NotStarted(BoxFuture<Result<T, E>>),
    FirstPage(T),
    Continue(String),
    Done,
}

impl<T, E> Paginator<T, E>
where
    T: PageableResponse + Send + 'static,
    E: Send + 'static,
{
    /// Creates a paginator from the request for the first page, and a
    /// function to request subsequent pages.
    ///
    /// The `first` future is not polled until the first call to `next()`.
    pub fn new<F, N, NF>(first: F, next_page: N) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        N: Fn(String) -> NF + Send + Sync + 'static,
        NF: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            state: State::NotStarted(Box::pin(first)),
            next_page: Self::boxed(next_page),
        }
    }

    /// Creates a paginator from a page that was already fetched.
    ///
    /// The first call to `next()` returns `page` without any requests.
    pub fn from_first_page<N, NF>(page: T, next_page: N) -> Self
    where
        N: Fn(String) -> NF + Send + Sync + 'static,
        NF: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            state: State::FirstPage(page),
            next_page: Self::boxed(next_page),
        }
    }

    fn boxed<N, NF>(next_page: N) -> NextPage<T, E>
    where
        N: Fn(String) -> NF + Send + Sync + 'static,
        NF: Future<Output = Result<T, E>> + Send + 'static,
    {
        Arc::new(move |token| Box::pin(next_page(token)) as BoxFuture<Result<T, E>>)
    }

    /// Returns the next page, or `None` after the last page.
    pub async fn next(&mut self) -> Option<Result<T, E>> {
        let result = match std::mem::replace(&mut self.state, State::Done) {
            State::Done => return None,
            State::NotStarted(first) => first.await,
            State::FirstPage(page) => Ok(page),
            State::Continue(token) => (self.next_page)(token).await,
        };
        if let Ok(page) = &result {
            let token = page.next_page_token();
            if !token.is_empty() {
                self.state = State::Continue(token);
            }
        }
        Some(result)
    }

    /// Returns true if `next()` will return `None`.
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Converts the paginator into an iterator over the page items.
    pub fn items(self) -> ItemPaginator<T, E> {
        ItemPaginator {
            pages: self,
            buffer: VecDeque::new(),
        }
    }

    /// Converts the paginator into a [Stream][futures::stream::Stream] of pages.
    #[cfg(feature = "unstable-stream")]
    pub fn into_stream(self) -> impl futures::stream::Stream<Item = Result<T, E>> + Unpin {
        Box::pin(futures::stream::unfold(self, |mut pages| async move {
            pages.next().await.map(|r| (r, pages))
        }))
    }
}

impl<T, E> std::fmt::Debug for Paginator<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            State::NotStarted(_) => "NotStarted".to_string(),
            State::FirstPage(_) => "FirstPage".to_string(),
            State::Continue(token) => format!("Continue({token})"),
            State::Done => "Done".to_string(),
        };
        f.debug_struct("Paginator").field("state", &state).finish()
    }
}

/// Yields the items of a list operation.
///
/// Items are returned in the order the service returns them. A new page is
/// requested only after all the items in the current page are returned.
#[derive(Debug)]
pub struct ItemPaginator<T, E>
where
    T: PageableResponse,
{
    pages: Paginator<T, E>,
    buffer: VecDeque<T::PageItem>,
}

impl<T, E> ItemPaginator<T, E>
where
    T: PageableResponse + Send + 'static,
    E: Send + 'static,
{
    /// Returns the next item, or `None` after the last item.
    ///
    /// Errors fetching a page are returned once, and end the iteration.
    pub async fn next(&mut self) -> Option<Result<T::PageItem, E>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            match self.pages.next().await? {
                Ok(page) => self.buffer = page.items().into(),
                Err(e) => return Some(Err(e)),
            }
        }
    }

    /// Converts the iterator into a [Stream][futures::stream::Stream] of items.
    #[cfg(feature = "unstable-stream")]
    pub fn into_stream(self) -> impl futures::stream::Stream<Item = Result<T::PageItem, E>> + Unpin {
        Box::pin(futures::stream::unfold(self, |mut items| async move {
            items.next().await.map(|r| (r, items))
        }))
    }
}
