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

//! Types and functions to make long-running operations easier to use.
//!
//! Some service operations take a long time to complete. The service accepts
//! the request, returns an initial response, and continues working in the
//! background. The client learns about the progress of the operation by
//! querying a status URL returned in the initial response.
//!
//! The client libraries return an implementation of [Poller] for these
//! operations. Applications can wait until the operation completes using
//! [Poller::until_done], or drive the polling loop themselves with
//! [Poller::poll].
//!
//! # Example
//! ```no_run
//! # use datapipelines_lro::{Poller, PollingResult};
//! # async fn sample(mut poller: impl Poller<String>) {
//! while let PollingResult::InProgress | PollingResult::PollingError(_) = poller.poll().await {
//!     println!("status = {:?}", poller.status());
//!     tokio::time::sleep(std::time::Duration::from_millis(500)).await;
//! }
//! // Terminal results are cached, this does not make a request.
//! let result = poller.poll().await;
//! # }
//! ```

pub use gax::Result;
pub use gax::error::Error;

/// The result of polling a long-running operation.
///
/// # Parameters
/// * `R` - the response type. This is the type returned when the operation
///   completes successfully.
#[derive(Clone, Debug)]
pub enum PollingResult<R> {
    /// The operation is still in progress.
    InProgress,
    /// The operation completed. This includes the result.
    ///
    /// Once a poller returns this variant it returns the same value for all
    /// subsequent calls to `poll()`, without contacting the service.
    Completed(Result<R>),
    /// An error trying to poll the operation.
    ///
    /// Not all errors indicate that the operation failed. For example, this
    /// may fail because it was not possible to connect to the service. Such
    /// transient errors may disappear in the next polling attempt. The polling
    /// error policy decides which errors are returned via this variant, and
    /// which ones complete the operation.
    PollingError(Error),
}

/// The state of a long-running operation.
///
/// The states form a simple machine:
/// `NotStarted -> InProgress -> {Succeeded, Failed, Canceled}`. The last three
/// states are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperationStatus {
    /// The initial request has not been sent.
    #[default]
    NotStarted,
    InProgress,
    Succeeded,
    Failed,
    Canceled,
}

impl OperationStatus {
    /// Returns true for the terminal states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    /// Parses the status reported by the service.
    ///
    /// The comparison is case-insensitive. Services report intermediate
    /// states with a number of names (`Running`, `Accepted`, `Creating`,
    /// etc.), any value that is not a known terminal state is treated as
    /// in progress.
    ///
    /// # Example
    /// ```
    /// # use datapipelines_lro::OperationStatus;
    /// assert_eq!(OperationStatus::from_service("succeeded"), OperationStatus::Succeeded);
    /// assert_eq!(OperationStatus::from_service("Cancelled"), OperationStatus::Canceled);
    /// assert_eq!(OperationStatus::from_service("Running"), OperationStatus::InProgress);
    /// ```
    pub fn from_service(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "succeeded" => Self::Succeeded,
            "failed" => Self::Failed,
            "canceled" | "cancelled" => Self::Canceled,
            "notstarted" => Self::NotStarted,
            _ => Self::InProgress,
        }
    }
}

/// The trait implemented by LRO helpers.
///
/// # Parameters
/// * `R` - the response type, that is, the type of response included when the
///   long-running operation completes successfully.
pub trait Poller<R>: Send + sealed::Poller {
    /// Query the current status of the long-running operation.
    ///
    /// The first call sends the initial request. Each subsequent call checks
    /// the status of the operation, until it reaches a terminal state.
    fn poll(&mut self) -> impl Future<Output = PollingResult<R>> + Send;

    /// Poll the long-running operation until it completes.
    ///
    /// The poller waits between status checks. If the service sends a
    /// `Retry-After` header the poller waits that long, otherwise it uses the
    /// polling backoff policy.
    fn until_done(self) -> impl Future<Output = Result<R>> + Send;

    /// The current state of the operation.
    fn status(&self) -> OperationStatus;

    /// Returns true if the operation reached a terminal state.
    fn is_done(&self) -> bool {
        self.status().is_terminal()
    }

    /// Requests the cancellation of the operation.
    ///
    /// Returns an error satisfying [Error::is_not_supported] if the operation
    /// cannot be canceled. In that case the poller is unchanged. Canceling an
    /// operation that already completed does nothing.
    fn cancel(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Converts a poller to a [futures::Stream].
    ///
    /// The stream ends after the first [PollingResult::Completed] value.
    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<R>> + Unpin;
}

mod sealed {
    pub trait Poller {}
}

#[doc(hidden)]
pub mod internal;
