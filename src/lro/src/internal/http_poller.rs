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

//! Implements long-running operations over plain HTTP.
//!
//! The service starts an operation and returns `202 Accepted`, or a `2xx`
//! status with one of the polling headers (`Azure-AsyncOperation`,
//! `Operation-Location`, or `Location`). The poller then queries the URL in
//! the header until the body reports a terminal status. Without a polling
//! header the poller queries the resource itself.

use crate::{Error, OperationStatus, Poller, PollingResult, Result};
use bytes::Bytes;
use gax::error::rpc::Status;
use gax::loop_state::LoopState;
use gax::polling_backoff_policy::PollingBackoffPolicy;
use gax::polling_error_policy::PollingErrorPolicy;
use gax::response::Response;
use http::{HeaderMap, StatusCode};
use serde_json::Value;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

const AZURE_ASYNC_OPERATION: &str = "azure-asyncoperation";
const OPERATION_LOCATION: &str = "operation-location";
const LOCATION: &str = "location";
const RETRY_AFTER: &str = "retry-after";

/// How the poller obtains the final value of a successful operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinalState {
    /// Query the URL of the original request. Used for `PUT` operations.
    OriginalUri,
    /// Query the `Location` header captured from the initial response.
    Location,
    /// The operation has no result, the poller returns `R::default()`.
    None,
}

/// The resource targeted by the long-running operation.
#[derive(Clone, Debug)]
pub struct Target {
    /// The URL of the original request, relative to the endpoint.
    pub resource_url: String,
    pub final_state: FinalState,
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Cancels the operation. Receives the current polling URL, if any.
pub type CancelAction = Arc<dyn Fn(Option<String>) -> BoxFuture<Result<()>> + Send + Sync>;

/// Creates a poller from the closures provided by the client library.
///
/// * `start` - sends the initial request. It should capture the request
///   arguments and options.
/// * `query` - sends a `GET` request to a URL (absolute, or relative to the
///   endpoint) and returns the raw response.
/// * `target` - the original resource and how to get the final value.
/// * `cancel` - if the operation can be canceled, how to do so.
pub fn new_poller<R, S, SF, Q, QF>(
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: S,
    query: Q,
    target: Target,
    cancel: Option<CancelAction>,
) -> impl Poller<R>
where
    R: serde::de::DeserializeOwned + Default + Clone + Send + 'static,
    S: FnOnce() -> SF + Send,
    SF: Future<Output = Result<Response<Bytes>>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync,
    QF: Future<Output = Result<Response<Bytes>>> + Send + 'static,
{
    HttpPoller {
        error_policy,
        backoff_policy,
        start: Some(start),
        query,
        cancel,
        target,
        status: OperationStatus::NotStarted,
        polling_url: None,
        polling_location: false,
        location: None,
        retry_after: None,
        loop_start: Instant::now(),
        attempt_count: 0,
        fetch_final: false,
        result: None,
    }
}

struct HttpPoller<R, S, Q> {
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: Option<S>,
    query: Q,
    cancel: Option<CancelAction>,
    target: Target,
    status: OperationStatus,
    polling_url: Option<String>,
    // The polling URL came from the `Location` header.
    polling_location: bool,
    // The newest `Location` header returned by the service.
    location: Option<String>,
    retry_after: Option<Duration>,
    loop_start: Instant,
    attempt_count: u32,
    // The operation succeeded, but the final value is not known yet.
    fetch_final: bool,
    // Set once, when the poller reaches a terminal state.
    result: Option<Result<R>>,
}

impl<R, S, Q> crate::sealed::Poller for HttpPoller<R, S, Q> {}

impl<R, S, SF, Q, QF> Poller<R> for HttpPoller<R, S, Q>
where
    R: serde::de::DeserializeOwned + Default + Clone + Send + 'static,
    S: FnOnce() -> SF + Send,
    SF: Future<Output = Result<Response<Bytes>>> + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync,
    QF: Future<Output = Result<Response<Bytes>>> + Send + 'static,
{
    async fn poll(&mut self) -> PollingResult<R> {
        if let Some(result) = &self.result {
            return PollingResult::Completed(result.clone());
        }
        if let Some(start) = self.start.take() {
            self.loop_start = Instant::now();
            self.attempt_count = 1;
            return match start().await {
                Err(e) => self.complete(OperationStatus::Failed, Err(e)),
                Ok(response) => self.on_start(response).await,
            };
        }
        self.attempt_count += 1;
        if self.fetch_final {
            return self.fetch_final_value().await;
        }
        let url = self.polling_url();
        match (self.query)(url.clone()).await {
            Ok(response) => self.on_status(url, response).await,
            Err(e) if self.is_resource_gone(&e) => {
                self.complete(OperationStatus::Succeeded, Ok(R::default()))
            }
            Err(e) => self.on_error(e),
        }
    }

    async fn until_done(mut self) -> Result<R> {
        loop {
            if let PollingResult::Completed(r) = self.poll().await {
                return r;
            }
            let wait = self.retry_after.take().unwrap_or_else(|| {
                self.backoff_policy
                    .wait_period(self.loop_start, self.attempt_count)
            });
            tokio::time::sleep(wait).await;
        }
    }

    fn status(&self) -> OperationStatus {
        self.status
    }

    async fn cancel(&mut self) -> Result<()> {
        if self.result.is_some() {
            return Ok(());
        }
        let Some(cancel) = self.cancel.clone() else {
            return Err(Error::not_supported(
                "this long-running operation cannot be canceled",
            ));
        };
        if self.start.take().is_none() {
            cancel(self.polling_url.clone()).await?;
        }
        self.complete(
            OperationStatus::Canceled,
            Err(Error::operation_canceled(None)),
        );
        Ok(())
    }

    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<R>> + Unpin {
        use futures::stream::unfold;
        Box::pin(unfold(Some(self), move |state| async move {
            let mut poller = state?;
            let pr = poller.poll().await;
            let next = match &pr {
                PollingResult::Completed(_) => None,
                _ => Some(poller),
            };
            Some((pr, next))
        }))
    }
}

impl<R, S, SF, Q, QF> HttpPoller<R, S, Q>
where
    R: serde::de::DeserializeOwned + Default + Clone + Send + 'static,
    Q: Fn(String) -> QF + Send + Sync,
    QF: Future<Output = Result<Response<Bytes>>> + Send + 'static,
    S: FnOnce() -> SF + Send,
{
    async fn on_start(&mut self, response: Response<Bytes>) -> PollingResult<R> {
        let observation = observe(&response, true);
        self.update(&observation);
        tracing::debug!(
            status = ?observation.status,
            polling_url = self.polling_url,
            "long-running operation started"
        );
        match observation.status {
            OperationStatus::Succeeded => self.succeed(response.into_body(), true).await,
            OperationStatus::InProgress | OperationStatus::NotStarted => {
                self.status = OperationStatus::InProgress;
                PollingResult::InProgress
            }
            _ => self.fail(observation),
        }
    }

    async fn on_status(&mut self, url: String, response: Response<Bytes>) -> PollingResult<R> {
        let observation = observe(&response, false);
        // With `FinalState::Location` a terminal response from the `Location`
        // URL carries the final value.
        let body_is_resource = self.polling_url.is_none()
            || (self.polling_location && self.target.final_state == FinalState::Location);
        self.update(&observation);
        tracing::debug!(
            status = ?observation.status,
            attempt_count = self.attempt_count,
            "long-running operation polled"
        );
        match observation.status {
            OperationStatus::Succeeded => {
                self.succeed(response.into_body(), body_is_resource).await
            }
            OperationStatus::InProgress | OperationStatus::NotStarted => {
                if let Some(e) =
                    self.error_policy
                        .on_in_progress(self.loop_start, self.attempt_count, &url)
                {
                    return self.complete(OperationStatus::Failed, Err(e));
                }
                PollingResult::InProgress
            }
            _ => self.fail(observation),
        }
    }

    async fn succeed(&mut self, body: Bytes, body_is_resource: bool) -> PollingResult<R> {
        match self.target.final_state {
            FinalState::None => self.complete(OperationStatus::Succeeded, Ok(R::default())),
            _ if body_is_resource && !body.is_empty() => {
                self.complete(OperationStatus::Succeeded, decode(&body))
            }
            _ => {
                self.fetch_final = true;
                self.fetch_final_value().await
            }
        }
    }

    async fn fetch_final_value(&mut self) -> PollingResult<R> {
        let url = match (self.target.final_state, &self.location) {
            (FinalState::Location, Some(location)) => location.clone(),
            _ => self.target.resource_url.clone(),
        };
        match (self.query)(url).await {
            Ok(response) => {
                self.fetch_final = false;
                self.complete(OperationStatus::Succeeded, decode(response.body()))
            }
            Err(e) => self.on_error(e),
        }
    }

    fn fail(&mut self, observation: Observation) -> PollingResult<R> {
        match observation.status {
            OperationStatus::Canceled => self.complete(
                OperationStatus::Canceled,
                Err(Error::operation_canceled(observation.error)),
            ),
            _ => self.complete(
                OperationStatus::Failed,
                Err(Error::operation_failed(observation.error)),
            ),
        }
    }

    fn on_error(&mut self, error: Error) -> PollingResult<R> {
        match self
            .error_policy
            .on_error(self.loop_start, self.attempt_count, error)
        {
            LoopState::Continue(e) => PollingResult::PollingError(e),
            LoopState::Permanent(e) | LoopState::Exhausted(e) => {
                self.complete(OperationStatus::Failed, Err(e))
            }
        }
    }

    fn complete(&mut self, status: OperationStatus, result: Result<R>) -> PollingResult<R> {
        tracing::debug!(?status, ok = result.is_ok(), "long-running operation completed");
        self.status = status;
        self.start = None;
        self.result = Some(result.clone());
        PollingResult::Completed(result)
    }

    fn update(&mut self, observation: &Observation) {
        if let Some(url) = &observation.polling_url {
            self.polling_url = Some(url.clone());
            self.polling_location = observation.from_location;
        }
        if let Some(location) = &observation.location {
            self.location = Some(location.clone());
        }
        self.retry_after = observation.retry_after;
    }

    fn polling_url(&self) -> String {
        self.polling_url
            .clone()
            .unwrap_or_else(|| self.target.resource_url.clone())
    }

    // Operations without a result may delete the original resource (think
    // `DELETE` or a rename). If there is no status monitor the poller queries
    // the resource, and `404` means the operation is done.
    fn is_resource_gone(&self, error: &Error) -> bool {
        self.polling_url.is_none()
            && self.target.final_state == FinalState::None
            && error.http_status_code() == Some(404)
    }
}

/// What the poller learns from one response.
#[derive(Debug)]
struct Observation {
    status: OperationStatus,
    polling_url: Option<String>,
    from_location: bool,
    location: Option<String>,
    retry_after: Option<Duration>,
    error: Option<Status>,
}

fn observe(response: &Response<Bytes>, initial: bool) -> Observation {
    let headers = response.headers();
    let monitor = header(headers, AZURE_ASYNC_OPERATION)
        .or_else(|| header(headers, OPERATION_LOCATION));
    let location = header(headers, LOCATION);
    let from_location = monitor.is_none() && location.is_some();
    let polling_url = monitor.or_else(|| location.clone());
    let body = serde_json::from_slice::<Value>(response.body()).ok();
    let status = match body.as_ref().and_then(body_status) {
        Some(OperationStatus::NotStarted) => OperationStatus::InProgress,
        Some(s) => s,
        None => status_from_code(response.status(), initial && polling_url.is_some()),
    };
    Observation {
        status,
        location,
        from_location,
        polling_url,
        retry_after: header(headers, RETRY_AFTER)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs),
        error: body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(|e| Status::try_from(e).ok()),
    }
}

fn status_from_code(code: StatusCode, has_polling_header: bool) -> OperationStatus {
    match code {
        StatusCode::ACCEPTED => OperationStatus::InProgress,
        _ if has_polling_header => OperationStatus::InProgress,
        _ => OperationStatus::Succeeded,
    }
}

fn body_status(body: &Value) -> Option<OperationStatus> {
    body.get("status")
        .or_else(|| body.pointer("/properties/provisioningState"))
        .and_then(Value::as_str)
        .map(OperationStatus::from_service)
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn decode<R>(body: &Bytes) -> Result<R>
where
    R: serde::de::DeserializeOwned + Default,
{
    if body.is_empty() {
        return Ok(R::default());
    }
    serde_json::from_slice(body).map_err(Error::deser)
}
