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

//! Defines the types for polling error policies.
//!
//! # Example
//! ```
//! # use datapipelines_gax::polling_error_policy::*;
//! use std::time::Duration;
//! // Poll for at most 15 minutes or at most 50 attempts: whichever limit is
//! // reached first stops the polling loop.
//! let policy = TransientErrors
//!     .with_time_limit(Duration::from_secs(15 * 60))
//!     .with_attempt_limit(50);
//! ```
//!
//! The client libraries automatically poll long-running operations (LROs). A
//! status check may fail, and the client library needs to (1) decide if the
//! failure is transient, and (2) provide a mechanism to limit the polling loop
//! duration.
//!
//! By default the client libraries do not recover from polling errors: the
//! first failed status check ends the polling loop and the error is returned
//! to the application. Applications that prefer to keep polling through
//! transient failures can use [TransientErrors] or [AlwaysContinue], decorated
//! with time or attempt limits.
//!
//! To configure the default polling error policy for a client, use
//! [ClientBuilder::with_polling_error_policy]. To configure the polling error
//! policy used for a specific request, use
//! [RequestOptionsBuilder::with_polling_error_policy].
//!
//! [ClientBuilder::with_polling_error_policy]: crate::client_builder::ClientBuilder::with_polling_error_policy
//! [RequestOptionsBuilder::with_polling_error_policy]: crate::options::RequestOptionsBuilder::with_polling_error_policy

use crate::error::Error;
use crate::loop_state::LoopState;
use std::sync::Arc;

/// Determines how errors are handled in the polling loop.
///
/// Implementations of this trait determine if polling errors may resolve in
/// future attempts, and for how long the polling loop may continue.
pub trait PollingErrorPolicy: Send + Sync + std::fmt::Debug {
    /// Query the polling policy after an error.
    ///
    /// # Parameters
    /// * `loop_start` - when the polling loop started.
    /// * `attempt_count` - the number of attempts. This includes the initial
    ///   request. As this method is called after the LRO starts, it is always
    ///   non-zero.
    /// * `error` - the last error when attempting the request.
    fn on_error(
        &self,
        loop_start: std::time::Instant,
        attempt_count: u32,
        error: Error,
    ) -> LoopState;

    /// Called when the LRO is successfully polled, but the LRO is still in
    /// progress.
    ///
    /// Returning an error stops the polling loop.
    fn on_in_progress(
        &self,
        _loop_start: std::time::Instant,
        _attempt_count: u32,
        _operation_url: &str,
    ) -> Option<Error> {
        None
    }
}

/// A helper type to use [PollingErrorPolicy] in client and request options.
#[derive(Clone)]
pub struct PollingErrorPolicyArg(pub(crate) Arc<dyn PollingErrorPolicy>);

impl<T> std::convert::From<T> for PollingErrorPolicyArg
where
    T: PollingErrorPolicy + 'static,
{
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl std::convert::From<Arc<dyn PollingErrorPolicy>> for PollingErrorPolicyArg {
    fn from(value: Arc<dyn PollingErrorPolicy>) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for PollingErrorPolicyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PollingErrorPolicyArg").field(&self.0).finish()
    }
}

/// Extension trait for [PollingErrorPolicy]
pub trait PollingErrorPolicyExt: PollingErrorPolicy + Sized {
    /// Decorate a [PollingErrorPolicy] to limit the total elapsed time in the
    /// polling loop.
    ///
    /// While the time spent in the polling loop (including time in backoff) is
    /// less than the prescribed duration the `on_error()` method returns the
    /// results of the inner policy. After that time it returns
    /// [Exhausted][LoopState::Exhausted] if the inner policy returns
    /// [Continue][LoopState::Continue].
    ///
    /// # Example
    /// ```
    /// # use datapipelines_gax::*;
    /// use polling_error_policy::*;
    /// use std::time::{Duration, Instant};
    /// let policy = TransientErrors.with_time_limit(Duration::from_secs(10)).with_attempt_limit(3);
    /// let attempt_count = 4;
    /// assert!(policy.on_error(Instant::now(), attempt_count, transient_error()).is_exhausted());
    ///
    /// use datapipelines_gax::error::Error;
    /// fn transient_error() -> Error { Error::io("connection reset") }
    /// ```
    fn with_time_limit(self, maximum_duration: std::time::Duration) -> LimitedElapsedTime<Self> {
        LimitedElapsedTime::custom(self, maximum_duration)
    }

    /// Decorate a [PollingErrorPolicy] to limit the number of poll attempts.
    ///
    /// This policy decorates an inner policy and limits the total number of
    /// attempts. Note that `on_error()` is called only after a polling attempt.
    /// Therefore, setting the maximum number of attempts to 0 or 1 results in
    /// no polling after the LRO starts.
    ///
    /// # Example
    /// ```
    /// # use datapipelines_gax::*;
    /// use polling_error_policy::*;
    /// use std::time::Instant;
    /// let policy = TransientErrors.with_attempt_limit(3);
    /// assert!(policy.on_error(Instant::now(), 1, transient_error()).is_continue());
    /// assert!(policy.on_error(Instant::now(), 2, transient_error()).is_continue());
    /// assert!(policy.on_error(Instant::now(), 3, transient_error()).is_exhausted());
    ///
    /// use datapipelines_gax::error::Error;
    /// fn transient_error() -> Error { Error::io("connection reset") }
    /// ```
    fn with_attempt_limit(self, maximum_attempts: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, maximum_attempts)
    }
}

impl<T: PollingErrorPolicy> PollingErrorPolicyExt for T {}

/// A polling policy that stops on the first error.
///
/// This is the default policy. Polling errors are returned to the application
/// unchanged, for example, a connection failure while polling is returned as a
/// transport error.
///
/// # Example
/// ```
/// # use datapipelines_gax::polling_error_policy::*;
/// use std::time::Instant;
/// let policy = PropagateErrors;
/// assert!(policy.on_error(Instant::now(), 1, transient_error()).is_permanent());
///
/// use datapipelines_gax::error::Error;
/// fn transient_error() -> Error { Error::io("connection reset") }
/// ```
#[derive(Clone, Debug)]
pub struct PropagateErrors;

impl PollingErrorPolicy for PropagateErrors {
    fn on_error(
        &self,
        _loop_start: std::time::Instant,
        _attempt_count: u32,
        error: Error,
    ) -> LoopState {
        LoopState::Permanent(error)
    }
}

/// A polling policy that continues on transient errors.
///
/// This policy must be decorated to limit the number of polling attempts or the
/// duration of the polling loop.
///
/// The policy treats I/O errors, timeouts, and the `408`, `429`, `500`, `502`,
/// `503` and `504` HTTP status codes as transient. Any other error stops the
/// polling loop.
///
/// # Example
/// ```
/// # use datapipelines_gax::polling_error_policy::*;
/// use std::time::Instant;
/// let policy = TransientErrors.with_attempt_limit(3);
/// assert!(policy.on_error(Instant::now(), 1, transient_error()).is_continue());
/// assert!(policy.on_error(Instant::now(), 4, transient_error()).is_exhausted());
///
/// use datapipelines_gax::error::Error;
/// fn transient_error() -> Error { Error::io("connection reset") }
/// ```
#[derive(Clone, Debug)]
pub struct TransientErrors;

impl TransientErrors {
    fn is_transient(error: &Error) -> bool {
        if error.is_io() || error.is_timeout() {
            return true;
        }
        matches!(
            error.http_status_code(),
            Some(408) | Some(429) | Some(500) | Some(502) | Some(503) | Some(504)
        )
    }
}

impl PollingErrorPolicy for TransientErrors {
    fn on_error(
        &self,
        _loop_start: std::time::Instant,
        _attempt_count: u32,
        error: Error,
    ) -> LoopState {
        if Self::is_transient(&error) {
            LoopState::Continue(error)
        } else {
            LoopState::Permanent(error)
        }
    }
}

/// A polling policy that continues on any error.
///
/// This policy must be decorated to limit the number of polling attempts or the
/// duration of the polling loop.
///
/// # Example
/// ```
/// # use datapipelines_gax::polling_error_policy::*;
/// use std::time::Instant;
/// let policy = AlwaysContinue;
/// assert!(policy.on_error(Instant::now(), 1, permanent_error()).is_continue());
///
/// use datapipelines_gax::error::{Error, rpc::Status};
/// fn permanent_error() -> Error { Error::service(Status::default().set_code("AuthorizationFailed")) }
/// ```
#[derive(Clone, Debug)]
pub struct AlwaysContinue;

impl PollingErrorPolicy for AlwaysContinue {
    fn on_error(
        &self,
        _loop_start: std::time::Instant,
        _attempt_count: u32,
        error: Error,
    ) -> LoopState {
        LoopState::Continue(error)
    }
}

/// A polling policy decorator that limits the total time in the polling loop.
///
/// This policy decorates an inner policy and limits the duration of polling
/// loops. While the time spent in the polling loop (including time in backoff)
/// is less than the prescribed duration the `on_error()` method returns the
/// results of the inner policy. After that time it returns
/// [Exhausted][LoopState::Exhausted] if the inner policy returns
/// [Continue][LoopState::Continue].
///
/// The decorator also stops polling operations that remain in progress past
/// the deadline.
///
/// # Parameters
/// * `P` - the inner polling policy, defaults to [TransientErrors].
#[derive(Debug)]
pub struct LimitedElapsedTime<P = TransientErrors>
where
    P: PollingErrorPolicy,
{
    inner: P,
    maximum_duration: std::time::Duration,
}

impl LimitedElapsedTime {
    /// Creates a new instance, with the default inner policy.
    ///
    /// # Example
    /// ```
    /// # use datapipelines_gax::polling_error_policy::*;
    /// use std::time::{Duration, Instant};
    /// let policy = LimitedElapsedTime::new(Duration::from_secs(10));
    /// let start = Instant::now() - Duration::from_secs(20);
    /// assert!(policy.on_error(start, 1, transient_error()).is_exhausted());
    ///
    /// use datapipelines_gax::error::Error;
    /// fn transient_error() -> Error { Error::io("connection reset") }
    /// ```
    pub fn new(maximum_duration: std::time::Duration) -> Self {
        Self {
            inner: TransientErrors,
            maximum_duration,
        }
    }
}

impl<P> LimitedElapsedTime<P>
where
    P: PollingErrorPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_duration: std::time::Duration) -> Self {
        Self {
            inner,
            maximum_duration,
        }
    }

    fn in_progress_impl(&self, start: std::time::Instant, operation_url: &str) -> Option<Error> {
        let now = std::time::Instant::now();
        let elapsed = now.checked_duration_since(start)?;
        if elapsed < self.maximum_duration {
            return None;
        }
        Some(Error::exhausted(Exhausted::new(
            operation_url,
            "elapsed time",
            format!("{elapsed:?}"),
            format!("{:?}", self.maximum_duration),
        )))
    }
}

impl<P> PollingErrorPolicy for LimitedElapsedTime<P>
where
    P: PollingErrorPolicy + 'static,
{
    fn on_error(&self, start: std::time::Instant, count: u32, error: Error) -> LoopState {
        match self.inner.on_error(start, count, error) {
            LoopState::Continue(e) if std::time::Instant::now() >= start + self.maximum_duration => {
                LoopState::Exhausted(e)
            }
            state => state,
        }
    }

    fn on_in_progress(
        &self,
        start: std::time::Instant,
        count: u32,
        operation_url: &str,
    ) -> Option<Error> {
        self.inner
            .on_in_progress(start, count, operation_url)
            .or_else(|| self.in_progress_impl(start, operation_url))
    }
}

/// A polling policy decorator that limits the number of attempts.
///
/// The policy passes through the results from the inner policy as long as
/// `attempt_count < maximum_attempts`. However, once the maximum number of
/// attempts is reached, the policy replaces any [Continue][LoopState::Continue]
/// result with [Exhausted][LoopState::Exhausted].
///
/// # Parameters
/// * `P` - the inner polling policy, defaults to [TransientErrors].
#[derive(Debug)]
pub struct LimitedAttemptCount<P = TransientErrors>
where
    P: PollingErrorPolicy,
{
    inner: P,
    maximum_attempts: u32,
}

impl LimitedAttemptCount {
    /// Creates a new instance, with the default inner policy.
    ///
    /// # Example
    /// ```
    /// # use datapipelines_gax::polling_error_policy::*;
    /// use std::time::Instant;
    /// let policy = LimitedAttemptCount::new(5);
    /// assert!(policy.on_error(Instant::now(), 10, transient_error()).is_exhausted());
    ///
    /// use datapipelines_gax::error::Error;
    /// fn transient_error() -> Error { Error::io("connection reset") }
    /// ```
    pub fn new(maximum_attempts: u32) -> Self {
        Self {
            inner: TransientErrors,
            maximum_attempts,
        }
    }
}

impl<P> LimitedAttemptCount<P>
where
    P: PollingErrorPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_attempts: u32) -> Self {
        Self {
            inner,
            maximum_attempts,
        }
    }

    fn in_progress_impl(&self, count: u32, operation_url: &str) -> Option<Error> {
        if count < self.maximum_attempts {
            return None;
        }
        Some(Error::exhausted(Exhausted::new(
            operation_url,
            "attempt count",
            count.to_string(),
            self.maximum_attempts.to_string(),
        )))
    }
}

impl<P> PollingErrorPolicy for LimitedAttemptCount<P>
where
    P: PollingErrorPolicy,
{
    fn on_error(&self, start: std::time::Instant, count: u32, error: Error) -> LoopState {
        match self.inner.on_error(start, count, error) {
            LoopState::Continue(e) if count >= self.maximum_attempts => LoopState::Exhausted(e),
            state => state,
        }
    }

    fn on_in_progress(
        &self,
        start: std::time::Instant,
        count: u32,
        operation_url: &str,
    ) -> Option<Error> {
        self.inner
            .on_in_progress(start, count, operation_url)
            .or_else(|| self.in_progress_impl(count, operation_url))
    }
}

/// Indicates that a polling loop has been exhausted.
#[derive(Debug)]
pub struct Exhausted {
    operation_url: String,
    limit_name: &'static str,
    value: String,
    limit: String,
}

impl Exhausted {
    pub fn new(operation_url: &str, limit_name: &'static str, value: String, limit: String) -> Self {
        Self {
            operation_url: operation_url.to_string(),
            limit_name,
            value,
            limit,
        }
    }
}

impl std::fmt::Display for Exhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "polling loop for {} exhausted, {} value ({}) exceeds limit ({})",
            self.operation_url, self.limit_name, self.value, self.limit
        )
    }
}

impl std::error::Error for Exhausted {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::rpc::Status;
    use http::HeaderMap;
    use std::error::Error as _;
    use std::time::{Duration, Instant};
    use test_case::test_case;

    mockall::mock! {
        #[derive(Debug)]
        Policy {}
        impl PollingErrorPolicy for Policy {
            fn on_error(&self, loop_start: std::time::Instant, attempt_count: u32, error: Error) -> LoopState;
            fn on_in_progress(&self, loop_start: std::time::Instant, attempt_count: u32, operation_url: &str) -> Option<Error>;
        }
    }

    // Verify `PollingErrorPolicyArg` can be converted from the desired types.
    #[test]
    fn polling_policy_arg() {
        let policy = LimitedAttemptCount::new(3);
        let _ = PollingErrorPolicyArg::from(policy);

        let policy: Arc<dyn PollingErrorPolicy> = Arc::new(LimitedAttemptCount::new(3));
        let arg = PollingErrorPolicyArg::from(policy);
        assert!(format!("{arg:?}").contains("LimitedAttemptCount"), "{arg:?}");
    }

    #[test]
    fn propagate_errors() {
        let p = PropagateErrors;
        let now = Instant::now();
        assert!(p.on_in_progress(now, 1, "unused").is_none());
        assert!(p.on_error(now, 1, Error::io("err")).is_permanent());
        assert!(p.on_error(now, 1, http_error(503)).is_permanent());
        assert!(p.on_error(now, 1, service_error()).is_permanent());
    }

    #[test_case(Error::io("err"); "io")]
    #[test_case(Error::timeout("err"); "timeout")]
    #[test_case(http_error(408); "http 408")]
    #[test_case(http_error(429); "http 429")]
    #[test_case(http_error(500); "http 500")]
    #[test_case(http_error(502); "http 502")]
    #[test_case(http_error(503); "http 503")]
    #[test_case(http_error(504); "http 504")]
    #[test_case(service_error_with_code(503); "service 503")]
    fn transient_errors_continue(error: Error) {
        let p = TransientErrors;
        let now = Instant::now();
        assert!(p.on_in_progress(now, 1, "unused").is_none());
        assert!(p.on_error(now, 1, error).is_continue());
    }

    #[test_case(http_error(400); "http 400")]
    #[test_case(http_error(403); "http 403")]
    #[test_case(http_error(404); "http 404")]
    #[test_case(service_error(); "service without status code")]
    #[test_case(service_error_with_code(409); "service 409")]
    #[test_case(Error::deser("bad"); "deserialization")]
    #[test_case(Error::operation_failed(None); "operation failed")]
    fn transient_errors_permanent(error: Error) {
        let p = TransientErrors;
        assert!(p.on_error(Instant::now(), 1, error).is_permanent());
    }

    #[test_case(Error::io("err"))]
    #[test_case(http_error(404))]
    #[test_case(service_error())]
    #[test_case(Error::deser("bad"))]
    fn always_continue(error: Error) {
        let p = AlwaysContinue;
        let now = Instant::now();
        assert!(p.on_in_progress(now, 1, "unused").is_none());
        assert!(p.on_error(now, 1, error).is_continue());
    }

    #[test]
    fn with_time_limit() {
        let policy = AlwaysContinue.with_time_limit(Duration::from_secs(10));
        assert!(
            policy
                .on_error(Instant::now() - Duration::from_secs(1), 1, Error::io("err"))
                .is_continue(),
            "{policy:?}"
        );
        assert!(
            policy
                .on_error(Instant::now() - Duration::from_secs(20), 1, Error::io("err"))
                .is_exhausted(),
            "{policy:?}"
        );
    }

    #[test]
    fn with_attempt_limit() {
        let policy = AlwaysContinue.with_attempt_limit(3);
        assert!(
            policy.on_error(Instant::now(), 1, Error::io("err")).is_continue(),
            "{policy:?}"
        );
        assert!(
            policy.on_error(Instant::now(), 2, Error::io("err")).is_continue(),
            "{policy:?}"
        );
        assert!(
            policy.on_error(Instant::now(), 3, Error::io("err")).is_exhausted(),
            "{policy:?}"
        );
    }

    #[test]
    fn limited_elapsed_time_in_progress() {
        let policy = LimitedElapsedTime::new(Duration::from_secs(10));
        let err = policy.on_in_progress(Instant::now() - Duration::from_secs(1), 1, "op-url");
        assert!(err.is_none(), "{err:?}");
        let err = policy.on_in_progress(Instant::now() - Duration::from_secs(20), 1, "op-url");
        let err = err.unwrap();
        assert!(err.is_exhausted(), "{err:?}");
        let exhausted = err.source().and_then(|e| e.downcast_ref::<Exhausted>());
        assert!(exhausted.is_some(), "{err:?}");
        assert!(err.to_string().contains("op-url"), "{err}");
    }

    #[test]
    fn limited_elapsed_time_forwards() {
        let mut mock = MockPolicy::new();
        mock.expect_on_error()
            .times(1..)
            .returning(|_, _, e| LoopState::Permanent(e));
        mock.expect_on_in_progress()
            .times(1..)
            .returning(|_, _, _| Some(Error::exhausted("inner")));
        let policy = LimitedElapsedTime::custom(mock, Duration::from_secs(60));
        let now = Instant::now();
        assert!(policy.on_error(now, 1, Error::io("err")).is_permanent());
        let err = policy.on_in_progress(now, 1, "op-url");
        assert!(matches!(&err, Some(e) if e.to_string() == "inner"), "{err:?}");
    }

    #[test]
    fn limited_elapsed_time_inner_exhausted() {
        let mut mock = MockPolicy::new();
        mock.expect_on_error()
            .times(1)
            .returning(|_, _, e| LoopState::Exhausted(e));
        let policy = LimitedElapsedTime::custom(mock, Duration::from_secs(60));
        assert!(
            policy
                .on_error(Instant::now(), 1, Error::io("err"))
                .is_exhausted()
        );
    }

    #[test]
    fn limited_attempt_count_in_progress() {
        let policy = LimitedAttemptCount::new(3);
        assert!(policy.on_in_progress(Instant::now(), 2, "op-url").is_none());
        let err = policy.on_in_progress(Instant::now(), 3, "op-url");
        let err = err.unwrap();
        assert!(err.is_exhausted(), "{err:?}");
        assert!(err.to_string().contains("attempt count"), "{err}");
    }

    #[test]
    fn limited_attempt_count_forwards() {
        let mut mock = MockPolicy::new();
        mock.expect_on_error()
            .times(1..)
            .returning(|_, _, e| LoopState::Permanent(e));
        mock.expect_on_in_progress()
            .times(1..)
            .returning(|_, _, _| None);
        let policy = LimitedAttemptCount::custom(mock, 5);
        assert!(
            policy
                .on_error(Instant::now(), 10, Error::io("err"))
                .is_permanent()
        );
        assert!(policy.on_in_progress(Instant::now(), 1, "op-url").is_none());
    }

    #[test]
    fn exhausted_fmt() {
        let exhausted = Exhausted::new(
            "https://host/operations/abc",
            "test-limit-name",
            "test-value".to_string(),
            "test-limit".to_string(),
        );
        let fmt = format!("{exhausted}");
        assert!(fmt.contains("https://host/operations/abc"), "{fmt}");
        assert!(fmt.contains("test-limit-name"), "{fmt}");
        assert!(fmt.contains("test-value"), "{fmt}");
        assert!(fmt.contains("test-limit"), "{fmt}");
    }

    fn http_error(code: u16) -> Error {
        Error::http(code, HeaderMap::new(), bytes::Bytes::from_static(b"uh-oh"))
    }

    fn service_error() -> Error {
        Error::service(Status::default().set_code("Conflict"))
    }

    fn service_error_with_code(code: u16) -> Error {
        Error::service_with_http_metadata(
            Status::default().set_code("Unavailable"),
            Some(code),
            None,
            None,
        )
    }
}
