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

use super::rpc::Status;
use http::HeaderMap;
use std::error::Error as StdError;
use std::sync::Arc;

type BoxError = Box<dyn StdError + Send + Sync>;
type SharedError = Arc<dyn StdError + Send + Sync>;

/// The core error returned by all client libraries.
///
/// The client libraries report errors from multiple sources. For example, the
/// service may return an error, the transport may be unable to create the
/// necessary connection to make a request, the request may timeout before a
/// response is received, a long-running operation may complete with a failure,
/// or the library may be unable to format the request due to invalid or
/// missing application inputs.
///
/// Most applications will just return the error or log it, without any further
/// action. However, some applications may need to interrogate the error
/// details. This type offers a series of predicates to determine the error
/// kind. The type also offers accessors to query the most common error details.
/// Applications can query the error [source][std::error::Error::source] for
/// deeper information.
///
/// Errors are cheap to clone. Pollers keep a copy of their terminal result and
/// return it on every subsequent call.
///
/// # Example
/// ```
/// use datapipelines_gax::error::Error;
/// match example_function() {
///     Err(e) if matches!(e.status(), Some(_)) => {
///         println!("service error {e}, debug using {:?}", e.status().unwrap());
///     },
///     Err(e) if e.is_timeout() => { println!("not enough time {e}"); },
///     Err(e) => { println!("some other error {e}"); },
///     Ok(_) => { println!("success, how boring"); },
/// }
///
/// fn example_function() -> Result<String, Error> {
///     // ... details omitted ...
///     # use datapipelines_gax::error::rpc::Status;
///     # Err(Error::service(Status::default().set_code("PipelineNotFound").set_message("NOT FOUND")))
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<SharedError>,
}

impl Error {
    /// Creates an error with the information returned by the service.
    ///
    /// # Example
    /// ```
    /// use datapipelines_gax::error::Error;
    /// use datapipelines_gax::error::rpc::Status;
    /// let status = Status::default().set_code("PipelineNotFound").set_message("NOT FOUND");
    /// let error = Error::service(status.clone());
    /// assert_eq!(error.status(), Some(&status));
    /// ```
    pub fn service(status: Status) -> Self {
        let details = ServiceDetails {
            status,
            status_code: None,
            headers: None,
            payload: None,
        };
        Self {
            kind: ErrorKind::Service(Box::new(details)),
            source: None,
        }
    }

    /// Creates an error representing a timeout.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use datapipelines_gax::error::Error;
    /// let error = Error::timeout("simulated timeout");
    /// assert!(error.is_timeout());
    /// assert!(error.source().is_some());
    /// ```
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Timeout, source)
    }

    /// The request could not be completed before its deadline.
    ///
    /// This is always a client-side generated error. Note that the request may
    /// or may not have started, and it may or may not complete in the service.
    /// If the request mutates any state in the service, it may or may not be
    /// safe to attempt the request again.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// The polling loop was exhausted.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use datapipelines_gax::error::Error;
    /// let error = Error::exhausted("too many polling attempts");
    /// assert!(error.is_exhausted());
    /// assert!(error.source().is_some());
    /// ```
    pub fn exhausted<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Exhausted, source)
    }

    /// The polling error policy stopped the loop.
    ///
    /// Polling error policies can be configured to stop after some number of
    /// attempts or some elapsed time. The operation may still complete in the
    /// service, use a new poller or query the resource to find its state.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.kind, ErrorKind::Exhausted)
    }

    /// The response could not be deserialized.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use datapipelines_gax::error::Error;
    /// let error = Error::deser("simulated problem");
    /// assert!(error.is_deserialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Deserialization, source)
    }

    /// The response body did not match the shape expected for its status.
    ///
    /// The client libraries never coerce such responses into a default value.
    ///
    /// # Troubleshooting
    ///
    /// Most commonly this is caused by a proxy or a load balancer returning a
    /// payload that is not JSON. It may also indicate a version mismatch
    /// between the service and the client library. Examine the error source
    /// for details.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// The request could not be serialized.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use datapipelines_gax::error::Error;
    /// let error = Error::ser("simulated problem");
    /// assert!(error.is_serialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Serialization, source)
    }

    /// The request body, or a header value, could not be encoded.
    ///
    /// The request was not sent.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// Cannot find a valid HTTP binding to make the request.
    ///
    /// This indicates the request is missing required parameters, or the
    /// request path still contains placeholders after substituting all the
    /// parameters.
    pub fn binding<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Binding, source)
    }

    /// The request was not sent because it could not be bound to a valid URL.
    ///
    /// # Troubleshooting
    ///
    /// Verify all the required parameters are set, e.g., the pipeline name.
    pub fn is_binding(&self) -> bool {
        matches!(self.kind, ErrorKind::Binding)
    }

    /// The operation is not supported.
    ///
    /// # Example
    /// ```
    /// use datapipelines_gax::error::Error;
    /// let error = Error::not_supported("cancel is not available for this operation");
    /// assert!(error.is_not_supported());
    /// ```
    pub fn not_supported<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::NotSupported, source)
    }

    /// The application requested something the service, or this particular
    /// operation, does not offer.
    ///
    /// For example, cancelling a long-running operation that has no cancel
    /// endpoint.
    pub fn is_not_supported(&self) -> bool {
        matches!(self.kind, ErrorKind::NotSupported)
    }

    /// A long-running operation completed with a failure.
    ///
    /// # Example
    /// ```
    /// use datapipelines_gax::error::Error;
    /// use datapipelines_gax::error::rpc::Status;
    /// let status = Status::default().set_code("Conflict").set_message("in use");
    /// let error = Error::operation_failed(Some(status.clone()));
    /// assert!(error.is_operation_failed());
    /// assert!(!error.is_operation_canceled());
    /// assert_eq!(error.status(), Some(&status));
    /// ```
    pub fn operation_failed(status: Option<Status>) -> Self {
        Self {
            kind: ErrorKind::OperationFailed(Box::new(OperationDetails {
                canceled: false,
                status,
            })),
            source: None,
        }
    }

    /// A long-running operation was canceled.
    ///
    /// # Example
    /// ```
    /// use datapipelines_gax::error::Error;
    /// let error = Error::operation_canceled(None);
    /// assert!(error.is_operation_failed());
    /// assert!(error.is_operation_canceled());
    /// ```
    pub fn operation_canceled(status: Option<Status>) -> Self {
        Self {
            kind: ErrorKind::OperationFailed(Box::new(OperationDetails {
                canceled: true,
                status,
            })),
            source: None,
        }
    }

    /// The long-running operation reached a `Failed` or `Canceled` state.
    ///
    /// The [status][Error::status] carries the error reported by the service,
    /// if the service included one in the operation status.
    pub fn is_operation_failed(&self) -> bool {
        matches!(self.kind, ErrorKind::OperationFailed(_))
    }

    /// The long-running operation reached the `Canceled` state.
    pub fn is_operation_canceled(&self) -> bool {
        matches!(&self.kind, ErrorKind::OperationFailed(d) if d.canceled)
    }

    /// The error details reported by the service, if any.
    ///
    /// This is available for errors returned by the service, and for
    /// long-running operations that failed with a service-reported error.
    ///
    /// # Troubleshooting
    ///
    /// As this information is created by the service, troubleshooting this
    /// problem typically involves reading the service documentation for the
    /// reported [code][Status::code].
    pub fn status(&self) -> Option<&Status> {
        match &self.kind {
            ErrorKind::Service(d) => Some(&d.as_ref().status),
            ErrorKind::OperationFailed(d) => d.status.as_ref(),
            _ => None,
        }
    }

    /// The HTTP status code, if any, associated with this error.
    ///
    /// # Example
    /// ```
    /// use datapipelines_gax::error::Error;
    /// let e = search_for_thing("the thing");
    /// if let Some(code) = e.http_status_code() {
    ///     if code == 404 {
    ///         println!("cannot find the thing, more details in {e}");
    ///     }
    /// }
    ///
    /// fn search_for_thing(name: &str) -> Error {
    ///     # Error::http(404, http::HeaderMap::new(), bytes::Bytes::from_static(b"NOT FOUND"))
    /// }
    /// ```
    ///
    /// Sometimes the error is generated before it reaches the service. For
    /// example, a proxy or a load balancer may generate errors without the
    /// error envelope. In such cases the client library returns the status
    /// code, headers, and http payload.
    pub fn http_status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Transport(d) => d.as_ref().status_code,
            ErrorKind::Service(d) => d.as_ref().status_code,
            _ => None,
        }
    }

    /// The headers, if any, associated with this error.
    ///
    /// Services often include a request id in the response headers, which is
    /// useful when troubleshooting problems with support teams.
    pub fn http_headers(&self) -> Option<&http::HeaderMap> {
        match &self.kind {
            ErrorKind::Transport(d) => d.as_ref().headers.as_ref(),
            ErrorKind::Service(d) => d.as_ref().headers.as_ref(),
            _ => None,
        }
    }

    /// The raw payload, if any, associated with this error.
    ///
    /// # Example
    /// ```
    /// use datapipelines_gax::error::Error;
    /// let e = search_for_thing("the thing");
    /// if let Some(payload) = e.http_payload() {
    ///    println!("the error included some extra payload {payload:?}");
    /// }
    ///
    /// fn search_for_thing(name: &str) -> Error {
    ///     # Error::http(400, http::HeaderMap::new(), bytes::Bytes::from_static(b"NOT FOUND"))
    /// }
    /// ```
    pub fn http_payload(&self) -> Option<&bytes::Bytes> {
        match &self.kind {
            ErrorKind::Transport(d) => d.payload.as_ref(),
            ErrorKind::Service(d) => d.payload.as_ref(),
            _ => None,
        }
    }

    /// Not part of the public API, subject to change without notice.
    ///
    /// Create service errors including transport metadata.
    #[doc(hidden)]
    pub fn service_with_http_metadata(
        status: Status,
        status_code: Option<u16>,
        headers: Option<http::HeaderMap>,
        payload: Option<bytes::Bytes>,
    ) -> Self {
        let details = ServiceDetails {
            status_code,
            headers,
            payload,
            status,
        };
        let kind = ErrorKind::Service(Box::new(details));
        Self { kind, source: None }
    }

    /// Not part of the public API, subject to change without notice.
    ///
    /// A problem reported by the transport layer.
    #[doc(hidden)]
    pub fn http(status_code: u16, headers: HeaderMap, payload: bytes::Bytes) -> Self {
        let details = TransportDetails {
            status_code: Some(status_code),
            headers: Some(headers),
            payload: Some(payload),
        };
        let kind = ErrorKind::Transport(Box::new(details));
        Self { kind, source: None }
    }

    /// Not part of the public API, subject to change without notice.
    ///
    /// A problem in the transport layer without a full HTTP response.
    ///
    /// Examples include: a broken connection after the request is sent, or a
    /// any HTTP error that did not include a status code or other headers.
    #[doc(hidden)]
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        let details = TransportDetails {
            status_code: None,
            headers: None,
            payload: None,
        };
        Self::with_source(ErrorKind::Transport(Box::new(details)), source)
    }

    /// A problem in the transport layer without a full HTTP response.
    ///
    /// Examples include read or write problems, and broken connections.
    ///
    /// # Troubleshooting
    ///
    /// This indicates a problem completing the request. This type of error is
    /// rare, but includes crashes and restarts on proxies and load balancers.
    pub fn is_io(&self) -> bool {
        matches!(
        &self.kind,
        ErrorKind::Transport(d) if matches!(**d, TransportDetails {
            status_code: None,
            headers: None,
            payload: None,
        }))
    }

    /// A problem in the transport layer.
    ///
    /// Examples include connection failures, errors in a proxy, load
    /// balancer, or other network element generated before the service is
    /// able to send a full response.
    pub fn is_transport(&self) -> bool {
        matches!(&self.kind, ErrorKind::Transport { .. })
    }

    fn with_source<T: Into<BoxError>>(kind: ErrorKind, source: T) -> Self {
        let source: BoxError = source.into();
        Self {
            kind,
            source: Some(SharedError::from(source)),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.source) {
            (ErrorKind::Binding, Some(e)) => {
                write!(f, "cannot find a matching binding to send the request {e}")
            }
            (ErrorKind::Serialization, Some(e)) => write!(f, "cannot serialize the request {e}"),
            (ErrorKind::Deserialization, Some(e)) => {
                write!(f, "cannot deserialize the response {e}")
            }
            (ErrorKind::Timeout, Some(e)) => {
                write!(f, "the request exceeded the request deadline {e}")
            }
            (ErrorKind::Exhausted, Some(e)) => {
                write!(f, "{e}")
            }
            (ErrorKind::NotSupported, Some(e)) => {
                write!(f, "the operation is not supported: {e}")
            }
            (ErrorKind::Transport(details), _) => details.display(self.source(), f),
            (ErrorKind::Service(d), _) => {
                write!(
                    f,
                    "the service reports an error with code {} described as: {}",
                    d.status.code, d.status.message
                )
            }
            (ErrorKind::OperationFailed(d), _) => d.display(f),
            (_, None) => unreachable!("no constructor allows this"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &dyn std::error::Error)
    }
}

/// The type of error held by an [Error] instance.
#[derive(Clone, Debug)]
enum ErrorKind {
    Binding,
    Serialization,
    Deserialization,
    Timeout,
    Exhausted,
    NotSupported,
    Transport(Box<TransportDetails>),
    Service(Box<ServiceDetails>),
    OperationFailed(Box<OperationDetails>),
}

#[derive(Clone, Debug)]
struct TransportDetails {
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
    payload: Option<bytes::Bytes>,
}

impl TransportDetails {
    fn display(
        &self,
        source: Option<&(dyn StdError + 'static)>,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match (source, &self) {
            (
                _,
                TransportDetails {
                    status_code: Some(code),
                    payload: Some(p),
                    ..
                },
            ) => {
                if let Ok(message) = std::str::from_utf8(p.as_ref()) {
                    write!(f, "the HTTP transport reports a [{code}] error: {message}")
                } else {
                    write!(f, "the HTTP transport reports a [{code}] error: {p:?}")
                }
            }
            (Some(source), _) => {
                write!(f, "the transport reports an error: {source}")
            }
            (None, _) => unreachable!("no Error constructor allows this"),
        }
    }
}

#[derive(Clone, Debug)]
struct ServiceDetails {
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
    payload: Option<bytes::Bytes>,
    status: Status,
}

#[derive(Clone, Debug)]
struct OperationDetails {
    canceled: bool,
    status: Option<Status>,
}

impl OperationDetails {
    fn display(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.canceled { "canceled" } else { "failed" };
        match &self.status {
            Some(s) => write!(
                f,
                "the long-running operation {state} with code {} described as: {}",
                s.code, s.message
            ),
            None => write!(f, "the long-running operation {state}"),
        }
    }
}
