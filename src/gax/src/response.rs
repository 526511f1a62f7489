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

//! Response types.
//!
//! This module contains types related to service responses. Notably it
//! contains the `Response` type itself, and [Conditional], returned by
//! requests that use `If-None-Match`.
//!
//! # Examples
//!
//! Inspecting the result of a request
//!
//! ```no_run
//! # use datapipelines_gax::Result;
//! # use datapipelines_gax::response::Response;
//! // A type representing a service resource, for example, a pipeline.
//! struct Resource {
//!   // ...
//! }
//!
//! async fn make_service_request(name: &str) -> Result<Response<Resource>> {
//!   // ...
//! # panic!()
//! }
//!
//! # tokio_test::block_on(async {
//! let response = make_service_request("my-pipeline").await?;
//! if let Some(etag) = response.headers().get("ETag") {
//!     // do something with the etag
//! }
//! let resource = response.body();
//! // do something with the resource
//! # Result::<()>::Ok(()) });
//! ```
//!
//! Creating a response for mocks
//!
//! ```
//! # use datapipelines_gax::Result;
//! # use datapipelines_gax::response::Response;
//! struct Resource {
//!   // ...
//! }
//!
//! fn make_mock_response(body: Resource) -> Result<Response<Resource>> {
//!     Ok(Response::from(body))
//! }
//! ```

/// Represents a service response.
///
/// Applications rarely need to create `Response` values directly. Most
/// requests return the body of the response, and applications only see this
/// type when they need access to the response headers or status.
#[derive(Clone, Debug)]
pub struct Response<T> {
    parts: Parts,
    body: T,
}

impl<T> Response<T> {
    /// Creates a response from the body, with a `200` status and no headers.
    pub fn from(body: T) -> Self {
        Self {
            body,
            parts: Parts::default(),
        }
    }

    /// Creates a response from the given parts.
    pub fn from_parts(parts: Parts, body: T) -> Self {
        Self { parts, body }
    }

    /// Returns the HTTP status code of the response.
    pub fn status(&self) -> http::StatusCode {
        self.parts.status
    }

    /// Returns the headers associated with this response.
    pub fn headers(&self) -> &http::HeaderMap<http::HeaderValue> {
        &self.parts.headers
    }

    /// Returns the body associated with this response.
    pub fn body(&self) -> &T {
        &self.body
    }

    /// Consumes the response returning the metadata, and body.
    pub fn into_parts(self) -> (Parts, T) {
        (self.parts, self.body)
    }

    /// Consumes the response returning only its body.
    pub fn into_body(self) -> T {
        self.body
    }

    /// Transforms the body, keeping the status and headers.
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            parts: self.parts,
            body: f(self.body),
        }
    }
}

/// Component parts of a response.
///
/// The response metadata: the status code and headers.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Parts {
    /// The HTTP status code.
    pub status: http::StatusCode,

    /// The HTTP headers or the gRPC metadata converted to HTTP headers.
    pub headers: http::HeaderMap<http::HeaderValue>,
}

impl Default for Parts {
    fn default() -> Self {
        Self {
            status: http::StatusCode::OK,
            headers: http::HeaderMap::new(),
        }
    }
}

impl Parts {
    /// Create a new instance.
    pub fn new() -> Self {
        Parts::default()
    }

    /// Set the status code.
    pub fn set_status<V>(mut self, v: V) -> Self
    where
        V: Into<http::StatusCode>,
    {
        self.status = v.into();
        self
    }

    /// Set the headers.
    pub fn set_headers<V>(mut self, v: V) -> Self
    where
        V: Into<http::HeaderMap>,
    {
        self.headers = v.into();
        self
    }
}

/// The result of a conditional request.
///
/// Requests with an `If-None-Match` precondition return
/// [NotModified][Conditional::NotModified] when the resource still matches the
/// given entity tag. The service does not send the resource in that case.
///
/// # Example
/// ```
/// # use datapipelines_gax::response::Conditional;
/// fn describe(r: Conditional<String>) -> String {
///     match r {
///         Conditional::Modified(value) => format!("new value {value}"),
///         Conditional::NotModified => "unchanged".to_string(),
///     }
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Conditional<T> {
    /// The service returned a new copy of the resource.
    Modified(T),
    /// The resource has not changed since the entity tag was obtained.
    NotModified,
}

impl<T> Conditional<T> {
    /// Returns true if the service reported `304 Not Modified`.
    pub fn is_not_modified(&self) -> bool {
        matches!(self, Self::NotModified)
    }

    /// Returns the resource, if it was modified.
    pub fn modified(self) -> Option<T> {
        match self {
            Self::Modified(v) => Some(v),
            Self::NotModified => None,
        }
    }
}
