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

//! Declarative descriptions of service operations.
//!
//! Each service operation is described by an immutable [OperationDescriptor].
//! The client libraries declare them as `static` items, and a single generic
//! dispatcher ([crate::http::ReqwestClient::execute]) consumes them.

/// Where a parameter is placed in the HTTP request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    /// Substituted into the `{name}` placeholder of the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as a request header.
    Header,
    /// Serialized as the JSON request body.
    Body,
}

/// A parameter binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameter {
    /// The wire name of the parameter, e.g. `pipelineName` or `If-Match`.
    pub name: &'static str,
    pub location: Location,
    pub required: bool,
}

impl Parameter {
    pub const fn path(name: &'static str) -> Self {
        Self {
            name,
            location: Location::Path,
            required: true,
        }
    }

    pub const fn query(name: &'static str, required: bool) -> Self {
        Self {
            name,
            location: Location::Query,
            required,
        }
    }

    pub const fn header(name: &'static str) -> Self {
        Self {
            name,
            location: Location::Header,
            required: false,
        }
    }

    pub const fn body(required: bool) -> Self {
        Self {
            name: "body",
            location: Location::Body,
            required,
        }
    }
}

/// The shape of the payload for a successful response status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// The body is a JSON document for the operation's response type.
    Json,
    /// The body is ignored, the response is the default value for the type.
    Empty,
}

/// Maps an HTTP status code to the shape of its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponseSpec {
    pub status: u16,
    pub shape: Shape,
}

impl ResponseSpec {
    pub const fn json(status: u16) -> Self {
        Self {
            status,
            shape: Shape::Json,
        }
    }

    pub const fn empty(status: u16) -> Self {
        Self {
            status,
            shape: Shape::Empty,
        }
    }
}

/// The immutable definition of one service operation.
///
/// Any response status not listed in `responses` is an error, and its payload
/// is parsed as the default error envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// The operation id, e.g. `Pipeline_Get`.
    pub id: &'static str,
    pub method: http::Method,
    /// The path relative to the endpoint, with `{name}` placeholders.
    pub path_template: &'static str,
    pub parameters: &'static [Parameter],
    pub responses: &'static [ResponseSpec],
}

impl OperationDescriptor {
    /// Finds the declared response for `status`, if any.
    pub fn response(&self, status: u16) -> Option<&ResponseSpec> {
        find_response(self.responses, status)
    }

    pub(crate) fn parameters_in(&self, location: Location) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}

pub(crate) fn find_response(responses: &[ResponseSpec], status: u16) -> Option<&ResponseSpec> {
    responses.iter().find(|r| r.status == status)
}
