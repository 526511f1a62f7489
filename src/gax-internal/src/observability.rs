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

//! Tracing spans for the HTTP requests sent by the client libraries.
//!
//! The field names follow the OpenTelemetry semantic conventions for HTTP
//! client spans, so applications exporting the `tracing` data get familiar
//! attributes. This crate does not export any telemetry itself.

use crate::options::InstrumentationClientInfo;
use gax::error::Error;
use tracing::{Span, field};

pub(crate) mod keys {
    pub const OTEL_NAME: &str = "otel.name";
    pub const OTEL_KIND: &str = "otel.kind";
    pub const OTEL_STATUS_CODE: &str = "otel.status_code";
    pub const HTTP_REQUEST_METHOD: &str = "http.request.method";
    pub const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";
    pub const URL_FULL: &str = "url.full";
    pub const URL_TEMPLATE: &str = "url.template";
    pub const SERVER_ADDRESS: &str = "server.address";
    pub const OPERATION_ID: &str = "operation.id";
    pub const ERROR_TYPE: &str = "error.type";
    pub const CLIENT_SERVICE: &str = "client.service";
    pub const CLIENT_VERSION: &str = "client.version";
    pub const CLIENT_ARTIFACT: &str = "client.artifact";
}

/// Creates the span for one HTTP request.
///
/// `operation_id` and `url_template` are `None` for requests to absolute
/// URLs returned by the service, such as the next page of a list or the
/// status of a long-running operation.
pub(crate) fn create_http_span(
    method: &http::Method,
    url: &reqwest::Url,
    operation_id: Option<&str>,
    url_template: Option<&str>,
    instrumentation: Option<&InstrumentationClientInfo>,
) -> Span {
    use keys::*;
    let otel_name = url_template.map_or_else(
        || method.to_string(),
        |template| format!("{method} {template}"),
    );
    tracing::info_span!(
        "http_request",
        { OTEL_NAME } = otel_name,
        { OTEL_KIND } = "Client",
        { HTTP_REQUEST_METHOD } = method.as_str(),
        { URL_FULL } = url.as_str(),
        { URL_TEMPLATE } = url_template,
        { SERVER_ADDRESS } = url.host_str().unwrap_or(""),
        { OPERATION_ID } = operation_id,
        { CLIENT_SERVICE } = instrumentation.map(|i| i.service_name),
        { CLIENT_VERSION } = instrumentation.map(|i| i.client_version),
        { CLIENT_ARTIFACT } = instrumentation.map(|i| i.client_artifact),
        // Recorded once the response arrives.
        { OTEL_STATUS_CODE } = "UNSET",
        { HTTP_RESPONSE_STATUS_CODE } = field::Empty,
        { ERROR_TYPE } = field::Empty,
    )
}

/// Records the outcome of a request in its span.
pub(crate) fn record_http_result<T>(span: &Span, result: &gax::Result<gax::response::Response<T>>) {
    use keys::*;
    match result {
        Ok(response) => {
            span.record(HTTP_RESPONSE_STATUS_CODE, response.status().as_u16() as i64);
        }
        Err(e) => {
            span.record(OTEL_STATUS_CODE, "ERROR");
            if let Some(code) = e.http_status_code() {
                span.record(HTTP_RESPONSE_STATUS_CODE, code as i64);
            }
            span.record(ERROR_TYPE, error_type(e));
        }
    }
}

/// Classifies an error for the `error.type` span field.
pub(crate) fn error_type(error: &Error) -> String {
    if let Some(status) = error.status().filter(|s| !s.code.is_empty()) {
        return status.code.clone();
    }
    if let Some(code) = error.http_status_code() {
        return code.to_string();
    }
    let kind = match error {
        e if e.is_timeout() => "CLIENT_TIMEOUT",
        e if e.is_io() => "CLIENT_CONNECTION_ERROR",
        e if e.is_binding() || e.is_serialization() => "CLIENT_REQUEST_ERROR",
        e if e.is_deserialization() => "CLIENT_RESPONSE_DECODE_ERROR",
        _ => "INTERNAL",
    };
    kind.to_string()
}
