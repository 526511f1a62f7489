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

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// The error details reported by the service.
///
/// Services return this payload for any response status that the operation
/// does not declare. The payload is usually wrapped in an `error` field:
///
/// ```json
/// {"error": {"code": "PipelineNotFound", "message": "cannot find pipeline p1"}}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Status {
    /// A service-specific error code, e.g. `PipelineNotFound`.
    pub code: String,

    /// A developer-facing error message.
    pub message: String,

    /// The target of the error, typically a resource or parameter name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Nested errors with more specific information.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Status>,

    /// Additional, service-specific information.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_info: Vec<serde_json::Value>,
}

impl Status {
    /// Sets the value for [code][Status::code].
    pub fn set_code<T: Into<String>>(mut self, v: T) -> Self {
        self.code = v.into();
        self
    }

    /// Sets the value for [message][Status::message].
    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }

    /// Sets the value for [target][Status::target].
    pub fn set_target<T: Into<String>>(mut self, v: T) -> Self {
        self.target = Some(v.into());
        self
    }

    /// Sets the value for [details][Status::details].
    pub fn set_details<T, I>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = I>,
        I: Into<Status>,
    {
        self.details = v.into_iter().map(|v| v.into()).collect();
        self
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: Status,
}

impl TryFrom<&bytes::Bytes> for Status {
    type Error = Error;

    fn try_from(value: &bytes::Bytes) -> Result<Self, Self::Error> {
        Self::try_from(value.as_ref())
    }
}

impl TryFrom<&[u8]> for Status {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if let Ok(wrapper) = serde_json::from_slice::<ErrorWrapper>(value) {
            return Ok(wrapper.error);
        }
        // Some services, and some proxies, return the error without the
        // wrapper. Only accept those if they look like an error.
        let status = serde_json::from_slice::<Status>(value).map_err(Error::deser)?;
        if status.code.is_empty() && status.message.is_empty() {
            return Err(Error::deser(NotAnError));
        }
        Ok(status)
    }
}

impl TryFrom<&serde_json::Value> for Status {
    type Error = Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        let value = value.get("error").unwrap_or(value);
        let status = Status::deserialize(value).map_err(Error::deser)?;
        if status.code.is_empty() && status.message.is_empty() {
            return Err(Error::deser(NotAnError));
        }
        Ok(status)
    }
}

#[derive(thiserror::Error, Debug)]
#[error("the payload does not contain an error code or message")]
struct NotAnError;
