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

//! Run the data pipelines client against a local HTTP server.
//!
//! These tests use [httptest] to verify the requests sent by the client,
//! and to return canned responses.

use datapipelines_v1::client::Pipelines;
use gax::exponential_backoff::ExponentialBackoffBuilder;
use httptest::Server;
use serde_json::{Value, json};
use std::time::Duration;

#[cfg(test)]
mod crud;
#[cfg(test)]
mod errors;
#[cfg(test)]
mod list;
#[cfg(test)]
mod operations;
#[cfg(test)]
mod run;
#[cfg(test)]
mod telemetry;

pub type Result<T> = anyhow::Result<T>;

/// The api-version sent by default.
pub const API_VERSION: &str = datapipelines_v1::DEFAULT_API_VERSION;

/// Creates a client configured to use `server`.
///
/// The client polls long-running operations with very short delays, so
/// tests do not wait.
pub async fn new_client(server: &Server) -> Result<Pipelines> {
    let client = Pipelines::builder()
        .with_endpoint(endpoint(server))
        .with_polling_backoff_policy(fast_backoff())
        .build()
        .await?;
    Ok(client)
}

/// The endpoint for `server`.
pub fn endpoint(server: &Server) -> String {
    format!("http://{}", server.addr())
}

pub fn fast_backoff() -> gax::exponential_backoff::ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_initial_delay(Duration::from_millis(1))
        .with_maximum_delay(Duration::from_millis(10))
        .clamp()
}

/// The representation of a pipeline returned by the service.
pub fn pipeline_json(name: &str, etag: &str) -> Value {
    json!({
        "id": format!("/workspaces/ws/pipelines/{name}"),
        "name": name,
        "type": "Microsoft.Synapse/workspaces/pipelines",
        "etag": etag,
        "properties": {
            "description": format!("the {name} pipeline"),
            "activities": [{"name": "Wait1", "type": "Wait", "typeProperties": {"waitTimeInSeconds": 1}}],
            "parameters": {"date": {"type": "String"}},
        }
    })
}

/// The representation of a service error.
pub fn error_json(code: &str, message: &str) -> Value {
    json!({"error": {"code": code, "message": message}})
}
