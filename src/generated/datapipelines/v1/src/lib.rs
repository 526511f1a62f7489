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

//! Data Pipelines Client Libraries for Rust - Pipelines API
//!
//! This crate contains traits, types, and functions to manage the pipelines
//! of a data integration workspace.
//!
//! The main entry point is [client::Pipelines]. Create a client with
//! [Pipelines::builder()][client::Pipelines::builder], configure the workspace
//! endpoint, and use the request builders to call the service.
//!
//! # Example
//! ```no_run
//! # tokio_test::block_on(async {
//! use datapipelines_v1::client::Pipelines;
//! let client = Pipelines::builder()
//!     .with_endpoint("https://my-workspace.example.com")
//!     .build()
//!     .await?;
//! let mut items = client.list_pipelines().by_item();
//! while let Some(p) = items.next().await {
//!     println!("{:?}", p?.name);
//! }
//! # anyhow::Result::<()>::Ok(()) });
//! ```

pub use gax::Result;
pub use gax::error::Error;

/// The messages and enums that are part of this client library.
pub mod model;

pub mod builder;

pub mod client;

pub mod stub;

pub(crate) mod descriptors;

pub(crate) mod tracing;

pub(crate) mod transport;

/// The default API version for this client library.
pub const DEFAULT_API_VERSION: &str = "2020-12-01";

pub(crate) mod info {
    const NAME: &str = env!("CARGO_PKG_NAME");
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub(crate) static INSTRUMENTATION_CLIENT_INFO: gaxi::options::InstrumentationClientInfo =
        gaxi::options::InstrumentationClientInfo {
            service_name: "datapipelines",
            client_version: VERSION,
            client_artifact: NAME,
        };
}
