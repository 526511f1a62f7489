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

//! Data Pipelines client helpers.
//!
//! This crate contains the types and functions shared by the Data Pipelines
//! client libraries for Rust: the error type, response wrappers, request
//! options, the client builder, polling policies for long-running operations,
//! and the paginator for list operations.
//!
//! Applications rarely need to depend on this crate directly. The client
//! libraries re-export the types needed to use them.

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions wrapping service calls.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the clients.
pub mod error;

/// Iterate over the results of list operations, one page or one item at a time.
pub mod paginator;

pub mod client_builder;
pub mod exponential_backoff;
pub mod loop_state;
pub mod options;
pub mod polling_backoff_policy;
pub mod polling_error_policy;
pub mod response;
