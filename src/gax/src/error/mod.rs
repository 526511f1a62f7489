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

//! Errors returned by the client libraries.
//!
//! The client libraries distinguish between errors detected while trying to
//! send a request (e.g. missing path parameters), errors in the transport
//! (e.g. cannot open a connection), errors returned by the service itself,
//! and long-running operations that complete unsuccessfully. All of them are
//! represented by [Error], which offers predicates to tell them apart.
//!
//! # Example
//! ```
//! use datapipelines_gax::error::Error;
//! fn handle_error(e: Error) {
//!     if let Some(status) = e.status() {
//!         println!("the service rejected the request: {} {}", status.code, status.message);
//!     } else if e.is_transport() {
//!         println!("cannot reach the service: {e}");
//!     }
//! }
//! ```

mod core_error;
pub use core_error::*;

/// The error envelope returned by the service.
pub mod rpc;
