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

//! Traits to mock the clients in this library.
//!
//! Application developers may need to mock the clients in this library to test
//! how their application works with different (and sometimes hard to trigger)
//! client and service behavior. Such test can define mocks implementing the
//! trait(s) defined in this module, initialize the client with an instance of
//! this mock in their tests, and verify their application responds as expected.

#![allow(rustdoc::broken_intra_doc_links)]

pub(crate) mod dynamic;

use crate::model;
use bytes::Bytes;
use gax::options::RequestOptions;
use gax::response::{Conditional, Response};
use std::sync::Arc;

/// Defines the trait used to implement [super::client::Pipelines].
///
/// Application developers may need to implement this trait to mock
/// `client::Pipelines`. In other use-cases, application developers only
/// use `client::Pipelines` and need not be concerned with this trait or
/// its implementations.
///
/// Services gain new operations routinely. Consequently, this trait gains new
/// methods too. To avoid breaking applications the trait provides a default
/// implementation of each method. Most of these implementations just return an
/// error.
pub trait Pipelines: std::fmt::Debug + Send + Sync {
    /// Implements [super::client::Pipelines::list_pipelines].
    fn list_pipelines(
        &self,
        _req: model::ListPipelinesRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = crate::Result<Response<model::PipelineListResponse>>> + Send {
        gaxi::unimplemented::unimplemented_stub()
    }

    /// Fetches the page at `next_link`, returned in a previous page.
    fn list_pipelines_next(
        &self,
        _next_link: String,
        _options: RequestOptions,
    ) -> impl Future<Output = crate::Result<Response<model::PipelineListResponse>>> + Send {
        gaxi::unimplemented::unimplemented_stub()
    }

    /// Implements [super::client::Pipelines::create_or_update_pipeline].
    ///
    /// Returns the initial response of the long-running operation.
    fn create_or_update_pipeline(
        &self,
        _req: model::CreateOrUpdatePipelineRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = crate::Result<Response<Bytes>>> + Send {
        gaxi::unimplemented::unimplemented_stub()
    }

    /// Implements [super::client::Pipelines::get_pipeline].
    fn get_pipeline(
        &self,
        _req: model::GetPipelineRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = crate::Result<Response<Conditional<model::PipelineResource>>>> + Send
    {
        gaxi::unimplemented::unimplemented_stub()
    }

    /// Implements [super::client::Pipelines::delete_pipeline].
    ///
    /// Returns the initial response of the long-running operation.
    fn delete_pipeline(
        &self,
        _req: model::DeletePipelineRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = crate::Result<Response<Bytes>>> + Send {
        gaxi::unimplemented::unimplemented_stub()
    }

    /// Implements [super::client::Pipelines::rename_pipeline].
    ///
    /// Returns the initial response of the long-running operation.
    fn rename_pipeline(
        &self,
        _req: model::RenamePipelineRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = crate::Result<Response<Bytes>>> + Send {
        gaxi::unimplemented::unimplemented_stub()
    }

    /// Implements [super::client::Pipelines::create_pipeline_run].
    fn create_pipeline_run(
        &self,
        _req: model::CreatePipelineRunRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = crate::Result<Response<model::CreateRunResponse>>> + Send {
        gaxi::unimplemented::unimplemented_stub()
    }

    /// Queries a long-running operation.
    ///
    /// The `url` is either a status monitor URL returned by the service, or
    /// the path of the resource targeted by the operation.
    fn get_operation(
        &self,
        _url: String,
        _options: RequestOptions,
    ) -> impl Future<Output = crate::Result<Response<Bytes>>> + Send {
        gaxi::unimplemented::unimplemented_stub()
    }

    /// Returns the polling error policy.
    ///
    /// When mocking, this method is typically irrelevant. Do not try to verify
    /// it is called by your mocks.
    fn get_polling_error_policy(
        &self,
        _options: &RequestOptions,
    ) -> Arc<dyn gax::polling_error_policy::PollingErrorPolicy> {
        Arc::new(gax::polling_error_policy::PropagateErrors)
    }

    /// Returns the polling backoff policy.
    ///
    /// When mocking, this method is typically irrelevant. Do not try to verify
    /// it is called by your mocks.
    fn get_polling_backoff_policy(
        &self,
        _options: &RequestOptions,
    ) -> Arc<dyn gax::polling_backoff_policy::PollingBackoffPolicy> {
        Arc::new(gax::exponential_backoff::ExponentialBackoff::default())
    }
}
