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

use crate::model;
use bytes::Bytes;
use gax::options::RequestOptions;
use gax::response::{Conditional, Response};
use std::sync::Arc;

/// A dyn-compatible, crate-private version of [super::Pipelines].
#[async_trait::async_trait]
pub trait Pipelines: std::fmt::Debug + Send + Sync {
    async fn list_pipelines(
        &self,
        req: model::ListPipelinesRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::PipelineListResponse>>;

    async fn list_pipelines_next(
        &self,
        next_link: String,
        options: RequestOptions,
    ) -> crate::Result<Response<model::PipelineListResponse>>;

    async fn create_or_update_pipeline(
        &self,
        req: model::CreateOrUpdatePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>>;

    async fn get_pipeline(
        &self,
        req: model::GetPipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Conditional<model::PipelineResource>>>;

    async fn delete_pipeline(
        &self,
        req: model::DeletePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>>;

    async fn rename_pipeline(
        &self,
        req: model::RenamePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>>;

    async fn create_pipeline_run(
        &self,
        req: model::CreatePipelineRunRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::CreateRunResponse>>;

    async fn get_operation(
        &self,
        url: String,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>>;

    fn get_polling_error_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn gax::polling_error_policy::PollingErrorPolicy>;

    fn get_polling_backoff_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn gax::polling_backoff_policy::PollingBackoffPolicy>;
}

/// All implementations of [super::Pipelines] also implement [Pipelines].
#[async_trait::async_trait]
impl<T: super::Pipelines> Pipelines for T {
    /// Forwards the call to the implementation provided by `T`.
    async fn list_pipelines(
        &self,
        req: model::ListPipelinesRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::PipelineListResponse>> {
        T::list_pipelines(self, req, options).await
    }

    /// Forwards the call to the implementation provided by `T`.
    async fn list_pipelines_next(
        &self,
        next_link: String,
        options: RequestOptions,
    ) -> crate::Result<Response<model::PipelineListResponse>> {
        T::list_pipelines_next(self, next_link, options).await
    }

    /// Forwards the call to the implementation provided by `T`.
    async fn create_or_update_pipeline(
        &self,
        req: model::CreateOrUpdatePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        T::create_or_update_pipeline(self, req, options).await
    }

    /// Forwards the call to the implementation provided by `T`.
    async fn get_pipeline(
        &self,
        req: model::GetPipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Conditional<model::PipelineResource>>> {
        T::get_pipeline(self, req, options).await
    }

    /// Forwards the call to the implementation provided by `T`.
    async fn delete_pipeline(
        &self,
        req: model::DeletePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        T::delete_pipeline(self, req, options).await
    }

    /// Forwards the call to the implementation provided by `T`.
    async fn rename_pipeline(
        &self,
        req: model::RenamePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        T::rename_pipeline(self, req, options).await
    }

    /// Forwards the call to the implementation provided by `T`.
    async fn create_pipeline_run(
        &self,
        req: model::CreatePipelineRunRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::CreateRunResponse>> {
        T::create_pipeline_run(self, req, options).await
    }

    /// Forwards the call to the implementation provided by `T`.
    async fn get_operation(
        &self,
        url: String,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        T::get_operation(self, url, options).await
    }

    fn get_polling_error_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn gax::polling_error_policy::PollingErrorPolicy> {
        T::get_polling_error_policy(self, options)
    }

    fn get_polling_backoff_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn gax::polling_backoff_policy::PollingBackoffPolicy> {
        T::get_polling_backoff_policy(self, options)
    }
}
