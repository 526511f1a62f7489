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

/// Implements a [Pipelines](super::stub::Pipelines) decorator for logging and tracing.
#[derive(Clone, Debug)]
pub struct Pipelines<T>
where
    T: super::stub::Pipelines + std::fmt::Debug + Send + Sync,
{
    inner: T,
}

impl<T> Pipelines<T>
where
    T: super::stub::Pipelines + std::fmt::Debug + Send + Sync,
{
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T> super::stub::Pipelines for Pipelines<T>
where
    T: super::stub::Pipelines + std::fmt::Debug + Send + Sync,
{
    #[tracing::instrument(level = "debug", ret)]
    async fn list_pipelines(
        &self,
        req: model::ListPipelinesRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::PipelineListResponse>> {
        self.inner.list_pipelines(req, options).await
    }

    #[tracing::instrument(level = "debug", ret)]
    async fn list_pipelines_next(
        &self,
        next_link: String,
        options: RequestOptions,
    ) -> crate::Result<Response<model::PipelineListResponse>> {
        self.inner.list_pipelines_next(next_link, options).await
    }

    #[tracing::instrument(level = "debug", ret)]
    async fn create_or_update_pipeline(
        &self,
        req: model::CreateOrUpdatePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        self.inner.create_or_update_pipeline(req, options).await
    }

    #[tracing::instrument(level = "debug", ret)]
    async fn get_pipeline(
        &self,
        req: model::GetPipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Conditional<model::PipelineResource>>> {
        self.inner.get_pipeline(req, options).await
    }

    #[tracing::instrument(level = "debug", ret)]
    async fn delete_pipeline(
        &self,
        req: model::DeletePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        self.inner.delete_pipeline(req, options).await
    }

    #[tracing::instrument(level = "debug", ret)]
    async fn rename_pipeline(
        &self,
        req: model::RenamePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        self.inner.rename_pipeline(req, options).await
    }

    #[tracing::instrument(level = "debug", ret)]
    async fn create_pipeline_run(
        &self,
        req: model::CreatePipelineRunRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::CreateRunResponse>> {
        self.inner.create_pipeline_run(req, options).await
    }

    #[tracing::instrument(level = "debug", ret)]
    async fn get_operation(
        &self,
        url: String,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        self.inner.get_operation(url, options).await
    }

    fn get_polling_error_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn gax::polling_error_policy::PollingErrorPolicy> {
        self.inner.get_polling_error_policy(options)
    }

    fn get_polling_backoff_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn gax::polling_backoff_policy::PollingBackoffPolicy> {
        self.inner.get_polling_backoff_policy(options)
    }
}
