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

use crate::descriptors::*;
use crate::model;
use bytes::Bytes;
use gax::options::RequestOptions;
use gax::response::{Conditional, Response};
use gaxi::arguments::Arguments;
use gaxi::http::ReqwestClient;
use std::sync::Arc;

/// Implements [Pipelines](super::stub::Pipelines) using a [ReqwestClient].
#[derive(Clone)]
pub struct Pipelines {
    inner: ReqwestClient,
}

impl std::fmt::Debug for Pipelines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        f.debug_struct("Pipelines")
            .field("inner", &self.inner)
            .finish()
    }
}

impl Pipelines {
    pub async fn new(config: gaxi::options::ClientConfig) -> gax::client_builder::Result<Self> {
        let inner = ReqwestClient::new(config, crate::DEFAULT_API_VERSION)
            .await?
            .with_instrumentation(&crate::info::INSTRUMENTATION_CLIENT_INFO);
        Ok(Self { inner })
    }
}

impl super::stub::Pipelines for Pipelines {
    async fn list_pipelines(
        &self,
        _req: model::ListPipelinesRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::PipelineListResponse>> {
        self.inner
            .execute(&LIST_PIPELINES, Arguments::new(), options)
            .await
    }

    async fn list_pipelines_next(
        &self,
        next_link: String,
        options: RequestOptions,
    ) -> crate::Result<Response<model::PipelineListResponse>> {
        self.inner
            .fetch_json(&next_link, &LIST_PIPELINES_NEXT, options)
            .await
    }

    async fn create_or_update_pipeline(
        &self,
        req: model::CreateOrUpdatePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        let args = Arguments::new()
            .set(PIPELINE_NAME, req.pipeline_name)
            .set_opt(IF_MATCH, req.if_match)
            .with_body(&req.pipeline)?;
        self.inner
            .execute_raw(&CREATE_OR_UPDATE_PIPELINE, args, options)
            .await
    }

    async fn get_pipeline(
        &self,
        req: model::GetPipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Conditional<model::PipelineResource>>> {
        let args = Arguments::new()
            .set(PIPELINE_NAME, req.pipeline_name)
            .set_opt(IF_NONE_MATCH, req.if_none_match);
        let response = self.inner.execute_raw(&GET_PIPELINE, args, options).await?;
        if response.status() == http::StatusCode::NOT_MODIFIED {
            return Ok(response.map(|_| Conditional::NotModified));
        }
        gaxi::http::decode::<model::PipelineResource>(GET_PIPELINE.responses, response)
            .map(|r| r.map(Conditional::Modified))
    }

    async fn delete_pipeline(
        &self,
        req: model::DeletePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        let args = Arguments::new().set(PIPELINE_NAME, req.pipeline_name);
        self.inner
            .execute_raw(&DELETE_PIPELINE, args, options)
            .await
    }

    async fn rename_pipeline(
        &self,
        req: model::RenamePipelineRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        let args = Arguments::new()
            .set(PIPELINE_NAME, req.pipeline_name)
            .with_body(&req.request)?;
        self.inner
            .execute_raw(&RENAME_PIPELINE, args, options)
            .await
    }

    async fn create_pipeline_run(
        &self,
        req: model::CreatePipelineRunRequest,
        options: RequestOptions,
    ) -> crate::Result<Response<model::CreateRunResponse>> {
        let args = Arguments::new()
            .set(PIPELINE_NAME, req.pipeline_name)
            .set_opt(REFERENCE_PIPELINE_RUN_ID, req.reference_pipeline_run_id)
            .set_opt(IS_RECOVERY, req.is_recovery)
            .set_opt(START_ACTIVITY_NAME, req.start_activity_name)
            .set_opt(START_FROM_FAILURE, req.start_from_failure);
        let args = match req.parameters.is_empty() {
            true => args,
            false => args.with_body(&req.parameters)?,
        };
        self.inner
            .execute(&CREATE_PIPELINE_RUN, args, options)
            .await
    }

    async fn get_operation(
        &self,
        url: String,
        options: RequestOptions,
    ) -> crate::Result<Response<Bytes>> {
        self.inner.fetch(&url, &POLLING_RESPONSES, options).await
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
