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

//! The operations of the Pipelines API.
//!
//! Each operation is a static description consumed by
//! [ReqwestClient::execute][gaxi::http::ReqwestClient::execute].

use gaxi::descriptor::{OperationDescriptor, Parameter, ResponseSpec};
use gaxi::http::API_VERSION;
use http::Method;

pub(crate) const PIPELINE_NAME: &str = "pipelineName";
pub(crate) const IF_MATCH: &str = "If-Match";
pub(crate) const IF_NONE_MATCH: &str = "If-None-Match";
pub(crate) const REFERENCE_PIPELINE_RUN_ID: &str = "referencePipelineRunId";
pub(crate) const IS_RECOVERY: &str = "isRecovery";
pub(crate) const START_ACTIVITY_NAME: &str = "startActivityName";
pub(crate) const START_FROM_FAILURE: &str = "startFromFailure";

pub(crate) static LIST_PIPELINES: OperationDescriptor = OperationDescriptor {
    id: "Pipeline_GetPipelinesByWorkspace",
    method: Method::GET,
    path_template: "/pipelines",
    parameters: &[Parameter::query(API_VERSION, true)],
    responses: &[ResponseSpec::json(200)],
};

/// The responses for the next page of [LIST_PIPELINES].
pub(crate) static LIST_PIPELINES_NEXT: [ResponseSpec; 1] = [ResponseSpec::json(200)];

pub(crate) static CREATE_OR_UPDATE_PIPELINE: OperationDescriptor = OperationDescriptor {
    id: "Pipeline_CreateOrUpdatePipeline",
    method: Method::PUT,
    path_template: "/pipelines/{pipelineName}",
    parameters: &[
        Parameter::path(PIPELINE_NAME),
        Parameter::query(API_VERSION, true),
        Parameter::header(IF_MATCH),
        Parameter::body(true),
    ],
    responses: &[
        ResponseSpec::json(200),
        ResponseSpec::json(201),
        ResponseSpec::empty(202),
    ],
};

pub(crate) static GET_PIPELINE: OperationDescriptor = OperationDescriptor {
    id: "Pipeline_GetPipeline",
    method: Method::GET,
    path_template: "/pipelines/{pipelineName}",
    parameters: &[
        Parameter::path(PIPELINE_NAME),
        Parameter::query(API_VERSION, true),
        Parameter::header(IF_NONE_MATCH),
    ],
    responses: &[ResponseSpec::json(200), ResponseSpec::empty(304)],
};

pub(crate) static DELETE_PIPELINE: OperationDescriptor = OperationDescriptor {
    id: "Pipeline_DeletePipeline",
    method: Method::DELETE,
    path_template: "/pipelines/{pipelineName}",
    parameters: &[
        Parameter::path(PIPELINE_NAME),
        Parameter::query(API_VERSION, true),
    ],
    responses: &[
        ResponseSpec::empty(200),
        ResponseSpec::empty(202),
        ResponseSpec::empty(204),
    ],
};

pub(crate) static RENAME_PIPELINE: OperationDescriptor = OperationDescriptor {
    id: "Pipeline_RenamePipeline",
    method: Method::POST,
    path_template: "/pipelines/{pipelineName}/rename",
    parameters: &[
        Parameter::path(PIPELINE_NAME),
        Parameter::query(API_VERSION, true),
        Parameter::body(true),
    ],
    responses: &[ResponseSpec::empty(200), ResponseSpec::empty(202)],
};

pub(crate) static CREATE_PIPELINE_RUN: OperationDescriptor = OperationDescriptor {
    id: "Pipeline_CreatePipelineRun",
    method: Method::POST,
    path_template: "/pipelines/{pipelineName}/createRun",
    parameters: &[
        Parameter::path(PIPELINE_NAME),
        Parameter::query(API_VERSION, true),
        Parameter::query(REFERENCE_PIPELINE_RUN_ID, false),
        Parameter::query(IS_RECOVERY, false),
        Parameter::query(START_ACTIVITY_NAME, false),
        Parameter::query(START_FROM_FAILURE, false),
        Parameter::body(false),
    ],
    responses: &[ResponseSpec::json(202)],
};

/// The responses accepted while polling a long-running operation.
///
/// The service returns `200` or `202` for status checks, and the final
/// resource with `200` or `201`.
pub(crate) static POLLING_RESPONSES: [ResponseSpec; 4] = [
    ResponseSpec::json(200),
    ResponseSpec::json(201),
    ResponseSpec::json(202),
    ResponseSpec::empty(204),
];
