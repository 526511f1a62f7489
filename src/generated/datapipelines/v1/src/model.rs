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

//! The messages and enums used by the Pipelines API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A pipeline, as stored by the service.
///
/// The `id`, `name`, `type`, and `etag` fields are set by the service. The
/// service ignores them in create or update requests.
///
/// # Example
/// ```
/// # use datapipelines_v1::model::{Pipeline, PipelineResource};
/// let resource = PipelineResource::new()
///     .set_properties(Pipeline::new().set_description("copy the daily logs"));
/// assert_eq!(resource.properties.description.as_deref(), Some("copy the daily logs"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PipelineResource {
    /// The fully qualified resource id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The pipeline name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The resource type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// The entity tag, changes on every update of the pipeline.
    ///
    /// Use it with `If-Match` to avoid overwriting concurrent changes, and with
    /// `If-None-Match` to avoid downloading an unchanged pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// The properties of the pipeline.
    pub properties: Pipeline,

    /// Fields returned by the service and not known to this library.
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub additional_properties: Map<String, Value>,
}

impl PipelineResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [id][PipelineResource::id].
    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = Some(v.into());
        self
    }

    /// Sets the value of [name][PipelineResource::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = Some(v.into());
        self
    }

    /// Sets the value of [r#type][PipelineResource::type].
    pub fn set_type<T: Into<String>>(mut self, v: T) -> Self {
        self.r#type = Some(v.into());
        self
    }

    /// Sets the value of [etag][PipelineResource::etag].
    pub fn set_etag<T: Into<String>>(mut self, v: T) -> Self {
        self.etag = Some(v.into());
        self
    }

    /// Sets the value of [properties][PipelineResource::properties].
    pub fn set_properties<T: Into<Pipeline>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }

    /// Sets the value of [additional_properties][PipelineResource::additional_properties].
    pub fn set_additional_properties<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.additional_properties = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}

/// The definition of a pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Pipeline {
    /// The description of the pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The activities in the pipeline.
    ///
    /// Activities are polymorphic, their schema depends on the activity
    /// `type`. This library keeps them as JSON values.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<Value>,

    /// The parameters of the pipeline, keyed by name.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub parameters: HashMap<String, ParameterSpecification>,

    /// The variables of the pipeline, keyed by name.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub variables: HashMap<String, VariableSpecification>,

    /// The maximum number of concurrent runs of the pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<i32>,

    /// Tags that can be used to describe the pipeline.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Value>,

    /// Dimensions emitted by the pipeline.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub run_dimensions: HashMap<String, Value>,

    /// The folder containing the pipeline. If not set, the pipeline appears
    /// at the root level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<PipelineFolder>,

    /// Fields returned by the service and not known to this library, e.g.,
    /// `provisioningState`.
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub additional_properties: Map<String, Value>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [description][Pipeline::description].
    pub fn set_description<T: Into<String>>(mut self, v: T) -> Self {
        self.description = Some(v.into());
        self
    }

    /// Sets the value of [activities][Pipeline::activities].
    pub fn set_activities<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.activities = v.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the value of [parameters][Pipeline::parameters].
    pub fn set_parameters<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParameterSpecification>,
    {
        self.parameters = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Sets the value of [variables][Pipeline::variables].
    pub fn set_variables<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<VariableSpecification>,
    {
        self.variables = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Sets the value of [concurrency][Pipeline::concurrency].
    pub fn set_concurrency<T: Into<i32>>(mut self, v: T) -> Self {
        self.concurrency = Some(v.into());
        self
    }

    /// Sets the value of [annotations][Pipeline::annotations].
    pub fn set_annotations<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.annotations = v.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the value of [run_dimensions][Pipeline::run_dimensions].
    pub fn set_run_dimensions<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.run_dimensions = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    /// Sets the value of [folder][Pipeline::folder].
    pub fn set_folder<T: Into<PipelineFolder>>(mut self, v: T) -> Self {
        self.folder = Some(v.into());
        self
    }

    /// Sets or clears the value of [folder][Pipeline::folder].
    pub fn set_or_clear_folder<T: Into<PipelineFolder>>(mut self, v: Option<T>) -> Self {
        self.folder = v.map(Into::into);
        self
    }
}

/// The definition of a pipeline parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ParameterSpecification {
    /// The parameter type.
    #[serde(rename = "type")]
    pub r#type: ParameterType,

    /// The default value, used when a run does not set the parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl ParameterSpecification {
    pub fn new<T: Into<ParameterType>>(v: T) -> Self {
        Self {
            r#type: v.into(),
            default_value: None,
        }
    }

    /// Sets the value of [default_value][ParameterSpecification::default_value].
    pub fn set_default_value<T: Into<Value>>(mut self, v: T) -> Self {
        self.default_value = Some(v.into());
        self
    }
}

impl From<ParameterType> for ParameterSpecification {
    fn from(value: ParameterType) -> Self {
        Self::new(value)
    }
}

/// The type of a pipeline parameter.
///
/// # Working with unknown values
///
/// The service may add new types in the future. This library represents any
/// type it does not know as [UnknownValue][ParameterType::UnknownValue],
/// preserving the string sent by the service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[non_exhaustive]
pub enum ParameterType {
    Object,
    String,
    Int,
    Float,
    Bool,
    Array,
    SecureString,
    /// A type not known to this version of the library.
    UnknownValue(std::string::String),
}

impl ParameterType {
    /// The name of the type, as used by the service.
    pub fn name(&self) -> &str {
        match self {
            Self::Object => "Object",
            Self::String => "String",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Bool => "Bool",
            Self::Array => "Array",
            Self::SecureString => "SecureString",
            Self::UnknownValue(v) => v.as_str(),
        }
    }
}

impl From<&str> for ParameterType {
    fn from(value: &str) -> Self {
        match value {
            "Object" => Self::Object,
            "String" => Self::String,
            "Int" => Self::Int,
            "Float" => Self::Float,
            "Bool" => Self::Bool,
            "Array" => Self::Array,
            "SecureString" => Self::SecureString,
            v => Self::UnknownValue(v.to_string()),
        }
    }
}

impl From<std::string::String> for ParameterType {
    fn from(value: std::string::String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ParameterType> for std::string::String {
    fn from(value: ParameterType) -> Self {
        value.name().to_string()
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The definition of a pipeline variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct VariableSpecification {
    /// The variable type.
    #[serde(rename = "type")]
    pub r#type: VariableType,

    /// The default value of the variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl VariableSpecification {
    pub fn new<T: Into<VariableType>>(v: T) -> Self {
        Self {
            r#type: v.into(),
            default_value: None,
        }
    }

    /// Sets the value of [default_value][VariableSpecification::default_value].
    pub fn set_default_value<T: Into<Value>>(mut self, v: T) -> Self {
        self.default_value = Some(v.into());
        self
    }
}

impl From<VariableType> for VariableSpecification {
    fn from(value: VariableType) -> Self {
        Self::new(value)
    }
}

/// The type of a pipeline variable.
///
/// Like [ParameterType], unknown types are preserved as
/// [UnknownValue][VariableType::UnknownValue].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[non_exhaustive]
pub enum VariableType {
    String,
    Bool,
    Array,
    /// A type not known to this version of the library.
    UnknownValue(std::string::String),
}

impl VariableType {
    /// The name of the type, as used by the service.
    pub fn name(&self) -> &str {
        match self {
            Self::String => "String",
            Self::Bool => "Bool",
            Self::Array => "Array",
            Self::UnknownValue(v) => v.as_str(),
        }
    }
}

impl From<&str> for VariableType {
    fn from(value: &str) -> Self {
        match value {
            "String" => Self::String,
            "Bool" => Self::Bool,
            "Array" => Self::Array,
            v => Self::UnknownValue(v.to_string()),
        }
    }
}

impl From<std::string::String> for VariableType {
    fn from(value: std::string::String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<VariableType> for std::string::String {
    fn from(value: VariableType) -> Self {
        value.name().to_string()
    }
}

/// The folder that contains a pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PipelineFolder {
    /// The name of the folder. Nested folders use `/` as a separator, e.g.
    /// `daily/ingest`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PipelineFolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [name][PipelineFolder::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = Some(v.into());
        self
    }
}

/// One page of pipelines.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PipelineListResponse {
    /// The pipelines in this page.
    pub value: Vec<PipelineResource>,

    /// The URL of the next page. Not set, or empty, in the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

impl PipelineListResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [value][PipelineListResponse::value].
    pub fn set_value<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<PipelineResource>,
    {
        self.value = v.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the value of [next_link][PipelineListResponse::next_link].
    pub fn set_next_link<T: Into<String>>(mut self, v: T) -> Self {
        self.next_link = Some(v.into());
        self
    }
}

impl gax::paginator::PageableResponse for PipelineListResponse {
    type PageItem = PipelineResource;

    fn items(self) -> Vec<Self::PageItem> {
        self.value
    }

    fn next_page_token(&self) -> String {
        self.next_link.clone().unwrap_or_default()
    }
}

/// The body of a rename request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ArtifactRenameRequest {
    /// The new name of the pipeline.
    pub new_name: String,
}

impl ArtifactRenameRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [new_name][ArtifactRenameRequest::new_name].
    pub fn set_new_name<T: Into<String>>(mut self, v: T) -> Self {
        self.new_name = v.into();
        self
    }
}

/// The response to a create run request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct CreateRunResponse {
    /// The identifier of the new pipeline run.
    pub run_id: String,
}

impl CreateRunResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [run_id][CreateRunResponse::run_id].
    pub fn set_run_id<T: Into<String>>(mut self, v: T) -> Self {
        self.run_id = v.into();
        self
    }
}

/// The request for [Pipelines::list_pipelines][crate::client::Pipelines::list_pipelines].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ListPipelinesRequest {}

impl ListPipelinesRequest {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The request for [Pipelines::create_or_update_pipeline][crate::client::Pipelines::create_or_update_pipeline].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct CreateOrUpdatePipelineRequest {
    /// The pipeline name.
    pub pipeline_name: String,

    /// The pipeline definition.
    pub pipeline: PipelineResource,

    /// Only update the pipeline if its entity tag matches this value. Use
    /// `*` to update any existing pipeline.
    pub if_match: Option<String>,
}

impl CreateOrUpdatePipelineRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [pipeline_name][CreateOrUpdatePipelineRequest::pipeline_name].
    pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
        self.pipeline_name = v.into();
        self
    }

    /// Sets the value of [pipeline][CreateOrUpdatePipelineRequest::pipeline].
    pub fn set_pipeline<T: Into<PipelineResource>>(mut self, v: T) -> Self {
        self.pipeline = v.into();
        self
    }

    /// Sets the value of [if_match][CreateOrUpdatePipelineRequest::if_match].
    pub fn set_if_match<T: Into<String>>(mut self, v: T) -> Self {
        self.if_match = Some(v.into());
        self
    }

    /// Sets or clears the value of [if_match][CreateOrUpdatePipelineRequest::if_match].
    pub fn set_or_clear_if_match<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.if_match = v.map(Into::into);
        self
    }
}

/// The request for [Pipelines::get_pipeline][crate::client::Pipelines::get_pipeline].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct GetPipelineRequest {
    /// The pipeline name.
    pub pipeline_name: String,

    /// Skip the download if the pipeline entity tag matches this value.
    pub if_none_match: Option<String>,
}

impl GetPipelineRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [pipeline_name][GetPipelineRequest::pipeline_name].
    pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
        self.pipeline_name = v.into();
        self
    }

    /// Sets the value of [if_none_match][GetPipelineRequest::if_none_match].
    pub fn set_if_none_match<T: Into<String>>(mut self, v: T) -> Self {
        self.if_none_match = Some(v.into());
        self
    }

    /// Sets or clears the value of [if_none_match][GetPipelineRequest::if_none_match].
    pub fn set_or_clear_if_none_match<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.if_none_match = v.map(Into::into);
        self
    }
}

/// The request for [Pipelines::delete_pipeline][crate::client::Pipelines::delete_pipeline].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct DeletePipelineRequest {
    /// The pipeline name.
    pub pipeline_name: String,
}

impl DeletePipelineRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [pipeline_name][DeletePipelineRequest::pipeline_name].
    pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
        self.pipeline_name = v.into();
        self
    }
}

/// The request for [Pipelines::rename_pipeline][crate::client::Pipelines::rename_pipeline].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct RenamePipelineRequest {
    /// The current pipeline name.
    pub pipeline_name: String,

    /// The body of the request.
    pub request: ArtifactRenameRequest,
}

impl RenamePipelineRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [pipeline_name][RenamePipelineRequest::pipeline_name].
    pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
        self.pipeline_name = v.into();
        self
    }

    /// Sets the value of [request][RenamePipelineRequest::request].
    pub fn set_request<T: Into<ArtifactRenameRequest>>(mut self, v: T) -> Self {
        self.request = v.into();
        self
    }
}

/// The request for [Pipelines::create_pipeline_run][crate::client::Pipelines::create_pipeline_run].
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct CreatePipelineRunRequest {
    /// The pipeline name.
    pub pipeline_name: String,

    /// The run id to rerun. If set, the new run is grouped under this run.
    pub reference_pipeline_run_id: Option<String>,

    /// Recovery mode. If true, the run uses the same group as the referenced
    /// run.
    pub is_recovery: Option<bool>,

    /// In recovery mode, the rerun starts from this activity.
    pub start_activity_name: Option<String>,

    /// In recovery mode, the rerun starts from the failed activities.
    pub start_from_failure: Option<bool>,

    /// The values of the pipeline parameters, keyed by parameter name. Sent as
    /// the request body.
    pub parameters: HashMap<String, Value>,
}

impl CreatePipelineRunRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [pipeline_name][CreatePipelineRunRequest::pipeline_name].
    pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
        self.pipeline_name = v.into();
        self
    }

    /// Sets the value of [reference_pipeline_run_id][CreatePipelineRunRequest::reference_pipeline_run_id].
    pub fn set_reference_pipeline_run_id<T: Into<String>>(mut self, v: T) -> Self {
        self.reference_pipeline_run_id = Some(v.into());
        self
    }

    /// Sets the value of [is_recovery][CreatePipelineRunRequest::is_recovery].
    pub fn set_is_recovery<T: Into<bool>>(mut self, v: T) -> Self {
        self.is_recovery = Some(v.into());
        self
    }

    /// Sets the value of [start_activity_name][CreatePipelineRunRequest::start_activity_name].
    pub fn set_start_activity_name<T: Into<String>>(mut self, v: T) -> Self {
        self.start_activity_name = Some(v.into());
        self
    }

    /// Sets the value of [start_from_failure][CreatePipelineRunRequest::start_from_failure].
    pub fn set_start_from_failure<T: Into<bool>>(mut self, v: T) -> Self {
        self.start_from_failure = Some(v.into());
        self
    }

    /// Sets the value of [parameters][CreatePipelineRunRequest::parameters].
    pub fn set_parameters<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.parameters = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }
}
