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

use crate::builder::pipelines as builder;
use std::sync::Arc;

/// Implements a client for the Pipelines API.
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// # use datapipelines_v1::client::Pipelines;
/// let client = Pipelines::builder()
///     .with_endpoint("https://my-workspace.example.com")
///     .build()
///     .await?;
/// // use `client` to make requests to the Pipelines API.
/// # gax::client_builder::Result::<()>::Ok(()) });
/// ```
///
/// # Service Description
///
/// Manages the pipelines in a data integration workspace. Pipelines group
/// activities (copy data, run a notebook, call a web hook) into a unit of
/// work. Applications can create, update, rename, and delete pipelines, and
/// trigger new runs of a pipeline.
///
/// Creating, updating, renaming, and deleting pipelines are long-running
/// operations. The request builders for these operations return a
/// [Poller][lro::Poller] to wait for the result.
///
/// # Configuration
///
/// To configure `Pipelines` use the `with_*` methods in the type returned
/// by [builder()][Pipelines::builder]. Each workspace has its own endpoint,
/// applications must always call [with_endpoint()]. Other common
/// configuration changes include:
///
/// * [with_api_version()]: by default the client uses API version
///   `2020-12-01`.
/// * [with_polling_error_policy()] and [with_polling_backoff_policy()]:
///   control how the long-running operations are polled.
///
/// [with_endpoint()]: gax::client_builder::ClientBuilder::with_endpoint
/// [with_api_version()]: gax::client_builder::ClientBuilder::with_api_version
/// [with_polling_error_policy()]: gax::client_builder::ClientBuilder::with_polling_error_policy
/// [with_polling_backoff_policy()]: gax::client_builder::ClientBuilder::with_polling_backoff_policy
///
/// # Pooling and Cloning
///
/// `Pipelines` holds a connection pool internally, it is advised to
/// create one and reuse it.  You do not need to wrap `Pipelines` in
/// an [Rc](std::rc::Rc) or [Arc](std::sync::Arc) to reuse it, because it
/// already uses an `Arc` internally.
#[derive(Clone, Debug)]
pub struct Pipelines {
    inner: Arc<dyn super::stub::dynamic::Pipelines>,
}

impl Pipelines {
    /// Returns a builder for [Pipelines].
    ///
    /// ```
    /// # tokio_test::block_on(async {
    /// # use datapipelines_v1::client::Pipelines;
    /// let client = Pipelines::builder()
    ///     .with_endpoint("https://my-workspace.example.com")
    ///     .build()
    ///     .await?;
    /// # gax::client_builder::Result::<()>::Ok(()) });
    /// ```
    pub fn builder() -> builder::ClientBuilder {
        gax::client_builder::internal::new_builder(builder::client::Factory)
    }

    /// Creates a new client from the provided stub.
    ///
    /// The most common case for calling this function is in tests mocking the
    /// client's behavior.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: super::stub::Pipelines + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_stub_dynamic<T>(stub: T) -> Self
    where
        T: super::stub::dynamic::Pipelines + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    pub(crate) async fn new(
        config: gaxi::options::ClientConfig,
    ) -> gax::client_builder::Result<Self> {
        let inner = Self::build_inner(config).await?;
        Ok(Self { inner })
    }

    async fn build_inner(
        conf: gaxi::options::ClientConfig,
    ) -> gax::client_builder::Result<Arc<dyn super::stub::dynamic::Pipelines>> {
        if gaxi::options::tracing_enabled(&conf) {
            return Ok(Arc::new(Self::build_with_tracing(conf).await?));
        }
        Ok(Arc::new(Self::build_transport(conf).await?))
    }

    async fn build_transport(
        conf: gaxi::options::ClientConfig,
    ) -> gax::client_builder::Result<impl super::stub::Pipelines> {
        super::transport::Pipelines::new(conf).await
    }

    async fn build_with_tracing(
        conf: gaxi::options::ClientConfig,
    ) -> gax::client_builder::Result<impl super::stub::Pipelines> {
        Self::build_transport(conf)
            .await
            .map(super::tracing::Pipelines::new)
    }

    /// Lists the pipelines in the workspace.
    ///
    /// # Example
    /// ```
    /// # use datapipelines_v1::client::Pipelines;
    /// async fn sample(client: &Pipelines) -> gax::Result<()> {
    ///     let mut items = client.list_pipelines().by_item();
    ///     while let Some(pipeline) = items.next().await {
    ///         let pipeline = pipeline?;
    ///         println!("{:?}", pipeline.name);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn list_pipelines(&self) -> builder::ListPipelines {
        builder::ListPipelines::new(self.inner.clone())
    }

    /// Creates or updates a pipeline.
    ///
    /// # Long running operations
    ///
    /// This method is used to start, and/or poll a [long-running Operation].
    /// The request builder returns a [Poller][lro::Poller]. Use
    /// `poller().until_done()` to wait for the final pipeline.
    ///
    /// [long-running Operation]: lro::Poller
    ///
    /// # Example
    /// ```
    /// # use datapipelines_v1::client::Pipelines;
    /// # use datapipelines_v1::model::{Pipeline, PipelineResource};
    /// use lro::Poller;
    /// async fn sample(client: &Pipelines) -> gax::Result<()> {
    ///     let pipeline = client
    ///         .create_or_update_pipeline()
    ///         .set_pipeline_name("daily-copy")
    ///         .set_pipeline(PipelineResource::new().set_properties(Pipeline::new().set_description("copy")))
    ///         .poller()
    ///         .until_done()
    ///         .await?;
    ///     println!("{:?}", pipeline.etag);
    ///     Ok(())
    /// }
    /// ```
    pub fn create_or_update_pipeline(&self) -> builder::CreateOrUpdatePipeline {
        builder::CreateOrUpdatePipeline::new(self.inner.clone())
    }

    /// Gets a pipeline.
    ///
    /// # Example
    /// ```
    /// # use datapipelines_v1::client::Pipelines;
    /// use gax::response::Conditional;
    /// async fn sample(client: &Pipelines, etag: &str) -> gax::Result<()> {
    ///     let response = client
    ///         .get_pipeline()
    ///         .set_pipeline_name("daily-copy")
    ///         .set_if_none_match(etag)
    ///         .send()
    ///         .await?;
    ///     match response {
    ///         Conditional::Modified(p) => println!("new version {:?}", p.etag),
    ///         Conditional::NotModified => println!("unchanged"),
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn get_pipeline(&self) -> builder::GetPipeline {
        builder::GetPipeline::new(self.inner.clone())
    }

    /// Deletes a pipeline.
    ///
    /// # Long running operations
    ///
    /// The request builder returns a [Poller][lro::Poller]. The operation has
    /// no result, `poller().until_done()` returns `()` on success.
    pub fn delete_pipeline(&self) -> builder::DeletePipeline {
        builder::DeletePipeline::new(self.inner.clone())
    }

    /// Renames a pipeline.
    ///
    /// # Long running operations
    ///
    /// The request builder returns a [Poller][lro::Poller]. The operation has
    /// no result, `poller().until_done()` returns `()` on success.
    pub fn rename_pipeline(&self) -> builder::RenamePipeline {
        builder::RenamePipeline::new(self.inner.clone())
    }

    /// Creates a run of a pipeline.
    ///
    /// # Example
    /// ```
    /// # use datapipelines_v1::client::Pipelines;
    /// async fn sample(client: &Pipelines) -> gax::Result<()> {
    ///     let run = client
    ///         .create_pipeline_run()
    ///         .set_pipeline_name("daily-copy")
    ///         .set_parameters([("date", "2025-06-01")])
    ///         .send()
    ///         .await?;
    ///     println!("started run {}", run.run_id);
    ///     Ok(())
    /// }
    /// ```
    pub fn create_pipeline_run(&self) -> builder::CreatePipelineRun {
        builder::CreatePipelineRun::new(self.inner.clone())
    }
}
