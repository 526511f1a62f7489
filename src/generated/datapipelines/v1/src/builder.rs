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

/// Request builders for [Pipelines][crate::client::Pipelines].
pub mod pipelines {
    use crate::descriptors::{GET_PIPELINE, PIPELINE_NAME};
    use crate::model;
    use gax::error::Error;
    use gax::options::RequestOptions;
    use gax::paginator::{ItemPaginator, Paginator};
    use gax::response::{Conditional, Response};
    use gaxi::arguments::Arguments;
    use lro::internal::{FinalState, Target};
    use std::sync::Arc;

    /// A builder for [Pipelines][crate::client::Pipelines].
    ///
    /// ```
    /// # tokio_test::block_on(async {
    /// # use datapipelines_v1::*;
    /// # use builder::pipelines::ClientBuilder;
    /// # use client::Pipelines;
    /// let builder: ClientBuilder = Pipelines::builder();
    /// let client = builder
    ///     .with_endpoint("https://my-workspace.example.com")
    ///     .build().await?;
    /// # gax::client_builder::Result::<()>::Ok(()) });
    /// ```
    pub type ClientBuilder = gax::client_builder::ClientBuilder<client::Factory>;

    pub(crate) mod client {
        use super::super::super::client::Pipelines;
        pub struct Factory;
        impl gax::client_builder::internal::ClientFactory for Factory {
            type Client = Pipelines;
            async fn build(
                self,
                config: gaxi::options::ClientConfig,
            ) -> gax::client_builder::Result<Self::Client> {
                Self::Client::new(config).await
            }
        }
    }

    /// Common implementation for [crate::client::Pipelines] request builders.
    #[derive(Clone, Debug)]
    pub(crate) struct RequestBuilder<R: std::default::Default> {
        stub: Arc<dyn super::super::stub::dynamic::Pipelines>,
        request: R,
        options: RequestOptions,
    }

    impl<R> RequestBuilder<R>
    where
        R: std::default::Default,
    {
        pub(crate) fn new(stub: Arc<dyn super::super::stub::dynamic::Pipelines>) -> Self {
            Self {
                stub,
                request: R::default(),
                options: RequestOptions::default(),
            }
        }
    }

    // The path of a pipeline, relative to the endpoint. The long-running
    // operations poll this path when the service does not return a status
    // monitor. If the name is invalid the initial request fails with the same
    // error, and the poller never queries this path.
    fn pipeline_path(name: &str) -> String {
        gaxi::path_parameter::expand(
            GET_PIPELINE.path_template,
            &Arguments::new().set(PIPELINE_NAME, name),
        )
        .unwrap_or_default()
    }

    /// The request builder for [Pipelines::list_pipelines][crate::client::Pipelines::list_pipelines] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use datapipelines_v1::builder;
    /// use builder::pipelines::ListPipelines;
    /// # tokio_test::block_on(async {
    ///
    /// let builder = prepare_request_builder();
    /// let mut items = builder.by_item();
    /// while let Some(result) = items.next().await {
    ///   let item = result?;
    /// }
    /// # gax::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> ListPipelines {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct ListPipelines(RequestBuilder<model::ListPipelinesRequest>);

    impl ListPipelines {
        pub(crate) fn new(stub: Arc<dyn super::super::stub::dynamic::Pipelines>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::ListPipelinesRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request, returning the first page.
        pub async fn send(self) -> crate::Result<model::PipelineListResponse> {
            (*self.0.stub)
                .list_pipelines(self.0.request, self.0.options)
                .await
                .map(Response::into_body)
        }

        /// Streams each page in the collection.
        ///
        /// The first page comes from the list request. Each following page is
        /// fetched from the `nextLink` of the previous page.
        pub fn by_page(self) -> Paginator<model::PipelineListResponse, Error> {
            let stub = self.0.stub.clone();
            let options = self.0.options.clone();
            let next = move |next_link: String| {
                let stub = stub.clone();
                let options = options.clone();
                async move {
                    tracing::debug!(next_link, "fetching the next page of pipelines");
                    stub.list_pipelines_next(next_link, options)
                        .await
                        .map(Response::into_body)
                }
            };
            Paginator::new(self.send(), next)
        }

        /// Streams each item in the collection.
        pub fn by_item(self) -> ItemPaginator<model::PipelineListResponse, Error> {
            self.by_page().items()
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for ListPipelines {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Pipelines::create_or_update_pipeline][crate::client::Pipelines::create_or_update_pipeline] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use datapipelines_v1::builder;
    /// use builder::pipelines::CreateOrUpdatePipeline;
    /// # tokio_test::block_on(async {
    /// use lro::Poller;
    ///
    /// let builder = prepare_request_builder();
    /// let response = builder.poller().until_done().await?;
    /// # gax::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> CreateOrUpdatePipeline {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct CreateOrUpdatePipeline(RequestBuilder<model::CreateOrUpdatePipelineRequest>);

    impl CreateOrUpdatePipeline {
        pub(crate) fn new(stub: Arc<dyn super::super::stub::dynamic::Pipelines>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::CreateOrUpdatePipelineRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Creates a [Poller][lro::Poller] to work with `create_or_update_pipeline`.
        ///
        /// The poller sends the request on the first call to `poll()` or
        /// `until_done()`. The final value is the pipeline, as stored by the
        /// service.
        pub fn poller(self) -> impl lro::Poller<model::PipelineResource> {
            let stub = self.0.stub.clone();
            let options = self.0.options.clone();
            let error_policy = stub.get_polling_error_policy(&options);
            let backoff_policy = stub.get_polling_backoff_policy(&options);
            let target = Target {
                resource_url: pipeline_path(&self.0.request.pipeline_name),
                final_state: FinalState::OriginalUri,
            };
            let start = move || async move {
                (*self.0.stub)
                    .create_or_update_pipeline(self.0.request, self.0.options)
                    .await
            };
            let query = move |url: String| {
                let stub = stub.clone();
                let options = options.clone();
                async move { stub.get_operation(url, options).await }
            };
            lro::internal::new_poller(error_policy, backoff_policy, start, query, target, None)
        }

        /// Sets the value of [pipeline_name][model::CreateOrUpdatePipelineRequest::pipeline_name].
        ///
        /// This is a **required** field for requests.
        pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.pipeline_name = v.into();
            self
        }

        /// Sets the value of [pipeline][model::CreateOrUpdatePipelineRequest::pipeline].
        ///
        /// This is a **required** field for requests.
        pub fn set_pipeline<T: Into<model::PipelineResource>>(mut self, v: T) -> Self {
            self.0.request.pipeline = v.into();
            self
        }

        /// Sets the value of [if_match][model::CreateOrUpdatePipelineRequest::if_match].
        pub fn set_if_match<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.if_match = Some(v.into());
            self
        }

        /// Sets or clears the value of [if_match][model::CreateOrUpdatePipelineRequest::if_match].
        pub fn set_or_clear_if_match<T: Into<String>>(mut self, v: Option<T>) -> Self {
            self.0.request.if_match = v.map(Into::into);
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for CreateOrUpdatePipeline {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Pipelines::get_pipeline][crate::client::Pipelines::get_pipeline] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use datapipelines_v1::builder;
    /// use builder::pipelines::GetPipeline;
    /// # tokio_test::block_on(async {
    ///
    /// let builder = prepare_request_builder();
    /// let response = builder.send().await?;
    /// # gax::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> GetPipeline {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct GetPipeline(RequestBuilder<model::GetPipelineRequest>);

    impl GetPipeline {
        pub(crate) fn new(stub: Arc<dyn super::super::stub::dynamic::Pipelines>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::GetPipelineRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        ///
        /// Returns [NotModified][Conditional::NotModified] if the request
        /// included an `If-None-Match` value matching the current pipeline.
        pub async fn send(self) -> crate::Result<Conditional<model::PipelineResource>> {
            (*self.0.stub)
                .get_pipeline(self.0.request, self.0.options)
                .await
                .map(Response::into_body)
        }

        /// Sets the value of [pipeline_name][model::GetPipelineRequest::pipeline_name].
        ///
        /// This is a **required** field for requests.
        pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.pipeline_name = v.into();
            self
        }

        /// Sets the value of [if_none_match][model::GetPipelineRequest::if_none_match].
        pub fn set_if_none_match<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.if_none_match = Some(v.into());
            self
        }

        /// Sets or clears the value of [if_none_match][model::GetPipelineRequest::if_none_match].
        pub fn set_or_clear_if_none_match<T: Into<String>>(mut self, v: Option<T>) -> Self {
            self.0.request.if_none_match = v.map(Into::into);
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for GetPipeline {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Pipelines::delete_pipeline][crate::client::Pipelines::delete_pipeline] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use datapipelines_v1::builder;
    /// use builder::pipelines::DeletePipeline;
    /// # tokio_test::block_on(async {
    /// use lro::Poller;
    ///
    /// let builder = prepare_request_builder();
    /// builder.poller().until_done().await?;
    /// # gax::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> DeletePipeline {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct DeletePipeline(RequestBuilder<model::DeletePipelineRequest>);

    impl DeletePipeline {
        pub(crate) fn new(stub: Arc<dyn super::super::stub::dynamic::Pipelines>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::DeletePipelineRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Creates a [Poller][lro::Poller] to work with `delete_pipeline`.
        pub fn poller(self) -> impl lro::Poller<()> {
            let stub = self.0.stub.clone();
            let options = self.0.options.clone();
            let error_policy = stub.get_polling_error_policy(&options);
            let backoff_policy = stub.get_polling_backoff_policy(&options);
            let target = Target {
                resource_url: pipeline_path(&self.0.request.pipeline_name),
                final_state: FinalState::None,
            };
            let start = move || async move {
                (*self.0.stub)
                    .delete_pipeline(self.0.request, self.0.options)
                    .await
            };
            let query = move |url: String| {
                let stub = stub.clone();
                let options = options.clone();
                async move { stub.get_operation(url, options).await }
            };
            lro::internal::new_poller(error_policy, backoff_policy, start, query, target, None)
        }

        /// Sets the value of [pipeline_name][model::DeletePipelineRequest::pipeline_name].
        ///
        /// This is a **required** field for requests.
        pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.pipeline_name = v.into();
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for DeletePipeline {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Pipelines::rename_pipeline][crate::client::Pipelines::rename_pipeline] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use datapipelines_v1::builder;
    /// use builder::pipelines::RenamePipeline;
    /// # tokio_test::block_on(async {
    /// use lro::Poller;
    ///
    /// let builder = prepare_request_builder();
    /// builder.poller().until_done().await?;
    /// # gax::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> RenamePipeline {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct RenamePipeline(RequestBuilder<model::RenamePipelineRequest>);

    impl RenamePipeline {
        pub(crate) fn new(stub: Arc<dyn super::super::stub::dynamic::Pipelines>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::RenamePipelineRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Creates a [Poller][lro::Poller] to work with `rename_pipeline`.
        pub fn poller(self) -> impl lro::Poller<()> {
            let stub = self.0.stub.clone();
            let options = self.0.options.clone();
            let error_policy = stub.get_polling_error_policy(&options);
            let backoff_policy = stub.get_polling_backoff_policy(&options);
            let target = Target {
                resource_url: pipeline_path(&self.0.request.pipeline_name),
                final_state: FinalState::None,
            };
            let start = move || async move {
                (*self.0.stub)
                    .rename_pipeline(self.0.request, self.0.options)
                    .await
            };
            let query = move |url: String| {
                let stub = stub.clone();
                let options = options.clone();
                async move { stub.get_operation(url, options).await }
            };
            lro::internal::new_poller(error_policy, backoff_policy, start, query, target, None)
        }

        /// Sets the value of [pipeline_name][model::RenamePipelineRequest::pipeline_name].
        ///
        /// This is a **required** field for requests.
        pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.pipeline_name = v.into();
            self
        }

        /// Sets the value of [request][model::RenamePipelineRequest::request].
        pub fn set_request<T: Into<model::ArtifactRenameRequest>>(mut self, v: T) -> Self {
            self.0.request.request = v.into();
            self
        }

        /// Sets the new name of the pipeline.
        ///
        /// This is a **required** field for requests.
        pub fn set_new_name<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.request.new_name = v.into();
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for RenamePipeline {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }

    /// The request builder for [Pipelines::create_pipeline_run][crate::client::Pipelines::create_pipeline_run] calls.
    ///
    /// # Example
    /// ```no_run
    /// # use datapipelines_v1::builder;
    /// use builder::pipelines::CreatePipelineRun;
    /// # tokio_test::block_on(async {
    ///
    /// let builder = prepare_request_builder();
    /// let response = builder.send().await?;
    /// println!("started run {}", response.run_id);
    /// # gax::Result::<()>::Ok(()) });
    ///
    /// fn prepare_request_builder() -> CreatePipelineRun {
    ///   # panic!();
    ///   // ... details omitted ...
    /// }
    /// ```
    #[derive(Clone, Debug)]
    pub struct CreatePipelineRun(RequestBuilder<model::CreatePipelineRunRequest>);

    impl CreatePipelineRun {
        pub(crate) fn new(stub: Arc<dyn super::super::stub::dynamic::Pipelines>) -> Self {
            Self(RequestBuilder::new(stub))
        }

        /// Sets the full request, replacing any prior values.
        pub fn with_request<V: Into<model::CreatePipelineRunRequest>>(mut self, v: V) -> Self {
            self.0.request = v.into();
            self
        }

        /// Sets all the options, replacing any prior values.
        pub fn with_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
            self.0.options = v.into();
            self
        }

        /// Sends the request.
        ///
        /// The service starts the run asynchronously. This call returns as
        /// soon as the run is accepted, it does not wait for the run to finish.
        pub async fn send(self) -> crate::Result<model::CreateRunResponse> {
            (*self.0.stub)
                .create_pipeline_run(self.0.request, self.0.options)
                .await
                .map(Response::into_body)
        }

        /// Sets the value of [pipeline_name][model::CreatePipelineRunRequest::pipeline_name].
        ///
        /// This is a **required** field for requests.
        pub fn set_pipeline_name<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.pipeline_name = v.into();
            self
        }

        /// Sets the value of [reference_pipeline_run_id][model::CreatePipelineRunRequest::reference_pipeline_run_id].
        pub fn set_reference_pipeline_run_id<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.reference_pipeline_run_id = Some(v.into());
            self
        }

        /// Sets the value of [is_recovery][model::CreatePipelineRunRequest::is_recovery].
        pub fn set_is_recovery<T: Into<bool>>(mut self, v: T) -> Self {
            self.0.request.is_recovery = Some(v.into());
            self
        }

        /// Sets the value of [start_activity_name][model::CreatePipelineRunRequest::start_activity_name].
        pub fn set_start_activity_name<T: Into<String>>(mut self, v: T) -> Self {
            self.0.request.start_activity_name = Some(v.into());
            self
        }

        /// Sets the value of [start_from_failure][model::CreatePipelineRunRequest::start_from_failure].
        pub fn set_start_from_failure<T: Into<bool>>(mut self, v: T) -> Self {
            self.0.request.start_from_failure = Some(v.into());
            self
        }

        /// Sets the value of [parameters][model::CreatePipelineRunRequest::parameters].
        pub fn set_parameters<T, K, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<serde_json::Value>,
        {
            self.0.request.parameters = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
            self
        }
    }

    #[doc(hidden)]
    impl gax::options::internal::RequestBuilder for CreatePipelineRun {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.0.options
        }
    }
}
