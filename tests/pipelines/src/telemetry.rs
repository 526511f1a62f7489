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

use super::*;
use datapipelines_test_utils::test_layer::TestLayer;
use httptest::{Expectation, matchers::*, responders::*};
use lro::Poller;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn spans_with_tracing() -> Result<()> {
    const SCOPE: &str = "spans_with_tracing";
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines/p1"))
            .times(1)
            .respond_with(json_encoded(pipeline_json("p1", "e1"))),
    );

    let _guard = TestLayer::initialize(SCOPE);
    let client = Pipelines::builder()
        .with_endpoint(endpoint(&server))
        .with_tracing()
        .build()
        .await?;
    let _ = client.get_pipeline().set_pipeline_name("p1").send().await?;

    let spans = TestLayer::capture(SCOPE);
    let names = spans.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["get_pipeline", "http_request"]);

    let http = &spans[1];
    let field = |name: &str| http.fields.get(name).map(String::as_str);
    assert_eq!(field("otel.name"), Some("GET /pipelines/{pipelineName}"));
    assert_eq!(field("http.request.method"), Some("GET"));
    assert_eq!(field("url.template"), Some("/pipelines/{pipelineName}"));
    assert_eq!(field("operation.id"), Some("Pipeline_GetPipeline"));
    assert_eq!(field("http.response.status_code"), Some("200"));
    assert_eq!(field("client.service"), Some("datapipelines"));
    assert_eq!(field("client.artifact"), Some("datapipelines-v1"));
    Ok(())
}

#[tokio::test]
async fn no_spans_by_default() -> Result<()> {
    const SCOPE: &str = "no_spans_by_default";
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines/p1"))
            .times(1)
            .respond_with(status_code(404).body(error_json("PipelineNotFound", "p1").to_string())),
    );

    let _guard = TestLayer::initialize(SCOPE);
    let client = new_client(&server).await?;
    let err = client
        .get_pipeline()
        .set_pipeline_name("p1")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.http_status_code(), Some(404), "{err:?}");

    let spans = TestLayer::capture(SCOPE);
    assert!(spans.is_empty(), "{spans:?}");
    Ok(())
}

#[tokio::test]
async fn error_spans() -> Result<()> {
    const SCOPE: &str = "error_spans";
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("DELETE", "/pipelines/p1"))
            .times(1)
            .respond_with(status_code(409).body(error_json("Conflict", "in use").to_string())),
    );

    let _guard = TestLayer::initialize(SCOPE);
    let client = Pipelines::builder()
        .with_endpoint(endpoint(&server))
        .with_tracing()
        .build()
        .await?;
    let err = client
        .delete_pipeline()
        .set_pipeline_name("p1")
        .poller()
        .until_done()
        .await
        .unwrap_err();
    assert_eq!(err.http_status_code(), Some(409), "{err:?}");

    let spans = TestLayer::capture(SCOPE);
    let http = spans
        .iter()
        .find(|s| s.name == "http_request")
        .expect("an HTTP span is captured");
    let field = |name: &str| http.fields.get(name).map(String::as_str);
    assert_eq!(field("otel.status_code"), Some("ERROR"));
    assert_eq!(field("error.type"), Some("Conflict"));
    assert_eq!(field("http.response.status_code"), Some("409"));
    Ok(())
}
