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
use datapipelines_v1::model::{Pipeline, PipelineResource};
use gax::response::Conditional;
use httptest::{Expectation, matchers::*, responders::*};
use lro::Poller;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case("p1", "/pipelines/p1")]
#[test_case("daily copy", "/pipelines/daily%20copy")]
#[test_case("a/b", "/pipelines/a%2Fb")]
#[test_case("{name}", "/pipelines/%7Bname%7D")]
#[tokio::test]
async fn get_expands_path(name: &str, path: &'static str) -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", path),
            request::query(url_decoded(contains(("api-version", API_VERSION)))),
        ])
        .times(1)
        .respond_with(json_encoded(pipeline_json(name, "e1"))),
    );

    let client = new_client(&server).await?;
    let got = client.get_pipeline().set_pipeline_name(name).send().await?;
    let Conditional::Modified(got) = got else {
        panic!("expected a pipeline, got {got:?}");
    };
    assert_eq!(got.name.as_deref(), Some(name));
    assert_eq!(got.etag.as_deref(), Some("e1"));
    assert_eq!(got.properties.activities.len(), 1);
    assert!(got.properties.parameters.contains_key("date"), "{got:?}");
    Ok(())
}

#[tokio::test]
async fn get_not_modified() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/pipelines/p1"),
            request::headers(contains(("if-none-match", "e1"))),
        ])
        .times(1)
        .respond_with(status_code(304)),
    );

    let client = new_client(&server).await?;
    let got = client
        .get_pipeline()
        .set_pipeline_name("p1")
        .set_if_none_match("e1")
        .send()
        .await?;
    assert!(got.is_not_modified(), "{got:?}");
    Ok(())
}

#[tokio::test]
async fn get_missing_name() -> Result<()> {
    let server = Server::run();
    let client = new_client(&server).await?;
    let err = client.get_pipeline().send().await.unwrap_err();
    assert!(err.is_binding(), "{err:?}");
    Ok(())
}

#[test_case(200)]
#[test_case(201)]
#[tokio::test]
async fn create_completes_immediately(code: u16) -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("PUT", "/pipelines/p1"),
            request::query(url_decoded(contains(("api-version", API_VERSION)))),
            request::headers(contains(("if-match", "*"))),
            request::body(json_decoded(eq(json!({
                "properties": {"description": "the p1 pipeline"}
            })))),
        ])
        .times(1)
        .respond_with(status_code(code).body(pipeline_json("p1", "e2").to_string())),
    );

    let client = new_client(&server).await?;
    let got = client
        .create_or_update_pipeline()
        .set_pipeline_name("p1")
        .set_if_match("*")
        .set_pipeline(
            PipelineResource::new().set_properties(Pipeline::new().set_description("the p1 pipeline")),
        )
        .poller()
        .until_done()
        .await?;
    assert_eq!(got.name.as_deref(), Some("p1"));
    assert_eq!(got.etag.as_deref(), Some("e2"));
    Ok(())
}

#[tokio::test]
async fn create_fails_precondition() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("PUT", "/pipelines/p1"))
            .times(1)
            .respond_with(
                status_code(412)
                    .body(error_json("PreconditionFailed", "the etag does not match").to_string()),
            ),
    );

    let client = new_client(&server).await?;
    let mut poller = client
        .create_or_update_pipeline()
        .set_pipeline_name("p1")
        .set_if_match("stale")
        .poller();
    let got = poller.poll().await;
    let lro::PollingResult::Completed(Err(err)) = got else {
        panic!("expected an error, got {got:?}");
    };
    assert_eq!(err.http_status_code(), Some(412), "{err:?}");
    assert_eq!(
        err.status().map(|s| s.code.as_str()),
        Some("PreconditionFailed")
    );
    assert_eq!(poller.status(), lro::OperationStatus::Failed);
    Ok(())
}

#[test_case(200)]
#[test_case(204)]
#[tokio::test]
async fn delete_completes_immediately(code: u16) -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("DELETE", "/pipelines/p1"),
            request::query(url_decoded(contains(("api-version", API_VERSION)))),
        ])
        .times(1)
        .respond_with(status_code(code)),
    );

    let client = new_client(&server).await?;
    client
        .delete_pipeline()
        .set_pipeline_name("p1")
        .poller()
        .until_done()
        .await?;
    Ok(())
}

#[tokio::test]
async fn delete_polls_until_gone() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("DELETE", "/pipelines/p1"))
            .times(1)
            .respond_with(status_code(202)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines/p1"))
            .times(2)
            .respond_with(cycle![
                status_code(202),
                status_code(404).body(error_json("PipelineNotFound", "gone").to_string()),
            ]),
    );

    let client = new_client(&server).await?;
    let mut poller = client.delete_pipeline().set_pipeline_name("p1").poller();
    assert!(matches!(poller.poll().await, lro::PollingResult::InProgress));
    assert_eq!(poller.status(), lro::OperationStatus::InProgress);
    let got = poller.until_done().await;
    assert!(matches!(got, Ok(())), "{got:?}");
    Ok(())
}

#[tokio::test]
async fn rename() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/pipelines/p1/rename"),
            request::query(url_decoded(contains(("api-version", API_VERSION)))),
            request::body(json_decoded(eq(json!({"newName": "p2"})))),
        ])
        .times(1)
        .respond_with(status_code(200)),
    );

    let client = new_client(&server).await?;
    client
        .rename_pipeline()
        .set_pipeline_name("p1")
        .set_new_name("p2")
        .poller()
        .until_done()
        .await?;
    Ok(())
}
