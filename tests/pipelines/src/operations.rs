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

//! Long-running operations, the service returns `202 Accepted` and the
//! client polls the `Azure-AsyncOperation` URL.

use super::*;
use datapipelines_test_utils::tracing::enable_tracing;
use datapipelines_v1::model::PipelineResource;
use gax::exponential_backoff::ExponentialBackoffBuilder;
use gax::options::RequestOptionsBuilder;
use gax::polling_error_policy::{PollingErrorPolicyExt, PropagateErrors, TransientErrors};
use httptest::{Expectation, matchers::*, responders::*};
use lro::{OperationStatus, Poller, PollingResult};
use pretty_assertions::assert_eq;

fn expect_accepted(server: &Server, method: &'static str, path: &'static str) {
    let operation = format!("{}/operations/op-1", endpoint(server));
    server.expect(
        Expectation::matching(request::method_path(method, path))
            .times(1)
            .respond_with(
                status_code(202)
                    .insert_header("azure-asyncoperation", operation.as_str())
                    .insert_header("retry-after", "0"),
            ),
    );
}

fn operation_status(status: &str) -> Value {
    json!({"id": "op-1", "status": status})
}

#[tokio::test]
async fn create_polls_until_done() -> Result<()> {
    let server = Server::run();
    expect_accepted(&server, "PUT", "/pipelines/p1");
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/operations/op-1"),
            request::query(url_decoded(contains(("api-version", API_VERSION)))),
        ])
        .times(2)
        .respond_with(cycle![
            json_encoded(operation_status("InProgress")),
            json_encoded(operation_status("Succeeded")),
        ]),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines/p1"))
            .times(1)
            .respond_with(json_encoded(pipeline_json("p1", "e2"))),
    );

    let client = new_client(&server).await?;
    let mut poller = client
        .create_or_update_pipeline()
        .set_pipeline_name("p1")
        .set_pipeline(PipelineResource::new())
        .poller();
    assert_eq!(poller.status(), OperationStatus::NotStarted);
    assert!(matches!(poller.poll().await, PollingResult::InProgress));
    assert_eq!(poller.status(), OperationStatus::InProgress);
    assert!(matches!(poller.poll().await, PollingResult::InProgress));
    let got = poller.poll().await;
    let PollingResult::Completed(Ok(pipeline)) = got else {
        panic!("expected a pipeline, got {got:?}");
    };
    assert_eq!(pipeline.etag.as_deref(), Some("e2"));
    assert_eq!(poller.status(), OperationStatus::Succeeded);
    assert!(poller.is_done());

    // Terminal states do not change, and make no more requests.
    let got = poller.poll().await;
    assert!(matches!(got, PollingResult::Completed(Ok(_))), "{got:?}");
    assert_eq!(poller.status(), OperationStatus::Succeeded);
    Ok(())
}

#[tokio::test]
async fn until_done_returns_pipeline() -> Result<()> {
    let _tracing = enable_tracing();
    let server = Server::run();
    expect_accepted(&server, "PUT", "/pipelines/p1");
    server.expect(
        Expectation::matching(request::method_path("GET", "/operations/op-1"))
            .times(3)
            .respond_with(cycle![
                json_encoded(operation_status("NotStarted")),
                json_encoded(operation_status("Running")),
                json_encoded(operation_status("Succeeded")),
            ]),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines/p1"))
            .times(1)
            .respond_with(json_encoded(pipeline_json("p1", "e2"))),
    );

    let client = new_client(&server).await?;
    let got = client
        .create_or_update_pipeline()
        .set_pipeline_name("p1")
        .poller()
        .until_done()
        .await?;
    assert_eq!(got.name.as_deref(), Some("p1"));
    Ok(())
}

#[tokio::test]
async fn operation_failed() -> Result<()> {
    let server = Server::run();
    expect_accepted(&server, "POST", "/pipelines/p1/rename");
    server.expect(
        Expectation::matching(request::method_path("GET", "/operations/op-1"))
            .times(1)
            .respond_with(json_encoded(json!({
                "status": "Failed",
                "error": {"code": "PipelineNameConflict", "message": "p2 already exists"},
            }))),
    );

    let client = new_client(&server).await?;
    let mut poller = client
        .rename_pipeline()
        .set_pipeline_name("p1")
        .set_new_name("p2")
        .poller();
    assert!(matches!(poller.poll().await, PollingResult::InProgress));
    let got = poller.poll().await;
    let PollingResult::Completed(Err(err)) = got else {
        panic!("expected an error, got {got:?}");
    };
    assert!(err.is_operation_failed(), "{err:?}");
    let status = err.status().expect("the error includes the service status");
    assert_eq!(status.code, "PipelineNameConflict");
    assert_eq!(status.message, "p2 already exists");
    assert_eq!(poller.status(), OperationStatus::Failed);

    // Failed is terminal, the poller does not query the service again.
    let got = poller.poll().await;
    assert!(matches!(got, PollingResult::Completed(Err(_))), "{got:?}");
    assert_eq!(poller.status(), OperationStatus::Failed);
    Ok(())
}

#[tokio::test]
async fn operation_canceled_by_service() -> Result<()> {
    let server = Server::run();
    expect_accepted(&server, "DELETE", "/pipelines/p1");
    server.expect(
        Expectation::matching(request::method_path("GET", "/operations/op-1"))
            .times(1)
            .respond_with(json_encoded(operation_status("Canceled"))),
    );

    let client = new_client(&server).await?;
    let err = client
        .delete_pipeline()
        .set_pipeline_name("p1")
        .poller()
        .until_done()
        .await
        .unwrap_err();
    assert!(err.is_operation_canceled(), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn cancel_not_supported() -> Result<()> {
    let server = Server::run();
    expect_accepted(&server, "DELETE", "/pipelines/p1");

    let client = new_client(&server).await?;
    let mut poller = client.delete_pipeline().set_pipeline_name("p1").poller();
    assert!(matches!(poller.poll().await, PollingResult::InProgress));
    let err = poller.cancel().await.unwrap_err();
    assert!(err.is_not_supported(), "{err:?}");
    assert_eq!(poller.status(), OperationStatus::InProgress);
    assert!(!poller.is_done());
    Ok(())
}

#[tokio::test]
async fn retry_after_overrides_backoff() -> Result<()> {
    let server = Server::run();
    let operation = format!("{}/operations/op-1", endpoint(&server));
    server.expect(
        Expectation::matching(request::method_path("DELETE", "/pipelines/p1"))
            .times(1)
            .respond_with(
                status_code(202)
                    .insert_header("azure-asyncoperation", operation.as_str())
                    .insert_header("retry-after", "0"),
            ),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/operations/op-1"))
            .times(2)
            .respond_with(cycle![
                status_code(200)
                    .insert_header("retry-after", "0")
                    .body(operation_status("Running").to_string()),
                json_encoded(operation_status("Succeeded")),
            ]),
    );

    // Without the `Retry-After` headers this would wait for minutes.
    let slow = ExponentialBackoffBuilder::new()
        .with_initial_delay(Duration::from_secs(300))
        .with_maximum_delay(Duration::from_secs(600))
        .clamp();
    let client = Pipelines::builder()
        .with_endpoint(endpoint(&server))
        .with_polling_backoff_policy(slow)
        .build()
        .await?;
    let done = client
        .delete_pipeline()
        .set_pipeline_name("p1")
        .poller()
        .until_done();
    tokio::time::timeout(Duration::from_secs(30), done).await??;
    Ok(())
}

#[tokio::test]
async fn propagate_errors_stops_polling() -> Result<()> {
    let server = Server::run();
    expect_accepted(&server, "DELETE", "/pipelines/p1");
    server.expect(
        Expectation::matching(request::method_path("GET", "/operations/op-1"))
            .times(1)
            .respond_with(status_code(503).body(error_json("ServiceUnavailable", "busy").to_string())),
    );

    let client = new_client(&server).await?;
    let err = client
        .delete_pipeline()
        .set_pipeline_name("p1")
        .with_polling_error_policy(PropagateErrors)
        .poller()
        .until_done()
        .await
        .unwrap_err();
    assert_eq!(err.http_status_code(), Some(503), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn transient_errors_continue_polling() -> Result<()> {
    let server = Server::run();
    expect_accepted(&server, "DELETE", "/pipelines/p1");
    server.expect(
        Expectation::matching(request::method_path("GET", "/operations/op-1"))
            .times(3)
            .respond_with(cycle![
                status_code(503).body(error_json("ServiceUnavailable", "busy").to_string()),
                status_code(503).body(error_json("ServiceUnavailable", "busy").to_string()),
                json_encoded(operation_status("Succeeded")),
            ]),
    );

    let client = new_client(&server).await?;
    client
        .delete_pipeline()
        .set_pipeline_name("p1")
        .with_polling_error_policy(TransientErrors.with_attempt_limit(10))
        .poller()
        .until_done()
        .await?;
    Ok(())
}

#[tokio::test]
async fn transient_errors_stop_on_permanent() -> Result<()> {
    let server = Server::run();
    expect_accepted(&server, "DELETE", "/pipelines/p1");
    server.expect(
        Expectation::matching(request::method_path("GET", "/operations/op-1"))
            .times(1)
            .respond_with(status_code(403).body(error_json("Forbidden", "no access").to_string())),
    );

    let client = new_client(&server).await?;
    let err = client
        .delete_pipeline()
        .set_pipeline_name("p1")
        .with_polling_error_policy(TransientErrors)
        .poller()
        .until_done()
        .await
        .unwrap_err();
    assert_eq!(err.http_status_code(), Some(403), "{err:?}");
    Ok(())
}
