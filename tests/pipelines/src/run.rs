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
use httptest::{Expectation, matchers::*, responders::*};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn create_run() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/pipelines/p1/createRun"),
            request::query(url_decoded(contains(("api-version", API_VERSION)))),
            request::query(url_decoded(contains(("referencePipelineRunId", "run-0")))),
            request::query(url_decoded(contains(("isRecovery", "true")))),
            request::query(url_decoded(contains(("startActivityName", "Copy")))),
            request::query(url_decoded(not(contains(key("startFromFailure"))))),
            request::body(json_decoded(eq(json!({"date": "2025-06-01", "retries": 3})))),
        ])
        .times(1)
        .respond_with(status_code(202).body(json!({"runId": "run-1"}).to_string())),
    );

    let client = new_client(&server).await?;
    let got = client
        .create_pipeline_run()
        .set_pipeline_name("p1")
        .set_reference_pipeline_run_id("run-0")
        .set_is_recovery(true)
        .set_start_activity_name("Copy")
        .set_parameters([("date", json!("2025-06-01")), ("retries", json!(3))])
        .send()
        .await?;
    assert_eq!(got.run_id, "run-1");
    Ok(())
}

#[tokio::test]
async fn create_run_without_parameters() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/pipelines/p1/createRun"),
            request::query(url_decoded(contains(("startFromFailure", "true")))),
            request::query(url_decoded(not(contains(key("isRecovery"))))),
            request::body(""),
        ])
        .times(1)
        .respond_with(status_code(202).body(json!({"runId": "run-2"}).to_string())),
    );

    let client = new_client(&server).await?;
    let got = client
        .create_pipeline_run()
        .set_pipeline_name("p1")
        .set_start_from_failure(true)
        .send()
        .await?;
    assert_eq!(got.run_id, "run-2");
    Ok(())
}

#[tokio::test]
async fn create_run_not_found() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/pipelines/missing/createRun"))
            .times(1)
            .respond_with(
                status_code(404)
                    .body(error_json("PipelineNotFound", "missing does not exist").to_string()),
            ),
    );

    let client = new_client(&server).await?;
    let err = client
        .create_pipeline_run()
        .set_pipeline_name("missing")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.http_status_code(), Some(404), "{err:?}");
    assert_eq!(
        err.status().map(|s| s.code.as_str()),
        Some("PipelineNotFound")
    );
    Ok(())
}
