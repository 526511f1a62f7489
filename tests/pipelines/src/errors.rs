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
use gax::options::RequestOptionsBuilder;
use httptest::{Expectation, matchers::*, responders::*};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn service_error() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines/p1"))
            .times(1)
            .respond_with(
                status_code(500)
                    .insert_header("content-type", "application/json")
                    .insert_header("x-ms-request-id", "req-123")
                    .body(error_json("InternalServerError", "something broke").to_string()),
            ),
    );

    let client = new_client(&server).await?;
    let err = client
        .get_pipeline()
        .set_pipeline_name("p1")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.http_status_code(), Some(500), "{err:?}");
    let status = err.status().expect("the error includes the service status");
    assert_eq!(status.code, "InternalServerError");
    assert_eq!(status.message, "something broke");
    let request_id = err
        .http_headers()
        .and_then(|h| h.get("x-ms-request-id"))
        .and_then(|v| v.to_str().ok());
    assert_eq!(request_id, Some("req-123"));
    Ok(())
}

#[tokio::test]
async fn error_without_status() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines/p1"))
            .times(1)
            .respond_with(status_code(502).body("<html>bad gateway</html>")),
    );

    let client = new_client(&server).await?;
    let err = client
        .get_pipeline()
        .set_pipeline_name("p1")
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.http_status_code(), Some(502), "{err:?}");
    assert!(err.status().is_none(), "{err:?}");
    assert_eq!(
        err.http_payload().map(|b| b.as_ref()),
        Some("<html>bad gateway</html>".as_bytes())
    );
    Ok(())
}

#[tokio::test]
async fn bad_payload() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines/p1"))
            .times(1)
            .respond_with(status_code(200).body("not json")),
    );

    let client = new_client(&server).await?;
    let err = client
        .get_pipeline()
        .set_pipeline_name("p1")
        .send()
        .await
        .unwrap_err();
    assert!(err.is_deserialization(), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn attempt_timeout() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines/p1"))
            .times(..=1)
            .respond_with(delay_and_then(
                Duration::from_secs(5),
                json_encoded(pipeline_json("p1", "e1")),
            )),
    );

    let client = new_client(&server).await?;
    let err = client
        .get_pipeline()
        .set_pipeline_name("p1")
        .with_attempt_timeout(Duration::from_millis(50))
        .send()
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "{err:?}");
    Ok(())
}

#[tokio::test]
async fn connection_refused() -> Result<()> {
    let server = Server::run();
    let endpoint = endpoint(&server);
    drop(server);

    let client = Pipelines::builder().with_endpoint(endpoint).build().await?;
    let err = client
        .get_pipeline()
        .set_pipeline_name("p1")
        .send()
        .await
        .unwrap_err();
    assert!(err.is_io() || err.is_transport(), "{err:?}");
    Ok(())
}
