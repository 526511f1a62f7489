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
use test_case::test_case;

fn page(server: &Server, names: &[&str], skip_token: Option<&str>) -> Value {
    let value = names
        .iter()
        .map(|n| pipeline_json(n, "e1"))
        .collect::<Vec<_>>();
    match skip_token {
        Some(t) => json!({
            "value": value,
            "nextLink": format!("{}/pipelines?api-version={API_VERSION}&skipToken={t}", endpoint(server)),
        }),
        None => json!({"value": value}),
    }
}

/// Expect `count` pages with two pipelines each.
fn expect_pages(server: &Server, count: usize) {
    for i in 0..count {
        let names = [format!("p{i}-a"), format!("p{i}-b")];
        let names = names.iter().map(String::as_str).collect::<Vec<_>>();
        let next = (i + 1 < count).then(|| format!("t{}", i + 1));
        let body = page(server, &names, next.as_deref());
        let query = match i {
            0 => all_of![
                request::method_path("GET", "/pipelines"),
                request::query(url_decoded(contains(("api-version", API_VERSION)))),
                request::query(url_decoded(not(contains(key("skipToken"))))),
            ],
            n => all_of![
                request::method_path("GET", "/pipelines"),
                request::query(url_decoded(contains(("api-version", API_VERSION)))),
                request::query(url_decoded(contains(("skipToken", format!("t{n}"))))),
            ],
        };
        server.expect(
            Expectation::matching(query)
                .times(1)
                .respond_with(json_encoded(body)),
        );
    }
}

#[test_case(1)]
#[test_case(2)]
#[test_case(5)]
#[tokio::test]
async fn by_page(count: usize) -> Result<()> {
    let server = Server::run();
    expect_pages(&server, count);

    let client = new_client(&server).await?;
    let mut pages = client.list_pipelines().by_page();
    let mut got = 0;
    while let Some(page) = pages.next().await {
        let page = page?;
        assert_eq!(page.value.len(), 2, "{page:?}");
        got += 1;
    }
    assert_eq!(got, count);
    Ok(())
}

#[tokio::test]
async fn by_item() -> Result<()> {
    let server = Server::run();
    expect_pages(&server, 3);

    let client = new_client(&server).await?;
    let mut items = client.list_pipelines().by_item();
    let mut names = Vec::new();
    while let Some(item) = items.next().await {
        names.extend(item?.name);
    }
    assert_eq!(
        names,
        vec!["p0-a", "p0-b", "p1-a", "p1-b", "p2-a", "p2-b"]
    );
    Ok(())
}

#[tokio::test]
async fn empty_list() -> Result<()> {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/pipelines"))
            .times(1)
            .respond_with(json_encoded(json!({"value": [], "nextLink": ""}))),
    );

    let client = new_client(&server).await?;
    let mut items = client.list_pipelines().by_item();
    assert!(items.next().await.is_none());
    Ok(())
}

#[tokio::test]
async fn error_in_next_page() -> Result<()> {
    let server = Server::run();
    let first = page(&server, &["p1"], Some("t1"));
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/pipelines"),
            request::query(url_decoded(not(contains(key("skipToken"))))),
        ])
        .times(1)
        .respond_with(json_encoded(first)),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/pipelines"),
            request::query(url_decoded(contains(("skipToken", "t1")))),
        ])
        .times(1)
        .respond_with(
            status_code(500).body(error_json("InternalServerError", "try again").to_string()),
        ),
    );

    let client = new_client(&server).await?;
    let mut items = client.list_pipelines().by_item();
    let first = items.next().await;
    assert!(matches!(first, Some(Ok(_))), "{first:?}");
    let err = match items.next().await {
        Some(Err(e)) => e,
        r => panic!("expected an error, got {r:?}"),
    };
    assert_eq!(err.http_status_code(), Some(500), "{err:?}");
    assert!(items.next().await.is_none());
    Ok(())
}
