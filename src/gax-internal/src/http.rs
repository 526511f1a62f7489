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

//! The HTTP dispatcher used by the client libraries.
//!
//! [ReqwestClient] turns an [OperationDescriptor] and its [Arguments] into a
//! single HTTP request, sends it, and maps the response status to either a
//! typed response or an error. It also fetches absolute URLs returned by the
//! service, such as the next page of a list or the status of a long-running
//! operation.

use crate::arguments::Arguments;
use crate::descriptor::{Location, OperationDescriptor, ResponseSpec, Shape, find_response};
use crate::observability::{create_http_span, record_http_result};
use crate::options::{ClientConfig, InstrumentationClientInfo};
use crate::path_parameter;
use crate::query_parameter;
use bytes::Bytes;
use gax::Result;
use gax::client_builder::Error as BuilderError;
use gax::error::Error;
use gax::exponential_backoff::ExponentialBackoff;
use gax::options::RequestOptions;
use gax::polling_backoff_policy::PollingBackoffPolicy;
use gax::polling_error_policy::{PollingErrorPolicy, PropagateErrors};
use gax::response::{Parts, Response};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, Span};

/// The name of the query parameter carrying the API version.
pub const API_VERSION: &str = "api-version";

#[derive(Clone, Debug)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    endpoint: String,
    api_version: String,
    user_agent: Option<String>,
    attempt_timeout: Option<std::time::Duration>,
    polling_error_policy: Option<Arc<dyn PollingErrorPolicy>>,
    polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
    tracing: bool,
    instrumentation: Option<&'static InstrumentationClientInfo>,
}

impl ReqwestClient {
    /// Creates a new client.
    ///
    /// The configuration must include an endpoint, the service has no default.
    /// If the configuration does not set an API version the client uses
    /// `default_api_version`.
    pub async fn new(
        config: ClientConfig,
        default_api_version: &str,
    ) -> gax::client_builder::Result<Self> {
        let tracing = crate::options::tracing_enabled(&config);
        let endpoint = config
            .endpoint
            .ok_or_else(|| BuilderError::endpoint("the client requires an endpoint"))?;
        let url = reqwest::Url::parse(&endpoint).map_err(BuilderError::endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BuilderError::endpoint(format!(
                "unsupported scheme in endpoint {endpoint}"
            )));
        }
        let inner = reqwest::Client::builder()
            .build()
            .map_err(BuilderError::transport)?;
        Ok(Self {
            inner,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_version: config
                .api_version
                .unwrap_or_else(|| default_api_version.to_string()),
            user_agent: config.user_agent,
            attempt_timeout: config.attempt_timeout,
            polling_error_policy: config.polling_error_policy,
            polling_backoff_policy: config.polling_backoff_policy,
            tracing,
            instrumentation: None,
        })
    }

    /// Records the client library information in the request spans.
    pub fn with_instrumentation(mut self, instrumentation: &'static InstrumentationClientInfo) -> Self {
        self.instrumentation = Some(instrumentation);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Sends the request for `descriptor` and decodes the response.
    pub async fn execute<O>(
        &self,
        descriptor: &'static OperationDescriptor,
        args: Arguments,
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned + Default,
    {
        let response = self.execute_raw(descriptor, args, options).await?;
        decode(descriptor.responses, response)
    }

    /// Sends the request for `descriptor` without decoding the response.
    ///
    /// The status of the response is one of the statuses declared by the
    /// descriptor, any other status is returned as an error.
    pub async fn execute_raw(
        &self,
        descriptor: &'static OperationDescriptor,
        mut args: Arguments,
        options: RequestOptions,
    ) -> Result<Response<Bytes>> {
        let path = path_parameter::expand(descriptor.path_template, &args)?;
        let mut builder = self
            .inner
            .request(descriptor.method.clone(), format!("{}{path}", self.endpoint));

        let mut query = Vec::new();
        for p in descriptor.parameters_in(Location::Query) {
            match self.query_value(p.name, &args) {
                Some(v) => query_parameter::flatten(&mut query, p.name, &v),
                None if p.required => return Err(path_parameter::missing(p.name)),
                None => {}
            }
        }
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        for p in descriptor.parameters_in(Location::Header) {
            match args.get(p.name) {
                Some(v) => builder = builder.header(p.name, header_value(v)?),
                None if p.required => return Err(path_parameter::missing(p.name)),
                None => {}
            }
        }

        if let Some(p) = descriptor.parameters_in(Location::Body).next() {
            match args.take_body() {
                Some(body) => builder = builder.json(&body),
                None if p.required => return Err(path_parameter::missing(p.name)),
                None => {}
            }
        }

        let options = gax::options::internal::set_path_template(options, descriptor.path_template);
        self.send(builder, descriptor.responses, Some(descriptor.id), &options)
            .await
    }

    /// Sends a `GET` request to a URL returned by the service.
    ///
    /// Relative URLs are resolved against the client endpoint, paths starting
    /// with `/` are appended to it. The API version is added to the query
    /// string, unless the URL already has one.
    pub async fn fetch(
        &self,
        url: &str,
        responses: &'static [ResponseSpec],
        options: RequestOptions,
    ) -> Result<Response<Bytes>> {
        let url = match url.strip_prefix('/') {
            Some(path) => format!("{}/{path}", self.endpoint),
            None => url.to_string(),
        };
        let mut url = reqwest::Url::parse(&self.endpoint)
            .and_then(|base| base.join(&url))
            .map_err(Error::binding)?;
        if !url.query_pairs().any(|(k, _)| k == API_VERSION) {
            url.query_pairs_mut()
                .append_pair(API_VERSION, &self.api_version);
        }
        let builder = self.inner.get(url);
        self.send(builder, responses, None, &options).await
    }

    /// Like [fetch][Self::fetch], decoding the response.
    pub async fn fetch_json<O>(
        &self,
        url: &str,
        responses: &'static [ResponseSpec],
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned + Default,
    {
        let response = self.fetch(url, responses, options).await?;
        decode(responses, response)
    }

    fn query_value(&self, name: &str, args: &Arguments) -> Option<Value> {
        match args.get(name) {
            Some(v) => Some(v.clone()),
            None if name == API_VERSION => Some(Value::from(self.api_version.clone())),
            None => None,
        }
    }

    async fn send(
        &self,
        mut builder: reqwest::RequestBuilder,
        responses: &[ResponseSpec],
        operation_id: Option<&str>,
        options: &RequestOptions,
    ) -> Result<Response<Bytes>> {
        if let Some(user_agent) = options.user_agent().as_ref().or(self.user_agent.as_ref()) {
            builder = builder.header(
                reqwest::header::USER_AGENT,
                reqwest::header::HeaderValue::from_str(user_agent).map_err(Error::ser)?,
            );
        }
        if let Some(timeout) = options.attempt_timeout().or(self.attempt_timeout) {
            builder = builder.timeout(timeout);
        }
        let request = builder.build().map_err(Error::binding)?;
        let span = if self.tracing {
            create_http_span(
                request.method(),
                request.url(),
                operation_id,
                gax::options::internal::get_path_template(options),
                self.instrumentation,
            )
        } else {
            Span::none()
        };
        let result = self
            .send_request(request, responses)
            .instrument(span.clone())
            .await;
        record_http_result(&span, &result);
        result
    }

    async fn send_request(
        &self,
        request: reqwest::Request,
        responses: &[ResponseSpec],
    ) -> Result<Response<Bytes>> {
        let response = self
            .inner
            .execute(request)
            .await
            .map_err(Self::map_send_error)?;
        if find_response(responses, response.status().as_u16()).is_none() {
            return self::to_http_error(response).await;
        }
        let response = http::Response::from(response);
        let (parts, body) = response.into_parts();
        let body = http_body_util::BodyExt::collect(body)
            .await
            .map_err(Self::map_send_error)?
            .to_bytes();
        tracing::debug!(status = parts.status.as_u16(), "response received");
        Ok(Response::from_parts(
            Parts::new()
                .set_status(parts.status)
                .set_headers(parts.headers),
            body,
        ))
    }

    fn map_send_error(err: reqwest::Error) -> Error {
        match err {
            e if e.is_timeout() => Error::timeout(e),
            e => Error::io(e),
        }
    }

    pub fn get_polling_error_policy(&self, options: &RequestOptions) -> Arc<dyn PollingErrorPolicy> {
        options
            .polling_error_policy()
            .clone()
            .or_else(|| self.polling_error_policy.clone())
            .unwrap_or_else(|| Arc::new(PropagateErrors))
    }

    pub fn get_polling_backoff_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn PollingBackoffPolicy> {
        options
            .polling_backoff_policy()
            .clone()
            .or_else(|| self.polling_backoff_policy.clone())
            .unwrap_or_else(|| Arc::new(ExponentialBackoff::default()))
    }
}

fn header_value(value: &Value) -> Result<reqwest::header::HeaderValue> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        v => v.to_string(),
    };
    reqwest::header::HeaderValue::from_str(&text).map_err(Error::ser)
}

/// Decodes a response according to the shape declared for its status.
pub fn decode<O>(responses: &[ResponseSpec], response: Response<Bytes>) -> Result<Response<O>>
where
    O: serde::de::DeserializeOwned + Default,
{
    let shape = find_response(responses, response.status().as_u16()).map(|r| r.shape);
    let (parts, body) = response.into_parts();
    let body = match shape {
        Some(Shape::Json) => serde_json::from_slice::<O>(&body).map_err(Error::deser)?,
        Some(Shape::Empty) => O::default(),
        None => return Err(Error::http(parts.status.as_u16(), parts.headers, body)),
    };
    Ok(Response::from_parts(parts, body))
}

pub async fn to_http_error<O>(response: reqwest::Response) -> Result<O> {
    let status_code = response.status().as_u16();
    let response = http::Response::from(response);
    let (parts, body) = response.into_parts();

    let body = http_body_util::BodyExt::collect(body)
        .await
        .map_err(Error::io)?
        .to_bytes();

    let error = match gax::error::rpc::Status::try_from(&body) {
        Ok(status) => Error::service_with_http_metadata(
            status,
            Some(status_code),
            Some(parts.headers),
            Some(body),
        ),
        Err(_) => Error::http(status_code, parts.headers, body),
    };
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderMap, HeaderValue};
    use test_case::test_case;
    type TestResult = anyhow::Result<()>;

    static RESPONSES: [ResponseSpec; 3] = [
        ResponseSpec::json(200),
        ResponseSpec::json(201),
        ResponseSpec::empty(204),
    ];

    #[tokio::test]
    async fn http_error_bytes() -> TestResult {
        let http_resp = http::Response::builder()
            .header("Content-Type", "application/json")
            .status(400)
            .body(r#"{"error": "bad request"}"#)?;
        let response: reqwest::Response = http_resp.into();
        let err = super::to_http_error::<()>(response).await.unwrap_err();
        assert_eq!(err.status(), None);
        assert!(err.is_transport(), "{err:?}");
        assert_eq!(err.http_status_code(), Some(400));
        let mut want = HeaderMap::new();
        want.insert("content-type", HeaderValue::from_static("application/json"));
        assert_eq!(err.http_headers(), Some(&want));
        assert_eq!(
            err.http_payload(),
            Some(bytes::Bytes::from(r#"{"error": "bad request"}"#)).as_ref()
        );
        Ok(())
    }

    #[tokio::test]
    async fn error_with_status() -> TestResult {
        use gax::error::rpc::Status;
        let body = serde_json::json!({"error": {
            "code": "PipelineNotFound",
            "message": "The pipeline [p1] cannot be found",
            "target": "p1",
        }});
        let http_resp = http::Response::builder()
            .header("Content-Type", "application/json")
            .status(404)
            .body(body.to_string())?;
        let response: reqwest::Response = http_resp.into();
        let err = super::to_http_error::<()>(response).await.unwrap_err();
        let want = Status::default()
            .set_code("PipelineNotFound")
            .set_message("The pipeline [p1] cannot be found")
            .set_target("p1");
        assert_eq!(err.status(), Some(&want));
        assert_eq!(err.http_status_code(), Some(404_u16));
        assert_eq!(err.http_payload(), Some(&bytes::Bytes::from(body.to_string())));
        Ok(())
    }

    #[test_case(200, "{}"; "200 with empty object")]
    #[test_case(201, "{}"; "201 with empty object")]
    #[test_case(204, ""; "204 with empty content")]
    #[test_case(204, "ignored"; "204 with content")]
    fn decode_empty_content(code: u16, content: &'static str) -> TestResult {
        let response = Response::from_parts(
            Parts::new().set_status(http::StatusCode::from_u16(code)?),
            Bytes::from_static(content.as_bytes()),
        );
        let response = decode::<serde_json::Value>(&RESPONSES, response)?;
        assert_eq!(response.status().as_u16(), code);
        Ok(())
    }

    #[test]
    fn decode_json() -> TestResult {
        let response = Response::from(Bytes::from_static(br#"{"name": "p1"}"#));
        let got = decode::<serde_json::Value>(&RESPONSES, response)?;
        assert_eq!(got.into_body(), serde_json::json!({"name": "p1"}));
        Ok(())
    }

    #[test]
    fn decode_bad_json() {
        let response = Response::from(Bytes::new());
        let got = decode::<serde_json::Value>(&RESPONSES, response);
        assert!(matches!(&got, Err(e) if e.is_deserialization()), "{got:?}");
    }

    #[test]
    fn decode_undeclared() -> TestResult {
        let response = Response::from_parts(
            Parts::new().set_status(http::StatusCode::ACCEPTED),
            Bytes::new(),
        );
        let got = decode::<serde_json::Value>(&RESPONSES, response);
        assert!(
            matches!(&got, Err(e) if e.http_status_code() == Some(202)),
            "{got:?}"
        );
        Ok(())
    }

    #[test_case(Value::from("abc"), "abc")]
    #[test_case(Value::from(42), "42")]
    #[test_case(Value::from(true), "true")]
    fn header_values(value: Value, want: &str) -> TestResult {
        assert_eq!(header_value(&value)?, want);
        Ok(())
    }

    #[test]
    fn header_value_invalid() {
        let got = header_value(&Value::from("bad\nvalue"));
        assert!(matches!(&got, Err(e) if e.is_serialization()), "{got:?}");
    }

    #[tokio::test]
    async fn new_requires_endpoint() {
        let got = ReqwestClient::new(ClientConfig::default(), "2020-12-01").await;
        assert!(matches!(&got, Err(e) if e.is_endpoint()), "{got:?}");

        let config = ClientConfig {
            endpoint: Some("not a url".into()),
            ..Default::default()
        };
        let got = ReqwestClient::new(config, "2020-12-01").await;
        assert!(matches!(&got, Err(e) if e.is_endpoint()), "{got:?}");

        let config = ClientConfig {
            endpoint: Some("ftp://example.com".into()),
            ..Default::default()
        };
        let got = ReqwestClient::new(config, "2020-12-01").await;
        assert!(matches!(&got, Err(e) if e.is_endpoint()), "{got:?}");
    }

    #[tokio::test]
    async fn new_defaults() -> TestResult {
        let config = ClientConfig {
            endpoint: Some("https://test.example.com/".into()),
            ..Default::default()
        };
        let client = ReqwestClient::new(config, "2020-12-01").await?;
        assert_eq!(client.endpoint(), "https://test.example.com");
        assert_eq!(client.api_version(), "2020-12-01");

        let config = ClientConfig {
            endpoint: Some("https://test.example.com".into()),
            api_version: Some("2019-06-01-preview".into()),
            ..Default::default()
        };
        let client = ReqwestClient::new(config, "2020-12-01").await?;
        assert_eq!(client.api_version(), "2019-06-01-preview");
        Ok(())
    }

    #[tokio::test]
    async fn polling_policies() -> TestResult {
        use gax::polling_backoff_policy::FixedInterval;
        use gax::polling_error_policy::AlwaysContinue;
        use std::time::{Duration, Instant};

        let config = ClientConfig {
            endpoint: Some("https://test.example.com".into()),
            ..Default::default()
        };
        let client = ReqwestClient::new(config, "2020-12-01").await?;
        let options = RequestOptions::default();
        let policy = client.get_polling_error_policy(&options);
        let got = policy.on_error(Instant::now(), 1, Error::io("simulated"));
        assert!(got.is_permanent(), "{got:?}");
        let backoff = client.get_polling_backoff_policy(&options);
        assert_eq!(backoff.wait_period(Instant::now(), 1), Duration::from_secs(1));

        let mut options = RequestOptions::default();
        options.set_polling_error_policy(AlwaysContinue);
        options.set_polling_backoff_policy(FixedInterval::new(Duration::from_millis(5)));
        let policy = client.get_polling_error_policy(&options);
        let got = policy.on_error(Instant::now(), 1, Error::io("simulated"));
        assert!(got.is_continue(), "{got:?}");
        let backoff = client.get_polling_backoff_policy(&options);
        assert_eq!(
            backoff.wait_period(Instant::now(), 1),
            Duration::from_millis(5)
        );
        Ok(())
    }
}
