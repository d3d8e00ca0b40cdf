use reqwest::Client;
use std::time::Instant;

use crate::core::error::GatewayError;
use crate::domain::{IdentificationRequest, IdentificationResult, SpeciesIdentifier};
use crate::infra::config::{ApiKey, Config};
use crate::infra::http::client::make_http_client;
use crate::infra::http::headers::{upstream_headers, RequestId};
use crate::infra::logging::record_upstream_call;

/// Client for the Nature Vision inference endpoint. One POST per call, no retries.
#[derive(Clone)]
pub struct NatureVisionRemote {
    endpoint: String,
    api_key: ApiKey,
    http: Client,
}

impl NatureVisionRemote {
    pub fn new(endpoint: impl Into<String>, api_key: ApiKey) -> Result<Self, GatewayError> {
        Ok(Self {
            endpoint: endpoint.into(),
            api_key,
            http: make_http_client()?,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, GatewayError> {
        Self::new(cfg.endpoint.clone(), cfg.api_key.clone())
    }

    pub async fn identify(
        &self,
        request: &IdentificationRequest,
    ) -> Result<IdentificationResult, GatewayError> {
        let start = Instant::now();
        let res = self.post(request).await;
        let outcome = match &res {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        record_upstream_call(outcome, start.elapsed().as_millis() as f64);
        res
    }

    async fn post(
        &self,
        request: &IdentificationRequest,
    ) -> Result<IdentificationResult, GatewayError> {
        let rid = RequestId::next();
        tracing::debug!(endpoint = %self.endpoint, request_id = %rid, top_k = %request.top_k, "vision request");

        // .json() sets Content-Type: application/json
        let resp = upstream_headers(self.http.post(&self.endpoint), &self.api_key, &rid)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, request_id = %rid, "vision upstream returned non-success status");
            return Err(GatewayError::UpstreamStatus(status));
        }

        // Trusted pass-through: only unparsable JSON is an error here.
        let body = resp.text().await?;
        let value = serde_json::from_str::<serde_json::Value>(&body).map_err(GatewayError::Decode)?;
        IdentificationResult::from_upstream(value)
    }
}

#[async_trait::async_trait]
impl SpeciesIdentifier for NatureVisionRemote {
    async fn identify(
        &self,
        request: &IdentificationRequest,
    ) -> Result<IdentificationResult, GatewayError> {
        NatureVisionRemote::identify(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> NatureVisionRemote {
        NatureVisionRemote::new(server.url("/api/v1/mcp/vision"), ApiKey::new("test-key")).unwrap()
    }

    #[tokio::test]
    async fn it_posts_bearer_json_and_parses_result() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/mcp/vision")
                .header("authorization", "Bearer test-key")
                .header("content-type", "application/json")
                .json_body(json!({
                    "image_url": "https://example.com/rose.jpg",
                    "image_data": null,
                    "category": "plant",
                    "top_k": 5
                }));
            then.status(200).json_body(json!({
                "source": "nature-vision",
                "results": [{"latin_name": "Rosa rugosa", "confidence": 0.92}]
            }));
        });

        let req = IdentificationRequest {
            image_url: Some("https://example.com/rose.jpg".into()),
            category: Some("plant".into()),
            ..Default::default()
        };
        let out = client(&server).identify(&req).await.unwrap();
        m.assert();
        assert_eq!(out.source().unwrap(), "nature-vision");
        assert_eq!(out.results().unwrap()[0]["latin_name"], "Rosa rugosa");
        assert_eq!(out.results().unwrap()[0]["confidence"], 0.92);
    }

    #[tokio::test]
    async fn it_sets_correlation_headers() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/mcp/vision")
                .header_exists("x-request-id")
                .header_exists("user-agent");
            then.status(200).json_body(json!({"source": "s", "results": []}));
        });
        let out = client(&server)
            .identify(&IdentificationRequest::default())
            .await
            .unwrap();
        m.assert();
        assert_eq!(out.results().unwrap(), &json!([]));
    }

    #[tokio::test]
    async fn server_error_is_upstream_status_without_retry() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST).path("/api/v1/mcp/vision");
            then.status(500).body("boom");
        });
        let err = client(&server)
            .identify(&IdentificationRequest::default())
            .await
            .unwrap_err();
        m.assert_hits(1);
        assert!(matches!(err, GatewayError::UpstreamStatus(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn client_error_is_treated_the_same() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/mcp/vision");
            then.status(401).body("unauthorized");
        });
        let err = client(&server)
            .identify(&IdentificationRequest::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("upstream status 401"));
    }

    #[tokio::test]
    async fn unparsable_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/mcp/vision");
            then.status(200).body("<html>not json</html>");
        });
        let err = client(&server)
            .identify(&IdentificationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn loosely_shaped_body_is_passed_through() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/mcp/vision");
            then.status(200)
                .body(r#"{"results":[{"latin_name":"X","confidence":null},{"latin_name":"Y","confidence":"high"}]}"#);
        });
        let out = client(&server)
            .identify(&IdentificationRequest::default())
            .await
            .unwrap();
        assert!(out.source().is_none());
        assert_eq!(out.results().unwrap()[0]["confidence"], serde_json::Value::Null);
        assert_eq!(out.results().unwrap()[1]["confidence"], "high");
    }

    #[tokio::test]
    async fn json_null_body_is_decode_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/mcp/vision");
            then.status(200).body("null");
        });
        let err = client(&server)
            .identify(&IdentificationRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let cli = NatureVisionRemote::new("http://127.0.0.1:9/vision", ApiKey::new("k")).unwrap();
        let err = cli
            .identify(&IdentificationRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
