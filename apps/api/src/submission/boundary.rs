use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::submission::controller::ResumeFile;

/// The request could not complete: connection failure, timeout, or an undecodable body.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Body(String),
}

/// JSON body returned by the analysis service. Exactly one field is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The external analysis service, seen from the controller.
#[async_trait]
pub trait AnalysisBoundary: Send + Sync {
    async fn analyze(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<AnalysisResponse, TransportError>;
}

/// Multipart HTTP client for `POST /analyze`.
#[derive(Clone)]
pub struct HttpAnalysisBoundary {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisBoundary {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: format!("{}/analyze", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl AnalysisBoundary for HttpAnalysisBoundary {
    async fn analyze(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<AnalysisResponse, TransportError> {
        let part = Part::bytes(resume.bytes.to_vec())
            .file_name(resume.file_name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new()
            .part("resume", part)
            .text("jd", job_description.to_string());

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Analysis service responded {status} ({} bytes)", body.len());

        // Failures arrive as `{ "error": ... }` with a 4xx/5xx status, so the body is decoded
        // regardless of status.
        serde_json::from_str(&body).map_err(|e| TransportError::Body(format!("{status}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Multipart, http::StatusCode, routing::post, Json, Router};
    use bytes::Bytes;
    use serde_json::{json, Value};

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn resume() -> ResumeFile {
        ResumeFile {
            file_name: "cv.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4 fake"),
        }
    }

    #[test]
    fn test_response_deserializes_either_field() {
        let ok: AnalysisResponse = serde_json::from_str(r#"{"result": "Resume Score: 1"}"#).unwrap();
        assert_eq!(ok.result.as_deref(), Some("Resume Score: 1"));
        assert!(ok.error.is_none());

        let err: AnalysisResponse = serde_json::from_str(r#"{"error": "limit reached"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("limit reached"));
        assert!(err.result.is_none());
    }

    #[tokio::test]
    async fn test_sends_multipart_fields() {
        async fn echo(mut multipart: Multipart) -> Json<Value> {
            let mut seen = Vec::new();
            while let Some(field) = multipart.next_field().await.unwrap() {
                let name = field.name().unwrap_or_default().to_string();
                let file_name = field.file_name().map(str::to_string);
                let text = String::from_utf8_lossy(&field.bytes().await.unwrap()).to_string();
                seen.push(format!("{name}|{}|{text}", file_name.unwrap_or_default()));
            }
            Json(json!({ "result": seen.join(";") }))
        }

        let base = spawn_server(Router::new().route("/analyze", post(echo))).await;
        let boundary = HttpAnalysisBoundary::new(&base, Duration::from_secs(5)).unwrap();
        let response = boundary.analyze(&resume(), "Rust engineer").await.unwrap();

        assert_eq!(
            response.result.as_deref(),
            Some("resume|cv.pdf|%PDF-1.4 fake;jd||Rust engineer")
        );
    }

    #[tokio::test]
    async fn test_error_body_is_decoded_for_error_status() {
        async fn limited() -> (StatusCode, Json<Value>) {
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "error": "limit reached" })),
            )
        }

        let base = spawn_server(Router::new().route("/analyze", post(limited))).await;
        let boundary = HttpAnalysisBoundary::new(&format!("{base}/"), Duration::from_secs(5)).unwrap();
        let response = boundary.analyze(&resume(), "jd").await.unwrap();

        assert_eq!(response.error.as_deref(), Some("limit reached"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_transport_error() {
        async fn html() -> &'static str {
            "<html>gateway timeout</html>"
        }

        let base = spawn_server(Router::new().route("/analyze", post(html))).await;
        let boundary = HttpAnalysisBoundary::new(&base, Duration::from_secs(5)).unwrap();
        let err = boundary.analyze(&resume(), "jd").await.unwrap_err();

        assert!(matches!(err, TransportError::Body(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let boundary =
            HttpAnalysisBoundary::new(&format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let err = boundary.analyze(&resume(), "jd").await.unwrap_err();

        assert!(matches!(err, TransportError::Http(_)));
    }
}
