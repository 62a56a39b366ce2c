use async_trait::async_trait;
use thiserror::Error;
use tracing::instrument;

/// The QA service gets this long to answer before the call is abandoned.
pub const QA_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
const BODY_SAMPLE_CHAR_LIMIT: usize = 2048;

#[derive(Debug, serde::Serialize)]
pub struct AskRequest<'a> {
    pub hop: i64,
    pub question: &'a str,
    pub trace_id: &'a str,
    pub method: &'a str,
}

#[derive(Debug, serde::Deserialize)]
pub struct AskResponse {
    pub answer: String,
    /// Extra response fields (retrieved passage, timings, ...) we don't consume
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum AskError {
    #[error("QA endpoint request failed. Context: {context}")]
    Http {
        #[source]
        source: reqwest::Error,
        context: String,
    },
    #[error("unexpected QA endpoint response. Context: {context}\n{body_sample}")]
    UnexpectedResponse { context: String, body_sample: String },
}

impl AskError {
    fn from_reqwest_error<S: Into<String>>(source: reqwest::Error, context: S) -> Self {
        Self::Http {
            source,
            context: context.into(),
        }
    }
}

/// Remote question answering, abstracted so the harness can run against a
/// scripted implementation in tests.
#[async_trait]
pub trait QaClient: Send + Sync {
    async fn ask(&self, request: &AskRequest<'_>) -> Result<AskResponse, AskError>;
}

pub struct HttpQaClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQaClient {
    pub fn new(endpoint: String) -> Result<Self, AskError> {
        let client = reqwest::ClientBuilder::new()
            .timeout(QA_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AskError::from_reqwest_error(e, "building reqwest client"))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl QaClient for HttpQaClient {
    #[instrument(skip_all)]
    async fn ask(&self, request: &AskRequest<'_>) -> Result<AskResponse, AskError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AskError::from_reqwest_error(e, "sending ask request"))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AskError::from_reqwest_error(e, "reading ask response body"))?;
        if !status.is_success() {
            return Err(AskError::UnexpectedResponse {
                context: format!("ask returned status {status}"),
                body_sample: truncate_body(&body),
            });
        }
        serde_json::from_str(&body).map_err(|e| AskError::UnexpectedResponse {
            context: format!("decoding ask response: {e}"),
            body_sample: truncate_body(&body),
        })
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(BODY_SAMPLE_CHAR_LIMIT).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ask_request_serializes_to_the_wire_shape() {
        let request = AskRequest {
            hop: 2,
            question: "How many errors occurred?",
            trace_id: "e72ef241661424eb6970b65f6fd74b30",
            method: "graph-rag",
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["hop"], 2);
        assert_eq!(body["question"], "How many errors occurred?");
        assert_eq!(body["trace_id"], "e72ef241661424eb6970b65f6fd74b30");
        assert_eq!(body["method"], "graph-rag");
    }

    #[test]
    fn ask_response_tolerates_extra_fields() {
        let response: AskResponse = serde_json::from_str(
            r#"{"answer": "2 errors", "passage": "span graph", "latency_ms": 120}"#,
        )
        .unwrap();
        assert_eq!(response.answer, "2 errors");
        assert_eq!(response.extra.get("passage").unwrap(), "span graph");
    }
}
