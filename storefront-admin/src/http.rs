//! HTTP client for storefront-server
//!
//! Success bodies are the plain JSON resource; failures carry the
//! `{code, message, details}` envelope, surfaced as [`ClientError::Api`].

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ErrorBody;

use crate::config::AdminConfig;
use crate::error::{ClientError, ClientResult};

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &AdminConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        handle_response(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        handle_response(response).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).send().await?;
        handle_response(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        handle_response(response).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).send().await?;
        handle_response(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.delete(self.url(path)).send().await?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await?;
        return Err(parse_error(status.as_u16(), &text));
    }
    Ok(response.json().await?)
}

/// Turn a non-success body into a client error
fn parse_error(status: u16, body: &str) -> ClientError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(envelope) if envelope.code != 0 => ClientError::Api {
            code: envelope.code,
            message: envelope.message,
            details: envelope
                .details
                .map(|d| serde_json::Value::Object(d.into_iter().collect())),
        },
        _ => {
            tracing::warn!(status, "Error response without envelope");
            ClientError::InvalidResponse {
                status,
                body: body.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_envelope_becomes_api_error() {
        let body = r#"{"code":1102,"message":"Cannot delete category with existing products","details":{"categoryId":7}}"#;
        let err = parse_error(409, body);
        assert!(err.is(ErrorCode::CategoryHasProducts));
        match err {
            ClientError::Api { details, .. } => {
                assert_eq!(details.unwrap()["categoryId"], 7);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_plain_body_is_invalid_response() {
        let err = parse_error(502, "Bad Gateway");
        assert!(matches!(err, ClientError::InvalidResponse { status: 502, .. }));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = AdminConfig::new("http://localhost:8080/")
            .build_http_client()
            .unwrap();
        assert_eq!(client.url("/api/products"), "http://localhost:8080/api/products");
    }
}
