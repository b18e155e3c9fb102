//! HTTP client for the Web Manager API.
//!
//! Endpoints (relative to the configured API URL):
//! - `POST token` - exchange username/password for a bearer token
//! - `GET proposals` - proposal list
//! - `GET proposals/{code}` - proposal with time allocations and blocks
//! - `GET blocks/{id}` - full scheduling block

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use webmanager_models::{Block, BlockId, Proposal, ProposalCode, ProposalSummary};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Login request body.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Login response body.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    auth_token: String,
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Web Manager API client.
///
/// Every request except [`login`](Self::login) needs a bearer token; without
/// one the request is refused locally with [`ClientError::NotAuthenticated`].
#[derive(Clone)]
pub struct WebManagerClient {
    http: reqwest::Client,
    api_url: Url,
    token: Option<String>,
}

impl WebManagerClient {
    /// Create an unauthenticated client.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("webmanager/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            token: None,
        })
    }

    /// Attach a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Check if a token is attached.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let url = self.endpoint("token")?;
        debug!(url = %url, username, "requesting token");

        let response = self
            .http
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let body: LoginResponse = Self::decode(response).await?;
        Ok(body.auth_token)
    }

    /// List the proposals visible to the user.
    pub async fn proposals(&self) -> Result<Vec<ProposalSummary>> {
        self.get_json("proposals").await
    }

    /// Fetch a proposal with its time allocations and block list.
    pub async fn proposal(&self, code: &ProposalCode) -> Result<Proposal> {
        self.get_json(&format!("proposals/{}", code)).await
    }

    /// Fetch a full scheduling block.
    pub async fn block(&self, id: BlockId) -> Result<Block> {
        self.get_json(&format!("blocks/{}", id)).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_url.join(path)?)
    }

    fn bearer(&self) -> Result<&str> {
        self.token.as_deref().ok_or(ClientError::NotAuthenticated)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let token = self.bearer()?;
        let url = self.endpoint(path)?;
        debug!(url = %url, "GET");

        let response = self.http.get(url).bearer_auth(token).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;
        trace!(status = status.as_u16(), body_len = text.len(), "response received");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized(error_message(&text, status)));
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&text, status),
            });
        }

        serde_json::from_str(&text).map_err(|e| ClientError::ResponseParse(e.to_string()))
    }
}

/// Extract a readable message from an error body.
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    pub(crate) const TOKEN: &str = "secret-token";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {}", TOKEN))
    }

    async fn token(Json(body): Json<Value>) -> (AxumStatus, Json<Value>) {
        if body["username"] == "astro" && body["password"] == "hunter2" {
            (AxumStatus::OK, Json(json!({ "auth_token": TOKEN })))
        } else {
            (
                AxumStatus::UNAUTHORIZED,
                Json(json!({ "message": "Invalid username or password" })),
            )
        }
    }

    async fn proposals(headers: HeaderMap) -> (AxumStatus, Json<Value>) {
        if !authorized(&headers) {
            return (AxumStatus::UNAUTHORIZED, Json(json!({ "message": "Token expired" })));
        }
        (
            AxumStatus::OK,
            Json(json!([
                { "code": "2024-1-SCI-017", "title": "Dwarf galaxies", "semester": "2024-1" }
            ])),
        )
    }

    async fn proposal(headers: HeaderMap, Path(code): Path<String>) -> (AxumStatus, Json<Value>) {
        if !authorized(&headers) {
            return (AxumStatus::UNAUTHORIZED, Json(json!({ "message": "Token expired" })));
        }
        (
            AxumStatus::OK,
            Json(json!({
                "code": code,
                "title": "Dwarf galaxies",
                "principal_investigator": "A. Observer",
                "semester": "2024-1",
                "blocks": [
                    { "id": 10, "name": "Field A" },
                    { "id": 11, "name": "Field B" },
                    { "id": 404, "name": "Missing" }
                ]
            })),
        )
    }

    async fn block(headers: HeaderMap, Path(id): Path<i64>) -> (AxumStatus, Json<Value>) {
        if !authorized(&headers) {
            return (AxumStatus::UNAUTHORIZED, Json(json!({ "message": "Token expired" })));
        }
        if id == 404 {
            return (
                AxumStatus::NOT_FOUND,
                Json(json!({ "message": format!("No block with id {}", id) })),
            );
        }
        if id == 500 {
            return (AxumStatus::INTERNAL_SERVER_ERROR, Json(json!({ "unexpected": true })));
        }
        (
            AxumStatus::OK,
            Json(json!({
                "id": id,
                "name": format!("Field {}", id),
                "proposal_code": "2024-1-SCI-017",
                "semester": "2024-1",
                "priority": 1,
                "length_secs": 1800,
                "instruments": [
                    { "type": "imager", "filter": "R", "exposure_time_secs": 60 }
                ]
            })),
        )
    }

    /// Start a fake Web Manager API on an ephemeral port.
    pub(crate) async fn spawn_api() -> Url {
        let router = Router::new()
            .route("/api/token", post(token))
            .route("/api/proposals", get(proposals))
            .route("/api/proposals/:code", get(proposal))
            .route("/api/blocks/:id", get(block));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Url::parse(&format!("http://{}/api", addr)).unwrap()
    }

    async fn make_client() -> WebManagerClient {
        let config = ClientConfig::new(spawn_api().await);
        WebManagerClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_login_success() {
        let client = make_client().await;
        let token = client.login("astro", "hunter2").await.unwrap();
        assert_eq!(token, TOKEN);
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let client = make_client().await;
        let err = client.login("astro", "wrong").await.unwrap_err();
        match err {
            ClientError::Unauthorized(message) => {
                assert_eq!(message, "Invalid username or password")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_protected_request_without_token_is_refused_locally() {
        // Nothing listens here; the guard must fail before any request
        let config = ClientConfig::new(Url::parse("http://127.0.0.1:9/api/").unwrap());
        let client = WebManagerClient::new(&config).unwrap();

        assert!(!client.is_authenticated());
        let err = client.block(BlockId::new(10)).await.unwrap_err();
        assert!(matches!(err, ClientError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_block_with_token() {
        let client = make_client().await.with_token(TOKEN);

        let block = client.block(BlockId::new(10)).await.unwrap();
        assert_eq!(block.id, BlockId::new(10));
        assert_eq!(block.instruments.len(), 1);
    }

    #[tokio::test]
    async fn test_proposal_and_list() {
        let client = make_client().await.with_token(TOKEN);

        let list = client.proposals().await.unwrap();
        assert_eq!(list.len(), 1);

        let code = ProposalCode::parse("2024-1-SCI-017").unwrap();
        let proposal = client.proposal(&code).await.unwrap();
        assert_eq!(proposal.code, code);
        assert_eq!(proposal.blocks.len(), 3);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let client = make_client().await.with_token("stale");
        let err = client.proposals().await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Token expired"));
    }

    #[tokio::test]
    async fn test_api_error_carries_status_and_message() {
        let client = make_client().await.with_token(TOKEN);

        let err = client.block(BlockId::new(404)).await.unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "No block with id 404");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_without_message_uses_body() {
        let client = make_client().await.with_token(TOKEN);

        let err = client.block(BlockId::new(500)).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 500, .. }));
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(r#"{"message": "nope"}"#, StatusCode::BAD_REQUEST),
            "nope"
        );
        assert_eq!(error_message("  plain text ", StatusCode::BAD_REQUEST), "plain text");
        assert_eq!(error_message("", StatusCode::NOT_FOUND), "Not Found");
    }
}
