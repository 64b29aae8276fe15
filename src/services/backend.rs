//! HTTP client for the study backend

use reqwest::{
    header::{HeaderMap, HeaderValue, COOKIE},
    Client, Response,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    error::BackendError,
    state::{Mode, SessionId},
};

use super::models::{
    Achievement, CreateGroupRequest, CreateGroupResponse, EndSessionRequest, EndSessionResponse,
    JoinGroupResponse, RejectionBody, StartSessionRequest, StartSessionResponse, StudyGroup,
};

/// Client for the backend's session, achievement and study-group endpoints
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http_client: Client,
}

impl BackendClient {
    /// Build a client for `base_url`. When `cookie` is set it is sent with
    /// every request, since the backend authenticates by session cookie.
    pub fn new(base_url: &str, cookie: Option<&str>) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| BackendError::Config(format!("invalid cookie header: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let http_client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /api/start-session
    pub async fn start_session(&self, mode: Mode, duration: u32) -> Result<SessionId, BackendError> {
        debug!("Starting backend session: mode={}, duration={}s", mode, duration);

        let resp = self
            .http_client
            .post(self.url("/api/start-session"))
            .json(&StartSessionRequest { mode, duration })
            .send()
            .await?;

        let body: StartSessionResponse = read_json(resp).await?;
        let session_id = body
            .session_id
            .ok_or_else(|| BackendError::rejected(200, "missing session_id in response"))?;

        info!("Backend session {} started", session_id);
        Ok(session_id)
    }

    /// POST /api/end-session
    pub async fn end_session(
        &self,
        session_id: &SessionId,
        duration: u32,
    ) -> Result<EndSessionResponse, BackendError> {
        debug!("Ending backend session {} after {}s", session_id, duration);

        let resp = self
            .http_client
            .post(self.url("/api/end-session"))
            .json(&EndSessionRequest {
                session_id,
                duration,
            })
            .send()
            .await?;

        let body = read_json(resp).await?;
        info!("Backend session {} ended", session_id);
        Ok(body)
    }

    /// GET /api/achievements
    pub async fn achievements(&self) -> Result<Vec<Achievement>, BackendError> {
        let resp = self.http_client.get(self.url("/api/achievements")).send().await?;
        read_json(resp).await
    }

    /// GET /api/study-groups
    pub async fn study_groups(&self) -> Result<Vec<StudyGroup>, BackendError> {
        let resp = self.http_client.get(self.url("/api/study-groups")).send().await?;
        read_json(resp).await
    }

    /// POST /api/study-groups
    pub async fn create_study_group(&self, name: &str) -> Result<CreateGroupResponse, BackendError> {
        let resp = self
            .http_client
            .post(self.url("/api/study-groups"))
            .json(&CreateGroupRequest { name })
            .send()
            .await?;

        let body = read_json(resp).await?;
        info!("Study group '{}' created", name);
        Ok(body)
    }

    /// POST /api/study-groups/{id}/join. A `success: false` body is a
    /// rejection even when the status is 2xx.
    pub async fn join_study_group(&self, group_id: i64) -> Result<JoinGroupResponse, BackendError> {
        let resp = self
            .http_client
            .post(self.url(&format!("/api/study-groups/{}/join", group_id)))
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body: JoinGroupResponse = read_json(resp).await?;
        if !body.success {
            let message = body
                .message
                .unwrap_or_else(|| "Failed to join group".to_string());
            return Err(BackendError::rejected(status, message));
        }

        info!("Joined study group {}", group_id);
        Ok(body)
    }

    /// POST /logout
    pub async fn logout(&self) -> Result<(), BackendError> {
        let resp = self.http_client.post(self.url("/logout")).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(rejection(resp).await);
        }
        info!("Logged out of backend");
        Ok(())
    }
}

/// Decode a 2xx JSON body, or turn any other status into a rejection.
///
/// A 2xx body that is not the expected JSON (the login page served after an
/// auth redirect, say) is a rejection too, not a network failure.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(rejection(resp).await);
    }

    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        warn!("Undecodable {} response from backend: {}", status, e);
        BackendError::rejected(status.as_u16(), format!("unexpected response from backend: {}", e))
    })
}

async fn rejection(resp: Response) -> BackendError {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();

    let message = serde_json::from_str::<RejectionBody>(&text)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    BackendError::rejected(status.as_u16(), message)
}
