//! reqwest-backed implementation of the gateway traits.
//!
//! The backend uses cookie sessions. The cookie is kept in a `SecretString`
//! and attached as a sensitive header so it never shows up in debug output.

use std::fmt;
use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use super::error::ApiError;
use super::{
    EstimateUpdate, SessionGateway, SprintReadyUpdate, StatusUpdate, StoryGateway,
};
use crate::config::Config;
use crate::error::{Result, SprintboardError};
use crate::session::CurrentUser;
use crate::types::{BackendStatus, ProjectId, ProjectSummary, StoryId, StoryRecord};

const SESSION_COOKIE_NAME: &str = "JSESSIONID";

pub struct HttpGateway {
    client: Client,
    base_url: Url,
    session: Option<SecretString>,
}

impl fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl HttpGateway {
    /// Create a gateway for the backend at `base_url`.
    ///
    /// Redirects are not followed: an expired session answers with a redirect
    /// to the login page, which must read as a failure rather than a 200.
    /// Without `timeout` a request waits as long as the transport allows.
    pub fn new(
        base_url: &str,
        session: Option<SecretString>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(10));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.server_url(),
            config.session_cookie().map(SecretString::from),
            config.remote_timeout(),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, HeaderValue::from_static("application/json"));

        match self.session.as_ref().and_then(|s| cookie_header(s.expose_secret())) {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    /// Send and turn any non-2xx status into an `ApiError`
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_body(status, &body);
        tracing::debug!(%error, "backend request failed");
        Err(error.into())
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Build the Cookie header; a bare value is taken to be the session id
fn cookie_header(session: &str) -> Option<HeaderValue> {
    let session = session.trim();
    if session.is_empty() {
        return None;
    }
    let cookie = if session.contains('=') {
        session.to_string()
    } else {
        format!("{SESSION_COOKIE_NAME}={session}")
    };
    let mut value = HeaderValue::from_str(&cookie).ok()?;
    value.set_sensitive(true);
    Some(value)
}

impl StoryGateway for HttpGateway {
    async fn fetch_stories(&self, project_id: ProjectId) -> Result<Vec<StoryRecord>> {
        let mut url = self.url("api/stories")?;
        url.query_pairs_mut()
            .append_pair("projectId", &project_id.to_string());
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn update_status(&self, story_id: StoryId, status: BackendStatus) -> Result<()> {
        let url = self.url(&format!("api/stories/{story_id}/status"))?;
        self.send(
            self.request(Method::PUT, url)
                .json(&StatusUpdate { status }),
        )
        .await?;
        Ok(())
    }

    async fn update_sprint_ready(&self, story_id: StoryId, sprint_ready: bool) -> Result<StoryRecord> {
        let url = self.url(&format!("api/stories/{story_id}/sprint-ready"))?;
        self.send_json(
            self.request(Method::PUT, url)
                .json(&SprintReadyUpdate { sprint_ready }),
        )
        .await
    }

    async fn update_estimate(&self, story_id: StoryId, story_points: u32) -> Result<StoryRecord> {
        let url = self.url(&format!("api/stories/{story_id}/estimate"))?;
        self.send_json(
            self.request(Method::PUT, url)
                .json(&EstimateUpdate { story_points }),
        )
        .await
    }
}

impl SessionGateway for HttpGateway {
    async fn current_user(&self) -> Result<Option<CurrentUser>> {
        let url = self.url("api/users/me")?;
        match self
            .send_json::<CurrentUser>(self.request(Method::GET, url))
            .await
        {
            Ok(user) => Ok(Some(user)),
            Err(SprintboardError::Api { status, .. })
                if status.is_redirection() || status == http::StatusCode::UNAUTHORIZED
                    || status == http::StatusCode::FORBIDDEN =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        let url = self.url("api/projects")?;
        self.send_json(self.request(Method::GET, url)).await
    }
}
