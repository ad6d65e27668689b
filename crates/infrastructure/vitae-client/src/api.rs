use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use vitae_core::{
    AuthEnvelope, ExportLink, LoginForm, ProfileForm, ResumeEnvelope, ResumeForm, ResumeId,
    SignupForm,
};

use crate::error::ApiError;

/// Build the client every caller shares: JSON API, short timeout, no
/// redirects into other origins carrying the bearer header.
pub fn default_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .timeout(Duration::from_secs(vitae_config::REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("vitae/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(ApiError::Transport)
}

/// Wraps every outbound call with the base URL, default JSON headers, and
/// the current session token. Knows nothing about application state.
pub struct ApiClient {
    client: Client,
    base: Url,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url).map_err(|e| ApiError::Url {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        // Url::join treats a base without a trailing slash as a file path
        // and would drop its last segment.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self {
            client,
            base,
            token: RwLock::new(None),
        })
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Url {
                url: path.to_string(),
                message: e.to_string(),
            })
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.token.read().expect("token lock poisoned").as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        what: &'static str,
    ) -> Result<T, ApiError> {
        let resp = self.authorize(req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            error!(%status, what, "API call rejected by server");
            return Err(ApiError::Server {
                status: status.as_u16(),
                detail,
            });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            error!(what, "undecodable API response: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        what: &'static str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        self.send_json(self.client.get(url), what).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        what: &'static str,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST");
        self.send_json(self.client.post(url).json(body), what).await
    }

    // --- Auth / session ---

    pub async fn signup(&self, form: &SignupForm) -> Result<AuthEnvelope, ApiError> {
        self.post("v1/signup", form, "signup").await
    }

    pub async fn login(&self, form: &LoginForm) -> Result<AuthEnvelope, ApiError> {
        self.post("v1/login", form, "login").await
    }

    pub async fn logout(&self) -> Result<AuthEnvelope, ApiError> {
        // Token handling stays with the caller: the client is signed out
        // locally whether or not this call succeeds.
        self.post("v1/logout", &serde_json::json!({}), "logout").await
    }

    pub async fn me(&self) -> Result<AuthEnvelope, ApiError> {
        self.get("v1/me", "session").await
    }

    pub async fn profile_create(&self, form: &ProfileForm) -> Result<AuthEnvelope, ApiError> {
        self.post("v1/profile/create", form, "profile setup").await
    }

    pub async fn profile_get(&self) -> Result<AuthEnvelope, ApiError> {
        self.get("v1/profile/get", "profile").await
    }

    // --- Resume resource ---

    pub async fn resume_create(&self, form: &ResumeForm) -> Result<ResumeEnvelope, ApiError> {
        self.post("v1/resume/create", form, "resume create").await
    }

    pub async fn resume_list(&self) -> Result<ResumeEnvelope, ApiError> {
        self.get("v1/resumes", "resume list").await
    }

    pub async fn resume_get(&self, id: &ResumeId) -> Result<ResumeEnvelope, ApiError> {
        self.get(&format!("v1/resume/get/{id}"), "resume fetch").await
    }

    pub async fn resume_delete(&self, id: &ResumeId) -> Result<ResumeEnvelope, ApiError> {
        let url = self.endpoint(&format!("v1/resumes/{id}"))?;
        debug!(%url, "DELETE");
        self.send_json(self.client.delete(url), "resume delete").await
    }

    pub async fn export_pdf(&self, id: &ResumeId) -> Result<ExportLink, ApiError> {
        self.get(&format!("v1/resume/pdf/{id}"), "pdf export").await
    }

    pub async fn export_word(&self, id: &ResumeId) -> Result<ExportLink, ApiError> {
        self.get(&format!("v1/resume/word/{id}"), "word export").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_keeps_trailing_path_segment() {
        let client = default_http_client().unwrap();
        let api = ApiClient::new(client, "http://localhost:8000/api").unwrap();
        let url = api.endpoint("v1/resumes").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/resumes");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let client = default_http_client().unwrap();
        assert!(matches!(
            ApiClient::new(client, "not a url"),
            Err(ApiError::Url { .. })
        ));
    }
}
