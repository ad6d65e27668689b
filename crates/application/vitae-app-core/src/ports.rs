use async_trait::async_trait;

use crate::domain::StoredSession;
use vitae_client::ApiClient;
use vitae_core::{
    AuthEnvelope, ExportFormat, ExportLink, LoginForm, ProfileForm, ResumeEnvelope, ResumeForm,
    ResumeId, SignupForm,
};

/// The resume service as the kernel sees it. Production uses `ApiClient`;
/// tests substitute fakes.
#[async_trait]
pub trait ResumeServicePort: Send + Sync + 'static {
    async fn signup(&self, form: &SignupForm) -> anyhow::Result<AuthEnvelope>;
    async fn login(&self, form: &LoginForm) -> anyhow::Result<AuthEnvelope>;
    async fn logout(&self) -> anyhow::Result<AuthEnvelope>;
    async fn session(&self) -> anyhow::Result<AuthEnvelope>;
    async fn profile_create(&self, form: &ProfileForm) -> anyhow::Result<AuthEnvelope>;
    async fn profile_get(&self) -> anyhow::Result<AuthEnvelope>;

    async fn resume_create(&self, form: &ResumeForm) -> anyhow::Result<ResumeEnvelope>;
    async fn resume_list(&self) -> anyhow::Result<ResumeEnvelope>;
    async fn resume_get(&self, id: &ResumeId) -> anyhow::Result<ResumeEnvelope>;
    async fn resume_delete(&self, id: &ResumeId) -> anyhow::Result<ResumeEnvelope>;
    async fn export(&self, id: &ResumeId, format: ExportFormat) -> anyhow::Result<ExportLink>;

    /// Install or drop the session credential attached to later calls.
    fn adopt_token(&self, token: Option<String>);
}

/// Client-local echo of the signed-in user, for session restoration.
pub trait SessionCachePort: Send + Sync + 'static {
    fn load(&self) -> anyhow::Result<Option<StoredSession>>;
    fn save(&self, session: &StoredSession) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

#[async_trait]
impl ResumeServicePort for ApiClient {
    async fn signup(&self, form: &SignupForm) -> anyhow::Result<AuthEnvelope> {
        Ok(ApiClient::signup(self, form).await?)
    }

    async fn login(&self, form: &LoginForm) -> anyhow::Result<AuthEnvelope> {
        Ok(ApiClient::login(self, form).await?)
    }

    async fn logout(&self) -> anyhow::Result<AuthEnvelope> {
        Ok(ApiClient::logout(self).await?)
    }

    async fn session(&self) -> anyhow::Result<AuthEnvelope> {
        Ok(ApiClient::me(self).await?)
    }

    async fn profile_create(&self, form: &ProfileForm) -> anyhow::Result<AuthEnvelope> {
        Ok(ApiClient::profile_create(self, form).await?)
    }

    async fn profile_get(&self) -> anyhow::Result<AuthEnvelope> {
        Ok(ApiClient::profile_get(self).await?)
    }

    async fn resume_create(&self, form: &ResumeForm) -> anyhow::Result<ResumeEnvelope> {
        Ok(ApiClient::resume_create(self, form).await?)
    }

    async fn resume_list(&self) -> anyhow::Result<ResumeEnvelope> {
        Ok(ApiClient::resume_list(self).await?)
    }

    async fn resume_get(&self, id: &ResumeId) -> anyhow::Result<ResumeEnvelope> {
        Ok(ApiClient::resume_get(self, id).await?)
    }

    async fn resume_delete(&self, id: &ResumeId) -> anyhow::Result<ResumeEnvelope> {
        Ok(ApiClient::resume_delete(self, id).await?)
    }

    async fn export(&self, id: &ResumeId, format: ExportFormat) -> anyhow::Result<ExportLink> {
        let link = match format {
            ExportFormat::Pdf => ApiClient::export_pdf(self, id).await?,
            ExportFormat::Word => ApiClient::export_word(self, id).await?,
        };
        Ok(link)
    }

    fn adopt_token(&self, token: Option<String>) {
        self.set_token(token);
    }
}
