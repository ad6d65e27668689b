#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use vitae_app_core::{
    AppKernel, AppState, AppStore, ResumeServicePort, SessionCachePort, StoredSession,
};
use vitae_core::{
    AuthEnvelope, ExportFormat, ExportLink, LoginForm, ProfileForm, ResumeEnvelope, ResumeForm,
    ResumeId, ResumePayload, ResumeRecord, SignupForm, UserProfile,
};

pub fn record(id: &str, title: &str) -> ResumeRecord {
    ResumeRecord {
        id: id.into(),
        title: title.into(),
        name: "Ada".into(),
        email: "ada@example.com".into(),
        professional_summary: None,
        skills: None,
        work_experience: None,
        projects: None,
        education: None,
        certifications: None,
        resume_text: None,
        created_at: None,
    }
}

pub fn valid_resume_form() -> ResumeForm {
    ResumeForm {
        title: "Backend Engineer".into(),
        name: "Ada".into(),
        email: "ada@example.com".into(),
        skills: "Rust, SQL".into(),
        work_experience: "Five years of services".into(),
        education: "BSc".into(),
        ..Default::default()
    }
}

pub struct ListScript {
    pub delay: Duration,
    pub items: Vec<ResumeRecord>,
}

pub struct FakeInner {
    pub calls: Mutex<Vec<String>>,
    pub adopted_token: Mutex<Option<String>>,
    pub login_accepts: AtomicBool,
    pub logout_breaks: AtomicBool,
    pub session_valid: AtomicBool,
    pub delete_rejects: AtomicBool,
    pub list_scripts: Mutex<VecDeque<ListScript>>,
}

/// Scriptable stand-in for the API so kernel behavior can be asserted
/// without a server.
#[derive(Clone)]
pub struct FakeService {
    pub inner: Arc<FakeInner>,
}

impl Default for FakeService {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(FakeInner {
                calls: Mutex::new(Vec::new()),
                adopted_token: Mutex::new(None),
                login_accepts: AtomicBool::new(true),
                logout_breaks: AtomicBool::new(false),
                session_valid: AtomicBool::new(true),
                delete_rejects: AtomicBool::new(false),
                list_scripts: Mutex::new(VecDeque::new()),
            }),
        }
    }

    pub fn queue_list(&self, delay: Duration, items: Vec<ResumeRecord>) {
        self.inner
            .list_scripts
            .lock()
            .unwrap()
            .push_back(ListScript { delay, items });
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn adopted_token(&self) -> Option<String> {
        self.inner.adopted_token.lock().unwrap().clone()
    }

    fn note(&self, call: &str) {
        self.inner.calls.lock().unwrap().push(call.to_string());
    }
}

fn auth_ok(user: UserProfile, message: &str, token: Option<&str>) -> AuthEnvelope {
    AuthEnvelope {
        success: true,
        message: message.into(),
        error: None,
        user_info: Some(user),
        token: token.map(Into::into),
    }
}

fn auth_rejected(detail: &str) -> AuthEnvelope {
    AuthEnvelope {
        success: false,
        message: String::new(),
        error: Some(serde_json::Value::String(detail.into())),
        user_info: None,
        token: None,
    }
}

fn resume_ok(payload: ResumePayload, message: &str) -> ResumeEnvelope {
    ResumeEnvelope {
        success: true,
        message: message.into(),
        error: None,
        resume_info: Some(payload),
    }
}

#[async_trait]
impl ResumeServicePort for FakeService {
    async fn signup(&self, form: &SignupForm) -> anyhow::Result<AuthEnvelope> {
        self.note("signup");
        Ok(auth_ok(
            UserProfile::new(form.name.clone(), form.email.clone()),
            "Registration successful",
            Some("tok-1"),
        ))
    }

    async fn login(&self, form: &LoginForm) -> anyhow::Result<AuthEnvelope> {
        self.note("login");
        if self.inner.login_accepts.load(Ordering::SeqCst) {
            Ok(auth_ok(
                UserProfile::new("Ada", form.email.clone()),
                "Login successful",
                Some("tok-1"),
            ))
        } else {
            Ok(auth_rejected("Invalid credentials"))
        }
    }

    async fn logout(&self) -> anyhow::Result<AuthEnvelope> {
        self.note("logout");
        if self.inner.logout_breaks.load(Ordering::SeqCst) {
            anyhow::bail!("connection reset by peer");
        }
        Ok(AuthEnvelope {
            success: true,
            message: "Logout successful".into(),
            ..Default::default()
        })
    }

    async fn session(&self) -> anyhow::Result<AuthEnvelope> {
        self.note("session");
        if self.inner.session_valid.load(Ordering::SeqCst) {
            Ok(auth_ok(
                UserProfile::new("Ada", "ada@example.com"),
                "",
                None,
            ))
        } else {
            Ok(auth_rejected("Session expired"))
        }
    }

    async fn profile_create(&self, form: &ProfileForm) -> anyhow::Result<AuthEnvelope> {
        self.note("profile_create");
        let mut user = UserProfile::new(form.name.clone(), form.email.clone());
        user.bio = form.bio.clone();
        Ok(auth_ok(user, "Profile updated successfully", None))
    }

    async fn profile_get(&self) -> anyhow::Result<AuthEnvelope> {
        self.note("profile_get");
        Ok(auth_ok(
            UserProfile::new("Ada", "ada@example.com"),
            "",
            None,
        ))
    }

    async fn resume_create(&self, form: &ResumeForm) -> anyhow::Result<ResumeEnvelope> {
        self.note("resume_create");
        let created = ResumeRecord {
            id: "new-1".into(),
            title: form.title.clone(),
            name: form.name.clone(),
            email: form.email.clone(),
            professional_summary: form.professional_summary.clone(),
            skills: Some(form.skills.clone()),
            work_experience: Some(form.work_experience.clone()),
            projects: form.projects.clone(),
            education: Some(form.education.clone()),
            certifications: form.certifications.clone(),
            resume_text: None,
            created_at: None,
        };
        Ok(resume_ok(
            ResumePayload::One(created),
            "Resume created successfully",
        ))
    }

    async fn resume_list(&self) -> anyhow::Result<ResumeEnvelope> {
        self.note("resume_list");
        let script = self.inner.list_scripts.lock().unwrap().pop_front();
        let items = match script {
            Some(script) => {
                if !script.delay.is_zero() {
                    tokio::time::sleep(script.delay).await;
                }
                script.items
            }
            None => Vec::new(),
        };
        Ok(resume_ok(ResumePayload::Many(items), "All resumes fetched"))
    }

    async fn resume_get(&self, id: &ResumeId) -> anyhow::Result<ResumeEnvelope> {
        self.note("resume_get");
        Ok(resume_ok(
            ResumePayload::One(record(id, "Fetched")),
            "Resume fetched",
        ))
    }

    async fn resume_delete(&self, id: &ResumeId) -> anyhow::Result<ResumeEnvelope> {
        self.note(&format!("resume_delete:{id}"));
        if self.inner.delete_rejects.load(Ordering::SeqCst) {
            return Ok(ResumeEnvelope {
                success: false,
                message: String::new(),
                error: Some(serde_json::Value::String("document not found".into())),
                resume_info: None,
            });
        }
        Ok(ResumeEnvelope {
            success: true,
            message: "Document deleted successfully".into(),
            error: None,
            resume_info: None,
        })
    }

    async fn export(&self, id: &ResumeId, format: ExportFormat) -> anyhow::Result<ExportLink> {
        self.note("export");
        let ext = match format {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Word => "docx",
        };
        Ok(ExportLink {
            url: format!("https://files.example.com/{id}.{ext}"),
        })
    }

    fn adopt_token(&self, token: Option<String>) {
        *self.inner.adopted_token.lock().unwrap() = token;
    }
}

/// In-memory session echo.
#[derive(Clone, Default)]
pub struct FakeCache {
    slot: Arc<Mutex<Option<StoredSession>>>,
}

impl FakeCache {
    pub fn preloaded(session: StoredSession) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(session))),
        }
    }

    pub fn stored(&self) -> Option<StoredSession> {
        self.slot.lock().unwrap().clone()
    }
}

impl SessionCachePort for FakeCache {
    fn load(&self) -> anyhow::Result<Option<StoredSession>> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn save(&self, session: &StoredSession) -> anyhow::Result<()> {
        *self.slot.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

pub fn kernel_with(fake: &FakeService, cache: &FakeCache) -> AppKernel<FakeService, FakeCache> {
    AppKernel::new(AppStore::default(), fake.clone(), cache.clone())
}

/// Pump the kernel until the predicate holds or the timeout elapses.
pub fn wait_for(
    kernel: &mut AppKernel<FakeService, FakeCache>,
    timeout: Duration,
    pred: impl Fn(&AppState) -> bool,
) -> AppState {
    let deadline = Instant::now() + timeout;
    loop {
        kernel.tick();
        let state = kernel.store.state();
        if pred(&state) {
            return state;
        }
        if Instant::now() > deadline {
            panic!("timed out waiting for state condition; last state: {state:?}");
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}
