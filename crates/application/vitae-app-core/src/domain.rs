use serde::{Deserialize, Serialize};

use vitae_core::{ExportLink, ResumeId, ResumeRecord, UserProfile};

/// Lifecycle of one user-triggered request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// The auth operations that carry their own status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Register,
    Login,
    Logout,
    Profile,
}

/// Session/auth container. Created unauthenticated at boot, mutated only
/// by auth event outcomes, cleared wholesale on logout.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub authenticated: bool,
    pub current_user: Option<UserProfile>,
    pub last_error: Option<String>,
    pub last_message: String,

    pub register_status: ActionStatus,
    pub login_status: ActionStatus,
    pub logout_status: ActionStatus,
    pub profile_status: ActionStatus,
}

impl SessionState {
    pub fn status(&self, action: AuthAction) -> ActionStatus {
        match action {
            AuthAction::Register => self.register_status,
            AuthAction::Login => self.login_status,
            AuthAction::Logout => self.logout_status,
            AuthAction::Profile => self.profile_status,
        }
    }

    pub(crate) fn set_status(&mut self, action: AuthAction, status: ActionStatus) {
        match action {
            AuthAction::Register => self.register_status = status,
            AuthAction::Login => self.login_status = status,
            AuthAction::Logout => self.logout_status = status,
            AuthAction::Profile => self.profile_status = status,
        }
    }

    pub(crate) fn clear_user(&mut self) {
        self.authenticated = false;
        self.current_user = None;
    }
}

/// The last successful export, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReadout {
    pub resume_id: ResumeId,
    pub format: vitae_core::ExportFormat,
    pub link: ExportLink,
}

/// Resume resource container. The list is repopulated wholesale on every
/// successful fetch, never incrementally patched.
#[derive(Debug, Clone, Default)]
pub struct ResumeState {
    pub items: Vec<ResumeRecord>,
    pub selected: Option<ResumeRecord>,
    pub loading: bool,
    pub success: bool,
    pub error: Option<String>,
    pub message: String,
    pub export: Option<ExportReadout>,
}

/// Views the client can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    ProfileSetup,
    ResumeList,
    ResumeDetail(ResumeId),
    ResumeCreate,
}

/// Whether session restoration has finished. The route guard shows a wait
/// indicator while this is `Restoring`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    Restoring,
    Ready,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub boot: BootState,
    pub route: Route,
    pub session: SessionState,
    pub resumes: ResumeState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            boot: BootState::Restoring,
            route: Route::Home,
            session: SessionState::default(),
            resumes: ResumeState::default(),
        }
    }
}

/// Client-local echo of the signed-in user, persisted so a restart can
/// restore the session before the server confirms it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub user: UserProfile,
}
