use crate::domain::Route;
use vitae_core::{ExportFormat, LoginForm, ProfileForm, ResumeForm, ResumeId, SignupForm};

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Boot
    Boot,

    // Navigation
    Navigate(Route),

    // Session / auth
    Register(SignupForm),
    Login(LoginForm),
    Logout,
    SetupProfile(ProfileForm),
    FetchProfile,

    // Resume resource
    CreateResume(ResumeForm),
    ListResumes,
    FetchResume(ResumeId),
    DeleteResume(ResumeId),
    ExportResume(ResumeId, ExportFormat),

    // Transient flag resets
    ClearError,
    ClearSuccess,
}
