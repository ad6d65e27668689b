pub mod envelope;
pub mod profile;
pub mod resume;
pub mod validate;

// Re-exports for convenience
pub use envelope::{AuthEnvelope, ExportLink, ResumeEnvelope, ResumePayload};
pub use profile::{LoginForm, ProfileForm, SignupForm, UserProfile};
pub use resume::{ExportFormat, ResumeForm, ResumeId, ResumeRecord};
pub use validate::FormError;
