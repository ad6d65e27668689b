use crate::domain::{AuthAction, ExportReadout, Route};
use vitae_core::{ResumeId, ResumeRecord, UserProfile};

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Boot / session restoration
    SessionRestored { user: UserProfile },
    SessionVerified { user: UserProfile },
    SessionInvalid,
    BootFinished,

    // Navigation
    RouteChanged(Route),

    // Auth lifecycle
    AuthStarted(AuthAction),
    AuthSucceeded {
        action: AuthAction,
        user: Option<UserProfile>,
        message: String,
    },
    AuthFailed {
        action: AuthAction,
        message: String,
    },

    // Resume resource
    ResumeRequestStarted,
    ResumeCreated {
        record: Option<ResumeRecord>,
        message: String,
    },
    ResumeListLoaded {
        items: Vec<ResumeRecord>,
        message: String,
    },
    ResumeFetched {
        record: Option<ResumeRecord>,
        message: String,
    },
    ResumeDeleted {
        id: ResumeId,
        message: String,
    },
    ExportReady {
        readout: ExportReadout,
        message: String,
    },
    ResumeFailed {
        message: String,
    },

    // Transient flag resets
    ErrorCleared,
    SuccessCleared,
}
