use crate::domain::{ActionStatus, AppState, AuthAction, BootState};

use super::events::DomainEvent;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        // --- Boot / session restoration ---
        DomainEvent::SessionRestored { user } => {
            state.session.authenticated = true;
            state.session.current_user = Some(user);
        }

        DomainEvent::SessionVerified { user } => {
            state.session.authenticated = true;
            state.session.current_user = Some(user);
        }

        DomainEvent::SessionInvalid => {
            state.session.clear_user();
        }

        DomainEvent::BootFinished => {
            state.boot = BootState::Ready;
        }

        // --- Navigation ---
        DomainEvent::RouteChanged(r) => state.route = r,

        // --- Auth lifecycle ---
        DomainEvent::AuthStarted(action) => {
            state.session.set_status(action, ActionStatus::Loading);
            state.session.last_error = None;
        }

        DomainEvent::AuthSucceeded {
            action,
            user,
            message,
        } => {
            state.session.set_status(action, ActionStatus::Succeeded);
            state.session.last_message = message;
            match action {
                AuthAction::Register | AuthAction::Login => {
                    state.session.authenticated = user.is_some();
                    state.session.current_user = user;
                }
                AuthAction::Profile => {
                    // Replaced wholesale, never field-patched.
                    if user.is_some() {
                        state.session.current_user = user;
                    }
                }
                AuthAction::Logout => {
                    state.session.clear_user();
                }
            }
        }

        DomainEvent::AuthFailed { action, message } => {
            state.session.set_status(action, ActionStatus::Failed);
            state.session.last_error = Some(message);
            match action {
                // A rejected login leaves no half-authenticated session;
                // a failed logout still signs the client out.
                AuthAction::Login | AuthAction::Logout => state.session.clear_user(),
                AuthAction::Register | AuthAction::Profile => {}
            }
        }

        // --- Resume resource ---
        DomainEvent::ResumeRequestStarted => {
            state.resumes.loading = true;
            state.resumes.error = None;
        }

        DomainEvent::ResumeCreated { record, message } => {
            state.resumes.loading = false;
            state.resumes.success = true;
            state.resumes.message = message;
            // No optimistic append: the collection only sees the new
            // record on the next list fetch.
            state.resumes.selected = record;
        }

        DomainEvent::ResumeListLoaded { items, message } => {
            state.resumes.loading = false;
            state.resumes.success = true;
            state.resumes.error = None;
            state.resumes.message = message;
            state.resumes.items = items;
        }

        DomainEvent::ResumeFetched { record, message } => {
            state.resumes.loading = false;
            state.resumes.success = true;
            state.resumes.error = None;
            state.resumes.message = message;
            state.resumes.selected = record;
        }

        DomainEvent::ResumeDeleted { id, message } => {
            state.resumes.loading = false;
            state.resumes.success = true;
            state.resumes.message = message;
            // The delete response is authoritative for local removal; the
            // later list refresh is reconciliation only.
            state.resumes.items.retain(|r| r.id != id);
            if state
                .resumes
                .selected
                .as_ref()
                .is_some_and(|r| r.id == id)
            {
                state.resumes.selected = None;
            }
        }

        DomainEvent::ExportReady { readout, message } => {
            state.resumes.loading = false;
            state.resumes.success = true;
            state.resumes.message = message;
            state.resumes.export = Some(readout);
        }

        DomainEvent::ResumeFailed { message } => {
            state.resumes.loading = false;
            state.resumes.error = Some(message);
        }

        // --- Transient flag resets ---
        DomainEvent::ErrorCleared => {
            state.session.last_error = None;
            state.resumes.error = None;
        }

        DomainEvent::SuccessCleared => {
            state.resumes.success = false;
            state.resumes.message.clear();
            state.session.last_message.clear();
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_core::{ResumeRecord, UserProfile};

    fn record(id: &str, title: &str) -> ResumeRecord {
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

    #[test]
    fn login_success_sets_authenticated_and_user() {
        let state = reduce(AppState::default(), DomainEvent::AuthStarted(AuthAction::Login));
        assert_eq!(state.session.login_status, ActionStatus::Loading);

        let state = reduce(
            state,
            DomainEvent::AuthSucceeded {
                action: AuthAction::Login,
                user: Some(UserProfile::new("Ada", "ada@example.com")),
                message: "Login successful".into(),
            },
        );
        assert!(state.session.authenticated);
        assert_eq!(state.session.current_user.unwrap().name, "Ada");
        assert_eq!(state.session.login_status, ActionStatus::Succeeded);
    }

    #[test]
    fn login_failure_leaves_session_unauthenticated_with_error() {
        let state = reduce(
            AppState::default(),
            DomainEvent::AuthFailed {
                action: AuthAction::Login,
                message: "Login failed".into(),
            },
        );
        assert!(!state.session.authenticated);
        assert!(state.session.current_user.is_none());
        assert_eq!(state.session.last_error.as_deref(), Some("Login failed"));
    }

    #[test]
    fn logout_clears_session_even_on_failure() {
        let mut state = AppState::default();
        state.session.authenticated = true;
        state.session.current_user = Some(UserProfile::new("Ada", "ada@example.com"));

        let state = reduce(
            state,
            DomainEvent::AuthFailed {
                action: AuthAction::Logout,
                message: "Logout failed".into(),
            },
        );
        assert!(!state.session.authenticated);
        assert!(state.session.current_user.is_none());
    }

    #[test]
    fn list_replaces_collection_wholesale() {
        let state = reduce(
            AppState::default(),
            DomainEvent::ResumeListLoaded {
                items: vec![record("r1", "Backend"), record("r2", "Frontend")],
                message: "All CVs fetched".into(),
            },
        );
        assert_eq!(state.resumes.items.len(), 2);

        // A second fetch with a different payload supersedes, never merges.
        let state = reduce(
            state,
            DomainEvent::ResumeListLoaded {
                items: vec![record("r3", "SRE")],
                message: "All CVs fetched".into(),
            },
        );
        assert_eq!(state.resumes.items.len(), 1);
        assert_eq!(state.resumes.items[0].id, "r3");
    }

    #[test]
    fn create_confirms_success_without_touching_the_collection() {
        let mut state = AppState::default();
        state.resumes.items = vec![record("r1", "Backend")];

        let state = reduce(
            state,
            DomainEvent::ResumeCreated {
                record: Some(record("r2", "Frontend")),
                message: "Resume created successfully".into(),
            },
        );
        assert_eq!(state.resumes.items.len(), 1, "no optimistic append");
        assert_eq!(state.resumes.selected.as_ref().unwrap().id, "r2");
        assert!(state.resumes.success);
    }

    #[test]
    fn clearing_transient_flags_resets_both_containers() {
        let mut state = AppState::default();
        state.session.last_error = Some("Login failed".into());
        state.resumes.error = Some("Failed to fetch resumes".into());
        state.resumes.success = true;
        state.resumes.message = "All resumes fetched".into();

        let state = reduce(state, DomainEvent::ErrorCleared);
        assert!(state.session.last_error.is_none());
        assert!(state.resumes.error.is_none());

        let state = reduce(state, DomainEvent::SuccessCleared);
        assert!(!state.resumes.success);
        assert!(state.resumes.message.is_empty());
    }

    #[test]
    fn delete_success_removes_the_record_immediately() {
        let mut state = AppState::default();
        state.resumes.items = vec![record("r1", "Backend"), record("r2", "Frontend")];
        state.resumes.selected = Some(record("r1", "Backend"));

        let state = reduce(
            state,
            DomainEvent::ResumeDeleted {
                id: "r1".into(),
                message: "Document deleted successfully".into(),
            },
        );
        assert_eq!(state.resumes.items.len(), 1);
        assert_eq!(state.resumes.items[0].id, "r2");
        assert!(state.resumes.selected.is_none());
    }
}
