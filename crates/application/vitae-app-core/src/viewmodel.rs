use chrono::{DateTime, Utc};

use crate::domain::{ActionStatus, AppState, ExportReadout};
use vitae_core::ResumeRecord;

fn format_created(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(t) => t.format("%b %-d, %Y").to_string(),
        None => "unknown".into(),
    }
}

#[derive(Debug, Clone)]
pub struct ResumeRowVm {
    pub id: String,
    pub title: String,
    pub owner: String,
    pub email: String,
    pub created_human: String,
}

impl From<&ResumeRecord> for ResumeRowVm {
    fn from(r: &ResumeRecord) -> Self {
        Self {
            id: r.id.clone(),
            title: r.title.clone(),
            owner: r.name.clone(),
            email: r.email.clone(),
            created_human: format_created(r.created_at),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResumeListVm {
    pub rows: Vec<ResumeRowVm>,
    pub total: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub message: String,
}

fn matches(record: &ResumeRecord, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    record.title.to_lowercase().contains(&needle)
        || record.name.to_lowercase().contains(&needle)
        || record.email.to_lowercase().contains(&needle)
}

/// Rows for the list view, optionally narrowed by a case-insensitive
/// search over title, owner name, and email.
pub fn resume_list_vm(state: &AppState, search: Option<&str>) -> ResumeListVm {
    let rows = state
        .resumes
        .items
        .iter()
        .filter(|r| match search {
            Some(needle) if !needle.trim().is_empty() => matches(r, needle.trim()),
            _ => true,
        })
        .map(ResumeRowVm::from)
        .collect();

    ResumeListVm {
        rows,
        total: state.resumes.items.len(),
        loading: state.resumes.loading,
        error: state.resumes.error.clone(),
        message: state.resumes.message.clone(),
    }
}

#[derive(Debug, Clone)]
pub struct SessionVm {
    pub signed_in: bool,
    pub label: String,
    pub busy: bool,
}

pub fn session_vm(state: &AppState) -> SessionVm {
    let session = &state.session;
    let label = match &session.current_user {
        Some(user) if session.authenticated => format!("{} <{}>", user.name, user.email),
        _ => "Not signed in".into(),
    };
    let busy = [
        session.register_status,
        session.login_status,
        session.logout_status,
        session.profile_status,
    ]
    .iter()
    .any(|s| *s == ActionStatus::Loading);

    SessionVm {
        signed_in: session.authenticated,
        label,
        busy,
    }
}

#[derive(Debug, Clone)]
pub struct ExportVm {
    pub resume_id: String,
    pub format_label: &'static str,
    pub url: String,
}

pub fn export_vm(readout: &ExportReadout) -> ExportVm {
    ExportVm {
        resume_id: readout.resume_id.clone(),
        format_label: readout.format.label(),
        url: readout.link.url.clone(),
    }
}
