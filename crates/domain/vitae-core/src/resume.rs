use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ResumeId = String;

/// One generated resume document as the service stores it.
///
/// The wire format uses the service's historical field names
/// (`professionalsummary`, `workexperience`, `resumeText`), so the renames
/// here are load-bearing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: ResumeId,
    pub title: String,
    pub name: String,
    pub email: String,
    #[serde(
        rename = "professionalsummary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub professional_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(
        rename = "workexperience",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub work_experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(rename = "resumeText", default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Submission payload for `POST /v1/resume/create`. The server assigns the
/// id and `createdAt` and composes `resumeText`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeForm {
    pub title: String,
    pub name: String,
    pub email: String,
    #[serde(
        rename = "professionalsummary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub professional_summary: Option<String>,
    pub skills: String,
    #[serde(rename = "workexperience")]
    pub work_experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<String>,
    pub education: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
}

/// Which download the export endpoints should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Word,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Word => "Word",
        }
    }
}
