use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::profile::UserProfile;
use crate::resume::ResumeRecord;

/// Response envelope for the auth endpoints (`/v1/signup`, `/v1/login`,
/// `/v1/logout`, `/v1/me`, `/v1/profile/*`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    // The service reports errors either as a string or a field map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(rename = "userInfo", default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthEnvelope {
    /// Flatten the string-or-object error field for logging.
    pub fn error_text(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// `resumeInfo` arrives as a single record from create/get-one and as an
/// array from the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResumePayload {
    One(ResumeRecord),
    Many(Vec<ResumeRecord>),
}

impl ResumePayload {
    pub fn into_vec(self) -> Vec<ResumeRecord> {
        match self {
            ResumePayload::One(r) => vec![r],
            ResumePayload::Many(rs) => rs,
        }
    }

    pub fn into_one(self) -> Option<ResumeRecord> {
        match self {
            ResumePayload::One(r) => Some(r),
            ResumePayload::Many(rs) => rs.into_iter().next(),
        }
    }
}

/// Response envelope for the resume endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(
        rename = "resumeInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resume_info: Option<ResumePayload>,
}

impl ResumeEnvelope {
    /// Flatten the string-or-object error field for logging.
    pub fn error_text(&self) -> Option<String> {
        match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// The export endpoints return a bare download link object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLink {
    pub url: String,
}
