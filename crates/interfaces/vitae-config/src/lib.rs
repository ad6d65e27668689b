//! Central configuration constants for the resume-service client.

/// Base URL used when neither the CLI flag nor the environment provides one.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable consulted for the API base URL.
pub const API_BASE_URL_ENV: &str = "VITAE_API_BASE_URL";

/// Timeout applied to every outbound request.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Delay before the post-delete reconciliation fetch of the resume list.
pub const DELETE_RECONCILE_DELAY_MS: u64 = 1_000;

/// Capacity of the kernel's domain-event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Resolve the API base URL: explicit value, then environment, then default.
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    if let Some(url) = explicit {
        return url.trim_end_matches('/').to_string();
    }
    match std::env::var(API_BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
        _ => DEFAULT_API_BASE_URL.to_string(),
    }
}
