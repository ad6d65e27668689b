pub mod api;
pub mod error;

// Re-exports for convenience
pub use api::{default_http_client, ApiClient};
pub use error::ApiError;
