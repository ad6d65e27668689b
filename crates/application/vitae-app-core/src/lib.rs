pub mod app_core;
pub mod domain;
pub mod guard;
pub mod kernel;
pub mod persistence;
pub mod ports;
pub mod viewmodel;

pub use app_core::*;
pub use domain::{
    ActionStatus, AppState, AuthAction, BootState, ExportReadout, ResumeState, Route,
    SessionState, StoredSession,
};
pub use guard::{guard_route, is_protected, RouteDecision};
pub use kernel::AppKernel;
pub use persistence::SessionFilePersistence;
pub use ports::{ResumeServicePort, SessionCachePort};
pub use viewmodel::*;
