use crate::domain::{ActionStatus, AppState, BootState, Route, SessionState};

/// What a protected view should do, derived solely from the session
/// container. The guard performs no independent credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session restoration still in flight: render a wait indicator,
    /// do not redirect yet.
    Wait,
    RedirectToLogin,
    Render,
}

pub fn is_protected(route: &Route) -> bool {
    match route {
        Route::Home | Route::Login | Route::Register => false,
        Route::Dashboard
        | Route::ProfileSetup
        | Route::ResumeList
        | Route::ResumeDetail(_)
        | Route::ResumeCreate => true,
    }
}

fn auth_in_flight(session: &SessionState) -> bool {
    [
        session.register_status,
        session.login_status,
        session.logout_status,
        session.profile_status,
    ]
    .iter()
    .any(|s| *s == ActionStatus::Loading)
}

pub fn guard_route(state: &AppState, route: &Route) -> RouteDecision {
    if !is_protected(route) {
        return RouteDecision::Render;
    }
    if state.boot == BootState::Restoring || auth_in_flight(&state.session) {
        return RouteDecision::Wait;
    }
    if !state.session.authenticated {
        return RouteDecision::RedirectToLogin;
    }
    RouteDecision::Render
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_protected_route_redirects_to_login() {
        let mut state = AppState::default();
        state.boot = BootState::Ready;
        assert_eq!(
            guard_route(&state, &Route::Dashboard),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(
            guard_route(&state, &Route::ResumeDetail("r1".into())),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn restoring_session_waits_instead_of_redirecting() {
        let state = AppState::default();
        assert_eq!(guard_route(&state, &Route::ResumeList), RouteDecision::Wait);
    }

    #[test]
    fn in_flight_auth_request_waits_instead_of_redirecting() {
        let mut state = AppState::default();
        state.boot = BootState::Ready;
        state.session.login_status = ActionStatus::Loading;
        assert_eq!(guard_route(&state, &Route::Dashboard), RouteDecision::Wait);
    }

    #[test]
    fn authenticated_protected_route_renders() {
        let mut state = AppState::default();
        state.boot = BootState::Ready;
        state.session.authenticated = true;
        assert_eq!(guard_route(&state, &Route::Dashboard), RouteDecision::Render);
    }

    #[test]
    fn public_routes_render_regardless_of_session() {
        let state = AppState::default();
        assert_eq!(guard_route(&state, &Route::Login), RouteDecision::Render);
        assert_eq!(guard_route(&state, &Route::Home), RouteDecision::Render);
    }
}
