//! Route authorization
//!
//! A pure decision over a session snapshot. Nothing is cached; evaluate it
//! again whenever the session changes.

use shared::{Identity, Role};

use crate::session::SessionState;

/// Views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    EmployeeDashboard,
    EmployeeHistory,
    ManagerDashboard,
    ManagerTeam,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Login,
        Route::Register,
        Route::EmployeeDashboard,
        Route::EmployeeHistory,
        Route::ManagerDashboard,
        Route::ManagerTeam,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::EmployeeDashboard => "/employee/dashboard",
            Route::EmployeeHistory => "/employee/history",
            Route::ManagerDashboard => "/manager/dashboard",
            Route::ManagerTeam => "/manager/all",
        }
    }

    /// Exact path match, ignoring a trailing slash
    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Roles allowed to see this view; empty for public views
    pub fn permitted_roles(&self) -> &'static [Role] {
        match self {
            Route::Login | Route::Register => &[],
            Route::EmployeeDashboard | Route::EmployeeHistory => &[Role::Employee],
            Route::ManagerDashboard | Route::ManagerTeam => &[Role::Manager],
        }
    }

    pub fn is_public(&self) -> bool {
        self.permitted_roles().is_empty()
    }
}

/// Per-role landing view and navigation
pub trait RoleRoutes {
    fn home(&self) -> Route;
    fn nav_routes(&self) -> &'static [Route];
}

impl RoleRoutes for Role {
    fn home(&self) -> Route {
        match self {
            Role::Employee => Route::EmployeeDashboard,
            Role::Manager => Route::ManagerDashboard,
        }
    }

    fn nav_routes(&self) -> &'static [Route] {
        match self {
            Role::Employee => &[Route::EmployeeDashboard, Route::EmployeeHistory],
            Role::Manager => &[Route::ManagerDashboard, Route::ManagerTeam],
        }
    }
}

/// Result of evaluating a view request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    RedirectToLogin,
    /// Authenticated but not permitted; go to the role's landing view
    RedirectToRoleHome(Route),
}

impl RouteDecision {
    /// Where to navigate, if anywhere
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            RouteDecision::Render => None,
            RouteDecision::RedirectToLogin => Some(Route::Login.path()),
            RouteDecision::RedirectToRoleHome(route) => Some(route.path()),
        }
    }
}

/// Decide whether a view permitted to `permitted` may render for `identity`
pub fn authorize(identity: Option<&Identity>, permitted: &[Role]) -> RouteDecision {
    match identity {
        None => RouteDecision::RedirectToLogin,
        Some(identity) if !permitted.contains(&identity.role) => {
            RouteDecision::RedirectToRoleHome(identity.role.home())
        }
        Some(_) => RouteDecision::Render,
    }
}

/// Resolve a path against the route table.
///
/// Public views always render; `/` and unknown paths go to login.
pub fn resolve(path: &str, session: &SessionState) -> RouteDecision {
    match Route::from_path(path) {
        Some(route) if route.is_public() => RouteDecision::Render,
        Some(route) => authorize(session.identity.as_ref(), route.permitted_roles()),
        None => RouteDecision::RedirectToLogin,
    }
}
