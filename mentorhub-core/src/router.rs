//! Paths of the app and the seam through which the core navigates.

use core::fmt::{self, Display};
use core::str::FromStr;
use std::sync::Mutex;

use mentorhub_store::SettingsStore;
use tracing::debug;

use crate::error::AppError;
use crate::role::{Role, RoleState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Onboarding,
    OnboardingRole,
    OnboardingProfile,
    SelectRole,
    Profile,
    /// Picks the dashboard from the stored role.
    Dashboard,
    RoleDashboard(Role),
    Matches,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Onboarding => "/onboarding",
            Self::OnboardingRole => "/onboarding/role",
            Self::OnboardingProfile => "/onboarding/profile",
            Self::SelectRole => "/select-role",
            Self::Profile => "/profile",
            Self::Dashboard => "/dashboard",
            Self::RoleDashboard(Role::Mentor) => "/dashboard/mentor",
            Self::RoleDashboard(Role::Mentee) => "/dashboard/mentee",
            Self::RoleDashboard(Role::Both) => "/dashboard/both",
            Self::Matches => "/matches",
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim_end_matches('/');
        Ok(match trimmed {
            "" => Self::Landing,
            "/onboarding" => Self::Onboarding,
            "/onboarding/role" => Self::OnboardingRole,
            "/onboarding/profile" => Self::OnboardingProfile,
            "/select-role" => Self::SelectRole,
            "/profile" => Self::Profile,
            "/dashboard" => Self::Dashboard,
            "/matches" => Self::Matches,
            other => match other.strip_prefix("/dashboard/") {
                Some(role) => Self::RoleDashboard(
                    role.parse()
                        .map_err(|_| AppError::UnknownRoute(path.to_owned()))?,
                ),
                None => return Err(AppError::UnknownRoute(path.to_owned())),
            },
        })
    }
}

pub trait Navigator {
    fn push(&self, route: Route);
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn push(&self, route: Route) {
        (**self).push(route);
    }
}

/// Remembers every navigation instead of performing it.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Route> {
        self.history().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: Route) {
        debug!("navigate to {route}");
        self.history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(route);
    }
}

/// Where `/dashboard` leads: the role's dashboard, or role selection when no
/// role is stored yet.
pub fn resolve_dashboard(store: &impl SettingsStore) -> Result<Route, AppError> {
    Ok(match RoleState::load(store)?.role {
        Some(role) => Route::RoleDashboard(role),
        None => Route::SelectRole,
    })
}

/// Resolves `/dashboard` to a concrete dashboard, other routes stay as they are.
pub fn resolve(store: &impl SettingsStore, route: Route) -> Result<Route, AppError> {
    match route {
        Route::Dashboard => resolve_dashboard(store),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use mentorhub_store::{keys, MemoryStore};

    use super::{resolve, resolve_dashboard, Route};
    use crate::error::AppError;
    use crate::role::Role;

    #[test]
    fn paths_parse_back() -> Result<(), AppError> {
        for route in [
            Route::Landing,
            Route::Onboarding,
            Route::OnboardingRole,
            Route::OnboardingProfile,
            Route::SelectRole,
            Route::Profile,
            Route::Dashboard,
            Route::RoleDashboard(Role::Mentor),
            Route::RoleDashboard(Role::Mentee),
            Route::RoleDashboard(Role::Both),
            Route::Matches,
        ] {
            assert_eq!(route.path().parse::<Route>()?, route);
        }
        assert_eq!("/matches/".parse::<Route>()?, Route::Matches);
        assert!(matches!(
            "/dashboard/admin".parse::<Route>(),
            Err(AppError::UnknownRoute(_))
        ));
        assert!(matches!(
            "/showcase".parse::<Route>(),
            Err(AppError::UnknownRoute(_))
        ));
        Ok(())
    }

    #[test]
    fn dashboard_without_role_goes_to_role_selection() -> Result<(), AppError> {
        assert_eq!(resolve_dashboard(&MemoryStore::new())?, Route::SelectRole);
        let store = MemoryStore::with_entries([(keys::CURRENT_ROLE, "mentor")]);
        assert_eq!(
            resolve(&store, Route::Dashboard)?,
            Route::RoleDashboard(Role::Mentor)
        );
        assert_eq!(resolve(&store, Route::Matches)?, Route::Matches);
        Ok(())
    }
}
