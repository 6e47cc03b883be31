//! Names of the persisted keys. These are shared between independent
//! flows, so they must not drift.

/// Role picked on the onboarding role step. Read back by the profile wizard.
pub const SELECTED_ROLE: &str = "selectedRole";
pub const USER_ROLE: &str = "userRole";
/// Role whose dashboard is shown. Written by role selection and the role switcher.
pub const CURRENT_ROLE: &str = "currentRole";
/// `"true"` or `"false"`.
pub const HAS_MULTIPLE_ROLES: &str = "hasMultipleRoles";
/// JSON preference record written by the wizard and the preference form.
pub const PROFILE_DATA: &str = "profileData";
/// JSON profile page record.
pub const USER_PROFILE: &str = "userProfile";
pub const THEME: &str = "theme";

/// Per-role JSON preference record of the dashboard form, e.g. `mentorPreferences`.
#[must_use]
pub fn role_preferences(role: &str) -> String {
    format!("{role}Preferences")
}
