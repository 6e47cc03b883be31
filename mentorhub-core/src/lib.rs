//! Client core of MentorHub: the onboarding wizard, role routing, the
//! dashboards with their preference form, and the mentor discovery feed.
//! Everything that persists goes through an injected [`SettingsStore`].

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod multi_select;
pub mod preference_form;
pub mod preferences;
pub mod profile;
pub mod role;
pub mod router;
pub mod theme;
pub mod trigger;
pub mod wizard;

pub use mentorhub_store::SettingsStore;

pub use crate::dashboard::{MenteeDashboard, MentorDashboard, Roster};
pub use crate::error::{AppError, FetchError};
pub use crate::feed::{
    initial_mentors, CandidateRecord, DiscoveryFeed, LoadOutcome, MockMentorSource, PageSource,
    SkipReason,
};
pub use crate::preference_form::{PreferenceForm, PreferenceStorage};
pub use crate::preferences::{MaxMentees, MultiField, PreferenceRecord};
pub use crate::profile::UserProfile;
pub use crate::role::{Role, RoleState};
pub use crate::router::{Navigator, RecordingNavigator, Route};
pub use crate::theme::Theme;
pub use crate::trigger::spawn_load_trigger;
pub use crate::wizard::{Field, Wizard, WizardLayout, WizardStep};
