//! Walks through onboarding and the mentor feed against the configured store.
//!
//! `cargo run -p mentorhub-e2e`

use std::sync::Arc;

use mentorhub_config::{get_config, ConfigError};
use mentorhub_core::router::resolve;
use mentorhub_core::{
    initial_mentors, AppError, DiscoveryFeed, LoadOutcome, MenteeDashboard, MentorDashboard,
    MockMentorSource, MultiField, PreferenceForm, PreferenceStorage, RecordingNavigator, Role,
    Route, Theme, Wizard, WizardLayout,
};
use mentorhub_store::{FileStore, StoreError};
use mentorhub_telemetry::{setup_telemetry, TelemetryError};
use tracing::info;

#[derive(thiserror::Error, Debug)]
enum WalkthroughError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error("failed to print the saved record {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> Result<(), WalkthroughError> {
    let config = get_config()?;
    setup_telemetry(config.log_filter.as_deref())?;

    let store = Arc::new(FileStore::open(&config.store_path)?);
    info!("using store {}", store.path().display());
    let theme = Theme::load(&store, false)?;
    info!("theme is {theme}");

    let navigator = RecordingNavigator::default();
    let mut wizard = Wizard::open(Arc::clone(&store), &navigator, WizardLayout::ONBOARDING)?;
    wizard.choose_role(Role::Mentor)?;
    wizard.next()?;
    wizard.toggle(MultiField::Regions, "europe")?;
    wizard.toggle(MultiField::Languages, "english")?;
    wizard.next()?;
    wizard.toggle(MultiField::Functions, "technology")?;
    wizard.next()?;
    wizard.toggle(MultiField::Strengths, "mentoring")?;
    wizard.set_max_mentees("4")?;
    wizard.next()?;
    for line in wizard.review() {
        info!("{line}");
    }
    let record = wizard.finish()?;
    info!("saved {}", serde_json::to_string(&record)?);

    let dashboard = resolve(&store, Route::Dashboard)?;
    info!(
        "navigated to {:?}, dashboard resolves to {dashboard}",
        navigator.history()
    );

    let mut mentor_dashboard = MentorDashboard::seeded();
    mentor_dashboard.remove_mentee(3);
    info!("active mentees {}", mentor_dashboard.active_mentees());
    let mut form =
        PreferenceForm::open_with(Arc::clone(&store), Role::Mentee, PreferenceStorage::PerRole)?;
    form.toggle(MultiField::LearningGoals, "career-growth")?;
    form.save()?;
    info!("saved {}", form.key());
    let directory = MenteeDashboard::seeded();
    let search = directory.search("analytics");
    info!(
        "analytics: {} assigned, {} available",
        search.assigned.len(),
        search.available.len()
    );

    let feed = DiscoveryFeed::new(
        MockMentorSource::new(&config.feed),
        initial_mentors(),
        &config.feed,
    );
    loop {
        match feed.load_more().await {
            LoadOutcome::Loaded { page, appended } => info!("page {page}: {appended} mentors"),
            LoadOutcome::Failed => continue,
            LoadOutcome::Skipped(_) | LoadOutcome::Discarded => break,
        }
    }
    info!("{} mentors in the feed", feed.len());
    for mentor in feed.filtered("Leadership") {
        info!("{} ({}) {:.0}% match", mentor.name, mentor.title, mentor.match_score);
    }
    Ok(())
}
