// cargo test -p mentorhub-e2e --test integration
use std::sync::Arc;

use mentorhub_config::FeedConfig;
use mentorhub_core::router::resolve;
use mentorhub_core::{
    initial_mentors, spawn_load_trigger, AppError, DiscoveryFeed, MaxMentees, MockMentorSource,
    MultiField, PreferenceForm, PreferenceRecord, RecordingNavigator, Role, RoleState, Route,
    Wizard, WizardLayout, WizardStep,
};
use mentorhub_store::{keys, FileStore, SettingsStore as _};
use tokio::sync::watch;

#[test]
fn onboarding_survives_a_restart() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("store.json");
    let navigator = RecordingNavigator::default();

    {
        let store = FileStore::open(&path)?;
        let mut wizard = Wizard::open(&store, &navigator, WizardLayout::ONBOARDING)?;
        assert_eq!(wizard.step(), WizardStep::SelectRole);
        assert!(matches!(wizard.next(), Err(AppError::RoleRequired)));

        wizard.choose_role(Role::Mentor)?;
        assert_eq!(wizard.next()?, WizardStep::Location);
        wizard.toggle(MultiField::Regions, "north-america")?;
        wizard.toggle(MultiField::Languages, "other")?;
        wizard.set_other_languages("Portuguese");
        wizard.next()?;
        wizard.toggle(MultiField::Functions, "operations")?;
        wizard.next()?;
        wizard.toggle(MultiField::Strengths, "leadership")?;
        assert!(wizard.set_max_mentees("11").is_err());
        wizard.set_max_mentees("2")?;
        assert_eq!(wizard.next()?, WizardStep::Review);
        wizard.set_additional_info("Happy to help new leads");
        wizard.finish()?;
    }

    let store = Arc::new(FileStore::open(&path)?);
    let record = PreferenceRecord::load(&store)?;
    assert_eq!(record.regions, ["north-america"]);
    assert_eq!(record.other_languages, "Portuguese");
    assert_eq!(record.max_mentees, Some(MaxMentees::new(2)?));
    assert_eq!(store.get(keys::SELECTED_ROLE)?.as_deref(), Some("mentor"));
    assert_eq!(navigator.last(), Some(Route::RoleDashboard(Role::Mentor)));

    // the wizard does not pick a dashboard role, the role page does
    assert_eq!(RoleState::load(&store)?.role, None);
    assert_eq!(resolve(&store, Route::Dashboard)?, Route::SelectRole);
    mentorhub_core::role::select_role(&store, &navigator, Role::Mentor)?;
    assert_eq!(
        resolve(&store, Route::Dashboard)?,
        Route::RoleDashboard(Role::Mentor)
    );

    let mut form = PreferenceForm::open(Arc::clone(&store), Role::Mentor)?;
    form.toggle(MultiField::LearningGoals, "career-growth")?;
    form.save()?;
    let reopened = FileStore::open(&path)?;
    let record = PreferenceRecord::load(&reopened)?;
    assert_eq!(record.learning_goals, ["career-growth"]);
    assert_eq!(record.additional_info, "Happy to help new leads");
    Ok(())
}

#[tokio::test]
async fn visible_sentinel_pages_through_the_feed() {
    let config = FeedConfig {
        page_size: 4,
        last_page: 1,
        id_base: 100,
    };
    let feed = DiscoveryFeed::new(
        MockMentorSource::seeded(&config, 11),
        initial_mentors(),
        &config,
    );
    let (sentinel, visibility) = watch::channel(true);
    let trigger = spawn_load_trigger(feed.clone(), visibility);

    while feed.has_more() {
        tokio::task::yield_now().await;
        let _ = sentinel.send(true);
    }
    assert!(trigger.await.is_ok());

    assert_eq!(feed.len(), 6 + 2 * 4);
    assert_eq!(feed.page(), 3);
    let ids: Vec<u64> = feed.records().iter().skip(6).map(|mentor| mentor.id).collect();
    assert_eq!(ids, [104, 105, 106, 107, 108, 109, 110, 111]);
}
