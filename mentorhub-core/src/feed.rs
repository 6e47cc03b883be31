//! The mentor discovery feed.
//!
//! A list seeded with a few mentors that grows one page at a time. At most one
//! page is in flight: [`DiscoveryFeed::load_more`] checks and raises the
//! loading flag in the same critical section, so a second call while a fetch
//! is pending is a no-op instead of a duplicate page.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mentorhub_config::FeedConfig;
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::error::FetchError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    /// Unique within a feed, used as the render key.
    pub id: u64,
    pub name: String,
    pub title: String,
    pub expertise: Vec<String>,
    pub regions: Vec<String>,
    pub languages: Vec<String>,
    /// Out of five.
    pub rating: f32,
    /// Cosmetic, between 0 and 100.
    pub match_score: f32,
}

/// Where pages come from. Page numbers start at one.
pub trait PageSource {
    fn fetch_page(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<Vec<CandidateRecord>, FetchError>> + Send;
}

impl<T: PageSource + Sync + ?Sized> PageSource for Arc<T> {
    fn fetch_page(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<Vec<CandidateRecord>, FetchError>> + Send {
        (**self).fetch_page(page)
    }
}

fn candidate(
    id: u64,
    name: &str,
    title: &str,
    expertise: &[&str],
    region: &str,
    rating: f32,
    match_score: f32,
) -> CandidateRecord {
    CandidateRecord {
        id,
        name: name.to_owned(),
        title: title.to_owned(),
        expertise: expertise.iter().map(|&tag| tag.to_owned()).collect(),
        regions: vec![region.to_owned()],
        languages: vec!["English".to_owned()],
        rating,
        match_score,
    }
}

struct Seed {
    id: u64,
    name: &'static str,
    title: &'static str,
    expertise: [&'static str; 3],
    region: &'static str,
    rating: f32,
    match_score: f32,
}

const SEEDS: [Seed; 6] = [
    Seed {
        id: 1,
        name: "James Wilson",
        title: "VP Product Strategy",
        expertise: ["Product", "Strategy", "Leadership"],
        region: "North America",
        rating: 4.9,
        match_score: 92.0,
    },
    Seed {
        id: 2,
        name: "Sarah Mitchell",
        title: "Chief Technology Officer",
        expertise: ["Technology", "Engineering", "Innovation"],
        region: "Europe",
        rating: 4.8,
        match_score: 88.0,
    },
    Seed {
        id: 3,
        name: "Robert Chen",
        title: "Director of Operations",
        expertise: ["Operations", "Process", "Analytics"],
        region: "Asia Pacific",
        rating: 4.7,
        match_score: 85.0,
    },
    Seed {
        id: 4,
        name: "Emma Rodriguez",
        title: "Head of People",
        expertise: ["HR", "Talent", "Culture"],
        region: "North America",
        rating: 4.9,
        match_score: 83.0,
    },
    Seed {
        id: 5,
        name: "Michael Thompson",
        title: "Finance Director",
        expertise: ["Finance", "FP&A", "Business"],
        region: "Europe",
        rating: 4.6,
        match_score: 81.0,
    },
    Seed {
        id: 6,
        name: "Lisa Kumar",
        title: "Marketing Leader",
        expertise: ["Marketing", "Brand", "Digital"],
        region: "Asia Pacific",
        rating: 4.8,
        match_score: 79.0,
    },
];

/// The mentors shown before anything is fetched.
#[must_use]
pub fn initial_mentors() -> Vec<CandidateRecord> {
    SEEDS
        .iter()
        .map(|seed| {
            candidate(
                seed.id,
                seed.name,
                seed.title,
                &seed.expertise,
                seed.region,
                seed.rating,
                seed.match_score,
            )
        })
        .collect()
}

/// Expertise filter chips offered above the list. `All` shows everything.
pub const FILTERS: [&str; 5] = ["All", "Product", "Technology", "Operations", "Leadership"];

struct Template {
    title: &'static str,
    expertise: [&'static str; 2],
    region: &'static str,
    rating: (f32, f32),
    match_score: (f32, f32),
}

const TEMPLATES: [Template; 3] = [
    Template {
        title: "Senior Leader",
        expertise: ["Strategy", "Leadership"],
        region: "Remote",
        rating: (4.7, 0.3),
        match_score: (75.0, 20.0),
    },
    Template {
        title: "Industry Expert",
        expertise: ["Technology", "Innovation"],
        region: "Global",
        rating: (4.6, 0.4),
        match_score: (70.0, 25.0),
    },
    Template {
        title: "Executive Coach",
        expertise: ["Leadership", "Growth"],
        region: "Multiple",
        rating: (4.8, 0.2),
        match_score: (80.0, 15.0),
    },
];

/// Synthesizes pages instead of calling a backend. Ids are
/// `id_base + page * page_size + position`, so pages never overlap.
#[derive(Debug)]
pub struct MockMentorSource {
    page_size: usize,
    id_base: u64,
    rng: Mutex<StdRng>,
}

impl MockMentorSource {
    #[must_use]
    pub fn new(config: &FeedConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible scores.
    #[must_use]
    pub fn seeded(config: &FeedConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &FeedConfig, rng: StdRng) -> Self {
        Self {
            page_size: config.page_size,
            id_base: config.id_base,
            rng: Mutex::new(rng),
        }
    }

    fn generate(&self, page: u32) -> Vec<CandidateRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let first = self.id_base + u64::from(page) * self.page_size as u64;
        (0..self.page_size)
            .zip(first..)
            .map(|(position, id)| {
                let template = &TEMPLATES[position % TEMPLATES.len()];
                candidate(
                    id,
                    &format!("Mentor {id}"),
                    template.title,
                    &template.expertise,
                    template.region,
                    template.rating.0 + rng.gen::<f32>() * template.rating.1,
                    template.match_score.0 + rng.gen::<f32>() * template.match_score.1,
                )
            })
            .collect()
    }
}

impl PageSource for MockMentorSource {
    async fn fetch_page(&self, page: u32) -> Result<Vec<CandidateRecord>, FetchError> {
        Ok(self.generate(page))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    InFlight,
    Exhausted,
    Unmounted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { page: u32, appended: usize },
    Skipped(SkipReason),
    /// Logged, the next trigger may retry.
    Failed,
    /// The feed was unmounted while the page was in flight.
    Discarded,
}

#[derive(Debug)]
struct FeedState {
    records: Vec<CandidateRecord>,
    seen: HashSet<u64>,
    /// Next page to fetch.
    page: u32,
    loading: bool,
    has_more: bool,
    mounted: bool,
}

impl FeedState {
    fn append(&mut self, records: Vec<CandidateRecord>) -> usize {
        let before = self.records.len();
        for record in records {
            if self.seen.insert(record.id) {
                self.records.push(record);
            } else {
                warn!("dropping mentor with duplicate id {}", record.id);
            }
        }
        self.records.len() - before
    }
}

/// Clears the loading flag even if the fetch future is dropped halfway.
struct InFlight<'a> {
    state: &'a Mutex<FeedState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.state).loading = false;
    }
}

fn lock(state: &Mutex<FeedState>) -> MutexGuard<'_, FeedState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cheap to clone, clones share the list.
pub struct DiscoveryFeed<S> {
    source: Arc<S>,
    state: Arc<Mutex<FeedState>>,
    last_page: u32,
}

impl<S> Clone for DiscoveryFeed<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            last_page: self.last_page,
        }
    }
}

impl<S: PageSource> DiscoveryFeed<S> {
    pub fn new(source: S, initial: Vec<CandidateRecord>, config: &FeedConfig) -> Self {
        let mut state = FeedState {
            records: Vec::with_capacity(initial.len()),
            seen: HashSet::with_capacity(initial.len()),
            page: 1,
            loading: false,
            has_more: true,
            mounted: true,
        };
        state.append(initial);
        Self {
            source: Arc::new(source),
            state: Arc::new(Mutex::new(state)),
            last_page: config.last_page,
        }
    }

    /// Fetches and appends the next page unless one is already in flight or
    /// the feed is exhausted.
    pub async fn load_more(&self) -> LoadOutcome {
        let page = {
            let mut state = lock(&self.state);
            if !state.mounted {
                return LoadOutcome::Skipped(SkipReason::Unmounted);
            }
            if state.loading {
                debug!("page {} already loading", state.page);
                return LoadOutcome::Skipped(SkipReason::InFlight);
            }
            if !state.has_more {
                return LoadOutcome::Skipped(SkipReason::Exhausted);
            }
            state.loading = true;
            state.page
        };
        let in_flight = InFlight { state: &self.state };

        let result = self.source.fetch_page(page).await;

        let mut state = lock(&self.state);
        if !state.mounted {
            debug!("discarding page {page}, feed is gone");
            drop(state);
            drop(in_flight);
            return LoadOutcome::Discarded;
        }
        let outcome = match result {
            Ok(records) => {
                let appended = state.append(records);
                state.page = page + 1;
                if page > self.last_page {
                    info!("mentor feed exhausted after page {page}");
                    state.has_more = false;
                }
                LoadOutcome::Loaded { page, appended }
            }
            Err(fetch_error) => {
                error!("failed to load mentors page {page}: {fetch_error}");
                LoadOutcome::Failed
            }
        };
        drop(state);
        drop(in_flight);
        outcome
    }
}

impl<S> DiscoveryFeed<S> {
    /// Stops the feed. A page still in flight is thrown away when it arrives.
    pub fn unmount(&self) {
        lock(&self.state).mounted = false;
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        lock(&self.state).mounted
    }

    #[must_use]
    pub fn records(&self) -> Vec<CandidateRecord> {
        lock(&self.state).records.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.state).records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        lock(&self.state).page
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        lock(&self.state).has_more
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Records tagged with `filter`, case-insensitively. `All` and the empty
    /// filter keep everything.
    #[must_use]
    pub fn filtered(&self, filter: &str) -> Vec<CandidateRecord> {
        let state = lock(&self.state);
        if filter.is_empty() || filter.eq_ignore_ascii_case("all") {
            return state.records.clone();
        }
        state
            .records
            .iter()
            .filter(|record| {
                record
                    .expertise
                    .iter()
                    .any(|tag| tag.eq_ignore_ascii_case(filter))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use mentorhub_config::FeedConfig;
    use tokio::sync::Notify;

    use super::{
        initial_mentors, CandidateRecord, DiscoveryFeed, LoadOutcome, MockMentorSource,
        PageSource, SkipReason,
    };
    use crate::error::FetchError;

    fn mock_feed() -> DiscoveryFeed<MockMentorSource> {
        let config = FeedConfig::default();
        DiscoveryFeed::new(MockMentorSource::seeded(&config, 7), initial_mentors(), &config)
    }

    #[tokio::test]
    async fn three_pages_then_exhausted() {
        let feed = mock_feed();
        let initial = feed.len();
        assert_eq!(initial, 6);

        for expected in 1..=3 {
            assert_eq!(feed.load_more().await, LoadOutcome::Loaded {
                page: expected,
                appended: 3,
            });
        }
        assert_eq!(feed.len(), initial + 9);
        assert_eq!(feed.page(), 4);
        assert!(feed.has_more());

        assert!(matches!(feed.load_more().await, LoadOutcome::Loaded { page: 4, .. }));
        assert!(!feed.has_more());
        let exhausted = feed.len();

        assert_eq!(
            feed.load_more().await,
            LoadOutcome::Skipped(SkipReason::Exhausted)
        );
        assert_eq!(feed.len(), exhausted);
        assert!(!feed.is_loading());
    }

    #[tokio::test]
    async fn ids_never_repeat() {
        let feed = mock_feed();
        while feed.has_more() {
            feed.load_more().await;
        }
        let records = feed.records();
        let ids: HashSet<u64> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids.len(), records.len());
        assert!(records.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[tokio::test]
    async fn scores_stay_in_range() {
        let feed = mock_feed();
        feed.load_more().await;
        for record in feed.records() {
            assert!((0.0..=100.0).contains(&record.match_score), "{record:?}");
            assert!((0.0..=5.0).contains(&record.rating), "{record:?}");
        }
    }

    /// Holds every fetch until released.
    struct Gate {
        open: Arc<Notify>,
    }

    impl PageSource for Gate {
        async fn fetch_page(&self, page: u32) -> Result<Vec<CandidateRecord>, FetchError> {
            self.open.notified().await;
            Ok(MockMentorSource::seeded(&FeedConfig::default(), 1).generate(page))
        }
    }

    fn gated_feed() -> (DiscoveryFeed<Gate>, Arc<Notify>) {
        let open = Arc::new(Notify::new());
        let feed = DiscoveryFeed::new(
            Gate {
                open: Arc::clone(&open),
            },
            initial_mentors(),
            &FeedConfig::default(),
        );
        (feed, open)
    }

    #[tokio::test]
    async fn second_call_while_loading_is_a_no_op() {
        let (feed, open) = gated_feed();
        let (first, second) = tokio::join!(feed.load_more(), async {
            let outcome = feed.load_more().await;
            assert!(feed.is_loading());
            open.notify_one();
            outcome
        });
        assert_eq!(first, LoadOutcome::Loaded {
            page: 1,
            appended: 3,
        });
        assert_eq!(second, LoadOutcome::Skipped(SkipReason::InFlight));
        assert_eq!(feed.len(), 9);
        assert_eq!(feed.page(), 2);
    }

    #[tokio::test]
    async fn unmounting_discards_the_page_in_flight() {
        let (feed, open) = gated_feed();
        let (outcome, ()) = tokio::join!(feed.load_more(), async {
            feed.unmount();
            open.notify_one();
        });
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert_eq!(feed.len(), 6);
        assert_eq!(feed.page(), 1);
        assert_eq!(
            feed.load_more().await,
            LoadOutcome::Skipped(SkipReason::Unmounted)
        );
    }

    #[tokio::test]
    async fn dropped_fetch_clears_the_loading_flag() {
        let (feed, _open) = gated_feed();
        let timed_out = tokio::time::timeout(Duration::from_millis(10), feed.load_more()).await;
        assert!(timed_out.is_err());
        assert!(!feed.is_loading());
        assert_eq!(feed.page(), 1);
    }

    /// Fails the first attempt of every page.
    struct Flaky {
        attempts: AtomicU32,
    }

    impl PageSource for Flaky {
        async fn fetch_page(&self, page: u32) -> Result<Vec<CandidateRecord>, FetchError> {
            if self.attempts.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                return Err(FetchError::Unavailable(format!("page {page}")));
            }
            Ok(MockMentorSource::seeded(&FeedConfig::default(), 1).generate(page))
        }
    }

    #[tokio::test]
    async fn failures_can_be_retried() {
        let feed = DiscoveryFeed::new(
            Flaky {
                attempts: AtomicU32::new(0),
            },
            initial_mentors(),
            &FeedConfig::default(),
        );
        assert_eq!(feed.load_more().await, LoadOutcome::Failed);
        assert!(feed.has_more());
        assert!(!feed.is_loading());
        assert_eq!(feed.page(), 1);
        assert_eq!(feed.len(), 6);

        assert!(matches!(feed.load_more().await, LoadOutcome::Loaded { page: 1, .. }));
        assert_eq!(feed.len(), 9);
    }

    /// Hands out the same ids for every page.
    struct Repeating;

    impl PageSource for Repeating {
        async fn fetch_page(&self, _page: u32) -> Result<Vec<CandidateRecord>, FetchError> {
            Ok(initial_mentors().into_iter().take(2).collect())
        }
    }

    #[tokio::test]
    async fn duplicate_ids_are_dropped() {
        let feed = DiscoveryFeed::new(Repeating, initial_mentors(), &FeedConfig::default());
        assert_eq!(feed.load_more().await, LoadOutcome::Loaded {
            page: 1,
            appended: 0,
        });
        assert_eq!(feed.len(), 6);
        // the page still counts
        assert_eq!(feed.page(), 2);
    }

    #[tokio::test]
    async fn filter_chips() {
        let feed = mock_feed();
        assert_eq!(feed.filtered("All").len(), 6);
        let technology: Vec<u64> = feed
            .filtered("technology")
            .iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(technology, [2]);

        feed.load_more().await;
        // Industry Expert is the second template of every page
        assert_eq!(feed.filtered("Technology").len(), 2);
        assert!(feed.filtered("Gardening").is_empty());
    }
}
