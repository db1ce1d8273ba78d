//! Incremental search over association records.
//!
//! # State Machine
//!
//! ```text
//! Idle ──input──▶ Waiting ──delay elapsed──▶ Fetching(seq) ──response──▶ Applied(seq)
//!                   ▲  │                                                     │
//!                   └──┘ input (delay restarted)          input ◀────────────┘
//! ```
//!
//! - Every input change restarts the debounce delay (trailing edge), so a
//!   burst of keystrokes issues a single search.
//! - Every issued search gets a sequence number. A response is applied only
//!   if no later-issued search has been applied already; older responses
//!   arriving late are dropped.
//! - In-flight searches are never cancelled, only ignored when stale. Once a
//!   newer search has completed, an older one is dropped whether it succeeded
//!   or failed, so it neither overwrites results nor raises an alert.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::AlertSender;
use crate::domain::aggregation::InstructorGroup;
use crate::domain::auth::{AuthContext, AuthToken};
use crate::domain::record_store::{RecordStore, Snapshot};
use crate::domain::repositories::ExamApi;
use crate::utils::normalize_query;
use crate::utils::query::DEFAULT_MIN_QUERY_LEN;

/// Default quiet period before a search is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub debounce: Duration,
    /// Queries shorter than this many characters are sent unfiltered.
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing applied yet and nothing pending.
    Idle,
    /// Debounce delay running.
    Waiting,
    /// The latest issued search is in flight.
    Fetching(u64),
    /// The store holds the result of this search.
    Applied(u64),
}

impl SearchState {
    fn settled(latest_applied: u64) -> Self {
        if latest_applied == 0 {
            Self::Idle
        } else {
            Self::Applied(latest_applied)
        }
    }
}

#[derive(Debug)]
struct Inner {
    query_text: String,
    /// Bumped on every input change; a debounce task only fires if it still
    /// matches.
    input_gen: u64,
    request_seq: u64,
    /// Highest sequence number whose response (success or failure) has
    /// arrived; responses at or below it are dropped without effect.
    completed_seq: u64,
    state: SearchState,
    pending: Option<JoinHandle<()>>,
}

struct Shared<A: ExamApi + ?Sized> {
    api: Arc<A>,
    store: RecordStore,
    alerts: AlertSender,
    config: SearchConfig,
    inner: Mutex<Inner>,
}

/// Debounced, race-free search controller.
///
/// Requires a tokio runtime. Dropping the controller cancels a pending
/// debounce; searches already in flight still complete into the store.
pub struct SearchController<A: ExamApi + ?Sized + 'static> {
    shared: Arc<Shared<A>>,
}

impl<A: ExamApi + ?Sized + 'static> SearchController<A> {
    pub fn new(api: Arc<A>, store: RecordStore, alerts: AlertSender, config: SearchConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                store,
                alerts,
                config,
                inner: Mutex::new(Inner {
                    query_text: String::new(),
                    input_gen: 0,
                    request_seq: 0,
                    completed_seq: 0,
                    state: SearchState::Idle,
                    pending: None,
                }),
            }),
        }
    }

    /// Handles a change of the search box.
    ///
    /// The raw text is recorded immediately; the search itself is issued once
    /// no further change arrives for the debounce period.
    pub fn on_input(&self, ctx: &AuthContext, text: impl Into<String>) {
        let mut inner = self.shared.lock();
        inner.query_text = text.into();
        inner.input_gen += 1;
        if let Some(pending) = inner.pending.take() {
            pending.abort();
        }
        inner.state = SearchState::Waiting;

        let shared = Arc::clone(&self.shared);
        let ctx = ctx.clone();
        let generation = inner.input_gen;
        let delay = self.shared.config.debounce;
        inner.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.issue(&ctx, Some(generation));
        }));
    }

    /// Issues a search for the current text right away and waits for it.
    ///
    /// Cancels a pending debounce. Used for the initial load.
    pub async fn refresh(&self, ctx: &AuthContext) {
        {
            let mut inner = self.shared.lock();
            inner.input_gen += 1;
            if let Some(pending) = inner.pending.take() {
                pending.abort();
            }
        }

        if let Some(fetch) = self.shared.issue(ctx, None)
            && let Err(e) = fetch.await
        {
            warn!(error = %e, "Search task failed");
        }
    }

    /// Replaces the text and searches for it without debouncing.
    pub async fn search_now(&self, ctx: &AuthContext, text: impl Into<String>) {
        self.shared.lock().query_text = text.into();
        self.refresh(ctx).await;
    }

    /// The text last typed, before normalization.
    pub fn query_text(&self) -> String {
        self.shared.lock().query_text.clone()
    }

    pub fn state(&self) -> SearchState {
        self.shared.lock().state
    }

    /// Number of searches issued so far.
    pub fn request_seq(&self) -> u64 {
        self.shared.lock().request_seq
    }

    pub fn latest_applied(&self) -> u64 {
        self.shared.store.latest_applied()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.shared.store.snapshot()
    }

    /// Display hierarchy of the current result set.
    pub fn hierarchy(&self) -> Vec<InstructorGroup> {
        self.snapshot().hierarchy()
    }

    /// Receiver notified whenever a search result is applied.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.shared.store.subscribe()
    }

    pub fn store(&self) -> &RecordStore {
        &self.shared.store
    }
}

impl<A: ExamApi + ?Sized + 'static> Drop for SearchController<A> {
    fn drop(&mut self) {
        if let Some(pending) = self.shared.lock().pending.take() {
            pending.abort();
        }
    }
}

impl<A: ExamApi + ?Sized + 'static> Shared<A> {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocates a sequence number and spawns the fetch.
    ///
    /// `generation` is the input generation a debounce task was started for;
    /// it is ignored if another input arrived since.
    fn issue(self: &Arc<Self>, ctx: &AuthContext, generation: Option<u64>) -> Option<JoinHandle<()>> {
        let (token, seq, query) = {
            let mut inner = self.lock();
            if generation.is_some_and(|g| g != inner.input_gen) {
                return None;
            }
            if generation.is_some() {
                inner.pending = None;
            }

            let Some(token) = ctx.token().cloned() else {
                debug!("No token, search skipped");
                inner.state = SearchState::settled(self.store.latest_applied());
                return None;
            };

            inner.request_seq += 1;
            let seq = inner.request_seq;
            inner.state = SearchState::Fetching(seq);
            let query = normalize_query(&inner.query_text, self.config.min_query_len);
            (token, seq, query)
        };

        debug!(seq, query = %query, "Issuing search");
        let shared = Arc::clone(self);
        Some(tokio::spawn(async move {
            shared.fetch(token, seq, query).await;
        }))
    }

    async fn fetch(&self, token: AuthToken, seq: u64, query: String) {
        let result = tokio::try_join!(
            self.api.get_tests_by_teacher(&token, &query),
            self.api.get_categories(&token)
        );

        let failure = {
            let mut inner = self.lock();
            if seq <= inner.completed_seq {
                debug!(seq, query = %query, "Discarding response of a superseded search");
                return;
            }
            inner.completed_seq = seq;

            let (applied, failure) = match result {
                Ok((records, categories)) => {
                    let count = records.len();
                    let applied = self.store.apply(seq, records, categories);
                    if applied {
                        info!(seq, query = %query, records = count, "Search applied");
                    }
                    (applied, None)
                }
                Err(e) => (false, Some(e)),
            };

            let superseded = match inner.state {
                SearchState::Waiting => true,
                SearchState::Fetching(newer) => newer > seq,
                SearchState::Idle | SearchState::Applied(_) => false,
            };
            if !superseded {
                inner.state = if applied {
                    SearchState::Applied(seq)
                } else {
                    SearchState::settled(self.store.latest_applied())
                };
            }

            failure
        };

        if let Some(e) = failure {
            warn!(seq, query = %query, error = %e, "Search failed");
            self.alerts.report(&e);
        }
    }
}
