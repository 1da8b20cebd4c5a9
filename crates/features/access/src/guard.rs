use crate::policy::{AccessDecision, AccessPolicy, decide_for};
use concil_kernel::domain::Tag;
use fxhash::FxHashSet;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info};

/// Client-side navigation used to leave a page the user may not see.
pub trait Navigator: Debug + Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that only records where it was asked to go.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().push(path.to_owned());
    }
}

/// Tags already redirected for within one session generation.
#[derive(Debug, Default)]
struct RedirectLatch {
    generation: u64,
    fired: FxHashSet<Tag>,
}

impl RedirectLatch {
    /// Returns `true` the first time `(generation, tag)` is seen.
    ///
    /// Generations older than the latest one seen never fire.
    fn arm(&mut self, generation: u64, tag: Tag) -> bool {
        if generation < self.generation {
            return false;
        }
        if generation > self.generation {
            self.generation = generation;
            self.fired.clear();
        }
        self.fired.insert(tag)
    }
}

/// Gates pages and actions, redirecting to the access-denied route when a
/// full page is refused.
///
/// A refused page triggers at most one navigation per session generation and tag,
/// however many times the guard is re-evaluated. A pending session never redirects.
#[derive(Debug, Clone)]
pub struct PageGuard {
    policy: AccessPolicy,
    navigator: Arc<dyn Navigator>,
    denied_route: Arc<str>,
    latch: Arc<Mutex<RedirectLatch>>,
}

impl PageGuard {
    pub fn new(policy: AccessPolicy, navigator: Arc<dyn Navigator>, denied_route: impl Into<Arc<str>>) -> Self {
        Self {
            policy,
            navigator,
            denied_route: denied_route.into(),
            latch: Arc::new(Mutex::new(RedirectLatch::default())),
        }
    }

    /// Checks `tag`; with `is_full_page_guard`, a denial also navigates away.
    pub fn check(&self, tag: impl Into<Tag>, is_full_page_guard: bool) -> bool {
        let tag = tag.into();
        let snapshot = self.policy.session().snapshot();

        match decide_for(&snapshot.state, tag) {
            AccessDecision::Allowed => true,
            AccessDecision::Pending => {
                debug!(tag = %tag, "Session pending, guard deferred");
                AccessDecision::Pending.resolve(self.policy.pending_policy())
            },
            AccessDecision::Denied => {
                if is_full_page_guard && self.latch.lock().arm(snapshot.generation, tag) {
                    info!(tag = %tag, route = %self.denied_route, "Access denied, redirecting");
                    self.navigator.navigate(&self.denied_route);
                }
                false
            },
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    #[must_use]
    pub fn denied_route(&self) -> &str {
        &self.denied_route
    }
}
