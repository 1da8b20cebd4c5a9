//! The permission predicate.
//!
//! Rules, in order:
//! 1. Non-positive tags are public, whatever the session state.
//! 2. A session that has not been hydrated yet answers [`AccessDecision::Pending`].
//! 3. Support users are allowed everything.
//! 4. Anything else is allowed iff the user holds the tag.
//!
//! Decisions are never cached: every call reads the current session snapshot.

use concil_kernel::domain::config::PendingPolicy;
use concil_kernel::domain::{Tag, User};
use concil_session::{SessionState, SessionStore};
use tracing::trace;

/// Three-valued outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessDecision {
    Allowed,
    Denied,
    /// The session is still loading; nothing is known about the user yet.
    Pending,
}

impl AccessDecision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Collapses the decision to a boolean, answering `Pending` as `policy` says.
    #[must_use]
    pub const fn resolve(self, policy: PendingPolicy) -> bool {
        match self {
            Self::Allowed => true,
            Self::Denied => false,
            Self::Pending => matches!(policy, PendingPolicy::Allow),
        }
    }
}

/// The tag rules for a known user.
#[must_use]
pub fn permits(user: &User, tag: Tag) -> bool {
    user.is_support || !tag.is_restricted() || user.holds(tag)
}

/// Evaluates a tag against a session state.
#[must_use]
pub fn decide_for(state: &SessionState, tag: Tag) -> AccessDecision {
    if !tag.is_restricted() {
        return AccessDecision::Allowed;
    }

    let allowed = match state {
        SessionState::Pending => return AccessDecision::Pending,
        SessionState::Anonymous => false,
        SessionState::Authenticated(user) => permits(user, tag),
    };

    if allowed { AccessDecision::Allowed } else { AccessDecision::Denied }
}

/// Permission checks against the live session.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    session: SessionStore,
    pending: PendingPolicy,
}

impl AccessPolicy {
    #[must_use]
    pub const fn new(session: SessionStore, pending: PendingPolicy) -> Self {
        Self { session, pending }
    }

    #[must_use]
    pub fn decide(&self, tag: impl Into<Tag>) -> AccessDecision {
        let tag = tag.into();
        let decision = decide_for(&self.session.state(), tag);
        trace!(tag = %tag, ?decision, "Access decided");
        decision
    }

    /// Boolean form of [`decide`](Self::decide); `Pending` follows the configured policy.
    #[must_use]
    pub fn check(&self, tag: impl Into<Tag>) -> bool {
        self.decide(tag).resolve(self.pending)
    }

    #[must_use]
    pub const fn pending_policy(&self) -> PendingPolicy {
        self.pending
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concil_kernel::domain::Permission;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn user(tags: &[i32], is_support: bool) -> User {
        User {
            is_support,
            permissions: tags.iter().map(|&t| Permission::new(1, "op", t)).collect(),
            ..User::default()
        }
    }

    fn authenticated(tags: &[i32], is_support: bool) -> SessionState {
        SessionState::Authenticated(Arc::new(user(tags, is_support)))
    }

    #[test]
    fn pending_resolution_follows_policy() {
        assert!(AccessDecision::Pending.resolve(PendingPolicy::Allow));
        assert!(!AccessDecision::Pending.resolve(PendingPolicy::Deny));
        assert!(AccessDecision::Allowed.resolve(PendingPolicy::Deny));
        assert!(!AccessDecision::Denied.resolve(PendingPolicy::Allow));
    }

    #[test]
    fn pending_session_defers_restricted_tags_only() {
        assert_eq!(decide_for(&SessionState::Pending, Tag(1016)), AccessDecision::Pending);
        assert_eq!(decide_for(&SessionState::Pending, Tag::PUBLIC), AccessDecision::Allowed);
    }

    #[test]
    fn public_tags_pass_while_pending_under_deny() {
        let policy = AccessPolicy::new(SessionStore::in_memory(), PendingPolicy::Deny);
        assert!(policy.check(0));
        assert!(policy.check(-5));
        assert!(!policy.check(1016));
    }

    #[test]
    fn anonymous_sees_only_public() {
        assert_eq!(decide_for(&SessionState::Anonymous, Tag(0)), AccessDecision::Allowed);
        assert_eq!(decide_for(&SessionState::Anonymous, Tag(1)), AccessDecision::Denied);
    }

    #[test]
    fn policy_reads_live_session() {
        let store = SessionStore::in_memory();
        let policy = AccessPolicy::new(store.clone(), PendingPolicy::Deny);
        assert_eq!(policy.decide(1016), AccessDecision::Pending);
        assert!(!policy.check(1016));

        store.init();
        assert_eq!(policy.decide(1016), AccessDecision::Denied);

        store.set_user(user(&[1016], false));
        assert!(policy.check(1016));
        assert!(!policy.check(1008));
    }

    proptest! {
        #[test]
        fn public_tags_always_pass(
            held in prop::collection::vec(1..2000i32, 0..6),
            support in any::<bool>(),
            tag in i32::MIN..=0,
        ) {
            prop_assert_eq!(decide_for(&authenticated(&held, support), Tag(tag)), AccessDecision::Allowed);
            prop_assert_eq!(decide_for(&SessionState::Anonymous, Tag(tag)), AccessDecision::Allowed);

            let pending = decide_for(&SessionState::Pending, Tag(tag));
            prop_assert!(pending.resolve(PendingPolicy::Allow));
            prop_assert!(pending.resolve(PendingPolicy::Deny));
        }

        #[test]
        fn support_passes_everything(held in prop::collection::vec(any::<i32>(), 0..6), tag in any::<i32>()) {
            prop_assert!(decide_for(&authenticated(&held, true), Tag(tag)).is_allowed());
        }

        #[test]
        fn membership_decides_restricted_tags(held in prop::collection::vec(1..64i32, 0..10), tag in 1..64i32) {
            let expected = held.contains(&tag);
            prop_assert_eq!(decide_for(&authenticated(&held, false), Tag(tag)).is_allowed(), expected);
        }
    }
}
