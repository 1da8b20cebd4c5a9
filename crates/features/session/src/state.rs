use concil_kernel::domain::User;
use std::sync::Arc;

/// Lifecycle of the signed-in session.
///
/// `Pending` is distinct from `Anonymous`: the former means "we do not know yet",
/// the latter "we know nobody is signed in".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Not hydrated from persisted storage yet.
    #[default]
    Pending,
    /// Hydrated, nobody signed in.
    Anonymous,
    /// Hydrated, with a signed-in user.
    Authenticated(Arc<User>),
}

impl SessionState {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn user(&self) -> Option<&Arc<User>> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Pending | Self::Anonymous => None,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Anonymous => "anonymous",
            Self::Authenticated(_) => "authenticated",
        }
    }
}

/// A published view of the store.
///
/// `generation` increases on every change, so consumers can key one-shot effects on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub generation: u64,
}
