use super::SessionUser;

/// Visibility of gated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum Access {
    Locked,
    Unlocked,
}

/// Tracks the session user and derives whether gated content is visible.
///
/// Only a full (non-anonymous) user unlocks the gate.
#[derive(Debug, Clone, Default)]
pub(crate) struct SessionGate {
    user: Option<SessionUser>,
}

impl SessionGate {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a session change.
    ///
    /// Returns the new access when visibility flips, `None` otherwise.
    pub(crate) fn apply(&mut self, user: Option<SessionUser>) -> Option<Access> {
        let before = self.access();
        self.user = user;
        let after = self.access();
        (before != after).then_some(after)
    }

    #[must_use]
    pub(crate) fn access(&self) -> Access {
        if self.user.as_ref().is_some_and(SessionUser::is_full_user) {
            Access::Unlocked
        } else {
            Access::Locked
        }
    }

    #[must_use]
    pub(crate) fn is_unlocked(&self) -> bool {
        self.access().is_unlocked()
    }

    #[must_use]
    pub(crate) fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }
}
