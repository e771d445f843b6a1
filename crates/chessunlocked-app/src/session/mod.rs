//! Sign-in state and the injected identity capability.
//!
//! The app never talks to an identity service directly. It is handed a
//! [`SessionProvider`] at construction and observes session changes through
//! [`SessionProvider::on_session_change`]. [`SessionGate`] folds those changes
//! into the single "full user signed in" flag that hides or shows the trainer.

use std::{future::Future, pin::Pin, rc::Rc};

use chrono::{DateTime, Utc};

pub(crate) use self::{form::*, gate::*};
pub use self::{local::*, profile::*};

mod form;
mod gate;
mod local;
mod profile;

/// A future returned by the session and profile capabilities.
///
/// Flows run on the single UI thread, so these futures need not be `Send`.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AuthError>> + 'a>>;

/// Listener invoked with the current user whenever the session changes.
pub type SessionListener = Box<dyn FnMut(Option<&SessionUser>)>;

/// A signed-in account, possibly anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub uid: String,
    pub email: Option<String>,
    pub is_anonymous: bool,
}

impl SessionUser {
    #[must_use]
    pub fn registered(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: Some(email.into()),
            is_anonymous: false,
        }
    }

    #[must_use]
    pub fn anonymous(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            is_anonymous: true,
        }
    }

    /// Returns `true` for a non-anonymous account.
    #[must_use]
    pub fn is_full_user(&self) -> bool {
        !self.is_anonymous
    }
}

/// Failures reported by the identity or profile capability.
///
/// The display text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AuthError {
    #[display("The email address is badly formatted.")]
    InvalidEmail,
    #[display("Password should be at least {min} characters.")]
    WeakPassword { min: usize },
    #[display("The email address is already in use by another account.")]
    EmailInUse,
    #[display("Invalid email or password.")]
    InvalidCredentials,
    #[display("There is no account with this email address.")]
    UserNotFound,
    #[display("{message}")]
    Provider { message: String },
    #[display("Could not save profile: {message}")]
    Store { message: String },
}

impl AuthError {
    /// Returns the user-visible text, or `fallback` if the error carries none.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_owned()
        } else {
            message
        }
    }
}

/// Identity collaborator: account creation, credential checks, password
/// reset mail, and sign-out.
pub trait SessionProvider {
    /// Registers `listener`; it is called once immediately with the current
    /// user and again after every change.
    fn on_session_change(&self, listener: SessionListener);

    fn sign_up<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, SessionUser>;

    fn sign_in<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, SessionUser>;

    fn send_password_reset<'a>(&'a self, email: &'a str) -> AuthFuture<'a, ()>;

    fn sign_out(&self) -> AuthFuture<'_, ()>;

    /// Starts an anonymous session, as done at startup.
    fn sign_in_anonymously(&self) -> AuthFuture<'_, SessionUser>;
}

/// Capabilities injected into the app at construction.
#[derive(Clone)]
pub struct SessionServices {
    pub session: Rc<dyn SessionProvider>,
    pub profiles: Rc<dyn ProfileStore>,
    /// Namespace for profile documents.
    pub app_id: String,
    pub clock: fn() -> DateTime<Utc>,
}

impl SessionServices {
    /// Services backed by the in-process provider and store.
    #[must_use]
    pub fn local(app_id: impl Into<String>) -> Self {
        Self {
            session: Rc::new(LocalSessionProvider::new()),
            profiles: Rc::new(MemoryProfileStore::new()),
            app_id: app_id.into(),
            clock: Utc::now,
        }
    }
}

impl std::fmt::Debug for SessionServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionServices")
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_falls_back_when_blank() {
        let err = AuthError::Provider {
            message: "  ".to_owned(),
        };
        assert_eq!(err.user_message("Sign in failed."), "Sign in failed.");
        assert_eq!(
            AuthError::InvalidCredentials.user_message("Sign in failed."),
            "Invalid email or password."
        );
    }

    #[test]
    fn anonymous_user_is_not_full() {
        assert!(!SessionUser::anonymous("a").is_full_user());
        assert!(SessionUser::registered("u", "e@x.io").is_full_user());
    }
}
