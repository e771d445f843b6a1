use std::{cell::RefCell, collections::BTreeMap, future};

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};

use super::{AuthError, AuthFuture, SessionListener, SessionProvider, SessionUser};

/// Minimum password length accepted by [`LocalSessionProvider`].
pub const MIN_PROVIDER_PASSWORD_LEN: usize = 6;

/// In-process identity provider.
///
/// Accounts live in memory for the lifetime of the process. Passwords are
/// stored as argon2id PHC strings with a random salt; reset mails are
/// recorded in an outbox instead of being sent.
#[derive(Default)]
pub struct LocalSessionProvider {
    state: RefCell<LocalState>,
    listeners: RefCell<Vec<SessionListener>>,
}

impl std::fmt::Debug for LocalSessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSessionProvider")
            .field("state", &self.state)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

#[derive(Debug, Default)]
struct LocalState {
    accounts: BTreeMap<String, Account>,
    current: Option<SessionUser>,
    outbox: Vec<String>,
    next_uid: u64,
}

#[derive(Debug)]
struct Account {
    uid: String,
    password_hash: String,
}

impl LocalState {
    fn issue_uid(&mut self, prefix: &str) -> String {
        self.next_uid += 1;
        format!("{prefix}-{:08x}", self.next_uid)
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Provider {
            message: e.to_string(),
        })?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}

fn check_email(email: &str) -> Result<(), AuthError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AuthError::InvalidEmail),
    }
}

impl LocalSessionProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the addresses reset mails were "sent" to, oldest first.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn outbox(&self) -> Vec<String> {
        self.state.borrow().outbox.clone()
    }

    fn set_current(&self, user: Option<SessionUser>) {
        self.state.borrow_mut().current = user;
        self.notify();
    }

    fn notify(&self) {
        let current = self.state.borrow().current.clone();
        // Listeners registered during notification are kept but not called.
        let mut listeners = self.listeners.take();
        for listener in &mut listeners {
            listener(current.as_ref());
        }
        let mut slot = self.listeners.borrow_mut();
        listeners.append(&mut slot);
        *slot = listeners;
    }

    fn create_account(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        check_email(email)?;
        if password.chars().count() < MIN_PROVIDER_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PROVIDER_PASSWORD_LEN,
            });
        }
        if self.state.borrow().accounts.contains_key(email) {
            return Err(AuthError::EmailInUse);
        }
        let password_hash = hash_password(password)?;
        let mut state = self.state.borrow_mut();
        let uid = state.issue_uid("user");
        state.accounts.insert(
            email.to_owned(),
            Account {
                uid: uid.clone(),
                password_hash,
            },
        );
        log::info!("created local account {uid}");
        Ok(SessionUser::registered(uid, email))
    }

    fn verify(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        check_email(email)?;
        let state = self.state.borrow();
        let account = state
            .accounts
            .get(email)
            .filter(|account| verify_password(password, &account.password_hash))
            .ok_or(AuthError::InvalidCredentials)?;
        Ok(SessionUser::registered(account.uid.clone(), email))
    }
}

impl SessionProvider for LocalSessionProvider {
    fn on_session_change(&self, mut listener: SessionListener) {
        let current = self.state.borrow().current.clone();
        listener(current.as_ref());
        self.listeners.borrow_mut().push(listener);
    }

    fn sign_up<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, SessionUser> {
        let result = self.create_account(email, password).inspect(|user| {
            self.set_current(Some(user.clone()));
        });
        Box::pin(future::ready(result))
    }

    fn sign_in<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, SessionUser> {
        let result = self.verify(email, password).inspect(|user| {
            self.set_current(Some(user.clone()));
        });
        Box::pin(future::ready(result))
    }

    fn send_password_reset<'a>(&'a self, email: &'a str) -> AuthFuture<'a, ()> {
        let result = check_email(email).and_then(|()| {
            let mut state = self.state.borrow_mut();
            if !state.accounts.contains_key(email) {
                return Err(AuthError::UserNotFound);
            }
            state.outbox.push(email.to_owned());
            log::info!("queued password reset mail");
            Ok(())
        });
        Box::pin(future::ready(result))
    }

    fn sign_out(&self) -> AuthFuture<'_, ()> {
        self.set_current(None);
        Box::pin(future::ready(Ok(())))
    }

    fn sign_in_anonymously(&self) -> AuthFuture<'_, SessionUser> {
        let user = {
            let mut state = self.state.borrow_mut();
            SessionUser::anonymous(state.issue_uid("anon"))
        };
        self.set_current(Some(user.clone()));
        Box::pin(future::ready(Ok(user)))
    }
}
