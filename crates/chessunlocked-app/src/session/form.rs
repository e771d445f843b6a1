/// Minimum password length checked before contacting the provider.
pub(crate) const MIN_SIGN_UP_PASSWORD_LEN: usize = 6;

pub(crate) const SHORT_PASSWORD_MESSAGE: &str = "Password must be at least 6 characters.";
pub(crate) const SIGN_UP_FALLBACK: &str = "Signup failed.";
pub(crate) const SIGN_IN_FALLBACK: &str = "Sign in failed.";
pub(crate) const RESET_FALLBACK: &str = "Failed to send reset email.";
pub(crate) const RESET_SENT_MESSAGE: &str = "Password reset email sent! Check your inbox.";

/// Which form a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthFormKind {
    SignUp,
    SignIn,
    PasswordReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum MessageTone {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormMessage {
    pub(crate) text: String,
    pub(crate) tone: MessageTone,
}

impl FormMessage {
    #[must_use]
    pub(crate) fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: MessageTone::Info,
        }
    }

    #[must_use]
    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: MessageTone::Error,
        }
    }
}

/// Text typed into the auth forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AuthForms {
    pub(crate) sign_up_email: String,
    pub(crate) sign_up_password: String,
    pub(crate) sign_in_email: String,
    pub(crate) sign_in_password: String,
    pub(crate) reset_email: String,
    pub(crate) reset_open: bool,
}

/// Credentials ready to hand to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl AuthForms {
    /// Validates the sign-up form locally.
    ///
    /// The email is trimmed; the password is taken verbatim.
    pub(crate) fn sign_up_credentials(&self) -> Result<Credentials, FormMessage> {
        if self.sign_up_password.chars().count() < MIN_SIGN_UP_PASSWORD_LEN {
            return Err(FormMessage::error(SHORT_PASSWORD_MESSAGE));
        }
        Ok(Credentials {
            email: self.sign_up_email.trim().to_owned(),
            password: self.sign_up_password.clone(),
        })
    }

    #[must_use]
    pub(crate) fn sign_in_credentials(&self) -> Credentials {
        Credentials {
            email: self.sign_in_email.trim().to_owned(),
            password: self.sign_in_password.clone(),
        }
    }

    #[must_use]
    pub(crate) fn reset_email(&self) -> String {
        self.reset_email.trim().to_owned()
    }

    /// Forgets typed passwords, keeping emails.
    pub(crate) fn clear_passwords(&mut self) {
        self.sign_up_password.clear();
        self.sign_in_password.clear();
    }
}

/// Latest message shown under each form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormMessages {
    pub(crate) sign_up: Option<FormMessage>,
    pub(crate) sign_in: Option<FormMessage>,
    pub(crate) password_reset: Option<FormMessage>,
}

impl FormMessages {
    pub(crate) fn set(&mut self, form: AuthFormKind, message: Option<FormMessage>) {
        let slot = match form {
            AuthFormKind::SignUp => &mut self.sign_up,
            AuthFormKind::SignIn => &mut self.sign_in,
            AuthFormKind::PasswordReset => &mut self.password_reset,
        };
        *slot = message;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
