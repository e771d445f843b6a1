use crate::{
    action::{SessionAction, SpinnerKind, UiAction},
    flow::{FlowExecutor, FlowHandle, helpers},
    session::{
        AuthFormKind, AuthForms, Credentials, FormMessage, ProfileRecord, RESET_FALLBACK,
        RESET_SENT_MESSAGE, SIGN_IN_FALLBACK, SIGN_UP_FALLBACK, SessionServices, SessionUser,
        profile_document_path,
    },
};

fn clear_form_message(handle: &FlowHandle, form: AuthFormKind) {
    handle.request_action(
        UiAction::SetFormMessage {
            form,
            message: None,
        }
        .into(),
    );
}

/// Forwards every session change from the provider into the action queue.
pub(crate) fn connect_session_listener(executor: &FlowExecutor, services: &SessionServices) {
    let handle = executor.handle();
    services
        .session
        .on_session_change(Box::new(move |user: Option<&SessionUser>| {
            handle.request_action(SessionAction::Changed(user.cloned()).into());
        }));
}

/// Spawn a sign-up flow if no other flows are active.
///
/// A password that is too short is rejected without contacting the provider.
pub(crate) fn spawn_sign_up_flow(
    executor: &mut FlowExecutor,
    services: &SessionServices,
    forms: &AuthForms,
) {
    if !executor.is_idle() {
        return;
    }
    let handle = executor.handle();
    match forms.sign_up_credentials() {
        Ok(credentials) => executor.spawn(sign_up_flow(handle, services.clone(), credentials)),
        Err(message) => helpers::set_form_message(&handle, AuthFormKind::SignUp, message),
    }
}

/// Creates the account, then writes its profile document.
async fn sign_up_flow(handle: FlowHandle, services: SessionServices, credentials: Credentials) {
    clear_form_message(&handle, AuthFormKind::SignUp);
    let Credentials { email, password } = credentials;

    let signed_up = helpers::with_spinner(
        &handle,
        SpinnerKind::SigningUp,
        services.session.sign_up(&email, &password),
    )
    .await;
    let user = match signed_up {
        Ok(user) => user,
        Err(err) => {
            log::warn!("sign-up failed: {err}");
            let message = FormMessage::error(err.user_message(SIGN_UP_FALLBACK));
            helpers::set_form_message(&handle, AuthFormKind::SignUp, message);
            return;
        }
    };

    let path = profile_document_path(&services.app_id, &user.uid);
    let record = ProfileRecord::new(user.email.as_deref().unwrap_or(&email), (services.clock)());
    if let Err(err) = services.profiles.write_profile(&path, &record).await {
        log::warn!("profile write failed for {path}: {err}");
        let message = FormMessage::error(err.user_message(SIGN_UP_FALLBACK));
        helpers::set_form_message(&handle, AuthFormKind::SignUp, message);
    }
}

/// Spawn a sign-in flow if no other flows are active.
pub(crate) fn spawn_sign_in_flow(
    executor: &mut FlowExecutor,
    services: &SessionServices,
    forms: &AuthForms,
) {
    if !executor.is_idle() {
        return;
    }
    let handle = executor.handle();
    let credentials = forms.sign_in_credentials();
    executor.spawn(sign_in_flow(handle, services.clone(), credentials));
}

async fn sign_in_flow(handle: FlowHandle, services: SessionServices, credentials: Credentials) {
    clear_form_message(&handle, AuthFormKind::SignIn);
    let Credentials { email, password } = credentials;

    let result = helpers::with_spinner(
        &handle,
        SpinnerKind::SigningIn,
        services.session.sign_in(&email, &password),
    )
    .await;
    if let Err(err) = result {
        log::warn!("sign-in failed: {err}");
        let message = FormMessage::error(err.user_message(SIGN_IN_FALLBACK));
        helpers::set_form_message(&handle, AuthFormKind::SignIn, message);
    }
}

/// Spawn a password-reset flow if no other flows are active.
pub(crate) fn spawn_password_reset_flow(
    executor: &mut FlowExecutor,
    services: &SessionServices,
    forms: &AuthForms,
) {
    if !executor.is_idle() {
        return;
    }
    let handle = executor.handle();
    let email = forms.reset_email();
    executor.spawn(password_reset_flow(handle, services.clone(), email));
}

async fn password_reset_flow(handle: FlowHandle, services: SessionServices, email: String) {
    clear_form_message(&handle, AuthFormKind::PasswordReset);

    let result = helpers::with_spinner(
        &handle,
        SpinnerKind::SendingReset,
        services.session.send_password_reset(&email),
    )
    .await;
    let message = match result {
        Ok(()) => FormMessage::info(RESET_SENT_MESSAGE),
        Err(err) => {
            log::warn!("password reset failed: {err}");
            FormMessage::error(err.user_message(RESET_FALLBACK))
        }
    };
    helpers::set_form_message(&handle, AuthFormKind::PasswordReset, message);
}

/// Spawn a sign-out flow if no other flows are active.
pub(crate) fn spawn_sign_out_flow(executor: &mut FlowExecutor, services: &SessionServices) {
    if !executor.is_idle() {
        return;
    }
    let handle = executor.handle();
    executor.spawn(sign_out_flow(handle, services.clone()));
}

async fn sign_out_flow(handle: FlowHandle, services: SessionServices) {
    let result =
        helpers::with_spinner(&handle, SpinnerKind::SigningOut, services.session.sign_out()).await;
    if let Err(err) = result {
        log::warn!("sign-out failed: {err}");
    }
}

/// Starts the anonymous session used before the user signs in.
pub(crate) fn spawn_anonymous_sign_in_flow(
    executor: &mut FlowExecutor,
    services: &SessionServices,
) {
    let services = services.clone();
    executor.spawn(async move {
        match services.session.sign_in_anonymously().await {
            Ok(user) => log::info!("signed in anonymously as {}", user.uid),
            Err(err) => log::error!("anonymous sign-in failed: {err}"),
        }
    });
}
