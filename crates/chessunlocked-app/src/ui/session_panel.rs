use eframe::egui::{Button, RichText, TextEdit, Ui};

use crate::{
    action::{ActionRequestQueue, FlowAction, UiAction},
    session::{AuthForms, FormMessage, FormMessages, MessageTone, SessionUser},
};

#[derive(Debug, Clone)]
pub(crate) struct SessionPanelViewModel<'a> {
    user: Option<&'a SessionUser>,
    unlocked: bool,
    forms: &'a AuthForms,
    messages: &'a FormMessages,
    busy: bool,
}

impl<'a> SessionPanelViewModel<'a> {
    #[must_use]
    pub(crate) fn new(
        user: Option<&'a SessionUser>,
        unlocked: bool,
        forms: &'a AuthForms,
        messages: &'a FormMessages,
        busy: bool,
    ) -> Self {
        Self {
            user,
            unlocked,
            forms,
            messages,
            busy,
        }
    }

    #[must_use]
    pub(crate) fn display_name(&self) -> &'a str {
        self.user.and_then(|u| u.email.as_deref()).unwrap_or("User")
    }
}

fn show_message(ui: &mut Ui, message: Option<&FormMessage>) {
    let Some(message) = message else {
        return;
    };
    let color = match message.tone {
        MessageTone::Info => ui.visuals().text_color(),
        MessageTone::Error => ui.visuals().error_fg_color,
    };
    ui.label(RichText::new(&message.text).color(color));
}

fn credential_fields(ui: &mut Ui, email: &mut String, password: &mut String) -> bool {
    let mut changed = false;
    changed |= ui
        .add(TextEdit::singleline(email).hint_text("Email"))
        .changed();
    changed |= ui
        .add(
            TextEdit::singleline(password)
                .password(true)
                .hint_text("Password"),
        )
        .changed();
    changed
}

pub(crate) fn show(ui: &mut Ui, vm: &SessionPanelViewModel, action_queue: &mut ActionRequestQueue) {
    if vm.unlocked {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Welcome back!");
                ui.label(format!("Signed in as {}", vm.display_name()));
            });
            if ui.add_enabled(!vm.busy, Button::new("Sign Out")).clicked() {
                action_queue.request(FlowAction::SignOut.into());
            }
        });
        return;
    }

    ui.heading("Join ChessUnlocked Today");
    ui.label("Create a free account to unlock the opening explorer and practice drills.");

    let mut forms = vm.forms.clone();
    let mut changed = false;
    let mut submit = None;

    ui.columns(2, |columns| {
        let ui = &mut columns[0];
        ui.strong("Create Account");
        changed |= credential_fields(ui, &mut forms.sign_up_email, &mut forms.sign_up_password);
        if ui
            .add_enabled(!vm.busy, Button::new("Create Account"))
            .clicked()
        {
            submit = Some(FlowAction::SignUp);
        }
        show_message(ui, vm.messages.sign_up.as_ref());

        let ui = &mut columns[1];
        ui.strong("Sign In");
        changed |= credential_fields(ui, &mut forms.sign_in_email, &mut forms.sign_in_password);
        ui.horizontal(|ui| {
            if ui.add_enabled(!vm.busy, Button::new("Sign In")).clicked() {
                submit = Some(FlowAction::SignIn);
            }
            if ui.link("Forgot password?").clicked() {
                forms.reset_open = !forms.reset_open;
                changed = true;
            }
        });
        show_message(ui, vm.messages.sign_in.as_ref());

        if forms.reset_open {
            ui.add_space(ui.spacing().item_spacing.y);
            changed |= ui
                .add(TextEdit::singleline(&mut forms.reset_email).hint_text("Email"))
                .changed();
            if ui
                .add_enabled(!vm.busy, Button::new("Send Reset Link"))
                .clicked()
            {
                submit = Some(FlowAction::SendPasswordReset);
            }
            show_message(ui, vm.messages.password_reset.as_ref());
        }
    });

    // Form edits must land before the submit reads them.
    if changed {
        action_queue.request(UiAction::UpdateForms(forms).into());
    }
    if let Some(action) = submit {
        action_queue.request(action.into());
    }
}
