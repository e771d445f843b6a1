use eframe::egui::{Context, Id, Modal, Spinner};

use crate::action::SpinnerKind;

pub(crate) fn show(ctx: &Context, spinner: SpinnerKind) {
    ctx.request_repaint();
    let (id, heading, label) = match spinner {
        SpinnerKind::SigningUp => ("signing_up", "Creating account...", "Setting up your profile..."),
        SpinnerKind::SigningIn => ("signing_in", "Signing in...", "Checking your credentials..."),
        SpinnerKind::SendingReset => ("sending_reset", "Sending...", "Sending the reset email..."),
        SpinnerKind::SigningOut => ("signing_out", "Signing out...", "Ending your session..."),
    };
    Modal::new(Id::new(id)).show(ctx, |ui| {
        ui.heading(heading);
        ui.add(Spinner::new());
        ui.label(label);
    });
}
