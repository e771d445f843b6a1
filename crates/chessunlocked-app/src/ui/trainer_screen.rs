use eframe::egui::{RichText, Ui};
use egui_extras::{Size, StripBuilder};

use super::{board, drill_panel, opening_panel, session_panel};
use crate::{
    action::{ActionRequestQueue, UiAction},
    state::TrainerPanel,
    ui::{
        board::BoardViewModel, drill_panel::DrillPanelViewModel,
        opening_panel::OpeningPanelViewModel, session_panel::SessionPanelViewModel,
    },
};

/// Gated content; only built while a full user is signed in.
#[derive(Debug, Clone)]
pub(crate) struct TrainerViewModel<'a> {
    pub(crate) panel: TrainerPanel,
    pub(crate) board_vm: BoardViewModel,
    pub(crate) opening_vm: OpeningPanelViewModel<'a>,
    pub(crate) drill_vm: DrillPanelViewModel<'a>,
    pub(crate) message: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub(crate) struct TrainerScreenViewModel<'a> {
    pub(crate) session_vm: SessionPanelViewModel<'a>,
    pub(crate) trainer: Option<TrainerViewModel<'a>>,
}

impl<'a> TrainerScreenViewModel<'a> {
    #[must_use]
    pub(crate) fn new(
        session_vm: SessionPanelViewModel<'a>,
        trainer: Option<TrainerViewModel<'a>>,
    ) -> Self {
        Self {
            session_vm,
            trainer,
        }
    }
}

const BOARD_WIDTH_RATIO: f32 = 0.6;

pub(crate) fn show(ui: &mut Ui, vm: &TrainerScreenViewModel, action_queue: &mut ActionRequestQueue) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        session_panel::show(ui, &vm.session_vm, action_queue);
    });
    ui.add_space(ui.spacing().item_spacing.y * 2.0);

    let Some(trainer) = &vm.trainer else {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("Sign in with a full account to unlock the trainer.")
                    .size(18.0)
                    .color(ui.visuals().weak_text_color()),
            );
        });
        return;
    };

    ui.horizontal(|ui| {
        for (panel, label) in [
            (TrainerPanel::Openings, "Opening Explorer"),
            (TrainerPanel::Drills, "Practice Drills"),
        ] {
            if ui.selectable_label(trainer.panel == panel, label).clicked() {
                action_queue.request(UiAction::ShowPanel(panel).into());
            }
        }
    });
    if let Some(message) = trainer.message {
        ui.label(RichText::new(message).color(ui.visuals().warn_fg_color));
    }

    let spacing = ui.spacing().item_spacing;
    let available = ui.available_size() - spacing;
    let board_side = (available.x * BOARD_WIDTH_RATIO).min(available.y).max(0.0);

    StripBuilder::new(ui)
        .size(Size::exact(board_side))
        .size(Size::remainder())
        .horizontal(|mut strip| {
            strip.cell(|ui| {
                board::show(ui, &trainer.board_vm);
            });
            strip.cell(|ui| match trainer.panel {
                TrainerPanel::Openings => {
                    opening_panel::show(ui, &trainer.opening_vm, action_queue);
                }
                TrainerPanel::Drills => {
                    drill_panel::show(ui, &trainer.drill_vm, action_queue);
                }
            });
        });
}
