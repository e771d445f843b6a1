use chessunlocked_trainer::PlaybackState;
use eframe::egui::{Button, ComboBox, RichText, Ui};

use crate::action::{ActionRequestQueue, PlayerAction};

#[derive(Debug, Clone)]
pub(crate) struct StepInfo<'a> {
    pub(crate) label: &'a str,
    pub(crate) move_label: &'a str,
    pub(crate) number: usize,
    pub(crate) count: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct OpeningPanelViewModel<'a> {
    openings: Vec<&'a str>,
    selected: Option<&'a str>,
    state: PlaybackState,
    step: Option<StepInfo<'a>>,
}

impl<'a> OpeningPanelViewModel<'a> {
    #[must_use]
    pub(crate) fn new(
        openings: Vec<&'a str>,
        selected: Option<&'a str>,
        state: PlaybackState,
        step: Option<StepInfo<'a>>,
    ) -> Self {
        Self {
            openings,
            selected,
            state,
            step,
        }
    }

    #[must_use]
    pub(crate) fn step(&self) -> Option<&StepInfo<'a>> {
        self.step.as_ref()
    }
}

pub(crate) fn show(ui: &mut Ui, vm: &OpeningPanelViewModel, action_queue: &mut ActionRequestQueue) {
    ui.heading("Opening Explorer");

    ComboBox::from_id_salt("opening_select")
        .selected_text(vm.selected.unwrap_or("Choose an opening"))
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for &name in &vm.openings {
                if ui
                    .selectable_label(vm.selected == Some(name), name)
                    .clicked()
                {
                    action_queue.request(PlayerAction::SelectOpening(name.to_owned()).into());
                }
            }
        });

    ui.add_space(ui.spacing().item_spacing.y);

    let selected = !vm.state.is_idle();
    ui.horizontal(|ui| {
        if ui.add_enabled(selected, Button::new("⏮ Reset")).clicked() {
            action_queue.request(PlayerAction::Reset.into());
        }
        if ui.add_enabled(selected, Button::new("◀ Back")).clicked() {
            action_queue.request(PlayerAction::StepBackward.into());
        }
        let (label, action) = if vm.state.is_playing() {
            ("⏸ Pause", PlayerAction::Pause)
        } else {
            ("▶ Play", PlayerAction::Play)
        };
        if ui.add_enabled(selected, Button::new(label)).clicked() {
            action_queue.request(action.into());
        }
        if ui.add_enabled(selected, Button::new("Forward ▶")).clicked() {
            action_queue.request(PlayerAction::StepForward.into());
        }
    });

    ui.separator();
    match vm.step() {
        Some(step) => {
            ui.label(RichText::new(step.label).size(20.0).strong());
            if step.label != step.move_label {
                ui.label(format!("Move: {}", step.move_label));
            }
            ui.label(format!("Step {} of {}", step.number, step.count));
        }
        None => {
            ui.label("Pick an opening to step through its main line.");
        }
    }
}
