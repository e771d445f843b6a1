use eframe::egui::{InputState, Key};

use crate::{
    action::{Action, ActionRequestQueue, AppAction, DrillAction, PlayerAction},
    state::TrainerPanel,
};

struct Shortcut {
    key: Key,
    panel: TrainerPanel,
    action: Action,
}

impl Shortcut {
    const fn player(key: Key, action: PlayerAction) -> Self {
        Self {
            key,
            panel: TrainerPanel::Openings,
            action: Action::App(AppAction::Player(action)),
        }
    }

    const fn drill(key: Key, action: DrillAction) -> Self {
        Self {
            key,
            panel: TrainerPanel::Drills,
            action: Action::App(AppAction::Drill(action)),
        }
    }
}

const SHORTCUTS: [Shortcut; 5] = [
    Shortcut::player(Key::Space, PlayerAction::TogglePlayback),
    Shortcut::player(Key::ArrowRight, PlayerAction::StepForward),
    Shortcut::player(Key::ArrowLeft, PlayerAction::StepBackward),
    Shortcut::player(Key::Home, PlayerAction::Reset),
    Shortcut::drill(Key::N, DrillAction::Next),
];

/// Requests the action bound to the first pressed shortcut of `panel`.
pub(crate) fn handle_input(
    i: &InputState,
    panel: TrainerPanel,
    action_queue: &mut ActionRequestQueue,
) {
    if i.modifiers.any() {
        return;
    }
    for shortcut in SHORTCUTS {
        if shortcut.panel == panel && i.key_pressed(shortcut.key) {
            action_queue.request(shortcut.action);
            return;
        }
    }
}
