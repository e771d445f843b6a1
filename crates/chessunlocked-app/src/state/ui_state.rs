use crate::{
    action::{SpinnerId, SpinnerKind},
    flow::FlowExecutor,
    session::{AuthForms, FormMessages},
};

/// Trainer component that currently owns the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub(crate) enum TrainerPanel {
    #[default]
    Openings,
    Drills,
}

// UiState holds ephemeral UI-only state (forms, messages, spinners, flows).
#[derive(Debug)]
pub(crate) struct UiState {
    pub(crate) panel: TrainerPanel,
    pub(crate) forms: AuthForms,
    pub(crate) form_messages: FormMessages,
    pub(crate) trainer_message: Option<String>,
    pub(crate) executor: FlowExecutor,
    pub(crate) spinner_state: SpinnerState,
}

impl UiState {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            panel: TrainerPanel::default(),
            forms: AuthForms::default(),
            form_messages: FormMessages::default(),
            trainer_message: None,
            executor: FlowExecutor::new(),
            spinner_state: SpinnerState::default(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct SpinnerState {
    active: Vec<SpinnerEntry>,
}

impl SpinnerState {
    pub(crate) fn start(&mut self, id: SpinnerId, kind: SpinnerKind) {
        self.active.push(SpinnerEntry { id, kind });
    }

    pub(crate) fn stop(&mut self, id: SpinnerId) {
        if let Some(index) = self.active.iter().position(|entry| entry.id == id) {
            self.active.remove(index);
        }
    }

    #[must_use]
    pub(crate) fn is_active(&self) -> bool {
        !self.active.is_empty()
    }

    #[must_use]
    pub(crate) fn active_kind(&self) -> Option<SpinnerKind> {
        self.active.first().map(|entry| entry.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpinnerEntry {
    id: SpinnerId,
    kind: SpinnerKind,
}
