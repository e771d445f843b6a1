use std::{mem, time::Duration};

use crate::{
    session::{AuthFormKind, AuthForms, FormMessage, SessionUser},
    state::TrainerPanel,
};

pub(crate) mod handler;

#[derive(Debug, derive_more::From)]
pub(crate) enum Action {
    App(AppAction),
    Ui(UiAction),
    Flow(FlowAction),
}

#[derive(Debug, derive_more::From)]
pub(crate) enum AppAction {
    Player(PlayerAction),
    Drill(DrillAction),
    Session(SessionAction),
    Clock(ClockAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlayerAction {
    SelectOpening(String),
    Play,
    Pause,
    TogglePlayback,
    StepForward,
    StepBackward,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DrillAction {
    Load(usize),
    Submit(String),
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionAction {
    Changed(Option<SessionUser>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClockAction {
    Advance(Duration),
}

#[derive(Debug)]
pub(crate) enum UiAction {
    ShowPanel(TrainerPanel),
    UpdateForms(AuthForms),
    SetFormMessage {
        form: AuthFormKind,
        message: Option<FormMessage>,
    },
    StartSpinner {
        id: SpinnerId,
        kind: SpinnerKind,
    },
    StopSpinner {
        id: SpinnerId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlowAction {
    SignUp,
    SignIn,
    SendPasswordReset,
    SignOut,
    SignInAnonymously,
}

impl From<PlayerAction> for Action {
    fn from(action: PlayerAction) -> Self {
        Action::App(action.into())
    }
}

impl From<DrillAction> for Action {
    fn from(action: DrillAction) -> Self {
        Action::App(action.into())
    }
}

impl From<SessionAction> for Action {
    fn from(action: SessionAction) -> Self {
        Action::App(action.into())
    }
}

impl From<ClockAction> for Action {
    fn from(action: ClockAction) -> Self {
        Action::App(action.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SpinnerId(u64);

impl SpinnerId {
    #[must_use]
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpinnerKind {
    SigningUp,
    SigningIn,
    SendingReset,
    SigningOut,
}

#[derive(Debug, Default)]
pub(crate) struct ActionRequestQueue {
    actions: Vec<Action>,
}

impl ActionRequestQueue {
    pub(crate) fn request(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub(crate) fn take_all(&mut self) -> Vec<Action> {
        mem::take(&mut self.actions)
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
