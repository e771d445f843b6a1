use std::time::Duration;

use crate::{
    action::{
        Action, ActionRequestQueue, AppAction, ClockAction, DrillAction, FlowAction, PlayerAction,
        SessionAction, UiAction,
    },
    flow,
    session::{Access, SessionUser},
    state::{AppState, TrainerPanel, UiState},
};

#[derive(Debug)]
struct ActionContext<'a> {
    app_state: &'a mut AppState,
    ui_state: &'a mut UiState,
}

pub(crate) fn handle_all(
    app_state: &mut AppState,
    ui_state: &mut UiState,
    action_queue: &mut ActionRequestQueue,
) {
    for action in action_queue.take_all() {
        handle(app_state, ui_state, action);
    }
}

pub(crate) fn handle(app_state: &mut AppState, ui_state: &mut UiState, action: Action) {
    let mut ctx = ActionContext {
        app_state,
        ui_state,
    };

    match action {
        Action::App(AppAction::Player(action)) => ctx.handle_player(action),
        Action::App(AppAction::Drill(action)) => ctx.handle_drill(action),
        Action::App(AppAction::Session(SessionAction::Changed(user))) => ctx.session_changed(user),
        Action::App(AppAction::Clock(ClockAction::Advance(elapsed))) => ctx.advance_clock(elapsed),
        Action::Ui(action) => ctx.handle_ui(action),
        Action::Flow(action) => ctx.handle_flow(action),
    }
}

impl ActionContext<'_> {
    fn report<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        match result {
            Ok(()) => self.ui_state.trainer_message = None,
            Err(err) => {
                log::warn!("{err}");
                self.ui_state.trainer_message = Some(err.to_string());
            }
        }
    }

    fn handle_player(&mut self, action: PlayerAction) {
        let AppState {
            player, surface, ..
        } = &mut *self.app_state;
        let result = match action {
            PlayerAction::SelectOpening(name) => player.select_opening(&name, surface),
            PlayerAction::Play => player.play().map(|_| ()),
            PlayerAction::Pause => {
                player.pause();
                Ok(())
            }
            PlayerAction::TogglePlayback => {
                if player.state().is_playing() {
                    player.pause();
                    Ok(())
                } else {
                    player.play().map(|_| ())
                }
            }
            PlayerAction::StepForward => player.step_forward(surface).map(|_| ()),
            PlayerAction::StepBackward => player.step_backward(surface).map(|_| ()),
            PlayerAction::Reset => player.reset(surface),
        };
        self.report(result);
    }

    fn handle_drill(&mut self, action: DrillAction) {
        let AppState {
            drills, surface, ..
        } = &mut *self.app_state;
        let result = match action {
            DrillAction::Load(index) => drills.load_drill(index, surface).map(|_| ()),
            DrillAction::Next => drills.next_drill(surface).map(|_| ()),
            DrillAction::Submit(selected) => drills.submit_answer(&selected).map(|_| ()),
        };
        self.report(result);
    }

    fn session_changed(&mut self, user: Option<SessionUser>) {
        let Some(access) = self.app_state.gate.apply(user) else {
            return;
        };
        log::info!("trainer {access:?}");
        match access {
            Access::Locked => {
                self.app_state.player.pause();
            }
            Access::Unlocked => {
                self.ui_state.forms.clear_passwords();
                self.ui_state.form_messages.clear();
            }
        }
    }

    fn advance_clock(&mut self, elapsed: Duration) {
        if !self.app_state.gate.is_unlocked() || !self.ui_state.panel.is_openings() {
            return;
        }
        let AppState {
            player, surface, ..
        } = &mut *self.app_state;
        player.advance_clock(elapsed, surface);
    }

    fn handle_ui(&mut self, action: UiAction) {
        match action {
            UiAction::ShowPanel(panel) => self.show_panel(panel),
            UiAction::UpdateForms(forms) => self.ui_state.forms = forms,
            UiAction::SetFormMessage { form, message } => {
                self.ui_state.form_messages.set(form, message);
            }
            UiAction::StartSpinner { id, kind } => self.ui_state.spinner_state.start(id, kind),
            UiAction::StopSpinner { id } => self.ui_state.spinner_state.stop(id),
        }
    }

    /// Hands the board to `panel` and redraws that panel's position.
    fn show_panel(&mut self, panel: TrainerPanel) {
        if self.ui_state.panel == panel {
            return;
        }
        self.ui_state.panel = panel;
        self.ui_state.trainer_message = None;

        let AppState {
            player,
            drills,
            surface,
            ..
        } = &mut *self.app_state;
        player.pause();
        surface.clear();
        match panel {
            TrainerPanel::Openings => {
                if let Some(step) = player.current_step() {
                    surface.present(step.board());
                }
            }
            TrainerPanel::Drills => match drills.current() {
                Some((_, drill)) => {
                    surface.present(drill.board());
                }
                None if !drills.is_empty() => {
                    let result = drills.load_drill(0, surface).map(|_| ());
                    self.report(result);
                }
                None => {}
            },
        }
    }

    fn handle_flow(&mut self, action: FlowAction) {
        let executor = &mut self.ui_state.executor;
        let services = &self.app_state.services;
        let forms = &self.ui_state.forms;
        match action {
            FlowAction::SignUp => flow::spawn_sign_up_flow(executor, services, forms),
            FlowAction::SignIn => flow::spawn_sign_in_flow(executor, services, forms),
            FlowAction::SendPasswordReset => {
                flow::spawn_password_reset_flow(executor, services, forms);
            }
            FlowAction::SignOut => flow::spawn_sign_out_flow(executor, services),
            FlowAction::SignInAnonymously => {
                flow::spawn_anonymous_sign_in_flow(executor, services);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chessunlocked_catalog::Catalog;
    use chessunlocked_core::render;
    use chessunlocked_trainer::{OptionMark, PlaybackState, Verdict};

    use super::{handle, handle_all};
    use crate::{
        action::{
            Action, ActionRequestQueue, ClockAction, DrillAction, FlowAction, PlayerAction,
            SessionAction, UiAction,
        },
        flow,
        session::{AuthFormKind, AuthForms, FormMessage, SessionServices, SessionUser},
        state::{AppState, TrainerPanel, TrainerSettings, UiState},
    };

    const INTERVAL: Duration = Duration::from_millis(1500);

    fn states() -> (AppState, UiState) {
        let app_state = AppState::new(
            Catalog::builtin().unwrap(),
            TrainerSettings::default(),
            SessionServices::local("test-app"),
        );
        (app_state, UiState::new())
    }

    fn unlocked_states() -> (AppState, UiState) {
        let (mut app_state, mut ui_state) = states();
        handle(
            &mut app_state,
            &mut ui_state,
            SessionAction::Changed(Some(SessionUser::registered("u1", "p@example.com"))).into(),
        );
        assert!(app_state.gate.is_unlocked());
        (app_state, ui_state)
    }

    fn run(app_state: &mut AppState, ui_state: &mut UiState, actions: Vec<Action>) {
        for action in actions {
            handle(app_state, ui_state, action);
        }
    }

    /// Polls flows until they settle, handling whatever they request.
    fn settle(app_state: &mut AppState, ui_state: &mut UiState) {
        for _ in 0..8 {
            let mut queue = ActionRequestQueue::default();
            ui_state.executor.poll(&mut queue);
            if queue.is_empty() {
                break;
            }
            handle_all(app_state, ui_state, &mut queue);
        }
    }

    #[test]
    fn ruy_lopez_playback_through_actions() {
        let (mut app_state, mut ui_state) = unlocked_states();
        run(
            &mut app_state,
            &mut ui_state,
            vec![
                PlayerAction::SelectOpening("Ruy Lopez".to_owned()).into(),
                PlayerAction::TogglePlayback.into(),
                ClockAction::Advance(INTERVAL * 3).into(),
            ],
        );
        assert_eq!(app_state.player.state(), PlaybackState::Playing(3));
        let step = app_state.player.current_step().unwrap();
        assert_eq!(step.move_label(), "2.Nf3");
        assert_eq!(app_state.surface.view(), Some(&render(step.board())));

        handle(
            &mut app_state,
            &mut ui_state,
            PlayerAction::TogglePlayback.into(),
        );
        assert_eq!(app_state.player.state(), PlaybackState::Paused(3));
        assert_eq!(ui_state.trainer_message, None);
    }

    #[test]
    fn play_and_pause_buttons_drive_playback() {
        let (mut app_state, mut ui_state) = unlocked_states();
        run(
            &mut app_state,
            &mut ui_state,
            vec![
                PlayerAction::SelectOpening("Ruy Lopez".to_owned()).into(),
                PlayerAction::Play.into(),
                PlayerAction::Play.into(),
                ClockAction::Advance(INTERVAL).into(),
                PlayerAction::Pause.into(),
                ClockAction::Advance(INTERVAL * 2).into(),
            ],
        );
        assert_eq!(app_state.player.state(), PlaybackState::Paused(1));

        handle(&mut app_state, &mut ui_state, PlayerAction::Pause.into());
        assert_eq!(app_state.player.state(), PlaybackState::Paused(1));
        assert_eq!(ui_state.trainer_message, None);
    }

    #[test]
    fn errors_become_messages() {
        let (mut app_state, mut ui_state) = unlocked_states();
        handle(&mut app_state, &mut ui_state, PlayerAction::Play.into());
        assert_eq!(
            ui_state.trainer_message.as_deref(),
            Some("no opening selected")
        );

        handle(
            &mut app_state,
            &mut ui_state,
            PlayerAction::SelectOpening("Nonexistent".to_owned()).into(),
        );
        assert_eq!(
            ui_state.trainer_message.as_deref(),
            Some("unknown opening: \"Nonexistent\"")
        );
        assert_eq!(app_state.player.state(), PlaybackState::Idle);

        handle(&mut app_state, &mut ui_state, DrillAction::Load(99).into());
        assert!(
            ui_state
                .trainer_message
                .as_deref()
                .is_some_and(|m| m.starts_with("drill 99 out of range"))
        );
    }

    #[test]
    fn clock_is_ignored_while_locked_or_drilling() {
        let (mut app_state, mut ui_state) = unlocked_states();
        run(
            &mut app_state,
            &mut ui_state,
            vec![
                PlayerAction::SelectOpening("Queen's Gambit".to_owned()).into(),
                PlayerAction::Play.into(),
                SessionAction::Changed(None).into(),
            ],
        );
        assert_eq!(app_state.player.state(), PlaybackState::Paused(0));
        handle(&mut app_state, &mut ui_state, PlayerAction::Play.into());
        handle(
            &mut app_state,
            &mut ui_state,
            ClockAction::Advance(INTERVAL * 2).into(),
        );
        assert_eq!(app_state.player.state(), PlaybackState::Playing(0));
    }

    #[test]
    fn switching_panels_hands_over_the_board() {
        let (mut app_state, mut ui_state) = unlocked_states();
        run(
            &mut app_state,
            &mut ui_state,
            vec![
                PlayerAction::SelectOpening("Sicilian Defense".to_owned()).into(),
                PlayerAction::Play.into(),
                UiAction::ShowPanel(TrainerPanel::Drills).into(),
            ],
        );
        assert!(app_state.player.state().is_paused());
        let (index, drill) = app_state.drills.current().unwrap();
        assert_eq!(index, 0);
        assert_eq!(app_state.surface.view(), Some(&render(drill.board())));

        handle(
            &mut app_state,
            &mut ui_state,
            UiAction::ShowPanel(TrainerPanel::Openings).into(),
        );
        let step = app_state.player.current_step().unwrap();
        assert_eq!(app_state.surface.view(), Some(&render(step.board())));
    }

    #[test]
    fn drill_answers_mark_options() {
        let (mut app_state, mut ui_state) = unlocked_states();
        run(
            &mut app_state,
            &mut ui_state,
            vec![
                UiAction::ShowPanel(TrainerPanel::Drills).into(),
                DrillAction::Submit("d4".to_owned()).into(),
            ],
        );
        assert_eq!(app_state.drills.verdict(), Some(Verdict::Incorrect));
        let marks: Vec<_> = app_state
            .drills
            .presented_options()
            .iter()
            .map(|o| (o.text.to_owned(), o.mark))
            .collect();
        assert!(marks.contains(&("Bb5".to_owned(), OptionMark::Correct)));
        assert!(marks.contains(&("d4".to_owned(), OptionMark::Incorrect)));

        handle(&mut app_state, &mut ui_state, DrillAction::Next.into());
        assert_eq!(app_state.drills.current().map(|(i, _)| i), Some(1));
        assert_eq!(app_state.drills.verdict(), None);
    }

    #[test]
    fn sign_up_flow_unlocks_trainer() {
        let (mut app_state, mut ui_state) = states();
        flow::connect_session_listener(&ui_state.executor, &app_state.services);
        handle(
            &mut app_state,
            &mut ui_state,
            FlowAction::SignInAnonymously.into(),
        );
        settle(&mut app_state, &mut ui_state);
        assert!(!app_state.gate.is_unlocked());
        assert!(app_state.gate.user().is_some_and(|u| u.is_anonymous));

        run(
            &mut app_state,
            &mut ui_state,
            vec![
                UiAction::UpdateForms(AuthForms {
                    sign_up_email: "player@example.com".to_owned(),
                    sign_up_password: "secret1".to_owned(),
                    ..AuthForms::default()
                })
                .into(),
                FlowAction::SignUp.into(),
            ],
        );
        settle(&mut app_state, &mut ui_state);

        assert!(app_state.gate.is_unlocked());
        assert!(ui_state.forms.sign_up_password.is_empty());
        assert_eq!(ui_state.forms.sign_up_email, "player@example.com");
        assert!(!ui_state.spinner_state.is_active());

        handle(&mut app_state, &mut ui_state, FlowAction::SignOut.into());
        settle(&mut app_state, &mut ui_state);
        assert!(!app_state.gate.is_unlocked());
    }

    #[test]
    fn short_sign_up_password_sets_message() {
        let (mut app_state, mut ui_state) = states();
        ui_state.forms.sign_up_password = "12345".to_owned();
        handle(&mut app_state, &mut ui_state, FlowAction::SignUp.into());
        settle(&mut app_state, &mut ui_state);
        assert_eq!(
            ui_state.form_messages.sign_up,
            Some(FormMessage::error("Password must be at least 6 characters."))
        );

        handle(
            &mut app_state,
            &mut ui_state,
            UiAction::SetFormMessage {
                form: AuthFormKind::SignUp,
                message: None,
            }
            .into(),
        );
        assert_eq!(ui_state.form_messages.sign_up, None);
    }
}
