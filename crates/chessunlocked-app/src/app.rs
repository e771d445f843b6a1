//! ChessUnlocked application shell.
//!
//! # Design Notes
//! - The trainer stays hidden until a full (non-anonymous) account is signed
//!   in; an anonymous session is started at launch.
//! - Opening playback is timed from the frame clock (`InputState::time`), so
//!   the same code drives native and web builds.
//! - The board is shared: whichever panel acted last owns it.

use std::time::Duration;

use eframe::{
    App, CreationContext, Frame,
    egui::{CentralPanel, Context, RichText, TopBottomPanel},
};

use crate::{
    action::{self, ActionRequestQueue, ClockAction, FlowAction},
    config::AppConfig,
    flow,
    session::SessionServices,
    state::{AppState, TrainerSettings, UiState},
    ui, version, view_model_builder,
};

#[derive(Debug)]
pub struct ChessUnlockedApp {
    app_state: AppState,
    ui_state: UiState,
    last_frame_time: Option<f64>,
}

impl ChessUnlockedApp {
    /// Creates the app backed by the in-process session provider and profile
    /// store.
    #[must_use]
    pub fn new(cc: &CreationContext<'_>, config: AppConfig) -> Self {
        let services = SessionServices::local(config.app_id.clone());
        Self::with_services(cc, config, services)
    }

    /// Creates the app with injected session capabilities.
    ///
    /// `config.app_id` is not used; `services` carries its own namespace.
    #[must_use]
    pub fn with_services(
        _cc: &CreationContext<'_>,
        config: AppConfig,
        services: SessionServices,
    ) -> Self {
        let AppConfig {
            catalog,
            interval,
            option_order,
            app_id: _,
        } = config;
        log::info!(
            "starting with {} openings and {} drills",
            catalog.openings().len(),
            catalog.drills().len()
        );
        let settings = TrainerSettings {
            interval,
            option_order,
        };
        Self::from_states(
            AppState::new(catalog, settings, services),
            UiState::new(),
        )
    }

    fn from_states(mut app_state: AppState, mut ui_state: UiState) -> Self {
        flow::connect_session_listener(&ui_state.executor, &app_state.services);

        let mut action_queue = ActionRequestQueue::default();
        action_queue.request(FlowAction::SignInAnonymously.into());
        action::handler::handle_all(&mut app_state, &mut ui_state, &mut action_queue);

        Self {
            app_state,
            ui_state,
            last_frame_time: None,
        }
    }

    fn frame_elapsed(&mut self, now: f64) -> Duration {
        let elapsed = self
            .last_frame_time
            .map_or(0.0, |last| (now - last).max(0.0));
        self.last_frame_time = Some(now);
        Duration::try_from_secs_f64(elapsed).unwrap_or_default()
    }
}

impl App for ChessUnlockedApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let mut action_queue = ActionRequestQueue::default();

        self.ui_state.executor.poll(&mut action_queue);
        action::handler::handle_all(&mut self.app_state, &mut self.ui_state, &mut action_queue);

        let elapsed = self.frame_elapsed(ctx.input(|i| i.time));
        action_queue.request(ClockAction::Advance(elapsed).into());
        action::handler::handle_all(&mut self.app_state, &mut self.ui_state, &mut action_queue);

        if self.app_state.gate.is_unlocked()
            && !self.ui_state.spinner_state.is_active()
            && !ctx.wants_keyboard_input()
        {
            ctx.input(|i| {
                ui::input::handle_input(i, self.ui_state.panel, &mut action_queue);
            });
            action::handler::handle_all(&mut self.app_state, &mut self.ui_state, &mut action_queue);
        }

        let screen_vm =
            view_model_builder::build_trainer_screen_vm(&self.app_state, &self.ui_state);

        TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.label(
                RichText::new(format!("ChessUnlocked {}", version::build_version()))
                    .small()
                    .weak(),
            );
        });
        CentralPanel::default().show(ctx, |ui| {
            ui::trainer_screen::show(ui, &screen_vm, &mut action_queue);
        });

        if let Some(spinner) = self.ui_state.spinner_state.active_kind() {
            ui::spinner::show(ctx, spinner);
        }

        action::handler::handle_all(&mut self.app_state, &mut self.ui_state, &mut action_queue);

        if let Some(wait) = self.app_state.player.time_until_next_tick() {
            ctx.request_repaint_after(wait);
        }
        if !self.ui_state.executor.is_idle() {
            ctx.request_repaint();
        }
    }
}
