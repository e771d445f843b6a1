use std::time::Duration;

use chessunlocked_catalog::Catalog;
use chessunlocked_core::BoardSurface;
use chessunlocked_trainer::{DrillEngine, OpeningPlayer, OptionOrder};

use crate::session::{SessionGate, SessionServices};

/// Trainer settings taken from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TrainerSettings {
    pub(crate) interval: Duration,
    pub(crate) option_order: OptionOrder,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            interval: chessunlocked_trainer::DEFAULT_PLAYBACK_INTERVAL,
            option_order: OptionOrder::Authored,
        }
    }
}

// AppState holds the trainer components, the shared board surface, and the session.
#[derive(Debug)]
pub(crate) struct AppState {
    pub(crate) player: OpeningPlayer,
    pub(crate) drills: DrillEngine,
    pub(crate) surface: BoardSurface,
    pub(crate) gate: SessionGate,
    pub(crate) services: SessionServices,
}

impl AppState {
    #[must_use]
    pub(crate) fn new(
        catalog: Catalog,
        settings: TrainerSettings,
        services: SessionServices,
    ) -> Self {
        let (openings, drills) = catalog.into_parts();
        Self {
            player: OpeningPlayer::new(openings, settings.interval),
            drills: DrillEngine::new(drills).with_option_order(settings.option_order),
            surface: BoardSurface::new(),
            gate: SessionGate::new(),
            services,
        }
    }
}
