use chessunlocked_core::BoardSurface;

use crate::{
    state::{AppState, TrainerPanel, UiState},
    ui::{
        board::{BoardSquare, BoardViewModel, SquareVisualState},
        drill_panel::{DrillInfo, DrillPanelViewModel},
        opening_panel::{OpeningPanelViewModel, StepInfo},
        session_panel::SessionPanelViewModel,
        trainer_screen::{TrainerScreenViewModel, TrainerViewModel},
    },
};

#[must_use]
pub(crate) fn build_board_vm(surface: &BoardSurface, panel: TrainerPanel) -> BoardViewModel {
    let placeholder = match panel {
        TrainerPanel::Openings => "Select an opening",
        TrainerPanel::Drills => "Load a drill",
    };
    let changed = surface.changed();
    let squares = surface.view().map(|view| {
        view.squares()
            .iter()
            .map(|&rendered| {
                let mut visual_state = SquareVisualState::empty();
                if changed.contains(rendered.square) {
                    visual_state |= if rendered.piece.is_some() {
                        SquareVisualState::MOVED_TO
                    } else {
                        SquareVisualState::MOVED_FROM
                    };
                }
                BoardSquare {
                    rendered,
                    visual_state,
                }
            })
            .collect()
    });
    BoardViewModel::new(squares, placeholder)
}

#[must_use]
pub(crate) fn build_opening_panel_vm(app_state: &AppState) -> OpeningPanelViewModel<'_> {
    let player = &app_state.player;
    let openings = player.openings().iter().map(|o| o.name()).collect();
    let state = player.state();
    let step = player
        .current_opening()
        .zip(player.current_step())
        .zip(state.index())
        .map(|((opening, step), index)| StepInfo {
            label: step.display_label(),
            move_label: step.move_label(),
            number: index + 1,
            count: opening.len(),
        });
    OpeningPanelViewModel::new(
        openings,
        player.current_opening().map(|o| o.name()),
        state,
        step,
    )
}

#[must_use]
pub(crate) fn build_drill_panel_vm(app_state: &AppState) -> DrillPanelViewModel<'_> {
    let drills = &app_state.drills;
    let drill = drills.current().map(|(index, drill)| DrillInfo {
        number: index + 1,
        prompt: drill.prompt(),
        opening: drill.opening(),
        options: drills.presented_options(),
        verdict: drills.verdict(),
    });
    DrillPanelViewModel::new(drills.len(), drill)
}

#[must_use]
pub(crate) fn build_trainer_screen_vm<'a>(
    app_state: &'a AppState,
    ui_state: &'a UiState,
) -> TrainerScreenViewModel<'a> {
    let gate = &app_state.gate;
    let session_vm = SessionPanelViewModel::new(
        gate.user(),
        gate.is_unlocked(),
        &ui_state.forms,
        &ui_state.form_messages,
        !ui_state.executor.is_idle() || ui_state.spinner_state.is_active(),
    );
    let trainer = gate.is_unlocked().then(|| TrainerViewModel {
        panel: ui_state.panel,
        board_vm: build_board_vm(&app_state.surface, ui_state.panel),
        opening_vm: build_opening_panel_vm(app_state),
        drill_vm: build_drill_panel_vm(app_state),
        message: ui_state.trainer_message.as_deref(),
    });
    TrainerScreenViewModel::new(session_vm, trainer)
}

#[cfg(test)]
mod tests {
    use chessunlocked_catalog::Catalog;
    use chessunlocked_core::{BoardState, Square};
    use chessunlocked_trainer::OptionMark;

    use super::*;
    use crate::{
        action::{DrillAction, PlayerAction, SessionAction, handler::handle},
        session::{SessionServices, SessionUser},
        state::TrainerSettings,
    };

    fn states() -> (AppState, UiState) {
        let app_state = AppState::new(
            Catalog::builtin().unwrap(),
            TrainerSettings::default(),
            SessionServices::local("test-app"),
        );
        (app_state, UiState::new())
    }

    fn sign_in(app_state: &mut AppState, ui_state: &mut UiState) {
        let user = SessionUser::registered("u1", "player@example.com");
        handle(app_state, ui_state, SessionAction::Changed(Some(user)).into());
    }

    #[test]
    fn blank_surface_has_no_squares() {
        let vm = build_board_vm(&BoardSurface::new(), TrainerPanel::Openings);
        assert!(vm.squares().is_none());
    }

    #[test]
    fn board_marks_move_origin_and_destination() {
        let mut surface = BoardSurface::new();
        surface.present(&BoardState::starting_position());
        let after_e4 = BoardState::from_rows(&[
            "rnbqkbnr", "pppppppp", "........", "........", "....P...", "........", "PPPP.PPP",
            "RNBQKBNR",
        ])
        .unwrap();
        surface.present(&after_e4);

        let vm = build_board_vm(&surface, TrainerPanel::Openings);
        let squares = vm.squares().unwrap();
        assert_eq!(squares.len(), 64);
        let state_at = |sq: Square| squares[sq.index()].visual_state;
        assert_eq!(state_at(Square::new(4, 4)), SquareVisualState::MOVED_TO);
        assert_eq!(state_at(Square::new(6, 4)), SquareVisualState::MOVED_FROM);
        assert_eq!(state_at(Square::new(0, 0)), SquareVisualState::empty());
    }

    #[test]
    fn locked_screen_hides_trainer() {
        let (app_state, ui_state) = states();
        let vm = build_trainer_screen_vm(&app_state, &ui_state);
        assert!(vm.trainer.is_none());
    }

    #[test]
    fn opening_panel_reports_step_position() {
        let (mut app_state, mut ui_state) = states();
        sign_in(&mut app_state, &mut ui_state);
        for action in [
            PlayerAction::SelectOpening("Ruy Lopez".to_owned()),
            PlayerAction::StepForward,
        ] {
            handle(&mut app_state, &mut ui_state, action.into());
        }

        let vm = build_trainer_screen_vm(&app_state, &ui_state);
        let trainer = vm.trainer.unwrap();
        let step = trainer.opening_vm.step().unwrap();
        assert_eq!(step.move_label, "1.e4");
        assert_eq!((step.number, step.count), (2, 6));
        assert!(trainer.board_vm.squares().is_some());
    }

    #[test]
    fn drill_panel_carries_marks() {
        let (mut app_state, mut ui_state) = states();
        sign_in(&mut app_state, &mut ui_state);
        handle(&mut app_state, &mut ui_state, DrillAction::Load(0).into());
        handle(
            &mut app_state,
            &mut ui_state,
            DrillAction::Submit("Bb5".to_owned()).into(),
        );

        let vm = build_drill_panel_vm(&app_state);
        let drill = vm.drill().unwrap();
        assert_eq!(drill.number, 1);
        assert_eq!(drill.opening, Some("Ruy Lopez"));
        let correct: Vec<_> = drill
            .options
            .iter()
            .filter(|o| o.mark == OptionMark::Correct)
            .map(|o| o.text)
            .collect();
        assert_eq!(correct, ["Bb5"]);
    }
}
