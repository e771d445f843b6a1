use std::time::Duration;

use chessunlocked_catalog::{Opening, OpeningStep};
use chessunlocked_core::BoardSurface;

use crate::PlayerError;

/// Default delay between automatic advances.
pub const DEFAULT_PLAYBACK_INTERVAL: Duration = Duration::from_millis(1500);

/// Identifies one scheduled automatic advance.
///
/// Each call to [`OpeningPlayer::play`] that starts playback issues a fresh
/// handle. Once playback stops for any reason the handle is dead, and ticks
/// delivered with it are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Observable state of an [`OpeningPlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PlaybackState {
    /// No opening selected.
    Idle,
    /// Stopped at the given step index.
    Paused(usize),
    /// Advancing automatically; currently at the given step index.
    Playing(usize),
}

impl PlaybackState {
    /// Returns the current step index, if an opening is selected.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Paused(i) | Self::Playing(i) => Some(i),
        }
    }
}

/// Result of delivering one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// Moved to the given step and keeps playing.
    Advanced(usize),
    /// Stopped at the given (final) step.
    Finished(usize),
    /// The tick was stale or nothing was playing.
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    handle: TimerHandle,
    elapsed: Duration,
}

#[derive(Debug, Clone)]
struct PlaybackCursor {
    opening: usize,
    index: usize,
    timer: Option<ActiveTimer>,
}

/// Steps through a named opening, manually or on a timer.
///
/// # Example
///
/// ```
/// use chessunlocked_catalog::{Opening, OpeningStep};
/// use chessunlocked_core::{BoardState, BoardSurface, render};
/// use chessunlocked_trainer::{
///     DEFAULT_PLAYBACK_INTERVAL, OpeningPlayer, PlaybackState, PlayerError,
/// };
///
/// let start = BoardState::starting_position();
/// let e4: BoardState =
///     "rnbqkbnr/pppppppp/......../......../....P.../......../PPPP.PPP/RNBQKBNR"
///         .parse()
///         .unwrap();
/// let opening = Opening::new(
///     "King's Pawn",
///     vec![OpeningStep::new(start, "Start"), OpeningStep::new(e4.clone(), "1.e4")],
/// )
/// .unwrap();
///
/// let mut player = OpeningPlayer::new(vec![opening], DEFAULT_PLAYBACK_INTERVAL);
/// let mut surface = BoardSurface::new();
///
/// assert_eq!(player.play(), Err(PlayerError::NoOpeningSelected));
///
/// player.select_opening("King's Pawn", &mut surface).unwrap();
/// player.step_forward(&mut surface).unwrap();
/// player.step_forward(&mut surface).unwrap(); // clamped
///
/// assert_eq!(player.state(), PlaybackState::Paused(1));
/// assert_eq!(surface.view(), Some(&render(&e4)));
/// ```
#[derive(Debug, Clone)]
pub struct OpeningPlayer {
    openings: Vec<Opening>,
    interval: Duration,
    cursor: Option<PlaybackCursor>,
    next_timer_id: u64,
}

impl OpeningPlayer {
    /// Creates an idle player over the configured openings.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub fn new(openings: Vec<Opening>, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "playback interval must be non-zero");
        Self {
            openings,
            interval,
            cursor: None,
            next_timer_id: 0,
        }
    }

    /// Returns the configured openings.
    #[must_use]
    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    /// Returns the delay between automatic advances.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        match &self.cursor {
            None => PlaybackState::Idle,
            Some(cursor) if cursor.timer.is_some() => PlaybackState::Playing(cursor.index),
            Some(cursor) => PlaybackState::Paused(cursor.index),
        }
    }

    /// Returns the selected opening.
    #[must_use]
    pub fn current_opening(&self) -> Option<&Opening> {
        self.cursor.as_ref().map(|c| &self.openings[c.opening])
    }

    /// Returns the step under the cursor.
    #[must_use]
    pub fn current_step(&self) -> Option<&OpeningStep> {
        let cursor = self.cursor.as_ref()?;
        self.openings[cursor.opening].step(cursor.index)
    }

    /// Returns the handle of the pending automatic advance, if playing.
    #[must_use]
    pub fn active_timer(&self) -> Option<TimerHandle> {
        self.cursor
            .as_ref()
            .and_then(|c| c.timer.as_ref())
            .map(|t| t.handle)
    }

    /// Selects an opening by name and shows its first step, paused.
    ///
    /// Any running playback is cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::UnknownOpening`] if no opening has this name; the
    /// current selection is left untouched.
    pub fn select_opening(
        &mut self,
        name: &str,
        surface: &mut BoardSurface,
    ) -> Result<(), PlayerError> {
        let opening = self
            .openings
            .iter()
            .position(|o| o.name() == name)
            .ok_or_else(|| PlayerError::UnknownOpening {
                name: name.to_owned(),
            })?;

        self.cursor = Some(PlaybackCursor {
            opening,
            index: 0,
            timer: None,
        });
        log::debug!("selected opening {name:?}");
        self.present(surface);
        Ok(())
    }

    /// Starts automatic playback from the current step.
    ///
    /// Already playing is a no-op that returns the active handle.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::NoOpeningSelected`] when idle.
    pub fn play(&mut self) -> Result<TimerHandle, PlayerError> {
        let cursor = self
            .cursor
            .as_mut()
            .ok_or(PlayerError::NoOpeningSelected)?;
        if let Some(timer) = &cursor.timer {
            return Ok(timer.handle);
        }

        let handle = TimerHandle(self.next_timer_id);
        self.next_timer_id += 1;
        cursor.timer = Some(ActiveTimer {
            handle,
            elapsed: Duration::ZERO,
        });
        log::debug!("playback started at step {}", cursor.index);
        Ok(handle)
    }

    /// Stops automatic playback, keeping the position.
    ///
    /// Returns `true` if a pending advance was cancelled.
    pub fn pause(&mut self) -> bool {
        let cancelled = self
            .cursor
            .as_mut()
            .and_then(|c| c.timer.take())
            .is_some();
        if cancelled {
            log::debug!("playback paused");
        }
        cancelled
    }

    /// Moves one step forward, pausing first. Clamped at the last step.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::NoOpeningSelected`] when idle.
    pub fn step_forward(&mut self, surface: &mut BoardSurface) -> Result<usize, PlayerError> {
        self.step_by(surface, |index, last| (index < last).then(|| index + 1))
    }

    /// Moves one step backward, pausing first. Clamped at step 0.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::NoOpeningSelected`] when idle.
    pub fn step_backward(&mut self, surface: &mut BoardSurface) -> Result<usize, PlayerError> {
        self.step_by(surface, |index, _last| index.checked_sub(1))
    }

    /// Returns to the first step, paused.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::NoOpeningSelected`] when idle.
    pub fn reset(&mut self, surface: &mut BoardSurface) -> Result<(), PlayerError> {
        let cursor = self
            .cursor
            .as_mut()
            .ok_or(PlayerError::NoOpeningSelected)?;
        cursor.timer = None;
        cursor.index = 0;
        self.present(surface);
        Ok(())
    }

    /// Delivers a timer tick for `handle`.
    ///
    /// Ticks for a cancelled or superseded handle are ignored. A delivered
    /// tick restarts the interval, discarding time fed via
    /// [`advance_clock`](Self::advance_clock).
    pub fn fire(&mut self, handle: TimerHandle, surface: &mut BoardSurface) -> TickOutcome {
        if self.active_timer() != Some(handle) {
            return TickOutcome::Ignored;
        }
        if let Some(timer) = self.cursor.as_mut().and_then(|c| c.timer.as_mut()) {
            timer.elapsed = Duration::ZERO;
        }
        self.tick(surface)
    }

    /// Feeds elapsed time to the playback timer.
    ///
    /// Delivers one tick per full interval accumulated since playback started
    /// or since the previous tick. Returns the number of steps advanced.
    pub fn advance_clock(&mut self, elapsed: Duration, surface: &mut BoardSurface) -> usize {
        let interval = self.interval;
        let mut advanced = 0;
        let Some(timer) = self.cursor.as_mut().and_then(|c| c.timer.as_mut()) else {
            return 0;
        };
        timer.elapsed += elapsed;

        loop {
            let Some(timer) = self.cursor.as_mut().and_then(|c| c.timer.as_mut()) else {
                break;
            };
            if timer.elapsed < interval {
                break;
            }
            timer.elapsed -= interval;
            let before = self.cursor.as_ref().map(|c| c.index);
            match self.tick(surface) {
                TickOutcome::Advanced(_) => advanced += 1,
                TickOutcome::Finished(index) => {
                    if before != Some(index) {
                        advanced += 1;
                    }
                    break;
                }
                TickOutcome::Ignored => break,
            }
        }
        advanced
    }

    /// Returns the time left until the next automatic advance, if playing.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        let timer = self.cursor.as_ref()?.timer.as_ref()?;
        Some(self.interval.saturating_sub(timer.elapsed))
    }

    fn tick(&mut self, surface: &mut BoardSurface) -> TickOutcome {
        let Some(cursor) = self.cursor.as_mut() else {
            return TickOutcome::Ignored;
        };
        if cursor.timer.is_none() {
            return TickOutcome::Ignored;
        }
        let last = self.openings[cursor.opening].last_index();

        if cursor.index >= last {
            cursor.timer = None;
            log::debug!("playback finished at step {}", cursor.index);
            return TickOutcome::Finished(cursor.index);
        }

        cursor.index += 1;
        let index = cursor.index;
        if index == last {
            cursor.timer = None;
            log::debug!("playback finished at step {index}");
        }
        self.present(surface);
        if index == last {
            TickOutcome::Finished(index)
        } else {
            TickOutcome::Advanced(index)
        }
    }

    fn step_by<F>(&mut self, surface: &mut BoardSurface, next: F) -> Result<usize, PlayerError>
    where
        F: FnOnce(usize, usize) -> Option<usize>,
    {
        let cursor = self
            .cursor
            .as_mut()
            .ok_or(PlayerError::NoOpeningSelected)?;
        cursor.timer = None;

        let last = self.openings[cursor.opening].last_index();
        let Some(index) = next(cursor.index, last) else {
            return Ok(cursor.index);
        };
        cursor.index = index;
        self.present(surface);
        Ok(index)
    }

    fn present(&self, surface: &mut BoardSurface) {
        if let Some(step) = self.current_step() {
            surface.present(step.board());
        }
    }
}

#[cfg(test)]
mod tests {
    use chessunlocked_core::{BoardState, render};
    use proptest::prelude::*;

    use super::*;

    const INTERVAL: Duration = Duration::from_millis(1000);

    const RUY_LOPEZ: [(&str, &str); 4] = [
        (
            "Start",
            "rnbqkbnr/pppppppp/......../......../......../......../PPPPPPPP/RNBQKBNR",
        ),
        (
            "1.e4",
            "rnbqkbnr/pppppppp/......../......../....P.../......../PPPP.PPP/RNBQKBNR",
        ),
        (
            "1...e5",
            "rnbqkbnr/pppp.ppp/......../....p.../....P.../......../PPPP.PPP/RNBQKBNR",
        ),
        (
            "2.Nf3",
            "rnbqkbnr/pppp.ppp/......../....p.../....P.../.....N../PPPP.PPP/RNBQKB.R",
        ),
    ];

    fn board(rows: &str) -> BoardState {
        rows.parse().unwrap()
    }

    fn ruy_lopez() -> Opening {
        let steps = RUY_LOPEZ
            .iter()
            .enumerate()
            .map(|(i, (label, rows))| {
                let step = OpeningStep::new(board(rows), *label);
                if i == 0 {
                    step.with_position_name("Starting Position")
                } else {
                    step
                }
            })
            .collect();
        Opening::new("Ruy Lopez", steps).unwrap()
    }

    fn opening_of_len(name: &str, len: usize) -> Opening {
        let steps = (0..len)
            .map(|i| OpeningStep::new(BoardState::starting_position(), format!("{i}")))
            .collect();
        Opening::new(name, steps).unwrap()
    }

    fn player() -> (OpeningPlayer, BoardSurface) {
        let openings = vec![ruy_lopez(), opening_of_len("Single", 1)];
        (OpeningPlayer::new(openings, INTERVAL), BoardSurface::new())
    }

    #[test]
    fn ruy_lopez_scenario() {
        let (mut player, mut surface) = player();

        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        assert_eq!(player.state(), PlaybackState::Paused(0));
        assert_eq!(
            player.current_step().unwrap().display_label(),
            "Starting Position"
        );
        assert_eq!(surface.view(), Some(&render(&board(RUY_LOPEZ[0].1))));

        let handle = player.play().unwrap();
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Advanced(1));
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Advanced(2));
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Finished(3));

        assert_eq!(player.state(), PlaybackState::Paused(3));
        assert_eq!(player.current_step().unwrap().move_label(), "2.Nf3");
        assert_eq!(surface.view(), Some(&render(&board(RUY_LOPEZ[3].1))));

        // A fourth tick does nothing.
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Ignored);
        assert_eq!(player.advance_clock(INTERVAL * 5, &mut surface), 0);
        assert_eq!(player.state(), PlaybackState::Paused(3));
    }

    #[test]
    fn select_unknown_opening_keeps_cursor() {
        let (mut player, mut surface) = player();
        assert_eq!(
            player.select_opening("Nope", &mut surface),
            Err(PlayerError::UnknownOpening {
                name: "Nope".to_owned()
            })
        );
        assert_eq!(player.state(), PlaybackState::Idle);
        assert!(surface.view().is_none());

        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        player.step_forward(&mut surface).unwrap();
        let handle = player.play().unwrap();

        assert!(player.select_opening("Nope", &mut surface).is_err());
        assert_eq!(player.state(), PlaybackState::Playing(1));
        assert_eq!(player.active_timer(), Some(handle));
        assert_eq!(player.current_opening().unwrap().name(), "Ruy Lopez");
    }

    #[test]
    fn idle_operations_report_no_opening() {
        let (mut player, mut surface) = player();
        assert_eq!(player.play(), Err(PlayerError::NoOpeningSelected));
        assert_eq!(
            player.step_forward(&mut surface),
            Err(PlayerError::NoOpeningSelected)
        );
        assert_eq!(
            player.step_backward(&mut surface),
            Err(PlayerError::NoOpeningSelected)
        );
        assert_eq!(
            player.reset(&mut surface),
            Err(PlayerError::NoOpeningSelected)
        );
        assert!(!player.pause());
        assert_eq!(player.state(), PlaybackState::Idle);
    }

    #[test]
    fn play_while_playing_keeps_single_timer() {
        let (mut player, mut surface) = player();
        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        let first = player.play().unwrap();
        let second = player.play().unwrap();
        assert_eq!(first, second);

        assert_eq!(player.advance_clock(INTERVAL, &mut surface), 1);
        assert_eq!(player.state(), PlaybackState::Playing(1));
    }

    #[test]
    fn step_forward_during_playback_pauses() {
        let (mut player, mut surface) = player();
        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        let handle = player.play().unwrap();
        player.fire(handle, &mut surface);
        assert_eq!(player.state(), PlaybackState::Playing(1));

        assert_eq!(player.step_forward(&mut surface), Ok(2));
        assert_eq!(player.state(), PlaybackState::Paused(2));

        // The cancelled timer can no longer move the cursor.
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Ignored);
        assert_eq!(player.advance_clock(INTERVAL * 3, &mut surface), 0);
        assert_eq!(player.state(), PlaybackState::Paused(2));
        assert_eq!(surface.view(), Some(&render(&board(RUY_LOPEZ[2].1))));
    }

    #[test]
    fn step_backward_during_playback_pauses() {
        let (mut player, mut surface) = player();
        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        player.play().unwrap();
        player.advance_clock(INTERVAL * 2, &mut surface);
        assert_eq!(player.state(), PlaybackState::Playing(2));

        assert_eq!(player.step_backward(&mut surface), Ok(1));
        assert_eq!(player.state(), PlaybackState::Paused(1));
        assert_eq!(player.step_backward(&mut surface), Ok(0));
        assert_eq!(player.step_backward(&mut surface), Ok(0));
        assert_eq!(player.state(), PlaybackState::Paused(0));
    }

    #[test]
    fn pause_is_idempotent_and_keeps_position() {
        let (mut player, mut surface) = player();
        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        let handle = player.play().unwrap();
        player.advance_clock(INTERVAL, &mut surface);

        assert!(player.pause());
        assert!(!player.pause());
        assert_eq!(player.state(), PlaybackState::Paused(1));
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Ignored);

        // Resuming issues a new handle; the old one stays dead.
        let resumed = player.play().unwrap();
        assert_ne!(resumed, handle);
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Ignored);
        assert_eq!(player.fire(resumed, &mut surface), TickOutcome::Advanced(2));
    }

    #[test]
    fn reselect_cancels_pending_timer() {
        let (mut player, mut surface) = player();
        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        let handle = player.play().unwrap();
        player.advance_clock(INTERVAL / 2, &mut surface);

        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        assert_eq!(player.state(), PlaybackState::Paused(0));
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Ignored);
        assert_eq!(player.advance_clock(INTERVAL, &mut surface), 0);
        assert_eq!(player.state(), PlaybackState::Paused(0));
    }

    #[test]
    fn reset_returns_to_start() {
        let (mut player, mut surface) = player();
        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        player.play().unwrap();
        player.advance_clock(INTERVAL * 2, &mut surface);

        player.reset(&mut surface).unwrap();
        assert_eq!(player.state(), PlaybackState::Paused(0));
        assert_eq!(player.active_timer(), None);
        assert_eq!(surface.view(), Some(&render(&board(RUY_LOPEZ[0].1))));
    }

    #[test]
    fn partial_intervals_accumulate() {
        let (mut player, mut surface) = player();
        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        player.play().unwrap();

        assert_eq!(player.advance_clock(INTERVAL * 2 / 5, &mut surface), 0);
        assert_eq!(
            player.time_until_next_tick(),
            Some(INTERVAL - INTERVAL * 2 / 5)
        );
        assert_eq!(player.advance_clock(INTERVAL * 3 / 5, &mut surface), 1);
        assert_eq!(player.state(), PlaybackState::Playing(1));
    }

    #[test]
    fn play_at_last_step_stops_on_next_tick() {
        let (mut player, mut surface) = player();
        player.select_opening("Single", &mut surface).unwrap();
        let handle = player.play().unwrap();
        assert_eq!(player.state(), PlaybackState::Playing(0));
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Finished(0));
        assert_eq!(player.state(), PlaybackState::Paused(0));
    }

    #[test]
    fn finishing_on_last_step_counts_no_advance() {
        let (mut player, mut surface) = player();
        player.select_opening("Single", &mut surface).unwrap();
        player.play().unwrap();
        assert_eq!(player.advance_clock(INTERVAL, &mut surface), 0);
        assert_eq!(player.state(), PlaybackState::Paused(0));

        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        player.step_forward(&mut surface).unwrap();
        player.step_forward(&mut surface).unwrap();
        player.play().unwrap();
        assert_eq!(player.advance_clock(INTERVAL * 5, &mut surface), 1);
        assert_eq!(player.state(), PlaybackState::Paused(3));
    }

    #[test]
    fn fired_tick_restarts_interval() {
        let (mut player, mut surface) = player();
        player.select_opening("Ruy Lopez", &mut surface).unwrap();
        let handle = player.play().unwrap();

        assert_eq!(player.advance_clock(INTERVAL * 4 / 5, &mut surface), 0);
        assert_eq!(player.fire(handle, &mut surface), TickOutcome::Advanced(1));
        assert_eq!(player.time_until_next_tick(), Some(INTERVAL));
        assert_eq!(player.advance_clock(INTERVAL * 4 / 5, &mut surface), 0);
        assert_eq!(player.state(), PlaybackState::Playing(1));
    }

    proptest! {
        #[test]
        fn prop_step_forward_reaches_last_after_len_minus_one(len in 1usize..20, extra in 0usize..5) {
            let mut player = OpeningPlayer::new(vec![opening_of_len("O", len)], INTERVAL);
            let mut surface = BoardSurface::new();
            player.select_opening("O", &mut surface).unwrap();
            for expected in 1..len {
                prop_assert_eq!(player.step_forward(&mut surface), Ok(expected));
            }
            prop_assert_eq!(player.state(), PlaybackState::Paused(len - 1));
            for _ in 0..extra {
                prop_assert_eq!(player.step_forward(&mut surface), Ok(len - 1));
            }
            prop_assert_eq!(player.state(), PlaybackState::Paused(len - 1));
        }

        #[test]
        fn prop_playback_stops_at_last_step(len in 2usize..20) {
            let mut player = OpeningPlayer::new(vec![opening_of_len("O", len)], INTERVAL);
            let mut surface = BoardSurface::new();
            player.select_opening("O", &mut surface).unwrap();
            let handle = player.play().unwrap();
            for _ in 0..len - 1 {
                prop_assert!(!player.fire(handle, &mut surface).is_ignored());
            }
            prop_assert_eq!(player.state(), PlaybackState::Paused(len - 1));
            prop_assert_eq!(player.advance_clock(INTERVAL * 10, &mut surface), 0);
            prop_assert_eq!(player.state(), PlaybackState::Paused(len - 1));
        }
    }
}
