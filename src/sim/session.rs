//! Session lifecycle: Idle -> Running <-> Paused -> Ended
//!
//! The session owns the run's [`GameState`] and republishes a read-only
//! [`SessionView`] after every committed tick or lifecycle change. Misused
//! lifecycle calls (resume before start, tick after end) are no-ops that
//! return `false`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::powerup::PowerUp;
use super::state::{EndCause, GameEvent, GameState};
use super::tick::{TickInput, finish, tick};
use crate::tuning::{RunnerTuning, TuningError};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No run started yet
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal until the next `start`
    Ended,
}

/// What the presentation layer may read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub score: u64,
    pub game_over: bool,
    pub show_end_screen: bool,
    pub paused: bool,
    /// Transient "speed increased" banner
    pub speed_up_notice: bool,
    /// Remaining shield hits (Shield runs only)
    pub shield_remaining: Option<u32>,
    pub end_cause: Option<EndCause>,
}

/// Drives one run at a time
#[derive(Debug, Clone)]
pub struct GameSession {
    tuning: RunnerTuning,
    phase: SessionPhase,
    state: Option<GameState>,
    /// Ticks left on the speed-up notice
    notice_ticks: u32,
    view: SessionView,
    /// Source of seeds for `start_with`
    seeds: Pcg32,
}

impl GameSession {
    /// New idle session; the tuning is validated before any run can use it
    pub fn new(tuning: RunnerTuning) -> Result<Self, TuningError> {
        Self::with_seed_source(tuning, 0x5eed_5107_e000_0001)
    }

    /// Session whose `start_with` seeds come from a fixed sequence
    pub fn with_seed_source(tuning: RunnerTuning, seed_source: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            phase: SessionPhase::Idle,
            state: None,
            notice_ticks: 0,
            view: SessionView::default(),
            seeds: Pcg32::seed_from_u64(seed_source),
        })
    }

    pub fn tuning(&self) -> &RunnerTuning {
        &self.tuning
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Last committed view
    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Current (or last) run state; `None` before the first start
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Start a fresh run with an already-paid selection and explicit seed.
    /// Any previous run is discarded.
    pub fn start(&mut self, selection: PowerUp, seed: u64) {
        self.state = Some(GameState::new(seed, selection, &self.tuning));
        self.phase = SessionPhase::Running;
        self.notice_ticks = 0;
        log::info!("Started run with seed {} and power-up {}", seed, selection.as_str());
        self.publish();
    }

    /// Start a fresh run seeded from the session's seed sequence; returns the seed used
    pub fn start_with(&mut self, selection: PowerUp) -> u64 {
        let seed = self.seeds.random::<u64>();
        self.start(selection, seed);
        seed
    }

    /// Continue a previously saved (or scripted) run
    pub fn restore(&mut self, state: GameState) {
        self.phase = if state.is_finished() {
            SessionPhase::Ended
        } else {
            SessionPhase::Running
        };
        log::info!("Restored run with seed {} at tick {}", state.seed, state.time_ticks);
        self.state = Some(state);
        self.notice_ticks = 0;
        self.publish();
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            log::warn!("pause ignored in {:?}", self.phase);
            return false;
        }
        self.phase = SessionPhase::Paused;
        self.publish();
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != SessionPhase::Paused {
            log::warn!("resume ignored in {:?}", self.phase);
            return false;
        }
        self.phase = SessionPhase::Running;
        self.publish();
        true
    }

    /// Advance one tick. Only a running session does anything.
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        if self.phase != SessionPhase::Running {
            return Vec::new();
        }
        let Some(state) = self.state.as_mut() else {
            return Vec::new();
        };

        let events = tick(state, input, &self.tuning);

        self.notice_ticks = self.notice_ticks.saturating_sub(1);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::SpeedIncreased { .. }))
        {
            self.notice_ticks = self.tuning.speed_up_notice_ticks;
        }
        if state.is_finished() {
            self.phase = SessionPhase::Ended;
        }

        self.publish();
        events
    }

    /// End the run from outside the tick (idempotent). Returns `true` if this call ended it.
    pub fn trigger_game_over(&mut self, cause: EndCause) -> bool {
        if matches!(self.phase, SessionPhase::Idle | SessionPhase::Ended) {
            return false;
        }
        if let Some(state) = self.state.as_mut() {
            finish(state, cause, &mut Vec::new());
        }
        self.phase = SessionPhase::Ended;
        self.publish();
        true
    }

    /// Leave the run voluntarily, from running or paused
    pub fn quit(&mut self) -> bool {
        self.trigger_game_over(EndCause::Quit)
    }

    /// Final score once ended
    pub fn final_score(&self) -> Option<u64> {
        match self.phase {
            SessionPhase::Ended => self.state.as_ref().map(|s| s.score),
            _ => None,
        }
    }

    fn publish(&mut self) {
        let ended = self.phase == SessionPhase::Ended;
        self.view = SessionView {
            phase: self.phase,
            score: self.state.as_ref().map_or(0, |s| s.score),
            game_over: ended,
            show_end_screen: ended,
            paused: self.phase == SessionPhase::Paused,
            speed_up_notice: self.notice_ticks > 0 && !ended,
            shield_remaining: self.state.as_ref().and_then(|s| s.powerup.shield_remaining()),
            end_cause: self.state.as_ref().and_then(|s| s.finished),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(RunnerTuning::default()).expect("default tuning is valid")
    }

    #[test]
    fn test_idle_session_ignores_everything() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert!(!s.resume());
        assert!(!s.pause());
        assert!(s.tick(&TickInput::tilt(0.0)).is_empty());
        assert!(!s.quit());
        assert_eq!(s.view(), &SessionView::default());
    }

    #[test]
    fn test_pause_resume() {
        let mut s = session();
        s.start(PowerUp::None, 1);
        assert!(s.pause());
        assert!(s.view().paused);
        assert!(!s.pause());
        assert!(s.resume());
        assert!(!s.view().paused);
        assert_eq!(s.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let mut s = session();
        s.start(PowerUp::None, 1);
        assert!(s.trigger_game_over(EndCause::Collision));
        let view = s.view().clone();
        assert!(view.game_over && view.show_end_screen);
        assert!(!s.trigger_game_over(EndCause::FellOffTrack));
        assert!(!s.quit());
        assert_eq!(s.view(), &view);
        assert_eq!(view.end_cause, Some(EndCause::Collision));
    }

    #[test]
    fn test_quit_from_pause() {
        let mut s = session();
        s.start(PowerUp::Shield, 9);
        s.pause();
        assert!(s.quit());
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert!(!s.view().paused);
        assert_eq!(s.view().end_cause, Some(EndCause::Quit));
        assert_eq!(s.final_score(), Some(0));
        assert!(s.tick(&TickInput::tilt(0.0)).is_empty());
        assert!(!s.resume());
    }

    #[test]
    fn test_shield_capacity_visible() {
        let mut s = session();
        s.start(PowerUp::Shield, 3);
        assert_eq!(s.view().shield_remaining, Some(3));
        s.start(PowerUp::DoublePoints, 3);
        assert_eq!(s.view().shield_remaining, None);
    }

    #[test]
    fn test_restore_finished_state_is_ended() {
        let tuning = RunnerTuning::default();
        let mut state = GameState::new(5, PowerUp::None, &tuning);
        state.finished = Some(EndCause::FellOffTrack);
        let mut s = GameSession::new(tuning).expect("valid tuning");
        s.restore(state);
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert!(s.view().show_end_screen);
    }

    #[test]
    fn test_start_with_uses_seed_sequence() {
        let mut a = GameSession::with_seed_source(RunnerTuning::default(), 77).expect("valid");
        let mut b = GameSession::with_seed_source(RunnerTuning::default(), 77).expect("valid");
        let seed_a = a.start_with(PowerUp::None);
        let seed_b = b.start_with(PowerUp::None);
        assert_eq!(seed_a, seed_b);
        assert_eq!(a.state(), b.state());
        assert_ne!(a.start_with(PowerUp::None), seed_a);
    }

    #[test]
    fn test_invalid_tuning_never_reaches_a_run() {
        let zero_length = RunnerTuning {
            segment_length: 0.0,
            ..RunnerTuning::default()
        };
        assert!(matches!(
            GameSession::new(zero_length),
            Err(TuningError::Invalid { field: "segment_length", .. })
        ));

        let inverted_heights = RunnerTuning {
            building_min_height: 20.0,
            building_max_height: 4.0,
            ..RunnerTuning::default()
        };
        assert!(GameSession::with_seed_source(inverted_heights, 1).is_err());

        let eager_retire = RunnerTuning {
            track_retire_segments: -1.0,
            ..RunnerTuning::default()
        };
        assert!(GameSession::new(eager_retire).is_err());
    }

    #[test]
    fn test_straight_run_keeps_its_segment() {
        let tuning = RunnerTuning {
            obstacle_chance: 0.0,
            track_retire_segments: 0.5,
            ..RunnerTuning::default()
        };
        let mut s = GameSession::new(tuning).expect("valid tuning");
        s.start(PowerUp::None, 11);
        for _ in 0..600 {
            s.tick(&TickInput::tilt(0.0));
        }
        assert_eq!(s.phase(), SessionPhase::Running);
        assert!(s.state().is_some_and(|st| !st.player.is_falling()));
    }
}
