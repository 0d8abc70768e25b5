//! Simulation loop around `sim`
//!
//! A `Session` banks real frame time into fixed ticks, feeds them the
//! player's controls, and does the game-over bookkeeping (best score,
//! leaderboard) outside of any tick.

use crate::consts::*;
use crate::highscores::{Leaderboard, ScoreRecord};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Fixed-rate tick scheduler
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step: step.max(f32::EPSILON),
            max_substeps: max_substeps.max(1),
        }
    }

    /// Bank `dt` seconds and return how many ticks are due now
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    /// Fraction of a tick left in the bank, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// One player's run, start to finish and again
pub struct Session<L: Leaderboard> {
    state: GameState,
    clock: FixedTimestep,
    input: TickInput,
    /// Fire and restart as last reported by `set_input`
    fire_held: bool,
    restart_held: bool,
    leaderboard: L,
    player_name: String,
    leaderboard_rows: usize,
    /// Best score seen across runs of this session
    best_score: u64,
    top_scores: Vec<ScoreRecord>,
    /// Outcome of the last game-over submission
    last_submission: Option<bool>,
}

impl<L: Leaderboard> Session<L> {
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings, leaderboard: L) -> Self {
        log::info!("Session starting (seed {seed})");
        Self {
            state: GameState::with_tuning(seed, tuning),
            clock: FixedTimestep::default(),
            input: TickInput::default(),
            fire_held: false,
            restart_held: false,
            leaderboard,
            player_name: settings.player_name.clone(),
            leaderboard_rows: settings.leaderboard_rows(),
            best_score: 0,
            top_scores: Vec::new(),
            last_submission: None,
        }
    }

    /// Replace the held controls with the current key state.
    ///
    /// Fire and restart only trigger on the frame their key goes down;
    /// holding them does nothing more. Pending one-shots survive until a
    /// tick consumes them.
    pub fn set_input(&mut self, input: TickInput) {
        let fire = self.input.fire || (input.fire && !self.fire_held);
        let restart = self.input.restart || (input.restart && !self.restart_held);
        self.fire_held = input.fire;
        self.restart_held = input.restart;
        self.input = TickInput {
            fire,
            restart,
            ..input
        };
    }

    pub fn press_fire(&mut self) {
        self.input.fire = true;
    }

    pub fn press_restart(&mut self) {
        self.input.restart = true;
    }

    /// Run the ticks that `dt` seconds of real time owe; returns how many ran
    pub fn update(&mut self, dt: f32) -> u32 {
        let substeps = self.clock.advance(dt);
        let mut ended = false;

        for _ in 0..substeps {
            let was_over = self.state.is_game_over();
            if self.input.restart {
                self.last_submission = None;
            }
            tick(&mut self.state, &self.input);

            // Clear one-shot inputs after processing
            self.input.fire = false;
            self.input.restart = false;

            if !was_over && self.state.is_game_over() {
                ended = true;
            }
        }

        if ended {
            self.on_game_over();
        }
        substeps
    }

    /// Record the finished run. Leaderboard trouble only shows up as
    /// `last_submission == Some(false)` and an empty table.
    fn on_game_over(&mut self) {
        let score = self.state.player.score;
        self.best_score = self.best_score.max(score);

        let saved = self.leaderboard.submit(&self.player_name, score);
        if !saved {
            log::warn!("Score {score} was not saved");
        }
        self.last_submission = Some(saved);
        self.top_scores = self.leaderboard.fetch_top(self.leaderboard_rows);
        log::info!(
            "Run over: score {score}, best {}, {} leaderboard rows",
            self.best_score,
            self.top_scores.len()
        );
    }

    /// Start over immediately, dropping banked time and held input
    pub fn restart(&mut self) {
        self.state.restart();
        self.clock.reset();
        self.input = TickInput::default();
        self.last_submission = None;
    }

    /// Refresh and return the leaderboard (entering the leaderboard view)
    pub fn show_leaderboard(&mut self) -> &[ScoreRecord] {
        self.top_scores = self.leaderboard.fetch_top(self.leaderboard_rows);
        &self.top_scores
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &TickInput {
        &self.input
    }

    pub fn leaderboard_mut(&mut self) -> &mut L {
        &mut self.leaderboard
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn top_scores(&self) -> &[ScoreRecord] {
        &self.top_scores
    }

    pub fn last_submission(&self) -> Option<bool> {
        self.last_submission
    }

    /// Interpolation factor between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }
}
