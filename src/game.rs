//! Host-facing game driver
//!
//! The host's scheduling loop (requestAnimationFrame in the browser, a plain
//! loop in the native demo) calls [`Game::frame`] once per rendered frame.
//! `Game` turns wall-clock readings into simulation steps, forwards events to
//! the audio and persistence collaborators, and exposes the state read-only
//! for rendering.

use crate::audio::{AudioManager, SoundCue};
use crate::highscores::HighScoreStore;
use crate::levels::LevelDescriptor;
use crate::platform::FrameClock;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;

pub struct Game {
    state: GameState,
    settings: Settings,
    clock: FrameClock,
    audio: AudioManager,
    store: Box<dyn HighScoreStore>,
    last_step: f32,
}

impl Game {
    /// New session on the built-in campaign with default tuning
    pub fn new(seed: u64, store: Box<dyn HighScoreStore>) -> Self {
        Self::with_levels(
            seed,
            Tuning::default(),
            crate::levels::builtin_levels(),
            store,
        )
    }

    pub fn with_levels(
        seed: u64,
        tuning: Tuning,
        levels: Vec<LevelDescriptor>,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let clock = FrameClock::from_tuning(&tuning);
        let mut state = GameState::with_levels(seed, tuning, levels);
        state.high_score = store.load();
        log::info!(
            "Session seed {} ({} levels, high score {})",
            seed,
            state.levels.len(),
            state.high_score
        );

        let mut game = Self {
            state,
            settings: Settings::load(),
            clock,
            audio: AudioManager::new(),
            store,
            last_step: 0.0,
        };
        game.sync_settings();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts that script the session directly
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    /// Step size used by the most recent frame
    pub fn last_step(&self) -> f32 {
        self.last_step
    }

    /// Take new player preferences and persist them
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save();
        self.sync_settings();
    }

    fn sync_settings(&mut self) {
        self.state.particles.set_capacity(self.settings.max_particles());
        self.audio.apply_settings(&self.settings);
    }

    /// Start screen -> first level
    pub fn start(&mut self, now_ms: f64) -> Vec<GameEvent> {
        self.audio.resume();
        self.state.start_game();
        self.clock.reanchor(now_ms);
        self.dispatch_events()
    }

    /// Run one simulation step for the frame at `now_ms`. Outside of play
    /// nothing is simulated.
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> Vec<GameEvent> {
        if self.state.phase != GamePhase::Playing {
            self.last_step = 0.0;
            return Vec::new();
        }
        let dt = self.clock.advance(now_ms);
        self.last_step = dt;
        tick(&mut self.state, input, dt, now_ms);
        self.dispatch_events()
    }

    /// Tab hidden or window blurred
    pub fn pause(&mut self) {
        self.state.pause();
    }

    /// Back to play; the next frame measures from `now_ms`
    pub fn resume(&mut self, now_ms: f64) {
        if self.state.phase == GamePhase::Paused {
            self.state.resume();
            self.clock.reanchor(now_ms);
        }
    }

    /// Leave the level-complete screen
    pub fn next_level(&mut self, now_ms: f64) -> Vec<GameEvent> {
        self.state.next_level();
        self.clock.reanchor(now_ms);
        self.dispatch_events()
    }

    /// External bonus-lives purchase succeeded
    pub fn bonus_lives_granted(&mut self, now_ms: f64) -> Vec<GameEvent> {
        self.state.grant_bonus_lives();
        self.clock.reanchor(now_ms);
        self.dispatch_events()
    }

    /// Back to the start screen
    pub fn restart(&mut self) {
        self.state.restart();
        self.clock.reset();
    }

    /// Forward pending events to audio and persistence, then hand them to
    /// the host for UI
    fn dispatch_events(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            if let Some(cue) = SoundCue::from_event(event) {
                self.audio.play(cue);
            }
            if let GameEvent::NewHighScore { score } = *event {
                self.store.save(score);
            }
        }
        events
    }
}
