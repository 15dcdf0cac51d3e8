//! Audio cues using the Web Audio API
//!
//! Every cue is a single synthesized oscillator with an exponential gain
//! decay - no sample files. Off the web the manager is a disabled no-op.
//! Playback failures are ignored; audio never affects the simulation.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Synthesis parameters for one cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundPreset {
    /// Start frequency (Hz)
    pub frequency: f32,
    /// Length of the gain decay (seconds)
    pub duration: f64,
    pub waveform: Waveform,
    /// Peak gain before master volume
    pub volume: f32,
    /// Optional pitch glide: (end frequency, glide seconds)
    pub glide: Option<(f32, f64)>,
}

/// Gain level the envelope decays to
const GAIN_FLOOR: f32 = 0.01;

/// Named cues the simulation can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Hit,
    BrickBreak,
    PowerUp,
    GameOver,
    LevelComplete,
    LoseLife,
    /// Escalating combo chime, level 1..=5
    Combo(u32),
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Hit => "hit",
            SoundCue::BrickBreak => "brickBreak",
            SoundCue::PowerUp => "powerUp",
            SoundCue::GameOver => "gameOver",
            SoundCue::LevelComplete => "levelComplete",
            SoundCue::LoseLife => "loseLife",
            SoundCue::Combo(_) => "combo",
        }
    }

    pub fn preset(self) -> SoundPreset {
        let simple = |frequency: f32, duration: f64, waveform: Waveform, volume: f32| SoundPreset {
            frequency,
            duration,
            waveform,
            volume,
            glide: None,
        };
        match self {
            SoundCue::Hit => simple(400.0, 0.1, Waveform::Square, 0.3),
            SoundCue::BrickBreak => simple(800.0, 0.15, Waveform::Sawtooth, 0.4),
            SoundCue::PowerUp => simple(600.0, 0.3, Waveform::Sine, 0.5),
            SoundCue::GameOver => simple(200.0, 0.5, Waveform::Triangle, 0.5),
            SoundCue::LevelComplete => simple(1000.0, 0.4, Waveform::Sine, 0.5),
            SoundCue::LoseLife => simple(150.0, 0.3, Waveform::Sawtooth, 0.4),
            SoundCue::Combo(level) => {
                let frequency = 400.0 + level as f32 * 100.0;
                SoundPreset {
                    frequency,
                    duration: 0.2,
                    waveform: Waveform::Sine,
                    volume: 0.4,
                    glide: Some((frequency * 1.5, 0.1)),
                }
            }
        }
    }

    /// The cue a simulation event should trigger, if any
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Hit => Some(SoundCue::Hit),
            GameEvent::BrickBreak { .. } => Some(SoundCue::BrickBreak),
            GameEvent::Combo { level, .. } => Some(SoundCue::Combo(level)),
            GameEvent::PowerUpCollected { .. } => Some(SoundCue::PowerUp),
            GameEvent::LoseLife { .. } => Some(SoundCue::LoseLife),
            GameEvent::LevelComplete { .. } => Some(SoundCue::LevelComplete),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            GameEvent::PowerUpExpired { .. } | GameEvent::Win | GameEvent::NewHighScore { .. } => {
                None
            }
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        log::debug!("No audio output on this target - cues are dropped");
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Can cues actually be heard?
    pub fn is_enabled(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.ctx.is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    /// Pick up sound on/off and volume from player settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.muted = !settings.sound;
        self.set_master_volume(settings.master_volume);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle(&mut self) {
        self.muted = !self.muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Fire and forget
    pub fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::trace!("Cue {}", cue.name());

        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            self.play_preset(ctx, cue.preset(), vol);
        }
    }

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    #[cfg(target_arch = "wasm32")]
    fn play_preset(&self, ctx: &AudioContext, preset: SoundPreset, vol: f32) {
        let osc_type = match preset.waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
            Waveform::Sawtooth => OscillatorType::Sawtooth,
            Waveform::Triangle => OscillatorType::Triangle,
        };
        let Some((osc, gain)) = self.create_osc(ctx, preset.frequency, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(preset.frequency, t).ok();
        if let Some((end, secs)) = preset.glide {
            osc.frequency()
                .exponential_ramp_to_value_at_time(end, t + secs)
                .ok();
        }

        gain.gain().set_value_at_time(preset.volume * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(GAIN_FLOOR, t + preset.duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + preset.duration).ok();
    }
}
