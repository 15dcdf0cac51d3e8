//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Frame timing (elapsed time normalization, re-anchoring after pause)
//! - Logger setup

use crate::tuning::Tuning;

/// Turns wall-clock timestamps into simulation steps.
///
/// A step is the elapsed time divided by the nominal frame length, clamped to
/// `[0, max_step]` so a hitch or a long pause cannot produce a huge jump.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frame_ms: f64,
    max_step: f32,
}

impl FrameClock {
    pub fn new(frame_ms: f64, max_step: f32) -> Self {
        Self {
            last_ms: None,
            frame_ms,
            max_step,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.frame_ms, tuning.max_frame_step)
    }

    /// Step for the frame at `now_ms`. The first frame after construction or
    /// a re-anchor is a zero step.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let step = match self.last_ms {
            Some(last) if self.frame_ms > 0.0 => ((now_ms - last) / self.frame_ms) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        step.clamp(0.0, self.max_step)
    }

    /// Restart timing from `now_ms` (after resume)
    pub fn reanchor(&mut self, now_ms: f64) {
        self.last_ms = Some(now_ms);
    }

    /// Forget the baseline; the next frame is a zero step
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Route `log` output to the browser console
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Logger already initialized");
    }
}

/// Route `log` output to stderr (`RUST_LOG` controls the level)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new(16.67, 2.0);
        assert_eq!(clock.advance(1000.0), 0.0);
        let step = clock.advance(1016.67);
        assert!((step - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_hitch_is_clamped() {
        let mut clock = FrameClock::new(16.67, 2.0);
        clock.advance(0.0);
        assert_eq!(clock.advance(500.0), 2.0);
    }

    #[test]
    fn test_reanchor_after_pause() {
        let mut clock = FrameClock::new(16.67, 2.0);
        clock.advance(0.0);
        // Paused for a minute, then resumed
        clock.reanchor(60_000.0);
        let step = clock.advance(60_008.335);
        assert!((step - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_backwards_clock_is_zero() {
        let mut clock = FrameClock::new(16.67, 2.0);
        clock.advance(1000.0);
        assert_eq!(clock.advance(900.0), 0.0);
    }

    #[test]
    fn test_now_is_after_epoch() {
        assert!(now_ms() > 0.0);
    }

    proptest! {
        #[test]
        fn prop_step_within_bounds(start in 0.0f64..1e9, delta in -1e6f64..1e6, max in 0.5f32..4.0) {
            let mut clock = FrameClock::new(16.67, max);
            clock.advance(start);
            let step = clock.advance(start + delta);
            prop_assert!(step >= 0.0);
            prop_assert!(step <= max);
        }
    }
}
