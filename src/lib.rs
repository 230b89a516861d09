//! Echo of Silence - A two-player echo-location game
//!
//! Core modules:
//! - `sim`: Deterministic game session (turns, hit-testing, scoring)
//! - `snapshot`: Read-only session view for rendering
//! - `feedback`: Event-driven sound cues and transient echo visuals
//! - `platform`: Pointer coordinate normalization
//! - `settings`: Runtime configuration (seed, volume, fade timing)
//! - `audio`: Web Audio tone synthesis (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod feedback;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, Outcome, PlayerSlot, Session};
pub use snapshot::SessionSnapshot;

/// Game configuration constants
pub mod consts {
    /// Number of hidden objects placed per round
    pub const OBJECT_COUNT: usize = 5;
    /// A click claims every unrevealed object strictly closer than this
    /// (percentage-of-surface units)
    pub const REVEAL_RADIUS: f32 = 15.0;

    /// Objects spawn inside [SPAWN_MIN, SPAWN_MAX] on both axes, away from edges
    pub const SPAWN_MIN: f32 = 10.0;
    pub const SPAWN_MAX: f32 = 90.0;

    /// Echo tone (every click)
    pub const ECHO_TONE_HZ: f32 = 440.0;
    pub const ECHO_TONE_SECS: f64 = 0.5;
    /// Reveal tone (each newly claimed object)
    pub const REVEAL_TONE_HZ: f32 = 880.0;
    pub const REVEAL_TONE_SECS: f64 = 0.3;

    /// How long an echo stays on screen
    pub const ECHO_FADE_MS: u32 = 1000;
}
