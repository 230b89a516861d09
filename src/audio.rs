//! Audio system using Web Audio API
//!
//! Every sound is a single decaying sine tone; see `feedback::SoundEffect`.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{SoundEffect, TONE_FLOOR_GAIN, Tone};

/// Audio manager for the game
pub struct AudioManager {
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

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        self.play_tone(ctx, effect.tone(), vol);
    }

    /// Create an oscillator routed through a gain node to the speakers
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

    fn play_tone(&self, ctx: &AudioContext, tone: Tone, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, tone.frequency, OscillatorType::Sine) else {
            log::warn!("Could not build oscillator for {} Hz tone", tone.frequency);
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(tone.frequency, t).ok();
        gain.gain().set_value_at_time(tone.gain * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(TONE_FLOOR_GAIN, t + tone.duration)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + tone.duration).ok();
    }
}
