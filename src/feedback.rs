//! Presentation feedback driven by game events
//!
//! Everything here reacts to `GameEvent`s and never feeds back into the
//! session. Timing is supplied by the caller (milliseconds on any monotonic
//! clock), so echo expiry can be tested without a browser.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameEvent, Outcome, Player, PlayerSlot};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Every click - low ping
    Echo,
    /// Object claimed - higher ping
    Reveal,
}

/// Parameters for a single decaying sine tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration: f64,
    /// Starting gain before the exponential decay
    pub gain: f32,
}

/// Gain the decay ramps down to before the oscillator stops
pub const TONE_FLOOR_GAIN: f32 = 0.01;

impl SoundEffect {
    pub fn tone(self) -> Tone {
        match self {
            SoundEffect::Echo => Tone {
                frequency: ECHO_TONE_HZ,
                duration: ECHO_TONE_SECS,
                gain: 0.5,
            },
            SoundEffect::Reveal => Tone {
                frequency: REVEAL_TONE_HZ,
                duration: REVEAL_TONE_SECS,
                gain: 0.5,
            },
        }
    }
}

/// Sounds to play for a batch of events, in order
pub fn sounds_for(events: &[GameEvent]) -> Vec<SoundEffect> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::EchoEmitted { .. } => Some(SoundEffect::Echo),
            GameEvent::ObjectRevealed { .. } => Some(SoundEffect::Reveal),
            GameEvent::GameOver { .. } => None,
        })
        .collect()
}

/// A spreading echo currently on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleEcho {
    /// Monotonic id, usable as a DOM key
    pub id: u64,
    pub pos: Vec2,
    pub born_ms: f64,
}

/// Ordered list of echoes that fade out after a fixed lifetime
#[derive(Debug, Clone)]
pub struct EchoTrail {
    fade_ms: u32,
    echoes: Vec<VisibleEcho>,
    next_id: u64,
}

impl Default for EchoTrail {
    fn default() -> Self {
        Self::new(ECHO_FADE_MS)
    }
}

impl EchoTrail {
    pub fn new(fade_ms: u32) -> Self {
        Self {
            fade_ms,
            echoes: Vec::new(),
            next_id: 0,
        }
    }

    pub fn fade_ms(&self) -> u32 {
        self.fade_ms
    }

    /// Record every `EchoEmitted` in `events`, returning the new echoes
    pub fn observe(&mut self, events: &[GameEvent], now_ms: f64) -> Vec<VisibleEcho> {
        let mut added = Vec::new();
        for event in events {
            if let GameEvent::EchoEmitted { x, y } = *event {
                let echo = VisibleEcho {
                    id: self.next_id,
                    pos: Vec2::new(x, y),
                    born_ms: now_ms,
                };
                self.next_id += 1;
                self.echoes.push(echo);
                added.push(echo);
            }
        }
        added
    }

    /// Drop echoes whose lifetime has elapsed, returning their ids
    pub fn expire(&mut self, now_ms: f64) -> Vec<u64> {
        let fade = self.fade_ms as f64;
        let mut expired = Vec::new();
        self.echoes.retain(|e| {
            let alive = now_ms - e.born_ms < fade;
            if !alive {
                expired.push(e.id);
            }
            alive
        });
        expired
    }

    /// Echoes still on screen, oldest first
    pub fn visible(&self) -> &[VisibleEcho] {
        &self.echoes
    }

    pub fn clear(&mut self) {
        self.echoes.clear();
    }
}

/// Marker/avatar colour per player
pub fn player_color(slot: PlayerSlot) -> &'static str {
    match slot {
        PlayerSlot::One => "#ef4444",
        PlayerSlot::Two => "#3b82f6",
    }
}

/// First character of the player's name, for the avatar badge
pub fn avatar_initial(player: &Player) -> String {
    player.name.chars().next().map(String::from).unwrap_or_default()
}

/// Text shown on the game-over banner
pub fn outcome_message(outcome: Outcome, players: &[Player; 2]) -> String {
    match outcome {
        Outcome::Winner(slot) => format!("{} wins!", players[slot.idx()].name),
        Outcome::Tie => "It's a tie!".to_string(),
    }
}
