//! Read-only session view for rendering
//!
//! Cloned out of the session after each operation so the presentation layer
//! never holds a reference into live game state.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, HiddenObject, Outcome, Placement, Player, PlayerSlot, Session};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub turn: PlayerSlot,
    pub players: [Player; 2],
    pub objects: Vec<HiddenObject>,
    pub remaining: usize,
    /// Set once the phase is Over
    pub outcome: Option<Outcome>,
    pub round: u32,
    /// Where the click indicator ring goes
    pub last_echo: Option<Vec2>,
}

impl SessionSnapshot {
    pub fn capture<P: Placement>(session: &Session<P>) -> Self {
        Self {
            phase: session.phase(),
            turn: session.turn(),
            players: session.players().clone(),
            objects: session.objects().to_vec(),
            remaining: session.remaining(),
            outcome: session.winner(),
            round: session.round(),
            last_echo: session.last_echo(),
        }
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.idx()]
    }

    /// Objects that have been claimed and should be drawn
    pub fn revealed(&self) -> impl Iterator<Item = &HiddenObject> {
        self.objects.iter().filter(|o| o.is_revealed())
    }

    /// Single-line JSON, for machine-readable terminal output
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
