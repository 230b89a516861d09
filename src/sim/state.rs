//! Game session state and lifecycle
//!
//! A session owns both players, the hidden objects of the current round,
//! whose turn it is and which phase the game is in. Fields are only mutated
//! through the operations below (and `handle_click` in `click.rs`), which keeps
//! the score tally equal to the number of claimed objects at all times.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::placement::{Placement, SeededPlacement};

/// One of the two hot-seat players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// 1-based player number
    pub fn number(self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    /// The opponent
    pub fn other(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    #[inline]
    pub(crate) fn idx(self) -> usize {
        self.number() as usize - 1
    }
}

/// A player and their running score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

/// An object waiting to be found
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HiddenObject {
    /// Stable for the round (generation order)
    pub id: u32,
    /// Position in percentage-of-surface units
    pub pos: Vec2,
    /// Who claimed it; set at most once
    pub revealed_by: Option<PlayerSlot>,
}

impl HiddenObject {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            revealed_by: None,
        }
    }

    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.revealed_by.is_some()
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Entering player names
    Setup,
    /// Players alternate clicks
    Playing,
    /// Every object has been claimed
    Over,
}

/// Result of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(PlayerSlot),
    Tie,
}

/// Notifications emitted synchronously by `handle_click` for the
/// presentation and audio layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Always first, once per accepted click
    EchoEmitted { x: f32, y: f32 },
    /// Once per object newly claimed by the click
    ObjectRevealed {
        object_id: u32,
        by: PlayerSlot,
        x: f32,
        y: f32,
    },
    /// The click claimed the last object
    GameOver { outcome: Outcome },
}

/// Complete game session (single owner, mutated one operation at a time)
#[derive(Debug, Clone)]
pub struct Session<P: Placement = SeededPlacement> {
    pub(super) players: [Player; 2],
    pub(super) objects: Vec<HiddenObject>,
    pub(super) turn: PlayerSlot,
    pub(super) phase: GamePhase,
    /// Most recent accepted click, for presentation only
    pub(super) last_echo: Option<Vec2>,
    /// Rounds started so far (start + restarts)
    pub(super) round: u32,
    placement: P,
}

impl Session<SeededPlacement> {
    /// Create a session whose object layouts derive from `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_placement(SeededPlacement::new(seed))
    }
}

impl<P: Placement> Session<P> {
    /// Create a session in Setup with empty names and no objects
    pub fn with_placement(placement: P) -> Self {
        Self {
            players: [Player::default(), Player::default()],
            objects: Vec::new(),
            turn: PlayerSlot::One,
            phase: GamePhase::Setup,
            last_echo: None,
            round: 0,
            placement,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn(&self) -> PlayerSlot {
        self.turn
    }

    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.idx()]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn objects(&self) -> &[HiddenObject] {
        &self.objects
    }

    pub fn last_echo(&self) -> Option<Vec2> {
        self.last_echo
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Placement seed, if objects come from a seeded generator
    pub fn seed(&self) -> Option<u64> {
        self.placement.seed()
    }

    pub fn revealed_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_revealed()).count()
    }

    pub fn remaining(&self) -> usize {
        self.objects.len() - self.revealed_count()
    }

    /// Store a player's name verbatim. Only applies during Setup.
    pub fn set_player_name(&mut self, slot: PlayerSlot, name: impl Into<String>) -> bool {
        if self.phase != GamePhase::Setup {
            log::debug!("Ignoring name change for player {} outside setup", slot.number());
            return false;
        }
        self.players[slot.idx()].name = name.into();
        true
    }

    /// Whether `start_game` would be accepted right now
    pub fn can_start(&self) -> bool {
        self.phase == GamePhase::Setup && self.players.iter().all(|p| !p.name.is_empty())
    }

    /// Leave Setup and place the first round's objects.
    ///
    /// No-op unless in Setup with both names filled in.
    pub fn start_game(&mut self) -> bool {
        if !self.can_start() {
            log::debug!("Start ignored (phase {:?}, names incomplete or already started)", self.phase);
            return false;
        }
        self.begin_round();
        log::info!(
            "Game started: {} vs {} (seed {:?})",
            self.players[0].name,
            self.players[1].name,
            self.seed()
        );
        true
    }

    /// Reset scores and place a fresh set of objects, keeping names.
    ///
    /// Accepted from Playing or Over; ignored during Setup.
    pub fn restart(&mut self) -> bool {
        if self.phase == GamePhase::Setup {
            log::debug!("Restart ignored during setup");
            return false;
        }
        for player in &mut self.players {
            player.score = 0;
        }
        self.begin_round();
        log::info!("Round {} started (seed {:?})", self.round, self.seed());
        true
    }

    /// Final result. `None` until the phase is Over.
    pub fn winner(&self) -> Option<Outcome> {
        (self.phase == GamePhase::Over).then(|| self.leader())
    }

    /// Who is ahead on the current scores
    pub fn leader(&self) -> Outcome {
        let [one, two] = &self.players;
        match one.score.cmp(&two.score) {
            std::cmp::Ordering::Greater => Outcome::Winner(PlayerSlot::One),
            std::cmp::Ordering::Less => Outcome::Winner(PlayerSlot::Two),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    fn begin_round(&mut self) {
        self.objects = self
            .placement
            .next_layout()
            .into_iter()
            .enumerate()
            .map(|(i, pos)| HiddenObject::new(i as u32, pos))
            .collect();
        self.turn = PlayerSlot::One;
        self.last_echo = None;
        self.phase = GamePhase::Playing;
        self.round += 1;
    }
}
