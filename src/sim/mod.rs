//! Game session simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded or injected object placement only
//! - Stable iteration order (by object ID)
//! - No wall-clock timing, rendering or platform dependencies

pub mod click;
pub mod placement;
pub mod state;

pub use click::within_reveal_radius;
pub use placement::{FixedPlacement, Placement, SeededPlacement, generate_objects};
pub use state::{GameEvent, GamePhase, HiddenObject, Outcome, Player, PlayerSlot, Session};
