//! Hidden object placement
//!
//! Placement is injected into the session so that tests and demos can pin
//! exact coordinates while real games draw from a seeded generator.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// One round's worth of object positions, in generation (ID) order
pub type Layout = [Vec2; OBJECT_COUNT];

/// Source of object layouts for new rounds
pub trait Placement {
    /// Produce the positions for the next round
    fn next_layout(&mut self) -> Layout;

    /// Seed behind the layouts, when they come from a generator
    fn seed(&self) -> Option<u64> {
        None
    }
}

/// Draw a layout with each coordinate independently uniform in the spawn band.
///
/// Collisions are allowed: two objects may land arbitrarily close together.
pub fn generate_objects<R: Rng>(rng: &mut R) -> Layout {
    std::array::from_fn(|_| {
        let x = rng.random_range(SPAWN_MIN..SPAWN_MAX);
        let y = rng.random_range(SPAWN_MIN..SPAWN_MAX);
        Vec2::new(x, y)
    })
}

/// PCG-backed placement, reproducible from its seed
#[derive(Debug, Clone)]
pub struct SeededPlacement {
    seed: u64,
    rng: Pcg32,
}

impl SeededPlacement {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Placement for SeededPlacement {
    fn next_layout(&mut self) -> Layout {
        generate_objects(&mut self.rng)
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

/// The same predetermined layout every round
#[derive(Debug, Clone)]
pub struct FixedPlacement {
    layout: Layout,
}

impl FixedPlacement {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }
}

impl Placement for FixedPlacement {
    fn next_layout(&mut self) -> Layout {
        self.layout
    }
}
