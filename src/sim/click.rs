//! Click resolution
//!
//! One accepted click: claim every unrevealed object inside the reveal
//! radius for the current player, hand the turn over, and end the round once
//! nothing is left hidden.

use glam::Vec2;

use super::placement::Placement;
use super::state::{GameEvent, GamePhase, Session};
use crate::consts::REVEAL_RADIUS;

/// Strict distance test in percentage-of-surface units
#[inline]
pub fn within_reveal_radius(object: Vec2, click: Vec2) -> bool {
    object.distance(click) < REVEAL_RADIUS
}

impl<P: Placement> Session<P> {
    /// Resolve a click at `(x, y)`, already normalized to [0, 100] on both axes.
    ///
    /// Returns the events produced, in order: one `EchoEmitted`, then an
    /// `ObjectRevealed` per newly claimed object, then `GameOver` if this click
    /// claimed the last one. Outside of Playing the click is ignored and no
    /// events are returned.
    pub fn handle_click(&mut self, x: f32, y: f32) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing {
            log::debug!("Click at ({x:.1}, {y:.1}) ignored in {:?}", self.phase);
            return Vec::new();
        }

        let click = Vec2::new(x, y);
        let by = self.turn;
        let mut events = vec![GameEvent::EchoEmitted { x, y }];

        // Every object is tested against the same click point; several may
        // be claimed at once.
        for object in self.objects.iter_mut().filter(|o| !o.is_revealed()) {
            if within_reveal_radius(object.pos, click) {
                object.revealed_by = Some(by);
                self.players[by.idx()].score += 1;
                log::debug!(
                    "Player {} revealed object {} at ({:.1}, {:.1})",
                    by.number(),
                    object.id,
                    object.pos.x,
                    object.pos.y
                );
                events.push(GameEvent::ObjectRevealed {
                    object_id: object.id,
                    by,
                    x: object.pos.x,
                    y: object.pos.y,
                });
            }
        }

        self.turn = by.other();
        self.last_echo = Some(click);

        if self.objects.iter().all(|o| o.is_revealed()) {
            self.phase = GamePhase::Over;
            let outcome = self.leader();
            log::info!(
                "Game over: {} {} - {} {} ({:?})",
                self.players[0].name,
                self.players[0].score,
                self.players[1].score,
                self.players[1].name,
                outcome
            );
            events.push(GameEvent::GameOver { outcome });
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::OBJECT_COUNT;
    use crate::sim::placement::{FixedPlacement, Layout, SeededPlacement};
    use crate::sim::state::{Outcome, PlayerSlot};
    use proptest::prelude::*;

    /// Objects far apart so each click claims at most one
    const SPREAD: Layout = [
        Vec2::new(52.0, 51.0),
        Vec2::new(15.0, 85.0),
        Vec2::new(85.0, 15.0),
        Vec2::new(85.0, 85.0),
        Vec2::new(15.0, 15.0),
    ];

    fn playing(layout: Layout) -> Session<FixedPlacement> {
        let mut session = Session::with_placement(FixedPlacement::new(layout));
        session.set_player_name(PlayerSlot::One, "Ada");
        session.set_player_name(PlayerSlot::Two, "Brian");
        assert!(session.start_game());
        session
    }

    fn score_sum<P: Placement>(session: &Session<P>) -> u32 {
        session.players().iter().map(|p| p.score).sum()
    }

    #[test]
    fn test_reveal_then_miss() {
        let mut session = playing(SPREAD);

        let events = session.handle_click(50.0, 50.0);
        assert_eq!(
            events,
            vec![
                GameEvent::EchoEmitted { x: 50.0, y: 50.0 },
                GameEvent::ObjectRevealed {
                    object_id: 0,
                    by: PlayerSlot::One,
                    x: 52.0,
                    y: 51.0
                },
            ]
        );
        assert_eq!(session.objects()[0].revealed_by, Some(PlayerSlot::One));
        assert_eq!(session.player(PlayerSlot::One).score, 1);
        assert_eq!(session.turn(), PlayerSlot::Two);

        let events = session.handle_click(0.0, 0.0);
        assert_eq!(events, vec![GameEvent::EchoEmitted { x: 0.0, y: 0.0 }]);
        assert_eq!(session.player(PlayerSlot::Two).score, 0);
        assert_eq!(session.turn(), PlayerSlot::One);
        assert_eq!(session.last_echo(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_one_click_claims_every_object_in_range() {
        let mut session = playing([
            Vec2::new(40.0, 40.0),
            Vec2::new(45.0, 48.0),
            Vec2::new(85.0, 85.0),
            Vec2::new(15.0, 85.0),
            Vec2::new(85.0, 15.0),
        ]);

        let events = session.handle_click(42.0, 44.0);
        let revealed: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::ObjectRevealed { object_id, .. } => Some(*object_id),
                _ => None,
            })
            .collect();
        assert_eq!(revealed, vec![0, 1]);
        assert_eq!(session.player(PlayerSlot::One).score, 2);
        assert_eq!(session.revealed_count(), 2);
        assert_eq!(session.turn(), PlayerSlot::Two);
    }

    #[test]
    fn test_exact_radius_does_not_reveal() {
        let mut session = playing(SPREAD);
        // Object 1 sits at (15, 85): 15 units straight down from (15, 70)
        session.handle_click(15.0, 70.0);
        assert!(!session.objects()[1].is_revealed());

        session.handle_click(15.0, 70.01);
        assert_eq!(session.objects()[1].revealed_by, Some(PlayerSlot::Two));
    }

    #[test]
    fn test_claims_are_permanent() {
        let mut session = playing(SPREAD);
        session.handle_click(52.0, 51.0);
        let events = session.handle_click(52.0, 51.0);
        assert_eq!(events.len(), 1);
        assert_eq!(session.objects()[0].revealed_by, Some(PlayerSlot::One));
        assert_eq!(session.player(PlayerSlot::Two).score, 0);
    }

    #[test]
    fn test_clicks_ignored_outside_playing() {
        let mut session = Session::new(11);
        assert!(session.handle_click(50.0, 50.0).is_empty());
        assert_eq!(session.turn(), PlayerSlot::One);
        assert_eq!(session.last_echo(), None);

        let mut session = playing(SPREAD);
        for pos in SPREAD {
            session.handle_click(pos.x, pos.y);
        }
        assert_eq!(session.phase(), GamePhase::Over);
        let players = session.players().clone();
        let objects = session.objects().to_vec();
        let turn = session.turn();

        assert!(session.handle_click(52.0, 51.0).is_empty());
        assert_eq!(session.players(), &players);
        assert_eq!(session.objects(), objects.as_slice());
        assert_eq!(session.turn(), turn);
    }

    #[test]
    fn test_game_over_on_completing_click() {
        let mut session = playing(SPREAD);
        for (i, pos) in SPREAD.iter().enumerate() {
            assert_eq!(session.phase(), GamePhase::Playing);
            let events = session.handle_click(pos.x, pos.y);
            let over = events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }));
            assert_eq!(over, i == OBJECT_COUNT - 1);
        }
        assert_eq!(session.phase(), GamePhase::Over);
        // Player one took clicks 1, 3, 5
        assert_eq!(session.player(PlayerSlot::One).score, 3);
        assert_eq!(session.player(PlayerSlot::Two).score, 2);
        assert_eq!(session.winner(), Some(Outcome::Winner(PlayerSlot::One)));
    }

    #[test]
    fn test_single_click_can_end_the_game() {
        let mut session = playing([Vec2::splat(50.0); OBJECT_COUNT]);
        let events = session.handle_click(50.0, 50.0);
        assert_eq!(events.len(), 1 + OBJECT_COUNT + 1);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver {
                outcome: Outcome::Winner(PlayerSlot::One)
            })
        );
        assert_eq!(session.player(PlayerSlot::One).score, OBJECT_COUNT as u32);
        assert_eq!(session.phase(), GamePhase::Over);
    }

    #[test]
    fn test_winner_across_restarts() {
        let mut session = playing([
            Vec2::new(20.0, 20.0),
            Vec2::new(80.0, 80.0),
            Vec2::new(20.0, 80.0),
            Vec2::new(80.0, 20.0),
            Vec2::new(80.0, 22.0),
        ]);
        session.handle_click(20.0, 20.0); // one
        session.handle_click(80.0, 80.0); // two
        session.handle_click(50.0, 50.0); // one misses
        session.handle_click(20.0, 80.0); // two
        session.handle_click(80.0, 21.0); // one takes both
        assert_eq!(session.winner(), Some(Outcome::Winner(PlayerSlot::One)));

        assert!(session.restart());
        assert_eq!(score_sum(&session), 0);
        assert_eq!(session.revealed_count(), 0);

        session.handle_click(20.0, 20.0); // one
        session.handle_click(80.0, 80.0); // two
        session.handle_click(20.0, 80.0); // one
        session.handle_click(80.0, 20.0); // two takes both
        assert_eq!(session.remaining(), 0);
        assert_eq!(session.player(PlayerSlot::One).score, 2);
        assert_eq!(session.player(PlayerSlot::Two).score, 3);

        assert!(session.restart());
        session.handle_click(20.0, 20.0); // one
        session.handle_click(80.0, 80.0); // two
        session.handle_click(20.0, 80.0); // one
        session.handle_click(80.0, 20.0); // two takes both
        assert_eq!(session.winner(), Some(Outcome::Winner(PlayerSlot::Two)));

        let mut session = playing([
            Vec2::new(20.0, 20.0),
            Vec2::new(80.0, 80.0),
            Vec2::new(20.0, 80.0),
            Vec2::new(80.0, 20.0),
            Vec2::new(50.0, 50.0),
        ]);
        session.handle_click(20.0, 20.0);
        session.handle_click(80.0, 80.0);
        session.handle_click(20.0, 80.0);
        session.handle_click(80.0, 20.0);
        assert_eq!(session.winner(), None);
        session.handle_click(5.0, 5.0); // one misses
        session.handle_click(5.0, 95.0); // two misses
        assert_eq!(session.phase(), GamePhase::Playing);
        session.handle_click(50.0, 50.0); // one
        assert_eq!(session.winner(), Some(Outcome::Winner(PlayerSlot::One)));
    }

    #[test]
    fn test_restart_mid_round() {
        let mut session = playing(SPREAD);
        session.handle_click(52.0, 51.0);
        assert!(session.restart());
        assert_eq!(session.turn(), PlayerSlot::One);
        assert_eq!(session.revealed_count(), 0);
        assert_eq!(session.last_echo(), None);
    }

    proptest! {
        #[test]
        fn prop_click_invariants(
            seed in any::<u64>(),
            clicks in prop::collection::vec((0.0f32..=100.0, 0.0f32..=100.0), 1..80),
        ) {
            let mut session = Session::with_placement(SeededPlacement::new(seed));
            session.set_player_name(PlayerSlot::One, "a");
            session.set_player_name(PlayerSlot::Two, "b");
            session.start_game();

            for (x, y) in clicks {
                let before_phase = session.phase();
                let before_turn = session.turn();
                let before_claims: Vec<_> = session.objects().iter().map(|o| o.revealed_by).collect();

                let events = session.handle_click(x, y);

                if before_phase == GamePhase::Playing {
                    prop_assert_eq!(session.turn(), before_turn.other());
                    prop_assert_eq!(events[0], GameEvent::EchoEmitted { x, y });
                } else {
                    prop_assert!(events.is_empty());
                    prop_assert_eq!(session.turn(), before_turn);
                }

                for (before, object) in before_claims.iter().zip(session.objects()) {
                    if before.is_some() {
                        prop_assert_eq!(*before, object.revealed_by);
                    }
                }

                prop_assert_eq!(score_sum(&session) as usize, session.revealed_count());
                prop_assert_eq!(session.objects().len(), OBJECT_COUNT);
                prop_assert_eq!(
                    session.phase() == GamePhase::Over,
                    session.remaining() == 0
                );
            }
        }
    }
}
