//! The per-tick update, collision, and render cycle
//!
//! One synchronous pass per external timer tick: fold input in, advance
//! every live entity in stable order, poll the spawner, then (separately)
//! render. All updates finish before any rendering, so a frame is never
//! half-updated.

use glam::Vec2;

use super::state::{GamePhase, GameState, Lifecycle};
use crate::consts::*;
use crate::render::{Rect, ShapeKind, ShapeStyle, Surface, Tint};

/// External input folded into one tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer click in arena coordinates; aims the waypoint
    pub click: Option<Vec2>,
}

/// Advance the session by one tick.
///
/// Update order is waypoint, home, player, then enemies in spawn order;
/// the two former are fixed, so the player moves first and every enemy
/// tests against this tick's player position. The first terminal signal
/// wins and halts the remaining updates.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Running {
        // pending timer callbacks after a terminal transition are no-ops
        return;
    }

    if let Some(target) = input.click {
        state.waypoint.activate(target);
    }

    state.time_ticks += 1;

    if let Some(event) = state.player.update(&state.home, &mut state.waypoint) {
        state.finish(event);
        return;
    }

    let arena = state.arena;
    let player_pos = state.player.pos;
    let mut outcome = None;
    for enemy in &mut state.enemies {
        if let Some(event) = enemy.update(arena, player_pos) {
            outcome = Some(event);
            break;
        }
    }
    if let Some(event) = outcome {
        state.finish(event);
        return;
    }

    let spawned = state
        .generator
        .poll(state.time_ticks, arena, &state.home, &mut state.rng);
    for enemy in spawned {
        state.add_enemy(enemy);
    }
}

/// Render every live entity, allocating shapes on first sight
pub fn render(state: &mut GameState, surface: &mut dyn Surface) {
    if state.phase == GamePhase::Initializing {
        return;
    }

    let waypoint = &mut state.waypoint;
    if waypoint.lifecycle == Lifecycle::Active {
        let (a, b) = *waypoint.shapes.get_or_insert_with(|| {
            let style = ShapeStyle::outlined(Tint::Green, 2.0);
            (
                surface.create_shape(ShapeKind::Line, style),
                surface.create_shape(ShapeKind::Line, style),
            )
        });
        surface.set_shape_visible(a, waypoint.active);
        surface.set_shape_visible(b, waypoint.active);
        if waypoint.active {
            let arm = Vec2::splat(WAYPOINT_ARM);
            surface.set_shape_position(
                a,
                Rect {
                    min: waypoint.pos - arm,
                    max: waypoint.pos + arm,
                },
            );
            surface.set_shape_position(
                b,
                Rect {
                    min: Vec2::new(waypoint.pos.x - WAYPOINT_ARM, waypoint.pos.y + WAYPOINT_ARM),
                    max: Vec2::new(waypoint.pos.x + WAYPOINT_ARM, waypoint.pos.y - WAYPOINT_ARM),
                },
            );
        }
    }

    let home = &mut state.home;
    if home.lifecycle == Lifecycle::Active {
        let handle = *home
            .shape
            .get_or_insert_with(|| {
                surface.create_shape(ShapeKind::Rect, ShapeStyle::outlined(Tint::Brown, 2.0))
            });
        surface.set_shape_position(handle, Rect::from_center(home.pos, home.size));
    }

    let player = &mut state.player;
    if player.lifecycle == Lifecycle::Active {
        let handle = *player
            .shape
            .get_or_insert_with(|| {
                surface.create_shape(ShapeKind::Sprite, ShapeStyle::filled(Tint::Green))
            });
        surface.set_shape_position(handle, Rect::from_center(player.pos, PLAYER_MARKER_SIZE));
    }

    for enemy in &mut state.enemies {
        if enemy.lifecycle != Lifecycle::Active {
            continue;
        }
        let kind = enemy.shape_kind();
        let style = enemy.style();
        let handle = *enemy
            .shape
            .get_or_insert_with(|| surface.create_shape(kind, style));
        surface.set_shape_position(handle, enemy.bounds());
    }

    if state.phase.is_terminal() && !state.banner_shown {
        if state.phase == GamePhase::Won {
            surface.show_banner("You Win", Tint::Green);
        } else {
            surface.show_banner("You Lose", Tint::Red);
        }
        state.banner_shown = true;
    }
}

/// Tear the session down, releasing the drawables that opt in
pub fn destroy(state: &mut GameState, surface: &mut dyn Surface) {
    state.generator.halt();

    if let Some((a, b)) = state.waypoint.shapes.take() {
        surface.delete_shape(a);
        surface.delete_shape(b);
    }
    state.waypoint.lifecycle = Lifecycle::Deleted;

    if let Some(handle) = state.home.shape.take() {
        surface.delete_shape(handle);
    }
    state.home.lifecycle = Lifecycle::Deleted;

    // the player marker stays on the surface
    state.player.shape = None;
    state.player.lifecycle = Lifecycle::Deleted;

    for enemy in &mut state.enemies {
        let handle = enemy.shape.take();
        if enemy.releases_shape_on_delete() {
            if let Some(handle) = handle {
                surface.delete_shape(handle);
            }
        }
        enemy.lifecycle = Lifecycle::Deleted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::render::HeadlessSurface;
    use crate::sim::enemy::Enemy;
    use crate::sim::state::GameEvent;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(&Config::default(), seed);
        state.start();
        state
    }

    #[test]
    fn test_straight_run_home_wins() {
        let mut state = running_state(42);
        state.generator.halt();

        let click = TickInput {
            click: Some(Vec2::new(700.0, 250.0)),
        };
        tick(&mut state, &click);
        assert!(state.waypoint.active);

        for _ in 0..129 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.time_ticks <= 130);
    }

    #[test]
    fn test_loss_halts_remaining_updates() {
        let mut state = running_state(1);
        state.generator.halt();

        // a zero-speed chaser parked on the spawn point hits immediately
        let spawn = state.player.pos;
        state.add_enemy(Enemy::chasing(spawn, 30.0, crate::render::Tint::SkyBlue, 0.0));
        state.add_enemy(Enemy::demo(Vec2::new(200.0, 200.0), 20.0, crate::render::Tint::Red));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Lost);
        // the enemy behind the hit never moved
        assert_eq!(state.enemies[1].pos, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_terminal_session_ignores_ticks() {
        let mut state = running_state(1);
        state.generator.halt();
        state.finish(GameEvent::Lost);

        let before = state.player.pos;
        let click = TickInput {
            click: Some(Vec2::new(400.0, 400.0)),
        };
        tick(&mut state, &click);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.pos, before);
        assert!(!state.waypoint.active);
    }

    #[test]
    fn test_generator_feeds_session() {
        let mut state = running_state(5);
        for _ in 0..SPAWN_DELAY_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemies.len(), 5);

        // the batch updates from the next tick onward
        let demo_pos = state.enemies[0].pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies[0].pos, demo_pos + Vec2::ONE);
    }

    #[test]
    fn test_sessions_with_equal_seeds_agree() {
        let mut s1 = running_state(99);
        let mut s2 = running_state(99);

        let click = TickInput {
            click: Some(Vec2::new(600.0, 100.0)),
        };
        tick(&mut s1, &click);
        tick(&mut s2, &click);
        for _ in 0..300 {
            tick(&mut s1, &TickInput::default());
            tick(&mut s2, &TickInput::default());
        }

        assert_eq!(s1.phase, s2.phase);
        assert_eq!(s1.time_ticks, s2.time_ticks);
        assert_eq!(s1.enemies.len(), s2.enemies.len());
        for (a, b) in s1.enemies.iter().zip(&s2.enemies) {
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn test_render_allocates_lazily_and_destroy_honors_leaks() {
        let mut state = running_state(5);
        state.generator.halt();
        state.add_enemy(Enemy::demo(Vec2::new(100.0, 100.0), 20.0, crate::render::Tint::Red));
        state.add_enemy(Enemy::sine(
            Vec2::new(300.0, 125.0),
            20.0,
            crate::render::Tint::LightYellow,
            1.0,
        ));

        let mut surface = HeadlessSurface::default();
        render(&mut state, &mut surface);
        // waypoint cross (2) + home + player + 2 enemies
        assert_eq!(surface.live_shapes(), 6);

        // rendering again allocates nothing new
        render(&mut state, &mut surface);
        assert_eq!(surface.live_shapes(), 6);

        destroy(&mut state, &mut surface);
        // the player marker and the demo enemy keep their primitives
        assert_eq!(surface.live_shapes(), 2);
    }

    #[test]
    fn test_render_before_start_draws_nothing() {
        let mut state = GameState::new(&Config::default(), 5);
        let mut surface = HeadlessSurface::default();
        render(&mut state, &mut surface);
        assert_eq!(surface.live_shapes(), 0);
    }

    #[test]
    fn test_banner_shows_once() {
        let mut state = running_state(5);
        state.generator.halt();
        state.finish(GameEvent::Lost);

        let mut surface = HeadlessSurface::default();
        render(&mut state, &mut surface);
        render(&mut state, &mut surface);
        assert_eq!(surface.banner.as_deref(), Some("You Lose"));
        assert_eq!(surface.banners_shown, 1);
    }

    #[test]
    fn test_win_banner_text() {
        let mut state = running_state(5);
        state.generator.halt();
        state.finish(GameEvent::Won);

        let mut surface = HeadlessSurface::default();
        render(&mut state, &mut surface);
        assert_eq!(surface.banner.as_deref(), Some("You Win"));
    }
}
