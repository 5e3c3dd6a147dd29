//! Enemy spawn scheduling
//!
//! The generator holds no timer of its own: it is polled from the tick
//! loop against a tick deadline, so a fixed seed reproduces the entire
//! spawn sequence without a live clock.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::state::{Arena, Home};
use crate::consts::*;
use crate::render::Tint;

/// Spawn scheduling state, threaded through every poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyGenerator {
    level: u32,
    fencing_count: u32,
    sine_count: u32,
    /// Tick the next batch is due; `None` once spawning has terminated
    next_batch_at: Option<u64>,
}

impl EnemyGenerator {
    /// Schedule the first batch a short delay after construction
    pub fn new(level: u32) -> Self {
        Self {
            level,
            fencing_count: 0,
            sine_count: 0,
            next_batch_at: Some(SPAWN_DELAY_TICKS),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fencing_count(&self) -> u32 {
        self.fencing_count
    }

    pub fn sine_count(&self) -> u32 {
        self.sine_count
    }

    /// Whether any future batch is scheduled
    pub fn is_exhausted(&self) -> bool {
        self.next_batch_at.is_none()
    }

    /// Cancel any scheduled batch; no further spawns occur
    pub fn halt(&mut self) {
        self.next_batch_at = None;
    }

    /// Produce one spawn batch if a batch is due at `now`.
    ///
    /// Every batch carries one demo, one random-walk and one chasing enemy;
    /// fencing and sine enemies join until their caps saturate. The next
    /// batch is scheduled only when a sine enemy was spawned, so the batch
    /// after the last sine spawn is the final one.
    pub fn poll(&mut self, now: u64, arena: Arena, home: &Home, rng: &mut Pcg32) -> Vec<Enemy> {
        match self.next_batch_at {
            Some(due) if now >= due => {}
            _ => return Vec::new(),
        }
        self.next_batch_at = None;

        let mut batch = Vec::with_capacity(5);
        batch.push(Enemy::demo(Vec2::new(100.0, 100.0), DEMO_SIZE, Tint::Red));
        batch.push(Enemy::random_walk(
            random_pos(arena, rng),
            RANDOM_WALK_SIZE,
            Tint::Pink,
            RANDOM_WALK_SPEED,
            rng,
        ));
        batch.push(Enemy::chasing(
            random_pos(arena, rng),
            CHASING_SIZE,
            Tint::SkyBlue,
            CHASING_SPEED,
        ));

        if self.fencing_count < FENCING_CAP {
            batch.push(Enemy::fencing(home, FENCING_SIZE, Tint::LightGreen, FENCING_SPEED));
            self.fencing_count += 1;
        }

        if self.sine_count < SINE_CAP {
            let x = rng.random_range(0.0..=arena.width);
            batch.push(Enemy::sine(
                Vec2::new(x, arena.height / 4.0),
                SINE_SIZE,
                Tint::LightYellow,
                SINE_SPEED,
            ));
            self.sine_count += 1;
            self.next_batch_at = Some(now + SPAWN_INTERVAL_TICKS);
        }

        log::debug!(
            "Spawn batch at tick {now}: {} enemies (fencing {}/{FENCING_CAP}, sine {}/{SINE_CAP})",
            batch.len(),
            self.fencing_count,
            self.sine_count,
        );
        batch
    }
}

fn random_pos(arena: Arena, rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..=arena.width),
        rng.random_range(0.0..=arena.height),
    )
}
