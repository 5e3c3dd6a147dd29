//! Enemy variants and their kinematic policies
//!
//! Five motion rules share one contract: advance kinematic state, then test
//! the bounding square against the player. Dispatch is a closed tagged enum;
//! each variant's state rides in its payload.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Arena, GameEvent, Home, Lifecycle};
use crate::consts::*;
use crate::render::{Rect, ShapeHandle, ShapeKind, ShapeStyle, Tint};
use crate::{bearing, heading_vec};

/// Patrol legs in order: right, down, left, up
const FENCING_LEGS: [(f32, f32); 4] = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];

/// Variant-specific kinematic state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Diagonal drift at one pixel per axis per tick. Boundary crossings
    /// flip `direction`, but the sign never feeds back into the step, so
    /// the drift carries straight off the arena.
    Demo { direction: i8 },
    /// Constant speed along a fixed heading, reflecting off the walls
    RandomWalk { speed: f32, heading_deg: f32 },
    /// Pure pursuit: re-aims at the player's live position every tick
    Chasing { speed: f32 },
    /// Patrols a square perimeter at `offset` around `center`
    Fencing {
        speed: f32,
        center: Vec2,
        offset: f32,
        leg: usize,
    },
    /// Constant x drift with a sinusoidal y component
    Sine { speed: f32 },
}

/// One roaming enemy: a tinted bounding square plus a motion rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Bounding square side
    pub size: f32,
    pub color: Tint,
    pub kind: EnemyKind,
    pub lifecycle: Lifecycle,
    #[serde(skip)]
    pub shape: Option<ShapeHandle>,
}

impl Enemy {
    fn new(pos: Vec2, size: f32, color: Tint, kind: EnemyKind) -> Self {
        Self {
            pos,
            size,
            color,
            kind,
            lifecycle: Lifecycle::Uncreated,
            shape: None,
        }
    }

    pub fn demo(pos: Vec2, size: f32, color: Tint) -> Self {
        Self::new(pos, size, color, EnemyKind::Demo { direction: 1 })
    }

    /// Heading is drawn once, at construction
    pub fn random_walk(pos: Vec2, size: f32, color: Tint, speed: f32, rng: &mut Pcg32) -> Self {
        let heading_deg = rng.random_range(0..=360i32) as f32;
        Self::new(pos, size, color, EnemyKind::RandomWalk { speed, heading_deg })
    }

    pub fn chasing(pos: Vec2, size: f32, color: Tint, speed: f32) -> Self {
        Self::new(pos, size, color, EnemyKind::Chasing { speed })
    }

    /// Constructed at home, immediately relocated to the patrol corner
    pub fn fencing(home: &Home, size: f32, color: Tint, speed: f32) -> Self {
        let offset = HOME_OFFSET + home.size / 2.0;
        let pos = home.pos - Vec2::splat(offset);
        Self::new(
            pos,
            size,
            color,
            EnemyKind::Fencing {
                speed,
                center: home.pos,
                offset,
                leg: 0,
            },
        )
    }

    pub fn sine(pos: Vec2, size: f32, color: Tint, speed: f32) -> Self {
        Self::new(pos, size, color, EnemyKind::Sine { speed })
    }

    /// Advance one tick, then test for contact with the player.
    ///
    /// The contact test runs every tick regardless of how the motion rule
    /// resolved; a hit returns `Lost`.
    pub fn update(&mut self, arena: Arena, player_pos: Vec2) -> Option<GameEvent> {
        if self.lifecycle != Lifecycle::Active {
            return None;
        }
        let half = self.size / 2.0;
        match &mut self.kind {
            EnemyKind::Demo { direction } => {
                self.pos += Vec2::ONE;
                if self.pos.x >= arena.width || self.pos.x <= 0.0 {
                    *direction = -*direction;
                }
                if self.pos.y >= arena.height || self.pos.y <= 0.0 {
                    *direction = -*direction;
                }
            }
            EnemyKind::RandomWalk { speed, heading_deg } => {
                self.pos += heading_vec(heading_deg.to_radians()) * *speed;
                if self.pos.x + half >= arena.width || self.pos.x - half <= 0.0 {
                    *heading_deg = 180.0 - *heading_deg;
                    self.pos.x = self.pos.x.clamp(half, arena.width - half);
                }
                if self.pos.y + half >= arena.height || self.pos.y - half <= 0.0 {
                    *heading_deg = -*heading_deg;
                    self.pos.y = self.pos.y.clamp(half, arena.height - half);
                }
            }
            EnemyKind::Chasing { speed } => {
                // no reflection needed: the bearing is recomputed next tick
                let theta = bearing(self.pos, player_pos);
                self.pos += heading_vec(theta) * *speed;
                self.pos = arena.clamp_square(self.pos, self.size);
            }
            EnemyKind::Fencing {
                speed,
                center,
                offset,
                leg,
            } => {
                let (dx, dy) = FENCING_LEGS[*leg];
                self.pos += Vec2::new(dx, dy) * *speed;
                let passed = (dx == 1.0 && self.pos.x >= center.x + *offset)
                    || (dx == -1.0 && self.pos.x <= center.x - *offset)
                    || (dy == 1.0 && self.pos.y >= center.y + *offset)
                    || (dy == -1.0 && self.pos.y <= center.y - *offset);
                if passed {
                    *leg = (*leg + 1) % 4;
                }
            }
            EnemyKind::Sine { speed } => {
                self.pos.x += *speed;
                self.pos.y += SINE_AMPLITUDE * (SINE_FREQUENCY * self.pos.x).sin();
                if self.pos.x - half < 0.0 {
                    self.pos.x = half;
                    *speed = -*speed;
                } else if self.pos.x + half > arena.width {
                    self.pos.x = arena.width - half;
                    *speed = -*speed;
                }
                // vertical walls clip without a bounce
                self.pos.y = self.pos.y.clamp(half, arena.height - half);
            }
        }
        self.hits_player(player_pos).then_some(GameEvent::Lost)
    }

    /// Open-interval bounding-square test; a zero-size square never hits
    pub fn hits_player(&self, player_pos: Vec2) -> bool {
        Rect::from_center(self.pos, self.size).contains_open(player_pos)
    }

    /// Bounding square for rendering and collision
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Drawable primitive for this variant
    pub fn shape_kind(&self) -> ShapeKind {
        match self.kind {
            EnemyKind::Demo { .. } | EnemyKind::Chasing { .. } | EnemyKind::Fencing { .. } => {
                ShapeKind::Oval
            }
            EnemyKind::RandomWalk { .. } | EnemyKind::Sine { .. } => ShapeKind::Rect,
        }
    }

    pub fn style(&self) -> ShapeStyle {
        ShapeStyle::filled(self.color)
    }

    /// Whether delete releases the drawable. The demo variant keeps its
    /// primitive on the surface.
    pub fn releases_shape_on_delete(&self) -> bool {
        !matches!(self.kind, EnemyKind::Demo { .. })
    }
}
