//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick cadence only, no wall clock
//! - Seeded RNG only
//! - Stable entity iteration (spawn order)
//! - No drawing beyond the `Surface` calls the render pass emits

pub mod enemy;
pub mod spawner;
pub mod state;
pub mod tick;

pub use enemy::{Enemy, EnemyKind};
pub use spawner::EnemyGenerator;
pub use state::{Arena, GameEvent, GamePhase, GameState, Home, Lifecycle, Player, Waypoint};
pub use tick::{TickInput, destroy, render, tick};
