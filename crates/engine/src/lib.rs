//! Azul Game Engine
//!
//! A tile-drafting rule engine for the board game Azul, designed as an RL
//! environment: callers issue discrete moves through [`GameEngine::act`] and
//! receive a numeric reward whenever a round is scored.
//!
//! Scoring counts only the horizontal run through each newly placed wall tile
//! plus floor penalties. End-of-game bonuses are not part of this rule set.
//!
//! All randomness comes from the `rand::Rng` passed into each call, so a
//! seeded generator reproduces a game exactly.

mod board;
mod config;
mod engine;
mod error;
mod factory;
mod moves;
mod snapshot;
mod supply;
mod types;

pub use board::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use factory::*;
pub use moves::*;
pub use snapshot::*;
pub use supply::*;
pub use types::*;
