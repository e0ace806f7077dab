//! Azul Game Engine
//!
//! A tile-drafting rule engine for the board game Azul, meant to be driven by
//! an external agent or training loop.
//!
//! This crate re-exports the engine crate for convenience.

pub use azul_engine::*;
