//! Stacked tile-matching puzzle.
//!
//! A round lays `copies_per_symbol` tiles of every symbol onto a fixed set of cells, up to
//! `max_stack_depth` per cell ([`logic::generate`]), lets the player remove matching pairs
//! from the tops of the stacks ([`logic::matching`]) and races a countdown
//! ([`logic::timer`]). [`logic::Game`] ties the three together and reports everything the
//! UI must draw as [`GameEvent`]s.

pub mod config;
pub mod data;
pub mod driver;
pub mod error;
pub mod logic;

pub use eyecons_common::{models::*, protocol::*, tilesets::*};
pub use error::{GameError, Result};
pub use logic::Game;
