//! Life Sim - single-player business life simulation
//!
//! A game state record is mutated by free-text commands, random world
//! events and a day-advance tick, and served over a small JSON API.

pub mod catalog;
pub mod command;
pub mod core;
pub mod server;
pub mod simulation;
pub mod state;
