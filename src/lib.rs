//! PokeGuess - guess the creature from its sprite.
//!
//! The library exposes the game's modules so the binary and the integration
//! tests share one store, reducer and component set.

pub mod action;
pub mod api;
pub mod autocomplete;
pub mod components;
pub mod config;
pub mod effect;
pub mod guess;
pub mod logging;
pub mod reducer;
pub mod rng;
pub mod sprite;
pub mod state;
