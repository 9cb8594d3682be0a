//! Core of a small vertical shooter: the player craft slides along the
//! bottom of the field, shoots descending planes and picks up fuel tanks
//! before the tank runs dry.
//!
//! Everything here is terminal-agnostic. The binary owns the frame loop,
//! input wiring and rendering; it drives the simulation through
//! [`compute::step`] and reads [`entities::SessionState`] to draw.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod input;
pub mod spawner;
