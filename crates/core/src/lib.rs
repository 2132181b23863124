#![deny(unsafe_code)]
//! Core types and traits for the particle-field animation system.
//!
//! Provides the `Engine` trait, the `Particle`/`Edge`/`FieldSnapshot` data
//! model handed to render surfaces, the `Srgb` color type, the `Xorshift64`
//! PRNG, `Seed`, and parameter helpers.

pub mod color;
pub mod engine;
pub mod error;
pub mod params;
pub mod particle;
pub mod prng;
pub mod seed;
pub mod snapshot;

pub use color::Srgb;
pub use engine::Engine;
pub use error::EngineError;
pub use particle::{Edge, Particle};
pub use prng::Xorshift64;
pub use seed::Seed;
pub use snapshot::FieldSnapshot;
