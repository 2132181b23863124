//! Reproducible description of a rendered frame.
//!
//! A [`Seed`] captures everything needed to recreate a field's state after a
//! number of steps: engine name, surface size, parameter overrides, PRNG seed,
//! step count, and the pointer held during those steps.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Reproducible description of one particle-field frame.
///
/// Two identical `Seed` values fed to the same engine binary produce
/// bit-identical particle state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub engine: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub steps: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<[f64; 2]>,
}

impl Seed {
    /// Creates a Seed with empty params, zero steps, and no pointer.
    pub fn new(engine: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            engine: engine.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            steps: 0,
            pointer: None,
        }
    }

    /// Checks that the surface is non-empty and its pixel count fits `usize`.
    ///
    /// The engine itself tolerates a zero-size surface; a seed is only useful
    /// if it renders to at least one pixel.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(())
    }
}
