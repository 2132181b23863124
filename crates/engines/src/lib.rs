#![deny(unsafe_code)]
//! Engine registry: maps engine names to configured particle fields, and
//! rasterizes snapshots on the CPU.
//!
//! Both the CLI and the wasm bindings construct engines through
//! [`EngineKind::from_name`] so name dispatch and parameter decoding live in
//! one place.

pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

use particle_field_core::error::EngineError;
use particle_field_core::params::param_point;
use particle_field_core::{Engine, FieldSnapshot};
use particle_field_drift::{ParticleField, Variant};
use serde_json::Value;

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["constellation", "starfield"];

/// Enumeration of all available particle engines.
///
/// Use [`EngineKind::from_name`] for string-based construction (CLI, wasm).
#[derive(Debug)]
pub enum EngineKind {
    /// Drifting particle field; the name picks its variant.
    Drift(ParticleField),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// `params` overrides the variant's defaults; an optional `"pointer":
    /// [x, y]` entry seeds the pointer position. Returns
    /// `EngineError::UnknownEngine` for unrecognized names and
    /// `EngineError::ParamTypeMismatch` for a malformed pointer.
    pub fn from_name(
        name: &str,
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        let variant =
            Variant::from_name(name).ok_or_else(|| EngineError::UnknownEngine(name.to_string()))?;
        let pointer = param_point(params, "pointer")?;

        let mut field = ParticleField::from_json(variant, width, height, seed, params);
        if let Some(p) = pointer {
            field.set_pointer(p.x, p.y);
        }
        Ok(EngineKind::Drift(field))
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<(), EngineError> {
        match self {
            EngineKind::Drift(e) => e.step(),
        }
    }

    fn snapshot(&self) -> FieldSnapshot<'_> {
        match self {
            EngineKind::Drift(e) => e.snapshot(),
        }
    }

    fn resize(&mut self, width: f64, height: f64) {
        match self {
            EngineKind::Drift(e) => e.resize(width, height),
        }
    }

    fn set_pointer(&mut self, x: f64, y: f64) {
        match self {
            EngineKind::Drift(e) => e.set_pointer(x, y),
        }
    }

    fn clear_pointer(&mut self) {
        match self {
            EngineKind::Drift(e) => e.clear_pointer(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Drift(e) => Engine::params(e),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Drift(e) => Engine::param_schema(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use serde_json::json;

    #[test]
    fn from_name_builds_every_listed_engine() {
        for name in EngineKind::list_engines() {
            let engine = EngineKind::from_name(name, 320.0, 240.0, 42, &json!({}));
            assert!(engine.is_ok(), "{name} failed to build");
            assert_eq!(engine.unwrap().params()["variant"], *name);
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = EngineKind::from_name("nebula", 32.0, 32.0, 42, &json!({}));
        assert!(matches!(result, Err(EngineError::UnknownEngine(_))));
    }

    #[test]
    fn pointer_param_seeds_pointer() {
        let engine =
            EngineKind::from_name("constellation", 320.0, 240.0, 1, &json!({"pointer": [10, 20]}))
                .unwrap();
        assert_eq!(engine.snapshot().pointer, Some(DVec2::new(10.0, 20.0)));
    }

    #[test]
    fn malformed_pointer_param_is_rejected() {
        let result =
            EngineKind::from_name("constellation", 320.0, 240.0, 1, &json!({"pointer": "center"}));
        assert!(matches!(result, Err(EngineError::ParamTypeMismatch { .. })));
    }

    #[test]
    fn starfield_ignores_pointer_param() {
        let engine =
            EngineKind::from_name("starfield", 320.0, 240.0, 1, &json!({"pointer": [10, 20]}))
                .unwrap();
        assert!(engine.snapshot().pointer.is_none());
    }

    #[test]
    fn trait_delegation_step_resize_and_snapshot() {
        let mut engine =
            EngineKind::from_name("constellation", 500.0, 300.0, 42, &json!({})).unwrap();
        assert_eq!(engine.snapshot().len(), 50);
        engine.step().unwrap();
        engine.resize(100.0, 50.0);
        let snap = engine.snapshot();
        assert_eq!((snap.width, snap.height), (100.0, 50.0));
        assert_eq!(snap.len(), 50);
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let engine = EngineKind::from_name("starfield", 64.0, 64.0, 42, &json!({})).unwrap();
        assert!(engine.params().get("twinkle_max").is_some());
        assert!(engine.param_schema().get("twinkle_max").is_some());
    }

    #[test]
    fn determinism_same_seed() {
        let mut a = EngineKind::from_name("constellation", 400.0, 300.0, 99, &json!({})).unwrap();
        let mut b = EngineKind::from_name("constellation", 400.0, 300.0, 99, &json!({})).unwrap();
        for _ in 0..10 {
            a.step().unwrap();
            b.step().unwrap();
        }
        let (sa, sb) = (a.snapshot(), b.snapshot());
        assert!(sa
            .particles
            .iter()
            .zip(sb.particles.iter())
            .all(|(pa, pb)| pa.position.x.to_bits() == pb.position.x.to_bits()
                && pa.position.y.to_bits() == pb.position.y.to_bits()));
        assert_eq!(sa.edges, sb.edges);
    }

    #[test]
    fn object_safety() {
        let engine = EngineKind::from_name("starfield", 16.0, 16.0, 42, &json!({})).unwrap();
        let boxed: Box<dyn Engine> = Box::new(engine);
        assert_eq!(boxed.snapshot().width, 16.0);
    }
}
