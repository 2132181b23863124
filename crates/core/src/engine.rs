//! The core `Engine` trait driven by an external frame clock.
//!
//! The trait is object-safe so hosts (CLI, wasm, registry) can hold any
//! particle engine as `dyn Engine`.

use crate::error::EngineError;
use crate::snapshot::FieldSnapshot;
use serde_json::Value;

/// A frame-stepped particle animation.
///
/// The host calls [`step`](Engine::step) once per display refresh and hands
/// [`snapshot`](Engine::snapshot) to its render surface. Input events arrive
/// through [`resize`](Engine::resize) and [`set_pointer`](Engine::set_pointer).
/// All mutators take `&mut self`, so steps and input updates on one engine
/// are serialized by construction.
pub trait Engine {
    /// Advance the simulation by exactly one fixed step.
    ///
    /// Engines that draw connective edges recompute them here so the next
    /// snapshot carries them.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Borrowed view of the current particles (and edges, if computed).
    fn snapshot(&self) -> FieldSnapshot<'_>;

    /// New surface bounds. Never moves existing particles.
    fn resize(&mut self, width: f64, height: f64);

    /// Latest pointer position in surface coordinates.
    fn set_pointer(&mut self, x: f64, y: f64);

    /// The pointer left the surface.
    fn clear_pointer(&mut self);

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use glam::DVec2;
    use serde_json::json;

    /// Minimal engine used to verify trait object safety.
    struct MockEngine {
        particles: Vec<Particle>,
        width: f64,
        height: f64,
        pointer: Option<DVec2>,
        step_count: usize,
    }

    impl MockEngine {
        fn new() -> Self {
            Self {
                particles: vec![Particle::new(DVec2::ZERO, DVec2::ONE, 1.0, 1.0)],
                width: 4.0,
                height: 4.0,
                pointer: None,
                step_count: 0,
            }
        }
    }

    impl Engine for MockEngine {
        fn step(&mut self) -> Result<(), EngineError> {
            self.step_count += 1;
            for p in &mut self.particles {
                p.position += p.velocity;
            }
            Ok(())
        }

        fn snapshot(&self) -> FieldSnapshot<'_> {
            FieldSnapshot {
                width: self.width,
                height: self.height,
                pointer: self.pointer,
                particles: &self.particles,
                edges: &[],
            }
        }

        fn resize(&mut self, width: f64, height: f64) {
            self.width = width;
            self.height = height;
        }

        fn set_pointer(&mut self, x: f64, y: f64) {
            self.pointer = Some(DVec2::new(x, y));
        }

        fn clear_pointer(&mut self) {
            self.pointer = None;
        }

        fn params(&self) -> Value {
            json!({"step_count": self.step_count})
        }

        fn param_schema(&self) -> Value {
            json!({
                "step_count": {
                    "type": "integer",
                    "default": 0,
                    "description": "Number of steps executed"
                }
            })
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        let engine: Box<dyn Engine> = Box::new(MockEngine::new());
        assert_eq!(engine.snapshot().width, 4.0);
        assert_eq!(engine.snapshot().len(), 1);
    }

    #[test]
    fn dyn_engine_mut_reference_steps_and_resizes() {
        let mut engine = MockEngine::new();
        let engine_ref: &mut dyn Engine = &mut engine;
        engine_ref.step().unwrap();
        engine_ref.resize(8.0, 2.0);
        assert_eq!(engine_ref.params()["step_count"], 1);
        let snap = engine_ref.snapshot();
        assert_eq!(snap.width, 8.0);
        assert_eq!(snap.particles[0].position, DVec2::ONE);
    }

    #[test]
    fn pointer_round_trips_through_trait() {
        let mut engine = MockEngine::new();
        let engine_ref: &mut dyn Engine = &mut engine;
        engine_ref.set_pointer(1.0, 2.0);
        assert_eq!(engine_ref.snapshot().pointer, Some(DVec2::new(1.0, 2.0)));
        engine_ref.clear_pointer();
        assert!(engine_ref.snapshot().pointer.is_none());
    }

    #[test]
    fn param_schema_has_expected_structure() {
        let engine = MockEngine::new();
        let schema = engine.param_schema();
        assert_eq!(schema["step_count"]["type"], "integer");
    }
}
