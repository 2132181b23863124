#![deny(unsafe_code)]
//! WASM bindings so a browser frame loop can drive a particle field.
//!
//! The page owns the canvas: it calls `update()` from `requestAnimationFrame`,
//! forwards `resize` and pointer events, and draws from the flat buffers
//! returned by `particles()` and `edges()`.

use particle_field_core::Engine;
use particle_field_engines::raster::{snapshot_to_rgba, RenderStyle};
use particle_field_engines::EngineKind;
use wasm_bindgen::prelude::*;

/// Floats per particle in [`WasmField::particles`]: x, y, radius, opacity.
pub const PARTICLE_STRIDE: usize = 4;
/// Floats per edge in [`WasmField::edges`]: ax, ay, bx, by, opacity.
pub const EDGE_STRIDE: usize = 5;

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WasmField {
    inner: EngineKind,
}

#[wasm_bindgen]
impl WasmField {
    /// Builds a field by engine name; `params_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        engine: &str,
        width: f64,
        height: f64,
        seed: u64,
        params_json: &str,
    ) -> Result<WasmField, JsValue> {
        let params = if params_json.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(params_json).map_err(to_js)?
        };
        let inner = EngineKind::from_name(engine, width, height, seed, &params).map_err(to_js)?;
        Ok(WasmField { inner })
    }

    pub fn engines() -> Vec<JsValue> {
        EngineKind::list_engines()
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.inner.resize(width, height);
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.inner.set_pointer(x, y);
    }

    pub fn clear_pointer(&mut self) {
        self.inner.clear_pointer();
    }

    /// One frame: move particles and recompute edges.
    pub fn update(&mut self) -> Result<(), JsValue> {
        self.inner.step().map_err(to_js)
    }

    pub fn len(&self) -> usize {
        self.inner.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.snapshot().is_empty()
    }

    /// Flat `[x, y, radius, opacity]` per particle.
    pub fn particles(&self) -> Vec<f32> {
        particle_buffer(&self.inner)
    }

    /// Flat `[ax, ay, bx, by, opacity]` per edge.
    pub fn edges(&self) -> Vec<f32> {
        edge_buffer(&self.inner)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.snapshot()).map_err(to_js)
    }

    /// RGBA8 pixels for `ImageData`, drawn with the default style.
    pub fn render_rgba(&self) -> Result<Vec<u8>, JsValue> {
        snapshot_to_rgba(&self.inner.snapshot(), &RenderStyle::default()).map_err(to_js)
    }
}

fn particle_buffer(engine: &EngineKind) -> Vec<f32> {
    let snap = engine.snapshot();
    let mut out = Vec::with_capacity(snap.len() * PARTICLE_STRIDE);
    for p in snap.particles {
        out.extend_from_slice(&[
            p.position.x as f32,
            p.position.y as f32,
            p.radius() as f32,
            p.opacity as f32,
        ]);
    }
    out
}

fn edge_buffer(engine: &EngineKind) -> Vec<f32> {
    let snap = engine.snapshot();
    let mut out = Vec::with_capacity(snap.edges.len() * EDGE_STRIDE);
    for edge in snap.edges {
        if let Some((a, b)) = snap.edge_endpoints(edge) {
            out.extend_from_slice(&[
                a.x as f32,
                a.y as f32,
                b.x as f32,
                b.y as f32,
                edge.opacity as f32,
            ]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine(name: &str, params: serde_json::Value) -> EngineKind {
        EngineKind::from_name(name, 300.0, 200.0, 5, &params).unwrap()
    }

    #[test]
    fn particle_buffer_has_stride_four() {
        let e = engine("starfield", json!({"count": 12}));
        let buf = particle_buffer(&e);
        assert_eq!(buf.len(), 12 * PARTICLE_STRIDE);
        let first = e.snapshot().particles[0];
        assert_eq!(buf[0], first.position.x as f32);
        assert_eq!(buf[2], first.radius() as f32);
    }

    #[test]
    fn edge_buffer_matches_edges() {
        let mut e = engine("constellation", json!({"count": 40}));
        e.step().unwrap();
        let buf = edge_buffer(&e);
        let snap = e.snapshot();
        assert_eq!(buf.len(), snap.edges.len() * EDGE_STRIDE);
        if let Some(edge) = snap.edges.first() {
            assert_eq!(buf[4], edge.opacity as f32);
        }
    }

    #[test]
    fn edge_buffer_empty_before_first_step() {
        let e = engine("constellation", json!({}));
        assert!(edge_buffer(&e).is_empty());
    }
}
