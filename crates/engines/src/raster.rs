//! CPU rasterization of a [`FieldSnapshot`] into an RGBA8 buffer.
//!
//! A reference render surface: edges are drawn first as one-pixel lines, then
//! particles as filled discs on top, each alpha-blended onto an opaque
//! background. Always available (no feature gate) so the `png` path and the
//! wasm `ImageData` path share it.

use glam::DVec2;
use particle_field_core::color::Srgb;
use particle_field_core::error::EngineError;
use particle_field_core::params::param_string;
use particle_field_core::FieldSnapshot;
use serde_json::Value;
use std::f64::consts::FRAC_1_SQRT_2;

/// Colors used to draw a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub particle: Srgb,
    pub edge: Srgb,
    pub background: Srgb,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            particle: Srgb::CYAN,
            edge: Srgb::CYAN,
            background: Srgb::NIGHT,
        }
    }
}

impl RenderStyle {
    /// Reads `color`, `edge_color` and `background` hex strings, falling back
    /// to the defaults for missing keys. `edge_color` defaults to `color`.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        let base = Self::default();
        let particle = Srgb::from_hex(&param_string(params, "color", &base.particle.to_hex()))?;
        let edge = Srgb::from_hex(&param_string(params, "edge_color", &particle.to_hex()))?;
        let background =
            Srgb::from_hex(&param_string(params, "background", &base.background.to_hex()))?;
        Ok(Self {
            particle,
            edge,
            background,
        })
    }
}

/// Pixel size of the raster for a snapshot: its extent rounded up.
///
/// Returns `EngineError::InvalidDimensions` for an empty surface or one whose
/// RGBA buffer would overflow `usize`.
pub fn raster_size(snapshot: &FieldSnapshot<'_>) -> Result<(usize, usize), EngineError> {
    let w = snapshot.width.ceil() as usize;
    let h = snapshot.height.ceil() as usize;
    if w == 0 || h == 0 {
        return Err(EngineError::InvalidDimensions);
    }
    w.checked_mul(h)
        .and_then(|n| n.checked_mul(4))
        .ok_or(EngineError::InvalidDimensions)?;
    Ok((w, h))
}

/// Draws the snapshot and returns `width * height * 4` bytes, row-major RGBA.
pub fn snapshot_to_rgba(
    snapshot: &FieldSnapshot<'_>,
    style: &RenderStyle,
) -> Result<Vec<u8>, EngineError> {
    let (w, h) = raster_size(snapshot)?;
    let mut raster = Raster::new(w, h, style.background);

    for edge in snapshot.edges {
        if let Some((a, b)) = snapshot.edge_endpoints(edge) {
            raster.line(a, b, style.edge, edge.opacity);
        }
    }
    for p in snapshot.particles {
        raster.disc(p.position, p.radius(), style.particle, p.opacity);
    }

    Ok(raster.into_rgba())
}

struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Srgb>,
}

impl Raster {
    fn new(width: usize, height: usize, background: Srgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    fn blend(&mut self, x: i64, y: i64, color: Srgb, alpha: f64) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.pixels[idx] = color.over(self.pixels[idx], alpha);
    }

    /// Bresenham line between pixel-rounded endpoints; every pixel once.
    fn line(&mut self, a: DVec2, b: DVec2, color: Srgb, alpha: f64) {
        if !(a.is_finite() && b.is_finite()) {
            return;
        }
        let (mut x, mut y) = (a.x.floor() as i64, a.y.floor() as i64);
        let (x1, y1) = (b.x.floor() as i64, b.y.floor() as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend(x, y, color, alpha);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fills pixels whose centers lie within `radius`; a sub-pixel disc
    /// still covers the pixel containing its center.
    fn disc(&mut self, center: DVec2, radius: f64, color: Srgb, alpha: f64) {
        if !center.is_finite() {
            return;
        }
        let r = radius.max(FRAC_1_SQRT_2);
        let x0 = (center.x - r).floor() as i64;
        let x1 = (center.x + r).ceil() as i64;
        let y0 = (center.y - r).floor() as i64;
        let y1 = (center.y + r).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let pixel_center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if pixel_center.distance_squared(center) <= r * r {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    fn into_rgba(self) -> Vec<u8> {
        self.pixels
            .into_iter()
            .flat_map(|c| [c.r, c.g, c.b, 255u8])
            .collect()
    }
}
