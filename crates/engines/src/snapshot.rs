//! PNG output of a rasterized [`FieldSnapshot`].
//!
//! Feature-gated behind `png` (default on) so wasm builds can depend on this
//! crate without pulling in `image`. The drawing itself lives in
//! [`crate::raster`].

use particle_field_core::error::EngineError;
use particle_field_core::FieldSnapshot;
use std::path::Path;

use crate::raster::{raster_size, snapshot_to_rgba, RenderStyle};

/// Draws the snapshot with `style` and writes it as a PNG.
///
/// Returns `EngineError::InvalidDimensions` for an empty surface or one whose
/// size overflows `u32`, or `EngineError::Io` on write failure.
pub fn write_png(
    snapshot: &FieldSnapshot<'_>,
    style: &RenderStyle,
    path: &Path,
) -> Result<(), EngineError> {
    let (w, h) = raster_size(snapshot)?;
    let w = u32::try_from(w).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(h).map_err(|_| EngineError::InvalidDimensions)?;
    let rgba = snapshot_to_rgba(snapshot, style)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}
