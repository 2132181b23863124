#![deny(unsafe_code)]
//! Drifting 2D particle field.
//!
//! A [`ParticleField`] owns a set of particles on a rectangular surface and
//! advances them one fixed step per frame: Euler integration, velocity
//! reflection at the bounds, an optional pull towards the pointer, and an
//! optional opacity twinkle. Connected variants also compute proximity edges
//! for the renderer to draw.
//!
//! Reflection flips velocity only. A particle that crosses an edge sits
//! outside the surface for a frame before drifting back; renderers see that
//! overshoot and it is part of the field's look.

pub mod config;
pub mod proximity;

use glam::DVec2;
use particle_field_core::error::EngineError;
use particle_field_core::prng::Xorshift64;
use particle_field_core::{Edge, Engine, FieldSnapshot, Particle};
use serde_json::Value;

pub use config::{FieldConfig, ParticleCount, Variant};
use proximity::ProximityGrid;

/// Above this many particles, edges come from the uniform grid instead of
/// the all-pairs scan.
const ALL_PAIRS_LIMIT: usize = 256;

/// Pull added to a particle's velocity by a pointer.
///
/// The raw displacement is scaled by `(radius - dist) / radius * strength`
/// without normalizing, so the pull grows with offset along each axis and
/// vanishes at exactly `radius`.
pub fn pointer_pull(position: DVec2, pointer: DVec2, radius: f64, strength: f64) -> DVec2 {
    let offset = pointer - position;
    let dist = offset.length();
    if dist < radius {
        offset * ((radius - dist) / radius) * strength
    } else {
        DVec2::ZERO
    }
}

/// Negative, zero and non-finite extents all mean an empty surface.
fn surface_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// A fixed set of drifting particles on a resizable surface.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    pointer: Option<DVec2>,
    config: FieldConfig,
    edges: Vec<Edge>,
    grid: ProximityGrid,
}

impl ParticleField {
    /// Scatters `config.count` particles uniformly over a `width × height` surface.
    ///
    /// A surface with a non-positive side gets no particles, since a
    /// zero-size viewport is routine during layout.
    pub fn new(width: f64, height: f64, config: FieldConfig, seed: u64) -> Self {
        let width = surface_extent(width);
        let height = surface_extent(height);
        let count = if width > 0.0 && height > 0.0 {
            config.count.resolve(width)
        } else {
            0
        };

        let mut rng = Xorshift64::new(seed);
        let particles = (0..count)
            .map(|_| spawn(&mut rng, width, height, &config))
            .collect();

        log::debug!(
            "created {} field: {count} particles on {width}x{height}, seed {seed}",
            config.variant.name()
        );
        Self::with_particles(width, height, particles, config)
    }

    /// Builds a field from existing particles, e.g. restored state.
    pub fn with_particles(
        width: f64,
        height: f64,
        particles: Vec<Particle>,
        config: FieldConfig,
    ) -> Self {
        Self {
            particles,
            width: surface_extent(width),
            height: surface_extent(height),
            pointer: None,
            config,
            edges: Vec::new(),
            grid: ProximityGrid::new(),
        }
    }

    /// Creates a field for `variant` with parameter overrides from JSON.
    pub fn from_json(
        variant: Variant,
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Self {
        Self::new(width, height, FieldConfig::from_json(variant, params), seed)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Edges from the last [`compute_connections`](Self::compute_connections)
    /// since the most recent update.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Replaces the surface bounds. Particles keep their positions; any left
    /// outside reflect back on their next boundary contact.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = surface_extent(width);
        self.height = surface_extent(height);
        log::debug!(
            "resized {} field to {}x{}",
            self.config.variant.name(),
            self.width,
            self.height
        );
    }

    /// Records the pointer. Ignored by variants without attraction.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        if self.config.variant.attracts() {
            self.pointer = Some(DVec2::new(x, y));
        }
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Advances every particle by one unit step.
    ///
    /// Per particle, in order: move by velocity, reflect each velocity
    /// component whose coordinate is outside the surface, apply the pointer
    /// pull, then advance the twinkle. Edges from the previous frame are
    /// dropped since they no longer match the positions.
    pub fn update(&mut self) {
        self.edges.clear();

        let (width, height) = (self.width, self.height);
        let pull = self.pointer.filter(|_| self.config.variant.attracts());
        let radius = self.config.attraction_radius;
        let strength = self.config.attraction_strength;
        let twinkles = self.config.variant.twinkles();

        for p in &mut self.particles {
            p.position += p.velocity;

            if p.position.x < 0.0 || p.position.x > width {
                p.velocity.x = -p.velocity.x;
            }
            if p.position.y < 0.0 || p.position.y > height {
                p.velocity.y = -p.velocity.y;
            }

            if let Some(pointer) = pull {
                p.velocity += pointer_pull(p.position, pointer, radius, strength);
            }

            if twinkles {
                p.opacity += p.twinkle;
                if p.opacity < 0.0 || p.opacity > 1.0 {
                    p.twinkle = -p.twinkle;
                }
            }
        }
    }

    /// Computes edges between particles closer than `max_distance`.
    ///
    /// Each unordered pair appears once as `(a, b)` with `a < b`, sorted.
    /// Variants without links, and non-positive distances, yield no edges.
    pub fn compute_connections(&mut self, max_distance: f64) -> &[Edge] {
        self.edges.clear();
        if !self.config.variant.links() || !(max_distance > 0.0) {
            return &self.edges;
        }

        let peak = self.config.link_opacity;
        if self.particles.len() <= ALL_PAIRS_LIMIT {
            proximity::all_pairs(&self.particles, max_distance, peak, &mut self.edges);
        } else {
            self.grid.connect(
                &self.particles,
                self.width,
                self.height,
                max_distance,
                peak,
                &mut self.edges,
            );
        }
        &self.edges
    }

    /// Read-only view for a render surface.
    pub fn snapshot(&self) -> FieldSnapshot<'_> {
        FieldSnapshot {
            width: self.width,
            height: self.height,
            pointer: self.pointer,
            particles: &self.particles,
            edges: &self.edges,
        }
    }
}

fn spawn(rng: &mut Xorshift64, width: f64, height: f64, config: &FieldConfig) -> Particle {
    let position = DVec2::new(rng.next_range(0.0, width), rng.next_range(0.0, height));
    let velocity = DVec2::new(rng.next_signed(config.speed), rng.next_signed(config.speed));
    let radius = rng.next_range(config.radius_min, config.radius_max);
    let opacity = rng.next_range(config.opacity_min, config.opacity_max);
    let particle = Particle::new(position, velocity, radius, opacity);

    if config.variant.twinkles() {
        let rate = rng.next_range(config.twinkle_min, config.twinkle_max);
        particle.with_twinkle(if rng.next_bool() { rate } else { -rate })
    } else {
        particle
    }
}

impl Engine for ParticleField {
    fn step(&mut self) -> Result<(), EngineError> {
        self.update();
        if self.config.variant.links() {
            self.compute_connections(self.config.link_distance);
        }
        Ok(())
    }

    fn snapshot(&self) -> FieldSnapshot<'_> {
        ParticleField::snapshot(self)
    }

    fn resize(&mut self, width: f64, height: f64) {
        ParticleField::resize(self, width, height);
    }

    fn set_pointer(&mut self, x: f64, y: f64) {
        ParticleField::set_pointer(self, x, y);
    }

    fn clear_pointer(&mut self) {
        ParticleField::clear_pointer(self);
    }

    fn params(&self) -> Value {
        self.config.to_json()
    }

    fn param_schema(&self) -> Value {
        FieldConfig::schema(self.config.variant)
    }
}
