//! Variant selection and tunable constants for a particle field.

use particle_field_core::params::param_f64;
use serde_json::{json, Value};

/// Pixels of surface width per particle for [`ParticleCount::Auto`].
const AUTO_PIXELS_PER_PARTICLE: f64 = 10.0;
/// Upper bound for [`ParticleCount::Auto`]; keeps the all-pairs edge scan cheap.
const AUTO_MAX_PARTICLES: usize = 150;
/// Fixed particle count of the starfield variant.
const STARFIELD_COUNT: i64 = 200;

/// Which behaviors a field runs each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Plain drift with per-particle opacity twinkle.
    Starfield,
    /// Drift, pointer attraction, and proximity edges.
    Constellation,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Constellation, Variant::Starfield];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Starfield => "starfield",
            Variant::Constellation => "constellation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    /// Whether the pointer pulls particles.
    pub fn attracts(self) -> bool {
        matches!(self, Variant::Constellation)
    }

    /// Whether opacity oscillates by the twinkle rate.
    pub fn twinkles(self) -> bool {
        matches!(self, Variant::Starfield)
    }

    /// Whether proximity edges are computed.
    pub fn links(self) -> bool {
        matches!(self, Variant::Constellation)
    }
}

/// How many particles a new field gets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleCount {
    /// Exactly this many; negative values mean none.
    Fixed(i64),
    /// One particle per 10 px of width, capped at 150.
    Auto,
}

impl ParticleCount {
    /// Resolves the count for a surface of the given width.
    ///
    /// `Auto` rounds a fractional quotient up, so a 153 px surface gets 16.
    pub fn resolve(self, width: f64) -> usize {
        match self {
            ParticleCount::Fixed(n) => n.max(0) as usize,
            ParticleCount::Auto => {
                if !(width > 0.0) {
                    return 0;
                }
                (width / AUTO_PIXELS_PER_PARTICLE)
                    .min(AUTO_MAX_PARTICLES as f64)
                    .ceil() as usize
            }
        }
    }

    fn to_json(self) -> Value {
        match self {
            ParticleCount::Fixed(n) => json!(n),
            ParticleCount::Auto => json!("auto"),
        }
    }

    /// Reads `params["count"]`: an integer, `"auto"`, or anything else for `default`.
    fn from_json(params: &Value, default: ParticleCount) -> ParticleCount {
        match params.get("count") {
            Some(Value::String(s)) if s == "auto" => ParticleCount::Auto,
            Some(v) => v.as_i64().map(ParticleCount::Fixed).unwrap_or(default),
            None => default,
        }
    }
}

/// Tunable constants for one field.
///
/// Ranges are half-open `[min, max)` draws used when particles are created.
/// The attraction and link settings only matter for variants that use them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub variant: Variant,
    pub count: ParticleCount,
    /// Initial velocity components are drawn from `[-speed, speed)`.
    pub speed: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
    /// Twinkle magnitude range; the sign is drawn separately.
    pub twinkle_min: f64,
    pub twinkle_max: f64,
    /// Pointer pull reaches this far and is zero at exactly this distance.
    pub attraction_radius: f64,
    pub attraction_strength: f64,
    /// Edges connect particles closer than this.
    pub link_distance: f64,
    /// Edge opacity at distance zero.
    pub link_opacity: f64,
}

impl FieldConfig {
    pub fn constellation() -> Self {
        Self {
            variant: Variant::Constellation,
            count: ParticleCount::Auto,
            speed: 0.25,
            radius_min: 1.0,
            radius_max: 3.0,
            opacity_min: 0.2,
            opacity_max: 0.7,
            twinkle_min: 0.0,
            twinkle_max: 0.0,
            attraction_radius: 100.0,
            attraction_strength: 0.001,
            link_distance: 100.0,
            link_opacity: 0.1,
        }
    }

    pub fn starfield() -> Self {
        Self {
            variant: Variant::Starfield,
            count: ParticleCount::Fixed(STARFIELD_COUNT),
            speed: 0.35,
            radius_min: 0.5,
            radius_max: 2.0,
            opacity_min: 0.1,
            opacity_max: 1.0,
            twinkle_min: 0.002,
            twinkle_max: 0.012,
            attraction_radius: 0.0,
            attraction_strength: 0.0,
            link_distance: 0.0,
            link_opacity: 0.0,
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Starfield => Self::starfield(),
            Variant::Constellation => Self::constellation(),
        }
    }

    /// Variant defaults overridden by any keys present in `params`.
    pub fn from_json(variant: Variant, params: &Value) -> Self {
        let base = Self::for_variant(variant);
        Self {
            variant,
            count: ParticleCount::from_json(params, base.count),
            speed: param_f64(params, "speed", base.speed),
            radius_min: param_f64(params, "radius_min", base.radius_min),
            radius_max: param_f64(params, "radius_max", base.radius_max),
            opacity_min: param_f64(params, "opacity_min", base.opacity_min),
            opacity_max: param_f64(params, "opacity_max", base.opacity_max),
            twinkle_min: param_f64(params, "twinkle_min", base.twinkle_min),
            twinkle_max: param_f64(params, "twinkle_max", base.twinkle_max),
            attraction_radius: param_f64(params, "attraction_radius", base.attraction_radius),
            attraction_strength: param_f64(
                params,
                "attraction_strength",
                base.attraction_strength,
            ),
            link_distance: param_f64(params, "link_distance", base.link_distance),
            link_opacity: param_f64(params, "link_opacity", base.link_opacity),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "variant": self.variant.name(),
            "count": self.count.to_json(),
            "speed": self.speed,
            "radius_min": self.radius_min,
            "radius_max": self.radius_max,
            "opacity_min": self.opacity_min,
            "opacity_max": self.opacity_max,
            "twinkle_min": self.twinkle_min,
            "twinkle_max": self.twinkle_max,
            "attraction_radius": self.attraction_radius,
            "attraction_strength": self.attraction_strength,
            "link_distance": self.link_distance,
            "link_opacity": self.link_opacity,
        })
    }

    /// Schema for every key accepted by [`FieldConfig::from_json`].
    pub fn schema(variant: Variant) -> Value {
        let d = Self::for_variant(variant);
        json!({
            "count": {
                "type": "integer | \"auto\"",
                "default": d.count.to_json(),
                "min": 0,
                "description": "Particle count; \"auto\" is min(150, width / 10)"
            },
            "speed": number(d.speed, 0.0, 5.0, "Initial velocity components are drawn from [-speed, speed)"),
            "radius_min": number(d.radius_min, 0.0, 20.0, "Smallest particle radius"),
            "radius_max": number(d.radius_max, 0.0, 20.0, "Largest particle radius (exclusive)"),
            "opacity_min": number(d.opacity_min, 0.0, 1.0, "Lowest initial opacity"),
            "opacity_max": number(d.opacity_max, 0.0, 1.0, "Highest initial opacity (exclusive)"),
            "twinkle_min": number(d.twinkle_min, 0.0, 0.1, "Smallest per-frame opacity change"),
            "twinkle_max": number(d.twinkle_max, 0.0, 0.1, "Largest per-frame opacity change"),
            "attraction_radius": number(d.attraction_radius, 0.0, 1000.0, "Pointer pull reach in surface units"),
            "attraction_strength": number(d.attraction_strength, 0.0, 0.1, "Pointer pull scale per frame"),
            "link_distance": number(d.link_distance, 0.0, 1000.0, "Particles closer than this are connected"),
            "link_opacity": number(d.link_opacity, 0.0, 1.0, "Edge opacity at zero distance"),
        })
    }
}

fn number(default: f64, min: f64, max: f64, description: &str) -> Value {
    json!({
        "type": "number",
        "default": default,
        "min": min,
        "max": max,
        "description": description,
    })
}
