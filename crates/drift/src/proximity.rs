//! Proximity edges between particles.
//!
//! Two strategies produce the same edges in the same `(a, b)` order: a plain
//! all-pairs scan for the small counts a background field uses, and a uniform
//! grid for larger fields. Both append to a caller-owned buffer so the
//! per-frame path does not allocate once the buffer has grown.

use glam::DVec2;
use particle_field_core::{Edge, Particle};

/// Upper bound on grid cells per axis, so a tiny link distance on a large
/// surface cannot allocate an oversized grid.
const MAX_AXIS_CELLS: usize = 256;

/// Edge opacity: `peak` at distance 0, falling linearly to 0 at `max_distance`.
pub fn edge_opacity(distance: f64, max_distance: f64, peak: f64) -> f64 {
    peak * (1.0 - distance / max_distance)
}

/// Appends an edge for every pair `i < j` closer than `max_distance`.
pub fn all_pairs(particles: &[Particle], max_distance: f64, peak: f64, out: &mut Vec<Edge>) {
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            push_if_close(out, i, a.position, j, b.position, max_distance, peak);
        }
    }
}

#[inline]
fn push_if_close(
    out: &mut Vec<Edge>,
    i: usize,
    pi: DVec2,
    j: usize,
    pj: DVec2,
    max_distance: f64,
    peak: f64,
) {
    let distance = pi.distance(pj);
    if distance < max_distance {
        out.push(Edge {
            a: i,
            b: j,
            distance,
            opacity: edge_opacity(distance, max_distance, peak),
        });
    }
}

/// Uniform bucket grid reused across frames.
///
/// Cells are at least `max_distance` wide, so any connected pair sits in the
/// same or adjacent cells. Particles overshooting the surface are clamped into
/// the border cells, which can only bring pairs closer in cell space.
#[derive(Debug, Default)]
pub struct ProximityGrid {
    cols: usize,
    rows: usize,
    cell_w: f64,
    cell_h: f64,
    buckets: Vec<Vec<usize>>,
}

impl ProximityGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the same edges as [`all_pairs`], in the same order.
    pub fn connect(
        &mut self,
        particles: &[Particle],
        width: f64,
        height: f64,
        max_distance: f64,
        peak: f64,
        out: &mut Vec<Edge>,
    ) {
        let start = out.len();
        self.rebuild(particles, width, height, max_distance);

        for (i, p) in particles.iter().enumerate() {
            let (cx, cy) = self.cell_of(p.position);
            for ny in cy.saturating_sub(1)..=(cy + 1).min(self.rows - 1) {
                for nx in cx.saturating_sub(1)..=(cx + 1).min(self.cols - 1) {
                    for &j in &self.buckets[ny * self.cols + nx] {
                        if j > i {
                            let q = particles[j].position;
                            push_if_close(out, i, p.position, j, q, max_distance, peak);
                        }
                    }
                }
            }
        }

        out[start..].sort_unstable_by(|e, f| (e.a, e.b).cmp(&(f.a, f.b)));
    }

    fn rebuild(&mut self, particles: &[Particle], width: f64, height: f64, max_distance: f64) {
        self.cols = axis_cells(width, max_distance);
        self.rows = axis_cells(height, max_distance);
        self.cell_w = width / self.cols as f64;
        self.cell_h = height / self.rows as f64;

        let cells = self.cols * self.rows;
        if self.buckets.len() < cells {
            self.buckets.resize_with(cells, Vec::new);
        }
        for bucket in &mut self.buckets[..cells] {
            bucket.clear();
        }
        for (i, p) in particles.iter().enumerate() {
            let (cx, cy) = self.cell_of(p.position);
            self.buckets[cy * self.cols + cx].push(i);
        }
    }

    fn cell_of(&self, position: DVec2) -> (usize, usize) {
        (
            axis_index(position.x, self.cell_w, self.cols),
            axis_index(position.y, self.cell_h, self.rows),
        )
    }
}

/// Number of cells along an axis such that each is at least `max_distance` wide.
fn axis_cells(extent: f64, max_distance: f64) -> usize {
    let n = (extent / max_distance).floor();
    if n.is_nan() || n < 1.0 {
        1
    } else {
        (n as usize).min(MAX_AXIS_CELLS)
    }
}

fn axis_index(v: f64, cell: f64, cells: usize) -> usize {
    if cells == 1 || !(cell > 0.0) {
        return 0;
    }
    let c = (v / cell).floor();
    if c.is_nan() || c <= 0.0 {
        0
    } else {
        (c as usize).min(cells - 1)
    }
}
