//! Read-only render view of a particle field.

use crate::particle::{Edge, Particle};
use glam::DVec2;
use serde::Serialize;

/// Borrowed view of a field's current state for a render surface.
///
/// Holds no copies: the slices point into the engine's own storage, so a
/// snapshot must be dropped before the next `step()`. `edges` is empty unless
/// connections were computed since the last step.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSnapshot<'a> {
    pub width: f64,
    pub height: f64,
    pub pointer: Option<DVec2>,
    pub particles: &'a [Particle],
    pub edges: &'a [Edge],
}

impl FieldSnapshot<'_> {
    /// Number of particles in view.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field has no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Endpoints of an edge, or `None` if its indices are stale.
    pub fn edge_endpoints(&self, edge: &Edge) -> Option<(DVec2, DVec2)> {
        let a = self.particles.get(edge.a)?;
        let b = self.particles.get(edge.b)?;
        Some((a.position, b.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particles() -> Vec<Particle> {
        vec![
            Particle::new(DVec2::new(0.0, 0.0), DVec2::ZERO, 1.0, 0.5),
            Particle::new(DVec2::new(10.0, 0.0), DVec2::ZERO, 2.0, 0.7),
        ]
    }

    #[test]
    fn edge_endpoints_resolve_indices() {
        let ps = particles();
        let edges = [Edge {
            a: 0,
            b: 1,
            distance: 10.0,
            opacity: 0.09,
        }];
        let snap = FieldSnapshot {
            width: 100.0,
            height: 50.0,
            pointer: None,
            particles: &ps,
            edges: &edges,
        };
        let (a, b) = snap.edge_endpoints(&edges[0]).unwrap();
        assert_eq!(a, DVec2::new(0.0, 0.0));
        assert_eq!(b, DVec2::new(10.0, 0.0));
    }

    #[test]
    fn edge_endpoints_rejects_stale_index() {
        let ps = particles();
        let snap = FieldSnapshot {
            width: 100.0,
            height: 50.0,
            pointer: None,
            particles: &ps,
            edges: &[],
        };
        let stale = Edge {
            a: 0,
            b: 7,
            distance: 1.0,
            opacity: 0.1,
        };
        assert!(snap.edge_endpoints(&stale).is_none());
    }

    #[test]
    fn json_contains_expected_keys() {
        let ps = particles();
        let snap = FieldSnapshot {
            width: 100.0,
            height: 50.0,
            pointer: Some(DVec2::new(3.0, 4.0)),
            particles: &ps,
            edges: &[],
        };
        let v = serde_json::to_value(snap).unwrap();
        assert_eq!(v["width"], 100.0);
        assert_eq!(v["height"], 50.0);
        assert_eq!(v["pointer"], serde_json::json!([3.0, 4.0]));
        assert_eq!(v["particles"].as_array().unwrap().len(), 2);
        assert!(v["edges"].as_array().unwrap().is_empty());
    }

    #[test]
    fn len_and_is_empty() {
        let snap = FieldSnapshot {
            width: 0.0,
            height: 0.0,
            pointer: None,
            particles: &[],
            edges: &[],
        };
        assert!(snap.is_empty());
        assert_eq!(snap.len(), 0);
    }
}
