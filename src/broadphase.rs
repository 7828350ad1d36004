//! Per-step contact flagging built on the quadtree: rebuild, query, exact
//! radius check.

use crate::error::{Error, Result};
use crate::{Aabb, EntityId, Quadtree, Vec2};
use rayon::prelude::*;

/// Minimal view of a simulated entity: where it is and how big it is. The
/// host keeps everything else (velocity, colour, ...) on its side, keyed by
/// the body's index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub radius: f64,
}

impl Body {
    pub fn new(position: Vec2, radius: f64) -> Self {
        Self { position, radius }
    }

    /// True when the two circles touch or overlap.
    pub fn intersects(&self, other: &Body) -> bool {
        self.position.distance(&other.position) <= self.radius + other.radius
    }
}

/// Flag every body that is in contact with another body.
///
/// Builds a fresh tree over `bounds`, inserts one entry per body (ids are
/// slice indices), then sweeps: each body queries a window of half-extent
/// `(2r, 2r)` around its own position and runs the exact radius-sum check
/// against every candidate with a different id. The window is a heuristic
/// margin, not a proof: a neighbour whose radius is much larger than the
/// body's own can sit outside it and go unreported.
///
/// Bodies outside `bounds` are tolerated: they are left out of the index
/// (so they never show up as anyone's neighbour) but still get a flag of
/// their own.
///
/// The insert phase completes before the first query, so the sweep runs
/// over a read-only tree on the rayon worker pool.
pub fn detect_contacts(bounds: Aabb, bodies: &[Body]) -> Result<Vec<bool>> {
    let mut tree = Quadtree::new(bounds);
    for (i, body) in bodies.iter().enumerate() {
        match tree.insert(body.position, EntityId(i as u32)) {
            Ok(()) | Err(Error::OutOfBounds(_)) => {}
            Err(err) => return Err(err),
        }
    }

    let flags = bodies
        .par_iter()
        .enumerate()
        .map(|(i, body)| {
            let window = Aabb::new(
                body.position,
                Vec2::new(2.0 * body.radius, 2.0 * body.radius),
            );
            let mut found = Vec::new();
            tree.query_range(&window, &mut found);
            found.iter().any(|&(_, EntityId(other))| {
                other as usize != i && body.intersects(&bodies[other as usize])
            })
        })
        .collect();

    Ok(flags)
}
