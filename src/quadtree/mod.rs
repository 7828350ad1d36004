
use crate::error::{Error, Result};
use crate::{Aabb, EntityId, Vec2};
use arrayvec::ArrayVec;

/// Entities a node stores directly before its first subdivision.
pub const NODE_CAPACITY: usize = 4;

type Children = Option<Box<[Quadtree; 4]>>;

/// Region quadtree over a fixed boundary.
///
/// Built fresh every simulation step: populate with one `insert` per live
/// entity, answer `query_range` calls for the rest of the step, then drop
/// the whole tree. Entities are classified by position only; the radius of
/// a circle never influences which node stores it.
#[derive(Debug, Clone)]
pub struct Quadtree {
    bounds: Aabb,

    // `None` until the first overflow; doubles as the "subdivided" flag
    children: Children,

    items: ArrayVec<[(Vec2, EntityId); NODE_CAPACITY]>,
}

impl Quadtree {
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            children: None,
            items: Default::default(),
        }
    }

    /// Build a tree from `(position, id)` pairs, propagating the first
    /// insertion error.
    pub fn from_iterator<It>(bounds: Aabb, it: It) -> Result<Self>
    where
        It: Iterator<Item = (Vec2, EntityId)>,
    {
        let mut tree = Self::new(bounds);
        for (position, id) in it {
            tree.insert(position, id)?;
        }
        Ok(tree)
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Total number of entities stored in this subtree.
    pub fn len(&self) -> usize {
        let direct = self.items.len();
        match self.children.as_ref() {
            Some(children) => direct + children.iter().map(Self::len).sum::<usize>(),
            None => direct,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert an entity by position.
    ///
    /// `Err(OutOfBounds)` when the root boundary does not contain the
    /// position. `Err(QuadrantMismatch)` is the defensive case: the four
    /// children exactly tile the parent, so a contained point can only be
    /// rejected by all of them through floating-point disagreement at a
    /// quadrant edge. It is surfaced rather than dropped because a silently
    /// missing entity corrupts the host simulation invisibly.
    pub fn insert(&mut self, position: Vec2, id: EntityId) -> Result<()> {
        if !self.bounds.contains_point(position) {
            return Err(Error::OutOfBounds(position));
        }
        if self.insert_contained(position, id) {
            Ok(())
        } else {
            tracing::error!(?position, "no quadrant accepted a contained position");
            Err(Error::QuadrantMismatch(position))
        }
    }

    fn insert_contained(&mut self, position: Vec2, id: EntityId) -> bool {
        if !self.bounds.contains_point(position) {
            return false;
        }

        if self.items.try_push((position, id)).is_ok() {
            // there was capacity left in this node, we're done
            return true;
        }

        if self.children.is_none() {
            self.split();
        }

        // Offer the point to the quadrants in fixed order; the first one
        // whose boundary contains it takes it.
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.insert_contained(position, id) {
                    return true;
                }
            }
        }

        false
    }

    fn split(&mut self) {
        debug_assert!(self.children.is_none());

        let quarter = self.bounds.half / 2.0;
        let cx = self.bounds.center.x;
        let cy = self.bounds.center.y;

        // screen coordinates, y grows downward:
        // | northwest | northeast |
        // | --------- | --------- |
        // | southwest | southeast |
        self.children = Some(Box::new([
            Self::new(Aabb::new(Vec2::new(cx - quarter.x, cy - quarter.y), quarter)),
            Self::new(Aabb::new(Vec2::new(cx + quarter.x, cy - quarter.y), quarter)),
            Self::new(Aabb::new(Vec2::new(cx - quarter.x, cy + quarter.y), quarter)),
            Self::new(Aabb::new(Vec2::new(cx + quarter.x, cy + quarter.y), quarter)),
        ]));
    }

    /// Collect every entity whose position lies within `range`.
    ///
    /// Entities are tested against the query box itself, not the node
    /// boundary, so a node that only partially overlaps `range` still
    /// reports its matching entities. Output order is deterministic: this
    /// node's matches first, then each child depth-first in NW/NE/SW/SE
    /// order. No entity appears twice since each lives in exactly one node.
    pub fn query_range(&self, range: &Aabb, out: &mut Vec<(Vec2, EntityId)>) {
        if !self.bounds.intersects(range) {
            return;
        }

        for &(position, id) in self.items.iter() {
            if range.contains_point(position) {
                out.push((position, id));
            }
        }

        if let Some(children) = self.children.as_ref() {
            for child in children.iter() {
                child.query_range(range, out);
            }
        }
    }
}
