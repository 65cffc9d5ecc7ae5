use alloc::vec::Vec;
use core::fmt;
use num_traits::float::Float;

use crate::dag::NodeId;
use crate::error::Error;
use crate::geometry::{Orientation, Point};
use crate::segment::LineSegment;

/// Handle of a trapezoid in a [`TrapezoidMap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrapezoidId(u32);

impl TrapezoidId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TrapezoidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A region bounded left and right by the vertical lines through `left_p` and
/// `right_p`, and from above and below by `top` and `bottom`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trapezoid<T: Float> {
    pub left_p: Point<T>,
    pub right_p: Point<T>,
    pub top: LineSegment<T>,
    pub bottom: LineSegment<T>,
    /// left neighbor sharing `bottom`
    pub(crate) lower_left: Option<TrapezoidId>,
    /// left neighbor sharing `top`
    pub(crate) upper_left: Option<TrapezoidId>,
    /// right neighbor sharing `bottom`
    pub(crate) lower_right: Option<TrapezoidId>,
    /// right neighbor sharing `top`
    pub(crate) upper_right: Option<TrapezoidId>,
    pub(crate) node: Option<NodeId>,
}

impl<T: Float> Trapezoid<T> {
    pub fn new(
        left_p: Point<T>,
        right_p: Point<T>,
        top: LineSegment<T>,
        bottom: LineSegment<T>,
    ) -> Self {
        Self {
            left_p,
            right_p,
            top,
            bottom,
            lower_left: None,
            upper_left: None,
            lower_right: None,
            upper_right: None,
            node: None,
        }
    }

    /// Neighbors across the left wall, bottom to top.
    pub fn left_neighbors(&self) -> Neighbors {
        Neighbors {
            lower: self.lower_left,
            upper: self.upper_left,
        }
    }

    /// Neighbors across the right wall, bottom to top.
    pub fn right_neighbors(&self) -> Neighbors {
        Neighbors {
            lower: self.lower_right,
            upper: self.upper_right,
        }
    }

    /// The DAG leaf that resolves to this trapezoid.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn width(&self) -> T {
        self.right_p.x - self.left_p.x
    }

    pub fn area(&self) -> Result<T, Error> {
        let (l, r) = (self.left_p.x, self.right_p.x);
        let left_height = self.top.y_at(l)? - self.bottom.y_at(l)?;
        let right_height = self.top.y_at(r)? - self.bottom.y_at(r)?;
        let two = T::one() + T::one();
        Ok((r - l) * (left_height + right_height) / two)
    }

    /// Whether `point` lies strictly inside the trapezoid.
    pub fn contains(&self, point: &Point<T>) -> bool {
        self.left_p.x < point.x
            && point.x < self.right_p.x
            && self.bottom.side_of(point) == Orientation::CounterClockwise
            && self.top.side_of(point) == Orientation::Clockwise
    }

    /// A point in the middle of the trapezoid, or `None` if it has no width.
    pub fn sample_point(&self) -> Option<Point<T>> {
        if self.width() <= T::zero() {
            return None;
        }
        let two = T::one() + T::one();
        let x = (self.left_p.x + self.right_p.x) / two;
        let top = self.top.y_at(x).ok()?;
        let bottom = self.bottom.y_at(x).ok()?;
        Some(Point::new(x, (top + bottom) / two))
    }
}

/// Up to two distinct neighbors, bottom first.
#[derive(Clone, Copy, Debug)]
pub struct Neighbors {
    lower: Option<TrapezoidId>,
    upper: Option<TrapezoidId>,
}

impl Iterator for Neighbors {
    type Item = TrapezoidId;

    fn next(&mut self) -> Option<TrapezoidId> {
        match self.lower.take() {
            Some(lower) => {
                if self.upper == Some(lower) {
                    self.upper = None;
                }
                Some(lower)
            }
            None => self.upper.take(),
        }
    }
}

/// The live trapezoids of a decomposition.
///
/// Removing a trapezoid frees its slot for good; handles are never reused, so a
/// stale handle is detected instead of aliasing a newer trapezoid.
#[derive(Clone, Debug)]
pub struct TrapezoidMap<T: Float> {
    slots: Vec<Option<Trapezoid<T>>>,
    live: usize,
}

impl<T: Float> Default for TrapezoidMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> TrapezoidMap<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Number of live trapezoids.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn add(&mut self, trapezoid: Trapezoid<T>) -> TrapezoidId {
        let id = TrapezoidId(self.slots.len() as u32);
        self.slots.push(Some(trapezoid));
        self.live += 1;
        id
    }

    /// Removes the trapezoid from the map. Links and DAG nodes are left untouched.
    pub fn delete(&mut self, id: TrapezoidId) -> Option<Trapezoid<T>> {
        let removed = self.slots.get_mut(id.index())?.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    pub fn contains(&self, id: TrapezoidId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: TrapezoidId) -> Option<&Trapezoid<T>> {
        self.slots.get(id.index())?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: TrapezoidId) -> Option<&mut Trapezoid<T>> {
        self.slots.get_mut(id.index())?.as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrapezoidId, &Trapezoid<T>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|t| (TrapezoidId(i as u32), t)))
    }

    /// Makes `left` and `right` neighbors across a wall along their shared bottom.
    pub fn link_lower(&mut self, left: Option<TrapezoidId>, right: Option<TrapezoidId>) {
        if let Some(t) = right.and_then(|id| self.get_mut(id)) {
            t.lower_left = left;
        }
        if let Some(t) = left.and_then(|id| self.get_mut(id)) {
            t.lower_right = right;
        }
    }

    /// Makes `left` and `right` neighbors across a wall along their shared top.
    pub fn link_upper(&mut self, left: Option<TrapezoidId>, right: Option<TrapezoidId>) {
        if let Some(t) = right.and_then(|id| self.get_mut(id)) {
            t.upper_left = left;
        }
        if let Some(t) = left.and_then(|id| self.get_mut(id)) {
            t.upper_right = right;
        }
    }

    /// Replaces the left neighbors of `id`, updating the neighbors' right links too.
    pub fn set_left_neighbors(
        &mut self,
        id: TrapezoidId,
        lower: Option<TrapezoidId>,
        upper: Option<TrapezoidId>,
    ) {
        self.link_lower(lower, Some(id));
        self.link_upper(upper, Some(id));
    }

    /// Replaces the right neighbors of `id`, updating the neighbors' left links too.
    pub fn set_right_neighbors(
        &mut self,
        id: TrapezoidId,
        lower: Option<TrapezoidId>,
        upper: Option<TrapezoidId>,
    ) {
        self.link_lower(Some(id), lower);
        self.link_upper(Some(id), upper);
    }
}

impl<T: Float> core::ops::Index<TrapezoidId> for TrapezoidMap<T> {
    type Output = Trapezoid<T>;

    fn index(&self, id: TrapezoidId) -> &Trapezoid<T> {
        match self.get(id) {
            Some(t) => t,
            None => panic!("trapezoid {} is not in the map", id),
        }
    }
}
