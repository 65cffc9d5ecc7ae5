//! Trapezoidal decomposition of polygons with a DAG for point location.
//!
//! Polygon edges are inserted one at a time into a vertical decomposition of the
//! polygon's bounding box. Every insertion splits the trapezoids the edge crosses and
//! grows the search structure in place, so the finished [`RandomizedIncrementalConstruction`]
//! answers "which trapezoid contains this point" in expected logarithmic depth when
//! the edges are inserted in random order.
//!
//! Points with equal x are ordered by y, which keeps the decomposition well defined
//! for vertically aligned vertices at the cost of zero-width trapezoids.

#![no_std]

extern crate alloc;

mod construction;
mod dag;
mod error;
mod geometry;
mod invariants;
mod order;
mod polygon;
mod segment;
mod trapezoid;

use num_traits::float::Float;

pub use construction::{Options, RandomizedIncrementalConstruction};
pub use dag::{Dag, Location, Node, NodeId};
pub use error::{Error, Violation};
pub use geometry::{on_segment, orientation, BoundingBox, Orientation, Point};
pub use order::{InputOrder, InsertionOrder, Shuffled};
pub use polygon::Polygon;
pub use segment::LineSegment;
pub use trapezoid::{Neighbors, Trapezoid, TrapezoidId, TrapezoidMap};

/// Index of a vertex
pub trait Index: Copy {
    fn into_usize(self) -> usize;
    fn from_usize(v: usize) -> Self;
}
impl Index for u32 {
    fn into_usize(self) -> usize {
        self as usize
    }
    fn from_usize(v: usize) -> Self {
        v as Self
    }
}
impl Index for u16 {
    fn into_usize(self) -> usize {
        self as usize
    }
    fn from_usize(v: usize) -> Self {
        v as Self
    }
}
impl Index for usize {
    fn into_usize(self) -> usize {
        self
    }
    fn from_usize(v: usize) -> Self {
        v as Self
    }
}

/// Returns a percentage difference between the bounding box area and the total area
/// of the trapezoids covering it. Zero means the decomposition tiles the box exactly.
pub fn deviation<T: Float>(map: &TrapezoidMap<T>, bounds: &BoundingBox<T>) -> Result<T, Error> {
    let box_area = bounds.area();
    let mut trapezoids_area = T::zero();
    for (_, trapezoid) in map.iter() {
        trapezoids_area = trapezoids_area + trapezoid.area()?;
    }
    if box_area == T::zero() && trapezoids_area == T::zero() {
        return Ok(T::zero());
    }
    Ok(((trapezoids_area - box_area) / box_area).abs())
}
