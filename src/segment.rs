use core::fmt;
use num_traits::float::Float;

use crate::error::Error;
use crate::geometry::{on_segment, orientation, Orientation, Point};

/// A line segment whose left (or, if vertical, lower) endpoint is `p`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment<T: Float> {
    pub p: Point<T>,
    pub q: Point<T>,
}

impl<T: Float> LineSegment<T> {
    /// Creates a segment, swapping the endpoints if needed so that `p` comes first.
    pub fn new(a: Point<T>, b: Point<T>) -> Self {
        if b.is_left_of(&a) {
            Self { p: b, q: a }
        } else {
            Self { p: a, q: b }
        }
    }

    #[inline]
    pub fn is_vertical(&self) -> bool {
        self.p.x == self.q.x
    }

    /// Squared length.
    pub fn len(&self) -> T {
        let dx = self.q.x - self.p.x;
        let dy = self.q.y - self.p.y;
        dx * dx + dy * dy
    }

    pub fn is_empty(&self) -> bool {
        self.p == self.q
    }

    pub fn slope(&self) -> Option<T> {
        if self.is_vertical() {
            None
        } else {
            Some((self.q.y - self.p.y) / (self.q.x - self.p.x))
        }
    }

    pub fn intercept(&self) -> Option<T> {
        self.slope().map(|slope| self.p.y - slope * self.p.x)
    }

    /// Evaluates the supporting line at `x`.
    pub fn y_at(&self, x: T) -> Result<T, Error> {
        match (self.slope(), self.intercept()) {
            (Some(slope), Some(intercept)) => Ok(slope * x + intercept),
            _ => Err(Error::VerticalSegment),
        }
    }

    /// Side of `point` relative to the directed line p -> q.
    ///
    /// Counter-clockwise means above, clockwise below.
    #[inline]
    pub(crate) fn side_of(&self, point: &Point<T>) -> Orientation {
        orientation(&self.p, &self.q, point)
    }

    /// Whether `point` lies above the supporting line. Points on the line count as above.
    pub fn above_line(&self, point: &Point<T>) -> Result<bool, Error> {
        if self.is_vertical() {
            return Err(Error::VerticalSegment);
        }
        Ok(self.side_of(point) != Orientation::Clockwise)
    }

    /// Whether the two segments intersect.
    ///
    /// Segments sharing an endpoint never intersect, so adjacent polygon edges are not
    /// reported.
    pub fn intersects(&self, other: &Self) -> bool {
        if self.p == other.p || self.q == other.q || self.p == other.q || self.q == other.p {
            return false;
        }

        let o1 = orientation(&self.p, &self.q, &other.p);
        let o2 = orientation(&self.p, &self.q, &other.q);
        let o3 = orientation(&other.p, &other.q, &self.p);
        let o4 = orientation(&other.p, &other.q, &self.q);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Orientation::Collinear && on_segment(&self.p, &other.p, &self.q))
            || (o2 == Orientation::Collinear && on_segment(&self.p, &other.q, &self.q))
            || (o3 == Orientation::Collinear && on_segment(&other.p, &self.p, &other.q))
            || (o4 == Orientation::Collinear && on_segment(&other.p, &self.q, &other.q))
    }

    /// Whether `self` runs below `other`.
    ///
    /// Only meaningful for non-crossing segments whose x-ranges overlap: either both
    /// endpoints of `other` are above this line, or no endpoint of `self` is above the
    /// line of `other`.
    pub fn below_other(&self, other: &Self) -> Result<bool, Error> {
        if other.is_vertical() {
            return Err(Error::VerticalSegment);
        }
        if self.above_line(&other.p)? && self.above_line(&other.q)? {
            return Ok(true);
        }
        Ok(!other.above_line(&self.p)? && !other.above_line(&self.q)?)
    }
}

impl<T: Float> fmt::Display for LineSegment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.p, self.q)
    }
}
