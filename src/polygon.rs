use alloc::vec::Vec;
use num_traits::float::Float;

use crate::error::Error;
use crate::geometry::Point;
use crate::segment::LineSegment;
use crate::Index;

/// A polygon given as an outer ring and optional hole rings.
#[derive(Clone, Debug)]
pub struct Polygon<T: Float> {
    vertices: Vec<Point<T>>,
    edges: Vec<LineSegment<T>>,
}

impl<T: Float> Polygon<T> {
    /// Builds a polygon from flat vertex data.
    ///
    /// `hole_indices` holds the start index of every hole ring, the same layout earcut
    /// takes. A ring that repeats its first vertex at the end is closed implicitly.
    pub fn new<N: Index>(
        data: impl IntoIterator<Item = [T; 2]>,
        hole_indices: &[N],
    ) -> Result<Self, Error> {
        let data: Vec<Point<T>> = data.into_iter().map(Point::from).collect();
        let mut vertices = Vec::with_capacity(data.len());
        let mut edges = Vec::with_capacity(data.len());

        let starts = core::iter::once(0).chain(hole_indices.iter().map(|h| h.into_usize()));
        let ends = hole_indices
            .iter()
            .map(|h| h.into_usize())
            .chain(core::iter::once(data.len()));

        for (ring, (start, end)) in starts.zip(ends).enumerate() {
            let mut points = data.get(start..end).unwrap_or(&[]);
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if points.len() > 1 && first == last {
                    points = &points[..points.len() - 1];
                }
            }
            if points.len() < 3 {
                return Err(Error::DegenerateRing { ring });
            }
            vertices.extend_from_slice(points);
            let mut prev = points[points.len() - 1];
            for &p in points {
                edges.push(LineSegment::new(prev, p));
                prev = p;
            }
        }

        Ok(Self { vertices, edges })
    }

    /// All ring vertices, outer ring first.
    pub fn vertices(&self) -> &[Point<T>] {
        &self.vertices
    }

    /// All boundary edges, ring by ring.
    pub fn edges(&self) -> &[LineSegment<T>] {
        &self.edges
    }

    /// Checks that no two edges cross.
    ///
    /// Edges that only share an endpoint are fine. Quadratic in the number of edges.
    pub fn check_simple(&self) -> Result<(), Error> {
        for (i, a) in self.edges.iter().enumerate() {
            for (j, b) in self.edges.iter().enumerate().skip(i + 1) {
                if a.intersects(b) {
                    return Err(Error::SelfIntersection {
                        first: i,
                        second: j,
                    });
                }
            }
        }
        Ok(())
    }
}
