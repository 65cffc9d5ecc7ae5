use alloc::vec;
use alloc::vec::Vec;
use log::{debug, trace};
use num_traits::float::Float;

use crate::dag::{Dag, Node, NodeId};
use crate::error::{Error, Violation};
use crate::geometry::{BoundingBox, Point};
use crate::order::{InputOrder, InsertionOrder};
use crate::polygon::Polygon;
use crate::segment::LineSegment;
use crate::trapezoid::{Trapezoid, TrapezoidId, TrapezoidMap};

/// Settings of a decomposition.
#[derive(Clone, Copy, Debug)]
pub struct Options<T: Float> {
    /// gap between the polygon and the bounding box on every side
    pub margin: T,
    /// verify the map/DAG invariants after every inserted segment
    pub check_invariants: bool,
}

impl<T: Float> Default for Options<T> {
    fn default() -> Self {
        Self {
            margin: T::one(),
            check_invariants: cfg!(debug_assertions),
        }
    }
}

/// Vertical decomposition of a polygon built by inserting its edges one at a time,
/// together with the search structure that locates points in it.
#[derive(Clone, Debug)]
pub struct RandomizedIncrementalConstruction<T: Float> {
    polygon: Polygon<T>,
    pub(crate) map: TrapezoidMap<T>,
    pub(crate) dag: Dag<T>,
    bounds: BoundingBox<T>,
    options: Options<T>,
    skipped: usize,
}

impl<T: Float> RandomizedIncrementalConstruction<T> {
    /// Decomposes `polygon`, inserting its edges in input order.
    pub fn new(polygon: Polygon<T>) -> Result<Self, Error> {
        Self::with_options(polygon, &mut InputOrder, Options::default())
    }

    /// Decomposes `polygon`, inserting its edges in the order chosen by `order`.
    pub fn with_order(polygon: Polygon<T>, order: &mut impl InsertionOrder) -> Result<Self, Error> {
        Self::with_options(polygon, order, Options::default())
    }

    pub fn with_options(
        polygon: Polygon<T>,
        order: &mut impl InsertionOrder,
        options: Options<T>,
    ) -> Result<Self, Error> {
        let mut this = Self::bounded(polygon, options);
        this.compute_decomposition(order)?;
        Ok(this)
    }

    /// Only the bounding trapezoid of `polygon`; no edge is inserted yet.
    pub fn bounded(polygon: Polygon<T>, options: Options<T>) -> Self {
        let bounds = match BoundingBox::around(polygon.vertices(), options.margin) {
            Some(bounds) => bounds,
            // polygons always have vertices; keep a unit box for the degenerate case
            None => BoundingBox {
                min: Point::new(-options.margin, -options.margin),
                max: Point::new(options.margin, options.margin),
            },
        };
        debug!("bounding box {} - {}", bounds.min, bounds.max);

        let (min, max) = (bounds.min, bounds.max);
        let top = LineSegment::new(Point::new(min.x, max.y), max);
        let bottom = LineSegment::new(min, Point::new(max.x, min.y));

        let mut map = TrapezoidMap::new();
        let root = map.add(Trapezoid::new(min, max, top, bottom));
        let dag = Dag::new(root);
        if let Some(t) = map.get_mut(root) {
            t.node = Some(dag.root());
        }

        Self {
            polygon,
            map,
            dag,
            bounds,
            options,
            skipped: 0,
        }
    }

    fn compute_decomposition(&mut self, order: &mut impl InsertionOrder) -> Result<(), Error> {
        let mut segments = self.polygon.edges().to_vec();
        order.arrange(&mut segments);
        for segment in segments {
            self.insert_segment(segment)?;
        }
        debug!(
            "decomposed {} edges ({} vertical skipped) into {} trapezoids, {} search nodes, depth {}",
            self.polygon.edges().len(),
            self.skipped,
            self.map.len(),
            self.dag.len(),
            self.dag.depth()
        );
        Ok(())
    }

    /// The finished decomposition.
    pub fn trapezoidal_map(&self) -> &TrapezoidMap<T> {
        &self.map
    }

    pub fn dag(&self) -> &Dag<T> {
        &self.dag
    }

    pub fn polygon(&self) -> &Polygon<T> {
        &self.polygon
    }

    pub fn bounding_box(&self) -> &BoundingBox<T> {
        &self.bounds
    }

    /// Number of vertical segments that were left out.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The trapezoid containing `point`, if the point is inside the bounding box.
    pub fn locate(&self, point: &Point<T>) -> Option<TrapezoidId> {
        let inside = self.bounds.min.x <= point.x
            && point.x <= self.bounds.max.x
            && self.bounds.min.y <= point.y
            && point.y <= self.bounds.max.y;
        if !inside {
            return None;
        }
        let trapezoid = self.dag.locate(point, None).trapezoid;
        self.map.contains(trapezoid).then_some(trapezoid)
    }

    /// Adds one segment to the decomposition.
    ///
    /// The segment must lie inside the bounding box and must not cross any segment
    /// inserted before. Vertical segments are skipped.
    pub fn insert_segment(&mut self, segment: LineSegment<T>) -> Result<(), Error> {
        if segment.is_vertical() {
            debug!("skipping vertical segment {}", segment);
            self.skipped += 1;
            return Ok(());
        }

        let start = self.dag.locate(&segment.p, Some(&segment));
        let end = self.dag.locate(&segment.q, Some(&segment));
        let crossed = self.follow_segment(&segment, start.trapezoid, end.trapezoid)?;
        trace!(
            "inserting {} across {} trapezoid(s), p existed: {}, q existed: {}",
            segment,
            crossed.len(),
            start.existed,
            end.existed
        );

        if let [only] = crossed[..] {
            self.split_one(segment, only)?;
        } else {
            self.split_many(segment, &crossed)?;
        }
        for id in crossed {
            self.map.delete(id);
        }

        if self.options.check_invariants {
            self.check_invariants()?;
        }
        Ok(())
    }

    fn trapezoid(&self, id: TrapezoidId) -> Result<&Trapezoid<T>, Error> {
        self.map
            .get(id)
            .ok_or(Error::from(Violation::UnknownTrapezoid { trapezoid: id }))
    }

    fn leaf(&self, id: TrapezoidId) -> Result<NodeId, Error> {
        self.trapezoid(id)?
            .node
            .ok_or(Error::from(Violation::MissingLeaf { trapezoid: id }))
    }

    /// Registers a new trapezoid in the map and gives it a fresh leaf.
    fn spawn(&mut self, trapezoid: Trapezoid<T>) -> TrapezoidId {
        let id = self.map.add(trapezoid);
        let node = self.dag.push(Node::Leaf(id));
        if let Some(t) = self.map.get_mut(id) {
            t.node = Some(node);
        }
        id
    }

    /// Trapezoids crossed by `segment`, left to right.
    fn follow_segment(
        &self,
        segment: &LineSegment<T>,
        first: TrapezoidId,
        last: TrapezoidId,
    ) -> Result<Vec<TrapezoidId>, Error> {
        let mut crossed = vec![first];
        let mut current = first;
        while current != last {
            let trapezoid = self.trapezoid(current)?;
            if !trapezoid.right_p.is_left_of(&segment.q) {
                return Err(Violation::Overshoot { trapezoid: current }.into());
            }
            // the segment passes below the right point into the lower neighbor,
            // otherwise into the upper one
            let next = if segment.above_line(&trapezoid.right_p)? {
                trapezoid.lower_right
            } else {
                trapezoid.upper_right
            };
            current = next.ok_or(Violation::MissingNeighbor { trapezoid: current })?;
            crossed.push(current);
        }
        Ok(crossed)
    }

    /// The segment lies inside a single trapezoid, which is replaced by two to four.
    fn split_one(
        &mut self,
        segment: LineSegment<T>,
        old_id: TrapezoidId,
    ) -> Result<(), Error> {
        let old = self.trapezoid(old_id)?.clone();
        let p_existed = old.left_p == segment.p;
        let q_existed = old.right_p == segment.q;

        let below = self.spawn(Trapezoid::new(segment.p, segment.q, segment, old.bottom));
        let above = self.spawn(Trapezoid::new(segment.p, segment.q, old.top, segment));

        let left = if p_existed {
            self.map.link_lower(old.lower_left, Some(below));
            self.map.link_upper(old.upper_left, Some(above));
            None
        } else {
            let left = self.spawn(Trapezoid::new(old.left_p, segment.p, old.top, old.bottom));
            self.map.set_left_neighbors(left, old.lower_left, old.upper_left);
            self.map.set_right_neighbors(left, Some(below), Some(above));
            Some(left)
        };

        let right = if q_existed {
            self.map.link_lower(Some(below), old.lower_right);
            self.map.link_upper(Some(above), old.upper_right);
            None
        } else {
            let right = self.spawn(Trapezoid::new(segment.q, old.right_p, old.top, old.bottom));
            self.map.set_right_neighbors(right, old.lower_right, old.upper_right);
            self.map.set_left_neighbors(right, Some(below), Some(above));
            Some(right)
        };

        self.replace_leaf(old_id, segment, left, right, below, above)
    }

    /// The segment crosses several trapezoids.
    ///
    /// Every crossed trapezoid is cut into a part above and a part below the segment.
    /// Consecutive parts are merged while the wall between them is cut away, which is
    /// exactly when they share the same top (above) or bottom (below).
    fn split_many(
        &mut self,
        segment: LineSegment<T>,
        crossed: &[TrapezoidId],
    ) -> Result<(), Error> {
        let (first_id, middle, last_id) = match crossed {
            [first, middle @ .., last] => (*first, middle, *last),
            [only] => return Err(Violation::MissingNeighbor { trapezoid: *only }.into()),
            [] => return Ok(()),
        };

        // First trapezoid: the segment starts inside it or on its left wall.
        let first = self.trapezoid(first_id)?.clone();
        let p_existed = first.left_p == segment.p;

        let below = self.spawn(Trapezoid::new(segment.p, first.right_p, segment, first.bottom));
        let above = self.spawn(Trapezoid::new(segment.p, first.right_p, first.top, segment));
        self.map.link_lower(Some(below), first.lower_right);
        self.map.link_upper(Some(above), first.upper_right);

        let left = if p_existed {
            self.map.link_lower(first.lower_left, Some(below));
            self.map.link_upper(first.upper_left, Some(above));
            None
        } else {
            let left = self.spawn(Trapezoid::new(first.left_p, segment.p, first.top, first.bottom));
            self.map.set_left_neighbors(left, first.lower_left, first.upper_left);
            self.map.set_right_neighbors(left, Some(below), Some(above));
            Some(left)
        };
        self.replace_leaf(first_id, segment, left, None, below, above)?;

        let mut prev_old = first_id;
        let mut prev_below = below;
        let mut prev_above = above;

        for &old_id in middle {
            let old = self.trapezoid(old_id)?.clone();
            let (below, above) =
                self.continue_split(segment, &old, old.right_p, prev_old, prev_below, prev_above)?;
            self.map.link_lower(Some(below), old.lower_right);
            self.map.link_upper(Some(above), old.upper_right);
            self.replace_leaf(old_id, segment, None, None, below, above)?;

            prev_old = old_id;
            prev_below = below;
            prev_above = above;
        }

        // Last trapezoid: the segment ends inside it or on its right wall.
        let last = self.trapezoid(last_id)?.clone();
        let q_existed = last.right_p == segment.q;

        let (below, above) =
            self.continue_split(segment, &last, segment.q, prev_old, prev_below, prev_above)?;
        let right = if q_existed {
            self.map.link_lower(Some(below), last.lower_right);
            self.map.link_upper(Some(above), last.upper_right);
            None
        } else {
            let right = self.spawn(Trapezoid::new(segment.q, last.right_p, last.top, last.bottom));
            self.map.set_right_neighbors(right, last.lower_right, last.upper_right);
            self.map.set_left_neighbors(right, Some(below), Some(above));
            Some(right)
        };
        self.replace_leaf(last_id, segment, None, right, below, above)
    }

    /// Below and above parts of `old` up to `right_p`, either extending the parts of
    /// the previous trapezoid or starting new ones at the wall between the two.
    fn continue_split(
        &mut self,
        segment: LineSegment<T>,
        old: &Trapezoid<T>,
        right_p: Point<T>,
        prev_old: TrapezoidId,
        prev_below: TrapezoidId,
        prev_above: TrapezoidId,
    ) -> Result<(TrapezoidId, TrapezoidId), Error> {
        let below = if self.trapezoid(prev_below)?.bottom == old.bottom {
            if let Some(t) = self.map.get_mut(prev_below) {
                t.right_p = right_p;
            }
            prev_below
        } else {
            let below = self.spawn(Trapezoid::new(old.left_p, right_p, segment, old.bottom));
            self.map.link_upper(Some(prev_below), Some(below));
            let lower_left = if old.lower_left == Some(prev_old) {
                Some(prev_below)
            } else {
                old.lower_left
            };
            self.map.link_lower(lower_left, Some(below));
            below
        };

        let above = if self.trapezoid(prev_above)?.top == old.top {
            if let Some(t) = self.map.get_mut(prev_above) {
                t.right_p = right_p;
            }
            prev_above
        } else {
            let above = self.spawn(Trapezoid::new(old.left_p, right_p, old.top, segment));
            self.map.link_lower(Some(prev_above), Some(above));
            let upper_left = if old.upper_left == Some(prev_old) {
                Some(prev_above)
            } else {
                old.upper_left
            };
            self.map.link_upper(upper_left, Some(above));
            above
        };

        Ok((below, above))
    }

    /// Turns the leaf of `old_id` into the decision subtree of its replacements:
    /// an x-node for p (if there is a `left` part), an x-node for q (if there is a
    /// `right` part) and a y-node for the segment.
    fn replace_leaf(
        &mut self,
        old_id: TrapezoidId,
        segment: LineSegment<T>,
        left: Option<TrapezoidId>,
        right: Option<TrapezoidId>,
        below: TrapezoidId,
        above: TrapezoidId,
    ) -> Result<(), Error> {
        let node = self.leaf(old_id)?;
        let split = Node::Y {
            segment,
            below: self.leaf(below)?,
            above: self.leaf(above)?,
        };
        let inner = match right {
            Some(right) => Node::X {
                point: segment.q,
                left: self.dag.push(split),
                right: self.leaf(right)?,
            },
            None => split,
        };
        let root = match left {
            Some(left) => Node::X {
                point: segment.p,
                left: self.leaf(left)?,
                right: self.dag.push(inner),
            },
            None => inner,
        };
        self.dag.modify(node, root);
        Ok(())
    }
}
