use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use num_traits::float::Float;

use crate::geometry::{Orientation, Point};
use crate::segment::LineSegment;
use crate::trapezoid::TrapezoidId;

/// Handle of a node in a [`Dag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A node of the point-location structure.
#[derive(Clone, Debug, PartialEq)]
pub enum Node<T: Float> {
    /// Left or right of the vertical line through `point`.
    X {
        point: Point<T>,
        left: NodeId,
        right: NodeId,
    },
    /// Below or above `segment`.
    Y {
        segment: LineSegment<T>,
        below: NodeId,
        above: NodeId,
    },
    Leaf(TrapezoidId),
}

/// Outcome of a point-location query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// the leaf the query ended in
    pub node: NodeId,
    pub trapezoid: TrapezoidId,
    /// whether the query point is already a vertex of the decomposition
    pub existed: bool,
}

/// Directed acyclic search structure over a trapezoidal map.
///
/// Nodes live in an arena and are never removed. When a trapezoid is split its leaf
/// is overwritten with the root of the new decision subtree, so every parent that
/// pointed at the leaf now reaches the subtree.
#[derive(Clone, Debug)]
pub struct Dag<T: Float> {
    nodes: Vec<Node<T>>,
}

impl<T: Float> Dag<T> {
    /// A structure with a single leaf.
    pub fn new(root: TrapezoidId) -> Self {
        Self {
            nodes: vec![Node::Leaf(root)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    pub(crate) fn push(&mut self, node: Node<T>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Replaces the content of `id`, keeping every edge that leads into it.
    pub fn modify(&mut self, id: NodeId, node: Node<T>) {
        self.nodes[id.index()] = node;
    }

    /// Walks from the root to the leaf whose trapezoid contains `point`.
    ///
    /// When `point` is an endpoint of `segment`, ties are broken as if the point had
    /// moved a tiny step along the segment: a right endpoint goes left of its own
    /// x-node, any other point goes right, and on a segment shared at the endpoint the
    /// other endpoint of `segment` decides above or below. Points exactly on a
    /// boundary without a segment resolve to the right and above side.
    pub fn locate(&self, point: &Point<T>, segment: Option<&LineSegment<T>>) -> Location {
        let mut id = self.root();
        let mut existed = false;
        loop {
            match &self.nodes[id.index()] {
                Node::Leaf(trapezoid) => {
                    return Location {
                        node: id,
                        trapezoid: *trapezoid,
                        existed,
                    }
                }
                Node::X { point: x, left, right } => {
                    id = match point.lex_cmp(x) {
                        Ordering::Less => *left,
                        Ordering::Greater => *right,
                        Ordering::Equal => {
                            existed = true;
                            match segment {
                                Some(s) if s.q == *point => *left,
                                _ => *right,
                            }
                        }
                    };
                }
                Node::Y {
                    segment: s,
                    below,
                    above,
                } => {
                    let side = match (s.side_of(point), segment) {
                        (Orientation::Collinear, Some(own)) => {
                            let other = if own.p == *point { own.q } else { own.p };
                            s.side_of(&other)
                        }
                        (side, _) => side,
                    };
                    id = if side == Orientation::Clockwise {
                        *below
                    } else {
                        *above
                    };
                }
            }
        }
    }

    /// Leaves as (node, trapezoid) pairs.
    pub fn leaves(&self) -> impl Iterator<Item = (NodeId, TrapezoidId)> + '_ {
        self.iter().filter_map(|(id, node)| match node {
            Node::Leaf(t) => Some((id, *t)),
            _ => None,
        })
    }

    /// Number of x-nodes, y-nodes and leaves.
    pub fn node_counts(&self) -> (usize, usize, usize) {
        self.nodes
            .iter()
            .fold((0, 0, 0), |(x, y, leaf), node| match node {
                Node::X { .. } => (x + 1, y, leaf),
                Node::Y { .. } => (x, y + 1, leaf),
                Node::Leaf(_) => (x, y, leaf + 1),
            })
    }

    /// Length of the longest path from the root to a leaf.
    pub fn depth(&self) -> usize {
        let mut memo: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut stack = vec![self.root()];
        while let Some(&id) = stack.last() {
            if memo[id.index()].is_some() {
                stack.pop();
                continue;
            }
            match &self.nodes[id.index()] {
                Node::Leaf(_) => {
                    memo[id.index()] = Some(0);
                    stack.pop();
                }
                Node::X {
                    left: a, right: b, ..
                }
                | Node::Y {
                    below: a, above: b, ..
                } => match (memo[a.index()], memo[b.index()]) {
                    (Some(da), Some(db)) => {
                        memo[id.index()] = Some(1 + da.max(db));
                        stack.pop();
                    }
                    (da, db) => {
                        if da.is_none() {
                            stack.push(*a);
                        }
                        if db.is_none() {
                            stack.push(*b);
                        }
                    }
                },
            }
        }
        memo[self.root().index()].unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::trapezoid::{Trapezoid, TrapezoidMap};

    fn pt(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    /// A box split at x = 2 whose right half is cut by the segment (2,1)-(4,1).
    fn sample() -> (Dag<f64>, [TrapezoidId; 3], LineSegment<f64>) {
        let top = LineSegment::new(pt(0., 4.), pt(4., 4.));
        let bottom = LineSegment::new(pt(0., 0.), pt(4., 0.));
        let cut = LineSegment::new(pt(2., 1.), pt(4., 1.));
        let mut map = TrapezoidMap::new();
        let left = map.add(Trapezoid::new(pt(0., 0.), pt(2., 1.), top, bottom));
        let below = map.add(Trapezoid::new(pt(2., 1.), pt(4., 1.), cut, bottom));
        let above = map.add(Trapezoid::new(pt(2., 1.), pt(4., 1.), top, cut));

        let mut dag = Dag::new(left);
        let left_leaf = dag.push(Node::Leaf(left));
        let below_leaf = dag.push(Node::Leaf(below));
        let above_leaf = dag.push(Node::Leaf(above));
        let y = dag.push(Node::Y {
            segment: cut,
            below: below_leaf,
            above: above_leaf,
        });
        dag.modify(
            dag.root(),
            Node::X {
                point: pt(2., 1.),
                left: left_leaf,
                right: y,
            },
        );
        (dag, [left, below, above], cut)
    }

    #[test]
    fn test_locate() {
        let (dag, [left, below, above], _) = sample();
        assert_eq!(dag.locate(&pt(1., 3.), None).trapezoid, left);
        assert_eq!(dag.locate(&pt(3., 0.5), None).trapezoid, below);
        assert_eq!(dag.locate(&pt(3., 2.), None).trapezoid, above);
        // same x as the split point, lower y: left of it
        assert_eq!(dag.locate(&pt(2., 0.5), None).trapezoid, left);
        // on the segment: above
        assert_eq!(dag.locate(&pt(3., 1.), None).trapezoid, above);
        assert!(!dag.locate(&pt(3., 2.), None).existed);
    }

    #[test]
    fn test_locate_endpoints() {
        let (dag, [left, below, above], _) = sample();

        // a segment starting at the existing vertex and rising
        let rising = LineSegment::new(pt(2., 1.), pt(4., 3.));
        let loc = dag.locate(&rising.p, Some(&rising));
        assert_eq!(loc.trapezoid, above);
        assert!(loc.existed);

        // falling from the same vertex
        let falling = LineSegment::new(pt(2., 1.), pt(4., 0.5));
        assert_eq!(dag.locate(&falling.p, Some(&falling)).trapezoid, below);

        // a segment ending at the vertex goes left of it
        let incoming = LineSegment::new(pt(1., 1.), pt(2., 1.));
        let loc = dag.locate(&incoming.q, Some(&incoming));
        assert_eq!(loc.trapezoid, left);
        assert!(loc.existed);
    }

    #[test]
    fn test_stats() {
        let (dag, [left, ..], _) = sample();
        assert_eq!(dag.node_counts(), (1, 1, 3));
        assert_eq!(dag.depth(), 2);
        assert_eq!(dag.leaves().count(), 3);
        assert_eq!(Dag::<f64>::new(left).depth(), 0);
    }
}
