use num_traits::float::Float;

use crate::construction::RandomizedIncrementalConstruction;
use crate::dag::Node;
use crate::error::{Error, Violation};
use crate::trapezoid::{Trapezoid, TrapezoidId, TrapezoidMap};

impl<T: Float> RandomizedIncrementalConstruction<T> {
    /// Verifies that the trapezoidal map and the DAG agree with each other.
    ///
    /// Every live trapezoid must own a leaf that points back at it, every leaf must
    /// point at a live trapezoid, neighbor links must be symmetric and refer to live
    /// trapezoids, and the bottom of every trapezoid with positive width must run
    /// below its top.
    pub fn check_invariants(&self) -> Result<(), Error> {
        for (id, trapezoid) in self.map.iter() {
            let node = trapezoid
                .node()
                .ok_or(Violation::MissingLeaf { trapezoid: id })?;
            match self.dag.get(node) {
                Some(Node::Leaf(t)) if *t == id => {}
                _ => return Err(Violation::LeafMismatch { trapezoid: id, node }.into()),
            }

            check_neighbors(&self.map, id, trapezoid)?;

            if trapezoid.width() > T::zero() && !trapezoid.bottom.below_other(&trapezoid.top)? {
                return Err(Violation::InvertedBoundary { trapezoid: id }.into());
            }
        }

        for (node, id) in self.dag.leaves() {
            let trapezoid = self.map.get(id).ok_or(Violation::StaleLeaf {
                node,
                trapezoid: id,
            })?;
            if trapezoid.node() != Some(node) {
                return Err(Violation::LeafMismatch { trapezoid: id, node }.into());
            }
        }
        Ok(())
    }
}

fn check_neighbors<T: Float>(
    map: &TrapezoidMap<T>,
    id: TrapezoidId,
    trapezoid: &Trapezoid<T>,
) -> Result<(), Violation> {
    for neighbor in trapezoid.right_neighbors() {
        let other = map.get(neighbor).ok_or(Violation::DeadNeighbor {
            trapezoid: id,
            neighbor,
        })?;
        if !other.left_neighbors().any(|n| n == id) {
            return Err(Violation::AsymmetricNeighbors {
                trapezoid: id,
                neighbor,
            });
        }
    }
    for neighbor in trapezoid.left_neighbors() {
        let other = map.get(neighbor).ok_or(Violation::DeadNeighbor {
            trapezoid: id,
            neighbor,
        })?;
        if !other.right_neighbors().any(|n| n == id) {
            return Err(Violation::AsymmetricNeighbors {
                trapezoid: id,
                neighbor,
            });
        }
    }
    Ok(())
}
