use core::fmt;

use crate::dag::NodeId;
use crate::trapezoid::TrapezoidId;

/// Errors reported by the decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// An above/below test or a line evaluation was requested on a vertical segment.
    VerticalSegment,
    /// A polygon ring has fewer than three vertices.
    DegenerateRing { ring: usize },
    /// Two polygon edges (by index into the edge list) cross each other.
    SelfIntersection { first: usize, second: usize },
    /// The trapezoidal map and the search structure went out of sync.
    InvariantViolation(Violation),
}

/// A broken consistency rule between the trapezoidal map and the DAG.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// `neighbor` is linked from `trapezoid` but does not link back.
    AsymmetricNeighbors {
        trapezoid: TrapezoidId,
        neighbor: TrapezoidId,
    },
    /// `trapezoid` links to a trapezoid that is no longer in the map.
    DeadNeighbor {
        trapezoid: TrapezoidId,
        neighbor: TrapezoidId,
    },
    /// A live trapezoid has no leaf in the DAG.
    MissingLeaf { trapezoid: TrapezoidId },
    /// The leaf of `trapezoid` does not point back at it.
    LeafMismatch { trapezoid: TrapezoidId, node: NodeId },
    /// A DAG leaf points at a trapezoid that is no longer in the map.
    StaleLeaf { node: NodeId, trapezoid: TrapezoidId },
    /// The bottom segment of a trapezoid does not run below its top segment.
    InvertedBoundary { trapezoid: TrapezoidId },
    /// The insertion reached a trapezoid that is no longer in the map.
    UnknownTrapezoid { trapezoid: TrapezoidId },
    /// The walk along a segment needed a right neighbor that does not exist.
    MissingNeighbor { trapezoid: TrapezoidId },
    /// The walk along a segment passed its right endpoint without reaching it.
    Overshoot { trapezoid: TrapezoidId },
}

impl From<Violation> for Error {
    fn from(value: Violation) -> Self {
        Error::InvariantViolation(value)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::VerticalSegment => write!(f, "operation is undefined for a vertical segment"),
            Error::DegenerateRing { ring } => {
                write!(f, "ring {} has fewer than three vertices", ring)
            }
            Error::SelfIntersection { first, second } => {
                write!(f, "edges {} and {} intersect", first, second)
            }
            Error::InvariantViolation(v) => write!(f, "invariant violation: {}", v),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::AsymmetricNeighbors {
                trapezoid,
                neighbor,
            } => write!(
                f,
                "trapezoid {} links to {} which does not link back",
                trapezoid, neighbor
            ),
            Violation::DeadNeighbor {
                trapezoid,
                neighbor,
            } => write!(
                f,
                "trapezoid {} links to deleted trapezoid {}",
                trapezoid, neighbor
            ),
            Violation::MissingLeaf { trapezoid } => {
                write!(f, "trapezoid {} has no search node", trapezoid)
            }
            Violation::LeafMismatch { trapezoid, node } => write!(
                f,
                "node {} of trapezoid {} is not its leaf",
                node, trapezoid
            ),
            Violation::StaleLeaf { node, trapezoid } => write!(
                f,
                "leaf {} refers to deleted trapezoid {}",
                node, trapezoid
            ),
            Violation::InvertedBoundary { trapezoid } => {
                write!(f, "trapezoid {} has its bottom above its top", trapezoid)
            }
            Violation::UnknownTrapezoid { trapezoid } => {
                write!(f, "trapezoid {} is not in the map", trapezoid)
            }
            Violation::MissingNeighbor { trapezoid } => {
                write!(f, "trapezoid {} has no right neighbor to follow", trapezoid)
            }
            Violation::Overshoot { trapezoid } => write!(
                f,
                "segment walk passed its endpoint at trapezoid {}",
                trapezoid
            ),
        }
    }
}

impl core::error::Error for Error {}
