use core::cmp::Ordering;
use core::fmt;
use num_traits::float::Float;

/// A point in the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T: Float> {
    pub x: T,
    pub y: T,
}

impl<T: Float> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Orders points left to right, and bottom to top on a shared x.
    ///
    /// Every "left of" decision of the decomposition goes through this order, which
    /// acts as an infinitesimal shear of the plane: no two distinct points share an x.
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        match self.x.partial_cmp(&other.x) {
            Some(Ordering::Equal) | None => {
                self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal)
            }
            Some(ord) => ord,
        }
    }

    #[inline]
    pub fn is_left_of(&self, other: &Self) -> bool {
        self.lex_cmp(other) == Ordering::Less
    }
}

impl<T: Float> From<[T; 2]> for Point<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self { x, y }
    }
}

impl<T: Float> fmt::Display for Point<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.x.to_f64().unwrap_or(f64::NAN);
        let y = self.y.to_f64().unwrap_or(f64::NAN);
        write!(f, "({}, {})", x, y)
    }
}

/// Turn direction of three points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise = -1,
    Collinear = 0,
    CounterClockwise = 1,
}

impl Orientation {
    /// -1, 0 or +1
    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn reversed(self) -> Self {
        match self {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::Collinear => Orientation::Collinear,
            Orientation::CounterClockwise => Orientation::Clockwise,
        }
    }
}

/// Orientation of the turn p -> q -> r.
///
/// Exact comparison against zero, there is no tolerance.
pub fn orientation<T: Float>(p: &Point<T>, q: &Point<T>, r: &Point<T>) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val > T::zero() {
        Orientation::Clockwise
    } else if val < T::zero() {
        Orientation::CounterClockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether `q` lies within the bounding box of `p` and `r`; exact for collinear points.
pub fn on_segment<T: Float>(p: &Point<T>, q: &Point<T>, r: &Point<T>) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Axis-aligned box enclosing the decomposition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<T: Float> {
    pub min: Point<T>,
    pub max: Point<T>,
}

impl<T: Float> BoundingBox<T> {
    /// Box around `points`, grown by `margin` on every side.
    ///
    /// Returns `None` for an empty input.
    pub fn around<'a>(points: impl IntoIterator<Item = &'a Point<T>>, margin: T) -> Option<Self>
    where
        T: 'a,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self {
            min: Point::new(min.x - margin, min.y - margin),
            max: Point::new(max.x + margin, max.y + margin),
        })
    }

    pub fn width(&self) -> T {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> T {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> T {
        self.width() * self.height()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pt(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    #[test]
    fn test_orientation() {
        assert_eq!(
            orientation(&pt(0., 0.), &pt(1., 0.), &pt(1., 1.)),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orientation(&pt(0., 0.), &pt(1., 0.), &pt(1., -1.)),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(&pt(0., 0.), &pt(1., 1.), &pt(3., 3.)),
            Orientation::Collinear
        );
        assert_eq!(Orientation::Clockwise.value(), -1);
        assert_eq!(Orientation::CounterClockwise.reversed(), Orientation::Clockwise);
    }

    #[test]
    fn test_on_segment() {
        assert!(on_segment(&pt(0., 0.), &pt(1., 1.), &pt(2., 2.)));
        assert!(on_segment(&pt(0., 0.), &pt(2., 2.), &pt(2., 2.)));
        assert!(!on_segment(&pt(0., 0.), &pt(3., 3.), &pt(2., 2.)));
        // q below the box of p and r
        assert!(!on_segment(&pt(0., 2.), &pt(1., 0.), &pt(2., 2.)));
    }

    #[test]
    fn test_lex_cmp() {
        assert_eq!(pt(0., 5.).lex_cmp(&pt(1., 0.)), Ordering::Less);
        assert_eq!(pt(1., 0.).lex_cmp(&pt(1., 2.)), Ordering::Less);
        assert_eq!(pt(1., 2.).lex_cmp(&pt(1., 2.)), Ordering::Equal);
        assert!(pt(4., 0.).is_left_of(&pt(4., 4.)));
        assert!(!pt(4., 4.).is_left_of(&pt(4., 4.)));
    }

    #[test]
    fn test_bounding_box() {
        let points = [pt(1., 2.), pt(5., 2.), pt(3., 6.)];
        let bbox = BoundingBox::around(&points, 1.).unwrap();
        assert_eq!(bbox.min, pt(0., 1.));
        assert_eq!(bbox.max, pt(6., 7.));
        assert_eq!(bbox.area(), 36.);
        assert!(BoundingBox::<f64>::around(&[], 1.).is_none());
    }
}
