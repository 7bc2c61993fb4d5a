use skirm_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    let d = a - b;
    d.x.abs() + d.y.abs()
}

/// Chebyshev (L∞) distance between two points: the number of king moves
/// separating them.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    let d = a - b;
    d.x.abs().max(d.y.abs())
}
