use super::Point2;

/// Twice the signed area of a polygon (shoelace sum).
///
/// Consecutive pairs wrap around, so a closed input whose last point repeats
/// the first contributes a zero closing term and gives the same result as the
/// open ring.
fn shoelace_sum(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    shoelace_sum(points) * 0.5
}

/// Returns `true` if the polygon is wound clockwise.
///
/// A zero signed area (collinear or self-cancelling input) counts as
/// counter-clockwise. Face assignment parity depends on this tie-break.
#[must_use]
pub fn is_clockwise(points: &[Point2]) -> bool {
    shoelace_sum(points) < 0.0
}

/// Direction angle of the segment `from -> to` in `(-pi, pi]`.
#[must_use]
pub fn direction_angle(from: &Point2, to: &Point2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}
