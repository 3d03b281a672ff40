//! Vector utilities for segment queries

use glam::Vec3;

/// Calculates the distance between two points
#[inline]
pub fn distance(a: &Vec3, b: &Vec3) -> f32 {
    (*b - *a).length()
}

/// Calculates the squared distance between two points
#[inline]
pub fn distance_squared(a: &Vec3, b: &Vec3) -> f32 {
    (*b - *a).length_squared()
}

/// Projects `p` onto the infinite line through `a` and `b`.
///
/// Returns the line parameter `t` such that `a + t * (b - a)` is the foot of
/// the perpendicular, or `None` when `a == b`.
#[inline]
pub fn segment_projection(p: &Vec3, a: &Vec3, b: &Vec3) -> Option<f32> {
    let ab = *b - *a;
    let ab_len_sq = ab.dot(ab);

    if ab_len_sq == 0.0 {
        return None;
    }

    Some((*p - *a).dot(ab) / ab_len_sq)
}

/// Finds the closest point on the segment `a`-`b` to `p`.
///
/// Degenerate segments (zero length) have no direction and yield `None`.
/// Parameters at or beyond either end snap to that endpoint, so querying an
/// endpoint returns it bit-for-bit.
pub fn closest_point_on_segment(p: &Vec3, a: &Vec3, b: &Vec3) -> Option<Vec3> {
    let t = segment_projection(p, a, b)?;

    let point = if t <= 0.0 {
        *a
    } else if t >= 1.0 {
        *b
    } else {
        *a + (*b - *a) * t
    };

    Some(point)
}

/// Calculates the squared distance between a point and a line segment
pub fn distance_point_segment_squared(p: &Vec3, a: &Vec3, b: &Vec3) -> Option<f32> {
    closest_point_on_segment(p, a, b).map(|closest| distance_squared(p, &closest))
}
