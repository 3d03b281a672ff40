//! Line-segment geometry built from a decoded navigation graph
//!
//! Each edge of a [`NavData`] becomes one 3D segment. Queries project a point
//! onto every segment and keep the closest projection.

use glam::Vec3;
use wiznav_common::{closest_point_on_segment, distance_squared, Error, Result};

use crate::nav_data::NavData;

/// One walkable segment of the mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    /// Index of the source edge in [`NavData::edges`]
    pub edge: usize,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3, edge: usize) -> Self {
        Self { start, end, edge }
    }

    /// True when both endpoints coincide
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let d = self.end - self.start;
        d.dot(d) == 0.0
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    /// Closest point of this segment to `point`, `None` if degenerate
    #[inline]
    pub fn closest_point(&self, point: &Vec3) -> Option<Vec3> {
        closest_point_on_segment(point, &self.start, &self.end)
    }
}

/// Result of a nearest-point query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    /// The closest point lying on the mesh
    pub point: Vec3,
    /// Index of the segment owning `point`
    pub segment: usize,
    /// Squared distance from the query point to `point`
    pub distance_squared: f32,
}

/// Queryable set of mesh segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentSet {
    segments: Vec<Segment>,
}

impl From<Vec<Segment>> for SegmentSet {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl SegmentSet {
    /// Builds one segment per edge, in edge order.
    ///
    /// Fails with [`Error::IndexOutOfRange`] on the first edge referencing a
    /// vertex that was not retained by the decoder.
    pub fn build(data: &NavData) -> Result<Self> {
        let vertex_count = data.vertices.len();
        let resolve = |edge: usize, index: i16| {
            data.vertex(index).ok_or(Error::IndexOutOfRange {
                edge,
                index: i32::from(index),
                vertex_count,
            })
        };

        let segments = data
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| -> Result<Segment> {
                Ok(Segment::new(resolve(i, e.start)?, resolve(i, e.stop)?, i))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { segments })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Number of zero-length segments, which queries ignore
    pub fn degenerate_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_degenerate()).count()
    }

    /// Axis-aligned bounds of all segment endpoints
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.segments.iter().flat_map(|s| [s.start, s.end]);
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Finds the closest point on any segment to `query`.
    ///
    /// Returns `None` when the set is empty or no segment yields a finite
    /// distance (degenerate or non-finite vertices). On exact ties the
    /// earliest segment wins.
    pub fn nearest_point(&self, query: Vec3) -> Option<NearestPoint> {
        let mut best: Option<NearestPoint> = None;
        let mut best_dist_sq = f32::INFINITY;

        for (index, segment) in self.segments.iter().enumerate() {
            let Some(point) = segment.closest_point(&query) else {
                continue;
            };

            let dist_sq = distance_squared(&query, &point);
            // NaN distances never replace the current best
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                best = Some(NearestPoint {
                    point,
                    segment: index,
                    distance_squared: dist_sq,
                });
            }
        }

        best
    }

    /// Same as [`Self::nearest_point`] but reports a missing result as [`Error::NoResult`]
    pub fn nearest_point_or_err(&self, query: Vec3) -> Result<NearestPoint> {
        self.nearest_point(query).ok_or(Error::NoResult)
    }
}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
