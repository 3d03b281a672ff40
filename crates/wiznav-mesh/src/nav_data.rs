//! Zone navigation mesh decoding
//!
//! A `zone.nav` asset is a flat little-endian record stream:
//!
//! ```text
//! i16 vertex_count            informational
//! i16 vertex_max              number of vertex records to accept
//! i16 reserved
//! repeated { f32 x, f32 y, f32 z, i16 declared_index }
//! i32 edge_count
//! repeated edge_count times { i16 start, i16 stop }
//! ```
//!
//! Vertex records carry their own index. A record whose index does not match
//! the next expected one is rejected and shrinks the scan bound by one, so
//! the number of accepted vertices can be lower than `vertex_max`.

use glam::Vec3;
use wiznav_common::Result;

use crate::byte_stream::ByteStream;

/// Size of one encoded vertex record in bytes
pub const VERTEX_RECORD_SIZE: usize = 14;

/// Size of one encoded edge record in bytes
pub const EDGE_RECORD_SIZE: usize = 4;

/// Size of the fixed header preceding the vertex records
pub const HEADER_SIZE: usize = 6;

/// Connection between two vertices, by index into [`NavData::vertices`].
///
/// Indices are stored exactly as decoded and may be out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Edge {
    pub start: i16,
    pub stop: i16,
}

impl Edge {
    pub const fn new(start: i16, stop: i16) -> Self {
        Self { start, stop }
    }
}

/// Decoded navigation graph for one zone
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct NavData {
    /// Vertex count from the header; not used for decoding
    pub declared_vertex_count: i16,
    /// Accepted vertices, in stream order
    pub vertices: Vec<Vec3>,
    /// Edges, in stream order
    pub edges: Vec<Edge>,
    /// Number of vertex records rejected for an out-of-sequence index
    pub discarded_records: usize,
}

/// Outcome of checking one vertex record against the expected index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordDecision {
    Accept,
    Reject,
}

impl RecordDecision {
    fn for_index(declared_index: i16, expected: i32) -> Self {
        if i32::from(declared_index) == expected {
            RecordDecision::Accept
        } else {
            RecordDecision::Reject
        }
    }
}

impl NavData {
    /// Decodes a navigation mesh from raw asset bytes
    pub fn from_bytes(data: impl Into<ByteStream>) -> Result<Self> {
        let mut stream = data.into();
        Self::parse(&mut stream)
    }

    /// Decodes a navigation mesh from the current position of `stream`
    pub fn parse(stream: &mut ByteStream) -> Result<Self> {
        let declared_vertex_count = stream.read_i16()?;
        let mut vertex_max = i32::from(stream.read_i16()?);
        stream.skip(2)?;

        let mut vertices = Vec::with_capacity(vertex_max.max(0) as usize);
        let mut discarded_records = 0usize;
        let mut accepted = 0i32;

        while accepted < vertex_max {
            let position = stream.read_vec3()?;
            let declared_index = stream.read_i16()?;

            match RecordDecision::for_index(declared_index, accepted) {
                RecordDecision::Accept => {
                    vertices.push(position);
                    accepted += 1;
                }
                RecordDecision::Reject => {
                    log::debug!(
                        "Rejected vertex record: declared index {} but expected {}",
                        declared_index,
                        accepted
                    );
                    vertex_max -= 1;
                    discarded_records += 1;
                }
            }
        }

        let edge_count = stream.read_i32()?;
        let edge_count = edge_count.max(0) as usize;
        let mut edges = Vec::with_capacity(edge_count.min(stream.remaining() / EDGE_RECORD_SIZE));

        for _ in 0..edge_count {
            let start = stream.read_i16()?;
            let stop = stream.read_i16()?;
            edges.push(Edge { start, stop });
        }

        log::debug!(
            "Decoded navmesh: {} vertices ({} declared, {} rejected), {} edges",
            vertices.len(),
            declared_vertex_count,
            discarded_records,
            edges.len()
        );

        Ok(Self {
            declared_vertex_count,
            vertices,
            edges,
            discarded_records,
        })
    }

    /// Number of accepted vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of decoded edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Looks up a vertex by a raw edge index
    pub fn vertex(&self, index: i16) -> Option<Vec3> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.vertices.get(i).copied())
    }

    /// Returns the edges whose endpoints do not both resolve to a vertex
    pub fn dangling_edges(&self) -> impl Iterator<Item = (usize, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| self.vertex(edge.start).is_none() || self.vertex(edge.stop).is_none())
    }
}
