//! Zone navigation meshes for the wiznav agent
//!
//! This crate decodes a zone's `zone.nav` asset into a vertex/edge graph,
//! turns the graph into 3D line segments and answers nearest-point queries
//! against them.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use wiznav_mesh::{NavData, NavDataWriter, SegmentSet};
//!
//! # fn example() -> wiznav_common::Result<()> {
//! let mut writer = NavDataWriter::new();
//! writer
//!     .push_vertex(Vec3::new(0.0, 0.0, 0.0))
//!     .push_vertex(Vec3::new(10.0, 0.0, 0.0))
//!     .push_edge(0, 1);
//!
//! let nav_data = NavData::from_bytes(writer.to_bytes()?)?;
//! let segments = SegmentSet::build(&nav_data)?;
//!
//! let nearest = segments.nearest_point(Vec3::new(5.0, 3.0, 0.0)).unwrap();
//! assert_eq!(nearest.point, Vec3::new(5.0, 0.0, 0.0));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

mod byte_stream;
mod nav_data;
mod nav_data_writer;
mod segment_set;

#[cfg(test)]
mod nav_data_tests;

pub use byte_stream::{ByteStream, Primitive};
pub use nav_data::{Edge, NavData, EDGE_RECORD_SIZE, HEADER_SIZE, VERTEX_RECORD_SIZE};
pub use nav_data_writer::NavDataWriter;
pub use segment_set::{NearestPoint, Segment, SegmentSet};

/// Name of the navigation mesh asset inside a zone archive
pub const NAV_ASSET_NAME: &str = "zone.nav";
