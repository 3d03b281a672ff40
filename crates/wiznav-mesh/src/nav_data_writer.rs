//! Encoder for the zone navigation mesh layout
//!
//! Produces byte streams accepted by [`NavData::parse`]. Besides re-encoding
//! decoded meshes it can emit raw vertex records with arbitrary declared
//! indices, which is how corrupted assets are reproduced.

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

use glam::Vec3;
use wiznav_common::{Error, Result};

use crate::nav_data::{Edge, NavData, EDGE_RECORD_SIZE, HEADER_SIZE, VERTEX_RECORD_SIZE};

#[derive(Debug, Clone, Default)]
pub struct NavDataWriter {
    declared_vertex_count: Option<i16>,
    vertex_max: Option<i16>,
    records: Vec<(Vec3, i16)>,
    next_index: i16,
    edges: Vec<Edge>,
}

impl NavDataWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer that reproduces `data`'s accepted vertices and edges
    pub fn from_nav_data(data: &NavData) -> Self {
        let mut writer = Self::new().with_declared_vertex_count(data.declared_vertex_count);
        for vertex in &data.vertices {
            writer.push_vertex(*vertex);
        }
        for edge in &data.edges {
            writer.push_edge(edge.start, edge.stop);
        }
        writer
    }

    /// Overrides the informational vertex count in the header
    pub fn with_declared_vertex_count(mut self, count: i16) -> Self {
        self.declared_vertex_count = Some(count);
        self
    }

    /// Overrides the scan bound; defaults to the number of vertex records
    pub fn with_vertex_max(mut self, vertex_max: i16) -> Self {
        self.vertex_max = Some(vertex_max);
        self
    }

    /// Appends a vertex record carrying the next sequential index
    pub fn push_vertex(&mut self, position: Vec3) -> &mut Self {
        self.records.push((position, self.next_index));
        self.next_index = self.next_index.wrapping_add(1);
        self
    }

    /// Appends a vertex record with an explicit declared index
    pub fn push_raw_vertex(&mut self, position: Vec3, declared_index: i16) -> &mut Self {
        self.records.push((position, declared_index));
        self
    }

    pub fn push_edge(&mut self, start: i16, stop: i16) -> &mut Self {
        self.edges.push(Edge { start, stop });
        self
    }

    /// Size of the encoded stream in bytes
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.records.len() * VERTEX_RECORD_SIZE + 4 + self.edges.len() * EDGE_RECORD_SIZE
    }

    /// Writes the encoded stream.
    ///
    /// Fails with [`Error::TooManyRecords`] before writing anything when the
    /// vertex records or edges do not fit the header's count fields.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let record_count = i16::try_from(self.records.len()).map_err(|_| Error::TooManyRecords {
            kind: "vertex",
            count: self.records.len(),
            max: i16::MAX as usize,
        })?;
        let edge_count = i32::try_from(self.edges.len()).map_err(|_| Error::TooManyRecords {
            kind: "edge",
            count: self.edges.len(),
            max: i32::MAX as usize,
        })?;

        writer.write_i16::<LittleEndian>(self.declared_vertex_count.unwrap_or(record_count))?;
        writer.write_i16::<LittleEndian>(self.vertex_max.unwrap_or(record_count))?;
        writer.write_i16::<LittleEndian>(0)?;

        for (position, declared_index) in &self.records {
            writer.write_f32::<LittleEndian>(position.x)?;
            writer.write_f32::<LittleEndian>(position.y)?;
            writer.write_f32::<LittleEndian>(position.z)?;
            writer.write_i16::<LittleEndian>(*declared_index)?;
        }

        writer.write_i32::<LittleEndian>(edge_count)?;
        for edge in &self.edges {
            writer.write_i16::<LittleEndian>(edge.start)?;
            writer.write_i16::<LittleEndian>(edge.stop)?;
        }

        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.write(&mut bytes)?;
        Ok(bytes)
    }
}
