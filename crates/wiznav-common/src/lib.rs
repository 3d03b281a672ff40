//! Common utilities and data structures shared by the wiznav crates

mod vector;

pub use vector::*;

/// Represents a 3D position
pub type Vec3 = glam::Vec3;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("truncated data: needed {needed} bytes, {remaining} remaining")]
    TruncatedData { needed: usize, remaining: usize },

    #[error("edge {edge} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        edge: usize,
        index: i32,
        vertex_count: usize,
    },

    #[error("too many {kind} records: {count} exceeds {max}")]
    TooManyRecords {
        kind: &'static str,
        count: usize,
        max: usize,
    },

    #[error("no nearest point: mesh has no usable segments")]
    NoResult,

    #[error("archive error: {0}")]
    Archive(String),

    #[error("client error: {0}")]
    Client(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for wiznav operations
pub type Result<T> = std::result::Result<T, Error>;
