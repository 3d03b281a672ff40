//! Little-endian typed reader over an owned byte buffer
//!
//! Game assets are handed to us as complete byte blobs, so the reader owns
//! its buffer and checks the remaining length before every read. A short
//! buffer surfaces as [`Error::TruncatedData`] instead of a generic I/O error.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use glam::Vec3;
use wiznav_common::{Error, Result};

/// A fixed-width value that can be decoded from a little-endian stream.
pub trait Primitive: Sized {
    /// Encoded size in bytes
    const SIZE: usize;

    /// Decodes one value, advancing `reader` by [`Self::SIZE`] bytes.
    fn read_le<R: Read>(reader: &mut R) -> std::io::Result<Self>;
}

macro_rules! impl_primitive {
    ($ty:ty, $size:expr, $read:ident) => {
        impl Primitive for $ty {
            const SIZE: usize = $size;

            #[inline]
            fn read_le<R: Read>(reader: &mut R) -> std::io::Result<Self> {
                reader.$read::<LittleEndian>()
            }
        }
    };
}

impl_primitive!(i16, 2, read_i16);
impl_primitive!(u16, 2, read_u16);
impl_primitive!(i32, 4, read_i32);
impl_primitive!(u32, 4, read_u32);
impl_primitive!(i64, 8, read_i64);
impl_primitive!(u64, 8, read_u64);
impl_primitive!(f32, 4, read_f32);
impl_primitive!(f64, 8, read_f64);

impl Primitive for i8 {
    const SIZE: usize = 1;

    #[inline]
    fn read_le<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        reader.read_i8()
    }
}

impl Primitive for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn read_le<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        reader.read_u8()
    }
}

impl Primitive for bool {
    const SIZE: usize = 1;

    #[inline]
    fn read_le<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        Ok(reader.read_u8()? != 0)
    }
}

/// Byte buffer with a forward-only read cursor
#[derive(Debug, Clone, Default)]
pub struct ByteStream {
    cursor: Cursor<Vec<u8>>,
}

impl From<Vec<u8>> for ByteStream {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for ByteStream {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl ByteStream {
    /// Creates a reader positioned at the start of `data`
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Current cursor offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Total length of the underlying buffer, read or not
    pub fn buffer_len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.buffer_len().saturating_sub(self.position())
    }

    /// Returns true when no unread bytes are left
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Moves the cursor back to the start of the buffer
    pub fn reset(&mut self) {
        self.cursor.set_position(0);
    }

    /// The unread part of the buffer
    pub fn remaining_slice(&self) -> &[u8] {
        let start = self.position().min(self.buffer_len());
        &self.cursor.get_ref()[start..]
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(Error::TruncatedData { needed, remaining });
        }
        Ok(())
    }

    /// Reads one little-endian value of type `T`
    pub fn read<T: Primitive>(&mut self) -> Result<T> {
        self.ensure(T::SIZE)?;
        Ok(T::read_le(&mut self.cursor)?)
    }

    /// Advances the cursor by `count` bytes without decoding them
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.ensure(count)?;
        let position = self.cursor.position() + count as u64;
        self.cursor.set_position(position);
        Ok(())
    }

    /// Reads three consecutive `f32` values as a vector
    pub fn read_vec3(&mut self) -> Result<Vec3> {
        self.ensure(3 * f32::SIZE)?;
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        Ok(Vec3::new(x, y, z))
    }

    /// Splits the unread bytes at `offset` into two independent readers.
    ///
    /// The head covers `[position, position + offset)` and the tail the rest.
    /// `self` is left untouched.
    pub fn split(&self, offset: usize) -> Result<(ByteStream, ByteStream)> {
        self.ensure(offset)?;
        let (head, tail) = self.remaining_slice().split_at(offset);
        Ok((ByteStream::from(head), ByteStream::from(tail)))
    }

    /// Reads a signed byte
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read()
    }

    /// Reads an unsigned byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read()
    }

    /// Reads one byte as a flag; any non-zero value is `true`
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read()
    }

    /// Reads a little-endian `i16`
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read()
    }

    /// Reads a little-endian `u16`
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read()
    }

    /// Reads a little-endian `i32`
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read()
    }

    /// Reads a little-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read()
    }

    /// Reads a little-endian `i64`
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read()
    }

    /// Reads a little-endian `u64`
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read()
    }

    /// Reads a little-endian IEEE-754 `f32`
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read()
    }

    /// Reads a little-endian IEEE-754 `f64`
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read()
    }
}
