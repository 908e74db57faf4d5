//! Fixed-width batch decoding.
//!
//! Every binary input crossing the host boundary (addresses, roots,
//! signatures, proof nodes) is a run of fixed-width items concatenated into a
//! single byte string. A batch whose length is not a multiple of the item
//! width is rejected as a whole; nothing is decoded from it.

use crate::error::DecodeError;
use crate::{Address, Hash256, RecoverableSignature};

/// An item with a fixed encoded width.
pub trait FixedWidth: Sized {
    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Decode one item from a chunk of exactly `WIDTH` bytes.
    fn from_chunk(chunk: &[u8]) -> Option<Self>;

    /// Append the encoded item to `out`.
    fn write_to(&self, out: &mut Vec<u8>);
}

impl FixedWidth for Address {
    const WIDTH: usize = Address::LEN;

    fn from_chunk(chunk: &[u8]) -> Option<Self> {
        Address::from_slice(chunk)
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

impl FixedWidth for Hash256 {
    const WIDTH: usize = Hash256::LEN;

    fn from_chunk(chunk: &[u8]) -> Option<Self> {
        Hash256::from_slice(chunk)
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

impl FixedWidth for RecoverableSignature {
    const WIDTH: usize = RecoverableSignature::LEN;

    fn from_chunk(chunk: &[u8]) -> Option<Self> {
        RecoverableSignature::from_slice(chunk)
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }
}

/// Decode a concatenated batch of fixed-width items.
pub fn decode_batch<T: FixedWidth>(bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
    if bytes.len() % T::WIDTH != 0 {
        return Err(DecodeError::MisalignedBatch {
            len: bytes.len(),
            width: T::WIDTH,
        });
    }
    bytes
        .chunks_exact(T::WIDTH)
        .map(|chunk| {
            T::from_chunk(chunk).ok_or(DecodeError::InvalidLength {
                expected: T::WIDTH,
                actual: chunk.len(),
            })
        })
        .collect()
}

/// Decode exactly one fixed-width item.
pub fn decode_one<T: FixedWidth>(bytes: &[u8]) -> Result<T, DecodeError> {
    T::from_chunk(bytes).ok_or(DecodeError::InvalidLength {
        expected: T::WIDTH,
        actual: bytes.len(),
    })
}

/// Concatenate items into their batch encoding.
pub fn encode_batch<T: FixedWidth>(items: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(items.len() * T::WIDTH);
    for item in items {
        item.write_to(&mut out);
    }
    out
}
