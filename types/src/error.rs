//! Decoding errors for host-boundary byte inputs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("batch length {len} is not a multiple of item width {width}")]
    MisalignedBatch { len: usize, width: usize },

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
