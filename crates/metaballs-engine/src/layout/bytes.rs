//! Byte views over layout types.
//!
//! The producer side writes with [`as_bytes`]; the `read_*` helpers reinterpret
//! a byte region the way the shader stage does, without assuming the region is
//! aligned for the target type.

use bytemuck::Pod;

use super::Ball;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("byte length {len} is not a multiple of the {stride}-byte element stride")]
    Truncated { len: usize, stride: usize },

    #[error("expected exactly {expected} bytes, got {len}")]
    SizeMismatch { len: usize, expected: usize },
}

/// Raw bytes of a slice of layout values, in upload order.
#[inline]
pub fn as_bytes<T: Pod>(values: &[T]) -> &[u8] {
    bytemuck::cast_slice(values)
}

/// Reinterprets `bytes` as a packed array of `T`.
pub fn read_slice<T: Pod>(bytes: &[u8]) -> Result<Vec<T>, LayoutError> {
    let stride = std::mem::size_of::<T>();
    if bytes.len() % stride != 0 {
        return Err(LayoutError::Truncated { len: bytes.len(), stride });
    }
    Ok(bytes.chunks_exact(stride).map(bytemuck::pod_read_unaligned).collect())
}

/// Reinterprets `bytes` as exactly one `T`.
pub fn read_value<T: Pod>(bytes: &[u8]) -> Result<T, LayoutError> {
    bytemuck::try_pod_read_unaligned(bytes).map_err(|_| LayoutError::SizeMismatch {
        len: bytes.len(),
        expected: std::mem::size_of::<T>(),
    })
}

#[inline]
pub fn read_balls(bytes: &[u8]) -> Result<Vec<Ball>, LayoutError> {
    read_slice(bytes)
}
