use image_blocks_core::{ExtentN, PointN};

use thiserror::Error;

/// Errors returned by image construction, element access and cursors.
///
/// Positions and shapes are reported as plain component lists so that the error type doesn't depend on the image
/// dimension.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ImgError {
    /// A position lies outside of the `[0, shape)` bounds of the image or view being accessed.
    #[error("position {position:?} is out of range for shape {shape:?}")]
    IndexOutOfRange { position: Vec<i32>, shape: Vec<i32> },
    /// Two images that must share a shape do not.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: Vec<i32>, actual: Vec<i32> },
    /// A cursor method was called in a state that forbids it.
    #[error("cannot {operation} while the cursor is {state}")]
    IllegalState {
        operation: &'static str,
        state: &'static str,
    },
    /// Some extent of a requested shape is less than 1.
    #[error("every extent of a shape must be at least 1, got {shape:?}")]
    InvalidShape { shape: Vec<i32> },
    /// The side length of a chunk is less than 1.
    #[error("chunk size must be at least 1, got {chunk_size}")]
    InvalidChunkSize { chunk_size: i32 },
    /// An axis index is not less than the image dimension.
    #[error("axis {axis} does not exist in {rank} dimensions")]
    InvalidAxis { axis: usize, rank: usize },
    /// A flat buffer handed over for wrapping does not hold exactly one element per position.
    #[error("buffer holds {actual} elements but the shape needs {expected}")]
    BufferLengthMismatch { expected: usize, actual: usize },
}

pub type Result<T, E = ImgError> = std::result::Result<T, E>;

impl ImgError {
    #[inline]
    pub fn out_of_range<const D: usize>(position: PointN<D>, extent: &ExtentN<D>) -> Self {
        ImgError::IndexOutOfRange {
            position: position.to_vec(),
            shape: extent.shape.to_vec(),
        }
    }

    #[inline]
    pub fn illegal_state(operation: &'static str, state: &'static str) -> Self {
        ImgError::IllegalState { operation, state }
    }
}

/// Fails with `InvalidShape` unless every extent of `shape` is at least 1.
#[inline]
pub fn validate_shape<const D: usize>(shape: PointN<D>) -> Result<()> {
    if shape >= PointN::ONES {
        Ok(())
    } else {
        Err(ImgError::InvalidShape {
            shape: shape.to_vec(),
        })
    }
}

/// Fails with `ShapeMismatch` unless `actual` equals `expected` on every axis.
#[inline]
pub fn ensure_same_shape<const D: usize>(expected: PointN<D>, actual: PointN<D>) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ImgError::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        })
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
