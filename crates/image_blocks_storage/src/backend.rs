use crate::{
    validate_shape, ArrayN, ChunkAllocation, ChunkMap, Element, ImgError, Result, Storage,
};

use image_blocks_core::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which backend stores the elements of an image, and how it's configured.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum BackendKind {
    /// One flat row-major buffer.
    Contiguous,
    /// Cubic chunks of side `chunk_size` in a hash map.
    Chunked {
        chunk_size: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        allocation: ChunkAllocation,
    },
}

impl Default for BackendKind {
    fn default() -> Self {
        BackendKind::Contiguous
    }
}

impl BackendKind {
    /// Lazily allocated chunks of side `chunk_size`.
    #[inline]
    pub fn chunked(chunk_size: i32) -> Self {
        BackendKind::Chunked {
            chunk_size,
            allocation: ChunkAllocation::Lazy,
        }
    }

    /// Fails with `InvalidChunkSize` for chunked kinds whose chunk size is less than 1.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        match *self {
            BackendKind::Chunked { chunk_size, .. } if chunk_size < 1 => {
                Err(ImgError::InvalidChunkSize { chunk_size })
            }
            _ => Ok(()),
        }
    }
}

/// The storage behind an `Img`. Every variant satisfies the same `Storage` contract, so code above this layer never needs to
/// know which one it's using.
#[derive(Clone, Debug)]
pub enum Backend<T, const D: usize> {
    Contiguous(ArrayN<T, D>),
    Chunked(ChunkMap<T, D>),
}

impl<T: Element, const D: usize> Backend<T, D> {
    /// Allocates storage of `shape`, with every element equal to `T::default()`.
    pub fn new(shape: PointN<D>, kind: BackendKind) -> Result<Self> {
        match kind {
            BackendKind::Contiguous => {
                validate_shape(shape)?;
                Ok(Backend::Contiguous(ArrayN::fill(shape, T::default())))
            }
            BackendKind::Chunked {
                chunk_size,
                allocation,
            } => Ok(Backend::Chunked(ChunkMap::new(
                shape, chunk_size, allocation,
            )?)),
        }
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: T) {
        match self {
            Backend::Contiguous(array) => array.reset_values(value),
            Backend::Chunked(map) => map.fill(value),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Contiguous(_) => BackendKind::Contiguous,
            Backend::Chunked(map) => BackendKind::Chunked {
                chunk_size: map.chunk_size(),
                allocation: map.allocation(),
            },
        }
    }
}

impl<T: Element, const D: usize> Storage<D> for Backend<T, D> {
    type Data = T;

    #[inline]
    fn shape(&self) -> PointN<D> {
        match self {
            Backend::Contiguous(array) => array.shape(),
            Backend::Chunked(map) => map.shape(),
        }
    }

    #[inline]
    fn get_ref(&self, p: PointN<D>) -> Result<&T> {
        match self {
            Backend::Contiguous(array) => array.get_ref(p),
            Backend::Chunked(map) => map.get_ref(p),
        }
    }

    #[inline]
    fn get_mut(&mut self, p: PointN<D>) -> Result<&mut T> {
        match self {
            Backend::Contiguous(array) => array.get_mut(p),
            Backend::Chunked(map) => map.get_mut(p),
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_backend() {
        let kinds = [
            BackendKind::Contiguous,
            BackendKind::chunked(3),
            BackendKind::Chunked {
                chunk_size: 5,
                allocation: ChunkAllocation::Eager,
            },
        ];
        for kind in kinds {
            let backend = Backend::<f32, 2>::new(PointN([7, 7]), kind).unwrap();
            assert_eq!(backend.kind(), kind);
        }
    }

    #[test]
    fn invalid_chunk_size_is_rejected() {
        assert_eq!(
            BackendKind::chunked(0).validate(),
            Err(ImgError::InvalidChunkSize { chunk_size: 0 })
        );
        assert!(Backend::<u8, 1>::new(PointN([4]), BackendKind::chunked(-2)).is_err());
    }
}
