use crate::{BackendKind, ChunkAllocation, Element, Img, Result};

use image_blocks_core::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Creates images that all share one storage configuration.
///
/// ```
/// use image_blocks_core::prelude::*;
/// use image_blocks_storage::prelude::*;
///
/// let factory = ImgFactory::chunked(20).with_allocation(ChunkAllocation::Eager);
/// let img = factory.build::<f32, 3>(PointN([64, 64, 8])).unwrap();
///
/// assert_eq!(img.backend_kind(), BackendKind::Chunked { chunk_size: 20, allocation: ChunkAllocation::Eager });
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ImgFactory {
    pub backend: BackendKind,
}

impl ImgFactory {
    /// The chunk side used by `chunked_default`.
    pub const DEFAULT_CHUNK_SIZE: i32 = 64;

    #[inline]
    pub fn contiguous() -> Self {
        Self {
            backend: BackendKind::Contiguous,
        }
    }

    /// Lazily allocated chunks of side `chunk_size`.
    #[inline]
    pub fn chunked(chunk_size: i32) -> Self {
        Self {
            backend: BackendKind::chunked(chunk_size),
        }
    }

    #[inline]
    pub fn chunked_default() -> Self {
        Self::chunked(Self::DEFAULT_CHUNK_SIZE)
    }

    /// Builds images with the same configuration as `img`.
    #[inline]
    pub fn like<T, const D: usize>(img: &Img<T, D>) -> Self
    where
        T: Element,
    {
        Self {
            backend: img.backend_kind(),
        }
    }

    /// Sets the chunk allocation policy. Has no effect on a contiguous factory.
    #[inline]
    pub fn with_allocation(mut self, new_allocation: ChunkAllocation) -> Self {
        if let BackendKind::Chunked { allocation, .. } = &mut self.backend {
            *allocation = new_allocation;
        }

        self
    }

    /// Checks the configuration without building anything, e.g. right after deserializing it.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        self.backend.validate()
    }

    /// An image of `shape` holding `T::default()` everywhere.
    #[inline]
    pub fn build<T: Element, const D: usize>(&self, shape: PointN<D>) -> Result<Img<T, D>> {
        Img::new(shape, self.backend)
    }

    /// An image of `shape` holding `value` everywhere.
    #[inline]
    pub fn build_filled<T: Element, const D: usize>(
        &self,
        shape: PointN<D>,
        value: T,
    ) -> Result<Img<T, D>> {
        Img::fill(shape, self.backend, value)
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
    use crate::{ImgError, Storage};

    #[test]
    fn with_allocation_only_applies_to_chunked() {
        assert_eq!(
            ImgFactory::contiguous().with_allocation(ChunkAllocation::Eager),
            ImgFactory::contiguous()
        );
        assert_eq!(
            ImgFactory::chunked_default()
                .with_allocation(ChunkAllocation::Eager)
                .backend,
            BackendKind::Chunked {
                chunk_size: 64,
                allocation: ChunkAllocation::Eager
            }
        );
    }

    #[test]
    fn build_validates_configuration() {
        let factory = ImgFactory::chunked(0);

        assert_eq!(
            factory.validate(),
            Err(ImgError::InvalidChunkSize { chunk_size: 0 })
        );
        assert!(factory.build::<u8, 2>(PointN([4, 4])).is_err());
    }

    #[test]
    fn factory_like_reproduces_configuration() {
        let factory = ImgFactory::chunked(20);
        let img = factory.build_filled(PointN([30, 30]), 1u8).unwrap();

        assert_eq!(ImgFactory::like(&img), factory);
        assert_eq!(img.get(PointN([29, 29])), Ok(1));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn configuration_serializes_with_a_kind_tag() {
        let factory = ImgFactory::chunked(20).with_allocation(ChunkAllocation::Eager);
        let json = serde_json::to_string(&factory).unwrap();
        assert_eq!(
            json,
            r#"{"backend":{"kind":"chunked","chunk_size":20,"allocation":"eager"}}"#
        );
        assert_eq!(serde_json::from_str::<ImgFactory>(&json).unwrap(), factory);

        assert_eq!(
            serde_json::to_string(&BackendKind::Contiguous).unwrap(),
            r#"{"kind":"contiguous"}"#
        );

        // The allocation policy is optional and defaults to lazy.
        let kind: BackendKind =
            serde_json::from_str(r#"{"kind":"chunked","chunk_size":8}"#).unwrap();
        assert_eq!(kind, BackendKind::chunked(8));

        assert!(serde_json::from_str::<BackendKind>(r#"{"kind":"tiled"}"#).is_err());
    }
}
