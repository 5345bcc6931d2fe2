//! Storage and traversal for N-dimensional images.
//!
//! The core storage types are:
//!   - `ArrayN`: a contiguous row-major buffer
//!   - `ChunkMap`: a hash map of cubic chunks, allocated lazily or eagerly
//!
//! Both implement the bounds-checked `Storage` contract. An `Img` owns one of them, chosen by a `BackendKind`, and hands out
//! cursors:
//!   - `Cursor` / `CursorMut`: sequential, row-major traversal
//!   - `RandomAccess` / `RandomAccessMut`: traversal plus jumps to arbitrary positions
//!   - `NeighborhoodCursor`: the neighbors of a movable center position
//!
//! Since every cursor visits positions in the same order whatever the backend, algorithms written against cursors don't care
//! how an image is stored. `ImgView` gives read-only intervals and axis swaps of an image without copying it.

pub mod access;
pub mod array;
pub mod backend;
pub mod chunk_map;
pub mod cursor;
pub mod error;
pub mod factory;
pub mod img;
pub mod view;

pub use access::{Element, Storage, Stride};
pub use array::{Array1, Array2, Array3, ArrayN};
pub use backend::{Backend, BackendKind};
pub use chunk_map::{ChunkAllocation, ChunkMap, ChunkMap1, ChunkMap2, ChunkMap3, SmallKeyHashMap};
pub use cursor::{
    Cursor, CursorMut, CursorState, Iterate, Localizable, NeighborhoodCursor, Positionable,
    RandomAccess, RandomAccessMut, Sampler, SamplerMut,
};
pub use error::{ensure_same_shape, validate_shape, ImgError, Result};
pub use factory::ImgFactory;
pub use img::{create_img, for_each_position, value_at, Img, Img1, Img2, Img3};
pub use view::ImgView;

pub use image_blocks_core;

pub mod prelude {
    pub use super::{
        create_img, for_each_position, value_at, Array1, Array2, Array3, ArrayN, BackendKind,
        ChunkAllocation, ChunkMap, ChunkMap1, ChunkMap2, ChunkMap3, Cursor, CursorMut,
        CursorState, Element, Img, Img1, Img2, Img3, ImgError, ImgFactory, ImgView, Iterate,
        Localizable, NeighborhoodCursor, Positionable, RandomAccess, RandomAccessMut, Sampler,
        SamplerMut, Storage, Stride,
    };
}
