//! The chunked backend: the image is tiled by cubes of side `chunk_size`, each stored as its own `ArrayN`.
//!
//! # Keys and Local Coordinates
//!
//! The chunk holding position `p` has key `floor(p / chunk_size)` on every axis, and `p` sits at the local point
//! `p mod chunk_size` inside that chunk. Chunks at the far edges of the image are allocated at full size; the positions they
//! hold beyond the image shape are never reachable because every access is bounds checked against the image first.
//!
//! # Allocation
//!
//! With `ChunkAllocation::Lazy`, a chunk is allocated (filled with the ambient value `T::default()`) the first time one of its
//! positions is written. Reading a position in a vacant chunk borrows the ambient value instead, so reads never allocate.
//! `ChunkAllocation::Eager` allocates every chunk up front.
//!
//! ```
//! use image_blocks_core::prelude::*;
//! use image_blocks_storage::prelude::*;
//!
//! let mut map = ChunkMap2::<u8>::new(PointN([100, 100]), 16, ChunkAllocation::Lazy).unwrap();
//! assert_eq!(map.num_chunks(), 0);
//!
//! // Reads of vacant chunks see the ambient value.
//! assert_eq!(map.get(PointN([50, 50])), Ok(0));
//! assert_eq!(map.num_chunks(), 0);
//!
//! map.set(PointN([50, 50]), 7).unwrap();
//! assert_eq!(map.num_chunks(), 1);
//! assert_eq!(map.chunk_key_containing_point(PointN([50, 50])), PointN([3, 3]));
//! assert_eq!(map.get(PointN([50, 50])), Ok(7));
//! ```

use crate::{validate_shape, ArrayN, ImgError, Result, Storage};

use image_blocks_core::{bounding_extent, prelude::*};

use ahash::AHashMap;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `HashMap` with a fast hasher suited to small keys like chunk keys.
pub type SmallKeyHashMap<K, V> = AHashMap<K, V>;

/// A 1-dimensional chunk map.
pub type ChunkMap1<T> = ChunkMap<T, 1>;
/// A 2-dimensional chunk map.
pub type ChunkMap2<T> = ChunkMap<T, 2>;
/// A 3-dimensional chunk map.
pub type ChunkMap3<T> = ChunkMap<T, 3>;

/// When the chunks of a `ChunkMap` get allocated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(rename_all = "snake_case"))]
pub enum ChunkAllocation {
    /// On the first write into the chunk.
    Lazy,
    /// All at construction.
    Eager,
}

impl Default for ChunkAllocation {
    fn default() -> Self {
        ChunkAllocation::Lazy
    }
}

/// A `D`-dimensional image stored as a hash map from chunk key to a cubic `ArrayN` chunk.
#[derive(Clone, Debug)]
pub struct ChunkMap<T, const D: usize> {
    extent: ExtentN<D>,
    chunk_shape: PointN<D>,
    allocation: ChunkAllocation,
    ambient_value: T,
    chunks: SmallKeyHashMap<PointN<D>, ArrayN<T, D>>,
}

impl<T: Clone + Default, const D: usize> ChunkMap<T, D> {
    /// Creates a map for an image of `shape`, tiled by chunks of side `chunk_size`.
    pub fn new(shape: PointN<D>, chunk_size: i32, allocation: ChunkAllocation) -> Result<Self> {
        validate_shape(shape)?;
        if chunk_size < 1 {
            return Err(ImgError::InvalidChunkSize { chunk_size });
        }

        let mut map = Self {
            extent: ExtentN::from_shape(shape),
            chunk_shape: PointN::fill(chunk_size),
            allocation,
            ambient_value: T::default(),
            chunks: SmallKeyHashMap::default(),
        };

        if allocation == ChunkAllocation::Eager {
            for key in map.chunk_key_extent().iter_points() {
                map.get_mut_chunk_or_insert_ambient(key);
            }
            debug!(
                num_chunks = map.chunks.len(),
                chunk_size, "eagerly allocated chunks"
            );
        }

        Ok(map)
    }

    /// Returns the chunk at `key`, inserting one filled with the ambient value if it's vacant.
    #[inline]
    pub fn get_mut_chunk_or_insert_ambient(&mut self, key: PointN<D>) -> &mut ArrayN<T, D> {
        let Self {
            chunks,
            chunk_shape,
            ambient_value,
            ..
        } = self;

        chunks.entry(key).or_insert_with(|| {
            trace!(?key, "allocating chunk");
            ArrayN::fill(*chunk_shape, ambient_value.clone())
        })
    }

    /// Sets every position to `value`, allocating all chunks.
    pub fn fill(&mut self, value: T) {
        for key in self.chunk_key_extent().iter_points() {
            self.get_mut_chunk_or_insert_ambient(key)
                .reset_values(value.clone());
        }
    }
}

impl<T, const D: usize> ChunkMap<T, D> {
    /// The side length of every chunk.
    #[inline]
    pub fn chunk_size(&self) -> i32 {
        self.chunk_shape.at(0)
    }

    #[inline]
    pub fn chunk_shape(&self) -> PointN<D> {
        self.chunk_shape
    }

    #[inline]
    pub fn allocation(&self) -> ChunkAllocation {
        self.allocation
    }

    /// The value read at every position of a vacant chunk.
    #[inline]
    pub fn ambient_value(&self) -> &T {
        &self.ambient_value
    }

    /// The key of the chunk containing `p`.
    #[inline]
    pub fn chunk_key_containing_point(&self, p: PointN<D>) -> PointN<D> {
        p.vector_div_floor(&self.chunk_shape)
    }

    /// The coordinates of `p` relative to the minimum of its chunk.
    #[inline]
    pub fn local_point(&self, p: PointN<D>) -> PointN<D> {
        p.vector_mod_floor(&self.chunk_shape)
    }

    /// The extent, in image coordinates, covered by the chunk at `key`. It may extend past the image bounds.
    #[inline]
    pub fn extent_for_chunk_at_key(&self, key: PointN<D>) -> ExtentN<D> {
        ExtentN::from_min_and_shape(key * self.chunk_size(), self.chunk_shape)
    }

    /// The extent of all chunk keys that overlap `extent`.
    #[inline]
    pub fn chunk_key_extent_for(&self, extent: &ExtentN<D>) -> ExtentN<D> {
        ExtentN::from_min_and_max(
            self.chunk_key_containing_point(extent.minimum),
            self.chunk_key_containing_point(extent.max()),
        )
    }

    /// The extent of all chunk keys that tile the image.
    #[inline]
    pub fn chunk_key_extent(&self) -> ExtentN<D> {
        self.chunk_key_extent_for(&self.extent)
    }

    /// The number of chunks needed to tile the whole image, i.e. the ceiling of `shape / chunk_size` on every axis.
    #[inline]
    pub fn num_chunk_slots(&self) -> usize {
        self.chunk_key_extent().num_points()
    }

    /// The number of allocated chunks.
    #[inline]
    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// The keys of all allocated chunks, in no particular order.
    #[inline]
    pub fn chunk_keys(&self) -> impl Iterator<Item = &PointN<D>> {
        self.chunks.keys()
    }

    #[inline]
    pub fn get_chunk(&self, key: PointN<D>) -> Option<&ArrayN<T, D>> {
        self.chunks.get(&key)
    }

    #[inline]
    pub fn get_mut_chunk(&mut self, key: PointN<D>) -> Option<&mut ArrayN<T, D>> {
        self.chunks.get_mut(&key)
    }

    /// Call `visitor` on all allocated chunks that overlap `extent`.
    #[inline]
    pub fn visit_occupied_chunks(
        &self,
        extent: &ExtentN<D>,
        mut visitor: impl FnMut(PointN<D>, &ArrayN<T, D>),
    ) {
        for key in self.chunk_key_extent_for(extent).iter_points() {
            if let Some(chunk) = self.chunks.get(&key) {
                visitor(key, chunk);
            }
        }
    }

    /// The smallest extent, clipped to the image, that contains every allocated chunk. `None` if no chunk is allocated.
    pub fn bounding_extent(&self) -> Option<ExtentN<D>> {
        let key_extent = bounding_extent(self.chunks.keys().cloned())?;
        let min = key_extent.minimum * self.chunk_size();
        let lub = key_extent.least_upper_bound() * self.chunk_size();

        Some(ExtentN::from_min_and_lub(min, lub).intersection(&self.extent))
    }

    /// Deallocates every chunk. All positions read as the ambient value afterwards.
    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}

impl<T: Clone + Default, const D: usize> Storage<D> for ChunkMap<T, D> {
    type Data = T;

    #[inline]
    fn shape(&self) -> PointN<D> {
        self.extent.shape
    }

    #[inline]
    fn extent(&self) -> ExtentN<D> {
        self.extent
    }

    #[inline]
    fn get_ref(&self, p: PointN<D>) -> Result<&T> {
        self.check_bounds(p)?;

        match self.chunks.get(&self.chunk_key_containing_point(p)) {
            Some(chunk) => chunk.get_ref(self.local_point(p)),
            None => Ok(&self.ambient_value),
        }
    }

    #[inline]
    fn get_mut(&mut self, p: PointN<D>) -> Result<&mut T> {
        self.check_bounds(p)?;

        let key = self.chunk_key_containing_point(p);
        let local = self.local_point(p);

        self.get_mut_chunk_or_insert_ambient(key).get_mut(local)
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

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn rejects_invalid_chunk_size() {
        assert_eq!(
            ChunkMap2::<u8>::new(PointN([4, 4]), 0, ChunkAllocation::Lazy).err(),
            Some(ImgError::InvalidChunkSize { chunk_size: 0 })
        );
        assert_eq!(
            ChunkMap2::<u8>::new(PointN([4, -1]), 2, ChunkAllocation::Lazy).err(),
            Some(ImgError::InvalidShape { shape: vec![4, -1] })
        );
    }

    #[test]
    fn slots_are_ceiling_of_shape_over_chunk_size() {
        let map = ChunkMap3::<u8>::new(PointN([20, 7, 1]), 3, ChunkAllocation::Lazy).unwrap();

        assert_eq!(map.chunk_key_extent().shape, PointN([7, 3, 1]));
        assert_eq!(map.num_chunk_slots(), 21);
    }

    #[test]
    fn eager_allocates_every_chunk() {
        let map = ChunkMap2::<u8>::new(PointN([10, 10]), 4, ChunkAllocation::Eager).unwrap();

        assert_eq!(map.num_chunks(), 9);
        assert_eq!(map.num_chunks(), map.num_chunk_slots());
        assert!(map.extent().iter_points().all(|p| map.get(p) == Ok(0)));
    }

    #[test]
    fn lazy_reads_do_not_allocate() {
        let map = ChunkMap2::<u8>::new(PointN([10, 10]), 4, ChunkAllocation::Lazy).unwrap();

        assert!(map.extent().iter_points().all(|p| map.get(p) == Ok(0)));
        assert_eq!(map.num_chunks(), 0);
        assert_eq!(map.bounding_extent(), None);
    }

    #[test]
    fn lazy_write_allocates_only_the_touched_chunk() {
        let mut map = ChunkMap2::new(PointN([10, 10]), 4, ChunkAllocation::Lazy).unwrap();

        map.set(PointN([9, 5]), 3u8).unwrap();
        map.set(PointN([8, 6]), 4u8).unwrap();

        assert_eq!(map.num_chunks(), 1);
        assert_eq!(map.chunk_keys().collect::<Vec<_>>(), vec![&PointN([2, 1])]);
        assert_eq!(map.get(PointN([9, 5])), Ok(3));
        assert_eq!(map.get(PointN([8, 6])), Ok(4));
        assert_eq!(map.get(PointN([8, 5])), Ok(0));

        // The edge chunk covers [8, 12) x [4, 8), but the image stops at 10.
        assert_eq!(
            map.bounding_extent(),
            Some(ExtentN::from_min_and_lub(PointN([8, 4]), PointN([10, 8])))
        );
    }

    #[test]
    fn positions_in_partial_edge_chunks_are_out_of_range() {
        let mut map = ChunkMap2::new(PointN([10, 10]), 4, ChunkAllocation::Eager).unwrap();

        // In bounds of the last chunk, but not of the image.
        let p = PointN([10, 11]);
        assert_eq!(
            map.get_ref(p),
            Err(ImgError::IndexOutOfRange {
                position: vec![10, 11],
                shape: vec![10, 10]
            })
        );
        assert!(map.set(p, 1u8).is_err());
    }

    #[test]
    fn fill_then_clear() {
        let mut map = ChunkMap1::new(PointN([5]), 2, ChunkAllocation::Lazy).unwrap();

        map.fill(9u32);
        assert_eq!(map.num_chunks(), 3);
        assert!(map.extent().iter_points().all(|p| map.get(p) == Ok(9)));

        map.clear();
        assert_eq!(map.num_chunks(), 0);
        assert_eq!(map.get(PointN([4])), Ok(0));
    }

    #[test]
    fn visit_occupied_chunks_skips_vacant_keys() {
        let mut map = ChunkMap2::new(PointN([8, 8]), 2, ChunkAllocation::Lazy).unwrap();
        map.set(PointN([0, 0]), 1i32).unwrap();
        map.set(PointN([7, 7]), 1i32).unwrap();

        let mut visited = Vec::new();
        map.visit_occupied_chunks(&map.extent(), |key, _chunk| visited.push(key));

        assert_eq!(visited, vec![PointN([0, 0]), PointN([3, 3])]);
    }

    #[test]
    fn random_writes_match_contiguous_array() {
        let mut rng = StdRng::seed_from_u64(0xB10C);
        let shape = PointN([13, 6, 9]);

        for chunk_size in [1, 2, 5, 16] {
            let mut map = ChunkMap3::new(shape, chunk_size, ChunkAllocation::Lazy).unwrap();
            let mut array = ArrayN::fill(shape, 0u16);

            for _ in 0..200 {
                let p = PointN([
                    rng.gen_range(0..13),
                    rng.gen_range(0..6),
                    rng.gen_range(0..9),
                ]);
                let value = rng.gen();
                map.set(p, value).unwrap();
                array.set(p, value).unwrap();
            }

            for p in array.extent().iter_points() {
                assert_eq!(map.get(p), array.get(p));
            }
            assert!(map.num_chunks() <= map.num_chunk_slots());
        }
    }
}
