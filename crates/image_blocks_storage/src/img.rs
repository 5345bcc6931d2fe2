//! `Img`: the shaped, typed image that algorithms operate on.
//!
//! An `Img` exclusively owns one `Backend`. All element access goes through the bounds-checked `Storage` contract, and all
//! traversal goes through the cursors, which visit positions in row-major order no matter which backend stores the data.
//!
//! ```
//! use image_blocks_core::prelude::*;
//! use image_blocks_storage::prelude::*;
//!
//! let mut flat = Img::<u16, 2>::new(PointN([3, 4]), BackendKind::Contiguous).unwrap();
//! let mut tiled = Img::<u16, 2>::new(PointN([3, 4]), BackendKind::chunked(2)).unwrap();
//!
//! flat.set_value_at(PointN([1, 2]), 5).unwrap();
//! tiled.set_value_at(PointN([1, 2]), 5).unwrap();
//!
//! let flat_points: Vec<_> = flat.cursor().map(|(p, v)| (p, *v)).collect();
//! let tiled_points: Vec<_> = tiled.cursor().map(|(p, v)| (p, *v)).collect();
//! assert_eq!(flat_points, tiled_points);
//! assert_eq!(flat_points.len(), 12);
//! ```

use crate::{
    ArrayN, Backend, BackendKind, ChunkMap, Cursor, CursorMut, Element, ImgView, NeighborhoodCursor,
    RandomAccess, RandomAccessMut, Result, Storage,
};

use image_blocks_core::prelude::*;

/// A 1-dimensional image.
pub type Img1<T> = Img<T, 1>;
/// A 2-dimensional image.
pub type Img2<T> = Img<T, 2>;
/// A 3-dimensional image.
pub type Img3<T> = Img<T, 3>;

/// A `D`-dimensional image of `T` with a fixed shape.
#[derive(Clone, Debug)]
pub struct Img<T, const D: usize> {
    backend: Backend<T, D>,
}

impl<T: Element, const D: usize> Img<T, D> {
    /// Creates an image of `shape` with every element equal to `T::default()`.
    #[inline]
    pub fn new(shape: PointN<D>, kind: BackendKind) -> Result<Self> {
        Ok(Self {
            backend: Backend::new(shape, kind)?,
        })
    }

    /// Creates an image of `shape` with every element equal to `value`.
    #[inline]
    pub fn fill(shape: PointN<D>, kind: BackendKind, value: T) -> Result<Self> {
        let mut img = Self::new(shape, kind)?;
        img.backend.fill(value);

        Ok(img)
    }

    /// Wraps a flat row-major buffer as a contiguous image, without copying it.
    #[inline]
    pub fn from_values(shape: PointN<D>, values: Vec<T>) -> Result<Self> {
        Ok(Self::from(ArrayN::new(shape, values)?))
    }

    /// A new image of the same shape and backend kind, holding `U::default()` everywhere.
    #[inline]
    pub fn new_like<U: Element>(&self) -> Result<Img<U, D>> {
        Img::new(self.shape(), self.backend_kind())
    }

    #[inline]
    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Mutably borrows the element at `p`.
    #[inline]
    pub fn value_at_mut(&mut self, p: PointN<D>) -> Result<&mut T> {
        self.backend.get_mut(p)
    }

    #[inline]
    pub fn set_value_at(&mut self, p: PointN<D>, value: T) -> Result<()> {
        self.backend.set(p, value)
    }

    /// Borrows the element at `p`.
    #[inline]
    pub fn value_at(&self, p: PointN<D>) -> Result<&T> {
        self.backend.get_ref(p)
    }

    /// Calls `visitor` on every position and its element, in row-major order.
    pub fn for_each_position(&self, mut visitor: impl FnMut(PointN<D>, &T)) {
        for (p, value) in self.cursor() {
            visitor(p, value);
        }
    }

    /// A sequential read cursor over every position.
    #[inline]
    pub fn cursor(&self) -> Cursor<'_, T, D> {
        Cursor::new(self)
    }

    /// A sequential write cursor over every position.
    #[inline]
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T, D> {
        CursorMut::new(self)
    }

    #[inline]
    pub fn random_access(&self) -> RandomAccess<'_, T, D> {
        RandomAccess::new(self)
    }

    #[inline]
    pub fn random_access_mut(&mut self) -> RandomAccessMut<'_, T, D> {
        RandomAccessMut::new(self)
    }

    /// A cursor over the neighbors of a movable center; see `NeighborhoodCursor`.
    #[inline]
    pub fn neighborhood_cursor(
        &self,
        radius: i32,
        shape: NeighborhoodShape,
    ) -> NeighborhoodCursor<'_, T, D> {
        NeighborhoodCursor::new(self.random_access(), radius, shape)
    }

    /// A read-only view of the whole image.
    #[inline]
    pub fn view(&self) -> ImgView<'_, T, D> {
        ImgView::new(self)
    }
}

impl<T, const D: usize> Img<T, D> {
    #[inline]
    pub fn backend(&self) -> &Backend<T, D> {
        &self.backend
    }

    #[inline]
    pub fn into_backend(self) -> Backend<T, D> {
        self.backend
    }

    /// The flat buffer, if the image is stored contiguously.
    #[inline]
    pub fn as_slice(&self) -> Option<&[T]> {
        match &self.backend {
            Backend::Contiguous(array) => Some(array.values_slice()),
            Backend::Chunked(_) => None,
        }
    }
}

impl<T: Element, const D: usize> Storage<D> for Img<T, D> {
    type Data = T;

    #[inline]
    fn shape(&self) -> PointN<D> {
        self.backend.shape()
    }

    #[inline]
    fn get_ref(&self, p: PointN<D>) -> Result<&T> {
        self.backend.get_ref(p)
    }

    #[inline]
    fn get_mut(&mut self, p: PointN<D>) -> Result<&mut T> {
        self.backend.get_mut(p)
    }
}

impl<T, const D: usize> From<ArrayN<T, D>> for Img<T, D> {
    #[inline]
    fn from(array: ArrayN<T, D>) -> Self {
        Self {
            backend: Backend::Contiguous(array),
        }
    }
}

impl<T, const D: usize> From<ChunkMap<T, D>> for Img<T, D> {
    #[inline]
    fn from(map: ChunkMap<T, D>) -> Self {
        Self {
            backend: Backend::Chunked(map),
        }
    }
}

/// Creates an image of `shape` stored by the `kind` backend, with every element equal to `T::default()`.
#[inline]
pub fn create_img<T: Element, const D: usize>(
    shape: PointN<D>,
    kind: BackendKind,
) -> Result<Img<T, D>> {
    Img::new(shape, kind)
}

/// Calls `visitor` on every position of `img` and its element, in row-major order.
#[inline]
pub fn for_each_position<T: Element, const D: usize>(
    img: &Img<T, D>,
    visitor: impl FnMut(PointN<D>, &T),
) {
    img.for_each_position(visitor)
}

/// Reads the element of `img` at `p` with a random access cursor.
#[inline]
pub fn value_at<T: Element, const D: usize>(img: &Img<T, D>, p: PointN<D>) -> Result<T> {
    use crate::{Positionable, Sampler};

    let mut access = img.random_access();
    access.seek(p)?;

    access.value().map(Clone::clone)
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
    use crate::{ChunkAllocation, ImgError};

    use pretty_assertions::assert_eq;

    fn all_kinds() -> Vec<BackendKind> {
        vec![
            BackendKind::Contiguous,
            BackendKind::chunked(1),
            BackendKind::chunked(3),
            BackendKind::Chunked {
                chunk_size: 4,
                allocation: ChunkAllocation::Eager,
            },
        ]
    }

    #[test]
    fn enumeration_order_and_count_agree_across_backends() {
        let shape = PointN([3, 5, 2]);
        let expected: Vec<_> = ExtentN::from_shape(shape).iter_points().collect();

        for kind in all_kinds() {
            let img = create_img::<u8, 3>(shape, kind).unwrap();
            let mut visited = Vec::new();
            for_each_position(&img, |p, v| {
                assert_eq!(*v, 0);
                visited.push(p);
            });
            assert_eq!(visited, expected, "{:?}", kind);
            assert_eq!(img.num_points(), 30);
        }
    }

    #[test]
    fn invalid_shapes_are_rejected_by_every_backend() {
        for kind in all_kinds() {
            assert_eq!(
                Img::<u8, 2>::new(PointN([0, 3]), kind).err(),
                Some(ImgError::InvalidShape { shape: vec![0, 3] })
            );
        }
    }

    #[test]
    fn from_values_wraps_without_copying() {
        let values = vec![1u32, 2, 3, 4, 5, 6];
        let ptr = values.as_ptr();
        let img = Img::from_values(PointN([2, 3]), values).unwrap();

        assert_eq!(img.backend_kind(), BackendKind::Contiguous);
        assert_eq!(img.as_slice().map(|s| s.as_ptr()), Some(ptr));
        assert_eq!(value_at(&img, PointN([1, 0])), Ok(4));
    }

    #[test]
    fn fill_and_new_like() {
        let img = Img::fill(PointN([4, 4]), BackendKind::chunked(3), 2.5f64).unwrap();
        assert!(img.cursor().all(|(_, v)| *v == 2.5));

        let like = img.new_like::<bool>().unwrap();
        assert_eq!(like.shape(), img.shape());
        assert_eq!(like.backend_kind(), img.backend_kind());
        assert!(like.cursor().all(|(_, v)| !*v));
    }

    #[test]
    fn value_at_rejects_out_of_range() {
        let img = create_img::<i16, 2>(PointN([2, 2]), BackendKind::Contiguous).unwrap();

        assert_eq!(
            value_at(&img, PointN([0, 2])),
            Err(ImgError::IndexOutOfRange {
                position: vec![0, 2],
                shape: vec![2, 2]
            })
        );
    }

    #[test]
    fn writes_are_visible_through_every_accessor() {
        for kind in all_kinds() {
            let mut img = create_img::<i32, 2>(PointN([5, 5]), kind).unwrap();
            img.set_value_at(PointN([4, 1]), -3).unwrap();
            *img.value_at_mut(PointN([0, 0])).unwrap() = 8;

            assert_eq!(value_at(&img, PointN([4, 1])), Ok(-3));
            assert_eq!(img.get(PointN([0, 0])), Ok(8));
            assert_eq!(img.value_at(PointN([2, 2])), Ok(&0));
        }
    }
}
