//! The element access contract shared by every image backend.
//!
//! All backends answer the same questions: what is the shape, and what is the element at some position. Positions are checked
//! against the `[0, shape)` bounds before any storage is touched, so an out-of-range position is always an
//! `ImgError::IndexOutOfRange` and never a panic.
//!
//! ```
//! use image_blocks_core::prelude::*;
//! use image_blocks_storage::prelude::*;
//!
//! fn sum_row<S: Storage<2, Data = u32>>(storage: &S, row: i32) -> Result<u32, ImgError> {
//!     let mut sum = 0;
//!     for col in 0..storage.shape().at(1) {
//!         sum += storage.get(PointN([row, col]))?;
//!     }
//!     Ok(sum)
//! }
//!
//! let mut array = Array2::fill(PointN([2, 3]), 1);
//! array.set(PointN([1, 2]), 5).unwrap();
//! assert_eq!(sum_row(&array, 1).unwrap(), 7);
//! assert!(array.get(PointN([2, 0])).is_err());
//! ```

use crate::{ImgError, Result};

use image_blocks_core::{ExtentN, PointN};

/// The requirements on the element type of an image. New storage is filled with `T::default()`, and copying between images
/// clones elements.
pub trait Element: Clone + Default {}

impl<T: Clone + Default> Element for T {}

/// A `D`-dimensional image storage whose positions are the points of `[0, shape)`.
pub trait Storage<const D: usize> {
    type Data;

    /// The number of elements along each axis.
    fn shape(&self) -> PointN<D>;

    /// Borrows the element at `p`.
    fn get_ref(&self, p: PointN<D>) -> Result<&Self::Data>;

    /// Mutably borrows the element at `p`. Backends that allocate lazily may allocate here.
    fn get_mut(&mut self, p: PointN<D>) -> Result<&mut Self::Data>;

    #[inline]
    fn extent(&self) -> ExtentN<D> {
        ExtentN::from_shape(self.shape())
    }

    #[inline]
    fn num_points(&self) -> usize {
        self.extent().num_points()
    }

    #[inline]
    fn contains(&self, p: PointN<D>) -> bool {
        self.extent().contains(p)
    }

    /// Fails with `IndexOutOfRange` unless `p` is in bounds.
    #[inline]
    fn check_bounds(&self, p: PointN<D>) -> Result<()> {
        let extent = self.extent();
        if extent.contains(p) {
            Ok(())
        } else {
            Err(ImgError::out_of_range(p, &extent))
        }
    }

    #[inline]
    fn get(&self, p: PointN<D>) -> Result<Self::Data>
    where
        Self::Data: Clone,
    {
        self.get_ref(p).map(Clone::clone)
    }

    #[inline]
    fn set(&mut self, p: PointN<D>, value: Self::Data) -> Result<()> {
        *self.get_mut(p)? = value;

        Ok(())
    }
}

/// The linear offset of an element in a row-major buffer.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Stride(pub usize);

impl Stride {
    /// The row-major stride of `local`, a point in `[0, shape)` of an array with the given per-axis `strides`.
    #[inline]
    pub fn from_local_point<const D: usize>(strides: &[usize; D], local: PointN<D>) -> Self {
        Stride(
            strides
                .iter()
                .zip(local.0.iter())
                .map(|(s, c)| s * *c as usize)
                .sum(),
        )
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
