//! The contiguous backend: one flat, row-major buffer holding every element of the image.
//!
//! # Layout
//!
//! The element at `p` lives at `Stride(sum_d p_d * stride_d)`, where the last axis has stride 1. This is the same order in
//! which `ExtentN::iter_points` visits positions, so walking an array's positions in order walks its buffer front to back.
//!
//! ```
//! use image_blocks_core::prelude::*;
//! use image_blocks_storage::prelude::*;
//!
//! let array = Array2::fill_with(PointN([2, 3]), |p| 10 * p.at(0) + p.at(1));
//! assert_eq!(array.values_slice(), &[0, 1, 2, 10, 11, 12]);
//!
//! // Strides index the buffer directly.
//! let s = array.stride_from_point(PointN([1, 1])).unwrap();
//! assert_eq!(s, Stride(4));
//! assert_eq!(array[s], 11);
//! ```

use crate::{validate_shape, ImgError, Result, Storage, Stride};

use image_blocks_core::prelude::*;

use core::ops::{Index, IndexMut};

/// A 1-dimensional contiguous array.
pub type Array1<T> = ArrayN<T, 1>;
/// A 2-dimensional contiguous array.
pub type Array2<T> = ArrayN<T, 2>;
/// A 3-dimensional contiguous array.
pub type Array3<T> = ArrayN<T, 3>;

/// A `D`-dimensional array of elements stored in a single row-major `Vec`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArrayN<T, const D: usize> {
    values: Vec<T>,
    extent: ExtentN<D>,
    strides: [usize; D],
}

impl<T, const D: usize> ArrayN<T, D> {
    /// Wraps `values` as an array of `shape` without copying. `values` must hold exactly one element per position.
    pub fn new(shape: PointN<D>, values: Vec<T>) -> Result<Self> {
        validate_shape(shape)?;

        let extent = ExtentN::from_shape(shape);
        if values.len() != extent.num_points() {
            return Err(ImgError::BufferLengthMismatch {
                expected: extent.num_points(),
                actual: values.len(),
            });
        }

        Ok(Self::new_unchecked(extent, values))
    }

    fn new_unchecked(extent: ExtentN<D>, values: Vec<T>) -> Self {
        Self {
            strides: extent.row_major_strides(),
            values,
            extent,
        }
    }

    /// Creates an array of `shape` where each element is `filler(p)`.
    ///
    /// A shape with a non-positive component yields an empty array; use `ArrayN::new` when the shape needs validating.
    pub fn fill_with(shape: PointN<D>, filler: impl FnMut(PointN<D>) -> T) -> Self {
        let extent = ExtentN::from_shape(shape);
        let values = extent.iter_points().map(filler).collect();

        Self::new_unchecked(extent, values)
    }

    /// Creates an array of `shape` with every element set to `value`.
    pub fn fill(shape: PointN<D>, value: T) -> Self
    where
        T: Clone,
    {
        let extent = ExtentN::from_shape(shape);

        Self::new_unchecked(extent, vec![value; extent.num_points()])
    }

    /// Sets every element to `value`.
    #[inline]
    pub fn reset_values(&mut self, value: T)
    where
        T: Clone,
    {
        for v in self.values.iter_mut() {
            *v = value.clone();
        }
    }

    #[inline]
    pub fn values_slice(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn values_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Gives back the flat buffer along with the shape it was laid out for.
    #[inline]
    pub fn into_parts(self) -> (PointN<D>, Vec<T>) {
        (self.extent.shape, self.values)
    }

    /// The row-major strides of the buffer, one per axis.
    #[inline]
    pub fn strides(&self) -> &[usize; D] {
        &self.strides
    }

    /// The buffer offset of `p`.
    #[inline]
    pub fn stride_from_point(&self, p: PointN<D>) -> Result<Stride> {
        if self.extent.contains(p) {
            Ok(Stride::from_local_point(&self.strides, p))
        } else {
            Err(ImgError::out_of_range(p, &self.extent))
        }
    }

    /// The position stored at buffer offset `stride`. The inverse of `stride_from_point`.
    #[inline]
    pub fn point_from_stride(&self, stride: Stride) -> PointN<D> {
        let mut remainder = stride.0;
        let mut p = PointN::ZERO;
        for (axis, s) in self.strides.iter().enumerate() {
            p[axis] = (remainder / s) as i32;
            remainder %= s;
        }

        p
    }
}

impl<T, const D: usize> Storage<D> for ArrayN<T, D> {
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
        let stride = self.stride_from_point(p)?;

        Ok(&self.values[stride.0])
    }

    #[inline]
    fn get_mut(&mut self, p: PointN<D>) -> Result<&mut T> {
        let stride = self.stride_from_point(p)?;

        Ok(&mut self.values[stride.0])
    }
}

// Stride indexing is unchecked beyond the slice bounds check, like indexing a `Vec`.

impl<T, const D: usize> Index<Stride> for ArrayN<T, D> {
    type Output = T;

    #[inline]
    fn index(&self, stride: Stride) -> &T {
        &self.values[stride.0]
    }
}

impl<T, const D: usize> IndexMut<Stride> for ArrayN<T, D> {
    #[inline]
    fn index_mut(&mut self, stride: Stride) -> &mut T {
        &mut self.values[stride.0]
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
