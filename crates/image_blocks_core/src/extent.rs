use crate::PointN;

use core::ops::{Add, Sub};

/// A 1-dimensional extent.
pub type Extent1i = ExtentN<1>;
/// A 2-dimensional extent.
pub type Extent2i = ExtentN<2>;
/// A 3-dimensional extent.
pub type Extent3i = ExtentN<3>;

/// An N-dimensional extent. This is mathematically the Cartesian product of a half-closed interval `[a, b)` in each
/// dimension. You can also just think of it as an axis-aligned box with some shape and a minimum point.
///
/// The shape of an image is an extent whose minimum is the origin, so a position `p` is in bounds of an image with shape `s`
/// iff `0 <= p_d < s_d` on every axis `d`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ExtentN<const D: usize> {
    /// The least point contained in the extent.
    pub minimum: PointN<D>,
    /// The length of each dimension.
    pub shape: PointN<D>,
}

impl<const D: usize> ExtentN<D> {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: PointN<D>, shape: PointN<D>) -> Self {
        Self { minimum, shape }
    }

    /// The extent of an image with `shape`, i.e. with the origin as its minimum.
    #[inline]
    pub fn from_shape(shape: PointN<D>) -> Self {
        Self::from_min_and_shape(PointN::ZERO, shape)
    }

    /// An alternative representation of an extent as the minimum point and least upper bound.
    #[inline]
    pub fn from_min_and_lub(minimum: PointN<D>, least_upper_bound: PointN<D>) -> Self {
        // We want to avoid negative shape components.
        let shape = (least_upper_bound - minimum).join(&PointN::ZERO);

        Self { minimum, shape }
    }

    /// An alternative representation of an extent as the minimum point and the (inclusive) maximum point.
    #[inline]
    pub fn from_min_and_max(minimum: PointN<D>, max: PointN<D>) -> Self {
        Self::from_min_and_lub(minimum, max + PointN::ONES)
    }

    /// Translate the extent such that it has `new_min` as its new minimum.
    #[inline]
    pub fn with_minimum(&self, new_min: PointN<D>) -> Self {
        Self::from_min_and_shape(new_min, self.shape)
    }

    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> PointN<D> {
        self.minimum + self.shape
    }

    /// The unique greatest point in the extent.
    #[inline]
    pub fn max(&self) -> PointN<D> {
        self.least_upper_bound() - PointN::ONES
    }

    /// Returns `true` iff the point `p` is contained in this extent.
    #[inline]
    pub fn contains(&self, p: PointN<D>) -> bool {
        self.minimum <= p && p < self.least_upper_bound()
    }

    /// The number of points contained in the extent.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.shape.join(&PointN::ZERO).volume() as usize
    }

    /// Returns `true` iff the number of points in the extent is 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// Returns the extent containing only the points in both `self` and `other`.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        let minimum = self.minimum.join(&other.minimum);
        let lub = self.least_upper_bound().meet(&other.least_upper_bound());

        Self::from_min_and_lub(minimum, lub)
    }

    /// Returns `true` iff the intersection of `self` and `other` is equal to `self`.
    #[inline]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.intersection(other).eq(self)
    }

    /// Returns a new extent that's been padded on all borders by `pad_amount`. A negative amount shrinks the extent.
    #[inline]
    pub fn padded(&self, pad_amount: i32) -> Self {
        Self::from_min_and_lub(
            self.minimum - PointN::fill(pad_amount),
            self.least_upper_bound() + PointN::fill(pad_amount),
        )
    }

    /// The same box with the axes `a` and `b` exchanged.
    #[inline]
    pub fn swap_axes(&self, a: usize, b: usize) -> Self {
        Self::from_min_and_shape(self.minimum.swap_axes(a, b), self.shape.swap_axes(a, b))
    }

    /// Row-major strides for an array of this shape: the last axis has stride 1.
    #[inline]
    pub fn row_major_strides(&self) -> [usize; D] {
        let mut strides = [0; D];
        let mut stride = 1usize;
        for axis in (0..D).rev() {
            strides[axis] = stride;
            stride *= self.shape.at(axis).max(0) as usize;
        }

        strides
    }

    /// The point that follows `p` in row-major order, or `None` if `p` is the last point of the extent.
    ///
    /// `p` must be contained in the extent.
    #[inline]
    pub fn next_point(&self, p: PointN<D>) -> Option<PointN<D>> {
        let lub = self.least_upper_bound();
        let mut next = p;
        for axis in (0..D).rev() {
            next[axis] += 1;
            if next[axis] < lub[axis] {
                return Some(next);
            }
            next[axis] = self.minimum[axis];
        }

        None
    }

    /// Iterate over all points in the extent, in row-major order (the last axis varies fastest).
    /// ```
    /// # use image_blocks_core::prelude::*;
    /// #
    /// let extent = Extent2i::from_min_and_shape(PointN([0, 0]), PointN([2, 3]));
    /// let points = extent.iter_points().collect::<Vec<_>>();
    /// assert_eq!(points, vec![
    ///     PointN([0, 0]), PointN([0, 1]), PointN([0, 2]),
    ///     PointN([1, 0]), PointN([1, 1]), PointN([1, 2]),
    /// ]);
    /// ```
    #[inline]
    pub fn iter_points(&self) -> ExtentPointIter<D> {
        ExtentPointIter {
            extent: *self,
            next: if self.is_empty() {
                None
            } else {
                Some(self.minimum)
            },
            remaining: self.num_points(),
        }
    }
}

impl<const D: usize> Add<PointN<D>> for ExtentN<D> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: PointN<D>) -> Self::Output {
        ExtentN {
            minimum: self.minimum + rhs,
            shape: self.shape,
        }
    }
}

impl<const D: usize> Sub<PointN<D>> for ExtentN<D> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: PointN<D>) -> Self::Output {
        ExtentN {
            minimum: self.minimum - rhs,
            shape: self.shape,
        }
    }
}

/// An iterator over all points in an `ExtentN`, in row-major order.
#[derive(Clone, Debug)]
pub struct ExtentPointIter<const D: usize> {
    extent: ExtentN<D>,
    next: Option<PointN<D>>,
    remaining: usize,
}

impl<const D: usize> Iterator for ExtentPointIter<D> {
    type Item = PointN<D>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.extent.next_point(current);
        self.remaining -= 1;

        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const D: usize> ExactSizeIterator for ExtentPointIter<D> {}

/// Returns the smallest extent containing all of the given points, or `None` if there are no points.
#[inline]
pub fn bounding_extent<const D: usize>(
    mut points: impl Iterator<Item = PointN<D>>,
) -> Option<ExtentN<D>> {
    let first_point = points.next()?;

    let mut min_point = first_point;
    let mut max_point = first_point;
    for p in points {
        min_point = min_point.meet(&p);
        max_point = max_point.join(&p);
    }

    Some(ExtentN::from_min_and_max(min_point, max_point))
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
