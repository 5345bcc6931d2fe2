//! Read-only views that restrict or reorient an image without copying it.
//!
//! A view addresses elements in its own coordinates. `interval` keeps the coordinates of the view it was taken from, so
//! `view.interval(min, max)` still reads `p` at `p`. `swap_axes` permutes coordinates, so after swapping axes 0 and 1 the view
//! reads `[y, x]` where the image holds `[x, y]`.
//!
//! ```
//! use image_blocks_core::prelude::*;
//! use image_blocks_storage::prelude::*;
//!
//! let img = Img::from_values(PointN([2, 3]), vec![0, 1, 2, 10, 11, 12]).unwrap();
//!
//! let right = img.view().interval(PointN([0, 1]), PointN([1, 2])).unwrap();
//! assert_eq!(right.value_at(PointN([1, 1])), Ok(&11));
//! assert!(right.value_at(PointN([1, 0])).is_err());
//!
//! let transposed = img.view().swap_axes(0, 1).unwrap();
//! assert_eq!(transposed.shape(), PointN([3, 2]));
//! assert_eq!(transposed.value_at(PointN([2, 1])), Ok(&12));
//! ```

use crate::{BackendKind, Element, Img, ImgError, Iterate, Result, SamplerMut, Storage};

use image_blocks_core::prelude::*;

/// A read-only window onto an `Img`.
#[derive(Clone, Debug)]
pub struct ImgView<'a, T, const D: usize> {
    img: &'a Img<T, D>,
    // In view coordinates.
    extent: ExtentN<D>,
    // View axis `d` reads image axis `axes[d]`.
    axes: [usize; D],
}

impl<'a, T: Element, const D: usize> ImgView<'a, T, D> {
    /// A view of all of `img`, with the image's own coordinates.
    pub fn new(img: &'a Img<T, D>) -> Self {
        let mut axes = [0; D];
        for (d, axis) in axes.iter_mut().enumerate() {
            *axis = d;
        }

        Self {
            img,
            extent: img.extent(),
            axes,
        }
    }

    #[inline]
    pub fn extent(&self) -> ExtentN<D> {
        self.extent
    }

    #[inline]
    pub fn shape(&self) -> PointN<D> {
        self.extent.shape
    }

    /// Restricts the view to the box from `min` to `max`, both inclusive. Coordinates are unchanged.
    pub fn interval(self, min: PointN<D>, max: PointN<D>) -> Result<Self> {
        let interval = ExtentN::from_min_and_max(min, max);
        if interval.is_empty() {
            return Err(ImgError::InvalidShape {
                shape: (max - min + PointN::ONES).to_vec(),
            });
        }
        for corner in [min, max] {
            if !self.extent.contains(corner) {
                return Err(ImgError::out_of_range(corner, &self.extent));
            }
        }

        Ok(Self {
            extent: interval,
            ..self
        })
    }

    /// Exchanges the view axes `a` and `b`.
    pub fn swap_axes(mut self, a: usize, b: usize) -> Result<Self> {
        for axis in [a, b] {
            if axis >= D {
                return Err(ImgError::InvalidAxis { axis, rank: D });
            }
        }
        self.extent = self.extent.swap_axes(a, b);
        self.axes.swap(a, b);

        Ok(self)
    }

    /// The image position read by the view position `v`.
    #[inline]
    pub fn to_img_point(&self, v: PointN<D>) -> PointN<D> {
        let mut p = PointN::ZERO;
        for (d, axis) in self.axes.iter().enumerate() {
            p[*axis] = v[d];
        }

        p
    }

    /// Borrows the element at view position `v`.
    #[inline]
    pub fn value_at(&self, v: PointN<D>) -> Result<&'a T> {
        if !self.extent.contains(v) {
            return Err(ImgError::out_of_range(v, &self.extent));
        }

        self.img.value_at(self.to_img_point(v))
    }

    /// Calls `visitor` on every view position and its element, in row-major order of the view's axes.
    pub fn for_each_position(&self, mut visitor: impl FnMut(PointN<D>, &'a T)) -> Result<()> {
        for v in self.extent.iter_points() {
            visitor(v, self.value_at(v)?);
        }

        Ok(())
    }

    /// Copies the view into a new image of the view's shape, with the view's minimum moved to the origin.
    pub fn to_img(&self, kind: BackendKind) -> Result<Img<T, D>> {
        let mut img = Img::new(self.shape(), kind)?;

        let mut write = img.cursor_mut();
        for v in self.extent.iter_points() {
            write.advance()?;
            write.set_value(self.value_at(v)?.clone())?;
        }

        Ok(img)
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

    fn ramp() -> Img<i32, 2> {
        Img::from_values(PointN([3, 4]), (0..12).collect()).unwrap()
    }

    #[test]
    fn interval_keeps_image_coordinates() {
        let img = ramp();
        let view = img.view().interval(PointN([1, 1]), PointN([2, 3])).unwrap();

        assert_eq!(
            view.extent(),
            ExtentN::from_min_and_shape(PointN([1, 1]), PointN([2, 3]))
        );

        let mut visited = Vec::new();
        view.for_each_position(|p, v| visited.push((p, *v))).unwrap();
        assert_eq!(
            visited,
            vec![
                (PointN([1, 1]), 5),
                (PointN([1, 2]), 6),
                (PointN([1, 3]), 7),
                (PointN([2, 1]), 9),
                (PointN([2, 2]), 10),
                (PointN([2, 3]), 11),
            ]
        );
    }

    #[test]
    fn interval_must_fit_inside_the_view() {
        let img = ramp();

        assert_eq!(
            img.view().interval(PointN([1, 1]), PointN([3, 3])).err(),
            Some(ImgError::IndexOutOfRange {
                position: vec![3, 3],
                shape: vec![3, 4]
            })
        );
        assert_eq!(
            img.view().interval(PointN([2, 2]), PointN([1, 2])).err(),
            Some(ImgError::InvalidShape { shape: vec![0, 1] })
        );
    }

    #[test]
    fn swapped_view_materializes_as_transpose() {
        let img = ramp();
        let transposed = img
            .view()
            .swap_axes(0, 1)
            .unwrap()
            .to_img(BackendKind::chunked(2))
            .unwrap();

        assert_eq!(transposed.shape(), PointN([4, 3]));
        for (p, v) in img.cursor() {
            assert_eq!(transposed.value_at(p.swap_axes(0, 1)), Ok(v));
        }
    }

    #[test]
    fn interval_then_swap_then_materialize() {
        let img = ramp();
        let view = img
            .view()
            .interval(PointN([0, 2]), PointN([2, 3]))
            .unwrap()
            .swap_axes(1, 0)
            .unwrap();

        assert_eq!(view.value_at(PointN([3, 1])), Ok(&7));

        let copy = view.to_img(BackendKind::Contiguous).unwrap();
        assert_eq!(copy.as_slice(), Some(&[2, 6, 10, 3, 7, 11][..]));
    }

    #[test]
    fn swapping_a_missing_axis_fails() {
        let img = ramp();

        assert_eq!(
            img.view().swap_axes(0, 2).err(),
            Some(ImgError::InvalidAxis { axis: 2, rank: 2 })
        );
    }
}
