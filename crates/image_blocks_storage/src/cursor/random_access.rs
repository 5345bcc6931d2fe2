use super::{
    impl_image_cursor, impl_image_cursor_mut, CursorState, Iterate, Localizable, Positionable,
    Sampler, SamplerMut, Traversal,
};
use crate::{Element, Img, Result, Storage};

use image_blocks_core::prelude::*;

/// A read cursor that can jump to any position of an image. It also supports the sequential protocol, continuing in
/// row-major order from wherever it was last positioned.
#[derive(Clone, Debug)]
pub struct RandomAccess<'a, T, const D: usize> {
    img: &'a Img<T, D>,
    traversal: Traversal<D>,
}

impl<'a, T: Element, const D: usize> RandomAccess<'a, T, D> {
    #[inline]
    pub fn new(img: &'a Img<T, D>) -> Self {
        Self {
            img,
            traversal: Traversal::new(img.extent()),
        }
    }

    /// The image being read, for the lifetime of the borrow rather than of the cursor.
    #[inline]
    pub fn img(&self) -> &'a Img<T, D> {
        self.img
    }
}

impl_image_cursor!(RandomAccess);

impl<'a, T: Element, const D: usize> Positionable<D> for RandomAccess<'a, T, D> {
    #[inline]
    fn seek(&mut self, p: PointN<D>) -> Result<()> {
        self.traversal.seek(p)
    }
}

/// A read/write cursor that can jump to any position of an image.
#[derive(Debug)]
pub struct RandomAccessMut<'a, T, const D: usize> {
    img: &'a mut Img<T, D>,
    traversal: Traversal<D>,
}

impl<'a, T: Element, const D: usize> RandomAccessMut<'a, T, D> {
    #[inline]
    pub fn new(img: &'a mut Img<T, D>) -> Self {
        let traversal = Traversal::new(img.extent());

        Self { img, traversal }
    }
}

impl_image_cursor!(RandomAccessMut);
impl_image_cursor_mut!(RandomAccessMut);

impl<'a, T: Element, const D: usize> Positionable<D> for RandomAccessMut<'a, T, D> {
    #[inline]
    fn seek(&mut self, p: PointN<D>) -> Result<()> {
        self.traversal.seek(p)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
