use super::{
    impl_image_cursor, impl_image_cursor_mut, CursorState, Iterate, Localizable, Sampler,
    SamplerMut, Traversal,
};
use crate::{Element, Img, Result, Storage};

use image_blocks_core::prelude::*;

/// A sequential cursor that reads every position of an image in row-major order.
///
/// Besides the explicit `Iterate` protocol, `Cursor` is an `Iterator` of `(position, &value)` pairs. Both advance the same
/// state, so the two styles can be mixed.
#[derive(Clone, Debug)]
pub struct Cursor<'a, T, const D: usize> {
    img: &'a Img<T, D>,
    traversal: Traversal<D>,
}

impl<'a, T: Element, const D: usize> Cursor<'a, T, D> {
    #[inline]
    pub fn new(img: &'a Img<T, D>) -> Self {
        Self {
            img,
            traversal: Traversal::new(img.extent()),
        }
    }
}

impl_image_cursor!(Cursor);

impl<'a, T: Element, const D: usize> Iterator for Cursor<'a, T, D> {
    type Item = (PointN<D>, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if !self.traversal.has_next() {
            return None;
        }
        self.traversal.advance().ok()?;
        let p = self.traversal.position("read the value of").ok()?;
        let img: &'a Img<T, D> = self.img;

        img.value_at(p).ok().map(|value| (p, value))
    }
}

/// A sequential cursor with write access to every position of an image, in row-major order.
#[derive(Debug)]
pub struct CursorMut<'a, T, const D: usize> {
    img: &'a mut Img<T, D>,
    traversal: Traversal<D>,
}

impl<'a, T: Element, const D: usize> CursorMut<'a, T, D> {
    #[inline]
    pub fn new(img: &'a mut Img<T, D>) -> Self {
        let traversal = Traversal::new(img.extent());

        Self { img, traversal }
    }
}

impl_image_cursor!(CursorMut);
impl_image_cursor_mut!(CursorMut);

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendKind, ChunkAllocation, ImgError};

    use pretty_assertions::assert_eq;

    #[test]
    fn reading_before_first_advance_is_illegal() {
        let img = Img::<u8, 2>::new(PointN([2, 2]), BackendKind::Contiguous).unwrap();
        let cursor = img.cursor();

        assert_eq!(cursor.state(), CursorState::NotStarted);
        assert_eq!(
            cursor.value(),
            Err(ImgError::illegal_state("read the value of", "not started"))
        );
        assert!(cursor.position().is_err());
    }

    #[test]
    fn explicit_protocol_visits_row_major_then_exhausts() {
        let img = Img::from_values(PointN([2, 3]), (0..6).collect::<Vec<i32>>()).unwrap();
        let mut cursor = img.cursor();

        let mut seen = Vec::new();
        while cursor.has_next() {
            cursor.advance().unwrap();
            seen.push((cursor.position().unwrap(), *cursor.value().unwrap()));
        }

        assert_eq!(
            seen,
            vec![
                (PointN([0, 0]), 0),
                (PointN([0, 1]), 1),
                (PointN([0, 2]), 2),
                (PointN([1, 0]), 3),
                (PointN([1, 1]), 4),
                (PointN([1, 2]), 5),
            ]
        );
        assert_eq!(cursor.state(), CursorState::Positioned(PointN([1, 2])));

        cursor.advance().unwrap();
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert!(cursor.value().is_err());
        assert!(cursor.advance().is_err());
    }

    #[test]
    fn reset_restarts_traversal() {
        let img = Img::from_values(PointN([3]), vec![7u8, 8, 9]).unwrap();
        let mut cursor = img.cursor();

        assert_eq!(cursor.by_ref().count(), 3);
        assert_eq!(cursor.next(), None);

        cursor.reset();
        assert_eq!(cursor.next(), Some((PointN([0]), &7)));
    }

    #[test]
    fn mutable_cursor_writes_every_position_in_chunked_image() {
        let kind = BackendKind::Chunked {
            chunk_size: 2,
            allocation: ChunkAllocation::Lazy,
        };
        let mut img = Img::<i32, 2>::new(PointN([3, 3]), kind).unwrap();

        let mut cursor = img.cursor_mut();
        let mut i = 0;
        while cursor.has_next() {
            cursor.advance().unwrap();
            cursor.set_value(i).unwrap();
            *cursor.value_mut().unwrap() += 100;
            i += 1;
        }
        assert_eq!(cursor.state(), CursorState::Positioned(PointN([2, 2])));

        cursor.advance().unwrap();
        assert_eq!(cursor.state(), CursorState::Exhausted);
        assert_eq!(
            cursor.set_value(0),
            Err(ImgError::illegal_state("write the value of", "exhausted"))
        );

        let values: Vec<i32> = img.cursor().map(|(_, v)| *v).collect();
        assert_eq!(values, (100..109).collect::<Vec<_>>());
    }
}
