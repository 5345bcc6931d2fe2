//! Cursors: explicit, restartable traversal of an `Img`.
//!
//! Every cursor is a small state machine with an explicit `CursorState`. A new cursor is `NotStarted`, positioned *before*
//! the first element, so `advance` must be called once before reading. Advancing past the last position makes the cursor
//! `Exhausted`, after which only `reset` (or, for random access cursors, `seek`) is legal.
//!
//! Sequential cursors visit positions in row-major order (the last axis varies fastest) regardless of the backend, so two
//! cursors over images of equal shape can be advanced in lock-step even when one image is contiguous and the other chunked.
//! When lock-step isn't enough, a `Positionable` cursor can copy the position of any `Localizable` one with `seek_to`.
//!
//! ```
//! use image_blocks_core::prelude::*;
//! use image_blocks_storage::prelude::*;
//!
//! let src = Img::from_values(PointN([2, 2]), vec![1, 2, 3, 4]).unwrap();
//! let mut dst = Img::<i32, 2>::new(PointN([2, 2]), BackendKind::chunked(1)).unwrap();
//!
//! let mut read = src.cursor();
//! let mut write = dst.random_access_mut();
//! while read.has_next() {
//!     read.advance().unwrap();
//!     write.seek_to(&read).unwrap();
//!     write.set_value(10 * read.value().unwrap()).unwrap();
//! }
//! // `has_next` is false on the last position; one more `advance` exhausts the cursor.
//! assert_eq!(read.state(), CursorState::Positioned(PointN([1, 1])));
//! read.advance().unwrap();
//! assert_eq!(read.state(), CursorState::Exhausted);
//! assert!(read.advance().is_err());
//!
//! assert_eq!(dst.value_at(PointN([1, 0])), Ok(&30));
//! ```

mod neighborhood;
mod random_access;
mod sequential;

pub use neighborhood::NeighborhoodCursor;
pub use random_access::{RandomAccess, RandomAccessMut};
pub use sequential::{Cursor, CursorMut};

use crate::{ImgError, Result};

use image_blocks_core::prelude::*;

/// Where a cursor is in its traversal.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CursorState<const D: usize> {
    /// Before the first position.
    NotStarted,
    /// At a valid position.
    Positioned(PointN<D>),
    /// Past the last position.
    Exhausted,
}

impl<const D: usize> CursorState<D> {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            CursorState::NotStarted => "not started",
            CursorState::Positioned(_) => "positioned",
            CursorState::Exhausted => "exhausted",
        }
    }

    /// The current position, or `IllegalState` naming `operation` if there is none.
    #[inline]
    pub fn position(&self, operation: &'static str) -> Result<PointN<D>> {
        match *self {
            CursorState::Positioned(p) => Ok(p),
            _ => Err(ImgError::illegal_state(operation, self.name())),
        }
    }
}

/// The sequential traversal protocol.
pub trait Iterate {
    /// Returns `true` iff the next `advance` moves onto a valid position.
    fn has_next(&self) -> bool;

    /// Moves to the next position, or to the exhausted state after the last one. Fails with `IllegalState` once exhausted.
    fn advance(&mut self) -> Result<()>;

    /// Returns to the not-started state, before the first position.
    fn reset(&mut self);
}

/// Read access to the element under a cursor.
pub trait Sampler<T> {
    /// Fails with `IllegalState` unless the cursor is positioned.
    fn value(&self) -> Result<&T>;
}

/// Write access to the element under a cursor.
pub trait SamplerMut<T>: Sampler<T> {
    fn value_mut(&mut self) -> Result<&mut T>;

    #[inline]
    fn set_value(&mut self, value: T) -> Result<()> {
        *self.value_mut()? = value;

        Ok(())
    }
}

/// A cursor that knows its position.
pub trait Localizable<const D: usize> {
    /// Fails with `IllegalState` unless the cursor is positioned.
    fn position(&self) -> Result<PointN<D>>;
}

/// A cursor that can jump to arbitrary positions.
pub trait Positionable<const D: usize>: Localizable<D> {
    /// Moves to `p`. If `p` is out of bounds, fails with `IndexOutOfRange` and the cursor doesn't move.
    fn seek(&mut self, p: PointN<D>) -> Result<()>;

    /// Moves by `delta` from the current position, with the same bounds contract as `seek`.
    #[inline]
    fn seek_relative(&mut self, delta: PointN<D>) -> Result<()> {
        // Saturated components are never in bounds, so overflow reports `IndexOutOfRange` like any other miss.
        let target = self
            .position()?
            .map_components_binary(&delta, i32::saturating_add);

        self.seek(target)
    }

    /// Moves to the position of `other`, which may traverse a different image of the same shape.
    #[inline]
    fn seek_to<L>(&mut self, other: &L) -> Result<()>
    where
        L: Localizable<D> + ?Sized,
    {
        self.seek(other.position()?)
    }
}

/// The row-major traversal state shared by all image cursors.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Traversal<const D: usize> {
    extent: ExtentN<D>,
    state: CursorState<D>,
}

impl<const D: usize> Traversal<D> {
    #[inline]
    pub fn new(extent: ExtentN<D>) -> Self {
        Self {
            extent,
            state: CursorState::NotStarted,
        }
    }

    #[inline]
    pub fn state(&self) -> CursorState<D> {
        self.state
    }

    #[inline]
    pub fn position(&self, operation: &'static str) -> Result<PointN<D>> {
        self.state.position(operation)
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        match self.state {
            CursorState::NotStarted => !self.extent.is_empty(),
            CursorState::Positioned(p) => self.extent.next_point(p).is_some(),
            CursorState::Exhausted => false,
        }
    }

    #[inline]
    pub fn advance(&mut self) -> Result<()> {
        self.state = match self.state {
            CursorState::NotStarted if self.extent.is_empty() => CursorState::Exhausted,
            CursorState::NotStarted => CursorState::Positioned(self.extent.minimum),
            CursorState::Positioned(p) => match self.extent.next_point(p) {
                Some(next) => CursorState::Positioned(next),
                None => CursorState::Exhausted,
            },
            CursorState::Exhausted => {
                return Err(ImgError::illegal_state("advance", self.state.name()))
            }
        };

        Ok(())
    }

    #[inline]
    pub fn reset(&mut self) {
        self.state = CursorState::NotStarted;
    }

    #[inline]
    pub fn seek(&mut self, p: PointN<D>) -> Result<()> {
        if !self.extent.contains(p) {
            return Err(ImgError::out_of_range(p, &self.extent));
        }
        self.state = CursorState::Positioned(p);

        Ok(())
    }
}

/// Implements the traversal protocol, localization and reads for a cursor type with `img` and `traversal` fields.
macro_rules! impl_image_cursor {
    ($cursor:ident) => {
        impl<'a, T: Element, const D: usize> $cursor<'a, T, D> {
            #[inline]
            pub fn state(&self) -> CursorState<D> {
                self.traversal.state()
            }

            /// The shape of the image being traversed.
            #[inline]
            pub fn shape(&self) -> PointN<D> {
                self.img.shape()
            }
        }

        impl<'a, T: Element, const D: usize> Iterate for $cursor<'a, T, D> {
            #[inline]
            fn has_next(&self) -> bool {
                self.traversal.has_next()
            }

            #[inline]
            fn advance(&mut self) -> Result<()> {
                self.traversal.advance()
            }

            #[inline]
            fn reset(&mut self) {
                self.traversal.reset()
            }
        }

        impl<'a, T: Element, const D: usize> Localizable<D> for $cursor<'a, T, D> {
            #[inline]
            fn position(&self) -> Result<PointN<D>> {
                self.traversal.position("read the position of")
            }
        }

        impl<'a, T: Element, const D: usize> Sampler<T> for $cursor<'a, T, D> {
            #[inline]
            fn value(&self) -> Result<&T> {
                self.img
                    .value_at(self.traversal.position("read the value of")?)
            }
        }
    };
}

/// Implements writes for a cursor type whose `img` field is a mutable borrow.
macro_rules! impl_image_cursor_mut {
    ($cursor:ident) => {
        impl<'a, T: Element, const D: usize> SamplerMut<T> for $cursor<'a, T, D> {
            #[inline]
            fn value_mut(&mut self) -> Result<&mut T> {
                let p = self.traversal.position("write the value of")?;

                self.img.value_at_mut(p)
            }
        }
    };
}

pub(crate) use impl_image_cursor;
pub(crate) use impl_image_cursor_mut;

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

    #[test]
    fn traversal_state_machine() {
        let mut traversal = Traversal::new(ExtentN::from_shape(PointN([1, 2])));

        assert_eq!(traversal.state(), CursorState::NotStarted);
        assert!(traversal.has_next());
        assert_eq!(
            traversal.position("read"),
            Err(ImgError::illegal_state("read", "not started"))
        );

        traversal.advance().unwrap();
        assert_eq!(traversal.state(), CursorState::Positioned(PointN([0, 0])));
        assert!(traversal.has_next());

        traversal.advance().unwrap();
        assert_eq!(traversal.state(), CursorState::Positioned(PointN([0, 1])));
        assert!(!traversal.has_next());

        traversal.advance().unwrap();
        assert_eq!(traversal.state(), CursorState::Exhausted);
        assert_eq!(
            traversal.advance(),
            Err(ImgError::illegal_state("advance", "exhausted"))
        );

        traversal.reset();
        assert_eq!(traversal.state(), CursorState::NotStarted);
        assert!(traversal.has_next());
    }

    #[test]
    fn failed_seek_keeps_previous_state() {
        let mut traversal = Traversal::new(ExtentN::from_shape(PointN([3, 3])));
        traversal.seek(PointN([1, 2])).unwrap();

        assert!(traversal.seek(PointN([-1, 0])).is_err());
        assert!(traversal.seek(PointN([0, 3])).is_err());
        assert_eq!(traversal.state(), CursorState::Positioned(PointN([1, 2])));

        traversal.reset();
        assert!(traversal.seek(PointN([3, 0])).is_err());
        assert_eq!(traversal.state(), CursorState::NotStarted);
    }
}
