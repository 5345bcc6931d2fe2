use super::{Iterate, Localizable, RandomAccess, Sampler};
use crate::{Element, Img, ImgError, Result, Storage};

use image_blocks_core::prelude::*;

/// Iterates over the neighbors of a center position held by a `RandomAccess` cursor.
///
/// The neighbor set is every in-bounds position within `radius` of the center under the `NeighborhoodShape` metric, excluding
/// the center itself, in row-major offset order. The set is tied to the center position at the time of the last `update`.
/// After moving the center, call `update` again; reading neighbors of a stale center fails with `IllegalState`.
///
/// ```
/// use image_blocks_core::prelude::*;
/// use image_blocks_storage::prelude::*;
///
/// let img = Img::<u8, 2>::new(PointN([5, 5]), BackendKind::Contiguous).unwrap();
/// let mut neighborhood = img.neighborhood_cursor(1, NeighborhoodShape::HyperCube);
///
/// neighborhood.center_mut().seek(PointN([2, 2])).unwrap();
/// neighborhood.update().unwrap();
/// assert_eq!(neighborhood.neighbors().unwrap().count(), 8);
///
/// // Neighbors that fall outside of the image are skipped.
/// neighborhood.center_mut().seek(PointN([0, 0])).unwrap();
/// assert!(neighborhood.neighbors().is_err());
/// neighborhood.update().unwrap();
/// assert_eq!(neighborhood.neighbors().unwrap().count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct NeighborhoodCursor<'a, T, const D: usize> {
    center: RandomAccess<'a, T, D>,
    radius: i32,
    shape: NeighborhoodShape,
    offsets: Vec<PointN<D>>,
    // Center at the last update.
    updated_center: Option<PointN<D>>,
    state: NeighborState,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NeighborState {
    NotStarted,
    At(usize),
    Exhausted,
}

impl NeighborState {
    fn name(&self) -> &'static str {
        match self {
            NeighborState::NotStarted => "not started",
            NeighborState::At(_) => "positioned",
            NeighborState::Exhausted => "exhausted",
        }
    }
}

impl<'a, T: Element, const D: usize> NeighborhoodCursor<'a, T, D> {
    #[inline]
    pub fn new(center: RandomAccess<'a, T, D>, radius: i32, shape: NeighborhoodShape) -> Self {
        Self {
            center,
            radius,
            shape,
            offsets: neighborhood_offsets(radius, shape),
            updated_center: None,
            state: NeighborState::NotStarted,
        }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn shape(&self) -> NeighborhoodShape {
        self.shape
    }

    /// The cursor holding the center position.
    #[inline]
    pub fn center(&self) -> &RandomAccess<'a, T, D> {
        &self.center
    }

    /// Use this to move the center. The neighbor set goes stale until the next `update`.
    #[inline]
    pub fn center_mut(&mut self) -> &mut RandomAccess<'a, T, D> {
        &mut self.center
    }

    /// Recomputes the neighbor set for the current center position and restarts neighbor iteration.
    #[inline]
    pub fn update(&mut self) -> Result<()> {
        self.updated_center = Some(self.center.position()?);
        self.state = NeighborState::NotStarted;

        Ok(())
    }

    /// The neighbor positions of the updated center, lazily generated.
    pub fn neighbors(&self) -> Result<impl Iterator<Item = PointN<D>> + '_> {
        let center = self.fresh_center("list the neighbors of")?;
        let extent = self.center.img().extent();

        Ok(self
            .offsets
            .iter()
            .map(move |offset| center + *offset)
            .filter(move |p| extent.contains(*p)))
    }

    fn img(&self) -> &'a Img<T, D> {
        self.center.img()
    }

    fn fresh_center(&self, operation: &'static str) -> Result<PointN<D>> {
        let current = self.center.position()?;
        match self.updated_center {
            Some(updated) if updated == current => Ok(updated),
            Some(_) => Err(ImgError::illegal_state(operation, "stale")),
            None => Err(ImgError::illegal_state(operation, "not updated")),
        }
    }

    /// The index of the first in-bounds offset at or after `start`.
    fn next_index(&self, center: PointN<D>, start: usize) -> Option<usize> {
        let extent = self.img().extent();

        (start..self.offsets.len()).find(|&i| extent.contains(center + self.offsets[i]))
    }

    fn start_index(&self) -> Option<usize> {
        match self.state {
            NeighborState::NotStarted => Some(0),
            NeighborState::At(i) => Some(i + 1),
            NeighborState::Exhausted => None,
        }
    }
}

impl<'a, T: Element, const D: usize> Iterate for NeighborhoodCursor<'a, T, D> {
    /// Returns `true` when the neighbor set is stale or was never computed, so that the following `advance` reports the
    /// `IllegalState` error instead of a loop silently finding no neighbors.
    #[inline]
    fn has_next(&self) -> bool {
        match self.fresh_center("advance") {
            Ok(center) => self
                .start_index()
                .and_then(|start| self.next_index(center, start))
                .is_some(),
            Err(_) => true,
        }
    }

    #[inline]
    fn advance(&mut self) -> Result<()> {
        let center = self.fresh_center("advance")?;
        let start = self
            .start_index()
            .ok_or_else(|| ImgError::illegal_state("advance", self.state.name()))?;
        self.state = match self.next_index(center, start) {
            Some(i) => NeighborState::At(i),
            None => NeighborState::Exhausted,
        };

        Ok(())
    }

    #[inline]
    fn reset(&mut self) {
        self.state = NeighborState::NotStarted;
    }
}

impl<'a, T: Element, const D: usize> Localizable<D> for NeighborhoodCursor<'a, T, D> {
    /// The position of the current neighbor.
    #[inline]
    fn position(&self) -> Result<PointN<D>> {
        let center = self.fresh_center("read the position of")?;
        match self.state {
            NeighborState::At(i) => Ok(center + self.offsets[i]),
            state => Err(ImgError::illegal_state("read the position of", state.name())),
        }
    }
}

impl<'a, T: Element, const D: usize> Sampler<T> for NeighborhoodCursor<'a, T, D> {
    /// The value of the current neighbor.
    #[inline]
    fn value(&self) -> Result<&T> {
        self.img().value_at(self.position()?)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
