//! Offset sets describing the neighborhood of a point.
//!
//! ```
//! use image_blocks_core::prelude::*;
//!
//! // Radius 1 hypercube in 3D is the Moore neighborhood: 3^3 - 1 points.
//! let offsets = neighborhood_offsets::<3>(1, NeighborhoodShape::HyperCube);
//! assert_eq!(offsets.len(), 26);
//!
//! // Radius 1 hypersphere only reaches the face-adjacent points.
//! let offsets = neighborhood_offsets::<3>(1, NeighborhoodShape::HyperSphere);
//! assert_eq!(offsets.len(), 6);
//! ```

use crate::{ExtentN, PointN};

use itertools::Itertools;

/// The distance metric used to decide which points belong to a neighborhood.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NeighborhoodShape {
    /// All points within Chebyshev (L-infinity) distance `radius`.
    HyperCube,
    /// All points within Euclidean distance `radius`.
    HyperSphere,
}

impl NeighborhoodShape {
    /// Returns `true` iff `offset` is no farther than `radius` from the origin under this shape's metric.
    #[inline]
    pub fn contains_offset<const D: usize>(&self, offset: &PointN<D>, radius: i32) -> bool {
        match self {
            NeighborhoodShape::HyperCube => offset.chebyshev_distance(&PointN::ZERO) <= radius,
            NeighborhoodShape::HyperSphere => {
                offset.dot(offset) <= radius as i64 * radius as i64
            }
        }
    }
}

/// All nonzero offsets within `radius` of the origin under `shape`'s metric, in row-major order.
pub fn neighborhood_offsets<const D: usize>(
    radius: i32,
    shape: NeighborhoodShape,
) -> Vec<PointN<D>> {
    ExtentN::from_min_and_max(PointN::fill(-radius), PointN::fill(radius))
        .iter_points()
        .filter(|offset| *offset != PointN::ZERO && shape.contains_offset(offset, radius))
        .collect()
}

impl<const D: usize> PointN<D> {
    /// [Moore Neighborhood](https://en.wikipedia.org/wiki/Moore_neighborhood)
    #[inline]
    pub fn moore_offsets() -> Vec<Self> {
        neighborhood_offsets(1, NeighborhoodShape::HyperCube)
    }

    /// [Von Neumann Neighborhood](https://en.wikipedia.org/wiki/Von_Neumann_neighborhood)
    #[inline]
    pub fn von_neumann_offsets() -> Vec<Self> {
        (0..D)
            .cartesian_product([-1, 1])
            .map(|(axis, sign)| {
                let mut offset = PointN::ZERO;
                offset[axis] = sign;
                offset
            })
            .collect()
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
