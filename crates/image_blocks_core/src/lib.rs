//! The core data types for addressing N-dimensional images:
//! - `PointN`: an N-dimensional integer position, most importantly `Point2i` and `Point3i`
//! - `ExtentN`: an N-dimensional box; an image's shape is an extent at the origin
//! - `neighborhood_offsets` and `HyperSphere`: the point sets used by local searches
//!
//! Every place in this library that enumerates the points of an extent does so in row-major order, meaning the last
//! dimension varies fastest. Flat array layout, cursor traversal and copies all agree on this order.

pub mod extent;
pub mod neighborhood;
pub mod point;
pub mod sphere;

pub use extent::{bounding_extent, Extent1i, Extent2i, Extent3i, ExtentN, ExtentPointIter};
pub use neighborhood::{neighborhood_offsets, NeighborhoodShape};
pub use point::{Point1i, Point2i, Point3i, PointN};
pub use sphere::HyperSphere;

pub use num;

pub mod prelude {
    pub use super::{
        neighborhood_offsets, Extent1i, Extent2i, Extent3i, ExtentN, HyperSphere,
        NeighborhoodShape, Point1i, Point2i, Point3i, PointN,
    };
}
