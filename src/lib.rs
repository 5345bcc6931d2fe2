//! Dimension-agnostic images with interchangeable storage, and the cursors and search algorithms that run on them.
//!
//! This library is organized into several crates:
//! - **core**: integer point, extent and neighborhood data types
//! - **storage**: flat and chunked image storage, the `Img` type and its cursors
//! - **search**: element-wise copy and local maximum detection, written only against cursors
//!
//! ```
//! use image_blocks::prelude::*;
//! use image_blocks::search::find_local_maxima;
//!
//! let mut img = ImgFactory::chunked(2).build::<u8, 2>(PointN([5, 5])).unwrap();
//! img.set_value_at(PointN([2, 3]), 9).unwrap();
//!
//! assert_eq!(find_local_maxima(&img).unwrap(), vec![PointN([2, 3])]);
//! ```

pub use image_blocks_core as core;
pub use image_blocks_storage as storage;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::storage::prelude::*;
}

#[cfg(feature = "search")]
pub use image_blocks_search as search;
