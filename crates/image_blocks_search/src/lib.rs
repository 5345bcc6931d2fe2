//! Algorithms that only use the cursor contract of `image_blocks_storage`, so they run unchanged on any image backend.

pub mod copy;
pub mod local_maxima;

pub use copy::{copy_img, duplicate};
pub use local_maxima::{find_and_mark_local_maxima, find_local_maxima, mark_local_maxima};
