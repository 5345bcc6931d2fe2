use image_blocks_core::prelude::*;
use image_blocks_storage::prelude::*;

use rand::{rngs::StdRng, Rng, SeedableRng};

// NOTE: crates that dev-depend on this one while also being one of its dependencies get two distinct copies of the storage
// types in their unit tests (https://github.com/rust-lang/cargo/issues/6765), so only their benches should use these.

/// An image whose value at each position is that position's row-major index.
pub fn ramp_img<const D: usize>(shape: PointN<D>, kind: BackendKind) -> Img<i32, D> {
    let mut img = Img::new(shape, kind).expect("valid shape and backend");
    let mut cursor = img.cursor_mut();
    let mut i = 0;
    while cursor.has_next() {
        cursor.advance().unwrap();
        cursor.set_value(i).unwrap();
        i += 1;
    }

    img
}

/// An image of uniformly random bytes. The same `seed` always gives the same image.
pub fn random_img<const D: usize>(shape: PointN<D>, kind: BackendKind, seed: u64) -> Img<u8, D> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut img = Img::new(shape, kind).expect("valid shape and backend");
    let mut cursor = img.cursor_mut();
    while cursor.has_next() {
        cursor.advance().unwrap();
        cursor.set_value(rng.gen()).unwrap();
    }

    img
}

/// A zero image with a grid of isolated, strictly positive peaks `spacing` apart, none of them on the border.
///
/// Returns the image and the peak positions in row-major order.
pub fn isolated_peaks_img<const D: usize>(
    shape: PointN<D>,
    kind: BackendKind,
    spacing: i32,
) -> (Img<u16, D>, Vec<PointN<D>>) {
    assert!(spacing >= 2, "peaks closer than 2 would be neighbors");

    let interior = ExtentN::from_shape(shape).padded(-1);
    let peaks: Vec<_> = interior
        .iter_points()
        .filter(|p| p.0.iter().all(|c| c % spacing == 1))
        .collect();

    let mut img = Img::new(shape, kind).expect("valid shape and backend");
    for (i, p) in peaks.iter().enumerate() {
        img.set_value_at(*p, 1 + (i % 1000) as u16).unwrap();
    }

    (img, peaks)
}
