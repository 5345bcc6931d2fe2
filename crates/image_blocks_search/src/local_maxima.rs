//! Local maximum detection.
//!
//! A position is a local maximum when its value is strictly greater than the value of each of its neighbors within
//! Chebyshev distance 1. A neighbor with an equal value disqualifies it. Positions on the border of the image are never
//! candidates, since their neighborhood doesn't fit inside the image.
//!
//! ```
//! use image_blocks_core::prelude::*;
//! use image_blocks_storage::prelude::*;
//! use image_blocks_search::{find_and_mark_local_maxima, find_local_maxima};
//!
//! let img = Img::from_values(PointN([7]), vec![2, 3, 1, 1, 1, 4, 4]).unwrap();
//! assert_eq!(find_local_maxima(&img).unwrap(), vec![PointN([1])]);
//!
//! // Each maximum is marked along with the positions within distance 1 of it.
//! let marked = find_and_mark_local_maxima(&img, 'x').unwrap();
//! let marks: String = marked.cursor().map(|(_, v)| if *v == 'x' { 'x' } else { '.' }).collect();
//! assert_eq!(marks, "xxx....");
//! ```

use image_blocks_core::prelude::*;
use image_blocks_storage::{ensure_same_shape, prelude::*, Result};

use core::cmp::Ordering;
use tracing::{debug, debug_span};

/// Scans `img` and returns every interior local maximum, in row-major order.
pub fn find_local_maxima<T, const D: usize>(img: &Img<T, D>) -> Result<Vec<PointN<D>>>
where
    T: Element + PartialOrd,
{
    let span = debug_span!("find_local_maxima", shape = ?img.shape());
    let _enter = span.enter();

    let interior = img.extent().padded(-1);

    let mut scan = img.cursor();
    let mut neighborhood = img.neighborhood_cursor(1, NeighborhoodShape::HyperCube);
    let mut maxima = Vec::new();
    let mut num_candidates = 0;
    while scan.has_next() {
        scan.advance()?;
        if !interior.contains(scan.position()?) {
            continue;
        }
        num_candidates += 1;

        neighborhood.center_mut().seek_to(&scan)?;
        neighborhood.update()?;
        let center_value = scan.value()?;

        let mut is_maximum = true;
        while is_maximum && neighborhood.has_next() {
            neighborhood.advance()?;
            is_maximum =
                center_value.partial_cmp(neighborhood.value()?) == Some(Ordering::Greater);
        }
        if is_maximum {
            maxima.push(scan.position()?);
        }
    }
    debug!(num_candidates, num_maxima = maxima.len(), "found local maxima");

    Ok(maxima)
}

/// Writes `marker` into `target` at every position within Euclidean distance 1 of a local maximum of `src`. Returns the
/// number of maxima found.
///
/// `target` must have the same shape as `src`; its other positions are left unchanged. Marked positions that fall outside of
/// the image are skipped.
pub fn mark_local_maxima<T, U, const D: usize>(
    src: &Img<T, D>,
    target: &mut Img<U, D>,
    marker: U,
) -> Result<usize>
where
    T: Element + PartialOrd,
    U: Element,
{
    ensure_same_shape(src.shape(), target.shape())?;

    let maxima = find_local_maxima(src)?;

    let extent = target.extent();
    let mut write = target.random_access_mut();
    for center in maxima.iter() {
        for p in HyperSphere::new(*center, 1).iter_points() {
            if extent.contains(p) {
                write.seek(p)?;
                write.set_value(marker.clone())?;
            }
        }
    }
    debug!(num_maxima = maxima.len(), "marked local maxima");

    Ok(maxima.len())
}

/// Like `mark_local_maxima`, into a new image with the shape and backend kind of `src` that holds `U::default()` everywhere
/// else.
pub fn find_and_mark_local_maxima<T, U, const D: usize>(
    src: &Img<T, D>,
    marker: U,
) -> Result<Img<U, D>>
where
    T: Element + PartialOrd,
    U: Element,
{
    let mut target = src.new_like()?;
    mark_local_maxima(src, &mut target, marker)?;

    Ok(target)
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
    use image_blocks_storage::ImgError;

    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use utilities::{
        data_sets::{isolated_peaks_img, random_img},
        test::{format_img2, test_print},
    };

    fn backends() -> [BackendKind; 3] {
        [
            BackendKind::Contiguous,
            BackendKind::chunked(2),
            BackendKind::chunked(20),
        ]
    }

    #[test]
    fn one_dimensional_scenario() {
        for kind in backends() {
            let values = Img::from_values(PointN([5]), vec![2, 3, 1, 4, 2]).unwrap();
            let src = crate::duplicate(&values, kind).unwrap();

            assert_eq!(
                find_local_maxima(&src).unwrap(),
                vec![PointN([1]), PointN([3])]
            );
        }
    }

    #[test]
    fn equal_neighbors_are_not_maxima() {
        let src = Img::from_values(PointN([4]), vec![1, 5, 5, 1]).unwrap();

        assert_eq!(find_local_maxima(&src).unwrap(), vec![]);
    }

    #[test]
    fn border_positions_are_never_candidates() {
        // Every border value towers over the interior, but none of them can be a maximum.
        let shape = PointN([4, 5]);
        let interior = ExtentN::from_shape(shape).padded(-1);
        let values = ExtentN::from_shape(shape)
            .iter_points()
            .map(|p| if interior.contains(p) { 0 } else { 100 })
            .collect();
        let src = Img::from_values(shape, values).unwrap();

        assert_eq!(find_local_maxima(&src).unwrap(), vec![]);
    }

    #[test]
    fn too_small_for_an_interior() {
        let src = Img::from_values(PointN([2, 7]), vec![1u8; 14]).unwrap();

        assert_eq!(find_local_maxima(&src).unwrap(), vec![]);
    }

    #[test]
    fn single_interior_peak_is_marked_with_radius_one_sphere() {
        let mut src = Img::<f32, 2>::new(PointN([5, 5]), BackendKind::Contiguous).unwrap();
        src.set_value_at(PointN([2, 2]), 1.0).unwrap();

        let marked = find_and_mark_local_maxima(&src, 1u8).unwrap();
        test_print(&format!("marked local maxima:\n{}", format_img2(&marked)));

        assert_eq!(
            format_img2(&marked),
            "0 0 0 0 0\n\
             0 0 1 0 0\n\
             0 1 1 1 0\n\
             0 0 1 0 0\n\
             0 0 0 0 0\n"
        );
    }

    #[test]
    fn marking_leaves_unmarked_positions_alone() {
        let mut src = Img::<i32, 2>::new(PointN([4, 4]), BackendKind::Contiguous).unwrap();
        src.set_value_at(PointN([1, 1]), 9).unwrap();
        let mut target = Img::fill(PointN([4, 4]), BackendKind::chunked(3), 7u8).unwrap();

        assert_eq!(mark_local_maxima(&src, &mut target, 0).unwrap(), 1);

        for (p, v) in target.cursor() {
            let expected = if p.l2_distance_squared(&PointN([1, 1])) <= 1 {
                0
            } else {
                7
            };
            assert_eq!(*v, expected, "{:?}", p);
        }
    }

    #[test]
    fn marking_requires_equal_shapes() {
        let src = Img::<i32, 2>::new(PointN([4, 4]), BackendKind::Contiguous).unwrap();
        let mut target = Img::<bool, 2>::new(PointN([4, 5]), BackendKind::Contiguous).unwrap();

        assert_eq!(
            mark_local_maxima(&src, &mut target, true),
            Err(ImgError::ShapeMismatch {
                expected: vec![4, 4],
                actual: vec![4, 5]
            })
        );
    }

    #[test]
    fn isolated_peaks_are_found_in_every_backend() {
        for kind in backends() {
            let (src, peaks) = isolated_peaks_img(PointN([12, 10, 9]), kind, 3);

            assert!(!peaks.is_empty());
            assert_eq!(find_local_maxima(&src).unwrap(), peaks);

            let marked = find_and_mark_local_maxima(&src, true).unwrap();
            assert_eq!(marked.backend_kind(), kind);
            let num_marked = marked.cursor().filter(|(_, v)| **v).count();
            // Peaks are spaced so that their spheres (center plus 6 faces) never overlap.
            assert_eq!(num_marked, 7 * peaks.len());
        }
    }

    #[test]
    fn random_images_agree_with_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5 {
            let shape = PointN([rng.gen_range(1..12), rng.gen_range(1..12)]);
            let src = random_img(shape, BackendKind::chunked(rng.gen_range(1..6)), rng.gen());

            let interior = src.extent().padded(-1);
            let expected: Vec<_> = interior
                .iter_points()
                .filter(|p| {
                    let center = src.value_at(*p).unwrap();
                    PointN::<2>::moore_offsets()
                        .into_iter()
                        .all(|offset| center > src.value_at(*p + offset).unwrap())
                })
                .collect();

            assert_eq!(find_local_maxima(&src).unwrap(), expected);
        }
    }
}
