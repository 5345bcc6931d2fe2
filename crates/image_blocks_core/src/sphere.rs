use crate::{ExtentN, PointN};

/// The set of lattice points within Euclidean distance `radius` of `center`, center included.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HyperSphere<const D: usize> {
    pub center: PointN<D>,
    pub radius: i32,
}

impl<const D: usize> HyperSphere<D> {
    #[inline]
    pub fn new(center: PointN<D>, radius: i32) -> Self {
        Self { center, radius }
    }

    /// The smallest extent containing the sphere.
    #[inline]
    pub fn extent(&self) -> ExtentN<D> {
        ExtentN::from_min_and_max(
            self.center - PointN::fill(self.radius),
            self.center + PointN::fill(self.radius),
        )
    }

    #[inline]
    pub fn contains(&self, p: PointN<D>) -> bool {
        self.center.l2_distance_squared(&p) <= self.radius as i64 * self.radius as i64
    }

    /// All points of the sphere in row-major order.
    pub fn iter_points(&self) -> impl Iterator<Item = PointN<D>> {
        let sphere = *self;

        self.extent()
            .iter_points()
            .filter(move |p| sphere.contains(*p))
    }
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

    #[test]
    fn radius_one_sphere_is_center_plus_face_neighbors() {
        let sphere = HyperSphere::new(PointN([5, 5, 5]), 1);

        let points: Vec<_> = sphere.iter_points().collect();

        assert_eq!(points.len(), 7);
        assert!(points.contains(&PointN([5, 5, 5])));
        assert!(points.contains(&PointN([4, 5, 5])));
        assert!(!points.contains(&PointN([4, 4, 5])));
    }

    #[test]
    fn negative_radius_is_empty() {
        let sphere = HyperSphere::new(PointN([0, 0]), -1);

        assert_eq!(sphere.iter_points().count(), 0);
    }
}
