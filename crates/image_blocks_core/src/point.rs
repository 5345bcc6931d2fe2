use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Index, IndexMut, Mul, Neg, Sub, SubAssign};
use num::Integer;

/// An N-dimensional integer point, used both as an image position and as an offset between positions. It is most
/// convenient to construct points of any dimension as:
///
/// ```
/// use image_blocks_core::PointN;
///
/// let p1 = PointN([1]); // 1D
/// let p2 = PointN([1, 2]); // 2D
/// let p3 = PointN([1, 2, 3]); // 3D
/// ```
///
/// Points support basic linear algebraic operations such as addition, subtraction and scalar multiplication.
///
/// ```
/// use image_blocks_core::PointN;
///
/// let p1 = PointN([1, 2]);
/// let p2 = PointN([3, 4]);
///
/// assert_eq!(p1 + p2, PointN([4, 6]));
/// assert_eq!(p1 - p2, PointN([-2, -2]));
/// assert_eq!(p1 * 2, PointN([2, 4]));
/// ```
///
/// There is also a partial order defined on points which says that a point A is less than a point B if and only if all of
/// the components of A are less than the corresponding components of B. This is how bounds checks are written:
///
/// ```
/// use image_blocks_core::PointN;
///
/// let min = PointN([0, 0, 0]);
/// let least_upper_bound = PointN([3, 3, 3]);
///
/// let p = PointN([0, 1, 2]);
/// assert!(min <= p && p < least_upper_bound);
/// ```
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct PointN<const D: usize>(pub [i32; D]);

/// A 1-dimensional point.
pub type Point1i = PointN<1>;
/// A 2-dimensional point.
pub type Point2i = PointN<2>;
/// A 3-dimensional point.
pub type Point3i = PointN<3>;

impl<const D: usize> PointN<D> {
    /// The origin.
    pub const ZERO: Self = PointN([0; D]);
    /// A point of all ones.
    pub const ONES: Self = PointN([1; D]);

    /// A point with every component equal to `value`.
    #[inline]
    pub const fn fill(value: i32) -> Self {
        PointN([value; D])
    }

    /// The number of dimensions.
    #[inline]
    pub const fn rank(&self) -> usize {
        D
    }

    /// Returns the component on `axis`. I.e. X = 0, Y = 1, Z = 2.
    #[inline]
    pub fn at(&self, axis: usize) -> i32 {
        self.0[axis]
    }

    /// Returns the point after applying `f` component-wise.
    #[inline]
    pub fn map_components_unary(&self, f: impl Fn(i32) -> i32) -> Self {
        let mut out = *self;
        for c in out.0.iter_mut() {
            *c = f(*c);
        }

        out
    }

    /// Returns the point after applying `f` component-wise to both `self` and `other` in parallel.
    #[inline]
    pub fn map_components_binary(&self, other: &Self, f: impl Fn(i32, i32) -> i32) -> Self {
        let mut out = *self;
        for (c, o) in out.0.iter_mut().zip(other.0.iter()) {
            *c = f(*c, *o);
        }

        out
    }

    #[inline]
    fn all_components(&self, other: &Self, f: impl Fn(i32, i32) -> bool) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| f(*a, *b))
    }

    /// The product of all components. Computed in 64 bits so large shapes don't overflow.
    #[inline]
    pub fn volume(&self) -> i64 {
        self.0.iter().map(|c| *c as i64).product()
    }

    /// The vector dot product.
    #[inline]
    pub fn dot(&self, other: &Self) -> i64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| *a as i64 * *b as i64)
            .sum()
    }

    /// The square of the L2 (Euclidean) distance between points.
    #[inline]
    pub fn l2_distance_squared(&self, other: &Self) -> i64 {
        let diff = *self - *other;

        diff.dot(&diff)
    }

    /// The L-infinity distance between points, i.e. the greatest per-axis difference.
    #[inline]
    pub fn chebyshev_distance(&self, other: &Self) -> i32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .max()
            .unwrap_or(0)
    }

    /// Component-wise maximum.
    #[inline]
    pub fn join(&self, other: &Self) -> Self {
        self.map_components_binary(other, i32::max)
    }

    /// Component-wise minimum.
    #[inline]
    pub fn meet(&self, other: &Self) -> Self {
        self.map_components_binary(other, i32::min)
    }

    /// Component-wise division that rounds towards negative infinity, unlike `/` on `i32`.
    #[inline]
    pub fn vector_div_floor(&self, rhs: &Self) -> Self {
        self.map_components_binary(rhs, |c1, c2| Integer::div_floor(&c1, &c2))
    }

    #[inline]
    pub fn scalar_div_floor(&self, rhs: i32) -> Self {
        self.map_components_unary(|c| Integer::div_floor(&c, &rhs))
    }

    /// Component-wise remainder of `vector_div_floor`, always in `[0, rhs)` for positive `rhs`.
    #[inline]
    pub fn vector_mod_floor(&self, rhs: &Self) -> Self {
        self.map_components_binary(rhs, |c1, c2| Integer::mod_floor(&c1, &c2))
    }

    #[inline]
    pub fn scalar_mod_floor(&self, rhs: i32) -> Self {
        self.map_components_unary(|c| Integer::mod_floor(&c, &rhs))
    }

    /// Returns a copy with the components on axes `a` and `b` exchanged.
    #[inline]
    pub fn swap_axes(&self, a: usize, b: usize) -> Self {
        let mut out = *self;
        out.0.swap(a, b);

        out
    }

    /// Returns `true` iff all components are equal.
    #[inline]
    pub fn is_cube(&self) -> bool {
        self.0.windows(2).all(|w| w[0] == w[1])
    }

    /// Copies the components into a `Vec`, for reporting points whose dimension is erased.
    #[inline]
    pub fn to_vec(&self) -> Vec<i32> {
        self.0.to_vec()
    }
}

impl<const D: usize> Default for PointN<D> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const D: usize> From<[i32; D]> for PointN<D> {
    #[inline]
    fn from(components: [i32; D]) -> Self {
        PointN(components)
    }
}

impl<const D: usize> Index<usize> for PointN<D> {
    type Output = i32;

    #[inline]
    fn index(&self, axis: usize) -> &i32 {
        &self.0[axis]
    }
}

impl<const D: usize> IndexMut<usize> for PointN<D> {
    #[inline]
    fn index_mut(&mut self, axis: usize) -> &mut i32 {
        &mut self.0[axis]
    }
}

impl<const D: usize> Add for PointN<D> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 + c2)
    }
}

impl<const D: usize> Sub for PointN<D> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.map_components_binary(&rhs, |c1, c2| c1 - c2)
    }
}

impl<const D: usize> Neg for PointN<D> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl<const D: usize> Mul<i32> for PointN<D> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        self.map_components_unary(|c| rhs * c)
    }
}

impl<const D: usize> AddAssign for PointN<D> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const D: usize> SubAssign for PointN<D> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

// This particular partial order allows us to say that an extent e contains a point p iff p is GEQ the minimum of e and p is
// LT the least upper bound of e.
impl<const D: usize> PartialOrd for PointN<D> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self <= other {
            Some(Ordering::Less)
        } else if self >= other {
            Some(Ordering::Greater)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.all_components(other, |a, b| a < b)
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.all_components(other, |a, b| a > b)
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.all_components(other, |a, b| a <= b)
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.all_components(other, |a, b| a >= b)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
