use crate::math::{Point, Real};

/// Operations shared by the boxes stored in tree nodes.
///
/// Tree builders only need to merge boxes and test their overlap or inclusion; the box layout
/// itself (full precision, quantized, oriented) is up to the implementor.
pub trait BoundingVolume {
    /// A point inside of this volume, ideally its center.
    fn center(&self) -> Point<Real>;

    /// Do these two volumes overlap? Touching volumes overlap.
    fn intersects(&self, other: &Self) -> bool;

    /// Is `other` fully inside of this volume?
    fn contains(&self, other: &Self) -> bool;

    /// Grows this volume in place so that it also encloses `other`.
    fn merge(&mut self, other: &Self);

    /// The smallest volume enclosing both `self` and `other`.
    fn merged(&self, other: &Self) -> Self;
}
