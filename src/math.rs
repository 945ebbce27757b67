//! Mathematical types and functions.

use cgmath::{EuclideanSpace, Point3, Vector3};

/// A 3D point in world space.
pub type Point3d = Point3<f64>;

/// A 3D vector in world space.
pub type Vector3d = Vector3<f64>;

/// The fixed vertical coordinate of everything in the world.
pub const GROUND_LEVEL: f64 = 0.0;

/// Creates a point on the ground plane.
pub fn ground_point(x: f64, z: f64) -> Point3d {
    Point3d::new(x, GROUND_LEVEL, z)
}

/// Projects a point onto the ground plane and returns it as a vector from the origin.
pub fn horizontal(point: Point3d) -> Vector3d {
    let mut vec = point.to_vec();
    vec.y = 0.0;
    vec
}
