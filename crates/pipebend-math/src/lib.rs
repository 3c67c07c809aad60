pub mod plane;
pub mod ray;

pub use glam::{dvec3, DVec3};
pub use plane::Plane;
pub use ray::Ray;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
