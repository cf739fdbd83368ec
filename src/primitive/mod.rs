mod box_shape;
mod bvh;
mod group;
mod medium;
mod moving_sphere;
mod rect;
mod sphere;
mod transform;

pub use box_shape::*;
pub use bvh::*;
pub use group::*;
pub use medium::*;
pub use moving_sphere::*;
pub use rect::*;
pub use sphere::*;
pub use transform::*;

use crate::core::bbox::Bbox;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;

/// The intersectable capability shared by every shape and combinator.
///
/// `intersect` reports the nearest hit inside `(ray.t_min, inter.t)` and
/// tightens `inter` in place; `bbox` must be valid over the whole shutter
/// interval. `pdf`/`sample_direction` exist for shapes that can serve as
/// importance-sampling targets; other shapes report a zero density.
///
/// The `rng` parameter is part of the contract because the constant-density
/// medium intersects probabilistically.
#[enum_dispatch::enum_dispatch(Primitive)]
pub trait PrimitiveT: Send + Sync {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, rng: &mut Rng) -> bool;

    fn bbox(&self, time0: f32, time1: f32) -> Bbox;

    /// Solid-angle density of reaching this shape from `origin` along
    /// `direction`.
    fn pdf(&self, origin: glam::Vec3A, direction: glam::Vec3A, rng: &mut Rng) -> f32;

    /// A direction from `origin` toward a uniformly sampled point on this
    /// shape.
    fn sample_direction(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A;
}

#[enum_dispatch::enum_dispatch]
#[derive(Debug)]
pub enum Primitive {
    Sphere,
    MovingSphere,
    AaRect,
    BoxShape,
    Translate,
    RotateY,
    FlipFace,
    ConstantMedium,
    Group,
    BvhAccel,
}
