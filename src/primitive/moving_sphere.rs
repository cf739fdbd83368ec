use std::sync::Arc;

use crate::core::bbox::Bbox;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::Material;
use crate::primitive::sphere::sphere_uv;
use crate::primitive::PrimitiveT;

/// Sphere whose center moves linearly between two key times. The ray's
/// timestamp selects the center, which is what produces motion blur once
/// the camera jitters timestamps across the shutter interval.
#[derive(Debug)]
pub struct MovingSphere {
    center0: glam::Vec3A,
    center1: glam::Vec3A,
    time0: f32,
    time1: f32,
    radius: f32,
    material: Arc<Material>,
}

impl MovingSphere {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        center0: glam::Vec3A,
        center1: glam::Vec3A,
        time0: f32,
        time1: f32,
        radius: f32,
        material: Arc<Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        }
    }

    fn center(&self, time: f32) -> glam::Vec3A {
        if (self.time1 - self.time0).abs() < f32::EPSILON {
            return self.center0;
        }
        self.center0
            + ((time - self.time0) / (self.time1 - self.time0)) * (self.center1 - self.center0)
    }
}

impl PrimitiveT for MovingSphere {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, _rng: &mut Rng) -> bool {
        let center = self.center(ray.time);
        let oc = ray.origin - center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrt_d = discriminant.sqrt();
        let mut t = (-half_b - sqrt_d) / a;
        if t <= ray.t_min {
            t = (-half_b + sqrt_d) / a;
        }
        if t <= ray.t_min || t >= inter.t {
            return false;
        }

        inter.t = t;
        inter.position = ray.point_at(t);
        let outward_normal = (inter.position - center) / self.radius;
        inter.set_face_normal(ray, outward_normal);
        inter.texcoords = sphere_uv(outward_normal);
        inter.material = Some(self.material.clone());
        true
    }

    fn bbox(&self, time0: f32, time1: f32) -> Bbox {
        let extent = glam::Vec3A::splat(self.radius);
        let c0 = self.center(time0);
        let c1 = self.center(time1);
        Bbox::new(c0 - extent, c0 + extent).merge(Bbox::new(c1 - extent, c1 + extent))
    }

    fn pdf(&self, _origin: glam::Vec3A, _direction: glam::Vec3A, _rng: &mut Rng) -> f32 {
        0.0
    }

    fn sample_direction(&self, _origin: glam::Vec3A, _rng: &mut Rng) -> glam::Vec3A {
        glam::Vec3A::X
    }
}
