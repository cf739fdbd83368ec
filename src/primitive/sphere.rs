use std::sync::Arc;

use crate::core::bbox::Bbox;
use crate::core::intersection::Intersection;
use crate::core::onb::Onb;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::Material;
use crate::pdf::random_to_sphere;
use crate::primitive::PrimitiveT;

#[derive(Debug)]
pub struct Sphere {
    center: glam::Vec3A,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: glam::Vec3A, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// Spherical texture coordinates of a unit-sphere point: `u` wraps around
/// the y axis, `v` runs from the south to the north pole.
pub fn sphere_uv(p: glam::Vec3A) -> glam::Vec2 {
    let theta = (-p.y).clamp(-1.0, 1.0).acos();
    let phi = (-p.z).atan2(p.x) + std::f32::consts::PI;
    glam::Vec2::new(
        phi / (2.0 * std::f32::consts::PI),
        theta / std::f32::consts::PI,
    )
}

impl PrimitiveT for Sphere {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, _rng: &mut Rng) -> bool {
        let oc = ray.origin - self.center;
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
        let outward_normal = (inter.position - self.center) / self.radius;
        inter.set_face_normal(ray, outward_normal);
        inter.texcoords = sphere_uv(outward_normal);
        inter.material = Some(self.material.clone());
        true
    }

    fn bbox(&self, _time0: f32, _time1: f32) -> Bbox {
        let extent = glam::Vec3A::splat(self.radius);
        Bbox::new(self.center - extent, self.center + extent)
    }

    fn pdf(&self, origin: glam::Vec3A, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        let ray = Ray::new(origin, direction, 0.0);
        let mut inter = Intersection::default();
        if !self.intersect(&ray, &mut inter, rng) {
            return 0.0;
        }

        let cos_theta_max = (1.0
            - self.radius * self.radius / (self.center - origin).length_squared())
        .max(0.0)
        .sqrt();
        let solid_angle = 2.0 * std::f32::consts::PI * (1.0 - cos_theta_max);
        1.0 / solid_angle
    }

    fn sample_direction(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        let to_center = self.center - origin;
        let onb = Onb::from_w(to_center.normalize());
        onb.local(random_to_sphere(
            self.radius,
            to_center.length_squared(),
            rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::material::Lambert;
    use crate::texture::{SolidColor, Texture};

    fn dummy_material() -> Arc<Material> {
        Arc::new(Material::from(Lambert::new(Arc::new(Texture::from(
            SolidColor::new(Color::gray(0.5)),
        )))))
    }

    #[test]
    fn axis_ray_hits_unit_sphere_at_t4() {
        let sphere = Sphere::new(glam::Vec3A::new(0.0, 0.0, -5.0), 1.0, dummy_material());
        let ray = Ray::new(glam::Vec3A::ZERO, -glam::Vec3A::Z, 0.0);
        let mut inter = Intersection::default();
        let mut rng = Rng::from_seed(1);

        assert!(sphere.intersect(&ray, &mut inter, &mut rng));
        assert!((inter.t - 4.0).abs() < 1e-5);
        assert!(inter.front_face);
        assert!((inter.normal - glam::Vec3A::Z).length() < 1e-5);
    }

    #[test]
    fn second_root_is_used_from_inside() {
        let sphere = Sphere::new(glam::Vec3A::ZERO, 1.0, dummy_material());
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::X, 0.0);
        let mut inter = Intersection::default();
        let mut rng = Rng::from_seed(1);

        assert!(sphere.intersect(&ray, &mut inter, &mut rng));
        assert!((inter.t - 1.0).abs() < 1e-5);
        assert!(!inter.front_face);
    }

    #[test]
    fn hit_beyond_t_max_is_rejected() {
        let sphere = Sphere::new(glam::Vec3A::new(0.0, 0.0, -5.0), 1.0, dummy_material());
        let ray = Ray::new(glam::Vec3A::ZERO, -glam::Vec3A::Z, 0.0);
        let mut inter = Intersection::with_t_max(3.5);
        let mut rng = Rng::from_seed(1);

        assert!(!sphere.intersect(&ray, &mut inter, &mut rng));
        assert!((inter.t - 3.5).abs() < 1e-6);
    }

    #[test]
    fn uv_poles_and_seam() {
        let uv = sphere_uv(glam::Vec3A::new(0.0, -1.0, 0.0));
        assert!(uv.y.abs() < 1e-5);
        let uv = sphere_uv(glam::Vec3A::new(0.0, 1.0, 0.0));
        assert!((uv.y - 1.0).abs() < 1e-5);
        let uv = sphere_uv(glam::Vec3A::new(-1.0, 0.0, 0.0));
        assert!(uv.x.abs() < 1e-5 || (uv.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn sampled_directions_reach_the_sphere() {
        let sphere = Sphere::new(glam::Vec3A::new(0.0, 3.0, 0.0), 1.0, dummy_material());
        let mut rng = Rng::from_seed(42);
        for _ in 0..64 {
            let dir = sphere.sample_direction(glam::Vec3A::ZERO, &mut rng);
            let pdf = sphere.pdf(glam::Vec3A::ZERO, dir, &mut rng);
            assert!(pdf > 0.0);
        }
    }
}
