use std::sync::Arc;

use crate::core::bbox::Bbox;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::{Isotropic, Material};
use crate::primitive::{Primitive, PrimitiveT};
use crate::texture::Texture;

/// Participating medium of constant density inside a boundary shape.
/// Scattering happens at an exponentially distributed depth along the ray;
/// if the sampled depth exceeds the chord through the boundary the ray
/// passes through unscattered.
#[derive(Debug)]
pub struct ConstantMedium {
    boundary: Arc<Primitive>,
    neg_inv_density: f32,
    phase_function: Arc<Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<Primitive>, density: f32, albedo: Arc<Texture>) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function: Arc::new(Material::from(Isotropic::new(albedo))),
        }
    }
}

impl PrimitiveT for ConstantMedium {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, rng: &mut Rng) -> bool {
        // entry point, searching the whole line so rays starting inside work
        let all_t = Ray {
            t_min: f32::NEG_INFINITY,
            ..*ray
        };
        let mut enter = Intersection::default();
        if !self.boundary.intersect(&all_t, &mut enter, rng) {
            return false;
        }

        // exit point, strictly after the entry
        let past_enter = Ray {
            t_min: enter.t + 0.0001,
            ..*ray
        };
        let mut exit = Intersection::default();
        if !self.boundary.intersect(&past_enter, &mut exit, rng) {
            return false;
        }

        let mut t_enter = enter.t.max(ray.t_min);
        let t_exit = exit.t.min(inter.t);
        if t_enter >= t_exit {
            return false;
        }
        if t_enter < 0.0 {
            t_enter = 0.0;
        }

        let ray_length = ray.direction.length();
        let distance_inside = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * rng.uniform_1d().ln();
        if hit_distance > distance_inside {
            return false;
        }

        inter.t = t_enter + hit_distance / ray_length;
        inter.position = ray.point_at(inter.t);
        // arbitrary; the isotropic phase function ignores both
        inter.normal = glam::Vec3A::X;
        inter.front_face = true;
        inter.material = Some(self.phase_function.clone());
        true
    }

    fn bbox(&self, time0: f32, time1: f32) -> Bbox {
        self.boundary.bbox(time0, time1)
    }

    fn pdf(&self, _origin: glam::Vec3A, _direction: glam::Vec3A, _rng: &mut Rng) -> f32 {
        0.0
    }

    fn sample_direction(&self, _origin: glam::Vec3A, _rng: &mut Rng) -> glam::Vec3A {
        glam::Vec3A::X
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::material::Lambert;
    use crate::primitive::Sphere;
    use crate::texture::SolidColor;

    fn foggy_sphere(density: f32) -> ConstantMedium {
        let material = Arc::new(Material::from(Lambert::new(Arc::new(Texture::from(
            SolidColor::new(Color::gray(0.5)),
        )))));
        let boundary = Arc::new(Primitive::from(Sphere::new(
            glam::Vec3A::ZERO,
            1.0,
            material,
        )));
        ConstantMedium::new(boundary, density, Arc::new(Texture::from(SolidColor::new(
            Color::WHITE,
        ))))
    }

    #[test]
    fn dense_medium_scatters_inside_the_boundary() {
        let medium = foggy_sphere(1e4);
        let mut rng = Rng::from_seed(21);
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, 5.0), -glam::Vec3A::Z, 0.0);

        let mut inter = Intersection::default();
        assert!(medium.intersect(&ray, &mut inter, &mut rng));
        assert!(inter.t >= 4.0 && inter.t <= 6.0);
        assert!(inter.position.length() <= 1.0 + 1e-3);
    }

    #[test]
    fn thin_medium_mostly_passes_rays_through() {
        let medium = foggy_sphere(1e-4);
        let mut rng = Rng::from_seed(22);
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, 5.0), -glam::Vec3A::Z, 0.0);

        let mut scattered = 0;
        for _ in 0..128 {
            let mut inter = Intersection::default();
            if medium.intersect(&ray, &mut inter, &mut rng) {
                scattered += 1;
            }
        }
        assert!(scattered < 8);
    }

    #[test]
    fn ray_starting_inside_still_scatters() {
        let medium = foggy_sphere(1e4);
        let mut rng = Rng::from_seed(23);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::X, 0.0);

        let mut inter = Intersection::default();
        assert!(medium.intersect(&ray, &mut inter, &mut rng));
        assert!(inter.t > 0.0 && inter.t <= 1.0);
    }
}
