use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::util::{reflect, refract, schlick};
use crate::material::{MaterialT, ScatterKind, ScatterRecord};

/// Clear dielectric such as glass or water. Chooses between reflection
/// and refraction per sample using Schlick's reflectance, and always
/// reflects past the critical angle.
#[derive(Debug)]
pub struct Dielectric {
    refraction_index: f32,
}

impl Dielectric {
    pub fn new(refraction_index: f32) -> Self {
        Self { refraction_index }
    }
}

impl MaterialT for Dielectric {
    fn scatter(&self, ray: &Ray, inter: &Intersection, rng: &mut Rng) -> Option<ScatterRecord> {
        let refraction_ratio = if inter.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray.direction.normalize();
        let cos_theta = (-unit_direction).dot(inter.normal).clamp(-1.0, 1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let direction = if cannot_refract || schlick(cos_theta, refraction_ratio) > rng.uniform_1d()
        {
            reflect(unit_direction, inter.normal)
        } else {
            refract(unit_direction, inter.normal, refraction_ratio)
        };

        Some(ScatterRecord {
            attenuation: Color::WHITE,
            kind: ScatterKind::Specular(Ray::new(inter.position, direction, ray.time)),
        })
    }

    fn emitted(&self, _ray: &Ray, _inter: &Intersection) -> Color {
        Color::BLACK
    }

    fn scattering_pdf(&self, _ray: &Ray, _inter: &Intersection, _scattered: &Ray) -> f32 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scatter_direction(material: &Dielectric, incoming: Ray, front_face: bool, seed: u64) -> glam::Vec3A {
        let mut rng = Rng::from_seed(seed);
        let mut inter = Intersection::default();
        inter.normal = glam::Vec3A::Y;
        inter.front_face = front_face;
        let record = material.scatter(&incoming, &inter, &mut rng).unwrap();
        match record.kind {
            ScatterKind::Specular(scattered) => scattered.direction,
            ScatterKind::Diffuse(_) => unreachable!(),
        }
    }

    #[test]
    fn total_internal_reflection_past_the_critical_angle() {
        // from inside glass at a grazing angle every sample must reflect
        let material = Dielectric::new(1.5);
        let incoming = Ray::new(
            glam::Vec3A::ZERO,
            glam::Vec3A::new(0.9, -0.2, 0.0).normalize(),
            0.0,
        );
        for seed in 0..16 {
            let direction = scatter_direction(&material, incoming, false, seed);
            assert!(direction.y > 0.0);
        }
    }

    #[test]
    fn near_normal_incidence_mostly_refracts() {
        let material = Dielectric::new(1.5);
        let incoming = Ray::new(glam::Vec3A::ZERO, -glam::Vec3A::Y, 0.0);
        let mut refracted = 0;
        for seed in 0..64 {
            let direction = scatter_direction(&material, incoming, true, seed);
            if direction.y < 0.0 {
                refracted += 1;
            }
        }
        // reflectance at normal incidence is about 4 percent
        assert!(refracted > 48);
    }
}
