use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::util::reflect;
use crate::material::{MaterialT, ScatterKind, ScatterRecord};

/// Mirror reflector with an optional fuzz perturbation.
#[derive(Debug)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }
}

impl MaterialT for Metal {
    fn scatter(&self, ray: &Ray, inter: &Intersection, rng: &mut Rng) -> Option<ScatterRecord> {
        let reflected = reflect(ray.direction.normalize(), inter.normal);
        let direction = reflected + self.fuzz * rng.uniform_in_sphere();
        Some(ScatterRecord {
            attenuation: self.albedo,
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
