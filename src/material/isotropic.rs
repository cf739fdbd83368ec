use std::sync::Arc;

use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::{MaterialT, ScatterKind, ScatterRecord};
use crate::texture::{Texture, TextureT};

/// Phase function of a constant-density medium: scatters uniformly in all
/// directions.
#[derive(Debug)]
pub struct Isotropic {
    albedo: Arc<Texture>,
}

impl Isotropic {
    pub fn new(albedo: Arc<Texture>) -> Self {
        Self { albedo }
    }
}

impl MaterialT for Isotropic {
    fn scatter(&self, ray: &Ray, inter: &Intersection, rng: &mut Rng) -> Option<ScatterRecord> {
        Some(ScatterRecord {
            attenuation: self.albedo.value(inter.texcoords, inter.position),
            kind: ScatterKind::Specular(Ray::new(
                inter.position,
                rng.uniform_on_sphere(),
                ray.time,
            )),
        })
    }

    fn emitted(&self, _ray: &Ray, _inter: &Intersection) -> Color {
        Color::BLACK
    }

    fn scattering_pdf(&self, _ray: &Ray, _inter: &Intersection, _scattered: &Ray) -> f32 {
        0.0
    }
}
