use std::sync::Arc;

use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::{MaterialT, ScatterKind, ScatterRecord};
use crate::pdf::CosinePdf;
use crate::texture::{Texture, TextureT};

/// Ideal diffuse reflector with a cosine-weighted lobe.
#[derive(Debug)]
pub struct Lambert {
    albedo: Arc<Texture>,
}

impl Lambert {
    pub fn new(albedo: Arc<Texture>) -> Self {
        Self { albedo }
    }
}

impl MaterialT for Lambert {
    fn scatter(&self, _ray: &Ray, inter: &Intersection, _rng: &mut Rng) -> Option<ScatterRecord> {
        Some(ScatterRecord {
            attenuation: self.albedo.value(inter.texcoords, inter.position),
            kind: ScatterKind::Diffuse(CosinePdf::from_w(inter.normal)),
        })
    }

    fn emitted(&self, _ray: &Ray, _inter: &Intersection) -> Color {
        Color::BLACK
    }

    fn scattering_pdf(&self, _ray: &Ray, inter: &Intersection, scattered: &Ray) -> f32 {
        let cosine = inter.normal.dot(scattered.direction.normalize());
        (cosine / std::f32::consts::PI).max(0.0)
    }
}
