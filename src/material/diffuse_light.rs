use std::sync::Arc;

use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::{MaterialT, ScatterRecord};
use crate::texture::{Texture, TextureT};

/// Emissive material. Radiance leaves the front face only; combined with
/// `FlipFace` this gives one-sided lights.
#[derive(Debug)]
pub struct DiffuseLight {
    emit: Arc<Texture>,
}

impl DiffuseLight {
    pub fn new(emit: Arc<Texture>) -> Self {
        Self { emit }
    }
}

impl MaterialT for DiffuseLight {
    fn scatter(&self, _ray: &Ray, _inter: &Intersection, _rng: &mut Rng) -> Option<ScatterRecord> {
        None
    }

    fn emitted(&self, _ray: &Ray, inter: &Intersection) -> Color {
        if inter.front_face {
            self.emit.value(inter.texcoords, inter.position)
        } else {
            Color::BLACK
        }
    }

    fn scattering_pdf(&self, _ray: &Ray, _inter: &Intersection, _scattered: &Ray) -> f32 {
        0.0
    }
}
