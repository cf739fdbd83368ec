use std::sync::Arc;

use crate::core::color::Color;
use crate::texture::{Texture, TextureT};

/// 3D checkerboard. The sign of a product of sines alternates between the
/// two component textures with a period of `pi / 10` world units.
#[derive(Debug)]
pub struct CheckerTex {
    even: Arc<Texture>,
    odd: Arc<Texture>,
}

impl CheckerTex {
    pub fn new(even: Arc<Texture>, odd: Arc<Texture>) -> Self {
        Self { even, odd }
    }
}

impl TextureT for CheckerTex {
    fn value(&self, texcoords: glam::Vec2, position: glam::Vec3A) -> Color {
        let sines =
            (10.0 * position.x).sin() * (10.0 * position.y).sin() * (10.0 * position.z).sin();
        if sines < 0.0 {
            self.odd.value(texcoords, position)
        } else {
            self.even.value(texcoords, position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::SolidColor;

    #[test]
    fn adjacent_cells_alternate() {
        let checker = CheckerTex::new(
            Arc::new(Texture::from(SolidColor::new(Color::WHITE))),
            Arc::new(Texture::from(SolidColor::new(Color::BLACK))),
        );
        let cell = std::f32::consts::PI / 10.0;
        let uv = glam::Vec2::ZERO;
        let a = checker.value(uv, glam::Vec3A::splat(0.5 * cell));
        let b = checker.value(uv, glam::Vec3A::new(1.5 * cell, 0.5 * cell, 0.5 * cell));
        assert_ne!(a, b);
    }
}
