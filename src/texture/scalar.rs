use crate::core::color::Color;
use crate::texture::TextureT;

#[derive(Debug)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl TextureT for SolidColor {
    fn value(&self, _texcoords: glam::Vec2, _position: glam::Vec3A) -> Color {
        self.color
    }
}
