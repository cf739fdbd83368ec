use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;

use crate::core::color::Color;
use crate::texture::TextureT;

/// Image-backed texture sampled with nearest-neighbor lookup. `v = 0` is
/// the bottom of the image.
#[derive(Debug)]
pub struct ImageTex {
    image: RgbImage,
}

impl ImageTex {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .context(format!(
                "texture: can't open image file '{}'",
                path.display()
            ))?
            .to_rgb8();
        Ok(Self { image })
    }
}

impl TextureT for ImageTex {
    fn value(&self, texcoords: glam::Vec2, _position: glam::Vec3A) -> Color {
        let u = texcoords.x.clamp(0.0, 1.0);
        let v = 1.0 - texcoords.y.clamp(0.0, 1.0);
        let x = ((u * self.image.width() as f32) as u32).min(self.image.width() - 1);
        let y = ((v * self.image.height() as f32) as u32).min(self.image.height() - 1);
        let pixel = self.image.get_pixel(x, y);
        let scale = 1.0 / 255.0;
        Color::new(
            pixel[0] as f32 * scale,
            pixel[1] as f32 * scale,
            pixel[2] as f32 * scale,
        )
    }
}
