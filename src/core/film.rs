use image::{Rgb, RgbImage};

use crate::core::color::Color;

/// Resolved pixel values. Rows are written whole by the worker that owns
/// them; tone mapping happens only at encode time.
pub struct Film {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set_row(&mut self, y: u32, row: Vec<Color>) {
        debug_assert_eq!(row.len(), self.width as usize);
        let start = (y * self.width) as usize;
        self.pixels[start..start + self.width as usize].copy_from_slice(&row);
    }

    /// Encodes with the square-root tone curve used throughout.
    pub fn to_image(&self) -> RgbImage {
        let mut image = RgbImage::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                image.put_pixel(x, y, color_to_rgb(self.pixel(x, y)));
            }
        }
        image
    }
}

fn color_to_rgb(color: Color) -> Rgb<u8> {
    let r = (256.0 * color.r.max(0.0).sqrt().clamp(0.0, 0.999)) as u8;
    let g = (256.0 * color.g.max(0.0).sqrt().clamp(0.0, 0.999)) as u8;
    let b = (256.0 * color.b.max(0.0).sqrt().clamp(0.0, 0.999)) as u8;
    Rgb([r, g, b])
}
