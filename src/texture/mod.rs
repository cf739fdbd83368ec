mod checker;
mod image_tex;
mod noise;
mod scalar;

pub use checker::*;
pub use image_tex::*;
pub use noise::*;
pub use scalar::*;

use crate::core::color::Color;

#[enum_dispatch::enum_dispatch(Texture)]
pub trait TextureT: Send + Sync {
    fn value(&self, texcoords: glam::Vec2, position: glam::Vec3A) -> Color;
}

#[enum_dispatch::enum_dispatch]
#[derive(Debug)]
pub enum Texture {
    SolidColor,
    CheckerTex,
    NoiseTex,
    ImageTex,
}
