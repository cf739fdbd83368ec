mod dielectric;
mod diffuse_light;
mod isotropic;
mod lambert;
mod metal;
pub mod util;

pub use dielectric::*;
pub use diffuse_light::*;
pub use isotropic::*;
pub use lambert::*;
pub use metal::*;

use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::pdf::CosinePdf;

/// How a scattered ray should be continued. Specular interactions fix the
/// outgoing ray; diffuse ones hand the integrator a density to sample
/// from, so light sampling can be mixed in.
pub enum ScatterKind {
    Specular(Ray),
    Diffuse(CosinePdf),
}

pub struct ScatterRecord {
    pub attenuation: Color,
    pub kind: ScatterKind,
}

#[enum_dispatch::enum_dispatch(Material)]
pub trait MaterialT: Send + Sync {
    /// `None` means the path ends here (absorption or pure emission).
    fn scatter(&self, ray: &Ray, inter: &Intersection, rng: &mut Rng) -> Option<ScatterRecord>;

    fn emitted(&self, ray: &Ray, inter: &Intersection) -> Color;

    /// Density of the material's own scattering lobe for an already chosen
    /// direction. Used to weight samples drawn from a different density.
    fn scattering_pdf(&self, ray: &Ray, inter: &Intersection, scattered: &Ray) -> f32;
}

#[enum_dispatch::enum_dispatch]
#[derive(Debug)]
pub enum Material {
    Lambert,
    Metal,
    Dielectric,
    DiffuseLight,
    Isotropic,
}
