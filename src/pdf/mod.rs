use crate::core::onb::Onb;
use crate::core::rng::Rng;
use crate::primitive::{Primitive, PrimitiveT};

/// Directional density used by the integrator when choosing a scattered
/// direction.
pub enum Pdf<'a> {
    Cosine(CosinePdf),
    Shape(ShapePdf<'a>),
}

impl Pdf<'_> {
    pub fn value(&self, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        match self {
            Pdf::Cosine(pdf) => pdf.value(direction),
            Pdf::Shape(pdf) => pdf.value(direction, rng),
        }
    }

    pub fn generate(&self, rng: &mut Rng) -> glam::Vec3A {
        match self {
            Pdf::Cosine(pdf) => pdf.generate(rng),
            Pdf::Shape(pdf) => pdf.generate(rng),
        }
    }
}

/// Cosine-weighted hemisphere density around a surface normal,
/// `cos(theta) / pi` above the horizon and zero below.
pub struct CosinePdf {
    onb: Onb,
}

impl CosinePdf {
    pub fn from_w(w: glam::Vec3A) -> Self {
        Self {
            onb: Onb::from_w(w),
        }
    }

    pub fn value(&self, direction: glam::Vec3A) -> f32 {
        let cosine = direction.normalize().dot(self.onb.w());
        (cosine / std::f32::consts::PI).max(0.0)
    }

    pub fn generate(&self, rng: &mut Rng) -> glam::Vec3A {
        self.onb.local(rng.cosine_weighted_on_hemisphere())
    }
}

/// Density of sampling a shape's surface by solid angle from a fixed
/// origin.
pub struct ShapePdf<'a> {
    shape: &'a Primitive,
    origin: glam::Vec3A,
}

impl<'a> ShapePdf<'a> {
    pub fn new(shape: &'a Primitive, origin: glam::Vec3A) -> Self {
        Self { shape, origin }
    }

    pub fn value(&self, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        self.shape.pdf(self.origin, direction, rng)
    }

    pub fn generate(&self, rng: &mut Rng) -> glam::Vec3A {
        self.shape.sample_direction(self.origin, rng)
    }
}

/// Even mixture of two densities. Sampling flips a fair coin between the
/// components, so the combined density is the average of both.
pub struct MixturePdf<'a, 'b> {
    p0: &'a Pdf<'b>,
    p1: &'a Pdf<'b>,
}

impl<'a, 'b> MixturePdf<'a, 'b> {
    pub fn new(p0: &'a Pdf<'b>, p1: &'a Pdf<'b>) -> Self {
        Self { p0, p1 }
    }

    pub fn value(&self, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        0.5 * self.p0.value(direction, rng) + 0.5 * self.p1.value(direction, rng)
    }

    pub fn generate(&self, rng: &mut Rng) -> glam::Vec3A {
        if rng.uniform_1d() < 0.5 {
            self.p0.generate(rng)
        } else {
            self.p1.generate(rng)
        }
    }
}

/// Uniform direction within the cone subtended by a sphere of `radius` at
/// `distance_squared`, expressed in a z-up frame pointing at the sphere.
pub fn random_to_sphere(radius: f32, distance_squared: f32, rng: &mut Rng) -> glam::Vec3A {
    let (rand_x, rand_y) = rng.uniform_2d();
    let cos_theta_max = (1.0 - radius * radius / distance_squared).max(0.0).sqrt();
    let z = 1.0 + rand_y * (cos_theta_max - 1.0);
    let phi = 2.0 * std::f32::consts::PI * rand_x;
    let sin_theta = (1.0 - z * z).max(0.0).sqrt();
    glam::Vec3A::new(phi.cos() * sin_theta, phi.sin() * sin_theta, z)
}
