use crate::core::color::Color;
use crate::core::rng::Rng;
use crate::texture::TextureT;

const POINT_COUNT: usize = 256;

/// Gradient Perlin noise with a turbulence accumulator.
#[derive(Debug)]
pub struct Perlin {
    ranvec: Vec<glam::Vec3A>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    fn new(rng: &mut Rng) -> Self {
        let ranvec = (0..POINT_COUNT)
            .map(|_| {
                glam::Vec3A::new(
                    rng.uniform_range(-1.0, 1.0),
                    rng.uniform_range(-1.0, 1.0),
                    rng.uniform_range(-1.0, 1.0),
                )
                .normalize()
            })
            .collect();
        Self {
            ranvec,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    pub fn noise(&self, p: glam::Vec3A) -> f32 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();
        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;

        let mut accum = 0.0;
        for di in 0..2 {
            for dj in 0..2 {
                for dk in 0..2 {
                    let gradient = self.ranvec[self.perm_x[((i + di) & 255) as usize]
                        ^ self.perm_y[((j + dj) & 255) as usize]
                        ^ self.perm_z[((k + dk) & 255) as usize]];
                    let weight =
                        glam::Vec3A::new(u - di as f32, v - dj as f32, w - dk as f32);
                    let (fu, fv, fw) = (smooth(u), smooth(v), smooth(w));
                    accum += (di as f32 * fu + (1 - di) as f32 * (1.0 - fu))
                        * (dj as f32 * fv + (1 - dj) as f32 * (1.0 - fv))
                        * (dk as f32 * fw + (1 - dk) as f32 * (1.0 - fw))
                        * gradient.dot(weight);
                }
            }
        }
        accum
    }

    pub fn turbulence(&self, p: glam::Vec3A, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;
        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }
        accum.abs()
    }
}

fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn generate_perm(rng: &mut Rng) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
    for i in (1..POINT_COUNT).rev() {
        let target = (rng.uniform_1d() * (i + 1) as f32) as usize % (i + 1);
        perm.swap(i, target);
    }
    perm
}

lazy_static::lazy_static! {
    // fixed seed keeps renders reproducible across runs
    static ref PERLIN: Perlin = Perlin::new(&mut Rng::from_seed(0x9e3779b9));
}

/// Marble-like pattern driven by turbulence-perturbed sine bands.
#[derive(Debug)]
pub struct NoiseTex {
    scale: f32,
}

impl NoiseTex {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl TextureT for NoiseTex {
    fn value(&self, _texcoords: glam::Vec2, position: glam::Vec3A) -> Color {
        Color::WHITE
            * 0.5
            * (1.0 + (self.scale * position.z + 10.0 * PERLIN.turbulence(position, 7)).sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_bounded_and_varies() {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for i in 0..1000 {
            let p = glam::Vec3A::splat(i as f32 * 0.173);
            let n = PERLIN.noise(p);
            min = min.min(n);
            max = max.max(n);
        }
        assert!(min >= -1.0 && max <= 1.0);
        assert!(max - min > 0.1);
    }

    #[test]
    fn noise_is_deterministic() {
        let p = glam::Vec3A::new(1.3, -2.7, 0.4);
        assert_eq!(PERLIN.noise(p), PERLIN.noise(p));
    }

    #[test]
    fn texture_values_stay_in_unit_range() {
        let texture = NoiseTex::new(4.0);
        for i in 0..200 {
            let p = glam::Vec3A::new(i as f32 * 0.31, i as f32 * -0.17, i as f32 * 0.05);
            let c = texture.value(glam::Vec2::ZERO, p);
            assert!(c.r >= 0.0 && c.r <= 1.0);
        }
    }
}
