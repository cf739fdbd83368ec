use crate::core::color::Color;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::material::{MaterialT, ScatterKind};
use crate::pdf::{MixturePdf, Pdf, ShapePdf};
use crate::primitive::PrimitiveT;

/// Recursive path integrator. Diffuse bounces importance-sample an even
/// mixture of the material lobe and the scene's light list, weighting each
/// sample by `lobe_density / sample_density`.
#[derive(Debug)]
pub struct PathTracer {
    max_depth: u32,
}

impl PathTracer {
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    pub fn trace_ray(&self, scene: &Scene, ray: &Ray, rng: &mut Rng) -> Color {
        self.ray_color(scene, ray, self.max_depth, rng)
    }

    fn ray_color(&self, scene: &Scene, ray: &Ray, depth: u32, rng: &mut Rng) -> Color {
        if depth == 0 {
            return Color::BLACK;
        }

        let mut inter = Intersection::default();
        if !scene.aggregate.intersect(ray, &mut inter, rng) {
            return scene.background.radiance(ray.direction);
        }

        let material = match inter.material.clone() {
            Some(material) => material,
            None => return Color::BLACK,
        };

        let emitted = material.emitted(ray, &inter);
        let record = match material.scatter(ray, &inter, rng) {
            Some(record) => record,
            None => return emitted,
        };

        match record.kind {
            ScatterKind::Specular(specular) => {
                emitted
                    + record.attenuation * self.ray_color(scene, &specular, depth - 1, rng)
            }
            ScatterKind::Diffuse(lobe) => {
                let surface = Pdf::Cosine(lobe);
                let (direction, density) = match &scene.lights {
                    Some(lights) => {
                        let lights = Pdf::Shape(ShapePdf::new(lights, inter.position));
                        let mixture = MixturePdf::new(&lights, &surface);
                        let direction = mixture.generate(rng);
                        let density = mixture.value(direction, rng);
                        (direction, density)
                    }
                    None => {
                        let direction = surface.generate(rng);
                        (direction, surface.value(direction, rng))
                    }
                };
                if density <= 0.0 {
                    return emitted;
                }

                let scattered = Ray::new(inter.position, direction, ray.time);
                let lobe_density = material.scattering_pdf(ray, &inter, &scattered);
                emitted
                    + record.attenuation
                        * (lobe_density / density)
                        * self.ray_color(scene, &scattered, depth - 1, rng)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Background;
    use crate::material::{DiffuseLight, Material};
    use crate::primitive::{AaRect, BvhAccel, Primitive, RectAxis};
    use crate::texture::{SolidColor, Texture};
    use std::sync::Arc;

    fn empty_scene(background: Background) -> Scene {
        let aggregate = Arc::new(Primitive::from(
            BvhAccel::new(Vec::new(), 0.0, 1.0).unwrap(),
        ));
        Scene::new(aggregate, None, background)
    }

    #[test]
    fn escaped_rays_return_the_background() {
        let scene = empty_scene(Background::Gradient {
            horizon: Color::WHITE,
            zenith: Color::new(0.5, 0.7, 1.0),
        });
        let tracer = PathTracer::new(8);
        let mut rng = Rng::from_seed(81);

        let direction = glam::Vec3A::new(0.3, 0.5, -1.0);
        let ray = Ray::new(glam::Vec3A::ZERO, direction, 0.0);
        let expected = scene.background.radiance(direction);
        assert_eq!(tracer.trace_ray(&scene, &ray, &mut rng), expected);
    }

    #[test]
    fn depth_zero_contributes_nothing() {
        let scene = empty_scene(Background::Solid(Color::WHITE));
        let tracer = PathTracer::new(0);
        let mut rng = Rng::from_seed(82);
        let ray = Ray::new(glam::Vec3A::ZERO, -glam::Vec3A::Z, 0.0);
        assert_eq!(tracer.trace_ray(&scene, &ray, &mut rng), Color::BLACK);
    }

    #[test]
    fn light_hit_returns_the_emitted_radiance() {
        let emit = Arc::new(Texture::from(SolidColor::new(Color::new(4.0, 3.0, 2.0))));
        let material = Arc::new(Material::from(DiffuseLight::new(emit)));
        let panel = Arc::new(Primitive::from(AaRect::new(
            RectAxis::Xy,
            -1.0,
            1.0,
            -1.0,
            1.0,
            -2.0,
            material,
        )));
        let aggregate = Arc::new(Primitive::from(
            BvhAccel::new(vec![panel], 0.0, 1.0).unwrap(),
        ));
        let scene = Scene::new(aggregate, None, Background::Solid(Color::BLACK));

        let tracer = PathTracer::new(8);
        let mut rng = Rng::from_seed(83);
        let ray = Ray::new(glam::Vec3A::ZERO, -glam::Vec3A::Z, 0.0);
        assert_eq!(
            tracer.trace_ray(&scene, &ray, &mut rng),
            Color::new(4.0, 3.0, 2.0)
        );
    }
}
