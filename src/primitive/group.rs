use std::sync::Arc;

use crate::core::bbox::Bbox;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::primitive::{Primitive, PrimitiveT};

/// Flat list of primitives, intersected by linear scan. Doubles as the
/// light list: its density is the mean over members and sampling picks a
/// member uniformly.
#[derive(Debug)]
pub struct Group {
    primitives: Vec<Arc<Primitive>>,
}

impl Group {
    pub fn new(primitives: Vec<Arc<Primitive>>) -> Self {
        Self { primitives }
    }
}

impl PrimitiveT for Group {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, rng: &mut Rng) -> bool {
        let mut hit = false;
        for primitive in &self.primitives {
            hit |= primitive.intersect(ray, inter, rng);
        }
        hit
    }

    fn bbox(&self, time0: f32, time1: f32) -> Bbox {
        self.primitives
            .iter()
            .fold(Bbox::empty(), |bbox, primitive| {
                bbox.merge(primitive.bbox(time0, time1))
            })
    }

    fn pdf(&self, origin: glam::Vec3A, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        if self.primitives.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .primitives
            .iter()
            .map(|primitive| primitive.pdf(origin, direction, rng))
            .sum();
        sum / self.primitives.len() as f32
    }

    fn sample_direction(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        if self.primitives.is_empty() {
            return glam::Vec3A::X;
        }
        let index =
            (rng.uniform_1d() * self.primitives.len() as f32) as usize % self.primitives.len();
        self.primitives[index].sample_direction(origin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::material::{Lambert, Material};
    use crate::primitive::Sphere;
    use crate::texture::{SolidColor, Texture};

    fn sphere_at(z: f32) -> Arc<Primitive> {
        let material = Arc::new(Material::from(Lambert::new(Arc::new(Texture::from(
            SolidColor::new(Color::gray(0.5)),
        )))));
        Arc::new(Primitive::from(Sphere::new(
            glam::Vec3A::new(0.0, 0.0, z),
            1.0,
            material,
        )))
    }

    #[test]
    fn nearest_member_wins() {
        let group = Group::new(vec![sphere_at(-10.0), sphere_at(-5.0), sphere_at(-20.0)]);
        let ray = Ray::new(glam::Vec3A::ZERO, -glam::Vec3A::Z, 0.0);
        let mut inter = Intersection::default();
        let mut rng = Rng::from_seed(6);

        assert!(group.intersect(&ray, &mut inter, &mut rng));
        assert!((inter.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn bbox_spans_all_members() {
        let group = Group::new(vec![sphere_at(-10.0), sphere_at(-5.0)]);
        let bbox = group.bbox(0.0, 1.0);
        assert!(bbox.contains_point(glam::Vec3A::new(0.0, 0.0, -11.0)));
        assert!(bbox.contains_point(glam::Vec3A::new(0.0, 0.0, -4.0)));
    }

    #[test]
    fn empty_group_neither_hits_nor_samples() {
        let group = Group::new(Vec::new());
        let ray = Ray::new(glam::Vec3A::ZERO, -glam::Vec3A::Z, 0.0);
        let mut inter = Intersection::default();
        let mut rng = Rng::from_seed(6);

        assert!(!group.intersect(&ray, &mut inter, &mut rng));
        assert_eq!(group.pdf(glam::Vec3A::ZERO, -glam::Vec3A::Z, &mut rng), 0.0);
    }
}
