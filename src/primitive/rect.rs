use std::sync::Arc;

use crate::core::bbox::Bbox;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::Material;
use crate::primitive::PrimitiveT;

/// Which coordinate plane an axis-aligned rectangle lies in.
#[derive(Copy, Clone, PartialEq, Eq)]
#[derive(Debug)]
pub enum RectAxis {
    Xy,
    Xz,
    Yz,
}

impl RectAxis {
    fn normal(self) -> glam::Vec3A {
        match self {
            RectAxis::Xy => glam::Vec3A::Z,
            RectAxis::Xz => glam::Vec3A::Y,
            RectAxis::Yz => glam::Vec3A::X,
        }
    }

    /// Splits a point into (plane coordinate, first in-plane coordinate,
    /// second in-plane coordinate).
    fn decompose(self, p: glam::Vec3A) -> (f32, f32, f32) {
        match self {
            RectAxis::Xy => (p.z, p.x, p.y),
            RectAxis::Xz => (p.y, p.x, p.z),
            RectAxis::Yz => (p.x, p.y, p.z),
        }
    }

    fn compose(self, k: f32, a: f32, b: f32) -> glam::Vec3A {
        match self {
            RectAxis::Xy => glam::Vec3A::new(a, b, k),
            RectAxis::Xz => glam::Vec3A::new(a, k, b),
            RectAxis::Yz => glam::Vec3A::new(k, a, b),
        }
    }
}

/// Axis-aligned rectangle spanning `[a0, a1] x [b0, b1]` in the plane at
/// offset `k`.
#[derive(Debug)]
pub struct AaRect {
    axis: RectAxis,
    a0: f32,
    a1: f32,
    b0: f32,
    b1: f32,
    k: f32,
    material: Arc<Material>,
}

const BBOX_PAD: f32 = 1e-4;

impl AaRect {
    pub fn new(
        axis: RectAxis,
        a0: f32,
        a1: f32,
        b0: f32,
        b1: f32,
        k: f32,
        material: Arc<Material>,
    ) -> Self {
        Self {
            axis,
            a0,
            a1,
            b0,
            b1,
            k,
            material,
        }
    }
}

impl PrimitiveT for AaRect {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, _rng: &mut Rng) -> bool {
        let (orig_k, _, _) = self.axis.decompose(ray.origin);
        let (dir_k, _, _) = self.axis.decompose(ray.direction);
        let t = (self.k - orig_k) / dir_k;
        if !t.is_finite() || t <= ray.t_min || t >= inter.t {
            return false;
        }

        let position = ray.point_at(t);
        let (_, a, b) = self.axis.decompose(position);
        if a < self.a0 || a > self.a1 || b < self.b0 || b > self.b1 {
            return false;
        }

        inter.t = t;
        inter.position = position;
        inter.set_face_normal(ray, self.axis.normal());
        inter.texcoords = glam::Vec2::new(
            (a - self.a0) / (self.a1 - self.a0),
            (b - self.b0) / (self.b1 - self.b0),
        );
        inter.material = Some(self.material.clone());
        true
    }

    fn bbox(&self, _time0: f32, _time1: f32) -> Bbox {
        // padded along the plane normal so the box never degenerates
        Bbox::new(
            self.axis.compose(self.k - BBOX_PAD, self.a0, self.b0),
            self.axis.compose(self.k + BBOX_PAD, self.a1, self.b1),
        )
    }

    fn pdf(&self, origin: glam::Vec3A, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        let ray = Ray::new(origin, direction, 0.0);
        let mut inter = Intersection::default();
        if !self.intersect(&ray, &mut inter, rng) {
            return 0.0;
        }

        let area = (self.a1 - self.a0) * (self.b1 - self.b0);
        let distance_squared = inter.t * inter.t * direction.length_squared();
        let cosine = direction.dot(inter.normal).abs() / direction.length();
        if cosine <= 0.0 {
            return 0.0;
        }
        distance_squared / (cosine * area)
    }

    fn sample_direction(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        let a = rng.uniform_range(self.a0, self.a1);
        let b = rng.uniform_range(self.b0, self.b1);
        self.axis.compose(self.k, a, b) - origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Color;
    use crate::material::Lambert;
    use crate::texture::{SolidColor, Texture};

    fn dummy_material() -> Arc<Material> {
        Arc::new(Material::from(Lambert::new(Arc::new(Texture::from(
            SolidColor::new(Color::gray(0.5)),
        )))))
    }

    fn unit_xy_rect() -> AaRect {
        AaRect::new(RectAxis::Xy, -1.0, 1.0, -1.0, 1.0, -2.0, dummy_material())
    }

    #[test]
    fn perpendicular_ray_hits_inside_the_bounds() {
        let rect = unit_xy_rect();
        let mut rng = Rng::from_seed(5);

        let ray = Ray::new(glam::Vec3A::new(0.5, -0.5, 0.0), -glam::Vec3A::Z, 0.0);
        let mut inter = Intersection::default();
        assert!(rect.intersect(&ray, &mut inter, &mut rng));
        assert!((inter.t - 2.0).abs() < 1e-5);
        assert!((inter.texcoords.x - 0.75).abs() < 1e-5);
        assert!((inter.texcoords.y - 0.25).abs() < 1e-5);

        let ray = Ray::new(glam::Vec3A::new(1.5, 0.0, 0.0), -glam::Vec3A::Z, 0.0);
        let mut inter = Intersection::default();
        assert!(!rect.intersect(&ray, &mut inter, &mut rng));
    }

    #[test]
    fn parallel_ray_misses() {
        let rect = unit_xy_rect();
        let mut rng = Rng::from_seed(5);
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::X, 0.0);
        let mut inter = Intersection::default();
        assert!(!rect.intersect(&ray, &mut inter, &mut rng));
    }

    #[test]
    fn bbox_is_padded_along_the_normal() {
        let rect = unit_xy_rect();
        let bbox = rect.bbox(0.0, 1.0);
        assert!(!bbox.is_empty());
        assert!(bbox.contains_point(glam::Vec3A::new(0.0, 0.0, -2.0)));
    }

    #[test]
    fn pdf_matches_projected_area() {
        // rect of area 4 seen head-on from distance 2
        let rect = unit_xy_rect();
        let mut rng = Rng::from_seed(5);
        let pdf = rect.pdf(glam::Vec3A::ZERO, -glam::Vec3A::Z, &mut rng);
        assert!((pdf - 4.0 / (1.0 * 4.0)).abs() < 1e-4);
    }

    #[test]
    fn sampled_directions_land_on_the_rect() {
        let rect = unit_xy_rect();
        let mut rng = Rng::from_seed(9);
        for _ in 0..64 {
            let dir = rect.sample_direction(glam::Vec3A::ZERO, &mut rng);
            assert!(rect.pdf(glam::Vec3A::ZERO, dir, &mut rng) > 0.0);
        }
    }
}
