use std::sync::Arc;

use crate::core::bbox::Bbox;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::primitive::{Primitive, PrimitiveT};

/// Rigid translation of a wrapped primitive, done by shifting the ray
/// rather than the geometry.
#[derive(Debug)]
pub struct Translate {
    inner: Arc<Primitive>,
    offset: glam::Vec3A,
}

impl Translate {
    pub fn new(inner: Arc<Primitive>, offset: glam::Vec3A) -> Self {
        Self { inner, offset }
    }
}

impl PrimitiveT for Translate {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, rng: &mut Rng) -> bool {
        let moved = Ray {
            origin: ray.origin - self.offset,
            ..*ray
        };
        if !self.inner.intersect(&moved, inter, rng) {
            return false;
        }
        inter.position += self.offset;
        true
    }

    fn bbox(&self, time0: f32, time1: f32) -> Bbox {
        let inner = self.inner.bbox(time0, time1);
        if inner.is_empty() {
            return inner;
        }
        Bbox::new(inner.p_min + self.offset, inner.p_max + self.offset)
    }

    fn pdf(&self, origin: glam::Vec3A, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        self.inner.pdf(origin - self.offset, direction, rng)
    }

    fn sample_direction(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        self.inner.sample_direction(origin - self.offset, rng)
    }
}

/// Rotation about the world y axis. Rays are rotated into the wrapped
/// primitive's frame, hit data is rotated back out.
#[derive(Debug)]
pub struct RotateY {
    inner: Arc<Primitive>,
    sin_theta: f32,
    cos_theta: f32,
}

impl RotateY {
    pub fn new(inner: Arc<Primitive>, angle_deg: f32) -> Self {
        let radians = angle_deg * std::f32::consts::PI / 180.0;
        Self {
            inner,
            sin_theta: radians.sin(),
            cos_theta: radians.cos(),
        }
    }

    fn to_object(&self, v: glam::Vec3A) -> glam::Vec3A {
        glam::Vec3A::new(
            self.cos_theta * v.x - self.sin_theta * v.z,
            v.y,
            self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }

    fn to_world(&self, v: glam::Vec3A) -> glam::Vec3A {
        glam::Vec3A::new(
            self.cos_theta * v.x + self.sin_theta * v.z,
            v.y,
            -self.sin_theta * v.x + self.cos_theta * v.z,
        )
    }
}

impl PrimitiveT for RotateY {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, rng: &mut Rng) -> bool {
        let rotated = Ray {
            origin: self.to_object(ray.origin),
            direction: self.to_object(ray.direction),
            ..*ray
        };
        if !self.inner.intersect(&rotated, inter, rng) {
            return false;
        }
        inter.position = self.to_world(inter.position);
        inter.normal = self.to_world(inter.normal);
        true
    }

    fn bbox(&self, time0: f32, time1: f32) -> Bbox {
        let inner = self.inner.bbox(time0, time1);
        if inner.is_empty() {
            return inner;
        }

        let mut bbox = Bbox::empty();
        for i in 0..8 {
            let corner = glam::Vec3A::new(
                if i & 1 == 0 { inner.p_min.x } else { inner.p_max.x },
                if i & 2 == 0 { inner.p_min.y } else { inner.p_max.y },
                if i & 4 == 0 { inner.p_min.z } else { inner.p_max.z },
            );
            let rotated = self.to_world(corner);
            bbox = bbox.merge(Bbox::new(rotated, rotated));
        }
        bbox
    }

    fn pdf(&self, origin: glam::Vec3A, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        self.inner
            .pdf(self.to_object(origin), self.to_object(direction), rng)
    }

    fn sample_direction(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        self.to_world(self.inner.sample_direction(self.to_object(origin), rng))
    }
}

/// Inverts the reported face orientation of the wrapped primitive. Used on
/// lights that should only emit from one side.
#[derive(Debug)]
pub struct FlipFace {
    inner: Arc<Primitive>,
}

impl FlipFace {
    pub fn new(inner: Arc<Primitive>) -> Self {
        Self { inner }
    }
}

impl PrimitiveT for FlipFace {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, rng: &mut Rng) -> bool {
        if !self.inner.intersect(ray, inter, rng) {
            return false;
        }
        inter.front_face = !inter.front_face;
        true
    }

    fn bbox(&self, time0: f32, time1: f32) -> Bbox {
        self.inner.bbox(time0, time1)
    }

    fn pdf(&self, origin: glam::Vec3A, direction: glam::Vec3A, rng: &mut Rng) -> f32 {
        self.inner.pdf(origin, direction, rng)
    }

    fn sample_direction(&self, origin: glam::Vec3A, rng: &mut Rng) -> glam::Vec3A {
        self.inner.sample_direction(origin, rng)
    }
}
