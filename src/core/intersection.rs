use std::sync::Arc;

use crate::core::ray::Ray;
use crate::material::Material;

/// Per-hit data. `t` doubles as the running upper bound during traversal:
/// primitives only record a hit strictly closer than the current `t`.
pub struct Intersection {
    pub t: f32,
    pub position: glam::Vec3A,
    pub normal: glam::Vec3A,
    pub front_face: bool,
    pub texcoords: glam::Vec2,
    pub material: Option<Arc<Material>>,
}

impl Intersection {
    pub fn with_t_max(t_max: f32) -> Self {
        Self {
            t: t_max,
            ..Default::default()
        }
    }

    /// Orients the stored normal against the incoming ray and records which
    /// side was hit.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: glam::Vec3A) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

impl Default for Intersection {
    fn default() -> Self {
        Self {
            t: f32::MAX,
            position: glam::Vec3A::ZERO,
            normal: glam::Vec3A::Y,
            front_face: true,
            texcoords: glam::Vec2::ZERO,
            material: None,
        }
    }
}
