use std::sync::Arc;

use crate::core::bbox::Bbox;
use crate::core::intersection::Intersection;
use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::material::Material;
use crate::primitive::{AaRect, PrimitiveT, RectAxis};

/// Axis-aligned box assembled from six rectangles so every face carries
/// the full rectangle intersection logic (texcoords, face orientation).
#[derive(Debug)]
pub struct BoxShape {
    p_min: glam::Vec3A,
    p_max: glam::Vec3A,
    sides: Vec<AaRect>,
}

impl BoxShape {
    pub fn new(p_min: glam::Vec3A, p_max: glam::Vec3A, material: Arc<Material>) -> Self {
        let sides = vec![
            AaRect::new(
                RectAxis::Xy,
                p_min.x,
                p_max.x,
                p_min.y,
                p_max.y,
                p_max.z,
                material.clone(),
            ),
            AaRect::new(
                RectAxis::Xy,
                p_min.x,
                p_max.x,
                p_min.y,
                p_max.y,
                p_min.z,
                material.clone(),
            ),
            AaRect::new(
                RectAxis::Xz,
                p_min.x,
                p_max.x,
                p_min.z,
                p_max.z,
                p_max.y,
                material.clone(),
            ),
            AaRect::new(
                RectAxis::Xz,
                p_min.x,
                p_max.x,
                p_min.z,
                p_max.z,
                p_min.y,
                material.clone(),
            ),
            AaRect::new(
                RectAxis::Yz,
                p_min.y,
                p_max.y,
                p_min.z,
                p_max.z,
                p_max.x,
                material.clone(),
            ),
            AaRect::new(
                RectAxis::Yz,
                p_min.y,
                p_max.y,
                p_min.z,
                p_max.z,
                p_min.x,
                material,
            ),
        ];
        Self {
            p_min,
            p_max,
            sides,
        }
    }
}

impl PrimitiveT for BoxShape {
    fn intersect(&self, ray: &Ray, inter: &mut Intersection, rng: &mut Rng) -> bool {
        let mut hit = false;
        for side in &self.sides {
            hit |= side.intersect(ray, inter, rng);
        }
        hit
    }

    fn bbox(&self, _time0: f32, _time1: f32) -> Bbox {
        Bbox::new(self.p_min, self.p_max)
    }

    fn pdf(&self, _origin: glam::Vec3A, _direction: glam::Vec3A, _rng: &mut Rng) -> f32 {
        0.0
    }

    fn sample_direction(&self, _origin: glam::Vec3A, _rng: &mut Rng) -> glam::Vec3A {
        glam::Vec3A::X
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

    #[test]
    fn nearest_face_wins() {
        let shape = BoxShape::new(
            glam::Vec3A::new(-1.0, -1.0, -1.0),
            glam::Vec3A::new(1.0, 1.0, 1.0),
            dummy_material(),
        );
        let ray = Ray::new(glam::Vec3A::new(0.0, 0.0, 5.0), -glam::Vec3A::Z, 0.0);
        let mut inter = Intersection::default();
        let mut rng = Rng::from_seed(2);

        assert!(shape.intersect(&ray, &mut inter, &mut rng));
        assert!((inter.t - 4.0).abs() < 1e-5);
        assert!((inter.normal - glam::Vec3A::Z).length() < 1e-5);
    }

    #[test]
    fn ray_from_inside_hits_the_far_face() {
        let shape = BoxShape::new(
            glam::Vec3A::new(-1.0, -1.0, -1.0),
            glam::Vec3A::new(1.0, 1.0, 1.0),
            dummy_material(),
        );
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::Y, 0.0);
        let mut inter = Intersection::default();
        let mut rng = Rng::from_seed(2);

        assert!(shape.intersect(&ray, &mut inter, &mut rng));
        assert!((inter.t - 1.0).abs() < 1e-5);
        assert!(!inter.front_face);
    }
}
