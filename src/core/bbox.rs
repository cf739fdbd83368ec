use crate::core::ray::Ray;

#[derive(Copy, Clone, Debug)]
pub struct Bbox {
    pub p_min: glam::Vec3A,
    pub p_max: glam::Vec3A,
}

impl Bbox {
    pub fn new(p_min: glam::Vec3A, p_max: glam::Vec3A) -> Self {
        Self { p_min, p_max }
    }

    pub fn empty() -> Self {
        Self {
            p_min: glam::Vec3A::new(f32::MAX, f32::MAX, f32::MAX),
            p_max: glam::Vec3A::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    pub fn merge(mut self, another: Bbox) -> Self {
        self.p_min = self.p_min.min(another.p_min);
        self.p_max = self.p_max.max(another.p_max);
        self
    }

    pub fn contains(&self, another: &Bbox) -> bool {
        self.p_min.x <= another.p_min.x
            && self.p_min.y <= another.p_min.y
            && self.p_min.z <= another.p_min.z
            && self.p_max.x >= another.p_max.x
            && self.p_max.y >= another.p_max.y
            && self.p_max.z >= another.p_max.z
    }

    pub fn contains_point(&self, p: glam::Vec3A) -> bool {
        self.p_min.x <= p.x
            && self.p_min.y <= p.y
            && self.p_min.z <= p.z
            && self.p_max.x >= p.x
            && self.p_max.y >= p.y
            && self.p_max.z >= p.z
    }

    /// Slab test against `(ray.t_min, t_max)`. Division by a zero direction
    /// component yields infinities that fall out of the interval naturally.
    pub fn intersect_test(&self, ray: &Ray, t_max: f32) -> bool {
        if self.is_empty() {
            return false;
        }

        let x0 = (self.p_min.x - ray.origin.x) / ray.direction.x;
        let x1 = (self.p_max.x - ray.origin.x) / ray.direction.x;
        let (x0, x1) = (x0.min(x1), x0.max(x1));
        let y0 = (self.p_min.y - ray.origin.y) / ray.direction.y;
        let y1 = (self.p_max.y - ray.origin.y) / ray.direction.y;
        let (y0, y1) = (y0.min(y1), y0.max(y1));
        let z0 = (self.p_min.z - ray.origin.z) / ray.direction.z;
        let z1 = (self.p_max.z - ray.origin.z) / ray.direction.z;
        let (z0, z1) = (z0.min(z1), z0.max(z1));
        let t0 = x0.max(y0.max(z0));
        let t1 = x1.min(y1.min(z1));
        t0 <= t1 && t1 > ray.t_min && t0 < t_max
    }

    pub fn volume(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            let diff = self.p_max - self.p_min;
            diff.x * diff.y * diff.z
        }
    }

    pub fn surface_area(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            let diff = self.p_max - self.p_min;
            2.0 * (diff.x * diff.y + diff.y * diff.z + diff.z * diff.x)
        }
    }

    pub fn centroid(&self) -> glam::Vec3A {
        (self.p_min + self.p_max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(min: [f32; 3], max: [f32; 3]) -> Bbox {
        Bbox::new(min.into(), max.into())
    }

    #[test]
    fn merge_contains_both_inputs() {
        let a = boxed([-1.0, 0.0, 2.0], [3.0, 1.0, 4.0]);
        let b = boxed([0.5, -2.0, 1.0], [1.0, 5.0, 3.0]);
        let merged = a.merge(b);
        assert!(merged.contains(&a));
        assert!(merged.contains(&b));
    }

    #[test]
    fn merge_of_nested_boxes_is_the_outer_box() {
        let outer = boxed([-2.0, -2.0, -2.0], [2.0, 2.0, 2.0]);
        let inner = boxed([-1.0, -0.5, 0.0], [1.0, 0.5, 1.0]);
        let merged = outer.merge(inner);
        assert_eq!(merged.p_min, outer.p_min);
        assert_eq!(merged.p_max, outer.p_max);
    }

    #[test]
    fn ray_hits_box_in_front_and_misses_box_behind() {
        let b = boxed([-1.0, -1.0, -3.0], [1.0, 1.0, -2.0]);
        let toward = Ray::new(glam::Vec3A::ZERO, -glam::Vec3A::Z, 0.0);
        let away = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::Z, 0.0);
        assert!(b.intersect_test(&toward, f32::MAX));
        assert!(!b.intersect_test(&away, f32::MAX));
    }

    #[test]
    fn axis_parallel_ray_outside_slab_misses() {
        let b = boxed([-1.0, -1.0, -3.0], [1.0, 1.0, -2.0]);
        let ray = Ray::new(glam::Vec3A::new(0.0, 5.0, 0.0), -glam::Vec3A::Z, 0.0);
        assert!(!b.intersect_test(&ray, f32::MAX));
    }

    #[test]
    fn volume_and_surface_area() {
        let b = boxed([0.0, 0.0, 0.0], [2.0, 3.0, 4.0]);
        assert!((b.volume() - 24.0).abs() < 1e-5);
        assert!((b.surface_area() - 52.0).abs() < 1e-5);
        assert_eq!(Bbox::empty().volume(), 0.0);
        assert_eq!(Bbox::empty().surface_area(), 0.0);
    }

    #[test]
    fn empty_box_never_hits() {
        let ray = Ray::new(glam::Vec3A::ZERO, glam::Vec3A::X, 0.0);
        assert!(!Bbox::empty().intersect_test(&ray, f32::MAX));
    }
}
