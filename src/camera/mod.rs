use anyhow::Result;

use crate::core::ray::Ray;
use crate::core::rng::Rng;
use crate::loader;

/// Thin-lens camera with a shutter interval. `get_ray` jitters the lens
/// position (depth of field) and the ray timestamp (motion blur).
#[derive(Debug)]
pub struct Camera {
    origin: glam::Vec3A,
    lower_left_corner: glam::Vec3A,
    horizontal: glam::Vec3A,
    vertical: glam::Vec3A,
    u: glam::Vec3A,
    v: glam::Vec3A,
    lens_radius: f32,
    time0: f32,
    time1: f32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        look_from: glam::Vec3A,
        look_at: glam::Vec3A,
        vup: glam::Vec3A,
        vfov_deg: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
        time0: f32,
        time1: f32,
    ) -> Self {
        let theta = vfov_deg * std::f32::consts::PI / 180.0;
        let h = (theta * 0.5).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect * viewport_height;

        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = look_from;
        let horizontal = focus_dist * viewport_width * u;
        let vertical = focus_dist * viewport_height * v;
        let lower_left_corner = origin - horizontal * 0.5 - vertical * 0.5 - focus_dist * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: aperture * 0.5,
            time0,
            time1,
        }
    }

    pub fn load(value: &serde_json::Value, aspect: f32) -> Result<Self> {
        let env = "camera";
        let look_from = loader::get_float_array3_field(value, env, "look_from")?;
        let look_at = loader::get_float_array3_field(value, env, "look_at")?;
        let up = loader::get_float_array3_field(value, env, "up")?;
        let vfov = loader::get_float_field(value, env, "vertical_fov")?;
        let aperture = loader::get_float_field_or_default(value, env, "aperture", 0.0)?;
        let focus_dist = loader::get_float_field_or_default(value, env, "focus_distance", 1.0)?;
        let time0 = loader::get_float_field_or_default(value, env, "time0", 0.0)?;
        let time1 = loader::get_float_field_or_default(value, env, "time1", 0.0)?;

        Ok(Self::new(
            look_from.into(),
            look_at.into(),
            up.into(),
            vfov,
            aspect,
            aperture,
            focus_dist,
            time0,
            time1,
        ))
    }

    /// `s`, `t` are viewport coordinates in `[0, 1]` (left-to-right,
    /// bottom-to-top).
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut Rng) -> Ray {
        let (disk_x, disk_y) = rng.uniform_in_disk();
        let offset = self.u * (self.lens_radius * disk_x) + self.v * (self.lens_radius * disk_y);

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
            rng.uniform_range(self.time0, self.time1),
        )
    }
}
