mod progress;
mod pt;
mod util;

pub use pt::PathTracer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::camera::Camera;
use crate::core::color::Color;
use crate::core::film::Film;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::loader;
use progress::ProgressReporter;

/// Samples brighter than this are discarded as fireflies.
const MAX_COLOR: f32 = 200.0;
/// A pixel that rejects this many samples in a row is abandoned.
const MAX_CONSECUTIVE_REJECTS: u32 = 64;

#[derive(Debug)]
pub struct RenderParams {
    pub width: u32,
    pub height: u32,
    pub min_samples: u32,
    pub max_samples: u32,
    pub max_depth: u32,
    pub pincer_limit: f32,
    /// Scanlines between partial-image snapshots; `None` picks a default,
    /// zero disables them.
    pub snapshot_rows: Option<u32>,
}

impl RenderParams {
    pub fn load(value: &serde_json::Value) -> Result<Self> {
        let env = "render";
        let width = loader::get_int_field(value, env, "width")?;
        let height = loader::get_int_field(value, env, "height")?;
        let min_samples = loader::get_int_field(value, env, "min_samples_per_pixel")?;
        let max_samples = loader::get_int_field(value, env, "max_samples_per_pixel")?;
        let max_depth = loader::get_int_field(value, env, "max_depth")?;
        let pincer_limit = loader::get_float_field(value, env, "pincer_limit")?;
        let snapshot_rows = loader::get_int_field_option(value, env, "snapshot_rows")?;

        if width == 0 || height == 0 {
            bail!("render: image dimensions must be positive");
        }
        if min_samples < 2 {
            bail!("render: 'min_samples_per_pixel' must be at least 2");
        }
        if max_samples < min_samples {
            bail!("render: 'max_samples_per_pixel' must be at least 'min_samples_per_pixel'");
        }
        if max_depth == 0 {
            bail!("render: 'max_depth' must be positive");
        }
        if !(0.0..1.0).contains(&pincer_limit) {
            bail!("render: 'pincer_limit' must be in [0, 1)");
        }

        Ok(Self {
            width,
            height,
            min_samples,
            max_samples,
            max_depth,
            pincer_limit,
            snapshot_rows,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Where partial-image snapshots go; `None` disables them entirely.
pub struct OutputConfig {
    pub snapshot_path: Option<String>,
}

/// Cooperative cancellation flag checked between scanlines.
#[derive(Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

struct PixelSample {
    color: Color,
    accepted: u32,
    hit_ceiling: bool,
}

#[derive(Debug)]
pub struct Renderer {
    params: RenderParams,
    tracer: PathTracer,
}

impl Renderer {
    pub fn new(params: RenderParams) -> Self {
        let tracer = PathTracer::new(params.max_depth);
        Self { params, tracer }
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    /// Renders the whole frame across `2 * num_cpus` workers, each owning
    /// contiguous scanline ranges. Rows are committed to the film whole,
    /// bottom row first in camera space.
    pub fn render(
        &self,
        scene: &Scene,
        camera: &Camera,
        output: &OutputConfig,
        cancel: &CancelToken,
    ) -> Film {
        let width = self.params.width;
        let height = self.params.height;
        let snapshot_rows = self.params.snapshot_rows.unwrap_or(height / 5);

        let film = Mutex::new(Film::new(width, height));
        let progress = ProgressReporter::new(height, snapshot_rows);
        let ranges = util::create_image_ranges(num_cpus::get() as u32 * 2, height);

        crossbeam::scope(|scope| {
            let film = &film;
            let progress = &progress;
            for range in ranges {
                scope.spawn(move |_| {
                    let mut rng = Rng::new();
                    for j in range.from..range.to {
                        if cancel.is_cancelled() {
                            break;
                        }

                        let mut row = Vec::with_capacity(width as usize);
                        let mut row_samples = 0u64;
                        let mut row_ceiling_hits = 0u64;
                        for i in 0..width {
                            let sample = self.sample_pixel(scene, camera, i, j, &mut rng);
                            row_samples += sample.accepted as u64;
                            if sample.hit_ceiling {
                                row_ceiling_hits += 1;
                            }
                            row.push(sample.color);
                        }
                        film.lock().unwrap().set_row(height - 1 - j, row);

                        if progress.row_done(row_samples, row_ceiling_hits) {
                            if let Some(path) = &output.snapshot_path {
                                let image = film.lock().unwrap().to_image();
                                if let Err(err) = image.save(path) {
                                    log::warn!("can't write snapshot to '{}': {}", path, err);
                                }
                            }
                        }
                    }
                });
            }
        })
        .unwrap();

        progress.finish(width);
        film.into_inner().unwrap()
    }

    /// Adaptive sampling of one pixel. Samples are drawn in pairs into two
    /// accumulators; once the accumulators agree to within `pincer_limit`
    /// the pixel is considered converged.
    fn sample_pixel(
        &self,
        scene: &Scene,
        camera: &Camera,
        x: u32,
        y: u32,
        rng: &mut Rng,
    ) -> PixelSample {
        let min_pairs = (self.params.min_samples / 2).max(1);
        let max_pairs = (self.params.max_samples / 2).max(min_pairs);

        let mut sum0 = Color::BLACK;
        let mut sum1 = Color::BLACK;
        let mut accepted = 0u32;
        let mut consecutive_rejects = 0u32;
        let mut converged = false;
        let mut pairs = 0u32;

        while pairs < max_pairs {
            let c0 = self.sample_once(scene, camera, x, y, rng);
            let c1 = self.sample_once(scene, camera, x, y, rng);

            let usable = |c: &Color| c.is_finite() && c.length() <= MAX_COLOR;
            if !usable(&c0) || !usable(&c1) {
                consecutive_rejects += 1;
                if consecutive_rejects >= MAX_CONSECUTIVE_REJECTS {
                    log::warn!(
                        "pixel ({}, {}): giving up after {} consecutive rejected samples",
                        x,
                        y,
                        consecutive_rejects,
                    );
                    break;
                }
                continue;
            }
            consecutive_rejects = 0;

            sum0 += c0;
            sum1 += c1;
            accepted += 2;
            pairs += 1;

            if pairs >= min_pairs {
                let difference = ((sum0.r - sum1.r) + (sum0.g - sum1.g) + (sum0.b - sum1.b)).abs();
                let total = sum0.r + sum1.r + sum0.g + sum1.g + sum0.b + sum1.b;
                if difference < self.params.pincer_limit * total {
                    converged = true;
                    break;
                }
            }
        }

        let color = if accepted == 0 {
            Color::BLACK
        } else {
            (sum0 + sum1) / accepted as f32
        };
        PixelSample {
            color,
            accepted,
            hit_ceiling: !converged && pairs == max_pairs,
        }
    }

    fn sample_once(&self, scene: &Scene, camera: &Camera, x: u32, y: u32, rng: &mut Rng) -> Color {
        let u = (x as f32 + rng.uniform_1d()) / (self.params.width - 1) as f32;
        let v = (y as f32 + rng.uniform_1d()) / (self.params.height - 1) as f32;
        let ray = camera.get_ray(u, v, rng);
        self.tracer.trace_ray(scene, &ray, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::Background;
    use crate::material::{Lambert, Material};
    use crate::primitive::{BvhAccel, Primitive, Sphere};
    use crate::texture::{SolidColor, Texture};

    fn test_params(width: u32, height: u32, pincer_limit: f32) -> RenderParams {
        RenderParams {
            width,
            height,
            min_samples: 8,
            max_samples: 64,
            max_depth: 8,
            pincer_limit,
            snapshot_rows: Some(0),
        }
    }

    fn empty_scene(background: Background) -> Scene {
        let aggregate = Arc::new(Primitive::from(
            BvhAccel::new(Vec::new(), 0.0, 1.0).unwrap(),
        ));
        Scene::new(aggregate, None, background)
    }

    fn test_camera(aspect: f32) -> Camera {
        Camera::new(
            glam::Vec3A::ZERO,
            -glam::Vec3A::Z,
            glam::Vec3A::Y,
            90.0,
            aspect,
            0.0,
            1.0,
            0.0,
            0.0,
        )
    }

    #[test]
    fn constant_pixels_converge_at_the_sample_floor() {
        let renderer = Renderer::new(test_params(16, 16, 0.01));
        let scene = empty_scene(Background::Solid(Color::gray(0.5)));
        let camera = test_camera(1.0);
        let mut rng = Rng::from_seed(91);

        let sample = renderer.sample_pixel(&scene, &camera, 8, 8, &mut rng);
        assert_eq!(sample.accepted, 8);
        assert!(!sample.hit_ceiling);
        assert!((sample.color.r - 0.5).abs() < 1e-4);
    }

    #[test]
    fn zero_pincer_limit_runs_to_the_ceiling() {
        let renderer = Renderer::new(test_params(16, 16, 0.0));
        let scene = empty_scene(Background::Solid(Color::gray(0.5)));
        let camera = test_camera(1.0);
        let mut rng = Rng::from_seed(92);

        let sample = renderer.sample_pixel(&scene, &camera, 3, 3, &mut rng);
        assert_eq!(sample.accepted, 64);
        assert!(sample.hit_ceiling);
    }

    #[test]
    fn gradient_sky_with_one_sphere_end_to_end() {
        let width = 160;
        let height = 90;
        let material = Arc::new(Material::from(Lambert::new(Arc::new(Texture::from(
            SolidColor::new(Color::gray(0.5)),
        )))));
        let sphere = Arc::new(Primitive::from(Sphere::new(
            glam::Vec3A::new(0.0, 0.0, -1.0),
            0.5,
            material,
        )));
        let aggregate = Arc::new(Primitive::from(
            BvhAccel::new(vec![sphere], 0.0, 1.0).unwrap(),
        ));
        let background = Background::Gradient {
            horizon: Color::WHITE,
            zenith: Color::new(0.5, 0.7, 1.0),
        };
        let expected_top = {
            // central ray through the top row
            let u = (width as f32 * 0.5) / (width - 1) as f32;
            let v = (height - 1) as f32 / (height - 1) as f32;
            let mut rng = Rng::from_seed(1);
            let ray = test_camera(width as f32 / height as f32).get_ray(u, v, &mut rng);
            background.radiance(ray.direction)
        };
        let scene = Scene::new(aggregate, None, background);

        let renderer = Renderer::new(test_params(width, height, 0.05));
        let camera = test_camera(width as f32 / height as f32);
        let output = OutputConfig {
            snapshot_path: None,
        };
        let film = renderer.render(&scene, &camera, &output, &CancelToken::new());

        // top image row is pure sky and should match the gradient
        let top = film.pixel(width / 2, 0);
        assert!((top.r - expected_top.r).abs() < 0.05);
        assert!((top.b - expected_top.b).abs() < 0.05);

        // the sphere darkens the center relative to the horizon-ish sky
        let center = film.pixel(width / 2, height / 2);
        let sky = film.pixel(4, height / 2);
        assert!(center.luminance() < sky.luminance() - 0.05);
    }

    #[test]
    fn cancelled_render_returns_early() {
        let renderer = Renderer::new(test_params(32, 32, 0.05));
        let scene = empty_scene(Background::Solid(Color::gray(0.2)));
        let camera = test_camera(1.0);
        let cancel = CancelToken::new();
        cancel.cancel();

        let output = OutputConfig {
            snapshot_path: None,
        };
        // every worker sees the flag before its first row; the film stays black
        let film = renderer.render(&scene, &camera, &output, &cancel);
        assert_eq!(film.pixel(16, 16), Color::BLACK);
    }
}
