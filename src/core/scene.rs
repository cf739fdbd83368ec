use std::sync::Arc;

use crate::core::color::Color;
use crate::primitive::Primitive;

/// Radiance for rays that escape the scene.
#[derive(Debug)]
pub enum Background {
    Solid(Color),
    /// Vertical blend from `horizon` at `y = -1` to `zenith` at `y = +1`.
    Gradient {
        horizon: Color,
        zenith: Color,
    },
}

impl Background {
    pub fn radiance(&self, direction: glam::Vec3A) -> Color {
        match self {
            Background::Solid(color) => *color,
            Background::Gradient { horizon, zenith } => {
                let t = 0.5 * (direction.normalize().y + 1.0);
                *horizon * (1.0 - t) + *zenith * t
            }
        }
    }
}

/// Immutable render input: the aggregate, the light list used for
/// importance sampling, and the escape radiance. Built once before any
/// worker starts; shared read-only afterwards.
#[derive(Debug)]
pub struct Scene {
    pub aggregate: Arc<Primitive>,
    pub lights: Option<Arc<Primitive>>,
    pub background: Background,
}

impl Scene {
    pub fn new(
        aggregate: Arc<Primitive>,
        lights: Option<Arc<Primitive>>,
        background: Background,
    ) -> Self {
        Self {
            aggregate,
            lights,
            background,
        }
    }
}
