pub mod bbox;
pub mod color;
pub mod film;
pub mod intersection;
pub mod onb;
pub mod ray;
pub mod rng;
pub mod scene;
