pub mod asteroids;
pub mod orbit;
pub mod render;
pub mod rng;
