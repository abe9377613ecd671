//! Shared helpers - геометрия и детерминированный seeding
//!
//! - geometry: AABB overlap, whirlpool/pendulum вспомогательная математика
//! - seed: stable hash entity id → ChaCha8Rng

pub mod geometry;
pub mod seed;

pub use geometry::*;
pub use seed::*;
