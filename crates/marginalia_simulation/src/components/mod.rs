//! ECS Components traversal слоя
//!
//! Организация:
//! - player: kinematic record игрока (position/velocity/size) + held input
//! - motion: MotionMode (Normal / Swinging) - единственный источник правды о том,
//!   какая система двигает игрока в этом frame

pub mod motion;
pub mod player;

pub use motion::*;
pub use player::*;
