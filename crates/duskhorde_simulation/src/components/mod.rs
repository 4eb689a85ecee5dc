//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (health, скорость)
//! - player: player control marker (Player)
//! - input: сэмпл устройства + точка прицела (InputSample, AimTarget)

pub mod actor;
pub mod input;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use input::*;
pub use player::*;
