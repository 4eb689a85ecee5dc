//! Input компоненты: сэмпл устройства + точка прицела
//!
//! Host (input backend) пишет InputSample перед каждым тиком; edge события
//! прыжка идут отдельно через JumpIntent/JumpReleased events.

use bevy::prelude::*;

/// Сэмпл устройства ввода на текущий тик (read-only для симуляции)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct InputSample {
    /// Сырые оси движения, [-1, 1] по каждой
    pub move_axes: Vec2,
    /// Зажато прицеливание (RMB)
    pub aiming: bool,
    /// Зажат спуск (LMB)
    pub trigger_held: bool,
}

/// Мировая точка прицела (результат aim resolver'а)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AimTarget {
    pub point: Vec3,
}

impl AimTarget {
    /// Горизонтальное направление от позиции к точке прицела
    ///
    /// Вырожденный вектор (прицел в ногах) → fallback на facing.
    pub fn direction_from(&self, position: Vec3, fallback: Vec3) -> Vec3 {
        let mut direction = self.point - position;
        direction.y = 0.0;
        if direction.length_squared() > 0.001 {
            direction.normalize()
        } else {
            fallback
        }
    }
}
