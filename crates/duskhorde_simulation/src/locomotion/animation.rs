//! Animation driver snapshot: фаза движения + сглаженные параметры
//!
//! Симуляция не блендит анимации сама — она отдаёт host'у именованные
//! параметры один раз за тик. Фаза — enum, поэтому Jumping/Falling/Landing
//! взаимоисключающие по построению.

use bevy::prelude::*;

/// Фаза движения персонажа (mutually exclusive по построению)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPhase {
    /// На земле (idle или бег — различается параметром speed)
    #[default]
    Grounded,
    /// В воздухе, летим вверх после прыжка
    Jumping,
    /// В воздухе без выраженной фазы (апекс, короткий hop, кромка)
    Airborne,
    /// Падение: земли под лучами нет, скорость ниже fall_threshold
    Falling,
    /// Поза приземления (гасится движением)
    Landing,
}

/// Снапшот параметров для animation driver (раз в тик)
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationParams {
    /// Локальная боковая скорость (сглаженная)
    pub velocity_x: f32,
    /// Локальная продольная скорость (сглаженная)
    pub velocity_z: f32,
    /// Магнитуда input'а (при прицеливании — вдвое меньше)
    pub speed: f32,
    /// Классифицированная фаза
    pub phase: MotionPhase,
    /// Грандед с учётом jump lock
    pub is_grounded: bool,
}

impl AnimationParams {
    pub fn is_jumping(&self) -> bool {
        self.phase == MotionPhase::Jumping
    }

    pub fn is_falling(&self) -> bool {
        self.phase == MotionPhase::Falling
    }

    pub fn is_landing(&self) -> bool {
        self.phase == MotionPhase::Landing
    }
}

/// Компонент-снапшот для tactical layer (animation driver читает отсюда)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AnimationChannels(pub AnimationParams);

/// Критически-демпфированное экспоненциальное сглаживание
///
/// Приближение SmoothDamp: за smooth_time значение проходит ~63% пути.
/// dt-инвариантно (одинаковый результат при дроблении шага).
pub fn damp(current: f32, target: f32, smooth_time: f32, dt: f32) -> f32 {
    if smooth_time <= 0.0 {
        return target;
    }
    current + (target - current) * (1.0 - (-dt / smooth_time).exp())
}
