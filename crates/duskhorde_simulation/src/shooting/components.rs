//! Shooting components: боезапас и оружие игрока

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Боезапас
///
/// Инвариант: 0 ≤ current ≤ max. Каждая мутация снаружи обязана
/// сопровождаться AmmoChanged event (HUD подписан на него).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Ammo {
    pub current: u32,
    pub max: u32,
}

impl Default for Ammo {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Ammo {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Потратить один патрон; false если пусто
    pub fn spend(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Пополнить с clamp к max
    pub fn refill(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Параметры оружия (тюнинг, serde-загружаемый)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GunConfig {
    /// Минимальный интервал между выстрелами (s)
    pub fire_rate: f32,
    /// Скорость пули (m/s)
    pub bullet_speed: f32,
    /// Урон пули
    pub bullet_damage: u32,
    /// Время жизни пули (s)
    pub bullet_lifetime: f32,
    /// Полуширина случайного разброса по каждой оси
    pub spread: f32,
    /// Высота дула над ногами (м)
    pub muzzle_height: f32,
}

impl Default for GunConfig {
    fn default() -> Self {
        Self {
            fire_rate: 0.2,
            bullet_speed: 20.0,
            bullet_damage: 10,
            bullet_lifetime: 5.0,
            spread: 0.1,
            muzzle_height: 1.2,
        }
    }
}

/// Оружие игрока: конфиг + момент последнего выстрела
#[derive(Component, Debug, Clone, Copy)]
pub struct Gun {
    pub config: GunConfig,
    pub last_shot_time: f32,
}

impl Default for Gun {
    fn default() -> Self {
        Self::new(GunConfig::default())
    }
}

impl Gun {
    pub fn new(config: GunConfig) -> Self {
        Self {
            config,
            last_shot_time: f32::NEG_INFINITY,
        }
    }

    /// Готов ли выстрел по fire rate
    pub fn ready(&self, now: f32) -> bool {
        now - self.last_shot_time >= self.config.fire_rate
    }
}

/// Event: выстрел произведён (camera shake и host VFX подписаны)
#[derive(Event, Debug, Clone)]
pub struct ShotFired {
    pub shooter: Entity,
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Event: боезапас изменился (current, max) — для HUD
#[derive(Event, Debug, Clone, Copy)]
pub struct AmmoChanged {
    pub current: u32,
    pub max: u32,
}
