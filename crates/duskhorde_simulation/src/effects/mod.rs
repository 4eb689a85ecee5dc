//! Таймерные эффекты: camera shake, hit flash, dissolve, отложенный despawn
//!
//! Все «корутинные» эффекты — явные поля-таймеры, убывающие на dt каждый
//! тик. Host читает их состояние (amplitude_gain, strength, наличие
//! HitFlash) и рисует; симуляция только считает время.

use bevy::prelude::*;
use rand::Rng;

use crate::shooting::ShotFired;
use crate::DeterministicRng;

/// Resource: тряска камеры от выстрелов
///
/// Знак direction выбирается случайно на каждый рестарт — тряска уводит
/// камеру то влево, то вправо.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraShake {
    pub intensity: f32,
    pub duration: f32,
    pub remaining: f32,
    pub direction: f32,
}

impl Default for CameraShake {
    fn default() -> Self {
        Self {
            intensity: 2.0,
            duration: 0.2,
            remaining: 0.0,
            direction: 1.0,
        }
    }
}

impl CameraShake {
    /// Текущая амплитуда для virtual camera noise (0 когда тряска затухла)
    pub fn amplitude_gain(&self) -> f32 {
        if self.remaining > 0.0 {
            self.intensity * self.direction.signum()
        } else {
            0.0
        }
    }

    pub fn restart(&mut self, direction: f32) {
        self.remaining = self.duration;
        self.direction = direction;
    }

    pub fn decay(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }
}

/// Система: каждый выстрел перезапускает тряску
pub fn trigger_shake_on_shot(
    mut shake: ResMut<CameraShake>,
    mut rng: ResMut<DeterministicRng>,
    mut shot_events: EventReader<ShotFired>,
) {
    for _ in shot_events.read() {
        let direction = rng.rng.gen_range(-1.0_f32..1.0);
        shake.restart(direction);
    }
}

/// Система: затухание тряски
pub fn decay_shake(time: Res<Time<Fixed>>, mut shake: ResMut<CameraShake>) {
    shake.decay(time.delta_secs());
}

/// Красная вспышка при получении урона (host перекрашивает материал)
#[derive(Component, Debug, Clone, Copy)]
pub struct HitFlash {
    pub remaining: f32,
}

impl HitFlash {
    pub const DURATION: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            remaining: Self::DURATION,
        }
    }
}

impl Default for HitFlash {
    fn default() -> Self {
        Self::new()
    }
}

/// Система: вспышка гаснет — компонент снимается
pub fn tick_hit_flashes(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut flashes: Query<(Entity, &mut HitFlash)>,
) {
    let dt = time.delta_secs();
    for (entity, mut flash) in flashes.iter_mut() {
        flash.remaining -= dt;
        if flash.remaining <= 0.0 {
            commands.entity(entity).remove::<HitFlash>();
        }
    }
}

/// Растворение трупа: задержка, потом линейный рост strength 0 → 1
#[derive(Component, Debug, Clone, Copy)]
pub struct Dissolve {
    pub delay: f32,
    pub duration: f32,
    pub elapsed: f32,
    /// 0.0 = целый, 1.0 = полностью растворён (host подаёт в шейдер)
    pub strength: f32,
}

impl Dissolve {
    pub fn new(delay: f32, duration: f32) -> Self {
        Self {
            delay,
            duration,
            elapsed: 0.0,
            strength: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if self.delay > 0.0 {
            self.delay = (self.delay - dt).max(0.0);
            return;
        }
        self.elapsed += dt;
        self.strength = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
    }
}

/// Система: продвижение dissolve таймеров
pub fn advance_dissolves(time: Res<Time<Fixed>>, mut dissolves: Query<&mut Dissolve>) {
    let dt = time.delta_secs();
    for mut dissolve in dissolves.iter_mut() {
        dissolve.advance(dt);
    }
}

/// Отложенный despawn (трупы, гильзы)
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    pub remaining: f32,
}

impl DespawnAfter {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }
}

/// Система: despawn по истечении таймера
pub fn tick_despawns(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut timers: Query<(Entity, &mut DespawnAfter)>,
) {
    let dt = time.delta_secs();
    for (entity, mut timer) in timers.iter_mut() {
        timer.remaining -= dt;
        if timer.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Plugin: тряска + таймерные эффекты
pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraShake>().add_systems(
            FixedUpdate,
            (
                trigger_shake_on_shot,
                decay_shake,
                tick_hit_flashes,
                advance_dissolves,
                tick_despawns,
            )
                .chain()
                .in_set(crate::SimSet::Effects),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_shake_restart_and_decay() {
        let mut shake = CameraShake::default();
        assert_eq!(shake.amplitude_gain(), 0.0);

        shake.restart(-0.4);
        assert_eq!(shake.amplitude_gain(), -2.0); // Знак от direction

        let ticks = (shake.duration / DT).ceil() as usize + 1;
        for _ in 0..ticks {
            shake.decay(DT);
        }
        assert_eq!(shake.amplitude_gain(), 0.0);
    }

    #[test]
    fn test_dissolve_waits_out_delay() {
        let mut dissolve = Dissolve::new(2.0, 2.0);
        for _ in 0..60 {
            dissolve.advance(DT); // 1 секунда — ещё внутри задержки
        }
        assert_eq!(dissolve.strength, 0.0);
    }

    #[test]
    fn test_dissolve_ramps_to_one() {
        let mut dissolve = Dissolve::new(0.0, 2.0);
        for _ in 0..60 {
            dissolve.advance(DT);
        }
        assert!(dissolve.strength > 0.45 && dissolve.strength < 0.55);

        for _ in 0..120 {
            dissolve.advance(DT);
        }
        assert_eq!(dissolve.strength, 1.0);
    }
}
