//! Волновой спавн врагов
//!
//! Таймер стартует с нуля: первая волна выходит на первом же тике после
//! запуска, дальше — раз в interval.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::spawn_enemy;
use crate::DeterministicRng;

/// Параметры спавнера (тюнинг, serde-загружаемый)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnerConfig {
    /// Период между волнами (s)
    pub interval: f32,
    /// Врагов за волну
    pub batch_size: u32,
    /// Подъём точки спавна над землёй (м)
    pub height_offset: f32,
    /// Полуширина случайного разброса точки спавна по X/Z (м)
    pub scatter: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval: 5.0,
            batch_size: 3,
            height_offset: 1.0,
            scatter: 1.0,
        }
    }
}

/// Точка спавна врагов
#[derive(Component, Debug, Clone, Copy)]
pub struct MonsterSpawner {
    pub config: SpawnerConfig,
    pub countdown: f32,
}

impl MonsterSpawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            config,
            countdown: 0.0,
        }
    }
}

impl Default for MonsterSpawner {
    fn default() -> Self {
        Self::new(SpawnerConfig::default())
    }
}

/// Система: тик спавнеров, по таймеру — волна врагов
pub fn tick_spawners(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut commands: Commands,
    mut spawners: Query<(Entity, &Transform, &mut MonsterSpawner)>,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut spawner) in spawners.iter_mut() {
        spawner.countdown -= dt;
        if spawner.countdown > 0.0 {
            continue;
        }
        spawner.countdown = spawner.config.interval;

        let scatter = spawner.config.scatter;
        for _ in 0..spawner.config.batch_size {
            let offset = Vec3::new(
                rng.rng.gen_range(-scatter..scatter),
                spawner.config.height_offset,
                rng.rng.gen_range(-scatter..scatter),
            );
            spawn_enemy(&mut commands, transform.translation + offset);
        }
        crate::log(&format!(
            "Spawner {:?}: wave of {} enemies",
            entity, spawner.config.batch_size
        ));
    }
}

/// Plugin: спавн волн в FixedUpdate
pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, tick_spawners.in_set(crate::SimSet::Spawning));
    }
}
