//! DUSKHORDE Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: third-person шутер с волнами врагов.
//! Геймплей считается здесь (fixed 60Hz, детерминизм от seed); host
//! (рендер, настоящая физика, navmesh) снимает состояние через
//! Transform/Resources/Events и подменяет Surface своими коллизиями.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod components;
pub mod effects;
pub mod locomotion;
pub mod logger;
pub mod pickup;
pub mod projectile;
pub mod shared;
pub mod shooting;
pub mod spawner;
pub mod ui;

// Re-export базовых типов для удобства
pub use ai::{AiPlugin, Enemy, EnemyConfig, EnemyDied, EnemyState, RagdollActivated};
pub use components::*;
pub use effects::{CameraShake, DespawnAfter, Dissolve, EffectsPlugin, HitFlash};
pub use locomotion::{
    spawn_player, AnimationChannels, AnimationParams, GroundField, JumpIntent, JumpReleased,
    LocomotionConfig, LocomotionController, LocomotionPlugin, MotionPhase, Surface, TickInput,
};
pub use pickup::{spawn_ammo_pickup, AmmoPickup, PickupPlugin};
pub use projectile::{Projectile, ProjectileImpact, ProjectilePlugin};
pub use shared::{CameraBasis, CameraRig, CursorRay};
pub use shooting::{Ammo, AmmoChanged, Gun, GunConfig, ShotFired, ShootingPlugin};
pub use spawner::{MonsterSpawner, SpawnerConfig, SpawnerPlugin};
pub use ui::{AmmoHud, UiPlugin};

// Re-export глобального logger
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};

/// Порядок подсистем внутри FixedUpdate
///
/// Порядок тотальный: sets выполняются строго друг за другом, внутри
/// каждого системы chained. Любая неупорядоченная пара с общим доступом
/// (RNG, Health, Transform) делает порядок зависимым от executor'а и
/// ломает детерминизм снепшотов.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Locomotion,
    Shooting,
    Projectiles,
    Ai,
    Spawning,
    Pickups,
    Effects,
    Hud,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            // Конвейер тика: один и тот же порядок систем каждый прогон
            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Locomotion,
                    SimSet::Shooting,
                    SimSet::Projectiles,
                    SimSet::Ai,
                    SimSet::Spawning,
                    SimSet::Pickups,
                    SimSet::Effects,
                    SimSet::Hud,
                )
                    .chain(),
            )
            // Подсистемы
            .add_plugins((
                LocomotionPlugin,
                ShootingPlugin,
                ProjectilePlugin,
                AiPlugin,
                EffectsPlugin,
                SpawnerPlugin,
                PickupPlugin,
                UiPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый app.update() продвигает ровно один fixed tick,
/// тесты не зависят от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .add_plugins(SimulationPlugin)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
