//! Подбираемый боезапас
//!
//! Пикап крутится вокруг Y (host видит вращение через Transform) и
//! подбирается по дистанции до игрока, без физических триггеров.

use bevy::prelude::*;

use crate::components::Player;
use crate::shooting::{Ammo, AmmoChanged};

/// Коробка патронов на земле
#[derive(Component, Debug, Clone, Copy)]
pub struct AmmoPickup {
    /// Сколько патронов даёт (clamp к max у получателя)
    pub amount: u32,
    /// Скорость вращения (rad/s)
    pub rotation_speed: f32,
    /// Радиус подбора (м)
    pub radius: f32,
}

impl Default for AmmoPickup {
    fn default() -> Self {
        Self {
            amount: 50,
            rotation_speed: 0.5,
            radius: 1.0,
        }
    }
}

/// Spawn helper: коробка патронов
pub fn spawn_ammo_pickup(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((AmmoPickup::default(), Transform::from_translation(position)))
        .id()
}

/// Система: вращение пикапов
pub fn spin_pickups(
    time: Res<Time<Fixed>>,
    mut pickups: Query<(&AmmoPickup, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (pickup, mut transform) in pickups.iter_mut() {
        transform.rotate_y(pickup.rotation_speed * dt);
    }
}

/// Система: подбор — игрок в радиусе, патроны не полные
pub fn collect_pickups(
    mut commands: Commands,
    mut ammo_events: EventWriter<AmmoChanged>,
    pickups: Query<(Entity, &AmmoPickup, &Transform)>,
    mut players: Query<(Entity, &Transform, &mut Ammo), With<Player>>,
) {
    for (pickup_entity, pickup, pickup_transform) in pickups.iter() {
        for (player_entity, player_transform, mut ammo) in players.iter_mut() {
            let distance = player_transform
                .translation
                .distance(pickup_transform.translation);
            if distance > pickup.radius {
                continue;
            }

            ammo.refill(pickup.amount);
            ammo_events.write(AmmoChanged {
                current: ammo.current,
                max: ammo.max,
            });
            commands.entity(pickup_entity).despawn();
            crate::log(&format!(
                "Player {:?}: ammo pickup ({} / {})",
                player_entity, ammo.current, ammo.max
            ));
            break;
        }
    }
}

/// Plugin: вращение и подбор пикапов
pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (spin_pickups, collect_pickups)
                .chain()
                .in_set(crate::SimSet::Pickups),
        );
    }
}
