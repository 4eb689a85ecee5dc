//! Player shooting: спуск → пуля + события
//!
//! Выстрел разрешён только при прицеливании (hip fire нет): aiming +
//! trigger + патроны + fire rate. Разброс — из детерминистичного RNG,
//! реплей с тем же seed даёт те же траектории.

pub mod components;

pub use components::{Ammo, AmmoChanged, Gun, GunConfig, ShotFired};

use bevy::prelude::*;
use rand::Rng;

use crate::components::{AimTarget, InputSample, Player};
use crate::locomotion::LocomotionController;
use crate::projectile::Projectile;
use crate::DeterministicRng;

/// Система: обработка спуска для player-controlled стрелков
pub fn player_fire(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut commands: Commands,
    mut shot_events: EventWriter<ShotFired>,
    mut ammo_events: EventWriter<AmmoChanged>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &LocomotionController,
            &InputSample,
            &AimTarget,
            &mut Gun,
            &mut Ammo,
        ),
        With<Player>,
    >,
) {
    let now = time.elapsed_secs();

    for (entity, transform, controller, sample, aim, mut gun, mut ammo) in players.iter_mut() {
        if !sample.aiming || !sample.trigger_held || ammo.is_empty() {
            continue;
        }
        if !gun.ready(now) {
            continue;
        }

        let position = transform.translation;
        let base_direction = aim.direction_from(position, controller.state.facing);
        let direction = spread_direction(base_direction, gun.config.spread, &mut rng);
        let origin = position
            + controller.state.facing * 0.5
            + Vec3::Y * gun.config.muzzle_height;

        commands.spawn((
            Transform::from_translation(origin),
            Projectile {
                shooter: entity,
                velocity: direction * gun.config.bullet_speed,
                damage: gun.config.bullet_damage,
                lifetime: gun.config.bullet_lifetime,
            },
        ));

        gun.last_shot_time = now;
        ammo.spend();

        shot_events.write(ShotFired {
            shooter: entity,
            origin,
            direction,
        });
        ammo_events.write(AmmoChanged {
            current: ammo.current,
            max: ammo.max,
        });
        crate::log(&format!(
            "Player {:?}: shot fired ({} / {} ammo left)",
            entity, ammo.current, ammo.max
        ));
    }
}

/// Случайный разброс: смещение по каждой оси в [-spread, spread]
fn spread_direction(direction: Vec3, spread: f32, rng: &mut DeterministicRng) -> Vec3 {
    if spread <= 0.0 {
        return direction;
    }
    let jitter = Vec3::new(
        rng.rng.gen_range(-spread..spread),
        rng.rng.gen_range(-spread..spread),
        rng.rng.gen_range(-spread..spread),
    );
    (direction + jitter).try_normalize().unwrap_or(direction)
}

/// Plugin: события стрельбы + fire система после locomotion
pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ShotFired>()
            .add_event::<AmmoChanged>()
            .add_systems(FixedUpdate, player_fire.in_set(crate::SimSet::Shooting));
    }
}
