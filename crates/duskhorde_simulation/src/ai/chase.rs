//! Преследование, атака и обработка попаданий
//!
//! Seek прямолинейный: host с настоящим navmesh подменяет destination
//! своим path following, семантика FSM от этого не меняется.

use bevy::prelude::*;

use crate::components::{Health, Player};
use crate::components::MovementSpeed;
use crate::effects::{DespawnAfter, Dissolve, HitFlash};
use crate::projectile::ProjectileImpact;

use super::link_mover::LinkTraversal;
use super::{AttackStarted, Enemy, EnemyConfig, EnemyDied, EnemyState, RagdollActivated};

/// Сколько труп лежит до полного despawn (s)
pub const CORPSE_LIFETIME: f32 = 5.0;
/// Задержка перед растворением трупа (s)
pub const DISSOLVE_DELAY: f32 = 2.0;
/// Длительность растворения (s)
pub const DISSOLVE_DURATION: f32 = 2.0;

/// Система: Pursue — бег к ближайшему игроку, переход в Attack в упор
pub fn enemy_pursuit(
    time: Res<Time<Fixed>>,
    mut attack_events: EventWriter<AttackStarted>,
    mut enemies: Query<
        (
            Entity,
            &mut Transform,
            &mut EnemyState,
            &EnemyConfig,
            &MovementSpeed,
        ),
        (With<Enemy>, Without<LinkTraversal>, Without<Player>),
    >,
    players: Query<(Entity, &Transform), With<Player>>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut state, config, speed) in enemies.iter_mut() {
        if *state != EnemyState::Pursue {
            continue;
        }

        let Some((target, target_transform)) = nearest_player(transform.translation, &players)
        else {
            continue;
        };

        let to_target = target_transform.translation - transform.translation;
        let planar = Vec3::new(to_target.x, 0.0, to_target.z);
        let distance = planar.length();

        if distance <= config.attack_distance {
            *state = EnemyState::Attack {
                timer: config.attack_duration,
            };
            attack_events.write(AttackStarted {
                attacker: entity,
                target,
            });
            crate::log(&format!("Enemy {:?}: attack on {:?}", entity, target));
            continue;
        }

        let step = planar / distance * speed.speed * dt;
        // Не перескакиваем цель за один тик
        let step = if step.length() >= distance {
            planar
        } else {
            step
        };
        transform.translation += step;
        transform.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, planar / distance);
    }
}

/// Система: таймер атаки; по истечении удар и возврат в Pursue
pub fn tick_attacks(
    time: Res<Time<Fixed>>,
    mut enemies: Query<(Entity, &Transform, &mut EnemyState, &EnemyConfig), With<Enemy>>,
    mut players: Query<(&Transform, &mut Health), (With<Player>, Without<Enemy>)>,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut state, config) in enemies.iter_mut() {
        let EnemyState::Attack { timer } = *state else {
            continue;
        };
        let timer = timer - dt;
        if timer > 0.0 {
            *state = EnemyState::Attack { timer };
            continue;
        }

        // Удар засчитывается только если игрок всё ещё в упор
        for (player_transform, mut health) in players.iter_mut() {
            let to_player = player_transform.translation - transform.translation;
            if Vec3::new(to_player.x, 0.0, to_player.z).length() <= config.attack_distance {
                health.take_damage(config.attack_damage);
                crate::log(&format!(
                    "Enemy {:?}: hit landed ({} hp left)",
                    entity, health.current
                ));
            }
        }
        *state = EnemyState::Pursue;
    }
}

/// Система: урон от пуль, вспышка, смерть → ragdoll + dissolve
pub fn handle_projectile_impacts(
    mut commands: Commands,
    mut impact_events: EventReader<ProjectileImpact>,
    mut died_events: EventWriter<EnemyDied>,
    mut ragdoll_events: EventWriter<RagdollActivated>,
    mut enemies: Query<(&mut Health, &mut EnemyState, &EnemyConfig), With<Enemy>>,
) {
    for impact in impact_events.read() {
        let Some(target) = impact.target else {
            continue;
        };
        let Ok((mut health, mut state, config)) = enemies.get_mut(target) else {
            continue;
        };
        if state.is_dead() {
            continue;
        }

        health.take_damage(impact.damage);
        commands.entity(target).insert(HitFlash::new());

        if health.is_alive() {
            continue;
        }

        *state = EnemyState::Dead;
        // Импульс по ходу пули
        let impulse = -impact.normal * config.death_impulse;
        ragdoll_events.write(RagdollActivated {
            entity: target,
            impulse,
        });
        died_events.write(EnemyDied { entity: target });
        commands.entity(target).insert((
            DespawnAfter::new(CORPSE_LIFETIME),
            Dissolve::new(DISSOLVE_DELAY, DISSOLVE_DURATION),
        ));
        crate::log(&format!("Enemy {:?}: died", target));
    }
}

fn nearest_player<'a>(
    origin: Vec3,
    players: &'a Query<(Entity, &Transform), With<Player>>,
) -> Option<(Entity, &'a Transform)> {
    players
        .iter()
        .min_by(|(_, a), (_, b)| {
            let da = a.translation.distance_squared(origin);
            let db = b.translation.distance_squared(origin);
            da.total_cmp(&db)
        })
        .map(|(entity, transform)| (entity, transform))
}
