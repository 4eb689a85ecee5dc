//! Пули: интеграция полёта + swept попадания
//!
//! Пуля быстрая (20 m/s при тике 1/60 — треть метра за шаг), поэтому
//! попадание ищем по отрезку текущего шага, а не по точке: сегмент против
//! сфер врагов. Туннелирование сквозь тонкую цель исключено.

use bevy::prelude::*;

use crate::ai::Enemy;
use crate::components::Health;
use crate::locomotion::GroundField;

/// Радиус тела врага для swept теста (м)
pub const ENEMY_BODY_RADIUS: f32 = 0.5;
/// Высота центра тела врага над ногами (м)
pub const ENEMY_CENTER_HEIGHT: f32 = 0.9;

/// Летящая пуля
#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub shooter: Entity,
    pub velocity: Vec3,
    pub damage: u32,
    /// Оставшееся время жизни (s); истекло — пуля исчезает без импакта
    pub lifetime: f32,
}

/// Event: пуля во что-то попала
///
/// target = None — попадание в мир (пол/стена), host рисует искры;
/// target = Some — попадание по врагу, урон применяет ai слой.
#[derive(Event, Debug, Clone)]
pub struct ProjectileImpact {
    pub shooter: Entity,
    pub target: Option<Entity>,
    pub point: Vec3,
    pub normal: Vec3,
    pub damage: u32,
}

/// Пересечение отрезка start..start+step со сферой; t ∈ [0, 1]
pub fn segment_sphere_intersection(
    start: Vec3,
    step: Vec3,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let a = step.dot(step);
    if a < 1e-12 {
        return None;
    }
    let offset = start - center;
    let b = 2.0 * step.dot(offset);
    let c = offset.dot(offset) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

/// Система: интеграция пуль + поиск попаданий за шаг
pub fn integrate_projectiles(
    time: Res<Time<Fixed>>,
    ground: Res<GroundField>,
    mut commands: Commands,
    mut impact_events: EventWriter<ProjectileImpact>,
    mut projectiles: Query<(Entity, &mut Transform, &mut Projectile)>,
    targets: Query<(Entity, &Transform, &Health), (With<Enemy>, Without<Projectile>)>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut projectile) in projectiles.iter_mut() {
        projectile.lifetime -= dt;
        if projectile.lifetime <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }

        let start = transform.translation;
        let step = projectile.velocity * dt;

        // Ближайший враг, пересечённый отрезком шага
        let mut best: Option<(Entity, f32)> = None;
        for (target, target_transform, health) in targets.iter() {
            if !health.is_alive() {
                continue;
            }
            let center = target_transform.translation + Vec3::Y * ENEMY_CENTER_HEIGHT;
            if let Some(t) = segment_sphere_intersection(start, step, center, ENEMY_BODY_RADIUS) {
                if best.map_or(true, |(_, best_t)| t < best_t) {
                    best = Some((target, t));
                }
            }
        }

        if let Some((target, t)) = best {
            impact_events.write(ProjectileImpact {
                shooter: projectile.shooter,
                target: Some(target),
                point: start + step * t,
                normal: -projectile.velocity.normalize_or_zero(),
                damage: projectile.damage,
            });
            commands.entity(entity).despawn();
            continue;
        }

        // Мир: Surface обрезал шаг → воткнулись в пол
        let clipped = ground.0.clip(start, step);
        if (clipped - step).length_squared() > 1e-12 {
            impact_events.write(ProjectileImpact {
                shooter: projectile.shooter,
                target: None,
                point: start + clipped,
                normal: Vec3::Y,
                damage: projectile.damage,
            });
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation = start + step;
    }
}

/// Plugin: события импактов + интеграция пуль
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileImpact>().add_systems(
            FixedUpdate,
            integrate_projectiles.in_set(crate::SimSet::Projectiles),
        );
    }
}
