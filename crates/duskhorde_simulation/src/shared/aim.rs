//! Aim target resolver: курсорный луч → точка на плоскости земли
//!
//! Host отдаёт луч из камеры через курсор (CursorRay), симуляция проецирует
//! его на горизонтальную плоскость персонажа и пишет AimTarget.

use bevy::prelude::*;

use crate::components::{AimTarget, Player};

/// Resource: луч из камеры через экранный курсор (host пишет каждый кадр)
#[derive(Resource, Debug, Clone, Copy)]
pub struct CursorRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Default for CursorRay {
    fn default() -> Self {
        Self {
            origin: Vec3::new(0.0, 10.0, 0.0),
            direction: Vec3::NEG_Y,
        }
    }
}

/// Пересечение луча с горизонтальной плоскостью y = plane_height
///
/// None когда луч параллелен плоскости или смотрит от неё.
pub fn project_ray_onto_plane(origin: Vec3, direction: Vec3, plane_height: f32) -> Option<Vec3> {
    if direction.y.abs() < 1e-6 {
        return None;
    }
    let t = (plane_height - origin.y) / direction.y;
    if t < 0.0 {
        return None;
    }
    Some(origin + direction * t)
}

/// Система: обновить AimTarget игроков из курсорного луча
///
/// Плоскость прицеливания проходит через ноги персонажа. Если луч мимо
/// (камера смотрит в небо) — точка прицела не трогается, остаётся прошлая.
pub fn resolve_aim_targets(
    ray: Res<CursorRay>,
    mut players: Query<(&Transform, &mut AimTarget), With<Player>>,
) {
    for (transform, mut aim) in players.iter_mut() {
        if let Some(point) =
            project_ray_onto_plane(ray.origin, ray.direction, transform.translation.y)
        {
            aim.point = point;
        }
    }
}
