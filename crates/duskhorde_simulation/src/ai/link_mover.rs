//! Off-mesh links: прыжки врагов через разрывы navmesh
//!
//! Host отдаёт список link-ов (края обрывов, перила). Враг, вставший на
//! вход link-а, на duration секунд выпадает из обычного seek и летит по
//! параболе (или по заранее сэмплированной кривой) к выходу.

use bevy::prelude::*;

use crate::components::Player;

use super::{Enemy, EnemyState};

/// Радиус захвата входа link-а (м)
pub const LINK_ENTRY_RADIUS: f32 = 0.6;
/// Длительность перелёта по умолчанию (s)
pub const LINK_DURATION: f32 = 0.7;
/// Высота параболы по умолчанию (м)
pub const LINK_PARABOLA_HEIGHT: f32 = 1.0;

/// Один off-mesh link (двунаправленный)
#[derive(Debug, Clone, Copy)]
pub struct NavLink {
    pub start: Vec3,
    pub end: Vec3,
}

/// Resource: все link-и уровня (пустой в headless по умолчанию)
#[derive(Resource, Debug, Clone, Default)]
pub struct NavLinks(pub Vec<NavLink>);

/// Способ перелёта
#[derive(Debug, Clone)]
pub enum TraversalMethod {
    /// Парабола: yOffset = height · 4 · (t − t²)
    Parabola { height: f32 },
    /// Кусочно-линейная кривая из нормализованных вертикальных смещений
    Curve { samples: Vec<f32> },
}

/// Компонент активного перелёта; пока висит — seek выключен
#[derive(Component, Debug, Clone)]
pub struct LinkTraversal {
    pub start: Vec3,
    pub end: Vec3,
    pub elapsed: f32,
    pub duration: f32,
    pub method: TraversalMethod,
}

impl LinkTraversal {
    pub fn parabola(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            elapsed: 0.0,
            duration: LINK_DURATION,
            method: TraversalMethod::Parabola {
                height: LINK_PARABOLA_HEIGHT,
            },
        }
    }

    /// Позиция на перелёте при нормализованном t ∈ [0, 1]
    pub fn sample(&self, t: f32) -> Vec3 {
        let base = self.start.lerp(self.end, t);
        let lift = match &self.method {
            TraversalMethod::Parabola { height } => parabola_offset(*height, t),
            TraversalMethod::Curve { samples } => sample_curve(samples, t),
        };
        base + Vec3::Y * lift
    }
}

/// Вертикальное смещение параболы: 0 на краях, height в середине
pub fn parabola_offset(height: f32, t: f32) -> f32 {
    height * 4.0 * (t - t * t)
}

fn sample_curve(samples: &[f32], t: f32) -> f32 {
    match samples.len() {
        0 => 0.0,
        1 => samples[0],
        n => {
            let scaled = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let index = (scaled as usize).min(n - 2);
            let fraction = scaled - index as f32;
            samples[index] + (samples[index + 1] - samples[index]) * fraction
        }
    }
}

/// Система: враг у входа link-а, выход ближе к игроку → начать перелёт
pub fn begin_link_traversals(
    links: Res<NavLinks>,
    mut commands: Commands,
    enemies: Query<
        (Entity, &Transform, &EnemyState),
        (With<Enemy>, Without<LinkTraversal>),
    >,
    players: Query<&Transform, With<Player>>,
) {
    if links.0.is_empty() {
        return;
    }
    let Some(player) = players.iter().next() else {
        return;
    };
    let goal = player.translation;

    for (entity, transform, state) in enemies.iter() {
        if state.is_dead() {
            continue;
        }
        let position = transform.translation;

        for link in &links.0 {
            // Link двунаправленный: входом считается ближний конец
            let (entry, exit) = if position.distance(link.start) <= position.distance(link.end) {
                (link.start, link.end)
            } else {
                (link.end, link.start)
            };
            if position.distance(entry) > LINK_ENTRY_RADIUS {
                continue;
            }
            if exit.distance(goal) >= position.distance(goal) {
                continue;
            }
            commands
                .entity(entity)
                .insert(LinkTraversal::parabola(position, exit));
            crate::log(&format!("Enemy {:?}: traversing nav link", entity));
            break;
        }
    }
}

/// Система: продвижение активных перелётов
pub fn traverse_links(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut enemies: Query<(Entity, &mut Transform, &mut LinkTraversal, &EnemyState)>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut traversal, state) in enemies.iter_mut() {
        // Смерть в полёте: ragdoll падает где был
        if state.is_dead() {
            commands.entity(entity).remove::<LinkTraversal>();
            continue;
        }

        traversal.elapsed += dt;
        let t = (traversal.elapsed / traversal.duration).min(1.0);
        transform.translation = traversal.sample(t);

        if t >= 1.0 {
            commands.entity(entity).remove::<LinkTraversal>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parabola_zero_at_edges_peak_at_middle() {
        assert_eq!(parabola_offset(1.0, 0.0), 0.0);
        assert_eq!(parabola_offset(1.0, 1.0), 0.0);
        assert_eq!(parabola_offset(1.0, 0.5), 1.0);
    }

    #[test]
    fn test_traversal_ends_exactly_at_exit() {
        let traversal =
            LinkTraversal::parabola(Vec3::ZERO, Vec3::new(3.0, -2.0, 0.0));
        assert_eq!(traversal.sample(1.0), Vec3::new(3.0, -2.0, 0.0));
    }

    #[test]
    fn test_curve_sampling_interpolates() {
        let curve = TraversalMethod::Curve {
            samples: vec![0.0, 1.0, 0.0],
        };
        let traversal = LinkTraversal {
            start: Vec3::ZERO,
            end: Vec3::X,
            elapsed: 0.0,
            duration: LINK_DURATION,
            method: curve,
        };
        assert!((traversal.sample(0.25).y - 0.5).abs() < 1e-5);
        assert!((traversal.sample(0.5).y - 1.0).abs() < 1e-5);
    }
}
