//! Enemy AI: преследование, атака в упор, смерть с ragdoll
//!
//! FSM намеренно плоская: Pursue → Attack → Pursue, и терминальный Dead.
//! Навигация по navmesh — забота host (здесь прямолинейный seek);
//! переходы через off-mesh links симулируются в link_mover.

pub mod chase;
pub mod link_mover;

pub use chase::{enemy_pursuit, handle_projectile_impacts, tick_attacks};
pub use link_mover::{
    begin_link_traversals, parabola_offset, traverse_links, LinkTraversal, NavLink, NavLinks,
    TraversalMethod,
};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker: враг
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Enemy;

/// Состояние enemy FSM
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum EnemyState {
    /// Бежит к ближайшему игроку
    Pursue,
    /// В упор: замер на attack_duration, наносит удар
    Attack { timer: f32 },
    /// Труп: ragdoll у host, системы AI его не трогают
    Dead,
}

impl Default for EnemyState {
    fn default() -> Self {
        Self::Pursue
    }
}

impl EnemyState {
    pub fn is_dead(&self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Параметры поведения врага (тюнинг, serde-загружаемый)
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Дистанция перехода Pursue → Attack (м)
    pub attack_distance: f32,
    /// Длительность атаки; на это время враг замирает (s)
    pub attack_duration: f32,
    /// Урон одного удара
    pub attack_damage: u32,
    /// Импульс ragdoll при смерти
    pub death_impulse: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            attack_distance: 2.0,
            attack_duration: 1.5,
            attack_damage: 10,
            death_impulse: 50.0,
        }
    }
}

/// Event: враг начал атаку (host играет анимацию удара)
#[derive(Event, Debug, Clone)]
pub struct AttackStarted {
    pub attacker: Entity,
    pub target: Entity,
}

/// Event: враг погиб
#[derive(Event, Debug, Clone)]
pub struct EnemyDied {
    pub entity: Entity,
}

/// Event: host включает ragdoll и толкает труп
#[derive(Event, Debug, Clone)]
pub struct RagdollActivated {
    pub entity: Entity,
    pub impulse: Vec3,
}

/// Spawn helper: враг с полным набором компонентов
pub fn spawn_enemy(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Enemy,
            EnemyState::default(),
            EnemyConfig::default(),
            crate::components::Health::new(30),
            crate::components::MovementSpeed::default(),
            Transform::from_translation(position),
        ))
        .id()
}

/// Plugin: события AI + системы преследования/атаки/смерти
pub struct AiPlugin;

impl Plugin for AiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttackStarted>()
            .add_event::<EnemyDied>()
            .add_event::<RagdollActivated>()
            .init_resource::<NavLinks>()
            .add_systems(
                FixedUpdate,
                (
                    begin_link_traversals,
                    traverse_links,
                    enemy_pursuit,
                    tick_attacks,
                    handle_projectile_impacts,
                )
                    .chain()
                    .in_set(crate::SimSet::Ai),
            );
    }
}
