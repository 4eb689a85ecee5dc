//! Locomotion: машина состояний движения игрока + ECS glue
//!
//! Ядро (controller.rs) чистое и тестируется без ECS; здесь — компонентная
//! обвязка: events прыжка, resources поверхности/камеры и FixedUpdate
//! система, гоняющая advance() раз в тик.

pub mod animation;
pub mod config;
pub mod controller;
pub mod surface;

pub use animation::{AnimationChannels, AnimationParams, MotionPhase};
pub use config::LocomotionConfig;
pub use controller::{LocomotionController, LocomotionState, TickInput, GROUNDED_HIT_THRESHOLD};
pub use surface::{
    probe_offsets, FlatGround, GroundProbe, MotionBody, Surface, SurfaceBody, PROBE_RAY_COUNT,
};

use bevy::prelude::*;

use crate::components::{AimTarget, InputSample, Player};
use crate::shared::{resolve_aim_targets, CameraRig, CursorRay};

/// Event: намерение прыгнуть (edge, доставляется до тика locomotion)
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    pub entity: Entity,
}

/// Event: кнопка прыжка отпущена (variable jump height)
#[derive(Event, Debug, Clone)]
pub struct JumpReleased {
    pub entity: Entity,
}

/// Resource: поверхность мира
///
/// Headless режим работает на FlatGround; host с настоящими коллизиями
/// подменяет на свою реализацию Surface.
#[derive(Resource)]
pub struct GroundField(pub Box<dyn Surface>);

impl Default for GroundField {
    fn default() -> Self {
        Self(Box::new(FlatGround::default()))
    }
}

/// Система: один тик locomotion для каждого player-controlled персонажа
///
/// Снапшот анимации пишется в AnimationChannels ПОСЛЕ resolve движения —
/// animation driver всегда видит скорректированное состояние тика.
pub fn drive_locomotion(
    time: Res<Time<Fixed>>,
    ground: Res<GroundField>,
    rig: Res<CameraRig>,
    mut jump_intents: EventReader<JumpIntent>,
    mut jump_releases: EventReader<JumpReleased>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut LocomotionController,
            &InputSample,
            &AimTarget,
            &mut AnimationChannels,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let now = time.elapsed_secs();

    let pressed: Vec<Entity> = jump_intents.read().map(|event| event.entity).collect();
    let released: Vec<Entity> = jump_releases.read().map(|event| event.entity).collect();

    for (entity, mut transform, mut controller, sample, aim, mut channels) in players.iter_mut() {
        let input = TickInput {
            move_axes: sample.move_axes,
            aim_point: aim.point,
            aiming: sample.aiming,
            jump_pressed: pressed.contains(&entity),
            jump_released: released.contains(&entity),
        };

        let was_airborne = !controller.state.grounded;
        let prev_jump_start = controller.state.jump_start;

        let params = {
            let mut body = SurfaceBody {
                transform: &mut transform,
                surface: ground.0.as_ref(),
            };
            controller.advance(dt, now, &input, ground.0.as_ref(), &rig.basis, &mut body)
        };

        channels.0 = params;
        transform.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, controller.state.facing);

        if controller.state.jump_start != prev_jump_start && controller.state.jump_start.is_some()
        {
            crate::log(&format!(
                "Player {:?}: jump started (v0 = {:.2} m/s)",
                entity,
                controller.config.initial_jump_speed()
            ));
        }
        if was_airborne && controller.state.grounded {
            crate::log(&format!("Player {:?}: landed", entity));
        }
    }
}

/// Spawn helper: player-controlled персонаж с полным набором компонентов
pub fn spawn_player(commands: &mut Commands, position: Vec3, config: LocomotionConfig) -> Entity {
    commands
        .spawn((
            Player,
            crate::components::Health::default(),
            Transform::from_translation(position),
            LocomotionController::new(config),
            InputSample::default(),
            AimTarget::default(),
            AnimationChannels::default(),
            crate::shooting::Gun::default(),
            crate::shooting::Ammo::default(),
        ))
        .id()
}

/// Plugin: регистрирует events, resources и тиковые системы locomotion
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<JumpIntent>()
            .add_event::<JumpReleased>()
            .init_resource::<GroundField>()
            .init_resource::<CameraRig>()
            .init_resource::<CursorRay>()
            .add_systems(
                FixedUpdate,
                (resolve_aim_targets, drive_locomotion)
                    .chain()
                    .in_set(crate::SimSet::Locomotion),
            );
    }
}
