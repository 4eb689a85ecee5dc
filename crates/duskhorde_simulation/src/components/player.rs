//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// AI systems используют `Without<Player>` filter, input/locomotion systems —
/// `With<Player>`. В single-player режиме компонент ровно у одного entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
