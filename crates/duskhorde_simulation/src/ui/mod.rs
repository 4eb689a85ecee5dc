//! HUD-модель: готовые строки для host-рендера
//!
//! Симуляция не рисует — она держит текст HUD актуальным, host просто
//! выводит его.

use bevy::prelude::*;

use crate::shooting::AmmoChanged;

/// Resource: строка счётчика патронов
#[derive(Resource, Debug, Clone)]
pub struct AmmoHud {
    pub line: String,
}

impl Default for AmmoHud {
    fn default() -> Self {
        Self {
            line: String::new(),
        }
    }
}

/// Система: обновление строки по событиям боезапаса
pub fn update_ammo_hud(mut hud: ResMut<AmmoHud>, mut events: EventReader<AmmoChanged>) {
    for event in events.read() {
        hud.line = format!("Ammo: {}/{}", event.current, event.max);
    }
}

/// Plugin: HUD-модель
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AmmoHud>()
            .add_systems(FixedUpdate, update_ammo_hud.in_set(crate::SimSet::Hud));
    }
}
