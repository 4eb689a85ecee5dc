//! Headless симуляция DUSKHORDE
//!
//! Запускает Bevy App без рендера: игрок стоит на арене, спавнер гонит
//! волны врагов. Для проверки детерминизма и профилирования тика.

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use duskhorde_simulation::{
    create_headless_app, spawn_ammo_pickup, spawn_player, InputSample, LocomotionConfig,
    MonsterSpawner,
};

fn main() {
    let seed = 42;
    println!("Starting DUSKHORDE headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.world_mut()
        .run_system_once(setup_arena)
        .expect("arena setup");

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    println!("Simulation complete!");
}

fn setup_arena(mut commands: Commands) {
    let player = spawn_player(&mut commands, Vec3::ZERO, LocomotionConfig::default());
    // Игрок целится и держит спуск: стрельба идёт с первого тика
    commands.entity(player).insert(InputSample {
        move_axes: Vec2::ZERO,
        aiming: true,
        trigger_held: true,
    });

    commands.spawn((
        MonsterSpawner::default(),
        Transform::from_translation(Vec3::new(0.0, 0.0, -12.0)),
    ));
    spawn_ammo_pickup(&mut commands, Vec3::new(2.0, 0.0, 0.0));
}
