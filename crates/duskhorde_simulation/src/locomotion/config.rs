//! Тюнинг locomotion контроллера
//!
//! Все пороги подобраны вручную под текущие анимации. Контроллер читает их
//! ТОЛЬКО отсюда — никаких зашитых литералов в тиковом коде, host может
//! загрузить свой набор из данных (serde).

use serde::{Deserialize, Serialize};

/// Параметры движения и прыжка персонажа
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Базовая горизонтальная скорость (m/s)
    pub player_speed: f32,
    /// Скорость доворота facing к aim направлению (1/s)
    pub rotation_speed: f32,
    /// Гравитация (m/s², отрицательная)
    pub gravity: f32,
    /// Высота прыжка (м) — начальная скорость выводится из неё
    pub jump_height: f32,

    /// Дальность лучей ground probe (м)
    pub ground_check_distance: f32,
    /// Подъём origin лучей над ногами (м), чтобы не стартовать внутри пола
    pub probe_lift: f32,
    /// Горизонтальный радиус капсулы — разнос боковых лучей probe fan
    pub body_radius: f32,

    /// Ниже этой вертикальной скорости airborne фаза считается падением
    pub fall_threshold: f32,
    /// Выше этой вертикальной скорости airborne фаза считается взлётом
    pub rise_threshold: f32,
    /// Минимальное время в воздухе до high-jump / разблокировки анимаций (s)
    pub min_air_time: f32,
    /// Длительность landing позы (s)
    pub landing_duration: f32,
    /// Пауза между прыжками (s)
    pub jump_cooldown: f32,
    /// Coyote time: прыжок разрешён ещё столько секунд после схода с земли
    pub coyote_time: f32,
    /// Jump lock: forced-airborne окно после старта прыжка (s)
    pub jump_lock_duration: f32,
    /// Debounce повторного прыжка от старта предыдущего (s)
    pub jump_debounce: f32,

    /// Замедление при прицеливании
    pub aiming_speed_multiplier: f32,
    /// Ускорение при движении в сторону прицела
    pub forward_boost_multiplier: f32,
    /// Порог dot(move, aim) для forward boost
    pub forward_boost_dot: f32,

    /// Deadzone стиков/осей
    pub input_deadzone: f32,
    /// Прижимная вертикальная скорость на земле (держит контакт)
    pub grounded_stick_velocity: f32,
    /// Предельная скорость падения (m/s, отрицательная)
    pub terminal_velocity: f32,
    /// Доп. смещение вниз на кадре приземления (анти-float snap, м)
    pub landing_snap: f32,

    /// Время сглаживания анимационной скорости при разгоне (s)
    pub smooth_time_moving: f32,
    /// Время сглаживания при остановке (s) — короче, чтобы стоп читался сразу
    pub smooth_time_stopping: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            rotation_speed: 10.0,
            gravity: -20.0,
            jump_height: 2.0,

            ground_check_distance: 0.3,
            probe_lift: 0.1,
            body_radius: 0.4,

            fall_threshold: -2.0,
            rise_threshold: 0.1,
            min_air_time: 0.3,
            landing_duration: 0.3,
            jump_cooldown: 0.1,
            coyote_time: 0.1,
            jump_lock_duration: 0.3,
            jump_debounce: 0.1,

            aiming_speed_multiplier: 0.5,
            forward_boost_multiplier: 1.5,
            forward_boost_dot: 0.7,

            input_deadzone: 0.1,
            grounded_stick_velocity: -0.1,
            terminal_velocity: -50.0,
            landing_snap: 0.2,

            smooth_time_moving: 0.2,
            smooth_time_stopping: 0.05,
        }
    }
}

impl LocomotionConfig {
    /// Начальная скорость прыжка из высоты: sqrt(2·h·|g|), clamp к |g|/2
    ///
    /// Clamp страхует от конфигов с маленькой гравитацией и огромной высотой,
    /// где скорость вылета ломала бы jump lock окно.
    pub fn initial_jump_speed(&self) -> f32 {
        let speed = (2.0 * self.jump_height * self.gravity.abs()).sqrt();
        speed.clamp(0.0, self.gravity.abs() * 0.5)
    }
}
