//! Контракты tactical layer: ground probe и movement resolver
//!
//! Симуляция НЕ владеет коллизиями — host (engine) отдаёт нам два narrow
//! интерфейса:
//! - GroundProbe: сколько лучей веера достало до ходибельной поверхности
//! - MotionBody: применить displacement (host может обрезать его об солиды)
//!
//! Для headless прогонов и тестов есть FlatGround — бесконечный пол.

use bevy::prelude::*;

/// Количество лучей в ground probe веере (центр + 4 радиальных)
pub const PROBE_RAY_COUNT: u32 = 5;

/// Ground probe capability (вниз, до max_distance)
///
/// Возвращает сколько из 5 лучей попало в поверхность. Контроллер считает
/// себя на земле при >= 2 попаданиях — частичные свесы/кромки не роняют
/// персонажа в airborne.
pub trait GroundProbe {
    fn hit_count(&self, origin: Vec3, radius: f32, max_distance: f32) -> u32;
}

/// Смещения лучей веера: центр + 4 точки на горизонтальном радиусе капсулы
pub fn probe_offsets(radius: f32) -> [Vec3; PROBE_RAY_COUNT as usize] {
    [
        Vec3::ZERO,
        Vec3::new(radius, 0.0, 0.0),
        Vec3::new(-radius, 0.0, 0.0),
        Vec3::new(0.0, 0.0, radius),
        Vec3::new(0.0, 0.0, -radius),
    ]
}

/// Movement resolver capability
///
/// Контроллер вызывает slide() ДВАЖДЫ за тик: сначала горизонталь, потом
/// вертикаль. Порядок — контракт совместимости с resolver'ом коллизий,
/// не оптимизация.
pub trait MotionBody {
    /// Применить displacement (может быть обрезан об солиды)
    fn slide(&mut self, displacement: Vec3);

    /// Текущая позиция ног персонажа
    fn position(&self) -> Vec3;
}

/// Поверхность мира для headless режима: probe + обрезка displacement
pub trait Surface: GroundProbe + Send + Sync {
    /// Обрезать displacement об солиды (headless замена move_and_slide)
    fn clip(&self, origin: Vec3, displacement: Vec3) -> Vec3;
}

/// Бесконечный плоский пол на фиксированной высоте
///
/// Достаточен для headless симуляции: враги и игрок бегают по одной
/// плоскости, вертикаль нужна только прыжкам.
#[derive(Debug, Clone, Copy)]
pub struct FlatGround {
    pub height: f32,
}

impl Default for FlatGround {
    fn default() -> Self {
        Self { height: 0.0 }
    }
}

impl GroundProbe for FlatGround {
    fn hit_count(&self, origin: Vec3, _radius: f32, max_distance: f32) -> u32 {
        // Пол плоский и бесконечный: либо все лучи достают, либо ни один
        let distance = origin.y - self.height;
        if distance >= 0.0 && distance <= max_distance {
            PROBE_RAY_COUNT
        } else {
            0
        }
    }
}

impl Surface for FlatGround {
    fn clip(&self, origin: Vec3, displacement: Vec3) -> Vec3 {
        let target_y = origin.y + displacement.y;
        if target_y < self.height {
            // Режем вертикаль об пол
            Vec3::new(displacement.x, self.height - origin.y, displacement.z)
        } else {
            displacement
        }
    }
}

/// MotionBody поверх Transform: displacement режется об Surface
///
/// ECS glue оборачивает Transform персонажа в это на время advance().
pub struct SurfaceBody<'a> {
    pub transform: &'a mut Transform,
    pub surface: &'a dyn Surface,
}

impl MotionBody for SurfaceBody<'_> {
    fn slide(&mut self, displacement: Vec3) {
        let clipped = self.surface.clip(self.transform.translation, displacement);
        self.transform.translation += clipped;
    }

    fn position(&self) -> Vec3 {
        self.transform.translation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_ground_probe() {
        let ground = FlatGround { height: 0.0 };
        // Ноги на полу, origin на probe_lift выше
        assert_eq!(ground.hit_count(Vec3::new(0.0, 0.1, 0.0), 0.4, 0.3), 5);
        // Высоко над полом — ни одного попадания
        assert_eq!(ground.hit_count(Vec3::new(0.0, 2.0, 0.0), 0.4, 0.3), 0);
    }

    #[test]
    fn test_flat_ground_clips_vertical() {
        let ground = FlatGround { height: 0.0 };
        let clipped = ground.clip(Vec3::new(0.0, 0.05, 0.0), Vec3::new(1.0, -0.5, 0.0));
        assert_eq!(clipped.x, 1.0);
        assert_eq!(clipped.y, -0.05);
    }

    #[test]
    fn test_probe_fan_layout() {
        let offsets = probe_offsets(0.4);
        assert_eq!(offsets[0], Vec3::ZERO);
        for offset in &offsets[1..] {
            assert!((offset.length() - 0.4).abs() < 1e-6);
            assert_eq!(offset.y, 0.0);
        }
    }
}
